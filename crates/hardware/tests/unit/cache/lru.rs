//! Recency Clock and Victim Selection Tests.
//!
//! Verifies that the clock issues unique, strictly increasing, positive stamps
//! and that victim selection picks the earliest minimum stamp in way order.

use csim_core::cache::{CacheLine, RecencyClock, select_victim};

/// Builds a set from `(valid, recency)` pairs.
fn set_of(lines: &[(bool, u64)]) -> Vec<CacheLine> {
    lines
        .iter()
        .map(|&(valid, recency)| CacheLine {
            valid,
            tag: 0,
            recency,
        })
        .collect()
}

#[test]
fn clock_starts_at_zero() {
    let clock = RecencyClock::new();
    assert_eq!(clock.now(), 0);
    assert_eq!(RecencyClock::default(), clock);
}

/// Stamps are 1, 2, 3, ... so they always beat an untouched line's 0.
#[test]
fn clock_issues_increasing_positive_stamps() {
    let mut clock = RecencyClock::new();
    let stamps: Vec<u64> = (0..5).map(|_| clock.tick()).collect();
    assert_eq!(stamps, vec![1, 2, 3, 4, 5]);
    assert_eq!(clock.now(), 5);
}

#[test]
fn single_line_is_always_victim() {
    assert_eq!(select_victim(&set_of(&[(true, 42)])), 0);
    assert_eq!(select_victim(&set_of(&[(false, 0)])), 0);
}

/// All lines untouched: the leftmost wins.
#[test]
fn empty_set_picks_first_way() {
    assert_eq!(select_victim(&set_of(&[(false, 0); 8])), 0);
}

/// The first untouched line after some filled ones is chosen.
#[test]
fn partially_filled_set_picks_first_empty_way() {
    let set = set_of(&[(true, 3), (true, 5), (false, 0), (false, 0)]);
    assert_eq!(select_victim(&set), 2);
}

#[test]
fn full_set_picks_oldest() {
    let set = set_of(&[(true, 9), (true, 4), (true, 7), (true, 6)]);
    assert_eq!(select_victim(&set), 1);
}

/// Equal stamps resolve to the earliest way (strictly-less scan).
#[test]
fn ties_resolve_to_earliest_way() {
    let set = set_of(&[(true, 5), (true, 2), (true, 2), (true, 8)]);
    assert_eq!(select_victim(&set), 1);
}

/// Validity plays no part in the choice; only the stamp does.
#[test]
fn validity_does_not_affect_choice() {
    let set = set_of(&[(false, 6), (true, 3)]);
    assert_eq!(select_victim(&set), 1);
}
