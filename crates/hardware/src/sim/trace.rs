//! Memory Trace Input.
//!
//! This module reads the plain-text traces produced by `valgrind --tool=lackey
//! --trace-mem=yes`. It performs:
//! 1. **Event typing:** Instruction fetches, loads, stores, and modifies.
//! 2. **Line parsing:** `"<kind> <hex-address>,<size>"`, tolerant of the leading
//!    space Valgrind puts before data accesses.
//! 3. **Lazy reading:** A line-at-a-time iterator over any buffered reader,
//!    reporting parse failures with their line number.
//!
//! ```text
//! I 0400d7d4,8
//!  M 0421c7f0,4
//!  L 04f6b868,8
//!  S 7ff0005c8,8
//! ```

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use crate::common::{ParseError, TraceError};

/// Kind of memory operation recorded in a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TraceKind {
    /// Instruction fetch (`I`). Not simulated by the data cache.
    Instruction,
    /// Data load (`L`).
    Load,
    /// Data store (`S`).
    Store,
    /// Data modify (`M`): a load followed by a store to the same address.
    Modify,
}

impl TraceKind {
    /// Parses a trace kind character.
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(Self::Instruction),
            'L' => Some(Self::Load),
            'S' => Some(Self::Store),
            'M' => Some(Self::Modify),
            _ => None,
        }
    }

    /// The character used for this kind in trace files.
    pub const fn as_char(self) -> char {
        match self {
            Self::Instruction => 'I',
            Self::Load => 'L',
            Self::Store => 'S',
            Self::Modify => 'M',
        }
    }

    /// Number of data-cache accesses this kind of event performs.
    ///
    /// Instruction fetches perform none, loads and stores one, modifies two.
    pub const fn access_count(self) -> usize {
        match self {
            Self::Instruction => 0,
            Self::Load | Self::Store => 1,
            Self::Modify => 2,
        }
    }
}

impl fmt::Display for TraceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One parsed trace line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TraceEvent {
    /// Operation kind.
    pub kind: TraceKind,
    /// Accessed address.
    pub address: u64,
    /// Access size in bytes. Carried for reporting; the cache model ignores it.
    pub size: u32,
}

impl TraceEvent {
    /// Creates an event.
    pub const fn new(kind: TraceKind, address: u64, size: u32) -> Self {
        Self {
            kind,
            address,
            size,
        }
    }
}

impl fmt::Display for TraceEvent {
    /// Formats the event in trace syntax, e.g. `L 10,1`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:x},{}", self.kind, self.address, self.size)
    }
}

impl FromStr for TraceEvent {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_line(s)?.ok_or_else(|| ParseError::Malformed(s.to_owned()))
    }
}

/// Parses a single trace line.
///
/// Surrounding whitespace is ignored, as is whitespace between the fields.
/// The address is hexadecimal with an optional `0x` prefix; the size is decimal.
///
/// # Returns
///
/// `Ok(None)` for a blank line, otherwise the parsed event.
///
/// # Errors
///
/// Returns a [`ParseError`] describing the first field that failed to parse.
///
/// # Examples
///
/// ```
/// use csim_core::sim::{parse_line, TraceEvent, TraceKind};
///
/// let event = parse_line(" M 0421c7f0,4").unwrap().unwrap();
/// assert_eq!(event, TraceEvent::new(TraceKind::Modify, 0x0421_c7f0, 4));
/// assert_eq!(parse_line("   ").unwrap(), None);
/// ```
pub fn parse_line(line: &str) -> Result<Option<TraceEvent>, ParseError> {
    let line = line.trim();
    let mut chars = line.chars();
    let Some(kind_char) = chars.next() else {
        return Ok(None);
    };
    let kind = TraceKind::from_char(kind_char).ok_or(ParseError::UnknownKind(kind_char))?;

    let (addr_text, size_text) = chars
        .as_str()
        .split_once(',')
        .ok_or_else(|| ParseError::Malformed(line.to_owned()))?;

    let addr_text = addr_text.trim();
    let digits = addr_text
        .strip_prefix("0x")
        .or_else(|| addr_text.strip_prefix("0X"))
        .unwrap_or(addr_text);
    let address = u64::from_str_radix(digits, 16)
        .map_err(|_| ParseError::BadAddress(addr_text.to_owned()))?;

    let size_text = size_text.trim();
    let size = size_text
        .parse::<u32>()
        .map_err(|_| ParseError::BadSize(size_text.to_owned()))?;

    Ok(Some(TraceEvent::new(kind, address, size)))
}

/// Lazy, line-at-a-time trace reader.
///
/// Yields one `Result` per non-blank line. After an error the reader may be
/// advanced again to continue with the next line.
#[derive(Debug)]
pub struct TraceReader<R> {
    reader: R,
    line: usize,
    buf: String,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps a buffered reader.
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: String::new(),
        }
    }

    /// 1-based number of the last line read (`0` before the first read).
    pub const fn line_number(&self) -> usize {
        self.line
    }
}

impl TraceReader<BufReader<File>> {
    /// Opens a trace file.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::Open`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TraceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceEvent, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line += 1;
                    match parse_line(&self.buf) {
                        Ok(Some(event)) => return Some(Ok(event)),
                        Ok(None) => {}
                        Err(source) => {
                            return Some(Err(TraceError::Parse {
                                line: self.line,
                                source,
                            }));
                        }
                    }
                }
                Err(e) => return Some(Err(TraceError::Io(e))),
            }
        }
    }
}
