//! Compact weighted finite state transducer built from AT&T text.
//!
//! This crate reads the tab-separated AT&T FSM format line by line and packs
//! the result into flat, index-addressed arrays: one array of states, one of
//! arcs, and a symbol table shared by input and output labels.
//!
//! # Architecture
//!
//! - [`transition`] -- `#[repr(C)]` state and arc records
//! - [`symbols`] -- Symbol table (label interning, epsilon at index 0)
//! - [`automaton`] -- Packed automaton storage and growth policy
//! - [`att`] -- Line-oriented AT&T parser
//! - [`config`] -- Reserve sizes and post-parse options
//! - [`dump`] -- Human-readable rendering

pub mod att;
pub mod automaton;
pub mod config;
pub mod dump;
pub mod symbols;
pub mod transition;

pub use att::{AttParser, parse_att, parse_att_lines, parse_att_str, parse_att_with};
pub use automaton::PackedFst;
pub use config::ParseConfig;

/// Display string of the epsilon symbol, always interned at index 0.
pub const EPSILON: &str = "@0@";

/// Symbol index of epsilon.
pub const EPSILON_INDEX: u32 = 0;

/// Final weight of a state that does not accept.
pub const NOT_FINAL: f32 = f32::INFINITY;

/// Maximum number of fields an AT&T line may carry.
pub const MAX_FIELDS: usize = 5;

/// Top-level error type for reading an AT&T transducer.
#[derive(Debug, thiserror::Error)]
pub enum TinyFstError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {kind}")]
    Parse { line: usize, kind: ParseError },
    #[error("parse already failed at line {line}")]
    Aborted { line: usize },
}

impl TinyFstError {
    /// The 1-based line number of a parse error, `None` for I/O failures.
    pub fn line(&self) -> Option<usize> {
        match self {
            TinyFstError::Io(_) => None,
            TinyFstError::Parse { line, .. } | TinyFstError::Aborted { line } => Some(*line),
        }
    }

    /// The parse error kind of the failing line.
    pub fn kind(&self) -> Option<&ParseError> {
        match self {
            TinyFstError::Parse { kind, .. } => Some(kind),
            _ => None,
        }
    }
}

/// Fatal problems with a single AT&T line.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("empty line")]
    EmptyLine,
    #[error("cannot parse line with 3 columns: {line:?}")]
    ThreeColumns { line: String },
    #[error("cannot parse line with more than 5 columns, extra field {field:?}")]
    TooManyColumns { field: String },
    #[error("{field:?} not a number")]
    NotANumber { field: String },
    #[error("{field:?} does not fit in a state index")]
    NumberOutOfRange { field: String },
    #[error("{field:?} not a float")]
    NotAFloat { field: String },
    #[error("{field:?} is not a usable weight")]
    NanWeight { field: String },
    #[error("line is not valid UTF-8: {line:?}")]
    InvalidUtf8 { line: String },
    #[error("trailing characters after number in {field:?}")]
    TrailingGarbage { field: String },
    #[error("state {state} appears after state {current}; lines must be grouped by ascending source state")]
    UnorderedState { state: u32, current: u32 },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Violations of the packed storage limits and invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("state {state} does not exist")]
    UnknownState { state: u32 },
    #[error("arcs of state {state} would not be contiguous")]
    InterleavedArcs { state: u32 },
    #[error("state {state} has more than {max} arcs", max = u16::MAX)]
    TooManyArcs { state: u32 },
    #[error("arc index does not fit in 32 bits")]
    ArcIndexOverflow,
    #[error("symbol index does not fit in 32 bits")]
    SymbolOverflow,
    #[error("could not allocate room for {requested} elements")]
    AllocationFailed { requested: usize },
}
