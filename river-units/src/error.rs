//! Typed errors for unit parsing and conversion
//!
//! Nothing in this crate terminates the process or returns a placeholder
//! factor on failure. Every failure is one of these values.

use thiserror::Error;

/// Why a unit string was rejected by the grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("unit string is empty")]
    Empty,

    #[error("unit string is {len} bytes, limit is {max}")]
    TooLong { len: usize, max: usize },

    #[error("unit string starts with an operator")]
    LeadingOperator,

    #[error("operator at byte {position} follows another operator")]
    OperatorAfterOperator { position: usize },

    #[error("exponent at byte {position} does not follow a primitive")]
    ExponentWithoutPrimitive { position: usize },

    #[error("no known symbol starts at byte {position}")]
    UnrecognizedSymbol { position: usize },

    #[error("unit string ends with an operator")]
    TrailingOperator,
}

/// Error raised while building a `Unit` or scanning its text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid unit string \"{text}\": {reason}")]
    InvalidUnitString { text: String, reason: Rejection },

    #[error("unknown primitive \"{primitive}\" in unit string \"{text}\"")]
    UnknownPrimitive { text: String, primitive: String },

    #[error("cannot read \"{text}\" as {expected}")]
    Malformed { text: String, expected: &'static str },
}

impl ParseError {
    pub(crate) fn invalid(text: &str, reason: Rejection) -> Self {
        ParseError::InvalidUnitString { text: text.to_string(), reason }
    }

    /// The unit string that failed
    pub fn text(&self) -> &str {
        match self {
            ParseError::InvalidUnitString { text, .. } => text,
            ParseError::UnknownPrimitive { text, .. } => text,
            ParseError::Malformed { text, .. } => text,
        }
    }
}

/// Error raised while computing a scale factor
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("cannot convert \"{from}\" to \"{to}\": units are not in the same family")]
    IncompatibleUnits { from: String, to: String },

    #[error("exponent without a preceding ratio in \"{unit}\"")]
    DanglingExponent { unit: String },

    #[error(transparent)]
    Parse(#[from] ParseError),
}
