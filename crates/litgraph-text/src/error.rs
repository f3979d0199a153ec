//! Error type shared by every converter.

use std::io;

use thiserror::Error;

use litgraph_core::NodeNumber;

/// Errors that can occur while decoding or encoding with a converter.
///
/// Every variant is fatal for the call that raised it; converters never
/// retry and never return partial values.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("unexpected end of input, expected {expected}")]
    PrematureEof { expected: &'static str },

    #[error("expected {}, found {}", show_byte(.expected), show_found(.found))]
    UnexpectedByte { expected: u8, found: Option<u8> },

    #[error("expected {expected}, found {}", show_found(.found))]
    MissingField {
        expected: &'static str,
        found: Option<u8>,
    },

    #[error("integer literal has a sign but no digits")]
    SignWithoutDigits,

    #[error("integer literal {literal:?} is out of range")]
    IntegerOverflow { literal: String },

    #[error("string literal exceeds the maximum scan length of {max} bytes")]
    MaxLengthExceeded { max: usize },

    #[error("string literal is not valid UTF-8")]
    InvalidUtf8,

    #[error("{literal:?} is not a quoted string literal")]
    NotQuoted { literal: String },

    #[error("unknown record tag {} in record #{record}", show_byte(.tag))]
    UnknownTag { tag: u8, record: NodeNumber },

    #[error("record number {number} is negative")]
    NegativeNumber { number: NodeNumber },

    #[error("record #{record}: {source}")]
    Record {
        record: NodeNumber,
        #[source]
        source: Box<CodecError>,
    },

    #[error("array length must be at least 1")]
    ZeroLength,

    #[error("expected {expected} array elements, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("expected a value of type {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl CodecError {
    /// Attach record context, unless the error already names its record.
    pub(crate) fn in_record(self, record: NodeNumber) -> Self {
        match self {
            err @ (CodecError::UnknownTag { .. } | CodecError::Record { .. }) => err,
            other => CodecError::Record {
                record,
                source: Box::new(other),
            },
        }
    }

    /// The record number this error refers to, if known.
    pub fn record(&self) -> Option<NodeNumber> {
        match self {
            CodecError::UnknownTag { record, .. } | CodecError::Record { record, .. } => {
                Some(*record)
            }
            CodecError::NegativeNumber { number } => Some(*number),
            _ => None,
        }
    }
}

fn show_byte(byte: &u8) -> String {
    if byte.is_ascii_graphic() || *byte == b' ' {
        format!("'{}'", char::from(*byte))
    } else {
        format!("byte 0x{byte:02x}")
    }
}

fn show_found(found: &Option<u8>) -> String {
    match found {
        Some(byte) => show_byte(byte),
        None => "end of input".to_string(),
    }
}
