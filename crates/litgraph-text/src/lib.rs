//! Textual record format for litgraph, plus the converter framework it is
//! built on.
//!
//! ## Record Format
//!
//! ```text
//! #1 = I("type1")
//! #2 = I("type2")
//! #3 = R("child", 1, 2)
//! #4 = A(1, "color", "red")
//! ```
//!
//! One record per line. Strings are double-quoted with `"` and `\` escaped
//! by a backslash; integers are plain signed decimals.
//!
//! ## Layers
//!
//! ```text
//! bytes ─► IntegerLiteral / StringLiteral ─► NodeRecordCodec ─► ObjectReader ─► NodeStore
//! ```
//!
//! Every codec implements [`Converter`]. Binary converters
//! ([`I32Converter`], [`I64Converter`]) and the [`ArrayConverter`]
//! combinator plug into the same object streams.

mod array;
mod binary;
mod converter;
pub mod cursor;
pub mod document;
mod error;
mod integer;
mod record;
mod stream;
mod string;

pub use array::ArrayConverter;
pub use binary::{I32Converter, I64Converter};
pub use converter::{Converter, FixedSizeConverter, VariableSizeConverter};
pub use document::{dump, from_str, load, to_string, LoadOptions};
pub use error::CodecError;
pub use integer::{IntegerLiteral, MAX_DIGITS};
pub use record::NodeRecordCodec;
pub use stream::{ObjectReader, ObjectWriter};
pub use string::{stringify, unstringify, StringLiteral, DEFAULT_MAX_LEN};
