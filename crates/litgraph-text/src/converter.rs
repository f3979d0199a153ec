//! The converter capability.
//!
//! A converter decodes one value of a known shape from a byte cursor and
//! encodes it back. Textual and binary converters share this trait, so
//! combinators like [`ArrayConverter`](crate::ArrayConverter) work with
//! either.
//!
//! Converters take `&mut self` for both directions: any scratch buffer they
//! keep belongs to that one value and is never shared between calls in
//! flight.

use std::io::{BufRead, Write};

use crate::error::CodecError;

/// Paired decode/encode strategy for one data shape.
pub trait Converter {
    type Value;

    /// Decode one value, consuming the bytes it occupies.
    fn decode<R: BufRead + ?Sized>(&mut self, input: &mut R) -> Result<Self::Value, CodecError>;

    /// Encode one value.
    fn encode<W: Write + ?Sized>(
        &mut self,
        output: &mut W,
        value: &Self::Value,
    ) -> Result<(), CodecError>;

    /// Whether ASCII whitespace between encoded values is insignificant.
    ///
    /// Textual converters skip such bytes anyway; binary ones treat every
    /// byte as payload.
    fn ignores_whitespace(&self) -> bool {
        false
    }
}

/// A converter whose encoded values all occupy the same number of bytes.
pub trait FixedSizeConverter: Converter {
    fn size(&self) -> usize;
}

/// A converter whose encoded size depends on the value.
pub trait VariableSizeConverter: Converter {
    /// Exact number of bytes `encode` would write for `value`.
    fn encoded_len(&self, value: &Self::Value) -> usize;
}
