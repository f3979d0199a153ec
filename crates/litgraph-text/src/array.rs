//! Fixed-count sequences of one inner converter.

use std::io::{BufRead, Write};

use crate::converter::{Converter, FixedSizeConverter, VariableSizeConverter};
use crate::error::CodecError;

/// Applies `inner` exactly `count` times.
///
/// Values are written back to back with no framing, so the inner converter
/// must be able to find the end of each element on its own.
#[derive(Debug, Clone)]
pub struct ArrayConverter<C> {
    inner: C,
    count: usize,
}

impl<C: Converter> ArrayConverter<C> {
    /// Fails with [`CodecError::ZeroLength`] when `count` is zero.
    pub fn new(inner: C, count: usize) -> Result<Self, CodecError> {
        if count < 1 {
            return Err(CodecError::ZeroLength);
        }
        Ok(Self { inner, count })
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C: Converter> Converter for ArrayConverter<C> {
    type Value = Vec<C::Value>;

    fn decode<R: BufRead + ?Sized>(&mut self, input: &mut R) -> Result<Self::Value, CodecError> {
        let mut values = Vec::with_capacity(self.count);
        for _ in 0..self.count {
            values.push(self.inner.decode(input)?);
        }
        Ok(values)
    }

    fn encode<W: Write + ?Sized>(
        &mut self,
        output: &mut W,
        value: &Self::Value,
    ) -> Result<(), CodecError> {
        if value.len() != self.count {
            return Err(CodecError::LengthMismatch {
                expected: self.count,
                found: value.len(),
            });
        }
        for item in value {
            self.inner.encode(output, item)?;
        }
        Ok(())
    }

    fn ignores_whitespace(&self) -> bool {
        self.inner.ignores_whitespace()
    }
}

impl<C: FixedSizeConverter> FixedSizeConverter for ArrayConverter<C> {
    fn size(&self) -> usize {
        self.count * self.inner.size()
    }
}

impl<C: VariableSizeConverter> VariableSizeConverter for ArrayConverter<C> {
    fn encoded_len(&self, value: &Self::Value) -> usize {
        value.iter().map(|item| self.inner.encoded_len(item)).sum()
    }
}
