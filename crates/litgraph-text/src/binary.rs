//! Fixed-size big-endian binary converters.

use std::io::{self, BufRead, Write};

use crate::converter::{Converter, FixedSizeConverter};
use crate::error::CodecError;

fn read_array<R: BufRead + ?Sized, const N: usize>(
    input: &mut R,
    expected: &'static str,
) -> Result<[u8; N], CodecError> {
    let mut buf = [0u8; N];
    input.read_exact(&mut buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => CodecError::PrematureEof { expected },
        _ => CodecError::Io(e),
    })?;
    Ok(buf)
}

/// Four-byte big-endian `i32`.
#[derive(Debug, Clone, Copy, Default)]
pub struct I32Converter;

impl Converter for I32Converter {
    type Value = i32;

    fn decode<R: BufRead + ?Sized>(&mut self, input: &mut R) -> Result<i32, CodecError> {
        read_array(input, "4-byte integer").map(i32::from_be_bytes)
    }

    fn encode<W: Write + ?Sized>(&mut self, output: &mut W, value: &i32) -> Result<(), CodecError> {
        output.write_all(&value.to_be_bytes())?;
        Ok(())
    }
}

impl FixedSizeConverter for I32Converter {
    fn size(&self) -> usize {
        4
    }
}

/// Eight-byte big-endian `i64`.
#[derive(Debug, Clone, Copy, Default)]
pub struct I64Converter;

impl Converter for I64Converter {
    type Value = i64;

    fn decode<R: BufRead + ?Sized>(&mut self, input: &mut R) -> Result<i64, CodecError> {
        read_array(input, "8-byte integer").map(i64::from_be_bytes)
    }

    fn encode<W: Write + ?Sized>(&mut self, output: &mut W, value: &i64) -> Result<(), CodecError> {
        output.write_all(&value.to_be_bytes())?;
        Ok(())
    }
}

impl FixedSizeConverter for I64Converter {
    fn size(&self) -> usize {
        8
    }
}
