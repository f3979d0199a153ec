//! Decimal integer literals.
//!
//! ```text
//! [junk]* [+|-]? digit{1,10} [terminator]
//! ```
//!
//! Decoding skips everything before the first sign or digit, then reads
//! digits until a non-digit byte or the digit budget runs out. The
//! terminating byte is consumed and discarded; callers that need to check
//! it use [`IntegerLiteral::decode_terminated`].

use std::io::{BufRead, Write};

use crate::converter::{Converter, VariableSizeConverter};
use crate::cursor::read_byte;
use crate::error::CodecError;

/// Most magnitude digits a literal may carry (enough for any `i32`).
pub const MAX_DIGITS: usize = 10;

/// Converter for signed 32-bit ASCII decimal literals.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerLiteral;

impl IntegerLiteral {
    pub fn new() -> Self {
        Self
    }

    /// Decode a literal and also return the byte that ended it.
    ///
    /// The terminator is `None` when input ended or when the digit budget
    /// ran out, in which case nothing past the last digit was consumed.
    pub fn decode_terminated<R: BufRead + ?Sized>(
        &mut self,
        input: &mut R,
    ) -> Result<(i32, Option<u8>), CodecError> {
        let first = loop {
            match read_byte(input)? {
                Some(byte) if is_literal_start(byte) => break byte,
                Some(_) => {}
                None => {
                    return Err(CodecError::PrematureEof {
                        expected: "integer literal",
                    })
                }
            }
        };

        let mut literal = [0u8; MAX_DIGITS + 1];
        literal[0] = first;
        let mut len = 1;
        let mut digits = usize::from(first.is_ascii_digit());
        let mut terminator = None;

        while digits < MAX_DIGITS {
            match read_byte(input)? {
                Some(byte) if byte.is_ascii_digit() => {
                    literal[len] = byte;
                    len += 1;
                    digits += 1;
                }
                other => {
                    terminator = other;
                    break;
                }
            }
        }

        if digits == 0 {
            return Err(CodecError::SignWithoutDigits);
        }

        let text = std::str::from_utf8(&literal[..len]).map_err(|_| CodecError::InvalidUtf8)?;
        let value = text.parse::<i32>().map_err(|_| CodecError::IntegerOverflow {
            literal: text.to_string(),
        })?;
        Ok((value, terminator))
    }
}

fn is_literal_start(byte: u8) -> bool {
    byte == b'+' || byte == b'-' || byte.is_ascii_digit()
}

impl Converter for IntegerLiteral {
    type Value = i32;

    fn decode<R: BufRead + ?Sized>(&mut self, input: &mut R) -> Result<i32, CodecError> {
        self.decode_terminated(input).map(|(value, _)| value)
    }

    fn encode<W: Write + ?Sized>(&mut self, output: &mut W, value: &i32) -> Result<(), CodecError> {
        write!(output, "{value}")?;
        Ok(())
    }

    fn ignores_whitespace(&self) -> bool {
        true
    }
}

impl VariableSizeConverter for IntegerLiteral {
    fn encoded_len(&self, value: &i32) -> usize {
        let sign = usize::from(*value < 0);
        let mut magnitude = value.unsigned_abs();
        let mut digits = 1;
        while magnitude >= 10 {
            magnitude /= 10;
            digits += 1;
        }
        sign + digits
    }
}
