//! Byte-at-a-time helpers over a buffered reader.
//!
//! Converters never read ahead past the bytes they consume, so these all
//! go through `fill_buf`/`consume` instead of `Read::read`.

use std::io::{self, BufRead};

/// Consume and return the next byte, or `None` at end of input.
pub fn read_byte<R: BufRead + ?Sized>(input: &mut R) -> io::Result<Option<u8>> {
    let byte = match input.fill_buf()?.first() {
        Some(&byte) => byte,
        None => return Ok(None),
    };
    input.consume(1);
    Ok(Some(byte))
}

/// Return the next byte without consuming it.
pub fn peek_byte<R: BufRead + ?Sized>(input: &mut R) -> io::Result<Option<u8>> {
    Ok(input.fill_buf()?.first().copied())
}

/// Consume bytes up to and including the first `target`. Returns `false`
/// when input ends first.
pub fn skip_until<R: BufRead + ?Sized>(input: &mut R, target: u8) -> io::Result<bool> {
    while let Some(byte) = read_byte(input)? {
        if byte == target {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Consume any run of ASCII whitespace.
pub fn skip_whitespace<R: BufRead + ?Sized>(input: &mut R) -> io::Result<()> {
    while let Some(byte) = peek_byte(input)? {
        if !byte.is_ascii_whitespace() {
            break;
        }
        input.consume(1);
    }
    Ok(())
}

/// Whether any bytes remain.
pub fn has_remaining<R: BufRead + ?Sized>(input: &mut R) -> io::Result<bool> {
    Ok(!input.fill_buf()?.is_empty())
}
