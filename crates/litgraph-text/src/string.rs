//! Quoted string literals.
//!
//! ```text
//! [junk]* '"' ( [^"\\] | '\\' any )* '"'
//! ```
//!
//! Both delimiting quotes are stripped; only the body is unescaped. `\"`
//! and `\\` stand for `"` and `\`. Any other escaped byte keeps its
//! backslash. End of input inside the body ends the literal.
//!
//! The number of bytes scanned for one literal, junk prefix included, is
//! capped at [`StringLiteral::max_len`].

use std::io::{BufRead, Write};

use crate::converter::{Converter, VariableSizeConverter};
use crate::cursor::read_byte;
use crate::error::CodecError;

/// Default cap on bytes scanned per literal.
pub const DEFAULT_MAX_LEN: usize = 1024;

const QUOTE: u8 = b'"';
const BACKSLASH: u8 = b'\\';

/// Escape `"` and `\` and wrap the result in quotes.
pub fn stringify(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    push_escaped(&mut out, text);
    out.push('"');
    out
}

/// Inverse of [`stringify`]. The input must carry both quotes.
pub fn unstringify(quoted: &str) -> Result<String, CodecError> {
    let body = quoted
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .filter(|body| trailing_backslashes(body) % 2 == 0)
        .ok_or_else(|| CodecError::NotQuoted {
            literal: quoted.to_string(),
        })?;
    Ok(unescape(body))
}

fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
}

fn escaped_len(text: &str) -> usize {
    text.len() + text.bytes().filter(|&b| b == QUOTE || b == BACKSLASH).count()
}

fn trailing_backslashes(text: &str) -> usize {
    text.bytes().rev().take_while(|&b| b == BACKSLASH).count()
}

fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(escaped @ ('"' | '\\')) => out.push(escaped),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Converter for quoted string literals.
#[derive(Debug, Clone)]
pub struct StringLiteral {
    max_len: usize,
    /// Raw body bytes of the literal being decoded.
    scratch: Vec<u8>,
}

impl Default for StringLiteral {
    fn default() -> Self {
        Self::new()
    }
}

impl StringLiteral {
    pub fn new() -> Self {
        Self::with_max_len(DEFAULT_MAX_LEN)
    }

    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            max_len,
            scratch: Vec::new(),
        }
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    fn next_byte<R: BufRead + ?Sized>(
        &self,
        input: &mut R,
        scanned: &mut usize,
    ) -> Result<Option<u8>, CodecError> {
        let byte = read_byte(input)?;
        if byte.is_some() {
            *scanned += 1;
            if *scanned > self.max_len {
                return Err(CodecError::MaxLengthExceeded { max: self.max_len });
            }
        }
        Ok(byte)
    }
}

impl Converter for StringLiteral {
    type Value = String;

    fn decode<R: BufRead + ?Sized>(&mut self, input: &mut R) -> Result<String, CodecError> {
        let mut scanned = 0;

        loop {
            match self.next_byte(input, &mut scanned)? {
                Some(QUOTE) => break,
                Some(_) => {}
                None => {
                    return Err(CodecError::PrematureEof {
                        expected: "opening '\"' of a string literal",
                    })
                }
            }
        }

        self.scratch.clear();
        let mut escaping = false;
        while let Some(byte) = self.next_byte(input, &mut scanned)? {
            if escaping {
                escaping = false;
            } else if byte == BACKSLASH {
                escaping = true;
            } else if byte == QUOTE {
                break;
            }
            self.scratch.push(byte);
        }

        let body = std::str::from_utf8(&self.scratch).map_err(|_| CodecError::InvalidUtf8)?;
        Ok(unescape(body))
    }

    fn encode<W: Write + ?Sized>(
        &mut self,
        output: &mut W,
        value: &String,
    ) -> Result<(), CodecError> {
        output.write_all(stringify(value).as_bytes())?;
        Ok(())
    }

    fn ignores_whitespace(&self) -> bool {
        true
    }
}

impl VariableSizeConverter for StringLiteral {
    fn encoded_len(&self, value: &String) -> usize {
        escaped_len(value) + 2
    }
}
