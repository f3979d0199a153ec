//! Object-stream adapters.
//!
//! [`ObjectReader`] and [`ObjectWriter`] bind a converter to a raw byte
//! cursor and expose it through the [`ObjectSource`]/[`ObjectSink`] traits,
//! so a [`NodeStore`](litgraph_core::NodeStore) can be filled or drained
//! without knowing which converter sits underneath.

use std::io::{BufRead, Write};

use litgraph_core::{Object, ObjectSink, ObjectSource, ObjectValue};

use crate::converter::Converter;
use crate::cursor::{has_remaining, skip_whitespace};
use crate::error::CodecError;
use crate::record::NodeRecordCodec;

/// Reads converter values from a buffered byte source.
#[derive(Debug)]
pub struct ObjectReader<R, C> {
    input: R,
    converter: C,
}

impl<R: BufRead, C: Converter> ObjectReader<R, C> {
    pub fn new(input: R, converter: C) -> Self {
        Self { input, converter }
    }

    /// Decode one value without wrapping it.
    pub fn read_value(&mut self) -> Result<C::Value, CodecError> {
        self.converter.decode(&mut self.input)
    }

    pub fn get_ref(&self) -> &R {
        &self.input
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.input
    }

    pub fn into_inner(self) -> R {
        self.input
    }
}

impl<R: BufRead> ObjectReader<R, NodeRecordCodec> {
    /// A reader of node records with default settings.
    pub fn nodes(input: R) -> Self {
        Self::new(input, NodeRecordCodec::new())
    }
}

impl<R, C> ObjectSource for ObjectReader<R, C>
where
    R: BufRead,
    C: Converter,
    C::Value: ObjectValue,
{
    type Error = CodecError;

    fn has_more(&mut self) -> Result<bool, CodecError> {
        if self.converter.ignores_whitespace() {
            skip_whitespace(&mut self.input)?;
        }
        Ok(has_remaining(&mut self.input)?)
    }

    fn read_object(&mut self) -> Result<Object, CodecError> {
        self.read_value().map(ObjectValue::into_object)
    }
}

/// Writes converter values to a byte sink.
#[derive(Debug)]
pub struct ObjectWriter<W, C> {
    output: W,
    converter: C,
}

impl<W: Write, C: Converter> ObjectWriter<W, C> {
    pub fn new(output: W, converter: C) -> Self {
        Self { output, converter }
    }

    /// Encode one value directly.
    pub fn write_value(&mut self, value: &C::Value) -> Result<(), CodecError> {
        self.converter.encode(&mut self.output, value)
    }

    pub fn get_ref(&self) -> &W {
        &self.output
    }

    pub fn into_inner(self) -> W {
        self.output
    }
}

impl<W: Write> ObjectWriter<W, NodeRecordCodec> {
    /// A writer of node records with default settings.
    pub fn nodes(output: W) -> Self {
        Self::new(output, NodeRecordCodec::new())
    }
}

impl<W, C> ObjectSink for ObjectWriter<W, C>
where
    W: Write,
    C: Converter,
    C::Value: ObjectValue,
{
    type Error = CodecError;

    fn write_object(&mut self, object: Object) -> Result<(), CodecError> {
        let found = object.type_name();
        let value = C::Value::from_object(object).ok_or(CodecError::TypeMismatch {
            expected: <C::Value as ObjectValue>::TYPE_NAME,
            found,
        })?;
        self.write_value(&value)
    }

    fn flush(&mut self) -> Result<(), CodecError> {
        self.output.flush()?;
        Ok(())
    }
}
