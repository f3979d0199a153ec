//! Node records, one per line.
//!
//! ```text
//! #<number> = I(<type_name>)
//! #<number> = A(<instance>, <name>, <value>)
//! #<number> = R(<relation_name>, <source>, <target>)
//! ```
//!
//! Text fields are string literals, numeric fields integer literals. Fields
//! are separated by `,` and any number of spaces. The separators and the
//! closing `)` are checked explicitly; one trailing line ending is consumed.

use std::io::{BufRead, Write};

use litgraph_core::{AttributeNode, InstanceNode, Node, NodeKind, NodeNumber, RelationNode};

use crate::converter::{Converter, VariableSizeConverter};
use crate::cursor::{peek_byte, read_byte, skip_until};
use crate::error::CodecError;
use crate::integer::IntegerLiteral;
use crate::string::{StringLiteral, DEFAULT_MAX_LEN};

const RECORD_MARKER: u8 = b'#';
const FIELD_SEPARATOR: &[u8] = b", ";
/// `#` plus ` = X(`.
const HEADER_LEN: usize = 6;
/// `)` plus newline.
const TRAILER_LEN: usize = 2;

/// Composite converter for [`Node`] records.
#[derive(Debug, Clone, Default)]
pub struct NodeRecordCodec {
    integers: IntegerLiteral,
    strings: StringLiteral,
}

impl NodeRecordCodec {
    pub fn new() -> Self {
        Self::with_max_literal_len(DEFAULT_MAX_LEN)
    }

    /// Use a custom scan cap for the string fields.
    pub fn with_max_literal_len(max_len: usize) -> Self {
        Self {
            integers: IntegerLiteral::new(),
            strings: StringLiteral::with_max_len(max_len),
        }
    }

    fn decode_number<R: BufRead + ?Sized>(
        &mut self,
        input: &mut R,
    ) -> Result<(NodeNumber, Option<u8>), CodecError> {
        if !skip_until(input, RECORD_MARKER)? {
            return Err(CodecError::PrematureEof {
                expected: "'#' record marker",
            });
        }
        let (number, terminator) = self.integers.decode_terminated(input)?;
        if number < 0 {
            return Err(CodecError::NegativeNumber { number });
        }
        Ok((number, terminator))
    }

    fn decode_body<R: BufRead + ?Sized>(
        &mut self,
        input: &mut R,
        number: NodeNumber,
        terminator: Option<u8>,
    ) -> Result<Node, CodecError> {
        expect_terminator(input, terminator, b' ')?;
        expect_byte(input, b'=')?;
        expect_byte(input, b' ')?;

        let tag = read_byte(input)?.ok_or(CodecError::PrematureEof {
            expected: "record tag",
        })?;
        let kind = NodeKind::from_tag(tag).ok_or(CodecError::UnknownTag {
            tag,
            record: number,
        })?;
        expect_byte(input, b'(')?;

        let node = match kind {
            NodeKind::Instance => {
                let type_name = self.decode_text(input)?;
                expect_byte(input, b')')?;
                InstanceNode::new(number, type_name).into()
            }
            NodeKind::Attribute => {
                let instance = self.decode_integer(input, b',')?;
                let name = self.decode_text(input)?;
                expect_byte(input, b',')?;
                let value = self.decode_text(input)?;
                expect_byte(input, b')')?;
                AttributeNode::new(number, instance, name, value).into()
            }
            NodeKind::Relation => {
                let relation_name = self.decode_text(input)?;
                expect_byte(input, b',')?;
                let source = self.decode_integer(input, b',')?;
                let target = self.decode_integer(input, b')')?;
                RelationNode::new(number, relation_name, source, target).into()
            }
        };

        skip_line_end(input)?;
        Ok(node)
    }

    /// A string field. Only spaces may precede its opening quote, so a
    /// short record never reads fields from the lines after it.
    fn decode_text<R: BufRead + ?Sized>(&mut self, input: &mut R) -> Result<String, CodecError> {
        expect_field_start(input, "'\"' opening a string field", |b| b == b'"')?;
        self.strings.decode(input)
    }

    /// An integer field followed by its delimiter.
    fn decode_integer<R: BufRead + ?Sized>(
        &mut self,
        input: &mut R,
        delimiter: u8,
    ) -> Result<NodeNumber, CodecError> {
        expect_field_start(input, "an integer field", |b| {
            b == b'+' || b == b'-' || b.is_ascii_digit()
        })?;
        let (value, terminator) = self.integers.decode_terminated(input)?;
        expect_terminator(input, terminator, delimiter)?;
        Ok(value)
    }

    fn encode_separator<W: Write + ?Sized>(output: &mut W) -> Result<(), CodecError> {
        output.write_all(FIELD_SEPARATOR)?;
        Ok(())
    }
}

impl Converter for NodeRecordCodec {
    type Value = Node;

    fn decode<R: BufRead + ?Sized>(&mut self, input: &mut R) -> Result<Node, CodecError> {
        let (number, terminator) = self.decode_number(input)?;
        self.decode_body(input, number, terminator)
            .map_err(|e| e.in_record(number))
    }

    fn encode<W: Write + ?Sized>(&mut self, output: &mut W, node: &Node) -> Result<(), CodecError> {
        let number = node.number();
        if number < 0 {
            return Err(CodecError::NegativeNumber { number });
        }

        output.write_all(&[RECORD_MARKER])?;
        self.integers.encode(output, &number)?;
        output.write_all(&[b' ', b'=', b' ', node.kind().tag(), b'('])?;
        match node {
            Node::Instance(n) => {
                self.strings.encode(output, &n.type_name)?;
            }
            Node::Attribute(n) => {
                self.integers.encode(output, &n.instance)?;
                Self::encode_separator(output)?;
                self.strings.encode(output, &n.name)?;
                Self::encode_separator(output)?;
                self.strings.encode(output, &n.value)?;
            }
            Node::Relation(n) => {
                self.strings.encode(output, &n.relation_name)?;
                Self::encode_separator(output)?;
                self.integers.encode(output, &n.source)?;
                Self::encode_separator(output)?;
                self.integers.encode(output, &n.target)?;
            }
        }
        output.write_all(b")\n")?;
        Ok(())
    }

    fn ignores_whitespace(&self) -> bool {
        true
    }
}

impl VariableSizeConverter for NodeRecordCodec {
    fn encoded_len(&self, node: &Node) -> usize {
        let int = |v: &i32| self.integers.encoded_len(v);
        let text = |s: &String| self.strings.encoded_len(s);
        let fields = match node {
            Node::Instance(n) => text(&n.type_name),
            Node::Attribute(n) => {
                int(&n.instance) + text(&n.name) + text(&n.value) + 2 * FIELD_SEPARATOR.len()
            }
            Node::Relation(n) => {
                text(&n.relation_name) + int(&n.source) + int(&n.target)
                    + 2 * FIELD_SEPARATOR.len()
            }
        };
        HEADER_LEN + int(&node.number()) + fields + TRAILER_LEN
    }
}

fn expect_byte<R: BufRead + ?Sized>(input: &mut R, expected: u8) -> Result<(), CodecError> {
    let found = read_byte(input)?;
    if found != Some(expected) {
        return Err(CodecError::UnexpectedByte { expected, found });
    }
    Ok(())
}

/// Check the byte an integer literal stopped on. When the literal ended on
/// its digit budget nothing was consumed, so read the byte now.
fn expect_terminator<R: BufRead + ?Sized>(
    input: &mut R,
    terminator: Option<u8>,
    expected: u8,
) -> Result<(), CodecError> {
    match terminator {
        Some(byte) if byte == expected => Ok(()),
        Some(byte) => Err(CodecError::UnexpectedByte {
            expected,
            found: Some(byte),
        }),
        None => expect_byte(input, expected),
    }
}

/// Skip spaces, then require the next byte to open a field.
fn expect_field_start<R: BufRead + ?Sized>(
    input: &mut R,
    expected: &'static str,
    opens: impl Fn(u8) -> bool,
) -> Result<(), CodecError> {
    loop {
        match peek_byte(input)? {
            Some(b' ') => input.consume(1),
            Some(byte) if opens(byte) => return Ok(()),
            found => return Err(CodecError::MissingField { expected, found }),
        }
    }
}

fn skip_line_end<R: BufRead + ?Sized>(input: &mut R) -> Result<(), CodecError> {
    if peek_byte(input)? == Some(b'\r') {
        input.consume(1);
    }
    if peek_byte(input)? == Some(b'\n') {
        input.consume(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(node: &Node) -> String {
        let mut out = Vec::new();
        NodeRecordCodec::new().encode(&mut out, node).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn decode(text: &str) -> Result<Node, CodecError> {
        NodeRecordCodec::new().decode(&mut text.as_bytes())
    }

    fn samples() -> Vec<Node> {
        vec![
            InstanceNode::new(1, "type1").into(),
            AttributeNode::new(2, 1, "label", "say \"hi\" \\o/").into(),
            RelationNode::new(3, "child", 1, 2).into(),
            RelationNode::new(i32::MAX, "", i32::MIN, -7).into(),
            AttributeNode::new(0, -1, "", "").into(),
        ]
    }

    #[test]
    fn encodes_each_variant() {
        assert_eq!(encode(&InstanceNode::new(1, "type1").into()), "#1 = I(\"type1\")\n");
        assert_eq!(
            encode(&AttributeNode::new(4, 1, "name", "va\"l").into()),
            "#4 = A(1, \"name\", \"va\\\"l\")\n"
        );
        assert_eq!(
            encode(&RelationNode::new(3, "child", 1, 2).into()),
            "#3 = R(\"child\", 1, 2)\n"
        );
    }

    #[test]
    fn round_trip_every_variant() {
        let codec = NodeRecordCodec::new();
        for node in samples() {
            let text = encode(&node);
            assert_eq!(codec.encoded_len(&node), text.len(), "length of {text:?}");
            let back = decode(&text).unwrap();
            assert!(back.is_identical(&node), "{back:?} != {node:?}");
        }
    }

    #[test]
    fn consecutive_records_share_a_cursor() {
        let mut input: &[u8] = b"#1 = I(\"type1\")\n#2 = I(\"type2\")\r\n#3 = R(\"child\", 1, 2)\n";
        let mut codec = NodeRecordCodec::new();
        let numbers: Vec<_> = (0..3)
            .map(|_| codec.decode(&mut input).unwrap().number())
            .collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert!(input.is_empty());
    }

    #[test]
    fn junk_before_marker_is_skipped() {
        let node = decode("garbage\n\n#9 = I(\"t\")").unwrap();
        assert_eq!(node.number(), 9);
    }

    #[test]
    fn unknown_tag_names_record() {
        let err = decode("#7 = Z(\"x\")\n").unwrap_err();
        assert!(matches!(err, CodecError::UnknownTag { tag: b'Z', record: 7 }));
        assert_eq!(err.record(), Some(7));
    }

    #[test]
    fn closing_paren_is_required() {
        let err = decode("#1 = I(\"t\"]\n").unwrap_err();
        assert!(matches!(
            err,
            CodecError::Record { record: 1, ref source }
                if matches!(**source, CodecError::UnexpectedByte { expected: b')', found: Some(b']') })
        ));

        let err = decode("#3 = R(\"r\", 1, 2]\n").unwrap_err();
        assert_eq!(err.record(), Some(3));

        let err = decode("#5 = A(1, \"n\", \"v\"").unwrap_err();
        assert!(err.to_string().contains("end of input"));
    }

    #[test]
    fn short_record_does_not_read_following_lines() {
        let mut input: &[u8] = b"#5 = A(1)\n#6 = I(\"x\")\n#7 = I(\"y\")\n";
        let err = NodeRecordCodec::new().decode(&mut input).unwrap_err();
        assert_eq!(err.record(), Some(5));
        assert!(matches!(
            err,
            CodecError::Record { ref source, .. }
                if matches!(**source, CodecError::UnexpectedByte { expected: b',', found: Some(b')') })
        ));

        let err = decode("#5 = A(1, \"n\")\n#6 = I(\"x\")\n").unwrap_err();
        assert!(err.to_string().contains("expected ','"), "{err}");

        let err = decode("#3 = R(\"r\", 1)\n#4 = I(\"x\")\n").unwrap_err();
        assert_eq!(err.record(), Some(3));
    }

    #[test]
    fn fields_must_follow_separators() {
        let err = decode("#2 = A(1, \n\"n\", \"v\")").unwrap_err();
        assert!(err.to_string().contains("opening a string field"), "{err}");

        let err = decode("#3 = R(\"r\", x1, 2)").unwrap_err();
        assert!(err.to_string().contains("an integer field"), "{err}");

        let err = decode("#1 = I(type\"t\")").unwrap_err();
        assert_eq!(err.record(), Some(1));
    }

    #[test]
    fn spacing_around_fields_is_free() {
        let node = decode("#3 = R( \"child\",1,   2)").unwrap();
        assert!(node.is_identical(&RelationNode::new(3, "child", 1, 2).into()));
        let node = decode("#4 = A(1,\"k\",  \"v\")").unwrap();
        assert_eq!(node.as_attribute().unwrap().value, "v");
    }

    #[test]
    fn relation_target_at_digit_budget() {
        let node = decode("#3 = R(\"r\", 1, -2147483648)").unwrap();
        assert_eq!(node.as_relation().unwrap().target, i32::MIN);
    }

    #[test]
    fn separator_after_number_is_strict() {
        let err = decode("#1= I(\"t\")").unwrap_err();
        assert_eq!(err.record(), Some(1));
        assert!(decode("#1 =I(\"t\")").is_err());
    }

    #[test]
    fn negative_record_number() {
        assert!(matches!(
            decode("#-4 = I(\"t\")"),
            Err(CodecError::NegativeNumber { number: -4 })
        ));
        let mut out = Vec::new();
        let err = NodeRecordCodec::new()
            .encode(&mut out, &InstanceNode::new(-4, "t").into())
            .unwrap_err();
        assert!(matches!(err, CodecError::NegativeNumber { number: -4 }));
    }

    #[test]
    fn missing_marker() {
        assert!(matches!(
            decode("no records"),
            Err(CodecError::PrematureEof { .. })
        ));
    }

    #[test]
    fn literal_cap_applies_to_fields() {
        let long = "x".repeat(40);
        let text = format!("#1 = I(\"{long}\")\n");
        let err = NodeRecordCodec::with_max_literal_len(16)
            .decode(&mut text.as_bytes())
            .unwrap_err();
        assert!(err.to_string().contains("maximum scan length of 16"));
        assert!(NodeRecordCodec::with_max_literal_len(64)
            .decode(&mut text.as_bytes())
            .is_ok());
    }
}
