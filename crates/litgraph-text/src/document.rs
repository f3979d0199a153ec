//! Whole-document load and dump.
//!
//! A document is a sequence of node records. Dumps are canonical: records
//! appear in ascending number order with normalized spacing and escapes, so
//! dumping a loaded dump reproduces it byte for byte.

use std::io::{BufRead, Write};

use tracing::{debug, warn};

use litgraph_core::{NodeStore, ObjectSource, StoreError};

use crate::record::NodeRecordCodec;
use crate::stream::{ObjectReader, ObjectWriter};
use crate::string::DEFAULT_MAX_LEN;

/// Limits applied while loading a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Scan cap for each string literal.
    pub max_literal_len: usize,
    /// Stop after this many records.
    pub max_records: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            max_literal_len: DEFAULT_MAX_LEN,
            max_records: usize::MAX,
        }
    }
}

/// Read every record from `input` into a fresh store.
///
/// Later records replace earlier ones with the same number.
pub fn load<R: BufRead>(input: R, options: &LoadOptions) -> Result<NodeStore, StoreError> {
    let codec = NodeRecordCodec::with_max_literal_len(options.max_literal_len);
    let mut reader = ObjectReader::new(input, codec);
    let mut store = NodeStore::new();
    let read = store.read(&mut reader, options.max_records)?;
    let truncated = read == options.max_records
        && reader
            .has_more()
            .map_err(|e| StoreError::Source(e.into()))?;
    if truncated {
        warn!(
            max_records = options.max_records,
            "record limit reached, rest of input ignored"
        );
    }
    debug!(read, distinct = store.len(), "loaded document");
    Ok(store)
}

/// Write every record of `store`, ascending, to `output`.
pub fn dump<W: Write>(store: &NodeStore, output: W) -> Result<usize, StoreError> {
    let mut writer = ObjectWriter::nodes(output);
    store.write(&mut writer)
}

/// Parse a whole document held in memory.
pub fn from_str(text: &str) -> Result<NodeStore, StoreError> {
    load(text.as_bytes(), &LoadOptions::default())
}

/// Render a store as a document.
pub fn to_string(store: &NodeStore) -> Result<String, StoreError> {
    let mut buf = Vec::new();
    dump(store, &mut buf)?;
    String::from_utf8(buf).map_err(|e| StoreError::Sink(e.into()))
}
