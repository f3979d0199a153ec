//! `litgraph query` — print one record.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use litgraph_core::NodeNumber;
use litgraph_text::{Converter, LoadOptions, NodeRecordCodec};

use super::read_store;

/// Print record `number` of `path` as a record line or as JSON.
pub fn run(
    path: &Path,
    options: &LoadOptions,
    number: NodeNumber,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let store = read_store(path, options)?;
    let node = store
        .query(number)
        .with_context(|| format!("no record #{number} in {}", path.display()))?;

    if json {
        serde_json::to_writer_pretty(&mut *out, node)?;
        writeln!(out)?;
    } else {
        NodeRecordCodec::new().encode(out, node)?;
    }
    Ok(())
}
