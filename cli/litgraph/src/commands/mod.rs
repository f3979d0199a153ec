//! CLI command implementations.

pub mod check;
pub mod export;
pub mod fmt;
pub mod merge;
pub mod query;
pub mod stats;

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use litgraph_core::NodeStore;
use litgraph_text::LoadOptions;

/// Load a document from disk.
pub fn read_store(path: &Path, options: &LoadOptions) -> Result<NodeStore> {
    if !path.exists() {
        bail!("document not found: {}", path.display());
    }
    let file = File::open(path).with_context(|| format!("reading {}", path.display()))?;
    litgraph_text::load(BufReader::new(file), options)
        .with_context(|| format!("parsing {}", path.display()))
}

/// Write a store as a canonical document, to `path` or to `out`.
pub fn write_store(store: &NodeStore, path: Option<&Path>, out: &mut impl Write) -> Result<usize> {
    match path {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            litgraph_text::dump(store, BufWriter::new(file))
                .with_context(|| format!("writing {}", path.display()))
        }
        None => litgraph_text::dump(store, out).context("writing to stdout"),
    }
}
