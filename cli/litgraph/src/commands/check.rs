//! `litgraph check` — parse a document and report on its references.

use std::io::Write;
use std::path::Path;

use anyhow::{bail, Result};
use litgraph_core::NodeKind;
use litgraph_text::LoadOptions;
use tracing::warn;

use super::read_store;

/// Parse `path`, print per-kind counts, and list dangling references.
pub fn run(path: &Path, options: &LoadOptions, strict: bool, out: &mut impl Write) -> Result<()> {
    let store = read_store(path, options)?;
    let counts = store.kind_counts();

    writeln!(out, "{}: {} records", path.display(), counts.total())?;
    for kind in NodeKind::ALL {
        writeln!(out, "  {:<10} {}", kind, counts.get(kind))?;
    }

    let dangling = store.dangling_references();
    for reference in &dangling {
        warn!(
            from = reference.from,
            field = reference.field,
            target = reference.target,
            "dangling reference"
        );
        writeln!(out, "  dangling: {reference}")?;
    }

    if dangling.is_empty() {
        writeln!(out, "ok")?;
    } else if strict {
        bail!("{} dangling reference(s)", dangling.len());
    }
    Ok(())
}
