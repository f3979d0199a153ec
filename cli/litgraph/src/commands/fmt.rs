//! `litgraph fmt` — rewrite a document in canonical form.

use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use litgraph_text::LoadOptions;

use super::{read_store, write_store};

/// Canonicalize `path` into `output` (or `out`). With `check`, only verify
/// that the file is already canonical.
pub fn run(
    path: &Path,
    options: &LoadOptions,
    output: Option<&Path>,
    check: bool,
    out: &mut impl Write,
) -> Result<()> {
    let store = read_store(path, options)?;

    if check {
        let current =
            std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let canonical = litgraph_text::to_string(&store)?;
        if current != canonical.as_bytes() {
            bail!("{} is not in canonical form", path.display());
        }
        return Ok(());
    }

    let written = write_store(&store, output, out)?;
    if let Some(output) = output {
        tracing::info!(records = written, output = %output.display(), "formatted");
    }
    Ok(())
}
