//! `litgraph merge` — combine two documents.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use litgraph_text::LoadOptions;
use tracing::info;

use super::{read_store, write_store};

/// Merge `other` into `base` and write the result to `output`. Records of
/// `other` replace records of `base` with the same number.
pub fn run(
    base: &Path,
    other: &Path,
    output: &Path,
    options: &LoadOptions,
    out: &mut impl Write,
) -> Result<()> {
    let mut merged = read_store(base, options)?;
    let incoming = read_store(other, options)?;
    let replaced = merged.merge(&incoming);
    let written = write_store(&merged, Some(output), out)?;

    info!(replaced, written, "merged");
    writeln!(
        out,
        "Merged {} record(s) into {} ({} replaced, {} total)",
        incoming.len(),
        output.display(),
        replaced,
        written
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_wins_on_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("base.lg");
        let other = dir.path().join("other.lg");
        let output = dir.path().join("out.lg");
        std::fs::write(&base, "#1 = I(\"a\")\n#2 = I(\"b\")\n").unwrap();
        std::fs::write(&other, "#2 = I(\"c\")\n#4 = I(\"d\")\n").unwrap();

        let mut out = Vec::new();
        run(&base, &other, &output, &LoadOptions::default(), &mut out).unwrap();

        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "#1 = I(\"a\")\n#2 = I(\"c\")\n#4 = I(\"d\")\n"
        );
        let summary = String::from_utf8(out).unwrap();
        assert!(summary.contains("1 replaced, 3 total"), "{summary}");
    }

    #[test]
    fn merge_with_self_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("base.lg");
        let output = dir.path().join("out.lg");
        std::fs::write(&base, "#1 = I(\"a\")\n").unwrap();

        let mut out = Vec::new();
        run(&base, &base, &output, &LoadOptions::default(), &mut out).unwrap();
        assert_eq!(
            std::fs::read(&output).unwrap(),
            std::fs::read(&base).unwrap()
        );
    }
}
