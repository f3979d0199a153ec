//! `litgraph export` — dump records as JSON.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use litgraph_core::Node;
use litgraph_text::LoadOptions;

use super::read_store;

/// Write the records of `path`, ascending, as a pretty JSON array.
pub fn run(
    path: &Path,
    options: &LoadOptions,
    output: Option<&Path>,
    out: &mut impl Write,
) -> Result<()> {
    let store = read_store(path, options)?;
    let nodes: Vec<&Node> = store.iter().collect();

    match output {
        Some(output) => {
            let file = File::create(output)
                .with_context(|| format!("creating {}", output.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &nodes)?;
            writeln!(writer)?;
            writer.flush()?;
        }
        None => {
            serde_json::to_writer_pretty(&mut *out, &nodes)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_round_trips_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.lg");
        let json_path = dir.path().join("doc.json");
        std::fs::write(
            &path,
            "#3 = R(\"child\", 1, 2)\n#1 = I(\"type1\")\n#2 = A(1, \"n\", \"v\")\n",
        )
        .unwrap();

        let mut out = Vec::new();
        run(&path, &LoadOptions::default(), Some(&json_path), &mut out).unwrap();
        assert!(out.is_empty());

        let json = std::fs::read_to_string(&json_path).unwrap();
        let nodes: Vec<Node> = serde_json::from_str(&json).unwrap();
        let numbers: Vec<_> = nodes.iter().map(Node::number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);

        let store = read_store(&path, &LoadOptions::default()).unwrap();
        for node in &nodes {
            assert!(store.query(node.number()).unwrap().is_identical(node));
        }
    }

    #[test]
    fn empty_document_exports_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.lg");
        std::fs::write(&path, "").unwrap();
        let mut out = Vec::new();
        run(&path, &LoadOptions::default(), None, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[]\n");
    }
}
