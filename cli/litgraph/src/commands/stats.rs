//! `litgraph stats` — counts and content hash.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use litgraph_core::{hash_hex, KindCounts};
use litgraph_text::LoadOptions;
use serde::Serialize;

use super::read_store;

#[derive(Debug, Serialize)]
struct Stats {
    #[serde(flatten)]
    counts: KindCounts,
    total: usize,
    dangling: usize,
    hash: String,
}

pub fn run(path: &Path, options: &LoadOptions, json: bool, out: &mut impl Write) -> Result<()> {
    let store = read_store(path, options)?;
    let counts = store.kind_counts();
    let stats = Stats {
        counts,
        total: counts.total(),
        dangling: store.dangling_references().len(),
        hash: hash_hex(&store.content_hash()?),
    };

    if json {
        serde_json::to_writer_pretty(&mut *out, &stats)?;
        writeln!(out)?;
    } else {
        writeln!(out, "Records:    {}", stats.total)?;
        writeln!(out, "Instances:  {}", stats.counts.instances)?;
        writeln!(out, "Attributes: {}", stats.counts.attributes)?;
        writeln!(out, "Relations:  {}", stats.counts.relations)?;
        writeln!(out, "Dangling:   {}", stats.dangling)?;
        writeln!(out, "Hash:       {}", stats.hash)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_json(text: &str) -> serde_json::Value {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.lg");
        std::fs::write(&path, text).unwrap();
        let mut out = Vec::new();
        run(&path, &LoadOptions::default(), true, &mut out).unwrap();
        serde_json::from_slice(&out).unwrap()
    }

    #[test]
    fn counts_and_hash() {
        let stats = stats_json("#1 = I(\"a\")\n#2 = A(1, \"k\", \"v\")\n#3 = R(\"r\", 1, 5)\n");
        assert_eq!(stats["instances"], 1);
        assert_eq!(stats["attributes"], 1);
        assert_eq!(stats["relations"], 1);
        assert_eq!(stats["total"], 3);
        assert_eq!(stats["dangling"], 1);
        assert_eq!(stats["hash"].as_str().unwrap().len(), 64);
    }

    #[test]
    fn hash_ignores_layout() {
        let tidy = stats_json("#1 = I(\"a\")\n#2 = I(\"b\")\n");
        let messy = stats_json("  #2 = I(\"b\")\r\n\n#1 = I(\"a\")");
        assert_eq!(tidy["hash"], messy["hash"]);
        assert_ne!(tidy["hash"], stats_json("#1 = I(\"a\")\n")["hash"]);
    }
}
