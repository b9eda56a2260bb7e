//! Edge list file handling for graph data

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::graph::{CompressedGraph, GraphBuilder};
use crate::{Error, Result};

/// Load a whitespace-separated edge list into an undirected graph.
///
/// Each non-empty line holds two vertex ids `u v`; lines starting with `#`
/// are comments. Extra columns (weights, timestamps) are ignored. Self-loops
/// and duplicate edges are dropped by the builder.
pub fn load_edge_list<P: AsRef<Path>>(path: P) -> Result<CompressedGraph> {
    log::info!("Reading edge list: {}", path.as_ref().display());

    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);

    let mut builder = GraphBuilder::new(0);
    let mut edge_lines = 0usize;

    for (line_number, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut fields = trimmed.split_whitespace();
        let (Some(u), Some(v)) = (fields.next(), fields.next()) else {
            return Err(Error::MalformedInput(format!(
                "line {}: expected two vertex ids",
                line_number + 1
            )));
        };
        let (Ok(u), Ok(v)) = (u.parse::<u32>(), v.parse::<u32>()) else {
            return Err(Error::MalformedInput(format!(
                "line {}: vertex ids must be non-negative integers",
                line_number + 1
            )));
        };

        builder.add_edge(u, v);
        edge_lines += 1;
    }

    log::info!("Parsed {} edge lines", edge_lines);

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = File::create(&path).expect("temp file creates");
        file.write_all(contents.as_bytes()).expect("temp file writes");
        path
    }

    #[test]
    fn loads_commented_edge_list() {
        let path = write_temp(
            "scan_edgelist_ok.txt",
            "# path graph\n0 1\n1 2\n\n2 3\n",
        );
        let graph = load_edge_list(&path).expect("well-formed input loads");

        assert_eq!(graph.node_count, 4);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.neighbors(1), &[0, 2]);
    }

    #[test]
    fn rejects_short_lines() {
        let path = write_temp("scan_edgelist_short.txt", "0 1\n2\n");
        assert!(matches!(
            load_edge_list(&path),
            Err(Error::MalformedInput(_))
        ));
    }

    #[test]
    fn rejects_non_numeric_ids() {
        let path = write_temp("scan_edgelist_bad.txt", "a b\n");
        assert!(matches!(
            load_edge_list(&path),
            Err(Error::MalformedInput(_))
        ));
    }
}
