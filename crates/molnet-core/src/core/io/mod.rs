//! Reading and writing molecular network files.
//!
//! Networks are persisted as a bincode-encoded envelope carrying a format
//! version, the node list in id order, and the normalized edge list. The
//! format round-trips exactly: a loaded network has the same node attributes
//! and edge set as the one that was saved.

use crate::core::graph::{MolecularNetwork, MoleculeNode};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use thiserror::Error;

const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum GraphFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("graph file is corrupt or incompatible: {0}")]
    Corrupt(String),

    #[error("unsupported graph file version {found} (this build reads version {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

fn map_bincode(err: bincode::Error) -> GraphFileError {
    match *err {
        bincode::ErrorKind::Io(io_err) => GraphFileError::Io(io_err),
        other => GraphFileError::Corrupt(other.to_string()),
    }
}

/// On-disk schema. Edge endpoints are stored `(low, high)`.
#[derive(Debug, Serialize, Deserialize)]
struct GraphFile {
    version: u32,
    nodes: Vec<MoleculeNode>,
    edges: Vec<(u32, u32)>,
}

impl MolecularNetwork {
    /// Serializes the network to `writer`.
    pub fn write_to(&self, writer: &mut impl Write) -> Result<(), GraphFileError> {
        let file = GraphFile {
            version: FORMAT_VERSION,
            nodes: self.nodes().cloned().collect(),
            edges: self
                .edges()
                .map(|(a, b)| (a as u32, b as u32))
                .collect(),
        };
        bincode::serialize_into(writer, &file).map_err(map_bincode)
    }

    /// Deserializes a network from `reader`.
    pub fn read_from(reader: &mut impl Read) -> Result<Self, GraphFileError> {
        let file: GraphFile = bincode::deserialize_from(reader).map_err(map_bincode)?;
        if file.version != FORMAT_VERSION {
            return Err(GraphFileError::UnsupportedVersion {
                found: file.version,
                expected: FORMAT_VERSION,
            });
        }

        let mut network = MolecularNetwork::with_capacity(file.nodes.len(), file.edges.len());
        let node_count = file.nodes.len() as u32;
        for node in file.nodes {
            network.add_node(node);
        }
        for (a, b) in file.edges {
            if a >= node_count || b >= node_count || a == b {
                return Err(GraphFileError::Corrupt(format!(
                    "edge ({a}, {b}) does not fit a graph of {node_count} nodes"
                )));
            }
            network.add_edge(a as usize, b as usize);
        }
        Ok(network)
    }

    /// Saves the network to `path`, overwriting any existing file.
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), GraphFileError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Loads a network from `path`.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, GraphFileError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn sample_network() -> MolecularNetwork {
        let mut network = MolecularNetwork::new();
        for (smiles, label) in [("CCO", "alcohol"), ("CCN", "amine"), ("c1ccccc1", "arene")] {
            network.add_node(MoleculeNode {
                smiles: smiles.to_string(),
                categorical_label: label.to_string(),
            });
        }
        network.add_edge(0, 1);
        network.add_edge(1, 2);
        network
    }

    #[test]
    fn save_then_load_reproduces_nodes_and_edges() {
        let network = sample_network();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.mnet");

        network.save_to_path(&path).unwrap();
        let loaded = MolecularNetwork::load_from_path(&path).unwrap();

        assert_eq!(loaded.node_count(), network.node_count());
        let original: Vec<_> = network.nodes().cloned().collect();
        let restored: Vec<_> = loaded.nodes().cloned().collect();
        assert_eq!(original, restored);

        let original_edges: BTreeSet<_> = network.edges().collect();
        let restored_edges: BTreeSet<_> = loaded.edges().collect();
        assert_eq!(original_edges, restored_edges);
    }

    #[test]
    fn empty_network_round_trips() {
        let network = MolecularNetwork::new();
        let mut buffer = Vec::new();
        network.write_to(&mut buffer).unwrap();
        let loaded = MolecularNetwork::read_from(&mut buffer.as_slice()).unwrap();
        assert_eq!(loaded.node_count(), 0);
        assert_eq!(loaded.edge_count(), 0);
    }

    #[test]
    fn garbage_bytes_fail_as_corrupt() {
        let mut garbage: &[u8] = &[0xde, 0xad, 0xbe, 0xef];
        let err = MolecularNetwork::read_from(&mut garbage).unwrap_err();
        assert!(matches!(
            err,
            GraphFileError::Corrupt(_) | GraphFileError::Io(_)
        ));
    }

    #[test]
    fn truncated_file_fails_to_load() {
        let network = sample_network();
        let mut buffer = Vec::new();
        network.write_to(&mut buffer).unwrap();
        buffer.truncate(buffer.len() / 2);
        assert!(MolecularNetwork::read_from(&mut buffer.as_slice()).is_err());
    }

    #[test]
    fn out_of_range_edge_fails_as_corrupt() {
        let file = GraphFile {
            version: FORMAT_VERSION,
            nodes: vec![MoleculeNode {
                smiles: "CCO".to_string(),
                categorical_label: "a".to_string(),
            }],
            edges: vec![(0, 5)],
        };
        let bytes = bincode::serialize(&file).unwrap();
        let err = MolecularNetwork::read_from(&mut bytes.as_slice()).unwrap_err();
        assert!(matches!(err, GraphFileError::Corrupt(_)));
    }

    #[test]
    fn future_version_is_refused() {
        let file = GraphFile {
            version: FORMAT_VERSION + 1,
            nodes: Vec::new(),
            edges: Vec::new(),
        };
        let bytes = bincode::serialize(&file).unwrap();
        let err = MolecularNetwork::read_from(&mut bytes.as_slice()).unwrap_err();
        assert!(matches!(
            err,
            GraphFileError::UnsupportedVersion { found, expected: FORMAT_VERSION } if found == FORMAT_VERSION + 1
        ));
    }

    #[test]
    fn unwritable_destination_fails_with_io_error() {
        let network = sample_network();
        let err = network
            .save_to_path("/definitely/not/a/real/directory/net.mnet")
            .unwrap_err();
        assert!(matches!(err, GraphFileError::Io(_)));
    }
}
