//! The molecular network graph model.
//!
//! A [`MolecularNetwork`] is a simple undirected graph: one node per input
//! molecule, carrying its SMILES string and categorical class label, and one
//! edge per structure pair whose similarity cleared the build threshold.
//! Node ids are dense `0..N-1` in input order.

use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};

/// Attributes attached to one molecule node.
///
/// `categorical_label` is the string form of the raw class label; the
/// intermediate vocabulary index used during the build is not retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoleculeNode {
    pub smiles: String,
    pub categorical_label: String,
}

/// A simple undirected similarity graph over a set of molecules.
#[derive(Debug, Clone, Default)]
pub struct MolecularNetwork {
    graph: UnGraph<MoleculeNode, ()>,
}

impl MolecularNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            graph: UnGraph::with_capacity(nodes, edges),
        }
    }

    /// Appends a node, returning its dense id.
    pub fn add_node(&mut self, node: MoleculeNode) -> usize {
        self.graph.add_node(node).index()
    }

    /// Inserts the undirected edge `{a, b}`.
    ///
    /// Inserting an existing edge is a no-op, keeping the graph simple.
    /// Panics if either endpoint is not a node id of this network.
    pub fn add_edge(&mut self, a: usize, b: usize) {
        self.graph
            .update_edge(NodeIndex::new(a), NodeIndex::new(b), ());
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn node(&self, id: usize) -> Option<&MoleculeNode> {
        self.graph.node_weight(NodeIndex::new(id))
    }

    /// Node attributes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &MoleculeNode> {
        self.graph.node_indices().map(|i| &self.graph[i])
    }

    /// Edge endpoint pairs, each normalized to `(low, high)`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.graph.edge_indices().map(|e| {
            let (a, b) = self
                .graph
                .edge_endpoints(e)
                .unwrap_or_else(|| unreachable!("edge index came from this graph"));
            let (a, b) = (a.index(), b.index());
            if a <= b { (a, b) } else { (b, a) }
        })
    }

    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.graph.contains_edge(NodeIndex::new(a), NodeIndex::new(b))
    }

    /// Ids of nodes adjacent to `id`.
    pub fn neighbors(&self, id: usize) -> impl Iterator<Item = usize> + '_ {
        self.graph.neighbors(NodeIndex::new(id)).map(|n| n.index())
    }
}
