#![deny(missing_docs)]

//! Core types and contracts shared by the prefnet crates: node identifiers,
//! the read-only [`Network`] view consumed by exporters, structured errors,
//! and the deterministic RNG handle.

use std::iter::ExactSizeIterator;

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod rng;

pub use errors::{ErrorInfo, PrefnetError};
pub use rng::{derive_substream_seed, RngHandle};

/// Identifier for a node within a [`Network`].
///
/// Identifiers are dense indices assigned in creation order; they are never
/// reused or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(u64);

impl NodeId {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

/// Read-only view of an undirected simple graph.
///
/// Structural contract: adjacency is symmetric (`b` is a neighbour of `a`
/// exactly when `a` is a neighbour of `b`), no node neighbours itself, and
/// neighbour sets contain each peer at most once. Exporters and hashing
/// consume this trait and never mutate graph state.
pub trait Network: Send + Sync {
    /// Returns the current number of nodes.
    fn node_count(&self) -> usize;

    /// Returns the sum of all node degrees (twice the undirected edge count).
    fn total_degree(&self) -> usize;

    /// Returns an iterator over all node identifiers in ascending index order.
    fn nodes(&self) -> Box<dyn ExactSizeIterator<Item = NodeId> + '_>;

    /// Returns the degree of the specified node.
    fn degree(&self, node: NodeId) -> Result<usize, PrefnetError>;

    /// Returns the neighbours of the specified node, sorted ascending.
    fn neighbors(&self, node: NodeId) -> Result<Box<[NodeId]>, PrefnetError>;
}
