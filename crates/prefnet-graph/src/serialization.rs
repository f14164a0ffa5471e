use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use prefnet_core::errors::{ErrorInfo, PrefnetError};
use prefnet_core::{Network, NodeId};

use crate::builder::GraphBuilder;
use crate::config::GeneratorConfig;

/// Schema version stamped into every snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Major version incremented for breaking snapshot changes.
    pub major: u32,
    /// Minor version incremented for additive changes.
    pub minor: u32,
    /// Patch version incremented for fixes.
    pub patch: u32,
}

impl SchemaVersion {
    /// Creates a new schema version descriptor.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

pub(crate) const SNAPSHOT_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

/// Serializes the network to a compact binary snapshot using `bincode`.
pub fn network_to_bytes(graph: &GraphBuilder) -> Result<Vec<u8>, PrefnetError> {
    let snapshot = NetworkSnapshot::from_graph(graph);
    bincode::serialize(&snapshot)
        .map_err(|err| PrefnetError::Serde(ErrorInfo::new("serialize-bytes", err.to_string())))
}

/// Restores a network from its binary snapshot.
pub fn network_from_bytes(bytes: &[u8]) -> Result<GraphBuilder, PrefnetError> {
    let snapshot: NetworkSnapshot = bincode::deserialize(bytes)
        .map_err(|err| PrefnetError::Serde(ErrorInfo::new("deserialize-bytes", err.to_string())))?;
    snapshot.into_graph()
}

/// Serializes the network to a JSON snapshot.
pub fn network_to_json(graph: &GraphBuilder) -> Result<String, PrefnetError> {
    let snapshot = NetworkSnapshot::from_graph(graph);
    serde_json::to_string_pretty(&snapshot)
        .map_err(|err| PrefnetError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Restores a network from a JSON snapshot.
pub fn network_from_json(json: &str) -> Result<GraphBuilder, PrefnetError> {
    let snapshot: NetworkSnapshot = serde_json::from_str(json)
        .map_err(|err| PrefnetError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
    snapshot.into_graph()
}

#[derive(Debug, Serialize, Deserialize)]
struct NetworkSnapshot {
    schema_version: SchemaVersion,
    config: GeneratorConfig,
    total_degree: usize,
    neighbors: Vec<Vec<u64>>,
}

impl NetworkSnapshot {
    fn from_graph(graph: &GraphBuilder) -> Self {
        let neighbors = graph
            .neighbor_sets()
            .iter()
            .map(|links| links.iter().map(|id| id.as_raw()).collect())
            .collect();
        Self {
            schema_version: SNAPSHOT_SCHEMA,
            config: graph.config().clone(),
            total_degree: graph.total_degree(),
            neighbors,
        }
    }

    /// Re-validates the structural invariants before handing the state back
    /// to a builder: a snapshot edited or corrupted in transit must never
    /// produce a graph whose counters disagree with its adjacency.
    fn into_graph(self) -> Result<GraphBuilder, PrefnetError> {
        if self.schema_version.major != SNAPSHOT_SCHEMA.major {
            return Err(corrupt("unsupported snapshot schema")
                .with_context("schema_major", self.schema_version.major));
        }
        let links_per_node = self.config.validate()?;
        let node_count = self.neighbors.len();
        if node_count < self.config.initial_nodes || node_count > self.config.max_nodes {
            return Err(corrupt("node count outside the configured range")
                .with_context("node_count", node_count));
        }

        let mut sets: Vec<BTreeSet<NodeId>> = Vec::with_capacity(node_count);
        for (index, links) in self.neighbors.iter().enumerate() {
            let mut set = BTreeSet::new();
            for &raw in links {
                if raw as usize >= node_count {
                    return Err(corrupt("neighbour index out of range")
                        .with_context("node", index)
                        .with_context("neighbour", raw));
                }
                if raw as usize == index {
                    return Err(
                        corrupt("node listed as its own neighbour").with_context("node", index)
                    );
                }
                set.insert(NodeId::from_raw(raw));
            }
            if set.len() != links.len() {
                return Err(
                    corrupt("duplicate neighbour entries").with_context("node", index)
                );
            }
            sets.push(set);
        }

        let mut degree_sum = 0usize;
        for (index, links) in sets.iter().enumerate() {
            degree_sum += links.len();
            for peer in links {
                if !sets[peer.as_raw() as usize].contains(&NodeId::from_raw(index as u64)) {
                    return Err(corrupt("asymmetric adjacency")
                        .with_context("node", index)
                        .with_context("neighbour", peer.as_raw()));
                }
            }
        }
        if degree_sum != self.total_degree {
            return Err(corrupt("degree counter disagrees with adjacency")
                .with_context("stored", self.total_degree)
                .with_context("actual", degree_sum));
        }

        Ok(GraphBuilder::from_snapshot_parts(
            self.config,
            links_per_node,
            sets,
            degree_sum,
        ))
    }
}

fn corrupt(message: &str) -> PrefnetError {
    PrefnetError::Serde(ErrorInfo::new("corrupt-snapshot", message))
}

trait ContextExt {
    fn with_context(self, key: &str, value: impl ToString) -> PrefnetError;
}

impl ContextExt for PrefnetError {
    fn with_context(self, key: &str, value: impl ToString) -> PrefnetError {
        match self {
            PrefnetError::Serde(info) => PrefnetError::Serde(info.with_context(key, value)),
            other => other,
        }
    }
}
