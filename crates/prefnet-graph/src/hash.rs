use sha2::{Digest, Sha256};

use prefnet_core::errors::PrefnetError;
use prefnet_core::Network;

use crate::builder::GraphBuilder;

/// Computes the canonical structural hash for the provided network.
///
/// The hash covers the resolved configuration, the node count, and the
/// sorted undirected edge set, so two networks hash equal exactly when they
/// are structurally identical, regardless of the order their edges were
/// created in.
pub fn canonical_hash(graph: &GraphBuilder) -> Result<String, PrefnetError> {
    let mut hasher = Sha256::new();
    hasher.update((graph.config().initial_nodes as u64).to_le_bytes());
    hasher.update((graph.config().max_nodes as u64).to_le_bytes());
    hasher.update((graph.links_per_node() as u64).to_le_bytes());
    hasher.update((graph.node_count() as u64).to_le_bytes());

    let mut edges: Vec<(u64, u64)> = Vec::with_capacity(graph.total_degree() / 2);
    for node in graph.nodes() {
        for peer in graph.neighbors(node)?.iter() {
            if node.as_raw() < peer.as_raw() {
                edges.push((node.as_raw(), peer.as_raw()));
            }
        }
    }
    edges.sort_unstable();
    hasher.update((edges.len() as u64).to_le_bytes());
    for (low, high) in edges {
        hasher.update(low.to_le_bytes());
        hasher.update(high.to_le_bytes());
    }

    Ok(format!("{:x}", hasher.finalize()))
}
