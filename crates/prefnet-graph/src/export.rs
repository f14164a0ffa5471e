use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use csv::WriterBuilder;
use serde::{Deserialize, Serialize};

use prefnet_core::errors::{ErrorInfo, PrefnetError};
use prefnet_core::Network;

/// Field separator used by [`write_edge_list`] unless overridden.
pub const DEFAULT_SEPARATOR: u8 = b',';

/// Writes the network as a delimited edge list.
///
/// Emits one record per *directed* adjacency pair, so every undirected edge
/// appears twice, once from each endpoint's perspective. That doubling is an
/// exporter convention; the graph itself stores each edge symmetrically.
/// Records are ordered by source index, then target index.
pub fn write_edge_list<N, W>(network: &N, writer: W, separator: u8) -> Result<(), PrefnetError>
where
    N: Network + ?Sized,
    W: io::Write,
{
    let mut out = WriterBuilder::new()
        .delimiter(separator)
        .has_headers(false)
        .from_writer(writer);
    for node in network.nodes() {
        for target in network.neighbors(node)?.iter() {
            out.write_record([node.as_raw().to_string(), target.as_raw().to_string()])
                .map_err(|err| wrap_csv("edge-list-write", err))?;
        }
    }
    out.flush()
        .map_err(|err| wrap_csv("edge-list-flush", err.into()))?;
    Ok(())
}

/// Writes the edge list to a file, creating or truncating it.
pub fn write_edge_list_to_path<N>(
    network: &N,
    path: impl AsRef<Path>,
    separator: u8,
) -> Result<(), PrefnetError>
where
    N: Network + ?Sized,
{
    let path = path.as_ref();
    let file = File::create(path).map_err(|err| {
        PrefnetError::Serde(
            ErrorInfo::new("edge-list-open", "failed to open edge list file")
                .with_context("path", path.display())
                .with_hint(err.to_string()),
        )
    })?;
    write_edge_list(network, BufWriter::new(file), separator)
}

/// Node entry of a [`VisualGraph`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualNode {
    /// Dense node index.
    pub id: u64,
    /// Degree at export time.
    pub degree: usize,
}

/// Link entry of a [`VisualGraph`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualLink {
    /// Source node index.
    pub source: u64,
    /// Target node index.
    pub target: u64,
}

/// Node/link structure consumed by force-directed visualizations.
///
/// `nodes` lists every node in index order with its degree; `links` carries
/// one entry per directed adjacency pair, matching the edge-list exporter's
/// doubling convention. Field order keeps `nodes` ahead of `links` in the
/// serialized text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualGraph {
    /// All nodes in ascending index order.
    pub nodes: Vec<VisualNode>,
    /// All directed adjacency pairs, ordered by source then target.
    pub links: Vec<VisualLink>,
}

/// Builds the visualization structure for the provided network.
pub fn visual_graph<N>(network: &N) -> Result<VisualGraph, PrefnetError>
where
    N: Network + ?Sized,
{
    let mut nodes = Vec::with_capacity(network.node_count());
    let mut links = Vec::with_capacity(network.total_degree());
    for node in network.nodes() {
        let targets = network.neighbors(node)?;
        nodes.push(VisualNode {
            id: node.as_raw(),
            degree: targets.len(),
        });
        for target in targets.iter() {
            links.push(VisualLink {
                source: node.as_raw(),
                target: target.as_raw(),
            });
        }
    }
    Ok(VisualGraph { nodes, links })
}

/// Serializes the visualization structure to JSON text.
pub fn visual_graph_json<N>(network: &N) -> Result<String, PrefnetError>
where
    N: Network + ?Sized,
{
    let graph = visual_graph(network)?;
    serde_json::to_string(&graph)
        .map_err(|err| PrefnetError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

fn wrap_csv(code: &str, err: csv::Error) -> PrefnetError {
    PrefnetError::Serde(ErrorInfo::new(code, err.to_string()))
}
