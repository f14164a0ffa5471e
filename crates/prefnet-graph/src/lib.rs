#![deny(missing_docs)]

//! Barabási–Albert preferential-attachment network generator.
//!
//! Starting from a small fully-connected seed graph, [`GraphBuilder`]
//! repeatedly adds nodes, each forming a fixed number of links to existing
//! nodes chosen with probability proportional to their current degree, until
//! a configured node count is reached. Exporters for delimited edge lists
//! and node/link visualization structures, snapshot serialization, and
//! canonical hashing consume the finished network through the read-only
//! [`prefnet_core::Network`] view.

mod builder;
mod config;
mod export;
mod hash;
mod sampling;
mod serialization;

pub use builder::GraphBuilder;
pub use config::GeneratorConfig;
pub use export::{
    visual_graph, visual_graph_json, write_edge_list, write_edge_list_to_path, VisualGraph,
    VisualLink, VisualNode, DEFAULT_SEPARATOR,
};
pub use hash::canonical_hash;
pub use serialization::{
    network_from_bytes, network_from_json, network_to_bytes, network_to_json, SchemaVersion,
};
