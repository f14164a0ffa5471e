use serde::{Deserialize, Serialize};

use prefnet_core::errors::{ErrorInfo, PrefnetError};

/// Parameters governing a preferential-attachment run.
///
/// `links_per_node` is optional; when absent it defaults to `initial_nodes`,
/// resolved exactly once when the builder is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Number of nodes in the fully-connected seed graph.
    pub initial_nodes: usize,
    /// Node count at which growth halts.
    pub max_nodes: usize,
    /// Links each newly added node forms, `1 ≤ m ≤ initial_nodes`.
    #[serde(default)]
    pub links_per_node: Option<usize>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            initial_nodes: 3,
            max_nodes: 100,
            links_per_node: None,
        }
    }
}

impl GeneratorConfig {
    /// Validates the configuration and returns the resolved link count.
    ///
    /// The seed graph needs at least one node, the ceiling must be at least
    /// one, and every new node must be able to pick `links_per_node` distinct
    /// targets out of the seed set on the very first growth step.
    pub fn validate(&self) -> Result<usize, PrefnetError> {
        if self.initial_nodes < 1 {
            return Err(invalid(
                "initial node count must be at least 1",
                "initial_nodes",
                self.initial_nodes,
            ));
        }
        if self.max_nodes < 1 {
            return Err(invalid(
                "maximum node count must be at least 1",
                "max_nodes",
                self.max_nodes,
            ));
        }
        let links = self.links_per_node.unwrap_or(self.initial_nodes);
        if links < 1 {
            return Err(invalid(
                "links per node must be at least 1",
                "links_per_node",
                links,
            ));
        }
        if links > self.initial_nodes {
            return Err(PrefnetError::Config(
                ErrorInfo::new(
                    "invalid-configuration",
                    "links per node exceeds the seed node count",
                )
                .with_context("parameter", "links_per_node")
                .with_context("links_per_node", links)
                .with_context("initial_nodes", self.initial_nodes)
                .with_hint("the first growth step cannot select enough distinct targets"),
            ));
        }
        Ok(links)
    }
}

fn invalid(message: &str, parameter: &str, value: usize) -> PrefnetError {
    PrefnetError::Config(
        ErrorInfo::new("invalid-configuration", message)
            .with_context("parameter", parameter)
            .with_context("value", value),
    )
}
