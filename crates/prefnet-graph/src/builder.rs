use std::collections::BTreeSet;

use prefnet_core::errors::{ErrorInfo, PrefnetError};
use prefnet_core::rng::RngHandle;
use prefnet_core::{Network, NodeId};

use crate::config::GeneratorConfig;
use crate::sampling::sample_by_degree;

/// Preferential-attachment network builder.
///
/// Owns the adjacency structure and the degree-sum counter and is the sole
/// mutator of both. Construction seeds a complete graph on
/// `config.initial_nodes` nodes; [`GraphBuilder::generate`] then grows the
/// network one node at a time until `config.max_nodes` is reached, attaching
/// each new node to existing nodes chosen with probability proportional to
/// their current degree.
///
/// Growth is inherently sequential: every step's selection depends on the
/// degree distribution left behind by all earlier steps.
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    config: GeneratorConfig,
    links_per_node: usize,
    neighbors: Vec<BTreeSet<NodeId>>,
    total_degree: usize,
}

impl GraphBuilder {
    /// Validates the configuration and seeds the complete graph.
    ///
    /// On success every pair of distinct seed nodes is mutually linked and
    /// `total_degree` equals `n × (n − 1)`. No partially constructed builder
    /// is ever exposed on failure.
    pub fn new(config: GeneratorConfig) -> Result<Self, PrefnetError> {
        let links_per_node = config.validate()?;
        let initial = config.initial_nodes;
        let mut neighbors: Vec<BTreeSet<NodeId>> = Vec::with_capacity(config.max_nodes);
        for index in 0..initial {
            let mut links = BTreeSet::new();
            for peer in 0..initial {
                if peer != index {
                    links.insert(NodeId::from_raw(peer as u64));
                }
            }
            neighbors.push(links);
        }
        Ok(Self {
            config,
            links_per_node,
            neighbors,
            total_degree: initial * (initial - 1),
        })
    }

    /// Returns the configuration the builder was constructed with.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Returns the resolved number of links each new node forms.
    pub fn links_per_node(&self) -> usize {
        self.links_per_node
    }

    /// Returns whether the network has reached its configured ceiling.
    pub fn is_complete(&self) -> bool {
        self.neighbors.len() >= self.config.max_nodes
    }

    /// Returns whether the two nodes are directly linked.
    pub fn has_link(&self, a: NodeId, b: NodeId) -> Result<bool, PrefnetError> {
        Ok(self.record(a)?.contains(&b))
    }

    /// Picks the attachment targets for the next node without mutating state.
    ///
    /// Returns exactly `links_per_node` distinct existing node identifiers,
    /// sampled without replacement with probability proportional to current
    /// degree, sorted ascending. The eligible pool and remaining degree total
    /// are transient to this call; repeated invocations on an untouched
    /// builder draw from identical weights.
    pub fn select_targets(&self, rng: &mut RngHandle) -> Result<Vec<NodeId>, PrefnetError> {
        let degrees: Vec<usize> = self.neighbors.iter().map(|links| links.len()).collect();
        let indices = sample_by_degree(&degrees, self.total_degree, self.links_per_node, rng)?;
        Ok(indices
            .into_iter()
            .map(|index| NodeId::from_raw(index as u64))
            .collect())
    }

    /// Attaches one new node to the network.
    ///
    /// The selection runs to completion before any edge is written, so a
    /// failed selection leaves the graph untouched. On success the new node
    /// takes the next dense index, gains a mutual link to every selected
    /// target, and the degree sum grows by `2 × links_per_node`.
    pub fn growth_step(&mut self, rng: &mut RngHandle) -> Result<NodeId, PrefnetError> {
        let targets = self.select_targets(rng)?;
        let new_node = NodeId::from_raw(self.neighbors.len() as u64);
        let mut links = BTreeSet::new();
        for target in targets {
            self.neighbors[target.as_raw() as usize].insert(new_node);
            links.insert(target);
        }
        self.neighbors.push(links);
        self.total_degree += 2 * self.links_per_node;
        Ok(new_node)
    }

    /// Grows the network until the configured node ceiling is reached.
    ///
    /// Performs exactly `max_nodes − node_count` steps; a no-op when the
    /// network already meets or exceeds the ceiling. Any step error aborts
    /// immediately, leaving the network in its partially-grown state.
    pub fn generate(&mut self, rng: &mut RngHandle) -> Result<(), PrefnetError> {
        while self.neighbors.len() < self.config.max_nodes {
            self.growth_step(rng)?;
        }
        Ok(())
    }

    pub(crate) fn neighbor_sets(&self) -> &[BTreeSet<NodeId>] {
        &self.neighbors
    }

    /// Reassembles a builder from snapshot parts already validated by the
    /// serialization layer.
    pub(crate) fn from_snapshot_parts(
        config: GeneratorConfig,
        links_per_node: usize,
        neighbors: Vec<BTreeSet<NodeId>>,
        total_degree: usize,
    ) -> Self {
        Self {
            config,
            links_per_node,
            neighbors,
            total_degree,
        }
    }

    fn record(&self, node: NodeId) -> Result<&BTreeSet<NodeId>, PrefnetError> {
        self.neighbors.get(node.as_raw() as usize).ok_or_else(|| {
            PrefnetError::Generation(
                ErrorInfo::new("unknown-node", "node does not exist")
                    .with_context("node", node.as_raw()),
            )
        })
    }
}

impl Network for GraphBuilder {
    fn node_count(&self) -> usize {
        self.neighbors.len()
    }

    fn total_degree(&self) -> usize {
        self.total_degree
    }

    fn nodes(&self) -> Box<dyn ExactSizeIterator<Item = NodeId> + '_> {
        Box::new((0..self.neighbors.len()).map(|index| NodeId::from_raw(index as u64)))
    }

    fn degree(&self, node: NodeId) -> Result<usize, PrefnetError> {
        Ok(self.record(node)?.len())
    }

    fn neighbors(&self, node: NodeId) -> Result<Box<[NodeId]>, PrefnetError> {
        Ok(self.record(node)?.iter().copied().collect())
    }
}
