//! Network store using petgraph::StableUnGraph with custom NodeId/EdgeId

use crate::family::FamilyIndex;
use crate::model::*;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableUnGraph};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// The colexification network: an undirected graph of concepts, frozen after load.
///
/// A `Network` has no mutation path once built, so it can be shared across
/// threads behind a plain `&Network` or `Arc<Network>`.
pub struct Network {
    inner: StableUnGraph<ConceptNode, AttestationEdge>,
    families: FamilyIndex,
    /// First node carrying each gloss.
    glosses: HashMap<String, NodeId>,
}

impl std::fmt::Debug for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Network")
            .field("node_count", &self.inner.node_count())
            .field("edge_count", &self.inner.edge_count())
            .field("family_count", &self.families.len())
            .finish()
    }
}

fn node_index(id: NodeId) -> NodeIndex {
    NodeIndex::new(id.0 as usize)
}

impl Network {
    /// Get a node by ID.
    pub fn node(&self, id: NodeId) -> Option<&ConceptNode> {
        self.inner.node_weight(node_index(id))
    }

    /// Gloss of a node, if it exists.
    pub fn gloss(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(|n| n.gloss.as_str())
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Iterate over all nodes in declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = &ConceptNode> {
        self.inner
            .node_indices()
            .filter_map(move |idx| self.inner.node_weight(idx))
    }

    /// Iterate over all edges in declaration order.
    pub fn edges(&self) -> impl Iterator<Item = &AttestationEdge> {
        self.inner
            .edge_indices()
            .filter_map(move |idx| self.inner.edge_weight(idx))
    }

    /// Find a node by gloss, trying the concept as given and then upper-cased.
    ///
    /// Returns the first match in declaration order. Duplicate glosses after
    /// the first are unreachable through this lookup.
    pub fn find_node_by_gloss(&self, concept: &str) -> Option<NodeId> {
        let exact = self.glosses.get(concept).copied();
        let upper = self.glosses.get(&concept.to_uppercase()).copied();
        match (exact, upper) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Edges touching `node`, in declaration order.
    pub fn incident_edges(&self, node: NodeId) -> Vec<&AttestationEdge> {
        let idx = node_index(node);
        if !self.inner.contains_node(idx) {
            return Vec::new();
        }
        let mut edge_ids: Vec<EdgeIndex> = self.inner.edges(idx).map(|e| e.id()).collect();
        edge_ids.sort();
        edge_ids
            .into_iter()
            .filter_map(|e| self.inner.edge_weight(e))
            .collect()
    }

    /// Nodes connected to `node` by an edge, in edge declaration order.
    pub fn neighbors(&self, node: NodeId) -> Vec<NodeId> {
        self.incident_edges(node)
            .into_iter()
            .map(|e| e.other(node))
            .collect()
    }

    /// The edge between two nodes, regardless of the order they are given in.
    pub fn edge(&self, a: NodeId, b: NodeId) -> Option<&AttestationEdge> {
        let (ia, ib) = (node_index(a), node_index(b));
        if !self.inner.contains_node(ia) || !self.inner.contains_node(ib) {
            return None;
        }
        self.inner
            .find_edge(ia, ib)
            .and_then(|e| self.inner.edge_weight(e))
    }

    /// The family index built at load time.
    pub fn family_index(&self) -> &FamilyIndex {
        &self.families
    }
}

/// Accumulates nodes and edges, then freezes them into a [`Network`].
pub struct NetworkBuilder {
    inner: StableUnGraph<ConceptNode, AttestationEdge>,
    pairs: HashMap<(NodeIndex, NodeIndex), EdgeIndex>,
    merged_edges: usize,
    dropped_loops: usize,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        NetworkBuilder {
            inner: StableUnGraph::default(),
            pairs: HashMap::new(),
            merged_edges: 0,
            dropped_loops: 0,
        }
    }

    /// Add a node. Returns assigned NodeId.
    pub fn add_node(&mut self, node: ConceptNode) -> NodeId {
        let idx = self.inner.add_node(node);
        let id = NodeId(idx.index() as u64);
        if let Some(weight) = self.inner.node_weight_mut(idx) {
            weight.id = id;
        }
        id
    }

    /// Add an edge between `edge.source` and `edge.target`.
    ///
    /// A second edge between an already connected pair, in either
    /// orientation, is folded into the existing one. Self-loops and edges
    /// with unknown endpoints are dropped. Returns the id of the edge that
    /// now holds the attestations.
    pub fn add_edge(&mut self, edge: AttestationEdge) -> Option<EdgeId> {
        let (source, target) = (node_index(edge.source), node_index(edge.target));
        if !self.inner.contains_node(source) || !self.inner.contains_node(target) {
            tracing::warn!("Dropping edge with unknown endpoint: {:?} -- {:?}", edge.source, edge.target);
            return None;
        }
        if source == target {
            tracing::debug!("Dropping self-loop on node {:?}", edge.source);
            self.dropped_loops += 1;
            return None;
        }

        let key = if source < target { (source, target) } else { (target, source) };
        if let Some(&existing) = self.pairs.get(&key) {
            if let Some(current) = self.inner.edge_weight_mut(existing) {
                merge_edge(current, edge);
            }
            self.merged_edges += 1;
            return Some(EdgeId(existing.index() as u64));
        }

        let idx = self.inner.add_edge(source, target, edge);
        let id = EdgeId(idx.index() as u64);
        if let Some(weight) = self.inner.edge_weight_mut(idx) {
            weight.id = id;
        }
        self.pairs.insert(key, idx);
        Some(id)
    }

    /// Freeze the graph and build the family index.
    pub fn build(self) -> Network {
        if self.merged_edges > 0 {
            tracing::debug!("Merged {} repeated edges into existing pairs", self.merged_edges);
        }
        if self.dropped_loops > 0 {
            tracing::warn!("Dropped {} self-loop edges", self.dropped_loops);
        }

        let mut glosses: HashMap<String, NodeId> = HashMap::new();
        for node in self.inner.node_indices().filter_map(|idx| self.inner.node_weight(idx)) {
            if glosses.contains_key(&node.gloss) {
                tracing::warn!("Duplicate gloss {:?} on node {}; only the first is reachable by lookup", node.gloss, node.source_id);
            } else {
                glosses.insert(node.gloss.clone(), node.id);
            }
        }

        let families = FamilyIndex::build(
            self.inner
                .edge_indices()
                .filter_map(|idx| self.inner.edge_weight(idx)),
        );
        tracing::info!("Found {} language families", families.len());
        for family in families.families() {
            tracing::debug!("{}: {} languages", family, families.language_count(family));
        }

        Network {
            inner: self.inner,
            families,
            glosses,
        }
    }
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn merge_edge(current: &mut AttestationEdge, incoming: AttestationEdge) {
    if let Some(records) = incoming.attestations {
        current.attestations.get_or_insert_with(Vec::new).extend(records);
    }
    current.family_weight = add_weights(current.family_weight, incoming.family_weight);
    current.language_weight = add_weights(current.language_weight, incoming.language_weight);
    current.word_weight = add_weights(current.word_weight, incoming.word_weight);
}

fn add_weights(a: Option<u64>, b: Option<u64>) -> Option<u64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.saturating_add(b)),
        (a, b) => a.or(b),
    }
}
