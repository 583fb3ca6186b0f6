//! Semantic chain discovery between two concepts
//!
//! A chain is a simple path whose every hop is attested in at least one
//! language of the chosen family. Hops are scored by the share of the
//! family's languages attesting them; a chain scores the geometric mean of
//! its hops.

use colexnet_core::{AttestationEdge, EdgeId, Network, NodeId};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};

/// A scored path of concept glosses.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Chain {
    pub path: Vec<String>,
    /// One score per hop, each in `(0, 1]`.
    pub scores: Vec<f64>,
    pub total_score: f64,
}

impl Chain {
    /// Number of hops.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:.3})", self.path.join(" -> "), self.total_score)
    }
}

/// Geometric mean of strictly positive scores; 0 if any score is not positive.
pub fn geometric_mean(scores: &[f64]) -> f64 {
    if scores.is_empty() || scores.iter().any(|&s| s <= 0.0) {
        return 0.0;
    }
    let mean_log = scores.iter().map(|s| s.ln()).sum::<f64>() / scores.len() as f64;
    mean_log.exp()
}

/// Bounded-depth chain search over a loaded network.
#[derive(Debug, Clone, Copy)]
pub struct ChainFinder<'a> {
    network: &'a Network,
}

impl<'a> ChainFinder<'a> {
    pub fn new(network: &'a Network) -> Self {
        ChainFinder { network }
    }

    /// Every valid chain from `concept1` to `concept2` of at most `max_depth`
    /// hops, attested within `family`, in depth-first enumeration order.
    ///
    /// Cost grows exponentially with `max_depth` on dense families; depth is
    /// the only limit applied here.
    pub fn find_chains(&self, concept1: &str, concept2: &str, family: &str, max_depth: usize) -> Vec<Chain> {
        let index = self.network.family_index();
        if !index.contains(family) {
            tracing::debug!("Family {:?} is not attested in the network", family);
            return Vec::new();
        }
        let chains = self.find_chains_within(concept1, concept2, index.family_languages(family), max_depth);
        tracing::debug!(
            "Found {} chains between {} and {} in {} (max depth {})",
            chains.len(),
            concept1,
            concept2,
            family,
            max_depth
        );
        chains
    }

    /// Like [`find_chains`](Self::find_chains) with an explicit language set
    /// standing in for the family. Scores are shares of `allowed`.
    pub fn find_chains_within(
        &self,
        concept1: &str,
        concept2: &str,
        allowed: &BTreeSet<String>,
        max_depth: usize,
    ) -> Vec<Chain> {
        let (Some(start), Some(goal)) = (
            self.network.find_node_by_gloss(concept1),
            self.network.find_node_by_gloss(concept2),
        ) else {
            return Vec::new();
        };
        if start == goal || max_depth == 0 || allowed.is_empty() {
            return Vec::new();
        }

        let mut search = Search {
            network: self.network,
            allowed,
            goal,
            max_depth,
            edge_scores: HashMap::new(),
            path: vec![start],
            path_scores: Vec::new(),
            on_path: HashSet::from([start]),
            chains: Vec::new(),
        };
        search.visit(start);
        search.chains
    }
}

struct Search<'a> {
    network: &'a Network,
    allowed: &'a BTreeSet<String>,
    goal: NodeId,
    max_depth: usize,
    edge_scores: HashMap<EdgeId, f64>,
    path: Vec<NodeId>,
    path_scores: Vec<f64>,
    on_path: HashSet<NodeId>,
    chains: Vec<Chain>,
}

impl<'a> Search<'a> {
    fn visit(&mut self, node: NodeId) {
        if self.path_scores.len() == self.max_depth {
            return;
        }

        let network = self.network;
        for edge in network.incident_edges(node) {
            let next = edge.other(node);
            if self.on_path.contains(&next) {
                continue;
            }
            // Unattested hops break the chain, so never extend through them.
            let score = self.score(edge);
            if score <= 0.0 {
                continue;
            }

            self.path.push(next);
            self.path_scores.push(score);
            if next == self.goal {
                self.emit();
            } else {
                self.on_path.insert(next);
                self.visit(next);
                self.on_path.remove(&next);
            }
            self.path.pop();
            self.path_scores.pop();
        }
    }

    fn score(&mut self, edge: &AttestationEdge) -> f64 {
        let allowed = self.allowed;
        *self.edge_scores.entry(edge.id).or_insert_with(|| {
            edge.languages_within(allowed).len() as f64 / allowed.len() as f64
        })
    }

    fn emit(&mut self) {
        let path = self
            .path
            .iter()
            .map(|&n| self.network.gloss(n).unwrap_or_default().to_string())
            .collect();
        self.chains.push(Chain {
            path,
            scores: self.path_scores.clone(),
            total_score: geometric_mean(&self.path_scores),
        });
    }
}
