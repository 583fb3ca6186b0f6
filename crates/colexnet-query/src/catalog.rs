//! Concept listing and gloss search

use colexnet_core::{ConceptNode, Network};
use serde::Serialize;

/// A concept with its stored counters and local edge frequency.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ConceptSummary {
    /// Identifier from the network description.
    pub id: i64,
    pub gloss: String,
    pub semantic_field: Option<String>,
    pub category: Option<String>,
    pub family_frequency: u64,
    pub language_frequency: u64,
    pub word_frequency: u64,
    /// Incident edges carrying attestations.
    pub frequency: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct Catalog<'a> {
    network: &'a Network,
}

impl<'a> Catalog<'a> {
    pub fn new(network: &'a Network) -> Self {
        Catalog { network }
    }

    /// Every concept, most frequently colexified first.
    pub fn all_concepts(&self) -> Vec<ConceptSummary> {
        self.summarize(self.network.nodes())
    }

    /// Concepts whose gloss contains `query`, ignoring case.
    pub fn search_concepts(&self, query: &str) -> Vec<ConceptSummary> {
        let needle = query.to_lowercase();
        let matches = self
            .network
            .nodes()
            .filter(|node| node.gloss.to_lowercase().contains(&needle));
        let results = self.summarize(matches);
        tracing::debug!("Search {:?} matched {} concepts", query, results.len());
        results
    }

    fn summarize<'n>(&self, nodes: impl Iterator<Item = &'n ConceptNode>) -> Vec<ConceptSummary> {
        let mut summaries: Vec<ConceptSummary> = nodes
            .map(|node| ConceptSummary {
                id: node.source_id,
                gloss: node.gloss.clone(),
                semantic_field: node.semantic_field.clone(),
                category: node.category.clone(),
                family_frequency: node.family_frequency,
                language_frequency: node.language_frequency,
                word_frequency: node.word_frequency,
                frequency: self
                    .network
                    .incident_edges(node.id)
                    .iter()
                    .filter(|e| e.is_attested())
                    .count(),
            })
            .collect();
        summaries.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        summaries
    }
}
