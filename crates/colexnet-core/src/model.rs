//! Core data structures for the colexification network

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

/// Stable identifier for a concept node, valid for the lifetime of the loaded network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct NodeId(pub u64);

/// Stable identifier for an attestation edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct EdgeId(pub u64);

/// A single concept in the network.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConceptNode {
    /// Assigned by the network on insertion.
    pub id: NodeId,
    /// Node id as written in the source description.
    pub source_id: i64,
    /// Optional source label (kept for diagnostics only).
    pub label: Option<String>,
    /// Display label and sole external lookup key, typically upper-case English.
    pub gloss: String,
    pub semantic_field: Option<String>,
    pub category: Option<String>,
    // ── Precomputed counters, passed through unchanged ──────
    pub family_frequency: u64,
    pub language_frequency: u64,
    pub word_frequency: u64,
}

impl ConceptNode {
    /// Create a node carrying only a gloss. Counters default to zero.
    pub fn new(source_id: i64, gloss: impl Into<String>) -> Self {
        ConceptNode {
            id: NodeId::default(),
            source_id,
            label: None,
            gloss: gloss.into(),
            semantic_field: None,
            category: None,
            family_frequency: 0,
            language_frequency: 0,
            word_frequency: 0,
        }
    }
}

/// One observation that a colexification is witnessed in a language.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttestationRecord {
    /// Network source code of the attesting language. Never empty.
    pub language_code: String,
    /// Language family, absent when the entry did not carry one.
    pub family_name: Option<String>,
    /// Remaining positional fields (word form, source identifiers), in order.
    pub extra_fields: Vec<String>,
}

/// An undirected colexification edge between two concepts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttestationEdge {
    /// Assigned by the network on insertion.
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    /// Decoded attestations. `None` when the edge carried no attestation string.
    pub attestations: Option<Vec<AttestationRecord>>,
    // ── Precomputed weights, passed through unchanged ───────
    pub family_weight: Option<u64>,
    pub language_weight: Option<u64>,
    pub word_weight: Option<u64>,
}

impl AttestationEdge {
    pub fn new(source: NodeId, target: NodeId, attestations: Option<Vec<AttestationRecord>>) -> Self {
        AttestationEdge {
            id: EdgeId::default(),
            source,
            target,
            attestations,
            family_weight: None,
            language_weight: None,
            word_weight: None,
        }
    }

    /// Whether the edge carried an attestation string at all.
    pub fn is_attested(&self) -> bool {
        self.attestations.is_some()
    }

    /// Decoded records, empty for unattested edges.
    pub fn records(&self) -> &[AttestationRecord] {
        self.attestations.as_deref().unwrap_or(&[])
    }

    /// The endpoint opposite `node`.
    pub fn other(&self, node: NodeId) -> NodeId {
        if self.source == node { self.target } else { self.source }
    }

    /// Distinct languages attested on this edge.
    pub fn languages(&self) -> BTreeSet<String> {
        self.records().iter().map(|r| r.language_code.clone()).collect()
    }

    /// Distinct attested languages that are members of `allowed`.
    pub fn languages_within(&self, allowed: &BTreeSet<String>) -> BTreeSet<String> {
        self.records()
            .iter()
            .filter(|r| allowed.contains(&r.language_code))
            .map(|r| r.language_code.clone())
            .collect()
    }

    /// Whether any record's language is one of `codes`.
    pub fn attested_in_any(&self, codes: &HashSet<String>) -> bool {
        self.records().iter().any(|r| codes.contains(&r.language_code))
    }
}
