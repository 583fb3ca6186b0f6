//! Per-concept and per-concept-pair colexification queries

use crate::languages::SourceCodeResolver;
use colexnet_core::{Network, NodeId};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// One neighbor concept's attested overlap with a query concept.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ColexificationLink {
    pub concept: String,
    /// Number of distinct languages witnessing the colexification.
    pub frequency: usize,
    pub languages: BTreeSet<String>,
}

/// Everything known about a concept's colexifications.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ColexificationData {
    /// Resolved gloss, or the query string when the concept is absent.
    pub concept: String,
    /// Glosses of every neighbor joined by an attested edge.
    pub colexified_concepts: Vec<String>,
    /// Share of attestations per family; sums to 1.0 when non-empty.
    pub family_frequencies: BTreeMap<String, f64>,
    /// Every language that survived the filter, sorted.
    pub languages: Vec<String>,
    pub semantic_field: Option<String>,
    pub category: Option<String>,
    /// Links sorted by frequency, highest first.
    pub detailed_colexifications: Vec<ColexificationLink>,
    pub total_languages: usize,
}

impl ColexificationData {
    /// Result for a concept that is not in the network.
    pub fn empty(concept: &str) -> Self {
        ColexificationData {
            concept: concept.to_string(),
            colexified_concepts: Vec::new(),
            family_frequencies: BTreeMap::new(),
            languages: Vec::new(),
            semantic_field: None,
            category: None,
            detailed_colexifications: Vec::new(),
            total_languages: 0,
        }
    }
}

/// Whether a neighbor colexification is attested in one language.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LanguageColexification {
    pub concept: String,
    pub present: bool,
}

/// Languages of one family witnessing a colexification.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct FamilyColexificationData {
    pub frequency: usize,
    pub languages: BTreeSet<String>,
}

impl FamilyColexificationData {
    fn from_languages(languages: BTreeSet<String>) -> Self {
        FamilyColexificationData {
            frequency: languages.len(),
            languages,
        }
    }
}

/// Colexification patterns of a concept pair within one family.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct FamilyColexifications {
    pub concept1_colexifications: BTreeMap<String, FamilyColexificationData>,
    pub concept2_colexifications: BTreeMap<String, FamilyColexificationData>,
    pub direct_colexification: FamilyColexificationData,
    /// Number of languages the family has anywhere in the network.
    pub total_languages: usize,
}

/// Proportion of a family's languages that colexify a concept pair.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FamilyPattern {
    pub proportion: f64,
    pub languages_with_colexification: Vec<String>,
    pub total_languages_in_family: usize,
    /// Languages colexifying concept2 with a neighbor of concept1.
    pub indirect_languages: Option<Vec<String>>,
}

/// Read-only colexification queries over a loaded network.
#[derive(Debug, Clone, Copy)]
pub struct ColexificationEngine<'a> {
    network: &'a Network,
}

impl<'a> ColexificationEngine<'a> {
    pub fn new(network: &'a Network) -> Self {
        ColexificationEngine { network }
    }

    /// Colexifications of `concept`, optionally restricted to a set of source codes.
    pub fn colexifications_for(
        &self,
        concept: &str,
        language_filter: Option<&BTreeSet<String>>,
    ) -> ColexificationData {
        let Some(node_id) = self.network.find_node_by_gloss(concept) else {
            tracing::debug!("Concept {:?} not found in network", concept);
            return ColexificationData::empty(concept);
        };
        let Some(node) = self.network.node(node_id) else {
            return ColexificationData::empty(concept);
        };

        let mut colexified = Vec::new();
        let mut links = Vec::new();
        let mut family_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut all_languages = BTreeSet::new();

        for edge in self.network.incident_edges(node_id) {
            if !edge.is_attested() {
                continue;
            }
            let Some(neighbor) = self.network.gloss(edge.other(node_id)) else {
                continue;
            };
            colexified.push(neighbor.to_string());

            let mut languages = BTreeSet::new();
            for record in edge.records() {
                if language_filter.is_some_and(|filter| !filter.contains(&record.language_code)) {
                    continue;
                }
                languages.insert(record.language_code.clone());
                if let Some(family) = &record.family_name {
                    *family_counts.entry(family.clone()).or_insert(0) += 1;
                }
            }

            if !languages.is_empty() {
                all_languages.extend(languages.iter().cloned());
                links.push(ColexificationLink {
                    concept: neighbor.to_string(),
                    frequency: languages.len(),
                    languages,
                });
            }
        }

        // Stable: equal frequencies keep neighbor order.
        links.sort_by(|a, b| b.frequency.cmp(&a.frequency));

        tracing::debug!(
            "{}: {} colexifications across {} languages",
            node.gloss,
            links.len(),
            all_languages.len()
        );

        ColexificationData {
            concept: node.gloss.clone(),
            colexified_concepts: colexified,
            family_frequencies: normalize(family_counts),
            total_languages: all_languages.len(),
            languages: all_languages.into_iter().collect(),
            semantic_field: node.semantic_field.clone(),
            category: node.category.clone(),
            detailed_colexifications: links,
        }
    }

    /// Presence of every neighbor colexification in one language.
    ///
    /// Every neighbor is reported; a neighbor not attested in the language is
    /// `present: false` rather than omitted.
    pub fn language_colexifications(
        &self,
        concept: &str,
        language_code: &str,
        resolver: &dyn SourceCodeResolver,
    ) -> Vec<LanguageColexification> {
        let Some(node_id) = self.network.find_node_by_gloss(concept) else {
            return Vec::new();
        };
        let codes: HashSet<String> = resolver.source_codes(language_code).into_iter().collect();
        if codes.is_empty() {
            tracing::debug!("No source codes for language {:?}", language_code);
        }

        self.network
            .incident_edges(node_id)
            .into_iter()
            .filter_map(|edge| {
                let gloss = self.network.gloss(edge.other(node_id))?;
                Some(LanguageColexification {
                    concept: gloss.to_string(),
                    present: edge.attested_in_any(&codes),
                })
            })
            .collect()
    }

    /// Colexifications of a concept pair broken down by family.
    ///
    /// Covers `families` when given and non-empty, otherwise every family in
    /// the index.
    /// Families without any attested language are omitted. Returns an empty
    /// map only when neither concept resolves.
    pub fn family_colexifications(
        &self,
        concept1: &str,
        concept2: &str,
        families: Option<&[String]>,
    ) -> BTreeMap<String, FamilyColexifications> {
        let node1 = self.network.find_node_by_gloss(concept1);
        let node2 = self.network.find_node_by_gloss(concept2);
        if node1.is_none() && node2.is_none() {
            tracing::debug!("Neither {:?} nor {:?} found in network", concept1, concept2);
            return BTreeMap::new();
        }

        let index = self.network.family_index();
        let requested: Vec<&str> = match requested_families(families) {
            Some(families) => families.iter().map(String::as_str).collect(),
            None => index.families().collect(),
        };

        requested
            .par_iter()
            .filter_map(|&family| {
                let allowed = index.family_languages(family);
                if allowed.is_empty() {
                    return None;
                }

                let direct = match (node1, node2) {
                    (Some(a), Some(b)) => self
                        .network
                        .edge(a, b)
                        .map(|edge| FamilyColexificationData::from_languages(edge.languages_within(allowed)))
                        .unwrap_or_default(),
                    _ => FamilyColexificationData::default(),
                };

                Some((
                    family.to_string(),
                    FamilyColexifications {
                        concept1_colexifications: self.neighbor_colexifications(node1, node2, allowed),
                        concept2_colexifications: self.neighbor_colexifications(node2, node1, allowed),
                        direct_colexification: direct,
                        total_languages: allowed.len(),
                    },
                ))
            })
            .collect()
    }

    /// Direct and one-step indirect colexification proportions per family.
    ///
    /// Both concepts must resolve. Indirect languages are those colexifying
    /// concept2 with some other neighbor of concept1.
    pub fn family_patterns(
        &self,
        concept1: &str,
        concept2: &str,
        families: Option<&[String]>,
    ) -> BTreeMap<String, FamilyPattern> {
        let (Some(node1), Some(node2)) = (
            self.network.find_node_by_gloss(concept1),
            self.network.find_node_by_gloss(concept2),
        ) else {
            return BTreeMap::new();
        };

        let families = requested_families(families);
        let wanted = |family: &str| families.is_none_or(|f| f.iter().any(|w| w == family));
        let mut direct: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut indirect: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        if let Some(edge) = self.network.edge(node1, node2) {
            for record in edge.records() {
                if let Some(family) = record.family_name.as_deref().filter(|&f| wanted(f)) {
                    direct.entry(family.to_string()).or_default().insert(record.language_code.clone());
                }
            }
        }

        for neighbor in self.network.neighbors(node1) {
            if neighbor == node2 {
                continue;
            }
            let Some(edge) = self.network.edge(neighbor, node2) else {
                continue;
            };
            for record in edge.records() {
                if let Some(family) = record.family_name.as_deref().filter(|&f| wanted(f)) {
                    direct.entry(family.to_string()).or_default();
                    indirect.entry(family.to_string()).or_default().insert(record.language_code.clone());
                }
            }
        }

        let index = self.network.family_index();
        direct
            .into_iter()
            .filter_map(|(family, languages)| {
                let total = index.language_count(&family);
                if total == 0 {
                    return None;
                }
                let indirect_languages = indirect
                    .get(&family)
                    .filter(|langs| !langs.is_empty())
                    .map(|langs| langs.iter().cloned().collect());
                Some((
                    family,
                    FamilyPattern {
                        proportion: languages.len() as f64 / total as f64,
                        languages_with_colexification: languages.into_iter().collect(),
                        total_languages_in_family: total,
                        indirect_languages,
                    },
                ))
            })
            .collect()
    }

    /// Neighbors of `node` (other than `exclude`) attested within `allowed`.
    fn neighbor_colexifications(
        &self,
        node: Option<NodeId>,
        exclude: Option<NodeId>,
        allowed: &BTreeSet<String>,
    ) -> BTreeMap<String, FamilyColexificationData> {
        let Some(node) = node else {
            return BTreeMap::new();
        };

        let mut out = BTreeMap::new();
        for edge in self.network.incident_edges(node) {
            let neighbor = edge.other(node);
            if Some(neighbor) == exclude {
                continue;
            }
            let languages = edge.languages_within(allowed);
            if languages.is_empty() {
                continue;
            }
            if let Some(gloss) = self.network.gloss(neighbor) {
                out.insert(gloss.to_string(), FamilyColexificationData::from_languages(languages));
            }
        }
        out
    }
}

/// An empty family list means no restriction.
fn requested_families(families: Option<&[String]>) -> Option<&[String]> {
    families.filter(|f| !f.is_empty())
}

fn normalize(counts: BTreeMap<String, usize>) -> BTreeMap<String, f64> {
    let total: usize = counts.values().sum();
    if total == 0 {
        return BTreeMap::new();
    }
    counts
        .into_iter()
        .map(|(family, count)| (family, count as f64 / total as f64))
        .collect()
}
