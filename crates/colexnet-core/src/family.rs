//! Family index: every language attested under each family

use crate::model::AttestationEdge;
use std::collections::{BTreeMap, BTreeSet};

static NO_LANGUAGES: BTreeSet<String> = BTreeSet::new();

/// Maps family names to the distinct languages attested under them anywhere
/// in the network. Serves as the denominator for proportion statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FamilyIndex {
    families: BTreeMap<String, BTreeSet<String>>,
}

impl FamilyIndex {
    /// Scan attestation records and collect `family -> language` pairs.
    pub fn build<'a>(edges: impl IntoIterator<Item = &'a AttestationEdge>) -> Self {
        let mut families: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        for edge in edges {
            for record in edge.records() {
                if let Some(family) = &record.family_name {
                    families
                        .entry(family.clone())
                        .or_default()
                        .insert(record.language_code.clone());
                }
            }
        }

        FamilyIndex { families }
    }

    /// Languages attested under `family`. Empty for unknown families.
    pub fn family_languages(&self, family: &str) -> &BTreeSet<String> {
        self.families.get(family).unwrap_or(&NO_LANGUAGES)
    }

    /// Number of distinct languages attested under `family`.
    pub fn language_count(&self, family: &str) -> usize {
        self.family_languages(family).len()
    }

    pub fn contains(&self, family: &str) -> bool {
        self.families.contains_key(family)
    }

    /// Known family names in sorted order.
    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.families.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}
