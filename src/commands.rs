//! CLI command implementations
//!
//! Every command renders its result to a string, either pretty JSON or a
//! plain-text table.

use colexnet_core::Network;
use colexnet_query::{Catalog, ChainFinder, ColexificationEngine, SourceCodeResolver};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

#[derive(Debug, Serialize)]
pub struct Stats {
    pub concepts: usize,
    pub edges: usize,
    pub attested_edges: usize,
    pub families: BTreeMap<String, usize>,
}

fn render<T: Serialize>(value: &T, json: bool, text: impl FnOnce(&T) -> String) -> anyhow::Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(text(value))
    }
}

fn join(items: impl IntoIterator<Item = impl AsRef<str>>) -> String {
    items
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn stats(network: &Network, json: bool) -> anyhow::Result<String> {
    let index = network.family_index();
    let stats = Stats {
        concepts: network.node_count(),
        edges: network.edge_count(),
        attested_edges: network.edges().filter(|e| e.is_attested()).count(),
        families: index
            .families()
            .map(|f| (f.to_string(), index.language_count(f)))
            .collect(),
    };

    render(&stats, json, |s| {
        let mut out = format!(
            "{} concepts, {} edges ({} attested), {} families\n",
            s.concepts,
            s.edges,
            s.attested_edges,
            s.families.len()
        );
        for (family, count) in &s.families {
            let _ = writeln!(out, "  {:<30} {}", family, count);
        }
        out
    })
}

pub fn concepts(network: &Network, limit: Option<usize>, json: bool) -> anyhow::Result<String> {
    let mut concepts = Catalog::new(network).all_concepts();
    if let Some(limit) = limit {
        concepts.truncate(limit);
    }
    render(&concepts, json, |c| concept_table(c))
}

pub fn search(network: &Network, query: &str, json: bool) -> anyhow::Result<String> {
    let concepts = Catalog::new(network).search_concepts(query);
    render(&concepts, json, |c| {
        if c.is_empty() {
            format!("no concepts match {:?}\n", query)
        } else {
            concept_table(c)
        }
    })
}

fn concept_table(concepts: &[colexnet_query::ConceptSummary]) -> String {
    let mut out = String::new();
    for c in concepts {
        let _ = writeln!(
            out,
            "{:<24} {:>4}  {}",
            c.gloss,
            c.frequency,
            c.semantic_field.as_deref().unwrap_or("-")
        );
    }
    out
}

/// Colexifications of one concept. `languages` may hold ISO codes or raw
/// source codes; ISO codes are expanded through `resolver`.
pub fn colex(
    network: &Network,
    concept: &str,
    languages: &[String],
    resolver: &dyn SourceCodeResolver,
    json: bool,
) -> anyhow::Result<String> {
    let filter: Option<BTreeSet<String>> = (!languages.is_empty()).then(|| {
        languages
            .iter()
            .flat_map(|code| {
                let codes = resolver.source_codes(code);
                if codes.is_empty() { vec![code.clone()] } else { codes }
            })
            .collect()
    });

    let data = ColexificationEngine::new(network).colexifications_for(concept, filter.as_ref());
    render(&data, json, |d| {
        if d.colexified_concepts.is_empty() {
            return format!("{}: no colexifications\n", d.concept);
        }
        let mut out = format!("{} ({} languages)\n", d.concept, d.total_languages);
        for link in &d.detailed_colexifications {
            let _ = writeln!(out, "  {:<24} {:>4}", link.concept, link.frequency);
        }
        if !d.family_frequencies.is_empty() {
            out.push_str("families:\n");
            for (family, share) in &d.family_frequencies {
                let _ = writeln!(out, "  {:<30} {:>5.1}%", family, share * 100.0);
            }
        }
        out
    })
}

pub fn language(
    network: &Network,
    concept: &str,
    iso: &str,
    resolver: &dyn SourceCodeResolver,
    json: bool,
) -> anyhow::Result<String> {
    let result = ColexificationEngine::new(network).language_colexifications(concept, iso, resolver);
    render(&result, json, |r| {
        let mut out = String::new();
        for entry in r {
            let _ = writeln!(out, "{:<24} {}", entry.concept, if entry.present { "yes" } else { "no" });
        }
        out
    })
}

fn families_arg(families: &[String]) -> Option<&[String]> {
    (!families.is_empty()).then_some(families)
}

pub fn family(
    network: &Network,
    concept1: &str,
    concept2: &str,
    families: &[String],
    json: bool,
) -> anyhow::Result<String> {
    let result =
        ColexificationEngine::new(network).family_colexifications(concept1, concept2, families_arg(families));
    render(&result, json, |r| {
        let mut out = String::new();
        for (family, data) in r {
            let _ = writeln!(out, "{} ({} languages)", family, data.total_languages);
            let _ = writeln!(
                out,
                "  direct: {} [{}]",
                data.direct_colexification.frequency,
                join(&data.direct_colexification.languages)
            );
            for (label, links) in [(concept1, &data.concept1_colexifications), (concept2, &data.concept2_colexifications)] {
                for (neighbor, link) in links {
                    let _ = writeln!(out, "  {} ~ {}: {}", label, neighbor, link.frequency);
                }
            }
        }
        out
    })
}

pub fn patterns(
    network: &Network,
    concept1: &str,
    concept2: &str,
    families: &[String],
    json: bool,
) -> anyhow::Result<String> {
    let result = ColexificationEngine::new(network).family_patterns(concept1, concept2, families_arg(families));
    render(&result, json, |r| {
        let mut out = String::new();
        for (family, pattern) in r {
            let _ = write!(
                out,
                "{:<30} {:>5.1}%  {}/{}",
                family,
                pattern.proportion * 100.0,
                pattern.languages_with_colexification.len(),
                pattern.total_languages_in_family
            );
            if let Some(indirect) = &pattern.indirect_languages {
                let _ = write!(out, "  indirect: {}", join(indirect));
            }
            out.push('\n');
        }
        out
    })
}

pub fn chains(
    network: &Network,
    concept1: &str,
    concept2: &str,
    family: &str,
    max_depth: usize,
    json: bool,
) -> anyhow::Result<String> {
    let concept1 = concept1.to_uppercase();
    let concept2 = concept2.to_uppercase();
    let chains = ChainFinder::new(network).find_chains(&concept1, &concept2, family, max_depth);
    tracing::info!("{} chains from {} to {} in {}", chains.len(), concept1, concept2, family);

    render(&chains, json, |c| {
        if c.is_empty() {
            return "no chains found\n".to_string();
        }
        c.iter().map(|chain| format!("{}\n", chain)).collect()
    })
}
