//! Build a [`Network`] from a GML network description

use crate::error::LoadError;
use crate::gml::{lookup, parse_gml, GmlEntry, GmlValue};
use crate::sanitize::strip_non_ascii;
use colexnet_core::{decode_attestations, AttestationEdge, ConceptNode, Network, NetworkBuilder, NodeId};
use std::collections::HashMap;
use std::path::Path;

/// Edge attribute holding the packed attestation list.
pub const ATTESTATION_KEY: &str = "wofam";

const GLOSS_KEY: &str = "Gloss";
const LABEL_KEY: &str = "label";
const SEMANTIC_FIELD_KEY: &str = "Semanticfield";
const CATEGORY_KEY: &str = "Category";
const FAMILY_FREQUENCY_KEY: &str = "FamilyFrequency";
const LANGUAGE_FREQUENCY_KEY: &str = "LanguageFrequency";
const WORD_FREQUENCY_KEY: &str = "WordFrequency";
const FAMILY_WEIGHT_KEY: &str = "FamilyWeight";
const LANGUAGE_WEIGHT_KEY: &str = "LanguageWeight";
const WORD_WEIGHT_KEY: &str = "WordWeight";

/// Load a network description from disk.
pub fn load(path: impl AsRef<Path>) -> Result<Network, LoadError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    tracing::info!("Loading network from {}", path.display());
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_bytes(&bytes)
}

/// Load a network from raw bytes, dropping any non-ASCII bytes first.
pub fn load_bytes(bytes: &[u8]) -> Result<Network, LoadError> {
    load_str(&strip_non_ascii(bytes))
}

/// Load a network from GML text.
pub fn load_str(source: &str) -> Result<Network, LoadError> {
    let document = parse_gml(source)?;
    let graph = document
        .iter()
        .find(|e| e.key == "graph")
        .and_then(|e| e.value.as_list())
        .ok_or(LoadError::MissingGraph)?;

    if lookup(graph, "directed").and_then(GmlValue::as_int) == Some(1) {
        tracing::debug!("Network declared as directed; edges are treated as undirected");
    }

    let mut builder = NetworkBuilder::new();
    let mut ids: HashMap<i64, NodeId> = HashMap::new();

    for entry in graph.iter().filter(|e| e.key == "node") {
        let node = parse_node(entry)?;
        let source_id = node.source_id;
        if ids.contains_key(&source_id) {
            return Err(LoadError::DuplicateNode {
                line: entry.line,
                id: source_id,
            });
        }
        ids.insert(source_id, builder.add_node(node));
    }

    let mut edge_count = 0usize;
    for entry in graph.iter().filter(|e| e.key == "edge") {
        let edge = parse_edge(entry, &ids)?;
        if builder.add_edge(edge).is_some() {
            edge_count += 1;
        }
    }

    let network = builder.build();
    tracing::info!(
        "Loaded network with {} nodes and {} edges ({} edge blocks)",
        network.node_count(),
        network.edge_count(),
        edge_count
    );
    Ok(network)
}

fn block<'a>(entry: &'a GmlEntry, invalid: impl Fn(String) -> LoadError) -> Result<&'a [GmlEntry], LoadError> {
    entry
        .value
        .as_list()
        .ok_or_else(|| invalid(format!("{} must be a list", entry.key)))
}

fn parse_node(entry: &GmlEntry) -> Result<ConceptNode, LoadError> {
    let invalid = |message: String| LoadError::InvalidNode {
        line: entry.line,
        message,
    };
    let attrs = block(entry, &invalid)?;

    let source_id = lookup(attrs, "id")
        .and_then(GmlValue::as_int)
        .ok_or_else(|| invalid("missing integer id".to_string()))?;
    let gloss = lookup(attrs, GLOSS_KEY)
        .and_then(GmlValue::to_text)
        .ok_or_else(|| invalid(format!("node {} has no {}", source_id, GLOSS_KEY)))?;

    let counter = |key: &str| -> Result<u64, LoadError> {
        match lookup(attrs, key) {
            None => Ok(0),
            Some(value) => as_count(value).ok_or_else(|| invalid(format!("{} must be a non-negative number", key))),
        }
    };

    Ok(ConceptNode {
        id: NodeId::default(),
        source_id,
        label: lookup(attrs, LABEL_KEY).and_then(GmlValue::to_text),
        gloss,
        semantic_field: lookup(attrs, SEMANTIC_FIELD_KEY).and_then(GmlValue::to_text),
        category: lookup(attrs, CATEGORY_KEY).and_then(GmlValue::to_text),
        family_frequency: counter(FAMILY_FREQUENCY_KEY)?,
        language_frequency: counter(LANGUAGE_FREQUENCY_KEY)?,
        word_frequency: counter(WORD_FREQUENCY_KEY)?,
    })
}

fn parse_edge(entry: &GmlEntry, ids: &HashMap<i64, NodeId>) -> Result<AttestationEdge, LoadError> {
    let invalid = |message: String| LoadError::InvalidEdge {
        line: entry.line,
        message,
    };
    let attrs = block(entry, &invalid)?;

    let endpoint = |key: &str| -> Result<NodeId, LoadError> {
        let id = lookup(attrs, key)
            .and_then(GmlValue::as_int)
            .ok_or_else(|| invalid(format!("missing integer {}", key)))?;
        ids.get(&id).copied().ok_or(LoadError::UnknownEndpoint {
            line: entry.line,
            id,
        })
    };
    let source = endpoint("source")?;
    let target = endpoint("target")?;

    let attestations = match lookup(attrs, ATTESTATION_KEY) {
        None => None,
        Some(GmlValue::Str(packed)) if packed.is_empty() => None,
        Some(GmlValue::Str(packed)) => Some(decode_attestations(packed)),
        Some(_) => return Err(invalid(format!("{} must be a string", ATTESTATION_KEY))),
    };

    let weight = |key: &str| -> Result<Option<u64>, LoadError> {
        lookup(attrs, key)
            .map(|value| as_count(value).ok_or_else(|| invalid(format!("{} must be a non-negative number", key))))
            .transpose()
    };

    let mut edge = AttestationEdge::new(source, target, attestations);
    edge.family_weight = weight(FAMILY_WEIGHT_KEY)?;
    edge.language_weight = weight(LANGUAGE_WEIGHT_KEY)?;
    edge.word_weight = weight(WORD_WEIGHT_KEY)?;
    Ok(edge)
}

fn as_count(value: &GmlValue) -> Option<u64> {
    match value {
        GmlValue::Int(v) => u64::try_from(*v).ok(),
        GmlValue::Real(v) if v.is_finite() && *v >= 0.0 => Some(v.round() as u64),
        _ => None,
    }
}
