//! Test utilities for Colexnet

use crate::attestation::decode_attestations;
use crate::graph::{Network, NetworkBuilder};
use crate::model::{AttestationEdge, ConceptNode, NodeId};
use std::collections::HashMap;

/// Pack `(language, family)` pairs into the positional attestation format.
pub fn pack(attestations: &[(&str, &str)]) -> String {
    attestations
        .iter()
        .enumerate()
        .map(|(i, (language, family))| format!("form{i}/concept/source/{language}/{family}"))
        .collect::<Vec<_>>()
        .join(";")
}

/// Build a network from glosses and `(gloss, gloss, packed attestations)` edges.
/// An empty packed string produces an unattested edge.
pub fn network_from(glosses: &[&str], edges: &[(&str, &str, &str)]) -> Network {
    let mut builder = NetworkBuilder::new();
    let mut ids: HashMap<&str, NodeId> = HashMap::new();

    for (i, gloss) in glosses.iter().enumerate() {
        let id = builder.add_node(ConceptNode::new(i as i64, *gloss));
        ids.entry(*gloss).or_insert(id);
    }

    for (a, b, packed) in edges {
        let attestations = if packed.is_empty() {
            None
        } else {
            Some(decode_attestations(packed))
        };
        builder.add_edge(AttestationEdge::new(ids[a], ids[b], attestations));
    }

    builder.build()
}

/// Small body-part and nature network used across the test suites.
///
/// ```text
/// HAND --(eng deu fin hun)-- ARM
/// HAND --(eng jpn)---------- FINGER
/// ARM  --(deu)-------------- FINGER
/// HAND --(no attestation)--- TREE
/// TREE --(eng fra fin)------ WOOD
/// WOOD --(fin)-------------- FIRE
/// ```
pub fn sample_network() -> Network {
    let hand_arm = pack(&[
        ("northeuralex-eng", "Indo-European"),
        ("northeuralex-deu", "Indo-European"),
        ("northeuralex-fin", "Uralic"),
        ("northeuralex-hun", "Uralic"),
    ]);
    let hand_finger = pack(&[("northeuralex-eng", "Indo-European"), ("northeuralex-jpn", "Japonic")]);
    let arm_finger = pack(&[("northeuralex-deu", "Indo-European")]);
    let tree_wood = pack(&[
        ("northeuralex-eng", "Indo-European"),
        ("northeuralex-fra", "Indo-European"),
        ("northeuralex-fin", "Uralic"),
    ]);
    let wood_fire = pack(&[("northeuralex-fin", "Uralic")]);

    network_from(
        &["HAND", "ARM", "FINGER", "TREE", "WOOD", "FIRE"],
        &[
            ("HAND", "ARM", hand_arm.as_str()),
            ("HAND", "FINGER", hand_finger.as_str()),
            ("ARM", "FINGER", arm_finger.as_str()),
            ("HAND", "TREE", ""),
            ("TREE", "WOOD", tree_wood.as_str()),
            ("WOOD", "FIRE", wood_fire.as_str()),
        ],
    )
}

/// `A --(eng:FAM1)-- B --(eng:FAM1)-- C` with no direct `A -- C` edge.
pub fn chain_network() -> Network {
    let attested = pack(&[("eng", "FAM1")]);
    network_from(
        &["A", "B", "C"],
        &[("A", "B", attested.as_str()), ("B", "C", attested.as_str())],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_network_shape() {
        let network = sample_network();
        assert_eq!(network.node_count(), 6);
        assert_eq!(network.edge_count(), 6);
        assert_eq!(network.family_index().len(), 3);
    }

    #[test]
    fn test_pack_format() {
        assert_eq!(pack(&[("eng", "FAM1"), ("deu", "FAM2")]), "form0/concept/source/eng/FAM1;form1/concept/source/deu/FAM2");
    }
}
