//! Unit tests for colexnet-query module

use crate::*;
use colexnet_core::test_utils::{chain_network, network_from, pack, sample_network};
use std::collections::{BTreeSet, HashMap};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn nel(code: &str) -> String {
    format!("northeuralex-{code}")
}

// ── Colexifications per concept ─────────────────────────────────────

#[test]
fn test_colexifications_for_hand() {
    let network = sample_network();
    let data = ColexificationEngine::new(&network).colexifications_for("hand", None);

    assert_eq!(data.concept, "HAND");
    // TREE is a neighbor without attestations.
    assert_eq!(data.colexified_concepts, vec!["ARM", "FINGER"]);

    let links: Vec<(&str, usize)> = data
        .detailed_colexifications
        .iter()
        .map(|l| (l.concept.as_str(), l.frequency))
        .collect();
    assert_eq!(links, vec![("ARM", 4), ("FINGER", 2)]);
    assert_eq!(data.total_languages, 5);
    assert_eq!(data.languages.first(), Some(&nel("deu")));
}

#[test]
fn test_family_frequencies_are_normalized() {
    let network = sample_network();
    let data = ColexificationEngine::new(&network).colexifications_for("HAND", None);

    assert!(approx(data.family_frequencies["Indo-European"], 0.5));
    assert!(approx(data.family_frequencies["Uralic"], 2.0 / 6.0));
    assert!(approx(data.family_frequencies["Japonic"], 1.0 / 6.0));
    assert!(approx(data.family_frequencies.values().sum::<f64>(), 1.0));
}

#[test]
fn test_colexifications_with_language_filter() {
    let network = sample_network();
    let filter = BTreeSet::from([nel("jpn")]);
    let data = ColexificationEngine::new(&network).colexifications_for("HAND", Some(&filter));

    assert_eq!(data.colexified_concepts, vec!["ARM", "FINGER"]);
    assert_eq!(data.detailed_colexifications.len(), 1);
    assert_eq!(data.detailed_colexifications[0].concept, "FINGER");
    assert_eq!(data.languages, vec![nel("jpn")]);
    assert_eq!(data.family_frequencies.len(), 1);
    assert!(approx(data.family_frequencies["Japonic"], 1.0));
}

#[test]
fn test_records_without_family() {
    let network = network_from(&["A", "B", "C"], &[("A", "B", "w/c/s/eng;w/c/s/deu"), ("A", "C", ";;")]);
    let data = ColexificationEngine::new(&network).colexifications_for("A", None);

    assert!(data.family_frequencies.is_empty());
    assert_eq!(data.detailed_colexifications.len(), 1);
    assert_eq!(data.detailed_colexifications[0].concept, "B");
    assert_eq!(data.detailed_colexifications[0].frequency, 2);
    assert_eq!(data.colexified_concepts, vec!["B", "C"]);
    assert!(network.family_index().is_empty());
}

#[test]
fn test_link_frequency_matches_languages() {
    let network = sample_network();
    let engine = ColexificationEngine::new(&network);
    for node in network.nodes() {
        let data = engine.colexifications_for(&node.gloss, None);
        for link in &data.detailed_colexifications {
            assert_eq!(link.frequency, link.languages.len());
            assert!(link.frequency > 0);
        }
        let frequencies: Vec<usize> = data.detailed_colexifications.iter().map(|l| l.frequency).collect();
        assert!(frequencies.windows(2).all(|w| w[0] >= w[1]));
    }
}

#[test]
fn test_unknown_concept_is_empty() {
    let network = sample_network();
    let data = ColexificationEngine::new(&network).colexifications_for("UNKNOWN", None);
    assert_eq!(data, ColexificationData::empty("UNKNOWN"));
}

#[test]
fn test_semantic_metadata_carried() {
    let network = sample_network();
    let data = ColexificationEngine::new(&network).colexifications_for("FIRE", None);
    assert!(data.semantic_field.is_none());
    assert_eq!(data.colexified_concepts, vec!["WOOD"]);
}

// ── Per-language presence ───────────────────────────────────────────

#[test]
fn test_language_colexifications() {
    let network = sample_network();
    let engine = ColexificationEngine::new(&network);

    let finnish = engine.language_colexifications("HAND", "fin", &BuiltinSourceCodes);
    let present: Vec<(&str, bool)> = finnish.iter().map(|c| (c.concept.as_str(), c.present)).collect();
    assert_eq!(present, vec![("ARM", true), ("FINGER", false), ("TREE", false)]);

    let english = engine.language_colexifications("HAND", "eng", &BuiltinSourceCodes);
    assert_eq!(english.iter().filter(|c| c.present).count(), 2);
}

#[test]
fn test_language_colexifications_unknown_language() {
    let network = chain_network();
    let result = ColexificationEngine::new(&network).language_colexifications("A", "xyz", &BuiltinSourceCodes);
    assert_eq!(result.len(), 1);
    assert!(result.iter().all(|c| !c.present));
}

#[test]
fn test_language_colexifications_custom_resolver() {
    let network = chain_network();
    let resolver = HashMap::from([("en".to_string(), vec!["eng".to_string()])]);
    let result = ColexificationEngine::new(&network).language_colexifications("B", "en", &resolver);
    assert_eq!(result.len(), 2);
    assert!(result.iter().all(|c| c.present));
}

// ── Family breakdowns ───────────────────────────────────────────────

#[test]
fn test_family_colexifications_all_families() {
    let network = sample_network();
    let result = ColexificationEngine::new(&network).family_colexifications("HAND", "ARM", None);

    let families: Vec<&str> = result.keys().map(String::as_str).collect();
    assert_eq!(families, vec!["Indo-European", "Japonic", "Uralic"]);

    let ie = &result["Indo-European"];
    assert_eq!(ie.total_languages, 3);
    assert_eq!(ie.direct_colexification.frequency, 2);
    assert_eq!(
        ie.direct_colexification.languages,
        BTreeSet::from([nel("deu"), nel("eng")])
    );
    assert_eq!(ie.concept1_colexifications.keys().collect::<Vec<_>>(), vec!["FINGER"]);
    assert_eq!(ie.concept1_colexifications["FINGER"].languages, BTreeSet::from([nel("eng")]));
    assert_eq!(ie.concept2_colexifications["FINGER"].languages, BTreeSet::from([nel("deu")]));

    let uralic = &result["Uralic"];
    assert_eq!(uralic.direct_colexification.frequency, 2);
    assert!(uralic.concept1_colexifications.is_empty());

    let japonic = &result["Japonic"];
    assert_eq!(japonic.direct_colexification, FamilyColexificationData::default());
    assert_eq!(japonic.concept1_colexifications["FINGER"].frequency, 1);
}

#[test]
fn test_family_colexifications_requested_families() {
    let network = sample_network();
    let families = vec!["Uralic".to_string(), "Nope".to_string()];
    let result = ColexificationEngine::new(&network).family_colexifications("HAND", "ARM", Some(&families));
    assert_eq!(result.keys().collect::<Vec<_>>(), vec!["Uralic"]);
}

#[test]
fn test_empty_family_list_means_all_families() {
    let network = sample_network();
    let engine = ColexificationEngine::new(&network);
    let none: Vec<String> = Vec::new();

    assert_eq!(
        engine.family_colexifications("HAND", "ARM", Some(&none)),
        engine.family_colexifications("HAND", "ARM", None)
    );
    assert_eq!(
        engine.family_patterns("HAND", "FINGER", Some(&none)),
        engine.family_patterns("HAND", "FINGER", None)
    );
    assert_eq!(engine.family_patterns("HAND", "FINGER", Some(&none)).len(), 2);
}

#[test]
fn test_family_colexifications_one_concept_missing() {
    let network = sample_network();
    let engine = ColexificationEngine::new(&network);
    let families = vec!["Japonic".to_string()];

    let result = engine.family_colexifications("HAND", "ZZZ", Some(&families));
    let japonic = &result["Japonic"];
    assert_eq!(japonic.concept1_colexifications.keys().collect::<Vec<_>>(), vec!["FINGER"]);
    assert!(japonic.concept2_colexifications.is_empty());
    assert_eq!(japonic.direct_colexification.frequency, 0);

    assert!(engine.family_colexifications("YYY", "ZZZ", None).is_empty());
}

#[test]
fn test_family_patterns() {
    let network = sample_network();
    let result = ColexificationEngine::new(&network).family_patterns("HAND", "FINGER", None);

    let ie = &result["Indo-European"];
    assert!(approx(ie.proportion, 1.0 / 3.0));
    assert_eq!(ie.languages_with_colexification, vec![nel("eng")]);
    assert_eq!(ie.total_languages_in_family, 3);
    assert_eq!(ie.indirect_languages, Some(vec![nel("deu")]));

    let japonic = &result["Japonic"];
    assert!(approx(japonic.proportion, 1.0));
    assert!(japonic.indirect_languages.is_none());
    assert!(!result.contains_key("Uralic"));
}

#[test]
fn test_family_patterns_filtered() {
    let network = sample_network();
    let engine = ColexificationEngine::new(&network);
    let families = vec!["Japonic".to_string()];

    let result = engine.family_patterns("HAND", "FINGER", Some(&families));
    assert_eq!(result.keys().collect::<Vec<_>>(), vec!["Japonic"]);
    assert!(engine.family_patterns("HAND", "NOPE", None).is_empty());
}

// ── Chains ──────────────────────────────────────────────────────────

#[test]
fn test_geometric_mean() {
    assert!(approx(geometric_mean(&[0.5, 0.5]), 0.5));
    assert!(approx(geometric_mean(&[1.0, 0.25]), 0.5));
    assert!(approx(geometric_mean(&[0.3]), 0.3));
    assert_eq!(geometric_mean(&[0.5, 0.0]), 0.0);
    assert_eq!(geometric_mean(&[]), 0.0);
}

#[test]
fn test_chain_through_middle_concept() {
    let network = chain_network();
    let chains = ChainFinder::new(&network).find_chains("a", "c", "FAM1", 4);

    assert_eq!(chains.len(), 1);
    assert_eq!(chains[0].path, vec!["A", "B", "C"]);
    assert_eq!(chains[0].scores, vec![1.0, 1.0]);
    assert!(approx(chains[0].total_score, 1.0));
    assert_eq!(chains[0].to_string(), "A -> B -> C (1.000)");
}

#[test]
fn test_chain_unknown_family() {
    let network = chain_network();
    assert!(ChainFinder::new(&network).find_chains("A", "C", "FAM2", 4).is_empty());
}

#[test]
fn test_chain_degenerate_queries() {
    let network = chain_network();
    let finder = ChainFinder::new(&network);
    assert!(finder.find_chains("A", "C", "FAM1", 0).is_empty());
    assert!(finder.find_chains("A", "C", "FAM1", 1).is_empty());
    assert!(finder.find_chains("A", "A", "FAM1", 4).is_empty());
    assert!(finder.find_chains("A", "ZZZ", "FAM1", 4).is_empty());
}

#[test]
fn test_chains_in_enumeration_order() {
    let network = sample_network();
    let chains = ChainFinder::new(&network).find_chains("HAND", "FINGER", "Indo-European", 3);

    let paths: Vec<Vec<String>> = chains.iter().map(|c| c.path.clone()).collect();
    assert_eq!(
        paths,
        vec![vec!["HAND", "ARM", "FINGER"], vec!["HAND", "FINGER"]]
    );
    assert!(approx(chains[0].scores[0], 2.0 / 3.0));
    assert!(approx(chains[0].scores[1], 1.0 / 3.0));
    assert!(approx(chains[0].total_score, (2.0f64 / 9.0).sqrt()));
    assert!(approx(chains[1].total_score, 1.0 / 3.0));
}

#[test]
fn test_chains_respect_depth_and_family() {
    let network = sample_network();
    let finder = ChainFinder::new(&network);

    let shallow = finder.find_chains("HAND", "FINGER", "Indo-European", 1);
    assert_eq!(shallow.len(), 1);
    assert_eq!(shallow[0].path, vec!["HAND", "FINGER"]);

    let japonic = finder.find_chains("HAND", "FINGER", "Japonic", 3);
    assert_eq!(japonic.len(), 1);
    assert_eq!(japonic[0].scores, vec![1.0]);

    assert!(finder.find_chains("HAND", "FINGER", "Uralic", 3).is_empty());
}

#[test]
fn test_unattested_edge_breaks_chain() {
    let network = sample_network();
    let finder = ChainFinder::new(&network);
    // HAND reaches TREE only through an unattested edge.
    assert!(finder.find_chains("HAND", "WOOD", "Indo-European", 4).is_empty());

    let chains = finder.find_chains("TREE", "FIRE", "Uralic", 2);
    assert_eq!(chains.len(), 1);
    assert_eq!(chains[0].scores, vec![0.5, 0.5]);
    assert!(approx(chains[0].total_score, 0.5));
}

#[test]
fn test_chains_are_simple_and_bounded() {
    let network = sample_network();
    let finder = ChainFinder::new(&network);
    for depth in 1..=5 {
        for chain in finder.find_chains("HAND", "FINGER", "Indo-European", depth) {
            assert!(chain.len() <= depth);
            assert_eq!(chain.path.len(), chain.scores.len() + 1);
            let unique: BTreeSet<&String> = chain.path.iter().collect();
            assert_eq!(unique.len(), chain.path.len());
            assert!(chain.scores.iter().all(|&s| s > 0.0 && s <= 1.0));
        }
    }
}

#[test]
fn test_chains_monotonic_in_allowed_languages() {
    let network = sample_network();
    let finder = ChainFinder::new(&network);
    let index = network.family_index();

    let everything: BTreeSet<String> = network.edges().flat_map(|e| e.languages()).collect();
    let broad: BTreeSet<Vec<String>> = finder
        .find_chains_within("HAND", "FINGER", &everything, 3)
        .into_iter()
        .map(|c| c.path)
        .collect();

    for family in index.families() {
        for chain in finder.find_chains("HAND", "FINGER", family, 3) {
            assert!(broad.contains(&chain.path));
        }
    }
}

#[test]
fn test_chain_scores_use_family_size() {
    let ab = pack(&[("eng", "FAM1")]);
    let bc = pack(&[("eng", "FAM1"), ("deu", "FAM1")]);
    let network = network_from(&["A", "B", "C"], &[("A", "B", ab.as_str()), ("B", "C", bc.as_str())]);

    let chains = ChainFinder::new(&network).find_chains("A", "C", "FAM1", 2);
    assert_eq!(chains[0].scores, vec![0.5, 1.0]);
}

// ── Catalog ─────────────────────────────────────────────────────────

#[test]
fn test_all_concepts_sorted_by_frequency() {
    let network = sample_network();
    let concepts = Catalog::new(&network).all_concepts();

    let order: Vec<(&str, usize)> = concepts.iter().map(|c| (c.gloss.as_str(), c.frequency)).collect();
    assert_eq!(
        order,
        vec![
            ("HAND", 2),
            ("ARM", 2),
            ("FINGER", 2),
            ("WOOD", 2),
            ("TREE", 1),
            ("FIRE", 1),
        ]
    );
}

#[test]
fn test_search_concepts() {
    let network = sample_network();
    let catalog = Catalog::new(&network);

    let glosses = |query: &str| -> Vec<String> {
        catalog.search_concepts(query).into_iter().map(|c| c.gloss).collect()
    };
    assert_eq!(glosses("in"), vec!["FINGER"]);
    assert_eq!(glosses("R"), vec!["ARM", "FINGER", "TREE", "FIRE"]);
    assert!(glosses("zzz").is_empty());
    assert_eq!(glosses("").len(), network.node_count());
}

#[test]
fn test_concept_summary_json() {
    let network = chain_network();
    let concepts = Catalog::new(&network).search_concepts("b");
    insta::assert_snapshot!(serde_json::to_string(&concepts[0]).unwrap(), @r#"{"id":1,"gloss":"B","semantic_field":null,"category":null,"family_frequency":0,"language_frequency":0,"word_frequency":0,"frequency":2}"#);
}
