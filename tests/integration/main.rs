//! Integration tests for Colexnet
//!
//! These tests load a network from disk and drive it through the query
//! crates and the CLI binary.

use colexnet_query::{BuiltinSourceCodes, Catalog, ChainFinder, ColexificationEngine};
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

const NETWORK_GML: &str = r#"graph [
  directed 0
  node [ id 1 Gloss "HAND" Semanticfield "The body" Category "Person/Thing" FamilyFrequency 20 ]
  node [ id 2 Gloss "ARM" Semanticfield "The body" ]
  node [ id 3 Gloss "FINGER" Semanticfield "The body" ]
  node [ id 4 Gloss "BARK" Semanticfield "Agriculture and vegetation" ]
  node [ id 5 Gloss "SKIN" Semanticfield "The body" ]
  edge [ source 1 target 2 FamilyWeight 2 LanguageWeight 3 WordWeight 3
         wofam "hand/1277/northeuralex/northeuralex-eng/Indo-European;ruka/1277/northeuralex/northeuralex-rus/Indo-European;kasi/1277/northeuralex/northeuralex-fin/Uralic" ]
  edge [ source 1 target 3 wofam "yubi/1303/northeuralex/northeuralex-jpn/Japonic" ]
  edge [ source 4 target 5 wofam "kuori/1204/northeuralex/northeuralex-fin/Uralic;kora/1204/northeuralex/northeuralex-rus/Indo-European" ]
  edge [ source 2 target 5 wofam "" ]
  edge [ source 5 target 2 wofam "kozha/1204/northeuralex/northeuralex-rus/Indo-European" ]
]
"#;

fn network_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(NETWORK_GML.as_bytes()).unwrap();
    file
}

fn run(file: &NamedTempFile, args: &[&str]) -> (bool, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_colexnet"))
        .env_remove("CLICS_NETWORK_PATH")
        .env_remove("COLEXNET_CONFIG")
        .arg("--network")
        .arg(file.path())
        .args(args)
        .output()
        .expect("Failed to execute colexnet");
    (
        output.status.success(),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

/// Loading from disk feeds every query module
#[test]
fn test_load_and_query() {
    let file = network_file();
    let network = colexnet_loader::load(file.path()).unwrap();
    assert_eq!(network.node_count(), 5);
    // SKIN -- ARM appears twice and is merged.
    assert_eq!(network.edge_count(), 4);

    let engine = ColexificationEngine::new(&network);
    let arm = engine.colexifications_for("arm", None);
    assert_eq!(arm.colexified_concepts, vec!["HAND", "SKIN"]);
    assert_eq!(arm.total_languages, 3);

    let russian = engine.language_colexifications("SKIN", "rus", &BuiltinSourceCodes);
    assert!(russian.iter().all(|c| c.present));

    let chains = ChainFinder::new(&network).find_chains("HAND", "BARK", "Indo-European", 4);
    assert_eq!(chains.len(), 1);
    assert_eq!(chains[0].path, vec!["HAND", "ARM", "SKIN", "BARK"]);
    assert!((chains[0].total_score - 1.0f64 / 2.0f64.cbrt() / 2.0f64.cbrt()).abs() < 1e-9);

    let glosses: Vec<String> = Catalog::new(&network).all_concepts().into_iter().map(|c| c.gloss).collect();
    assert_eq!(glosses, vec!["HAND", "ARM", "SKIN", "FINGER", "BARK"]);
}

/// The CLI prints the version without a network
#[test]
fn test_cli_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_colexnet"))
        .arg("version")
        .output()
        .expect("Failed to execute colexnet");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("Colexnet v"));
}

/// Chains are rendered one per line with upper-cased concepts
#[test]
fn test_cli_chains() {
    let file = network_file();
    let (ok, stdout, _) = run(&file, &["chains", "hand", "bark", "--family", "Indo-European"]);
    assert!(ok);
    assert!(stdout.starts_with("HAND -> ARM -> SKIN -> BARK"));

    let (ok, stdout, _) = run(&file, &["chains", "hand", "bark", "--family", "Indo-European", "--max-depth", "2"]);
    assert!(ok);
    assert_eq!(stdout, "no chains found\n");
}

/// JSON output can be parsed back
#[test]
fn test_cli_json_output() {
    let file = network_file();
    let (ok, stdout, _) = run(&file, &["--json", "patterns", "HAND", "ARM"]);
    assert!(ok);

    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["Uralic"]["total_languages_in_family"], 1);
    assert_eq!(value["Indo-European"]["languages_with_colexification"][1], "northeuralex-rus");
}

/// Config files override source codes and default depth
#[test]
fn test_cli_config_file() {
    let file = network_file();
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "max_depth = 2\n[source_codes]\nru = [\"northeuralex-rus\"]").unwrap();
    let config_path = config.path().to_string_lossy().to_string();

    let (ok, stdout, _) = run(&file, &["--config", &config_path, "language", "SKIN", "ru"]);
    assert!(ok);
    assert!(stdout.lines().all(|line| line.ends_with("yes")));

    let (ok, stdout, _) = run(&file, &["--config", &config_path, "chains", "HAND", "BARK", "-f", "Indo-European"]);
    assert!(ok);
    assert_eq!(stdout, "no chains found\n");
}

/// A missing network file is reported with context
#[test]
fn test_cli_missing_network() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_colexnet"))
        .env_remove("CLICS_NETWORK_PATH")
        .env_remove("COLEXNET_CONFIG")
        .current_dir(dir.path())
        .arg("--network")
        .arg(dir.path().join("missing.gml"))
        .arg("stats")
        .output()
        .expect("Failed to execute colexnet");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to load network"));
    assert!(stderr.contains("network file not found"));
}
