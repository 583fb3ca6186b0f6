//! Mapping from ISO 639-3 language codes to network source codes

use std::collections::HashMap;

/// Resolves an ISO language code to the source codes the network uses for it.
///
/// Unknown codes resolve to an empty list, never an error.
pub trait SourceCodeResolver: Send + Sync {
    fn source_codes(&self, language_code: &str) -> Vec<String>;
}

/// Built-in table covering the languages the comparison flow supports.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSourceCodes;

impl BuiltinSourceCodes {
    /// Every ISO code the table knows about, in table order.
    pub fn languages(&self) -> impl Iterator<Item = &'static str> {
        SOURCE_CODES.iter().map(|(iso, _)| *iso)
    }
}

impl SourceCodeResolver for BuiltinSourceCodes {
    fn source_codes(&self, language_code: &str) -> Vec<String> {
        SOURCE_CODES
            .iter()
            .find(|(iso, _)| *iso == language_code)
            .map(|(_, codes)| codes.iter().map(|c| c.to_string()).collect())
            .unwrap_or_default()
    }
}

impl SourceCodeResolver for HashMap<String, Vec<String>> {
    fn source_codes(&self, language_code: &str) -> Vec<String> {
        self.get(language_code).cloned().unwrap_or_default()
    }
}

/// Tries `primary` first and falls back to `fallback` for codes it does not know.
pub struct LayeredSourceCodes<P, F> {
    pub primary: P,
    pub fallback: F,
}

impl<P: SourceCodeResolver, F: SourceCodeResolver> SourceCodeResolver for LayeredSourceCodes<P, F> {
    fn source_codes(&self, language_code: &str) -> Vec<String> {
        let codes = self.primary.source_codes(language_code);
        if codes.is_empty() {
            self.fallback.source_codes(language_code)
        } else {
            codes
        }
    }
}

static SOURCE_CODES: &[(&str, &[&str])] = &[
    ("eng", &["wold-13", "ids-190", "northeuralex-eng"]),
    ("nld", &["wold-12", "ids-191", "northeuralex-nld"]),
    ("deu", &["wold-135", "ids-194", "northeuralex-deu"]),
    ("fra", &["wold-123", "ids-171", "northeuralex-fra"]),
    ("spa", &["wold-115", "ids-176", "northeuralex-spa"]),
    ("ita", &["wold-169", "ids-170", "northeuralex-ita"]),
    ("por", &["wold-274", "ids-178", "northeuralex-por"]),
    ("ron", &["wold-8", "ids-179", "northeuralex-ron"]),
    ("rus", &["wold-309", "ids-204", "northeuralex-rus"]),
    ("pol", &["wold-273", "ids-203", "northeuralex-pol"]),
    ("ces", &["wold-103", "ids-202", "northeuralex-ces"]),
    ("bul", &["wold-75", "ids-200", "northeuralex-bul"]),
    ("hin", &["wold-154", "northeuralex-hin"]),
    ("ben", &["wold-72", "northeuralex-ben"]),
    ("urd", &["northeuralex-urd"]),
    ("ell", &["wold-147", "ids-168", "northeuralex-ell"]),
    ("hye", &["wold-57", "ids-206", "northeuralex-hye"]),
    ("ara", &["wold-53", "northeuralex-arb"]),
    ("heb", &["wold-152", "northeuralex-heb"]),
    ("amh", &["wold-51", "northeuralex-amh"]),
    ("zho", &["wold-22", "wold-89", "northeuralex-cmn"]),
    ("yue", &["wold-78"]),
    ("bod", &["northeuralex-bod"]),
    ("jpn", &["wold-21", "northeuralex-jpn"]),
    ("kor", &["wold-189", "northeuralex-kor"]),
    ("vie", &["wold-24", "northeuralex-vie"]),
    ("khm", &["wold-110", "ids-222", "northeuralex-khm"]),
    ("tha", &["wold-23", "northeuralex-tha"]),
    ("lao", &["wold-193", "northeuralex-lao"]),
    ("mal", &["wold-203", "northeuralex-mal"]),
    ("tam", &["wold-339", "northeuralex-tam"]),
    ("tel", &["northeuralex-tel"]),
    ("kan", &["wold-180", "northeuralex-kan"]),
    ("msa", &["wold-202", "northeuralex-msa"]),
    ("ind", &["wold-27", "northeuralex-ind"]),
    ("jav", &["wold-175", "northeuralex-jav"]),
    ("tur", &["wold-356", "northeuralex-tur"]),
    ("azj", &["wold-64", "ids-71", "northeuralex-azj"]),
    ("uzb", &["northeuralex-uzb"]),
    ("fin", &["wold-119", "ids-128", "northeuralex-fin"]),
    ("est", &["ids-127", "northeuralex-est"]),
    ("hun", &["wold-158", "ids-131", "northeuralex-hun"]),
    ("swa", &["northeuralex-swa"]),
    ("zul", &["northeuralex-zul"]),
    ("yor", &["wold-384", "northeuralex-yor"]),
    ("bel", &["northeuralex-bel"]),
    ("srp", &["northeuralex-srp"]),
    ("hrv", &["northeuralex-hrv"]),
    ("slk", &["northeuralex-slk"]),
    ("slv", &["northeuralex-slv"]),
    ("lav", &["northeuralex-lav"]),
    ("lit", &["northeuralex-lit"]),
    ("pan", &["northeuralex-pan"]),
    ("mar", &["northeuralex-mar"]),
    ("guj", &["northeuralex-guj"]),
    ("nep", &["northeuralex-nep"]),
    ("fas", &["northeuralex-fas"]),
    ("tgk", &["northeuralex-tgk"]),
    ("sqi", &["northeuralex-sqi"]),
    ("gle", &["northeuralex-gle"]),
    ("gla", &["northeuralex-gla"]),
    ("cym", &["northeuralex-cym"]),
    ("fry", &["northeuralex-fry"]),
    ("isl", &["northeuralex-isl"]),
    ("nor", &["northeuralex-nor"]),
    ("dan", &["northeuralex-dan"]),
    ("swe", &["northeuralex-swe"]),
    ("kaz", &["northeuralex-kaz"]),
    ("kir", &["northeuralex-kir"]),
    ("tat", &["northeuralex-tat"]),
    ("tuk", &["northeuralex-tuk"]),
    ("uig", &["northeuralex-uig"]),
    ("ceb", &["northeuralex-ceb"]),
    ("tgl", &["northeuralex-tgl"]),
    ("sun", &["northeuralex-sun"]),
    ("mlg", &["northeuralex-mlg"]),
    ("ibo", &["northeuralex-ibo"]),
    ("wol", &["northeuralex-wol"]),
    ("sna", &["northeuralex-sna"]),
    ("nya", &["northeuralex-nya"]),
    ("xho", &["northeuralex-xho"]),
    ("sot", &["northeuralex-sot"]),
    ("hau", &["northeuralex-hau"]),
    ("som", &["northeuralex-som"]),
    ("sin", &["northeuralex-sin"]),
    ("mon", &["northeuralex-mon"]),
    ("mri", &["northeuralex-mri"]),
    ("mlt", &["northeuralex-mlt"]),
];
