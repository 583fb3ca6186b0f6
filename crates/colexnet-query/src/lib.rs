//! Colexnet Query: Colexification, chain and catalog queries over a loaded network

pub mod catalog;
pub mod chains;
pub mod colexification;
pub mod languages;

#[cfg(test)]
pub mod tests;

pub use catalog::{Catalog, ConceptSummary};
pub use chains::{geometric_mean, Chain, ChainFinder};
pub use colexification::{
    ColexificationData, ColexificationEngine, ColexificationLink, FamilyColexificationData,
    FamilyColexifications, FamilyPattern, LanguageColexification,
};
pub use languages::{BuiltinSourceCodes, LayeredSourceCodes, SourceCodeResolver};
