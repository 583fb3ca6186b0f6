//! Colexnet Core: Concept graph model, attestation decoding, and family index

pub mod attestation;
pub mod family;
pub mod graph;
pub mod model;


#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use attestation::decode_attestations;
pub use family::FamilyIndex;
pub use graph::{Network, NetworkBuilder};
pub use model::{AttestationEdge, AttestationRecord, ConceptNode, EdgeId, NodeId};
