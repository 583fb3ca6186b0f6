//! Network loading: GML parsing, ASCII sanitization, and graph construction

pub mod builder;
pub mod error;
pub mod gml;
pub mod lexer;
pub mod sanitize;


pub use builder::{load, load_bytes, load_str, ATTESTATION_KEY};
pub use error::LoadError;
pub use gml::{GmlValue, parse_gml};
