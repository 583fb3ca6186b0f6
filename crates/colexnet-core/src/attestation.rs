//! Decoder for the packed attestation attribute carried on each edge
//!
//! The packed form is a `;`-separated list of entries. Each entry is a
//! `/`-separated positional tuple where field 3 is the language code and
//! field 4 the family name; all other fields are kept opaquely.

use crate::model::AttestationRecord;

const ENTRY_SEPARATOR: char = ';';
const FIELD_SEPARATOR: char = '/';
const LANGUAGE_FIELD: usize = 3;
const FAMILY_FIELD: usize = 4;

/// Decode a packed attestation string into records.
///
/// Entries with fewer than four fields or an empty language are dropped.
/// Entries with exactly four fields yield a record without a family.
pub fn decode_attestations(packed: &str) -> Vec<AttestationRecord> {
    packed
        .split(ENTRY_SEPARATOR)
        .filter(|entry| !entry.trim().is_empty())
        .filter_map(decode_entry)
        .collect()
}

fn decode_entry(entry: &str) -> Option<AttestationRecord> {
    let fields: Vec<&str> = entry.split(FIELD_SEPARATOR).map(str::trim).collect();
    if fields.len() <= LANGUAGE_FIELD {
        tracing::trace!("Skipping attestation entry with {} fields: {:?}", fields.len(), entry);
        return None;
    }

    let language_code = fields[LANGUAGE_FIELD];
    if language_code.is_empty() {
        tracing::trace!("Skipping attestation entry without language: {:?}", entry);
        return None;
    }

    let family_name = fields
        .get(FAMILY_FIELD)
        .filter(|family| !family.is_empty())
        .map(|family| family.to_string());

    let extra_fields = fields
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != LANGUAGE_FIELD && *i != FAMILY_FIELD)
        .map(|(_, field)| field.to_string())
        .collect();

    Some(AttestationRecord {
        language_code: language_code.to_string(),
        family_name,
        extra_fields,
    })
}
