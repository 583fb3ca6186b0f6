//! Byte-level sanitization applied before parsing

/// Drop every non-ASCII byte. The result is always valid UTF-8.
pub fn strip_non_ascii(bytes: &[u8]) -> String {
    let ascii: String = bytes
        .iter()
        .filter(|b| b.is_ascii())
        .map(|&b| char::from(b))
        .collect();

    let dropped = bytes.len() - ascii.len();
    if dropped > 0 {
        tracing::debug!("Dropped {} non-ASCII bytes from network description", dropped);
    }
    ascii
}
