use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 digest of the UTF-8 bytes of `value`.
pub fn sha256_hex(value: &str) -> String {
    hex::encode(Sha256::digest(value.as_bytes()))
}
