#![deny(unsafe_code)]

use sha2::Digest;

/// Lower-case hex SHA-256 of `bytes`, the form recorded in `manifest.toml`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(sha2::Sha256::digest(bytes))
}
