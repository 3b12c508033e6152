use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 digest of a UTF-8 secret.
pub fn hash_secret(secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}
