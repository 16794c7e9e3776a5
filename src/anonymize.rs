use sha2::{Digest, Sha256};

/// Derives an opaque token from a raw hardware identifier.
///
/// The salt and the identifier are hashed as one SHA-256 input, salt first,
/// no separator. The same (salt, identifier) pair always produces the same
/// 64-character lowercase hex token; without the salt the identifier cannot
/// be recovered short of brute force.
///
/// Callers must not pass an empty identifier. Records with a missing or
/// empty identifier field are dropped upstream instead of being hashed.
pub fn anonymize(salt: &str, raw: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(raw.as_bytes());
    hex::encode(hasher.finalize())
}
