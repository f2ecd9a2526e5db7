use argon2::{
    password_hash::{rand_core::OsRng, Error as PasswordHashError, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use std::sync::OnceLock;

// =============================================================================
// Password Hashing
// =============================================================================

/// Hash a plaintext password with Argon2id and a fresh random salt
///
/// Returns the PHC string (`$argon2id$v=19$...`), which embeds the
/// algorithm parameters and salt, so it is all that needs storing.
///
/// This is CPU-bound by design; call it from `spawn_blocking`.
pub fn hash_password(password: &str) -> Result<String, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC hash string
///
/// Returns `Ok(false)` on a mismatch. Errors are reserved for hashes that
/// cannot be parsed or use unsupported parameters.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, PasswordHashError> {
    let parsed = PasswordHash::new(stored_hash)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(PasswordHashError::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Burn the same amount of work as a real verification
///
/// Used when the username is unknown so the response time of a failed login
/// does not reveal whether the account exists.
pub fn verify_against_dummy(password: &str) {
    static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

    let dummy = DUMMY_HASH.get_or_init(|| hash_password("dummy-password-for-timing").ok());
    if let Some(hash) = dummy {
        let _ = verify_password(password, hash);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_is_phc_argon2id() {
        let hash = hash_password("secret1").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("secret1"));
    }

    #[test]
    fn test_hash_password_salts_each_call() {
        let first = hash_password("secret1").unwrap();
        let second = hash_password("secret1").unwrap();

        // Same password, different salts
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_password_correct() {
        let hash = hash_password("secret1").unwrap();
        assert!(verify_password("secret1", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_wrong() {
        let hash = hash_password("secret1").unwrap();
        assert!(!verify_password("secret2", &hash).unwrap());
        assert!(!verify_password("", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_malformed_hash() {
        assert!(verify_password("secret1", "not-a-phc-string").is_err());
        // A plaintext value in the column must never verify
        assert!(verify_password("secret1", "secret1").is_err());
    }
}
