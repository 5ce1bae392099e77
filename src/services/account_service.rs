// src/services/account_service.rs
// DOCUMENTATION: Account credentials and guest-to-user conversion helpers
// PURPOSE: Salted password hashing, username derivation, generated secrets

use crate::db::UserRepository;
use crate::errors::TravelError;
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};
use sqlx::PgPool;

/// Hash a password with a fresh random salt
/// Returns (hash_hex, salt_hex)
pub fn hash_password(password: &str) -> (String, String) {
    let salt: [u8; 16] = rand::thread_rng().gen();
    let salt_hex = hex::encode(salt);
    (digest_with_salt(password, &salt_hex), salt_hex)
}

/// Verify a password against a stored hash and salt
pub fn verify_password(password: &str, hash: &str, salt: &str) -> bool {
    digest_with_salt(password, salt) == hash
}

fn digest_with_salt(password: &str, salt_hex: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt_hex.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Random 12-character password for guest-created accounts
pub fn generate_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(12)
        .map(char::from)
        .collect()
}

/// Random url-safe token for newsletter confirm/unsubscribe links
pub fn generate_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(48)
        .map(char::from)
        .collect()
}

/// Clean an email local part into a username candidate
/// Keeps ASCII alphanumerics, dots and dashes; lowercased
pub fn username_base(email: &str) -> String {
    let local = email.split('@').next().unwrap_or(email);
    let cleaned: String = local
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '.' || *c == '-')
        .collect();

    if cleaned.is_empty() {
        "traveler".to_string()
    } else {
        cleaned
    }
}

/// Derive a unique username from an email, suffixing -1, -2... on collision
pub async fn derive_username(pool: &PgPool, email: &str) -> Result<String, TravelError> {
    let base = username_base(email);

    if !UserRepository::username_exists(pool, &base).await? {
        return Ok(base);
    }

    for suffix in 1..=1000 {
        let candidate = format!("{}-{}", base, suffix);
        if !UserRepository::username_exists(pool, &candidate).await? {
            return Ok(candidate);
        }
    }

    // Practically unreachable; fall back to a random tail
    let tail: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect();
    Ok(format!("{}-{}", base, tail.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let (hash, salt) = hash_password("correct horse");

        assert!(verify_password("correct horse", &hash, &salt));
        assert!(!verify_password("wrong horse", &hash, &salt));
    }

    #[test]
    fn test_salts_differ_between_accounts() {
        let (hash_a, salt_a) = hash_password("same password");
        let (hash_b, salt_b) = hash_password("same password");

        assert_ne!(salt_a, salt_b);
        assert_ne!(hash_a, hash_b);
    }

    #[test]
    fn test_generated_password_length() {
        let password = generate_password();
        assert_eq!(password.len(), 12);
        assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_username_base_strips_invalid_chars() {
        assert_eq!(username_base("Jane.Doe+travel@example.com"), "jane.doetravel");
        assert_eq!(username_base("o'brien@example.com"), "obrien");
    }

    #[test]
    fn test_username_base_empty_local_part() {
        assert_eq!(username_base("+++@example.com"), "traveler");
    }
}
