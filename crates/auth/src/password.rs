//! Password hashing and verification using Argon2id.
//!
//! Stored hashes use the standard format
//! `$argon2id$v=19$m=<mem>,t=<iters>,p=<lanes>$<salt_b64>$<hash_b64>`.

use argon2::{Algorithm, Argon2, Params, Version};
use base64::prelude::*;
use rand::{distr::Alphanumeric, rng, Rng, RngCore};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Errors that can occur during password operations.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Hashing failed: {0}")]
    HashingFailed(String),

    #[error("Verification failed: password does not match")]
    VerificationFailed,

    #[error("Invalid hash format")]
    InvalidHashFormat,

    #[error("Base64 decoding failed: {0}")]
    DecodingFailed(#[from] base64::DecodeError),
}

/// Configuration for Argon2id password hashing.
#[derive(Debug, Clone)]
pub struct PasswordConfig {
    /// Memory cost in KiB (default: 15 MiB)
    pub memory_cost: u32,
    /// Number of iterations (default: 3)
    pub time_cost:   u32,
    /// Number of lanes (default: 2)
    pub parallelism: u32,
    /// Length of the generated hash in bytes (default: 32)
    pub hash_length: u32,
    /// Length of the salt in bytes (default: 16)
    pub salt_length: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_cost: 15360,
            time_cost:   3,
            parallelism: 2,
            hash_length: 32,
            salt_length: 16,
        }
    }
}

/// Parsed parameters of a stored hash.
struct StoredHash {
    memory_cost: u32,
    time_cost:   u32,
    parallelism: u32,
    salt:        Vec<u8>,
    hash:        Vec<u8>,
}

/// Hashes a password using Argon2id.
///
/// # Errors
///
/// Returns an error if the Argon2 parameters are invalid or hashing fails.
pub fn hash_password(password: &SecretString, config: Option<PasswordConfig>) -> Result<SecretString, PasswordError> {
    let config = config.unwrap_or_default();

    let mut salt = vec![0u8; config.salt_length as usize];
    rng().fill_bytes(&mut salt);

    let argon2 = Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(
            config.memory_cost,
            config.time_cost,
            config.parallelism,
            Some(config.hash_length as usize),
        )
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?,
    );

    let mut output = vec![0u8; config.hash_length as usize];
    argon2
        .hash_password_into(password.expose_secret().as_bytes(), &salt, &mut output)
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

    let encoded = format!(
        "$argon2id$v=19$m={},t={},p={}${}${}",
        config.memory_cost,
        config.time_cost,
        config.parallelism,
        BASE64_STANDARD.encode(&salt),
        BASE64_STANDARD.encode(&output)
    );

    Ok(SecretString::from(encoded))
}

/// Verifies a password against a stored hash with a constant-time compare.
///
/// # Errors
///
/// Returns `VerificationFailed` on mismatch, `InvalidHashFormat` when the
/// stored value is not a well-formed Argon2id hash.
pub fn verify_password(password: &SecretString, expected_hash: &str) -> Result<(), PasswordError> {
    let stored = parse_stored_hash(expected_hash)?;

    let argon2 = Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(
            stored.memory_cost,
            stored.time_cost,
            stored.parallelism,
            Some(stored.hash.len()),
        )
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?,
    );

    let mut computed = vec![0u8; stored.hash.len()];
    argon2
        .hash_password_into(
            password.expose_secret().as_bytes(),
            &stored.salt,
            &mut computed,
        )
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

    use subtle::ConstantTimeEq;
    if computed.len() == stored.hash.len() && bool::from(computed.as_slice().ct_eq(&stored.hash)) {
        Ok(())
    }
    else {
        Err(PasswordError::VerificationFailed)
    }
}

/// Parse `$argon2id$v=19$m=...,t=...,p=...$<salt>$<hash>`.
fn parse_stored_hash(encoded: &str) -> Result<StoredHash, PasswordError> {
    let parts: Vec<&str> = encoded.split('$').collect();
    if parts.len() != 6 || !parts[0].is_empty() {
        return Err(PasswordError::InvalidHashFormat);
    }
    if parts[1] != "argon2id" || parts[2] != "v=19" {
        return Err(PasswordError::InvalidHashFormat);
    }

    let mut memory_cost = None;
    let mut time_cost = None;
    let mut parallelism = None;
    for param in parts[3].split(',') {
        let (key, value) = param.split_once('=').ok_or(PasswordError::InvalidHashFormat)?;
        let value: u32 = value.parse().map_err(|_| PasswordError::InvalidHashFormat)?;
        match key {
            "m" => memory_cost = Some(value),
            "t" => time_cost = Some(value),
            "p" => parallelism = Some(value),
            _ => return Err(PasswordError::InvalidHashFormat),
        }
    }

    Ok(StoredHash {
        memory_cost: memory_cost.ok_or(PasswordError::InvalidHashFormat)?,
        time_cost:   time_cost.ok_or(PasswordError::InvalidHashFormat)?,
        parallelism: parallelism.ok_or(PasswordError::InvalidHashFormat)?,
        salt:        BASE64_STANDARD.decode(parts[4])?,
        hash:        BASE64_STANDARD.decode(parts[5])?,
    })
}

/// Checks whether a password meets the marketplace's length rules.
///
/// # Errors
///
/// Returns the full list of violations.
pub fn validate_password_strength(password: &str) -> Result<(), Vec<PasswordValidationError>> {
    let mut errors = Vec::new();

    if password.len() < 6 {
        errors.push(PasswordValidationError::TooShort);
    }

    if password.len() > 256 {
        errors.push(PasswordValidationError::TooLong);
    }

    if errors.is_empty() {
        Ok(())
    }
    else {
        Err(errors)
    }
}

/// Generate a temporary password for provisioned moderator accounts.
///
/// Returned in plaintext exactly once in the approval response; only the
/// hash is stored.
#[must_use]
pub fn generate_temp_password() -> SecretString {
    let password: String = rng()
        .sample_iter(&Alphanumeric)
        .take(14)
        .map(char::from)
        .collect();
    SecretString::from(password)
}

/// Errors for password validation.
#[derive(Debug, Error)]
pub enum PasswordValidationError {
    #[error("Password must be at least 6 characters long")]
    TooShort,

    #[error("Password must be at most 256 characters long")]
    TooLong,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = SecretString::from("tempPassword123".to_string());
        let hash = hash_password(&password, None).unwrap();
        assert!(hash.expose_secret().starts_with("$argon2id$v=19$"));
        assert!(verify_password(&password, hash.expose_secret()).is_ok());
    }

    #[test]
    fn test_wrong_password_fails() {
        let password = SecretString::from("CorrectHorse".to_string());
        let wrong = SecretString::from("WrongHorse".to_string());
        let hash = hash_password(&password, None).unwrap();
        assert!(matches!(
            verify_password(&wrong, hash.expose_secret()),
            Err(PasswordError::VerificationFailed)
        ));
    }

    #[test]
    fn test_hash_is_salted() {
        let password = SecretString::from("samePassword".to_string());
        let first = hash_password(&password, None).unwrap();
        let second = hash_password(&password, None).unwrap();
        assert_ne!(first.expose_secret(), second.expose_secret());
    }

    #[test]
    fn test_invalid_hash_format() {
        let password = SecretString::from("whatever".to_string());
        assert!(matches!(
            verify_password(&password, "plaintext-not-a-hash"),
            Err(PasswordError::InvalidHashFormat)
        ));
        assert!(matches!(
            verify_password(&password, "$bcrypt$v=19$m=1,t=1,p=1$a$b"),
            Err(PasswordError::InvalidHashFormat)
        ));
    }

    #[test]
    fn test_password_length_rules() {
        assert!(validate_password_strength("abc").is_err());
        assert!(validate_password_strength("abcdef").is_ok());
        assert!(validate_password_strength(&"x".repeat(257)).is_err());
    }

    #[test]
    fn test_generate_temp_password() {
        let password = generate_temp_password();
        let exposed = password.expose_secret();
        assert_eq!(exposed.len(), 14);
        assert!(exposed.chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(validate_password_strength(exposed).is_ok());
    }

    #[test]
    fn test_custom_config_round_trip() {
        let config = PasswordConfig {
            memory_cost: 8192,
            time_cost:   2,
            parallelism: 1,
            hash_length: 32,
            salt_length: 16,
        };
        let password = SecretString::from("configured".to_string());
        let hash = hash_password(&password, Some(config)).unwrap();
        assert!(hash.expose_secret().contains("m=8192,t=2,p=1"));
        assert!(verify_password(&password, hash.expose_secret()).is_ok());
    }
}
