//! Random secret generation

use rand::rngs::OsRng;
use rand::Rng;

use crate::credential::Secret;
use crate::error::{Result, VaultError};

/// Default generated secret length
pub const DEFAULT_LENGTH: usize = 16;

/// Longest secret the generator will produce
pub const MAX_LENGTH: usize = 1024;

/// Characters a generated secret is drawn from
pub const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*";

/// Generate a random secret of `length` characters using the OS RNG
pub fn generate_secret(length: usize) -> Result<Secret> {
    if length == 0 {
        return Err(VaultError::Validation(
            "generated secret length must be at least 1".to_string(),
        ));
    }
    if length > MAX_LENGTH {
        return Err(VaultError::Validation(format!(
            "generated secret length must be at most {}",
            MAX_LENGTH
        )));
    }

    let mut rng = OsRng;
    let value: String = (0..length)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect();

    Ok(Secret::new(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strength;

    #[test]
    fn test_default_length_and_charset() {
        let secret = generate_secret(DEFAULT_LENGTH).unwrap();
        assert_eq!(secret.expose().len(), DEFAULT_LENGTH);
        assert!(secret.expose().bytes().all(|b| CHARSET.contains(&b)));
    }

    #[test]
    fn test_zero_length_rejected() {
        assert!(generate_secret(0).unwrap_err().is_validation());
    }

    #[test]
    fn test_length_upper_bound() {
        assert_eq!(generate_secret(MAX_LENGTH).unwrap().expose().len(), MAX_LENGTH);
        assert!(generate_secret(MAX_LENGTH + 1).unwrap_err().is_validation());
        assert!(generate_secret(usize::MAX).unwrap_err().is_validation());
    }

    #[test]
    fn test_generated_secrets_differ() {
        let a = generate_secret(DEFAULT_LENGTH).unwrap();
        let b = generate_secret(DEFAULT_LENGTH).unwrap();
        assert_ne!(a.expose(), b.expose());
    }

    #[test]
    fn test_long_secret_meets_length_criteria() {
        let secret = generate_secret(32).unwrap();
        // both length criteria plus at least one character class
        assert!(strength::evaluate(secret.expose()).score >= 3);
    }
}
