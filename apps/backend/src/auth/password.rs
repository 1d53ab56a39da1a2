//! Credential service: bcrypt hashing and random password generation.

use rand::Rng;

use crate::error::AppError;

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const SPECIAL: &str = "!@#$%^&*()-_=+[]{};:,.<>?";

/// One-way adaptive hash at the bcrypt default cost.
pub fn hash_password(plain: &str) -> Result<String, AppError> {
    bcrypt::hash(plain, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("failed to hash password: {e}")))
}

/// Constant-time comparison against a stored hash.
pub fn verify_password(plain: &str, hash: &str) -> Result<bool, AppError> {
    bcrypt::verify(plain, hash)
        .map_err(|e| AppError::internal(format!("failed to verify password: {e}")))
}

/// Draw `length` random characters from a pool built from the requested
/// character classes. Lowercase letters are always in the pool, so the
/// pool can never be empty and generation cannot fail.
pub fn generate_password(length: usize, use_upper: bool, use_digits: bool, use_special: bool) -> String {
    let mut pool = String::from(LOWERCASE);
    if use_upper {
        pool.push_str(UPPERCASE);
    }
    if use_digits {
        pool.push_str(DIGITS);
    }
    if use_special {
        pool.push_str(SPECIAL);
    }

    let pool: Vec<char> = pool.chars().collect();
    let mut rng = rand::rng();

    (0..length).map(|_| pool[rng.random_range(0..pool.len())]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verify_round_trip() {
        let hash = hash_password("pw").unwrap();
        assert!(verify_password("pw", &hash).unwrap());
        assert!(!verify_password("other", &hash).unwrap());
    }

    #[test]
    fn hash_is_not_plaintext() {
        let hash = hash_password("hunter2").unwrap();
        assert_ne!(hash, "hunter2");
        assert!(hash.starts_with("$2"));
    }

    #[test]
    fn generated_password_has_requested_length() {
        assert_eq!(generate_password(12, true, true, true).len(), 12);
        assert_eq!(generate_password(0, false, false, false).len(), 0);
    }

    #[test]
    fn lowercase_only_pool_stays_lowercase() {
        let pw = generate_password(64, false, false, false);
        assert!(pw.chars().all(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn digits_appear_when_requested() {
        // 256 draws from a 36-char pool; the odds of zero digits are
        // (26/36)^256, effectively impossible.
        let pw = generate_password(256, false, true, false);
        assert!(pw.chars().any(|c| c.is_ascii_digit()));
    }
}
