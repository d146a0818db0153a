//! Short code generation and validation utilities.
//!
//! Generated codes are drawn uniformly from a 62-symbol alphabet. They are
//! not secrets, so a thread-local PRNG is sufficient.

use rand::Rng;

use crate::domain::error::LinkError;

/// Digits, uppercase and lowercase ASCII letters.
pub const CODE_ALPHABET: &[u8; 62] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Length of generated codes unless configured otherwise.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Generation attempts before giving up with [`LinkError::GenerationExhausted`].
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Generates a random short code of `length` characters.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(6);
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Validates a user-provided alias.
///
/// An alias must be non-empty and must not contain the path separator `/`,
/// since it is served as a single path segment.
///
/// # Errors
///
/// Returns [`LinkError::InvalidCode`] if either rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), LinkError> {
    if code.is_empty() {
        return Err(LinkError::InvalidCode(
            "Short code must not be empty".to_string(),
        ));
    }

    if code.contains('/') {
        return Err(LinkError::InvalidCode(
            "Short code cannot contain \"/\"".to_string(),
        ));
    }

    Ok(())
}
