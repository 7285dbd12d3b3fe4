//! Password hashing and verification using Argon2.
//!
//! Registered passwords are never kept in clear text; the user store only
//! holds the PHC string produced by [`generate_secret_hash`].
//!
//! # Examples
//!
//! ```rust
//! use mc_auth::secret_hash::{generate_secret_hash, is_secret_valid};
//!
//! let hash = generate_secret_hash("12345").unwrap();
//! assert!(is_secret_valid("12345", &hash).unwrap());
//! assert!(!is_secret_valid("wrong", &hash).unwrap());
//! ```

use argon2::{
    Argon2, PasswordHasher, PasswordVerifier,
    password_hash::{self, PasswordHashString, SaltString},
};
use rand::rngs::OsRng;

use crate::prelude::*;

/// Hashes `pw` with a freshly generated salt.
pub fn generate_secret_hash(pw: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    Ok(argon2.hash_password(pw.as_bytes(), &salt)?.to_string())
}

/// Checks `pw` against a stored PHC hash string.
///
/// * `Ok(true)` - password matches
/// * `Ok(false)` - password does not match
/// * `Err(_)` - the stored hash could not be parsed
pub fn is_secret_valid(pw: &str, hash: &str) -> Result<bool> {
    let hash = PasswordHashString::new(hash)?;

    Ok(Argon2::default()
        .verify_password(pw.as_bytes(), &hash.password_hash())
        .is_ok())
}

impl From<password_hash::Error> for Error {
    fn from(value: password_hash::Error) -> Self {
        Self::PasswordHash(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_are_salted() -> Result<()> {
        let first = generate_secret_hash("12345")?;
        let second = generate_secret_hash("12345")?;
        assert_ne!(first, second);
        assert!(is_secret_valid("12345", &first)?);
        assert!(is_secret_valid("12345", &second)?);
        Ok(())
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(matches!(
            is_secret_valid("12345", "12345"),
            Err(Error::PasswordHash(_))
        ));
    }
}
