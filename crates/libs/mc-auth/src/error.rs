#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid Token")]
    InvalidToken,
    #[error("Token Missing")]
    TokenMissing,
    #[error("Token Expired")]
    TokenExpired,
    #[error("Token Creation {0}")]
    TokenCreation(#[from] serde_json::Error),
    #[error("Invalid signing key")]
    SigningKey,

    #[error("Wrong Credentials")]
    WrongCredentials,
    #[error("Missing Credentials")]
    MissingCredentials,
    #[error("User '{0}' already exists")]
    UserExists(String),

    #[error("Error hashing password {0}")]
    PasswordHash(argon2::password_hash::Error),
}
