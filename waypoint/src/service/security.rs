use crate::common::TOKEN_TYPE;
use crate::errors::{ErrorKind, WaypointError, WaypointResult};
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher as _, PasswordVerifier};
use rand::rngs::OsRng;

/// One-way password hashing.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> WaypointResult<String>;

    /// `Ok(())` if `password` matches `hashed`, [ErrorKind::InvalidCredentials]
    /// otherwise.
    fn verify(&self, password: &str, hashed: &str) -> WaypointResult<()>;
}

/// Argon2id with a random salt per password, stored in PHC string format.
#[derive(Clone, Copy, Debug, Default)]
pub struct Argon2PasswordHasher;

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> WaypointResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        match Argon2::default().hash_password(password.as_bytes(), &salt) {
            Ok(hash) => Ok(hash.to_string()),
            Err(e) => {
                log::error!("Failed to hash password: {:?}", e);
                Err(WaypointError::new(
                    "Failed to hash password",
                    ErrorKind::InternalError,
                ))
            }
        }
    }

    fn verify(&self, password: &str, hashed: &str) -> WaypointResult<()> {
        let parsed_hash = PasswordHash::new(hashed).map_err(|e| {
            log::error!("Stored password hash is invalid: {:?}", e);
            invalid_credentials()
        })?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|e| {
                log::error!("Password verification failed: {:?}", e);
                invalid_credentials()
            })
    }
}

pub(crate) fn invalid_credentials() -> WaypointError {
    WaypointError::new("Incorrect email or password", ErrorKind::InvalidCredentials)
}

/// A bearer token handed to a client after register or login.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
}

impl AccessToken {
    pub fn bearer(access_token: String) -> Self {
        AccessToken {
            access_token,
            token_type: TOKEN_TYPE.to_string(),
        }
    }
}

/// Issues and verifies access tokens whose subject is a user's email.
///
/// Signing, expiry and transport belong to the host; the services only need
/// these two operations.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, subject: &str) -> WaypointResult<String>;

    /// Returns the subject of a valid token.
    fn verify(&self, token: &str) -> WaypointResult<String>;
}
