use super::security::{
    invalid_credentials, AccessToken, Argon2PasswordHasher, PasswordHasher, TokenIssuer,
};
use crate::errors::{ErrorKind, WaypointError, WaypointResult};
use crate::model::{NewUser, User};
use crate::repository::Repository;
use std::sync::Arc;

/// Registration, login and token resolution over a [Repository].
#[derive(Clone)]
pub struct AccountService {
    repository: Repository,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl AccountService {
    /// Creates a service hashing passwords with [Argon2PasswordHasher].
    pub fn new(repository: Repository, tokens: Arc<dyn TokenIssuer>) -> Self {
        AccountService {
            repository,
            hasher: Arc::new(Argon2PasswordHasher),
            tokens,
        }
    }

    pub fn with_hasher(mut self, hasher: Arc<dyn PasswordHasher>) -> Self {
        self.hasher = hasher;
        self
    }

    /// Registers a user and returns a token for them.
    ///
    /// Fails with [ErrorKind::DuplicateEntry] when the email is already
    /// registered on the tier that accepts the write.
    pub fn register(&self, new_user: &NewUser) -> WaypointResult<AccessToken> {
        log::debug!("Register attempt for {}", new_user.email);
        let hashed_password = self.hasher.hash(&new_user.password)?;
        let user = self
            .repository
            .register_user(&new_user.name, &new_user.email, &hashed_password)?;
        self.issue(&user)
    }

    /// Verifies a password and returns a token.
    ///
    /// An unknown email and a wrong password are indistinguishable to the
    /// caller: both fail with [ErrorKind::InvalidCredentials].
    pub fn login(&self, email: &str, password: &str) -> WaypointResult<AccessToken> {
        log::debug!("Login attempt for {}", email);
        let user = self.repository.find_user(email).map_err(|e| {
            log::error!("Login failed for {}: {}", email, e);
            invalid_credentials()
        })?;
        self.hasher.verify(password, &user.hashed_password)?;
        self.issue(&user)
    }

    /// Resolves the user a token was issued to.
    pub fn current_user(&self, token: &str) -> WaypointResult<User> {
        let email = self.tokens.verify(token).map_err(|e| {
            log::error!("Token rejected: {}", e);
            could_not_validate()
        })?;
        self.repository.find_user(&email).map_err(|e| {
            log::error!("Token subject {} cannot be resolved: {}", email, e);
            could_not_validate()
        })
    }

    fn issue(&self, user: &User) -> WaypointResult<AccessToken> {
        Ok(AccessToken::bearer(self.tokens.issue(&user.email)?))
    }
}

fn could_not_validate() -> WaypointError {
    WaypointError::new("Could not validate credentials", ErrorKind::InvalidCredentials)
}
