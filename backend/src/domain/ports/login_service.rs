//! Driving port for account registration and authentication.
//!
//! Inbound adapters call this to establish who the caller is without
//! importing the backing infrastructure, which keeps handler tests
//! deterministic: they substitute a test double instead of wiring
//! persistence.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, User, UserId};

/// Domain use-case port for registration and authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Create an account for the credentials and return the new user.
    ///
    /// Fails with a conflict error when the email is already registered.
    async fn register(&self, credentials: &LoginCredentials) -> Result<User, Error>;

    /// Validate credentials and return the authenticated user id.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

/// Development-only authenticator used when persistence is not wired.
///
/// `dev@example.com` / `password` authenticates to a fixed user id;
/// registration hands back an unpersisted account.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

/// Fixed user id produced by [`FixtureLoginService`].
pub const FIXTURE_USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn register(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        Ok(User::new(
            UserId::random(),
            credentials.email().clone(),
            chrono::Utc::now(),
        ))
    }

    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let dev_digest = LoginCredentials::try_from_parts("dev@example.com", "password")
            .map_err(|err| Error::internal(format!("invalid fixture credentials: {err}")))?
            .digest();
        if credentials.email().as_ref() == "dev@example.com"
            && credentials.digest() == dev_digest
        {
            UserId::new(FIXTURE_USER_ID)
                .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}
