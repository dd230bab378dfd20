//! Login credentials and password digesting.
//!
//! The password is held in a wrapper that wipes its memory on drop and is
//! deliberately excluded from `Debug` output. Storage only ever sees the
//! SHA-256 digest, hex-encoded.

use std::fmt;

use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use super::user::{EmailAddress, UserValidationError};

/// Validation errors for credential input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// The email address does not have a plausible shape.
    InvalidEmail,
    /// The password is empty.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail => write!(f, "email address is not valid"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Password material wiped from memory on drop.
struct Password(String);

impl Drop for Password {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Validated email/password pair for register and login calls.
///
/// # Examples
/// ```
/// use backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("cook@example.com", "s3cret").expect("valid");
/// assert_eq!(creds.email().as_ref(), "cook@example.com");
/// assert_eq!(creds.digest().len(), 64);
/// ```
pub struct LoginCredentials {
    email: EmailAddress,
    password: Password,
}

impl LoginCredentials {
    /// Validate raw input into credentials.
    pub fn try_from_parts(
        email: impl AsRef<str>,
        password: impl Into<String>,
    ) -> Result<Self, LoginValidationError> {
        let email = EmailAddress::new(email).map_err(|err| match err {
            UserValidationError::InvalidEmail | UserValidationError::InvalidId => {
                LoginValidationError::InvalidEmail
            }
        })?;
        let password = password.into();
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Password(password),
        })
    }

    /// The login email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Hex-encoded SHA-256 digest of the password, the only form that ever
    /// reaches storage.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.password.0.as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("cook@example.com", "pw", true)]
    #[case("not-an-email", "pw", false)]
    #[case("cook@example.com", "", false)]
    fn validation_cases(#[case] email: &str, #[case] password: &str, #[case] valid: bool) {
        assert_eq!(
            LoginCredentials::try_from_parts(email, password).is_ok(),
            valid
        );
    }

    #[test]
    fn digest_is_stable_and_password_free() {
        let a = LoginCredentials::try_from_parts("cook@example.com", "s3cret").expect("valid");
        let b = LoginCredentials::try_from_parts("other@example.com", "s3cret").expect("valid");
        assert_eq!(a.digest(), b.digest());
        assert_ne!(a.digest(), "s3cret");
    }

    #[test]
    fn different_passwords_produce_different_digests() {
        let a = LoginCredentials::try_from_parts("cook@example.com", "one").expect("valid");
        let b = LoginCredentials::try_from_parts("cook@example.com", "two").expect("valid");
        assert_ne!(a.digest(), b.digest());
    }

    #[test]
    fn debug_output_redacts_the_password() {
        let creds = LoginCredentials::try_from_parts("cook@example.com", "s3cret").expect("valid");
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("s3cret"));
    }
}
