//! Authentication primitives for the development login.
//!
//! The production identity handshake lives with an external provider. This
//! module only validates the credential payload and describes the built-in
//! demo accounts that the login adapters accept.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{EmailAddress, Identity, UserId, UserValidationError};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Email did not look like an address.
    InvalidEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must be a valid address"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed, lowercased, and contains `@`.
/// - `password` is non-empty and retains caller-provided whitespace.
///
/// # Examples
/// ```
/// use devhunt::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Ada@DevHunt.dev", "password").unwrap();
/// assert_eq!(creds.email().as_ref(), "ada@devhunt.dev");
/// assert_eq!(creds.password(), "password");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = EmailAddress::new(email).map_err(|err| match err {
            UserValidationError::EmptyEmail => LoginValidationError::EmptyEmail,
            _ => LoginValidationError::InvalidEmail,
        })?;

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Built-in account accepted by the development login.
#[derive(Debug, Clone, Copy)]
pub struct DemoAccount {
    pub id: &'static str,
    pub email: &'static str,
    pub password: &'static str,
    pub name: &'static str,
}

/// Accounts accepted by the development login adapters.
pub const DEMO_ACCOUNTS: [DemoAccount; 2] = [
    DemoAccount {
        id: "123e4567-e89b-12d3-a456-426614174000",
        email: "ada@devhunt.dev",
        password: "password",
        name: "Ada Lovelace",
    },
    DemoAccount {
        id: "3fa85f64-5717-4562-b3fc-2c963f66afa6",
        email: "grace@devhunt.dev",
        password: "password",
        name: "Grace Hopper",
    },
];

impl DemoAccount {
    /// Find the demo account matching `credentials`, if any.
    pub fn matching(credentials: &LoginCredentials) -> Option<Self> {
        DEMO_ACCOUNTS.into_iter().find(|account| {
            account.email == credentials.email().as_ref()
                && account.password == credentials.password()
        })
    }

    /// Identity for this account.
    pub fn identity(&self) -> Result<Identity, UserValidationError> {
        let user_id = UserId::new(self.id)?;
        let email = EmailAddress::new(self.email)?;
        Ok(Identity::new(user_id, email).with_name(self.name))
    }
}
