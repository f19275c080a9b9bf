//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{EmailAddress, Identity};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert the user, or refresh name and image if the email is known.
    ///
    /// Returns the stored identity, whose id may differ from the input when
    /// a row with the same email already exists.
    async fn upsert(&self, identity: &Identity) -> Result<Identity, UserPersistenceError>;

    /// Fetch a user by email.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Identity>, UserPersistenceError>;
}
