//! Diesel-backed `LoginService` for the development login.
//!
//! Credentials are checked against the built-in demo accounts. A successful
//! login upserts the account's user row so votes, comments and projects have
//! an owner to reference, then returns the stored identity.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{LoginService, UserPersistenceError, UserRepository};
use crate::domain::{DemoAccount, Error, Identity, LoginCredentials};

use super::diesel_user_repository::DieselUserRepository;

/// Login adapter that persists demo accounts on first sign-in.
#[derive(Clone)]
pub struct DieselLoginService {
    users: Arc<dyn UserRepository>,
}

impl DieselLoginService {
    pub fn new(users: DieselUserRepository) -> Self {
        Self {
            users: Arc::new(users),
        }
    }

    #[cfg(test)]
    fn from_repository(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
    }
}

#[async_trait]
impl LoginService for DieselLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Identity, Error> {
        let account = DemoAccount::matching(credentials)
            .ok_or_else(|| Error::unauthorized("invalid credentials"))?;
        let identity = account
            .identity()
            .map_err(|err| Error::internal(format!("invalid demo account: {err}")))?;

        let stored = self
            .users
            .upsert(&identity)
            .await
            .map_err(map_user_persistence_error)?;
        debug!(user_id = %stored.user_id(), "demo account signed in");
        Ok(stored)
    }
}
