//! Driving port for the development login.
//!
//! Inbound adapters call this port to turn credentials into a verified
//! [`Identity`]. Handlers stay deterministic in tests because they can swap
//! in a double instead of wiring persistence.

use async_trait::async_trait;

use crate::domain::{DemoAccount, Error, Identity, LoginCredentials};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated identity.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Identity, Error>;
}

/// In-memory authenticator accepting the built-in demo accounts.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Identity, Error> {
        let account = DemoAccount::matching(credentials)
            .ok_or_else(|| Error::unauthorized("invalid credentials"))?;
        account
            .identity()
            .map_err(|err| Error::internal(format!("invalid demo account: {err}")))
    }
}

/// Authenticator used when the development login is switched off.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledLoginService;

#[async_trait]
impl LoginService for DisabledLoginService {
    async fn authenticate(&self, _credentials: &LoginCredentials) -> Result<Identity, Error> {
        Err(Error::unauthorized("development login is disabled"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("ada@devhunt.dev", "password", Some("123e4567-e89b-12d3-a456-426614174000"))]
    #[case("grace@devhunt.dev", "password", Some("3fa85f64-5717-4562-b3fc-2c963f66afa6"))]
    #[case("ada@devhunt.dev", "wrong", None)]
    #[case("nobody@devhunt.dev", "password", None)]
    #[tokio::test]
    async fn fixture_login_accepts_demo_accounts_only(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected_id: Option<&str>,
    ) {
        let creds = LoginCredentials::try_from_parts(email, password).expect("credentials shape");
        let result = FixtureLoginService.authenticate(&creds).await;
        match (expected_id, result) {
            (Some(id), Ok(identity)) => assert_eq!(identity.user_id().to_string(), id),
            (None, Err(err)) => assert_eq!(err.code(), ErrorCode::Unauthorized),
            (Some(_), Err(err)) => panic!("expected success, got error: {err:?}"),
            (None, Ok(identity)) => panic!("expected failure, got {identity:?}"),
        }
    }

    #[tokio::test]
    async fn disabled_login_rejects_demo_accounts() {
        let creds =
            LoginCredentials::try_from_parts("ada@devhunt.dev", "password").expect("credentials");

        let error = DisabledLoginService
            .authenticate(&creds)
            .await
            .expect_err("login disabled");

        assert_eq!(error.code(), ErrorCode::Unauthorized);
    }
}
