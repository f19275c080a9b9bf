//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The verified [`Identity`] produced at login is kept in the signed and
//! encrypted session cookie. Handlers ask for it through [`SessionContext`]
//! and never touch the Actix session directly.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, Identity, UserId};

pub(crate) const IDENTITY_KEY: &str = "identity";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated identity in the session cookie.
    pub fn persist_identity(&self, identity: &Identity) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(IDENTITY_KEY, identity)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current identity, if any.
    ///
    /// A cookie whose payload no longer decodes as an identity is treated as
    /// anonymous rather than as a server fault.
    pub fn identity(&self) -> Option<Identity> {
        match self.0.get::<Identity>(IDENTITY_KEY) {
            Ok(identity) => identity,
            Err(error) => {
                warn!(%error, "discarding undecodable identity in session cookie");
                None
            }
        }
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.identity().map(|identity| identity.user_id().clone())
    }

    /// Require an authenticated identity or return `401 Unauthorized`.
    pub fn require_identity(&self) -> Result<Identity, Error> {
        self.identity()
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Drop every value held in the session.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
