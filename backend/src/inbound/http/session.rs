//! Session helpers keeping handlers free of cookie-session details.
//!
//! The resolved identity is stored as `{userId, username}` JSON under a
//! single key in the encrypted cookie.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, User};

pub(crate) const USER_KEY: &str = "user";

/// Newtype wrapper exposing identity-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap an actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store the authenticated user in the session cookie.
    pub fn persist_user(&self, user: &User) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_KEY, user)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Current user, if the session carries a well-formed identity.
    ///
    /// A malformed entry is logged and treated as anonymous.
    pub fn user(&self) -> Option<User> {
        match self.0.get::<User>(USER_KEY) {
            Ok(user) => user,
            Err(error) => {
                warn!(%error, "discarding malformed session identity");
                None
            }
        }
    }

    /// Require an authenticated user or return `401 Unauthorized`.
    pub fn require_user(&self) -> Result<User, Error> {
        self.user()
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Drop every session entry and expire the cookie.
    pub fn purge(&self) {
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
