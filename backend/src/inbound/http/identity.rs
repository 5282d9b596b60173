//! Request-scoped identity resolved from the session.
//!
//! Handlers that need an authenticated caller take [`Identity`] as an
//! argument. Extraction fails with `401 Unauthorized` before the handler body
//! runs, so no write can happen for anonymous requests.

use std::ops::Deref;

use actix_session::SessionExt;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};

use super::session::SessionContext;
use crate::domain::{Error, User};

/// Authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity(User);

impl Identity {
    /// Unwrap into the domain user.
    pub fn into_user(self) -> User {
        self.0
    }
}

impl Deref for Identity {
    type Target = User;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for Identity {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let session = SessionContext::new(req.get_session());
        ready(session.require_user().map(Identity))
    }
}
