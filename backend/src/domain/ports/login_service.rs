//! Driving port for resolving login credentials into a user identity.
//!
//! Inbound adapters call this port to authenticate without knowing which
//! identity provider backs it. Handler tests substitute a mock.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, User, UserId, Username};

/// Identity provider contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the resolved user.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}

/// In-process identity provider with a single known account.
///
/// `testuser` / `password` resolves to user id `0`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

impl FixtureLoginService {
    /// Accepted username.
    pub const USERNAME: &'static str = "testuser";
    /// Accepted password.
    pub const PASSWORD: &'static str = "password";
    /// Id of the resolved user.
    pub const USER_ID: i64 = 0;

    /// The account this provider recognises.
    pub fn user() -> Result<User, Error> {
        let user_id = UserId::new(Self::USER_ID)
            .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))?;
        let username = Username::new(Self::USERNAME)
            .map_err(|err| Error::internal(format!("invalid fixture username: {err}")))?;
        Ok(User::new(user_id, username))
    }
}

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        if credentials.username() == Self::USERNAME && credentials.password() == Self::PASSWORD {
            Self::user()
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("testuser", "password", true)]
    #[case("testuser", "wrong", false)]
    #[case("someone", "password", false)]
    #[tokio::test]
    async fn fixture_accepts_only_the_known_account(
        #[case] username: &str,
        #[case] password: &str,
        #[case] should_succeed: bool,
    ) {
        let creds =
            LoginCredentials::try_from_parts(username, password).expect("credentials shape");
        match (should_succeed, FixtureLoginService.authenticate(&creds).await) {
            (true, Ok(user)) => {
                assert_eq!(user.user_id().value(), 0);
                assert_eq!(user.username().as_ref(), "testuser");
            }
            (false, Err(err)) => assert_eq!(err.code(), ErrorCode::Unauthorized),
            (true, Err(err)) => panic!("expected success, got error: {err:?}"),
            (false, Ok(user)) => panic!("expected failure, got {user:?}"),
        }
    }
}
