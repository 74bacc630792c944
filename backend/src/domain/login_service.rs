//! Login service backed by a single configured account.
//!
//! Accounts belong to the identity provider; this service stands in for it
//! by accepting one configured username/password pair and recording the
//! resulting user locally so comments and ratings can show the username.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;
use zeroize::Zeroizing;

use crate::domain::ports::{LoginService, UserPersistenceError, UserRepository};
use crate::domain::{Error, LoginCredentials, User};

/// [`LoginService`] accepting one configured account.
#[derive(Clone)]
pub struct ConfiguredLoginService<U> {
    account: User,
    password: Zeroizing<String>,
    users: Arc<U>,
}

impl<U> ConfiguredLoginService<U> {
    /// Accept `account` when presented with `password`.
    pub fn new(account: User, password: impl Into<String>, users: Arc<U>) -> Self {
        Self {
            account,
            password: Zeroizing::new(password.into()),
            users,
        }
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

#[async_trait]
impl<U> LoginService for ConfiguredLoginService<U>
where
    U: UserRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let username_matches = credentials.username() == self.account.username().as_ref();
        if !username_matches || credentials.password() != self.password.as_str() {
            warn!(username = credentials.username(), "rejected login attempt");
            return Err(Error::unauthorized("invalid credentials"));
        }
        self.users
            .upsert(&self.account)
            .await
            .map_err(map_user_error)?;
        Ok(self.account.clone())
    }
}
