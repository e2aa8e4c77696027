//! Signup, login and session management.
//!
//! The session store is only touched here; everything downstream receives
//! the [`Session`] explicitly.

use std::sync::Arc;

use tracing::info;

use super::types::{Company, Role, Session, User};
use super::users::{NewUser, UserDirectory};
use crate::currency::CurrencyLookup;
use crate::store::{SessionStore, StoreError};

/// Password given to users created by an admin.
pub const MEMBER_DEFAULT_PASSWORD: &str = "demo";

/// Signup form input.
#[derive(Debug, Clone)]
pub struct SignupInput {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Country the company is registered in.
    pub country: String,
    /// Company name; blank means `"<country> Company"`.
    pub company_name: String,
}

/// Account flows on top of the user directory and session store.
pub struct AccountService {
    directory: Arc<UserDirectory>,
    sessions: Arc<dyn SessionStore>,
    lookup: Arc<CurrencyLookup>,
}

impl AccountService {
    /// Creates the service.
    pub fn new(
        directory: Arc<UserDirectory>,
        sessions: Arc<dyn SessionStore>,
        lookup: Arc<CurrencyLookup>,
    ) -> Self {
        Self {
            directory,
            sessions,
            lookup,
        }
    }

    /// Registers an admin with a new company and logs them in.
    ///
    /// The company currency comes from the country directory and falls back
    /// to `USD`.
    pub async fn signup(&self, input: SignupInput) -> Result<Session, StoreError> {
        let company_name = match input.company_name.trim() {
            "" => format!("{} Company", input.country),
            name => name.to_string(),
        };
        let currency = self.lookup.resolve_currency(&input.country).await;

        let user = self
            .directory
            .create_user(NewUser {
                name: input.name.trim().to_string(),
                email: input.email.trim().to_string(),
                password: input.password,
                role: Role::Admin,
                company: Some(Company {
                    name: company_name,
                    country: input.country,
                    currency,
                }),
            })
            .await?;

        let session = Session::from(&user);
        self.sessions.save(&session).await?;
        info!(email = %session.email, "Signed up");
        Ok(session)
    }

    /// Authenticates and stores the session snapshot.
    ///
    /// Returns `None` when no user matches.
    pub async fn login(&self, email: &str, password: &str) -> Result<Option<Session>, StoreError> {
        let Some(user) = self.directory.authenticate(email.trim(), password).await? else {
            info!(email = %email.trim(), "Login rejected");
            return Ok(None);
        };

        let session = Session::from(&user);
        self.sessions.save(&session).await?;
        info!(email = %session.email, "Logged in");
        Ok(Some(session))
    }

    /// Clears the active session.
    pub async fn logout(&self) -> Result<(), StoreError> {
        self.sessions.clear().await
    }

    /// The active session, if any.
    pub async fn current_session(&self) -> Result<Option<Session>, StoreError> {
        self.sessions.load().await
    }

    /// Creates a user in the acting session's company with the default
    /// password.
    pub async fn add_member(
        &self,
        session: &Session,
        name: &str,
        email: &str,
        role: Role,
    ) -> Result<User, StoreError> {
        self.directory
            .create_user(NewUser {
                name: name.to_string(),
                email: email.to_string(),
                password: MEMBER_DEFAULT_PASSWORD.to_string(),
                role,
                company: session.company.clone(),
            })
            .await
    }

    /// Lists every registered user.
    pub async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        self.directory.list_users().await
    }

    /// The company shown on the expense submission page.
    #[must_use]
    pub fn company_info(session: &Session) -> Option<&Company> {
        session.company.as_ref()
    }
}
