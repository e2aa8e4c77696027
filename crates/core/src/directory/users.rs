//! The user directory: a flat, append-only collection of accounts.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::info;

use super::types::{Company, Role, User};
use crate::store::{Collection, Repository, StoreError};

/// Input for registering a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Role within the company.
    pub role: Role,
    /// Company affiliation.
    pub company: Option<Company>,
}

/// Registered accounts.
pub struct UserDirectory {
    users: Collection<User>,
}

impl UserDirectory {
    /// Creates a directory over `repository`.
    pub fn new(repository: Arc<dyn Repository<User>>) -> Self {
        Self {
            users: Collection::new(repository),
        }
    }

    /// Appends a user. Duplicate emails are accepted.
    pub async fn create_user(&self, input: NewUser) -> Result<User, StoreError> {
        let user = User {
            name: input.name,
            email: input.email,
            password: input.password,
            role: input.role,
            company: input.company,
        };

        let created = user.clone();
        self.users
            .mutate(move |users| {
                users.push(user);
                Ok::<_, StoreError>(())
            })
            .await?;

        info!(email = %created.email, role = %created.role, "User created");
        Ok(created)
    }

    /// Returns the first user whose email and password both match exactly.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, StoreError> {
        let users = self.users.load().await?;
        Ok(users
            .into_iter()
            .find(|u| u.email == email && u.password == password))
    }

    /// Lists users in registration order.
    pub async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        self.users.load().await
    }

    /// Emails of every user whose company carries `company_name`.
    pub async fn emails_in_company(
        &self,
        company_name: &str,
    ) -> Result<HashSet<String>, StoreError> {
        let users = self.users.load().await?;
        Ok(users
            .into_iter()
            .filter(|u| u.company.as_ref().is_some_and(|c| c.name == company_name))
            .map(|u| u.email)
            .collect())
    }
}
