//! Account domain types: users, their company, and the session snapshot.

use serde::{Deserialize, Serialize};
use spendflow_shared::CurrencyCode;
use std::fmt;

/// Role of a registered user.
///
/// Stored records may carry roles this service never assigns; they load as
/// [`Role::Other`] and are written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Created the company at signup; manages users and rules.
    Admin,
    /// Approves expenses.
    Manager,
    /// Submits expenses.
    Employee,
    /// Any other stored role.
    #[serde(untagged)]
    Other(String),
}

impl Role {
    /// Returns the string representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Employee => "employee",
            Self::Other(role) => role,
        }
    }

    /// Parses one of the assignable roles.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "manager" => Some(Self::Manager),
            "employee" => Some(Self::Employee),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The company a user belongs to.
///
/// Each user carries its own copy; there is no company registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Display name.
    pub name: String,
    /// Country the company was registered in.
    pub country: String,
    /// Currency expenses are normalised to.
    pub currency: CurrencyCode,
}

/// A registered account.
///
/// The password is stored in plaintext; this is a demo directory, not an
/// identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Display name.
    pub name: String,
    /// Login email. Not unique.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Role within the company.
    pub role: Role,
    /// Company affiliation.
    #[serde(default)]
    pub company: Option<Company>,
}

/// Snapshot of the currently active user.
///
/// Taken at login or signup; later directory changes are not reflected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Role within the company.
    pub role: Role,
    /// Company affiliation.
    #[serde(default)]
    pub company: Option<Company>,
}

impl Session {
    /// Currency the session's company normalises to, `USD` when unknown.
    #[must_use]
    pub fn company_currency(&self) -> CurrencyCode {
        self.company
            .as_ref()
            .map(|c| c.currency.clone())
            .filter(|code| !code.as_str().is_empty())
            .unwrap_or_else(CurrencyCode::fallback)
    }

    /// Name of the session's company, if any.
    #[must_use]
    pub fn company_name(&self) -> Option<&str> {
        self.company.as_ref().map(|c| c.name.as_str())
    }
}

impl From<&User> for Session {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            company: user.company.clone(),
        }
    }
}
