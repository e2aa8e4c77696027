//! Users, companies, and the active session.

pub mod accounts;
pub mod types;
pub mod users;

pub use accounts::{AccountService, MEMBER_DEFAULT_PASSWORD, SignupInput};
pub use types::{Company, Role, Session, User};
pub use users::{NewUser, UserDirectory};
