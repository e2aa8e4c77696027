//! Request middleware.

pub mod session;

pub use session::{CurrentSession, session_middleware};
