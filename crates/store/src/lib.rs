//! Storage adapters for Spendflow.
//!
//! Each collection is a single JSON blob in an OpenDAL [`Operator`], read and
//! written wholesale. The blob keys match the layout the demo front-end
//! used, so existing data stays readable.

pub mod collection;
pub mod operator;
pub mod session;

pub use collection::JsonCollection;
pub use operator::{StoreSetupError, build_operator};
pub use session::JsonSessionStore;

use std::sync::Arc;

use opendal::Operator;
use spendflow_core::directory::User;
use spendflow_core::expense::Expense;
use spendflow_core::rules::Rule;

/// Key of the active session snapshot.
pub const SESSION_KEY: &str = "demo_user";
/// Key of the user directory.
pub const USERS_KEY: &str = "demo_users";
/// Key of the expense ledger.
pub const EXPENSES_KEY: &str = "demo_expenses";
/// Key of the approval rules.
pub const RULES_KEY: &str = "demo_rules";

/// Every adapter the application needs, sharing one operator.
#[derive(Clone)]
pub struct Stores {
    /// User directory collection.
    pub users: Arc<JsonCollection<User>>,
    /// Expense ledger collection.
    pub expenses: Arc<JsonCollection<Expense>>,
    /// Approval rule collection.
    pub rules: Arc<JsonCollection<Rule>>,
    /// Active session snapshot.
    pub session: Arc<JsonSessionStore>,
}

impl Stores {
    /// Wires every collection to its key on `operator`.
    #[must_use]
    pub fn new(operator: &Operator) -> Self {
        Self {
            users: Arc::new(JsonCollection::new(operator.clone(), USERS_KEY)),
            expenses: Arc::new(JsonCollection::new(operator.clone(), EXPENSES_KEY)),
            rules: Arc::new(JsonCollection::new(operator.clone(), RULES_KEY)),
            session: Arc::new(JsonSessionStore::new(operator.clone(), SESSION_KEY)),
        }
    }
}
