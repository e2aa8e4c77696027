//! In-memory application state for route tests.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal_macros::dec;
use spendflow_core::currency::{
    ConversionService, CountryDirectory, CountryRecord, CurrencyLookup, RateProvider, RateTable,
    ServiceError,
};
use spendflow_core::directory::{
    AccountService, NewUser, Role, Session, SignupInput, UserDirectory,
};
use spendflow_core::expense::ExpenseWorkflow;
use spendflow_core::rules::RuleDirectory;
use spendflow_core::store::{InMemoryRepository, InMemorySessionStore};
use spendflow_shared::{CurrencyCode, WorkflowConfig};

use crate::AppState;

/// Fixed country directory.
pub struct StaticCountries;

#[async_trait]
impl CountryDirectory for StaticCountries {
    async fn fetch_countries(&self) -> Result<Vec<CountryRecord>, ServiceError> {
        Ok(vec![
            CountryRecord::new("Germany", ["EUR"]),
            CountryRecord::new("India", ["INR"]),
            CountryRecord::new("United States", ["USD"]),
        ])
    }
}

/// Quotes `USD -> EUR` at 0.92 and nothing else.
pub struct StaticRates;

#[async_trait]
impl RateProvider for StaticRates {
    async fn latest_rates(&self, base: &CurrencyCode) -> Result<RateTable, ServiceError> {
        match base.as_str() {
            "USD" => Ok(RateTable::new([("EUR", dec!(0.92)), ("USD", dec!(1))])),
            _ => Err(ServiceError::Status {
                service: "exchange-rates",
                status: 404,
            }),
        }
    }
}

/// Fresh state backed by in-memory stores.
pub fn test_state() -> AppState {
    state_over(Arc::new(UserDirectory::new(Arc::new(
        InMemoryRepository::default(),
    ))))
}

fn state_over(users: Arc<UserDirectory>) -> AppState {
    let lookup = Arc::new(CurrencyLookup::new(Arc::new(StaticCountries)));
    let accounts = Arc::new(AccountService::new(
        users.clone(),
        Arc::new(InMemorySessionStore::default()),
        lookup.clone(),
    ));
    let workflow = Arc::new(ExpenseWorkflow::new(
        Arc::new(InMemoryRepository::default()),
        Arc::new(ConversionService::new(Arc::new(StaticRates))),
        users,
        WorkflowConfig::default(),
    ));

    AppState {
        accounts,
        workflow,
        rules: Arc::new(RuleDirectory::new(Arc::new(InMemoryRepository::default()))),
        lookup,
    }
}

/// Signs up a German admin and leaves them logged in.
pub async fn logged_in_state() -> (AppState, Session) {
    let state = test_state();
    let session = state
        .accounts
        .signup(SignupInput {
            name: "Greta".into(),
            email: "greta@acme.de".into(),
            password: "pw".into(),
            country: "Germany".into(),
            company_name: "Acme".into(),
        })
        .await
        .unwrap();
    (state, session)
}

/// Logs in an employee registered without a company.
pub async fn companyless_state() -> (AppState, Session) {
    let users = Arc::new(UserDirectory::new(Arc::new(InMemoryRepository::default())));
    users
        .create_user(NewUser {
            name: "Nils".into(),
            email: "nils@example.com".into(),
            password: "pw".into(),
            role: Role::Employee,
            company: None,
        })
        .await
        .unwrap();
    let state = state_over(users);
    let session = state
        .accounts
        .login("nils@example.com", "pw")
        .await
        .unwrap()
        .unwrap();
    (state, session)
}
