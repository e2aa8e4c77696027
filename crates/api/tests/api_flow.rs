//! End-to-end flow through the full router over OpenDAL memory storage.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use opendal::{Operator, services};
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use spendflow_api::{AppState, create_router};
use spendflow_core::currency::{
    ConversionService, CountryDirectory, CountryRecord, CurrencyLookup, RateProvider, RateTable,
    ServiceError,
};
use spendflow_core::directory::{AccountService, UserDirectory};
use spendflow_core::expense::ExpenseWorkflow;
use spendflow_core::rules::RuleDirectory;
use spendflow_shared::{CurrencyCode, WorkflowConfig};
use spendflow_store::Stores;
use tower::ServiceExt;

struct Countries;

#[async_trait]
impl CountryDirectory for Countries {
    async fn fetch_countries(&self) -> Result<Vec<CountryRecord>, ServiceError> {
        Ok(vec![
            CountryRecord::new("France", ["EUR"]),
            CountryRecord::new("United States", ["USD"]),
        ])
    }
}

struct Rates;

#[async_trait]
impl RateProvider for Rates {
    async fn latest_rates(&self, base: &CurrencyCode) -> Result<RateTable, ServiceError> {
        match base.as_str() {
            "USD" => Ok(RateTable::new([("EUR", dec!(0.92))])),
            _ => Ok(RateTable::default()),
        }
    }
}

struct TestApp {
    router: Router,
    operator: Operator,
}

impl TestApp {
    fn new(config: WorkflowConfig) -> Self {
        let operator = Operator::new(services::Memory::default()).unwrap().finish();
        let stores = Stores::new(&operator);

        let users = Arc::new(UserDirectory::new(stores.users.clone()));
        let lookup = Arc::new(CurrencyLookup::new(Arc::new(Countries)));
        let state = AppState {
            accounts: Arc::new(AccountService::new(
                users.clone(),
                stores.session.clone(),
                lookup.clone(),
            )),
            workflow: Arc::new(ExpenseWorkflow::new(
                stores.expenses.clone(),
                Arc::new(ConversionService::new(Arc::new(Rates))),
                users,
                config,
            )),
            rules: Arc::new(RuleDirectory::new(stores.rules.clone())),
            lookup,
        };

        Self {
            router: create_router(state),
            operator,
        }
    }

    async fn call(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder()
            .method(method)
            .uri(format!("/api/v1{uri}"))
            .header("Content-Type", "application/json");
        let request = match body {
            Some(body) => builder.body(Body::from(body.to_string())).unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn stored(&self, key: &str) -> Value {
        let bytes = self.operator.read(key).await.unwrap().to_vec();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn signup(&self, email: &str, country: &str, company: &str) {
        let (status, _) = self
            .call(
                "POST",
                "/auth/signup",
                Some(json!({
                    "name": "Admin",
                    "email": email,
                    "password": "pw",
                    "country": country,
                    "company_name": company,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    async fn submit(&self, amount: Value, currency: &str) -> Value {
        let (status, body) = self
            .call(
                "POST",
                "/expenses",
                Some(json!({
                    "amount": amount,
                    "currency": currency,
                    "date": "2024-06-01",
                    "category": "Travel",
                    "desc": "Conference",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body["data"].clone()
    }
}

#[tokio::test]
async fn test_public_endpoints() {
    let app = TestApp::new(WorkflowConfig::default());

    let (status, body) = app.call("GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = app.call("GET", "/countries", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!(["France", "United States"]));
}

#[tokio::test]
async fn test_protected_endpoints_need_session() {
    let app = TestApp::new(WorkflowConfig::default());

    for uri in ["/auth/me", "/company", "/expenses", "/approvals", "/users", "/rules"] {
        let (status, body) = app.call("GET", uri, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body["error"], "no_session", "{uri}");
    }
}

#[tokio::test]
async fn test_expense_lifecycle() {
    let app = TestApp::new(WorkflowConfig::default());
    app.signup("anne@acme.fr", "France", "Acme").await;

    let (_, company) = app.call("GET", "/company", None).await;
    assert_eq!(company["data"]["currency"], "EUR");

    let converted = app.submit(json!(100), "USD").await;
    assert_eq!(converted["companyAmount"], "92.00");

    let local = app.submit(json!(50), "EUR").await;
    assert_eq!(local["companyAmount"], "50.00");

    let unconverted = app.submit(json!("8.5"), "GBP").await;
    assert!(unconverted["companyAmount"].is_null());
    assert_eq!(unconverted["amount"], "8.50");

    let (_, listed) = app.call("GET", "/expenses", None).await;
    let refs: Vec<&Value> = listed["data"].as_array().unwrap().iter().map(|e| &e["ref"]).collect();
    assert_eq!(refs, vec![&unconverted["ref"], &local["ref"], &converted["ref"]]);

    let (status, decided) = app
        .call(
            "POST",
            "/approvals/decide",
            Some(json!({"ref": converted["ref"], "decision": "approved"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(decided["data"]["updated"].as_u64().unwrap() >= 1);

    let (_, pending) = app.call("GET", "/approvals", None).await;
    assert!(pending["data"]
        .as_array()
        .unwrap()
        .iter()
        .all(|e| e["ref"] != converted["ref"]));

    // Stored in the same layout the browser demo used.
    let stored = app.stored("demo_expenses").await;
    assert_eq!(stored.as_array().unwrap().len(), 3);
    assert_eq!(stored[0]["employee"], "anne@acme.fr");
    assert_eq!(stored[0]["desc"], "Conference");
    let session = app.stored("demo_user").await;
    assert_eq!(session["email"], "anne@acme.fr");
}

#[tokio::test]
async fn test_logout_then_login_again() {
    let app = TestApp::new(WorkflowConfig::default());
    app.signup("anne@acme.fr", "France", "Acme").await;

    let (status, _) = app.call("POST", "/auth/logout", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.call("GET", "/auth/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .call(
            "POST",
            "/auth/login",
            Some(json!({"email": "anne@acme.fr", "password": "pw"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["company"]["name"], "Acme");

    let (status, me) = app.call("GET", "/auth/me", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["data"]["email"], "anne@acme.fr");
}

#[tokio::test]
async fn test_rules_round_trip() {
    let app = TestApp::new(WorkflowConfig::default());
    app.signup("anne@acme.fr", "France", "Acme").await;

    let (status, _) = app
        .call(
            "POST",
            "/rules",
            Some(json!({"name": "Manager first", "type": "sequential", "threshold": "500"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, rules) = app.call("GET", "/rules", None).await;
    assert_eq!(rules["data"][0]["type"], "sequential");
    assert_eq!(app.stored("demo_rules").await[0]["threshold"], "500");
}

#[tokio::test]
async fn test_strict_transitions_return_422() {
    let app = TestApp::new(WorkflowConfig {
        strict_transitions: true,
        ..WorkflowConfig::default()
    });
    app.signup("anne@acme.fr", "France", "Acme").await;
    let expense = app.submit(json!(10), "EUR").await;
    let decide = |decision: &str| json!({"ref": expense["ref"], "decision": decision});

    let (status, _) = app.call("POST", "/approvals/decide", Some(decide("rejected"))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.call("POST", "/approvals/decide", Some(decide("approved"))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "business_rule_violation");
}

#[tokio::test]
async fn test_company_scoped_approvals() {
    let app = TestApp::new(WorkflowConfig {
        company_scoped_approvals: true,
        ..WorkflowConfig::default()
    });
    app.signup("anne@acme.fr", "France", "Acme").await;
    app.submit(json!(10), "EUR").await;

    app.signup("bob@globex.us", "United States", "Globex").await;
    app.submit(json!(20), "USD").await;

    let (_, pending) = app.call("GET", "/approvals", None).await;
    let pending = pending["data"].as_array().unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0]["employee"], "bob@globex.us");
}
