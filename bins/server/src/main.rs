//! Spendflow API Server
//!
//! Main entry point for the Spendflow expense service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spendflow_api::{AppState, create_router};
use spendflow_core::currency::{ConversionService, CurrencyLookup};
use spendflow_core::directory::{AccountService, UserDirectory};
use spendflow_core::expense::ExpenseWorkflow;
use spendflow_core::rules::RuleDirectory;
use spendflow_external::{ExchangeRateApiClient, RestCountriesClient, build_http_client};
use spendflow_shared::AppConfig;
use spendflow_store::{Stores, build_operator};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spendflow=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Storage
    let operator = build_operator(&config.storage)?;
    let stores = Stores::new(&operator);

    // External services
    let http = build_http_client(config.services.request_timeout_secs)?;
    let countries = Arc::new(RestCountriesClient::new(
        http.clone(),
        config.services.countries_url.clone(),
    ));
    let rates = Arc::new(ExchangeRateApiClient::new(
        http,
        config.services.exchange_rates_url.clone(),
    ));
    info!(
        countries_url = %config.services.countries_url,
        exchange_rates_url = %config.services.exchange_rates_url,
        timeout_secs = config.services.request_timeout_secs,
        "External services configured"
    );

    // Domain services
    let users = Arc::new(UserDirectory::new(stores.users.clone()));
    let lookup = Arc::new(CurrencyLookup::new(countries));
    let accounts = Arc::new(AccountService::new(
        users.clone(),
        stores.session.clone(),
        lookup.clone(),
    ));
    let workflow = Arc::new(ExpenseWorkflow::new(
        stores.expenses.clone(),
        Arc::new(ConversionService::new(rates)),
        users,
        config.workflow,
    ));
    info!(
        strict_transitions = config.workflow.strict_transitions,
        company_scoped_approvals = config.workflow.company_scoped_approvals,
        unique_refs = config.workflow.unique_refs,
        "Expense workflow configured"
    );

    // Create application state
    let state = AppState {
        accounts,
        workflow,
        rules: Arc::new(RuleDirectory::new(stores.rules.clone())),
        lookup,
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
