//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Where the keyed collections are persisted.
    #[serde(default)]
    pub storage: StorageSettings,
    /// External lookup services.
    #[serde(default)]
    pub services: ServicesConfig,
    /// Expense workflow switches.
    #[serde(default)]
    pub workflow: WorkflowConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Storage backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process memory; everything is lost on restart.
    #[default]
    Memory,
    /// JSON files under `root`.
    Fs,
}

/// Storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Backend to use.
    #[serde(default)]
    pub provider: StorageBackend,
    /// Root directory for the `fs` backend.
    #[serde(default = "default_storage_root")]
    pub root: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            provider: StorageBackend::default(),
            root: default_storage_root(),
        }
    }
}

fn default_storage_root() -> String {
    "./data".to_string()
}

/// External service endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ServicesConfig {
    /// Country directory endpoint returning names and currencies.
    #[serde(default = "default_countries_url")]
    pub countries_url: String,
    /// Exchange rate endpoint; the base currency code is appended.
    #[serde(default = "default_exchange_rates_url")]
    pub exchange_rates_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            countries_url: default_countries_url(),
            exchange_rates_url: default_exchange_rates_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_countries_url() -> String {
    "https://restcountries.com/v3.1/all?fields=name,currencies".to_string()
}

fn default_exchange_rates_url() -> String {
    "https://api.exchangerate-api.com/v4/latest/".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

/// Expense workflow switches. All default to the permissive behaviour.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct WorkflowConfig {
    /// Only allow `pending -> approved` and `pending -> rejected`.
    #[serde(default)]
    pub strict_transitions: bool,
    /// Limit the approval queue to the approver's own company.
    #[serde(default)]
    pub company_scoped_approvals: bool,
    /// Regenerate expense references that collide with existing ones.
    #[serde(default)]
    pub unique_refs: bool,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("SPENDFLOW")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
