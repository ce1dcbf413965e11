use custody_core::types::{Height, Principal};

/// Server configuration loaded from environment variables.
///
/// Everything except the executive principal has a default suitable for
/// local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long to wait for background tasks after shutdown (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// The deployment's executive principal. Required.
    pub executive: Principal,
    /// Height the ledger starts at (default: `0`).
    pub genesis_height: Height,
    /// Whether the registry accepts registrations at startup (default: `true`).
    pub registry_active: bool,
    /// Number of recent events kept in memory (default: `1000`).
    pub event_journal_capacity: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                 |
    /// |--------------------------|-------------------------|
    /// | `HOST`                   | `0.0.0.0`               |
    /// | `PORT`                   | `3000`                  |
    /// | `CORS_ORIGINS`           | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS`  | `30`                    |
    /// | `EXECUTIVE_PRINCIPAL`    | (required)              |
    /// | `GENESIS_HEIGHT`         | `0`                     |
    /// | `REGISTRY_ACTIVE`        | `true`                  |
    /// | `EVENT_JOURNAL_CAPACITY` | `1000`                  |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let executive = std::env::var("EXECUTIVE_PRINCIPAL")
            .map(|s| s.trim().to_string())
            .ok()
            .filter(|s| !s.is_empty())
            .map(Principal::new)
            .expect("EXECUTIVE_PRINCIPAL must be set");

        let genesis_height: Height = std::env::var("GENESIS_HEIGHT")
            .unwrap_or_else(|_| "0".into())
            .parse()
            .expect("GENESIS_HEIGHT must be a valid u64");

        let registry_active: bool = std::env::var("REGISTRY_ACTIVE")
            .unwrap_or_else(|_| "true".into())
            .parse()
            .expect("REGISTRY_ACTIVE must be `true` or `false`");

        let event_journal_capacity: usize = std::env::var("EVENT_JOURNAL_CAPACITY")
            .unwrap_or_else(|_| "1000".into())
            .parse()
            .expect("EVENT_JOURNAL_CAPACITY must be a valid usize");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            executive,
            genesis_height,
            registry_active,
            event_journal_capacity,
        }
    }
}
