use std::env;

use crate::models::Edition;

/// AppConfig
///
/// Holds the application's entire configuration state. The struct is
/// immutable once loaded, so every component sees the same environment,
/// edition and endpoints for the lifetime of the process. The edition in
/// particular is read here exactly once and then threaded explicitly into
/// the Route Table Builder and module registry — no component re-reads it.
#[derive(Clone)]
pub struct AppConfig {
    // Runtime environment marker. Selects the log output format.
    pub env: Env,
    // Product edition this binary was assembled as (base or extended).
    pub edition: Edition,
    // Base URL of the backing API, used by the transport wrapper and the
    // HTTP auth backend.
    pub api_base_url: String,
}

/// Env
///
/// Defines the runtime context, used to switch between human-readable local
/// logging and structured production logging.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// default
    ///
    /// Provides a safe, non-panicking AppConfig instance primarily used for
    /// test setup, without requiring any environment variables to be set.
    fn default() -> Self {
        Self {
            env: Env::Local,
            edition: Edition::Base,
            api_base_url: "http://localhost:3000/api".to_string(),
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// The canonical function for initializing the application configuration
    /// at startup. Reads all parameters from environment variables and
    /// implements the fail-fast principle for production.
    ///
    /// * `APP_ENV` — "production" selects `Env::Production`; anything else
    ///   (including absence) is `Env::Local`.
    /// * `APP_EDITION` — "extended" selects `Edition::Extended`; anything
    ///   else is `Edition::Base`. This is the single read of the edition
    ///   flag for the whole process.
    /// * `API_BASE_URL` — mandatory in production; defaults to the local
    ///   development server otherwise.
    ///
    /// # Panics
    /// Panics if `API_BASE_URL` is missing in production. Starting without a
    /// reachable API would leave every re-validation failing silently.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let edition_str = env::var("APP_EDITION").unwrap_or_else(|_| "base".to_string());
        let edition = Edition::from_flag(&edition_str);

        let api_base_url = match env {
            Env::Production => env::var("API_BASE_URL")
                .expect("FATAL: API_BASE_URL must be set in production."),
            _ => env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000/api".to_string()),
        };

        Self {
            env,
            edition,
            api_base_url,
        }
    }
}
