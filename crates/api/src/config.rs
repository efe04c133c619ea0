use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// Network and timeout settings have development defaults; secrets and the
/// media host endpoint must be supplied explicitly.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// Media host configuration (upload endpoint, credentials).
    pub media: MediaConfig,
}

/// Configuration for the external media host.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Upload endpoint URL.
    pub upload_url: String,
    /// Optional bearer credential sent with each upload.
    pub api_key: Option<String>,
}

impl MediaConfig {
    /// Load media host configuration from environment variables.
    ///
    /// # Panics
    ///
    /// Panics if `MEDIA_UPLOAD_URL` is not set.
    pub fn from_env() -> Self {
        let upload_url =
            std::env::var("MEDIA_UPLOAD_URL").expect("MEDIA_UPLOAD_URL must be set");
        let api_key = std::env::var("MEDIA_API_KEY").ok();
        Self {
            upload_url,
            api_key,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
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

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            media: MediaConfig::from_env(),
        }
    }
}
