//! Server configuration for the tenant directory API.
//!
//! Supports both programmatic configuration and environment variable
//! overrides.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `ATRIUM_SERVER_PORT` | 8080 | Server port |
//! | `ATRIUM_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `ATRIUM_LOG_LEVEL` | info | Log level |
//! | `ATRIUM_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `ATRIUM_ENABLE_CORS` | true | Enable CORS |
//! | `ATRIUM_CORS_ORIGINS` | * | Allowed origins |
//! | `ATRIUM_TENANT_HEADER` | x-tenant-id | Principal header name |
//! | `ATRIUM_TENANT_COOKIE` | tenant_id | Principal cookie name |
//! | `ATRIUM_REQUIRE_PRINCIPAL` | true | Reject unidentified requests |
//! | `ATRIUM_DEFAULT_PRINCIPAL` | (none) | Fallback principal id |
//! | `ATRIUM_DATABASE_URL` | (none) | SQLite path, `:memory:` if unset |
//!
//! # Example
//!
//! ```rust
//! use atrium_rest::ServerConfig;
//!
//! let config = ServerConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     ..Default::default()
//! };
//! assert_eq!(config.socket_addr(), "0.0.0.0:3000");
//! ```

use clap::Parser;

/// Server configuration for the tenant directory API.
///
/// Constructed from environment variables via [`ServerConfig::from_env`],
/// from command line arguments via [`ServerConfig::parse`], or
/// programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "atrium")]
#[command(about = "Atrium tenant directory server")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "ATRIUM_SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "ATRIUM_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "ATRIUM_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Request timeout in seconds.
    #[arg(long, env = "ATRIUM_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "ATRIUM_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "ATRIUM_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(
        long,
        env = "ATRIUM_CORS_METHODS",
        default_value = "GET,POST,PUT,DELETE,OPTIONS"
    )]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(
        long,
        env = "ATRIUM_CORS_HEADERS",
        default_value = "Content-Type,Authorization,Accept,X-Tenant-ID"
    )]
    pub cors_headers: String,

    /// Header carrying the acting principal's tenant id.
    #[arg(long, env = "ATRIUM_TENANT_HEADER", default_value = "x-tenant-id")]
    pub tenant_header: String,

    /// Cookie carrying the acting principal's tenant id.
    #[arg(long, env = "ATRIUM_TENANT_COOKIE", default_value = "tenant_id")]
    pub tenant_cookie: String,

    /// Reject non-exempt requests that carry no principal.
    ///
    /// When disabled, such requests fall back to `default_principal`.
    #[arg(long, env = "ATRIUM_REQUIRE_PRINCIPAL", default_value = "true")]
    pub require_principal: bool,

    /// Fallback principal used when `require_principal` is off.
    #[arg(long, env = "ATRIUM_DEFAULT_PRINCIPAL")]
    pub default_principal: Option<String>,

    /// Database connection string.
    #[arg(long, env = "ATRIUM_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Default page size for tenant listings.
    #[arg(long, env = "ATRIUM_DEFAULT_PAGE_SIZE", default_value = "100")]
    pub default_page_size: usize,

    /// Maximum page size for tenant listings.
    #[arg(long, env = "ATRIUM_MAX_PAGE_SIZE", default_value = "1000")]
    pub max_page_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            cors_methods: "GET,POST,PUT,DELETE,OPTIONS".to_string(),
            cors_headers: "Content-Type,Authorization,Accept,X-Tenant-ID".to_string(),
            tenant_header: "x-tenant-id".to_string(),
            tenant_cookie: "tenant_id".to_string(),
            require_principal: true,
            default_principal: None,
            database_url: None,
            default_page_size: 100,
            max_page_size: 1000,
        }
    }
}

impl ServerConfig {
    /// Creates a new ServerConfig from environment variables.
    ///
    /// Parses environment variables without requiring command line
    /// arguments, falling back to defaults.
    pub fn from_env() -> Self {
        Self::try_parse().unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.tenant_header.trim().is_empty() {
            errors.push("Tenant header name cannot be empty".to_string());
        }

        if self.default_page_size == 0 {
            errors.push("Default page size cannot be 0".to_string());
        }

        if self.default_page_size > self.max_page_size {
            errors.push("Default page size cannot exceed max page size".to_string());
        }

        if !self.require_principal && self.default_principal.is_none() {
            errors.push(
                "A default principal is required when principals are optional".to_string(),
            );
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Creates a configuration suitable for testing.
    pub fn for_testing() -> Self {
        Self {
            port: 0, // Let OS assign port
            host: "127.0.0.1".to_string(),
            log_level: "debug".to_string(),
            request_timeout: 5, // Shorter timeout for tests
            enable_cors: false,
            cors_origins: "*".to_string(),
            cors_methods: "*".to_string(),
            cors_headers: "*".to_string(),
            tenant_header: "x-tenant-id".to_string(),
            tenant_cookie: "tenant_id".to_string(),
            require_principal: true,
            default_principal: None,
            database_url: None,
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}
