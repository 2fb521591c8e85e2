use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub collab: ProviderConfig,
    pub identity: ProviderConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// Connection settings for one hosted provider (collaboration or identity)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_url: String,
    pub secret_key: String,
    pub timeout_secs: u64,
}

impl ProviderConfig {
    pub fn is_configured(&self) -> bool {
        !self.secret_key.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub enable_request_logging: bool,
    pub page_cache_ttl_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Collaboration provider overrides
        if let Ok(v) = env::var("COLLAB_API_URL") {
            if Url::parse(&v).is_ok() {
                self.collab.api_url = v.trim_end_matches('/').to_string();
            }
        }
        if let Ok(v) = env::var("COLLAB_SECRET_KEY") {
            self.collab.secret_key = v;
        }
        if let Ok(v) = env::var("COLLAB_TIMEOUT_SECS") {
            self.collab.timeout_secs = v.parse().unwrap_or(self.collab.timeout_secs);
        }

        // Identity provider overrides
        if let Ok(v) = env::var("IDENTITY_API_URL") {
            if Url::parse(&v).is_ok() {
                self.identity.api_url = v.trim_end_matches('/').to_string();
            }
        }
        if let Ok(v) = env::var("IDENTITY_SECRET_KEY") {
            self.identity.secret_key = v;
        }
        if let Ok(v) = env::var("IDENTITY_TIMEOUT_SECS") {
            self.identity.timeout_secs = v.parse().unwrap_or(self.identity.timeout_secs);
        }

        // API overrides
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }
        if let Ok(v) = env::var("PAGE_CACHE_TTL_SECS") {
            self.api.page_cache_ttl_secs = v.parse().unwrap_or(self.api.page_cache_ttl_secs);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            collab: ProviderConfig {
                api_url: "https://api.liveblocks.io".to_string(),
                secret_key: String::new(),
                timeout_secs: 30,
            },
            identity: ProviderConfig {
                api_url: "https://api.clerk.com".to_string(),
                secret_key: String::new(),
                timeout_secs: 30,
            },
            api: ApiConfig {
                enable_request_logging: true,
                page_cache_ttl_secs: 60,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:5173".to_string(),
                ],
                jwt_secret: String::new(),
                jwt_expiry_hours: 24 * 7, // 1 week
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            collab: ProviderConfig {
                api_url: "https://api.liveblocks.io".to_string(),
                secret_key: String::new(),
                timeout_secs: 15,
            },
            identity: ProviderConfig {
                api_url: "https://api.clerk.com".to_string(),
                secret_key: String::new(),
                timeout_secs: 15,
            },
            api: ApiConfig {
                enable_request_logging: true,
                page_cache_ttl_secs: 60,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            collab: ProviderConfig {
                api_url: "https://api.liveblocks.io".to_string(),
                secret_key: String::new(),
                timeout_secs: 10,
            },
            identity: ProviderConfig {
                api_url: "https://api.clerk.com".to_string(),
                secret_key: String::new(),
                timeout_secs: 10,
            },
            api: ApiConfig {
                enable_request_logging: false,
                page_cache_ttl_secs: 300,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://app.example.com".to_string()],
                jwt_secret: String::new(),
                jwt_expiry_hours: 4,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
