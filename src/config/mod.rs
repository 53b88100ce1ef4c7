use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Switches the root greeting to the excited variant
    pub excited: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL URL, or `memory` for the in-process store
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
    pub bootstrap_schema: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Tenant domain of the signing authority, e.g. `shipping.us.auth0.com`
    pub domain: Option<String>,
    pub issuer: Option<String>,
    pub audience: String,
    pub algorithm: String,
    pub jwt_secret: String,
    pub public_key_file: Option<String>,
    pub jwks_url: Option<String>,
    pub leeway_secs: u64,
    pub token_ttl_minutes: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub cors_origins: Vec<String>,
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
        // Server overrides
        if let Ok(v) = env::var("HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if env::var_os("EXCITED").is_some() {
            self.server.excited = true;
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = Some(v);
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }
        if let Ok(v) = env::var("DATABASE_BOOTSTRAP_SCHEMA") {
            self.database.bootstrap_schema = v.parse().unwrap_or(self.database.bootstrap_schema);
        }

        // Auth overrides
        if let Ok(v) = env::var("AUTH_DOMAIN") {
            self.auth.domain = Some(v);
        }
        if let Ok(v) = env::var("AUTH_ISSUER") {
            self.auth.issuer = Some(v);
        }
        if let Ok(v) = env::var("AUTH_AUDIENCE") {
            self.auth.audience = v;
        }
        if let Ok(v) = env::var("AUTH_ALGORITHM") {
            self.auth.algorithm = v.to_ascii_uppercase();
        }
        if let Ok(v) = env::var("AUTH_JWT_SECRET") {
            self.auth.jwt_secret = v;
        }
        if let Ok(v) = env::var("AUTH_PUBLIC_KEY_FILE") {
            self.auth.public_key_file = Some(v);
        }
        if let Ok(v) = env::var("AUTH_JWKS_URL") {
            self.auth.jwks_url = Some(v);
        }
        if let Ok(v) = env::var("AUTH_LEEWAY_SECS") {
            self.auth.leeway_secs = v.parse().unwrap_or(self.auth.leeway_secs);
        }
        if let Ok(v) = env::var("AUTH_TOKEN_TTL_MINUTES") {
            self.auth.token_ttl_minutes = v.parse().unwrap_or(self.auth.token_ttl_minutes);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                excited: false,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 30,
                bootstrap_schema: true,
            },
            auth: AuthConfig {
                domain: None,
                issuer: Some("shipping-dev".to_string()),
                audience: "shipping".to_string(),
                algorithm: "HS256".to_string(),
                jwt_secret: "shipping-dev-secret".to_string(),
                public_key_file: None,
                jwks_url: None,
                leeway_secs: 60,
                token_ttl_minutes: 24 * 60,
            },
            security: SecurityConfig {
                cors_origins: vec!["*".to_string()],
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                excited: false,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
                connection_timeout: 10,
                bootstrap_schema: true,
            },
            auth: AuthConfig {
                domain: None,
                issuer: None,
                audience: "shipping".to_string(),
                algorithm: "RS256".to_string(),
                jwt_secret: String::new(),
                public_key_file: None,
                jwks_url: None,
                leeway_secs: 30,
                token_ttl_minutes: 60,
            },
            security: SecurityConfig {
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
        }
    }

    pub(crate) fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                excited: false,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 50,
                connection_timeout: 5,
                bootstrap_schema: false,
            },
            auth: AuthConfig {
                domain: None,
                issuer: None,
                audience: "shipping".to_string(),
                algorithm: "RS256".to_string(),
                jwt_secret: String::new(),
                public_key_file: None,
                jwks_url: None,
                leeway_secs: 0,
                token_ttl_minutes: 15,
            },
            security: SecurityConfig {
                cors_origins: vec!["https://app.example.com".to_string()],
            },
        }
    }
}

impl AuthConfig {
    /// Expected `iss`; falls back to the signing authority's domain
    pub fn expected_issuer(&self) -> Option<String> {
        self.issuer
            .clone()
            .or_else(|| self.domain.as_ref().map(|d| format!("https://{}/", d.trim_end_matches('/'))))
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
