use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// MongoDB connection string
    pub url: String,
    /// Database name holding the LMS collections
    pub name: String,
    pub max_pool_size: u32,
    /// Server selection timeout; also bounds the /health probe
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    pub enable_request_logging: bool,
    pub enable_cors: bool,
}

/// Settings for the ai-explain search/scrape pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub google_api_key: String,
    pub search_engine_id: String,
    /// Result pages fetched per request (hard cap)
    pub max_pages: usize,
    /// Per-page fetch timeout in seconds
    pub page_fetch_timeout_secs: u64,
    /// Minimum keyword overlap for a paragraph to count as relevant
    pub relevance_threshold: usize,
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
        // Database overrides
        if let Ok(v) = env::var("MONGODB_URI") {
            self.database.url = v;
        }
        if let Ok(v) = env::var("MONGODB_DATABASE") {
            self.database.name = v;
        }
        if let Ok(v) = env::var("DATABASE_MAX_POOL_SIZE") {
            self.database.max_pool_size = v.parse().unwrap_or(self.database.max_pool_size);
        }
        if let Ok(v) = env::var("DATABASE_CONNECT_TIMEOUT_SECS") {
            self.database.connect_timeout_secs =
                v.parse().unwrap_or(self.database.connect_timeout_secs);
        }

        // API overrides; PORT is the generic deployment convention
        if let Ok(v) = env::var("LMS_API_PORT").or_else(|_| env::var("PORT")) {
            self.api.port = v.parse().unwrap_or(self.api.port);
        }
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }
        if let Ok(v) = env::var("API_ENABLE_CORS") {
            self.api.enable_cors = v.parse().unwrap_or(self.api.enable_cors);
        }

        // Search overrides
        if let Ok(v) = env::var("GOOGLE_API_KEY") {
            self.search.google_api_key = v;
        }
        if let Ok(v) = env::var("GOOGLE_SEARCH_ENGINE_ID") {
            self.search.search_engine_id = v;
        }
        if let Ok(v) = env::var("SEARCH_MAX_PAGES") {
            self.search.max_pages = v.parse().unwrap_or(self.search.max_pages);
        }
        if let Ok(v) = env::var("SEARCH_PAGE_FETCH_TIMEOUT_SECS") {
            self.search.page_fetch_timeout_secs =
                v.parse().unwrap_or(self.search.page_fetch_timeout_secs);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                url: "mongodb://localhost:27017".to_string(),
                name: "lms".to_string(),
                max_pool_size: 10,
                connect_timeout_secs: 2,
            },
            api: ApiConfig {
                port: 3000,
                enable_request_logging: true,
                enable_cors: true,
            },
            search: SearchConfig {
                google_api_key: String::new(),
                search_engine_id: String::new(),
                max_pages: 5,
                page_fetch_timeout_secs: 5,
                relevance_threshold: 2,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                url: "mongodb://localhost:27017".to_string(),
                name: "lms_staging".to_string(),
                max_pool_size: 20,
                connect_timeout_secs: 5,
            },
            api: ApiConfig {
                port: 3000,
                enable_request_logging: true,
                enable_cors: true,
            },
            search: SearchConfig {
                google_api_key: String::new(),
                search_engine_id: String::new(),
                max_pages: 5,
                page_fetch_timeout_secs: 5,
                relevance_threshold: 2,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                url: "mongodb://localhost:27017".to_string(),
                name: "lms".to_string(),
                max_pool_size: 50,
                connect_timeout_secs: 5,
            },
            api: ApiConfig {
                port: 3000,
                enable_request_logging: false,
                enable_cors: true,
            },
            search: SearchConfig {
                google_api_key: String::new(),
                search_engine_id: String::new(),
                max_pages: 5,
                page_fetch_timeout_secs: 8,
                relevance_threshold: 2,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_defaults() {
        let config = AppConfig::development();
        assert_eq!(config.database.name, "lms");
        assert_eq!(config.search.max_pages, 5);
        assert!(config.api.enable_request_logging);
    }

    #[test]
    fn production_defaults() {
        let config = AppConfig::production();
        assert!(!config.api.enable_request_logging);
        assert_eq!(config.api.port, 3000);
    }
}
