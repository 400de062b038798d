use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::backend::database::DatabaseBackendConfig;
use crate::backend::DatabaseType;
use crate::error::{AppError, AppResult};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
    #[serde(default)]
    pub environment: Environment,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Route prefix for the user collection, e.g. `/users` or `/api/users`
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BackendConfig {
    /// Explicit backend type; inferred from the URL scheme when omitted
    #[serde(rename = "type", default)]
    pub db_type: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Pool acquire / server selection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,
    /// Database name for document stores (ignored by SQL backends)
    #[serde(default = "default_database_name")]
    pub database_name: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PaginationConfig {
    #[serde(default = "default_limit")]
    pub default_limit: i64,
    #[serde(default = "default_max_limit")]
    pub max_limit: i64,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "development" | "dev" | "local" => Some(Environment::Development),
            "production" | "prod" => Some(Environment::Production),
            _ => None,
        }
    }

    /// Read `APP_ENV` from the process environment, defaulting to development
    pub fn from_env() -> Self {
        std::env::var("APP_ENV")
            .ok()
            .and_then(|v| Self::parse(&v))
            .unwrap_or_default()
    }

    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    2070
}

fn default_api_prefix() -> String {
    "/users".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_connection_timeout() -> u64 {
    30
}

fn default_database_name() -> String {
    "user_crud".to_string()
}

fn default_limit() -> i64 {
    100
}

fn default_max_limit() -> i64 {
    1000
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            db_type: None,
            url: None,
            max_connections: default_max_connections(),
            connection_timeout: default_connection_timeout(),
            database_name: default_database_name(),
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

impl AppConfig {
    /// Load configuration from YAML file
    pub fn load_from_file<P: AsRef<Path>>(config_path: P) -> Result<Self, String> {
        let path = config_path.as_ref();

        if !path.exists() {
            return Err(format!("Configuration file not found: {}", path.display()));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {}", path.display(), e))?;

        // Expand environment variables in YAML content
        let expanded_content = Self::expand_env_vars(&content)?;

        serde_yaml::from_str(&expanded_content)
            .map_err(|e| format!("Failed to parse config file {}: {}", path.display(), e))
    }

    /// Built-in configuration used when no config file is present
    pub fn default_config() -> Self {
        AppConfig {
            server: ServerConfig {
                host: default_host(),
                port: default_port(),
                api_prefix: default_api_prefix(),
            },
            backend: BackendConfig::default(),
            pagination: PaginationConfig::default(),
            environment: Environment::Development,
        }
    }

    /// Apply `APP_ENV`, `HOST`, `PORT`, `DATABASE_URL`, `MONGODB_URI`,
    /// `DATABASE_NAME` and `API_PREFIX` on top of the loaded configuration.
    ///
    /// `lookup` abstracts the process environment so tests can inject values.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), String>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(env) = lookup("APP_ENV") {
            self.environment = Environment::parse(&env)
                .ok_or_else(|| format!("Unknown APP_ENV value: {}", env))?;
        }
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| format!("PORT must be a valid port number, got: {}", port))?;
        }
        if let Some(url) = lookup("DATABASE_URL").or_else(|| lookup("MONGODB_URI")) {
            self.backend.url = Some(url);
        }
        if let Some(name) = lookup("DATABASE_NAME") {
            self.backend.database_name = name;
        }
        if let Some(prefix) = lookup("API_PREFIX") {
            self.server.api_prefix = prefix;
        }
        Ok(())
    }

    /// Check cross-field constraints after all overrides are applied
    pub fn validate(&self) -> AppResult<()> {
        if crate::utils::normalize_prefix(&self.server.api_prefix) == "/" {
            return Err(AppError::Configuration(
                "api_prefix must not be the root path".to_string(),
            ));
        }
        if self.pagination.max_limit < 1 {
            return Err(AppError::Configuration(
                "pagination.max_limit must be at least 1".to_string(),
            ));
        }
        if self.pagination.default_limit < 1
            || self.pagination.default_limit > self.pagination.max_limit
        {
            return Err(AppError::Configuration(format!(
                "pagination.default_limit must be between 1 and {}",
                self.pagination.max_limit
            )));
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }

    /// Whether 500 responses may carry the underlying error text
    pub fn expose_error_details(&self) -> bool {
        !self.is_production()
    }

    /// Resolve the backend connection settings.
    ///
    /// Without a connection string, development falls back to in-memory
    /// SQLite while production refuses to start.
    pub fn backend_config(&self) -> AppResult<DatabaseBackendConfig> {
        let url = match &self.backend.url {
            Some(url) if !url.trim().is_empty() => url.trim().to_string(),
            _ if self.is_production() => {
                return Err(AppError::Configuration(
                    "DATABASE_URL is not defined in environment variables".to_string(),
                ))
            }
            _ => return Ok(DatabaseBackendConfig::memory_sqlite()),
        };

        let database_type = match &self.backend.db_type {
            Some(name) => DatabaseType::from_name(name).ok_or_else(|| {
                AppError::Configuration(format!("Unsupported database type: {}", name))
            })?,
            None => DatabaseType::from_url(&url).ok_or_else(|| {
                AppError::Configuration(format!(
                    "Cannot infer database type from connection URL scheme: {}",
                    url.split("://").next().unwrap_or_default()
                ))
            })?,
        };

        let config = DatabaseBackendConfig::new(database_type, url)
            .with_max_connections(self.backend.max_connections)
            .with_connection_timeout(self.backend.connection_timeout)
            .with_database_name(self.backend.database_name.clone());

        config.validate().map_err(AppError::Configuration)?;
        Ok(config)
    }

    /// Expand environment variables in format ${VAR_NAME} or ${VAR_NAME:-default}
    fn expand_env_vars(content: &str) -> Result<String, String> {
        let chars: Vec<char> = content.chars().collect();
        let mut expanded = String::new();
        let mut i = 0;

        while i < chars.len() {
            if i + 1 < chars.len() && chars[i] == '$' && chars[i + 1] == '{' {
                // Find the closing brace
                let mut j = i + 2;
                while j < chars.len() && chars[j] != '}' {
                    j += 1;
                }

                if j < chars.len() {
                    let var_expr: String = chars[i + 2..j].iter().collect();

                    let (var_name, default_value) = match var_expr.find(":-") {
                        Some(pos) => (
                            var_expr[..pos].to_string(),
                            Some(var_expr[pos + 2..].to_string()),
                        ),
                        None => (var_expr, None),
                    };

                    let value = match std::env::var(&var_name) {
                        Ok(val) => val,
                        Err(_) => default_value.ok_or_else(|| {
                            format!(
                                "Environment variable {} not found and no default provided",
                                var_name
                            )
                        })?,
                    };

                    expanded.push_str(&value);
                    i = j + 1;
                } else {
                    expanded.push(chars[i]);
                    i += 1;
                }
            } else {
                expanded.push(chars[i]);
                i += 1;
            }
        }

        Ok(expanded)
    }
}
