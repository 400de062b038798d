use crate::backend::DatabaseType;

/// Connection settings handed to `Backend::connect`
#[derive(Debug, Clone)]
pub struct DatabaseBackendConfig {
    pub database_type: DatabaseType,

    /// `postgresql://…`, `sqlite:./users.db`, `:memory:` or `mongodb://…`
    pub connection_url: String,

    pub max_connections: u32,

    /// Pool acquire / server selection timeout, in seconds
    pub connection_timeout: u64,

    /// Database name for MongoDB when the URL does not name one
    pub database_name: String,
}

impl DatabaseBackendConfig {
    pub fn new(database_type: DatabaseType, connection_url: String) -> Self {
        Self {
            database_type,
            connection_url,
            max_connections: 10,
            connection_timeout: 30,
            database_name: "user_crud".to_string(),
        }
    }

    pub fn postgres(connection_url: String) -> Self {
        Self::new(DatabaseType::PostgreSQL, connection_url)
    }

    pub fn sqlite(connection_url: String) -> Self {
        Self::new(DatabaseType::SQLite, connection_url)
    }

    pub fn mongodb(connection_url: String) -> Self {
        Self::new(DatabaseType::MongoDB, connection_url)
    }

    /// Create an in-memory SQLite configuration for development and testing
    pub fn memory_sqlite() -> Self {
        Self::new(DatabaseType::SQLite, ":memory:".to_string()).with_max_connections(1)
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    pub fn with_connection_timeout(mut self, timeout_seconds: u64) -> Self {
        self.connection_timeout = timeout_seconds;
        self
    }

    pub fn with_database_name(mut self, database_name: String) -> Self {
        self.database_name = database_name;
        self
    }

    /// In-memory SQLite lives inside a single connection
    pub fn is_memory_database(&self) -> bool {
        self.connection_url == ":memory:" || self.connection_url == "sqlite::memory:"
    }

    /// Reject settings no backend could connect with.
    ///
    /// The URL scheme must agree with the selected backend, which catches an
    /// explicit `type` that contradicts `url`.
    pub fn validate(&self) -> Result<(), String> {
        if self.connection_url.trim().is_empty() {
            return Err("Connection URL cannot be empty".to_string());
        }
        if self.max_connections == 0 {
            return Err("Max connections must be greater than 0".to_string());
        }

        match DatabaseType::from_url(&self.connection_url) {
            Some(inferred) if inferred == self.database_type => {}
            _ => {
                return Err(format!(
                    "Connection URL does not look like a {} URL",
                    self.database_type.as_str()
                ))
            }
        }

        if self.database_type == DatabaseType::MongoDB && self.database_name.trim().is_empty() {
            return Err("MongoDB database name cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Default for DatabaseBackendConfig {
    fn default() -> Self {
        Self::memory_sqlite()
    }
}
