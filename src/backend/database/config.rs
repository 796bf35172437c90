use std::time::Duration;

/// Connection settings for the SQLite backend
#[derive(Debug, Clone)]
pub struct DatabaseBackendConfig {
    /// Connection URL, e.g. "sqlite:./school.db" or "sqlite::memory:"
    pub connection_url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Pool acquire timeout in seconds
    pub connection_timeout: u64,
}

impl DatabaseBackendConfig {
    pub fn new(connection_url: String) -> Self {
        Self {
            connection_url,
            max_connections: 5,
            connection_timeout: 30,
        }
    }

    /// In-memory database used by default and in tests
    pub fn memory_sqlite() -> Self {
        Self::new("sqlite::memory:".to_string())
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    pub fn with_connection_timeout(mut self, timeout_seconds: u64) -> Self {
        self.connection_timeout = timeout_seconds;
        self
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.connection_timeout)
    }

    /// Each in-memory connection would open its own empty database, so the
    /// pool must be pinned to a single long-lived connection.
    pub fn is_memory_database(&self) -> bool {
        self.connection_url == ":memory:" || self.connection_url.contains(":memory:")
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.connection_url.is_empty() {
            return Err("Connection URL cannot be empty".to_string());
        }

        if self.max_connections == 0 {
            return Err("Max connections must be greater than 0".to_string());
        }

        if !self.connection_url.starts_with("sqlite:")
            && self.connection_url != ":memory:"
            && !self.connection_url.ends_with(".db")
            && !self.connection_url.ends_with(".sqlite")
        {
            return Err("SQLite connection URL must start with 'sqlite:', be ':memory:', or end with '.db' or '.sqlite'".to_string());
        }

        Ok(())
    }
}

impl Default for DatabaseBackendConfig {
    fn default() -> Self {
        Self::memory_sqlite()
    }
}
