//! # Store Configuration
//!
//! Where the product database lives and how its pool is sized.
//!
//! Configuration is built in code ([`DbConfig::new`], [`DbConfig::in_memory`])
//! or loaded from environment variables with fallback to defaults
//! ([`DbConfig::from_env`]).
//!
//! ## Environment Variables
//! | Variable                        | Default                               |
//! |---------------------------------|---------------------------------------|
//! | `SHOPFRONT_DB_PATH`             | platform data dir / `ecommerce_db.sqlite` |
//! | `SHOPFRONT_DB_MAX_CONNECTIONS`  | `5`                                   |
//! | `SHOPFRONT_DB_BUSY_TIMEOUT_MS`  | `5000`                                |

use directories::ProjectDirs;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Fixed database name; the file is `<DB_NAME>.sqlite`.
pub const DB_NAME: &str = "ecommerce_db";

/// Path SQLite treats as a private in-memory database.
const IN_MEMORY_PATH: &str = ":memory:";

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/path/to/ecommerce_db.sqlite")
///     .max_connections(5)
///     .busy_timeout(Duration::from_secs(2));
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// How long to wait for a pooled connection.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection. `None` never reaps.
    /// Default: 10 minutes
    pub idle_timeout: Option<Duration>,

    /// How long SQLite waits on a locked database before failing a statement.
    /// Default: 5 seconds
    pub busy_timeout: Duration,
}

impl DbConfig {
    /// Creates a new database configuration with the given path.
    ///
    /// ## Arguments
    /// * `path` - Path to the SQLite database file. Created on first open.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)),
            busy_timeout: Duration::from_secs(5),
        }
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// Every connection to `:memory:` is a separate database, so the pool is
    /// pinned to exactly one connection that is never reaped.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(IN_MEMORY_PATH),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: None,
            busy_timeout: Duration::from_secs(5),
        }
    }

    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = match env::var("SHOPFRONT_DB_PATH") {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => default_database_path()?,
        };

        let mut config = DbConfig::new(path);

        if let Ok(value) = env::var("SHOPFRONT_DB_MAX_CONNECTIONS") {
            let max: u32 = value
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SHOPFRONT_DB_MAX_CONNECTIONS".to_string()))?;
            if max == 0 {
                return Err(ConfigError::InvalidValue(
                    "SHOPFRONT_DB_MAX_CONNECTIONS".to_string(),
                ));
            }
            config = config.max_connections(max);
        }

        if let Ok(value) = env::var("SHOPFRONT_DB_BUSY_TIMEOUT_MS") {
            let millis: u64 = value
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SHOPFRONT_DB_BUSY_TIMEOUT_MS".to_string()))?;
            config = config.busy_timeout(Duration::from_millis(millis));
        }

        Ok(config)
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self.min_connections = self.min_connections.min(max);
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the pool acquire timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the SQLite busy timeout.
    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Returns `true` for a `:memory:` database.
    pub fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == IN_MEMORY_PATH
    }
}

/// Determines the default database file path.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.shopfront.catalog/ecommerce_db.sqlite`
/// - **Windows**: `%APPDATA%\shopfront\catalog\data\ecommerce_db.sqlite`
/// - **Linux**: `~/.local/share/catalog/ecommerce_db.sqlite`
///
/// The directory itself is created on open, not here.
pub fn default_database_path() -> Result<PathBuf, ConfigError> {
    let dirs = ProjectDirs::from("com", "shopfront", "catalog").ok_or(ConfigError::NoDataDir)?;
    Ok(dirs.data_dir().join(format!("{}.sqlite", DB_NAME)))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Could not determine the platform data directory")]
    NoDataDir,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = DbConfig::new("/tmp/test.sqlite")
            .max_connections(10)
            .min_connections(2)
            .busy_timeout(Duration::from_millis(250));

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert_eq!(config.busy_timeout, Duration::from_millis(250));
        assert!(!config.is_in_memory());
    }

    #[test]
    fn test_max_connections_caps_min() {
        let config = DbConfig::new("/tmp/test.sqlite").min_connections(4).max_connections(2);
        assert_eq!(config.min_connections, 2);
    }

    #[test]
    fn test_in_memory_config() {
        let config = DbConfig::in_memory();
        assert!(config.is_in_memory());
        assert_eq!(config.max_connections, 1);
        assert_eq!(config.idle_timeout, None);
    }

    #[test]
    fn test_default_path_uses_fixed_name() {
        if let Ok(path) = default_database_path() {
            assert_eq!(path.file_name().unwrap(), "ecommerce_db.sqlite");
        }
    }
}
