use thiserror::Error;

/// Errors raised by a [`crate::storage::KeyValueStore`] or the snapshot writer.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Snapshot writer has shut down")]
    Closed,
}

impl StoreError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            StoreError::Io(e) => format!("File system error: {}", e),
            StoreError::Serialization(e) => format!("Stored data is corrupt: {}", e),
            StoreError::Closed => "Storage is no longer accepting writes".to_string(),
        }
    }
}

/// Errors raised while resolving the effective configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine home directory")]
    NoHomeDirectory,

    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    pub fn user_message(&self) -> String {
        match self {
            ConfigError::NoHomeDirectory => {
                "Could not determine a data directory; pass --data-dir".to_string()
            }
            ConfigError::Io { path, source } => format!("Cannot read {}: {}", path, source),
            ConfigError::Parse { path, source } => {
                format!("Config file {} is not valid JSON: {}", path, source)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_user_message() {
        let err = StoreError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        assert!(err.user_message().contains("disk full"));
        assert!(StoreError::Closed.user_message().contains("no longer"));
    }

    #[test]
    fn test_config_error_user_message() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ConfigError::Parse { path: "config.json".to_string(), source };
        assert!(err.user_message().contains("config.json"));
        assert!(ConfigError::NoHomeDirectory.user_message().contains("--data-dir"));
    }
}
