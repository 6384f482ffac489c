use std::env;

/// Settings for the tracing subscriber.
///
/// - `LOG_LEVEL`: level for the application crates (default: `info`)
/// - `LOG_DIR`: directory for the rolling JSON log (default: `storage/logs`);
///   set it to an empty string to log to the console only
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub file_dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_dir: Some("storage/logs".to_string()),
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            level: env::var("LOG_LEVEL").unwrap_or(defaults.level),
            file_dir: match env::var("LOG_DIR") {
                Ok(dir) if dir.trim().is_empty() => None,
                Ok(dir) => Some(dir),
                Err(_) => defaults.file_dir,
            },
        }
    }
}
