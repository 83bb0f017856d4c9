//! Server configuration from the environment

use std::env;

const DEFAULT_LOG_FILTER: &str = "info";
const DEFAULT_MAX_BATCH: usize = 100_000;
const DEFAULT_MAX_LINE_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// `tracing_subscriber::EnvFilter` directive
    pub log_filter: String,
    /// Most values accepted by one `units/convert` request
    pub max_batch: usize,
    /// Longest request line read before deserializing; bounds memory per request
    pub max_line_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            max_batch: DEFAULT_MAX_BATCH,
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
        }
    }
}

/// A variable that was set but could not be used, with its raw value
pub type Rejected = (&'static str, String);

impl ServerConfig {
    /// Read `RIVER_UNITS_LOG` (or `RUST_LOG`), `RIVER_UNITS_MAX_BATCH` and
    /// `RIVER_UNITS_MAX_LINE`.
    ///
    /// Logging is not up yet, so unusable values come back to the caller.
    pub fn from_env() -> (Self, Vec<Rejected>) {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> (Self, Vec<Rejected>) {
        let mut rejected = Vec::new();

        let log_filter = lookup("RIVER_UNITS_LOG")
            .or_else(|| lookup("RUST_LOG"))
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        let mut positive = |key: &'static str, default: usize| -> usize {
            let Some(raw) = lookup(key) else {
                return default;
            };
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    rejected.push((key, raw));
                    default
                }
            }
        };

        let max_batch = positive("RIVER_UNITS_MAX_BATCH", DEFAULT_MAX_BATCH);
        let max_line_bytes = positive("RIVER_UNITS_MAX_LINE", DEFAULT_MAX_LINE_BYTES);

        (ServerConfig { log_filter, max_batch, max_line_bytes }, rejected)
    }
}
