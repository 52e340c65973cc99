//! Host configuration from environment variables.

use tracing_subscriber::EnvFilter;

/// Environment-derived configuration for the host binary.
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Tracing filter directive, from `MF_LOG`.
    pub log_filter: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
        }
    }
}

impl HostConfig {
    /// Load configuration from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(filter) = std::env::var("MF_LOG") {
            config.log_filter = filter;
        }
        config
    }

    /// Install the global tracing subscriber for this configuration.
    ///
    /// A second install (e.g. from tests) is a no-op.
    pub fn init_tracing(&self) {
        let filter =
            EnvFilter::try_new(&self.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    }
}
