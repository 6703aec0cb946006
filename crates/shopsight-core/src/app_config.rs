use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Directory holding the per-category CSV exports.
    pub data_dir: PathBuf,
    /// File-name prefix stripped when deriving category labels,
    /// e.g. `"us-shein-"` for `us-shein-kids-wear.csv`.
    pub source_prefix: String,
    pub gemini_api_key: Option<String>,
    pub insights_model: String,
    pub insights_timeout_secs: u64,
    pub insights_max_retries: u32,
    pub insights_retry_backoff_base_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("data_dir", &self.data_dir)
            .field("source_prefix", &self.source_prefix)
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("insights_model", &self.insights_model)
            .field("insights_timeout_secs", &self.insights_timeout_secs)
            .field("insights_max_retries", &self.insights_max_retries)
            .field(
                "insights_retry_backoff_base_ms",
                &self.insights_retry_backoff_base_ms,
            )
            .finish()
    }
}
