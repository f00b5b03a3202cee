use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);
pub const MAX_UPLOAD_BYTES: u64 = 2 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    /// Endpoint root; `/classify` is appended.
    pub base_url: String,
    pub timeout: Duration,
    pub max_upload_bytes: u64,
    pub use_binary_filter: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_upload_bytes: MAX_UPLOAD_BYTES,
            use_binary_filter: true,
        }
    }
}

impl ClassifierConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn classify_url(&self) -> String {
        format!("{}/classify", self.base_url.trim_end_matches('/'))
    }
}
