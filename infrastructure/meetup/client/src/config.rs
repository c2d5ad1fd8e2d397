use std::time::Duration;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "base_url_default")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "timeout_secs_default")]
    pub timeout_secs: u64,
    /// Upper bound on pages followed for a single listing.
    #[serde(default = "max_pages_default")]
    pub max_pages: usize,
}

fn base_url_default() -> String { "https://api.meetup.com".into() }
fn timeout_secs_default() -> u64 { 10 }
fn max_pages_default() -> usize { 50 }

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: base_url_default(),
            api_key: String::new(),
            timeout_secs: timeout_secs_default(),
            max_pages: max_pages_default(),
        }
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration { Duration::from_secs(self.timeout_secs) }

    /// Page limit, never below one so a listing can always be fetched.
    pub fn max_pages(&self) -> usize { self.max_pages.max(1) }
}
