use meetup_client::UpstreamConfig;
use meetup_query_handlers::FacadeConfig;
use query_cache::MemoryConfig;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "host_default")]
    pub host: String,
    #[serde(default = "port_default")]
    pub port: u16,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub facade: FacadeConfig,
    #[serde(default)]
    pub cache: MemoryConfig,
}

fn host_default() -> String { "0.0.0.0".into() }
fn port_default() -> u16 { 8080 }

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: host_default(),
            port: port_default(),
            upstream: UpstreamConfig::default(),
            facade: FacadeConfig::default(),
            cache: MemoryConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self { Self::from_lookup(|key| std::env::var(key).ok()) }

    /// Builds the configuration from `lookup`, keeping the default for any
    /// variable that is unset, blank or unparseable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(host) = env_var(&lookup, &["API_HOST", "HOST"]) {
            config.host = host;
        }
        config.port = env_var(&lookup, &["API_PORT", "PORT"])
            .and_then(|port| port.parse().ok())
            .unwrap_or(config.port);

        let upstream = &mut config.upstream;
        if let Some(base_url) = env_var(&lookup, &["MEETUP_BASE_URL"]) {
            upstream.base_url = base_url;
        }
        if let Some(api_key) = env_var(&lookup, &["MEETUP_API_KEY"]) {
            upstream.api_key = api_key;
        }
        upstream.timeout_secs =
            env_u64_or(&lookup, "MEETUP_TIMEOUT_SECS", upstream.timeout_secs);
        upstream.max_pages =
            env_u64_or(&lookup, "MEETUP_MAX_PAGES", upstream.max_pages as u64)
                as usize;

        let facade = &mut config.facade;
        if let Some(group_id) = env_var(&lookup, &["MEETUP_GROUP_ID"]) {
            facade.default_group_id = group_id;
        }
        if let Some(urlname) = env_var(&lookup, &["MEETUP_GROUP_URLNAME"]) {
            facade.default_group_urlname = urlname;
        }
        if let Some(timezone) = env_var(&lookup, &["CALENDAR_TIMEZONE"]) {
            facade.timezone = timezone;
        }

        let cache = &mut config.cache;
        cache.ttl_secs = env_u64_or(&lookup, "CACHE_TTL_SECS", cache.ttl_secs);
        cache.sweep_interval_secs =
            env_u64_or(&lookup, "CACHE_SWEEP_SECS", cache.sweep_interval_secs);
        cache.capacity = env_u64_or(&lookup, "CACHE_CAPACITY", cache.capacity);

        config
    }

    pub fn bind_addr(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// First non-blank value among `keys`.
fn env_var(
    lookup: &impl Fn(&str) -> Option<String>, keys: &[&str],
) -> Option<String> {
    keys.iter()
        .filter_map(|key| lookup(*key))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

fn env_u64_or(
    lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64,
) -> u64 {
    env_var(lookup, &[key])
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}
