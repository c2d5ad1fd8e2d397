pub mod config;

use std::{collections::HashSet, fmt};

use async_trait::async_trait;
use meetup_errors::MeetupError;
use meetup_models::{Event, Page};
use tracing::{debug, instrument};
use url::Url;

pub use crate::config::UpstreamConfig;

/// Which group a listing is scoped to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GroupSelector {
    Id(String),
    UrlName(String),
}

impl GroupSelector {
    fn query_pair(&self) -> (&'static str, &str) {
        match self {
            Self::Id(id) => ("group_id", id.as_str()),
            Self::UrlName(urlname) => ("group_urlname", urlname.as_str()),
        }
    }
}

impl fmt::Display for GroupSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, value) = self.query_pair();
        write!(f, "{name}={value}")
    }
}

/// A source of upstream events.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Every event of `selector`'s group, across all pages, in upstream
    /// order.
    ///
    /// `window` is an upstream `time` filter (`"start_ms,end_ms"` or a
    /// relative shorthand). Without one the upstream default listing is
    /// returned.
    async fn fetch_events(
        &self, selector: &GroupSelector, window: Option<&str>,
    ) -> Result<Vec<Event>, MeetupError>;
}

#[derive(Clone)]
pub struct MeetupClient {
    http: reqwest::Client,
    config: UpstreamConfig,
}

impl MeetupClient {
    pub fn new(config: UpstreamConfig) -> Result<Self, MeetupError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("memgo/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(MeetupError::HttpClient)?;

        Ok(Self { http, config })
    }

    fn first_page_url(
        &self, selector: &GroupSelector, window: Option<&str>,
    ) -> Result<Url, MeetupError> {
        let raw = format!("{}/2/events", self.config.base_url.trim_end_matches('/'));
        let mut url = Url::parse(&raw).map_err(|source| {
            MeetupError::InvalidUrl {
                url: raw.clone(),
                source,
            }
        })?;

        {
            let (name, value) = selector.query_pair();
            let mut query = url.query_pairs_mut();
            query.append_pair(name, value);
            query.append_pair("key", &self.config.api_key);
            if let Some(window) = window {
                query.append_pair("time", window);
                query.append_pair("status", "upcoming,past");
            }
        }

        Ok(url)
    }

    async fn fetch_page(&self, url: &str) -> Result<Page, MeetupError> {
        let response = self.http.get(url).send().await.map_err(|source| {
            MeetupError::Upstream {
                url: redact(url),
                source: source.without_url(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MeetupError::UpstreamStatus {
                url: redact(url),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| {
            MeetupError::Upstream {
                url: redact(url),
                source: source.without_url(),
            }
        })?;

        serde_json::from_slice(&body).map_err(|source| MeetupError::Decode {
            url: redact(url),
            source,
        })
    }
}

#[async_trait]
impl EventSource for MeetupClient {
    #[instrument(skip(self, selector), fields(group = %selector))]
    async fn fetch_events(
        &self, selector: &GroupSelector, window: Option<&str>,
    ) -> Result<Vec<Event>, MeetupError> {
        let mut next = Some(self.first_page_url(selector, window)?.to_string());
        let mut visited = HashSet::new();
        let mut events = Vec::new();

        while let Some(url) = next.take() {
            if visited.len() >= self.config.max_pages() {
                return Err(MeetupError::PaginationLimit {
                    max_pages: self.config.max_pages(),
                });
            }
            if !visited.insert(url.clone()) {
                return Err(MeetupError::CursorLoop { url: redact(&url) });
            }

            let page = self.fetch_page(&url).await?;
            debug!(
                page = visited.len(),
                results = page.results.len(),
                total = page.meta.total_count,
                "fetched upstream page"
            );

            next = page.meta.next_url().map(str::to_owned);
            events.extend(page.results);
        }

        Ok(events)
    }
}

/// `url` with the API key masked, safe for logs and error messages.
pub fn redact(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return "<unparseable url>".to_string();
    };

    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(name, value)| {
            let value = if name == "key" { "***".into() } else { value.into_owned() };
            (name.into_owned(), value)
        })
        .collect();

    if !pairs.is_empty() {
        parsed.query_pairs_mut().clear().extend_pairs(pairs);
    }

    parsed.to_string()
}
