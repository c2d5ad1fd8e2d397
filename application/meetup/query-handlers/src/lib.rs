use std::{future::Future, sync::Arc};

use chrono_tz::Tz;
use futures::future::try_join_all;
use meetup_cache_keys::{keyword_key, range_key, window_key};
use meetup_client::{EventSource, GroupSelector};
use meetup_errors::MeetupError;
use meetup_models::Event;
use meetup_queries::{
    DEFAULT_TIMEZONE, TimeWindow, filter_by_keyword, filter_by_window,
    normalize_keyword, parse_timezone,
};
use query_cache::{QueryCache, ScopedKey};
use serde::Deserialize;
use tracing::{instrument, warn};

pub const DEFAULT_GROUP_URLNAME: &str = "memphis-technology-user-groups";

pub type EventList = Arc<Vec<Event>>;
pub type EventCache = QueryCache<ScopedKey, EventList>;

#[derive(Debug, Clone, Deserialize)]
pub struct FacadeConfig {
    #[serde(default = "timezone_default")]
    pub timezone: String,
    /// Numeric group id used for keyword lookups; falls back to the
    /// url-name when empty.
    #[serde(default)]
    pub default_group_id: String,
    #[serde(default = "group_urlname_default")]
    pub default_group_urlname: String,
}

fn timezone_default() -> String { DEFAULT_TIMEZONE.into() }
fn group_urlname_default() -> String { DEFAULT_GROUP_URLNAME.into() }

impl Default for FacadeConfig {
    fn default() -> Self {
        Self {
            timezone: timezone_default(),
            default_group_id: String::new(),
            default_group_urlname: group_urlname_default(),
        }
    }
}

#[derive(Clone)]
pub struct MeetupQueryHandler {
    source: Arc<dyn EventSource>,
    cache: EventCache,
    timezone: Tz,
    keyword_group: GroupSelector,
    default_group: String,
}

impl MeetupQueryHandler {
    pub fn new(
        source: Arc<dyn EventSource>, cache: EventCache, config: &FacadeConfig,
    ) -> Result<Self, MeetupError> {
        let timezone = parse_timezone(&config.timezone)?;
        let keyword_group = if config.default_group_id.trim().is_empty() {
            GroupSelector::UrlName(config.default_group_urlname.clone())
        }
        else {
            GroupSelector::Id(config.default_group_id.trim().to_string())
        };

        Ok(Self {
            source,
            cache,
            timezone,
            keyword_group,
            default_group: config.default_group_urlname.clone(),
        })
    }

    pub fn timezone(&self) -> Tz { self.timezone }

    pub fn default_group(&self) -> &str { &self.default_group }

    /// Upcoming events of the default group whose name contains `keyword`.
    #[instrument(skip(self))]
    pub async fn by_keyword(
        &self, keyword: &str,
    ) -> Result<EventList, MeetupError> {
        let keyword = normalize_keyword(keyword);

        self.cached(keyword_key(&keyword), async {
            let events =
                self.source.fetch_events(&self.keyword_group, None).await?;
            Ok(Arc::new(filter_by_keyword(&events, &keyword)))
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn by_day(
        &self, day: u32, month: u32, year: i32,
    ) -> Result<EventList, MeetupError> {
        let window = TimeWindow::day(self.timezone, day, month, year)?;
        self.by_window(window).await
    }

    #[instrument(skip(self))]
    pub async fn by_week(
        &self, day: u32, month: u32, year: i32,
    ) -> Result<EventList, MeetupError> {
        let window = TimeWindow::week(self.timezone, day, month, year)?;
        self.by_window(window).await
    }

    #[instrument(skip(self))]
    pub async fn by_month(
        &self, month: u32, year: i32,
    ) -> Result<EventList, MeetupError> {
        let window = TimeWindow::month(self.timezone, month, year)?;
        self.by_window(window).await
    }

    /// Events of every group in `groups` for a raw upstream range.
    ///
    /// Groups are de-duplicated and fetched concurrently; results are
    /// concatenated in sorted group order. No groups means the default
    /// group.
    #[instrument(skip(self))]
    pub async fn by_time_range(
        &self, timerange: &str, groups: &[String],
    ) -> Result<EventList, MeetupError> {
        let mut groups: Vec<String> = groups
            .iter()
            .map(|group| group.trim())
            .filter(|group| !group.is_empty())
            .map(str::to_owned)
            .collect();
        if groups.is_empty() {
            groups.push(self.default_group.clone());
        }
        groups.sort();
        groups.dedup();

        self.cached(range_key(timerange, &groups), async {
            let selectors: Vec<GroupSelector> =
                groups.iter().cloned().map(GroupSelector::UrlName).collect();
            let per_group = try_join_all(
                selectors
                    .iter()
                    .map(|selector| {
                        self.source.fetch_events(selector, Some(timerange))
                    }),
            )
            .await?;

            Ok(Arc::new(per_group.into_iter().flatten().collect()))
        })
        .await
    }

    async fn by_window(
        &self, window: TimeWindow,
    ) -> Result<EventList, MeetupError> {
        self.cached(window_key(&window), async {
            let selector = GroupSelector::UrlName(self.default_group.clone());
            let timeframe = window.to_upstream();
            let events = self
                .source
                .fetch_events(&selector, Some(timeframe.as_str()))
                .await?;
            Ok(Arc::new(filter_by_window(&events, &window)))
        })
        .await
    }

    async fn cached(
        &self, key: ScopedKey,
        fetch: impl Future<Output = Result<EventList, MeetupError>>,
    ) -> Result<EventList, MeetupError> {
        self.cache
            .get_or_try_fetch(key.clone(), fetch)
            .await
            .map_err(MeetupError::from)
            .inspect_err(|err| {
                warn!(key = %key, error = %err, "upstream fetch failed");
            })
    }
}
