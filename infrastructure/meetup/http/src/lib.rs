pub mod background_jobs;
pub mod slack;

use std::time::Duration;

use axum::{
    Router,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
    routing::get,
};
use common_errors::AppError;
use meetup_models::Event;
use meetup_queries::{
    DayQuery, KeywordQuery, MonthQuery, SlackQuery, TimeRangeQuery,
};
use meetup_query_handlers::{EventCache, EventList, MeetupQueryHandler};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{instrument, warn};
use utoipa::ToSchema;

use crate::{
    background_jobs::CacheSweeper,
    slack::{LOOKUP_FAILED, SlackResponse, slack_text},
};

pub const PULL_REQUESTS_URL: &str = "https://github.com/memgo/api";
pub const HOME_PATH: &str = "/calendar.json?keyword=memphis+ruby";

#[derive(Clone)]
pub struct MeetupServices {
    pub queries: MeetupQueryHandler,
    pub cache: EventCache,
    pub background_jobs: CacheSweeper,
}

impl MeetupServices {
    pub fn new(
        queries: MeetupQueryHandler, cache: EventCache, sweep_every: Duration,
    ) -> Self {
        Self {
            background_jobs: CacheSweeper::new(cache.clone(), sweep_every),
            queries,
            cache,
        }
    }

    /// Page of the default group, used when no event matches.
    fn group_page(&self) -> String {
        format!("http://www.meetup.com/{}/", self.queries.default_group())
    }
}

pub struct MeetupHandlers;

impl MeetupHandlers {
    pub fn routes() -> Router<MeetupServices> {
        Router::new()
            .route("/", get(home))
            .route("/favicon.ico", get(favicon))
            .route("/health", get(health_check))
            .route("/calendar.json", get(calendar))
            .route("/calendar/day.json", get(calendar_day))
            .route("/calendar/week.json", get(calendar_week))
            .route("/calendar/month.json", get(calendar_month))
            .route("/calendar/range.json", get(calendar_range))
            .route("/slack/meetup", get(slack_meetup))
            .route("/{meetup}", get(meetup_redirect))
    }
}

/// Every meetup endpoint with CORS and request tracing applied.
pub fn router(services: MeetupServices) -> Router {
    layered(MeetupHandlers::routes().with_state(services))
}

/// Allows any origin and traces every request.
pub fn layered(app: Router) -> Router {
    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    query.map(|Query(params)| params).map_err(|rejection| {
        AppError::bad_request_with_details(
            "INVALID_QUERY_PARAMS",
            "Invalid query parameters provided",
            &rejection.body_text(),
        )
    })
}

fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())])
        .into_response()
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CalendarResponse {
    #[serde(rename = "_pull_requests_appreciated")]
    pub pull_requests_appreciated: String,
    #[schema(value_type = Vec<Event>)]
    pub meetups: EventList,
}

#[utoipa::path(
    get,
    path = "/calendar.json",
    params(KeywordQuery),
    responses(
        (status = 200, description = "Upcoming meetups matching the keyword", body = CalendarResponse),
        (status = 400, description = "Invalid query parameters", body = common_errors::ApiErrorResponse),
        (status = 502, description = "Meetup request failed", body = common_errors::ApiErrorResponse)
    ),
    tag = "calendar"
)]
#[instrument(skip_all)]
pub async fn calendar(
    State(services): State<MeetupServices>,
    query: Result<Query<KeywordQuery>, QueryRejection>,
) -> Result<Json<CalendarResponse>, AppError> {
    let query = params(query)?;
    let meetups = services.queries.by_keyword(&query.keyword).await?;

    Ok(Json(CalendarResponse {
        pull_requests_appreciated: PULL_REQUESTS_URL.to_string(),
        meetups,
    }))
}

#[utoipa::path(
    get,
    path = "/calendar/day.json",
    params(DayQuery),
    responses(
        (status = 200, description = "Meetups on the given day", body = Vec<Event>),
        (status = 400, description = "Missing or invalid date", body = common_errors::ApiErrorResponse),
        (status = 502, description = "Meetup request failed", body = common_errors::ApiErrorResponse)
    ),
    tag = "calendar"
)]
#[instrument(skip_all)]
pub async fn calendar_day(
    State(services): State<MeetupServices>,
    query: Result<Query<DayQuery>, QueryRejection>,
) -> Result<Json<EventList>, AppError> {
    let DayQuery { year, month, day } = params(query)?;
    let events = services.queries.by_day(day, month, year).await?;
    Ok(Json(events))
}

#[utoipa::path(
    get,
    path = "/calendar/week.json",
    params(DayQuery),
    responses(
        (status = 200, description = "Meetups in the seven days starting on the given day", body = Vec<Event>),
        (status = 400, description = "Missing or invalid date", body = common_errors::ApiErrorResponse),
        (status = 502, description = "Meetup request failed", body = common_errors::ApiErrorResponse)
    ),
    tag = "calendar"
)]
#[instrument(skip_all)]
pub async fn calendar_week(
    State(services): State<MeetupServices>,
    query: Result<Query<DayQuery>, QueryRejection>,
) -> Result<Json<EventList>, AppError> {
    let DayQuery { year, month, day } = params(query)?;
    let events = services.queries.by_week(day, month, year).await?;
    Ok(Json(events))
}

#[utoipa::path(
    get,
    path = "/calendar/month.json",
    params(MonthQuery),
    responses(
        (status = 200, description = "Meetups in the given month", body = Vec<Event>),
        (status = 400, description = "Missing or invalid date", body = common_errors::ApiErrorResponse),
        (status = 502, description = "Meetup request failed", body = common_errors::ApiErrorResponse)
    ),
    tag = "calendar"
)]
#[instrument(skip_all)]
pub async fn calendar_month(
    State(services): State<MeetupServices>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<EventList>, AppError> {
    let MonthQuery { year, month } = params(query)?;
    let events = services.queries.by_month(month, year).await?;
    Ok(Json(events))
}

#[utoipa::path(
    get,
    path = "/calendar/range.json",
    params(TimeRangeQuery),
    responses(
        (status = 200, description = "Meetups of the given groups in the range", body = Vec<Event>),
        (status = 400, description = "Invalid query parameters", body = common_errors::ApiErrorResponse),
        (status = 502, description = "Meetup request failed", body = common_errors::ApiErrorResponse)
    ),
    tag = "calendar"
)]
#[instrument(skip_all)]
pub async fn calendar_range(
    State(services): State<MeetupServices>,
    query: Result<Query<TimeRangeQuery>, QueryRejection>,
) -> Result<Json<EventList>, AppError> {
    let query = params(query)?;
    let events = services
        .queries
        .by_time_range(&query.timerange, &query.group_list())
        .await?;
    Ok(Json(events))
}

#[utoipa::path(
    get,
    path = "/slack/meetup",
    params(SlackQuery),
    responses(
        (status = 200, description = "Slack outgoing-webhook reply", body = SlackResponse)
    ),
    tag = "slack"
)]
#[instrument(skip_all)]
pub async fn slack_meetup(
    State(services): State<MeetupServices>,
    query: Result<Query<SlackQuery>, QueryRejection>,
) -> Json<SlackResponse> {
    let query = query.map(|Query(query)| query).unwrap_or_default();

    let text = match services.queries.by_keyword(&query.keyword()).await {
        Ok(events) => slack_text(&events, services.queries.timezone()),
        Err(e) => {
            warn!("Slack meetup lookup failed: {}", e);
            LOOKUP_FAILED.to_string()
        }
    };

    Json(SlackResponse { text })
}

#[utoipa::path(
    get,
    path = "/{meetup}",
    params(
        ("meetup" = String, Path, description = "Keyword matched against event names")
    ),
    responses(
        (status = 302, description = "Redirect to the first matching event, or to the group page")
    ),
    tag = "redirect"
)]
#[instrument(skip_all)]
pub async fn meetup_redirect(
    State(services): State<MeetupServices>, Path(meetup): Path<String>,
) -> Response {
    let target = match services.queries.by_keyword(&meetup).await {
        Ok(events) => events
            .first()
            .map(|event| event.event_url.clone())
            .filter(|url| !url.is_empty()),
        Err(e) => {
            warn!("Meetup redirect lookup failed: {}", e);
            None
        }
    };

    found(&target.unwrap_or_else(|| services.group_page()))
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 302, description = "Redirect to the default calendar query")
    ),
    tag = "redirect"
)]
pub async fn home() -> Response { found(HOME_PATH) }

pub async fn favicon() -> StatusCode { StatusCode::NOT_FOUND }

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check successful with cache status", body = String)
    ),
    tag = "health"
)]
pub async fn health_check(
    State(services): State<MeetupServices>,
) -> impl IntoResponse {
    let health_info = format!(
        "OK - Cache: {} entries, TTL {}s",
        services.cache.entry_count(),
        services.cache.ttl().as_secs()
    );

    (StatusCode::OK, health_info)
}
