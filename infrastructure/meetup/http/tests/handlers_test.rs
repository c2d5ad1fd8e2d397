use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
    response::Response,
    routing::Router,
};
use meetup_client::{EventSource, GroupSelector};
use meetup_errors::MeetupError;
use meetup_http::{MeetupServices, router};
use meetup_models::{Event, Venue};
use meetup_query_handlers::{EventCache, FacadeConfig, MeetupQueryHandler};
use query_cache::MemoryConfig;
use serde_json::Value;
use tower::ServiceExt;

struct StaticSource {
    events: Vec<Event>,
    failing: AtomicBool,
}

#[async_trait]
impl EventSource for StaticSource {
    async fn fetch_events(
        &self, _selector: &GroupSelector, _window: Option<&str>,
    ) -> Result<Vec<Event>, MeetupError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(MeetupError::UpstreamStatus {
                url: "https://api.meetup.com/2/events?key=***".into(),
                status: 500,
            });
        }
        Ok(self.events.clone())
    }
}

fn events() -> Vec<Event> {
    vec![
        Event::builder()
            .id("1")
            .name("Memphis Ruby Users Group")
            .time(1_710_527_400_000)
            .venue(Venue::builder().name("Start Co.").build())
            .event_url("https://www.meetup.com/memphis-ruby/events/1/")
            .build(),
        Event::builder()
            .id("2")
            .name("Memphis Go")
            .time(1_710_600_000_000)
            .event_url("https://www.meetup.com/memphis-go/events/2/")
            .build(),
    ]
}

fn setup_test_app(failing: bool) -> anyhow::Result<Router> {
    let source = Arc::new(StaticSource {
        events: events(),
        failing: AtomicBool::new(failing),
    });
    let cache = EventCache::new(&MemoryConfig::default());
    let queries =
        MeetupQueryHandler::new(source, cache.clone(), &FacadeConfig::default())?;

    Ok(router(MeetupServices::new(
        queries,
        cache,
        Duration::from_secs(30),
    )))
}

async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::ORIGIN, "https://memphis.technology")
        .body(Body::empty())
        .unwrap();

    app.oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn location(response: &Response) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

#[tokio::test]
async fn test_calendar_envelope() {
    let app = setup_test_app(false).unwrap();

    let response = get(app, "/calendar.json?keyword=ruby").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );

    let body = json_body(response).await;
    assert_eq!(
        body["_pull_requests_appreciated"],
        "https://github.com/memgo/api"
    );
    assert_eq!(body["meetups"].as_array().unwrap().len(), 1);
    assert_eq!(body["meetups"][0]["name"], "Memphis Ruby Users Group");
}

#[tokio::test]
async fn test_calendar_without_keyword_lists_everything() {
    let app = setup_test_app(false).unwrap();

    let body = json_body(get(app, "/calendar.json").await).await;

    assert_eq!(body["meetups"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_calendar_day() {
    let app = setup_test_app(false).unwrap();

    let response = get(app, "/calendar/day.json?year=2024&month=3&day=15").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], "1");
}

#[tokio::test]
async fn test_calendar_range_defaults_group() {
    let app = setup_test_app(false).unwrap();

    let response = get(app, "/calendar/range.json?timerange=-1w,1w").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_non_numeric_params_are_bad_request() {
    let app = setup_test_app(false).unwrap();

    let response = get(app, "/calendar/week.json?year=2024&month=march&day=1").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "INVALID_QUERY_PARAMS");
}

#[tokio::test]
async fn test_missing_params_are_bad_request() {
    let app = setup_test_app(false).unwrap();

    let response = get(app, "/calendar/month.json?year=2024").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_date_is_bad_request() {
    let app = setup_test_app(false).unwrap();

    let response = get(app, "/calendar/day.json?year=2024&month=2&day=30").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "INVALID_DATE");
}

#[tokio::test]
async fn test_upstream_failure_is_bad_gateway() {
    let app = setup_test_app(true).unwrap();

    let response = get(app, "/calendar.json?keyword=ruby").await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "UPSTREAM_ERROR");
}

#[tokio::test]
async fn test_slack_strips_trigger_word() {
    let app = setup_test_app(false).unwrap();

    let response =
        get(app, "/slack/meetup?text=!meetup%20go&trigger_word=!meetup").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(
        body["text"],
        "Memphis Go | Mar 16, 2024 at 9:40am (CDT) @ TBD | \
         https://www.meetup.com/memphis-go/events/2/"
    );
}

#[tokio::test]
async fn test_slack_no_match() {
    let app = setup_test_app(false).unwrap();

    let body = json_body(get(app, "/slack/meetup?text=haskell").await).await;

    assert_eq!(body["text"], "No matching meetup found.");
}

#[tokio::test]
async fn test_slack_upstream_failure_still_answers() {
    let app = setup_test_app(true).unwrap();

    let response = get(app, "/slack/meetup?text=ruby").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["text"], "Meetup lookup failed, try again later.");
}

#[tokio::test]
async fn test_redirect_to_matching_event() {
    let app = setup_test_app(false).unwrap();

    let response = get(app, "/ruby").await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        location(&response),
        "https://www.meetup.com/memphis-ruby/events/1/"
    );
}

#[tokio::test]
async fn test_redirect_falls_back_to_group_page() {
    let app = setup_test_app(false).unwrap();

    let response = get(app, "/elixir").await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        location(&response),
        "http://www.meetup.com/memphis-technology-user-groups/"
    );
}

#[tokio::test]
async fn test_home_and_favicon() {
    let app = setup_test_app(false).unwrap();

    let home = get(app.clone(), "/").await;
    assert_eq!(home.status(), StatusCode::FOUND);
    assert_eq!(location(&home), "/calendar.json?keyword=memphis+ruby");

    let favicon = get(app, "/favicon.ico").await;
    assert_eq!(favicon.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_reports_cache() {
    let app = setup_test_app(false).unwrap();

    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(String::from_utf8_lossy(&body).starts_with("OK - Cache:"));
}
