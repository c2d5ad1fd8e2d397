mod config;

use std::sync::Arc;

use axum::routing::get;
use meetup_client::MeetupClient;
use meetup_http::{MeetupHandlers, MeetupServices, layered};
use meetup_query_handlers::{EventCache, MeetupQueryHandler};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

use crate::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();
    if config.upstream.api_key.is_empty() {
        info!("MEETUP_API_KEY is not set; upstream requests are unauthenticated");
    }

    let cache = EventCache::new(&config.cache);
    let client = MeetupClient::new(config.upstream.clone())?;
    let queries =
        MeetupQueryHandler::new(Arc::new(client), cache.clone(), &config.facade)?;
    info!(
        group = queries.default_group(),
        timezone = %queries.timezone(),
        ttl_secs = config.cache.ttl_secs,
        "Meetup query facade initialized"
    );

    let services =
        MeetupServices::new(queries, cache, config.cache.sweep_interval());

    info!("Starting background job scheduler...");
    services.background_jobs.clone().start();

    let app = layered(
        MeetupHandlers::routes()
            .with_state(services)
            .merge(RapiDoc::new("/api-docs/openapi.json").path("/docs"))
            .route(
                "/api-docs/openapi.json",
                get(|| async { axum::Json(ApiDoc::openapi()) }),
            ),
    );

    let addr = config.bind_addr();
    info!("🚀 memgo server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        meetup_http::health_check,
        meetup_http::home,
        meetup_http::calendar,
        meetup_http::calendar_day,
        meetup_http::calendar_week,
        meetup_http::calendar_month,
        meetup_http::calendar_range,
        meetup_http::slack_meetup,
        meetup_http::meetup_redirect
    ),
    components(
        schemas(
            meetup_models::Event,
            meetup_models::EventStatus,
            meetup_models::Venue,
            meetup_models::Group,
            meetup_models::JoinMode,
            meetup_http::CalendarResponse,
            meetup_http::slack::SlackResponse,
            common_errors::ApiErrorResponse,
            common_errors::ApiErrorInfo,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "calendar", description = "Cached Meetup event listings"),
        (name = "slack", description = "Slack outgoing-webhook integration"),
        (name = "redirect", description = "Short links to event pages")
    ),
    info(
        title = "memgo API",
        description = "Caching proxy for the Meetup event API",
        version = "1.0.0"
    )
)]
struct ApiDoc;
