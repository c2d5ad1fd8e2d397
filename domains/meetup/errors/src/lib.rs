use std::sync::Arc;

use common_errors::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MeetupError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),
    #[error("Invalid upstream URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Upstream request to {url} failed: {source}")]
    Upstream {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Upstream {url} answered with status {status}")]
    UpstreamStatus { url: String, status: u16 },
    #[error("Could not decode upstream page from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Upstream pagination exceeded {max_pages} pages")]
    PaginationLimit { max_pages: usize },
    #[error("Upstream pagination revisited {url}")]
    CursorLoop { url: String },
    #[error("Invalid date: year={year} month={month} day={day}")]
    InvalidDate { year: i32, month: u32, day: u32 },
    #[error("Unknown timezone: {0}")]
    InvalidTimezone(String),
    /// Failure of a fetch shared by several concurrent callers.
    #[error("{0}")]
    Shared(Arc<MeetupError>),
}

impl MeetupError {
    /// True when the failure came from the upstream API rather than from the
    /// caller's input or local configuration.
    pub fn is_upstream(&self) -> bool {
        match self {
            Self::Upstream { .. }
            | Self::UpstreamStatus { .. }
            | Self::Decode { .. }
            | Self::PaginationLimit { .. }
            | Self::CursorLoop { .. } => true,
            Self::Shared(inner) => inner.is_upstream(),
            _ => false,
        }
    }
}

impl From<Arc<MeetupError>> for MeetupError {
    fn from(err: Arc<MeetupError>) -> Self {
        Arc::try_unwrap(err).unwrap_or_else(MeetupError::Shared)
    }
}

fn to_app_error(err: &MeetupError) -> AppError {
    match err {
        MeetupError::Shared(inner) => to_app_error(inner),
        MeetupError::InvalidDate { .. } => {
            AppError::bad_request("INVALID_DATE", &err.to_string())
        }
        MeetupError::PaginationLimit { .. } | MeetupError::CursorLoop { .. } => {
            AppError::bad_gateway_with_details(
                "UPSTREAM_PAGINATION",
                "Meetup returned an unusable page sequence",
                &err.to_string(),
            )
        }
        MeetupError::Upstream { .. }
        | MeetupError::UpstreamStatus { .. }
        | MeetupError::Decode { .. } => {
            AppError::bad_gateway_with_details(
                "UPSTREAM_ERROR",
                "Meetup request failed",
                &err.to_string(),
            )
        }
        MeetupError::HttpClient(_)
        | MeetupError::InvalidUrl { .. }
        | MeetupError::InvalidTimezone(_) => {
            AppError::internal_server_error(&format!(
                "Configuration error: {err}"
            ))
        }
    }
}

impl From<MeetupError> for AppError {
    fn from(err: MeetupError) -> Self { to_app_error(&err) }
}
