use chrono::TimeZone;
use chrono_tz::Tz;
use meetup_models::Event;
use serde::Serialize;
use utoipa::ToSchema;

pub const NO_MATCH: &str = "No matching meetup found.";
pub const LOOKUP_FAILED: &str = "Meetup lookup failed, try again later.";

const TIME_FORMAT: &str = "%b %-d, %Y at %-I:%M%P (%Z)";

/// Body of a Slack outgoing-webhook reply.
#[derive(Debug, Serialize, ToSchema)]
pub struct SlackResponse {
    pub text: String,
}

/// One-line summary of the first event:
/// `name | Mar 15, 2024 at 1:30pm (CDT) @ venue | url`.
pub fn slack_text(events: &[Event], tz: Tz) -> String {
    let Some(event) = events.first() else {
        return NO_MATCH.to_string();
    };

    let when = tz
        .timestamp_millis_opt(event.time)
        .single()
        .map(|time| time.format(TIME_FORMAT).to_string())
        .unwrap_or_default();
    let venue = match event.venue.name.trim() {
        "" => "TBD",
        name => name,
    };

    format!("{} | {} @ {} | {}", event.name, when, venue, event.event_url)
}
