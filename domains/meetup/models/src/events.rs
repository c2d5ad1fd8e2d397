use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;
use utoipa::ToSchema;

use crate::{groups::Group, lenient::or_default, venues::Venue};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Upcoming,
    Past,
    Cancelled,
    Proposed,
    Suggested,
    Draft,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A single Meetup event as returned by the listing API.
///
/// Every field is optional upstream; absent, `null` or mistyped fields decode
/// to their defaults.
#[derive(
    Clone,
    Debug,
    Default,
    PartialEq,
    Serialize,
    Deserialize,
    TypedBuilder,
    ToSchema,
)]
#[serde(default)]
#[builder(field_defaults(default))]
pub struct Event {
    #[serde(deserialize_with = "or_default")]
    #[builder(setter(into))]
    pub id: String,
    #[serde(deserialize_with = "or_default")]
    #[builder(setter(into))]
    pub name: String,
    #[serde(deserialize_with = "or_default")]
    #[builder(setter(into))]
    pub description: String,
    /// Scheduled start, epoch milliseconds.
    #[serde(deserialize_with = "or_default")]
    pub time: i64,
    #[serde(deserialize_with = "or_default")]
    pub created: i64,
    #[serde(deserialize_with = "or_default")]
    pub updated: i64,
    /// Offset from UTC at the venue, milliseconds.
    #[serde(deserialize_with = "or_default")]
    pub utc_offset: i64,
    #[serde(deserialize_with = "or_default")]
    pub status: EventStatus,
    #[serde(deserialize_with = "or_default")]
    pub yes_rsvp_count: u32,
    #[serde(deserialize_with = "or_default")]
    pub maybe_rsvp_count: u32,
    #[serde(deserialize_with = "or_default")]
    pub waitlist_count: u32,
    #[serde(deserialize_with = "or_default")]
    pub headcount: u32,
    #[serde(deserialize_with = "or_default")]
    #[builder(setter(into))]
    pub visibility: String,
    #[serde(deserialize_with = "or_default")]
    pub announced: bool,
    #[serde(deserialize_with = "or_default")]
    pub venue: Venue,
    #[serde(deserialize_with = "or_default")]
    pub group: Group,
    #[serde(deserialize_with = "or_default")]
    #[builder(setter(into))]
    pub event_url: String,
}
