use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;
use utoipa::ToSchema;

use crate::lenient::or_default;

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
pub struct Venue {
    #[serde(deserialize_with = "or_default")]
    pub id: i64,
    #[serde(deserialize_with = "or_default")]
    #[builder(setter(into))]
    pub name: String,
    #[serde(deserialize_with = "or_default")]
    #[builder(setter(into))]
    pub address_1: String,
    #[serde(deserialize_with = "or_default")]
    #[builder(setter(into))]
    pub address_2: String,
    #[serde(deserialize_with = "or_default")]
    #[builder(setter(into))]
    pub city: String,
    #[serde(deserialize_with = "or_default")]
    #[builder(setter(into))]
    pub country: String,
    #[serde(deserialize_with = "or_default")]
    pub lat: f64,
    #[serde(deserialize_with = "or_default")]
    pub lon: f64,
    #[serde(deserialize_with = "or_default")]
    pub repinned: bool,
}
