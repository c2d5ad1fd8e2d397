use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;
use utoipa::ToSchema;

use crate::lenient::or_default;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum JoinMode {
    Open,
    Approval,
    Closed,
    #[default]
    #[serde(other)]
    Unknown,
}

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
pub struct Group {
    #[serde(deserialize_with = "or_default")]
    pub id: i64,
    #[serde(deserialize_with = "or_default")]
    #[builder(setter(into))]
    pub name: String,
    /// Slug used as the `group_urlname` upstream parameter.
    #[serde(rename = "url_name", alias = "urlname", deserialize_with = "or_default")]
    #[builder(setter(into))]
    pub urlname: String,
    #[serde(deserialize_with = "or_default")]
    pub join_mode: JoinMode,
    #[serde(deserialize_with = "or_default")]
    pub group_lat: f64,
    #[serde(deserialize_with = "or_default")]
    pub group_lon: f64,
    #[serde(deserialize_with = "or_default")]
    pub created: i64,
    #[serde(deserialize_with = "or_default")]
    #[builder(setter(into))]
    pub who: String,
}
