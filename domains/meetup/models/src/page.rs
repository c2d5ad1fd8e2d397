use serde::{Deserialize, Serialize};

use crate::{events::Event, lenient::or_default};

/// One decoded page of the upstream listing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Page {
    pub results: Vec<Event>,
    #[serde(deserialize_with = "or_default")]
    pub meta: PageMeta,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageMeta {
    /// Absolute URL of the next page; empty or absent on the last page.
    #[serde(deserialize_with = "or_default")]
    pub next: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub total_count: u64,
    #[serde(deserialize_with = "or_default")]
    pub count: u64,
}

impl PageMeta {
    pub fn next_url(&self) -> Option<&str> {
        self.next
            .as_deref()
            .map(str::trim)
            .filter(|next| !next.is_empty())
    }
}
