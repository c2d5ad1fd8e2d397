use meetup_models::Event;

use crate::window::TimeWindow;

/// Trims and lower-cases a keyword the way cache keys and filters expect.
pub fn normalize_keyword(keyword: &str) -> String {
    keyword.trim().to_lowercase()
}

/// Events whose name contains `keyword`, ignoring case, in source order.
///
/// An empty keyword matches every event.
pub fn filter_by_keyword(events: &[Event], keyword: &str) -> Vec<Event> {
    let keyword = normalize_keyword(keyword);
    if keyword.is_empty() {
        return events.to_vec();
    }

    events
        .iter()
        .filter(|event| event.name.to_lowercase().contains(&keyword))
        .cloned()
        .collect()
}

/// Events scheduled inside `window`, in source order.
pub fn filter_by_window(events: &[Event], window: &TimeWindow) -> Vec<Event> {
    events
        .iter()
        .filter(|event| window.contains(event.time))
        .cloned()
        .collect()
}
