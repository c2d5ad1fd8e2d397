use meetup_queries::{TimeWindow, normalize_keyword};
use query_cache::{CacheKey, ScopedKey, cache_key};

cache_key!(KeywordCacheKey => "keyword": "{}"[keyword: str]);
cache_key!(WindowCacheKey => "window": "{},{}"[start_ms: i64, end_ms: i64]);
cache_key!(RangeCacheKey => "range": "{}-{}"[timerange: str, groups: str]);

/// Key for a keyword query: the trimmed, lower-cased keyword.
pub fn keyword_key(keyword: &str) -> ScopedKey {
    let keyword = normalize_keyword(keyword);
    KeywordCacheKey.get_key_with_args((keyword.as_str(),))
}

/// Key for a day, week or month query: `"{start_ms},{end_ms}"`.
pub fn window_key(window: &TimeWindow) -> ScopedKey {
    WindowCacheKey
        .get_key_with_args((&window.start_millis(), &window.end_millis()))
}

/// Key for a raw range over a set of groups.
///
/// `groups` must already be sorted and de-duplicated so that the same set
/// always yields the same key.
pub fn range_key(timerange: &str, groups: &[String]) -> ScopedKey {
    let groups = groups.join(",");
    RangeCacheKey.get_key_with_args((timerange, groups.as_str()))
}

#[cfg(test)]
mod tests {
    use meetup_queries::{DEFAULT_TIMEZONE, parse_timezone};

    use super::*;

    #[test]
    fn test_keyword_key_is_normalized() {
        assert_eq!(keyword_key("  Memphis RUBY ").fingerprint(), "memphis ruby");
        assert_eq!(keyword_key("ruby"), keyword_key("RUBY"));
    }

    #[test]
    fn test_window_key() {
        let tz = parse_timezone(DEFAULT_TIMEZONE).unwrap();
        let window = TimeWindow::day(tz, 15, 3, 2024).unwrap();

        assert_eq!(
            window_key(&window).fingerprint(),
            "1710478800000,1710565200000"
        );
    }

    #[test]
    fn test_range_key_includes_groups() {
        let a = range_key("X", &["groupA".to_string()]);
        let b = range_key("X", &["groupB".to_string()]);

        assert_ne!(a, b);
        assert_eq!(a.fingerprint(), "X-groupA");
        assert_eq!(
            range_key("X", &["a".to_string(), "b".to_string()]).fingerprint(),
            "X-a,b"
        );
    }

    #[test]
    fn test_kinds_never_collide() {
        let tz = parse_timezone(DEFAULT_TIMEZONE).unwrap();
        let window = TimeWindow::day(tz, 15, 3, 2024).unwrap();

        assert_ne!(keyword_key(&window.to_upstream()), window_key(&window));
    }
}
