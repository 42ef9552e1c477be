const RECENCY_MARKERS: [&str; 10] = [
    "day",
    "hour",
    "today",
    "yesterday",
    "1 week",
    "2 day",
    "3 day",
    "4 day",
    "5 day",
    "6 day",
];

/// Substring check of the posted-date text against the recency markers, ignoring case.
pub fn is_recent(posted_date: &str) -> bool {
    let posted = posted_date.to_lowercase();
    RECENCY_MARKERS.iter().any(|marker| posted.contains(marker))
}
