use chrono::{NaiveDate, NaiveTime};

use crate::post::PostFields;
use crate::schema::DATE_FORMAT;

/// Keeps the records whose title, excerpt or body contains the query,
/// case-insensitively. An empty or all-whitespace query keeps everything.
pub fn search_posts<T: PostFields + Clone>(posts: &[T], query: &str) -> Vec<T> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return posts.to_vec();
    }

    posts
        .iter()
        .filter(|p| {
            let header = p.header();
            header.title.to_lowercase().contains(&query)
                || header.excerpt.to_lowercase().contains(&query)
                || p.content()
                    .map(|c| c.to_lowercase().contains(&query))
                    .unwrap_or(false)
        })
        .cloned()
        .collect()
}

/// Keeps the records listing the category, compared case-insensitively.
/// An empty category keeps everything.
pub fn filter_by_category<T: PostFields + Clone>(posts: &[T], category: &str) -> Vec<T> {
    let category = category.trim();
    if category.is_empty() {
        return posts.to_vec();
    }

    posts
        .iter()
        .filter(|p| {
            p.header()
                .categories
                .iter()
                .any(|c| c.eq_ignore_ascii_case(category))
        })
        .cloned()
        .collect()
}

/// New list sorted by date, most recent first. A date that does not parse
/// sorts as timestamp 0, so malformed dates always end up last.
pub fn sort_by_date<T: PostFields + Clone>(posts: &[T]) -> Vec<T> {
    let mut sorted = posts.to_vec();
    sorted.sort_by(|a, b| {
        let ta = date_stamp(&a.header().date);
        let tb = date_stamp(&b.header().date);
        tb.cmp(&ta)
    });
    sorted
}

fn date_stamp(date: &str) -> i64 {
    match NaiveDate::parse_from_str(date, DATE_FORMAT) {
        Ok(d) => d.and_time(NaiveTime::MIN).and_utc().timestamp(),
        Err(_) => 0,
    }
}
