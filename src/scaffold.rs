use std::fmt::Write;

use chrono::NaiveDate;

use crate::post::FALLBACK_AUTHOR;
use crate::schema::DATE_FORMAT;

/// Derives a slug from a title: transliterated, lowercased, everything
/// outside [a-z0-9] collapsed into single hyphens.
pub fn slug_from_title(title: &str) -> String {
    let title = unidecode::unidecode(title);

    let mut slug = String::new();
    let mut prev_hyphen = true;
    for c in title.chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            prev_hyphen = false;
        } else if !prev_hyphen {
            slug.push('-');
            prev_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }

    if slug.is_empty() {
        slug.push_str("untitled");
    }
    slug
}

/// Renders a ready-to-edit document skeleton for the given title.
pub fn render_document(title: &str, author: Option<&str>, date: &NaiveDate) -> String {
    let slug = slug_from_title(title);
    let author = author.unwrap_or(FALLBACK_AUTHOR);

    let mut buf = String::new();
    let _ = writeln!(&mut buf, "+++");
    let _ = writeln!(&mut buf, "title = \"{}\"", title.replace('"', "\\\""));
    let _ = writeln!(&mut buf, "date = \"{}\"", date.format(DATE_FORMAT));
    let _ = writeln!(&mut buf, "slug = \"{}\"", slug);
    let _ = writeln!(&mut buf, "excerpt = \"Replace with a one-line summary\"");
    let _ = writeln!(&mut buf, "categories = []");
    let _ = writeln!(&mut buf, "published = false");
    let _ = writeln!(&mut buf, "author = \"{}\"", author.replace('"', "\\\""));
    let _ = writeln!(&mut buf, "+++");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "This is a body example.");
    let _ = writeln!(&mut buf, "Please remove it and replace with your content.");

    buf
}
