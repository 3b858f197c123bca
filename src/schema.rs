use lazy_static::lazy_static;
use regex::Regex;
use toml::{Table, Value};

use chrono::NaiveDate;

use crate::error::{FieldError, FieldErrorKind, ValidationError};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A metadata block that passed every field check.
#[derive(Debug, Clone, PartialEq)]
pub struct PostMetadata {
    pub title: String,
    pub date: String,
    pub categories: Vec<String>,
    pub published: bool,
    pub slug: String,
    pub excerpt: String,
    pub author: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Checks a raw metadata table against the field contract. Every violated
/// field is reported, not just the first one found.
pub fn validate(raw: &Table) -> Result<PostMetadata, ValidationError> {
    lazy_static! {
        static ref DATE_REGEX: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
        static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9-]+$").unwrap();
    }

    let mut errors: Vec<FieldError> = vec![];

    let title = required_string(raw, "title", &mut errors);
    let excerpt = required_string(raw, "excerpt", &mut errors);

    let slug = required_string(raw, "slug", &mut errors);
    if let Some(ref s) = slug {
        if !SLUG_REGEX.is_match(s) {
            errors.push(FieldError {
                field: "slug",
                kind: FieldErrorKind::PatternError(s.clone()),
            });
        }
    }

    // A missing date reads as an empty string, which fails the lexical check
    let date = match raw.get("date") {
        None => {
            errors.push(FieldError {
                field: "date",
                kind: FieldErrorKind::FormatError(String::new()),
            });
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(FieldError {
                field: "date",
                kind: FieldErrorKind::TypeError("string"),
            });
            None
        }
    };
    if let Some(ref d) = date {
        if !DATE_REGEX.is_match(d) {
            errors.push(FieldError {
                field: "date",
                kind: FieldErrorKind::FormatError(d.clone()),
            });
        } else if NaiveDate::parse_from_str(d, DATE_FORMAT).is_err() {
            errors.push(FieldError {
                field: "date",
                kind: FieldErrorKind::InvalidDate(d.clone()),
            });
        }
    }

    let categories = match raw.get("categories") {
        None => Some(vec![]),
        Some(value) => match string_list(value) {
            Some(list) => Some(list),
            None => {
                errors.push(FieldError {
                    field: "categories",
                    kind: FieldErrorKind::TypeError("list of strings"),
                });
                None
            }
        },
    };

    let published = match raw.get("published") {
        None => Some(false),
        Some(Value::Boolean(b)) => Some(*b),
        Some(_) => {
            errors.push(FieldError {
                field: "published",
                kind: FieldErrorKind::TypeError("boolean"),
            });
            None
        }
    };

    let author = match raw.get("author") {
        None => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(FieldError {
                field: "author",
                kind: FieldErrorKind::TypeError("string"),
            });
            None
        }
    };

    let tags = match raw.get("tags") {
        None => None,
        Some(value) => match string_list(value) {
            Some(list) => Some(list),
            None => {
                errors.push(FieldError {
                    field: "tags",
                    kind: FieldErrorKind::TypeError("list of strings"),
                });
                None
            }
        },
    };

    match (title, date, slug, excerpt, categories, published) {
        (Some(title), Some(date), Some(slug), Some(excerpt), Some(categories), Some(published))
            if errors.is_empty() =>
        {
            Ok(PostMetadata {
                title,
                date,
                categories,
                published,
                slug,
                excerpt,
                author,
                tags,
            })
        }
        _ => Err(ValidationError::new(errors)),
    }
}

fn required_string(raw: &Table, field: &'static str, errors: &mut Vec<FieldError>) -> Option<String> {
    match raw.get(field) {
        None => {
            errors.push(FieldError { field, kind: FieldErrorKind::EmptyField });
            None
        }
        Some(Value::String(s)) if s.is_empty() => {
            errors.push(FieldError { field, kind: FieldErrorKind::EmptyField });
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(FieldError { field, kind: FieldErrorKind::TypeError("string") });
            None
        }
    }
}

fn string_list(value: &Value) -> Option<Vec<String>> {
    let arr = value.as_array()?;
    arr.iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(src: &str) -> Table {
        src.parse::<Table>().unwrap()
    }

    const VALID_BLOCK: &str = r#"
title = "Why Rust"
date = "2024-03-01"
slug = "why-rust"
excerpt = "A short pitch."
categories = ["Systems", "Rust"]
published = true
"#;

    #[test]
    fn test_valid_block() {
        let meta = validate(&table(VALID_BLOCK)).unwrap();
        assert_eq!(meta.title, "Why Rust");
        assert_eq!(meta.date, "2024-03-01");
        assert_eq!(meta.slug, "why-rust");
        assert_eq!(meta.categories, ["Systems", "Rust"]);
        assert!(meta.published);
        assert_eq!(meta.author, None);
        assert_eq!(meta.tags, None);
    }

    #[test]
    fn test_defaults_when_absent() {
        let src = r#"
title = "Why Rust"
date = "2024-03-01"
slug = "why-rust"
excerpt = "A short pitch."
"#;
        let meta = validate(&table(src)).unwrap();
        assert_eq!(meta.categories, Vec::<String>::new());
        assert!(!meta.published);
    }

    #[test]
    fn test_empty_title_is_reported() {
        let src = r#"
title = ""
date = "2024-03-01"
slug = "why-rust"
excerpt = "A short pitch."
"#;
        let err = validate(&table(src)).unwrap_err();
        assert!(err.has_field("title"));
        assert!(err.to_string().contains("title: must not be empty"));
    }

    #[test]
    fn test_missing_title_is_reported() {
        let src = r#"
date = "2024-03-01"
slug = "why-rust"
excerpt = "A short pitch."
"#;
        let err = validate(&table(src)).unwrap_err();
        assert!(err.has_field("title"));
    }

    #[test]
    fn test_slug_pattern() {
        for bad in ["Why-Rust", "why rust", "why_rust", "why/rust"] {
            let src = format!(
                "title = \"t\"\ndate = \"2024-03-01\"\nslug = \"{}\"\nexcerpt = \"e\"\n",
                bad
            );
            let err = validate(&table(&src)).unwrap_err();
            assert!(err.has_field("slug"), "slug {:?} should fail", bad);
            assert!(matches!(err.fields[0].kind, FieldErrorKind::PatternError(_)));
        }
    }

    #[test]
    fn test_empty_slug_is_empty_field_not_pattern() {
        let src = r#"
title = "t"
date = "2024-03-01"
slug = ""
excerpt = "e"
"#;
        let err = validate(&table(src)).unwrap_err();
        assert_eq!(err.fields.len(), 1);
        assert_eq!(err.fields[0].kind, FieldErrorKind::EmptyField);
    }

    #[test]
    fn test_date_format_vs_calendar() {
        let src = r#"
title = "t"
date = "03/01/2024"
slug = "s"
excerpt = "e"
"#;
        let err = validate(&table(src)).unwrap_err();
        assert!(matches!(err.fields[0].kind, FieldErrorKind::FormatError(_)));

        let src = r#"
title = "t"
date = "2024-13-45"
slug = "s"
excerpt = "e"
"#;
        let err = validate(&table(src)).unwrap_err();
        assert!(matches!(err.fields[0].kind, FieldErrorKind::InvalidDate(_)));
    }

    #[test]
    fn test_type_errors() {
        let src = r#"
title = "t"
date = "2024-03-01"
slug = "s"
excerpt = "e"
categories = "Frontend"
published = "yes"
tags = [1, 2]
"#;
        let err = validate(&table(src)).unwrap_err();
        assert!(err.has_field("categories"));
        assert!(err.has_field("published"));
        assert!(err.has_field("tags"));
    }

    #[test]
    fn test_all_violations_are_collected() {
        let src = r#"
title = ""
date = "not-a-date"
slug = "Bad Slug"
excerpt = ""
"#;
        let err = validate(&table(src)).unwrap_err();
        assert!(err.has_field("title"));
        assert!(err.has_field("date"));
        assert!(err.has_field("slug"));
        assert!(err.has_field("excerpt"));
        assert_eq!(err.fields.len(), 4);
    }
}
