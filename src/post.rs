use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt;

use crate::error::ParseError;
use crate::frontmatter::split_document;
use crate::schema::{validate, PostMetadata};

/// Byline used when a document does not name its author.
pub const FALLBACK_AUTHOR: &str = "Ralph King Jr";

/// Assumed reading speed for the reading-time estimate.
pub const WORDS_PER_MINUTE: usize = 200;

/// Everything known about a post except its body.
#[derive(Debug, Clone, PartialEq)]
pub struct PostHeader {
    pub id: String,
    pub title: String,
    pub date: String,
    pub slug: String,
    pub excerpt: String,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub author: String,
    pub published: bool,
    pub reading_time: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub header: PostHeader,
    pub content: String,
}

/// A post without its body, for listing views.
#[derive(Debug, Clone, PartialEq)]
pub struct PostPreview {
    pub header: PostHeader,
}

/// Common view over posts and previews, so the query functions accept both.
pub trait PostFields {
    fn header(&self) -> &PostHeader;

    fn content(&self) -> Option<&str> {
        None
    }
}

impl PostFields for Post {
    fn header(&self) -> &PostHeader {
        &self.header
    }

    fn content(&self) -> Option<&str> {
        Some(&self.content)
    }
}

impl PostFields for PostPreview {
    fn header(&self) -> &PostHeader {
        &self.header
    }
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "id={}, date={}, author={}\ntitle={}\ncontent:\n{}",
               self.header.id,
               self.header.date,
               self.header.author,
               self.header.title,
               self.content
        )
    }
}

impl PostHeader {
    fn from_parts(id: &str, meta: PostMetadata, body: &str) -> PostHeader {
        let reading_time = calculate_reading_time(body);
        let author = meta.author.unwrap_or_else(|| FALLBACK_AUTHOR.to_string());
        // Tags fall back to the categories, resolved once at parse time
        let tags = meta.tags.unwrap_or_else(|| meta.categories.clone());

        PostHeader {
            id: id.to_string(),
            title: meta.title,
            date: meta.date,
            slug: meta.slug,
            excerpt: meta.excerpt,
            categories: meta.categories,
            tags,
            author,
            published: meta.published,
            reading_time,
        }
    }
}

impl Post {
    pub fn from_string(id: &str, raw: &str) -> Result<Post, ParseError> {
        let (header, body) = parse_document(id, raw)?;
        Ok(Post {
            header,
            content: body.to_string(),
        })
    }
}

impl PostPreview {
    pub fn from_string(id: &str, raw: &str) -> Result<PostPreview, ParseError> {
        let (header, _body) = parse_document(id, raw)?;
        Ok(PostPreview { header })
    }
}

fn parse_document<'a>(id: &str, raw: &'a str) -> Result<(PostHeader, &'a str), ParseError> {
    let (table, body) = split_document(raw).map_err(|e| ParseError::Document {
        id: id.to_string(),
        reason: e.to_string(),
    })?;

    let meta = validate(&table).map_err(|e| ParseError::Validation {
        id: id.to_string(),
        source: e,
    })?;

    Ok((PostHeader::from_parts(id, meta, body), body))
}

/// Estimated minutes to read, rounded up. An empty body reads in 0 minutes.
pub fn calculate_reading_time(content: &str) -> u32 {
    let words = content.split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE) as u32
}
