use std::io;

use spdlog::{info, warn};

use crate::error::{LoadError, ParseError};
use crate::post::{Post, PostPreview};
use crate::source::DocumentSource;

/// Loads posts from a document source. Every load call re-reads and
/// re-parses from scratch; nothing is cached between calls.
pub struct Library<S: DocumentSource> {
    source: S,
}

impl<S: DocumentSource> Library<S> {
    pub fn new(source: S) -> Library<S> {
        Library { source }
    }

    /// All parseable posts, drafts included. A malformed document is skipped,
    /// never aborts the batch.
    pub fn load_all(&self) -> Result<Vec<Post>, LoadError> {
        self.load_batch(Post::from_string)
    }

    pub fn load_published(&self) -> Result<Vec<Post>, LoadError> {
        let mut posts = self.load_all()?;
        posts.retain(|p| p.header.published);
        Ok(posts)
    }

    pub fn load_published_previews(&self) -> Result<Vec<PostPreview>, LoadError> {
        let mut previews = self.load_batch(PostPreview::from_string)?;
        previews.retain(|p| p.header.published);
        Ok(previews)
    }

    /// Single-document fetch. Collapses every failure mode into None; the
    /// caller only needs to know whether the post is available.
    pub fn load_by_id(&self, id: &str) -> Option<Post> {
        let text = match self.source.read(id) {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(e) => {
                warn!("Could not read document {}: {}", id, e);
                return None;
            }
        };

        match Post::from_string(id, &text) {
            Ok(post) => Some(post),
            Err(e) => {
                warn!("Could not parse document: {}", e);
                None
            }
        }
    }

    /// Like load_by_id, but resolves through the slug metadata field.
    pub fn load_by_slug(&self, slug: &str) -> Option<Post> {
        let posts = match self.load_all() {
            Ok(posts) => posts,
            Err(e) => {
                warn!("Could not resolve slug {}: {}", slug, e);
                return None;
            }
        };
        posts.into_iter().find(|p| p.header.slug == slug)
    }

    /// Parses every discovered document and reports each failure, without
    /// the skip-and-continue policy hiding anything.
    pub fn check(&self) -> io::Result<(usize, Vec<ParseError>)> {
        let docs = self.source.discover()?;
        let total = docs.len();
        let mut failures = vec![];
        for doc in docs {
            if let Err(e) = Post::from_string(&doc.id, &doc.text) {
                failures.push(e);
            }
        }
        Ok((total, failures))
    }

    fn load_batch<T>(
        &self,
        parse: fn(&str, &str) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, LoadError> {
        let docs = self.source.discover()?;
        let discovered = docs.len();

        // Accumulate first, decide the aggregate outcome after the full pass
        let mut loaded = vec![];
        let mut failures = vec![];
        for doc in docs {
            match parse(&doc.id, &doc.text) {
                Ok(item) => loaded.push(item),
                Err(e) => {
                    warn!("Skipping document: {}", e);
                    failures.push(e);
                }
            }
        }

        if loaded.is_empty() && !failures.is_empty() {
            return Err(LoadError::AllFailed { failures });
        }

        info!("Loaded {} of {} documents", loaded.len(), discovered);
        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::LoadError;
    use crate::source::RawDocument;
    use crate::test_data::{POST_BROKEN_TITLE, POST_DATA, POST_NO_AUTHOR_NO_TAGS, POST_UNPUBLISHED};

    use super::*;

    /// In-memory source, so the loader tests need no filesystem.
    struct VecSource {
        docs: Vec<(String, String)>,
    }

    impl VecSource {
        fn from(docs: &[(&str, &str)]) -> VecSource {
            VecSource {
                docs: docs
                    .iter()
                    .map(|(id, text)| (id.to_string(), text.to_string()))
                    .collect(),
            }
        }
    }

    impl DocumentSource for VecSource {
        fn discover(&self) -> io::Result<Vec<RawDocument>> {
            Ok(self
                .docs
                .iter()
                .map(|(id, text)| RawDocument { id: id.clone(), text: text.clone() })
                .collect())
        }

        fn read(&self, id: &str) -> io::Result<Option<String>> {
            Ok(self
                .docs
                .iter()
                .find(|(doc_id, _)| doc_id == id)
                .map(|(_, text)| text.clone()))
        }
    }

    #[test]
    fn test_one_bad_document_does_not_abort_the_batch() {
        let library = Library::new(VecSource::from(&[
            ("good-one", POST_DATA),
            ("broken", POST_BROKEN_TITLE),
            ("good-two", POST_NO_AUTHOR_NO_TAGS),
        ]));

        let posts = library.load_all().unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].header.id, "good-one");
        assert_eq!(posts[1].header.id, "good-two");
    }

    #[test]
    fn test_all_failed_is_an_aggregate_error() {
        let docs: Vec<(String, String)> = (0..5)
            .map(|i| (format!("bad-{}", i), POST_BROKEN_TITLE.to_string()))
            .collect();
        let docs: Vec<(&str, &str)> = docs.iter().map(|(a, b)| (a.as_str(), b.as_str())).collect();
        let library = Library::new(VecSource::from(&docs));

        let err = library.load_all().unwrap_err();
        let LoadError::AllFailed { ref failures } = err else {
            panic!("expected AllFailed, got {:?}", err);
        };
        assert_eq!(failures.len(), 5);

        let msg = err.to_string();
        assert!(msg.contains("bad-0"));
        assert!(msg.contains("bad-2"));
        assert!(!msg.contains("bad-3"));
        assert!(msg.contains("... and 2 more"));
    }

    #[test]
    fn test_empty_discovery_is_not_an_error() {
        let library = Library::new(VecSource::from(&[]));
        assert!(library.load_all().unwrap().is_empty());
        assert!(library.load_published_previews().unwrap().is_empty());
    }

    #[test]
    fn test_published_filter() {
        let library = Library::new(VecSource::from(&[
            ("published", POST_DATA),
            ("draft", POST_UNPUBLISHED),
        ]));

        let posts = library.load_published().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].header.id, "published");

        let previews = library.load_published_previews().unwrap();
        assert_eq!(previews.len(), 1);
        assert_eq!(previews[0].header.slug, "why-i-like-rust");
    }

    #[test]
    fn test_all_drafts_is_still_a_success() {
        // Unpublished posts are excluded, but they are not load failures
        let library = Library::new(VecSource::from(&[("draft", POST_UNPUBLISHED)]));
        assert!(library.load_published().unwrap().is_empty());
    }

    #[test]
    fn test_load_by_id_is_lenient() {
        let library = Library::new(VecSource::from(&[
            ("good-one", POST_DATA),
            ("broken", POST_BROKEN_TITLE),
        ]));

        assert!(library.load_by_id("good-one").is_some());
        assert!(library.load_by_id("missing-id").is_none());
        // Parse failures collapse into None as well
        assert!(library.load_by_id("broken").is_none());
    }

    #[test]
    fn test_load_by_slug() {
        let library = Library::new(VecSource::from(&[
            ("a-file-name", POST_DATA),
            ("another-file", POST_NO_AUTHOR_NO_TAGS),
        ]));

        let post = library.load_by_slug("small-notes").unwrap();
        assert_eq!(post.header.id, "another-file");
        assert!(library.load_by_slug("nope").is_none());
    }

    #[test]
    fn test_check_reports_every_failure() {
        let library = Library::new(VecSource::from(&[
            ("good-one", POST_DATA),
            ("bad-one", POST_BROKEN_TITLE),
            ("bad-two", "no fence at all"),
        ]));

        let (total, failures) = library.check().unwrap();
        assert_eq!(total, 3);
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].id(), "bad-one");
        assert_eq!(failures[1].id(), "bad-two");
    }
}
