use std::path::PathBuf;
use std::{fs, io};

/// A discovered document: its id and the raw text, not yet parsed.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub id: String,
    pub text: String,
}

/// Where documents come from. The library does not care whether that is a
/// directory, bundled assets or something else.
pub trait DocumentSource {
    fn discover(&self) -> io::Result<Vec<RawDocument>>;

    /// Raw text of a single document, None when it does not exist.
    fn read(&self, id: &str) -> io::Result<Option<String>>;
}

/// Documents are the `.md` files directly inside one directory.
/// The file stem is the document id.
pub struct DirSource {
    pub root_dir: PathBuf,
}

impl DirSource {
    pub fn new(root_dir: impl Into<PathBuf>) -> DirSource {
        DirSource { root_dir: root_dir.into() }
    }

    fn document_path(&self, id: &str) -> Option<PathBuf> {
        // Ids never address outside the posts directory
        if id.is_empty() || id.contains('/') || id.contains('\\') || id.contains("..") {
            return None;
        }
        Some(self.root_dir.join(format!("{}.md", id)))
    }
}

impl DocumentSource for DirSource {
    fn discover(&self) -> io::Result<Vec<RawDocument>> {
        let mut docs = vec![];
        let entries = fs::read_dir(self.root_dir.as_path())?;
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let path = entry.path();
            let is_md = path.extension().map(|e| e == "md").unwrap_or(false);
            if !is_md {
                continue;
            }
            let id = match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => stem.to_string(),
                None => continue,
            };
            let text = fs::read_to_string(&path)?;
            docs.push(RawDocument { id, text });
        }

        // read_dir order is platform dependent
        docs.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(docs)
    }

    fn read(&self, id: &str) -> io::Result<Option<String>> {
        let path = match self.document_path(id) {
            Some(path) => path,
            None => return Ok(None),
        };
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}
