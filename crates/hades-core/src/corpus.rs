//! Documents and the corpus they are compared within

use std::fs;
use std::path::Path;
use std::time::Instant;

use walkdir::WalkDir;

use crate::error::{HadesError, Result};
use crate::normalize::Normalizer;
use crate::trace_time;

/// A single document in the corpus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    id: String,
    original: String,
    content: Vec<char>,
}

impl Document {
    /// Build a document from decoded text
    pub fn new(id: impl Into<String>, original: impl Into<String>, normalizer: &Normalizer) -> Self {
        let original = original.into();
        let content = normalizer.normalize(&original);
        Document {
            id: id.into(),
            original,
            content,
        }
    }

    /// Stable identifier (the path as found by the walk)
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Content exactly as read, before normalization
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Normalized content the scorer compares
    pub fn content(&self) -> &[char] {
        &self.content
    }
}

/// Ordered, immutable collection of documents addressed by index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    documents: Vec<Document>,
}

impl Corpus {
    pub fn new(documents: Vec<Document>) -> Self {
        Corpus { documents }
    }

    /// Build a corpus from in-memory `(identifier, content)` pairs
    pub fn from_texts<I, S, T>(texts: I, normalizer: &Normalizer) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let documents = texts
            .into_iter()
            .map(|(id, text)| Document::new(id, text, normalizer))
            .collect();
        Corpus { documents }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Document> {
        self.documents.get(index)
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }

    /// Number of unordered pairs, `N * (N - 1) / 2`
    pub fn combinations(&self) -> usize {
        crate::pairs::combinations(self.len())
    }
}

impl std::ops::Index<usize> for Corpus {
    type Output = Document;

    fn index(&self, index: usize) -> &Document {
        &self.documents[index]
    }
}

/// Result of walking a directory: the corpus plus every file that was skipped
#[derive(Debug, Default)]
pub struct LoadedCorpus {
    pub corpus: Corpus,
    pub skipped: Vec<HadesError>,
}

/// Whether `file_name` ends with one of the configured suffixes
pub fn matches_extension(file_name: &str, extensions: &[String]) -> bool {
    extensions.iter().any(|ext| file_name.ends_with(ext.as_str()))
}

/// Recursively collect documents under `root` whose file name ends with one
/// of `extensions`.
///
/// The walk is sorted by file name so the corpus order is reproducible.
/// Unreadable and undecodable files are skipped and returned in
/// [`LoadedCorpus::skipped`]; a missing root is an error.
#[tracing::instrument(skip(extensions, normalizer), fields(root = %root.display()))]
pub fn load_corpus(
    root: &Path,
    extensions: &[String],
    normalizer: &Normalizer,
) -> Result<LoadedCorpus> {
    let start = Instant::now();

    if !root.is_dir() {
        return Err(HadesError::not_found("corpus directory", root.display()));
    }

    let mut documents = Vec::new();
    let mut skipped = Vec::new();

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
                tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable entry");
                skipped.push(HadesError::CorpusLoad {
                    path,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if !matches_extension(&name, extensions) {
            continue;
        }

        let path = entry.path();
        let id = path.display().to_string();

        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(path = %id, error = %e, "Skipping unreadable file");
                skipped.push(HadesError::CorpusLoad {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        match normalizer.decode(&id, bytes) {
            Ok(text) => documents.push(Document::new(id, text, normalizer)),
            Err(e) => {
                tracing::warn!(path = %id, error = %e, "Skipping undecodable file");
                skipped.push(e);
            }
        }
    }

    trace_time!(
        start,
        "load_corpus",
        documents = documents.len(),
        skipped = skipped.len()
    );

    Ok(LoadedCorpus {
        corpus: Corpus::new(documents),
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn exts(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_matches_extension_is_suffix_match() {
        let list = exts(&[".py", ".c"]);
        assert!(matches_extension("main.py", &list));
        assert!(matches_extension("lib.c", &list));
        assert!(!matches_extension("lib.cpp", &list));
        assert!(!matches_extension("README", &list));
    }

    #[test]
    fn test_load_corpus_recurses_and_filters() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("nested/deeper")).unwrap();
        fs::write(dir.path().join("a.py"), "print(1)\n").unwrap();
        fs::write(dir.path().join("nested/b.py"), "print(2)\n").unwrap();
        fs::write(dir.path().join("nested/deeper/c.py"), "print(3)\n").unwrap();
        fs::write(dir.path().join("nested/notes.txt"), "ignored").unwrap();

        let loaded = load_corpus(dir.path(), &exts(&[".py"]), &Normalizer::default()).unwrap();

        assert_eq!(loaded.corpus.len(), 3);
        assert!(loaded.skipped.is_empty());
        assert!(loaded.corpus.iter().all(|d| d.id().ends_with(".py")));
    }

    #[test]
    fn test_load_corpus_order_is_sorted_by_name() {
        let dir = tempdir().unwrap();
        for name in ["c.txt", "a.txt", "b.txt"] {
            fs::write(dir.path().join(name), name).unwrap();
        }

        let loaded = load_corpus(dir.path(), &exts(&[".txt"]), &Normalizer::default()).unwrap();
        let names: Vec<_> = loaded
            .corpus
            .iter()
            .map(|d| Path::new(d.id()).file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "c.txt"]);
    }

    #[test]
    fn test_load_corpus_skips_undecodable_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("good.txt"), "hello").unwrap();
        fs::write(dir.path().join("bad.txt"), [0xffu8, 0xfe, 0xfd]).unwrap();

        let loaded = load_corpus(dir.path(), &exts(&[".txt"]), &Normalizer::default()).unwrap();

        assert_eq!(loaded.corpus.len(), 1);
        assert_eq!(loaded.skipped.len(), 1);
        assert!(matches!(
            &loaded.skipped[0],
            HadesError::Decode { id } if id.ends_with("bad.txt")
        ));
    }

    #[test]
    fn test_load_corpus_keeps_original_and_normalized() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "ab\ncd\n").unwrap();

        let loaded = load_corpus(dir.path(), &exts(&[".txt"]), &Normalizer::default()).unwrap();
        let doc = &loaded.corpus[0];

        assert_eq!(doc.original(), "ab\ncd\n");
        assert_eq!(doc.content(), &['a', 'b', 'c', 'd']);
    }

    #[test]
    fn test_load_corpus_missing_root() {
        let dir = tempdir().unwrap();
        let err = load_corpus(
            &dir.path().join("missing"),
            &exts(&[".txt"]),
            &Normalizer::default(),
        )
        .unwrap_err();
        assert!(matches!(err, HadesError::NotFound { .. }));
    }

    #[test]
    fn test_from_texts_preserves_order() {
        let corpus = Corpus::from_texts(
            [("A", "abcdef"), ("B", "abcdef"), ("C", "zzzzzz")],
            &Normalizer::default(),
        );
        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus[2].id(), "C");
        assert_eq!(corpus.combinations(), 3);
    }
}
