//! CDM document loading.
//!
//! Provides [`Document`], an immutable parsed `*.cdm.json` tree with
//! accessors for the `definitions` array, and the [`DocumentSource`] trait
//! the resolver reads documents through.
//!
//! # Loading patterns
//!
//! ```no_run
//! use cdm_schema_loader::{DocumentSource, FileSystemSource, load_document};
//!
//! // Read one document from disk
//! let doc = load_document("schemaDocuments/core/applicationCommon/Account.cdm.json").unwrap();
//! println!("{} definitions", doc.definitions().len());
//!
//! // Or go through a source, which is what the resolver does
//! let source = FileSystemSource;
//! let doc = source.load("Account.cdm.json".as_ref()).unwrap();
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{LoadError, Result};

/// An immutable parsed CDM document.
///
/// # Examples
///
/// ```
/// use cdm_schema_loader::Document;
/// use serde_json::json;
///
/// let doc = Document::from_value(json!({
///     "definitions": [
///         {"entityName": "Account"},
///         {"attributeGroupName": "audit", "members": []}
///     ]
/// }));
/// assert_eq!(doc.definitions().len(), 2);
/// assert!(doc.find_definition("attributeGroupName", "audit").is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Value,
}

impl Document {
    /// Wraps an already parsed JSON value.
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// Parses a document from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Parse`] tagged with `origin` if `raw` is not
    /// valid JSON.
    pub fn parse(raw: &str, origin: impl Into<PathBuf>) -> Result<Self> {
        serde_json::from_str(raw)
            .map(Self::from_value)
            .map_err(|source| LoadError::Parse {
                path: origin.into(),
                source,
            })
    }

    /// The raw JSON tree.
    pub fn as_value(&self) -> &Value {
        &self.root
    }

    /// Entries of the top-level `definitions` array (empty when absent).
    pub fn definitions(&self) -> &[Value] {
        self.root
            .get("definitions")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The first definition, when it is an object.
    pub fn first_definition(&self) -> Option<&Map<String, Value>> {
        self.definitions().first().and_then(Value::as_object)
    }

    /// First definition whose string field `key` equals `name`.
    pub fn find_definition(&self, key: &str, name: &str) -> Option<&Map<String, Value>> {
        self.definitions()
            .iter()
            .filter_map(Value::as_object)
            .find(|def| def.get(key).and_then(Value::as_str) == Some(name))
    }
}

/// Something the resolver can read documents from.
pub trait DocumentSource {
    /// Loads the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NotFound`] when nothing exists at `path`,
    /// [`LoadError::Io`] for other read failures, and [`LoadError::Parse`]
    /// for malformed content.
    fn load(&self, path: &Path) -> Result<Document>;
}

impl<S: DocumentSource + ?Sized> DocumentSource for &S {
    fn load(&self, path: &Path) -> Result<Document> {
        (**self).load(path)
    }
}

/// Reads documents from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystemSource;

impl DocumentSource for FileSystemSource {
    fn load(&self, path: &Path) -> Result<Document> {
        debug!(path = %path.display(), "reading document");
        let file = File::open(path).map_err(|err| LoadError::from_io(path, err))?;
        let reader = BufReader::new(file);
        let root: Value = serde_json::from_reader(reader).map_err(|source| {
            if source.is_io() {
                LoadError::Io {
                    path: path.to_path_buf(),
                    source: source.into(),
                }
            } else {
                LoadError::Parse {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        Ok(Document::from_value(root))
    }
}

/// Loads one document from disk.
///
/// Shorthand for `FileSystemSource.load(path)`.
pub fn load_document(path: impl AsRef<Path>) -> Result<Document> {
    FileSystemSource.load(path.as_ref())
}

/// In-memory document set keyed by path.
///
/// # Examples
///
/// ```
/// use cdm_schema_loader::{DocumentSource, LoadError, MemorySource};
/// use serde_json::json;
///
/// let source = MemorySource::new()
///     .with_document("core/Account.cdm.json", json!({"definitions": []}));
///
/// assert!(source.load("core/Account.cdm.json".as_ref()).is_ok());
/// assert!(matches!(
///     source.load("core/Missing.cdm.json".as_ref()),
///     Err(LoadError::NotFound { .. })
/// ));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: HashMap<PathBuf, Value>,
}

impl MemorySource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document, replacing any existing entry for `path`.
    pub fn with_document(mut self, path: impl Into<PathBuf>, root: Value) -> Self {
        self.insert(path, root);
        self
    }

    /// Adds a document in place.
    pub fn insert(&mut self, path: impl Into<PathBuf>, root: Value) {
        self.documents.insert(path.into(), root);
    }

    /// Number of documents held.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns `true` if no documents are held.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentSource for MemorySource {
    fn load(&self, path: &Path) -> Result<Document> {
        self.documents
            .get(path)
            .cloned()
            .map(Document::from_value)
            .ok_or_else(|| LoadError::NotFound {
                path: path.to_path_buf(),
            })
    }
}
