use std::fs;
use std::io::Write;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::document::WorldDocument;
use crate::error::{StoreError, StoreResult};

/// A world document bound to a file on disk.
///
/// The document is loaded and saved wholesale. There is no locking: two
/// processes saving the same file race, and the last writer wins.
#[derive(Debug)]
pub struct WorldStore {
    path: PathBuf,
    document: Option<WorldDocument>,
}

impl WorldStore {
    /// Bind a store to a file without loading it.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            document: None,
        }
    }

    /// Bind a store to a file and load it.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let mut store = Self::new(path);
        store.load()?;
        Ok(store)
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole document from disk, replacing whatever is in memory.
    pub fn load(&mut self) -> StoreResult<&WorldDocument> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(self.path.clone()));
            }
            Err(source) => {
                tracing::error!(path = %self.path.display(), error = %source, "world load failed");
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let document: WorldDocument =
            serde_json::from_str(&text).map_err(|e| StoreError::Parse {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        tracing::debug!(path = %self.path.display(), "world loaded");
        Ok(self.document.insert(document))
    }

    /// Write the whole document to disk.
    ///
    /// Keys are sorted and indented by two spaces. The file is replaced
    /// atomically: the text goes to a temporary file beside it, which is then
    /// renamed over the target.
    pub fn save(&self) -> StoreResult<()> {
        let document = self.document()?;
        let io_err = |source: std::io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        let text = serde_json::to_string_pretty(document)
            .map_err(|e| io_err(std::io::Error::other(e)))?;

        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
        tmp.write_all(text.as_bytes()).map_err(io_err)?;
        tmp.persist(&self.path).map_err(|e| io_err(e.error))?;

        tracing::info!(path = %self.path.display(), bytes = text.len(), "world saved");
        Ok(())
    }

    /// The loaded document.
    pub fn document(&self) -> StoreResult<&WorldDocument> {
        self.document.as_ref().ok_or(StoreError::NotLoaded)
    }

    /// The loaded document, mutably. Changes stay in memory until [`save`](Self::save).
    pub fn document_mut(&mut self) -> StoreResult<&mut WorldDocument> {
        self.document.as_mut().ok_or(StoreError::NotLoaded)
    }

    /// Install a document without reading the file (e.g. when creating one).
    pub fn replace(&mut self, document: WorldDocument) {
        self.document = Some(document);
    }

    /// Start a scoped change set over the loaded document.
    ///
    /// The transaction works on a copy. [`WorldTransaction::commit`] installs
    /// the copy and saves it; dropping the transaction without committing
    /// leaves the store exactly as it was.
    pub fn transaction(&mut self) -> StoreResult<WorldTransaction<'_>> {
        let working = self.document()?.clone();
        Ok(WorldTransaction {
            store: self,
            working,
        })
    }
}

/// A pending change set. Dereferences to the working copy of the document.
#[derive(Debug)]
pub struct WorldTransaction<'s> {
    store: &'s mut WorldStore,
    working: WorldDocument,
}

impl WorldTransaction<'_> {
    /// Install the working copy and flush it to disk.
    ///
    /// If the flush fails the store keeps its previous document.
    pub fn commit(self) -> StoreResult<()> {
        let previous = self.store.document.replace(self.working);
        if let Err(e) = self.store.save() {
            self.store.document = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Throw the working copy away.
    pub fn discard(self) {
        tracing::debug!(path = %self.store.path.display(), "transaction discarded");
    }
}

impl Deref for WorldTransaction<'_> {
    type Target = WorldDocument;

    fn deref(&self) -> &Self::Target {
        &self.working
    }
}

impl DerefMut for WorldTransaction<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.working
    }
}
