use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// JsonConnection manages the on-disk document store: one directory per
/// collection, one pretty-printed JSON file per document, named by the
/// document ID.
#[derive(Clone)]
pub struct JsonConnection {
    base_directory: PathBuf,
}

impl JsonConnection {
    /// Create a new connection rooted at the given base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .with_context(|| format!("Failed to create data directory {}", base_path.display()))?;
        }

        Ok(Self { base_directory: base_path })
    }

    /// Create a connection in the default data directory.
    /// Uses FEEDER_DATA_DIR when set, otherwise ~/.feeder.
    pub fn new_default() -> Result<Self> {
        if let Ok(dir) = std::env::var("FEEDER_DATA_DIR") {
            info!("Using data directory from FEEDER_DATA_DIR: {}", dir);
            return Self::new(dir);
        }

        let home_dir = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| anyhow::anyhow!("Could not determine home directory"))?;

        let data_dir = PathBuf::from(home_dir).join(".feeder");
        info!("Using default data directory: {}", data_dir.display());
        Self::new(data_dir)
    }

    /// Get the base directory path
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Get the directory path for a collection, creating it if needed
    fn collection_dir(&self, collection: &str) -> Result<PathBuf> {
        let dir = self.base_directory.join(collection);
        if !dir.exists() {
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create collection directory {}", dir.display()))?;
        }
        Ok(dir)
    }

    fn document_path(&self, collection: &str, id: &str) -> Result<PathBuf> {
        Ok(self.collection_dir(collection)?.join(format!("{}.json", id)))
    }

    /// Read a single document by ID
    pub fn read_document<T: DeserializeOwned>(&self, collection: &str, id: &str) -> Result<Option<T>> {
        let path = self.document_path(collection, id)?;

        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read document {}", path.display()))?;
        let doc = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse document {}", path.display()))?;

        Ok(Some(doc))
    }

    /// Write a document, replacing any existing one with the same ID.
    /// The write goes through a temp file and rename so readers never see
    /// a half-written document.
    pub fn write_document<T: Serialize>(&self, collection: &str, id: &str, doc: &T) -> Result<()> {
        let path = self.document_path(collection, id)?;
        let content = serde_json::to_string_pretty(doc)?;

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, &path)?;

        debug!("Wrote document {}/{}", collection, id);
        Ok(())
    }

    /// Create a document only if no document with the same ID exists.
    /// Returns false when the ID is already taken. The exclusive create is
    /// the store-level uniqueness guard for deterministic keys: two
    /// concurrent creators cannot both succeed.
    pub fn create_document<T: Serialize>(&self, collection: &str, id: &str, doc: &T) -> Result<bool> {
        let path = self.document_path(collection, id)?;
        let content = serde_json::to_string_pretty(doc)?;

        let mut file = match fs::OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                debug!("Document {}/{} already exists", collection, id);
                return Ok(false);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to create document {}", path.display()))
            }
        };

        file.write_all(content.as_bytes())?;
        debug!("Created document {}/{}", collection, id);
        Ok(true)
    }

    /// Delete a document by ID.
    /// Returns true if the document existed and was deleted.
    pub fn delete_document(&self, collection: &str, id: &str) -> Result<bool> {
        let path = self.document_path(collection, id)?;

        if !path.exists() {
            return Ok(false);
        }

        fs::remove_file(&path)
            .with_context(|| format!("Failed to delete document {}", path.display()))?;
        debug!("Deleted document {}/{}", collection, id);
        Ok(true)
    }

    /// Load every document in a collection. Files that fail to parse are
    /// skipped with a warning rather than failing the whole scan.
    pub fn scan_collection<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>> {
        let dir = self.base_directory.join(collection);

        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut docs = Vec::new();

        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            let content = fs::read_to_string(&path)?;
            match serde_json::from_str(&content) {
                Ok(doc) => docs.push(doc),
                Err(e) => {
                    warn!("Skipping unreadable document {}: {}", path.display(), e);
                }
            }
        }

        Ok(docs)
    }
}
