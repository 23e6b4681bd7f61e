use crate::config::ContentPaths;
use crate::defaults::DEFAULT_CONTENT;
use crate::errors::{ContentError, ContentResult};
use crate::models::ContentDocument;
use crate::normalize::normalize;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Owns the on-disk content document. Every operation re-reads the file; the
/// only concurrency guarantee is that readers never observe a torn write,
/// provided by the write-temp-then-rename sequence.
#[derive(Debug, Clone)]
pub struct ContentStore {
    paths: ContentPaths,
}

impl ContentStore {
    pub fn new(paths: ContentPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &ContentPaths {
        &self.paths
    }

    /// Creates the data and upload directories and seeds the default
    /// document when no content file exists yet. Called once at startup,
    /// before any request is served.
    pub fn ensure_initialized(&self) -> ContentResult<()> {
        fs::create_dir_all(&self.paths.upload_dir)?;
        if !self.paths.content_file.exists() {
            self.write_document(&DEFAULT_CONTENT)?;
            tracing::info!(
                path = %self.paths.content_file.display(),
                "seeded default content document"
            );
        }
        Ok(())
    }

    /// Reads and re-normalizes the persisted document. The file's own valid
    /// fields win; built-in defaults fill whatever it lacks, so a hand-edited
    /// or schema-drifted file self-heals on read. A missing file yields the
    /// defaults; unparseable contents surface as `Schema` for the caller's
    /// reinitialize-or-fail policy.
    pub fn load(&self) -> ContentResult<ContentDocument> {
        let bytes = match fs::read(&self.paths.content_file) {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                tracing::debug!(
                    path = %self.paths.content_file.display(),
                    "content file missing; serving built-in defaults"
                );
                return Ok(DEFAULT_CONTENT.clone());
            }
            Err(error) => return Err(ContentError::Io(error.to_string())),
        };
        let parsed: Value = serde_json::from_slice(&bytes)
            .map_err(|error| ContentError::Schema(error.to_string()))?;
        Ok(normalize(&parsed, &DEFAULT_CONTENT))
    }

    /// Merges an arbitrary candidate payload onto the current document,
    /// normalizes, and persists atomically. Returns the saved document.
    pub fn save(&self, candidate: &Value) -> ContentResult<ContentDocument> {
        let current = self.load()?;
        let normalized = normalize(candidate, &current);
        self.write_document(&normalized)?;
        Ok(normalized)
    }

    // Rename is the only step that touches the visible file, so a failure
    // while writing the temp file leaves the previous document intact.
    fn write_document(&self, document: &ContentDocument) -> ContentResult<()> {
        if let Some(parent) = self.paths.content_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec_pretty(document)
            .map_err(|error| ContentError::Internal(error.to_string()))?;
        let temp = self.temp_path();
        if let Err(error) = fs::write(&temp, &bytes) {
            let _ = fs::remove_file(&temp);
            return Err(ContentError::Io(error.to_string()));
        }
        if let Err(error) = fs::rename(&temp, &self.paths.content_file) {
            let _ = fs::remove_file(&temp);
            return Err(ContentError::Io(error.to_string()));
        }
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .paths
            .content_file
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| "content.json".into());
        name.push(".tmp");
        self.paths.content_file.with_file_name(name)
    }
}
