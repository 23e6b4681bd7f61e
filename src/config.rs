use std::env;
use std::path::{Path, PathBuf};

pub const CONTENT_FILE_NAME: &str = "content.json";
pub const UPLOAD_DIR_NAME: &str = "uploads";

/// URL prefix every gallery entry must reference; entries outside it are
/// discarded during normalization.
pub const UPLOAD_URL_PREFIX: &str = "/uploads/";

/// Storage locations for the content document and the managed upload
/// directory, resolved once at startup and injected into the store.
#[derive(Debug, Clone)]
pub struct ContentPaths {
    pub data_dir: PathBuf,
    pub content_file: PathBuf,
    pub upload_dir: PathBuf,
}

impl ContentPaths {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        Self {
            content_file: data_dir.join(CONTENT_FILE_NAME),
            upload_dir: data_dir.join(UPLOAD_DIR_NAME),
            data_dir,
        }
    }

    /// Resolves the data directory from `DATA_DIR`, defaulting to `./data`.
    pub fn from_env() -> Self {
        let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());
        Self::new(data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::ContentPaths;
    use std::path::Path;

    #[test]
    fn derives_file_locations_from_data_dir() {
        let paths = ContentPaths::new("/srv/site/data");
        assert_eq!(paths.data_dir, Path::new("/srv/site/data"));
        assert_eq!(paths.content_file, Path::new("/srv/site/data/content.json"));
        assert_eq!(paths.upload_dir, Path::new("/srv/site/data/uploads"));
    }
}
