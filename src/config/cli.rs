use crate::core::Storage;
use crate::utils::error::{ConvertError, Result};
use std::fs;
use std::path::Path;

/// Filesystem storage rooted at a base directory. The CLI roots it at
/// the working directory so the output lands next to the caller.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        fs::read(&full_path).map_err(|source| ConvertError::FileAccess {
            path: full_path.display().to_string(),
            source,
        })
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        fs::write(&full_path, data).map_err(|source| ConvertError::WriteError {
            path: full_path.display().to_string(),
            source,
        })
    }
}
