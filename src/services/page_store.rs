use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use log::{debug, error, info, warn};
use tempfile::NamedTempFile;

use crate::errors::WikiError;
use crate::types::PageName;

const RECORD_SUFFIX: &str = ".txt";

/// Flat keyed storage of page bodies, one `<name>.txt` file per page
#[derive(Clone, Debug)]
pub struct PageStore {
    root: Arc<PathBuf>,
}

impl PageStore {
    /// Open the store, creating the root directory if it is missing
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, WikiError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| {
            error!("Failed to create page directory {:?}: {}", root, e);
            WikiError::Io(e)
        })?;
        debug!("Opened page store at {:?}", root);
        Ok(Self { root: Arc::new(root) })
    }

    fn record_path(&self, name: &PageName) -> PathBuf {
        self.root.join(format!("{}{}", name, RECORD_SUFFIX))
    }

    /// Persist `body` under `name`, replacing any existing record.
    ///
    /// The body goes to a temporary file in the same directory and is renamed
    /// over the record, so readers see either the old or the new content.
    pub fn put(&self, name: &PageName, body: &[u8]) -> Result<(), WikiError> {
        let path = self.record_path(name);
        debug!("Writing page {} to {:?}", name, path);

        // NamedTempFile is created with owner-only permissions on Unix
        let mut tmp = NamedTempFile::new_in(self.root.as_path())?;
        tmp.write_all(body)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| {
            error!("Failed to replace {:?}: {}", path, e.error);
            WikiError::Io(e.error)
        })?;

        info!("Saved page {}, {} bytes", name, body.len());
        Ok(())
    }

    /// Read the raw body stored under `name`
    pub fn get(&self, name: &PageName) -> Result<Vec<u8>, WikiError> {
        let path = self.record_path(name);
        match fs::read(&path) {
            Ok(body) => {
                debug!("Read page {}, {} bytes", name, body.len());
                Ok(body)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No record for page {}", name);
                Err(WikiError::NotFound)
            }
            Err(e) => {
                error!("Failed to read page {:?}: {}", path, e);
                Err(WikiError::Io(e))
            }
        }
    }

    /// Names of every stored page, in directory enumeration order
    pub fn list(&self) -> Result<Vec<PageName>, WikiError> {
        let entries = fs::read_dir(self.root.as_path()).map_err(|e| {
            error!("Failed to read page directory {:?}: {}", self.root, e);
            WikiError::Io(e)
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Failed to read directory entry: {}", e);
                    continue;
                }
            };
            let is_file = entry.file_type().map(|ft| ft.is_file()).unwrap_or(false);
            if !is_file {
                continue;
            }
            let file_name = entry.file_name();
            let Some(stem) = file_name.to_str().and_then(|n| n.strip_suffix(RECORD_SUFFIX)) else {
                continue;
            };
            match PageName::parse(stem) {
                Ok(name) => names.push(name),
                Err(_) => debug!("Skipping non-page file {:?}", file_name),
            }
        }

        debug!("Listed {} pages", names.len());
        Ok(names)
    }
}
