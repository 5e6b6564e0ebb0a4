use crate::ports::required::StorageClient;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// One JSON file per key under a directory.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// reader never sees a half-written snapshot.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `key` with every character outside `[A-Za-z0-9_.-]` replaced by `_`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| match c {
                'A'..='Z' | 'a'..='z' | '0'..='9' | '_' | '-' | '.' => c,
                _ => '_',
            })
            .collect();
        self.dir.join(format!("{}.json", file_name))
    }
}

impl StorageClient for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(format!("FileStorage::get: {}: {}", path.display(), e)),
        }
    }

    fn set(&self, key: &str, value: String) -> Result<(), String> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| format!("FileStorage::set: {}: {}", self.dir.display(), e))?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)
            .map_err(|e| format!("FileStorage::set: {}: {}", tmp.display(), e))?;
        fs::rename(&tmp, &path)
            .map_err(|e| format!("FileStorage::set: {}: {}", path.display(), e))
    }

    fn remove(&self, key: &str) -> Result<bool, String> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(format!("FileStorage::remove: {}: {}", path.display(), e)),
        }
    }
}
