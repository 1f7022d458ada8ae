//! Export paths and the file-save seam
//!
//! Renderers produce a [`Blob`]; a [`FileSaver`] decides where it ends up.

pub mod pdf;
pub mod word;

use crate::error::{Error, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Rendered file contents
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blob {
    pub bytes: Vec<u8>,
    pub mime: &'static str,
}

impl Blob {
    pub fn new(bytes: Vec<u8>, mime: &'static str) -> Self {
        Self { bytes, mime }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Where a saved blob went
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavedFile {
    pub filename: String,
    /// Filesystem path, for savers that write to disk
    pub path: Option<PathBuf>,
    pub size: usize,
}

/// Saves a rendered blob under a file name
pub trait FileSaver {
    fn save_blob(&mut self, blob: &Blob, filename: &str) -> Result<SavedFile>;
}

/// Writes blobs into a directory, overwriting files of the same name
#[derive(Clone, Debug)]
pub struct DirectorySaver {
    dir: PathBuf,
}

impl DirectorySaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FileSaver for DirectorySaver {
    fn save_blob(&mut self, blob: &Blob, filename: &str) -> Result<SavedFile> {
        // Only the final component is used so a name can't escape the directory
        let name = Path::new(filename)
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                Error::Io(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("not a file name: '{}'", filename),
                ))
            })?;

        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(name);
        fs::write(&path, &blob.bytes)?;
        log::debug!("saved {} ({} bytes) to {}", name, blob.len(), path.display());

        Ok(SavedFile {
            filename: name.to_string(),
            path: Some(path),
            size: blob.len(),
        })
    }
}

/// Keeps saved blobs in memory, in save order
#[derive(Clone, Debug, Default)]
pub struct MemorySaver {
    pub files: Vec<(String, Blob)>,
}

impl MemorySaver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently saved blob with this name
    pub fn get(&self, filename: &str) -> Option<&Blob> {
        self.files
            .iter()
            .rev()
            .find(|(name, _)| name == filename)
            .map(|(_, blob)| blob)
    }
}

impl FileSaver for MemorySaver {
    fn save_blob(&mut self, blob: &Blob, filename: &str) -> Result<SavedFile> {
        self.files.push((filename.to_string(), blob.clone()));
        Ok(SavedFile {
            filename: filename.to_string(),
            path: None,
            size: blob.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("richdoc-export-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_directory_saver_writes_and_overwrites() {
        let dir = scratch_dir("saver");
        let mut saver = DirectorySaver::new(&dir);

        saver
            .save_blob(&Blob::new(b"first".to_vec(), "text/plain"), "out.txt")
            .unwrap();
        let saved = saver
            .save_blob(&Blob::new(b"second".to_vec(), "text/plain"), "out.txt")
            .unwrap();

        assert_eq!(saved.filename, "out.txt");
        assert_eq!(saved.size, 6);
        assert_eq!(fs::read(dir.join("out.txt")).unwrap(), b"second");
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_directory_saver_strips_directories() {
        let dir = scratch_dir("strip");
        let mut saver = DirectorySaver::new(&dir);
        let saved = saver
            .save_blob(&Blob::new(Vec::new(), "text/plain"), "../../escape.txt")
            .unwrap();
        assert_eq!(saved.path, Some(dir.join("escape.txt")));

        assert!(saver
            .save_blob(&Blob::new(Vec::new(), "text/plain"), "..")
            .is_err());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_memory_saver_latest_wins() {
        let mut saver = MemorySaver::new();
        saver.save_blob(&Blob::new(vec![1], "a/b"), "x").unwrap();
        saver.save_blob(&Blob::new(vec![2], "a/b"), "x").unwrap();
        assert_eq!(saver.get("x").unwrap().bytes, vec![2]);
        assert!(saver.get("y").is_none());
    }
}
