//! File output port for exports
//!
//! Encoders only produce strings. Writing them somewhere goes through an
//! [`OutputSink`], so the export logic stays free of file-system calls and can
//! be tested with [`MemorySink`].

use log::info;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Destination for exported files
pub trait OutputSink {
    /// Store `contents` under `path`, creating parent directories as needed
    ///
    /// `path` is relative to the sink's root (for example `parts/wing.srf`).
    fn write_file(&mut self, path: &Path, contents: &str) -> Result<()>;
}

/// Writes files below a root directory
#[derive(Debug, Clone)]
pub struct FileSystemSink {
    root: PathBuf,
}

impl FileSystemSink {
    /// Create a sink rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Sink rooted at the directory that contains `file`
    ///
    /// Side files of an exploded export live next to the main DNM file.
    pub fn beside(file: impl AsRef<Path>) -> Self {
        let parent = file
            .as_ref()
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self::new(parent)
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl OutputSink for FileSystemSink {
    fn write_file(&mut self, path: &Path, contents: &str) -> Result<()> {
        let full = self.root.join(path);
        if let Some(dir) = full.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).map_err(|e| Error::file_io(dir, e))?;
            }
        }
        fs::write(&full, contents).map_err(|e| Error::file_io(&full, e))?;
        info!("Wrote {} ({} bytes)", full.display(), contents.len());
        Ok(())
    }
}

/// Keeps written files in memory, keyed by relative path
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    files: BTreeMap<PathBuf, String>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents written to `path`, if any
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }

    /// All written files in path order
    pub fn files(&self) -> &BTreeMap<PathBuf, String> {
        &self.files
    }
}

impl OutputSink for MemorySink {
    fn write_file(&mut self, path: &Path, contents: &str) -> Result<()> {
        self.files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}
