//! Error types for SURF/DNM encoding and decoding
//!
//! All errors carry an error code for categorization and enough context
//! (line number, raw line, file path) to find the offending input.
//!
//! # Error Codes
//!
//! Error codes follow the pattern: `E<category><number>`
//!
//! Categories:
//! - **E1xxx**: I/O errors
//! - **E2xxx**: Text format errors
//! - **E3xxx**: Model and reference errors
//!
//! ## Common Error Codes
//!
//! - `E1001`: I/O error without a known path
//! - `E1002`: I/O error on a specific file or directory
//! - `E2001`: Malformed or out-of-grammar line
//! - `E3001`: Index that does not resolve (vertex, material, face, uid)
//! - `E3002`: Model invariant violated before writing

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for SURF/DNM operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or writing SURF/DNM data
#[derive(Error, Debug)]
pub enum Error {
    /// IO error without an associated path
    ///
    /// **Error Code**: E1001
    #[error("[E1001] I/O error: {0}")]
    Io(#[from] io::Error),

    /// IO error on a concrete file or directory
    ///
    /// **Error Code**: E1002
    ///
    /// **Common Causes**:
    /// - Output directory is not writable
    /// - Input file does not exist
    /// - `parts/` directory could not be created for an exploded export
    #[error("[E1002] I/O error on '{}': {source}", path.display())]
    FileIo {
        /// Path that was being read, written or created
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Malformed or out-of-grammar line
    ///
    /// **Error Code**: E2001
    ///
    /// **Common Causes**:
    /// - Non-numeric coordinate, color or index token
    /// - `C` directive with the wrong number of channels
    /// - Directive outside the section where it is allowed
    /// - Input ends before the surface block is terminated
    #[error("[E2001] Format error at line {line}: {message} (line: '{content}')")]
    Format {
        /// 1-based line number
        line: usize,
        /// Raw line content
        content: String,
        /// What was wrong with the line
        message: String,
    },

    /// Reference that does not resolve
    ///
    /// **Error Code**: E3001
    ///
    /// **Common Causes**:
    /// - Face vertex index beyond the vertex list
    /// - `ZA` entry naming a face that does not exist
    /// - Face material slot beyond the mesh's material list
    /// - `CLD` naming a uid that no SRF block declares
    #[error("[E3001] Reference error: {0}")]
    Reference(String),

    /// Surface or document that violates a model invariant
    ///
    /// **Error Code**: E3002
    #[error("[E3002] Invalid surface: {0}")]
    InvalidSurface(String),
}

impl Error {
    /// Create a format error for a given line
    pub fn format(line: usize, content: &str, message: impl Into<String>) -> Self {
        Error::Format {
            line,
            content: content.to_string(),
            message: message.into(),
        }
    }

    /// Create a reference error that points at a source line
    pub fn reference_at(line: usize, message: impl AsRef<str>) -> Self {
        Error::Reference(format!("line {}: {}", line, message.as_ref()))
    }

    /// Wrap an I/O error with the path it happened on
    pub fn file_io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Error::FileIo {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Line number of a format error, if this is one
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Format { line, .. } => Some(*line),
            _ => None,
        }
    }
}
