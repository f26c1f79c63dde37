//! Shared utilities for conformance tests
//!
//! Expectations for the fixture files live in tests/fixtures/expected.json:
//! element counts for every positive fixture and the error code every
//! negative fixture must fail with.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use surfdnm::DnmDocument;

/// Location of the expectations file, relative to the package root
pub const EXPECTED_PATH: &str = "tests/fixtures/expected.json";

/// Element counts a positive fixture must decode to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedCounts {
    /// Fixture file name (e.g., "biplane.dnm")
    pub file: String,
    /// Number of PCK blocks, 1 for a bare SURF file
    pub surfaces: usize,
    /// Number of SRF blocks
    pub nodes: usize,
    /// Vertices summed over all surfaces
    pub vertices: usize,
    /// Faces summed over all surfaces
    pub faces: usize,
    /// Material table entries summed over all surfaces
    pub materials: usize,
    /// ZA entries summed over all surfaces
    pub transparent_faces: usize,
}

impl ExpectedCounts {
    /// Count the elements of a decoded document under the given file name
    pub fn of(file: &str, document: &DnmDocument) -> Self {
        let surfaces = &document.surfaces;
        Self {
            file: file.to_string(),
            surfaces: surfaces.len(),
            nodes: document.nodes.len(),
            vertices: surfaces.iter().map(|s| s.geometry.vertices.len()).sum(),
            faces: surfaces.iter().map(|s| s.geometry.faces.len()).sum(),
            materials: surfaces.iter().map(|s| s.materials.len()).sum(),
            transparent_faces: surfaces.iter().map(|s| s.transparency.len()).sum(),
        }
    }
}

/// Error a negative fixture must produce
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpectedError {
    /// Fixture file name
    pub file: String,
    /// Error code that must appear in the message (e.g., "E2001")
    pub error_code: String,
    /// Why the fixture is invalid
    pub reason: String,
}

/// Container for all expectations
#[derive(Debug, Serialize, Deserialize)]
pub struct ExpectationsConfig {
    pub positive: Vec<ExpectedCounts>,
    pub negative: Vec<ExpectedError>,
}

/// Lookup of expectations by fixture file name
#[derive(Debug, Clone, Default)]
pub struct Expectations {
    positive: HashMap<String, ExpectedCounts>,
    negative: HashMap<String, ExpectedError>,
}

impl Expectations {
    /// Load the expectations file
    ///
    /// Panics with the offending path when the file is missing or malformed,
    /// so a broken fixture set fails loudly instead of running zero checks.
    pub fn load() -> Self {
        let content = fs::read_to_string(EXPECTED_PATH).unwrap_or_else(|e| {
            panic!(
                "Failed to read {} (current dir: {:?}): {}",
                Path::new(EXPECTED_PATH).display(),
                std::env::current_dir().ok(),
                e
            )
        });
        let config: ExpectationsConfig = serde_json::from_str(&content)
            .unwrap_or_else(|e| panic!("Failed to parse {}: {}", EXPECTED_PATH, e));

        Self {
            positive: config
                .positive
                .into_iter()
                .map(|c| (c.file.clone(), c))
                .collect(),
            negative: config
                .negative
                .into_iter()
                .map(|e| (e.file.clone(), e))
                .collect(),
        }
    }

    /// Expected counts for a positive fixture
    pub fn counts(&self, file: &str) -> Option<&ExpectedCounts> {
        self.positive.get(file)
    }

    /// Expected error for a negative fixture
    pub fn error(&self, file: &str) -> Option<&ExpectedError> {
        self.negative.get(file)
    }
}
