//! Shared test fixtures and utilities for integration tests.
//!
//! Tests that load payloads through [`DocState`] write `.index` cache files
//! next to the payload, so they work on copies inside a temporary directory
//! rather than on `tests/fixtures/` directly.

use documenter_search::DocState;
use rstest::fixture;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Seven-entry bare JSON payload.
pub const SAMPLE_JSON: &str = "sample_index.json";
/// Full script-wrapped payload as emitted by a documentation build.
pub const SEARCH_INDEX_JS: &str = "search_index.js";

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

pub fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(fixtures_dir().join(name)).expect("fixture should be readable")
}

/// Temporary directory holding copies of every fixture payload.
#[allow(dead_code)] // Used across different integration test crates
pub struct FixtureDir {
    temp: TempDir,
    pub state: Arc<DocState>,
}

#[allow(dead_code)]
impl FixtureDir {
    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn payload(&self, name: &str) -> PathBuf {
        self.temp.path().join(name)
    }

    pub fn payload_str(&self, name: &str) -> String {
        self.payload(name).display().to_string()
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp.path().join(name);
        std::fs::write(&path, content).expect("failed to write payload");
        path
    }
}

#[fixture]
pub fn fixture_dir() -> FixtureDir {
    documenter_search::tracing::init();

    let temp = TempDir::new().expect("failed to create temp dir");
    for name in [SAMPLE_JSON, SEARCH_INDEX_JS] {
        std::fs::copy(fixtures_dir().join(name), temp.path().join(name)).expect("failed to copy fixture");
    }

    FixtureDir {
        temp,
        state: Arc::new(DocState::new()),
    }
}
