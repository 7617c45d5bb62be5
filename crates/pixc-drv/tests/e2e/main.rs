//! End-to-end tests for the `pixc` binary.

mod cli_tests;
mod compilation_tests;

use std::path::PathBuf;

/// Path to the fixtures directory.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("e2e")
        .join("fixtures")
}

/// Path to the compiled pixc binary.
pub fn pixc_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_pixc"))
}
