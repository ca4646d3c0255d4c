// Results file discovery

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Extension of serialized benchmark cases
pub const RESULTS_EXTENSION: &str = "json";

/// File utilities for locating and reading benchmark results
pub struct FileUtils;

impl FileUtils {
    /// Collect all results files from a file or directory path.
    ///
    /// Directories are walked recursively; hidden entries below the root are skipped.
    /// The returned list is sorted by path so report order is stable.
    pub fn collect_results_files(path: &Path) -> Vec<PathBuf> {
        let mut files = Vec::new();

        if path.is_file() {
            if Self::is_results_file(path) {
                files.push(path.to_path_buf());
            }
        } else if path.is_dir() {
            let walker = walkdir::WalkDir::new(path).into_iter().filter_entry(|e| {
                if e.depth() == 0 {
                    return true;
                }
                !e.file_name().to_string_lossy().starts_with('.')
            });

            for entry in walker.flatten() {
                if entry.file_type().is_file() && Self::is_results_file(entry.path()) {
                    files.push(entry.path().to_path_buf());
                }
            }
        }

        files.sort();
        files
    }

    /// Check if file has the results extension
    pub fn is_results_file(path: &Path) -> bool {
        path.extension().is_some_and(|e| e == RESULTS_EXTENSION)
    }

    /// Read file content
    pub fn read_file(path: &Path) -> Result<String> {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }
}
