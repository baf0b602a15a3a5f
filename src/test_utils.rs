//! Test utilities for creating temporary directory trees.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory populated with files and subdirectories.
///
/// The directory is automatically cleaned up when dropped.
pub struct TestDir {
    dir: TempDir,
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDir {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Create a file (and its parent directories) with the given content.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Create a file of exactly `size` bytes.
    pub fn add_sized_file(&self, path: &str, size: usize) -> PathBuf {
        self.add_file(path, &"x".repeat(size))
    }

    /// Create an (empty) directory and its parents.
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Populate a wide and deep tree: `dirs_per_level` directories per level,
    /// `files_per_dir` files in each, down to `depth` levels.
    pub fn populate(&self, depth: usize, dirs_per_level: usize, files_per_dir: usize) {
        fn fill(root: &Path, depth: usize, dirs: usize, files: usize) {
            for f in 0..files {
                fs::write(root.join(format!("file_{f}.txt")), "content")
                    .expect("Failed to write file");
            }
            if depth == 0 {
                return;
            }
            for d in 0..dirs {
                let sub = root.join(format!("dir_{d}"));
                fs::create_dir_all(&sub).expect("Failed to create dir");
                fill(&sub, depth - 1, dirs, files);
            }
        }
        fill(self.dir.path(), depth, dirs_per_level, files_per_dir);
    }
}
