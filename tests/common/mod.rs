//! Shared testing utilities for jellyserv CLI tests.

use std::collections::BTreeMap;
use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;
use zip::ZipArchive;

pub const BUNDLE: &str = "jellyserv-v6-setup.zip";

/// One extracted bundle entry.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Entry {
    pub contents: String,
    pub mode: u32,
}

/// Testing harness providing an isolated environment for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");

        Self { root, work_dir }
    }

    /// Absolute path to the emulated `$HOME` directory.
    pub fn home(&self) -> &Path {
        self.root.path()
    }

    /// Path to the directory used for CLI invocations.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for invoking the compiled `jellyserv` binary within the work directory.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("jellyserv").expect("Failed to locate jellyserv binary");
        cmd.current_dir(&self.work_dir).env("HOME", self.home()).env_remove("RUST_LOG");
        cmd
    }

    /// Write a file relative to the work directory.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.work_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Path where `gen` writes the bundle by default.
    pub fn bundle_path(&self) -> PathBuf {
        self.work_dir.join(BUNDLE)
    }

    /// Extract the bundle at `path` keyed by entry name.
    pub fn read_bundle_at(&self, path: &Path) -> BTreeMap<String, Entry> {
        let bytes = fs::read(path).expect("bundle should exist");
        let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("bundle should be a zip");
        let mut entries = BTreeMap::new();
        for index in 0..archive.len() {
            let mut file = archive.by_index(index).expect("readable entry");
            let mut contents = String::new();
            file.read_to_string(&mut contents).expect("UTF-8 entry");
            let mode = file.unix_mode().unwrap_or(0) & 0o777;
            entries.insert(file.name().to_string(), Entry { contents, mode });
        }
        entries
    }

    /// Extract the default bundle.
    pub fn read_bundle(&self) -> BTreeMap<String, Entry> {
        self.read_bundle_at(&self.bundle_path())
    }

    /// Parse `KEY=value` lines of a settings file.
    pub fn env_values(content: &str) -> BTreeMap<String, String> {
        content
            .lines()
            .filter(|line| !line.starts_with('#') && !line.is_empty())
            .filter_map(|line| line.split_once('='))
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }
}
