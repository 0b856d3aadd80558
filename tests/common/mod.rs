#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the cpp-style-guard binary.
#[macro_export]
macro_rules! cpp_style_guard {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("cpp-style-guard"))
    };
}

/// Creates a temporary directory with test fixtures for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Creates a new test fixture with an empty temp directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        self.create_bytes(relative_path, content.as_bytes());
    }

    /// Creates a file with raw bytes, e.g. for encoding errors.
    pub fn create_bytes(&self, relative_path: &str, content: &[u8]) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    /// Returns the path to the temp directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Creates `.cpp-style-guard.toml` in the fixture root.
    pub fn create_config(&self, content: &str) {
        self.create_file(".cpp-style-guard.toml", content);
    }

    /// Reads a file from the fixture.
    pub fn read(&self, relative_path: &str) -> String {
        fs::read_to_string(self.dir.path().join(relative_path)).expect("Failed to read file")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A header with no violations.
pub const CLEAN_HEADER: &str = "\
#pragma once

int computeTotal(int count);
";

/// An implementation file with no violations.
pub const CLEAN_SOURCE: &str = "int g_counter = 0;\n";

/// One `enum-class` error.
pub const PLAIN_ENUM_SOURCE: &str = "enum Color { RED, GREEN };\n";

/// One `header-hygiene` warning.
pub const UMBRELLA_SOURCE: &str = "#include <bits/stdc++.h>\n\nint g_counter = 0;\n";

/// Minimal valid config.
pub const BASIC_CONFIG: &str = r#"
version = "1"
max_line_width = 100
"#;
