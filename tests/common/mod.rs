#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use assert_cmd::Command;
use giftbook_storage_json::JsonRecordStorage;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A fresh application directory that lives for the whole test run.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// The CLI binary isolated under `home`, with colors off and no terminal on stdin.
pub fn giftbook(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("giftbook_cli").expect("binary is built");
    cmd.env("GIFTBOOK_HOME", home)
        .env("NO_COLOR", "1")
        .env("RUST_LOG", "off")
        .write_stdin("");
    cmd
}

/// The document store the CLI uses under `home` with the default config.
pub fn json_store(home: &Path) -> JsonRecordStorage {
    JsonRecordStorage::new(home.join("data")).expect("open json storage")
}
