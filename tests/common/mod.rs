#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }
}

/// A small feed with one invalid row (missing price).
pub const SAMPLE_FEED: &str = "\
Номер частини,Виробник,Назва частини,Фото,К-ть,Ціна,Код валюти,Наявність,Категорія\n\
AB123,Toyota,Фільтр оливи,a.jpg|b.jpg,2,\"1 234,50 грн.\",,в наявності,\n\
CD456,Honda,Свічка запалювання,,0,99.99,840,немає,\n\
EF789,,Колодки гальмівні,,5,250,,,\n\
XX000,Bosch,Без ціни,,1,,,,\n";
