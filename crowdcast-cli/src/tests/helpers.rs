//! Test helpers for temporary workspaces and captured output.

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// Temporary directory exposed as a UTF-8 path.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root =
            Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write file");
}

pub(super) fn parse_output(buffer: &[u8]) -> serde_json::Value {
    let text = std::str::from_utf8(buffer).expect("stdout utf-8");
    serde_json::from_str(text).expect("output should be JSON")
}
