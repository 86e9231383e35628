use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Fixture directory shared with the integration tests.
pub fn testdata_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("testdata")
}

pub fn testdata(name: &str) -> PathBuf {
    testdata_dir().join(name)
}

/// Serialized `tutorial.Person { name: "Jim" id: 42 email: "jim@example.com"
/// phones { number: "555-1212" type: HOME } }`.
pub const PERSON_JIM: &[u8] =
    b"\n\x03Jim\x10*\x1a\x0fjim@example.com\"\x0c\n\x08555-1212\x10\x01";

pub struct TestEnv {
    // Keeps the directory alive until the test is done
    pub _temp_dir: TempDir,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Writes a format file into the scratch directory and returns its path.
    pub fn format_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.root.join(name);
        std::fs::write(&path, contents).expect("failed to write format file");
        path
    }
}
