// Mon Jan 19 2026 - Alex

use std::path::{Path, PathBuf};

/// Ordered list of directories searched for headers.
#[derive(Debug, Clone, Default)]
pub struct IncludePath {
    dirs: Vec<PathBuf>,
}

impl IncludePath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dirs<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn add_dir<P: Into<PathBuf>>(&mut self, dir: P) {
        let dir = dir.into();
        if !self.dirs.contains(&dir) {
            self.dirs.push(dir);
        }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// First existing file among the header as given and the header joined
    /// onto each directory, in order.
    pub fn find(&self, header: &str) -> Option<PathBuf> {
        let direct = Path::new(header);
        if direct.is_file() {
            return Some(direct.to_path_buf());
        }
        if direct.is_absolute() {
            return None;
        }
        self.dirs
            .iter()
            .map(|dir| dir.join(header))
            .find(|candidate| candidate.is_file())
    }
}
