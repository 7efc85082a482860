// Mon Jan 19 2026 - Alex

use crate::output::OutputMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input: Option<PathBuf>,
    /// Standard output when unset.
    pub output: Option<PathBuf>,
    pub hierarchy_file: Option<PathBuf>,
    pub hints_file: Option<PathBuf>,
    pub include_dirs: Vec<PathBuf>,
    pub output_mode: OutputMode,
    pub force_concrete: bool,
    pub force_abstract: bool,
    pub group_properties: bool,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            hierarchy_file: None,
            hints_file: None,
            include_dirs: Vec::new(),
            output_mode: OutputMode::Attributes,
            force_concrete: false,
            force_abstract: false,
            group_properties: true,
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a JSON config file. Missing keys keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn with_input(mut self, input: PathBuf) -> Self {
        self.input = Some(input);
        self
    }

    pub fn with_output(mut self, output: PathBuf) -> Self {
        self.output = Some(output);
        self
    }

    pub fn with_hierarchy_file(mut self, path: PathBuf) -> Self {
        self.hierarchy_file = Some(path);
        self
    }

    pub fn with_hints_file(mut self, path: PathBuf) -> Self {
        self.hints_file = Some(path);
        self
    }

    pub fn with_include_dir(mut self, dir: PathBuf) -> Self {
        if !self.include_dirs.contains(&dir) {
            self.include_dirs.push(dir);
        }
        self
    }

    pub fn with_output_mode(mut self, mode: OutputMode) -> Self {
        self.output_mode = mode;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.input.is_none() {
            return Err("An input header must be given".to_string());
        }
        if self.force_concrete && self.force_abstract {
            return Err("Cannot force the main class both concrete and abstract".to_string());
        }
        if self.output.is_some() && self.output == self.input {
            return Err("Output would overwrite the input".to_string());
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}
