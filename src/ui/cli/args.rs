// Mon Jan 19 2026 - Alex

use crate::config::Config;
use crate::output::OutputMode;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "wrapxml")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Describe a parsed C++ header as XML, with inherited members merged in", long_about = None)]
pub struct Args {
    /// Header whose declaration tree is written.
    pub input: Option<PathBuf>,

    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory searched for ancestor headers.
    #[arg(short = 'I', long = "include", value_name = "DIR")]
    pub include_dirs: Vec<PathBuf>,

    /// Type hierarchy index used to find ancestor headers.
    #[arg(long = "types", value_name = "FILE")]
    pub hierarchy_file: Option<PathBuf>,

    #[arg(long = "hints", value_name = "FILE")]
    pub hints_file: Option<PathBuf>,

    #[arg(long, conflicts_with = "abstract_class")]
    pub concrete: bool,

    #[arg(long = "abstract")]
    pub abstract_class: bool,

    /// Write every attribute as a child element.
    #[arg(long)]
    pub elements: bool,

    #[arg(long)]
    pub no_properties: bool,

    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(short, long)]
    pub log_level: Option<String>,

    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    #[arg(long)]
    pub no_color: bool,
}

impl Args {
    /// Layers the command line over `base`. Flags that were not given keep
    /// the values from the config file.
    pub fn apply(&self, mut base: Config) -> Config {
        if let Some(input) = &self.input {
            base.input = Some(input.clone());
        }
        if let Some(output) = &self.output {
            base.output = Some(output.clone());
        }
        if let Some(path) = &self.hierarchy_file {
            base.hierarchy_file = Some(path.clone());
        }
        if let Some(path) = &self.hints_file {
            base.hints_file = Some(path.clone());
        }
        for dir in &self.include_dirs {
            base = base.with_include_dir(dir.clone());
        }
        if self.concrete {
            base.force_concrete = true;
            base.force_abstract = false;
        }
        if self.abstract_class {
            base.force_abstract = true;
            base.force_concrete = false;
        }
        if self.elements {
            base = base.with_output_mode(OutputMode::Elements);
        }
        if self.no_properties {
            base.group_properties = false;
        }
        if let Some(level) = &self.log_level {
            base.log_level = level.clone();
        }
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "wrapxml", "-o", "out.xml", "-I", "Common", "-I", "Filtering", "--types",
            "hierarchy.txt", "--abstract", "--elements", "-vv", "vtkFoo.h",
        ])
        .unwrap();

        assert_eq!(args.input, Some(PathBuf::from("vtkFoo.h")));
        assert_eq!(args.include_dirs.len(), 2);
        assert_eq!(args.verbose, 2);

        let config = args.apply(Config::default());
        assert_eq!(config.output, Some(PathBuf::from("out.xml")));
        assert_eq!(config.hierarchy_file, Some(PathBuf::from("hierarchy.txt")));
        assert!(config.force_abstract);
        assert_eq!(config.output_mode, OutputMode::Elements);
    }

    #[test]
    fn test_concrete_conflicts_with_abstract() {
        let result = Args::try_parse_from(["wrapxml", "--concrete", "--abstract", "a.h"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut base = Config::default().with_input(PathBuf::from("old.h"));
        base.force_abstract = true;

        let args = Args::try_parse_from(["wrapxml", "--concrete", "new.h"]).unwrap();
        let config = args.apply(base);
        assert_eq!(config.input, Some(PathBuf::from("new.h")));
        assert!(config.force_concrete);
        assert!(!config.force_abstract);
    }
}
