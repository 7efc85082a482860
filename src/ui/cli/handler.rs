// Mon Jan 19 2026 - Alex

use super::args::Args;
use crate::config::Config;
use crate::hierarchy::{HierarchyIndex, IncludePath};
use crate::hints::Hints;
use crate::merge::{DeclarationLoader, JsonDeclarationLoader, SuperclassResolver};
use crate::model::FileInfo;
use crate::output;
use crate::properties::{NamingClassifier, NoProperties, PropertyClassifier};
use crate::utils::{LoggingUtils, ScopedTimer};
use anyhow::{anyhow, Context};
use log::{debug, info, warn};
use std::fs;
use std::io::{self, Write};

pub struct CommandHandler;

impl CommandHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, args: Args) -> anyhow::Result<()> {
        let base = match &args.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => Config::default(),
        };
        let config = args.apply(base);

        self.setup_logging(&config, &args);
        config.validate().map_err(|e| anyhow!(e))?;

        self.run(&config)
    }

    fn setup_logging(&self, config: &Config, args: &Args) {
        let level = LoggingUtils::level_from_verbosity(
            LoggingUtils::level_from_str(&config.log_level),
            args.verbose as usize,
        );
        LoggingUtils::init_logger(level, !args.no_color);
    }

    /// Renders the document and writes it out. Nothing is written if any
    /// step fails.
    pub fn run(&self, config: &Config) -> anyhow::Result<()> {
        let document = self.generate(config)?;

        match &config.output {
            Some(path) => {
                fs::write(path, &document)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!("Wrote {} bytes to {}", document.len(), path.display());
            }
            None => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(document.as_bytes())?;
                stdout.flush()?;
            }
        }
        Ok(())
    }

    pub fn generate(&self, config: &Config) -> anyhow::Result<String> {
        let input = config
            .input
            .as_ref()
            .ok_or_else(|| anyhow!("No input header given"))?;
        let _timer = ScopedTimer::new("generate");

        let mut file = JsonDeclarationLoader
            .load(input)
            .with_context(|| format!("Failed to load declarations for {}", input.display()))?;
        info!("Loaded {}", input.display());

        let hints = match &config.hints_file {
            Some(path) => Some(
                Hints::load(path)
                    .with_context(|| format!("Failed to read hints {}", path.display()))?,
            ),
            None => None,
        };
        if let Some(hints) = &hints {
            let applied = hints.apply(&mut file);
            debug!("Applied {} of {} hints", applied, hints.len());
        }

        apply_class_override(&mut file, config);

        let mut resolver = SuperclassResolver::new()
            .with_include_path(IncludePath::with_dirs(config.include_dirs.iter().cloned()));
        if let Some(path) = &config.hierarchy_file {
            let index = HierarchyIndex::load(path)
                .with_context(|| format!("Failed to read hierarchy {}", path.display()))?;
            resolver = resolver.with_hierarchy(index);
        }
        if let Some(hints) = hints {
            resolver = resolver.with_hints(hints);
        }

        let classifier: Box<dyn PropertyClassifier> = if config.group_properties {
            Box::new(NamingClassifier)
        } else {
            Box::new(NoProperties)
        };

        let document = output::render(&file, config.output_mode, &mut resolver, classifier.as_ref())
            .with_context(|| format!("Failed to describe {}", input.display()))?;
        info!("Loaded {} ancestor headers", resolver.loaded_count());
        Ok(document)
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_class_override(file: &mut FileInfo, config: &Config) {
    if !config.force_concrete && !config.force_abstract {
        return;
    }
    match file.main_class_mut() {
        Some(class) => class.is_abstract = config.force_abstract,
        None => warn!("No main class to mark concrete or abstract"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClassInfo, FunctionInfo};
    use std::path::{Path, PathBuf};

    fn fixture_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("wrapxml-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_tree(dir: &Path, header: &str, file: &FileInfo) {
        let json = serde_json::to_string(file).unwrap();
        fs::write(dir.join(format!("{}.json", header)), json).unwrap();
    }

    fn object_tree() -> FileInfo {
        let mut object = ClassInfo::new("vtkObject");
        object.add_function(
            FunctionInfo::new("Modified")
                .with_virtual()
                .with_comment("Update the modification time."),
        );
        let mut file = FileInfo::default();
        file.contents.add_class(object);
        file
    }

    fn foo_tree() -> FileInfo {
        let mut foo = ClassInfo::new("vtkFoo").with_super("vtkObject");
        foo.add_function(FunctionInfo::new("Modified"));
        let mut file = FileInfo::default();
        file.main_class = Some("vtkFoo".to_string());
        file.contents.add_class(foo);
        file
    }

    #[test]
    fn test_generate_merges_external_ancestor() {
        let dir = fixture_dir("generate");
        write_tree(&dir, "vtkObject.h", &object_tree());
        write_tree(&dir, "vtkFoo.h", &foo_tree());
        fs::write(
            dir.join("hierarchy.txt"),
            "vtkObject ; vtkObject.h\nvtkFoo : vtkObject ; vtkFoo.h\n",
        )
        .unwrap();

        let mut config = Config::new()
            .with_input(dir.join("vtkFoo.h"))
            .with_include_dir(dir.clone())
            .with_hierarchy_file(dir.join("hierarchy.txt"));
        config.force_abstract = true;

        let doc = CommandHandler::new().generate(&config).unwrap();
        fs::remove_dir_all(&dir).unwrap();

        assert!(doc.starts_with("<File name=\"vtkFoo.h\">"));
        assert!(doc.contains("<Class name=\"vtkFoo\" abstract=\"1\">"));
        assert!(doc.contains("<Context name=\"vtkObject\" access=\"public\" />"));
        assert!(doc.contains("context=\"vtkObject\" access=\"public\" virtual=\"1\""));
        assert!(doc.contains("Update the modification time."));
    }

    #[test]
    fn test_missing_ancestor_header_writes_nothing() {
        let dir = fixture_dir("missing");
        write_tree(&dir, "vtkFoo.h", &foo_tree());
        fs::write(dir.join("hierarchy.txt"), "vtkObject ; vtkGone.h\n").unwrap();

        let output = dir.join("vtkFoo.xml");
        let config = Config::new()
            .with_input(dir.join("vtkFoo.h"))
            .with_include_dir(dir.clone())
            .with_hierarchy_file(dir.join("hierarchy.txt"))
            .with_output(output.clone());

        let result = CommandHandler::new().run(&config);
        let written = output.exists();
        fs::remove_dir_all(&dir).unwrap();

        assert!(result.is_err());
        assert!(!written);
    }

    #[test]
    fn test_class_override() {
        let mut file = foo_tree();
        let mut config = Config::new();
        config.force_abstract = true;
        apply_class_override(&mut file, &config);
        assert!(file.contents.classes[0].is_abstract);

        config.force_abstract = false;
        config.force_concrete = true;
        apply_class_override(&mut file, &config);
        assert!(!file.contents.classes[0].is_abstract);
    }
}
