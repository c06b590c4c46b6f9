use ignore::gitignore::{Gitignore, GitignoreBuilder};
use lscmp_common::{AppConfig, LscmpError};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Lists the immediate children of a directory by name.
///
/// Only one level is read; nothing is recursed into. Hidden entries are
/// included, and subdirectory names are listed like any other name.
pub struct DirectoryLister {
    custom_ignore: Option<Gitignore>,
}

impl DirectoryLister {
    pub fn new(config: AppConfig) -> Self {
        let custom_ignore = Self::build_custom_ignore(&config);
        Self { custom_ignore }
    }

    /// Build a Gitignore from custom ignore patterns in config
    fn build_custom_ignore(config: &AppConfig) -> Option<Gitignore> {
        if config.ignore_patterns.is_empty() {
            return None;
        }

        let mut builder = GitignoreBuilder::new("");
        for pattern in &config.ignore_patterns {
            if let Err(err) = builder.add_line(None, pattern) {
                debug!("Failed to add ignore pattern '{}': {}", pattern, err);
            } else {
                debug!("Added custom ignore pattern: {}", pattern);
            }
        }

        match builder.build() {
            Ok(ignore) => {
                debug!(
                    "Built custom ignore with {} patterns",
                    config.ignore_patterns.len()
                );
                Some(ignore)
            }
            Err(e) => {
                debug!("Failed to build custom ignore: {}", e);
                None
            }
        }
    }

    /// Read the names in a directory, sorted, one level deep.
    pub fn list(&self, dir: &Path) -> Result<Vec<String>, LscmpError> {
        if !dir.is_dir() {
            return Err(LscmpError::NotADirectory(dir.display().to_string()));
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);

            if self.should_ignore(&name, is_dir) {
                continue;
            }

            names.push(name);
        }

        names.sort();
        debug!("Listed {} names from {:?}", names.len(), dir);
        Ok(names)
    }

    fn should_ignore(&self, name: &str, is_dir: bool) -> bool {
        if let Some(ref custom_ignore) = self.custom_ignore {
            if custom_ignore.matched(Path::new(name), is_dir).is_ignore() {
                return true;
            }
        }
        false
    }
}
