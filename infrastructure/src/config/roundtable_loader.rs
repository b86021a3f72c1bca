//! Roundtable definition discovery
//!
//! Roundtables live as individual TOML files in a directory, one file per
//! roundtable. Files that fail to parse are skipped with a warning so one
//! bad definition cannot hide the rest.

use roundtable_domain::RoundtableDefinition;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum RoundtableLoadError {
    #[error("Cannot read roundtable directory {dir}: {source}")]
    DirUnreadable {
        dir: String,
        source: std::io::Error,
    },
}

/// Loads roundtable definitions from a directory of TOML files
pub struct RoundtableLoader {
    dir: PathBuf,
}

impl RoundtableLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Loader over the default search path: `./roundtables` if present,
    /// otherwise the global config directory.
    pub fn from_default_dir() -> Self {
        let local = PathBuf::from("roundtables");
        if local.is_dir() {
            return Self::new(local);
        }
        let global = dirs::config_dir()
            .map(|d| d.join("roundtable").join("roundtables"))
            .unwrap_or(local);
        Self::new(global)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// All parseable definitions, sorted by name.
    ///
    /// A missing directory is an empty list, not an error.
    pub fn list(&self) -> Result<Vec<RoundtableDefinition>, RoundtableLoadError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let entries =
            std::fs::read_dir(&self.dir).map_err(|source| RoundtableLoadError::DirUnreadable {
                dir: self.dir.display().to_string(),
                source,
            })?;

        let mut definitions = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("toml") {
                continue;
            }
            if let Some(definition) = Self::parse_file(&path) {
                definitions.push(definition);
            }
        }

        definitions.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(definitions)
    }

    /// Find one definition by name.
    ///
    /// The file stem is tried first (`arch-review` matches
    /// `arch-review.toml`), then the `name` field of each definition,
    /// case-insensitively.
    pub fn get(&self, name: &str) -> Result<Option<RoundtableDefinition>, RoundtableLoadError> {
        let by_stem = self.dir.join(format!("{name}.toml"));
        if by_stem.is_file()
            && let Some(definition) = Self::parse_file(&by_stem)
        {
            return Ok(Some(definition));
        }

        let lowered = name.to_lowercase();
        Ok(self
            .list()?
            .into_iter()
            .find(|d| d.name.to_lowercase() == lowered))
    }

    fn parse_file(path: &Path) -> Option<RoundtableDefinition> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable roundtable file");
                return None;
            }
        };
        match toml::from_str::<RoundtableDefinition>(&text) {
            Ok(definition) => Some(definition),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping invalid roundtable file");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const COUNCIL: &str = r#"
        name = "council"
        description = "Design council"

        [[personas]]
        name = "Architect"
        system_prompt = "You weigh structure."

        [[personas]]
        name = "Operator"
        system_prompt = "You weigh operations."
    "#;

    fn write_file(dir: &Path, file: &str, content: &str) {
        let mut f = std::fs::File::create(dir.join(file)).unwrap();
        write!(f, "{content}").unwrap();
    }

    #[test]
    fn test_missing_dir_lists_nothing() {
        let loader = RoundtableLoader::new("/nonexistent/roundtables");
        assert!(loader.list().unwrap().is_empty());
    }

    #[test]
    fn test_list_skips_broken_files() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "council.toml", COUNCIL);
        write_file(dir.path(), "broken.toml", "name = [unclosed");
        write_file(dir.path(), "notes.txt", "not a roundtable");

        let loader = RoundtableLoader::new(dir.path());
        let definitions = loader.list().unwrap();
        assert_eq!(definitions.len(), 1);
        assert_eq!(definitions[0].name, "council");
        assert_eq!(definitions[0].personas.len(), 2);
    }

    #[test]
    fn test_get_by_stem_and_by_name() {
        let dir = tempfile::tempdir().unwrap();
        // Stem differs from the declared name
        write_file(dir.path(), "design.toml", COUNCIL);

        let loader = RoundtableLoader::new(dir.path());
        assert!(loader.get("design").unwrap().is_some());
        assert!(loader.get("Council").unwrap().is_some());
        assert!(loader.get("nope").unwrap().is_none());
    }
}
