use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use crate::library::SortKey;

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

static SHARED_DEFAULT: LazyLock<Config> = LazyLock::new(Config::compiled_default);

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub sections: SectionsConfig,
    pub library: LibraryConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SectionsConfig {
    /// Labels whose bold bullet form is promoted to a `##` heading.
    pub labels: Vec<String>,
}

impl Default for SectionsConfig {
    fn default() -> Self {
        Self {
            labels: [
                "Executive Summary",
                "Key Themes",
                "Critical Insights",
                "Notable Quotes",
                "Recommendations",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct LibraryConfig {
    pub preview_chars: usize,
    pub default_sort: SortKey,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            preview_chars: 200,
            default_sort: SortKey::Newest,
        }
    }
}

impl Config {
    /// The configuration bundled with the crate.
    pub fn compiled_default() -> Self {
        // Validated by build.rs
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// The bundled configuration, parsed once per process.
    pub fn shared_default() -> &'static Config {
        &SHARED_DEFAULT
    }

    /// Load config from a TOML file, or return defaults if not found.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "Invalid config, using defaults");
                Self::compiled_default()
            }),
            Err(_) => Self::compiled_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn bundled_config_matches_defaults() {
        assert_eq!(Config::compiled_default(), Config::default());
    }

    #[test]
    fn shared_default_is_parsed_once() {
        assert!(std::ptr::eq(Config::shared_default(), Config::shared_default()));
        assert_eq!(Config::shared_default(), &Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[library]\ndefault_sort = \"title\"").unwrap();

        let config = Config::load(file.path());
        assert_eq!(config.library.default_sort, SortKey::Title);
        assert_eq!(config.library.preview_chars, 200);
        assert_eq!(config.sections, SectionsConfig::default());
    }

    #[test]
    fn missing_or_invalid_file_falls_back() {
        assert_eq!(
            Config::load(Path::new("/nonexistent/notesmd.toml")),
            Config::default()
        );

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[sections\nlabels = 3").unwrap();
        assert_eq!(Config::load(file.path()), Config::default());
    }
}
