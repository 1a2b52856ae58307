use std::{
    fs,
    path::{Component, Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".lingotrc.json";

pub const TEST_FILE_PATTERNS: &[&str] = &[
    "**/*.test.tsx",
    "**/*.test.ts",
    "**/*.test.jsx",
    "**/*.test.js",
    "**/*.spec.tsx",
    "**/*.spec.ts",
    "**/*.spec.jsx",
    "**/*.spec.js",
    "**/__tests__/**",
];

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directories to scan for translation calls, relative to the project root.
    #[serde(default = "default_source_roots")]
    pub source_roots: Vec<String>,

    /// Paths and glob patterns excluded from scanning.
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,

    /// Recognized language codes. Read-only to the scan/reconcile engine.
    #[serde(default)]
    pub langs: Vec<String>,

    /// Function names treated as translation invocations.
    #[serde(default = "default_translation_functions")]
    pub translation_functions: Vec<String>,

    /// Catalog file location, relative to the project root.
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    #[serde(default = "default_ignore_test_files")]
    pub ignore_test_files: bool,
}

fn default_source_roots() -> Vec<String> {
    vec!["src".to_string()]
}

fn default_ignores() -> Vec<String> {
    ["**/node_modules/**", "**/dist/**", "**/build/**"]
        .map(String::from)
        .to_vec()
}

fn default_translation_functions() -> Vec<String> {
    vec!["t".to_string(), "_t".to_string()]
}

fn default_catalog_path() -> String {
    "./lingot-catalog.json".to_string()
}

fn default_ignore_test_files() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_roots: default_source_roots(),
            ignores: default_ignores(),
            langs: Vec::new(),
            translation_functions: default_translation_functions(),
            catalog_path: default_catalog_path(),
            ignore_test_files: default_ignore_test_files(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for invalid glob patterns, duplicate language codes,
    /// or an empty translation-function list.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Source roots without wildcards are literal directory paths; only
        // wildcard entries need to be valid glob patterns.
        for pattern in &self.source_roots {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'sourceRoots': \"{}\"", pattern)
                })?;
            }
        }

        for (i, lang) in self.langs.iter().enumerate() {
            if self.langs[..i].contains(lang) {
                anyhow::bail!("Duplicate language code in 'langs': \"{}\"", lang);
            }
        }

        if self.translation_functions.is_empty() {
            anyhow::bail!("'translationFunctions' must not be empty");
        }

        Ok(())
    }

    /// Resolve the catalog file path relative to the project root.
    pub fn resolved_catalog_path(&self, root_dir: &Path) -> PathBuf {
        let p = Path::new(&self.catalog_path);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            // Running with `--source-root .` keeps the original relative path
            // to avoid noisy "././lingot-catalog.json" output.
            let is_cur_dir = root_dir.components().all(|c| matches!(c, Component::CurDir));
            if is_cur_dir {
                p.to_path_buf()
            } else {
                let rel = p.strip_prefix(Path::new(".")).unwrap_or(p);
                root_dir.join(rel)
            }
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}

#[cfg(test)]
mod tests {
    use crate::config::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.source_roots, vec!["src"]);
        assert!(!config.ignores.is_empty());
        assert!(config.langs.is_empty());
        assert_eq!(config.translation_functions, vec!["t", "_t"]);
        assert_eq!(config.catalog_path, "./lingot-catalog.json");
        assert!(config.ignore_test_files);
    }

    #[test]
    fn test_parse_config() {
        let json = r#"{
              "sourceRoots": ["app", "lib"],
              "ignores": ["**/generated/**"],
              "langs": ["fr-FR", "de-DE"]
          }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.source_roots, vec!["app", "lib"]);
        assert_eq!(config.ignores, vec!["**/generated/**"]);
        assert_eq!(config.langs, vec!["fr-FR", "de-DE"]);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let json = r#"{ "langs": ["ja-JP"] }"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.langs, vec!["ja-JP"]);
        assert_eq!(config.source_roots, default_source_roots());
        assert_eq!(config.translation_functions, default_translation_functions());
    }

    #[test]
    fn test_find_config_file() {
        let dir = tempdir().unwrap();
        let sub_dir = dir.path().join("src").join("components");
        fs::create_dir_all(&sub_dir).unwrap();

        let config_path = dir.path().join(CONFIG_FILE_NAME);
        File::create(&config_path).unwrap();

        let found = find_config_file(&sub_dir);
        assert!(found.is_some());
        assert_eq!(found.unwrap(), config_path);
    }

    #[test]
    fn test_find_config_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let found = find_config_file(dir.path());
        assert!(found.is_none());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        fs::write(&config_path, r#"{ "langs": ["es-ES"] }"#).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(result.from_file);
        assert_eq!(result.config.langs, vec!["es-ES"]);
    }

    #[test]
    fn test_load_config_default_when_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(!result.from_file);
        assert!(result.config.langs.is_empty());
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config {
            ignores: vec!["**/node_modules/**".to_string()],
            source_roots: vec!["src".to_string(), "app/*".to_string()],
            langs: vec!["fr-FR".to_string(), "de-DE".to_string()],
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_ignore_pattern() {
        let config = Config {
            ignores: vec!["[invalid".to_string()], // unclosed bracket
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("ignores"));
    }

    #[test]
    fn test_validate_duplicate_langs() {
        let config = Config {
            langs: vec!["fr-FR".to_string(), "fr-FR".to_string()],
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Duplicate"));
    }

    #[test]
    fn test_validate_empty_translation_functions() {
        let config = Config {
            translation_functions: Vec::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_literal_bracket_source_root() {
        // [locale] without wildcards is a literal path, not a glob
        let config = Config {
            source_roots: vec!["app/[locale]".to_string()],
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_config_with_invalid_pattern_fails() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        fs::write(&config_path, r#"{ "ignores": ["[invalid"] }"#).unwrap();

        let result = load_config(dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_resolved_catalog_path_absolute() {
        let config = Config {
            catalog_path: "/data/catalog.json".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.resolved_catalog_path(Path::new("/project")),
            PathBuf::from("/data/catalog.json")
        );
    }

    #[test]
    fn test_resolved_catalog_path_relative_with_root() {
        let config = Config::default();
        assert_eq!(
            config.resolved_catalog_path(Path::new("/project")),
            PathBuf::from("/project/lingot-catalog.json")
        );
    }

    #[test]
    fn test_resolved_catalog_path_cur_dir() {
        let config = Config::default();
        assert_eq!(
            config.resolved_catalog_path(Path::new(".")),
            PathBuf::from("./lingot-catalog.json")
        );
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("sourceRoots"));
        assert!(json.contains("translationFunctions"));
        assert!(json.contains("catalogPath"));
    }
}
