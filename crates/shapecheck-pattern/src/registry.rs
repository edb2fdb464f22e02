use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde_json::Value as Json;
use shapecheck_value::Value;
use tracing::debug;

use crate::config::RegistryConfig;
use crate::error::{RegistryError, Result};
use crate::pattern::Pattern;
use crate::validator::{ensure, validate_payload};

const PATTERN_SUFFIX: &str = ".pattern.json";

/// Name-keyed registry of decoded patterns.
pub struct PatternRegistry {
    patterns: HashMap<String, Pattern>,
    config: RegistryConfig,
}

impl PatternRegistry {
    /// Create an empty registry with default config.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty registry with explicit config.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            patterns: HashMap::new(),
            config,
        }
    }

    /// Register a pattern from a JSON document string.
    pub fn register(&mut self, name: &str, document_json: &str) -> Result<()> {
        let document: Json = serde_json::from_str(document_json)?;
        self.register_value(name, &document)
    }

    /// Register a pattern from a JSON document value.
    pub fn register_value(&mut self, name: &str, document: &Json) -> Result<()> {
        let pattern =
            Pattern::from_document(document).map_err(|source| RegistryError::InvalidPattern {
                name: name.to_string(),
                source,
            })?;
        self.insert(name, pattern);
        Ok(())
    }

    /// Register an already built pattern.
    pub fn insert(&mut self, name: &str, pattern: Pattern) {
        debug!(name, kind = pattern.kind(), "registered pattern");
        self.patterns.insert(name.to_string(), pattern);
    }

    /// Load patterns from a directory.
    pub fn from_directory(path: &Path) -> Result<Self> {
        Self::from_directory_with_config(path, RegistryConfig::default())
    }

    /// Load patterns from a directory with explicit config.
    ///
    /// Every `<name>.pattern.json` file is registered under `<name>`; other
    /// files are ignored. Symlinked pattern files are refused.
    pub fn from_directory_with_config(path: &Path, config: RegistryConfig) -> Result<Self> {
        let mut registry = Self::with_config(config);
        let mut loaded_pattern_count = 0usize;

        let entries = std::fs::read_dir(path)
            .map_err(|err| RegistryError::LoadFailed(format!("{}: {err}", path.display())))?;

        for entry in entries {
            let entry = entry.map_err(|err| RegistryError::LoadFailed(err.to_string()))?;
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();
            let is_pattern_file = file_name.ends_with(PATTERN_SUFFIX);
            let entry_path = entry.path();
            let path_metadata = std::fs::symlink_metadata(&entry_path)
                .map_err(|err| RegistryError::LoadFailed(err.to_string()))?;
            let file_type = path_metadata.file_type();

            if !is_pattern_file {
                continue;
            }
            if file_type.is_symlink() {
                return Err(RegistryError::LoadFailed(format!(
                    "refusing to load pattern symlink: {file_name}"
                )));
            }
            if !file_type.is_file() {
                continue;
            }

            let Some(name) = pattern_name_from_file_name(&file_name) else {
                return Err(RegistryError::LoadFailed(format!(
                    "unrecognized pattern filename: {file_name}"
                )));
            };

            loaded_pattern_count = loaded_pattern_count.saturating_add(1);
            if loaded_pattern_count > registry.config.max_patterns_from_directory {
                return Err(RegistryError::LoadFailed(format!(
                    "pattern count exceeds configured max ({}): {}",
                    registry.config.max_patterns_from_directory, loaded_pattern_count
                )));
            }

            let content = read_bounded(&entry_path, &path_metadata, registry.config.max_pattern_file_size)?;
            registry.register(name, &content)?;
        }

        debug!(
            path = %path.display(),
            count = loaded_pattern_count,
            "loaded pattern directory"
        );
        Ok(registry)
    }

    /// Load from embedded pattern documents.
    pub fn from_embedded(patterns: &[(&str, &str)]) -> Result<Self> {
        let mut registry = Self::new();
        for (name, document) in patterns {
            registry.register(name, document)?;
        }
        Ok(registry)
    }

    /// Validate a JSON payload against the pattern registered as `name`.
    pub fn validate(&self, name: &str, payload: &[u8]) -> Result<()> {
        match self.patterns.get(name) {
            Some(pattern) => validate_payload(name, payload, pattern, self.config.strict_mode),
            None if self.config.fail_on_missing_pattern => {
                Err(RegistryError::NoPattern(name.to_string()))
            }
            None => Ok(()),
        }
    }

    /// Validate an in-memory value against the pattern registered as `name`.
    pub fn validate_value(&self, name: &str, value: &Value) -> Result<()> {
        match self.patterns.get(name) {
            Some(pattern) => ensure(value, pattern, self.config.strict_mode).map_err(|source| {
                RegistryError::Mismatch {
                    name: name.to_string(),
                    source,
                }
            }),
            None if self.config.fail_on_missing_pattern => {
                Err(RegistryError::NoPattern(name.to_string()))
            }
            None => Ok(()),
        }
    }

    /// Get the pattern registered as `name`.
    pub fn get(&self, name: &str) -> Option<&Pattern> {
        self.patterns.get(name)
    }

    /// Check if a name has a registered pattern.
    pub fn has_pattern(&self, name: &str) -> bool {
        self.patterns.contains_key(name)
    }

    /// Get registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.patterns.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Get registry configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }
}

impl Default for PatternRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn pattern_name_from_file_name(file_name: &str) -> Option<&str> {
    let name = file_name.strip_suffix(PATTERN_SUFFIX)?;
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    valid.then_some(name)
}

fn read_bounded(path: &Path, path_metadata: &std::fs::Metadata, max_bytes: usize) -> Result<String> {
    let file_name = path.display();
    let file = std::fs::File::open(path).map_err(|err| {
        RegistryError::LoadFailed(format!("failed opening pattern {file_name}: {err}"))
    })?;
    let opened_metadata = file
        .metadata()
        .map_err(|err| RegistryError::LoadFailed(err.to_string()))?;

    #[cfg(unix)]
    {
        if !same_file_identity(path_metadata, &opened_metadata) {
            return Err(RegistryError::LoadFailed(format!(
                "pattern file changed during load: {file_name}"
            )));
        }
    }
    #[cfg(not(unix))]
    let _ = path_metadata;

    if opened_metadata.len() > max_bytes as u64 {
        return Err(RegistryError::LoadFailed(format!(
            "pattern file too large ({} bytes): {file_name}",
            opened_metadata.len()
        )));
    }

    let read_limit = u64::try_from(max_bytes.saturating_add(1)).unwrap_or(u64::MAX);
    let mut content = String::new();
    file.take(read_limit)
        .read_to_string(&mut content)
        .map_err(|err| {
            RegistryError::LoadFailed(format!("failed reading pattern {file_name}: {err}"))
        })?;
    if content.len() > max_bytes {
        return Err(RegistryError::LoadFailed(format!(
            "pattern file too large while reading: {file_name}"
        )));
    }
    Ok(content)
}

#[cfg(unix)]
fn same_file_identity(
    path_metadata: &std::fs::Metadata,
    opened_metadata: &std::fs::Metadata,
) -> bool {
    use std::os::unix::fs::MetadataExt;
    path_metadata.dev() == opened_metadata.dev() && path_metadata.ino() == opened_metadata.ino()
}
