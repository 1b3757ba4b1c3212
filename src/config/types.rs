//! Resolver settings as read from `.i18n-resolver.json`.

use std::collections::HashMap;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::read_strategy::{
    Eager,
    Lazy,
    ReadStrategy,
};
use crate::scope;

/// One problem found by [`ResolverSettings::validate`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "excludePatterns[0]")
    pub field_path: String,
    /// What is wrong, with an example where one helps.
    pub message: String,
}

impl ValidationError {
    /// Creates an error for `field_path`.
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

/// Settings could not be loaded or are invalid.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Every problem [`ResolverSettings::validate`] found.
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    /// The config file exists but could not be read.
    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// The config file is not valid settings JSON.
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// One numbered line per error.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Settings of one workspace. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolverSettings {
    /// Where translation files live and how they are read.
    pub translation_files: TranslationFilesConfig,

    /// Root-relative globs never walked for translation files.
    pub exclude_patterns: Vec<String>,

    /// How candidate keys are probed.
    pub read_strategy: ReadStrategyKind,

    /// Fallback locales, key scopes and the default value.
    pub fallbacks: FallbacksConfig,
}

/// `translationFiles` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationFilesConfig {
    /// Root-relative glob of translation files. `*` does not cross `/`.
    pub file_pattern: String,

    /// When set, each file holds a single locale and its stem names it
    /// (`locales/de.json` is stored under `de.`).
    pub locale_from_file_name: bool,

    /// When set, loaded keys replace existing ones instead of being skipped.
    pub overwrite: bool,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            translation_files: TranslationFilesConfig::default(),
            exclude_patterns: vec!["node_modules/**".to_string()],
            read_strategy: ReadStrategyKind::default(),
            fallbacks: FallbacksConfig::default(),
        }
    }
}

impl Default for TranslationFilesConfig {
    fn default() -> Self {
        Self {
            file_pattern: "**/locales/**/*.json".to_string(),
            locale_from_file_name: false,
            overwrite: false,
        }
    }
}

/// Which [`ReadStrategy`] the translator uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadStrategyKind {
    /// One probe at a time, stopping at the first hit.
    #[default]
    Lazy,
    /// All probes in one batch read.
    Eager,
}

impl ReadStrategyKind {
    /// Creates the strategy this kind names.
    #[must_use]
    pub fn build(self) -> Box<dyn ReadStrategy> {
        match self {
            Self::Lazy => Box::new(Lazy),
            Self::Eager => Box::new(Eager),
        }
    }
}

/// `fallbacks` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FallbacksConfig {
    /// Extra locales tried after a given locale, in order.
    pub locale_fallbacks: HashMap<String, Vec<String>>,

    /// Locales tried after every locale's own fallbacks.
    pub default_locales: Vec<String>,

    /// Scopes a key is also looked up in, as `scope.key`.
    pub key_scopes: Vec<String>,

    /// Returned when nothing is found.
    pub default_value: String,
}

impl ResolverSettings {
    /// Checks patterns, locales and scopes, collecting every problem.
    ///
    /// # Errors
    /// - Required field is empty
    /// - Invalid glob pattern
    /// - Locale or scope that cannot be used as a key segment
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.translation_files.file_pattern.is_empty() {
            errors.push(ValidationError::new(
                "translationFiles.filePattern",
                "The pattern cannot be empty. Example: \"**/locales/**/*.json\"",
            ));
        } else if let Err(e) = globset::Glob::new(&self.translation_files.file_pattern) {
            errors.push(ValidationError::new(
                "translationFiles.filePattern",
                format!("Invalid glob pattern '{}': {e}", self.translation_files.file_pattern),
            ));
        }

        for (index, pattern) in self.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        self.fallbacks.validate_into(&mut errors);

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl FallbacksConfig {
    /// Appends problems with locales and scopes to `errors`.
    fn validate_into(&self, errors: &mut Vec<ValidationError>) {
        let mut locale_fallbacks: Vec<_> = self.locale_fallbacks.iter().collect();
        locale_fallbacks.sort_by(|a, b| a.0.cmp(b.0));

        for (locale, fallbacks) in locale_fallbacks {
            if let Some(message) = invalid_locale(locale) {
                errors.push(ValidationError::new(
                    "fallbacks.localeFallbacks",
                    format!("Invalid locale '{locale}': {message}"),
                ));
            }
            for (index, fallback) in fallbacks.iter().enumerate() {
                if let Some(message) = invalid_locale(fallback) {
                    errors.push(ValidationError::new(
                        format!("fallbacks.localeFallbacks.{locale}[{index}]"),
                        message,
                    ));
                }
            }
        }

        for (index, locale) in self.default_locales.iter().enumerate() {
            if let Some(message) = invalid_locale(locale) {
                errors.push(ValidationError::new(format!("fallbacks.defaultLocales[{index}]"), message));
            }
        }

        for (index, key_scope) in self.key_scopes.iter().enumerate() {
            if key_scope.is_empty() {
                errors.push(ValidationError::new(
                    format!("fallbacks.keyScopes[{index}]"),
                    "The scope cannot be empty. Example: \"common\"",
                ));
            }
        }
    }
}

/// Why `locale` cannot be a key segment, if it cannot.
fn invalid_locale(locale: &str) -> Option<&'static str> {
    if locale.is_empty() {
        Some("The locale cannot be empty. Example: \"en\"")
    } else if locale.contains(scope::SEPARATOR) {
        Some("The locale cannot contain the key separator '.'")
    } else {
        None
    }
}
