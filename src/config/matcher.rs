//! File pattern matcher for translation files.
//!
//! Patterns are matched against root-relative paths. `*` and `?` stay within
//! one path segment; only `**` crosses `/`.

use std::path::{
    Path,
    PathBuf,
};

use globset::{
    GlobBuilder,
    GlobSet,
    GlobSetBuilder,
};

use super::ResolverSettings;

/// A pattern that could not be compiled.
#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    /// An entry of `excludePatterns` is not a valid glob.
    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        /// The pattern as configured.
        pattern: String,
        /// Parser error from globset.
        #[source]
        source: globset::Error,
    },

    /// `translationFiles.filePattern` is not a valid glob.
    #[error("Invalid translation file pattern '{pattern}': {source}")]
    InvalidTranslationPattern {
        /// The pattern as configured.
        pattern: String,
        /// Parser error from globset.
        #[source]
        source: globset::Error,
    },

    /// The compiled globs could not be combined into a set.
    #[error("Failed to build glob set: {0}")]
    GlobSetBuild(#[from] globset::Error),
}

/// Matches workspace files against the translation file glob.
#[derive(Debug, Clone)]
pub struct FileMatcher {
    /// Directory the patterns are relative to.
    workspace_root: PathBuf,
    /// `translationFiles.filePattern`
    translation_set: GlobSet,
    /// `excludePatterns`
    exclude_set: GlobSet,
}

impl FileMatcher {
    /// Creates a matcher for `file_pattern` minus `exclude_patterns`.
    ///
    /// # Errors
    /// Any pattern that is not a valid glob.
    pub fn new(
        workspace_root: PathBuf,
        file_pattern: &str,
        exclude_patterns: &[String],
    ) -> Result<Self, MatcherError> {
        let translation_set =
            Self::build_glob_set(std::slice::from_ref(&file_pattern), |pattern, source| {
                MatcherError::InvalidTranslationPattern { pattern, source }
            })?;

        let exclude_set = Self::build_glob_set(exclude_patterns, |pattern, source| {
            MatcherError::InvalidExcludePattern { pattern, source }
        })?;

        Ok(Self { workspace_root, translation_set, exclude_set })
    }

    /// Creates a matcher from `translationFiles.filePattern` and
    /// `excludePatterns`.
    ///
    /// # Errors
    /// Any pattern that is not a valid glob.
    pub fn from_settings(
        workspace_root: PathBuf,
        settings: &ResolverSettings,
    ) -> Result<Self, MatcherError> {
        Self::new(
            workspace_root,
            &settings.translation_files.file_pattern,
            &settings.exclude_patterns,
        )
    }

    /// Compiles `patterns` into one set, mapping a bad pattern through
    /// `make_error`.
    fn build_glob_set<P, F>(patterns: &[P], make_error: F) -> Result<GlobSet, MatcherError>
    where
        P: AsRef<str>,
        F: Fn(String, globset::Error) -> MatcherError,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let glob = GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .map_err(|e| make_error(pattern.to_string(), e))?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }

    /// Directory walked for translation files.
    #[must_use]
    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Returns true if the path matches the translation pattern but not
    /// `excludePatterns`.
    ///
    /// The path must be absolute and under the workspace root.
    #[must_use]
    pub fn is_translation_file(&self, absolute_path: &Path) -> bool {
        let Some(relative_path) = absolute_path.strip_prefix(&self.workspace_root).ok() else {
            return false;
        };

        self.is_translation_file_relative(relative_path)
    }

    /// Returns true if the path matches the translation pattern but not
    /// `excludePatterns`.
    ///
    /// The path must be relative to the workspace root.
    #[must_use]
    pub fn is_translation_file_relative(&self, relative_path: &Path) -> bool {
        self.translation_set.is_match(relative_path) && !self.exclude_set.is_match(relative_path)
    }
}
