//! Translation file discovery and loading.
//!
//! A translation file is a JSON object. By default its top-level keys are
//! locales (`{"en": {"hello": "Hello"}}`); with
//! `translationFiles.localeFromFileName` the file stem is the locale and the
//! object holds that locale's keys (`locales/en.json` with
//! `{"hello": "Hello"}`).

use std::path::{
    Path,
    PathBuf,
};

use ignore::WalkBuilder;
use serde_json::{
    Map,
    Value,
};

use crate::config::{
    ConfigError,
    FileMatcher,
    MatcherError,
    ResolverSettings,
};
use crate::storage::{
    Storage,
    StorageError,
};
use crate::translator::Translator;

/// Failure while discovering or loading translation files.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("Failed to read translation file {}: {source}", path.display())]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON.
    #[error("Failed to parse translation file {}: {source}", path.display())]
    Parse {
        /// File being parsed.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The JSON root is an array, a string or another non-object value.
    #[error("Translation file {} must contain a JSON object", path.display())]
    NotAnObject {
        /// Offending file.
        path: PathBuf,
    },

    /// `localeFromFileName` is set and the path has no usable file stem.
    #[error("Cannot derive a locale from the file name of {}", path.display())]
    NoLocale {
        /// Offending file.
        path: PathBuf,
    },

    /// A file pattern did not compile.
    #[error(transparent)]
    Pattern(#[from] MatcherError),

    /// The translator's storage rejected a write.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The settings failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Finds files under `root` whose root-relative path matches `file_pattern`
/// and none of `exclude_patterns`.
///
/// `.gitignore` rules are honored. The result is sorted so that loading
/// order, and therefore which file wins a duplicate key, is stable.
///
/// # Errors
/// Invalid glob pattern.
pub fn find_translation_files(
    root: &Path,
    file_pattern: &str,
    exclude_patterns: &[String],
) -> Result<Vec<PathBuf>, LoadError> {
    let matcher = FileMatcher::new(root.to_path_buf(), file_pattern, exclude_patterns)?;
    Ok(walk(&matcher))
}

/// Walks the matcher's workspace root and collects matching files, sorted.
fn walk(matcher: &FileMatcher) -> Vec<PathBuf> {
    let root = matcher.workspace_root();
    let mut found_files = Vec::new();

    for result in WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .follow_links(false)
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(?err, "Skipping unreadable directory entry");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        if matcher.is_translation_file(entry.path()) {
            found_files.push(entry.into_path());
        }
    }

    found_files.sort();
    tracing::debug!(root = %root.display(), count = found_files.len(), "Found translation files");

    found_files
}

/// Reads one translation file into a locale-rooted tree.
///
/// # Errors
/// - File read error
/// - JSON parse error
/// - The JSON root is not an object
/// - `locale_from_file_name` is set and the path has no file stem
pub fn load_translation_file(
    path: &Path,
    locale_from_file_name: bool,
) -> Result<Value, LoadError> {
    let content = std::fs::read_to_string(path)
        .map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
    let json: Value = serde_json::from_str(&content)
        .map_err(|source| LoadError::Parse { path: path.to_path_buf(), source })?;

    if !json.is_object() {
        return Err(LoadError::NotAnObject { path: path.to_path_buf() });
    }

    if !locale_from_file_name {
        return Ok(json);
    }

    let locale = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| LoadError::NoLocale { path: path.to_path_buf() })?;

    Ok(Value::Object(Map::from_iter([(locale, json)])))
}

/// Loads every translation file under `root` into `translator`.
///
/// Files are applied in sorted path order, with `put` or, when
/// `translationFiles.overwrite` is set, `put_force`.
///
/// Returns the number of files loaded.
///
/// # Errors
/// Invalid settings, or the first file that cannot be found, read, parsed
/// or stored.
pub fn load_into<S: Storage>(
    translator: &mut Translator<S>,
    root: &Path,
    settings: &ResolverSettings,
) -> Result<usize, LoadError> {
    settings.validate().map_err(ConfigError::ValidationErrors)?;

    let files = walk(&FileMatcher::from_settings(root.to_path_buf(), settings)?);

    for file in &files {
        let tree = load_translation_file(file, settings.translation_files.locale_from_file_name)?;
        if settings.translation_files.overwrite {
            translator.put_force(&tree)?;
        } else {
            translator.put(&tree)?;
        }
        tracing::debug!(file = %file.display(), "Loaded translation file");
    }

    Ok(files.len())
}
