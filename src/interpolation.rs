//! Placeholder interpolation for resolved translations.
//!
//! ```
//! use i18n_resolver::interpolation::{Interpolation, Sprintf};
//! use serde_json::json;
//!
//! let values = json!({ "you": "world", "num": 1.0 });
//! let values = values.as_object().cloned().unwrap_or_default();
//!
//! let sprintf = Sprintf::new();
//! assert_eq!(sprintf.call("Hello, %{you}!", &values)?, "Hello, world!");
//! assert_eq!(sprintf.call("%<num>3.0f", &values)?, "  1");
//! assert_eq!(sprintf.call("Hello, %{nobody}!", &values)?, "Hello, %{nobody}!");
//! assert_eq!(sprintf.call("%<nobody>5d", &values)?, "%<nobody>5d");
//! # Ok::<(), i18n_resolver::interpolation::InterpolationError>(())
//! ```

/// printf-style directive parsing and rendering
mod format_spec;
/// `%{name}` / `%<name>spec` interpolation
mod sprintf;

use std::fmt;

use serde_json::{
    Map,
    Value,
};
use thiserror::Error;

pub use format_spec::FormatSpec;
pub use sprintf::Sprintf;

/// Values available to placeholders, by name.
pub type Values = Map<String, Value>;

/// Interpolation failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InterpolationError {
    /// A `%<name>spec` directive that cannot be parsed.
    #[error("malformed format string - %{spec}")]
    InvalidFormat {
        /// The directive after the name, e.g. `,d`.
        spec: String,
    },

    /// A value the directive's conversion cannot render.
    #[error("invalid value for %{conversion}: {value}")]
    InvalidArgument {
        /// Conversion character of the directive.
        conversion: char,
        /// The value as JSON.
        value: String,
    },

    /// Raised by [`FailOnMissing`].
    #[error("missing value for placeholder '{name}' in \"{template}\"")]
    MissingValue {
        /// Placeholder name.
        name: String,
        /// The whole template.
        template: String,
    },
}

/// Replaces placeholders in a template with values.
pub trait Interpolation: fmt::Debug + Send + Sync {
    /// # Errors
    /// Malformed directive, a value the directive cannot format, or a
    /// failure reported by the missing-placeholder handler.
    fn call(&self, template: &str, values: &Values) -> Result<String, InterpolationError>;
}

/// Supplies the replacement for a placeholder that has no value.
///
/// A value is missing when its name is absent from the values or maps to
/// `null`. The returned text is inserted as is, even for a `%<name>spec`
/// placeholder.
pub trait MissingPlaceholder: fmt::Debug + Send + Sync {
    /// Returns the text that replaces `placeholder`, the placeholder exactly
    /// as written in `template` (`%{name}` or `%<name>spec`).
    ///
    /// # Errors
    /// Whatever the handler decides to reject.
    fn missing_placeholder(
        &self,
        name: &str,
        placeholder: &str,
        values: &Values,
        template: &str,
    ) -> Result<String, InterpolationError>;
}

/// Re-emits the placeholder text unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeepPlaceholder;

impl MissingPlaceholder for KeepPlaceholder {
    fn missing_placeholder(
        &self,
        _name: &str,
        placeholder: &str,
        _values: &Values,
        _template: &str,
    ) -> Result<String, InterpolationError> {
        Ok(placeholder.to_string())
    }
}

/// Rejects a missing value with [`InterpolationError::MissingValue`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FailOnMissing;

impl MissingPlaceholder for FailOnMissing {
    fn missing_placeholder(
        &self,
        name: &str,
        _placeholder: &str,
        _values: &Values,
        template: &str,
    ) -> Result<String, InterpolationError> {
        Err(InterpolationError::MissingValue {
            name: name.to_string(),
            template: template.to_string(),
        })
    }
}
