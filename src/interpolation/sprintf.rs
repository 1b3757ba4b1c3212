//! `%{name}` and `%<name>spec` interpolation.

use super::format_spec::{
    self,
    FormatSpec,
};
use super::{
    Interpolation,
    InterpolationError,
    KeepPlaceholder,
    MissingPlaceholder,
    Values,
};

/// One recognized `%` sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placeholder<'a> {
    /// `%%`
    Escape,
    /// `%{name}`
    Named(&'a str),
    /// `%<name>spec`
    Formatted { name: &'a str, spec: &'a str },
}

/// Interpolates `%{name}` and printf-style `%<name>spec` placeholders.
///
/// - `%%` is a literal `%`
/// - `%{name}` is the value's text
/// - `%<name>spec` is the value rendered by [`FormatSpec`], where `spec`
///   runs up to the first conversion character on the same line
///
/// Names are ASCII word characters. A `%` that starts none of these is kept
/// as is. Missing values go through the [`MissingPlaceholder`] handler,
/// [`KeepPlaceholder`] by default.
#[derive(Debug)]
pub struct Sprintf {
    /// Called for placeholders without a value.
    missing: Box<dyn MissingPlaceholder>,
}

impl Default for Sprintf {
    fn default() -> Self {
        Self { missing: Box::new(KeepPlaceholder) }
    }
}

impl Sprintf {
    /// Interpolator that keeps placeholders without a value.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the missing-value handler.
    #[must_use]
    pub fn with_missing_placeholder(mut self, missing: impl MissingPlaceholder + 'static) -> Self {
        self.missing = Box::new(missing);
        self
    }

    /// Text for one placeholder. `raw` is the placeholder as written,
    /// including the leading `%`.
    fn replacement(
        &self,
        placeholder: Placeholder<'_>,
        raw: &str,
        template: &str,
        values: &Values,
    ) -> Result<String, InterpolationError> {
        let (name, spec) = match placeholder {
            Placeholder::Escape => return Ok("%".to_string()),
            Placeholder::Named(name) => (name, None),
            Placeholder::Formatted { name, spec } => (name, Some(spec.parse::<FormatSpec>()?)),
        };

        match values.get(name).filter(|value| !value.is_null()) {
            Some(value) => match spec {
                Some(spec) => spec.format(value),
                None => Ok(format_spec::value_text(value)),
            },
            None => {
                tracing::trace!(placeholder = name, "Missing interpolation value");
                self.missing.missing_placeholder(name, raw, values, template)
            }
        }
    }
}

impl Interpolation for Sprintf {
    fn call(&self, template: &str, values: &Values) -> Result<String, InterpolationError> {
        let mut output = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(at) = rest.find('%') {
            let (text, tail) = rest.split_at(at);
            output.push_str(text);
            let after_percent = tail.split_at(1).1;

            match scan_placeholder(after_percent) {
                Some((placeholder, consumed)) => {
                    let (raw, after) = tail.split_at(consumed + 1);
                    output.push_str(&self.replacement(placeholder, raw, template, values)?);
                    rest = after;
                }
                None => {
                    output.push('%');
                    rest = after_percent;
                }
            }
        }
        output.push_str(rest);

        Ok(output)
    }
}

/// Recognizes the placeholder following a `%` and returns it with the number
/// of bytes it spans after the `%`.
fn scan_placeholder(input: &str) -> Option<(Placeholder<'_>, usize)> {
    if input.starts_with('%') {
        return Some((Placeholder::Escape, 1));
    }

    if let Some(after_brace) = input.strip_prefix('{') {
        let name = word(after_brace)?;
        if !after_brace.split_at(name.len()).1.starts_with('}') {
            return None;
        }
        return Some((Placeholder::Named(name), name.len() + 2));
    }

    let after_angle = input.strip_prefix('<')?;
    let name = word(after_angle)?;
    let after_name = after_angle.split_at(name.len()).1.strip_prefix('>')?;
    let spec_len = after_name
        .char_indices()
        .take_while(|(_, c)| *c != '\n')
        .find(|(_, c)| format_spec::is_conversion(*c))
        .map(|(at, c)| at + c.len_utf8())?;
    let spec = after_name.split_at(spec_len).0;

    Some((Placeholder::Formatted { name, spec }, name.len() + 2 + spec_len))
}

/// Leading run of ASCII word characters, if non-empty.
fn word(input: &str) -> Option<&str> {
    let end = input.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_')).unwrap_or(input.len());
    (end > 0).then(|| input.split_at(end).0)
}
