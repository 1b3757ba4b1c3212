//! Scoped translation keys.
//!
//! Translation keys are organized in a tree where each nesting level names a
//! part of the application. A key-value storage only holds flat data, so every
//! key is stored together with its locale and full scope, joined by
//! [`SEPARATOR`]:
//!
//! ```text
//! en.errors.blank
//! en.errors.message.blank
//! ```

use std::collections::HashMap;

use serde_json::Value;

/// Separator between scope segments.
pub const SEPARATOR: char = '.';

/// Flattened translations in first-seen order.
///
/// A key appears at most once; `None` marks a value stored as absent.
pub type FlatTranslations = Vec<(String, Option<String>)>;

/// Joins two segments into a scope.
///
/// # Examples
/// ```
/// use i18n_resolver::scope;
///
/// assert_eq!(scope::join("hello", "world"), "hello.world");
/// ```
#[must_use]
pub fn join(first: &str, second: &str) -> String {
    let mut scope = String::with_capacity(first.len() + second.len() + 1);
    scope.push_str(first);
    scope.push(SEPARATOR);
    scope.push_str(second);
    scope
}

/// Joins any number of segments into a scope.
///
/// # Examples
/// ```
/// use i18n_resolver::scope;
///
/// assert_eq!(scope::join_all(["en", "common", "hello"]), "en.common.hello");
/// ```
#[must_use]
pub fn join_all<I>(segments: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut scope = String::new();
    for (index, segment) in segments.into_iter().enumerate() {
        if index > 0 {
            scope.push(SEPARATOR);
        }
        scope.push_str(segment.as_ref());
    }
    scope
}

/// Splits a scope into its segments.
///
/// An empty scope has no segments.
#[must_use]
pub fn split(scope: &str) -> Vec<&str> {
    if scope.is_empty() {
        return Vec::new();
    }
    scope.split(SEPARATOR).collect()
}

/// Combines each locale with every key, locale-major.
///
/// The result is the probe order used during lookup: every key alternative of
/// the first locale comes before any key of the next one.
///
/// # Examples
/// ```
/// use i18n_resolver::scope;
///
/// let probes = scope::cross_join(&["de", "en"], &["hello", "hi"]);
/// assert_eq!(probes, ["de.hello", "de.hi", "en.hello", "en.hi"]);
/// ```
#[must_use]
pub fn cross_join<L, K>(locales: &[L], keys: &[K]) -> Vec<String>
where
    L: AsRef<str>,
    K: AsRef<str>,
{
    locales
        .iter()
        .flat_map(|locale| keys.iter().map(move |key| join(locale.as_ref(), key.as_ref())))
        .collect()
}

/// Flattens a translation tree into fully scoped keys.
///
/// Multiple roots are allowed; each root is usually a locale. Objects are
/// descended depth-first in insertion order. Leaves become values: strings are
/// kept as-is, `null` becomes an absent value, and anything else is stored as
/// its JSON text. A non-object root has no scope and yields nothing.
///
/// When two paths produce the same key, the later value replaces the earlier
/// one but keeps its position.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use i18n_resolver::scope;
///
/// let flat = scope::flatten(&json!({
///     "en": { "common": { "hello": "hi" } },
///     "de": { "hello": "Hallo" }
/// }));
///
/// assert_eq!(
///     flat,
///     vec![
///         ("en.common.hello".to_string(), Some("hi".to_string())),
///         ("de.hello".to_string(), Some("Hallo".to_string())),
///     ]
/// );
/// ```
#[must_use]
pub fn flatten(tree: &Value) -> FlatTranslations {
    let mut flattener = Flattener::default();
    if let Value::Object(map) = tree {
        for (key, value) in map {
            flattener.visit(key, value);
        }
    }
    flattener.entries
}

/// Accumulates flattened entries while keeping keys unique.
#[derive(Debug, Default)]
struct Flattener {
    /// Entries in first-seen order.
    entries: FlatTranslations,
    /// Key to its position in `entries`.
    positions: HashMap<String, usize>,
}

impl Flattener {
    /// Visits `value` located at `scope`.
    fn visit(&mut self, scope: &str, value: &Value) {
        match value {
            Value::Object(map) => {
                for (key, nested) in map {
                    self.visit(&join(scope, key), nested);
                }
            }
            Value::Null => self.insert(scope, None),
            Value::String(s) => self.insert(scope, Some(s.clone())),
            other => self.insert(scope, Some(other.to_string())),
        }
    }

    /// Inserts an entry or replaces the value of an existing one.
    fn insert(&mut self, scope: &str, value: Option<String>) {
        if let Some(entry) = self.positions.get(scope).and_then(|&i| self.entries.get_mut(i)) {
            entry.1 = value;
            return;
        }
        self.positions.insert(scope.to_string(), self.entries.len());
        self.entries.push((scope.to_string(), value));
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;
    use serde_json::json;

    use super::*;

    fn entry(key: &str, value: &str) -> (String, Option<String>) {
        (key.to_string(), Some(value.to_string()))
    }

    #[rstest]
    fn join_two_segments() {
        assert_that!(join("hello", "world"), eq("hello.world"));
    }

    #[rstest]
    #[case(vec!["hello", "world"], "hello.world")]
    #[case(vec!["en", "activemodel", "errors", "blank"], "en.activemodel.errors.blank")]
    #[case(vec!["single"], "single")]
    #[case(vec![], "")]
    fn join_all_segments(#[case] segments: Vec<&str>, #[case] expected: &str) {
        assert_that!(join_all(segments), eq(expected));
    }

    #[rstest]
    #[case("hello.world", vec!["hello", "world"])]
    #[case("hello", vec!["hello"])]
    #[case("", vec![])]
    fn split_scope(#[case] scope: &str, #[case] expected: Vec<&str>) {
        assert_that!(split(scope), eq(&expected));
    }

    #[rstest]
    #[case("en.errors.messages.blank")]
    #[case("de.hello")]
    fn split_is_inverse_of_join(#[case] scope: &str) {
        assert_that!(join_all(split(scope)), eq(scope));
    }

    #[rstest]
    fn cross_join_is_locale_major() {
        let result = cross_join(&["de", "en"], &["hello", "hi"]);

        assert_that!(result, elements_are![eq("de.hello"), eq("de.hi"), eq("en.hello"), eq("en.hi")]);
    }

    #[rstest]
    fn cross_join_with_no_locales_is_empty() {
        let locales: [&str; 0] = [];

        assert_that!(cross_join(&locales, &["hello"]), is_empty());
    }

    #[googletest::test]
    fn flatten_simple() {
        let result = flatten(&json!({ "hello": "world" }));

        expect_that!(result, elements_are![eq(&entry("hello", "world"))]);
    }

    #[googletest::test]
    fn flatten_deeply_nested() {
        let result = flatten(&json!({ "en": { "a": { "b": "x" } } }));

        expect_that!(result, elements_are![eq(&entry("en.a.b", "x"))]);
    }

    #[googletest::test]
    fn flatten_with_one_root() {
        let result = flatten(&json!({ "en": { "foo": "bar", "inner": { "foo": "bar" } } }));

        expect_that!(
            result,
            elements_are![eq(&entry("en.foo", "bar")), eq(&entry("en.inner.foo", "bar"))]
        );
    }

    #[googletest::test]
    fn flatten_with_multiple_roots() {
        let result = flatten(&json!({ "en": { "foo": "bar" }, "ru": { "foo": "bar" } }));

        expect_that!(
            result,
            elements_are![eq(&entry("en.foo", "bar")), eq(&entry("ru.foo", "bar"))]
        );
    }

    #[googletest::test]
    fn flatten_keeps_insertion_order() {
        let result = flatten(&json!({
            "en": { "zeta": "z", "alpha": { "beta": "b" }, "gamma": "g" }
        }));
        let keys: Vec<String> = result.into_iter().map(|(k, _)| k).collect();

        expect_that!(keys, elements_are![eq("en.zeta"), eq("en.alpha.beta"), eq("en.gamma")]);
    }

    #[googletest::test]
    fn flatten_non_string_leaves() {
        let result = flatten(&json!({ "en": { "count": 42, "on": true, "nothing": null } }));

        expect_that!(
            result,
            elements_are![
                eq(&entry("en.count", "42")),
                eq(&entry("en.on", "true")),
                eq(&("en.nothing".to_string(), None))
            ]
        );
    }

    #[googletest::test]
    fn flatten_duplicate_scope_keeps_last_value() {
        let result = flatten(&json!({ "en.hello": "first", "en": { "hello": "second" } }));

        expect_that!(result, elements_are![eq(&entry("en.hello", "second"))]);
    }

    #[googletest::test]
    fn flatten_non_object_root_is_empty() {
        expect_that!(flatten(&json!("hello")), is_empty());
    }
}
