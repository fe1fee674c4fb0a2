//! Ordered accumulation of domain errors.
//!
//! [`ErrorGroup`] collects [`Error`] values in insertion order, flattens
//! nested groups on append, and normalizes foreign errors under the
//! shared `undefined` sentinel so downstream consumers can always assume
//! elements of the unified kind. Accumulation call sites finish with
//! [`ErrorGroup::finish`] or [`ErrorGroup::or_none`], which treat an
//! empty group as "no error" without a separate emptiness check.
//!
//! # Example
//!
//! ```
//! use plinth::{Error, ErrorGroup};
//!
//! let mut group = ErrorGroup::new();
//! for attempt in ["first", "second"] {
//!     group.append(Error::new("job", "step_failed", format!("{attempt} step failed")));
//! }
//!
//! let err = group.finish().unwrap_err();
//! assert_eq!(err.len(), 2);
//! ```

use std::fmt;

use serde::Serialize;

use crate::error::cause::find_domain;
use crate::error::{BoxError, Error, ErrorChain};
use crate::slices;

/// Function callback used by [`ErrorGroup`] to turn its errors into a string.
pub type GroupFormatter = fn(&[Error]) -> String;

/// Default [`GroupFormatter`]: empty string for no errors, the bare error
/// for one, and a bullet-point list wrapped in blank lines for more.
pub fn default_formatter(errors: &[Error]) -> String {
    match errors {
        [] => String::new(),
        [single] => single.to_string(),
        _ => {
            let points: Vec<String> = errors.iter().map(|err| format!("* {err}")).collect();
            format!("\n{}\n\n", points.join("\n"))
        }
    }
}

/// A mutable ordered collection of [`Error`] values.
///
/// Groups are not internally synchronized: sharing one across threads
/// requires external mutual exclusion, which the `&mut` mutators make
/// explicit.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorGroup {
    /// Errors in the group, in append order.
    errors: Vec<Error>,
    /// Formatter used to render the group as a string.
    #[serde(skip)]
    formatter: GroupFormatter,
}

impl Default for ErrorGroup {
    fn default() -> Self {
        Self {
            errors: Vec::new(),
            formatter: default_formatter,
        }
    }
}

impl ErrorGroup {
    /// Create an empty group with the default formatter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a group by appending each of the given errors.
    pub fn from_errors(errs: impl IntoIterator<Item = BoxError>) -> Self {
        let mut group = Self::new();
        group.append_all(errs);
        group
    }

    /// Create a group from the given errors and immediately translate
    /// every element with `translate`.
    pub fn translated<F, E>(translate: F, errs: impl IntoIterator<Item = BoxError>) -> Self
    where
        F: FnMut(Error) -> E,
        E: Into<BoxError>,
    {
        let mut group = Self::from_errors(errs);
        group.translate(translate);
        group
    }

    /// Returns a copy of the group using the given formatter.
    pub fn with_formatter(mut self, formatter: GroupFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Add a new error to the group.
    ///
    /// A group input is flattened one level into this group. An input
    /// carrying a domain [`Error`] anywhere in its source chain
    /// contributes that error; anything else is wrapped with the
    /// `undefined` sentinel first. Zero-value errors are dropped.
    pub fn append<E>(&mut self, err: E)
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.append_boxed(Box::new(err));
    }

    /// Add an already-boxed error to the group. See [`append`].
    ///
    /// [`append`]: ErrorGroup::append
    pub fn append_boxed(&mut self, err: BoxError) {
        // Flatten and merge the items of a nested group.
        let err = match err.downcast::<ErrorGroup>() {
            Ok(group) => {
                for inner in group.errors {
                    self.push(inner);
                }
                return;
            }
            Err(err) => err,
        };

        match find_domain(err.as_ref()) {
            Some(domain) => {
                let domain = domain.clone();
                self.push(domain);
            }
            None => {
                log::debug!("normalizing error without a domain identity: {err}");
                self.push(Error::undefined().wrap_boxed(err));
            }
        }
    }

    /// Append every error from the given sequence.
    pub fn append_all(&mut self, errs: impl IntoIterator<Item = BoxError>) {
        for err in errs {
            self.append_boxed(err);
        }
    }

    /// Append a domain error directly, dropping zero values.
    pub(crate) fn push(&mut self, err: Error) {
        if err.is_zero() {
            return;
        }
        self.errors.push(err);
    }

    /// All errors in the group, in insertion order.
    ///
    /// This borrows the underlying sequence; it reflects later appends.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Returns true if the group holds no errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// The number of errors in the group.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Finish accumulation: `Ok(())` when empty, otherwise the group as
    /// the error.
    ///
    /// This is the usual last call of an accumulation site, so the value
    /// returned represents the existence of errors.
    pub fn finish(self) -> Result<(), ErrorGroup> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    /// The group itself when it holds one or more errors, `None` when
    /// empty.
    pub fn or_none(self) -> Option<ErrorGroup> {
        if self.is_empty() { None } else { Some(self) }
    }

    /// The group's cause for sequential unwrapping.
    ///
    /// - empty: `None`
    /// - one error: that error itself (not a chain wrapper)
    /// - two or more: an [`ErrorChain`] over a copy of the sequence
    pub fn cause(&self) -> Option<BoxError> {
        match self.errors.as_slice() {
            [] => None,
            [single] => Some(Box::new(single.clone())),
            errors => ErrorChain::from_errors(errors).map(|chain| Box::new(chain) as BoxError),
        }
    }

    /// Sort the group by the lexicographic order of each error's
    /// rendered string.
    pub fn sort(&mut self) {
        self.errors.sort_by_key(Error::to_string);
    }

    /// Translate every element in place, preserving order and length.
    ///
    /// A translation result that is not a domain [`Error`] is wrapped
    /// with the `undefined` sentinel, like [`append`].
    ///
    /// This is commonly used to convert between domain and adapter error
    /// contexts.
    ///
    /// [`append`]: ErrorGroup::append
    pub fn translate<F, E>(&mut self, mut translate: F)
    where
        F: FnMut(Error) -> E,
        E: Into<BoxError>,
    {
        for slot in &mut self.errors {
            let translated: BoxError = translate(std::mem::take(slot)).into();
            *slot = match translated.downcast::<Error>() {
                Ok(domain) => *domain,
                Err(err) => match find_domain(err.as_ref()) {
                    Some(domain) => domain.clone(),
                    None => {
                        log::debug!("normalizing translated error without a domain identity: {err}");
                        Error::undefined().wrap_boxed(err)
                    }
                },
            };
        }
    }
}

impl fmt::Display for ErrorGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&(self.formatter)(&self.errors))
    }
}

impl std::error::Error for ErrorGroup {}

/// Append more errors onto a group, creating the group when needed.
///
/// If `err` is already an [`ErrorGroup`] it is reused and `errs` are
/// appended to it; otherwise a new group is returned containing `err`
/// followed by all of `errs`.
pub fn join(err: BoxError, errs: impl IntoIterator<Item = BoxError>) -> ErrorGroup {
    match err.downcast::<ErrorGroup>() {
        Ok(group) => {
            let mut group = *group;
            group.append_all(errs);
            group
        }
        Err(err) => {
            let mut group = ErrorGroup::new();
            group.append_all(slices::flatten([vec![err], errs.into_iter().collect()]));
            group
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as StdError;

    use super::*;
    use crate::error::NAMESPACE_DEFAULT;

    fn sample(code: &str) -> Error {
        Error::new("test", code, format!("{code} happened"))
    }

    #[test]
    fn test_empty_group_is_no_error() {
        let group = ErrorGroup::new();

        assert!(group.is_empty());
        assert_eq!(group.to_string(), "");
        assert!(group.cause().is_none());
        assert!(group.clone().or_none().is_none());
        assert!(group.finish().is_ok());
    }

    #[test]
    fn test_append_flattens_nested_group_one_level() {
        let mut outer = ErrorGroup::new();
        outer.append(sample("c"));

        let inner = ErrorGroup::from_errors([
            Box::new(sample("a")) as BoxError,
            Box::new(sample("b")) as BoxError,
        ]);
        outer.append(inner);

        let codes: Vec<&str> = outer.errors().iter().map(Error::code).collect();
        assert_eq!(codes, ["c", "a", "b"]);
    }

    #[test]
    fn test_append_wraps_foreign_error_with_sentinel() {
        let mut group = ErrorGroup::new();
        group.append(std::io::Error::other("disk unplugged"));

        let err = &group.errors()[0];
        assert_eq!(err.code(), "undefined");
        assert_eq!(err.namespace(), NAMESPACE_DEFAULT);
        assert!(err.is_transient());
        assert!(err.source().is_some());
    }

    #[test]
    fn test_append_drops_zero_error() {
        let mut group = ErrorGroup::new();
        group.append(Error::default());

        assert!(group.is_empty());
    }

    #[test]
    fn test_single_error_cause_is_the_error_itself() {
        let a = sample("a");
        let mut group = ErrorGroup::new();
        group.append(a.clone());

        let cause = group.cause().expect("one error means one cause");
        let err = cause
            .downcast_ref::<Error>()
            .expect("single-error cause should be a plain Error");
        assert_eq!(*err, a);
    }

    #[test]
    fn test_multi_error_cause_is_a_chain() {
        let mut group = ErrorGroup::new();
        group.append(sample("a"));
        group.append(sample("b"));

        let cause = group.cause().expect("two errors mean a cause");
        let chain = cause
            .downcast_ref::<ErrorChain>()
            .expect("multi-error cause should be a chain");
        assert_eq!(*chain.head(), group.errors()[0]);

        // The chain is a copy: appending afterwards must not change it.
        group.append(sample("c"));
        assert_eq!(chain.iter().count(), 2);
    }

    #[test]
    fn test_display_bullets_in_insertion_order() {
        let mut group = ErrorGroup::new();
        group.append(sample("a"));
        group.append(sample("b"));
        group.append(sample("c"));

        let rendered = group.to_string();
        let lines: Vec<&str> = rendered.trim_matches('\n').lines().collect();

        assert!(rendered.starts_with('\n') && rendered.ends_with("\n\n"));
        assert_eq!(lines.len(), 3);
        for (line, code) in lines.iter().zip(["a", "b", "c"]) {
            assert!(line.starts_with("* "), "line {line:?} should be a bullet");
            assert!(line.contains(code));
        }
    }

    #[test]
    fn test_display_single_error_is_bare() {
        let a = sample("a");
        let mut group = ErrorGroup::new();
        group.append(a.clone());

        assert_eq!(group.to_string(), a.to_string());
    }

    #[test]
    fn test_with_formatter_overrides_rendering() {
        fn count_formatter(errors: &[Error]) -> String {
            format!("{} errors", errors.len())
        }

        let mut group = ErrorGroup::new().with_formatter(count_formatter);
        group.append(sample("a"));

        assert_eq!(group.to_string(), "1 errors");
    }

    #[test]
    fn test_sort_orders_by_rendered_string() {
        let mut group = ErrorGroup::new();
        group.append(sample("c"));
        group.append(sample("a"));
        group.append(sample("b"));

        group.sort();

        let codes: Vec<&str> = group.errors().iter().map(Error::code).collect();
        assert_eq!(codes, ["a", "b", "c"]);
    }

    #[test]
    fn test_translate_preserves_length_and_order() {
        let mut group = ErrorGroup::new();
        group.append(sample("a"));
        group.append(sample("b"));

        group.translate(|err| err.with_tag("translated"));

        let codes: Vec<&str> = group.errors().iter().map(Error::code).collect();
        assert_eq!(codes, ["a", "b"]);
        for err in group.errors() {
            assert_eq!(err.extras().tags(), ["translated"]);
        }
    }

    #[test]
    fn test_translate_wraps_foreign_results_with_sentinel() {
        let mut group = ErrorGroup::new();
        group.append(sample("a"));
        group.append(sample("b"));

        group.translate(|err| std::io::Error::other(err.to_string()));

        assert_eq!(group.len(), 2);
        for err in group.errors() {
            assert_eq!(err.code(), "undefined");
        }
    }

    #[test]
    fn test_join_reuses_existing_group() {
        let mut group = ErrorGroup::new();
        group.append(sample("a"));

        let joined = join(Box::new(group), [Box::new(sample("b")) as BoxError]);

        let codes: Vec<&str> = joined.errors().iter().map(Error::code).collect();
        assert_eq!(codes, ["a", "b"]);
    }

    #[test]
    fn test_join_builds_group_from_plain_error() {
        let joined = join(
            Box::new(sample("a")),
            [Box::new(sample("b")) as BoxError, Box::new(sample("c")) as BoxError],
        );

        let codes: Vec<&str> = joined.errors().iter().map(Error::code).collect();
        assert_eq!(codes, ["a", "b", "c"]);
    }

    #[test]
    fn test_serialize_emits_errors_only() {
        let mut group = ErrorGroup::new();
        group.append(sample("a"));

        let encoded = serde_json::to_value(&group).unwrap();

        assert!(encoded.get("errors").is_some());
        assert_eq!(encoded["errors"].as_array().unwrap().len(), 1);
        assert!(encoded.get("formatter").is_none());
    }
}
