//! Structured application errors.
//!
//! This module provides the [`Error`] primitive: a value combining a
//! namespace/code identity, a human message, classification
//! [`ErrorFlags`], contextual [`ErrorExtras`], and an optional wrapped
//! [`Cause`]. Errors compose into an ordered [`ErrorGroup`], which can in
//! turn expose its elements through the sequential-cause [`ErrorChain`]
//! adapter.
//!
//! Errors are immutable by convention: every `with_*` builder and
//! [`Error::wrap`] returns a new copy, so values can be shared freely
//! across threads. Only [`ErrorGroup`] mutates in place.
//!
//! # Example
//!
//! ```
//! use plinth::{Error, ErrorFlags};
//!
//! let timeout = Error::new("billing", "charge_timeout", "charge did not settle in time")
//!     .with_flag(ErrorFlags::RETRYABLE | ErrorFlags::TIMEOUT);
//!
//! assert_eq!(timeout.key(), "billing/charge_timeout");
//! assert!(timeout.is_retryable());
//!
//! let wrapped = timeout.wrap(std::io::Error::other("connection reset"));
//! assert_eq!(
//!     wrapped.to_string(),
//!     "[billing:charge_timeout] charge did not settle in time\n-> connection reset"
//! );
//! ```

mod cause;
mod chain;
mod extras;
mod flags;
mod group;

pub use cause::Cause;
pub use chain::ErrorChain;
pub use extras::{DebugExtras, ErrorExtras, HelpExtras, Link, RetryExtras};
pub use flags::ErrorFlags;
pub use group::{ErrorGroup, GroupFormatter, default_formatter, join};

use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use cause::find_domain;

/// Boxed error trait object used to carry foreign errors across the API.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Default namespace for errors generated by this crate.
pub const NAMESPACE_DEFAULT: &str = "plinth";

/// Shared identity for wrapped errors that are not well-known or
/// previously defined. This likely means the error comes from an
/// external system/library and not a domain definition.
static UNDEFINED: LazyLock<Error> = LazyLock::new(|| {
    Error::new(
        NAMESPACE_DEFAULT,
        "undefined",
        "wrapped the following error which is not well-defined",
    )
    .with_flag(ErrorFlags::UNKNOWN)
});

/// Returns a slug that should be unique for each error kind
/// (namespace + code).
pub fn error_key(namespace: &str, code: &str) -> String {
    format!("{namespace}/{code}")
}

/// A standard application error primitive.
///
/// Identity is the (namespace, code) pair; everything else is context.
/// The wrapped cause is hidden from serialized output and only visible
/// to machine/operator consumers through [`Error::wrapped`] and the
/// standard source chain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Error {
    /// Machine-readable representation of the error.
    code: String,

    /// Optional execution context that is helpful for understanding the
    /// error.
    #[serde(default, skip_serializing_if = "ErrorExtras::is_zero")]
    extras: ErrorExtras,

    /// Additional classification for the error, e.g. indicating whether
    /// it can be retried.
    #[serde(default, skip_serializing_if = "ErrorFlags::is_empty")]
    flags: ErrorFlags,

    /// Human-readable representation of the error.
    message: String,

    /// Bucketing/grouping concept for errors, commonly the
    /// package/repository/service an error originated from.
    namespace: String,

    /// Wrapped cause if this error was created from another via
    /// [`Error::wrap`].
    #[serde(skip)]
    wrapped: Option<Cause>,
}

impl Error {
    /// Create an error with the given identity and message.
    pub fn new(
        namespace: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            extras: ErrorExtras::default(),
            flags: ErrorFlags::empty(),
            message: message.into(),
            namespace: namespace.into(),
            wrapped: None,
        }
    }

    /// The shared sentinel identity assigned to wrapped errors that do
    /// not carry a domain identity of their own.
    pub fn undefined() -> Self {
        UNDEFINED.clone()
    }

    /// Get the machine-readable code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Get the contextual extras.
    pub fn extras(&self) -> &ErrorExtras {
        &self.extras
    }

    /// Get the classification flags.
    pub fn flags(&self) -> ErrorFlags {
        self.flags
    }

    /// Get the human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Get the wrapped cause, if any.
    pub fn wrapped(&self) -> Option<&Cause> {
        self.wrapped.as_ref()
    }

    /// Returns a value that uniquely identifies the kind of error.
    pub fn key(&self) -> String {
        error_key(&self.namespace, &self.code)
    }

    /// Returns true if the error is an empty/zero value, i.e. it carries
    /// no identity yet.
    pub fn is_zero(&self) -> bool {
        self.code.is_empty()
            && self.message.is_empty()
            && self.namespace.is_empty()
            && self.flags.is_empty()
            && self.extras.is_zero()
            && self.wrapped.is_none()
    }

    /// Returns true if the failed operation is safe to retry.
    pub fn is_retryable(&self) -> bool {
        self.flags.contains(ErrorFlags::RETRYABLE)
    }

    /// Returns true if the error indicates an operation timeout.
    pub fn is_timeout(&self) -> bool {
        self.flags.contains(ErrorFlags::TIMEOUT)
    }

    /// Returns true if the operation failure is transient and a result
    /// might be different if tried at another time.
    ///
    /// Transience reuses the [`ErrorFlags::UNKNOWN`] bit; there is no
    /// dedicated transient bit.
    pub fn is_transient(&self) -> bool {
        self.flags.contains(ErrorFlags::UNKNOWN)
    }

    /// Returns a copy with the given flag attribute applied.
    pub fn with_flag(mut self, flag: ErrorFlags) -> Self {
        self.flags |= flag;
        self
    }

    /// Returns a copy with the given debug info set.
    pub fn with_debug_info(mut self, debug: DebugExtras) -> Self {
        self.extras = self.extras.with_debug(debug);
        self
    }

    /// Returns a copy with the given help info set.
    pub fn with_help(mut self, help: HelpExtras) -> Self {
        self.extras = self.extras.with_help(help);
        self
    }

    /// Returns a copy with the given retry info set.
    pub fn with_retry(mut self, retry: RetryExtras) -> Self {
        self.extras = self.extras.with_retry(retry);
        self
    }

    /// Returns a copy with the given tag appended.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.extras = self.extras.with_tag(tag);
        self
    }

    /// Returns a copy with the given error wrapped as the cause.
    ///
    /// If this instance is a zero value and `err` carries a domain
    /// [`Error`] in its source chain, a copy of that error is returned
    /// instead (identity adoption). This lets call sites wrap
    /// unconditionally without first checking whether they already have
    /// an identity.
    pub fn wrap<E>(self, err: E) -> Error
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.wrap_boxed(Box::new(err))
    }

    /// Boxed variant of [`Error::wrap`].
    pub fn wrap_boxed(mut self, err: BoxError) -> Error {
        if self.is_zero() {
            if let Some(domain) = find_domain(err.as_ref()) {
                return domain.clone();
            }
        }
        self.wrapped = Some(Cause::from_boxed(err));
        self
    }

    /// Returns a copy wrapping an opaque error built from the given
    /// message.
    pub fn wrap_msg(self, message: impl Into<String>) -> Error {
        let message: String = message.into();
        self.wrap_boxed(message.into())
    }

    /// Returns a group containing this error and every wrapped domain
    /// error it contains, root to leaf.
    ///
    /// The walk only traverses homogeneous [`Error`] links: the first
    /// non-domain cause terminates it and is not included.
    pub fn as_group(&self) -> ErrorGroup {
        let mut group = ErrorGroup::new();
        group.push(self.clone());

        let mut current = self;
        while let Some(Cause::Domain(next)) = current.wrapped.as_ref() {
            group.push(next.as_ref().clone());
            current = next.as_ref();
        }

        group
    }

    /// Returns true if the first domain error in `target`'s source chain
    /// equals this one.
    ///
    /// Equality follows [`Error::eq`]: the wrapped subtrees are not
    /// compared.
    pub fn is(&self, target: &(dyn std::error::Error + 'static)) -> bool {
        match find_domain(target) {
            Some(domain) => self == domain,
            None => false,
        }
    }
}

/// Structural equality over identity, message, flags, and the
/// debug/help/retry extras. Tags and the wrapped cause are excluded.
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
            && self.message == other.message
            && self.namespace == other.namespace
            && self.flags == other.flags
            && self.extras.debug() == other.extras.debug()
            && self.extras.help() == other.extras.help()
            && self.extras.retry() == other.extras.retry()
    }
}

impl Eq for Error {}

impl fmt::Display for Error {
    /// Renders `[namespace:code] message`, with the cause appended on a
    /// `->` line when present. The alternate form (`{:#}`) renders the
    /// full [`Error::as_group`] representation instead.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return write!(f, "{}", self.as_group());
        }

        write!(f, "[{}:{}] {}", self.namespace, self.code, self.message)?;
        if let Some(cause) = &self.wrapped {
            write!(f, "\n-> {cause}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.wrapped.as_ref().map(Cause::as_dyn)
    }
}
