//! The wrapped-cause link stored inside an [`Error`].
//!
//! A cause is either another domain [`Error`] or an opaque error from an
//! external system. Domain links are owned and cloned deeply; opaque
//! causes are shared by reference, so cloning an error never duplicates a
//! foreign error value.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::error::{BoxError, Error, ErrorChain, ErrorGroup};

/// The underlying cause recorded by [`Error::wrap`](crate::Error::wrap).
#[derive(Debug, Clone)]
pub enum Cause {
    /// A cause that is itself a domain [`Error`].
    Domain(Box<Error>),
    /// An opaque cause from an external system or library.
    External(Arc<dyn StdError + Send + Sync + 'static>),
}

impl Cause {
    /// Classify a boxed error: a domain [`Error`] becomes a [`Cause::Domain`]
    /// link, anything else is kept opaque.
    pub(crate) fn from_boxed(err: BoxError) -> Self {
        match err.downcast::<Error>() {
            Ok(domain) => Cause::Domain(domain),
            Err(external) => Cause::External(Arc::from(external)),
        }
    }

    /// The cause as a plain error trait object.
    pub fn as_dyn(&self) -> &(dyn StdError + 'static) {
        match self {
            Cause::Domain(err) => err.as_ref(),
            Cause::External(err) => &**err,
        }
    }

    /// The cause as a domain [`Error`], if it is one.
    pub fn domain(&self) -> Option<&Error> {
        match self {
            Cause::Domain(err) => Some(err),
            Cause::External(_) => None,
        }
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cause::Domain(err) => write!(f, "{err}"),
            Cause::External(err) => write!(f, "{err}"),
        }
    }
}

/// Walk an error's source chain looking for the first domain [`Error`].
///
/// This is the downcast-or-skip narrowing used by wrapping, appending,
/// and translation: it understands chains (the current head) and groups
/// (the front element) in addition to plain wrapped sources, and returns
/// `None` rather than failing when no domain error is present.
pub(crate) fn find_domain<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a Error> {
    let mut current: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(err) = current {
        if let Some(domain) = err.downcast_ref::<Error>() {
            return Some(domain);
        }
        if let Some(chain) = err.downcast_ref::<ErrorChain>() {
            return Some(chain.head());
        }
        if let Some(group) = err.downcast_ref::<ErrorGroup>() {
            return group.errors().first();
        }
        current = err.source();
    }
    None
}
