//! Read-only cause-sequence adapter over a flattened error list.
//!
//! [`ErrorChain`] exposes an ordered sequence of [`Error`] values through
//! the standard one-cause-at-a-time protocol: display and matching always
//! target the current head, and [`std::error::Error::source`] steps to
//! the chain over the remaining tail. This lets standard cause-walking
//! idioms traverse a group's errors as if each one individually wrapped
//! the next.
//!
//! Chains are never built directly by callers; they are produced by
//! [`ErrorGroup::cause`](crate::ErrorGroup::cause).

use crate::error::Error;

/// A derived view over two or more errors, unwrapping one head at a time.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{head}")]
pub struct ErrorChain {
    head: Error,
    #[source]
    tail: Option<Box<ErrorChain>>,
}

impl ErrorChain {
    /// Build a chain over a copy of the given errors, head first.
    ///
    /// Returns `None` for an empty slice.
    pub(crate) fn from_errors(errors: &[Error]) -> Option<Self> {
        let (head, tail) = errors.split_first()?;
        Some(Self {
            head: head.clone(),
            tail: Self::from_errors(tail).map(Box::new),
        })
    }

    /// The current head element.
    pub fn head(&self) -> &Error {
        &self.head
    }

    /// Unwrap one level: the chain over the tail, or `None` when no
    /// further cause remains.
    pub fn next(&self) -> Option<&ErrorChain> {
        self.tail.as_deref()
    }

    /// Iterate the remaining elements, head first.
    pub fn iter(&self) -> impl Iterator<Item = &Error> {
        std::iter::successors(Some(self), |chain| chain.next()).map(ErrorChain::head)
    }

    /// Returns true if the current head equals the target.
    ///
    /// Matching inspects only the head; callers step with [`next`] to
    /// inspect subsequent elements, one per unwrap.
    ///
    /// [`next`]: ErrorChain::next
    pub fn matches(&self, target: &Error) -> bool {
        self.head == *target
    }
}
