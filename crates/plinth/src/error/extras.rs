//! Auxiliary structured payloads attached to errors.
//!
//! Extras carry execution context that helps a human or an operator
//! understand an error without being part of its identity: debug traces,
//! help links, retry hints, and free-form tags. Each payload is
//! independently absent/present and is omitted from serialized output
//! when zero.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Common additional info attached to an [`Error`](crate::Error).
///
/// The composite is a plain value: every `with_*` builder returns an
/// updated copy, leaving the original untouched. Tags are appended,
/// the other payloads are replaced wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorExtras {
    /// Debug information captured from the error.
    #[serde(default, skip_serializing_if = "DebugExtras::is_zero")]
    debug: DebugExtras,

    /// Help information to inform operators about the error.
    #[serde(default, skip_serializing_if = "HelpExtras::is_zero")]
    help: HelpExtras,

    /// Retry information regarding the failed operation.
    #[serde(default, skip_serializing_if = "RetryExtras::is_zero")]
    retry: RetryExtras,

    /// Additional labels used to categorize errors.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tags: Vec<String>,
}

impl ErrorExtras {
    /// Returns a copy with the debug payload replaced.
    pub fn with_debug(mut self, debug: DebugExtras) -> Self {
        self.debug = debug;
        self
    }

    /// Returns a copy with the help payload replaced.
    pub fn with_help(mut self, help: HelpExtras) -> Self {
        self.help = help;
        self
    }

    /// Returns a copy with the retry payload replaced.
    pub fn with_retry(mut self, retry: RetryExtras) -> Self {
        self.retry = retry;
        self
    }

    /// Returns a copy with the given tag appended.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Get the debug payload.
    pub fn debug(&self) -> &DebugExtras {
        &self.debug
    }

    /// Get the help payload.
    pub fn help(&self) -> &HelpExtras {
        &self.help
    }

    /// Get the retry payload.
    pub fn retry(&self) -> &RetryExtras {
        &self.retry
    }

    /// Get the tags.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns true if every payload is absent.
    pub fn is_zero(&self) -> bool {
        self.debug.is_zero() && self.help.is_zero() && self.retry.is_zero() && self.tags.is_empty()
    }
}

/// Helpful information for debugging an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugExtras {
    /// Stack trace captured where the error occurred.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    stack_trace: String,
}

impl DebugExtras {
    /// Create a debug payload from a captured stack trace.
    pub fn new(stack_trace: impl Into<String>) -> Self {
        Self {
            stack_trace: stack_trace.into(),
        }
    }

    /// Get the stack trace.
    pub fn stack_trace(&self) -> &str {
        &self.stack_trace
    }

    /// Returns true if the payload is absent.
    pub fn is_zero(&self) -> bool {
        self.stack_trace.is_empty()
    }
}

/// A description and hyperlink pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    url: String,
    description: String,
}

impl Link {
    /// Create a link with a destination and a human description.
    pub fn new(url: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: description.into(),
        }
    }

    /// Get the destination URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the human description.
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Helpful hyperlinks for an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpExtras {
    /// Links to help documentation regarding the error.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    links: Vec<Link>,
}

impl HelpExtras {
    /// Create a help payload from documentation links.
    pub fn new(links: impl IntoIterator<Item = Link>) -> Self {
        Self {
            links: links.into_iter().collect(),
        }
    }

    /// Get the documentation links.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Returns true if the payload is absent.
    pub fn is_zero(&self) -> bool {
        self.links.is_empty()
    }
}

/// Advisory information dictating how/why retries can happen.
///
/// This is metadata only: nothing in this crate schedules or performs
/// retries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryExtras {
    /// Delay to abide by before retrying the failed operation.
    delay: Duration,
}

impl RetryExtras {
    /// Create a retry payload with the given delay.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Get the retry delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Returns true if the payload is absent.
    pub fn is_zero(&self) -> bool {
        self.delay == Duration::ZERO
    }
}
