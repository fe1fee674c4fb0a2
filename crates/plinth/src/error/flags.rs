//! Bitmask classification flags attached to errors.
//!
//! Flags are independent boolean attributes packed into one integer and
//! queried via bit tests. They carry classification context that is
//! orthogonal to an error's namespace/code identity, such as whether the
//! failed operation is safe to retry.

use bitflags::bitflags;

bitflags! {
    /// Classification attributes for an [`Error`](crate::Error).
    ///
    /// The set is extensible: new bits may be added without changing the
    /// layout of existing ones.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    #[derive(serde::Serialize, serde::Deserialize)]
    pub struct ErrorFlags: u32 {
        /// The error is unknown/unregistered, e.g. it originates from an
        /// external system or library rather than a domain definition.
        const UNKNOWN = 1 << 0;
        /// The failed operation is safe to retry.
        const RETRYABLE = 1 << 1;
        /// The error indicates an operation timeout.
        const TIMEOUT = 1 << 2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_default_is_empty() {
        assert!(ErrorFlags::default().is_empty());
    }

    #[test]
    fn test_flags_union_and_contains() {
        let flags = ErrorFlags::RETRYABLE | ErrorFlags::TIMEOUT;

        assert!(flags.contains(ErrorFlags::RETRYABLE));
        assert!(flags.contains(ErrorFlags::TIMEOUT));
        assert!(!flags.contains(ErrorFlags::UNKNOWN));
    }

    #[test]
    fn test_flags_serde_round_trip() {
        let flags = ErrorFlags::UNKNOWN | ErrorFlags::RETRYABLE;

        let encoded = serde_json::to_string(&flags).unwrap();
        let decoded: ErrorFlags = serde_json::from_str(&encoded).unwrap();

        assert_eq!(flags, decoded);
    }
}
