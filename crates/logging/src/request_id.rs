//! # Request ID Tracking
//!
//! Collision-resistant, URL-safe request identifiers (cuid2) for log
//! correlation.

/// A request ID.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a new random request ID.
    #[inline]
    #[must_use]
    pub fn new() -> Self { Self(cuid2::cuid()) }

    /// Get the request ID as a string.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str { &self.0 }

    /// Consume and return the inner string.
    #[inline]
    #[must_use]
    pub fn into_string(self) -> String { self.0 }
}

impl Default for RequestId {
    #[inline]
    fn default() -> Self { Self::new() }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
}

/// Accept a request ID from an incoming header, if well-formed.
///
/// cuid2 values are alphanumeric and at least 20 characters; anything else
/// is discarded and a fresh ID should be generated instead.
pub fn try_from_header(value: &str) -> Option<RequestId> {
    let value = value.trim();
    if value.len() >= 20
        && value.len() <= 64
        && value
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        Some(RequestId(value.to_string()))
    }
    else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_generated() {
        let id = RequestId::new();
        assert!(id.as_str().len() >= 20);
        assert!(id.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_request_id_display() {
        let id = RequestId::new();
        assert_eq!(format!("{}", id), id.as_str());
    }

    #[test]
    fn test_try_from_header() {
        let value = "k192v2g4w3zq8h6j5k12345678";
        let id = try_from_header(value).unwrap();
        assert_eq!(id.as_str(), value);
    }

    #[test]
    fn test_try_from_header_rejects_garbage() {
        assert!(try_from_header("short").is_none());
        assert!(try_from_header("invalid!@#characters-here").is_none());
        assert!(try_from_header(&"x".repeat(100)).is_none());
    }
}
