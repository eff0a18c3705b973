//! Correlation identifier for a single CLI invocation

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier attached to the root span of one process run
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvocationId(String);

impl InvocationId {
    /// Generate a new time-ordered id (UUIDv7)
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for InvocationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for InvocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_ids_differ() {
        let a = InvocationId::new();
        let b = InvocationId::new();
        assert_ne!(a, b);
        assert!(!a.as_str().is_empty());
    }

    #[test]
    fn test_display_matches_as_str() {
        let id = InvocationId::new();
        assert_eq!(id.to_string(), id.as_str());
    }

    #[test]
    fn test_serialization() {
        let id = InvocationId::new();
        let json = serde_json::to_string(&id).unwrap();
        let back: InvocationId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
