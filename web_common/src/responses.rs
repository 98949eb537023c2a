//! Generic backend response bodies.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Error body returned by the backend on any non-2xx status.
///
/// `details` maps form field names (e.g. `ownerEmail`) to messages when the
/// backend rejected individual fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerates_missing_fields() {
        let body: ApiErrorBody = serde_json::from_str("{}").unwrap();
        assert!(body.message.is_none());
        assert!(body.details.is_empty());

        let body: ApiErrorBody =
            serde_json::from_str(r#"{"message":"Bad","details":{"ownerEmail":"taken"}}"#).unwrap();
        assert_eq!(body.message.as_deref(), Some("Bad"));
        assert_eq!(body.details["ownerEmail"], "taken");
    }
}
