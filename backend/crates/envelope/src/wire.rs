//! Wire envelopes returned to HTTP and GraphQL clients.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Uniform body returned by every HTTP endpoint.
///
/// ## Invariants
/// - `payload` is always present; handlers that produce nothing yield `{}`.
/// - `success` is derived by the normalizer, never supplied by a handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpEnvelope {
    /// Conjunction of transport-level and domain-level success.
    pub success: bool,
    /// Effective status code, also set on the transport response.
    pub status_code: u16,
    /// Localized human-readable summary of the outcome.
    pub message: String,
    /// Shaped payload: object, array, or scalar.
    pub payload: Value,
}

/// Uniform resolver result returned on the GraphQL surface.
///
/// ## Invariants
/// - List semantics use `items`/`pagination`; singular semantics use
///   `data`. The two groups are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQlEnvelope {
    /// Domain-level success flag.
    pub success: bool,
    /// Localized human-readable summary of the outcome.
    pub message: String,
    /// Singular payload; absent on paginated responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Page of items; absent on singular responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<Value>>,
    /// Pagination metadata accompanying `items`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Value>,
}

impl GraphQlEnvelope {
    /// Build an envelope carrying singular semantics.
    #[must_use]
    pub fn singular(success: bool, message: impl Into<String>, data: Value) -> Self {
        Self {
            success,
            message: message.into(),
            data: Some(data),
            items: None,
            pagination: None,
        }
    }

    /// Build an envelope carrying list semantics.
    #[must_use]
    pub fn paginated(
        success: bool,
        message: impl Into<String>,
        items: Vec<Value>,
        pagination: Value,
    ) -> Self {
        Self {
            success,
            message: message.into(),
            data: None,
            items: Some(items),
            pagination: Some(pagination),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Serialization-contract tests for the two envelopes.

    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn http_envelope_serializes_camel_case() {
        let envelope = HttpEnvelope {
            success: true,
            status_code: 200,
            message: "ok".to_owned(),
            payload: json!({}),
        };
        let value = serde_json::to_value(&envelope).expect("serializable envelope");
        assert_eq!(
            value,
            json!({"success": true, "statusCode": 200, "message": "ok", "payload": {}})
        );
    }

    #[rstest]
    fn paginated_graphql_envelope_omits_data() {
        let envelope = GraphQlEnvelope::paginated(true, "ok", vec![json!(1)], json!({"p": 1}));
        let value = serde_json::to_value(&envelope).expect("serializable envelope");
        assert_eq!(
            value,
            json!({"success": true, "message": "ok", "items": [1], "pagination": {"p": 1}})
        );
    }

    #[rstest]
    fn singular_graphql_envelope_omits_items_and_pagination() {
        let envelope = GraphQlEnvelope::singular(true, "ok", json!({"id": 1}));
        let value = serde_json::to_value(&envelope).expect("serializable envelope");
        assert_eq!(
            value,
            json!({"success": true, "message": "ok", "data": {"id": 1}})
        );
    }
}
