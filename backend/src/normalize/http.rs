//! HTTP shaping: uniform `{success, statusCode, message, payload}` bodies.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use envelope::outcome::NO_CONTENT;
use envelope::{Classified, HttpEnvelope, OutcomeKey, classify, unwrap_declared};
use serde_json::{Map, Value, json};

use super::ResponseNormalizer;

impl ResponseNormalizer {
    /// Shape a raw handler value into the uniform HTTP envelope.
    ///
    /// Declared outcomes win over the status code; an [`OutcomeKey::Unchanged`]
    /// outcome overrides the effective status to 204 (the transport adapter
    /// honours the override, not just the body). Empty payloads normalize
    /// to `{}` so clients never see absent or placeholder values.
    #[must_use]
    pub fn normalize_http(&self, raw: Value, status: u16, route: &str) -> HttpEnvelope {
        let (declared, inner) = unwrap_declared(raw);
        let key = OutcomeKey::resolve(declared, status);
        let effective_status = if key == OutcomeKey::Unchanged {
            NO_CONTENT
        } else {
            status
        };
        let meta = self.meta(route);
        HttpEnvelope {
            success: OutcomeKey::is_success(effective_status, key),
            status_code: effective_status,
            message: self.message(&meta, key),
            payload: shape_payload(inner),
        }
    }

    /// Transport adapter: normalize and write the envelope as JSON.
    ///
    /// The outgoing status is taken from the envelope so the 204 override
    /// reaches the wire.
    #[must_use]
    pub fn respond(&self, raw: Value, status: StatusCode, route: &str) -> HttpResponse {
        let body = self.normalize_http(raw, status.as_u16(), route);
        let effective = StatusCode::from_u16(body.status_code).unwrap_or(status);
        HttpResponse::build(effective).json(body)
    }
}

/// Reduce a classified payload to the value placed in the envelope.
fn shape_payload(inner: Value) -> Value {
    match classify(inner) {
        Classified::Empty => Value::Object(Map::new()),
        Classified::Scalar(value) => value,
        Classified::List(items) => Value::Array(items),
        Classified::Paginated { items, pagination } => {
            json!({ "items": items, "pagination": pagination })
        }
        Classified::Object(map) => Value::Object(map),
    }
}
