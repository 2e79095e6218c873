//! GraphQL shaping: `{success, message, data}` or
//! `{success, message, items, pagination}` resolver results.
//!
//! GraphQL carries no transport status code, so any value reaching this
//! stage counts as a success; failures are raised upstream as typed errors
//! and handled by the error layer. The execution engine itself is excluded
//! transport, so these functions are consumed directly by resolver glue.

use envelope::{Classified, GraphQlEnvelope, OutcomeKey, classify};
use serde_json::Value;

use super::ResponseNormalizer;

impl ResponseNormalizer {
    /// Shape a raw resolver value into the uniform GraphQL envelope.
    ///
    /// A value that already carries boolean `success` and string `message`
    /// fields is treated as pre-shaped by the handler and passes through.
    /// Otherwise a paginated classification emits `items`/`pagination` and
    /// everything else emits `data`; never both.
    #[must_use]
    pub fn normalize_graphql(&self, raw: Value, route: &str) -> GraphQlEnvelope {
        if let Some(pre_shaped) = passthrough(&raw) {
            return pre_shaped;
        }
        let meta = self.meta(route);
        let message = self.message(&meta, OutcomeKey::Success);
        match classify(raw.clone()) {
            Classified::Paginated { items, pagination } => {
                GraphQlEnvelope::paginated(true, message, items, pagination)
            }
            // The empty-object collapse is an HTTP concern; GraphQL data
            // carries the resolver value as-is.
            _ => GraphQlEnvelope::singular(true, message, raw),
        }
    }
}

/// Detect a value the handler already shaped into an envelope.
fn passthrough(raw: &Value) -> Option<GraphQlEnvelope> {
    let map = raw.as_object()?;
    let success = map.get("success")?.as_bool()?;
    let message = map.get("message")?.as_str()?;
    Some(GraphQlEnvelope {
        success,
        message: message.to_owned(),
        data: map.get("data").cloned(),
        items: map
            .get("items")
            .and_then(|items| items.as_array().cloned()),
        pagination: map.get("pagination").cloned(),
    })
}

#[cfg(test)]
mod tests {
    //! GraphQL envelope shaping and pass-through tests.

    use std::sync::Arc;

    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::i18n::{MessageCatalog, MessageResolver};
    use crate::normalize::routes::{PRODUCT_DETAIL, PRODUCT_LIST, RouteCatalog};

    fn normalizer() -> ResponseNormalizer {
        let catalog = MessageCatalog::from_value(json!({
            "common": {"product": {"action": {
                "list": {"success": "Products fetched"},
                "detail": {"success": "Product fetched"},
            }}}
        }))
        .expect("valid test catalog");
        ResponseNormalizer::new(
            MessageResolver::new(Arc::new(catalog)),
            RouteCatalog::storefront(),
        )
    }

    #[rstest]
    fn paginated_values_emit_items_and_pagination_but_no_data() {
        let raw = json!({"items": [{"id": 1}], "paginations": {"currentPage": 1, "totalPages": 5}});
        let envelope = normalizer().normalize_graphql(raw, PRODUCT_LIST);
        assert!(envelope.success);
        assert_eq!(envelope.message, "Products fetched");
        assert_eq!(envelope.items, Some(vec![json!({"id": 1})]));
        assert_eq!(
            envelope.pagination,
            Some(json!({"currentPage": 1, "totalPages": 5}))
        );
        assert_eq!(envelope.data, None);
    }

    #[rstest]
    fn singular_values_emit_data_only() {
        let envelope = normalizer().normalize_graphql(json!({"id": 7}), PRODUCT_DETAIL);
        assert!(envelope.success);
        assert_eq!(envelope.data, Some(json!({"id": 7})));
        assert_eq!(envelope.items, None);
        assert_eq!(envelope.pagination, None);
    }

    #[rstest]
    fn pre_shaped_values_pass_through_untouched() {
        let raw = json!({"success": false, "message": "already shaped", "data": {"id": 1}});
        let envelope = normalizer().normalize_graphql(raw, PRODUCT_DETAIL);
        assert!(!envelope.success);
        assert_eq!(envelope.message, "already shaped");
        assert_eq!(envelope.data, Some(json!({"id": 1})));
    }

    #[rstest]
    #[case(json!({"success": "yes", "message": "m"}))]
    #[case(json!({"success": true, "message": 42}))]
    #[case(json!({"success": true}))]
    fn malformed_pre_shapes_are_normalized_instead(#[case] raw: Value) {
        let envelope = normalizer().normalize_graphql(raw.clone(), PRODUCT_DETAIL);
        assert!(envelope.success);
        assert_eq!(envelope.data, Some(raw));
    }

    #[rstest]
    fn empty_objects_are_not_collapsed_on_the_graphql_surface() {
        let envelope = normalizer().normalize_graphql(json!({}), PRODUCT_DETAIL);
        assert_eq!(envelope.data, Some(json!({})));
    }
}
