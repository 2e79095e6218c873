//! Explicit route metadata used to build message-lookup keys.
//!
//! The resource/action pair for each route is configured up front in a
//! [`RouteCatalog`] rather than reflected from handler annotations at
//! request time. A route key of the form `<resource>.<action>` doubles as
//! the name-derived fallback when the catalog has no entry.

use std::collections::HashMap;

use envelope::OutcomeKey;
use tracing::{error, warn};

/// Route key for `GET /api/v1/products`.
pub const PRODUCT_LIST: &str = "product.list";
/// Route key for `GET /api/v1/products/{id}`.
pub const PRODUCT_DETAIL: &str = "product.detail";
/// Route key for `POST /api/v1/products`.
pub const PRODUCT_CREATE: &str = "product.create";
/// Route key for `PUT /api/v1/products/{id}`.
pub const PRODUCT_UPDATE: &str = "product.update";
/// Route key for `DELETE /api/v1/products/{id}`.
pub const PRODUCT_DELETE: &str = "product.delete";
/// Route key for `POST /api/v1/users/register`.
pub const USER_REGISTER: &str = "user.register";
/// Route key for `POST /api/v1/users/verify`.
pub const USER_VERIFY: &str = "user.verify";

/// Segment between resource and action in every message key.
const ACTION_PREFIX: &str = "action";

/// Resource/action pair naming one route for message lookup.
///
/// Computed per request from the catalog, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMeta {
    /// Noun the route operates on (`product`, `user`).
    pub resource: String,
    /// Verb the route performs (`list`, `verify`).
    pub action: String,
}

impl RouteMeta {
    /// Build metadata from owned parts.
    #[must_use]
    pub fn new(resource: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            action: action.into(),
        }
    }

    /// Message-lookup key for this route and outcome:
    /// `common.<resource>.action.<action>.<outcome>`.
    #[must_use]
    pub fn message_key(&self, key: OutcomeKey) -> String {
        format!(
            "common.{}.{}.{}.{}",
            self.resource,
            ACTION_PREFIX,
            self.action,
            key.as_str()
        )
    }
}

/// Startup-built map from route key to [`RouteMeta`].
#[derive(Debug, Clone, Default)]
pub struct RouteCatalog {
    entries: HashMap<String, RouteMeta>,
}

impl RouteCatalog {
    /// Empty catalog; every lookup will use the name-derived fallback.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog covering every Storefront route.
    #[must_use]
    pub fn storefront() -> Self {
        Self::new()
            .with_route(PRODUCT_LIST, "product", "list")
            .with_route(PRODUCT_DETAIL, "product", "detail")
            .with_route(PRODUCT_CREATE, "product", "create")
            .with_route(PRODUCT_UPDATE, "product", "update")
            .with_route(PRODUCT_DELETE, "product", "delete")
            .with_route(USER_REGISTER, "user", "register")
            .with_route(USER_VERIFY, "user", "verify")
    }

    /// Register explicit metadata for a route key.
    #[must_use]
    pub fn with_route(
        mut self,
        route: impl Into<String>,
        resource: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        self.entries
            .insert(route.into(), RouteMeta::new(resource, action));
        self
    }

    /// Resolve metadata for `route`.
    ///
    /// An explicit entry wins. On a miss the `<resource>.<action>` route
    /// key itself is split as a fallback and a warning is logged; a key
    /// that cannot be split degrades to a placeholder resource and is
    /// logged as an error. Resolution never fails the request.
    #[must_use]
    pub fn resolve(&self, route: &str) -> RouteMeta {
        if let Some(meta) = self.entries.get(route) {
            return meta.clone();
        }
        match route.split_once('.') {
            Some((resource, action)) if !resource.is_empty() && !action.is_empty() => {
                warn!(%route, "route metadata not configured; deriving resource and action from the route key");
                RouteMeta::new(resource, action)
            }
            _ => {
                error!(%route, "malformed route key; using placeholder metadata");
                RouteMeta::new("unknown", route)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Catalog resolution and message-key grammar tests.

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn explicit_entry_wins_over_derivation() {
        let catalog = RouteCatalog::new().with_route("product.list", "catalogue", "browse");
        let meta = catalog.resolve("product.list");
        assert_eq!(meta, RouteMeta::new("catalogue", "browse"));
    }

    #[rstest]
    fn missing_entry_derives_from_route_key() {
        let meta = RouteCatalog::new().resolve("order.cancel");
        assert_eq!(meta, RouteMeta::new("order", "cancel"));
    }

    #[rstest]
    #[case("noaction")]
    #[case(".leading")]
    #[case("trailing.")]
    fn malformed_route_key_degrades_to_placeholder(#[case] route: &str) {
        let meta = RouteCatalog::new().resolve(route);
        assert_eq!(meta.resource, "unknown");
        assert_eq!(meta.action, route);
    }

    #[rstest]
    #[case(OutcomeKey::Success, "common.product.action.list.success")]
    #[case(OutcomeKey::SendMailFailed, "common.product.action.list.sendMailFailed")]
    fn message_key_follows_the_grammar(#[case] key: OutcomeKey, #[case] expected: &str) {
        let meta = RouteMeta::new("product", "list");
        assert_eq!(meta.message_key(key), expected);
    }

    #[rstest]
    fn storefront_catalog_covers_every_route_constant() {
        let catalog = RouteCatalog::storefront();
        for route in [
            PRODUCT_LIST,
            PRODUCT_DETAIL,
            PRODUCT_CREATE,
            PRODUCT_UPDATE,
            PRODUCT_DELETE,
            USER_REGISTER,
            USER_VERIFY,
        ] {
            let meta = catalog.resolve(route);
            let (resource, action) = route.split_once('.').expect("route constants are two-part");
            assert_eq!(meta, RouteMeta::new(resource, action));
        }
    }
}
