//! Response normalization pipeline.
//!
//! Two cooperating pieces sit between business-logic handlers and the
//! wire: outcome resolution and payload classification live in the
//! `envelope` crate as total functions; this module composes them with
//! route metadata and localized message resolution into the
//! [`ResponseNormalizer`], then exposes one adapter per transport
//! (HTTP in [`http`], GraphQL in [`graphql`]).
//!
//! Control flow: handler returns a raw `serde_json::Value` → route key
//! resolves to `(resource, action)` → outcome key resolved → message key
//! `common.<resource>.action.<action>.<outcome>` looked up with graceful
//! fallback → payload shaped → envelope written to the transport.

pub mod graphql;
pub mod http;
pub mod routes;

use envelope::OutcomeKey;

use crate::i18n::MessageResolver;
use routes::{RouteCatalog, RouteMeta};

/// Fallback message used when a message key misses the catalog.
pub const DEFAULT_MESSAGE: &str = "Operation completed";

/// Shapes raw handler values into uniform wire envelopes.
///
/// Stateless per request: the catalogs it holds are built once at startup
/// and shared read-only, so one instance serves all workers.
#[derive(Debug, Clone)]
pub struct ResponseNormalizer {
    resolver: MessageResolver,
    routes: RouteCatalog,
}

impl ResponseNormalizer {
    /// Compose a normalizer from its two startup-built collaborators.
    #[must_use]
    pub fn new(resolver: MessageResolver, routes: RouteCatalog) -> Self {
        Self { resolver, routes }
    }

    /// Resolve route metadata for a route key.
    fn meta(&self, route: &str) -> RouteMeta {
        self.routes.resolve(route)
    }

    /// Resolve the localized message for a route outcome.
    fn message(&self, meta: &RouteMeta, key: OutcomeKey) -> String {
        self.resolver.resolve(&meta.message_key(key), DEFAULT_MESSAGE)
    }
}
