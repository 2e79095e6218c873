//! Storefront backend library.
//!
//! HTTP handlers, in-memory stores, and the response-normalization
//! pipeline that wraps every handler result in a uniform, localized
//! envelope. The envelope grammar itself lives in the `envelope` crate;
//! this crate wires it to routes, message catalogs, and actix-web.

pub mod api;
pub mod doc;
pub mod i18n;
pub mod middleware;
pub mod models;
pub mod normalize;
pub mod stores;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Request correlation middleware applied to the whole app.
pub use middleware::Correlation;
