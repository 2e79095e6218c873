//! Backend entry-point: wires REST endpoints, the normalization pipeline,
//! and OpenAPI docs.

use std::env;
use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use storefront_backend::Correlation;
use storefront_backend::api::health::{HealthState, live, ready};
use storefront_backend::api::{AppState, products, users};
#[cfg(debug_assertions)]
use storefront_backend::doc::ApiDoc;
use storefront_backend::i18n::{MessageCatalog, MessageResolver};
use storefront_backend::normalize::ResponseNormalizer;
use storefront_backend::normalize::routes::RouteCatalog;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let bind_addr =
        env::var("STOREFRONT_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_owned());
    let catalog = load_catalog()?;
    let normalizer =
        ResponseNormalizer::new(MessageResolver::new(Arc::new(catalog)), RouteCatalog::storefront());
    let state = web::Data::new(AppState::fixture(normalizer));

    let health_state = web::Data::new(HealthState::new());
    // Clone for server factory so readiness probe remains accessible.
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        let api = web::scope("/api/v1")
            .service(products::list_products)
            .service(products::get_product)
            .service(products::create_product)
            .service(products::update_product)
            .service(products::delete_product)
            .service(users::register_user)
            .service(users::verify_user);

        let mut app = App::new()
            .app_data(state.clone())
            .app_data(server_health_state.clone())
            .wrap(Correlation)
            .service(api)
            .service(ready)
            .service(live);

        #[cfg(debug_assertions)]
        {
            app = app
                .service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
        }

        app
    })
    .bind(bind_addr)?;

    health_state.mark_ready();
    server.run().await
}

/// Load the embedded message catalog, overlaid with an optional operator file.
///
/// `STOREFRONT_MESSAGES_FILE` points at a nested JSON catalog whose leaves
/// replace the embedded defaults key by key.
fn load_catalog() -> std::io::Result<MessageCatalog> {
    let builtin = MessageCatalog::builtin()
        .map_err(|e| std::io::Error::other(format!("embedded message catalog: {e}")))?;
    let Ok(path) = env::var("STOREFRONT_MESSAGES_FILE") else {
        return Ok(builtin);
    };
    let source = std::fs::read_to_string(&path)
        .map_err(|e| std::io::Error::other(format!("read message catalog at {path}: {e}")))?;
    let overrides = MessageCatalog::from_json_str(&source)
        .map_err(|e| std::io::Error::other(format!("parse message catalog at {path}: {e}")))?;
    Ok(builtin.merged_with(overrides))
}
