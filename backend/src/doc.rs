//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints (products, users, health)
//! - **Schemas**: The wire types handlers accept and return, plus the
//!   structured error body
//!
//! The generated specification feeds Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::api::users::{RegisterRequest, VerifyRequest};
use crate::models::error::{Error, ErrorCode};
use crate::models::product::{NewProduct, PageInfo, Product, ProductChanges, ProductPage};
use crate::models::user::User;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront backend API",
        description = "Product catalogue and account verification behind a uniform response envelope.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::api::products::list_products,
        crate::api::products::get_product,
        crate::api::products::create_product,
        crate::api::products::update_product,
        crate::api::products::delete_product,
        crate::api::users::register_user,
        crate::api::users::verify_user,
        crate::api::health::ready,
        crate::api::health::live,
    ),
    components(schemas(
        Product,
        NewProduct,
        ProductChanges,
        ProductPage,
        PageInfo,
        User,
        RegisterRequest,
        VerifyRequest,
        Error,
        ErrorCode
    )),
    tags(
        (name = "products", description = "Product catalogue operations"),
        (name = "users", description = "Registration and verification"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema field structure.

    use super::*;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn openapi_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("Error").expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[test]
    fn openapi_product_schema_uses_camel_case_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let product_schema = schemas.get("Product").expect("Product schema");

        assert_object_schema_has_field(product_schema, "id");
        assert_object_schema_has_field(product_schema, "priceCents");
    }

    #[test]
    fn openapi_registers_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/products",
            "/api/v1/products/{id}",
            "/api/v1/users/register",
            "/api/v1/users/verify",
            "/health/ready",
            "/health/live",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "document should register {path}"
            );
        }
    }
}
