//! Product CRUD handlers.
//!
//! Every success path funnels through the response normalizer so clients
//! always receive the uniform `{success, statusCode, message, payload}`
//! envelope; domain failures are raised as typed [`Error`] values and
//! mapped by its `ResponseError` impl before normalization is reached.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, delete, get, post, put, web};
use envelope::{OutcomeKey, declare};
use serde::Deserialize;
use serde_json::{Value, json};
use utoipa::IntoParams;
use uuid::Uuid;

use crate::api::state::AppState;
use crate::api::to_raw;
use crate::models::{ApiResult, Error, NewProduct, ProductChanges};
use crate::normalize::routes;
use crate::stores::UpdateOutcome;

/// Page size applied when the query string does not supply one.
const DEFAULT_PAGE_SIZE: u32 = 20;

/// Pagination query parameters.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// One-based page number; defaults to 1.
    pub page: Option<u32>,
    /// Page size; defaults to 20, capped by the store.
    pub per_page: Option<u32>,
}

/// List products, one page at a time.
#[utoipa::path(
    get,
    path = "/api/v1/products",
    params(PageQuery),
    responses(
        (status = 200, description = "Product page wrapped in the uniform envelope"),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["products"],
    operation_id = "listProducts"
)]
#[get("/products")]
pub async fn list_products(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let page = state.products.list(
        query.page.unwrap_or(1),
        query.per_page.unwrap_or(DEFAULT_PAGE_SIZE),
    );
    let raw = to_raw(&page)?;
    Ok(state
        .normalizer
        .respond(raw, StatusCode::OK, routes::PRODUCT_LIST))
}

/// Fetch one product by id.
#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    responses(
        (status = 200, description = "Product wrapped in the uniform envelope"),
        (status = 404, description = "Product not found", body = Error)
    ),
    tags = ["products"],
    operation_id = "getProduct"
)]
#[get("/products/{id}")]
pub async fn get_product(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let product = state
        .products
        .get(*id)
        .ok_or_else(|| Error::not_found("product not found"))?;
    let raw = to_raw(&product)?;
    Ok(state
        .normalizer
        .respond(raw, StatusCode::OK, routes::PRODUCT_DETAIL))
}

/// Create a product.
#[utoipa::path(
    post,
    path = "/api/v1/products",
    request_body = NewProduct,
    responses(
        (status = 201, description = "Created product wrapped in the uniform envelope"),
        (status = 400, description = "Invalid request", body = Error)
    ),
    tags = ["products"],
    operation_id = "createProduct"
)]
#[post("/products")]
pub async fn create_product(
    state: web::Data<AppState>,
    payload: web::Json<NewProduct>,
) -> ApiResult<HttpResponse> {
    let new = payload.into_inner();
    if new.name.trim().is_empty() {
        return Err(Error::invalid_request("product name must not be empty")
            .with_details(json!({ "field": "name", "code": "empty_name" })));
    }
    if new.price_cents < 0 {
        return Err(Error::invalid_request("product price must not be negative")
            .with_details(json!({ "field": "priceCents", "code": "negative_price" })));
    }
    let product = state.products.create(new);
    let raw = to_raw(&product)?;
    Ok(state
        .normalizer
        .respond(raw, StatusCode::CREATED, routes::PRODUCT_CREATE))
}

/// Update a product; a no-op update reports `unchanged` and 204.
#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    request_body = ProductChanges,
    responses(
        (status = 200, description = "Updated product wrapped in the uniform envelope"),
        (status = 204, description = "No field changed"),
        (status = 404, description = "Product not found", body = Error)
    ),
    tags = ["products"],
    operation_id = "updateProduct"
)]
#[put("/products/{id}")]
pub async fn update_product(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    payload: web::Json<ProductChanges>,
) -> ApiResult<HttpResponse> {
    let outcome = state
        .products
        .update(*id, &payload)
        .ok_or_else(|| Error::not_found("product not found"))?;
    let raw = match outcome {
        UpdateOutcome::Updated(product) => to_raw(&product)?,
        UpdateOutcome::Unchanged(_) => declare(OutcomeKey::Unchanged, Value::Null),
    };
    Ok(state
        .normalizer
        .respond(raw, StatusCode::OK, routes::PRODUCT_UPDATE))
}

/// Delete a product.
#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    responses(
        (status = 200, description = "Deletion confirmed by the uniform envelope"),
        (status = 404, description = "Product not found", body = Error)
    ),
    tags = ["products"],
    operation_id = "deleteProduct"
)]
#[delete("/products/{id}")]
pub async fn delete_product(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    if !state.products.delete(*id) {
        return Err(Error::not_found("product not found"));
    }
    Ok(state
        .normalizer
        .respond(Value::Null, StatusCode::OK, routes::PRODUCT_DELETE))
}
