//! Product data model and pagination DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Catalogue product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Product {
    /// Stable product identifier.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: Uuid,
    /// Display name shown in listings.
    #[schema(example = "Enamel mug")]
    pub name: String,
    /// Optional long-form description.
    pub description: Option<String>,
    /// Unit price in minor currency units.
    #[schema(example = 1250)]
    pub price_cents: i64,
    /// Public URL of the primary product image, when one was uploaded.
    pub image_url: Option<String>,
}

/// Fields required to create a product.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    /// Display name shown in listings.
    pub name: String,
    /// Optional long-form description.
    pub description: Option<String>,
    /// Unit price in minor currency units.
    pub price_cents: i64,
    /// Public URL of the primary product image.
    pub image_url: Option<String>,
}

/// Partial update applied to an existing product.
///
/// Absent fields are left untouched; an update where every supplied field
/// already matches the stored value is a no-op.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductChanges {
    /// New display name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New unit price in minor currency units.
    pub price_cents: Option<i64>,
    /// New primary image URL.
    pub image_url: Option<String>,
}

impl ProductChanges {
    /// Apply the changes to `product`, returning whether anything changed.
    pub fn apply_to(&self, product: &mut Product) -> bool {
        let mut changed = false;
        if let Some(name) = &self.name
            && *name != product.name
        {
            product.name = name.clone();
            changed = true;
        }
        if let Some(description) = &self.description
            && Some(description) != product.description.as_ref()
        {
            product.description = Some(description.clone());
            changed = true;
        }
        if let Some(price_cents) = self.price_cents
            && price_cents != product.price_cents
        {
            product.price_cents = price_cents;
            changed = true;
        }
        if let Some(image_url) = &self.image_url
            && Some(image_url) != product.image_url.as_ref()
        {
            product.image_url = Some(image_url.clone());
            changed = true;
        }
        changed
    }
}

/// Pagination metadata accompanying a product page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// One-based page number.
    pub current_page: u32,
    /// Requested page size.
    pub per_page: u32,
    /// Total items across all pages.
    pub total_items: u64,
    /// Total number of pages.
    pub total_pages: u64,
}

/// One page of products plus its pagination metadata.
///
/// Serialized with the store-facing `paginations` field name; the
/// normalizer reshapes it under the canonical `pagination` key before it
/// reaches clients.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductPage {
    /// The page of products.
    pub items: Vec<Product>,
    /// Pagination metadata.
    #[serde(rename = "paginations")]
    pub paginations: PageInfo,
}
