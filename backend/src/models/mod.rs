//! Domain data models.
//!
//! Strongly typed entities used by the API layer, kept free of transport
//! concerns apart from their serde/utoipa wire contracts. Pagination and
//! change DTOs live next to the entity they describe.

pub mod error;
pub mod product;
pub mod user;

pub use self::error::{Error, ErrorCode};
pub use self::product::{NewProduct, PageInfo, Product, ProductChanges, ProductPage};
pub use self::user::{User, VerificationToken};

/// Convenient API result alias.
pub type ApiResult<T> = Result<T, Error>;
