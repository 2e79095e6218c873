//! HTTP API handlers and shared handler state.

pub mod health;
pub mod products;
pub mod state;
pub mod users;

pub use state::AppState;

use serde_json::Value;

use crate::models::{ApiResult, Error};

/// Serialize a response payload, surfacing failures as internal errors.
pub(crate) fn to_raw<T: serde::Serialize>(value: &T) -> ApiResult<Value> {
    serde_json::to_value(value)
        .map_err(|err| Error::internal(format!("serialize response payload: {err}")))
}
