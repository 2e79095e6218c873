//! Message catalog and localized message resolution.
//!
//! The catalog is built once at startup and shared read-only across
//! workers; concurrent lookups need no synchronisation. Nested JSON
//! objects flatten into dot-separated keys
//! (`common.product.action.list.success`), matching the message-key
//! grammar the normalizers build.
//!
//! A missing translation is never fatal: [`MessageResolver::resolve`]
//! degrades to the caller-supplied fallback and logs a warning, preserving
//! availability over completeness.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error as ThisError;
use tracing::warn;

/// Default message catalog compiled into the binary.
const DEFAULT_MESSAGES: &str = include_str!("../resources/messages.json");

/// Synchronous translation lookup port.
///
/// Implementations follow the common i18n-library convention of echoing
/// the key back when the catalog has no entry for it; the resolver guards
/// against exactly that echo.
#[cfg_attr(test, mockall::automock)]
pub trait Translate: Send + Sync {
    /// Translate `key`, returning the key itself when it is unknown.
    fn translate(&self, key: &str) -> String;
}

/// Failures raised while building a [`MessageCatalog`].
#[derive(Debug, ThisError)]
pub enum CatalogError {
    /// The catalog source was not valid JSON.
    #[error("message catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// The catalog root was not a JSON object.
    #[error("message catalog root must be a JSON object")]
    NotAnObject,
    /// A leaf value under `key` was neither a string nor a nested object.
    #[error("message catalog entry '{key}' must be a string")]
    NonStringLeaf {
        /// Flattened key of the offending entry.
        key: String,
    },
}

/// Immutable translation table keyed by flattened dot-separated keys.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    entries: HashMap<String, String>,
}

impl MessageCatalog {
    /// Build the catalog compiled into the binary.
    ///
    /// # Errors
    /// Returns [`CatalogError`] when the embedded asset is malformed, which
    /// only happens if the asset itself is edited incorrectly.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json_str(DEFAULT_MESSAGES)
    }

    /// Parse a catalog from a JSON document.
    ///
    /// # Errors
    /// Returns [`CatalogError`] when the document is not valid JSON, the
    /// root is not an object, or a leaf is not a string.
    pub fn from_json_str(source: &str) -> Result<Self, CatalogError> {
        let root: Value = serde_json::from_str(source)?;
        Self::from_value(root)
    }

    /// Build a catalog from an already-parsed JSON value.
    ///
    /// # Errors
    /// Returns [`CatalogError::NotAnObject`] when the root is not an object
    /// and [`CatalogError::NonStringLeaf`] for non-string leaves.
    pub fn from_value(root: Value) -> Result<Self, CatalogError> {
        let Value::Object(map) = root else {
            return Err(CatalogError::NotAnObject);
        };
        let mut entries = HashMap::new();
        for (key, value) in map {
            flatten(&key, value, &mut entries)?;
        }
        Ok(Self { entries })
    }

    /// Overlay another catalog on top of this one.
    ///
    /// Entries from `overrides` win on key collisions. Used to apply a
    /// deployment-specific catalog file over the embedded defaults.
    #[must_use]
    pub fn merged_with(mut self, overrides: Self) -> Self {
        self.entries.extend(overrides.entries);
        self
    }

    /// Look up a key, returning `None` when the catalog misses.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of entries in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Translate for MessageCatalog {
    fn translate(&self, key: &str) -> String {
        self.get(key).map_or_else(|| key.to_owned(), str::to_owned)
    }
}

fn flatten(
    prefix: &str,
    value: Value,
    entries: &mut HashMap<String, String>,
) -> Result<(), CatalogError> {
    match value {
        Value::String(message) => {
            entries.insert(prefix.to_owned(), message);
            Ok(())
        }
        Value::Object(map) => {
            for (key, nested) in map {
                flatten(&format!("{prefix}.{key}"), nested, entries)?;
            }
            Ok(())
        }
        _ => Err(CatalogError::NonStringLeaf {
            key: prefix.to_owned(),
        }),
    }
}

/// Localized message resolution over an injected [`Translate`] port.
#[derive(Clone)]
pub struct MessageResolver {
    translator: Arc<dyn Translate>,
}

impl MessageResolver {
    /// Wrap a translation port.
    #[must_use]
    pub fn new(translator: Arc<dyn Translate>) -> Self {
        Self { translator }
    }

    /// Resolve `key`, degrading to `fallback` when the catalog misses.
    ///
    /// Translation libraries echo the key back for unknown entries, so a
    /// result equal to the key counts as a miss.
    #[must_use]
    pub fn resolve(&self, key: &str, fallback: &str) -> String {
        let resolved = self.translator.translate(key);
        if resolved == key {
            warn!(%key, "message key missing from catalog; using fallback");
            return fallback.to_owned();
        }
        resolved
    }
}

impl std::fmt::Debug for MessageResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageResolver").finish_non_exhaustive()
    }
}
