//! Shared HTTP handler state.
//!
//! Handlers accept this bundle via `actix_web::web::Data` so they depend
//! only on the store/mailer ports and the normalizer, and remain testable
//! without I/O.

use std::sync::Arc;

use crate::normalize::ResponseNormalizer;
use crate::stores::{FixtureMailer, InMemoryProducts, InMemoryUsers, Mailer, ProductStore, UserStore};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Product persistence port.
    pub products: Arc<dyn ProductStore>,
    /// User persistence port.
    pub users: Arc<dyn UserStore>,
    /// Outbound mail port.
    pub mailer: Arc<dyn Mailer>,
    /// Response-shaping pipeline shared by every handler.
    pub normalizer: Arc<ResponseNormalizer>,
}

impl AppState {
    /// Bundle explicit port implementations.
    #[must_use]
    pub fn new(
        products: Arc<dyn ProductStore>,
        users: Arc<dyn UserStore>,
        mailer: Arc<dyn Mailer>,
        normalizer: Arc<ResponseNormalizer>,
    ) -> Self {
        Self {
            products,
            users,
            mailer,
            normalizer,
        }
    }

    /// State backed entirely by in-memory fixtures.
    #[must_use]
    pub fn fixture(normalizer: ResponseNormalizer) -> Self {
        Self::new(
            Arc::new(InMemoryProducts::new()),
            Arc::new(InMemoryUsers::new()),
            Arc::new(FixtureMailer),
            Arc::new(normalizer),
        )
    }
}
