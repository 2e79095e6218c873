//! Store and mailer ports with in-memory fixture implementations.
//!
//! Persistence proper is an external collaborator; these fixtures exist so
//! the HTTP surface can exercise every outcome the normalization pipeline
//! shapes. Handlers depend only on the traits and stay testable without
//! I/O.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use thiserror::Error as ThisError;
use tracing::debug;
use uuid::Uuid;

use crate::models::{NewProduct, PageInfo, Product, ProductChanges, ProductPage, User};
use crate::models::user::VerificationToken;

/// Largest page size the product listing will serve.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Result of applying a product update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// At least one field changed.
    Updated(Product),
    /// Every supplied field already matched the stored value.
    Unchanged(Product),
}

/// Result of presenting a verification token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// The token was valid and the account is now verified.
    Verified(User),
    /// The token was already consumed for this account.
    AlreadyVerified(User),
    /// The token is unknown or expired.
    InvalidOrExpired,
}

/// Failures raised by [`UserStore::register`].
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum RegisterError {
    /// An account already exists for the address.
    #[error("an account already exists for '{email}'")]
    DuplicateEmail {
        /// The conflicting address.
        email: String,
    },
}

/// Failures raised by the mail collaborator.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum MailError {
    /// The provider rejected the message.
    #[error("mail provider rejected the message: {reason}")]
    Rejected {
        /// Provider-supplied reason.
        reason: String,
    },
}

/// Product persistence port.
pub trait ProductStore: Send + Sync {
    /// List one page of products in insertion order.
    fn list(&self, page: u32, per_page: u32) -> ProductPage;
    /// Fetch a product by id.
    fn get(&self, id: Uuid) -> Option<Product>;
    /// Create a product, assigning its id.
    fn create(&self, new: NewProduct) -> Product;
    /// Apply a partial update; `None` when the product does not exist.
    fn update(&self, id: Uuid, changes: &ProductChanges) -> Option<UpdateOutcome>;
    /// Delete a product, reporting whether it existed.
    fn delete(&self, id: Uuid) -> bool;
}

/// User persistence port.
pub trait UserStore: Send + Sync {
    /// Create an unverified account and mint its verification token.
    ///
    /// # Errors
    /// Returns [`RegisterError::DuplicateEmail`] when the address is taken.
    fn register(
        &self,
        email: &str,
        display_name: &str,
    ) -> Result<(User, VerificationToken), RegisterError>;
    /// Consume a verification token.
    fn verify(&self, token: &str) -> VerifyOutcome;
}

/// Outbound mail port; the real provider is an external collaborator.
pub trait Mailer: Send + Sync {
    /// Dispatch the verification mail for a fresh registration.
    ///
    /// # Errors
    /// Returns [`MailError`] when the provider rejects the message.
    fn send_verification(&self, email: &str, token: &VerificationToken) -> Result<(), MailError>;
}

/// In-memory [`ProductStore`] keeping insertion order for stable paging.
#[derive(Debug, Default)]
pub struct InMemoryProducts {
    inner: RwLock<Vec<Product>>,
}

impl InMemoryProducts {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProductStore for InMemoryProducts {
    fn list(&self, page: u32, per_page: u32) -> ProductPage {
        let page_size = per_page.clamp(1, MAX_PAGE_SIZE);
        let current_page = page.max(1);
        let products = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let total_items = u64::try_from(products.len()).unwrap_or(u64::MAX);
        let total_pages = total_items.div_ceil(u64::from(page_size)).max(1);
        let offset = u64::from(current_page - 1) * u64::from(page_size);
        let items = products
            .iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(page_size).unwrap_or(usize::MAX))
            .cloned()
            .collect();
        ProductPage {
            items,
            paginations: PageInfo {
                current_page,
                per_page: page_size,
                total_items,
                total_pages,
            },
        }
    }

    fn get(&self, id: Uuid) -> Option<Product> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|product| product.id == id)
            .cloned()
    }

    fn create(&self, new: NewProduct) -> Product {
        let product = Product {
            id: Uuid::new_v4(),
            name: new.name,
            description: new.description,
            price_cents: new.price_cents,
            image_url: new.image_url,
        };
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(product.clone());
        product
    }

    fn update(&self, id: Uuid, changes: &ProductChanges) -> Option<UpdateOutcome> {
        let mut products = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let product = products.iter_mut().find(|product| product.id == id)?;
        if changes.apply_to(product) {
            Some(UpdateOutcome::Updated(product.clone()))
        } else {
            Some(UpdateOutcome::Unchanged(product.clone()))
        }
    }

    fn delete(&self, id: Uuid) -> bool {
        let mut products = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let before = products.len();
        products.retain(|product| product.id != id);
        products.len() < before
    }
}

#[derive(Debug, Default)]
struct UsersInner {
    users: Vec<User>,
    pending: HashMap<String, Uuid>,
    consumed: HashMap<String, Uuid>,
}

/// In-memory [`UserStore`] tracking pending and consumed tokens.
#[derive(Debug, Default)]
pub struct InMemoryUsers {
    inner: RwLock<UsersInner>,
}

impl InMemoryUsers {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for InMemoryUsers {
    fn register(
        &self,
        email: &str,
        display_name: &str,
    ) -> Result<(User, VerificationToken), RegisterError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if inner
            .users
            .iter()
            .any(|user| user.email.eq_ignore_ascii_case(email))
        {
            return Err(RegisterError::DuplicateEmail {
                email: email.to_owned(),
            });
        }
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_owned(),
            display_name: display_name.to_owned(),
            verified: false,
        };
        let token = VerificationToken::generate();
        inner.users.push(user.clone());
        inner.pending.insert(token.as_str().to_owned(), user.id);
        Ok((user, token))
    }

    fn verify(&self, token: &str) -> VerifyOutcome {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(user_id) = inner.pending.remove(token) {
            inner.consumed.insert(token.to_owned(), user_id);
            if let Some(user) = inner.users.iter_mut().find(|user| user.id == user_id) {
                user.verified = true;
                return VerifyOutcome::Verified(user.clone());
            }
            return VerifyOutcome::InvalidOrExpired;
        }
        if let Some(user_id) = inner.consumed.get(token).copied()
            && let Some(user) = inner.users.iter().find(|user| user.id == user_id)
        {
            return VerifyOutcome::AlreadyVerified(user.clone());
        }
        VerifyOutcome::InvalidOrExpired
    }
}

/// Mailer fixture standing in for the external provider; always succeeds.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMailer;

impl Mailer for FixtureMailer {
    fn send_verification(&self, email: &str, token: &VerificationToken) -> Result<(), MailError> {
        debug!(%email, %token, "verification mail dispatched (fixture)");
        Ok(())
    }
}
