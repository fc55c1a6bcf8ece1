//! Product access policies and their violations.
//!
//! A [`ProductAccessPolicy`] decides whether one client may acquire one
//! product. The [`OrderAccessPolicy`] runs every registered policy over every
//! product of an order and reports all violations at once.

mod order_policy;
mod premium;

pub use order_policy::OrderAccessPolicy;
pub use premium::{DEFAULT_PREMIUM_PRODUCTS, PremiumProductPolicy};

use thiserror::Error;

use crate::client::Client;

use super::{Product, ProductId};

/// A rule deciding whether a client may acquire a product.
pub trait ProductAccessPolicy: Send + Sync {
    /// Short policy name used in logs.
    fn name(&self) -> &'static str;

    /// Returns `Ok(())` if the client may acquire the product.
    fn check(&self, product: &Product, client: &Client) -> Result<(), ProductAccessError>;
}

/// A single policy violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ProductAccessError {
    /// Human-readable description of the violation.
    pub message: String,

    /// The product that violated the policy.
    pub product_id: ProductId,
}

impl ProductAccessError {
    /// Creates a new violation for the given product.
    pub fn new(message: impl Into<String>, product_id: impl Into<ProductId>) -> Self {
        Self {
            message: message.into(),
            product_id: product_id.into(),
        }
    }
}

/// Every policy violation found while checking one order.
///
/// Never empty: construct it with [`ProductAccessErrors::from_violations`],
/// which returns `None` for an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} product access violation(s): {}", .errors.len(), join_messages(.errors))]
pub struct ProductAccessErrors {
    errors: Vec<ProductAccessError>,
}

impl ProductAccessErrors {
    /// Wraps the given violations, or returns `None` if there are none.
    pub fn from_violations(errors: Vec<ProductAccessError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    /// Returns the violations in the order they were found.
    pub fn errors(&self) -> &[ProductAccessError] {
        &self.errors
    }

    /// Returns the number of violations (always at least one).
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the ids of the offending products, one per violation.
    pub fn product_ids(&self) -> impl Iterator<Item = &ProductId> {
        self.errors.iter().map(|e| &e.product_id)
    }

    /// Consumes the aggregate and returns the violations.
    pub fn into_errors(self) -> Vec<ProductAccessError> {
        self.errors
    }
}

impl IntoIterator for ProductAccessErrors {
    type Item = ProductAccessError;
    type IntoIter = std::vec::IntoIter<ProductAccessError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

fn join_messages(errors: &[ProductAccessError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
