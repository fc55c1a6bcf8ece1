//! Order aggregate and related types.

pub mod access;
mod aggregate;
mod repository;
mod service;
mod state;
mod value_objects;

pub use access::{
    OrderAccessPolicy, PremiumProductPolicy, ProductAccessError, ProductAccessErrors,
    ProductAccessPolicy,
};
pub use aggregate::Order;
pub use repository::{InMemoryOrderRepository, OrderRepository};
pub use service::OrderService;
pub use state::OrderStatus;
pub use value_objects::{Product, ProductId};

use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Order is not in the expected status.
    #[error("Invalid state transition: cannot {action} from {current_status} status")]
    InvalidStateTransition {
        current_status: OrderStatus,
        action: &'static str,
    },

    /// The access policy refused one or more products.
    #[error("Access denied: {0}")]
    AccessDenied(#[from] ProductAccessErrors),
}
