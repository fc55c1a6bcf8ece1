//! Domain error types.

use thiserror::Error;

use crate::client::ClientId;
use crate::order::{OrderError, ProductAccessErrors};

/// Errors that can occur during domain operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The client could not be resolved; nothing was stored.
    #[error("Client with given id {client_id} not found!")]
    ClientNotFound { client_id: ClientId },

    /// One or more products are not accessible to the client.
    #[error("Product access denied: {0}")]
    ProductAccess(#[from] ProductAccessErrors),

    /// An error occurred in the order aggregate.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),
}
