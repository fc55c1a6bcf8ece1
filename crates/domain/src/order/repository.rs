//! Order persistence collaborator.

use std::sync::{Arc, PoisonError, RwLock};

use common::OrderId;

use super::Order;

/// Stores orders.
///
/// `save` returns the stored copy, which callers should use from then on.
pub trait OrderRepository: Send + Sync {
    /// Persists the order and returns the stored copy.
    fn save(&self, order: Order) -> Order;
}

/// In-memory order repository for testing and local runs.
///
/// Saving an order whose id is already stored replaces it in place.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<Vec<Order>>>,
}

impl InMemoryOrderRepository {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored order with the given id.
    pub fn get(&self, order_id: &OrderId) -> Option<Order> {
        self.orders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|o| o.id() == *order_id)
            .cloned()
    }

    /// Returns all stored orders in insertion order.
    pub fn orders(&self) -> Vec<Order> {
        self.orders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of stored orders.
    pub fn order_count(&self) -> usize {
        self.orders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Removes every stored order.
    pub fn clear(&self) {
        self.orders
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl OrderRepository for InMemoryOrderRepository {
    fn save(&self, order: Order) -> Order {
        let mut orders = self.orders.write().unwrap_or_else(PoisonError::into_inner);
        match orders.iter_mut().find(|o| o.id() == order.id()) {
            Some(existing) => *existing = order.clone(),
            None => orders.push(order.clone()),
        }
        tracing::debug!(order_id = %order.id(), status = %order.status(), "order saved");
        order
    }
}
