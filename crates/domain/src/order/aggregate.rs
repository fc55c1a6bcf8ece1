//! Order aggregate implementation.

use common::OrderId;
use serde::{Deserialize, Serialize};

use crate::client::{Client, ClientId};

use super::{OrderAccessPolicy, OrderError, OrderStatus, Product};

/// Order aggregate root.
///
/// Holds the basket a client asked for and its approval status. Products can
/// only be added while the order is [`OrderStatus::New`]; the status moves
/// once, to either `Placed` or `Rejected`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier.
    id: OrderId,

    /// Client who requested the order.
    client_id: ClientId,

    /// Requested products, in the order they were added.
    products: Vec<Product>,

    /// Current status of the order.
    status: OrderStatus,
}

impl Order {
    /// Creates an empty order with a fresh id in the `New` status.
    pub fn init(client_id: impl Into<ClientId>) -> Self {
        Self {
            id: OrderId::new(),
            client_id: client_id.into(),
            products: Vec::new(),
            status: OrderStatus::New,
        }
    }
}

// Query methods
impl Order {
    /// Returns the order ID.
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// Returns the client ID.
    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Returns the requested products.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Returns the current status.
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns the number of product lines.
    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    /// Returns the summed amount over all product lines.
    pub fn total_amount(&self) -> u64 {
        self.products.iter().map(|p| u64::from(p.amount)).sum()
    }

    /// Returns true if the order is in a terminal status.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Renders the order report, one line per product.
    ///
    /// ```
    /// use domain::{Order, Product};
    ///
    /// let mut order = Order::init("client_1");
    /// order.add(Product::new("product_1", 100));
    /// assert_eq!(order.render_report(), "Order report:\n ProductId: product_1, amount: 100");
    /// ```
    pub fn render_report(&self) -> String {
        let lines = self
            .products
            .iter()
            .map(Product::render)
            .collect::<Vec<_>>()
            .join("\n");
        format!("Order report:\n {lines}")
    }
}

// Transitions
impl Order {
    /// Adds a product. Ignored once the order has left the `New` status.
    pub fn add(&mut self, product: Product) {
        if !self.status.can_modify_products() {
            tracing::debug!(order_id = %self.id, status = %self.status, "ignoring product added to closed order");
            return;
        }
        self.products.push(product);
    }

    /// Adds several products. Ignored once the order has left the `New` status.
    pub fn add_all(&mut self, products: impl IntoIterator<Item = Product>) {
        if !self.status.can_modify_products() {
            tracing::debug!(order_id = %self.id, status = %self.status, "ignoring products added to closed order");
            return;
        }
        self.products.extend(products);
    }

    /// Places the order if the access policy accepts every product.
    ///
    /// On a policy violation the status stays `New`; deciding whether to
    /// reject is up to the caller.
    pub fn place(
        &mut self,
        client: &Client,
        policy: &OrderAccessPolicy,
    ) -> Result<&Self, OrderError> {
        if !self.status.can_place() {
            return Err(OrderError::InvalidStateTransition {
                current_status: self.status,
                action: "place",
            });
        }

        policy.check(self, client)?;
        self.status = OrderStatus::Placed;
        Ok(self)
    }

    /// Rejects the order. Ignored once the order has left the `New` status.
    pub fn reject(&mut self) {
        if self.status.can_reject() {
            self.status = OrderStatus::Rejected;
        }
    }
}
