//! Order service orchestrating client lookup, access checks and persistence.

use crate::client::{Client, ClientId, ClientProvider};
use crate::error::DomainError;

use super::{Order, OrderAccessPolicy, OrderError, OrderRepository, Product};

/// Service for placing orders.
///
/// Builds the order, resolves the client, runs the access policy and stores
/// the result. Two entry points differ only in what a policy violation does:
/// [`place_order`](Self::place_order) stores a rejected order, while
/// [`make_order`](Self::make_order) returns the violations to the caller.
pub struct OrderService<C: ClientProvider, R: OrderRepository> {
    clients: C,
    access_policy: OrderAccessPolicy,
    repository: R,
}

impl<C: ClientProvider, R: OrderRepository> OrderService<C, R> {
    /// Creates a new order service from its collaborators.
    pub fn new(clients: C, access_policy: OrderAccessPolicy, repository: R) -> Self {
        Self {
            clients,
            access_policy,
            repository,
        }
    }

    /// Returns the client provider.
    pub fn clients(&self) -> &C {
        &self.clients
    }

    /// Returns the access policy.
    pub fn access_policy(&self) -> &OrderAccessPolicy {
        &self.access_policy
    }

    /// Returns the order repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Places an order, rejecting it if any product is not accessible.
    ///
    /// Fails only when the client does not exist; in that case nothing is
    /// stored. Policy violations are logged and turned into a `Rejected`
    /// order, which is stored and returned like a placed one.
    #[tracing::instrument(skip_all, fields(client_id = %client_id, products = products.len()))]
    pub fn place_order(
        &self,
        products: Vec<Product>,
        client_id: &ClientId,
    ) -> Result<Order, DomainError> {
        let mut order = Self::new_order(products, client_id);
        let client = self.fetch_client(client_id)?;

        match order.place(&client, &self.access_policy).map(|_| ()) {
            Ok(()) => Self::record_placed(&order),
            Err(OrderError::AccessDenied(errors)) => {
                tracing::warn!(
                    order_id = %order.id(),
                    violations = errors.len(),
                    reason = %errors,
                    "order rejected"
                );
                metrics::counter!("orders_rejected_total").increment(1);
                order.reject();
            }
            Err(e) => return Err(e.into()),
        }

        Ok(self.repository.save(order))
    }

    /// Places an order, failing if any product is not accessible.
    ///
    /// Policy violations are returned as [`DomainError::ProductAccess`] and
    /// nothing is stored. Only placed orders reach the repository.
    #[tracing::instrument(skip_all, fields(client_id = %client_id, products = products.len()))]
    pub fn make_order(
        &self,
        products: Vec<Product>,
        client_id: &ClientId,
    ) -> Result<Order, DomainError> {
        let mut order = Self::new_order(products, client_id);
        let client = self.fetch_client(client_id)?;

        match order.place(&client, &self.access_policy).map(|_| ()) {
            Ok(()) => Self::record_placed(&order),
            Err(OrderError::AccessDenied(errors)) => {
                tracing::warn!(
                    order_id = %order.id(),
                    violations = errors.len(),
                    reason = %errors,
                    "order refused"
                );
                metrics::counter!("orders_refused_total").increment(1);
                return Err(DomainError::ProductAccess(errors));
            }
            Err(e) => return Err(e.into()),
        }

        Ok(self.repository.save(order))
    }

    fn new_order(products: Vec<Product>, client_id: &ClientId) -> Order {
        let mut order = Order::init(client_id.clone());
        order.add_all(products);
        order
    }

    fn fetch_client(&self, client_id: &ClientId) -> Result<Client, DomainError> {
        self.clients.fetch_client(client_id).ok_or_else(|| {
            tracing::warn!(%client_id, "client not found");
            metrics::counter!("orders_client_not_found_total").increment(1);
            DomainError::ClientNotFound {
                client_id: client_id.clone(),
            }
        })
    }

    fn record_placed(order: &Order) {
        tracing::info!(order_id = %order.id(), products = order.product_count(), "order placed");
        metrics::counter!("orders_placed_total").increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::InMemoryClientProvider;
    use crate::order::{InMemoryOrderRepository, OrderStatus, PremiumProductPolicy};
    use metrics_util::debugging::{DebugValue, DebuggingRecorder, Snapshotter};
    use std::collections::HashMap;

    fn create_service() -> OrderService<InMemoryClientProvider, InMemoryOrderRepository> {
        let clients = InMemoryClientProvider::new()
            .with_client(Client::regular("john_doe"))
            .with_client(Client::premium("jane_roe"));
        let policy = OrderAccessPolicy::default().with_policy(PremiumProductPolicy::default());
        OrderService::new(clients, policy, InMemoryOrderRepository::new())
    }

    #[test]
    fn test_place_order_stores_placed_order() {
        let service = create_service();

        let order = service
            .place_order(vec![Product::new("basic", 10)], &"john_doe".into())
            .unwrap();

        assert_eq!(order.status(), OrderStatus::Placed);
        assert_eq!(order.client_id().as_str(), "john_doe");
        assert_eq!(service.repository().get(&order.id()), Some(order));
    }

    #[test]
    fn test_place_order_stores_rejected_order() {
        let service = create_service();

        let order = service
            .place_order(vec![Product::new("premium_1", 10)], &"john_doe".into())
            .unwrap();

        assert_eq!(order.status(), OrderStatus::Rejected);
        assert_eq!(service.repository().order_count(), 1);
    }

    #[test]
    fn test_place_order_unknown_client() {
        let service = create_service();

        let err = service
            .place_order(vec![Product::new("basic", 10)], &"none".into())
            .unwrap_err();

        assert!(matches!(err, DomainError::ClientNotFound { ref client_id } if client_id.as_str() == "none"));
        assert_eq!(err.to_string(), "Client with given id none not found!");
        assert_eq!(service.repository().order_count(), 0);
    }

    #[test]
    fn test_make_order_returns_violations() {
        let service = create_service();

        let err = service
            .make_order(
                vec![Product::new("premium_1", 1), Product::new("premium_2", 1)],
                &"john_doe".into(),
            )
            .unwrap_err();

        match err {
            DomainError::ProductAccess(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(service.repository().order_count(), 0);
    }

    #[test]
    fn test_make_order_premium_client() {
        let service = create_service();

        let order = service
            .make_order(vec![Product::new("premium_1", 1)], &"jane_roe".into())
            .unwrap();

        assert_eq!(order.status(), OrderStatus::Placed);
        assert_eq!(service.repository().order_count(), 1);
    }

    fn counter_values(snapshotter: &Snapshotter) -> HashMap<String, u64> {
        snapshotter
            .snapshot()
            .into_vec()
            .into_iter()
            .filter_map(|(key, _, _, value)| match value {
                DebugValue::Counter(count) => Some((key.key().name().to_string(), count)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_outcome_counters() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();
        let service = create_service();

        metrics::with_local_recorder(&recorder, || {
            let basic = || vec![Product::new("basic", 1)];
            let premium = || vec![Product::new("premium_1", 1)];

            service.place_order(basic(), &"john_doe".into()).unwrap();
            service.make_order(premium(), &"jane_roe".into()).unwrap();
            service.place_order(premium(), &"john_doe".into()).unwrap();
            service.make_order(premium(), &"john_doe".into()).unwrap_err();
            service.place_order(basic(), &"none".into()).unwrap_err();
            service.make_order(basic(), &"none".into()).unwrap_err();
        });

        let counters = counter_values(&snapshotter);
        assert_eq!(counters.get("orders_placed_total"), Some(&2));
        assert_eq!(counters.get("orders_rejected_total"), Some(&1));
        assert_eq!(counters.get("orders_refused_total"), Some(&1));
        assert_eq!(counters.get("orders_client_not_found_total"), Some(&2));
    }
}
