//! Integration tests for order placement.
//!
//! These tests wire the order service with the in-memory collaborators and
//! the premium product policy and verify the full placement flow.

use domain::{
    Client, ClientId, DomainError, InMemoryClientProvider, InMemoryOrderRepository, Order,
    OrderAccessPolicy, OrderService, OrderStatus, PremiumProductPolicy, Product,
    ProductAccessError, ProductAccessPolicy,
};
use proptest::prelude::*;
use uuid::Uuid;

type Service = OrderService<InMemoryClientProvider, InMemoryOrderRepository>;

/// Helper to create a service knowing `john_doe` (regular) and `jane_roe` (premium).
fn create_service() -> Service {
    let clients = InMemoryClientProvider::new()
        .with_client(Client::regular("john_doe"))
        .with_client(Client::premium("jane_roe"));
    let policy = OrderAccessPolicy::default().with_policy(PremiumProductPolicy::default());
    OrderService::new(clients, policy, InMemoryOrderRepository::new())
}

fn assert_uuid_shaped(order: &Order) {
    let id = order.id().to_string();
    assert_eq!(id.len(), 36);
    assert_eq!(id, id.to_lowercase());
    let parsed = Uuid::parse_str(&id).expect("order id should be a UUID");
    assert_eq!(parsed.get_version_num(), 4);
}

mod place_order {
    use super::*;

    #[test]
    fn known_client_basic_product_is_placed() {
        let service = create_service();

        let order = service
            .place_order(vec![Product::new("basic", 10)], &ClientId::new("john_doe"))
            .unwrap();

        assert_eq!(order.status(), OrderStatus::Placed);
        assert_uuid_shaped(&order);
        assert_eq!(order.products(), [Product::new("basic", 10)]);
    }

    #[test]
    fn unknown_client_fails_and_stores_nothing() {
        let service = create_service();

        let result = service.place_order(vec![Product::new("premium_1", 10)], &"none".into());

        assert_eq!(
            result,
            Err(DomainError::ClientNotFound {
                client_id: ClientId::new("none")
            })
        );
        assert_eq!(service.repository().order_count(), 0);
    }

    #[test]
    fn premium_product_for_regular_client_is_rejected_not_returned_as_error() {
        let service = create_service();

        let order = service
            .place_order(vec![Product::new("premium_1", 10)], &"john_doe".into())
            .unwrap();

        assert_eq!(order.status(), OrderStatus::Rejected);
        assert_uuid_shaped(&order);

        let stored = service.repository().get(&order.id()).unwrap();
        assert_eq!(stored.status(), OrderStatus::Rejected);
    }

    #[test]
    fn one_premium_product_rejects_whole_basket() {
        let service = create_service();

        let order = service
            .place_order(
                vec![Product::new("basic", 1), Product::new("premium_2", 1)],
                &"john_doe".into(),
            )
            .unwrap();

        assert_eq!(order.status(), OrderStatus::Rejected);
        assert_eq!(order.product_count(), 2);
    }

    #[test]
    fn premium_client_gets_premium_products() {
        let service = create_service();

        let order = service
            .place_order(
                vec![Product::new("premium_1", 1), Product::new("premium_2", 2)],
                &"jane_roe".into(),
            )
            .unwrap();

        assert_eq!(order.status(), OrderStatus::Placed);
    }

    #[test]
    fn empty_basket_is_placed() {
        let service = create_service();

        let order = service.place_order(vec![], &"john_doe".into()).unwrap();

        assert_eq!(order.status(), OrderStatus::Placed);
        assert_eq!(order.render_report(), "Order report:\n ");
    }

    #[test]
    fn every_call_builds_a_fresh_order() {
        let service = create_service();

        let first = service
            .place_order(vec![Product::new("basic", 1)], &"john_doe".into())
            .unwrap();
        let second = service
            .place_order(vec![Product::new("basic", 1)], &"john_doe".into())
            .unwrap();

        assert_ne!(first.id(), second.id());
        assert_eq!(service.repository().order_count(), 2);
    }
}

mod make_order {
    use super::*;

    #[test]
    fn known_client_basic_product_is_placed() {
        let service = create_service();

        let order = service
            .make_order(vec![Product::new("basic", 10)], &"john_doe".into())
            .unwrap();

        assert_eq!(order.status(), OrderStatus::Placed);
        assert_uuid_shaped(&order);
        assert_eq!(service.repository().order_count(), 1);
    }

    #[test]
    fn unknown_client_fails() {
        let service = create_service();

        let err = service
            .make_order(vec![Product::new("premium_1", 10)], &"none".into())
            .unwrap_err();

        assert!(matches!(err, DomainError::ClientNotFound { .. }));
        assert_eq!(service.repository().order_count(), 0);
    }

    #[test]
    fn premium_product_for_regular_client_returns_violations() {
        let service = create_service();

        let err = service
            .make_order(vec![Product::new("premium_1", 10)], &"john_doe".into())
            .unwrap_err();

        let DomainError::ProductAccess(errors) = err else {
            panic!("expected product access error, got {err}");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.errors()[0],
            ProductAccessError::new(
                "Client john_doe cannot order premium product premium_1",
                "premium_1"
            )
        );
        assert_eq!(service.repository().order_count(), 0);
    }
}

mod policy_composition {
    use super::*;

    /// Refuses products no client may buy.
    struct BlockedProductPolicy(&'static str);

    impl ProductAccessPolicy for BlockedProductPolicy {
        fn name(&self) -> &'static str {
            "blocked_product"
        }

        fn check(&self, product: &Product, client: &Client) -> Result<(), ProductAccessError> {
            if product.product_id.as_str() == self.0 {
                return Err(ProductAccessError::new(
                    format!("Product {} is blocked for {}", product.product_id, client.id),
                    product.product_id.clone(),
                ));
            }
            Ok(())
        }
    }

    fn service_with_blocked(blocked: &'static str) -> Service {
        let clients = InMemoryClientProvider::new().with_client(Client::regular("john_doe"));
        let policy = OrderAccessPolicy::new(vec![
            Box::new(PremiumProductPolicy::default()),
            Box::new(BlockedProductPolicy(blocked)),
        ]);
        OrderService::new(clients, policy, InMemoryOrderRepository::new())
    }

    #[test]
    fn all_violations_are_reported_together() {
        let service = service_with_blocked("premium_1");

        let err = service
            .make_order(
                vec![
                    Product::new("premium_1", 1),
                    Product::new("basic", 1),
                    Product::new("premium_2", 1),
                ],
                &"john_doe".into(),
            )
            .unwrap_err();

        let DomainError::ProductAccess(errors) = err else {
            panic!("expected product access error, got {err}");
        };
        let products: Vec<_> = errors.product_ids().map(|id| id.as_str()).collect();
        assert_eq!(products, ["premium_1", "premium_1", "premium_2"]);
    }

    #[test]
    fn any_policy_can_reject() {
        let service = service_with_blocked("basic");

        let order = service
            .place_order(vec![Product::new("basic", 1)], &"john_doe".into())
            .unwrap();

        assert_eq!(order.status(), OrderStatus::Rejected);
    }
}

fn basic_product() -> impl Strategy<Value = Product> {
    ("basic_[a-z0-9]{1,8}", 0u32..10_000).prop_map(|(id, amount)| Product::new(id, amount))
}

fn any_product() -> impl Strategy<Value = Product> {
    prop_oneof![
        basic_product(),
        (prop::sample::select(vec!["premium_1", "premium_2"]), 0u32..10_000)
            .prop_map(|(id, amount)| Product::new(id, amount)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        ..ProptestConfig::default()
    })]

    /// Property: regular clients ordering only non-premium products are always placed.
    #[test]
    fn non_premium_baskets_are_placed(products in prop::collection::vec(basic_product(), 0..8)) {
        let service = create_service();
        let order = service.place_order(products.clone(), &"john_doe".into()).unwrap();

        prop_assert_eq!(order.status(), OrderStatus::Placed);
        prop_assert_eq!(order.products(), products.as_slice());
        prop_assert_eq!(order.id().as_uuid().get_version_num(), 4);
    }

    /// Property: premium clients are always placed, whatever they order.
    #[test]
    fn premium_clients_are_always_placed(products in prop::collection::vec(any_product(), 0..8)) {
        let service = create_service();
        let order = service.place_order(products, &"jane_roe".into()).unwrap();

        prop_assert_eq!(order.status(), OrderStatus::Placed);
    }

    /// Property: unknown clients always fail and nothing is stored.
    #[test]
    fn unknown_clients_always_fail(
        client in "[a-z]{1,12}",
        products in prop::collection::vec(any_product(), 0..8),
    ) {
        prop_assume!(client != "john_doe" && client != "jane_roe");
        let service = create_service();

        let result = service.place_order(products, &ClientId::new(client));

        let is_client_not_found = matches!(result, Err(DomainError::ClientNotFound { .. }));
        prop_assert!(is_client_not_found);
        prop_assert_eq!(service.repository().order_count(), 0);
    }

    /// Property: adding products after a transition never changes the basket.
    #[test]
    fn add_after_transition_is_a_no_op(
        initial in prop::collection::vec(any_product(), 0..5),
        late in prop::collection::vec(any_product(), 1..5),
        place in any::<bool>(),
    ) {
        let mut order = Order::init("jane_roe");
        order.add_all(initial.clone());
        if place {
            let policy = OrderAccessPolicy::default();
            order.place(&Client::premium("jane_roe"), &policy).unwrap();
        } else {
            order.reject();
        }

        let report = order.render_report();
        for product in late.clone() {
            order.add(product);
        }
        order.add_all(late);

        prop_assert_eq!(order.products(), initial.as_slice());
        prop_assert_eq!(order.render_report(), report);
    }
}
