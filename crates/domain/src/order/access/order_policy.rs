use crate::client::Client;
use crate::order::{Order, Product};

use super::{ProductAccessError, ProductAccessErrors, ProductAccessPolicy};

/// Runs every product policy over every product of an order.
///
/// Evaluation never stops at the first failure, so the caller always sees
/// the complete list of violations in one pass. Violations are reported in
/// product order, then in policy registration order.
#[derive(Default)]
pub struct OrderAccessPolicy {
    policies: Vec<Box<dyn ProductAccessPolicy>>,
}

impl OrderAccessPolicy {
    /// Creates an aggregate from an ordered list of product policies.
    pub fn new(policies: Vec<Box<dyn ProductAccessPolicy>>) -> Self {
        Self { policies }
    }

    /// Registers one more product policy.
    pub fn with_policy(mut self, policy: impl ProductAccessPolicy + 'static) -> Self {
        self.policies.push(Box::new(policy));
        self
    }

    /// Returns the number of registered policies.
    pub fn len(&self) -> usize {
        self.policies.len()
    }

    /// Returns true if no policy is registered (everything is accepted).
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    /// Returns the names of the registered policies, in order.
    pub fn policy_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.policies.iter().map(|p| p.name())
    }

    /// Checks every product of the order for the given client.
    pub fn check(&self, order: &Order, client: &Client) -> Result<(), ProductAccessErrors> {
        self.check_products(order.products(), client)
    }

    /// Checks a list of products for the given client.
    pub fn check_products(
        &self,
        products: &[Product],
        client: &Client,
    ) -> Result<(), ProductAccessErrors> {
        let violations: Vec<ProductAccessError> = products
            .iter()
            .flat_map(|product| self.violations_for(product, client))
            .collect();

        match ProductAccessErrors::from_violations(violations) {
            None => Ok(()),
            Some(errors) => Err(errors),
        }
    }

    fn violations_for<'a>(
        &'a self,
        product: &'a Product,
        client: &'a Client,
    ) -> impl Iterator<Item = ProductAccessError> + 'a {
        self.policies.iter().filter_map(move |policy| {
            let result = policy.check(product, client);
            if let Err(ref e) = result {
                tracing::debug!(
                    policy = policy.name(),
                    product_id = %product.product_id,
                    client_id = %client.id,
                    reason = %e,
                    "product access denied"
                );
            }
            result.err()
        })
    }
}

impl std::fmt::Debug for OrderAccessPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderAccessPolicy")
            .field("policies", &self.policy_names().collect::<Vec<_>>())
            .finish()
    }
}
