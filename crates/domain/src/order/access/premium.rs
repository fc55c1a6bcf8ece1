use std::collections::HashSet;

use crate::client::Client;
use crate::order::{Product, ProductId};

use super::{ProductAccessError, ProductAccessPolicy};

/// Product ids reserved for premium subscribers unless configured otherwise.
pub const DEFAULT_PREMIUM_PRODUCTS: [&str; 2] = ["premium_1", "premium_2"];

/// Premium products may only be ordered by clients with a premium subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PremiumProductPolicy {
    premium_products: HashSet<ProductId>,
}

impl PremiumProductPolicy {
    /// Creates a policy treating the given product ids as premium.
    pub fn new<I, P>(premium_products: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<ProductId>,
    {
        Self {
            premium_products: premium_products.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if the product id is premium.
    pub fn is_premium(&self, product_id: &ProductId) -> bool {
        self.premium_products.contains(product_id)
    }
}

impl Default for PremiumProductPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_PREMIUM_PRODUCTS)
    }
}

impl ProductAccessPolicy for PremiumProductPolicy {
    fn name(&self) -> &'static str {
        "premium_product"
    }

    fn check(&self, product: &Product, client: &Client) -> Result<(), ProductAccessError> {
        if self.is_premium(&product.product_id) && !client.has_premium_subscription {
            return Err(ProductAccessError::new(
                format!(
                    "Client {} cannot order premium product {}",
                    client.id, product.product_id
                ),
                product.product_id.clone(),
            ));
        }
        Ok(())
    }
}
