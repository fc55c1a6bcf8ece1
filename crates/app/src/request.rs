//! Order requests read from command-line arguments.

use clap::Parser;
use clap::builder::{NonEmptyStringValueParser, TypedValueParser};
use domain::{ClientId, Product};

use crate::error::AppError;

/// A client id and the products it asks for.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "orders")]
#[command(version)]
#[command(about = "Place an order and print its report", long_about = None)]
pub struct OrderRequest {
    /// Client placing the order
    #[arg(value_parser = NonEmptyStringValueParser::new().map(ClientId::from))]
    pub client_id: ClientId,

    /// Requested products
    #[arg(value_name = "PRODUCT_ID=AMOUNT", value_parser = parse_product)]
    pub products: Vec<Product>,
}

/// Parses a single `<product_id>=<amount>` argument.
pub fn parse_product(arg: &str) -> Result<Product, AppError> {
    let invalid = || AppError::InvalidProduct {
        arg: arg.to_string(),
    };

    let (id, amount) = arg.split_once('=').ok_or_else(invalid)?;
    let id = id.trim();
    if id.is_empty() {
        return Err(invalid());
    }
    let amount = amount.trim().parse::<u32>().map_err(|_| invalid())?;
    Ok(Product::new(id, amount))
}
