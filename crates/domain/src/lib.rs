//! Domain layer for order placement.
//!
//! This crate provides:
//! - Client and the client lookup collaborator
//! - Product access policies and their aggregation over an order
//! - Order aggregate with its New/Placed/Rejected state machine
//! - Order repository collaborator and the orchestrating order service

pub mod client;
pub mod error;
pub mod order;

pub use client::{Client, ClientId, ClientProvider, InMemoryClientProvider};
pub use common::OrderId;
pub use error::DomainError;
pub use order::{
    InMemoryOrderRepository, Order, OrderAccessPolicy, OrderError, OrderRepository, OrderService,
    OrderStatus, PremiumProductPolicy, Product, ProductAccessError, ProductAccessErrors,
    ProductAccessPolicy, ProductId,
};
