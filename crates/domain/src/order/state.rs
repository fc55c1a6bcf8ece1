//! Order status state machine.

use serde::{Deserialize, Serialize};

/// The status of an order in its approval lifecycle.
///
/// State transitions:
/// ```text
/// New ──┬──► Placed
///       └──► Rejected
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Order is being assembled, products can be added.
    #[default]
    New,

    /// Every access policy accepted the order (terminal state).
    Placed,

    /// At least one access policy refused the order (terminal state).
    Rejected,
}

impl OrderStatus {
    /// Returns true if products can be added in this status.
    pub fn can_modify_products(&self) -> bool {
        matches!(self, OrderStatus::New)
    }

    /// Returns true if the order can be placed in this status.
    pub fn can_place(&self) -> bool {
        matches!(self, OrderStatus::New)
    }

    /// Returns true if the order can be rejected in this status.
    pub fn can_reject(&self) -> bool {
        matches!(self, OrderStatus::New)
    }

    /// Returns true if this is a terminal status (no further transitions possible).
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Placed | OrderStatus::Rejected)
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "NEW",
            OrderStatus::Placed => "PLACED",
            OrderStatus::Rejected => "REJECTED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
