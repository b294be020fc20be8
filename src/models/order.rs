use serde::{Deserialize, Serialize};
use std::fmt;

use super::OrderSide;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeInForce {
    Day,
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeInForce::Day => write!(f, "day"),
        }
    }
}

/// A market order as submitted to the brokerage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketOrder {
    pub symbol: String,
    pub qty: u64,
    pub side: OrderSide,
    pub time_in_force: TimeInForce,
}

impl MarketOrder {
    /// Buy-to-close order for a short option position. Quantity is the
    /// absolute contract count; the buy side expresses the direction.
    pub fn buy_to_close(symbol: &str, qty: u64) -> Self {
        Self {
            symbol: symbol.to_string(),
            qty,
            side: OrderSide::Buy,
            time_in_force: TimeInForce::Day,
        }
    }
}

/// Broker acknowledgement of a submitted order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub id: String,
}
