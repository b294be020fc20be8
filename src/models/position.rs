use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::AssetClass;

/// One open position as reported by the brokerage. Read-only snapshot;
/// the account is the source of truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenPosition {
    pub symbol: String,
    /// Signed quantity; negative means short.
    pub qty: i64,
    /// Average entry price, always a positive magnitude.
    pub avg_entry_price: Decimal,
    pub asset_class: AssetClass,
}

impl OpenPosition {
    pub fn is_short_option(&self) -> bool {
        self.asset_class == AssetClass::UsOption && self.qty < 0
    }
}

/// A short put position decoded for monitoring: symbol parsed, quantities
/// made positive, premium normalized. Built once per cycle and consumed
/// immediately.
#[derive(Debug, Clone)]
pub struct PutDetail {
    pub underlying: String,
    pub strike: Decimal,
    /// Contracts held, absolute.
    pub qty: u64,
    /// |avg entry price| — the premium received per share when the put
    /// was sold.
    pub premium_collected: Decimal,
    pub position: OpenPosition,
}

/// Why a short put was bought back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseReason {
    ProfitTarget,
    LossLimit,
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloseReason::ProfitTarget => write!(f, "profit_target"),
            CloseReason::LossLimit => write!(f, "loss_limit"),
        }
    }
}

/// Record of a put bought back this cycle, as handed to the journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosedPut {
    pub symbol: String,
    pub underlying: String,
    pub strike: Decimal,
    pub reason: CloseReason,
    pub pnl: Decimal,
    pub premium_collected: Decimal,
    pub order_id: String,
}
