pub mod contract;
pub mod order;
pub mod position;
pub mod snapshot;
pub mod symbol;

pub use contract::{OptionContract, OptionContractSpec};
pub use order::{MarketOrder, OrderReceipt, TimeInForce};
pub use position::{CloseReason, ClosedPut, OpenPosition, PutDetail};
pub use snapshot::{OptionGreeks, OptionQuote, OptionSnapshot, OptionTrade};
pub use symbol::{parse_option_symbol, ParsedOption, SymbolError};

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// OptionType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Query value for the Alpaca contract catalog (`type=put|call`).
    pub fn as_api_str(&self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "C"),
            OptionType::Put => write!(f, "P"),
        }
    }
}

// ---------------------------------------------------------------------------
// AssetClass
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    UsEquity,
    UsOption,
    #[serde(other)]
    Other,
}

// ---------------------------------------------------------------------------
// OrderSide
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "buy"),
            OrderSide::Sell => write!(f, "sell"),
        }
    }
}
