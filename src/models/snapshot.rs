use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Latest NBBO quote for an option. Either side can be missing or zero
/// outside market hours.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionQuote {
    pub bid: Decimal,
    pub ask: Decimal,
}

/// Latest trade print for an option.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionTrade {
    pub price: Decimal,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionGreeks {
    pub delta: f64,
}

/// Market snapshot for one option symbol. Every section is optional —
/// illiquid contracts routinely come back with no quote, no trade, or both.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionSnapshot {
    pub quote: Option<OptionQuote>,
    pub trade: Option<OptionTrade>,
    pub greeks: Option<OptionGreeks>,
}

impl OptionSnapshot {
    /// Resolve the current option price:
    /// 1. bid/ask midpoint when the quote carries both sides,
    /// 2. the ask alone when the bid is absent or zero,
    /// 3. the latest trade price when there is no usable quote,
    /// 4. `None` when nothing is available.
    pub fn mark_price(&self) -> Option<Decimal> {
        if let Some(q) = &self.quote {
            if q.ask > Decimal::ZERO {
                if q.bid > Decimal::ZERO {
                    return Some((q.bid + q.ask) / Decimal::from(2));
                }
                return Some(q.ask);
            }
        }
        self.trade.as_ref().map(|t| t.price)
    }
}
