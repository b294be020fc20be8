use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::snapshot::OptionSnapshot;
use super::OptionType;

/// Static contract description from the brokerage catalog, before any
/// market data is attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionContractSpec {
    pub symbol: String,
    pub underlying: String,
    pub strike: Decimal,
    pub expiration: NaiveDate,
    pub option_type: OptionType,
    pub open_interest: u64,
}

/// One option contract as evaluated in a single scoring pass: the catalog
/// spec joined with its market snapshot and the underlying's latest trade.
/// Created fresh each pass and discarded after the selling decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionContract {
    pub symbol: String,
    pub underlying: String,
    pub strike: Decimal,
    pub expiration: NaiveDate,
    pub option_type: OptionType,
    pub delta: f64,
    pub open_interest: u64,
    pub bid: Decimal,
    pub ask: Decimal,
    pub last_price: Decimal,
    /// Underlying's latest trade price at the time of scoring.
    pub underlying_price: Decimal,
}

impl OptionContract {
    /// Join a catalog spec with its market snapshot. Absent quote, trade or
    /// greek fields come through as zero; downstream filters reject contracts
    /// without a usable bid or delta rather than this constructor guessing.
    pub fn from_snapshot(
        spec: &OptionContractSpec,
        snapshot: &OptionSnapshot,
        underlying_price: Decimal,
    ) -> Self {
        let (bid, ask) = match &snapshot.quote {
            Some(q) => (q.bid, q.ask),
            None => (Decimal::ZERO, Decimal::ZERO),
        };

        Self {
            symbol: spec.symbol.clone(),
            underlying: spec.underlying.clone(),
            strike: spec.strike,
            expiration: spec.expiration,
            option_type: spec.option_type,
            delta: snapshot.greeks.as_ref().map(|g| g.delta).unwrap_or(0.0),
            open_interest: spec.open_interest,
            bid,
            ask,
            last_price: snapshot
                .trade
                .as_ref()
                .map(|t| t.price)
                .unwrap_or(Decimal::ZERO),
            underlying_price,
        }
    }

    /// Midpoint premium, the price used for scoring.
    pub fn mid_premium(&self) -> Decimal {
        (self.bid + self.ask) / Decimal::from(2)
    }

    /// Cash collateral to secure one short put: 100 shares at the strike.
    pub fn collateral(&self) -> Decimal {
        Decimal::from(100) * self.strike
    }
}
