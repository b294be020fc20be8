//! Wire DTOs mirroring Alpaca's JSON. The trading API encodes decimals as
//! strings while the market data API uses numbers; `Decimal`'s deserializer
//! accepts both. Optional sections stay optional here so absence survives
//! into the domain snapshot instead of being defaulted away.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{
    AssetClass, OpenPosition, OptionContractSpec, OptionGreeks, OptionQuote, OptionSnapshot,
    OptionTrade, OptionType,
};

// ---------------------------------------------------------------------------
// GET /v2/options/contracts
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ApiContractPage {
    pub option_contracts: Vec<ApiOptionContract>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiOptionContract {
    pub symbol: String,
    pub underlying_symbol: String,
    #[serde(rename = "type")]
    pub option_type: OptionType,
    pub strike_price: Decimal,
    pub expiration_date: NaiveDate,
    #[serde(default = "default_tradable")]
    pub tradable: bool,
    pub open_interest: Option<Decimal>,
}

fn default_tradable() -> bool {
    true
}

impl ApiOptionContract {
    pub fn into_spec(self) -> OptionContractSpec {
        OptionContractSpec {
            symbol: self.symbol,
            underlying: self.underlying_symbol,
            strike: self.strike_price,
            expiration: self.expiration_date,
            option_type: self.option_type,
            open_interest: self
                .open_interest
                .and_then(|oi| oi.to_u64())
                .unwrap_or(0),
        }
    }
}

// ---------------------------------------------------------------------------
// GET /v1beta1/options/snapshots
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ApiSnapshotPage {
    pub snapshots: HashMap<String, ApiOptionSnapshot>,
}

#[derive(Debug, Deserialize)]
pub struct ApiOptionSnapshot {
    #[serde(rename = "latestQuote")]
    pub latest_quote: Option<ApiOptionQuote>,
    #[serde(rename = "latestTrade")]
    pub latest_trade: Option<ApiOptionTrade>,
    pub greeks: Option<ApiGreeks>,
}

#[derive(Debug, Deserialize)]
pub struct ApiOptionQuote {
    #[serde(rename = "bp")]
    pub bid_price: Decimal,
    #[serde(rename = "ap")]
    pub ask_price: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct ApiOptionTrade {
    #[serde(rename = "p")]
    pub price: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct ApiGreeks {
    pub delta: f64,
}

impl ApiOptionSnapshot {
    pub fn into_snapshot(self) -> OptionSnapshot {
        OptionSnapshot {
            quote: self.latest_quote.map(|q| OptionQuote {
                bid: q.bid_price,
                ask: q.ask_price,
            }),
            trade: self.latest_trade.map(|t| OptionTrade { price: t.price }),
            greeks: self.greeks.map(|g| OptionGreeks { delta: g.delta }),
        }
    }
}

// ---------------------------------------------------------------------------
// GET /v2/stocks/trades/latest
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ApiLatestTradesPage {
    pub trades: HashMap<String, ApiStockTrade>,
}

#[derive(Debug, Deserialize)]
pub struct ApiStockTrade {
    #[serde(rename = "p")]
    pub price: Decimal,
}

// ---------------------------------------------------------------------------
// GET /v2/positions
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ApiPosition {
    pub symbol: String,
    pub qty: Decimal,
    pub avg_entry_price: Decimal,
    pub asset_class: AssetClass,
}

impl ApiPosition {
    pub fn into_position(self) -> OpenPosition {
        OpenPosition {
            symbol: self.symbol,
            // Order sizing is integral (contracts or round lots), so
            // fractional share counts truncate toward zero.
            qty: self.qty.trunc().to_i64().unwrap_or(0),
            avg_entry_price: self.avg_entry_price,
            asset_class: self.asset_class,
        }
    }
}

// ---------------------------------------------------------------------------
// POST /v2/orders
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ApiOrderRequest<'a> {
    pub symbol: &'a str,
    pub qty: String,
    pub side: &'a str,
    #[serde(rename = "type")]
    pub order_type: &'a str,
    pub time_in_force: String,
    /// Client-side idempotency key.
    pub client_order_id: uuid::Uuid,
}

#[derive(Debug, Deserialize)]
pub struct ApiOrderResponse {
    pub id: String,
}
