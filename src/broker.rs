use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{
    MarketOrder, OpenPosition, OptionContractSpec, OptionSnapshot, OptionType, OrderReceipt,
};

#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("brokerage returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response: {0}")]
    Unexpected(String),
}

/// Brokerage capability surface consumed by the decision engine. Transport
/// policy (timeouts, retries) belongs to the implementation, not here.
#[async_trait]
pub trait Broker: Send + Sync {
    /// Active option contracts for the given underlyings, one side only.
    async fn option_contracts(
        &self,
        underlyings: &[String],
        option_type: OptionType,
    ) -> Result<Vec<OptionContractSpec>, BrokerError>;

    /// Market snapshots keyed by option symbol. Symbols the data feed knows
    /// nothing about are simply absent from the map.
    async fn option_snapshots(
        &self,
        symbols: &[String],
    ) -> Result<HashMap<String, OptionSnapshot>, BrokerError>;

    /// Latest trade price per stock symbol.
    async fn stock_latest_trades(
        &self,
        symbols: &[String],
    ) -> Result<HashMap<String, Decimal>, BrokerError>;

    /// All open positions in the account.
    async fn positions(&self) -> Result<Vec<OpenPosition>, BrokerError>;

    /// Fire-and-forget market sell of one contract.
    async fn market_sell(&self, symbol: &str) -> Result<(), BrokerError>;

    /// Submit an order and return the broker-assigned id.
    async fn submit_order(&self, order: &MarketOrder) -> Result<OrderReceipt, BrokerError>;
}
