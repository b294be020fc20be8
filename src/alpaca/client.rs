use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use reqwest::{Client, RequestBuilder};
use rust_decimal::Decimal;

use crate::broker::{Broker, BrokerError};
use crate::models::{
    MarketOrder, OpenPosition, OptionContractSpec, OptionSnapshot, OptionType, OrderReceipt,
};

use super::types::{
    ApiContractPage, ApiLatestTradesPage, ApiOrderRequest, ApiOrderResponse, ApiPosition,
    ApiSnapshotPage,
};

const PAPER_TRADING_BASE: &str = "https://paper-api.alpaca.markets";
const LIVE_TRADING_BASE: &str = "https://api.alpaca.markets";
const MARKET_DATA_BASE: &str = "https://data.alpaca.markets";

/// Snapshot queries are chunked to keep URLs well under length limits.
const SNAPSHOT_CHUNK: usize = 100;
const CATALOG_PAGE_LIMIT: usize = 500;

/// Alpaca REST gateway: trading API for contracts, positions and orders,
/// market data API for snapshots and latest trades.
#[derive(Debug, Clone)]
pub struct AlpacaClient {
    http: Client,
    api_key_id: String,
    api_secret_key: String,
    trading_base: String,
    data_base: String,
    /// Bounds the contract catalog's expiration window so the page walk
    /// stays small; the candidate filter re-enforces the same window.
    max_dte: i64,
}

impl AlpacaClient {
    pub fn new(api_key_id: String, api_secret_key: String, live: bool, max_dte: i64) -> Self {
        let trading_base = if live {
            LIVE_TRADING_BASE
        } else {
            PAPER_TRADING_BASE
        };
        Self {
            http: Client::new(),
            api_key_id,
            api_secret_key,
            trading_base: trading_base.into(),
            data_base: MARKET_DATA_BASE.into(),
            max_dte,
        }
    }

    fn get(&self, url: &str) -> RequestBuilder {
        self.http
            .get(url)
            .header("APCA-API-KEY-ID", &self.api_key_id)
            .header("APCA-API-SECRET-KEY", &self.api_secret_key)
    }

    fn post(&self, url: &str) -> RequestBuilder {
        self.http
            .post(url)
            .header("APCA-API-KEY-ID", &self.api_key_id)
            .header("APCA-API-SECRET-KEY", &self.api_secret_key)
    }

    async fn checked(resp: reqwest::Response) -> Result<reqwest::Response, BrokerError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(BrokerError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl Broker for AlpacaClient {
    async fn option_contracts(
        &self,
        underlyings: &[String],
        option_type: OptionType,
    ) -> Result<Vec<OptionContractSpec>, BrokerError> {
        let url = format!("{}/v2/options/contracts", self.trading_base);
        let expiration_lte = (Utc::now().date_naive() + Duration::days(self.max_dte))
            .format("%Y-%m-%d")
            .to_string();

        let joined = underlyings.join(",");
        let limit = CATALOG_PAGE_LIMIT.to_string();
        let mut specs = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut req = self.get(&url).query(&[
                ("underlying_symbols", joined.as_str()),
                ("type", option_type.as_api_str()),
                ("status", "active"),
                ("expiration_date_lte", expiration_lte.as_str()),
                ("limit", limit.as_str()),
            ]);
            if let Some(token) = &page_token {
                req = req.query(&[("page_token", token.as_str())]);
            }

            let resp = Self::checked(req.send().await?).await?;
            let page: ApiContractPage = resp.json().await?;

            specs.extend(
                page.option_contracts
                    .into_iter()
                    .filter(|c| c.tradable)
                    .map(|c| c.into_spec()),
            );

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(specs)
    }

    async fn option_snapshots(
        &self,
        symbols: &[String],
    ) -> Result<HashMap<String, OptionSnapshot>, BrokerError> {
        let url = format!("{}/v1beta1/options/snapshots", self.data_base);
        let mut snapshots = HashMap::with_capacity(symbols.len());

        for chunk in symbols.chunks(SNAPSHOT_CHUNK) {
            let resp = Self::checked(
                self.get(&url)
                    .query(&[("symbols", chunk.join(",").as_str())])
                    .send()
                    .await?,
            )
            .await?;
            let page: ApiSnapshotPage = resp.json().await?;
            snapshots.extend(
                page.snapshots
                    .into_iter()
                    .map(|(symbol, snap)| (symbol, snap.into_snapshot())),
            );
        }

        Ok(snapshots)
    }

    async fn stock_latest_trades(
        &self,
        symbols: &[String],
    ) -> Result<HashMap<String, Decimal>, BrokerError> {
        let url = format!("{}/v2/stocks/trades/latest", self.data_base);
        let resp = Self::checked(
            self.get(&url)
                .query(&[("symbols", symbols.join(",").as_str())])
                .send()
                .await?,
        )
        .await?;

        let page: ApiLatestTradesPage = resp.json().await?;
        Ok(page
            .trades
            .into_iter()
            .map(|(symbol, trade)| (symbol, trade.price))
            .collect())
    }

    async fn positions(&self) -> Result<Vec<OpenPosition>, BrokerError> {
        let url = format!("{}/v2/positions", self.trading_base);
        let resp = Self::checked(self.get(&url).send().await?).await?;

        let positions: Vec<ApiPosition> = resp.json().await?;
        Ok(positions.into_iter().map(|p| p.into_position()).collect())
    }

    async fn market_sell(&self, symbol: &str) -> Result<(), BrokerError> {
        let url = format!("{}/v2/orders", self.trading_base);
        let body = ApiOrderRequest {
            symbol,
            qty: "1".into(),
            side: "sell",
            order_type: "market",
            time_in_force: "day".into(),
            client_order_id: uuid::Uuid::new_v4(),
        };

        Self::checked(self.post(&url).json(&body).send().await?).await?;
        Ok(())
    }

    async fn submit_order(&self, order: &MarketOrder) -> Result<OrderReceipt, BrokerError> {
        let url = format!("{}/v2/orders", self.trading_base);
        let body = ApiOrderRequest {
            symbol: &order.symbol,
            qty: order.qty.to_string(),
            side: match order.side {
                crate::models::OrderSide::Buy => "buy",
                crate::models::OrderSide::Sell => "sell",
            },
            order_type: "market",
            time_in_force: order.time_in_force.to_string(),
            client_order_id: uuid::Uuid::new_v4(),
        };

        let resp = Self::checked(self.post(&url).json(&body).send().await?).await?;
        let ack: ApiOrderResponse = resp.json().await?;
        Ok(OrderReceipt { id: ack.id })
    }
}
