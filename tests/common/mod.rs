use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use wheelbot::broker::{Broker, BrokerError};
use wheelbot::models::{
    AssetClass, MarketOrder, OpenPosition, OptionContractSpec, OptionGreeks, OptionQuote,
    OptionSnapshot, OptionTrade, OptionType, OrderReceipt,
};

/// In-memory brokerage for driving the engine. Seeded with fixture data,
/// records every order, and can be told to fail specific calls.
#[derive(Default)]
pub struct MockBroker {
    pub positions: Vec<OpenPosition>,
    pub contracts: Vec<OptionContractSpec>,
    pub snapshots: HashMap<String, OptionSnapshot>,
    pub stock_prices: HashMap<String, Decimal>,

    pub fail_positions: bool,
    pub fail_trades: bool,
    pub fail_snapshots: bool,
    pub fail_submit_symbols: HashSet<String>,

    pub gateway_calls: AtomicU32,
    pub contract_requests: Mutex<Vec<Vec<String>>>,
    pub market_sells: Mutex<Vec<String>>,
    pub submitted: Mutex<Vec<MarketOrder>>,
}

#[allow(dead_code)]
impl MockBroker {
    fn fail() -> BrokerError {
        BrokerError::Unexpected("mock failure".into())
    }

    pub fn gateway_call_count(&self) -> u32 {
        self.gateway_calls.load(Ordering::SeqCst)
    }

    pub fn sold_symbols(&self) -> Vec<String> {
        self.market_sells.lock().unwrap().clone()
    }

    pub fn submitted_orders(&self) -> Vec<MarketOrder> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl Broker for MockBroker {
    async fn option_contracts(
        &self,
        underlyings: &[String],
        option_type: OptionType,
    ) -> Result<Vec<OptionContractSpec>, BrokerError> {
        self.gateway_calls.fetch_add(1, Ordering::SeqCst);
        self.contract_requests
            .lock()
            .unwrap()
            .push(underlyings.to_vec());
        Ok(self
            .contracts
            .iter()
            .filter(|c| c.option_type == option_type && underlyings.contains(&c.underlying))
            .cloned()
            .collect())
    }

    async fn option_snapshots(
        &self,
        symbols: &[String],
    ) -> Result<HashMap<String, OptionSnapshot>, BrokerError> {
        self.gateway_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_snapshots {
            return Err(Self::fail());
        }
        Ok(symbols
            .iter()
            .filter_map(|s| self.snapshots.get(s).map(|snap| (s.clone(), snap.clone())))
            .collect())
    }

    async fn stock_latest_trades(
        &self,
        symbols: &[String],
    ) -> Result<HashMap<String, Decimal>, BrokerError> {
        self.gateway_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_trades {
            return Err(Self::fail());
        }
        Ok(symbols
            .iter()
            .filter_map(|s| self.stock_prices.get(s).map(|p| (s.clone(), *p)))
            .collect())
    }

    async fn positions(&self) -> Result<Vec<OpenPosition>, BrokerError> {
        self.gateway_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_positions {
            return Err(Self::fail());
        }
        Ok(self.positions.clone())
    }

    async fn market_sell(&self, symbol: &str) -> Result<(), BrokerError> {
        self.gateway_calls.fetch_add(1, Ordering::SeqCst);
        self.market_sells.lock().unwrap().push(symbol.to_string());
        Ok(())
    }

    async fn submit_order(&self, order: &MarketOrder) -> Result<OrderReceipt, BrokerError> {
        self.gateway_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_submit_symbols.contains(&order.symbol) {
            return Err(Self::fail());
        }
        let mut submitted = self.submitted.lock().unwrap();
        submitted.push(order.clone());
        Ok(OrderReceipt {
            id: format!("order-{}", submitted.len()),
        })
    }
}

// ---------------------------------------------------------------------------
// Fixture builders
// ---------------------------------------------------------------------------

#[allow(dead_code)]
pub fn short_put_position(symbol: &str, qty: i64, avg_entry_price: Decimal) -> OpenPosition {
    OpenPosition {
        symbol: symbol.to_string(),
        qty,
        avg_entry_price,
        asset_class: AssetClass::UsOption,
    }
}

#[allow(dead_code)]
pub fn stock_position(symbol: &str, qty: i64, avg_entry_price: Decimal) -> OpenPosition {
    OpenPosition {
        symbol: symbol.to_string(),
        qty,
        avg_entry_price,
        asset_class: AssetClass::UsEquity,
    }
}

#[allow(dead_code)]
pub fn quote_snapshot(bid: Decimal, ask: Decimal) -> OptionSnapshot {
    OptionSnapshot {
        quote: Some(OptionQuote { bid, ask }),
        trade: None,
        greeks: None,
    }
}

#[allow(dead_code)]
pub fn trade_snapshot(price: Decimal) -> OptionSnapshot {
    OptionSnapshot {
        quote: None,
        trade: Some(OptionTrade { price }),
        greeks: None,
    }
}

#[allow(dead_code)]
pub fn in_days(days: i64) -> NaiveDate {
    Utc::now().date_naive() + Duration::days(days)
}

/// Contract spec plus a liquid snapshot that passes the default filters.
#[allow(dead_code)]
pub fn sellable_contract(
    symbol: &str,
    underlying: &str,
    option_type: OptionType,
    strike: Decimal,
    mid_premium: Decimal,
) -> (OptionContractSpec, OptionSnapshot) {
    let spec = OptionContractSpec {
        symbol: symbol.to_string(),
        underlying: underlying.to_string(),
        strike,
        expiration: in_days(30),
        option_type,
        open_interest: 200,
    };
    let spread = dec!(0.10);
    let snapshot = OptionSnapshot {
        quote: Some(OptionQuote {
            bid: mid_premium - spread,
            ask: mid_premium + spread,
        }),
        trade: Some(OptionTrade { price: mid_premium }),
        greeks: Some(OptionGreeks {
            delta: if option_type == OptionType::Put {
                -0.25
            } else {
                0.25
            },
        }),
    };
    (spec, snapshot)
}
