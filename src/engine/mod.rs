pub mod monitor;
pub mod sell;

pub use monitor::manage_open_puts;
pub use sell::{sell_calls, sell_puts};

use rust_decimal::Decimal;
use thiserror::Error;

use crate::broker::{Broker, BrokerError};
use crate::config::AppConfig;
use crate::journal::StrategyJournal;
use crate::models::{parse_option_symbol, AssetClass};

#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("not enough shares of {symbol} to cover a short call: {held} held, 100 needed")]
    InsufficientShares { symbol: String, held: i64 },

    #[error(transparent)]
    Broker(#[from] BrokerError),
}

/// One full strategy pass: manage open puts first (realize targets, free
/// collateral), then sell covered calls against round lots, then sell puts
/// with whatever budget is not already reserved. Brokerage failures are
/// terminal for the stage they occur in, never for the process.
pub async fn run_cycle(broker: &dyn Broker, config: &AppConfig, journal: Option<&StrategyJournal>) {
    manage_open_puts(broker, config.strategy.target_pct, journal).await;

    let positions = match broker.positions().await {
        Ok(p) => p,
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch positions — skipping selling pass");
            return;
        }
    };

    // Covered calls against every round lot of stock held.
    for pos in &positions {
        if pos.asset_class != AssetClass::UsEquity || pos.qty < 100 {
            continue;
        }
        if let Err(e) = sell_calls(
            broker,
            &pos.symbol,
            pos.avg_entry_price,
            pos.qty,
            &config.strategy,
            journal,
        )
        .await
        {
            tracing::error!(error = %e, symbol = %pos.symbol, "Covered-call pass failed");
        }
    }

    // Collateral already committed to open short puts comes off the budget,
    // and underlyings with any open option position leave the universe.
    let mut reserved = Decimal::ZERO;
    let mut busy_underlyings: Vec<String> = Vec::new();
    for pos in &positions {
        if pos.asset_class != AssetClass::UsOption {
            continue;
        }
        let Ok(parsed) = parse_option_symbol(&pos.symbol) else {
            continue;
        };
        if pos.qty < 0 {
            reserved += Decimal::from(100) * parsed.strike * Decimal::from(pos.qty.abs());
        }
        busy_underlyings.push(parsed.underlying);
    }

    let universe: Vec<String> = config
        .allowed_symbols
        .iter()
        .filter(|s| !busy_underlyings.contains(*s))
        .cloned()
        .collect();
    let budget = (config.buying_power_limit - reserved).max(Decimal::ZERO);

    if let Err(e) = sell_puts(broker, &universe, budget, &config.strategy, journal).await {
        tracing::error!(error = %e, "Put-selling pass failed");
    }
}
