use chrono::Utc;
use rust_decimal::Decimal;

use crate::broker::Broker;
use crate::config::StrategyConfig;
use crate::journal::StrategyJournal;
use crate::models::{OptionContract, OptionType};
use crate::strategy::{filter_options, filter_underlying, score_options, select_best, select_options};

use super::ExecutionError;

/// Scan the allowed symbols and sell cash-secured puts until the buying
/// power budget is exhausted.
///
/// Selected contracts are walked in score order; the first contract whose
/// collateral would push the running budget negative stops the walk, so
/// lower-ranked contracts are never reached once capital runs out.
pub async fn sell_puts(
    broker: &dyn Broker,
    allowed_symbols: &[String],
    buying_power: Decimal,
    config: &StrategyConfig,
    journal: Option<&StrategyJournal>,
) -> Result<(), ExecutionError> {
    if allowed_symbols.is_empty() || buying_power <= Decimal::ZERO {
        return Ok(());
    }

    tracing::info!(budget = %buying_power, "Searching for put options");

    let latest_prices = broker.stock_latest_trades(allowed_symbols).await?;
    let filtered = filter_underlying(&latest_prices, allowed_symbols, buying_power);
    if let Some(j) = journal {
        j.set_filtered_symbols(&filtered).await;
    }
    if filtered.is_empty() {
        tracing::info!("No symbols affordable within the buying power budget");
        return Ok(());
    }

    let specs = broker.option_contracts(&filtered, OptionType::Put).await?;
    let symbols: Vec<String> = specs.iter().map(|s| s.symbol.clone()).collect();
    let snapshots = broker.option_snapshots(&symbols).await?;

    // Contracts without a snapshot carry no market data and are dropped.
    let contracts: Vec<OptionContract> = specs
        .iter()
        .filter_map(|spec| {
            let snap = snapshots.get(&spec.symbol)?;
            let price = latest_prices.get(&spec.underlying)?;
            Some(OptionContract::from_snapshot(spec, snap, *price))
        })
        .collect();

    let today = Utc::now().date_naive();
    let puts = filter_options(&contracts, None, config, today);
    if let Some(j) = journal {
        j.log_put_candidates(&puts).await;
    }
    if puts.is_empty() {
        tracing::info!("No put options found with sufficient delta and open interest");
        return Ok(());
    }

    tracing::info!(candidates = puts.len(), "Scoring put options");
    let scores = score_options(&puts, today);
    let selected = select_options(&puts, &scores);

    let mut remaining = buying_power;
    for contract in selected {
        let collateral = contract.collateral();
        if remaining - collateral < Decimal::ZERO {
            break;
        }
        remaining -= collateral;

        tracing::info!(
            symbol = %contract.symbol,
            strike = %contract.strike,
            remaining = %remaining,
            "Selling put"
        );
        broker.market_sell(&contract.symbol).await?;
        if let Some(j) = journal {
            j.log_sold_put(&contract).await;
        }
    }

    Ok(())
}

/// Sell one covered call against a round lot of held shares.
///
/// Requires at least 100 shares before anything is fetched; sells exactly
/// the single highest-scoring contract whose strike clears the cost basis,
/// or nothing when no contract qualifies.
pub async fn sell_calls(
    broker: &dyn Broker,
    symbol: &str,
    purchase_price: Decimal,
    stock_qty: i64,
    config: &StrategyConfig,
    journal: Option<&StrategyJournal>,
) -> Result<(), ExecutionError> {
    if stock_qty < 100 {
        return Err(ExecutionError::InsufficientShares {
            symbol: symbol.to_string(),
            held: stock_qty,
        });
    }

    tracing::info!(symbol, "Searching for call options");

    let underlyings = vec![symbol.to_string()];
    let specs = broker.option_contracts(&underlyings, OptionType::Call).await?;
    let symbols: Vec<String> = specs.iter().map(|s| s.symbol.clone()).collect();
    let snapshots = broker.option_snapshots(&symbols).await?;

    let latest_prices = broker.stock_latest_trades(&underlyings).await?;
    let Some(underlying_price) = latest_prices.get(symbol).copied() else {
        tracing::warn!(symbol, "No latest trade for underlying — skipping covered call");
        return Ok(());
    };

    let contracts: Vec<OptionContract> = specs
        .iter()
        .filter_map(|spec| {
            let snap = snapshots.get(&spec.symbol)?;
            Some(OptionContract::from_snapshot(spec, snap, underlying_price))
        })
        .collect();

    let today = Utc::now().date_naive();
    let calls = filter_options(&contracts, Some(purchase_price), config, today);
    if let Some(j) = journal {
        j.log_call_candidates(&calls).await;
    }

    let scores = score_options(&calls, today);
    let Some(contract) = select_best(&calls, &scores) else {
        tracing::info!(symbol, "No viable call options found");
        return Ok(());
    };

    tracing::info!(
        symbol = %contract.symbol,
        strike = %contract.strike,
        "Selling covered call"
    );
    broker.market_sell(&contract.symbol).await?;
    if let Some(j) = journal {
        j.log_sold_call(&contract).await;
    }

    Ok(())
}
