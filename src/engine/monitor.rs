use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::broker::Broker;
use crate::journal::StrategyJournal;
use crate::models::{
    parse_option_symbol, CloseReason, ClosedPut, MarketOrder, OptionType, PutDetail,
};

/// Check open short-put positions and buy them back once unrealized profit
/// or loss reaches `target_pct` of the premium collected.
///
/// Returns `None` when there was nothing to evaluate (no short option
/// positions, none parseable, or a batch fetch failed) and `Some(closed)`
/// otherwise — an empty vec means every position was evaluated and left
/// open.
pub async fn manage_open_puts(
    broker: &dyn Broker,
    target_pct: Decimal,
    journal: Option<&StrategyJournal>,
) -> Option<Vec<ClosedPut>> {
    let positions = match broker.positions().await {
        Ok(p) => p,
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch positions");
            return None;
        }
    };

    let short_options: Vec<_> = positions.iter().filter(|p| p.is_short_option()).collect();
    if short_options.is_empty() {
        tracing::info!("No open put positions to manage");
        return None;
    }

    tracing::info!(count = short_options.len(), "Managing open put positions");

    // Decode symbols; malformed ones are skipped, calls are ignored.
    let mut details: Vec<PutDetail> = Vec::new();
    for position in &short_options {
        let parsed = match parse_option_symbol(&position.symbol) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(symbol = %position.symbol, error = %e, "Could not parse option symbol");
                continue;
            }
        };
        if parsed.option_type != OptionType::Put {
            continue;
        }
        details.push(PutDetail {
            underlying: parsed.underlying,
            strike: parsed.strike,
            qty: position.qty.unsigned_abs(),
            premium_collected: position.avg_entry_price.abs(),
            position: (*position).clone(),
        });
    }

    if details.is_empty() {
        tracing::info!("No valid put positions found");
        return None;
    }

    let underlyings: Vec<String> = details
        .iter()
        .map(|d| d.underlying.clone())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let stock_prices = match broker.stock_latest_trades(&underlyings).await {
        Ok(p) => p,
        Err(e) => {
            tracing::error!(error = %e, "Failed to get stock prices");
            return None;
        }
    };

    let option_symbols: Vec<String> = details.iter().map(|d| d.position.symbol.clone()).collect();
    let option_snapshots = match broker.option_snapshots(&option_symbols).await {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Failed to get option snapshots");
            return None;
        }
    };

    let mut to_close: Vec<(&PutDetail, CloseReason, Decimal)> = Vec::new();

    for detail in &details {
        let symbol = detail.position.symbol.as_str();

        let Some(stock_price) = stock_prices.get(&detail.underlying) else {
            tracing::warn!(underlying = %detail.underlying, "No stock price data");
            continue;
        };
        let Some(snapshot) = option_snapshots.get(symbol) else {
            tracing::warn!(symbol, "No option price data");
            continue;
        };
        let Some(current_price) = snapshot.mark_price() else {
            tracing::warn!(symbol, "No usable price in option snapshot");
            continue;
        };

        // Short put: profit as the option cheapens, loss as it richens.
        let unrealized_pnl = detail.premium_collected - current_price;
        let pnl_pct = if detail.premium_collected > Decimal::ZERO {
            unrealized_pnl / detail.premium_collected
        } else {
            Decimal::ZERO
        };

        tracing::info!(
            symbol,
            stock = %stock_price,
            strike = %detail.strike,
            premium = %detail.premium_collected,
            current = %current_price,
            pnl = %unrealized_pnl,
            pnl_pct = %pnl_pct,
            "Evaluated open put"
        );

        if pnl_pct.abs() < target_pct {
            continue;
        }

        let reason = if pnl_pct >= target_pct {
            CloseReason::ProfitTarget
        } else {
            CloseReason::LossLimit
        };
        tracing::info!(
            symbol,
            reason = %reason,
            pnl_pct = %pnl_pct,
            target = %target_pct,
            "Closure threshold reached"
        );
        to_close.push((detail, reason, unrealized_pnl));
    }

    let mut closed: Vec<ClosedPut> = Vec::new();
    for (detail, reason, pnl) in to_close {
        let symbol = detail.position.symbol.as_str();
        tracing::info!(symbol, reason = %reason, pnl = %pnl, "Buying back put");

        let order = MarketOrder::buy_to_close(symbol, detail.qty);
        match broker.submit_order(&order).await {
            Ok(receipt) => {
                tracing::info!(symbol, order_id = %receipt.id, "Close order submitted");
                closed.push(ClosedPut {
                    symbol: symbol.to_string(),
                    underlying: detail.underlying.clone(),
                    strike: detail.strike,
                    reason,
                    pnl,
                    premium_collected: detail.premium_collected,
                    order_id: receipt.id,
                });
            }
            Err(e) => {
                tracing::error!(symbol, error = %e, "Failed to close position");
            }
        }
    }

    if !closed.is_empty() {
        if let Some(j) = journal {
            j.log_closed_puts(&closed).await;
        }
    }

    tracing::info!(
        closed = closed.len(),
        total = short_options.len(),
        "Put monitoring pass complete"
    );

    Some(closed)
}
