use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::StrategyConfig;
use crate::models::OptionContract;

/// Keep the underlyings whose cash-secured put is affordable: one contract
/// reserves 100 shares at roughly the current price. Symbols without a
/// price entry are dropped. Input order is preserved.
pub fn filter_underlying(
    latest_prices: &HashMap<String, Decimal>,
    symbols: &[String],
    buying_power: Decimal,
) -> Vec<String> {
    symbols
        .iter()
        .filter(|s| {
            latest_prices
                .get(*s)
                .is_some_and(|price| Decimal::from(100) * price <= buying_power)
        })
        .cloned()
        .collect()
}

/// Keep contracts worth selling: |delta| inside the configured band, open
/// interest at or above the floor, expiring within the DTE window, and a
/// non-zero bid so the premium is real.
///
/// `reference_price` is the cost basis of held shares on the covered-call
/// path; when present, only strikes at or above it survive so assignment
/// cannot lock in a loss on the stock.
pub fn filter_options(
    contracts: &[OptionContract],
    reference_price: Option<Decimal>,
    config: &StrategyConfig,
    today: NaiveDate,
) -> Vec<OptionContract> {
    contracts
        .iter()
        .filter(|c| {
            let abs_delta = c.delta.abs();
            if abs_delta < config.delta_min || abs_delta > config.delta_max {
                return false;
            }
            if c.open_interest < config.min_open_interest {
                return false;
            }
            let dte = (c.expiration - today).num_days();
            if dte < 0 || dte > config.max_dte {
                return false;
            }
            if c.bid <= Decimal::ZERO {
                return false;
            }
            if let Some(basis) = reference_price {
                if c.strike < basis {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect()
}
