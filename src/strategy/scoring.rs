use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;

use crate::models::OptionContract;

/// Score each contract, same order as the input, higher is better.
///
/// Score = (1 − |delta|) × (mid premium / strike) × 365 / max(DTE, 1):
/// annualized premium yield on the collateral, weighted by the
/// delta-derived probability of expiring worthless. Only the ordering
/// matters downstream.
pub fn score_options(contracts: &[OptionContract], today: NaiveDate) -> Vec<f64> {
    contracts
        .iter()
        .map(|c| {
            let strike = c.strike.to_f64().unwrap_or(0.0);
            if strike <= 0.0 {
                return 0.0;
            }
            let premium = c.mid_premium().to_f64().unwrap_or(0.0);
            let dte = (c.expiration - today).num_days().max(1) as f64;
            (1.0 - c.delta.abs()) * (premium / strike) * 365.0 / dte
        })
        .collect()
}

/// Order contracts for execution: keep the best-scoring contract per
/// underlying, then sort descending by score. The sort is stable, so ties
/// keep their input order. Used by the put budget walk
/// (select-while-affordable policy).
pub fn select_options(contracts: &[OptionContract], scores: &[f64]) -> Vec<OptionContract> {
    debug_assert_eq!(contracts.len(), scores.len());

    // Best index per underlying; strictly-greater keeps the earliest on ties.
    let mut best: HashMap<&str, usize> = HashMap::new();
    for (i, c) in contracts.iter().enumerate() {
        match best.get(c.underlying.as_str()) {
            Some(&j) if scores[j] >= scores[i] => {}
            _ => {
                best.insert(c.underlying.as_str(), i);
            }
        }
    }

    let mut indices: Vec<usize> = best.into_values().collect();
    indices.sort_unstable();
    indices.sort_by(|&a, &b| scores[b].partial_cmp(&scores[a]).unwrap_or(std::cmp::Ordering::Equal));

    indices.into_iter().map(|i| contracts[i].clone()).collect()
}

/// Pick the single highest-scoring contract (select-one-best policy, the
/// covered-call path). Ties go to the earliest input.
pub fn select_best(contracts: &[OptionContract], scores: &[f64]) -> Option<OptionContract> {
    debug_assert_eq!(contracts.len(), scores.len());

    let mut best: Option<usize> = None;
    for i in 0..contracts.len() {
        match best {
            Some(j) if scores[j] >= scores[i] => {}
            _ => best = Some(i),
        }
    }
    best.map(|i| contracts[i].clone())
}
