mod common;

use rust_decimal_macros::dec;

use common::{sellable_contract, MockBroker};
use wheelbot::config::StrategyConfig;
use wheelbot::engine::{sell_calls, sell_puts, ExecutionError};
use wheelbot::models::OptionType;

fn config() -> StrategyConfig {
    StrategyConfig::default()
}

#[tokio::test]
async fn sell_puts_is_noop_without_symbols_or_budget() {
    let broker = MockBroker::default();

    sell_puts(&broker, &[], dec!(10000), &config(), None)
        .await
        .unwrap();
    sell_puts(&broker, &["AAPL".to_string()], dec!(0), &config(), None)
        .await
        .unwrap();

    assert_eq!(broker.gateway_call_count(), 0);
}

#[tokio::test]
async fn unaffordable_underlyings_never_reach_the_catalog() {
    let mut broker = MockBroker::default();
    broker.stock_prices.insert("AAPL".into(), dec!(50));
    broker.stock_prices.insert("NVDA".into(), dec!(900));
    let (spec, snap) = sellable_contract("AAPL_P50", "AAPL", OptionType::Put, dec!(48), dec!(1.20));
    broker.snapshots.insert(spec.symbol.clone(), snap);
    broker.contracts.push(spec);

    let symbols = vec!["AAPL".to_string(), "NVDA".to_string()];
    sell_puts(&broker, &symbols, dec!(10000), &config(), None)
        .await
        .unwrap();

    let requests = broker.contract_requests.lock().unwrap().clone();
    assert_eq!(requests, vec![vec!["AAPL".to_string()]]);
    assert_eq!(broker.sold_symbols(), vec!["AAPL_P50".to_string()]);
}

#[tokio::test]
async fn budget_walk_stops_at_first_unaffordable_contract() {
    // Scores order HIGH > MID > LOW (same delta and expiry, so the
    // premium-to-strike ratio decides). The budget covers HIGH, cannot
    // cover MID, and must then never reach LOW even though LOW would fit.
    let mut broker = MockBroker::default();
    broker.stock_prices.insert("AAA".into(), dec!(50));
    broker.stock_prices.insert("BBB".into(), dec!(80));
    broker.stock_prices.insert("CCC".into(), dec!(30));
    for (symbol, underlying, strike, mid) in [
        ("HIGH", "AAA", dec!(50), dec!(5.00)),
        ("MID", "BBB", dec!(80), dec!(4.00)),
        ("LOW", "CCC", dec!(30), dec!(0.90)),
    ] {
        let (spec, snap) = sellable_contract(symbol, underlying, OptionType::Put, strike, mid);
        broker.snapshots.insert(spec.symbol.clone(), snap);
        broker.contracts.push(spec);
    }

    let symbols = vec!["AAA".to_string(), "BBB".to_string(), "CCC".to_string()];
    sell_puts(&broker, &symbols, dec!(10000), &config(), None)
        .await
        .unwrap();

    assert_eq!(broker.sold_symbols(), vec!["HIGH".to_string()]);
}

#[tokio::test]
async fn budget_covers_multiple_contracts_in_score_order() {
    let mut broker = MockBroker::default();
    broker.stock_prices.insert("AAA".into(), dec!(50));
    broker.stock_prices.insert("BBB".into(), dec!(40));
    for (symbol, underlying, strike, mid) in [
        ("RICH", "AAA", dec!(50), dec!(5.00)),
        ("LEAN", "BBB", dec!(40), dec!(1.00)),
    ] {
        let (spec, snap) = sellable_contract(symbol, underlying, OptionType::Put, strike, mid);
        broker.snapshots.insert(spec.symbol.clone(), snap);
        broker.contracts.push(spec);
    }

    let symbols = vec!["AAA".to_string(), "BBB".to_string()];
    sell_puts(&broker, &symbols, dec!(9000), &config(), None)
        .await
        .unwrap();

    assert_eq!(
        broker.sold_symbols(),
        vec!["RICH".to_string(), "LEAN".to_string()]
    );
}

#[tokio::test]
async fn contracts_without_snapshots_are_dropped() {
    let mut broker = MockBroker::default();
    broker.stock_prices.insert("AAPL".into(), dec!(50));
    let (spec, _snap) = sellable_contract("GHOST", "AAPL", OptionType::Put, dec!(48), dec!(2.00));
    broker.contracts.push(spec);

    sell_puts(&broker, &["AAPL".to_string()], dec!(10000), &config(), None)
        .await
        .unwrap();

    assert!(broker.sold_symbols().is_empty());
}

#[tokio::test]
async fn sell_calls_requires_a_round_lot_before_any_gateway_call() {
    let broker = MockBroker::default();

    let err = sell_calls(&broker, "AAPL", dec!(150), 99, &config(), None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ExecutionError::InsufficientShares { held: 99, .. }
    ));
    assert_eq!(broker.gateway_call_count(), 0);
}

#[tokio::test]
async fn sell_calls_sells_exactly_the_best_qualifying_contract() {
    let mut broker = MockBroker::default();
    broker.stock_prices.insert("AAPL".into(), dec!(150));
    for (symbol, strike, mid) in [
        // Below the 145 cost basis: excluded no matter the premium.
        ("BELOW_BASIS", dec!(140), dec!(9.00)),
        ("BEST", dec!(150), dec!(3.00)),
        ("WORSE", dec!(160), dec!(1.00)),
    ] {
        let (spec, snap) = sellable_contract(symbol, "AAPL", OptionType::Call, strike, mid);
        broker.snapshots.insert(spec.symbol.clone(), snap);
        broker.contracts.push(spec);
    }

    sell_calls(&broker, "AAPL", dec!(145), 200, &config(), None)
        .await
        .unwrap();

    assert_eq!(broker.sold_symbols(), vec!["BEST".to_string()]);
}

#[tokio::test]
async fn sell_calls_without_candidates_sells_nothing() {
    let mut broker = MockBroker::default();
    broker.stock_prices.insert("AAPL".into(), dec!(150));

    sell_calls(&broker, "AAPL", dec!(145), 200, &config(), None)
        .await
        .unwrap();

    assert!(broker.sold_symbols().is_empty());
}
