// tests/chain_search_integration.rs
// ==================================
// End-to-end chain searches: golden-section result, outcome classification and
// agreement with the comparison backends.

use chain_arbitrage::engine::baselines::{NelderMead, RandomTrials};
use chain_arbitrage::engine::optimizer::{maximize, GoldenSection, Maximizer};
use chain_arbitrage::engine::service::{compare_baselines, search_chain, SearchOutcome, SearchParams};
use chain_arbitrage::math::constant_product::chain_profit;
use chain_arbitrage::models::{ChainConfig, SearchInterval};

fn default_params() -> SearchParams {
    SearchParams {
        interval: SearchInterval::new(0.0, 1e11).unwrap(),
        tolerance: 0.01,
        ..SearchParams::default()
    }
}

#[test]
fn default_chain_converges_on_interior_optimum() {
    let chain = ChainConfig::default_chain();
    let objective = |x: f64| chain_profit(chain.pools(), 0.003, x);
    let argmax = maximize(objective, 0.0, 1e11, 0.01).unwrap();

    // 1.4955x round-trip spot rate leaves room above five 0.3% fees
    assert!(argmax > 4.4e7 && argmax < 4.5e7, "argmax = {argmax}");
    assert!(objective(argmax) > 9.5e6);
    assert!(objective(argmax) >= objective(argmax * 0.9));
    assert!(objective(argmax) >= objective(argmax * 1.1));
}

#[test]
fn default_chain_outcome_is_profitable() {
    let chain = ChainConfig::default_chain();
    let search = search_chain(&chain, &default_params()).unwrap();
    match search.outcome {
        SearchOutcome::Profitable { initial_amount, profit, final_amount } => {
            assert_eq!(profit, chain_profit(chain.pools(), 0.003, initial_amount));
            assert_eq!(final_amount, initial_amount + profit);
        }
        other => panic!("expected a profitable trade, got {other:?}"),
    }
    let last_hop = *search.hop_amounts.last().unwrap();
    assert!((last_hop - search.report.argmax - search.report.value).abs() < 1e-6);
}

#[test]
fn reversed_chain_reports_no_profitable_trade() {
    let chain = ChainConfig::default_chain().reversed();
    let search = search_chain(&chain, &default_params()).unwrap();
    match search.outcome {
        SearchOutcome::NoProfitableTrade { best_amount, best_profit } => {
            assert!(best_amount >= 0.0 && best_amount < 1.0, "best amount = {best_amount}");
            assert!(best_profit <= 0.0);
            assert!(chain_profit(chain.pools(), 0.003, best_amount) <= 0.0);
        }
        other => panic!("expected no profitable trade, got {other:?}"),
    }
}

#[test]
fn high_fee_makes_default_chain_unprofitable() {
    // 1.4955 * 0.9^5 < 1
    let chain = ChainConfig::default_chain().with_fee_rate(0.1).unwrap();
    let search = search_chain(&chain, &default_params()).unwrap();
    assert!(!search.outcome.is_profitable());
    assert_eq!(search.outcome.recommended_action(), "NO_PROFITABLE_TRADE");
    assert!(search.marginal_profit_at_zero < 0.0);
}

#[test]
fn custom_interval_excluding_optimum_returns_edge() {
    let chain = ChainConfig::default_chain();
    let params = SearchParams { interval: SearchInterval::new(0.0, 1e6).unwrap(), ..default_params() };
    let search = search_chain(&chain, &params).unwrap();
    // profit is still rising at 1e6, so the best point hugs the upper bound
    assert!(search.report.argmax > 1e6 - 0.02);
    assert!(search.outcome.is_profitable());
}

#[test]
fn baselines_land_near_golden_section() {
    let chain = ChainConfig::default_chain();
    let golden = GoldenSection::new(0.01);
    let nm = NelderMead::default();
    let trials = RandomTrials::default();
    let backends: [&dyn Maximizer; 3] = [&golden, &nm, &trials];

    let runs = compare_baselines(&chain, SearchInterval::default(), &backends);
    let best = runs[0].result.as_ref().unwrap().value;

    let nelder = runs[1].result.as_ref().unwrap();
    assert!((nelder.argmax - 4.4577e7).abs() < 1e4, "{nelder:?}");
    assert!(nelder.value <= best + 1e-3 * best.abs());

    let random = runs[2].result.as_ref().unwrap();
    assert_eq!(random.evaluations, 100);
    assert!(random.value > 0.0, "log-uniform sampling should hit the profitable region");
    assert!(random.value <= best);
}
