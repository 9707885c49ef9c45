// Constant-product (x*y=k) chain math
// -----------------------------------
// Walks a trade through an ordered chain of constant-product pools and reports the
// round-trip profit in units of the starting asset.
//
// Notes:
// - The fee is taken from each hop's *output*: dy = (Y * dx / (X + dx)) * (1 - fee).
// - Reserves are never mutated; every evaluation sees the same snapshot.
// - The f64 path is the default objective. The Decimal path keeps 28 significant
//   digits for tolerances well below one unit on 1e16-sized reserves.
// - Callers validate reserves and fee (see `ChainConfig`); these functions assume a
//   well-formed chain and a non-negative amount.

use num_traits::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use crate::error::SearchError;
use crate::models::{ChainConfig, LiquidityPool};

// ------------------------------- Core math -----------------------------------

/// Output of a single hop for `amount_in` of the input asset.
#[inline]
pub fn amount_out(amount_in: f64, reserve_in: f64, reserve_out: f64, fee_rate: f64) -> f64 {
    (reserve_out * amount_in / (reserve_in + amount_in)) * (1.0 - fee_rate)
}

/// Running amount after every hop. The last element is what returns to the
/// starting asset.
pub fn hop_amounts(pools: &[LiquidityPool], fee_rate: f64, trade_amount: f64) -> Vec<f64> {
    let mut amounts = Vec::with_capacity(pools.len());
    let mut amount = trade_amount;
    for pool in pools {
        amount = amount_out(amount, pool.reserve_in, pool.reserve_out, fee_rate);
        amounts.push(amount);
    }
    amounts
}

/// Net round-trip profit: final amount minus `trade_amount`. Negative on a loss.
#[inline]
pub fn chain_profit(pools: &[LiquidityPool], fee_rate: f64, trade_amount: f64) -> f64 {
    let final_amount = pools.iter().fold(trade_amount, |amount, pool| {
        amount_out(amount, pool.reserve_in, pool.reserve_out, fee_rate)
    });
    final_amount - trade_amount
}

/// d(profit)/d(amount) at zero: `prod(Y_i / X_i) * (1 - fee)^n - 1`.
///
/// The profit curve is concave on `[0, inf)`, so a non-positive value here means
/// no trade size is profitable.
pub fn marginal_profit_at_zero(pools: &[LiquidityPool], fee_rate: f64) -> f64 {
    let gamma = 1.0 - fee_rate;
    let rate = pools
        .iter()
        .fold(1.0, |acc, pool| acc * (pool.reserve_out / pool.reserve_in) * gamma);
    rate - 1.0
}

// ---------------------------- Decimal evaluator ------------------------------

/// Decimal variant of [`amount_out`]. `None` on overflow or a zero denominator.
#[inline]
pub fn amount_out_decimal(
    amount_in: Decimal,
    reserve_in: Decimal,
    reserve_out: Decimal,
    retained: Decimal,
) -> Option<Decimal> {
    let num = reserve_out.checked_mul(amount_in)?;
    let den = reserve_in.checked_add(amount_in)?;
    num.checked_div(den)?.checked_mul(retained)
}

/// Decimal variant of [`chain_profit`].
pub fn chain_profit_decimal(
    pools: &[LiquidityPool],
    fee_rate: f64,
    trade_amount: f64,
) -> Result<Decimal, SearchError> {
    let retained = Decimal::ONE - to_decimal(fee_rate, 0)?;
    let start = to_decimal(trade_amount, 0)?;

    let mut amount = start;
    for (hop, pool) in pools.iter().enumerate() {
        let rin = to_decimal(pool.reserve_in, hop)?;
        let rout = to_decimal(pool.reserve_out, hop)?;
        amount = amount_out_decimal(amount, rin, rout, retained)
            .ok_or(SearchError::ArithmeticOverflow { hop })?;
    }
    amount.checked_sub(start).ok_or(SearchError::ArithmeticOverflow { hop: pools.len() })
}

#[inline]
fn to_decimal(value: f64, hop: usize) -> Result<Decimal, SearchError> {
    Decimal::from_f64(value).ok_or(SearchError::ArithmeticOverflow { hop })
}

// ------------------------------ Chain model ----------------------------------

/// Number representation used to walk the chain.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Precision {
    #[default]
    Double,
    Decimal,
}

/// The chain-profit objective: a validated chain partially applied over the fee.
#[derive(Clone, Debug)]
pub struct ChainProfitModel<'a> {
    chain: &'a ChainConfig,
    precision: Precision,
}

impl<'a> ChainProfitModel<'a> {
    pub fn new(chain: &'a ChainConfig, precision: Precision) -> Self {
        Self { chain, precision }
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Profit at `trade_amount`, with the amount checked first.
    pub fn evaluate(&self, trade_amount: f64) -> Result<f64, SearchError> {
        if !trade_amount.is_finite() || trade_amount < 0.0 {
            return Err(SearchError::InvalidTradeAmount(trade_amount));
        }
        self.profit_unchecked(trade_amount)
    }

    /// Scalar objective for the optimizers. Decimal overflow surfaces as NaN,
    /// which the optimizers reject; callers probe the interval's upper bound with
    /// [`Self::evaluate`] first so that path is not reached in practice.
    pub fn objective(&self) -> impl Fn(f64) -> f64 + '_ {
        move |x| self.profit_unchecked(x).unwrap_or(f64::NAN)
    }

    pub fn hop_amounts(&self, trade_amount: f64) -> Vec<f64> {
        hop_amounts(self.chain.pools(), self.chain.fee_rate(), trade_amount)
    }

    pub fn marginal_profit_at_zero(&self) -> f64 {
        marginal_profit_at_zero(self.chain.pools(), self.chain.fee_rate())
    }

    fn profit_unchecked(&self, trade_amount: f64) -> Result<f64, SearchError> {
        let (pools, fee) = (self.chain.pools(), self.chain.fee_rate());
        match self.precision {
            Precision::Double => Ok(chain_profit(pools, fee, trade_amount)),
            Precision::Decimal => {
                let profit = chain_profit_decimal(pools, fee, trade_amount)?;
                profit.to_f64().ok_or(SearchError::ArithmeticOverflow { hop: pools.len() })
            }
        }
    }
}

// ---------------------------------- Tests ------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn pools(pairs: &[(f64, f64)]) -> Vec<LiquidityPool> {
        pairs.iter().map(|&(x, y)| LiquidityPool::new(x, y)).collect()
    }

    #[test]
    fn amount_out_matches_formula() {
        // 1000 * 50 / (1000 + 50) * 0.997
        let out = amount_out(50.0, 1_000.0, 1_000.0, 0.003);
        let expected = 1_000.0 * 50.0 / 1_050.0 * 0.997;
        assert!((out - expected).abs() < 1e-12);
    }

    #[test]
    fn amount_out_monotonic_in_input() {
        let o1 = amount_out(1.0, 5_000.0, 15_000_000.0, 0.0005);
        let o2 = amount_out(5.0, 5_000.0, 15_000_000.0, 0.0005);
        let o3 = amount_out(10.0, 5_000.0, 15_000_000.0, 0.0005);
        assert!(o1 < o2 && o2 < o3, "output should increase with input");
        assert!(o3 < 15_000_000.0, "output never drains the pool");
    }

    #[test]
    fn hop_amounts_end_at_profit_plus_input() {
        let chain = pools(&[(100.0, 200.0), (300.0, 150.0), (50.0, 60.0)]);
        let amounts = hop_amounts(&chain, 0.003, 10.0);
        assert_eq!(amounts.len(), 3);
        let profit = chain_profit(&chain, 0.003, 10.0);
        assert_eq!(amounts[2] - 10.0, profit);
    }

    #[test]
    fn zero_amount_is_fixed_point() {
        let chain = pools(&[(3.0, 7.0), (11.0, 2.0)]);
        assert_eq!(chain_profit(&chain, 0.05, 0.0), 0.0);
        assert_eq!(chain_profit_decimal(&chain, 0.05, 0.0).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn marginal_rate_sign_predicts_small_trade_profit() {
        let winning = pools(&[(100.0, 110.0), (100.0, 110.0)]);
        let losing = pools(&[(110.0, 100.0), (100.0, 100.0)]);
        assert!(marginal_profit_at_zero(&winning, 0.003) > 0.0);
        assert!(chain_profit(&winning, 0.003, 0.01) > 0.0);
        assert!(marginal_profit_at_zero(&losing, 0.003) < 0.0);
        assert!(chain_profit(&losing, 0.003, 0.01) < 0.0);
    }

    #[test]
    fn decimal_agrees_with_double_on_default_chain() {
        let chain = ChainConfig::default_chain();
        let amount = 44_577_712.5;
        let double = chain_profit(chain.pools(), chain.fee_rate(), amount);
        let decimal = chain_profit_decimal(chain.pools(), chain.fee_rate(), amount)
            .unwrap()
            .to_f64()
            .unwrap();
        assert!((double - decimal).abs() / decimal.abs() < 1e-9);
    }

    #[test]
    fn decimal_reports_overflow_instead_of_panicking() {
        let chain = pools(&[(1e20, 1e27)]);
        let err = chain_profit_decimal(&chain, 0.0, 1e20).unwrap_err();
        assert_eq!(err, SearchError::ArithmeticOverflow { hop: 0 });
    }

    #[test]
    fn model_rejects_negative_amount() {
        let chain = ChainConfig::default_chain();
        let model = ChainProfitModel::new(&chain, Precision::Double);
        assert_eq!(model.evaluate(-1.0), Err(SearchError::InvalidTradeAmount(-1.0)));
        assert!(model.evaluate(f64::NAN).is_err());
        assert_eq!(model.evaluate(0.0), Ok(0.0));
    }
}
