// Comparison search backends.
//
// Both implement `Maximizer` so the service can run them against the same
// objective as the golden-section search and report the results side by side.
// Neither is used to decide anything; they exist to cross-check the argmax.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::optimizer::{evaluate, validate_bracket, Maximizer, Maximum};
use crate::error::SearchError;

// ------------------------------ Nelder-Mead ----------------------------------

/// One-dimensional downhill simplex on `-f`.
///
/// Starts at the bracket's lower bound with a 5% step (0.00025 from zero) and
/// stops when both vertices and their values agree to `xatol`/`fatol`, or on
/// the iteration/evaluation budget. Every candidate is clamped into the bracket
/// before it is evaluated.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NelderMead {
    pub xatol: f64,
    pub fatol: f64,
    pub max_iterations: usize,
    pub max_evaluations: usize,
}

impl Default for NelderMead {
    fn default() -> Self {
        Self { xatol: 1e-4, fatol: 1e-4, max_iterations: 200, max_evaluations: 200 }
    }
}

const REFLECT: f64 = 1.0;
const EXPAND: f64 = 2.0;
const CONTRACT: f64 = 0.5;
const SHRINK: f64 = 0.5;

impl Maximizer for NelderMead {
    fn name(&self) -> &'static str {
        "nelder_mead"
    }

    fn maximize(
        &self,
        objective: &dyn Fn(f64) -> f64,
        lower: f64,
        upper: f64,
    ) -> Result<Maximum, SearchError> {
        validate_bracket(lower, upper)?;

        let clamp = |x: f64| x.clamp(lower, upper);
        let mut evaluations = 0usize;
        let cost = |x: f64, n: &mut usize| evaluate(objective, x, n).map(|v| -v);

        let x0 = lower;
        let x1 = if x0 != 0.0 { x0 * (1.0 + 0.05) } else { 0.000_25 };
        // [best, worst]
        let mut sim = [clamp(x0), clamp(x1)];
        let mut fsim = [cost(sim[0], &mut evaluations)?, cost(sim[1], &mut evaluations)?];
        order(&mut sim, &mut fsim);

        let mut iterations = 1usize;
        while evaluations < self.max_evaluations && iterations < self.max_iterations {
            if (sim[1] - sim[0]).abs() <= self.xatol && (fsim[0] - fsim[1]).abs() <= self.fatol {
                break;
            }
            let xbar = sim[0];
            let xr = clamp((1.0 + REFLECT) * xbar - REFLECT * sim[1]);
            let fxr = cost(xr, &mut evaluations)?;

            if fxr < fsim[0] {
                let xe = clamp((1.0 + REFLECT * EXPAND) * xbar - REFLECT * EXPAND * sim[1]);
                let fxe = cost(xe, &mut evaluations)?;
                if fxe < fxr {
                    sim[1] = xe;
                    fsim[1] = fxe;
                } else {
                    sim[1] = xr;
                    fsim[1] = fxr;
                }
            } else {
                let (xc, fxc, accept) = if fxr < fsim[1] {
                    // outside contraction
                    let xc = clamp((1.0 + CONTRACT * REFLECT) * xbar - CONTRACT * REFLECT * sim[1]);
                    let fxc = cost(xc, &mut evaluations)?;
                    (xc, fxc, fxc <= fxr)
                } else {
                    // inside contraction
                    let xc = clamp((1.0 - CONTRACT) * xbar + CONTRACT * sim[1]);
                    let fxc = cost(xc, &mut evaluations)?;
                    (xc, fxc, fxc < fsim[1])
                };
                if accept {
                    sim[1] = xc;
                    fsim[1] = fxc;
                } else {
                    sim[1] = sim[0] + SHRINK * (sim[1] - sim[0]);
                    fsim[1] = cost(sim[1], &mut evaluations)?;
                }
            }
            order(&mut sim, &mut fsim);
            iterations += 1;
        }

        log::debug!(
            "nelder-mead done: argmax={} value={} iterations={} evaluations={}",
            sim[0], -fsim[0], iterations, evaluations
        );
        Ok(Maximum { argmax: sim[0], value: -fsim[0], evaluations })
    }
}

#[inline]
fn order(sim: &mut [f64; 2], fsim: &mut [f64; 2]) {
    if fsim[1] < fsim[0] {
        sim.swap(0, 1);
        fsim.swap(0, 1);
    }
}

// ----------------------------- Random trials ---------------------------------

/// Best of `trials` integer amounts drawn log-uniformly from the bracket.
///
/// Log-uniform sampling spends trials evenly across orders of magnitude, which
/// is where chain profit curves change shape. Ties keep the earlier trial.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomTrials {
    pub trials: usize,
    pub seed: u64,
}

impl Default for RandomTrials {
    fn default() -> Self {
        Self { trials: 100, seed: 42 }
    }
}

impl Maximizer for RandomTrials {
    fn name(&self) -> &'static str {
        "random_trials"
    }

    fn maximize(
        &self,
        objective: &dyn Fn(f64) -> f64,
        lower: f64,
        upper: f64,
    ) -> Result<Maximum, SearchError> {
        validate_bracket(lower, upper)?;
        let lo = lower.ceil().max(1.0);
        let hi = upper.floor();
        if lo > hi || self.trials == 0 {
            return Err(SearchError::InvalidInterval { lower, upper });
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let (ln_lo, ln_hi) = (lo.ln(), hi.ln());
        let mut evaluations = 0usize;
        let mut best: Option<(f64, f64)> = None;

        for _ in 0..self.trials {
            let x = rng.gen_range(ln_lo..=ln_hi).exp().round().clamp(lo, hi);
            let value = evaluate(objective, x, &mut evaluations)?;
            if best.map_or(true, |(_, v)| value > v) {
                best = Some((x, value));
            }
        }

        let (argmax, value) = best.ok_or(SearchError::InvalidInterval { lower, upper })?;
        log::debug!(
            "random trials done: argmax={} value={} trials={} seed={}",
            argmax, value, self.trials, self.seed
        );
        Ok(Maximum { argmax, value, evaluations })
    }
}
