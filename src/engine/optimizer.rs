// src/engine/optimizer.rs
// ============================================================================
// Golden-section search for the trade size that maximizes a scalar objective.
//
// The objective is treated as an opaque, pure `f(x) -> f64` (in practice the
// chain-profit model partially applied over chain and fee). It is assumed
// unimodal on the bracket; outside that assumption the search still terminates
// deterministically but may settle on a local maximum.
//
// One interior point is carried between iterations, so every iteration costs
// exactly one objective evaluation and shrinks the bracket by the golden ratio.
//
// Other search strategies live in `engine::baselines` and implement the same
// `Maximizer` trait; the caller picks which one to run.
//

use crate::error::SearchError;

/// Iteration cap used by [`maximize`]. Far above the ~63 iterations a
/// `[0, 1e11]` bracket needs at a 0.01 tolerance.
pub const DEFAULT_MAX_ITERATIONS: usize = 500;

/// `1 + golden ratio`. The first interior point sits `width / golden_step()` from
/// the lower bound.
#[inline]
pub fn golden_step() -> f64 {
    1.0 + (1.0 + 5.0_f64.sqrt()) / 2.0
}

/// Factor the bracket width is multiplied by on every iteration (≈ 0.618).
#[inline]
pub fn shrink_factor() -> f64 {
    let phi = golden_step();
    (phi - 1.0) / phi
}

/// Best point found by any maximizer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Maximum {
    pub argmax: f64,
    pub value: f64,
    pub evaluations: usize,
}

/// Bracket state after initialisation and after every iteration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bracket {
    pub lower: f64,
    pub upper: f64,
    pub interior: f64,
}

impl Bracket {
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Full record of one golden-section run.
#[derive(Clone, Debug)]
pub struct SearchReport {
    pub argmax: f64,
    pub value: f64,
    /// Objective at the initial `(lower, upper)`. Diagnostic only; the
    /// narrowing rule never reads them.
    pub boundary_values: (f64, f64),
    pub iterations: usize,
    pub evaluations: usize,
    pub history: Vec<Bracket>,
}

impl SearchReport {
    pub fn maximum(&self) -> Maximum {
        Maximum { argmax: self.argmax, value: self.value, evaluations: self.evaluations }
    }
}

/// Common contract for every search backend.
pub trait Maximizer {
    fn name(&self) -> &'static str;

    fn maximize(
        &self,
        objective: &dyn Fn(f64) -> f64,
        lower: f64,
        upper: f64,
    ) -> Result<Maximum, SearchError>;
}

// ------------------------------ Public entry ---------------------------------

/// Argmax of `objective` on `[lower, upper]` to within `tolerance`.
pub fn maximize<F>(objective: F, lower: f64, upper: f64, tolerance: f64) -> Result<f64, SearchError>
where
    F: Fn(f64) -> f64,
{
    maximize_with_report(objective, lower, upper, tolerance, DEFAULT_MAX_ITERATIONS)
        .map(|report| report.argmax)
}

/// Golden-section search returning the whole run record.
///
/// Fails fast on a malformed bracket or tolerance, on a non-finite interior
/// evaluation, and when the bracket stops shrinking or `max_iterations` is hit
/// before the width reaches `tolerance`.
pub fn maximize_with_report<F>(
    objective: F,
    lower: f64,
    upper: f64,
    tolerance: f64,
    max_iterations: usize,
) -> Result<SearchReport, SearchError>
where
    F: Fn(f64) -> f64,
{
    validate_bracket(lower, upper)?;
    if !tolerance.is_finite() || tolerance <= 0.0 {
        return Err(SearchError::InvalidTolerance(tolerance));
    }

    let phi = golden_step();
    let (mut xl, mut xr) = (lower, upper);
    let mut evaluations = 0usize;

    let mut xm = xl + (xr - xl) / phi;
    let boundary_values = (objective(xl), objective(xr));
    evaluations += 2;
    let mut fm = evaluate(&objective, xm, &mut evaluations)?;

    let mut history = vec![Bracket { lower: xl, upper: xr, interior: xm }];
    let mut iterations = 0usize;

    while xr - xl > tolerance {
        if iterations >= max_iterations {
            return Err(SearchError::NonConvergence { iterations, width: xr - xl });
        }
        let width_before = xr - xl;

        if xr - xm > xm - xl {
            // right section is larger: probe inside [xm, xr]
            let xm2 = xm + (xr - xm) / phi;
            let fm2 = evaluate(&objective, xm2, &mut evaluations)?;
            if fm2 >= fm {
                xl = xm;
                xm = xm2;
                fm = fm2;
            } else {
                xr = xm2;
            }
        } else {
            // left section is larger: probe inside [xl, xm]
            let xm2 = xm - (xm - xl) / phi;
            let fm2 = evaluate(&objective, xm2, &mut evaluations)?;
            if fm2 >= fm {
                xr = xm;
                xm = xm2;
                fm = fm2;
            } else {
                xl = xm2;
            }
        }
        iterations += 1;

        if xr - xl >= width_before {
            // fp resolution exhausted before reaching the tolerance
            return Err(SearchError::NonConvergence { iterations, width: xr - xl });
        }
        log::trace!(
            "golden iter {}: [{:.6}, {:.6}] width={:.6e} xm={:.6} f(xm)={:.6}",
            iterations, xl, xr, xr - xl, xm, fm
        );
        history.push(Bracket { lower: xl, upper: xr, interior: xm });
    }

    log::debug!(
        "golden search done: argmax={} value={} iterations={} evaluations={} f(lower)={} f(upper)={}",
        xm, fm, iterations, evaluations, boundary_values.0, boundary_values.1
    );

    Ok(SearchReport { argmax: xm, value: fm, boundary_values, iterations, evaluations, history })
}

/// Bracket check shared by every backend: finite bounds with `lower < upper`.
pub(crate) fn validate_bracket(lower: f64, upper: f64) -> Result<(), SearchError> {
    if !lower.is_finite() || !upper.is_finite() || lower >= upper {
        return Err(SearchError::InvalidInterval { lower, upper });
    }
    Ok(())
}

#[inline]
pub(crate) fn evaluate<F>(objective: &F, x: f64, evaluations: &mut usize) -> Result<f64, SearchError>
where
    F: Fn(f64) -> f64 + ?Sized,
{
    *evaluations += 1;
    let value = objective(x);
    if value.is_finite() { Ok(value) } else { Err(SearchError::NonFiniteObjective { x }) }
}

// ------------------------------- Backend ------------------------------------

/// Golden-section search as a [`Maximizer`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GoldenSection {
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl GoldenSection {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance, max_iterations: DEFAULT_MAX_ITERATIONS }
    }
}

impl Default for GoldenSection {
    fn default() -> Self {
        Self::new(0.01)
    }
}

impl Maximizer for GoldenSection {
    fn name(&self) -> &'static str {
        "golden_section"
    }

    fn maximize(
        &self,
        objective: &dyn Fn(f64) -> f64,
        lower: f64,
        upper: f64,
    ) -> Result<Maximum, SearchError> {
        maximize_with_report(objective, lower, upper, self.tolerance, self.max_iterations)
            .map(|report| report.maximum())
    }
}
