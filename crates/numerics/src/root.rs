//! Scalar root finding
//!
//! [`bisect`] and [`locate_root`] solve `f(x) = target` on a closed bracket.
//! The strict form reports a missing sign change as an error; the lenient
//! form falls back to whichever endpoint has the smaller residual, which is
//! what event location inside an already-accepted integration step wants.
//! [`newton`] is the open-bracket iterator used to invert equations of state.

use thiserror::Error;

/// Absolute tolerance on the bracket width.
pub const ABSOLUTE_TOLERANCE: f64 = 2e-12;
/// Relative tolerance on the bracket width, 2^-50.
pub const RELATIVE_TOLERANCE: f64 = 8.881_784_197_001_252e-16;
pub const MAX_BISECTIONS: usize = 100;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RootError {
    #[error(
        "no sign change on [{lower}, {upper}]: residuals {lower_residual} and {upper_residual}"
    )]
    NotBracketed {
        lower: f64,
        upper: f64,
        lower_residual: f64,
        upper_residual: f64,
    },

    #[error("derivative vanished at x = {x}")]
    ZeroDerivative { x: f64 },

    #[error("iterate left the finite range after x = {x}")]
    NonFinite { x: f64 },

    #[error("no convergence after {iterations} iterations (last estimate {estimate})")]
    NoConvergence { iterations: usize, estimate: f64 },
}

/// Solve `f(x) = target` for `x` between `a` and `b` by bisection.
///
/// The endpoints may be given in either order. Stops when the bracket is
/// narrower than `2e-12 + 2^-50 |x|`, when the midpoint hits the target
/// exactly, or after [`MAX_BISECTIONS`] halvings.
///
/// # Examples
///
/// ```
/// use numerics::bisect;
///
/// let root = bisect(|x| x * x, 2.0, 0.0, 2.0).unwrap();
/// assert!((root - 2f64.sqrt()).abs() < 1e-11);
/// ```
pub fn bisect<F>(mut f: F, target: f64, a: f64, b: f64) -> Result<f64, RootError>
where
    F: FnMut(f64) -> f64,
{
    let (mut lower, mut upper) = if a <= b { (a, b) } else { (b, a) };
    let mut lower_residual = f(lower) - target;
    let upper_residual = f(upper) - target;

    if lower_residual == 0.0 {
        return Ok(lower);
    }
    if upper_residual == 0.0 {
        return Ok(upper);
    }
    if !(lower_residual * upper_residual < 0.0) {
        return Err(RootError::NotBracketed {
            lower,
            upper,
            lower_residual,
            upper_residual,
        });
    }

    let mut middle = 0.5 * (lower + upper);
    for _ in 0..MAX_BISECTIONS {
        middle = 0.5 * (lower + upper);
        let residual = f(middle) - target;

        if middle == lower
            || middle == upper
            || residual == 0.0
            || (upper - lower).abs() < ABSOLUTE_TOLERANCE + RELATIVE_TOLERANCE * middle.abs()
        {
            return Ok(middle);
        }

        if residual.signum() * lower_residual.signum() < 0.0 {
            upper = middle;
        } else {
            lower = middle;
            lower_residual = residual;
        }
    }
    Ok(middle)
}

/// Like [`bisect`], but when the bracket holds no sign change the endpoint
/// whose residual is smaller in magnitude is returned instead of an error.
pub fn locate_root<F>(f: F, target: f64, a: f64, b: f64) -> f64
where
    F: FnMut(f64) -> f64,
{
    match bisect(f, target, a, b) {
        Ok(root) => root,
        Err(RootError::NotBracketed {
            lower,
            upper,
            lower_residual,
            upper_residual,
        }) => {
            if lower_residual.abs() < upper_residual.abs() {
                lower
            } else {
                upper
            }
        }
        // bisect only reports bracketing failures
        Err(_) => b,
    }
}

/// Newton iteration for `f(x) = target` starting from `seed`.
///
/// Converges when successive iterates differ by at most
/// `relative_tolerance * |x|`.
pub fn newton<F, D>(
    mut f: F,
    mut derivative: D,
    target: f64,
    seed: f64,
    relative_tolerance: f64,
    max_iterations: usize,
) -> Result<f64, RootError>
where
    F: FnMut(f64) -> f64,
    D: FnMut(f64) -> f64,
{
    let mut x = seed;
    for _ in 0..max_iterations {
        let residual = f(x) - target;
        if residual == 0.0 {
            return Ok(x);
        }

        let slope = derivative(x);
        if slope == 0.0 || !slope.is_finite() {
            return Err(RootError::ZeroDerivative { x });
        }

        let next = x - residual / slope;
        if !next.is_finite() {
            return Err(RootError::NonFinite { x });
        }
        if (next - x).abs() <= relative_tolerance * next.abs() {
            return Ok(next);
        }
        x = next;
    }

    Err(RootError::NoConvergence {
        iterations: max_iterations,
        estimate: x,
    })
}
