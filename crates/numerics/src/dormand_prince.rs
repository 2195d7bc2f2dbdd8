//! Explicit Runge-Kutta 5(4) integration with dense output
//!
//! [`DormandPrince`] is a step-at-a-time engine: the caller drives it with
//! [`DormandPrince::step`], inspects the accepted state, and asks for the
//! dense-output polynomial of the last accepted step with
//! [`DormandPrince::save_dense_output`]. The engine never owns the right-hand
//! side, so the caller can change the derivative function between segments
//! without rebuilding anything but the engine state.
//!
//! The coefficients, step-size controller and initial-step heuristic follow
//! the classic Dormand-Prince pair with the fourth-order continuous extension
//! of Shampine, so results are directly comparable with other RK45 codes.

use nalgebra::SVector;
use thiserror::Error;
use tracing::{debug, trace};

/// State vector carried by the integrator.
pub type State<const N: usize> = SVector<f64, N>;

const STAGES: usize = 6;

const C: [f64; STAGES] = [0.0, 1.0 / 5.0, 3.0 / 10.0, 4.0 / 5.0, 8.0 / 9.0, 1.0];

const A: [[f64; 5]; STAGES] = [
    [0.0, 0.0, 0.0, 0.0, 0.0],
    [1.0 / 5.0, 0.0, 0.0, 0.0, 0.0],
    [3.0 / 40.0, 9.0 / 40.0, 0.0, 0.0, 0.0],
    [44.0 / 45.0, -56.0 / 15.0, 32.0 / 9.0, 0.0, 0.0],
    [
        19372.0 / 6561.0,
        -25360.0 / 2187.0,
        64448.0 / 6561.0,
        -212.0 / 729.0,
        0.0,
    ],
    [
        9017.0 / 3168.0,
        -355.0 / 33.0,
        46732.0 / 5247.0,
        49.0 / 176.0,
        -5103.0 / 18656.0,
    ],
];

const B: [f64; STAGES] = [
    35.0 / 384.0,
    0.0,
    500.0 / 1113.0,
    125.0 / 192.0,
    -2187.0 / 6784.0,
    11.0 / 84.0,
];

/// Difference between the fifth and fourth order weights, including the
/// first-same-as-last stage.
const E: [f64; STAGES + 1] = [
    -71.0 / 57600.0,
    0.0,
    71.0 / 16695.0,
    -71.0 / 1920.0,
    17253.0 / 339200.0,
    -22.0 / 525.0,
    1.0 / 40.0,
];

/// Continuous extension: y(x) = y_old + h * sum_j (K^T P)_j x^(j+1).
const P: [[f64; 4]; STAGES + 1] = [
    [
        1.0,
        -8048581381.0 / 2820520608.0,
        8663915743.0 / 2820520608.0,
        -12715105075.0 / 11282082432.0,
    ],
    [0.0, 0.0, 0.0, 0.0],
    [
        0.0,
        131558114200.0 / 32700410799.0,
        -68118460800.0 / 10900136933.0,
        87487479700.0 / 32700410799.0,
    ],
    [
        0.0,
        -1754552775.0 / 470086768.0,
        14199869525.0 / 1410260304.0,
        -10690763975.0 / 1880347072.0,
    ],
    [
        0.0,
        127303824393.0 / 49829197408.0,
        -318862633887.0 / 49829197408.0,
        701980252875.0 / 199316789632.0,
    ],
    [
        0.0,
        -282668133.0 / 205662961.0,
        2019193451.0 / 616988883.0,
        -1453857185.0 / 822651844.0,
    ],
    [
        0.0,
        40617522.0 / 29380423.0,
        -110615467.0 / 29380423.0,
        69997945.0 / 29380423.0,
    ],
];

const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 10.0;
/// Order of the embedded error estimator.
const ESTIMATOR_ORDER: f64 = 4.0;
const ERROR_EXPONENT: f64 = -1.0 / (ESTIMATOR_ORDER + 1.0);

/// Mixed error tolerances for the step-size controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub relative: f64,
    pub absolute: f64,
}

impl Tolerances {
    pub fn new(relative: f64, absolute: f64) -> Self {
        Self { relative, absolute }
    }

    /// Both tolerances set to `10^-exponent`.
    pub fn from_exponent(exponent: f64) -> Self {
        let tolerance = 10f64.powf(-exponent);
        Self::new(tolerance, tolerance)
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self::new(1e-3, 1e-6)
    }
}

/// Progress of an integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// More steps can be taken.
    Processing,
    /// The step size collapsed below the floating-point spacing of the
    /// current point, usually because the state stopped being finite.
    Failed,
    /// The end point was reached.
    Complete,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegrationError {
    #[error("integration interval [{start}, {end}] is not finite")]
    InvalidInterval { start: f64, end: f64 },

    #[error("initial state at {point} has non-finite components")]
    NonFiniteInitialState { point: f64 },

    #[error("step size must be positive and finite, got {step}")]
    InvalidStep { step: f64 },
}

/// Quartic interpolant over one accepted step.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseBlock<const N: usize> {
    start: f64,
    end: f64,
    origin: State<N>,
    coefficients: [State<N>; 4],
}

impl<const N: usize> DenseBlock<N> {
    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// Whether `point` lies in the closed interval spanned by the block.
    pub fn contains(&self, point: f64) -> bool {
        let (low, high) = if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        };
        low <= point && point <= high
    }

    /// Interpolated state at `point`. Exact at `start`; agrees with the
    /// accepted state at `end` to within rounding.
    pub fn evaluate(&self, point: f64) -> State<N> {
        let step = self.end - self.start;
        let x = (point - self.start) / step;

        let mut sum = State::<N>::zeros();
        let mut power = x;
        for coefficient in &self.coefficients {
            sum += *coefficient * power;
            power *= x;
        }
        self.origin + sum * step
    }
}

/// Adaptive Dormand-Prince 5(4) integrator.
///
/// # Examples
///
/// ```
/// use numerics::{DormandPrince, State, Status, Tolerances};
///
/// let decay = |_t: f64, y: &State<1>| -*y;
/// let mut engine = DormandPrince::new(Tolerances::new(1e-8, 1e-10));
/// engine.init(&decay, State::<1>::new(1.0), 0.0, 1.0).unwrap();
///
/// while engine.step(&decay) == Status::Processing {
///     engine.save_dense_output();
/// }
/// engine.save_dense_output();
///
/// let half = engine.evaluate(0.5).unwrap();
/// assert!((half[0] - (-0.5f64).exp()).abs() < 1e-7);
/// ```
#[derive(Debug, Clone)]
pub struct DormandPrince<const N: usize> {
    tolerances: Tolerances,
    max_step: f64,
    status: Status,
    start: f64,
    end: f64,
    direction: f64,
    initial: State<N>,
    point: f64,
    state: State<N>,
    derivative: State<N>,
    previous: Option<(f64, State<N>)>,
    stages: [State<N>; STAGES + 1],
    step_size: f64,
    saved: bool,
    blocks: Vec<DenseBlock<N>>,
}

impl<const N: usize> DormandPrince<N> {
    /// An engine with an empty interval; call [`init`](Self::init) before
    /// stepping.
    pub fn new(tolerances: Tolerances) -> Self {
        Self {
            tolerances,
            max_step: f64::INFINITY,
            status: Status::Complete,
            start: 0.0,
            end: 0.0,
            direction: 1.0,
            initial: State::zeros(),
            point: 0.0,
            state: State::zeros(),
            derivative: State::zeros(),
            previous: None,
            stages: [State::zeros(); STAGES + 1],
            step_size: 0.0,
            saved: true,
            blocks: Vec::new(),
        }
    }

    /// Upper bound on the magnitude of any step.
    pub fn with_max_step(mut self, max_step: f64) -> Self {
        self.max_step = max_step.abs();
        self
    }

    pub fn tolerances(&self) -> Tolerances {
        self.tolerances
    }

    /// Start a new integration of `rhs` from `(start, initial)` towards `end`.
    ///
    /// Any previous dense output is discarded. The first step size is chosen
    /// by the usual two-evaluation heuristic; override it afterwards with
    /// [`set_next_step`](Self::set_next_step).
    pub fn init<F>(
        &mut self,
        rhs: &F,
        initial: State<N>,
        start: f64,
        end: f64,
    ) -> Result<(), IntegrationError>
    where
        F: Fn(f64, &State<N>) -> State<N>,
    {
        if !start.is_finite() || !end.is_finite() {
            return Err(IntegrationError::InvalidInterval { start, end });
        }
        if initial.iter().any(|value| !value.is_finite()) {
            return Err(IntegrationError::NonFiniteInitialState { point: start });
        }

        self.blocks.clear();
        self.previous = None;
        self.saved = true;
        self.start = start;
        self.end = end;
        self.direction = if end >= start { 1.0 } else { -1.0 };
        self.initial = initial;
        self.point = start;
        self.state = initial;
        self.derivative = rhs(start, &initial);
        self.stages = [State::zeros(); STAGES + 1];

        if start == end {
            self.step_size = 0.0;
            self.status = Status::Complete;
        } else {
            self.step_size = self.select_initial_step(rhs);
            self.status = Status::Processing;
        }
        Ok(())
    }

    /// Magnitude of the step the engine will attempt next.
    pub fn next_step(&self) -> f64 {
        self.step_size
    }

    pub fn set_next_step(&mut self, step: f64) -> Result<(), IntegrationError> {
        if !(step.is_finite() && step > 0.0) {
            return Err(IntegrationError::InvalidStep { step });
        }
        self.step_size = step;
        Ok(())
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Current independent variable and accepted state.
    pub fn current_state(&self) -> (f64, State<N>) {
        (self.point, self.state)
    }

    pub fn current_point(&self) -> f64 {
        self.point
    }

    pub fn end_point(&self) -> f64 {
        self.end
    }

    /// Take one accepted step, retrying with smaller steps as the error
    /// estimate demands.
    pub fn step<F>(&mut self, rhs: &F) -> Status
    where
        F: Fn(f64, &State<N>) -> State<N>,
    {
        if self.status != Status::Processing {
            return self.status;
        }

        let min_step = 10.0 * spacing(self.point);
        let mut step_abs = self.step_size.min(self.max_step).max(min_step);
        let mut rejected = false;

        loop {
            if !(step_abs >= min_step) {
                debug!(
                    point = self.point,
                    step = step_abs,
                    "step size fell below the floating-point resolution"
                );
                self.status = Status::Failed;
                return self.status;
            }

            let mut next_point = self.point + step_abs * self.direction;
            if self.direction * (next_point - self.end) > 0.0 {
                next_point = self.end;
            }
            let step = next_point - self.point;
            step_abs = step.abs();

            let (next_state, stages) = self.runge_kutta_step(rhs, step);
            let finite = next_state.iter().all(|value| value.is_finite());
            let error_norm = if finite {
                self.error_norm(&stages, step, &next_state)
            } else {
                f64::NAN
            };

            if error_norm.is_finite() && error_norm < 1.0 {
                let mut factor = if error_norm == 0.0 {
                    MAX_FACTOR
                } else {
                    MAX_FACTOR.min(SAFETY * error_norm.powf(ERROR_EXPONENT))
                };
                if rejected {
                    factor = factor.min(1.0);
                }

                self.previous = Some((self.point, self.state));
                self.point = next_point;
                self.state = next_state;
                self.derivative = stages[STAGES];
                self.stages = stages;
                self.step_size = step_abs * factor;
                self.saved = false;
                break;
            }

            let factor = if error_norm.is_finite() {
                MIN_FACTOR.max(SAFETY * error_norm.powf(ERROR_EXPONENT))
            } else {
                MIN_FACTOR
            };
            trace!(point = self.point, step = step_abs, error_norm, "step rejected");
            step_abs *= factor;
            rejected = true;
        }

        if self.point == self.end {
            self.status = Status::Complete;
        }
        self.status
    }

    /// Record the interpolant of the last accepted step. Calling it twice for
    /// the same step, or before any step, does nothing.
    pub fn save_dense_output(&mut self) {
        if self.saved {
            return;
        }
        let Some((start, origin)) = self.previous else {
            return;
        };

        let mut coefficients = [State::<N>::zeros(); 4];
        for (stage, weights) in self.stages.iter().zip(P.iter()) {
            for (coefficient, weight) in coefficients.iter_mut().zip(weights.iter()) {
                *coefficient += *stage * *weight;
            }
        }

        self.blocks.push(DenseBlock {
            start,
            end: self.point,
            origin,
            coefficients,
        });
        self.saved = true;
    }

    /// Interpolant of the most recently saved step.
    pub fn current_block(&self) -> Option<&DenseBlock<N>> {
        self.blocks.last()
    }

    pub fn blocks(&self) -> &[DenseBlock<N>] {
        &self.blocks
    }

    /// State at `point` from the saved dense output. The initial point is
    /// always available; anything outside the saved blocks is `None`.
    pub fn evaluate(&self, point: f64) -> Option<State<N>> {
        if point == self.start {
            return Some(self.initial);
        }
        let index = self
            .blocks
            .partition_point(|block| (block.end - point) * self.direction < 0.0);
        self.blocks
            .get(index)
            .filter(|block| block.contains(point))
            .map(|block| block.evaluate(point))
    }

    /// Drop all integration state and dense output, keeping the tolerances.
    pub fn clear(&mut self) {
        *self = Self::new(self.tolerances).with_max_step(self.max_step);
    }

    fn runge_kutta_step<F>(&self, rhs: &F, step: f64) -> (State<N>, [State<N>; STAGES + 1])
    where
        F: Fn(f64, &State<N>) -> State<N>,
    {
        let mut stages = [State::<N>::zeros(); STAGES + 1];
        stages[0] = self.derivative;

        for s in 1..STAGES {
            let mut increment = State::<N>::zeros();
            for (stage, weight) in stages[..s].iter().zip(A[s].iter()) {
                increment += *stage * *weight;
            }
            stages[s] = rhs(self.point + C[s] * step, &(self.state + increment * step));
        }

        let mut increment = State::<N>::zeros();
        for (stage, weight) in stages[..STAGES].iter().zip(B.iter()) {
            increment += *stage * *weight;
        }
        let next_state = self.state + increment * step;
        stages[STAGES] = rhs(self.point + step, &next_state);

        (next_state, stages)
    }

    fn error_norm(
        &self,
        stages: &[State<N>; STAGES + 1],
        step: f64,
        next_state: &State<N>,
    ) -> f64 {
        let mut error = State::<N>::zeros();
        for (stage, weight) in stages.iter().zip(E.iter()) {
            error += *stage * *weight;
        }
        error *= step;

        let Tolerances { relative, absolute } = self.tolerances;
        let scaled = error.zip_zip_map(&self.state, next_state, |e, old, new| {
            e / (absolute + old.abs().max(new.abs()) * relative)
        });
        rms(&scaled)
    }

    fn select_initial_step<F>(&self, rhs: &F) -> f64
    where
        F: Fn(f64, &State<N>) -> State<N>,
    {
        let interval = (self.end - self.start).abs();
        let Tolerances { relative, absolute } = self.tolerances;
        let scale = self.state.map(|value| absolute + value.abs() * relative);

        let d0 = rms(&self.state.component_div(&scale));
        let d1 = rms(&self.derivative.component_div(&scale));
        let h0 = if d0 < 1e-5 || d1 < 1e-5 {
            1e-6
        } else {
            0.01 * d0 / d1
        };
        let h0 = h0.min(interval);

        let probe = self.state + self.derivative * (h0 * self.direction);
        let probe_derivative = rhs(self.start + h0 * self.direction, &probe);
        let d2 = rms(&(probe_derivative - self.derivative).component_div(&scale)) / h0;

        let h1 = if d1 <= 1e-15 && d2 <= 1e-15 {
            (h0 * 1e-3).max(1e-6)
        } else {
            (0.01 / d1.max(d2)).powf(1.0 / (ESTIMATOR_ORDER + 1.0))
        };

        let chosen = (100.0 * h0).min(h1).min(interval);
        if chosen.is_finite() && chosen > 0.0 {
            chosen
        } else {
            h0
        }
    }
}

fn rms<const N: usize>(vector: &State<N>) -> f64 {
    if N == 0 {
        return 0.0;
    }
    (vector.norm_squared() / N as f64).sqrt()
}

/// Distance from `x` to the next representable magnitude.
fn spacing(x: f64) -> f64 {
    let magnitude = x.abs();
    f64::from_bits(magnitude.to_bits() + 1) - magnitude
}
