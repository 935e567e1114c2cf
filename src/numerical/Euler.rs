//! Explicit (forward) Euler stepping of y' = f(x).
//!
//! The slope is obtained by evaluating the right-hand side at the current `x` only.
//! A failed evaluation yields NaN, which is added to `y` as is: every later point of the
//! run carries NaN, and the trajectory still has `num_steps + 1` points.
use crate::symbolic::symbolic_evaluator::ExpressionEvaluator;
use log::{debug, info};

/// One point of a trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Points in step order, the first one is the initial condition.
pub type Trajectory = Vec<Point>;

/// Largest step count taken from user input.
pub const MAX_STEPS: usize = 1_000_000;

/// Number of loop iterations for a step count given as a float, as in `for (i = 0; i < n; i++)`:
/// NaN and non-positive values give no iterations, a fractional value is rounded up,
/// anything above [`MAX_STEPS`] (infinity included) is clamped to it.
pub fn steps_from_input(num_steps: f64) -> usize {
    if num_steps.is_nan() || num_steps <= 0.0 {
        0
    } else if num_steps >= MAX_STEPS as f64 {
        MAX_STEPS
    } else {
        num_steps.ceil() as usize
    }
}

pub struct EulerApproximator {
    evaluator: ExpressionEvaluator,
    arg: String,
    h: f64,
    x: f64,
    y: f64,
}

impl EulerApproximator {
    pub fn new(expression: &str, arg: &str) -> EulerApproximator {
        EulerApproximator {
            evaluator: ExpressionEvaluator::new(expression),
            arg: arg.to_string(),
            h: 0.0,
            x: 0.0,
            y: 0.0,
        }
    }

    pub fn set_initial(&mut self, x0: f64, y0: f64, h: f64) {
        self.x = x0;
        self.y = y0;
        self.h = h;
    }

    pub fn current(&self) -> Point {
        Point {
            x: self.x,
            y: self.y,
        }
    }

    /// x += h, y += f(x)*h with the slope taken before the move
    pub fn step(&mut self) -> Point {
        let slope = self.evaluator.evaluate(&self.arg, self.x).value_or_nan();
        self.x += self.h;
        self.y += slope * self.h;
        debug!("euler step: slope {}, new point ({}, {})", slope, self.x, self.y);
        self.current()
    }

    /// Runs `num_steps` steps from the current point.
    pub fn main_loop(&mut self, num_steps: usize) -> Trajectory {
        let mut trajectory = Vec::with_capacity(num_steps.min(MAX_STEPS).saturating_add(1));
        trajectory.push(self.current());
        for _ in 0..num_steps {
            let point = self.step();
            trajectory.push(point);
        }
        trajectory
    }
}

/// Euler trajectory of `y' = expression` from `(x0, y0)`: always `num_steps + 1` points.
pub fn approximate(
    expression: &str,
    independent_var: &str,
    num_steps: usize,
    step_size: f64,
    x0: f64,
    y0: f64,
) -> Trajectory {
    let mut approximator = EulerApproximator::new(expression, independent_var);
    approximator.set_initial(x0, y0, step_size);
    let trajectory = approximator.main_loop(num_steps);
    info!(
        "euler approximation of y' = {}: {} steps of {} from ({}, {})",
        expression, num_steps, step_size, x0, y0
    );
    trajectory
}
