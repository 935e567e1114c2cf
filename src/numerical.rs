/// # Explicit Euler method
/// fixed-step approximation of y' = f(x)
///# Example#
/// ```
/// use RustedEuler::numerical::Euler::{approximate, Point};
/// let trajectory = approximate("x", "x", 2, 1.0, 0.0, 0.0);
/// assert_eq!(trajectory[2], Point { x: 2.0, y: 1.0 });
/// ```
pub mod Euler;
/// ________________________________________________________________________________________________________________________________
/// # Initial value problem api
/// one submission: exact solution, Euler approximation, chart series, rendering
pub mod IVP_api;
