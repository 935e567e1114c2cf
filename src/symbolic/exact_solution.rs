//! # Exact solution of y' = f(x)
//!
//! Integrates the right-hand side symbolically and fixes the integration constant from
//! the initial point: `y = F(x) + C` with `C = y0 - F(x0)`.
//!
//! Every failure (unparseable input, no antiderivative, `F(x0)` not a number) reaches the
//! user as the same sentence, [`NO_SOLUTION_MESSAGE`]. The cause is kept in
//! [`SolveFailure`] and logged.
//!
//! # Example
//! ```
//! use RustedEuler::symbolic::exact_solution::solve;
//! let solution = solve("x", "x", 0.0, 1.0);
//! assert!(solution.has_solution);
//! assert_eq!(solution.value, "x^2/2 + 1");
//! ```
use crate::symbolic::parse_expr::parse_expression_func;
use crate::symbolic::symbolic_evaluator::{EvaluationError, ExpressionEvaluator};
use log::{info, warn};
use thiserror::Error;

pub const NO_SOLUTION_MESSAGE: &str = "A solution to the given differential equation wasn't found";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveFailure {
    #[error("cannot parse the equation: {0}")]
    Parse(String),
    #[error("no antiderivative found: {0}")]
    Integration(String),
    #[error("antiderivative cannot be evaluated at the initial point: {0}")]
    InitialCondition(#[from] EvaluationError),
}

/// What the user sees: the resolved solution or the failure sentence.
#[derive(Debug, Clone, PartialEq)]
pub struct SolutionResult {
    pub has_solution: bool,
    pub value: String,
}

/// A found solution `F + C`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExactSolution {
    /// printed antiderivative F
    pub antiderivative: String,
    /// integration constant C
    pub constant: f64,
    /// F with C appended
    pub resolved: String,
}

impl ExactSolution {
    fn new(antiderivative: String, constant: f64) -> Self {
        // -0 would print as "-0"
        let constant = if constant == 0.0 { 0.0 } else { constant };
        let resolved = if constant >= 0.0 {
            format!("{} + {}", antiderivative, constant)
        } else {
            format!("{}{}", antiderivative, constant)
        };
        ExactSolution {
            antiderivative,
            constant,
            resolved,
        }
    }
}

impl From<Result<ExactSolution, SolveFailure>> for SolutionResult {
    fn from(result: Result<ExactSolution, SolveFailure>) -> Self {
        match result {
            Ok(solution) => SolutionResult {
                has_solution: true,
                value: solution.resolved,
            },
            Err(_) => SolutionResult {
                has_solution: false,
                value: NO_SOLUTION_MESSAGE.to_string(),
            },
        }
    }
}

/// Solves `y' = expression` with `y(x0) = y0`, reporting the cause of a failure.
pub fn try_solve(
    expression: &str,
    independent_var: &str,
    x0: f64,
    y0: f64,
) -> Result<ExactSolution, SolveFailure> {
    let rhs = parse_expression_func(expression).map_err(SolveFailure::Parse)?;
    let antiderivative = rhs
        .integrate(independent_var)
        .map_err(SolveFailure::Integration)?;
    // F goes through its printed form, the same text the user gets
    let printed = antiderivative.to_string();
    let at_start = ExpressionEvaluator::new(&printed).try_evaluate(independent_var, x0)?;
    let constant = y0 - at_start;
    if !constant.is_finite() {
        return Err(EvaluationError::NotFinite(constant).into());
    }
    Ok(ExactSolution::new(printed, constant))
}

/// Solves `y' = expression` with `y(x0) = y0`. Never fails outward.
pub fn solve(expression: &str, independent_var: &str, x0: f64, y0: f64) -> SolutionResult {
    let result = try_solve(expression, independent_var, x0, y0);
    match &result {
        Ok(solution) => info!("exact solution of y' = {}: y = {}", expression, solution.resolved),
        Err(e) => warn!("no exact solution of y' = {}: {}", expression, e),
    }
    result.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::symbolic_evaluator::evaluate;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_rhs_from_origin() {
        let solution = solve("x", "x", 0.0, 0.0);
        assert!(solution.has_solution);
        assert_eq!(solution.value, "x^2/2 + 0");
        let at_two = evaluate(&solution.value, "x", 2.0);
        assert_relative_eq!(at_two.value, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_negative_constant_has_no_plus() {
        // F = x^2/2, F(2) = 2, C = 1 - 2 = -1
        let solution = try_solve("x", "x", 2.0, 1.0).unwrap();
        assert_eq!(solution.constant, -1.0);
        assert_eq!(solution.resolved, "x^2/2-1");
    }

    #[test]
    fn test_negative_zero_constant_is_normalised() {
        // F(0) = 0 and y0 = -0 give C = -0
        let solution = try_solve("2*x", "x", 0.0, -0.0).unwrap();
        assert_eq!(solution.resolved, "x^2 + 0");
    }

    #[test]
    fn test_initial_condition_round_trip() {
        let cases = [
            ("x^2*exp(-x)", "x", 0.5, 2.0),
            ("cos(3*t) + 1", "t", 1.0, -4.0),
            ("1/x", "x", 2.0, 0.25),
            ("arctan(x) - 7", "x", -1.5, 3.0),
        ];
        for (expression, var, x0, y0) in cases {
            let solution = solve(expression, var, x0, y0);
            assert!(solution.has_solution, "{} should be solvable", expression);
            let at_start = evaluate(&solution.value, var, x0);
            assert!(at_start.succeeded);
            assert_relative_eq!(at_start.value, y0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_no_closed_form() {
        let solution = solve("exp(x^2)", "x", 0.0, 1.0);
        assert!(!solution.has_solution);
        assert_eq!(solution.value, NO_SOLUTION_MESSAGE);
        assert!(matches!(
            try_solve("exp(x^2)", "x", 0.0, 1.0),
            Err(SolveFailure::Integration(_))
        ));
    }

    #[test]
    fn test_bad_syntax() {
        let solution = solve("x^^2", "x", 0.0, 1.0);
        assert_eq!(solution.value, NO_SOLUTION_MESSAGE);
        assert!(matches!(
            try_solve("x^^2", "x", 0.0, 1.0),
            Err(SolveFailure::Parse(_))
        ));
    }

    #[test]
    fn test_initial_point_outside_domain() {
        // F = log(x) cannot be evaluated at x0 = -1
        assert!(matches!(
            try_solve("1/x", "x", -1.0, 0.0),
            Err(SolveFailure::InitialCondition(EvaluationError::NotFinite(_)))
        ));
        assert_eq!(solve("1/x", "x", -1.0, 0.0).value, NO_SOLUTION_MESSAGE);
    }

    #[test]
    fn test_non_finite_initial_value() {
        for y0 in [f64::NAN, f64::INFINITY] {
            assert!(matches!(
                try_solve("x", "x", 0.0, y0),
                Err(SolveFailure::InitialCondition(EvaluationError::NotFinite(_)))
            ));
            let solution = solve("x", "x", 0.0, y0);
            assert!(!solution.has_solution);
            assert_eq!(solution.value, NO_SOLUTION_MESSAGE);
        }
    }

    #[test]
    fn test_symbolic_constant_leaves_residual() {
        assert!(matches!(
            try_solve("k*x", "x", 1.0, 0.0),
            Err(SolveFailure::InitialCondition(EvaluationError::Unresolved(_)))
        ));
    }
}
