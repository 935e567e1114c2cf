//! # Expression Evaluator
//!
//! Turns an expression string plus a value for one variable into a plain `f64`.
//! The expression is parsed once, the value is substituted, and the tree is simplified.
//! Only a finite `Expr::Const` counts as a result: unresolved symbols, infinities and
//! NaN (e.g. `log(-1)`) are all evaluation failures.
//!
//! Both the exact solver and the Euler stepper go through here, so neither of them
//! ever looks at engine output other than vetted numbers.
//!
//! # Example
//! ```
//! use RustedEuler::symbolic::symbolic_evaluator::evaluate;
//! let result = evaluate("x^2 + 1", "x", 2.0);
//! assert!(result.succeeded);
//! assert_eq!(result.value, 5.0);
//! let failed = evaluate("x^2 + k", "x", 2.0);
//! assert!(!failed.succeeded && failed.value.is_nan());
//! ```
use crate::symbolic::parse_expr::parse_expression_func;
use crate::symbolic::symbolic_engine::Expr;
use log::{debug, warn};
use thiserror::Error;

/// Why an expression did not reduce to a number.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    #[error("cannot parse expression: {0}")]
    Parse(String),
    #[error("expression does not reduce to a number, residual: {0}")]
    Unresolved(String),
    #[error("expression evaluates to a non-finite value {0}")]
    NotFinite(f64),
}

/// Outcome of a single evaluation. `succeeded` is true iff `value` is finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationResult {
    pub succeeded: bool,
    pub value: f64,
}

impl EvaluationResult {
    pub fn success(value: f64) -> Self {
        EvaluationResult {
            succeeded: true,
            value,
        }
    }

    pub fn failure() -> Self {
        EvaluationResult {
            succeeded: false,
            value: f64::NAN,
        }
    }

    /// value as used in arithmetic: the number, or NaN after a failure
    pub fn value_or_nan(&self) -> f64 {
        if self.succeeded { self.value } else { f64::NAN }
    }
}

impl From<Result<f64, EvaluationError>> for EvaluationResult {
    fn from(result: Result<f64, EvaluationError>) -> Self {
        match result {
            Ok(value) => EvaluationResult::success(value),
            Err(_) => EvaluationResult::failure(),
        }
    }
}

/// Parsed expression kept around for repeated evaluation at different points.
///
/// A parse failure is stored rather than returned, so that a malformed expression is
/// reported at every evaluation the same way an unresolved one is.
#[derive(Debug, Clone)]
pub struct ExpressionEvaluator {
    source: String,
    parsed: Result<Expr, EvaluationError>,
}

impl ExpressionEvaluator {
    pub fn new(expression: &str) -> Self {
        let parsed = parse_expression_func(expression).map_err(EvaluationError::Parse);
        ExpressionEvaluator {
            source: expression.to_string(),
            parsed,
        }
    }

    /// Substitutes `at` for `variable`, simplifies, and insists on a finite constant.
    pub fn try_evaluate(&self, variable: &str, at: f64) -> Result<f64, EvaluationError> {
        let expr = self.parsed.as_ref().map_err(|e| e.clone())?;
        match expr.set_variable(variable, at).simplify() {
            Expr::Const(value) if value.is_finite() => Ok(value),
            Expr::Const(value) => Err(EvaluationError::NotFinite(value)),
            residual => Err(EvaluationError::Unresolved(residual.to_string())),
        }
    }

    /// Like [`try_evaluate`](Self::try_evaluate) but never fails: the cause is logged
    /// and a NaN-valued failure result is returned instead.
    pub fn evaluate(&self, variable: &str, at: f64) -> EvaluationResult {
        let result = self.try_evaluate(variable, at);
        match &result {
            Ok(value) => debug!("{} at {} = {}: {}", self.source, variable, at, value),
            Err(e) => warn!(
                "evaluation of '{}' at {} = {} failed: {}",
                self.source, variable, at, e
            ),
        }
        result.into()
    }
}

/// Evaluates `expression` at `variable = at`.
pub fn evaluate(expression: &str, variable: &str, at: f64) -> EvaluationResult {
    ExpressionEvaluator::new(expression).evaluate(variable, at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_evaluate_polynomial() {
        let result = evaluate("3*x^2 - 2*x + 1", "x", 2.0);
        assert!(result.succeeded);
        assert_relative_eq!(result.value, 9.0, epsilon = 1e-12);
    }

    #[test]
    fn test_evaluate_transcendental() {
        let result = evaluate("exp(t)*sin(t)", "t", 0.5);
        assert!(result.succeeded);
        assert_relative_eq!(result.value, 0.5f64.exp() * 0.5f64.sin(), epsilon = 1e-12);
    }

    #[test]
    fn test_evaluate_constant_expression() {
        let result = evaluate("2*pi", "x", 100.0);
        assert!(result.succeeded);
        assert_relative_eq!(result.value, 2.0 * std::f64::consts::PI, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_syntax_fails_softly() {
        let result = evaluate("x +* 2", "x", 1.0);
        assert!(!result.succeeded);
        assert!(result.value.is_nan());
        let evaluator = ExpressionEvaluator::new("sin(");
        assert!(matches!(
            evaluator.try_evaluate("x", 1.0),
            Err(EvaluationError::Parse(_))
        ));
    }

    #[test]
    fn test_unresolved_symbol() {
        let evaluator = ExpressionEvaluator::new("x + k");
        assert_eq!(
            evaluator.try_evaluate("x", 1.0),
            Err(EvaluationError::Unresolved("1 + k".to_string()))
        );
        // the wrong variable leaves the whole expression unresolved
        assert!(!evaluator.evaluate("y", 1.0).succeeded);
    }

    #[test]
    fn test_non_finite_values() {
        let evaluator = ExpressionEvaluator::new("1/x");
        assert!(matches!(
            evaluator.try_evaluate("x", 0.0),
            Err(EvaluationError::NotFinite(v)) if v.is_infinite()
        ));
        let result = evaluate("log(x)", "x", -1.0);
        assert!(!result.succeeded);
        assert!(result.value.is_nan());
        let result = evaluate("sqrt(x)", "x", -4.0);
        assert!(!result.succeeded);
    }

    #[test]
    fn test_value_or_nan() {
        assert_eq!(EvaluationResult::success(2.5).value_or_nan(), 2.5);
        assert!(EvaluationResult::failure().value_or_nan().is_nan());
    }

    #[test]
    fn test_evaluator_is_reusable() {
        let evaluator = ExpressionEvaluator::new("x/2");
        let values: Vec<f64> = (0..4)
            .map(|i| evaluator.evaluate("x", i as f64).value)
            .collect();
        assert_eq!(values, vec![0.0, 0.5, 1.0, 1.5]);
    }
}
