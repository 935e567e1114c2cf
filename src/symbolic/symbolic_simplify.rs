//! # Symbolic Expression Simplification Module
//!
//! Algebraic clean-up of expression trees. Two jobs are done in a single bottom-up pass:
//!
//! 1. **Constant Folding**: arithmetic and every elementary function applied to
//!    numerical constants is evaluated, so a fully substituted expression collapses to
//!    one `Const`. The evaluator relies on this instead of re-reading printed text.
//! 2. **Algebraic Identities**: `x + 0 = x`, `x * 1 = x`, `x^a * x^b = x^(a+b)` and friends
//!    keep antiderivatives short and readable.
//!
//! Constants are moved to the left of products (`x*2` becomes `2*x`) and a sum with a
//! negative coefficient is turned into a difference (`a + (-3)*b` becomes `a - 3*b`).

use crate::symbolic::symbolic_engine::Expr;
use std::f64::consts::PI;

impl Expr {
    //___________________________________SIMPLIFICATION____________________________________

    /// Simplifies the expression using constant folding and algebraic identities.
    ///
    /// ## Rules Applied
    ///
    /// ### Additive Identities
    /// - `x + 0 = x`, `0 + x = x`, `x - 0 = x`, `x - x = 0`
    /// - `a + (-c)*b = a - c*b`, `a - (-c)*b = a + c*b`
    ///
    /// ### Multiplicative Identities
    /// - `x * 1 = x`, `1 * x = x`, `x * 0 = 0`, `0 * x = 0`
    /// - `x * x = x^2`, `x^a * x^b = x^(a+b)`, `x * x^a = x^(1+a)`
    /// - `(c1 * e) * c2 = (c1*c2) * e`, `c * (e / c2) = (c/c2) * e`
    ///
    /// ### Division Rules
    /// - `0 / x = 0`, `x / 1 = x`, `x / (-1) = -x`, `x / x = 1`, `(c1 * e) / c2 = (c1/c2) * e`
    ///
    /// ### Power Rules
    /// - `x^0 = 1`, `x^1 = x`, `1^x = 1`, `(x^a)^b = x^(a*b)` for constant `a` and integer `b`
    ///
    /// ### Functions
    /// - any function of a constant is evaluated, `ln(exp(u)) = u`
    ///
    /// Division by a zero constant is folded too; the resulting infinity or NaN is left
    /// for the caller to reject.
    pub fn simplify(&self) -> Expr {
        match self {
            Expr::Var(_) | Expr::Const(_) => self.clone(),
            Expr::Add(lhs, rhs) => Self::simplify_add(lhs.simplify(), rhs.simplify()),
            Expr::Sub(lhs, rhs) => Self::simplify_sub(lhs.simplify(), rhs.simplify()),
            Expr::Mul(lhs, rhs) => Self::simplify_mul(lhs.simplify(), rhs.simplify()),
            Expr::Div(lhs, rhs) => Self::simplify_div(lhs.simplify(), rhs.simplify()),
            Expr::Pow(base, exp) => Self::simplify_pow(base.simplify(), exp.simplify()),
            _ => {
                let simplified = self.map_args(|arg| arg.simplify());
                Self::fold_function(&simplified).unwrap_or(simplified)
            }
        }
    }

    fn simplify_add(lhs: Expr, rhs: Expr) -> Expr {
        match (&lhs, &rhs) {
            (Expr::Const(a), Expr::Const(b)) => Expr::Const(a + b),
            (Expr::Const(a), _) if *a == 0.0 => rhs,
            (_, Expr::Const(b)) if *b == 0.0 => lhs,
            // a + (-c)*b = a - c*b
            (_, Expr::Mul(coeff, term)) if matches!(coeff.as_ref(), Expr::Const(c) if *c < 0.0) => {
                let c = coeff.as_const().unwrap_or_default();
                let positive = Self::simplify_mul(Expr::Const(-c), term.as_ref().clone());
                Self::simplify_sub(lhs, positive)
            }
            _ => Expr::Add(Box::new(lhs), Box::new(rhs)),
        }
    }

    fn simplify_sub(lhs: Expr, rhs: Expr) -> Expr {
        match (&lhs, &rhs) {
            (Expr::Const(a), Expr::Const(b)) => Expr::Const(a - b),
            (_, Expr::Const(b)) if *b == 0.0 => lhs,
            (Expr::Const(a), _) if *a == 0.0 => Self::simplify_mul(Expr::Const(-1.0), rhs),
            _ if lhs == rhs => Expr::Const(0.0),
            // a - (-c)*b = a + c*b
            (_, Expr::Mul(coeff, term)) if matches!(coeff.as_ref(), Expr::Const(c) if *c < 0.0) => {
                let c = coeff.as_const().unwrap_or_default();
                let positive = Self::simplify_mul(Expr::Const(-c), term.as_ref().clone());
                Self::simplify_add(lhs, positive)
            }
            _ => Expr::Sub(Box::new(lhs), Box::new(rhs)),
        }
    }

    fn simplify_mul(lhs: Expr, rhs: Expr) -> Expr {
        match (&lhs, &rhs) {
            (Expr::Const(a), Expr::Const(b)) => Expr::Const(a * b),
            (Expr::Const(a), _) | (_, Expr::Const(a)) if *a == 0.0 => Expr::Const(0.0),
            (Expr::Const(a), _) if *a == 1.0 => rhs,
            (_, Expr::Const(b)) if *b == 1.0 => lhs,
            // constants go first
            (_, Expr::Const(_)) => Self::simplify_mul(rhs, lhs),
            // c2 * (c1 * e) = (c1*c2) * e
            (Expr::Const(c), Expr::Mul(inner_lhs, inner_rhs)) => match inner_lhs.as_ref() {
                Expr::Const(c1) => {
                    Self::simplify_mul(Expr::Const(c * c1), inner_rhs.as_ref().clone())
                }
                _ => Expr::Mul(Box::new(lhs), Box::new(rhs)),
            },
            // c * (e / c2) = (c/c2) * e
            (Expr::Const(c), Expr::Div(num, den)) => match den.as_ref() {
                Expr::Const(c2) => Self::simplify_mul(Expr::Const(c / c2), num.as_ref().clone()),
                _ => Expr::Mul(Box::new(lhs), Box::new(rhs)),
            },
            // (c * e1) * e2 = c * (e1 * e2)
            (Expr::Mul(inner_lhs, inner_rhs), _) if inner_lhs.as_const().is_some() => {
                let product = Self::simplify_mul(inner_rhs.as_ref().clone(), rhs);
                Self::simplify_mul(inner_lhs.as_ref().clone(), product)
            }
            // e1 * (c * e2) = c * (e1 * e2)
            (_, Expr::Mul(inner_lhs, inner_rhs)) if inner_lhs.as_const().is_some() => {
                let product = Self::simplify_mul(lhs, inner_rhs.as_ref().clone());
                Self::simplify_mul(inner_lhs.as_ref().clone(), product)
            }
            (Expr::Pow(base1, exp1), Expr::Pow(base2, exp2)) if base1 == base2 => {
                let new_exp = Self::simplify_add(exp1.as_ref().clone(), exp2.as_ref().clone());
                Self::simplify_pow(base1.as_ref().clone(), new_exp)
            }
            (_, Expr::Pow(base, exp)) | (Expr::Pow(base, exp), _)
                if base.as_ref() == &lhs || base.as_ref() == &rhs =>
            {
                let new_exp = Self::simplify_add(Expr::Const(1.0), exp.as_ref().clone());
                Self::simplify_pow(base.as_ref().clone(), new_exp)
            }
            _ if lhs == rhs => Expr::Pow(Box::new(lhs), Box::new(Expr::Const(2.0))),
            _ => Expr::Mul(Box::new(lhs), Box::new(rhs)),
        }
    }

    fn simplify_div(lhs: Expr, rhs: Expr) -> Expr {
        match (&lhs, &rhs) {
            (Expr::Const(a), Expr::Const(b)) => Expr::Const(a / b),
            (Expr::Const(a), _) if *a == 0.0 => Expr::Const(0.0),
            (_, Expr::Const(b)) if *b == 1.0 => lhs,
            (_, Expr::Const(b)) if *b == -1.0 => Self::simplify_mul(Expr::Const(-1.0), lhs),
            _ if lhs == rhs => Expr::Const(1.0),
            // (c1 * e) / c2 = (c1/c2) * e
            (Expr::Mul(inner_lhs, inner_rhs), Expr::Const(c)) => match inner_lhs.as_ref() {
                Expr::Const(c1) => {
                    Self::simplify_mul(Expr::Const(c1 / c), inner_rhs.as_ref().clone())
                }
                _ => Expr::Div(Box::new(lhs), Box::new(rhs)),
            },
            (Expr::Pow(base1, exp1), Expr::Pow(base2, exp2)) if base1 == base2 => {
                let new_exp = Self::simplify_sub(exp1.as_ref().clone(), exp2.as_ref().clone());
                Self::simplify_pow(base1.as_ref().clone(), new_exp)
            }
            (Expr::Pow(base, exp), _) if base.as_ref() == &rhs => {
                let new_exp = Self::simplify_sub(exp.as_ref().clone(), Expr::Const(1.0));
                Self::simplify_pow(rhs, new_exp)
            }
            _ => Expr::Div(Box::new(lhs), Box::new(rhs)),
        }
    }

    fn simplify_pow(base: Expr, exp: Expr) -> Expr {
        match (&base, &exp) {
            (Expr::Const(a), Expr::Const(b)) => Expr::Const(a.powf(*b)),
            (_, Expr::Const(b)) if *b == 0.0 => Expr::Const(1.0),
            (_, Expr::Const(b)) if *b == 1.0 => base,
            (Expr::Const(a), _) if *a == 1.0 => Expr::Const(1.0),
            // (x^a)^b = x^(a*b), only for integer b: sqrt(x^2) is |x|, not x
            (Expr::Pow(inner_base, inner_exp), Expr::Const(b)) if b.fract() == 0.0 => {
                match inner_exp.as_ref() {
                    Expr::Const(a) => {
                        Self::simplify_pow(inner_base.as_ref().clone(), Expr::Const(a * b))
                    }
                    _ => Expr::Pow(Box::new(base), Box::new(exp)),
                }
            }
            _ => Expr::Pow(Box::new(base), Box::new(exp)),
        }
    }

    /// Evaluates a function node whose argument is already simplified.
    fn fold_function(expr: &Expr) -> Option<Expr> {
        let folded = match expr {
            Expr::Ln(arg) => match arg.as_ref() {
                Expr::Exp(inner) => return Some(inner.as_ref().clone()),
                Expr::Const(c) => c.ln(),
                _ => return None,
            },
            Expr::Exp(arg) => arg.as_const()?.exp(),
            Expr::sin(arg) => arg.as_const()?.sin(),
            Expr::cos(arg) => arg.as_const()?.cos(),
            Expr::tg(arg) => arg.as_const()?.tan(),
            Expr::ctg(arg) => 1.0 / arg.as_const()?.tan(),
            Expr::arcsin(arg) => arg.as_const()?.asin(),
            Expr::arccos(arg) => arg.as_const()?.acos(),
            Expr::arctg(arg) => arg.as_const()?.atan(),
            Expr::arcctg(arg) => PI / 2.0 - arg.as_const()?.atan(),
            _ => return None,
        };
        Some(Expr::Const(folded))
    }
}

#[cfg(test)]
mod tests {
    use crate::symbolic::parse_expr::parse_expression_func;
    use crate::symbolic::symbolic_engine::Expr;
    use approx::assert_relative_eq;

    fn simplified(input: &str) -> String {
        parse_expression_func(input).unwrap().simplify().to_string()
    }

    #[test]
    fn test_constant_folding() {
        assert_eq!(simplified("2 + 3*4"), "14");
        assert_eq!(simplified("2^10 - 24"), "1000");
        let folded = parse_expression_func("exp(0) + sin(0) + log(1)")
            .unwrap()
            .simplify();
        assert_eq!(folded, Expr::Const(1.0));
        let folded = parse_expression_func("arccot(1)").unwrap().simplify();
        assert_relative_eq!(folded.as_const().unwrap(), std::f64::consts::PI / 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_additive_identities() {
        assert_eq!(simplified("x + 0"), "x");
        assert_eq!(simplified("0 + x"), "x");
        assert_eq!(simplified("x - 0"), "x");
        assert_eq!(simplified("sin(x) - sin(x)"), "0");
        assert_eq!(simplified("x + (-2)*y"), "x - 2*y");
        assert_eq!(simplified("x - (-1)*y"), "x + y");
    }

    #[test]
    fn test_multiplicative_identities() {
        assert_eq!(simplified("1*x"), "x");
        assert_eq!(simplified("x*1"), "x");
        assert_eq!(simplified("0*exp(x)"), "0");
        assert_eq!(simplified("x*2"), "2*x");
        assert_eq!(simplified("(2*x)*3"), "6*x");
        assert_eq!(simplified("-(-x)"), "x");
        assert_eq!(simplified("4*(x/2)"), "2*x");
    }

    #[test]
    fn test_power_rules() {
        assert_eq!(simplified("x*x"), "x^2");
        assert_eq!(simplified("x^2*x^3"), "x^5");
        assert_eq!(simplified("x*x^2"), "x^3");
        assert_eq!(simplified("x^1"), "x");
        assert_eq!(simplified("y^0"), "1");
        assert_eq!(simplified("(x^2)^3"), "x^6");
        assert_eq!(simplified("x^3/x"), "x^2");
    }

    #[test]
    fn test_fractional_power_of_power_kept() {
        assert_eq!(simplified("(x^2)^0.5"), "(x^2)^0.5");
        assert_eq!(simplified("sqrt(x^2)"), "(x^2)^0.5");
        assert_eq!(simplified("(x^0.5)^2"), "x");
        let at_minus_three = parse_expression_func("sqrt(x^2)")
            .unwrap()
            .set_variable("x", -3.0)
            .simplify();
        assert_eq!(at_minus_three, Expr::Const(3.0));
    }

    #[test]
    fn test_division_rules() {
        assert_eq!(simplified("0/x"), "0");
        assert_eq!(simplified("x/1"), "x");
        assert_eq!(simplified("exp(x)/exp(x)"), "1");
        assert_eq!(simplified("(3*x)/6"), "0.5*x");
        assert_eq!(simplified("x^2/2"), "x^2/2");
        assert_eq!(simplified("exp(x)/(-1)"), "-exp(x)");
    }

    #[test]
    fn test_substituted_expression_collapses_to_const() {
        let expr = parse_expression_func("x^2*exp(-x) + arctan(x)/2").unwrap();
        let value = expr.set_variable("x", 1.5).simplify();
        let expected = 1.5f64.powi(2) * (-1.5f64).exp() + 1.5f64.atan() / 2.0;
        assert_relative_eq!(value.as_const().unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_division_by_zero_is_folded() {
        let value = parse_expression_func("1/x").unwrap().set_variable("x", 0.0).simplify();
        assert!(value.as_const().unwrap().is_infinite());
        let value = parse_expression_func("log(x)").unwrap().set_variable("x", -1.0).simplify();
        assert!(value.as_const().unwrap().is_nan());
    }
}
