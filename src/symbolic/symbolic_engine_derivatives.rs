//! # Symbolic Engine Derivatives Module
//!
//! Analytical differentiation of expression trees. The integrator uses it to recognise
//! linear inner arguments (`u' ` free of the variable) and logarithmic derivatives
//! (`f'/f`), and the tests use it to check antiderivatives by differentiating them back.

use crate::symbolic::symbolic_engine::Expr;

impl Expr {
    /// DIFFERENTIATION

    /// Computes the analytical derivative of the expression with respect to a variable.
    ///
    /// Implements the standard rules:
    /// - Power rule: d/dx(x^n) = n*x^(n-1)
    /// - Exponential rule: d/dx(c^x) = c^x*ln(c)
    /// - Product rule: d/dx(f*g) = f'*g + f*g'
    /// - Quotient rule: d/dx(f/g) = (f'*g - f*g')/g^2
    /// - Chain rule: d/dx(f(g(x))) = f'(g(x))*g'(x)
    ///
    /// The result is not simplified.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let x = Expr::Var("x".to_string());
    /// let f = x.clone().pow(Expr::Const(2.0)); // x^2
    /// let df_dx = f.diff("x").simplify(); // 2*x
    /// ```
    pub fn diff(&self, var: &str) -> Expr {
        let one = || Expr::Const(1.0);
        let two = || Expr::Const(2.0);
        match self {
            Expr::Var(name) if name == var => one(),
            Expr::Var(_) | Expr::Const(_) => Expr::Const(0.0),
            Expr::Add(lhs, rhs) => lhs.diff(var) + rhs.diff(var),
            Expr::Sub(lhs, rhs) => lhs.diff(var) - rhs.diff(var),
            Expr::Mul(lhs, rhs) => {
                lhs.diff(var) * rhs.as_ref().clone() + lhs.as_ref().clone() * rhs.diff(var)
            }
            Expr::Div(lhs, rhs) => {
                let numerator =
                    lhs.diff(var) * rhs.as_ref().clone() - lhs.as_ref().clone() * rhs.diff(var);
                numerator / rhs.as_ref().clone().pow(two())
            }
            Expr::Pow(base, exp) => {
                let base = base.as_ref().clone();
                let exp = exp.as_ref().clone();
                if !exp.contains_variable(var) {
                    // n*b^(n-1)*b'
                    let reduced = base.clone().pow(exp.clone() - one());
                    exp * reduced * base.diff(var)
                } else {
                    // b^e * (e'*ln(b) + e*b'/b)
                    let log_derivative = exp.diff(var) * base.clone().ln()
                        + exp.clone() * base.diff(var) / base.clone();
                    base.pow(exp) * log_derivative
                }
            }
            Expr::Exp(arg) => self.clone() * arg.diff(var),
            Expr::Ln(arg) => arg.diff(var) / arg.as_ref().clone(),
            Expr::sin(arg) => Expr::cos(arg.clone()) * arg.diff(var),
            Expr::cos(arg) => -Expr::sin(arg.clone()) * arg.diff(var),
            Expr::tg(arg) => arg.diff(var) / Expr::cos(arg.clone()).pow(two()),
            Expr::ctg(arg) => -(arg.diff(var) / Expr::sin(arg.clone()).pow(two())),
            Expr::arcsin(arg) => {
                arg.diff(var) / (one() - arg.as_ref().clone().pow(two())).pow(Expr::Const(0.5))
            }
            Expr::arccos(arg) => {
                -(arg.diff(var) / (one() - arg.as_ref().clone().pow(two())).pow(Expr::Const(0.5)))
            }
            Expr::arctg(arg) => arg.diff(var) / (one() + arg.as_ref().clone().pow(two())),
            Expr::arcctg(arg) => -(arg.diff(var) / (one() + arg.as_ref().clone().pow(two()))),
        }
    } // end of diff
}

#[cfg(test)]
mod tests {
    use crate::symbolic::parse_expr::parse_expression_func;
    use approx::assert_relative_eq;

    /// derivative of `input` evaluated at `at`, compared with a central difference
    fn check_against_numeric(input: &str, at: f64) {
        let expr = parse_expression_func(input).unwrap();
        let derivative = expr.diff("x").set_variable("x", at).simplify();
        let h = 1e-6;
        let f = |x: f64| expr.set_variable("x", x).simplify().as_const().unwrap();
        let numeric = (f(at + h) - f(at - h)) / (2.0 * h);
        assert_relative_eq!(derivative.as_const().unwrap(), numeric, epsilon = 1e-5);
    }

    #[test]
    fn test_diff_polynomial() {
        let expr = parse_expression_func("3*x^2 + 2*x + 1").unwrap();
        assert_eq!(expr.diff("x").simplify().to_string(), "6*x + 2");
    }

    #[test]
    fn test_diff_other_variable_is_constant() {
        let expr = parse_expression_func("k*y").unwrap();
        assert_eq!(expr.diff("x").simplify().to_string(), "0");
    }

    #[test]
    fn test_diff_elementary_functions() {
        for input in [
            "exp(2*x)",
            "log(x^2 + 1)",
            "sin(3*x)*cos(x)",
            "tan(x)",
            "cot(x)",
            "arcsin(x/2)",
            "arccos(x/2)",
            "arctan(x)",
            "arccot(x)",
            "2^x",
            "x^x",
            "x/(1 + x^2)",
        ] {
            check_against_numeric(input, 0.7);
        }
    }
}
