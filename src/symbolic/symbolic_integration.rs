use crate::symbolic::symbolic_engine::Expr;

impl Expr {
    /// SYMBOLIC INTEGRATION

    /// Main integration method - integrates with respect to a variable.
    /// Returns the simplified indefinite integral (without constant of integration)
    /// or a message naming the part of the integrand no rule applies to.
    ///
    /// Symbols other than `var` are treated as constants.
    pub fn integrate(&self, var: &str) -> Result<Expr, String> {
        let integrand = self.simplify();
        integrand.integrate_simplified(var).map(|antiderivative| antiderivative.simplify())
    }

    fn integrate_simplified(&self, var: &str) -> Result<Expr, String> {
        let x = Expr::Var(var.to_string());
        // ∫ c dx = c*x, also for symbols other than x and whole subtrees free of x
        if !self.contains_variable(var) {
            return Ok(self.clone() * x);
        }
        match self {
            // ∫ x dx = x²/2
            Expr::Var(_) => Ok(x.pow(Expr::Const(2.0)) / Expr::Const(2.0)),

            // ∫ (f ± g) dx = ∫ f dx ± ∫ g dx
            Expr::Add(lhs, rhs) => Ok(lhs.integrate_simplified(var)? + rhs.integrate_simplified(var)?),
            Expr::Sub(lhs, rhs) => Ok(lhs.integrate_simplified(var)? - rhs.integrate_simplified(var)?),

            Expr::Mul(lhs, rhs) => self.integrate_multiplication(lhs, rhs, var),
            Expr::Div(lhs, rhs) => self.integrate_division(lhs, rhs, var),
            Expr::Pow(base, exp) => self.integrate_power(base, exp, var),

            // every elementary function: ∫ f(u) dx = F(u)/u' for u linear in x
            _ => {
                let inner = self.args()[0];
                let slope = linear_slope(inner, var).ok_or_else(|| self.cannot_integrate(var))?;
                let primitive = Self::primitive_of_function(self, inner)
                    .ok_or_else(|| self.cannot_integrate(var))?;
                Ok(primitive / slope)
            }
        }
    }

    fn cannot_integrate(&self, var: &str) -> String {
        format!("Cannot integrate {} with respect to {}", self, var)
    }

    /// Antiderivative of an elementary function with respect to its own argument `u`.
    fn primitive_of_function(function: &Expr, u: &Expr) -> Option<Expr> {
        let u = u.clone();
        let one = || Expr::Const(1.0);
        let two = || Expr::Const(2.0);
        // sqrt(1 - u²)
        let root = || (one() - u.clone().pow(two())).pow(Expr::Const(0.5));
        // ln(1 + u²)/2
        let half_log = || (one() + u.clone().pow(two())).ln() / two();
        let primitive = match function {
            Expr::Exp(_) => u.exp(),
            // ∫ ln(u) du = u*ln(u) - u
            Expr::Ln(_) => u.clone() * u.clone().ln() - u,
            Expr::sin(_) => -Expr::cos(u.boxed()),
            Expr::cos(_) => Expr::sin(u.boxed()),
            // ∫ tg(u) du = -ln(cos(u))
            Expr::tg(_) => -Expr::cos(u.boxed()).ln(),
            // ∫ ctg(u) du = ln(sin(u))
            Expr::ctg(_) => Expr::sin(u.boxed()).ln(),
            Expr::arcsin(_) => u.clone() * Expr::arcsin(u.clone().boxed()) + root(),
            Expr::arccos(_) => u.clone() * Expr::arccos(u.clone().boxed()) - root(),
            Expr::arctg(_) => u.clone() * Expr::arctg(u.clone().boxed()) - half_log(),
            Expr::arcctg(_) => u.clone() * Expr::arcctg(u.clone().boxed()) + half_log(),
            _ => return None,
        };
        Some(primitive)
    }

    /// ∫ f*g dx: constant factors, then the integration by parts patterns
    fn integrate_multiplication(&self, lhs: &Expr, rhs: &Expr, var: &str) -> Result<Expr, String> {
        if !lhs.contains_variable(var) {
            return Ok(lhs.clone() * rhs.integrate_simplified(var)?);
        }
        if !rhs.contains_variable(var) {
            return Ok(rhs.clone() * lhs.integrate_simplified(var)?);
        }

        // x^n * e^(ax+b), either order
        for (poly, exp) in [(lhs, rhs), (rhs, lhs)] {
            if let Some(result) = integrate_polynomial_times_exponential(poly, exp, var) {
                return Ok(result);
            }
        }

        // x^n * ln(x), either order
        for (poly, log) in [(lhs, rhs), (rhs, lhs)] {
            if let Expr::Ln(log_inner) = log {
                if is_variable(log_inner, var) {
                    if let Some(n) = integer_power_of(poly, var) {
                        return Ok(integrate_xn_times_ln_x(n, var));
                    }
                }
            }
        }

        Err(self.cannot_integrate(var))
    }

    /// Handle division in integration
    fn integrate_division(&self, lhs: &Expr, rhs: &Expr, var: &str) -> Result<Expr, String> {
        // If denominator is constant: ∫ f(x)/c dx = (∫ f(x) dx)/c
        if !rhs.contains_variable(var) {
            return Ok(lhs.integrate_simplified(var)? / rhs.clone());
        }

        // ∫ f'(x)/f(x) dx = ln(f(x))
        let derivative = rhs.diff(var).simplify();
        if &derivative == lhs {
            return Ok(rhs.clone().ln());
        }

        // ∫ c/g dx = c * ∫ g^(-1) dx, covers 1/x, c/x^n and c/(ax + b)
        if !lhs.contains_variable(var) {
            let reciprocal = rhs.clone().pow(Expr::Const(-1.0)).simplify();
            if let Ok(result) = reciprocal.integrate_simplified(var) {
                return Ok(lhs.clone() * result);
            }
        }

        // ∫ ln(x)/x dx = ln(x)²/2
        if let Expr::Ln(log_inner) = lhs {
            if is_variable(log_inner, var) && is_variable(rhs, var) {
                return Ok(integrate_xn_times_ln_x(-1, var));
            }
        }

        Err(self.cannot_integrate(var))
    }

    /// Handle power integration
    fn integrate_power(&self, base: &Expr, exp: &Expr, var: &str) -> Result<Expr, String> {
        // ∫ u^n dx = u^(n+1)/((n+1)*u'), ∫ u^(-1) dx = ln(u)/u'
        if let Expr::Const(n) = exp {
            if let Some(slope) = linear_slope(base, var) {
                let u = base.clone();
                if *n == -1.0 {
                    return Ok(u.ln() / slope);
                }
                let raised = Expr::Const(n + 1.0);
                return Ok(u.pow(raised.clone()) / (raised * slope));
            }
        }

        // ∫ c^u dx = c^u/(ln(c)*u') where c is a positive constant
        if let Expr::Const(c) = base {
            if *c > 0.0 && *c != 1.0 {
                if let Some(slope) = linear_slope(exp, var) {
                    return Ok(self.clone() / (base.clone().ln() * slope));
                }
            }
        }

        Err(self.cannot_integrate(var))
    }
}

/// Derivative of `inner` when it is a non-zero constant, i.e. `inner` is linear in `var`.
fn linear_slope(inner: &Expr, var: &str) -> Option<Expr> {
    let slope = inner.diff(var).simplify();
    if slope.contains_variable(var) || slope.is_zero() {
        None
    } else {
        Some(slope)
    }
}

fn is_variable(expr: &Expr, var: &str) -> bool {
    matches!(expr, Expr::Var(name) if name == var)
}

/// Highest power of x the by-parts rules expand.
pub const MAX_BY_PARTS_POWER: i32 = 64;

/// Extract n from x^n with integer |n| <= MAX_BY_PARTS_POWER; a bare x counts as n = 1
fn integer_power_of(poly: &Expr, var: &str) -> Option<i32> {
    match poly {
        Expr::Var(x) if x == var => Some(1),
        Expr::Pow(base, exp) => match exp.as_ref() {
            Expr::Const(power)
                if is_variable(base, var)
                    && power.fract() == 0.0
                    && power.abs() <= MAX_BY_PARTS_POWER as f64 =>
            {
                Some(*power as i32)
            }
            _ => None,
        },
        _ => None,
    }
}

/// Handle x^n * exp(ax + b) with a non-negative integer n
fn integrate_polynomial_times_exponential(poly: &Expr, exp: &Expr, var: &str) -> Option<Expr> {
    let Expr::Exp(exp_inner) = exp else {
        return None;
    };
    let n = integer_power_of(poly, var).filter(|n| *n >= 0)?;
    let a = linear_slope(exp_inner, var)?.as_const()?;
    Some(integrate_xn_times_exp_ax(n, a, exp, var))
}

/// Integrate x^n * e^u, u = ax + b, in closed form
/// ∫ x^n * e^u dx = e^u * Σ_k (-1)^k * n!/(n-k)! * x^(n-k) / a^(k+1),  k = 0..n
fn integrate_xn_times_exp_ax(n: i32, a: f64, exp_u: &Expr, var: &str) -> Expr {
    let x = Expr::Var(var.to_string());
    let mut coefficient = 1.0 / a;
    let mut polynomial = Expr::Const(coefficient) * x.clone().pow(Expr::Const(n as f64));
    for k in 1..=n {
        coefficient *= -((n - k + 1) as f64) / a;
        let term = Expr::Const(coefficient) * x.clone().pow(Expr::Const((n - k) as f64));
        polynomial = polynomial + term;
    }
    polynomial * exp_u.clone()
}

/// Integrate x^n * ln(x) using integration by parts
/// ∫ x^n * ln(x) dx = x^(n+1) * [ln(x)/(n+1) - 1/(n+1)²]
fn integrate_xn_times_ln_x(n: i32, var: &str) -> Expr {
    let x = Expr::Var(var.to_string());
    if n == -1 {
        // ∫ ln(x)/x dx = (ln(x))²/2
        return x.ln().pow(Expr::Const(2.0)) / Expr::Const(2.0);
    }
    let n_plus_1 = (n + 1) as f64;
    let term1 = x.clone().ln() / Expr::Const(n_plus_1);
    let term2 = Expr::Const(1.0 / (n_plus_1 * n_plus_1));
    x.pow(Expr::Const(n_plus_1)) * (term1 - term2)
}
