//! # Symbolic Engine Module
//!
//! Core expression tree used by the differential-equation toolkit. A user types a
//! right-hand side like `x^2*exp(-x)`; it is parsed into an [`Expr`], integrated,
//! simplified and evaluated entirely through the methods attached to this enum.
//!
//! ## Main Structures and Methods
//!
//! ### `Expr` Enum
//! - **Variables**: `Var(String)` - free symbols like "x", "k"
//! - **Constants**: `Const(f64)` - numerical constants
//! - **Operations**: `Add`, `Sub`, `Mul`, `Div`, `Pow`
//! - **Functions**: `Exp`, `Ln`, `sin`, `cos`, `tg`, `ctg`, `arcsin`, `arccos`, `arctg`, `arcctg`
//!
//! ### Key Methods
//! - `set_variable()` - substitute a numeral for a variable
//! - `substitute_variable()` - substitute an expression for a variable
//! - `contains_variable()` - dependency check used by the integrator
//! - `Display` - prints surface syntax that `parse_expression_func` reads back
//!
//! Trigonometric variants keep the mathematical notation `tg`/`ctg`/`arctg`/`arcctg`,
//! the printer emits the parser-friendly names `tan`/`cot`/`atan`/`acot`.

#![allow(non_camel_case_types)]

use std::fmt;

/// Abstract syntax tree of a symbolic expression.
///
/// # Examples
/// ```rust, ignore
/// let x = Expr::Var("x".to_string());
/// let expr = Expr::Add(Box::new(x), Box::new(Expr::Const(2.0)));
/// assert_eq!(expr.to_string(), "x + 2");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Symbolic variable with a name (e.g., "x", "y", "velocity")
    Var(String),
    /// Numerical constant value
    Const(f64),
    /// left + right
    Add(Box<Expr>, Box<Expr>),
    /// left - right
    Sub(Box<Expr>, Box<Expr>),
    /// left * right
    Mul(Box<Expr>, Box<Expr>),
    /// left / right
    Div(Box<Expr>, Box<Expr>),
    /// base ^ exponent
    Pow(Box<Expr>, Box<Expr>),
    /// e^x
    Exp(Box<Expr>),
    /// natural logarithm
    Ln(Box<Expr>),
    sin(Box<Expr>),
    cos(Box<Expr>),
    /// tangent
    tg(Box<Expr>),
    /// cotangent
    ctg(Box<Expr>),
    arcsin(Box<Expr>),
    arccos(Box<Expr>),
    /// arctangent
    arctg(Box<Expr>),
    /// arccotangent
    arcctg(Box<Expr>),
}

// precedence levels used by the printer
const PREC_SUM: u8 = 1;
const PREC_PRODUCT: u8 = 2;
const PREC_UNARY: u8 = 3;
const PREC_POWER: u8 = 4;
const PREC_ATOM: u8 = 5;

impl Expr {
    fn precedence(&self) -> u8 {
        match self {
            Expr::Const(val) if val.is_sign_negative() && *val != 0.0 => PREC_SUM,
            Expr::Var(_) | Expr::Const(_) => PREC_ATOM,
            Expr::Add(..) | Expr::Sub(..) => PREC_SUM,
            Expr::Mul(lhs, _) if lhs.is_minus_one() => PREC_UNARY,
            Expr::Mul(..) | Expr::Div(..) => PREC_PRODUCT,
            Expr::Pow(..) => PREC_POWER,
            _ => PREC_ATOM,
        }
    }

    /// writes `self`, wrapping it in brackets when its precedence is below `min_prec`
    fn fmt_at(&self, f: &mut fmt::Formatter, min_prec: u8) -> fmt::Result {
        if self.precedence() < min_prec {
            write!(f, "(")?;
            self.fmt_bare(f)?;
            write!(f, ")")
        } else {
            self.fmt_bare(f)
        }
    }

    fn fmt_bare(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Const(val) => write!(f, "{}", val),
            Expr::Add(lhs, rhs) => {
                lhs.fmt_at(f, PREC_SUM)?;
                match rhs.as_ref() {
                    // a + (-c) is printed as a - c
                    Expr::Const(c) if c.is_sign_negative() && *c != 0.0 => write!(f, " - {}", -c),
                    _ => {
                        write!(f, " + ")?;
                        rhs.fmt_at(f, PREC_SUM)
                    }
                }
            }
            Expr::Sub(lhs, rhs) => {
                lhs.fmt_at(f, PREC_SUM)?;
                write!(f, " - ")?;
                rhs.fmt_at(f, PREC_PRODUCT)
            }
            // (-1)*e is printed as -e
            Expr::Mul(lhs, rhs) if lhs.is_minus_one() => {
                write!(f, "-")?;
                rhs.fmt_at(f, PREC_POWER)
            }
            Expr::Mul(lhs, rhs) => {
                match lhs.as_ref() {
                    // a leading negative literal reads back as the same constant
                    Expr::Const(c) if c.is_sign_negative() && *c != 0.0 => write!(f, "{}", c)?,
                    _ => lhs.fmt_at(f, PREC_PRODUCT)?,
                }
                write!(f, "*")?;
                rhs.fmt_at(f, PREC_POWER)
            }
            Expr::Div(lhs, rhs) => {
                lhs.fmt_at(f, PREC_PRODUCT)?;
                write!(f, "/")?;
                rhs.fmt_at(f, PREC_POWER)
            }
            Expr::Pow(base, exp) => {
                base.fmt_at(f, PREC_ATOM)?;
                write!(f, "^")?;
                exp.fmt_at(f, PREC_POWER)
            }
            Expr::Exp(arg) => write!(f, "exp({})", arg),
            Expr::Ln(arg) => write!(f, "log({})", arg),
            Expr::sin(arg) => write!(f, "sin({})", arg),
            Expr::cos(arg) => write!(f, "cos({})", arg),
            Expr::tg(arg) => write!(f, "tan({})", arg),
            Expr::ctg(arg) => write!(f, "cot({})", arg),
            Expr::arcsin(arg) => write!(f, "arcsin({})", arg),
            Expr::arccos(arg) => write!(f, "arccos({})", arg),
            Expr::arctg(arg) => write!(f, "arctan({})", arg),
            Expr::arcctg(arg) => write!(f, "arccot({})", arg),
        }
    }
}

/// Pretty printing in the same surface syntax the parser accepts.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_bare(f)
    }
}

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Sub(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Mul(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::Div(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::Mul(Box::new(Expr::Const(-1.0)), Box::new(self))
    }
}

impl Expr {
    /// Rebuilds the node with `f` applied to every direct child.
    ///
    /// All the recursive rewrites (substitution, simplification) go through here so
    /// that a new variant only has to be taught to this one match.
    pub fn map_args<F>(&self, mut f: F) -> Expr
    where
        F: FnMut(&Expr) -> Expr,
    {
        match self {
            Expr::Var(_) | Expr::Const(_) => self.clone(),
            Expr::Add(lhs, rhs) => Expr::Add(Box::new(f(lhs)), Box::new(f(rhs))),
            Expr::Sub(lhs, rhs) => Expr::Sub(Box::new(f(lhs)), Box::new(f(rhs))),
            Expr::Mul(lhs, rhs) => Expr::Mul(Box::new(f(lhs)), Box::new(f(rhs))),
            Expr::Div(lhs, rhs) => Expr::Div(Box::new(f(lhs)), Box::new(f(rhs))),
            Expr::Pow(base, exp) => Expr::Pow(Box::new(f(base)), Box::new(f(exp))),
            Expr::Exp(arg) => Expr::Exp(Box::new(f(arg))),
            Expr::Ln(arg) => Expr::Ln(Box::new(f(arg))),
            Expr::sin(arg) => Expr::sin(Box::new(f(arg))),
            Expr::cos(arg) => Expr::cos(Box::new(f(arg))),
            Expr::tg(arg) => Expr::tg(Box::new(f(arg))),
            Expr::ctg(arg) => Expr::ctg(Box::new(f(arg))),
            Expr::arcsin(arg) => Expr::arcsin(Box::new(f(arg))),
            Expr::arccos(arg) => Expr::arccos(Box::new(f(arg))),
            Expr::arctg(arg) => Expr::arctg(Box::new(f(arg))),
            Expr::arcctg(arg) => Expr::arcctg(Box::new(f(arg))),
        }
    }

    /// Direct children of the node, left to right.
    pub fn args(&self) -> Vec<&Expr> {
        match self {
            Expr::Var(_) | Expr::Const(_) => Vec::new(),
            Expr::Add(lhs, rhs)
            | Expr::Sub(lhs, rhs)
            | Expr::Mul(lhs, rhs)
            | Expr::Div(lhs, rhs)
            | Expr::Pow(lhs, rhs) => vec![lhs.as_ref(), rhs.as_ref()],
            Expr::Exp(arg)
            | Expr::Ln(arg)
            | Expr::sin(arg)
            | Expr::cos(arg)
            | Expr::tg(arg)
            | Expr::ctg(arg)
            | Expr::arcsin(arg)
            | Expr::arccos(arg)
            | Expr::arctg(arg)
            | Expr::arcctg(arg) => vec![arg.as_ref()],
        }
    }

    /// Substitutes a variable with a constant value throughout the expression.
    ///
    /// # Arguments
    /// * `var` - Name of the variable to substitute
    /// * `value` - Numerical value to substitute for the variable
    pub fn set_variable(&self, var: &str, value: f64) -> Expr {
        match self {
            Expr::Var(name) if name == var => Expr::Const(value),
            _ => self.map_args(|arg| arg.set_variable(var, value)),
        }
    }

    /// substitute a variable with an expression
    pub fn substitute_variable(&self, var: &str, expr: &Expr) -> Expr {
        match self {
            Expr::Var(name) if name == var => expr.clone(),
            _ => self.map_args(|arg| arg.substitute_variable(var, expr)),
        }
    }

    /// check if the expression contains a variable
    pub fn contains_variable(&self, var_name: &str) -> bool {
        match self {
            Expr::Var(name) => name == var_name,
            _ => self.args().iter().any(|arg| arg.contains_variable(var_name)),
        }
    }

    /// Sorted, deduplicated names of all symbols left in the expression.
    pub fn all_arguments_are_variables(&self) -> Vec<String> {
        let mut vars = Vec::new();
        self.collect_variables(&mut vars);
        vars.sort();
        vars.dedup();
        vars
    }

    fn collect_variables(&self, out: &mut Vec<String>) {
        match self {
            Expr::Var(name) => out.push(name.clone()),
            _ => self.args().iter().for_each(|arg| arg.collect_variables(out)),
        }
    }

    /// Convenience method to wrap expression in Box for recursive structures.
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    /// e^(self)
    pub fn exp(self) -> Expr {
        Expr::Exp(self.boxed())
    }

    /// ln(self)
    pub fn ln(self) -> Expr {
        Expr::Ln(self.boxed())
    }

    /// self^rhs
    pub fn pow(self, rhs: Expr) -> Expr {
        Expr::Pow(self.boxed(), rhs.boxed())
    }

    /// true if expression is Const(0.0)
    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::Const(val) if *val == 0.0)
    }

    /// true if expression is Const(1.0)
    pub fn is_one(&self) -> bool {
        matches!(self, Expr::Const(val) if *val == 1.0)
    }

    fn is_minus_one(&self) -> bool {
        matches!(self, Expr::Const(val) if *val == -1.0)
    }

    /// Numerical value of a constant node, `None` for anything else.
    pub fn as_const(&self) -> Option<f64> {
        match self {
            Expr::Const(val) => Some(*val),
            _ => None,
        }
    }
}
