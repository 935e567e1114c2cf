#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// a module turns a String expression into a symbolic expression
///
///# Example
/// ```
/// use RustedEuler::symbolic::symbolic_engine::Expr;
/// let input = "x^2*exp(-x) + ln(x)";
/// let parsed_expression = Expr::parse_expression(input).unwrap();
/// println!(" parsed_expression {}", parsed_expression);
/// assert!(Expr::parse_expression("x +").is_err());
///  ```
/// ________________________________________________________________________________________________________________________________
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// a module
/// 1) holds the symbolic expression tree and its operator overloads
/// 2) substitutes variables and numbers
/// 3) turns a symbolic expression into a string expression for printing and re-parsing
///# Example#
/// ```
/// use RustedEuler::symbolic::symbolic_engine::Expr;
/// let x = Expr::Var("x".to_string());
/// let f = x.clone().pow(Expr::Const(2.0)) / Expr::Const(2.0) + Expr::Const(1.0);
/// assert_eq!(f.to_string(), "x^2/2 + 1");
/// assert_eq!(f.set_variable("x", 2.0).simplify(), Expr::Const(3.0));
/// ```
/// ________________________________________________________________________________________________________________________________________________
pub mod symbolic_engine;
/// symbolic derivatives
/// ```
/// use RustedEuler::symbolic::symbolic_engine::Expr;
/// let f = Expr::parse_expression("sin(x)*x").unwrap();
/// let df_dx = f.diff("x").simplify();
/// println!("df_dx = {}", df_dx);
/// ```
pub mod symbolic_engine_derivatives;
/// algebraic simplification: constant folding, neutral elements, like terms
pub mod symbolic_simplify;
///________________________________________________________________________________________________________________________________________________
/// # Symbolic integration
/// antiderivatives of elementary functions of a linear argument, polynomials, products with
/// exponents and logarithms, ratios of the form f'/f. Anything else is an error.
///# Example#
/// ```
/// use RustedEuler::symbolic::symbolic_engine::Expr;
/// let f = Expr::parse_expression("x^2*exp(-x)").unwrap();
/// let F = f.integrate("x").unwrap();
/// println!("F = {}", F);
/// assert!(Expr::parse_expression("exp(x^2)").unwrap().integrate("x").is_err());
/// ```
pub mod symbolic_integration;
/// evaluate an expression string at a value of one variable, numbers only
pub mod symbolic_evaluator;
/// exact solution of y' = f(x), y(x0) = y0 with the integration constant resolved
pub mod exact_solution;
