//! a module turns a String expression into a symbolic expression
//!# Example
//! ```
//! use RustedEuler::symbolic::parse_expr::parse_expression_func;
//! let parsed_expression = parse_expression_func("x^2*exp(-x) + log(x + 1)").unwrap();
//! println!(" parsed_expression {}", parsed_expression);
//! ```
//  grammar, lowest precedence first
//      sum     := product (('+' | '-') product)*
//      product := unary (('*' | '/') unary)*
//      unary   := ('-' | '+') unary | power
//      power   := atom ('^' unary)?
//      atom    := number | call | identifier | '(' sum ')'
use crate::symbolic::symbolic_engine::Expr;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, char, digit0, digit1, multispace0, one_of},
    combinator::{map, map_res, opt, recognize},
    multi::many0,
    sequence::{delimited, pair, preceded},
};

/// wraps a parser so that it swallows surrounding whitespace
fn ws<'a, O, P>(inner: P) -> impl Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>
where
    P: Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
{
    delimited(multispace0, inner, multispace0)
}

/// decimal literal with optional fraction and exponent: 12, 1.5, .5, 2e-3
fn parse_number(input: &str) -> IResult<&str, Expr> {
    let mantissa = alt((
        recognize(pair(digit1, opt(pair(char('.'), digit0)))),
        recognize(pair(char('.'), digit1)),
    ));
    let exponent = opt((one_of("eE"), opt(one_of("+-")), digit1));
    map_res(recognize(pair(mantissa, exponent)), |s: &str| {
        s.parse::<f64>().map(Expr::Const)
    })
    .parse(input)
}

fn parse_identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))
    .parse(input)
}

/// maps a function name onto the tree node it builds
fn apply_function(name: &str, arg: Expr) -> Result<Expr, String> {
    let arg = Box::new(arg);
    let expr = match name {
        "exp" => Expr::Exp(arg),
        "log" | "ln" => Expr::Ln(arg),
        "sin" => Expr::sin(arg),
        "cos" => Expr::cos(arg),
        "tan" | "tg" => Expr::tg(arg),
        "cot" | "ctg" => Expr::ctg(arg),
        "arcsin" | "asin" => Expr::arcsin(arg),
        "arccos" | "acos" => Expr::arccos(arg),
        "arctan" | "atan" | "arctg" => Expr::arctg(arg),
        "arccot" | "acot" | "arcctg" => Expr::arcctg(arg),
        "sqrt" => Expr::Pow(arg, Box::new(Expr::Const(0.5))),
        _ => return Err(format!("unknown function '{}'", name)),
    };
    Ok(expr)
}

fn parse_call(input: &str) -> IResult<&str, Expr> {
    map_res(
        pair(
            parse_identifier,
            delimited(ws(char('(')), parse_sum, char(')')),
        ),
        |(name, arg)| apply_function(name, arg),
    )
    .parse(input)
}

fn parse_symbol(input: &str) -> IResult<&str, Expr> {
    map(parse_identifier, |name: &str| match name {
        "pi" => Expr::Const(std::f64::consts::PI),
        _ => Expr::Var(name.to_string()),
    })
    .parse(input)
}

fn parse_atom(input: &str) -> IResult<&str, Expr> {
    ws(alt((
        parse_number,
        parse_call,
        parse_symbol,
        delimited(char('('), parse_sum, char(')')),
    )))
    .parse(input)
}

fn parse_power(input: &str) -> IResult<&str, Expr> {
    let (input, base) = parse_atom(input)?;
    let (input, exponent) = opt(preceded(char('^'), parse_unary)).parse(input)?;
    let expr = match exponent {
        Some(exponent) => Expr::Pow(Box::new(base), Box::new(exponent)),
        None => base,
    };
    Ok((input, expr))
}

fn negate(expr: Expr) -> Expr {
    match expr {
        Expr::Const(val) => Expr::Const(-val),
        other => -other,
    }
}

fn parse_unary(input: &str) -> IResult<&str, Expr> {
    alt((
        map(preceded(ws(char('-')), parse_unary), negate),
        preceded(ws(char('+')), parse_unary),
        parse_power,
    ))
    .parse(input)
}

fn parse_product(input: &str) -> IResult<&str, Expr> {
    let (input, first) = parse_unary(input)?;
    let (input, rest) = many0(pair(ws(one_of("*/")), parse_unary)).parse(input)?;
    let expr = rest.into_iter().fold(first, |acc, (op, rhs)| match op {
        '*' => acc * rhs,
        _ => acc / rhs,
    });
    Ok((input, expr))
}

fn parse_sum(input: &str) -> IResult<&str, Expr> {
    let (input, first) = parse_product(input)?;
    let (input, rest) = many0(pair(ws(one_of("+-")), parse_product)).parse(input)?;
    let expr = rest.into_iter().fold(first, |acc, (op, rhs)| match op {
        '+' => acc + rhs,
        _ => acc - rhs,
    });
    Ok((input, expr))
}

/// Parses a whole expression string. Anything left unconsumed is reported as an error.
pub fn parse_expression_func(input: &str) -> Result<Expr, String> {
    if input.trim().is_empty() {
        return Err("empty expression".to_string());
    }
    match parse_sum(input) {
        Ok(("", expr)) => Ok(expr),
        Ok((rest, _)) => Err(format!(
            "unexpected input '{}' in expression '{}'",
            rest.trim(),
            input
        )),
        Err(e) => Err(format!("cannot parse expression '{}': {}", input, e)),
    }
}

impl Expr {
    /// same as [`parse_expression_func`]
    pub fn parse_expression(input: &str) -> Result<Expr, String> {
        parse_expression_func(input)
    }
}
