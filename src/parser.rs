use crate::types::error::{Error, Result};
use crate::types::expression::{BinaryOp, Expr, UnaryOp};
use crate::types::primitive::Primitive;
use pest::Parser;
use pest::iterators::Pair;
use pest::pratt_parser::{Assoc, Op, PrattParser};
use pest_derive::Parser;
use std::sync::LazyLock;

#[derive(Parser)]
#[grammar = "grammar.pest"]
struct ExpressionParser;

// Lowest precedence first.
static PRATT: LazyLock<PrattParser<Rule>> = LazyLock::new(|| {
    PrattParser::new()
        .op(Op::infix(Rule::eq, Assoc::Left) | Op::infix(Rule::ne, Assoc::Left))
        .op(Op::infix(Rule::lt, Assoc::Left) | Op::infix(Rule::le, Assoc::Left) | Op::infix(Rule::gt, Assoc::Left) | Op::infix(Rule::ge, Assoc::Left))
        .op(Op::infix(Rule::add, Assoc::Left) | Op::infix(Rule::sub, Assoc::Left))
        .op(Op::infix(Rule::mul, Assoc::Left) | Op::infix(Rule::div, Assoc::Left) | Op::infix(Rule::rem, Assoc::Left))
        .op(Op::prefix(Rule::plus) | Op::prefix(Rule::neg))
        .op(Op::infix(Rule::pow, Assoc::Right))
});

pub fn parse(input: &str) -> Result<Expr> {
    let mut pairs = ExpressionParser::parse(Rule::program, input).map_err(|e| parse_error(&e.to_string(), "", input))?;
    let program = pairs.next().ok_or_else(|| Error::ParseError("empty input".into()))?;
    build_expr(first_inner(program)?)
}

// Parse an expression that must be terminated by a closing '}' and return
// the parsed Expr along with the number of bytes consumed (including the '}').
pub fn parse_in_braces(input: &str) -> Result<(Expr, usize)> {
    let mut pairs = ExpressionParser::parse(Rule::braced, input).map_err(|e| parse_error(&e.to_string(), " inside interpolation", input))?;
    let braced = pairs.next().ok_or_else(|| Error::ParseError("empty interpolation".into()))?;
    let consumed = braced.as_span().end();
    let expr = build_expr(first_inner(braced)?)?;
    Ok((expr, consumed))
}

fn parse_error(msg: &str, location: &str, input: &str) -> Error {
    let snippet: String = input.chars().take(80).collect();
    let msg = if msg.trim().is_empty() { "parse error" } else { msg };
    Error::ParseError(format!("{}{} (near: '{}')", msg, location, snippet))
}

fn unexpected(rule: Rule) -> Error {
    Error::ParseError(format!("unexpected {:?}", rule))
}

fn first_inner(pair: Pair<'_, Rule>) -> Result<Pair<'_, Rule>> {
    let rule = pair.as_rule();
    pair.into_inner().next().ok_or_else(|| Error::ParseError(format!("empty {:?}", rule)))
}

fn build_expr(pair: Pair<'_, Rule>) -> Result<Expr> {
    PRATT
        .map_primary(build_postfix)
        .map_prefix(|op, rhs| {
            let op = match op.as_rule() {
                Rule::plus => UnaryOp::Plus,
                Rule::neg => UnaryOp::Neg,
                r => return Err(unexpected(r)),
            };
            Ok(Expr::Unary { op, expr: Box::new(rhs?) })
        })
        .map_infix(|lhs, op, rhs| {
            Ok(Expr::Binary {
                op: binary_op(op.as_rule())?,
                left: Box::new(lhs?),
                right: Box::new(rhs?),
            })
        })
        .parse(pair.into_inner())
}

fn binary_op(rule: Rule) -> Result<BinaryOp> {
    Ok(match rule {
        Rule::eq => BinaryOp::Eq,
        Rule::ne => BinaryOp::Ne,
        Rule::lt => BinaryOp::Lt,
        Rule::le => BinaryOp::Le,
        Rule::gt => BinaryOp::Gt,
        Rule::ge => BinaryOp::Ge,
        Rule::add => BinaryOp::Add,
        Rule::sub => BinaryOp::Sub,
        Rule::mul => BinaryOp::Mul,
        Rule::div => BinaryOp::Div,
        Rule::rem => BinaryOp::Mod,
        Rule::pow => BinaryOp::Pow,
        r => return Err(unexpected(r)),
    })
}

fn build_postfix(pair: Pair<'_, Rule>) -> Result<Expr> {
    let mut inner = pair.into_inner();
    let head = inner.next().ok_or_else(|| Error::ParseError("missing operand".into()))?;
    let mut acc = build_primary(head)?;
    for suffix in inner {
        acc = match suffix.as_rule() {
            Rule::member => Expr::Member {
                object: Box::new(acc),
                field: first_inner(suffix)?.as_str().to_string(),
            },
            Rule::index => Expr::Index {
                object: Box::new(acc),
                index: Box::new(build_expr(first_inner(suffix)?)?),
            },
            Rule::call => Expr::Call {
                callee: Box::new(acc),
                args: suffix.into_inner().map(build_expr).collect::<Result<Vec<_>>>()?,
            },
            r => return Err(unexpected(r)),
        };
    }
    Ok(acc)
}

fn build_primary(pair: Pair<'_, Rule>) -> Result<Expr> {
    Ok(match pair.as_rule() {
        Rule::number => {
            let n = pair.as_str().parse::<f64>().map_err(|e| Error::ParseError(format!("{}: '{}'", e, pair.as_str())))?;
            Expr::Literal(Primitive::Number(n))
        }
        Rule::string => Expr::Literal(Primitive::Str(unescape(first_inner(pair)?.as_str()))),
        Rule::boolean => Expr::Literal(Primitive::Bool(pair.as_str() == "true")),
        Rule::null => Expr::Literal(Primitive::Null),
        Rule::undefined => Expr::Literal(Primitive::Undefined),
        Rule::ident => Expr::Var(pair.as_str().to_string()),
        Rule::expr => build_expr(pair)?,
        r => return Err(unexpected(r)),
    })
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            // \\, \', \" and an escaped line break stand for themselves
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(p: impl Into<Primitive>) -> Expr {
        Expr::Literal(p.into())
    }

    fn var(name: &str) -> Expr {
        Expr::Var(name.into())
    }

    fn bin(op: BinaryOp, left: Expr, right: Expr) -> Expr {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    #[test]
    fn parse_literals() {
        assert_eq!(parse("123").unwrap(), lit(123));
        assert_eq!(parse("3.25").unwrap(), lit(3.25));
        assert_eq!(parse("1e3").unwrap(), lit(1000));
        assert_eq!(parse("true").unwrap(), lit(true));
        assert_eq!(parse("false").unwrap(), lit(false));
        assert_eq!(parse("null").unwrap(), Expr::Literal(Primitive::Null));
        assert_eq!(parse("undefined").unwrap(), Expr::Literal(Primitive::Undefined));
        assert_eq!(parse("'hi'").unwrap(), lit("hi"));
        assert_eq!(parse("\"a\\n\\\"b\\\"\"").unwrap(), lit("a\n\"b\""));
        assert_eq!(parse("''").unwrap(), lit(""));
        assert_eq!(parse("// leading comment\n 'ok'").unwrap(), lit("ok"));
    }

    #[test]
    fn keywords_do_not_swallow_identifiers() {
        assert_eq!(parse("trueish").unwrap(), var("trueish"));
        assert_eq!(parse("nullable").unwrap(), var("nullable"));
    }

    #[test]
    fn parse_precedence() {
        assert_eq!(parse("1 + 2 * 3").unwrap(), bin(BinaryOp::Add, lit(1), bin(BinaryOp::Mul, lit(2), lit(3))));
        assert_eq!(parse("a < b == c > d").unwrap(), bin(BinaryOp::Eq, bin(BinaryOp::Lt, var("a"), var("b")), bin(BinaryOp::Gt, var("c"), var("d"))));
        assert_eq!(parse("2 ** 3 ** 2").unwrap(), bin(BinaryOp::Pow, lit(2), bin(BinaryOp::Pow, lit(3), lit(2))));
        assert_eq!(parse("1 - 2 - 3").unwrap(), bin(BinaryOp::Sub, bin(BinaryOp::Sub, lit(1), lit(2)), lit(3)));
        assert_eq!(parse("(1 + 2) % 3").unwrap(), bin(BinaryOp::Mod, bin(BinaryOp::Add, lit(1), lit(2)), lit(3)));
    }

    #[test]
    fn parse_unary() {
        assert_eq!(parse("-x").unwrap(), Expr::Unary { op: UnaryOp::Neg, expr: Box::new(var("x")) });
        assert_eq!(
            parse("1 - -+x").unwrap(),
            bin(
                BinaryOp::Sub,
                lit(1),
                Expr::Unary {
                    op: UnaryOp::Neg,
                    expr: Box::new(Expr::Unary { op: UnaryOp::Plus, expr: Box::new(var("x")) })
                }
            )
        );
    }

    #[test]
    fn parse_postfix_chain() {
        let ast = parse("foo.bar(baz, 1+2)[key].qux").unwrap();
        let call = Expr::Call {
            callee: Box::new(Expr::Member { object: Box::new(var("foo")), field: "bar".into() }),
            args: vec![var("baz"), bin(BinaryOp::Add, lit(1), lit(2))],
        };
        let index = Expr::Index { object: Box::new(call), index: Box::new(var("key")) };
        assert_eq!(ast, Expr::Member { object: Box::new(index), field: "qux".into() });
        assert_eq!(parse("f()").unwrap(), Expr::Call { callee: Box::new(var("f")), args: vec![] });
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(parse("1 +"), Err(Error::ParseError(_))));
        assert!(matches!(parse("'open"), Err(Error::ParseError(_))));
        assert!(matches!(parse("a b"), Err(Error::ParseError(_))));
    }

    #[test]
    fn parse_in_braces_allows_suffix() {
        let (expr, consumed) = parse_in_braces("'A'}-").unwrap();
        assert_eq!(consumed, 4, "consumed should include string and '}}'");
        assert_eq!(expr, lit("A"));

        let (expr, consumed) = parse_in_braces(" 'curly } brace' } done").unwrap();
        assert_eq!(expr, lit("curly } brace"));
        assert_eq!(consumed, 18);
    }

    #[test]
    fn parse_in_braces_requires_closing_brace() {
        match parse_in_braces("1+2") {
            Err(Error::ParseError(msg)) => assert!(msg.contains("inside interpolation"), "{}", msg),
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
