//! A small arithmetic-expression evaluator built from this crate's
//! combinators, showing off [`recursive`] for the one rule (`factor`)
//! that refers back to the top of the grammar.
//!
//! ```text
//! expr   = term (('+' | '-') term)*
//! term   = factor (('*' | '/') factor)*
//! factor = number | '(' expr ')'
//! ```

use parsel::combinator::many;
use parsel::parser::Parser;
use parsel::primitive::{char, digit, whitespace};
use parsel::recursive::recursive;
use parsel::{choice, Stream};

/// `p` with any surrounding whitespace discarded.
fn lexeme<'a, T: 'a>(p: Parser<'a, T>) -> Parser<'a, T> {
    whitespace()
        .many()
        .then(p)
        .then_ignore(whitespace().many())
}

fn sym<'a>(c: char) -> Parser<'a, char> {
    lexeme(char(c))
}

fn number<'a>() -> Parser<'a, f64> {
    lexeme(digit().map(|c| c.to_string()).at_least_one()).map(|digits| {
        digits
            .parse()
            .expect("a non-empty run of ASCII digits always parses as f64")
    })
}

/// Left-folds `first` against zero or more `(operator, operand)` pairs
/// produced by `op` and `operand`, applying `combine` at each step.
/// Shared by `term` (`*`/`/`) and `expr` (`+`/`-`).
fn fold_left<'a>(
    operand: Parser<'a, f64>,
    op: Parser<'a, char>,
    combine: impl Fn(f64, char, f64) -> f64 + Copy + 'a,
) -> Parser<'a, f64> {
    let rest_operand = operand.clone();
    operand.bind(move |first| {
        let operand = rest_operand.clone();
        many(op.clone().bind(move |o| operand.clone().map(move |rhs| (o, rhs)))).map(move |rest| {
            rest.into_iter()
                .fold(first, |acc, (o, rhs)| combine(acc, o, rhs))
        })
    })
}

fn expr<'a>() -> Parser<'a, f64> {
    recursive(|expr| {
        let factor = choice![number(), expr.clone().between(sym('('), sym(')'))];
        let term = fold_left(
            factor,
            choice![sym('*'), sym('/')],
            |acc, op, rhs| if op == '*' { acc * rhs } else { acc / rhs },
        );
        fold_left(term, choice![sym('+'), sym('-')], |acc, op, rhs| {
            if op == '+' {
                acc + rhs
            } else {
                acc - rhs
            }
        })
    })
}

fn main() {
    let inputs = ["1 + 2 * 3", "(1 + 2) * 3", "10 / (2 + 3) - 1", "2 * (3 +"];
    let parser = expr().then_ignore(whitespace().many());

    for input in inputs {
        match parser.run(Stream::new(input)) {
            success if success.is_success() => println!("{input:>20} = {}", success.value()),
            failure => println!("{input:>20} -> {failure}"),
        }
    }
}
