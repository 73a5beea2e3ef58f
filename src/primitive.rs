//! The primitive parsers everything else in this crate is built from.

use crate::parser::Parser;
use crate::result::ParseResult::{Failure, Success};

/// Succeeds without consuming input, always producing a clone of `value`.
/// The identity element of [`bind`](crate::combinator::bind) /
/// [`apply`](crate::combinator::apply).
pub fn pure<'a, T: Clone + 'a>(value: T) -> Parser<'a, T> {
    Parser::new("pure", move |stream| Success {
        value: value.clone(),
        remaining: stream,
    })
}

/// Always fails, without consuming input, reporting `expected` as what was
/// wanted.
pub fn fail<'a, T: 'a>(expected: impl Into<String>) -> Parser<'a, T> {
    let expected = expected.into();
    Parser::new(expected.clone(), move |stream| Failure {
        expected: expected.clone(),
        got: stream.snippet(16),
        position: stream.position(),
    })
}

/// Succeeds without consuming input, producing the empty string. The
/// monoid identity for `String`-typed parsers.
pub fn succeed<'a>() -> Parser<'a, String> {
    pure(String::new())
}

/// Matches a single code point for which `predicate` returns `true`.
/// Label: `label`.
pub fn satisfy<'a>(label: impl Into<String>, predicate: impl Fn(char) -> bool + 'a) -> Parser<'a, char> {
    let label = label.into();
    Parser::new(label.clone(), move |stream| match stream.take1() {
        Some((c, next)) if predicate(c) => Success {
            value: c,
            remaining: next,
        },
        _ => Failure {
            expected: label.clone(),
            got: stream.snippet(16),
            position: stream.position(),
        },
    })
}

/// Matches exactly the code point `expected`. Label: `"'<expected>'"`.
pub fn char<'a>(expected: char) -> Parser<'a, char> {
    satisfy(format!("'{expected}'"), move |c| c == expected)
}

/// Matches any single code point. Fails only at end of input. Label:
/// `"any character"`.
pub fn anychar<'a>() -> Parser<'a, char> {
    satisfy("any character", |_| true)
}

/// Matches an ASCII digit (`'0'..='9'`). Label: `"a digit"`.
pub fn digit<'a>() -> Parser<'a, char> {
    satisfy("a digit", |c| c.is_ascii_digit())
}

/// Matches a Unicode alphabetic character. Label: `"a letter"`.
pub fn letter<'a>() -> Parser<'a, char> {
    satisfy("a letter", |c| c.is_alphabetic())
}

/// Matches a single whitespace code point. Label: `"whitespace"`.
pub fn whitespace<'a>() -> Parser<'a, char> {
    satisfy("whitespace", |c| c.is_whitespace())
}

/// Matches the literal `tag` exactly, or fails without consuming input
/// (partial matches are not retained, this is not a prefix-commit
/// parser). Label: `"'<tag>'"`.
pub fn string<'a>(tag: &'a str) -> Parser<'a, String> {
    Parser::new(format!("'{tag}'"), move |stream| {
        let rest = stream.remaining();
        if rest.starts_with(tag) {
            let mut next = stream;
            for _ in tag.chars() {
                next = next.take1().expect("starts_with guarantees a code point here").1;
            }
            Success {
                value: tag.to_string(),
                remaining: next,
            }
        } else {
            Failure {
                expected: format!("'{tag}'"),
                got: stream.snippet(tag.chars().count().max(1)),
                position: stream.position(),
            }
        }
    })
}

/// Succeeds with `()` only at the end of input; fails, without consuming
/// anything, otherwise. Label: `"end of input"`.
pub fn eof<'a>() -> Parser<'a, ()> {
    Parser::new("end of input", |stream| {
        if stream.is_eof() {
            Success {
                value: (),
                remaining: stream,
            }
        } else {
            Failure {
                expected: "end of input".to_string(),
                got: stream.snippet(16),
                position: stream.position(),
            }
        }
    })
}
