//! The result of running a [`Parser`](crate::parser::Parser): success with
//! a value and the remaining input, or failure with an expectation.

use std::fmt;

use crate::error::{bug, Label, Snippet};
use crate::parser::Parser;
use crate::position::Position;
use crate::stream::Stream;

use ParseResult::{Failure, Success};

/// The capability `append` (and anything built on it: `assemble`,
/// `collect`, `atLeastOne`, `repeat`) needs to combine two successful
/// values. Implemented for string concatenation and sequence
/// concatenation. Calling `append` on a type with no `Monoid` impl is a
/// compile error, not a failure discovered while parsing.
pub trait Monoid {
    /// The identity element.
    fn empty() -> Self;
    /// Combine `self` and `other`, consuming both.
    fn combine(self, other: Self) -> Self;
}

impl Monoid for String {
    fn empty() -> Self {
        String::new()
    }

    fn combine(mut self, other: Self) -> Self {
        self.push_str(&other);
        self
    }
}

impl<T> Monoid for Vec<T> {
    fn empty() -> Self {
        Vec::new()
    }

    fn combine(mut self, mut other: Self) -> Self {
        self.append(&mut other);
        self
    }
}

/// The outcome of running a parser against a [`Stream`].
#[derive(Debug, Clone)]
pub enum ParseResult<'a, T> {
    /// The parser matched; `value` is the parsed output and `remaining`
    /// the unconsumed input.
    Success { value: T, remaining: Stream<'a> },
    /// The parser did not match. `expected` names what would have matched
    /// `got` at `position`.
    Failure {
        expected: Label,
        got: Snippet,
        position: Position,
    },
}

impl<'a, T> ParseResult<'a, T> {
    /// `true` iff this is a `Success`.
    pub fn is_success(&self) -> bool {
        matches!(self, Success { .. })
    }

    /// `true` iff this is a `Failure`.
    pub fn is_failure(&self) -> bool {
        matches!(self, Failure { .. })
    }

    /// The parsed value. Reading `value` from a `Failure` is a programmer
    /// error, not a parse failure, and panics.
    pub fn value(self) -> T {
        match self {
            Success { value, .. } => value,
            Failure { .. } => bug("read `value` from a Failure ParseResult"),
        }
    }

    /// The unconsumed input. Panics if this is a `Failure`.
    pub fn remaining(self) -> Stream<'a> {
        match self {
            Success { remaining, .. } => remaining,
            Failure { .. } => bug("read `remaining` from a Failure ParseResult"),
        }
    }

    /// Applies `f` to the value of a `Success`; identity on a `Failure`.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ParseResult<'a, U> {
        match self {
            Success { value, remaining } => Success {
                value: f(value),
                remaining,
            },
            Failure {
                expected,
                got,
                position,
            } => Failure {
                expected,
                got,
                position,
            },
        }
    }

    /// On success, runs `p` against `remaining`; on failure, propagates the
    /// same failure, retagged to `U`.
    pub fn continue_with<U>(self, p: &Parser<'a, U>) -> ParseResult<'a, U> {
        match self {
            Success { remaining, .. } => p.run(remaining),
            Failure {
                expected,
                got,
                position,
            } => Failure {
                expected,
                got,
                position,
            },
        }
    }
}

impl<'a, T: Monoid> ParseResult<'a, T> {
    /// Both sides must be a success; combines their values with
    /// [`Monoid::combine`]. The result's `remaining` is `other`'s. If
    /// either side is a failure, the first failure wins.
    pub fn append(self, other: ParseResult<'a, T>) -> ParseResult<'a, T> {
        match (self, other) {
            (Success { value: a, .. }, Success { value: b, remaining }) => Success {
                value: a.combine(b),
                remaining,
            },
            (
                Failure {
                    expected,
                    got,
                    position,
                },
                _,
            ) => Failure {
                expected,
                got,
                position,
            },
            (
                _,
                Failure {
                    expected,
                    got,
                    position,
                },
            ) => Failure {
                expected,
                got,
                position,
            },
        }
    }
}

impl<'a, T: PartialEq> PartialEq for ParseResult<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Success {
                    value: v1,
                    remaining: r1,
                },
                Success {
                    value: v2,
                    remaining: r2,
                },
            ) => v1 == v2 && r1 == r2,
            (
                Failure {
                    expected: e1,
                    got: g1,
                    position: p1,
                },
                Failure {
                    expected: e2,
                    got: g2,
                    position: p2,
                },
            ) => e1 == e2 && g1 == g2 && p1 == p2,
            _ => false,
        }
    }
}

impl<'a, T> fmt::Display for ParseResult<'a, T> {
    /// Default textual form for a `Failure`: `"Expected <expected>, got
    /// <got> at line L column C"`. `Success` has no specified rendering
    /// here.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Success { .. } => write!(f, "success"),
            Failure {
                expected,
                got,
                position,
            } => write!(f, "Expected {expected}, got {got} at {position}"),
        }
    }
}
