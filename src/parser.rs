//! An immutable, shareable parser value.

use std::rc::Rc;

use crate::combinator;
use crate::error::Label;
use crate::result::{Monoid, ParseResult};
use crate::stream::Stream;

type RunFn<'a, T> = dyn Fn(Stream<'a>) -> ParseResult<'a, T> + 'a;

/// A labelled, pure function from a [`Stream`] to a [`ParseResult`].
///
/// `Parser`s are values: they can be built, passed around, stored in
/// structs, and run any number of times. Cloning a `Parser` is cheap (an
/// `Rc` clone, not a deep copy of its logic); running the same parser on
/// the same stream twice always yields equal results.
///
/// Every method here mirrors a free function in [`crate::combinator`] (or
/// [`crate::primitive`]) and produces an identical result to calling that
/// free function directly. The method form just reads better at a call
/// site like `digit().many().label("digits")`.
pub struct Parser<'a, T> {
    label: Label,
    run: Rc<RunFn<'a, T>>,
}

// Not `#[derive(Clone)]`: that would add a spurious `T: Clone` bound.
// Cloning a `Parser` only clones the `Rc` pointer to its run function: the
// logic is shared, not the values it produces.
impl<'a, T> Clone for Parser<'a, T> {
    fn clone(&self) -> Self {
        Parser {
            label: self.label.clone(),
            run: Rc::clone(&self.run),
        }
    }
}

impl<'a, T> Parser<'a, T> {
    /// Build a parser from a label and a run function.
    pub fn new(label: impl Into<Label>, run: impl Fn(Stream<'a>) -> ParseResult<'a, T> + 'a) -> Self {
        Parser {
            label: label.into(),
            run: Rc::new(run),
        }
    }

    /// Run this parser against `stream`.
    pub fn run(&self, stream: Stream<'a>) -> ParseResult<'a, T> {
        (self.run)(stream)
    }

    /// This parser's label.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl<'a, T: 'a> Parser<'a, T> {
    /// Relabel only the outermost failure; a successful value is
    /// untouched.
    pub fn with_label(&self, new_label: impl Into<Label>) -> Parser<'a, T> {
        combinator::with_label(self.clone(), new_label)
    }

    /// Apply `f` to this parser's value on success.
    pub fn map<U: 'a>(&self, f: impl Fn(T) -> U + 'a) -> Parser<'a, U> {
        combinator::map(self.clone(), f)
    }

    /// Monadic bind: run this parser, then use its value to build and run
    /// the next one.
    pub fn bind<U: 'a>(&self, k: impl Fn(T) -> Parser<'a, U> + 'a) -> Parser<'a, U> {
        combinator::bind(self.clone(), k)
    }

    /// Try this parser; on failure, backtrack and try `other`.
    pub fn or(&self, other: Parser<'a, T>) -> Parser<'a, T> {
        combinator::either(self.clone(), other)
    }

    /// Run this parser then `other`, keeping `other`'s value.
    pub fn then<U: 'a>(&self, other: Parser<'a, U>) -> Parser<'a, U> {
        combinator::sequence(self.clone(), other)
    }

    /// Run this parser then `other`, keeping this parser's value.
    /// Equivalent to `keepFirst` in spec terms.
    pub fn then_ignore<U: 'a>(&self, other: Parser<'a, U>) -> Parser<'a, T> {
        combinator::keep_first(self.clone(), other)
    }

    /// Zero or more repetitions, collected into a `Vec`.
    pub fn many(&self) -> Parser<'a, Vec<T>> {
        combinator::many(self.clone())
    }

    /// One or more repetitions, collected into a `Vec`.
    pub fn some(&self) -> Parser<'a, Vec<T>> {
        combinator::some(self.clone())
    }

    /// `p` surrounded by `open` and `close`, keeping `p`'s value.
    pub fn between<O: 'a, C: 'a>(&self, open: Parser<'a, O>, close: Parser<'a, C>) -> Parser<'a, T> {
        combinator::between(open, close, self.clone())
    }

    /// Current parser fails iff this parser succeeds, without consuming
    /// input either way.
    pub fn not_followed_by(&self) -> Parser<'a, ()> {
        combinator::not_followed_by(self.clone())
    }
}

impl<'a, T: Clone + 'a> Parser<'a, T> {
    /// Never fails; wraps a match in `Some`, a non-match (no input
    /// consumed) in `None`.
    pub fn optional(&self) -> Parser<'a, Option<T>> {
        combinator::optional(self.clone())
    }

    /// One or more `self`, separated by `sep`.
    pub fn sep_by1<S: 'a>(&self, sep: Parser<'a, S>) -> Parser<'a, Vec<T>> {
        combinator::sep_by1(sep, self.clone())
    }

    /// Zero or more `self`, separated by `sep`. Never fails.
    pub fn sep_by<S: 'a>(&self, sep: Parser<'a, S>) -> Parser<'a, Vec<T>> {
        combinator::sep_by(sep, self.clone())
    }
}

impl<'a, T: Monoid + 'a> Parser<'a, T> {
    /// Run this parser then `other`, combining their values with
    /// [`Monoid::combine`].
    pub fn append(&self, other: Parser<'a, T>) -> Parser<'a, T> {
        combinator::append(self.clone(), other)
    }
}

impl<'a, T: Monoid + Clone + 'a> Parser<'a, T> {
    /// One or more repetitions, combined via the value monoid rather than
    /// collected into a sequence.
    pub fn at_least_one(&self) -> Parser<'a, T> {
        combinator::at_least_one(self.clone())
    }
}

impl<'a, F: 'a, X: 'a, O: 'a> Parser<'a, F>
where
    F: Fn(X) -> O,
{
    /// Applicative apply: run this parser for a function, then `px` for
    /// its argument.
    pub fn apply(&self, px: Parser<'a, X>) -> Parser<'a, O> {
        combinator::apply(self.clone(), px)
    }
}
