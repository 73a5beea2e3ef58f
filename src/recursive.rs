//! Self-referential parsers: grammars where a rule mentions itself (or a
//! rule defined later) directly, e.g. `expr = term | '(' expr ')'`.
//!
//! Building `Parser`s as plain values means a grammar rule can't simply
//! call itself inside its own constructor: there's no value yet to call.
//! [`recursive`] resolves this with an indirection cell: `build` receives
//! a stand-in parser to use for the self-reference, and returns the real
//! grammar once it's fully assembled. The stand-in only ever holds a
//! [`Weak`] pointer into the cell, so the grammar is not kept alive by its
//! own recursive calls. Only the parser returned to the caller owns a
//! strong reference.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::bug;
use crate::parser::Parser;

/// A handle for building a self-referential grammar by hand. Most callers
/// want [`recursive`] instead; this is exposed for grammars that need more
/// control over when the self-reference is handed out versus when the
/// grammar is tied off.
pub struct Recursive<'a, T> {
    cell: Rc<RefCell<Option<Parser<'a, T>>>>,
}

impl<'a, T: 'a> Recursive<'a, T> {
    /// A handle with no grammar installed yet.
    pub fn new() -> Self {
        Recursive {
            cell: Rc::new(RefCell::new(None)),
        }
    }

    /// A self-reference usable inside the grammar under construction.
    /// Holds only a weak pointer into this handle's cell, so grammars
    /// built from it don't leak.
    pub fn forward_ref(&self) -> Parser<'a, T> {
        let weak = Rc::downgrade(&self.cell);
        Parser::new("recursive", move |stream| {
            let strong = weak
                .upgrade()
                .unwrap_or_else(|| bug("recursive self-reference outlived its Recursive handle"));
            let borrowed = strong.borrow();
            match borrowed.as_ref() {
                Some(p) => p.run(stream),
                None => bug("recursive parser run before install() tied off the grammar"),
            }
        })
    }

    /// Ties off the grammar: from now on, running any parser derived from
    /// [`forward_ref`](Self::forward_ref) or [`parser`](Self::parser)
    /// delegates to `actual`. Calling this more than once on the same
    /// handle is a programmer error.
    pub fn install(&self, actual: Parser<'a, T>) {
        let mut slot = self.cell.borrow_mut();
        if slot.is_some() {
            bug("Recursive::install() called more than once on the same handle");
        }
        *slot = Some(actual);
    }

    /// The externally usable parser for this grammar: a strong handle that
    /// keeps the whole grammar alive for as long as it does.
    pub fn parser(&self) -> Parser<'a, T> {
        let cell = Rc::clone(&self.cell);
        Parser::new("recursive", move |stream| {
            let borrowed = cell.borrow();
            match borrowed.as_ref() {
                Some(p) => p.run(stream),
                None => bug("recursive parser run before install() tied off the grammar"),
            }
        })
    }
}

impl<'a, T: 'a> Default for Recursive<'a, T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a self-referential parser in one step: `build` receives a
/// stand-in for the grammar itself (usable anywhere inside the grammar it
/// constructs) and must return the finished grammar built from it.
///
/// ```ignore
/// let balanced = recursive(|expr| {
///     between(char('('), char(')'), expr.clone())
///         .map(|inner| inner + 1)
///         .or(pure(0))
/// });
/// ```
pub fn recursive<'a, T: 'a>(build: impl FnOnce(Parser<'a, T>) -> Parser<'a, T>) -> Parser<'a, T> {
    let rec = Recursive::new();
    let actual = build(rec.forward_ref());
    rec.install(actual);
    rec.parser()
}
