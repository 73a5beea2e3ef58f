//! A small, composable parser combinator core.
//!
//! A [`Parser<T>`](parser::Parser) is a value: a labelled, re-runnable
//! function from a [`Stream`](stream::Stream) to a
//! [`ParseResult<T>`](result::ParseResult). Grammars are built by
//! combining small parsers: [`primitive`] supplies the atoms (`char`,
//! `satisfy`, `eof`, ...), [`combinator`] supplies the algebra (`map`,
//! `bind`, `either`, `many`, `sepBy`, ...), and [`recursive`] lets a
//! grammar rule refer to itself.
//!
//! ```
//! use parsel::parser::Parser;
//! use parsel::primitive::{char, digit};
//!
//! let digits = digit().some().map(|cs| cs.into_iter().collect::<String>());
//! let result = digits.run(parsel::stream::Stream::new("123abc"));
//! assert_eq!(result.value(), "123");
//! ```

pub mod combinator;
pub mod error;
pub mod parser;
pub mod position;
pub mod primitive;
pub mod recursive;
pub mod result;
pub mod stream;

pub use parser::Parser;
pub use position::Position;
pub use recursive::recursive;
pub use result::{Monoid, ParseResult};
pub use stream::Stream;

/// Tries each parser in order, returning from the first one that
/// succeeds. Equivalent to chaining them with [`Parser::or`], and to
/// calling [`combinator::any`] on the same list.
///
/// ```
/// use parsel::choice;
/// use parsel::parser::Parser;
/// use parsel::primitive::char;
///
/// let p = choice![char('x'), char('y'), char('z')];
/// assert_eq!(p.run(parsel::stream::Stream::new("z1")).value(), 'z');
/// ```
#[macro_export]
macro_rules! choice {
    ($head:expr $(,)?) => {
        $head
    };
    ($head:expr, $($tail:expr),+ $(,)*) => {
        $head.or($crate::choice!($($tail),+))
    };
}
