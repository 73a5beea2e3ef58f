//! The combinator algebra: functions that build a new [`Parser`] out of
//! existing ones. None of these run anything eagerly. Execution only
//! happens when the resulting parser is run against a stream.

use crate::error::bug;
use crate::parser::Parser;
use crate::primitive::{fail, pure};
use crate::result::{Monoid, ParseResult};

use ParseResult::{Failure, Success};

/// Applies `f` to `p`'s value on success; identity on failure. Label:
/// `p`'s label.
pub fn map<'a, T: 'a, U: 'a>(p: Parser<'a, T>, f: impl Fn(T) -> U + 'a) -> Parser<'a, U> {
    let label = p.label().to_string();
    Parser::new(label, move |stream| p.run(stream).map(&f))
}

/// Monadic bind: runs `p`; on success, evaluates `k(value)` to obtain a
/// second parser and runs it on the remaining stream. Label: `p`'s label.
pub fn bind<'a, T: 'a, U: 'a>(p: Parser<'a, T>, k: impl Fn(T) -> Parser<'a, U> + 'a) -> Parser<'a, U> {
    let label = p.label().to_string();
    Parser::new(label, move |stream| match p.run(stream) {
        Success { value, remaining } => k(value).run(remaining),
        Failure {
            expected,
            got,
            position,
        } => Failure {
            expected,
            got,
            position,
        },
    })
}

/// Applicative apply: runs `pf` for a function, then `px` on the
/// remainder, and returns `f(x)`.
pub fn apply<'a, F: 'a, X: 'a, O: 'a>(pf: Parser<'a, F>, px: Parser<'a, X>) -> Parser<'a, O>
where
    F: Fn(X) -> O,
{
    bind(pf, move |f| map(px.clone(), move |x| f(x)))
}

/// Runs `p` then `q`; returns `q`'s value. Equivalent to
/// `bind(p, _ => q)`.
pub fn sequence<'a, T: 'a, U: 'a>(p: Parser<'a, T>, q: Parser<'a, U>) -> Parser<'a, U> {
    let label = p.label().to_string();
    Parser::new(label, move |stream| match p.run(stream) {
        Success { remaining, .. } => q.run(remaining),
        Failure {
            expected,
            got,
            position,
        } => Failure {
            expected,
            got,
            position,
        },
    })
}

/// Runs `p` then `q`; returns `p`'s value.
pub fn keep_first<'a, T: 'a, U: 'a>(p: Parser<'a, T>, q: Parser<'a, U>) -> Parser<'a, T> {
    let label = p.label().to_string();
    Parser::new(label, move |stream| match p.run(stream) {
        Success { value, remaining } => match q.run(remaining) {
            Success { remaining, .. } => Success { value, remaining },
            Failure {
                expected,
                got,
                position,
            } => Failure {
                expected,
                got,
                position,
            },
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
    })
}

/// Alias for [`sequence`]: runs `p` then `q`, returns `q`'s value.
pub fn keep_second<'a, T: 'a, U: 'a>(p: Parser<'a, T>, q: Parser<'a, U>) -> Parser<'a, U> {
    sequence(p, q)
}

/// Runs `p`; on success returns it unchanged. On failure, backtracks to
/// the original input position (discards `p`'s consumption) and runs `q`
/// from there. Label: `"<p-label> or <q-label>"`.
pub fn either<'a, T: 'a>(p: Parser<'a, T>, q: Parser<'a, T>) -> Parser<'a, T> {
    let label = format!("{} or {}", p.label(), q.label());
    Parser::new(label, move |stream| match p.run(stream) {
        Success { value, remaining } => Success { value, remaining },
        Failure { .. } => match q.run(stream) {
            Success { value, remaining } => Success { value, remaining },
            Failure {
                got, position, ..
            } => Failure {
                expected: format!("{} or {}", p.label(), q.label()),
                got,
                position,
            },
        },
    })
}

/// Right fold over [`either`], seeded with `fail("")`, then relabelled to
/// `"p1 or ... or pn"`. Fails only if every branch fails. Calling this
/// with zero parsers is a programmer error.
pub fn any<'a, T: 'a>(parsers: Vec<Parser<'a, T>>) -> Parser<'a, T> {
    if parsers.is_empty() {
        bug("any()/choice!() called with zero parsers");
    }
    let combined_label = parsers
        .iter()
        .map(|p| p.label().to_string())
        .collect::<Vec<_>>()
        .join(" or ");
    let folded = parsers
        .into_iter()
        .rev()
        .fold(fail(String::new()), |acc, p| either(p, acc));
    with_label(folded, combined_label)
}

/// Runs `p` then `q` on the remainder, combining their values via
/// [`Monoid::combine`]. Label: `q`'s label. Fails if either fails.
pub fn append<'a, T: Monoid + 'a>(p: Parser<'a, T>, q: Parser<'a, T>) -> Parser<'a, T> {
    let label = q.label().to_string();
    Parser::new(label, move |stream| match p.run(stream) {
        Success {
            value: v1,
            remaining,
        } => match q.run(remaining) {
            Success {
                value: v2,
                remaining,
            } => Success {
                value: v1.combine(v2),
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
    })
}

/// Left fold of [`append`] over `parsers`. Calling this with zero parsers
/// is a programmer error.
pub fn assemble<'a, T: Monoid + 'a>(parsers: Vec<Parser<'a, T>>) -> Parser<'a, T> {
    let mut iter = parsers.into_iter();
    let first = match iter.next() {
        Some(p) => p,
        None => bug("assemble() called with zero parsers"),
    };
    iter.fold(first, append)
}

/// Wraps each parser's value in a singleton `Vec`, then [`assemble`]s
/// them, yielding an n-element sequence of values.
pub fn collect<'a, T: 'a>(parsers: Vec<Parser<'a, T>>) -> Parser<'a, Vec<T>> {
    let wrapped: Vec<Parser<'a, Vec<T>>> = parsers.into_iter().map(|p| map(p, |v| vec![v])).collect();
    assemble(wrapped)
}

/// Never fails: `either(map(p, Some), pure(None))`.
pub fn optional<'a, T: Clone + 'a>(p: Parser<'a, T>) -> Parser<'a, Option<T>> {
    let label = format!("optional({})", p.label());
    with_label(either(map(p, Some), pure(None)), label)
}

/// Zero or more `p`, collected into a `Vec`. Iterates, does not recurse
/// per repetition, so it is safe over arbitrarily long input. Panics if
/// `p` succeeds without consuming any input (it would otherwise loop
/// forever).
pub fn many<'a, T: 'a>(p: Parser<'a, T>) -> Parser<'a, Vec<T>> {
    let label = format!("many({})", p.label());
    Parser::new(label, move |mut stream| {
        let mut values = Vec::new();
        loop {
            match p.run(stream) {
                Success { value, remaining } => {
                    if remaining.position() == stream.position() {
                        bug("many() applied to a parser that succeeds without consuming input");
                    }
                    values.push(value);
                    stream = remaining;
                }
                Failure { .. } => break,
            }
        }
        Success {
            value: values,
            remaining: stream,
        }
    })
}

/// One or more `p`, collected into a `Vec`. Equivalent to
/// `append(map(p, singleton), many(p))`.
pub fn some<'a, T: 'a>(p: Parser<'a, T>) -> Parser<'a, Vec<T>> {
    append(map(p.clone(), |v| vec![v]), many(p))
}

/// One or more `p`, combined via the value monoid (`T::combine`) rather
/// than collected into a `Vec`. Useful when `T` is itself a sequence type
/// such as `String`. Panics under the same zero-consumption condition as
/// [`many`].
pub fn at_least_one<'a, T: Monoid + 'a>(p: Parser<'a, T>) -> Parser<'a, T> {
    let label = format!("atLeastOne({})", p.label());
    Parser::new(label, move |mut stream| {
        let mut acc: Option<T> = None;
        loop {
            match p.run(stream) {
                Success { value, remaining } => {
                    if remaining.position() == stream.position() {
                        bug("atLeastOne() applied to a parser that succeeds without consuming input");
                    }
                    acc = Some(match acc {
                        Some(a) => a.combine(value),
                        None => value,
                    });
                    stream = remaining;
                }
                Failure {
                    expected,
                    got,
                    position,
                } => {
                    return match acc {
                        Some(value) => Success {
                            value,
                            remaining: stream,
                        },
                        None => Failure {
                            expected,
                            got,
                            position,
                        },
                    };
                }
            }
        }
    })
}

/// Exactly `n` repetitions of `p`, combined via [`append`]. `n` must be at
/// least 1 (zero is a programmer error, not an empty success; use
/// `pure(T::empty())` for that). Label: `"n times <p-label>"`.
pub fn repeat<'a, T: Monoid + 'a>(n: usize, p: Parser<'a, T>) -> Parser<'a, T> {
    if n < 1 {
        bug("repeat(n, _) called with n < 1");
    }
    let label = format!("{n} times {}", p.label());
    let mut parser = p.clone();
    for _ in 1..n {
        parser = append(parser, p.clone());
    }
    with_label(parser, label)
}

/// As [`repeat`], but yields a `Vec` of the `n` values rather than
/// requiring `T: Monoid`.
pub fn repeat_list<'a, T: 'a>(n: usize, p: Parser<'a, T>) -> Parser<'a, Vec<T>> {
    if n < 1 {
        bug("repeatList(n, _) called with n < 1");
    }
    let label = format!("{n} times {}", p.label());
    let mut parser = map(p.clone(), |v| vec![v]);
    for _ in 1..n {
        parser = append(parser, map(p.clone(), |v| vec![v]));
    }
    with_label(parser, label)
}

/// `keepSecond(open, keepFirst(mid, close))`. Label: `"between"`.
pub fn between<'a, O: 'a, C: 'a, T: 'a>(
    open: Parser<'a, O>,
    close: Parser<'a, C>,
    mid: Parser<'a, T>,
) -> Parser<'a, T> {
    with_label(keep_second(open, keep_first(mid, close)), "between")
}

/// One or more `p`, separated by `sep`: `(x : xs)` where `x = p` and
/// `xs = many(sequence(sep, p))`. Label: `"sepBy1"`.
pub fn sep_by1<'a, S: 'a, T: 'a>(sep: Parser<'a, S>, p: Parser<'a, T>) -> Parser<'a, Vec<T>> {
    Parser::new("sepBy1", move |stream| match p.run(stream) {
        Success { value, remaining } => {
            let rest = sequence(sep.clone(), p.clone());
            match many(rest).run(remaining) {
                Success {
                    value: mut xs,
                    remaining,
                } => {
                    let mut values = vec![value];
                    values.append(&mut xs);
                    Success {
                        value: values,
                        remaining,
                    }
                }
                Failure { .. } => unreachable!("many() never fails"),
            }
        }
        Failure {
            expected,
            got,
            position,
        } => Failure {
            expected,
            got,
            position,
        },
    })
}

/// `either(sepBy1(sep, p), pure([]))`. Always succeeds.
pub fn sep_by<'a, S: 'a, T: Clone + 'a>(sep: Parser<'a, S>, p: Parser<'a, T>) -> Parser<'a, Vec<T>> {
    either(sep_by1(sep, p), pure(Vec::new()))
}

/// Runs `p` on the current input without consuming it. Succeeds with `()`
/// iff `p` failed; fails iff `p` succeeded. Label:
/// `"notFollowedBy(<p-label>)"`.
pub fn not_followed_by<'a, T: 'a>(p: Parser<'a, T>) -> Parser<'a, ()> {
    let label = format!("notFollowedBy({})", p.label());
    Parser::new(label.clone(), move |stream| match p.run(stream) {
        Success { .. } => Failure {
            expected: label.clone(),
            got: stream.snippet(16),
            position: stream.position(),
        },
        Failure { .. } => Success {
            value: (),
            remaining: stream,
        },
    })
}

/// Runs `p`; on failure, rewrites `expected` to `new_label` while keeping
/// `got`/`position`. A successful value is untouched.
pub fn with_label<'a, T: 'a>(p: Parser<'a, T>, new_label: impl Into<String>) -> Parser<'a, T> {
    let new_label = new_label.into();
    Parser::new(new_label.clone(), move |stream| match p.run(stream) {
        Success { value, remaining } => Success { value, remaining },
        Failure { got, position, .. } => Failure {
            expected: new_label.clone(),
            got,
            position,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::{anychar, char, eof};
    use crate::stream::Stream;

    #[test]
    fn map_preserves_failure_and_rewraps_success() {
        let p = char('a').map(|c| c.to_ascii_uppercase());
        assert_eq!(p.run(Stream::new("abc")).value(), 'A');
        assert!(p.run(Stream::new("xbc")).is_failure());
    }

    #[test]
    fn sequence_keeps_second_value() {
        let p = sequence(char('a'), char('b'));
        let result = p.run(Stream::new("abc"));
        assert_eq!(result.clone().value(), 'b');
        assert_eq!(result.remaining().remaining(), "c");
    }

    #[test]
    fn keep_first_keeps_first_value_but_consumes_both() {
        let p = keep_first(char('a'), char('b'));
        let result = p.run(Stream::new("abc"));
        assert_eq!(result.clone().value(), 'a');
        assert_eq!(result.remaining().remaining(), "c");
    }

    #[test]
    fn either_backtracks_on_failed_second_char_of_first_branch() {
        let p = either(sequence(char('a'), char('z')), char('a').map(|_| 'Q'));
        let result = p.run(Stream::new("ab"));
        // first branch consumes 'a' then fails on 'z' vs 'b'; either must
        // retry the second branch from the *original* input.
        assert_eq!(result.value(), 'Q');
    }

    #[test]
    fn either_prefers_left_on_success() {
        let p = either(char('b'), char('x'));
        let result = p.run(Stream::new("banana"));
        assert_eq!(result.clone().value(), 'b');
        assert_eq!(result.remaining().remaining(), "anana");
    }

    #[test]
    fn any_requires_at_least_one_parser() {
        let result = std::panic::catch_unwind(|| any::<char>(vec![]));
        assert!(result.is_err());
    }

    #[test]
    fn any_tries_branches_left_to_right() {
        let p = any(vec![char('a'), char('b'), char('c')]);
        assert_eq!(p.run(Stream::new("cde")).value(), 'c');
    }

    #[test]
    fn many_collects_zero_or_more() {
        let p = many(char('a'));
        let result = p.run(Stream::new("aaab"));
        assert_eq!(result.clone().value(), vec!['a', 'a', 'a']);
        assert_eq!(result.remaining().remaining(), "b");
    }

    #[test]
    fn many_never_fails_on_zero_matches() {
        let p = many(char('a'));
        let result = p.run(Stream::new("bbb"));
        assert_eq!(result.value(), Vec::<char>::new());
    }

    #[test]
    #[should_panic(expected = "zero-consumption")]
    fn many_panics_on_zero_consumption_parser() {
        let zero_consuming = crate::primitive::pure('a');
        many(zero_consuming).run(Stream::new("x"));
    }

    #[test]
    fn some_requires_at_least_one_match() {
        let p = some(char('a'));
        assert!(p.run(Stream::new("bbb")).is_failure());
        assert_eq!(p.run(Stream::new("ab")).value(), vec!['a']);
    }

    #[test]
    fn sep_by_always_succeeds() {
        let p = sep_by(char(','), anychar());
        assert_eq!(p.run(Stream::new("")).value(), Vec::<char>::new());
        let result = p.run(Stream::new("a,b,c"));
        assert_eq!(result.clone().value(), vec!['a', 'b', 'c']);
        assert_eq!(result.remaining().remaining(), "");
    }

    #[test]
    fn between_extracts_the_middle() {
        let p = between(char('('), char(')'), char('x'));
        assert_eq!(p.run(Stream::new("(x)")).value(), 'x');
    }

    #[test]
    fn not_followed_by_does_not_consume() {
        let p = not_followed_by(char('x'));
        let input = Stream::new("xyz");
        let result = p.run(input);
        assert!(result.is_failure());
        let p2 = not_followed_by(char('q'));
        let result2 = p2.run(input);
        assert_eq!(result2.remaining(), input);
    }

    #[test]
    fn with_label_rewrites_only_failures() {
        let p = with_label(char('a'), "an 'a'");
        assert_eq!(p.run(Stream::new("a")).value(), 'a');
        match p.run(Stream::new("b")) {
            Failure { expected, .. } => assert_eq!(expected, "an 'a'"),
            Success { .. } => panic!("expected failure"),
        }
    }

    #[test]
    fn repeat_collects_exactly_n_via_string_monoid() {
        let p = repeat(3, char('a').map(|c| c.to_string()));
        let result = p.run(Stream::new("aaab"));
        assert_eq!(result.clone().value(), "aaa");
        assert_eq!(result.remaining().remaining(), "b");
    }

    #[test]
    fn repeat_list_collects_exactly_n_into_a_vec() {
        let p = repeat_list(3, char('a'));
        let result = p.run(Stream::new("aaab"));
        assert_eq!(result.clone().value(), vec!['a', 'a', 'a']);
        assert_eq!(result.remaining().remaining(), "b");
    }

    #[test]
    #[should_panic(expected = "n < 1")]
    fn repeat_rejects_zero() {
        repeat(0, char('a').map(|c| c.to_string()));
    }

    #[test]
    fn optional_never_fails() {
        let p = optional(char('a'));
        assert_eq!(p.run(Stream::new("a")).value(), Some('a'));
        assert_eq!(p.run(Stream::new("b")).value(), None);
    }

    #[test]
    fn eof_succeeds_only_at_end() {
        assert!(eof().run(Stream::new("")).is_success());
        assert!(eof().run(Stream::new("x")).is_failure());
    }
}
