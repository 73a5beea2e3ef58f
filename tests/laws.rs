//! Property-based checks of the algebraic laws the combinator set is
//! supposed to satisfy, independent of any one grammar.

use proptest::prelude::*;

use parsel::combinator::{either, sep_by};
use parsel::primitive::{anychar, char, fail, pure};
use parsel::stream::Stream;

fn ascii_input() -> impl Strategy<Value = String> {
    "[a-z]{0,12}"
}

proptest! {
    #[test]
    fn functor_identity(s in ascii_input()) {
        let plain = anychar();
        let mapped = anychar().map(|c| c);
        prop_assert_eq!(plain.run(Stream::new(&s)), mapped.run(Stream::new(&s)));
    }

    #[test]
    fn functor_composition(s in ascii_input()) {
        let f = |c: char| c.to_ascii_uppercase();
        let g = |c: char| (c as u32) + 1;
        let composed = anychar().map(move |c| g(f(c)));
        let chained = anychar().map(f).map(g);
        prop_assert_eq!(composed.run(Stream::new(&s)), chained.run(Stream::new(&s)));
    }

    #[test]
    fn monad_left_identity(n in any::<i32>(), s in ascii_input()) {
        let k = move |x: i32| pure(x + 1);
        let lhs = pure(n).bind(k);
        let rhs = k(n);
        prop_assert_eq!(lhs.run(Stream::new(&s)), rhs.run(Stream::new(&s)));
    }

    #[test]
    fn monad_right_identity(s in ascii_input()) {
        let p = anychar();
        let lhs = p.bind(pure);
        prop_assert_eq!(lhs.run(Stream::new(&s)), p.run(Stream::new(&s)));
    }

    #[test]
    fn monad_associativity(s in ascii_input()) {
        let f = |c: char| pure(c.to_ascii_uppercase());
        let g = |c: char| pure((c as u32, c));
        let p = anychar();
        let lhs = p.bind(f).bind(g);
        let rhs = p.bind(move |c| f(c).bind(g));
        prop_assert_eq!(lhs.run(Stream::new(&s)), rhs.run(Stream::new(&s)));
    }

    #[test]
    fn alternative_left_zero(s in ascii_input()) {
        let p = anychar();
        let lhs = either(fail::<char>("never"), p.clone());
        prop_assert_eq!(lhs.run(Stream::new(&s)).is_success(), p.run(Stream::new(&s)).is_success());
    }

    #[test]
    fn backtracking_discards_partial_consumption_of_the_failed_branch(s in "[ab]{1,8}") {
        let greedy = char('a').then(char('z'));
        let fallback = char('a');
        let p = either(greedy, fallback);
        let direct = char('a');
        prop_assert_eq!(p.run(Stream::new(&s)), direct.run(Stream::new(&s)));
    }

    #[test]
    fn many_and_some_agree_when_some_succeeds(s in "a{1,10}b{0,5}") {
        let many_result = char('a').many().run(Stream::new(&s));
        let some_result = char('a').some().run(Stream::new(&s));
        prop_assert!(some_result.is_success());
        prop_assert_eq!(many_result.value(), some_result.value());
    }

    #[test]
    fn sep_by_never_fails(s in "[a,]{0,12}") {
        let p = sep_by(char(','), char('a'));
        prop_assert!(p.run(Stream::new(&s)).is_success());
    }

    #[test]
    fn label_is_attached_only_to_failures(s in ascii_input()) {
        let labelled = char('q').with_label("the letter q");
        match labelled.run(Stream::new(&s)) {
            parsel::ParseResult::Failure { expected, .. } => {
                prop_assert_eq!(expected, "the letter q");
            }
            parsel::ParseResult::Success { .. } => {}
        }
    }

    #[test]
    fn not_followed_by_never_consumes(s in ascii_input()) {
        let input = Stream::new(&s);
        let p = char('a').not_followed_by();
        match p.run(input) {
            parsel::ParseResult::Success { remaining, .. } => prop_assert_eq!(remaining, input),
            parsel::ParseResult::Failure { .. } => {}
        }
    }
}
