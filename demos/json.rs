//! A JSON parser built on top of [`serde_json::Value`], demonstrating
//! [`recursive`] for the two mutually-recursive productions (`array` and
//! `object` both contain `value`, and vice versa) plus
//! [`sep_by`](parsel::combinator::sep_by) for comma-separated lists.
//!
//! This is a demo, not a conformance suite: it accepts the common subset
//! of JSON (objects, arrays, strings, numbers, booleans, null) without
//! surrogate-pair or exponent-notation escaping.

use serde_json::{Map, Number, Value};

use parsel::combinator::sep_by;
use parsel::parser::Parser;
use parsel::primitive::{char, digit, satisfy, string, whitespace};
use parsel::recursive::recursive;
use parsel::{choice, Stream};

fn lexeme<'a, T: 'a>(p: Parser<'a, T>) -> Parser<'a, T> {
    p.then_ignore(whitespace().many())
}

fn sym<'a>(c: char) -> Parser<'a, char> {
    lexeme(char(c))
}

fn json_string<'a>() -> Parser<'a, String> {
    let escape = char('\\').then(
        satisfy("an escape code", |c| "\"\\/bfnrtu".contains(c)).map(|c| match c {
            'b' => '\u{8}',
            'f' => '\u{c}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            other => other,
        }),
    );
    let plain_char = satisfy("a character other than '\"' or '\\'", |c| c != '"' && c != '\\');
    let content = choice![escape, plain_char]
        .many()
        .map(|cs| cs.into_iter().collect::<String>());
    lexeme(content.between(char('"'), char('"')))
}

fn json_number<'a>() -> Parser<'a, Number> {
    let sign = char('-').optional().map(|m| m.is_some());
    let digits = digit().map(|c| c.to_string()).at_least_one();
    let fraction = char('.').then(digits.clone()).map(|d| format!(".{d}"));
    let integer_part = sign
        .bind(move |negative| digits.clone().map(move |d| if negative { format!("-{d}") } else { d }));
    let full = integer_part.bind(move |int_part| {
        fraction
            .clone()
            .optional()
            .map(move |frac| format!("{int_part}{}", frac.unwrap_or_default()))
    });
    lexeme(full).map(|text| {
        if text.contains('.') {
            Number::from_f64(text.parse().expect("validated float syntax")).expect("finite float")
        } else {
            Number::from(text.parse::<i64>().expect("validated integer syntax"))
        }
    })
}

fn json_bool<'a>() -> Parser<'a, bool> {
    choice![
        lexeme(string("true")).map(|_| true),
        lexeme(string("false")).map(|_| false),
    ]
}

fn json_null<'a>() -> Parser<'a, ()> {
    lexeme(string("null")).map(|_| ())
}

fn json_array<'a>(value: Parser<'a, Value>) -> Parser<'a, Value> {
    sep_by(sym(','), value)
        .between(sym('['), sym(']'))
        .map(Value::Array)
}

fn json_object<'a>(value: Parser<'a, Value>) -> Parser<'a, Value> {
    let entry = json_string().then_ignore(sym(':')).bind(move |key| value.clone().map(move |v| (key.clone(), v)));
    sep_by(sym(','), entry)
        .between(sym('{'), sym('}'))
        .map(|entries| Value::Object(entries.into_iter().collect::<Map<String, Value>>()))
}

/// A parser for any JSON value.
pub fn json_value<'a>() -> Parser<'a, Value> {
    recursive(|value| {
        choice![
            json_null().map(|_| Value::Null),
            json_bool().map(Value::Bool),
            json_number().map(Value::Number),
            json_string().map(Value::String),
            json_array(value.clone()),
            json_object(value),
        ]
    })
}

fn main() {
    let inputs = [
        r#"null"#,
        r#"true"#,
        r#"[1, 2.5, "three", [4, 5], {"six": 6, "seven": [7, false]}]"#,
        r#"{"broken": }"#,
    ];

    let parser = whitespace().many().then(json_value());
    for input in inputs {
        match parser.run(Stream::new(input)) {
            success if success.is_success() => {
                println!("{input}\n  => {}\n", success.value());
            }
            failure => println!("{input}\n  => {failure}\n"),
        }
    }
}
