use lispy::ast::{Node, NumberType};
use lispy::evaluator::{EvalError, Value, evaluate};
use lispy::parser::{parse, parse_expression};
use lispy::{Error, ParseErrorKind, run};

fn eval_line(line: &str) -> Value {
    match parse(line) {
        Ok(tree) => evaluate(&tree),
        Err(e) => panic!("unexpected parse error for '{line}': {e}"),
    }
}

fn eval_expression(text: &str) -> Value {
    match parse_expression(text) {
        Ok(tree) => evaluate(&tree),
        Err(e) => panic!("unexpected parse error for '{text}': {e}"),
    }
}

const SAMPLES: [NumberType; 12] = [
    0,
    1,
    -1,
    2,
    -3,
    7,
    -10,
    42,
    1000,
    -65536,
    123_456_789,
    -987_654_321,
];

#[test]
fn arithmetic_matches_integer_semantics() {
    for a in SAMPLES {
        for b in SAMPLES {
            assert_eq!(eval_expression(&format!("(+ {a} {b})")), Value::Number(a + b));
            assert_eq!(eval_expression(&format!("(- {a} {b})")), Value::Number(a - b));
            assert_eq!(eval_expression(&format!("(* {a} {b})")), Value::Number(a * b));
            assert_eq!(eval_expression(&format!("(min {a} {b})")), Value::Number(a.min(b)));
            assert_eq!(eval_expression(&format!("(max {a} {b})")), Value::Number(a.max(b)));

            if b == 0 {
                assert_eq!(
                    eval_expression(&format!("(/ {a} {b})")),
                    Value::Error(EvalError::DivideByZero)
                );
                assert_eq!(
                    eval_expression(&format!("(% {a} {b})")),
                    Value::Error(EvalError::DivideByZero)
                );
            } else {
                assert_eq!(eval_expression(&format!("(/ {a} {b})")), Value::Number(a / b));
                assert_eq!(eval_expression(&format!("(% {a} {b})")), Value::Number(a % b));
            }
        }
    }
}

#[test]
fn top_level_and_nested_forms_agree() {
    let cases = [
        "+ 1 2",
        "- 5",
        "max 3 (pow 2 3) 5",
        "/ 7 0",
        "mod 17 (sub 10 5)",
    ];
    for line in cases {
        let tree = parse(line).unwrap_or_else(|e| panic!("{line}: {e}"));
        assert_eq!(eval_expression(&format!("({line})")), evaluate(&tree), "{line}");
        assert_eq!(eval_expression(&tree.to_string()), evaluate(&tree), "{line}");
    }
}

#[test]
fn documented_examples() {
    assert_eq!(eval_line("- 5"), Value::Number(-5));
    assert_eq!(eval_line("min 3 7"), Value::Number(3));
    assert_eq!(eval_line("max 3 7"), Value::Number(7));
    assert_eq!(eval_line("add 2 3"), eval_line("+ 2 3"));
    assert_eq!(eval_line("add 2 3"), Value::Number(5));
    assert_eq!(eval_line("+ 1 2 3 4"), Value::Number(10));
    assert_eq!(eval_line("^ 2 10"), Value::Number(1024));
    assert_eq!(
        eval_line("+ 1 (/ 1 0)"),
        Value::Error(EvalError::DivideByZero)
    );
}

#[test]
fn syntax_errors_never_reach_the_evaluator() {
    let cases = [
        ("(+ 1", ParseErrorKind::InvalidSyntax),
        ("+ 1 (+ 1", ParseErrorKind::Incomplete),
        ("+ 1 2)", ParseErrorKind::TrailingContent),
        ("", ParseErrorKind::Incomplete),
        ("+", ParseErrorKind::Incomplete),
        ("1 + 2", ParseErrorKind::InvalidSyntax),
        ("+ 1 (2)", ParseErrorKind::InvalidSyntax),
    ];
    for (line, kind) in cases {
        match run(line) {
            Err(Error::Parse(e)) => {
                assert_eq!(e.kind, kind, "{line:?}: {e}");
                assert!(!e.message.is_empty());
            }
            other => panic!("{line:?}: expected a syntax error, got {other:?}"),
        }
    }
}

#[test]
fn session_continues_after_errors() {
    // Each line is independent: errors on one line leave the next unaffected
    let session = [
        ("+ 1 (+ 1", None),
        ("/ 1 0", Some(Err(EvalError::DivideByZero))),
        ("+ 99999999999999999999", Some(Err(EvalError::BadNumber))),
        ("* 6 7", Some(Ok(42))),
    ];
    for (line, expected) in session {
        match (run(line), expected) {
            (Err(Error::Parse(_)), None) => {}
            (Ok(n), Some(Ok(m))) => assert_eq!(n, m, "{line}"),
            (Err(Error::Eval(e)), Some(Err(expected))) => assert_eq!(e, expected, "{line}"),
            (other, _) => panic!("{line:?}: unexpected {other:?}"),
        }
    }
}

#[test]
fn error_messages() {
    let message = |line: &str| eval_line(line).to_string();
    assert_eq!(message("/ 1 0"), "Attempted to divide by zero");
    assert_eq!(message("+ 1 99999999999999999999"), "Invalid Number");
    assert_eq!(
        evaluate(&Node::Expression(vec![
            Node::Operator("rem".into()),
            Node::Number("1".into()),
        ]))
        .to_string(),
        "Invalid Operator"
    );
    assert_eq!(message("* -6 7"), "-42");
}

#[test]
fn deep_nesting_is_bounded() {
    let depth = lispy::MAX_PARSE_DEPTH;
    let line = format!("+ {}1{}", "(+ 1 ".repeat(depth), ")".repeat(depth));
    assert_eq!(run(&line), Ok(depth as NumberType + 1));

    let line = format!("+ {}1{}", "(+ 1 ".repeat(depth + 1), ")".repeat(depth + 1));
    match run(&line) {
        Err(Error::Parse(e)) => assert_eq!(e.kind, ParseErrorKind::TooDeeplyNested),
        other => panic!("expected depth error, got {other:?}"),
    }
}
