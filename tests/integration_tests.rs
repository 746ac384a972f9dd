//! Integration tests for end-to-end evaluation.
//!
//! These tests verify that the complete pipeline works correctly from
//! expression text through tokenization, parsing and evaluation against an
//! environment.

use std::collections::{BTreeMap, HashMap};

use exprs::{
    errors::errors::{ErrorCategory, ErrorImpl},
    interpreter::value::Value,
    parse, MK_ENV,
};
use pretty_assertions::assert_eq;

fn eval(source: &str, env: &HashMap<String, Value>) -> Value {
    parse(source)
        .unwrap_or_else(|e| panic!("failed to parse {:?}: {}", source, e))
        .eval(env)
        .unwrap_or_else(|e| panic!("failed to evaluate {:?}: {}", source, e))
}

fn eval_error(source: &str, env: &HashMap<String, Value>) -> (ErrorImpl, u32) {
    let error = parse(source).unwrap().eval(env).unwrap_err();
    (error.get_internal_error().clone(), error.get_position().0)
}

fn s(value: &str) -> Value {
    Value::from(value)
}

#[test]
fn test_arithmetic() {
    let cases = [
        ("-1 + -x", MK_ENV! { "x" => 1_isize }, Value::I64(-2)),
        ("-1 - x", MK_ENV! { "x" => 1_isize }, Value::I64(-2)),
        ("1 + x", MK_ENV! { "x" => 1_isize }, Value::I64(2)),
        ("1 - x", MK_ENV! { "x" => 1_isize }, Value::I64(0)),
        ("1.5 * x", MK_ENV! { "x" => 8_isize }, Value::F64(12.0)),
        ("1.5 * x", MK_ENV! { "x" => 2_isize }, Value::F64(3.0)),
        ("a % 3", MK_ENV! { "a" => 100_isize }, Value::I64(1)),
        ("a % 3", MK_ENV! { "a" => -4_isize }, Value::I64(-1)),
        ("greet + name", MK_ENV! { "greet" => "hello,", "name" => " world" }, s("hello, world")),
    ];

    for (source, env, expected) in cases {
        assert_eq!(eval(source, &env), expected, "{}", source);
    }
}

#[test]
fn test_truncation_order() {
    for x in [32_isize, -40, 212] {
        assert_eq!(eval("5 / 9 * (x - 32)", &MK_ENV! { "x" => x }), Value::I64(0));
    }

    assert_eq!(
        eval("5.0 / 9 * (x - 32)", &MK_ENV! { "x" => -40_isize }),
        Value::F64(-40.0)
    );
    assert_eq!(
        eval("5.0 / 9 * (x - 32)", &MK_ENV! { "x" => 212_isize }),
        Value::F64(100.0)
    );
}

#[test]
fn test_logic_and_comparison() {
    let cases = [
        ("!true", MK_ENV! {}, false),
        ("false", MK_ENV! {}, false),
        ("!(a > 0)", MK_ENV! { "a" => 2_isize }, false),
        ("!(a > 0)", MK_ENV! { "a" => -2_isize }, true),
        ("a >= 10", MK_ENV! { "a" => 21_isize }, true),
        ("a >= 10", MK_ENV! { "a" => 8_isize }, false),
        ("a == 10", MK_ENV! { "a" => 10_isize }, true),
        ("a == 10", MK_ENV! { "a" => 12_isize }, false),
        ("a != 10", MK_ENV! { "a" => 12_isize }, true),
        ("a != 10", MK_ENV! { "a" => 10_isize }, false),
        (r#"name == "Tom""#, MK_ENV! { "name" => "Tom" }, true),
        (r#"name == "Tom""#, MK_ENV! { "name" => "Jim" }, false),
        (r#"name != "Tom""#, MK_ENV! { "name" => "Jim" }, true),
        (r#"name != "Tom""#, MK_ENV! { "name" => "Tom" }, false),
        ("2 < (a + b) && (a + b) <= 9", MK_ENV! { "a" => 1_isize, "b" => 5_isize }, true),
        ("2 < (a + b) && (a + b) <= 9", MK_ENV! { "a" => 9_isize, "b" => 8_isize }, false),
        ("2 < (a + b) && (a + b) <= 9", MK_ENV! { "a" => 1_isize, "b" => 1_isize }, false),
        ("2 < a || b < 9", MK_ENV! { "a" => 3_isize, "b" => 10_isize }, true),
        ("2 < a || b < 9", MK_ENV! { "a" => 1_isize, "b" => 10_isize }, false),
        ("2 < a || b < 9", MK_ENV! { "a" => 3_isize, "b" => 8_isize }, true),
        ("a < 10 == b > 6", MK_ENV! { "a" => 1_isize, "b" => 8_isize }, true),
        ("a < 10 == b > 6", MK_ENV! { "a" => 12_isize, "b" => 5_isize }, true),
        ("a < 10 == b > 6", MK_ENV! { "a" => 1_isize, "b" => 5_isize }, false),
        ("a gt 1 AND b le 2", MK_ENV! { "a" => 2_u8, "b" => 2.0_f32 }, true),
    ];

    for (source, env, expected) in cases {
        assert_eq!(eval(source, &env), Value::Bool(expected), "{}", source);
    }
}

#[test]
fn test_membership() {
    let cases = [
        (
            r#"want in [lang, "php"]"#,
            MK_ENV! { "want" => "golang", "lang" => "golang" },
            true,
        ),
        (
            r#"want in [lang, "php"]"#,
            MK_ENV! { "want" => "golang", "lang" => "cpp" },
            false,
        ),
        (
            r#"pron_predict > 0.86 && user_type not_in ["big_v", "org"]"#,
            MK_ENV! { "pron_predict" => 0.97, "user_type" => "normal" },
            true,
        ),
        (
            r#"pron_predict > 0.86 && user_type not_in ["big_v", "org"]"#,
            MK_ENV! { "pron_predict" => 0.97, "user_type" => "big_v" },
            false,
        ),
        (
            r#"pron_predict > 0.86 && user_type not_in ["big_v", "org"]"#,
            MK_ENV! { "pron_predict" => 0.66, "user_type" => "normal" },
            false,
        ),
        ("x in tags", MK_ENV! { "x" => "a", "tags" => vec!["a", "b"] }, true),
        ("x in tags", MK_ENV! { "x" => "a", "tags" => "abc" }, false),
        ("x not_in tags", MK_ENV! { "x" => "a", "tags" => "abc" }, true),
        ("1 in [1.0, 2]", MK_ENV! {}, false),
    ];

    for (source, env, expected) in cases {
        assert_eq!(eval(source, &env), Value::Bool(expected), "{}", source);
    }
}

#[test]
fn test_builtins() {
    assert_eq!(
        eval(
            "sqrt(num / pi)",
            &MK_ENV! { "num" => 87616.0, "pi" => std::f64::consts::PI }
        ),
        Value::F64(167.00011673013586)
    );
    assert_eq!(
        eval("sin(pi / 2)", &MK_ENV! { "pi" => std::f64::consts::PI }),
        Value::F64(1.0)
    );
    assert_eq!(
        eval("pow(x, 3) + pow(y, 3)", &MK_ENV! { "x" => 9.0, "y" => 10.0 }),
        Value::F64(1729.0)
    );
    assert_eq!(eval(r#"len("hello, world!")"#, &MK_ENV! {}), Value::I64(13));
    assert_eq!(eval(r#"lower("GOLANG")"#, &MK_ENV! {}), s("golang"));

    let sentence = "golang is a beautiful language";
    let cases = [
        ("str_index(s, x)", "beautiful", Value::I64(12)),
        ("str_index(s, x)", "rust", Value::I64(-1)),
        ("contains(s, x)", "golang", Value::Bool(true)),
        ("contains(s, x)", "php", Value::Bool(false)),
        ("has_prefix(s, x)", "golang", Value::Bool(true)),
        ("has_prefix(s, x)", "php", Value::Bool(false)),
        ("has_suffix(s, x)", "language", Value::Bool(true)),
        ("has_suffix(s, x)", "beautiful", Value::Bool(false)),
    ];

    for (source, x, expected) in cases {
        let env = MK_ENV! { "s" => sentence, "x" => x };
        assert_eq!(eval(source, &env), expected, "{} with x = {}", source, x);
    }
}

#[test]
fn test_arrays_and_literals() {
    assert_eq!(
        eval(r#"[1, 2.5, "a", 'b', true, x]"#, &MK_ENV! {}),
        Value::Array(vec![
            Value::I64(1),
            Value::F64(2.5),
            s("a"),
            s("b"),
            Value::Bool(true),
            Value::Nil,
        ])
    );
    assert_eq!(eval("[]", &MK_ENV! {}), Value::Array(vec![]));
    assert_eq!(eval("T == true", &MK_ENV! {}), Value::Bool(true));
}

#[test]
fn test_unbound_names_are_nil() {
    assert_eq!(eval("missing", &MK_ENV! {}), Value::Nil);
    assert_eq!(eval("missing == other", &MK_ENV! {}), Value::Bool(true));
    assert_eq!(eval("missing == 0", &MK_ENV! {}), Value::Bool(false));
}

#[test]
fn test_empty_array_is_not_nil() {
    assert_eq!(eval("[] == missing", &MK_ENV! {}), Value::Bool(false));
    assert_eq!(eval("[] != missing", &MK_ENV! {}), Value::Bool(true));
    assert_eq!(eval("[] == []", &MK_ENV! {}), Value::Bool(true));
}

#[test]
fn test_logical_operators_do_not_short_circuit() {
    assert_eq!(
        eval_error("false && !x", &MK_ENV! { "x" => 1_i64 }),
        (
            ErrorImpl::TypeMatchError {
                expected: "bool".to_string(),
                received: "i64".to_string(),
            },
            9
        )
    );
    assert_eq!(
        eval_error("true || 1 / 0", &MK_ENV! {}),
        (
            ErrorImpl::DivisionByZero {
                operator: "/".to_string()
            },
            10
        )
    );
    assert_eq!(
        eval_error("false && 1", &MK_ENV! {}),
        (
            ErrorImpl::InvalidOperation {
                operator: "&&".to_string(),
                left: "bool".to_string(),
                right: "i64".to_string(),
            },
            6
        )
    );
}

#[test]
fn test_evaluation_errors() {
    assert_eq!(
        eval_error("a / 0", &MK_ENV! { "a" => 1_i64 }),
        (
            ErrorImpl::DivisionByZero {
                operator: "/".to_string()
            },
            2
        )
    );
    assert_eq!(
        eval_error("x % 2", &MK_ENV! { "x" => 1.5 }),
        (
            ErrorImpl::InvalidOperation {
                operator: "%".to_string(),
                left: "f64".to_string(),
                right: "i64".to_string(),
            },
            2
        )
    );
    assert_eq!(
        eval_error("print(1)", &MK_ENV! {}),
        (
            ErrorImpl::UnsupportedFunction {
                function: "print".to_string()
            },
            0
        )
    );
    assert_eq!(
        eval_error("name - 1", &MK_ENV! { "name" => "Tom" }).0,
        ErrorImpl::InvalidOperation {
            operator: "-".to_string(),
            left: "string".to_string(),
            right: "i64".to_string(),
        }
    );
}

#[test]
fn test_call_checks_arity_before_arguments() {
    assert_eq!(
        eval_error("pow(1 / 0)", &MK_ENV! {}).0,
        ErrorImpl::MissingArguments {
            function: "pow".to_string(),
            expected: 2,
            received: 1,
        }
    );
    assert_eq!(
        eval_error("len(1 / 0)", &MK_ENV! {}).0,
        ErrorImpl::DivisionByZero {
            operator: "/".to_string()
        }
    );
    assert_eq!(
        eval_error("sqrt(\"4\")", &MK_ENV! {}).0,
        ErrorImpl::ArgumentTypeMatchError {
            function: "sqrt".to_string(),
            expected: "number".to_string(),
            received: "string".to_string(),
        }
    );
}

#[test]
fn test_syntax_errors() {
    for source in ["", "(a + 2", "a +", "a b", "]", "f(1,"] {
        let error = parse(source).unwrap_err();
        assert_eq!(error.get_category(), ErrorCategory::Parse, "{:?}", source);
    }

    let error = parse("a + @").unwrap_err();
    assert_eq!(error.get_category(), ErrorCategory::Lex);
    assert_eq!(error.get_position().0, 4);
}

#[test]
fn test_deep_nesting_is_rejected() {
    // Spawned threads get the default 2 MiB stack.
    let handle = std::thread::spawn(|| {
        let depth = 100_000;
        let sources = [
            format!("{}1{}", "(".repeat(depth), ")".repeat(depth)),
            format!("{}1{}", "[".repeat(depth), "]".repeat(depth)),
            format!("{}1", "-".repeat(depth)),
            format!("{}true", "!".repeat(depth)),
        ];

        sources
            .iter()
            .map(|source| parse(source).map(|_| ()).map_err(|e| e.get_internal_error().clone()))
            .collect::<Vec<_>>()
    });

    for result in handle.join().unwrap() {
        assert!(matches!(result, Err(ErrorImpl::NestingTooDeep { .. })));
    }
}

#[test]
fn test_nesting_within_limit_evaluates() {
    let depth = 100;

    assert_eq!(
        eval(&format!("{}x + 1{}", "(".repeat(depth), ")".repeat(depth)), &MK_ENV! { "x" => 2_i64 }),
        Value::I64(3)
    );
    assert_eq!(eval(&format!("{}1", "-".repeat(depth + 1)), &MK_ENV! {}), Value::I64(-1));
    assert_eq!(
        eval(&format!("{}1", "1 + ".repeat(depth)), &MK_ENV! {}),
        Value::I64(depth as i64 + 1)
    );
}

#[test]
fn test_program_is_reusable() {
    let program = parse("a * 2").unwrap();

    assert_eq!(program.source(), "a * 2");
    assert_eq!(program.eval(&MK_ENV! { "a" => 2_i64 }).unwrap(), Value::I64(4));
    assert_eq!(program.eval(&MK_ENV! { "a" => 1.5 }).unwrap(), Value::F64(3.0));

    let mut ordered = BTreeMap::new();
    ordered.insert("a".to_string(), Value::U8(200));
    assert_eq!(program.eval(&ordered).unwrap(), Value::I64(400));
}

#[test]
fn test_program_evaluates_concurrently() {
    let program = parse("x * x + 1").unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4_i64)
            .map(|x| {
                let program = &program;
                scope.spawn(move || program.eval(&MK_ENV! { "x" => x }).unwrap())
            })
            .collect();

        for (x, handle) in handles.into_iter().enumerate() {
            let x = x as i64;
            assert_eq!(handle.join().unwrap(), Value::I64(x * x + 1));
        }
    });
}
