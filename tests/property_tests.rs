use std::panic::{catch_unwind, AssertUnwindSafe};

use exprs::{
    errors::errors::ErrorImpl, interpreter::operators::apply_binary,
    interpreter::value::Value, lexer::lexer::tokenize, parse, MK_ENV,
};
use proptest::prelude::*;

fn integer_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<usize>().prop_map(Value::Usize),
        any::<u8>().prop_map(Value::U8),
        any::<u16>().prop_map(Value::U16),
        any::<u32>().prop_map(Value::U32),
        any::<u64>().prop_map(Value::U64),
        any::<isize>().prop_map(Value::Isize),
        any::<i8>().prop_map(Value::I8),
        any::<i16>().prop_map(Value::I16),
        any::<i32>().prop_map(Value::I32),
        any::<i64>().prop_map(Value::I64),
    ]
}

// Finite floats only, NaN never equals itself.
fn numeric_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        integer_value(),
        (-1.0e6_f32..1.0e6_f32).prop_map(Value::F32),
        (-1.0e12_f64..1.0e12_f64).prop_map(Value::F64),
    ]
}

proptest! {
    /// The tokenizer and parser return Ok or Err on any input, never panic.
    #[test]
    fn tokenize_and_parse_do_not_panic(s in "\\PC*") {
        let result = catch_unwind(|| {
            let _ = tokenize(&s);
            let _ = parse(&s);
        });
        prop_assert!(result.is_ok());
    }

    /// Expressions over a small operator alphabet evaluate without an
    /// internal error, whatever they turn out to mean.
    #[test]
    fn eval_does_not_panic(s in "[abc0-9.+\\-*/%<>=!&| ()\\[\\],]{0,40}") {
        if let Ok(program) = parse(&s) {
            let env = MK_ENV! { "a" => 7_i64, "b" => 0.5, "c" => "s" };
            let result = catch_unwind(AssertUnwindSafe(|| program.eval(&env)));
            prop_assert!(result.is_ok());

            if let Ok(Err(error)) = result {
                let is_internal = matches!(error.get_internal_error(), ErrorImpl::InternalError { .. });
                prop_assert!(!is_internal, "{:?} raised {}", s, error);
            }
        }
    }

    #[test]
    fn addition_is_commutative(a in numeric_value(), b in numeric_value()) {
        prop_assert_eq!(apply_binary("+", &a, &b), apply_binary("+", &b, &a));
    }

    #[test]
    fn equality_is_symmetric(a in numeric_value(), b in numeric_value()) {
        prop_assert_eq!(apply_binary("==", &a, &b), apply_binary("==", &b, &a));
    }

    #[test]
    fn evaluation_is_deterministic(x in any::<i64>(), y in -1.0e6_f64..1.0e6_f64) {
        let program = parse("x * 3 - y / 2 > x % 7").unwrap();
        let env = MK_ENV! { "x" => x, "y" => y };

        prop_assert_eq!(program.eval(&env), program.eval(&env));
    }

    /// Integer division truncates before the multiplication runs.
    #[test]
    fn integer_division_truncates_first(x in any::<i64>()) {
        let program = parse("5 / 9 * (x - 32)").unwrap();

        prop_assert_eq!(program.eval(&MK_ENV! { "x" => x }).unwrap(), Value::I64(0));
    }

    #[test]
    fn integer_literals_round_trip(n in 0_i64..=i64::MAX) {
        let program = parse(&n.to_string()).unwrap();

        prop_assert_eq!(program.eval(&MK_ENV! {}).unwrap(), Value::I64(n));
    }
}
