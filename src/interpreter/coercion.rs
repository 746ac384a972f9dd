//! Numeric promotion and the arithmetic/comparison kernels.
//!
//! Binary operators accept any pair of numeric kinds. The operand whose kind
//! ranks lower in [`NumericKind`] is converted to the other operand's kind
//! with an `as` cast, then the operator runs natively at that kind:
//!
//! ```text
//! usize < u8 < u16 < u32 < u64 < isize < i8 < i16 < i32 < i64 < f32 < f64
//! ```
//!
//! Integer arithmetic wraps on overflow and truncates on division.

use std::ops::{Add, Div, Mul, Sub};

use crate::errors::errors::ErrorImpl;

use super::value::Value;

/// The twelve numeric kinds, declared in promotion rank order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NumericKind {
    Usize,
    U8,
    U16,
    U32,
    U64,
    Isize,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
}

impl NumericKind {
    pub const ALL: [NumericKind; 12] = [
        NumericKind::Usize,
        NumericKind::U8,
        NumericKind::U16,
        NumericKind::U32,
        NumericKind::U64,
        NumericKind::Isize,
        NumericKind::I8,
        NumericKind::I16,
        NumericKind::I32,
        NumericKind::I64,
        NumericKind::F32,
        NumericKind::F64,
    ];

    pub fn of(value: &Value) -> Option<NumericKind> {
        match value {
            Value::Usize(_) => Some(NumericKind::Usize),
            Value::U8(_) => Some(NumericKind::U8),
            Value::U16(_) => Some(NumericKind::U16),
            Value::U32(_) => Some(NumericKind::U32),
            Value::U64(_) => Some(NumericKind::U64),
            Value::Isize(_) => Some(NumericKind::Isize),
            Value::I8(_) => Some(NumericKind::I8),
            Value::I16(_) => Some(NumericKind::I16),
            Value::I32(_) => Some(NumericKind::I32),
            Value::I64(_) => Some(NumericKind::I64),
            Value::F32(_) => Some(NumericKind::F32),
            Value::F64(_) => Some(NumericKind::F64),
            Value::String(_) | Value::Bool(_) | Value::Array(_) | Value::Nil => None,
        }
    }

    pub fn rank(self) -> usize {
        self as usize
    }

    pub fn is_float(self) -> bool {
        matches!(self, NumericKind::F32 | NumericKind::F64)
    }
}

macro_rules! cast {
    ($value:expr, $target:ty) => {
        match $value {
            Value::Usize(v) => *v as $target,
            Value::U8(v) => *v as $target,
            Value::U16(v) => *v as $target,
            Value::U32(v) => *v as $target,
            Value::U64(v) => *v as $target,
            Value::Isize(v) => *v as $target,
            Value::I8(v) => *v as $target,
            Value::I16(v) => *v as $target,
            Value::I32(v) => *v as $target,
            Value::I64(v) => *v as $target,
            Value::F32(v) => *v as $target,
            Value::F64(v) => *v as $target,
            Value::String(_) | Value::Bool(_) | Value::Array(_) | Value::Nil => return None,
        }
    };
}

/// Converts a numeric value to `kind`. `None` when `value` is not a number.
pub fn promote(value: &Value, kind: NumericKind) -> Option<Value> {
    Some(match kind {
        NumericKind::Usize => Value::Usize(cast!(value, usize)),
        NumericKind::U8 => Value::U8(cast!(value, u8)),
        NumericKind::U16 => Value::U16(cast!(value, u16)),
        NumericKind::U32 => Value::U32(cast!(value, u32)),
        NumericKind::U64 => Value::U64(cast!(value, u64)),
        NumericKind::Isize => Value::Isize(cast!(value, isize)),
        NumericKind::I8 => Value::I8(cast!(value, i8)),
        NumericKind::I16 => Value::I16(cast!(value, i16)),
        NumericKind::I32 => Value::I32(cast!(value, i32)),
        NumericKind::I64 => Value::I64(cast!(value, i64)),
        NumericKind::F32 => Value::F32(cast!(value, f32)),
        NumericKind::F64 => Value::F64(cast!(value, f64)),
    })
}

/// Brings two numbers to their common kind, the higher ranked of the two.
pub fn promote_pair(left: &Value, right: &Value) -> Option<(Value, Value)> {
    let kind = NumericKind::of(left)?.max(NumericKind::of(right)?);
    Some((promote(left, kind)?, promote(right, kind)?))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl ArithmeticOp {
    pub fn symbol(self) -> &'static str {
        match self {
            ArithmeticOp::Add => "+",
            ArithmeticOp::Sub => "-",
            ArithmeticOp::Mul => "*",
            ArithmeticOp::Div => "/",
            ArithmeticOp::Rem => "%",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Eq,
    Lt,
    Gt,
    Le,
    Ge,
}

impl ComparisonOp {
    pub fn symbol(self) -> &'static str {
        match self {
            ComparisonOp::Eq => "==",
            ComparisonOp::Lt => "<",
            ComparisonOp::Gt => ">",
            ComparisonOp::Le => "<=",
            ComparisonOp::Ge => ">=",
        }
    }
}

pub fn invalid_operation(operator: &str, left: &Value, right: &Value) -> ErrorImpl {
    ErrorImpl::InvalidOperation {
        operator: String::from(operator),
        left: String::from(left.kind_name()),
        right: String::from(right.kind_name()),
    }
}

trait NativeInt: Copy {
    fn arithmetic(op: ArithmeticOp, a: Self, b: Self) -> Result<Self, ErrorImpl>;
}

macro_rules! impl_native_int {
    ($($t:ty),*) => {
        $(
            impl NativeInt for $t {
                fn arithmetic(op: ArithmeticOp, a: Self, b: Self) -> Result<Self, ErrorImpl> {
                    match op {
                        ArithmeticOp::Add => Ok(a.wrapping_add(b)),
                        ArithmeticOp::Sub => Ok(a.wrapping_sub(b)),
                        ArithmeticOp::Mul => Ok(a.wrapping_mul(b)),
                        ArithmeticOp::Div | ArithmeticOp::Rem if b == 0 => {
                            Err(ErrorImpl::DivisionByZero { operator: String::from(op.symbol()) })
                        }
                        ArithmeticOp::Div => Ok(a.wrapping_div(b)),
                        ArithmeticOp::Rem => Ok(a.wrapping_rem(b)),
                    }
                }
            }
        )*
    };
}

impl_native_int!(usize, u8, u16, u32, u64, isize, i8, i16, i32, i64);

// `%` is integer-only, hence `None`.
fn float_arithmetic<T>(op: ArithmeticOp, a: T, b: T) -> Option<T>
where
    T: Add<Output = T> + Sub<Output = T> + Mul<Output = T> + Div<Output = T>,
{
    match op {
        ArithmeticOp::Add => Some(a + b),
        ArithmeticOp::Sub => Some(a - b),
        ArithmeticOp::Mul => Some(a * b),
        ArithmeticOp::Div => Some(a / b),
        ArithmeticOp::Rem => None,
    }
}

fn ordered<T: PartialOrd + ?Sized>(op: ComparisonOp, a: &T, b: &T) -> bool {
    match op {
        ComparisonOp::Eq => a == b,
        ComparisonOp::Lt => a < b,
        ComparisonOp::Gt => a > b,
        ComparisonOp::Le => a <= b,
        ComparisonOp::Ge => a >= b,
    }
}

/// Matches two values already promoted to the same numeric kind, binding the
/// payloads to `$a`/`$b` and the kind's constructor to `$wrap`.
macro_rules! with_same_kind {
    ($left:expr, $right:expr, $a:ident, $b:ident, $wrap:ident,
     int => $int:expr, float => $float:expr, else => $other:expr) => {
        match ($left, $right) {
            (Value::Usize($a), Value::Usize($b)) => { let $wrap = Value::Usize; $int }
            (Value::U8($a), Value::U8($b)) => { let $wrap = Value::U8; $int }
            (Value::U16($a), Value::U16($b)) => { let $wrap = Value::U16; $int }
            (Value::U32($a), Value::U32($b)) => { let $wrap = Value::U32; $int }
            (Value::U64($a), Value::U64($b)) => { let $wrap = Value::U64; $int }
            (Value::Isize($a), Value::Isize($b)) => { let $wrap = Value::Isize; $int }
            (Value::I8($a), Value::I8($b)) => { let $wrap = Value::I8; $int }
            (Value::I16($a), Value::I16($b)) => { let $wrap = Value::I16; $int }
            (Value::I32($a), Value::I32($b)) => { let $wrap = Value::I32; $int }
            (Value::I64($a), Value::I64($b)) => { let $wrap = Value::I64; $int }
            (Value::F32($a), Value::F32($b)) => { let $wrap = Value::F32; $float }
            (Value::F64($a), Value::F64($b)) => { let $wrap = Value::F64; $float }
            _ => $other,
        }
    };
}

/// `+ - * / %` over numbers, plus `+` as string concatenation.
pub fn arithmetic(op: ArithmeticOp, left: &Value, right: &Value) -> Result<Value, ErrorImpl> {
    if let (Value::String(a), Value::String(b)) = (left, right) {
        return match op {
            ArithmeticOp::Add => Ok(Value::String(format!("{}{}", a, b))),
            _ => Err(invalid_operation(op.symbol(), left, right)),
        };
    }

    let (l, r) = promote_pair(left, right).ok_or_else(|| invalid_operation(op.symbol(), left, right))?;

    with_same_kind!(&l, &r, a, b, wrap,
        int => NativeInt::arithmetic(op, *a, *b).map(wrap),
        float => float_arithmetic(op, *a, *b)
            .map(wrap)
            .ok_or_else(|| invalid_operation(op.symbol(), left, right)),
        else => Err(invalid_operation(op.symbol(), left, right))
    )
}

/// `== < > <= >=` over numbers (after promotion) and over string pairs.
pub fn compare(op: ComparisonOp, left: &Value, right: &Value) -> Result<bool, ErrorImpl> {
    if let (Value::String(a), Value::String(b)) = (left, right) {
        return Ok(ordered(op, a.as_str(), b.as_str()));
    }

    let (l, r) = promote_pair(left, right).ok_or_else(|| invalid_operation(op.symbol(), left, right))?;

    with_same_kind!(&l, &r, a, b, _wrap,
        int => Ok(ordered(op, a, b)),
        float => Ok(ordered(op, a, b)),
        else => Err(invalid_operation(op.symbol(), left, right))
    )
}

/// `==` semantics: two nils are equal, numbers compare after promotion,
/// strings by content, anything else by kind-strict structural equality.
/// Never fails.
pub fn equals(left: &Value, right: &Value) -> bool {
    if left.is_nil() && right.is_nil() {
        return true;
    }

    match compare(ComparisonOp::Eq, left, right) {
        Ok(equal) => equal,
        Err(_) => left == right,
    }
}
