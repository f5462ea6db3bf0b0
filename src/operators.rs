//! Operators that consume primitives.
//!
//! Each entry point picks the hint for its context, reduces object operands
//! through the [`Coercer`] and then applies its own primitive rule.

use crate::coercion::Coercer;
use crate::types::error::Result;
use crate::types::hint::CoercionContext;
use crate::types::primitive::Primitive;
use crate::types::value::Value;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationalOp {
    Lt,
    Le,
    Gt,
    Ge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOp {
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

fn primitive(cx: &Coercer, value: &Value, ctx: CoercionContext) -> Result<Primitive> {
    cx.to_primitive(value, ctx.hint())
}

pub fn to_number(cx: &Coercer, value: &Value) -> Result<f64> {
    primitive(cx, value, CoercionContext::ExplicitNumber)?.to_number()
}

/// `String(value)`: symbols are rendered rather than rejected.
pub fn to_string(cx: &Coercer, value: &Value) -> Result<String> {
    match primitive(cx, value, CoercionContext::ExplicitString)? {
        Primitive::Symbol(sym) => Ok(sym.descriptive_string()),
        p => p.to_string_value(),
    }
}

/// Implicit conversion for string interpolation.
pub fn to_output_string(cx: &Coercer, value: &Value) -> Result<String> {
    primitive(cx, value, CoercionContext::StringOutput)?.to_string_value()
}

pub fn to_property_key(cx: &Coercer, value: &Value) -> Result<String> {
    primitive(cx, value, CoercionContext::PropertyKey)?.to_string_value()
}

pub fn unary_plus(cx: &Coercer, value: &Value) -> Result<Value> {
    Ok(Value::from(primitive(cx, value, CoercionContext::UnaryPlus)?.to_number()?))
}

pub fn negate(cx: &Coercer, value: &Value) -> Result<Value> {
    Ok(Value::from(-primitive(cx, value, CoercionContext::Arithmetic)?.to_number()?))
}

pub fn add(cx: &Coercer, left: &Value, right: &Value) -> Result<Value> {
    let l = primitive(cx, left, CoercionContext::Additive)?;
    let r = primitive(cx, right, CoercionContext::Additive)?;
    if l.is_string() || r.is_string() {
        let mut s = l.to_string_value()?;
        s.push_str(&r.to_string_value()?);
        return Ok(Value::from(s));
    }
    Ok(Value::from(l.to_number()? + r.to_number()?))
}

pub fn arithmetic(cx: &Coercer, op: ArithmeticOp, left: &Value, right: &Value) -> Result<Value> {
    let a = primitive(cx, left, CoercionContext::Arithmetic)?.to_number()?;
    let b = primitive(cx, right, CoercionContext::Arithmetic)?.to_number()?;
    let res = match op {
        ArithmeticOp::Sub => a - b,
        ArithmeticOp::Mul => a * b,
        ArithmeticOp::Div => a / b,
        ArithmeticOp::Rem => a % b,
        ArithmeticOp::Pow => pow(a, b),
    };
    Ok(Value::from(res))
}

fn pow(base: f64, exponent: f64) -> f64 {
    // powf treats 1 ** NaN and 1 ** Infinity as 1
    if exponent.is_nan() || (base.abs() == 1.0 && exponent.is_infinite()) {
        return f64::NAN;
    }
    base.powf(exponent)
}

/// Relational comparison. Operands are requested with the number hint, yet two
/// string results still compare as strings.
pub fn compare(cx: &Coercer, op: RelationalOp, left: &Value, right: &Value) -> Result<bool> {
    let l = primitive(cx, left, CoercionContext::Relational)?;
    let r = primitive(cx, right, CoercionContext::Relational)?;
    let ordering = match (&l, &r) {
        // byte order of UTF-8 is code point order
        (Primitive::Str(a), Primitive::Str(b)) => Some(a.cmp(b)),
        _ => l.to_number()?.partial_cmp(&r.to_number()?),
    };
    Ok(match ordering {
        None => false,
        Some(o) => match op {
            RelationalOp::Lt => o == Ordering::Less,
            RelationalOp::Le => o != Ordering::Greater,
            RelationalOp::Gt => o == Ordering::Greater,
            RelationalOp::Ge => o != Ordering::Less,
        },
    })
}

pub fn loose_equals(cx: &Coercer, left: &Value, right: &Value) -> Result<bool> {
    match (left, right) {
        (Value::Object(_), Value::Object(_)) => Ok(left.same_object(right)),
        (Value::Primitive(a), Value::Primitive(b)) => primitives_loosely_equal(a, b),
        (Value::Object(_), Value::Primitive(p)) | (Value::Primitive(p), Value::Object(_)) if p.is_nullish() => Ok(false),
        (Value::Object(_), Value::Primitive(b)) => primitives_loosely_equal(&primitive(cx, left, CoercionContext::LooseEquality)?, b),
        (Value::Primitive(a), Value::Object(_)) => primitives_loosely_equal(a, &primitive(cx, right, CoercionContext::LooseEquality)?),
    }
}

fn primitives_loosely_equal(a: &Primitive, b: &Primitive) -> Result<bool> {
    Ok(match (a, b) {
        (Primitive::Undefined | Primitive::Null, Primitive::Undefined | Primitive::Null) => true,
        (Primitive::Undefined | Primitive::Null, _) | (_, Primitive::Undefined | Primitive::Null) => false,
        (Primitive::Str(x), Primitive::Str(y)) => x == y,
        (Primitive::Symbol(x), Primitive::Symbol(y)) => x == y,
        (Primitive::Symbol(_), _) | (_, Primitive::Symbol(_)) => false,
        (x, y) => x.to_number()? == y.to_number()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::error::Error;
    use crate::types::hint::Hint;
    use crate::types::primitive::Symbol;
    use crate::types::record::Record;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn stringify_only(s: &'static str) -> Value {
        Record::builder().stringify(move |_, _| Ok(Value::from(s))).without_valuate().build()
    }

    fn valuate_only(v: impl Into<Value> + Clone + 'static) -> Value {
        Record::builder().valuate(move |_, _| Ok(v.clone().into())).without_stringify().build()
    }

    /// Records every hint its override hook is asked for.
    fn recording(seen: Rc<RefCell<Vec<Hint>>>, result: f64) -> Value {
        Record::builder()
            .on_primitive(move |_, _, hint| {
                seen.borrow_mut().push(hint);
                Ok(Value::from(result))
            })
            .build()
    }

    #[test]
    fn additive_concatenates_stringify_result() {
        let cx = Coercer::new();
        assert_eq!(add(&cx, &stringify_only("2"), &Value::from(2)).unwrap(), Value::from("22"));
        assert_eq!(add(&cx, &Value::from(2), &stringify_only("2")).unwrap(), Value::from("22"));
    }

    #[test]
    fn additive_adds_numbers() {
        let cx = Coercer::new();
        assert_eq!(add(&cx, &valuate_only(40), &Value::from(2)).unwrap(), Value::from(42));
        assert_eq!(add(&cx, &Value::from(true), &Value::null()).unwrap(), Value::from(1));
        assert_eq!(add(&cx, &Value::from("a"), &Value::null()).unwrap(), Value::from("anull"));
        assert_eq!(add(&cx, &Record::builder().build(), &Value::from("!")).unwrap(), Value::from("[object Object]!"));
    }

    #[test]
    fn additive_rejects_symbols() {
        let cx = Coercer::new();
        let sym = Value::from(Symbol::new(None));
        assert!(matches!(add(&cx, &sym, &Value::from("x")), Err(Error::TypeMismatch(_))));
        assert!(matches!(add(&cx, &sym, &Value::from(1)), Err(Error::TypeMismatch(_))));
    }

    #[test]
    fn operators_request_their_hints() {
        let cx = Coercer::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let obj = recording(seen.clone(), 1.0);
        add(&cx, &obj, &Value::from(1)).unwrap();
        compare(&cx, RelationalOp::Lt, &obj, &Value::from(1)).unwrap();
        loose_equals(&cx, &obj, &Value::from(1)).unwrap();
        arithmetic(&cx, ArithmeticOp::Mul, &obj, &Value::from(1)).unwrap();
        unary_plus(&cx, &obj).unwrap();
        to_number(&cx, &obj).unwrap();
        to_string(&cx, &obj).unwrap();
        to_output_string(&cx, &obj).unwrap();
        to_property_key(&cx, &obj).unwrap();
        assert_eq!(
            *seen.borrow(),
            vec![Hint::Default, Hint::Number, Hint::Default, Hint::Number, Hint::Number, Hint::Number, Hint::String, Hint::String, Hint::String]
        );
    }

    #[test]
    fn relational_keeps_strings_as_strings() {
        let cx = Coercer::new();
        // "10" < "9" as strings, even though the number hint was requested
        let ten = stringify_only("10");
        assert!(compare(&cx, RelationalOp::Lt, &ten, &stringify_only("9")).unwrap());
        assert!(!compare(&cx, RelationalOp::Lt, &ten, &Value::from(9)).unwrap());
        assert!(compare(&cx, RelationalOp::Ge, &Value::from("b"), &Value::from("a")).unwrap());
        assert!(compare(&cx, RelationalOp::Le, &valuate_only(3), &Value::from(3)).unwrap());
    }

    #[test]
    fn relational_nan_is_always_false() {
        let cx = Coercer::new();
        let nan = Value::from("not a number");
        for op in [RelationalOp::Lt, RelationalOp::Le, RelationalOp::Gt, RelationalOp::Ge] {
            assert!(!compare(&cx, op, &nan, &Value::from(1)).unwrap(), "{:?}", op);
        }
    }

    #[test]
    fn loose_equality() {
        let cx = Coercer::new();
        assert!(loose_equals(&cx, &valuate_only(1000), &Value::from("1000")).unwrap());
        assert!(loose_equals(&cx, &Value::from(1), &Value::from(true)).unwrap());
        assert!(loose_equals(&cx, &Value::null(), &Value::undefined()).unwrap());
        assert!(!loose_equals(&cx, &Value::null(), &Value::from(0)).unwrap());
        assert!(!loose_equals(&cx, &Value::from("1.0"), &Value::from("1")).unwrap());
        assert!(loose_equals(&cx, &stringify_only("x"), &Value::from("x")).unwrap());

        let sym = Symbol::new(Some("k"));
        assert!(loose_equals(&cx, &Value::from(sym.clone()), &Value::from(sym)).unwrap());
        assert!(!loose_equals(&cx, &Value::from(Symbol::new(None)), &Value::from(0)).unwrap());
        assert!(!loose_equals(&cx, &Value::from(f64::NAN), &Value::from(f64::NAN)).unwrap());
    }

    #[test]
    fn loose_equality_skips_coercion_for_objects_and_nullish() {
        let cx = Coercer::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let a = recording(seen.clone(), 1.0);
        let b = recording(seen.clone(), 1.0);
        assert!(loose_equals(&cx, &a, &a.clone()).unwrap());
        assert!(!loose_equals(&cx, &a, &b).unwrap());
        assert!(!loose_equals(&cx, &a, &Value::null()).unwrap());
        assert!(!loose_equals(&cx, &Value::undefined(), &b).unwrap());
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn explicit_conversions_finish_the_job() {
        let cx = Coercer::new();
        assert_eq!(to_number(&cx, &valuate_only("42")).unwrap(), 42.0);
        assert_eq!(to_string(&cx, &valuate_only(42)).unwrap(), "42");
        assert!(to_number(&cx, &Record::builder().build()).unwrap().is_nan());
        assert_eq!(to_string(&cx, &Value::from(Symbol::new(Some("s")))).unwrap(), "Symbol(s)");
        assert!(matches!(to_output_string(&cx, &Value::from(Symbol::new(None))), Err(Error::TypeMismatch(_))));
    }

    #[test]
    fn arithmetic_uses_doubles() {
        let cx = Coercer::new();
        let six = valuate_only(6);
        assert_eq!(arithmetic(&cx, ArithmeticOp::Sub, &six, &Value::from("1")).unwrap(), Value::from(5));
        assert_eq!(arithmetic(&cx, ArithmeticOp::Div, &six, &Value::from(0)).unwrap(), Value::from(f64::INFINITY));
        assert_eq!(arithmetic(&cx, ArithmeticOp::Rem, &Value::from(-7), &Value::from(3)).unwrap(), Value::from(-1));
        assert_eq!(arithmetic(&cx, ArithmeticOp::Pow, &Value::from(2), &six).unwrap(), Value::from(64));
        let one_pow_inf = arithmetic(&cx, ArithmeticOp::Pow, &Value::from(1), &Value::from(f64::INFINITY)).unwrap();
        assert!(matches!(one_pow_inf, Value::Primitive(Primitive::Number(n)) if n.is_nan()));
        assert_eq!(negate(&cx, &six).unwrap(), Value::from(-6));
    }

    #[test]
    fn conversion_errors_surface() {
        let cx = Coercer::new();
        let bare = Record::builder().without_stringify().without_valuate().build();
        assert!(matches!(add(&cx, &bare, &Value::from(1)), Err(Error::NoUsableConversion { .. })));
        assert!(matches!(compare(&cx, RelationalOp::Gt, &Value::from(1), &bare), Err(Error::NoUsableConversion { .. })));
        assert!(matches!(loose_equals(&cx, &bare, &Value::from(1)), Err(Error::NoUsableConversion { .. })));
    }
}
