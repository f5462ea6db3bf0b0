use crate::coercion::Coercer;
use crate::operators;
use crate::types::error::Result;
use crate::types::function;
use crate::types::value::Value;
use std::rc::Rc;

/// Globals available to every expression unless the resolver shadows them.
pub fn lookup(name: &str) -> Option<Value> {
    match name {
        "Number" => Some(function::new(Rc::new(|cx: &Coercer, _this: &Value, args: &[Value]| -> Result<Value> {
            match args.first() {
                Some(v) => Ok(Value::from(operators::to_number(cx, v)?)),
                None => Ok(Value::from(0)),
            }
        }))),
        "String" => Some(function::new(Rc::new(|cx: &Coercer, _this: &Value, args: &[Value]| -> Result<Value> {
            match args.first() {
                Some(v) => Ok(Value::from(operators::to_string(cx, v)?)),
                None => Ok(Value::from("")),
            }
        }))),
        _ => None,
    }
}
