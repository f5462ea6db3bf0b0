use crate::coercion::Coercer;
use crate::types::error::{Error, Result};
use crate::types::hint::Hint;
use crate::types::object::Object;
use crate::types::value::Value;
use std::rc::Rc;

/// A method body: coercer for nested conversions, receiver, arguments.
pub type Callable = Rc<dyn Fn(&Coercer, &Value, &[Value]) -> Result<Value>>;

pub fn new(callable: Callable) -> Value {
    Value::Object(Rc::new(Function::new(callable)))
}

pub struct Function {
    callable: Callable,
}

impl Function {
    pub fn new(callable: Callable) -> Self {
        Self { callable }
    }
}

impl Object for Function {
    fn type_name(&self) -> &'static str {
        "function"
    }

    fn class_name(&self) -> &'static str {
        "Function"
    }

    fn call(&self, cx: &Coercer, this: &Value, args: &[Value]) -> Result<Value> {
        self.callable.as_ref()(cx, this, args)
    }
}

pub fn method0<F>(f: F) -> Callable
where
    F: Fn(&Coercer, &Value) -> Result<Value> + 'static,
{
    Rc::new(move |cx: &Coercer, this: &Value, args: &[Value]| {
        if !args.is_empty() {
            return Err(Error::EvaluationFailed("expected 0 args".into()));
        }
        f(cx, this)
    })
}

/// Wraps a hint-aware closure as an override hook, which receives the hint by name.
pub fn hint_method<F>(f: F) -> Callable
where
    F: Fn(&Coercer, &Value, Hint) -> Result<Value> + 'static,
{
    Rc::new(move |cx: &Coercer, this: &Value, args: &[Value]| {
        let hint = match args {
            [Value::Primitive(p)] => p.as_str().ok_or_else(|| Error::TypeMismatch("hint must be a string".into()))?.parse::<Hint>()?,
            _ => return Err(Error::EvaluationFailed("expected 1 arg".into())),
        };
        f(cx, this, hint)
    })
}
