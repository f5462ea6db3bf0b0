use crate::coercion::Coercer;
use crate::types::error::Result;
use crate::types::function::Callable;
use crate::types::hint::Hint;
use crate::types::object::Object;
use crate::types::value::Value;
use std::fmt;
use std::rc::Rc;

/// The two argument-less conversion methods tried when no override hook exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyMethod {
    Stringify,
    Valuate,
}

impl LegacyMethod {
    pub const fn name(self) -> &'static str {
        match self {
            LegacyMethod::Stringify => "stringify",
            LegacyMethod::Valuate => "valuate",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "stringify" => Some(LegacyMethod::Stringify),
            "valuate" => Some(LegacyMethod::Valuate),
            _ => None,
        }
    }

    /// Try order for a hint.
    pub const fn order(hint: Hint) -> [LegacyMethod; 2] {
        match hint {
            Hint::String => [LegacyMethod::Stringify, LegacyMethod::Valuate],
            Hint::Number | Hint::Default => [LegacyMethod::Valuate, LegacyMethod::Stringify],
        }
    }

    /// Behaviour every object has unless it replaces or removes the method:
    /// `valuate` hands back the receiver, `stringify` renders `[object <Class>]`.
    pub fn inherited(self) -> Callable {
        match self {
            LegacyMethod::Stringify => Rc::new(|_cx: &Coercer, this: &Value, _args: &[Value]| -> Result<Value> {
                let tag = match this {
                    Value::Object(obj) => format!("[object {}]", obj.class_name()),
                    Value::Primitive(p) => p.to_string(),
                };
                Ok(Value::from(tag))
            }),
            LegacyMethod::Valuate => Rc::new(|_cx: &Coercer, this: &Value, _args: &[Value]| -> Result<Value> { Ok(this.clone()) }),
        }
    }
}

impl fmt::Display for LegacyMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What the dispatcher will do for one object and one hint.
pub enum Dispatch {
    Override(Callable),
    Ordinary([LegacyMethod; 2]),
}

/// Read-only view of the conversion methods an object currently exposes.
pub struct ConversionMethods<'a> {
    object: &'a dyn Object,
}

impl<'a> ConversionMethods<'a> {
    pub fn of(object: &'a dyn Object) -> Self {
        Self { object }
    }

    pub fn override_hook(&self) -> Option<Callable> {
        self.object.override_hook()
    }

    pub fn legacy(&self, method: LegacyMethod) -> Option<Callable> {
        self.object.conversion_method(method)
    }

    pub fn dispatch(&self, hint: Hint) -> Dispatch {
        match self.override_hook() {
            Some(hook) => Dispatch::Override(hook),
            None => Dispatch::Ordinary(LegacyMethod::order(hint)),
        }
    }
}
