use crate::types::error::{Error, Result};
use crate::types::object::Object;
pub use crate::types::primitive::{Primitive, Symbol};
use std::fmt;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

#[derive(Clone)]
pub enum Value {
    Primitive(Primitive),
    Object(Rc<dyn Object>),
}

impl Value {
    pub fn undefined() -> Self {
        Value::Primitive(Primitive::Undefined)
    }
    pub fn null() -> Self {
        Value::Primitive(Primitive::Null)
    }
    pub fn is_primitive(&self) -> bool {
        matches!(self, Value::Primitive(_))
    }
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }
    pub fn as_primitive(&self) -> Option<&Primitive> {
        if let Value::Primitive(p) = self { Some(p) } else { None }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Primitive(p) => p.type_name(),
            Value::Object(obj) => obj.type_name(),
        }
    }

    pub fn get_member(&self, name: &str) -> Result<Value> {
        match self {
            Value::Object(obj) => obj.get_member(name),
            Value::Primitive(p) => Err(Error::UnknownMember {
                type_name: p.type_name().into(),
                member: name.to_string(),
            }),
        }
    }

    /// Object identity; primitives are never the same object.
    pub fn same_object(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Object(a), Value::Object(b)) => std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b)),
            _ => false,
        }
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Primitive(p) => write!(f, "{:?}", p),
            Value::Object(obj) => write!(f, "<{}>", obj.type_name()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Primitive(p1), Value::Primitive(p2)) => p1 == p2,
            _ => self.same_object(other),
        }
    }
}

impl From<Primitive> for Value {
    fn from(p: Primitive) -> Self {
        Value::Primitive(p)
    }
}
impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Primitive(v.into())
    }
}
impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Primitive(v.into())
    }
}
impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Primitive(v.into())
    }
}
impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Primitive(v.into())
    }
}
impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Primitive(v.into())
    }
}
impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Primitive(v.into())
    }
}
impl From<Symbol> for Value {
    fn from(v: Symbol) -> Self {
        Value::Primitive(v.into())
    }
}
