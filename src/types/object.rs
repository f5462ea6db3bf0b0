use crate::coercion::Coercer;
use crate::types::conversion::LegacyMethod;
use crate::types::error::{Error, Result};
use crate::types::function::Callable;
use crate::types::value::Value;

/// Host object model as seen by the evaluator and the coercion dispatcher.
///
/// The conversion defaults describe a plain object: no override hook, and the
/// inherited `stringify` / `valuate` pair from [`LegacyMethod::inherited`].
pub trait Object {
    fn type_name(&self) -> &'static str {
        "object"
    }
    /// Tag used by the inherited `stringify`, as in `[object Object]`.
    fn class_name(&self) -> &'static str {
        "Object"
    }
    fn get_member(&self, name: &str) -> Result<Value> {
        Err(Error::UnknownMember {
            type_name: self.type_name().into(),
            member: name.to_string(),
        })
    }
    fn override_hook(&self) -> Option<Callable> {
        None
    }
    fn conversion_method(&self, method: LegacyMethod) -> Option<Callable> {
        Some(method.inherited())
    }
    fn call(&self, _cx: &Coercer, _this: &Value, _args: &[Value]) -> Result<Value> {
        Err(Error::NotCallable(self.type_name().into()))
    }
}
