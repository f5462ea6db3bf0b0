//! Reduction of objects to primitives.
//!
//! [`Coercer::to_primitive`] asks an object for a primitive in the order a
//! [`Hint`] dictates. A present override hook is the only method consulted and
//! must return a primitive. Without one, the legacy pair is tried in hint order
//! and a method returning an object is passed over, which is how the inherited
//! self-returning `valuate` falls through to `stringify`.

use crate::types::conversion::{ConversionMethods, Dispatch};
use crate::types::error::{Error, Result};
use crate::types::hint::Hint;
use crate::types::primitive::Primitive;
use crate::types::value::Value;
use std::cell::Cell;

pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Nested object coercions allowed before failing with `ConversionDepthExceeded`.
    pub max_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }
}

/// Coercion dispatcher. Conversion methods receive it so their own coercions
/// count against the same depth limit.
#[derive(Debug, Default)]
pub struct Coercer {
    limits: Limits,
    depth: Cell<usize>,
}

struct DepthGuard<'a> {
    depth: &'a Cell<usize>,
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.set(self.depth.get() - 1);
    }
}

impl Coercer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: Limits) -> Self {
        Self { limits, depth: Cell::new(0) }
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Current nesting of object coercions.
    pub fn depth(&self) -> usize {
        self.depth.get()
    }

    fn enter(&self) -> Result<DepthGuard<'_>> {
        let depth = self.depth.get();
        if depth >= self.limits.max_depth {
            return Err(Error::ConversionDepthExceeded { limit: self.limits.max_depth });
        }
        self.depth.set(depth + 1);
        Ok(DepthGuard { depth: &self.depth })
    }

    pub fn to_primitive(&self, value: &Value, hint: Hint) -> Result<Primitive> {
        let object = match value {
            Value::Primitive(p) => return Ok(p.clone()),
            Value::Object(object) => object,
        };
        let _guard = self.enter()?;
        let methods = ConversionMethods::of(object.as_ref());
        match methods.dispatch(hint) {
            Dispatch::Override(hook) => match hook.as_ref()(self, value, &[Value::from(hint.as_str())])? {
                Value::Primitive(p) => Ok(p),
                Value::Object(_) => Err(Error::OverrideReturnedObject {
                    type_name: object.type_name(),
                    hint,
                }),
            },
            Dispatch::Ordinary(order) => {
                for method in order {
                    let Some(callable) = methods.legacy(method) else {
                        continue;
                    };
                    if let Value::Primitive(p) = callable.as_ref()(self, value, &[])? {
                        return Ok(p);
                    }
                }
                Err(Error::NoUsableConversion { type_name: object.type_name() })
            }
        }
    }
}
