//! A small expression language whose objects turn into primitives through a
//! hint-driven protocol: an optional override hook, otherwise the legacy
//! `stringify` / `valuate` pair in an order chosen by the hint.

pub mod builtins;
pub mod coercion;
pub mod evaluator;
pub mod operators;
pub mod parser;
pub mod types;

pub use coercion::{Coercer, Limits};
pub use evaluator::{Evaluator, VariableResolver};
pub use types::error::{Error, Result};
pub use types::hint::{CoercionContext, Hint};
pub use types::primitive::Primitive;
pub use types::value::Value;
