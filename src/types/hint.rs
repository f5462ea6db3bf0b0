use crate::types::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Which kind of primitive a coercion site would prefer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hint {
    String,
    Number,
    Default,
}

impl Hint {
    pub const ALL: [Hint; 3] = [Hint::String, Hint::Number, Hint::Default];

    /// The name handed to an override hook.
    pub const fn as_str(self) -> &'static str {
        match self {
            Hint::String => "string",
            Hint::Number => "number",
            Hint::Default => "default",
        }
    }
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Hint {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "string" => Ok(Hint::String),
            "number" => Ok(Hint::Number),
            "default" => Ok(Hint::Default),
            other => Err(Error::TypeMismatch(format!("invalid hint '{}'", other))),
        }
    }
}

/// Every place that reduces a value to a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoercionContext {
    /// Interpolation into a string.
    StringOutput,
    ExplicitString,
    /// Key of an index expression.
    PropertyKey,
    ExplicitNumber,
    UnaryPlus,
    /// `-`, `*`, `/`, `%`, `**` and unary negation.
    Arithmetic,
    /// `<`, `>`, `<=`, `>=`.
    Relational,
    /// Binary `+`.
    Additive,
    /// `==` / `!=` against a primitive.
    LooseEquality,
    Ambiguous,
}

impl CoercionContext {
    pub const fn hint(self) -> Hint {
        match self {
            CoercionContext::StringOutput | CoercionContext::ExplicitString | CoercionContext::PropertyKey => Hint::String,
            CoercionContext::ExplicitNumber | CoercionContext::UnaryPlus | CoercionContext::Arithmetic | CoercionContext::Relational => Hint::Number,
            CoercionContext::Additive | CoercionContext::LooseEquality | CoercionContext::Ambiguous => Hint::Default,
        }
    }
}
