use crate::types::error::{Error, Result};
use std::fmt;
use std::rc::Rc;

/// Atomic value compared by identity; two symbols with the same description are distinct.
#[derive(Clone)]
pub struct Symbol(Rc<Option<String>>);

impl Symbol {
    pub fn new(description: Option<&str>) -> Self {
        Symbol(Rc::new(description.map(str::to_string)))
    }
    pub fn description(&self) -> Option<&str> {
        self.0.as_deref()
    }
    pub fn descriptive_string(&self) -> String {
        format!("Symbol({})", self.description().unwrap_or_default())
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.descriptive_string())
    }
}

#[derive(Clone, PartialEq)]
pub enum Primitive {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    Symbol(Symbol),
}

impl Primitive {
    pub fn type_name(&self) -> &'static str {
        match self {
            Primitive::Undefined => "undefined",
            Primitive::Null => "null",
            Primitive::Bool(_) => "boolean",
            Primitive::Number(_) => "number",
            Primitive::Str(_) => "string",
            Primitive::Symbol(_) => "symbol",
        }
    }
    pub fn is_string(&self) -> bool {
        matches!(self, Primitive::Str(_))
    }
    pub fn is_nullish(&self) -> bool {
        matches!(self, Primitive::Undefined | Primitive::Null)
    }
    pub fn as_number(&self) -> Option<f64> {
        if let Primitive::Number(n) = self { Some(*n) } else { None }
    }
    pub fn as_str(&self) -> Option<&str> {
        if let Primitive::Str(s) = self { Some(s) } else { None }
    }

    pub fn to_number(&self) -> Result<f64> {
        match self {
            Primitive::Undefined => Ok(f64::NAN),
            Primitive::Null => Ok(0.0),
            Primitive::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Primitive::Number(n) => Ok(*n),
            Primitive::Str(s) => Ok(string_to_number(s)),
            Primitive::Symbol(_) => Err(Error::TypeMismatch("cannot convert a symbol to a number".into())),
        }
    }

    /// Implicit string conversion; symbols refuse it.
    pub fn to_string_value(&self) -> Result<String> {
        match self {
            Primitive::Symbol(_) => Err(Error::TypeMismatch("cannot convert a symbol to a string".into())),
            Primitive::Str(s) => Ok(s.clone()),
            other => Ok(other.to_string()),
        }
    }
}

pub fn number_to_string(n: f64) -> String {
    if n == 0.0 {
        return "0".into();
    }
    let mut buffer = ryu_js::Buffer::new();
    buffer.format(n).to_string()
}

pub fn string_to_number(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    let radix = match s.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &s[2..];
        if digits.is_empty() {
            return f64::NAN;
        }
        return digits
            .chars()
            .try_fold(0f64, |acc, c| c.to_digit(radix).map(|d| acc * radix as f64 + d as f64))
            .unwrap_or(f64::NAN);
    }
    // fast-float also accepts "inf" and "nan", which are not numeric literals here
    if !s.bytes().all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E')) {
        return f64::NAN;
    }
    fast_float::parse::<f64, _>(s).unwrap_or(f64::NAN)
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Undefined => f.write_str("undefined"),
            Primitive::Null => f.write_str("null"),
            Primitive::Bool(b) => write!(f, "{}", b),
            Primitive::Number(n) => f.write_str(&number_to_string(*n)),
            Primitive::Str(s) => f.write_str(s),
            Primitive::Symbol(sym) => f.write_str(&sym.descriptive_string()),
        }
    }
}

impl fmt::Debug for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Str(s) => write!(f, "{:?}", s),
            other => write!(f, "{}", other),
        }
    }
}

impl From<f64> for Primitive {
    fn from(v: f64) -> Self {
        Primitive::Number(v)
    }
}
impl From<i32> for Primitive {
    fn from(v: i32) -> Self {
        Primitive::Number(v as f64)
    }
}
impl From<i64> for Primitive {
    fn from(v: i64) -> Self {
        Primitive::Number(v as f64)
    }
}
impl From<bool> for Primitive {
    fn from(v: bool) -> Self {
        Primitive::Bool(v)
    }
}
impl From<String> for Primitive {
    fn from(v: String) -> Self {
        Primitive::Str(v)
    }
}
impl From<&str> for Primitive {
    fn from(v: &str) -> Self {
        Primitive::Str(v.to_string())
    }
}
impl From<Symbol> for Primitive {
    fn from(v: Symbol) -> Self {
        Primitive::Symbol(v)
    }
}
