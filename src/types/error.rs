use crate::types::hint::Hint;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("override hook of {type_name} returned an object for hint '{hint}'")]
    OverrideReturnedObject { type_name: &'static str, hint: Hint },
    #[error("cannot convert {type_name} to a primitive value")]
    NoUsableConversion { type_name: &'static str },
    #[error("conversion depth exceeded (limit: {limit})")]
    ConversionDepthExceeded { limit: usize },
    #[error("{0}")]
    Host(String),
    #[error("unable to resolve variable: {0}")]
    ResolveFailed(String),
    #[error("{0} is not callable")]
    NotCallable(String),
    #[error("type mismatch: {0}")]
    TypeMismatch(String),
    #[error("evaluation failed: {0}")]
    EvaluationFailed(String),
    #[error("unknown member '{member}' for type {type_name}")]
    UnknownMember { type_name: String, member: String },
    #[error("parse error: {0}")]
    ParseError(String),
}

impl Error {
    /// Error raised from inside a user-supplied method.
    pub fn host(message: impl Into<String>) -> Self {
        Error::Host(message.into())
    }
}

pub type Result<T> = core::result::Result<T, Error>;
