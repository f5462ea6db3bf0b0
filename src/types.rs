pub mod conversion;
pub mod error;
pub mod expression;
pub mod function;
pub mod hint;
pub mod object;
pub mod primitive;
pub mod record;
pub mod value;
