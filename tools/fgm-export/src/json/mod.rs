//! Minimal JSON document model for the glTF JSON chunk
//!
//! - [`parse`] / [`Parser`] build a [`JsonValue`] tree from bytes
//! - [`JsonValue::get_member`] / [`JsonValue::get_element`] navigate it

mod cursor;
mod parser;
mod value;

pub use parser::{DEFAULT_NESTING_LIMIT, MAX_NESTING_LIMIT, ParseError, Parser, parse};
pub use value::{JsonValue, Member, Number, ValueKind};
