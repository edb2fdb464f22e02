//! Dynamic value model for runtime shape checking.
//!
//! Values arrive from boundaries that carry no static types: decoded JSON,
//! scripting hosts, plugin arguments. This crate gives them one closed
//! representation:
//! - primitives (`undefined`, `null`, booleans, numbers, strings)
//! - arrays and objects, where every object remembers the [`Class`] that built it
//! - classes and functions used as values
//!
//! Rendering follows the conventions diagnostics rely on: [`Value::describe`]
//! produces the JSON-like text embedded in messages and [`Value::text_form`]
//! the string coercion regex patterns test against.

pub mod class;
pub mod json;
pub mod value;

pub use class::Class;
pub use json::format_number;
pub use value::{Function, Object, Value};
