//! Runtime structural validation of dynamic values.
//!
//! shapecheck checks values that arrive without static types (decoded JSON,
//! plugin arguments, scripting hosts) against composable patterns and reports
//! the first mismatch with a precise message.
//!
//! # Crate Structure
//!
//! - [`value`]: Dynamic value model with class identity
//! - [`pattern`]: Patterns, matcher, combinators and named-pattern registry
//!
//! The most used items are re-exported at the root.

/// Re-export value types.
pub mod value {
    pub use shapecheck_value::*;
}

/// Re-export pattern types.
pub mod pattern {
    pub use shapecheck_pattern::*;
}

pub use shapecheck_pattern::{
    anything, ensure, integer, matches, one_of, optional, Diagnostic, Pattern, PatternRegistry,
};
pub use shapecheck_value::{Class, Object, Value};
