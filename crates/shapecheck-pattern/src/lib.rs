//! Runtime shape checking against composable patterns.
//!
//! A [`Pattern`] describes the shape a value must have: a primitive type, a
//! class, a sequence, a regex, a field-by-field object shape, a literal or an
//! arbitrary predicate. [`ensure`] walks a value against a pattern and reports
//! the first mismatch as a [`Diagnostic`]; [`matches`] answers yes or no.
//!
//! ```
//! use shapecheck_pattern::{matches, one_of, optional, Pattern};
//! use shapecheck_value::{Object, Value};
//!
//! let pattern = Pattern::shape([
//!     ("name", Pattern::string()),
//!     ("age", one_of([Pattern::number(), Pattern::literal(Value::Null)])),
//!     ("email", optional(Pattern::regex("@").unwrap())),
//! ]);
//!
//! let value = Value::from(Object::new().with("name", "Ada").with("age", 36));
//! assert!(matches(&value, &pattern, true));
//! ```
//!
//! Patterns can also be loaded from JSON documents and kept in a
//! [`PatternRegistry`] for validating payloads by name.

pub mod combinators;
pub mod config;
pub mod document;
pub mod error;
pub mod matcher;
pub mod pattern;
pub mod registry;
pub mod validator;

pub use combinators::{anything, integer, one_of, optional};
pub use config::RegistryConfig;
pub use error::{Diagnostic, DocumentError, RegistryError, Result};
pub use matcher::{check_array, check_object, check_type};
pub use pattern::{Mapping, Pattern, Predicate, ScalarKind};
pub use registry::PatternRegistry;
pub use validator::{ensure, matches};
