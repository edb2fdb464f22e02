//! The recursive matcher.
//!
//! [`check_type`] dispatches on the pattern variant; arrays and objects recurse
//! back into it. Every failure is a [`Diagnostic`] naming the first mismatch.

use std::sync::Arc;

use shapecheck_value::{Class, Value};
use tracing::trace;

use crate::error::Diagnostic;
use crate::pattern::{Mapping, Pattern};

static UNDEFINED: Value = Value::Undefined;

/// Check `value` against `pattern`.
///
/// `strict` only applies to a mapping at this level. Sequence elements and
/// object fields are always checked strictly, whatever the caller asked for.
pub fn check_type(value: &Value, pattern: &Pattern, strict: bool) -> Result<(), Diagnostic> {
    trace!(kind = pattern.kind(), strict, "checking value");

    let valid = match pattern {
        Pattern::Scalar(kind) => {
            if value.type_of() != kind.as_str() {
                return Err(Diagnostic::new(format!(
                    "Expected {} to be a {}",
                    value.describe(),
                    kind.as_str()
                )));
            }
            true
        }
        Pattern::Predicate(predicate) => predicate.call(value)?,
        Pattern::ClassOf(class) if class.is_native() => return check_native_class(value, class),
        Pattern::ClassOf(class) => matches_class(value, class),
        Pattern::Sequence(item) => {
            check_array(value, item, true)?;
            true
        }
        Pattern::Regex(regex) => {
            if !regex.is_match(&value.text_form()) {
                return Err(Diagnostic::new(format!(
                    "Expected {} to match pattern /{}/",
                    value.describe(),
                    regex.as_str()
                )));
            }
            true
        }
        Pattern::Mapping(mapping) => {
            check_object(value, mapping, strict)?;
            true
        }
        Pattern::Literal(expected) => {
            if value.strict_equals(expected) {
                return Ok(());
            }
            return Err(Diagnostic::new(format!(
                "Expected {} to be an instance of {}",
                value.describe(),
                expected.describe()
            )));
        }
    };

    if valid {
        Ok(())
    } else {
        Err(invalid_match(value, pattern))
    }
}

/// Check that `value` is an array whose every element matches `item`.
pub fn check_array(value: &Value, item: &Pattern, strict: bool) -> Result<(), Diagnostic> {
    let Value::Array(elements) = value else {
        return Err(Diagnostic::new(format!(
            "Expected {} to be an array",
            value.describe()
        )));
    };

    elements
        .iter()
        .try_for_each(|element| check_type(element, item, strict))
}

/// Check that `value` is an object satisfying `mapping`.
///
/// Arrays are accepted too: their fields are the element indices and their
/// class is `Array`. Declared fields missing from the value are checked as
/// `undefined`, so only patterns that tolerate it (such as `optional`) let
/// them through. In strict mode the value's class must carry the mapping's
/// class name and every field of the value must be declared.
pub fn check_object(value: &Value, mapping: &Mapping, strict: bool) -> Result<(), Diagnostic> {
    let class = match value {
        Value::Object(object) => Arc::clone(object.class()),
        Value::Array(_) => Class::array(),
        _ => {
            return Err(Diagnostic::new(format!(
                "Expected {} to be an object",
                value.describe()
            )))
        }
    };

    for (key, pattern) in mapping.iter() {
        let field = own_field(value, key).unwrap_or(&UNDEFINED);
        check_type(field, pattern, true).map_err(|err| err.in_key(key, value))?;
    }

    if strict {
        if class.name() != mapping.class().name() {
            return Err(Diagnostic::new(format!(
                "Expected instance of {} to be instance of {}",
                class.name(),
                mapping.class().name()
            )));
        }

        if let Some(key) = own_keys(value)
            .into_iter()
            .find(|key| !mapping.get(key).is_some_and(Pattern::is_truthy))
        {
            return Err(Diagnostic::new(format!(
                "Unknown key {key} in {}",
                value.describe()
            )));
        }
    }

    Ok(())
}

fn own_field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(object) => object.get(key),
        Value::Array(elements) => key
            .parse::<usize>()
            .ok()
            .filter(|idx| idx.to_string() == key)
            .and_then(|idx| elements.get(idx)),
        _ => None,
    }
}

fn own_keys(value: &Value) -> Vec<String> {
    match value {
        Value::Object(object) => object.keys().map(str::to_string).collect(),
        Value::Array(elements) => (0..elements.len()).map(|idx| idx.to_string()).collect(),
        _ => Vec::new(),
    }
}

/// Class-identity match.
///
/// Instances must derive from `class`. Classes and functions used as values
/// match by name only, so a subclass is not accepted for its parent here.
pub(crate) fn matches_class(value: &Value, class: &Arc<Class>) -> bool {
    match value {
        Value::Undefined | Value::Null => false,
        Value::Class(other) => other.name() == class.name(),
        Value::Function(function) => function.name() == class.name(),
        instance => instance.is_instance_of(class),
    }
}

fn check_native_class(value: &Value, class: &Arc<Class>) -> Result<(), Diagnostic> {
    let is_marker = matches!(value, Value::Class(other) if Arc::ptr_eq(other, class));
    if is_marker || value.is_instance_of(class) {
        return Ok(());
    }

    let expected = Pattern::ClassOf(Arc::clone(class)).expected_type();
    let message = if expected == "function" {
        format!("Expected {} to be a {expected}", value.describe())
    } else {
        format!("Expected {} to be an instance of {expected}", value.describe())
    };
    Err(Diagnostic::new(message))
}

fn invalid_match(value: &Value, pattern: &Pattern) -> Diagnostic {
    let expected = pattern.expected_type();
    let message = if pattern.name().is_some() {
        format!(
            "Invalid match ({} expected to be instance of {expected})",
            value.describe()
        )
    } else {
        format!("Invalid match ({} expected to be {expected})", value.describe())
    };
    trace!(%message, "match failed");
    Diagnostic::new(message)
}
