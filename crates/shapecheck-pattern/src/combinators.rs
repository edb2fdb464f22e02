//! Prebuilt patterns composing the matcher.

use shapecheck_value::Value;

use crate::error::Diagnostic;
use crate::matcher::check_type;
use crate::pattern::{Pattern, Predicate};

/// Accept `undefined` and `null`, otherwise defer to `pattern`.
pub fn optional(pattern: impl Into<Pattern>) -> Pattern {
    let pattern = pattern.into();
    Pattern::Predicate(Predicate::anonymous(move |value| {
        if value.is_nullish() {
            return Ok(true);
        }
        check_type(value, &pattern, true).map(|()| true)
    }))
}

/// Accept any value.
pub fn anything() -> Pattern {
    Pattern::Predicate(Predicate::new("anything", |_| Ok(true)))
}

/// Accept a value matching any of `patterns`, tried in order.
///
/// Individual failures are discarded; when nothing matches the diagnostic
/// lists every alternative.
pub fn one_of<I>(patterns: I) -> Pattern
where
    I: IntoIterator,
    I::Item: Into<Pattern>,
{
    let choices: Vec<Pattern> = patterns.into_iter().map(Into::into).collect();
    Pattern::Predicate(Predicate::anonymous(move |value| {
        if choices
            .iter()
            .any(|choice| check_type(value, choice, true).is_ok())
        {
            return Ok(true);
        }
        Err(Diagnostic::new(format!(
            "Expected {} to be one of {}",
            value.describe(),
            choice_names(&choices)
        )))
    }))
}

/// Accept finite integral numbers representable as a signed 32-bit integer.
pub fn integer() -> Pattern {
    Pattern::Predicate(Predicate::new("Integer", check_integer))
}

fn check_integer(value: &Value) -> Result<bool, Diagnostic> {
    match value {
        Value::Number(n) if is_int32(*n) => Ok(true),
        _ => Err(Diagnostic::new(format!(
            "Expected Integer, got {}",
            value.describe()
        ))),
    }
}

fn is_int32(n: f64) -> bool {
    n.fract() == 0.0 && (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&n)
}

fn choice_names(choices: &[Pattern]) -> String {
    let names: Vec<String> = choices.iter().map(Pattern::display_name).collect();
    serde_json::Value::from(names).to_string()
}
