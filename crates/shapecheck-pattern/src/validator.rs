use shapecheck_value::Value;
use tracing::debug;

use crate::error::{Diagnostic, RegistryError, Result};
use crate::matcher::check_type;
use crate::pattern::Pattern;

/// Check `value` against `pattern`, returning the first mismatch.
pub fn ensure(value: &Value, pattern: &Pattern, strict: bool) -> std::result::Result<(), Diagnostic> {
    check_type(value, pattern, strict)
}

/// Returns true if `value` matches `pattern`. The diagnostic is discarded.
pub fn matches(value: &Value, pattern: &Pattern, strict: bool) -> bool {
    ensure(value, pattern, strict).is_ok()
}

pub(crate) fn validate_payload(
    name: &str,
    payload: &[u8],
    pattern: &Pattern,
    strict: bool,
) -> Result<()> {
    let value: serde_json::Value = serde_json::from_slice(payload)?;

    ensure(&Value::from(value), pattern, strict).map_err(|source| {
        debug!(name, error = %source, "payload rejected");
        RegistryError::Mismatch {
            name: name.to_string(),
            source,
        }
    })
}
