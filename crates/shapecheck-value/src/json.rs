//! JSON-like rendering and `serde_json` interop.
//!
//! Rendering rules:
//! - `undefined`, classes and functions have no JSON form
//! - inside arrays they render `null`; inside objects the field is skipped
//! - non-finite numbers render `null`
//! - numbers use the shortest round-trip text, with exponent form outside
//!   `[1e-6, 1e21)`

use crate::value::{Object, Value};

impl Value {
    /// Serialize to JSON text, or `None` when the value has no JSON form.
    pub fn to_json(&self) -> Option<String> {
        let mut out = String::new();
        write_json(self, &mut out).then_some(out)
    }
}

fn has_json_form(value: &Value) -> bool {
    !matches!(
        value,
        Value::Undefined | Value::Class(_) | Value::Function(_)
    )
}

fn write_json(value: &Value, out: &mut String) -> bool {
    match value {
        Value::Undefined | Value::Class(_) | Value::Function(_) => return false,
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) if n.is_finite() => out.push_str(&format_number(*n)),
        Value::Number(_) => out.push_str("null"),
        Value::String(s) => write_string(s, out),
        Value::Array(items) => {
            out.push('[');
            for (idx, item) in items.iter().enumerate() {
                if idx > 0 {
                    out.push(',');
                }
                if !write_json(item, out) {
                    out.push_str("null");
                }
            }
            out.push(']');
        }
        Value::Object(object) => {
            out.push('{');
            let mut first = true;
            for (key, field) in object.iter().filter(|(_, field)| has_json_form(field)) {
                if !first {
                    out.push(',');
                }
                first = false;
                write_string(key, out);
                out.push(':');
                write_json(field, out);
            }
            out.push('}');
        }
    }
    true
}

fn write_string(text: &str, out: &mut String) {
    out.push_str(&serde_json::Value::from(text).to_string());
}

/// Format a number the way script engines print them.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    if (1e-6..1e21).contains(&n.abs()) {
        return format!("{n}");
    }

    let exponent_form = format!("{n:e}");
    match exponent_form.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => exponent_form,
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, field)| (key, Value::from(field)))
                    .collect::<Object>(),
            ),
        }
    }
}

impl From<&serde_json::Value> for Value {
    fn from(value: &serde_json::Value) -> Self {
        Value::from(value.clone())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::class::Class;
    use crate::value::Function;

    #[test]
    fn numbers_render_like_script_engines() {
        assert_eq!(format_number(10.0), "10");
        assert_eq!(format_number(-1.0), "-1");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.33), "0.33");
        assert_eq!(format_number(123.33), "123.33");
        assert_eq!(format_number(2147483647.0), "2147483647");
        assert_eq!(format_number(1.348192308491824e23), "1.348192308491824e+23");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(0.000001), "0.000001");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn primitives_serialize() {
        assert_eq!(Value::from("foo").to_json().as_deref(), Some("\"foo\""));
        assert_eq!(Value::from(10).to_json().as_deref(), Some("10"));
        assert_eq!(Value::Null.to_json().as_deref(), Some("null"));
        assert_eq!(Value::Number(f64::NAN).to_json().as_deref(), Some("null"));
        assert_eq!(Value::Number(f64::INFINITY).to_json().as_deref(), Some("null"));
        assert_eq!(Value::Undefined.to_json(), None);
        assert_eq!(Value::from(Class::new("MyClass")).to_json(), None);
    }

    #[test]
    fn strings_are_escaped() {
        assert_eq!(
            Value::from("say \"hi\"\n").to_json().as_deref(),
            Some(r#""say \"hi\"\n""#)
        );
    }

    #[test]
    fn compound_values_keep_field_order_and_skip_holes() {
        let value = Value::from(
            Object::new()
                .with("foo", "bar")
                .with("missing", Value::Undefined)
                .with("run", Function::new("run"))
                .with("list", Value::Array(vec![Value::from(1), Value::Undefined])),
        );
        assert_eq!(
            value.to_json().as_deref(),
            Some(r#"{"foo":"bar","list":[1,null]}"#)
        );
        assert_eq!(value.describe(), r#"{"foo":"bar","list":[1,null]}"#);
        assert_eq!(Value::Undefined.describe(), "undefined");
    }

    #[test]
    fn class_instances_serialize_their_fields() {
        let class = Class::new("MyClass");
        let value = Value::from(Object::instance_of(&class).with("value", "foo"));
        assert_eq!(value.to_json().as_deref(), Some(r#"{"value":"foo"}"#));
    }

    #[test]
    fn converts_from_serde_json() {
        let value = Value::from(json!({"foo": ["asdf", 1, null], "ok": true}));
        let Value::Object(object) = &value else {
            panic!("expected object");
        };
        assert!(object.class().is_native());
        assert!(matches!(object.get("ok"), Some(Value::Bool(true))));
        assert!(matches!(object.get("foo"), Some(Value::Array(items)) if items.len() == 3));
        assert_eq!(value.describe(), r#"{"foo":["asdf",1,null],"ok":true}"#);
    }

    #[test]
    fn decoded_objects_keep_document_order() {
        let decoded: serde_json::Value = serde_json::from_str(r#"{"zeta":1,"alpha":[2],"mid":null}"#).unwrap();
        let value = Value::from(decoded);
        assert_eq!(value.describe(), r#"{"zeta":1,"alpha":[2],"mid":null}"#);
    }
}
