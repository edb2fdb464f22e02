//! JSON encoding of patterns.
//!
//! ```text
//! "string" | "number" | "boolean"          scalar descriptors
//! "integer" | "anything"                   combinators
//! "object" | "array" | "function" | "date" built-in classes
//! [P]                                      sequence of P
//! {"$optional": P}                         optional(P)
//! {"$oneOf": [P, ...]}                     one_of(P, ...)
//! {"$regex": "source"}                     regex
//! {"$literal": v}                          literal v
//! {"field": P, ...}                        plain-object shape
//! null | true | 3.5                        literal
//! ```

use regex::Regex;
use serde_json::{Map, Value as Json};
use shapecheck_value::Value;

use crate::combinators::{anything, integer, one_of, optional};
use crate::error::{DocumentError, RegistryError, Result};
use crate::pattern::{Mapping, Pattern};

type DocResult<T> = std::result::Result<T, DocumentError>;

impl Pattern {
    /// Decode a pattern document.
    pub fn from_document(document: &Json) -> DocResult<Pattern> {
        parse(document, "$")
    }

    /// Decode a pattern document from JSON text.
    pub fn from_document_str(text: &str) -> Result<Pattern> {
        let document: Json = serde_json::from_str(text)?;
        Pattern::from_document(&document).map_err(|source| RegistryError::InvalidPattern {
            name: "<inline>".to_string(),
            source,
        })
    }
}

fn parse(document: &Json, path: &str) -> DocResult<Pattern> {
    match document {
        Json::String(marker) => parse_marker(marker, path),
        Json::Array(items) => match items.as_slice() {
            [item] => Ok(Pattern::sequence(parse(item, &format!("{path}[0]"))?)),
            _ => Err(DocumentError::InvalidSequence {
                path: path.to_string(),
                len: items.len(),
            }),
        },
        Json::Object(map) => parse_object(map, path),
        literal => Ok(Pattern::Literal(Value::from(literal))),
    }
}

fn parse_marker(marker: &str, path: &str) -> DocResult<Pattern> {
    let pattern = match marker {
        "string" => Pattern::string(),
        "number" => Pattern::number(),
        "boolean" => Pattern::boolean(),
        "integer" => integer(),
        "anything" => anything(),
        "object" => Pattern::object(),
        "array" => Pattern::array(),
        "function" => Pattern::function(),
        "date" => Pattern::date(),
        _ => {
            return Err(DocumentError::UnknownMarker {
                path: path.to_string(),
                marker: marker.to_string(),
            })
        }
    };
    Ok(pattern)
}

fn parse_object(map: &Map<String, Json>, path: &str) -> DocResult<Pattern> {
    let operator = map.keys().find(|key| key.starts_with('$'));
    let Some(operator) = operator else {
        let mut mapping = Mapping::new();
        for (name, field) in map {
            mapping.insert(name.as_str(), parse(field, &format!("{path}.{name}"))?);
        }
        return Ok(Pattern::Mapping(mapping));
    };

    if map.len() != 1 {
        return Err(invalid(path, "operator", "operator objects take exactly one key"));
    }

    let argument = &map[operator.as_str()];
    match operator.as_str() {
        "$optional" => Ok(optional(parse(argument, &format!("{path}.$optional"))?)),
        "$oneOf" => {
            let Json::Array(choices) = argument else {
                return Err(invalid(path, "$oneOf", "expected an array of patterns"));
            };
            let choices = choices
                .iter()
                .enumerate()
                .map(|(idx, choice)| parse(choice, &format!("{path}.$oneOf[{idx}]")))
                .collect::<DocResult<Vec<_>>>()?;
            Ok(one_of(choices))
        }
        "$regex" => {
            let Json::String(source) = argument else {
                return Err(invalid(path, "$regex", "expected a string"));
            };
            Regex::new(source)
                .map(Pattern::Regex)
                .map_err(|source| DocumentError::InvalidRegex {
                    path: path.to_string(),
                    source,
                })
        }
        "$literal" => Ok(Pattern::Literal(Value::from(argument))),
        _ => Err(invalid(path, "operator", &format!("unknown operator {operator}"))),
    }
}

fn invalid(path: &str, operator: &'static str, reason: &str) -> DocumentError {
    DocumentError::InvalidOperator {
        path: path.to_string(),
        operator,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use shapecheck_value::Object;

    use super::*;
    use crate::validator::matches;

    fn doc(document: Json) -> Pattern {
        Pattern::from_document(&document).expect("document should decode")
    }

    #[test]
    fn markers_decode() {
        assert!(matches(&Value::from("foo"), &doc(json!("string")), true));
        assert!(matches(&Value::from(7), &doc(json!("integer")), true));
        assert!(!matches(&Value::from(7.5), &doc(json!("integer")), true));
        assert!(matches(&Value::Null, &doc(json!("anything")), true));
        assert!(matches(&Value::from(vec![1]), &doc(json!("array")), true));
    }

    #[test]
    fn shapes_and_operators_decode() {
        let pattern = doc(json!({
            "foo": "string",
            "tags": ["string"],
            "baz": {"$optional": "string"},
            "kind": {"$oneOf": [{"$literal": "a"}, {"$literal": "b"}]},
            "code": {"$regex": "^[A-Z]{3}$"}
        }));

        let value = Value::from(json!({"foo": "x", "tags": ["a"], "kind": "b", "code": "ABC"}));
        assert!(matches(&value, &pattern, true));

        let value = Value::from(json!({"foo": "x", "tags": ["a"], "kind": "c", "code": "ABC"}));
        assert!(!matches(&value, &pattern, true));
    }

    #[test]
    fn literals_decode() {
        assert!(matches(&Value::Null, &doc(json!(null)), true));
        assert!(matches(&Value::from(3), &doc(json!(3)), true));
        assert!(!matches(&Value::from(Object::new()), &doc(json!(false)), true));
        assert!(matches(&Value::from("string"), &doc(json!({"$literal": "string"})), true));
    }

    #[test]
    fn errors_carry_paths() {
        let err = Pattern::from_document(&json!({"a": {"b": "strng"}})).unwrap_err();
        assert_eq!(err.to_string(), r#"$.a.b: unknown marker "strng""#);

        let err = Pattern::from_document(&json!({"a": ["string", "number"]})).unwrap_err();
        assert!(matches!(err, DocumentError::InvalidSequence { len: 2, .. }));

        let err = Pattern::from_document(&json!({"$regex": "("})).unwrap_err();
        assert!(matches!(err, DocumentError::InvalidRegex { .. }));

        let err = Pattern::from_document(&json!({"$oneOf": "string"})).unwrap_err();
        assert!(matches!(err, DocumentError::InvalidOperator { operator: "$oneOf", .. }));

        let err = Pattern::from_document(&json!({"$optional": "string", "x": 1})).unwrap_err();
        assert!(matches!(err, DocumentError::InvalidOperator { .. }));

        let err = Pattern::from_document(&json!({"$maybe": "string"})).unwrap_err();
        assert!(err.to_string().contains("unknown operator $maybe"));
    }

    #[test]
    fn from_document_str_reports_json_errors() {
        assert!(Pattern::from_document_str(r#"{"foo": "string"}"#).is_ok());
        assert!(matches!(
            Pattern::from_document_str("{nope"),
            Err(RegistryError::InvalidJson(_))
        ));
    }
}
