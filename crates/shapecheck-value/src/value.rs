use std::sync::Arc;

use crate::class::Class;
use crate::json::format_number;

/// A dynamically typed runtime datum.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(Object),
    /// A class used as a value rather than instantiated.
    Class(Arc<Class>),
    Function(Function),
}

impl Value {
    /// The primitive type tag: `undefined`, `object`, `boolean`, `number`,
    /// `string` or `function`. `null` reports `object`.
    pub fn type_of(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null | Value::Array(_) | Value::Object(_) => "object",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Class(_) | Value::Function(_) => "function",
        }
    }

    /// The class that constructed this value. Primitives have none.
    pub fn constructor(&self) -> Option<Arc<Class>> {
        match self {
            Value::Array(_) => Some(Class::array()),
            Value::Object(object) => Some(Arc::clone(&object.class)),
            Value::Class(_) | Value::Function(_) => Some(Class::function()),
            _ => None,
        }
    }

    /// Instance test against `class` and its descendants.
    pub fn is_instance_of(&self, class: &Arc<Class>) -> bool {
        self.constructor()
            .is_some_and(|own| own.is_subclass_of(class))
    }

    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// Strict equality.
    ///
    /// Numbers compare by value (`NaN` never equals itself, `0` equals `-0`),
    /// classes by reference, functions by name. Arrays and objects have no
    /// reference identity here and compare structurally.
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Class(a), Value::Class(b)) => Arc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => a.name == b.name,
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.strict_equals(y))
            }
            (Value::Object(a), Value::Object(b)) => {
                Arc::ptr_eq(&a.class, &b.class)
                    && a.fields.len() == b.fields.len()
                    && a.fields
                        .iter()
                        .all(|(key, x)| b.get(key).is_some_and(|y| x.strict_equals(y)))
            }
            _ => false,
        }
    }

    /// JSON-like rendering used in diagnostics; `undefined` when the value
    /// has no JSON form.
    pub fn describe(&self) -> String {
        self.to_json().unwrap_or_else(|| "undefined".to_string())
    }

    /// String coercion, as seen by regex patterns.
    pub fn text_form(&self) -> String {
        match self {
            Value::Undefined => "undefined".to_string(),
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => format_number(*n),
            Value::String(s) => s.clone(),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    if item.is_nullish() {
                        String::new()
                    } else {
                        item.text_form()
                    }
                })
                .collect::<Vec<_>>()
                .join(","),
            Value::Object(_) => "[object Object]".to_string(),
            Value::Class(class) => format!("class {} {{}}", class.name()),
            Value::Function(function) => format!("function {}() {{}}", function.name),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(object)
    }
}

impl From<Arc<Class>> for Value {
    fn from(class: Arc<Class>) -> Self {
        Value::Class(class)
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Value::Function(function)
    }
}

/// An ordered field map tagged with the class that built it.
#[derive(Debug, Clone)]
pub struct Object {
    class: Arc<Class>,
    fields: Vec<(String, Value)>,
}

impl Object {
    /// A plain object.
    pub fn new() -> Self {
        Self::instance_of(&Class::object())
    }

    /// An empty instance of `class`.
    pub fn instance_of(class: &Arc<Class>) -> Self {
        Self {
            class: Arc::clone(class),
            fields: Vec::new(),
        }
    }

    /// Builder form of [`Object::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set a field, keeping its original position when it already exists.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.fields.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn class(&self) -> &Arc<Class> {
        &self.class
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Default for Object {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut object = Object::new();
        for (key, value) in iter {
            object.insert(key, value);
        }
        object
    }
}

/// An opaque named callable carried as a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    name: String,
}

impl Function {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn anonymous() -> Self {
        Self::new("")
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
