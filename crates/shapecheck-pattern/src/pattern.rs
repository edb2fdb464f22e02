use std::fmt;
use std::sync::Arc;

use regex::Regex;
use shapecheck_value::{Class, Value};

use crate::error::Diagnostic;

/// The three primitive type descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    String,
    Boolean,
    Number,
}

impl ScalarKind {
    /// The one-word kind name, as reported by `Value::type_of`.
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Boolean => "boolean",
            ScalarKind::Number => "number",
        }
    }

    /// The descriptor's display name.
    pub fn name(self) -> &'static str {
        match self {
            ScalarKind::String => "String",
            ScalarKind::Boolean => "Boolean",
            ScalarKind::Number => "Number",
        }
    }
}

type CheckFn = dyn Fn(&Value) -> Result<bool, Diagnostic> + Send + Sync;

/// A callable pattern.
///
/// Returns the verdict, or its own [`Diagnostic`] which the matcher
/// propagates unchanged.
#[derive(Clone)]
pub struct Predicate {
    name: Option<String>,
    check: Arc<CheckFn>,
}

impl Predicate {
    pub fn new<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Value) -> Result<bool, Diagnostic> + Send + Sync + 'static,
    {
        Self {
            name: Some(name.into()),
            check: Arc::new(check),
        }
    }

    pub fn anonymous<F>(check: F) -> Self
    where
        F: Fn(&Value) -> Result<bool, Diagnostic> + Send + Sync + 'static,
    {
        Self {
            name: None,
            check: Arc::new(check),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn call(&self, value: &Value) -> Result<bool, Diagnostic> {
        (self.check)(value)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Field name to sub-pattern, in declaration order.
#[derive(Debug, Clone)]
pub struct Mapping {
    class: Arc<Class>,
    fields: Vec<(String, Pattern)>,
}

impl Mapping {
    /// A plain-object shape.
    pub fn new() -> Self {
        Self::instance_of(&Class::object())
    }

    /// A shape whose strict check expects values built by `class`.
    pub fn instance_of(class: &Arc<Class>) -> Self {
        Self {
            class: Arc::clone(class),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, pattern: impl Into<Pattern>) -> Self {
        self.insert(name, pattern);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, pattern: impl Into<Pattern>) {
        let name = name.into();
        let pattern = pattern.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = pattern,
            None => self.fields.push((name, pattern)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Pattern> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, pattern)| pattern)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Pattern)> {
        self.fields.iter().map(|(name, pattern)| (name.as_str(), pattern))
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

impl Default for Mapping {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, P: Into<Pattern>> FromIterator<(K, P)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, P)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (name, pattern) in iter {
            mapping.insert(name, pattern);
        }
        mapping
    }
}

/// A type descriptor for runtime values.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Value must have the primitive type.
    Scalar(ScalarKind),
    /// Value must satisfy the callable.
    Predicate(Predicate),
    /// Value must be an instance of the class, or a class of the same name.
    ClassOf(Arc<Class>),
    /// Value must be an array whose every element satisfies the sub-pattern.
    Sequence(Box<Pattern>),
    /// Value's text form must match.
    Regex(Regex),
    /// Value must be an object satisfying each field pattern.
    Mapping(Mapping),
    /// Value must be strictly equal.
    Literal(Value),
}

impl Pattern {
    pub fn string() -> Self {
        Pattern::Scalar(ScalarKind::String)
    }

    pub fn number() -> Self {
        Pattern::Scalar(ScalarKind::Number)
    }

    pub fn boolean() -> Self {
        Pattern::Scalar(ScalarKind::Boolean)
    }

    /// Any object, array, class or function.
    pub fn object() -> Self {
        Pattern::ClassOf(Class::object())
    }

    /// Any array, regardless of its elements.
    pub fn array() -> Self {
        Pattern::ClassOf(Class::array())
    }

    /// Any class or function.
    pub fn function() -> Self {
        Pattern::ClassOf(Class::function())
    }

    pub fn date() -> Self {
        Pattern::ClassOf(Class::date())
    }

    pub fn class_of(class: &Arc<Class>) -> Self {
        Pattern::ClassOf(Arc::clone(class))
    }

    pub fn sequence(item: impl Into<Pattern>) -> Self {
        Pattern::Sequence(Box::new(item.into()))
    }

    pub fn regex(source: &str) -> Result<Self, regex::Error> {
        Regex::new(source).map(Pattern::Regex)
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        Pattern::Literal(value.into())
    }

    pub fn predicate<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Value) -> Result<bool, Diagnostic> + Send + Sync + 'static,
    {
        Pattern::Predicate(Predicate::new(name, check))
    }

    /// Plain-object shape from `(field, pattern)` pairs.
    pub fn shape<K, P, I>(fields: I) -> Self
    where
        K: Into<String>,
        P: Into<Pattern>,
        I: IntoIterator<Item = (K, P)>,
    {
        Pattern::Mapping(fields.into_iter().collect())
    }

    /// The primitive kind this pattern requires, if it is a scalar descriptor.
    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        match self {
            Pattern::Scalar(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Name exposed by descriptors, classes and named predicates.
    pub fn name(&self) -> Option<&str> {
        match self {
            Pattern::Scalar(kind) => Some(kind.name()),
            Pattern::Predicate(predicate) => predicate.name(),
            Pattern::ClassOf(class) => Some(class.name()),
            _ => None,
        }
    }

    /// What a value was expected to be, for mismatch messages.
    pub fn expected_type(&self) -> String {
        match self {
            Pattern::Literal(value) => value.describe(),
            Pattern::ClassOf(class) if class.is_native() && class.name() == "Function" => {
                "function".to_string()
            }
            Pattern::Regex(regex) => format!("/{}/", regex.as_str()),
            Pattern::Sequence(item) => format!("[{}]", item.expected_type()),
            Pattern::Mapping(mapping) => mapping.class().name().to_string(),
            other => other.name().unwrap_or("predicate").to_string(),
        }
    }

    /// Label used when listing alternatives.
    ///
    /// Sequences render as `[(item)]`. Kinds without a name still get a
    /// readable label: literals as their JSON text, regexes as `/source/`,
    /// mappings as their class name and unnamed predicates as `anonymous`.
    pub fn display_name(&self) -> String {
        match self {
            Pattern::Sequence(item) => format!("[({})]", item.display_name()),
            Pattern::Literal(value) => value.describe(),
            Pattern::Regex(regex) => format!("/{}/", regex.as_str()),
            Pattern::Mapping(mapping) => mapping.class().name().to_string(),
            other => other.name().unwrap_or("anonymous").to_string(),
        }
    }

    /// Whether a field declared with this pattern counts as declared.
    /// Falsy literals (`null`, `false`, `0`, `""`) do not.
    pub fn is_truthy(&self) -> bool {
        match self {
            Pattern::Literal(value) => value.is_truthy(),
            _ => true,
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Pattern::Scalar(_) => "scalar",
            Pattern::Predicate(_) => "predicate",
            Pattern::ClassOf(_) => "class",
            Pattern::Sequence(_) => "sequence",
            Pattern::Regex(_) => "regex",
            Pattern::Mapping(_) => "mapping",
            Pattern::Literal(_) => "literal",
        }
    }
}

impl From<Predicate> for Pattern {
    fn from(predicate: Predicate) -> Self {
        Pattern::Predicate(predicate)
    }
}

impl From<Mapping> for Pattern {
    fn from(mapping: Mapping) -> Self {
        Pattern::Mapping(mapping)
    }
}

impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Self {
        Pattern::Regex(regex)
    }
}

impl From<Arc<Class>> for Pattern {
    fn from(class: Arc<Class>) -> Self {
        Pattern::ClassOf(class)
    }
}

impl From<&str> for Pattern {
    fn from(text: &str) -> Self {
        Pattern::Literal(Value::from(text))
    }
}

/// Any value read as a pattern: classes become class patterns, arrays
/// sequence patterns over their first element, objects shapes carrying
/// the object's class, everything else a literal.
impl From<Value> for Pattern {
    fn from(value: Value) -> Self {
        match value {
            Value::Class(class) => Pattern::ClassOf(class),
            Value::Array(items) => {
                let item = items.into_iter().next().unwrap_or(Value::Undefined);
                Pattern::sequence(Pattern::from(item))
            }
            Value::Object(object) => {
                let mut mapping = Mapping::instance_of(object.class());
                for (name, field) in object.iter() {
                    mapping.insert(name, Pattern::from(field.clone()));
                }
                Pattern::Mapping(mapping)
            }
            other => Pattern::Literal(other),
        }
    }
}
