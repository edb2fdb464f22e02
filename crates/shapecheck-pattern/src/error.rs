use shapecheck_value::Value;

/// A failed match.
///
/// The message names the offending value and what was expected. Failures
/// inside object fields are wrapped on the way out, so the message reads
/// outer-to-inner: `(Key a in {...}) - (Key b in {...}) - Expected ...`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct Diagnostic {
    message: String,
    path: Vec<String>,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: Vec::new(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Field names from the outermost object down to the failing field.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub(crate) fn in_key(mut self, key: &str, parent: &Value) -> Self {
        self.message = format!("(Key {key} in {}) - {}", parent.describe(), self.message);
        self.path.insert(0, key.to_string());
        self
    }
}

/// Errors raised while decoding a pattern document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// A string that does not name a known marker.
    #[error("{path}: unknown marker \"{marker}\"")]
    UnknownMarker { path: String, marker: String },

    /// A sequence document must hold exactly one item pattern.
    #[error("{path}: sequence must contain exactly one pattern (found {len})")]
    InvalidSequence { path: String, len: usize },

    /// An operator object (`$optional`, `$oneOf`, ...) is malformed.
    #[error("{path}: invalid {operator}: {reason}")]
    InvalidOperator {
        path: String,
        operator: &'static str,
        reason: String,
    },

    /// A `$regex` source failed to compile.
    #[error("{path}: invalid regex: {source}")]
    InvalidRegex {
        path: String,
        #[source]
        source: regex::Error,
    },
}

/// Errors raised by the pattern registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The pattern file could not be loaded.
    #[error("failed to load pattern: {0}")]
    LoadFailed(String),

    /// The pattern document could not be decoded.
    #[error("invalid pattern {name}: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: DocumentError,
    },

    /// The payload did not match its pattern.
    #[error("validation failed for {name}: {source}")]
    Mismatch {
        name: String,
        #[source]
        source: Diagnostic,
    },

    /// The payload or document is not valid JSON.
    #[error("not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// No pattern registered under the given name.
    #[error("no pattern registered as {0}")]
    NoPattern(String),
}

pub type Result<T> = std::result::Result<T, RegistryError>;
