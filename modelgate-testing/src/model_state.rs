// Collected field errors

use modelgate_validation::FieldError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Field errors gathered by a host, keyed by full model path.
///
/// The root model's own errors use its prefix, or an empty key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModelState {
    errors: BTreeMap<String, Vec<String>>,
}

impl ModelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.errors.entry(key.into()).or_default().push(message.into());
    }

    /// Add `errors`, keyed below `prefix`
    pub fn add_field_errors(&mut self, prefix: &str, errors: Vec<FieldError>) {
        for error in errors {
            self.add_error(modelgate_validation::join_path(prefix, &error.path), error.message);
        }
    }

    /// Total number of errors
    pub fn count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_valid_field(&self, key: &str) -> bool {
        !self.errors.contains_key(key)
    }

    /// First error for `key`
    pub fn error(&self, key: &str) -> Option<&str> {
        self.errors.get(key).and_then(|e| e.first()).map(String::as_str)
    }

    pub fn errors(&self, key: &str) -> &[String] {
        self.errors.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Keys with at least one error, in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    pub fn merge(&mut self, other: ModelState) {
        for (key, messages) in other.errors {
            self.errors.entry(key).or_default().extend(messages);
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "errors": self.errors })
    }
}

impl fmt::Display for ModelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, messages) in &self.errors {
            for message in messages {
                writeln!(f, "{}: {}", key, message)?;
            }
        }
        Ok(())
    }
}
