// Validation failures and results

use serde::Serialize;
use std::fmt;

/// A single rule that failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    /// Path of the failing property, relative to the validated instance
    pub property_path: String,

    /// Error message
    pub message: String,

    /// Validation constraint that failed
    pub constraint: String,

    /// Value that failed validation (optional)
    pub attempted_value: Option<String>,
}

impl ValidationFailure {
    /// Create a new validation failure
    pub fn new(property_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            property_path: property_path.into(),
            message: message.into(),
            constraint: "custom".to_string(),
            attempted_value: None,
        }
    }

    /// Set the constraint name
    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.constraint = constraint.into();
        self
    }

    /// Set the invalid value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.attempted_value = Some(value.into());
        self
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property_path, self.message)
    }
}

/// Failures produced by one validator run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub failures: Vec<ValidationFailure>,
}

impl ValidationResult {
    pub fn new(failures: Vec<ValidationFailure>) -> Self {
        Self { failures }
    }

    /// A result without failures
    pub fn valid() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn add(&mut self, failure: ValidationFailure) {
        self.failures.push(failure);
    }

    /// Append the failures of another result
    pub fn merge(&mut self, other: ValidationResult) {
        self.failures.extend(other.failures);
    }

    /// Failures for a specific property path
    pub fn failures_for(&self, property_path: &str) -> Vec<&ValidationFailure> {
        self.failures
            .iter()
            .filter(|f| f.property_path == property_path)
            .collect()
    }

    /// Convert to the (path, message) pairs a host attaches to a node
    pub fn into_field_errors(self) -> Vec<FieldError> {
        self.failures
            .into_iter()
            .map(|f| FieldError::new(f.property_path, f.message))
            .collect()
    }

    /// Convert to JSON representation
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "errors": self.failures.iter().map(|f| {
                serde_json::json!({
                    "property": f.property_path,
                    "message": f.message,
                    "constraint": f.constraint,
                    "value": f.attempted_value,
                })
            }).collect::<Vec<_>>()
        })
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for failure in &self.failures {
            writeln!(f, "{}", failure)?;
        }
        Ok(())
    }
}

impl From<Vec<ValidationFailure>> for ValidationResult {
    fn from(failures: Vec<ValidationFailure>) -> Self {
        Self::new(failures)
    }
}

/// Field-level error surfaced to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_builder() {
        let failure = ValidationFailure::new("Email", "'Email' is not a valid email address.")
            .with_constraint("email")
            .with_value("foo");

        assert_eq!(failure.property_path, "Email");
        assert_eq!(failure.constraint, "email");
        assert_eq!(failure.attempted_value.as_deref(), Some("foo"));
        assert_eq!(
            failure.to_string(),
            "Email: 'Email' is not a valid email address."
        );
    }

    #[test]
    fn test_result_merge_and_lookup() {
        let mut result = ValidationResult::valid();
        assert!(result.is_valid());

        result.add(ValidationFailure::new("Surname", "required"));
        result.merge(ValidationResult::from(vec![
            ValidationFailure::new("Surname", "too short"),
            ValidationFailure::new("Address1", "required"),
        ]));

        assert_eq!(result.len(), 3);
        assert_eq!(result.failures_for("Surname").len(), 2);
        assert!(result.failures_for("Forename").is_empty());
    }

    #[test]
    fn test_into_field_errors_keeps_order() {
        let result = ValidationResult::from(vec![
            ValidationFailure::new("Child.Name", "NotNullInjected"),
            ValidationFailure::new("Id", "required"),
        ]);

        assert_eq!(
            result.into_field_errors(),
            vec![
                FieldError::new("Child.Name", "NotNullInjected"),
                FieldError::new("Id", "required"),
            ]
        );
    }

    #[test]
    fn test_to_json() {
        let result = ValidationResult::from(vec![ValidationFailure::new("Id", "required")]);
        let json = result.to_json();
        assert_eq!(json["errors"][0]["property"], "Id");
        assert_eq!(json["errors"][0]["constraint"], "custom");
    }
}
