//! Declarative form validation.
//!
//! A [`Schema`] lists fields with their [`FieldRules`]. Validation evaluates
//! every rule of every field and returns all violations at once as a
//! [`ValidationErrors`] value; nothing panics. Within a field, a failed
//! equality rule hides the remaining rules.
//!
//! # Example
//!
//! ```
//! use gobarber_core::validation::{FieldRules, FormData, Schema};
//!
//! let schema = Schema::new()
//!     .field("email", FieldRules::new().required("E-mail obrigatório").email("Digite um e-mail válido"))
//!     .field("password", FieldRules::new().required("Senha obrigatória"));
//!
//! let mut data = FormData::new();
//! data.insert("email".to_string(), "not-valid-email".to_string());
//!
//! let errors = schema.validate(&data).unwrap_err();
//! let fields = errors.field_errors();
//! assert_eq!(fields["email"], "Digite um e-mail válido");
//! assert_eq!(fields["password"], "Senha obrigatória");
//! ```

mod rules;

use std::collections::BTreeMap;

use thiserror::Error;

pub use rules::{is_valid_email, FieldRules, Rule};

/// Raw form input keyed by field name. Missing fields read as empty.
pub type FormData = BTreeMap<String, String>;

/// One message per field, ready to show next to the input.
pub type FieldErrors = BTreeMap<String, String>;

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Dotted path of the offending field.
    pub path: String,
    /// Human-readable message.
    pub message: String,
}

impl Violation {
    /// Creates a violation.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { path: path.into(), message: message.into() }
    }

    /// Returns the first segment of the dotted path.
    pub fn field(&self) -> &str {
        self.path.split('.').next().unwrap_or(&self.path)
    }
}

/// Every violation found by one validation run, in evaluation order.
///
/// Never empty when returned from [`Schema::validate`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Validation failed: {}", summary(.violations))]
pub struct ValidationErrors {
    violations: Vec<Violation>,
}

fn summary(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}: {}", v.path, v.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    /// Wraps a list of violations.
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Returns the violations in evaluation order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Maps each field (first path segment) to its last violation message.
    pub fn field_errors(&self) -> FieldErrors {
        self.violations.iter().map(|v| (v.field().to_string(), v.message.clone())).collect()
    }
}

/// Ordered set of validated fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<(String, FieldRules)>,
}

impl Schema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field. Fields are validated in insertion order.
    #[must_use]
    pub fn field(mut self, path: impl Into<String>, rules: FieldRules) -> Self {
        self.fields.push((path.into(), rules));
        self
    }

    /// Validates `data` against every field.
    ///
    /// # Errors
    /// Returns every violation found, across all fields.
    pub fn validate(&self, data: &FormData) -> Result<(), ValidationErrors> {
        let mut violations = Vec::new();

        for (path, rules) in &self.fields {
            let value = data.get(path).map_or("", String::as_str);
            rules.check(path, value, data, &mut violations);
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors::new(violations))
        }
    }
}
