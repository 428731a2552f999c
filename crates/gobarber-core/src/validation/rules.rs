//! Field rules and their evaluation.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{FormData, Violation};

static EMAIL_PATTERN: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// Returns `true` if `value` looks like an e-mail address.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.as_ref().is_some_and(|pattern| pattern.is_match(value))
}

/// A single check applied to a field's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// The value must be non-empty.
    Required(String),
    /// The value must be an e-mail address.
    Email(String),
    /// The value must have at least this many characters.
    MinLen(usize, String),
    /// The value must equal another field's value. Checked before the
    /// field's other rules, which are skipped when it fails.
    EqualsField(String, String),
    /// The nested rules apply only when another field is non-empty.
    WhenPresent(String, Vec<Rule>),
}

impl Rule {
    /// Appends this rule's violations to `out`.
    fn check(&self, path: &str, value: &str, data: &FormData, out: &mut Vec<Violation>) {
        let failed = match self {
            Self::Required(message) => value.is_empty().then_some(message),
            Self::Email(message) => (!value.is_empty() && !is_valid_email(value)).then_some(message),
            Self::MinLen(min, message) => {
                (!value.is_empty() && value.chars().count() < *min).then_some(message)
            }
            Self::EqualsField(other, message) => {
                let other_value = data.get(other).map_or("", String::as_str);
                (value != other_value).then_some(message)
            }
            Self::WhenPresent(other, rules) => {
                if data.get(other).is_some_and(|v| !v.is_empty()) {
                    for rule in rules {
                        rule.check(path, value, data, out);
                    }
                }
                None
            }
        };

        if let Some(message) = failed {
            out.push(Violation::new(path, message.clone()));
        }
    }
}

/// Ordered rules for one field, built fluently.
///
/// ```
/// use gobarber_core::validation::FieldRules;
///
/// let rules = FieldRules::new()
///     .required("E-mail obrigatório")
///     .email("Digite um e-mail válido");
/// assert_eq!(rules.rules().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRules {
    rules: Vec<Rule>,
}

impl FieldRules {
    /// Creates an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn required(self, message: impl Into<String>) -> Self {
        self.rule(Rule::Required(message.into()))
    }

    #[must_use]
    pub fn email(self, message: impl Into<String>) -> Self {
        self.rule(Rule::Email(message.into()))
    }

    #[must_use]
    pub fn min_len(self, min: usize, message: impl Into<String>) -> Self {
        self.rule(Rule::MinLen(min, message.into()))
    }

    #[must_use]
    pub fn equals_field(self, other: impl Into<String>, message: impl Into<String>) -> Self {
        self.rule(Rule::EqualsField(other.into(), message.into()))
    }

    /// Applies `rules` only when field `other` is non-empty.
    #[must_use]
    pub fn when_present(self, other: impl Into<String>, rules: Self) -> Self {
        self.rule(Rule::WhenPresent(other.into(), rules.rules))
    }

    /// Appends an arbitrary rule.
    #[must_use]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Returns the rules in evaluation order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Evaluates the rules against `value`.
    ///
    /// Equality rules run first. If one fails, only equality violations are
    /// reported for this field; otherwise every remaining rule runs.
    pub(crate) fn check(&self, path: &str, value: &str, data: &FormData, out: &mut Vec<Violation>) {
        let (equality, rest): (Vec<&Rule>, Vec<&Rule>) =
            self.rules.iter().partition(|rule| matches!(rule, Rule::EqualsField(..)));

        let before = out.len();
        for rule in equality {
            rule.check(path, value, data, out);
        }
        if out.len() > before {
            return;
        }

        for rule in rest {
            rule.check(path, value, data, out);
        }
    }
}
