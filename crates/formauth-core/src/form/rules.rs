//! Field validation rules.
//!
//! Rules are pure predicates over a [`FieldValue`]. Length rules skip empty
//! text so that presence is only ever reported by [`Rule::Required`].

use std::fmt;

use serde::{Deserialize, Serialize};

use super::FieldValue;

/// A validation rule attached to a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "length", rename_all = "snake_case")]
pub enum Rule {
    /// Text must be present and non-empty.
    Required,
    /// Text must have at least this many characters.
    MinLength(usize),
    /// Text must have at most this many characters.
    MaxLength(usize),
}

/// Kind tag of a failed rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Required,
    MinLength,
    MaxLength,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Required => write!(f, "required"),
            RuleKind::MinLength => write!(f, "min_length"),
            RuleKind::MaxLength => write!(f, "max_length"),
        }
    }
}

/// A rule that did not pass, with the lengths involved for length rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleViolation {
    pub kind: RuleKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_length: Option<usize>,
}

impl RuleViolation {
    fn required() -> Self {
        Self {
            kind: RuleKind::Required,
            required_length: None,
            actual_length: None,
        }
    }

    fn length(kind: RuleKind, required: usize, actual: usize) -> Self {
        Self {
            kind,
            required_length: Some(required),
            actual_length: Some(actual),
        }
    }
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.required_length, self.actual_length) {
            (RuleKind::MinLength, Some(min), Some(actual)) => {
                write!(f, "must be at least {min} characters (got {actual})")
            }
            (RuleKind::MaxLength, Some(max), Some(actual)) => {
                write!(f, "must be at most {max} characters (got {actual})")
            }
            _ => write!(f, "is required"),
        }
    }
}

impl Rule {
    /// Returns the kind tag of this rule.
    pub fn kind(&self) -> RuleKind {
        match self {
            Rule::Required => RuleKind::Required,
            Rule::MinLength(_) => RuleKind::MinLength,
            Rule::MaxLength(_) => RuleKind::MaxLength,
        }
    }

    /// Checks a value against this rule.
    ///
    /// # Errors
    /// Returns the violation when the value does not satisfy the rule.
    pub fn check(&self, value: &FieldValue) -> Result<(), RuleViolation> {
        let text = match value {
            FieldValue::Flag(_) => return Ok(()),
            FieldValue::Text(text) => text.as_deref().unwrap_or(""),
        };

        match *self {
            Rule::Required => {
                if text.is_empty() {
                    Err(RuleViolation::required())
                } else {
                    Ok(())
                }
            }
            Rule::MinLength(min) => {
                let count = text.chars().count();
                if text.is_empty() || count >= min {
                    Ok(())
                } else {
                    Err(RuleViolation::length(RuleKind::MinLength, min, count))
                }
            }
            Rule::MaxLength(max) => {
                let count = text.chars().count();
                if count <= max {
                    Ok(())
                } else {
                    Err(RuleViolation::length(RuleKind::MaxLength, max, count))
                }
            }
        }
    }
}
