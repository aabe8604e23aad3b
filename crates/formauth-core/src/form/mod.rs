//! Form state model.
//!
//! A [`Form`] is an ordered set of named fields. Each field carries its
//! current value, the rules it must satisfy and whether the user has
//! touched it. Validity is always derived from the rules, never stored.

mod rules;

use std::fmt;

pub use rules::{Rule, RuleKind, RuleViolation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Value held by a form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Text input; `None` until the user enters something.
    Text(Option<String>),
    /// Checkbox.
    Flag(bool),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => text.as_deref(),
            FieldValue::Flag(_) => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(flag) => Some(*flag),
            FieldValue::Text(_) => None,
        }
    }

    fn to_json(&self) -> Value {
        match self {
            FieldValue::Text(Some(text)) => Value::String(text.clone()),
            FieldValue::Text(None) => Value::Null,
            FieldValue::Flag(flag) => Value::Bool(*flag),
        }
    }
}

/// A single named field.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: &'static str,
    pub label: &'static str,
    pub placeholder: Option<&'static str>,
    initial: FieldValue,
    value: FieldValue,
    rules: Vec<Rule>,
    touched: bool,
}

impl Field {
    /// Creates an empty text field.
    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self::with_initial(name, label, FieldValue::Text(None))
    }

    /// Creates a checkbox field with the given initial state.
    pub fn flag(name: &'static str, label: &'static str, initial: bool) -> Self {
        Self::with_initial(name, label, FieldValue::Flag(initial))
    }

    fn with_initial(name: &'static str, label: &'static str, initial: FieldValue) -> Self {
        Self {
            name,
            label,
            placeholder: None,
            value: initial.clone(),
            initial,
            rules: Vec::new(),
            touched: false,
        }
    }

    #[must_use]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    #[must_use]
    pub fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    /// Returns every failing rule, in declaration order.
    pub fn errors(&self) -> Vec<RuleViolation> {
        self.rules
            .iter()
            .filter_map(|rule| rule.check(&self.value).err())
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.rules.iter().all(|rule| rule.check(&self.value).is_ok())
    }

    /// Returns true if the field has failed rules with the given kind.
    pub fn has_error(&self, kind: RuleKind) -> bool {
        self.errors().iter().any(|v| v.kind == kind)
    }

    /// Invalid fields only surface an error once the user touched them.
    pub fn show_error(&self) -> bool {
        self.touched && !self.is_valid()
    }

    fn reset(&mut self) {
        self.value = self.initial.clone();
        self.touched = false;
    }
}

/// Errors from form operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// No field with this name exists.
    UnknownField(String),
    /// The value kind does not match the field kind.
    TypeMismatch { field: String, expected: &'static str },
    /// Submit was attempted while rules fail (field names listed).
    SubmitDisabled(Vec<String>),
    /// A login exchange is already running.
    SubmitInFlight,
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::UnknownField(name) => write!(f, "unknown field '{name}'"),
            FormError::TypeMismatch { field, expected } => {
                write!(f, "field '{field}' expects a {expected} value")
            }
            FormError::SubmitDisabled(fields) => {
                write!(f, "submit is disabled: invalid {}", fields.join(", "))
            }
            FormError::SubmitInFlight => write!(f, "a submission is already in progress"),
        }
    }
}

impl std::error::Error for FormError {}

/// An ordered collection of fields.
#[derive(Debug, Clone, Default)]
pub struct Form {
    fields: Vec<Field>,
}

impl Form {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    fn field_mut(&mut self, name: &str) -> Result<&mut Field, FormError> {
        self.fields
            .iter_mut()
            .find(|f| f.name == name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    /// Sets a text field. Editing marks the field as touched.
    ///
    /// # Errors
    /// Returns an error for unknown fields or checkbox fields.
    pub fn set_text(&mut self, name: &str, text: Option<String>) -> Result<(), FormError> {
        let field = self.field_mut(name)?;
        if !matches!(field.value, FieldValue::Text(_)) {
            return Err(FormError::TypeMismatch {
                field: name.to_string(),
                expected: "boolean",
            });
        }
        field.value = FieldValue::Text(text);
        field.touched = true;
        Ok(())
    }

    /// Sets a checkbox field. Editing marks the field as touched.
    ///
    /// # Errors
    /// Returns an error for unknown fields or text fields.
    pub fn set_flag(&mut self, name: &str, flag: bool) -> Result<(), FormError> {
        let field = self.field_mut(name)?;
        if !matches!(field.value, FieldValue::Flag(_)) {
            return Err(FormError::TypeMismatch {
                field: name.to_string(),
                expected: "text",
            });
        }
        field.value = FieldValue::Flag(flag);
        field.touched = true;
        Ok(())
    }

    /// Marks a field as touched without changing its value (focus left it).
    ///
    /// # Errors
    /// Returns an error for unknown fields.
    pub fn touch(&mut self, name: &str) -> Result<(), FormError> {
        self.field_mut(name)?.touched = true;
        Ok(())
    }

    pub fn touch_all(&mut self) {
        for field in &mut self.fields {
            field.touched = true;
        }
    }

    /// The form is valid iff every rule of every field passes.
    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(Field::is_valid)
    }

    /// Names of the fields with at least one failing rule.
    pub fn invalid_fields(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|f| !f.is_valid())
            .map(|f| f.name.to_string())
            .collect()
    }

    /// Failing rules per invalid field.
    pub fn errors(&self) -> Vec<(&'static str, Vec<RuleViolation>)> {
        self.fields
            .iter()
            .filter(|f| !f.is_valid())
            .map(|f| (f.name, f.errors()))
            .collect()
    }

    /// Current values as a JSON object, keyed by field name in declaration order.
    pub fn value(&self) -> Value {
        let map: Map<String, Value> = self
            .fields
            .iter()
            .map(|f| (f.name.to_string(), f.value.to_json()))
            .collect();
        Value::Object(map)
    }

    /// Restores initial values and clears every touched flag.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.reset();
        }
    }
}
