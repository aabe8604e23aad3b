//! The validated form: names, gender and activities.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::form::{Field, FieldValue, Form, FormError, Rule};
use crate::logging::SUBMIT_TARGET;

pub const FIRST_NAME: &str = "firstName";
pub const LAST_NAME: &str = "lastName";
pub const GENDER: &str = "gender";
pub const HIKING: &str = "hiking";
pub const RUNNING: &str = "running";
pub const SWIMMING: &str = "swimming";

/// Activities in display order (field name, label).
pub const ACTIVITIES: [(&str, &str); 3] = [
    (HIKING, "Hiking"),
    (SWIMMING, "Swimming"),
    (RUNNING, "Running"),
];

pub const GENDER_REQUIRED_MESSAGE: &str = "You must select a gender.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn all() -> &'static [Gender] {
        &[Gender::Male, Gender::Female]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(format!("unknown gender '{other}'")),
        }
    }
}

/// Values produced by a successful submit, in form order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub hiking: bool,
    pub running: bool,
    pub swimming: bool,
}

/// Form component with per-field rules and a gated submit.
#[derive(Debug, Clone)]
pub struct ValidatedForm {
    form: Form,
}

impl Default for ValidatedForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidatedForm {
    pub fn new() -> Self {
        let form = Form::new(vec![
            Field::text(FIRST_NAME, "First Name")
                .placeholder("John")
                .rule(Rule::Required),
            Field::text(LAST_NAME, "Last Name")
                .placeholder("Doe")
                .rule(Rule::Required)
                .rule(Rule::MinLength(5))
                .rule(Rule::MaxLength(10)),
            Field::text(GENDER, "Gender").rule(Rule::Required),
            Field::flag(HIKING, "Hiking", false),
            Field::flag(RUNNING, "Running", false),
            Field::flag(SWIMMING, "Swimming", false),
        ]);
        Self { form }
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    /// Selects a gender option.
    ///
    /// # Errors
    /// Never fails for the built-in field set.
    pub fn select_gender(&mut self, gender: Gender) -> Result<(), FormError> {
        self.form.set_text(GENDER, Some(gender.as_str().to_string()))
    }

    pub fn selected_gender(&self) -> Option<Gender> {
        self.form
            .field(GENDER)
            .and_then(|f| f.value().as_text())
            .and_then(|s| s.parse().ok())
    }

    /// Submit is enabled iff every rule passes.
    pub fn can_submit(&self) -> bool {
        self.form.is_valid()
    }

    /// Error line shown under a field, if any.
    ///
    /// Text fields surface their first failing rule as soon as they are
    /// invalid; gender uses its fixed message.
    pub fn field_message(&self, name: &str) -> Option<String> {
        let field = self.form.field(name)?;
        let first = field.errors().into_iter().next()?;
        if name == GENDER {
            return Some(GENDER_REQUIRED_MESSAGE.to_string());
        }
        Some(format!("{} {first}", field.label))
    }

    /// Collects the values and emits the submission trace.
    ///
    /// # Errors
    /// Returns `SubmitDisabled` listing the invalid fields when any rule
    /// fails.
    pub fn submit(&self) -> Result<Submission, FormError> {
        if !self.can_submit() {
            return Err(FormError::SubmitDisabled(self.form.invalid_fields()));
        }

        let submission = Submission {
            first_name: self.text(FIRST_NAME),
            last_name: self.text(LAST_NAME),
            gender: self.text(GENDER),
            hiking: self.flag(HIKING),
            running: self.flag(RUNNING),
            swimming: self.flag(SWIMMING),
        };

        tracing::info!(target: SUBMIT_TARGET, value = %self.form.value(), "Form submitted");
        Ok(submission)
    }

    fn text(&self, name: &str) -> String {
        self.form
            .field(name)
            .and_then(|f| f.value().as_text())
            .unwrap_or_default()
            .to_string()
    }

    fn flag(&self, name: &str) -> bool {
        self.form
            .field(name)
            .map(Field::value)
            .and_then(FieldValue::as_flag)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn lines(&self) -> Vec<String> {
            String::from_utf8(self.0.lock().unwrap().clone())
                .unwrap()
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    fn fill(form: &mut ValidatedForm, first: &str, last: &str) {
        let f = form.form_mut();
        f.set_text(FIRST_NAME, Some(first.to_string())).unwrap();
        f.set_text(LAST_NAME, Some(last.to_string())).unwrap();
    }

    #[test]
    fn test_new_form_disables_submit() {
        let form = ValidatedForm::new();
        assert!(!form.can_submit());
        assert_eq!(
            form.submit(),
            Err(FormError::SubmitDisabled(vec![
                FIRST_NAME.to_string(),
                LAST_NAME.to_string(),
                GENDER.to_string(),
            ]))
        );
    }

    #[test]
    fn test_last_name_length_boundaries() {
        for (last, ok) in [
            ("Smit", false),
            ("Smith", true),
            ("Smithersen", true),
            ("Smithersons", false),
        ] {
            let mut form = ValidatedForm::new();
            fill(&mut form, "John", last);
            form.select_gender(Gender::Male).unwrap();
            assert_eq!(form.can_submit(), ok, "lastName {last:?}");
        }
    }

    #[test]
    fn test_submit_returns_exact_values() {
        let mut form = ValidatedForm::new();
        fill(&mut form, "John", "Smith");
        form.select_gender(Gender::Male).unwrap();
        form.form_mut().set_flag(HIKING, true).unwrap();

        let submission = form.submit().unwrap();
        assert_eq!(
            serde_json::to_value(&submission).unwrap(),
            json!({
                "firstName": "John",
                "lastName": "Smith",
                "gender": "Male",
                "hiking": true,
                "running": false,
                "swimming": false,
            })
        );
        assert_eq!(form.form().value(), serde_json::to_value(&submission).unwrap());
    }

    #[test]
    fn test_submit_traces_value_map_in_field_order() {
        let mut form = ValidatedForm::new();
        fill(&mut form, "John", "Smith");
        form.select_gender(Gender::Male).unwrap();
        form.form_mut().set_flag(HIKING, true).unwrap();

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .with_target(true)
            .finish();
        tracing::subscriber::with_default(subscriber, || form.submit().unwrap());

        let lines = captured.lines();
        let submitted: Vec<&String> = lines
            .iter()
            .filter(|l| l.contains("Form submitted"))
            .collect();
        assert_eq!(submitted.len(), 1, "{lines:?}");
        assert!(submitted[0].contains(SUBMIT_TARGET), "{}", submitted[0]);
        assert!(
            submitted[0].contains(
                r#"value={"firstName":"John","lastName":"Smith","gender":"Male","hiking":true,"running":false,"swimming":false}"#
            ),
            "{}",
            submitted[0]
        );
    }

    #[test]
    fn test_gender_message_and_selection() {
        let mut form = ValidatedForm::new();
        assert_eq!(
            form.field_message(GENDER).as_deref(),
            Some(GENDER_REQUIRED_MESSAGE)
        );
        form.select_gender(Gender::Female).unwrap();
        assert_eq!(form.selected_gender(), Some(Gender::Female));
        assert_eq!(form.field_message(GENDER), None);
    }

    #[test]
    fn test_field_message_names_rule() {
        let mut form = ValidatedForm::new();
        fill(&mut form, "John", "Doe");
        assert_eq!(
            form.field_message(LAST_NAME).as_deref(),
            Some("Last Name must be at least 5 characters (got 3)")
        );
        assert_eq!(form.field_message(FIRST_NAME), None);
    }

    #[test]
    fn test_gender_parse_is_case_insensitive() {
        assert_eq!("male".parse::<Gender>(), Ok(Gender::Male));
        assert_eq!("FEMALE".parse::<Gender>(), Ok(Gender::Female));
        assert!("other".parse::<Gender>().is_err());
    }
}
