//! Non-interactive validated form submit.

use anyhow::{Context, Result};
use formauth_core::components::validated_form::{FIRST_NAME, HIKING, LAST_NAME, RUNNING, SWIMMING};
use formauth_core::components::{Gender, ValidatedForm};
use formauth_core::form::FormError;

pub struct FormArgs {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<Gender>,
    pub hiking: bool,
    pub running: bool,
    pub swimming: bool,
}

/// Fills the form from the arguments and submits it.
///
/// Prints the submitted value as JSON on stdout, or one line per failing
/// field on stderr.
pub fn run(args: &FormArgs) -> Result<()> {
    let form = fill(args)?;

    match form.submit() {
        Ok(submission) => {
            let json = serde_json::to_string_pretty(&submission)
                .context("encode submission")?;
            println!("{json}");
            Ok(())
        }
        Err(FormError::SubmitDisabled(fields)) => {
            for name in &fields {
                if let Some(message) = form.field_message(name) {
                    eprintln!("{name}: {message}");
                }
            }
            anyhow::bail!("Form is invalid ({} field(s) failing)", fields.len())
        }
        Err(err) => Err(err.into()),
    }
}

fn fill(args: &FormArgs) -> Result<ValidatedForm> {
    let mut form = ValidatedForm::new();
    {
        let f = form.form_mut();
        f.set_text(FIRST_NAME, args.first_name.clone())?;
        f.set_text(LAST_NAME, args.last_name.clone())?;
        f.set_flag(HIKING, args.hiking)?;
        f.set_flag(RUNNING, args.running)?;
        f.set_flag(SWIMMING, args.swimming)?;
    }
    if let Some(gender) = args.gender {
        form.select_gender(gender)?;
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> FormArgs {
        FormArgs {
            first_name: Some("John".to_string()),
            last_name: Some("Smith".to_string()),
            gender: Some(Gender::Male),
            hiking: true,
            running: false,
            swimming: false,
        }
    }

    #[test]
    fn test_fill_sets_all_fields() {
        let form = fill(&args()).unwrap();
        assert!(form.can_submit());
        assert_eq!(form.selected_gender(), Some(Gender::Male));
    }

    #[test]
    fn test_run_rejects_short_last_name() {
        let mut a = args();
        a.last_name = Some("Doe".to_string());
        let err = run(&a).unwrap_err();
        assert!(err.to_string().contains("1 field(s) failing"));
    }
}
