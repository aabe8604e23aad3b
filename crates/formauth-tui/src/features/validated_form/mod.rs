//! Validated form screen.

mod render;
mod update;

use formauth_core::components::validated_form::{ACTIVITIES, FIRST_NAME, LAST_NAME};
use formauth_core::components::{Gender, ValidatedForm};
pub use render::render_form_screen;
pub use update::{handle_key, handle_paste};

/// A focusable control on the validated form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormControl {
    Text(&'static str),
    GenderOption(Gender),
    Activity(&'static str),
    Submit,
}

/// Controls in focus order.
pub fn controls() -> Vec<FormControl> {
    let mut controls = vec![FormControl::Text(FIRST_NAME), FormControl::Text(LAST_NAME)];
    controls.extend(Gender::all().iter().copied().map(FormControl::GenderOption));
    controls.extend(ACTIVITIES.iter().map(|(name, _)| FormControl::Activity(*name)));
    controls.push(FormControl::Submit);
    controls
}

#[derive(Debug, Default)]
pub struct FormView {
    pub component: ValidatedForm,
    pub focus: usize,
    pub notice: Option<Notice>,
}

/// Result line under the submit button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// JSON of the submitted value.
    Submitted(String),
    /// Enter was pressed while these fields were invalid.
    Blocked(Vec<String>),
}

impl FormView {
    pub fn focused(&self) -> FormControl {
        controls()
            .get(self.focus)
            .copied()
            .unwrap_or(FormControl::Submit)
    }
}
