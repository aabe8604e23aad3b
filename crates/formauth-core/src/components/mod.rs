//! UI-independent components.
//!
//! Each component owns its form and exposes the operations a front end
//! (terminal UI or CLI) binds its controls to.

pub mod login;
pub mod validated_form;

pub use login::{LoginComponent, LoginPhase};
pub use validated_form::{Gender, Submission, ValidatedForm};
