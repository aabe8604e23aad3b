//! Login screen.

mod render;
mod update;

use formauth_core::components::LoginComponent;
use formauth_core::components::login::{EMAIL, PASSWORD};
pub use render::render_login_screen;
pub use update::{handle_key, handle_paste};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginControl {
    Text(&'static str),
    Submit,
}

pub const CONTROLS: [LoginControl; 3] = [
    LoginControl::Text(EMAIL),
    LoginControl::Text(PASSWORD),
    LoginControl::Submit,
];

pub struct LoginView {
    pub component: LoginComponent,
    pub focus: usize,
}

impl LoginView {
    pub fn new(component: LoginComponent) -> Self {
        Self {
            component,
            focus: 0,
        }
    }

    pub fn focused(&self) -> LoginControl {
        CONTROLS
            .get(self.focus)
            .copied()
            .unwrap_or(LoginControl::Submit)
    }
}
