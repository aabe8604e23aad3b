//! Application state owned by the runtime.

use formauth_core::components::LoginComponent;

use crate::features::login::LoginView;
use crate::features::validated_form::FormView;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Form,
    Login,
}

impl Screen {
    pub fn title(self) -> &'static str {
        match self {
            Screen::Form => "Form",
            Screen::Login => "Login",
        }
    }
}

pub struct AppState {
    pub screen: Screen,
    pub form: FormView,
    pub login: LoginView,
    /// Transient message in the status bar (store failures and the like).
    pub status: Option<String>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(login: LoginComponent) -> Self {
        Self {
            screen: Screen::default(),
            form: FormView::default(),
            login: LoginView::new(login),
            status: None,
            should_quit: false,
        }
    }
}
