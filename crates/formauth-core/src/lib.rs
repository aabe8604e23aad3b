//! Core formauth library (form model, components, session, auth, config).

pub mod auth;
pub mod components;
pub mod config;
pub mod form;
pub mod logging;
pub mod session;
pub mod store;
