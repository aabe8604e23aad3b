//! Screen features. Each owns its view state, key handling and rendering.

pub mod login;
pub mod validated_form;
