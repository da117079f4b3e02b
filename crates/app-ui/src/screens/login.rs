//! Login screen
//!
//! There is no authentication behind the form: submitting always enters the
//! main container and removes the login entry from the root back stack.

use serde::{Deserialize, Serialize};

use super::{FieldId, FieldView, FormState};
use crate::navigation::{NavController, NavOptions, PopUpTo, Result, RouteId, RouteParams};

/// Fields shown on the login form
pub const LOGIN_FIELDS: [FieldId; 2] = [FieldId::Email, FieldId::Password];

/// Rendered login screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginView {
    /// Heading under the logo
    pub title: String,
    /// Email and password fields
    pub fields: Vec<FieldView>,
    /// Submit button label
    pub submit_label: String,
}

/// Render the login screen
pub fn render(state: &FormState) -> LoginView {
    LoginView {
        title: RouteId::Login.title().to_string(),
        fields: state.field_views(&LOGIN_FIELDS),
        submit_label: "Iniciar Sesión".to_string(),
    }
}

/// Submit the login form
pub fn submit<D>(root: &mut NavController<D>, state: &FormState) -> Result<()> {
    tracing::info!(
        has_email = !state.value(FieldId::Email).is_empty(),
        "Signing in"
    );
    root.navigate(
        RouteId::Main,
        &RouteParams::new(),
        NavOptions::new().pop_up_to(PopUpTo::route(RouteId::Login).inclusive()),
    )
}
