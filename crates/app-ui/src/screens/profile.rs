//! Profile tab

use serde::{Deserialize, Serialize};

use super::RootScreen;
use crate::navigation::{NavController, NavOptions, PopUpTo, Result, RouteId, RouteParams};

/// Rendered profile tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileView {
    /// Heading
    pub title: String,
    /// Logout button label
    pub logout_label: String,
}

/// Render the profile tab
pub fn render() -> ProfileView {
    ProfileView {
        title: RouteId::Profile.title().to_string(),
        logout_label: "Cerrar Sesión".to_string(),
    }
}

/// Log out: clear the whole root graph and show the login form
pub fn logout(root: &mut NavController<RootScreen>) -> Result<()> {
    tracing::info!("Signing out");
    root.navigate(
        RouteId::Login,
        &RouteParams::new(),
        NavOptions::new().pop_up_to(PopUpTo::graph().inclusive()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::RouteRegistry;
    use crate::screens::root_graph;
    use std::sync::Arc;

    #[test]
    fn test_render_profile() {
        let view = render();
        assert_eq!(view.title, "Perfil del Usuario");
        assert_eq!(view.logout_label, "Cerrar Sesión");
    }

    #[test]
    fn test_logout_clears_root_stack() {
        let graph = root_graph(Arc::new(RouteRegistry::standard().unwrap()), "N/A").unwrap();
        let mut root = NavController::new("root", graph).unwrap();
        root.navigate(
            RouteId::Main,
            &RouteParams::new(),
            NavOptions::new().pop_up_to(PopUpTo::route(RouteId::Login).inclusive()),
        )
        .unwrap();
        root.navigate_to(RouteId::Search).unwrap();

        logout(&mut root).unwrap();
        assert_eq!(root.routes(), [RouteId::Login]);
        assert!(!root.can_go_back());
    }
}
