//! Main container: bottom bar plus the nested tab scope
//!
//! The container is bound to one `Main` entry of the root back stack. Its tab
//! controller, and with it every saved tab segment, lives exactly as long as
//! that entry; the host drops the container when the entry leaves the stack.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use super::{tab_graph, TabScreen};
use crate::navigation::{
    NavController, NavOptions, NavigationError, Result, RouteId, RouteParams, RouteRegistry,
};

/// Tabs in bottom bar order
pub const TABS: [RouteId; 3] = [RouteId::Dashboard, RouteId::ShipmentList, RouteId::Profile];

/// A bottom bar item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BottomBarItem {
    /// Tab route
    pub route: RouteId,
    /// Label
    pub label: String,
    /// Icon name
    pub icon: String,
    /// Whether this tab is the current tab destination
    pub selected: bool,
}

fn tab_label(route: RouteId) -> &'static str {
    match route {
        RouteId::Dashboard => "Dashboard",
        RouteId::ShipmentList => "Envíos",
        RouteId::Profile => "Perfil",
        _ => "",
    }
}

fn tab_icon(route: RouteId) -> &'static str {
    match route {
        RouteId::Dashboard => "apps",
        RouteId::ShipmentList => "list",
        RouteId::Profile => "account_circle",
        _ => "warning",
    }
}

/// Container hosting the tab scope
#[derive(Debug)]
pub struct MainContainer {
    entry_id: Uuid,
    tabs: NavController<TabScreen>,
}

impl MainContainer {
    /// Create the container for the root entry `entry_id`
    pub fn new(entry_id: Uuid, registry: Arc<RouteRegistry>) -> Result<Self> {
        let tabs = NavController::new("tabs", tab_graph(registry)?)?;
        Ok(Self { entry_id, tabs })
    }

    /// Root back stack entry this container belongs to
    pub fn entry_id(&self) -> Uuid {
        self.entry_id
    }

    /// The tab controller
    pub fn tabs(&self) -> &NavController<TabScreen> {
        &self.tabs
    }

    /// Mutable tab controller
    pub fn tabs_mut(&mut self) -> &mut NavController<TabScreen> {
        &mut self.tabs
    }

    /// Switch to a tab, saving the current tab's segment and restoring the
    /// target's
    pub fn select_tab(&mut self, route: RouteId) -> Result<()> {
        select_tab(&mut self.tabs, route)
    }

    /// Render the bottom bar
    pub fn bottom_bar(&self) -> Vec<BottomBarItem> {
        let current = self.tabs.current_route();
        TABS.iter()
            .map(|&route| BottomBarItem {
                route,
                label: tab_label(route).to_string(),
                icon: tab_icon(route).to_string(),
                selected: route == current,
            })
            .collect()
    }
}

/// Switch the tab controller to `route`
pub fn select_tab(tabs: &mut NavController<TabScreen>, route: RouteId) -> Result<()> {
    if !tabs.graph().is_top_level(route) {
        return Err(NavigationError::UnknownRoute(route));
    }
    tabs.navigate(route, &RouteParams::new(), NavOptions::tab_switch())
}
