//! Back-stack mutation directives attached to a navigation request

use serde::{Deserialize, Serialize};

use super::route::RouteId;

/// Which entry a `popUpTo` directive truncates to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "route", rename_all = "snake_case")]
pub enum PopTarget {
    /// Topmost entry for this route
    Route(RouteId),
    /// The graph's start destination
    StartDestination,
    /// The whole graph: every entry is popped
    Graph,
}

/// `popUpTo` directive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopUpTo {
    /// Entry to truncate to
    pub target: PopTarget,
    /// Remove the target entry as well
    #[serde(default)]
    pub inclusive: bool,
    /// Keep the popped tab segment in a save slot
    #[serde(default)]
    pub save_state: bool,
}

impl PopUpTo {
    /// Pop up to the topmost entry for `route`
    pub fn route(route: RouteId) -> Self {
        Self::new(PopTarget::Route(route))
    }

    /// Pop up to the graph's start destination
    pub fn start_destination() -> Self {
        Self::new(PopTarget::StartDestination)
    }

    /// Pop every entry of the graph
    pub fn graph() -> Self {
        Self::new(PopTarget::Graph)
    }

    fn new(target: PopTarget) -> Self {
        Self {
            target,
            inclusive: false,
            save_state: false,
        }
    }

    /// Also remove the target entry
    pub fn inclusive(mut self) -> Self {
        self.inclusive = true;
        self
    }

    /// Save the popped tab segment
    pub fn save_state(mut self) -> Self {
        self.save_state = true;
        self
    }
}

/// Options for a single navigation request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavOptions {
    /// Truncate the back stack before pushing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pop_up_to: Option<PopUpTo>,
    /// Do not push if the resolved path is already on top
    #[serde(default)]
    pub single_top: bool,
    /// Reinstate a saved slot for the target route if one exists
    #[serde(default)]
    pub restore_state: bool,
}

impl NavOptions {
    /// No back-stack mutation beyond the push
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `popUpTo` directive
    pub fn pop_up_to(mut self, pop_up_to: PopUpTo) -> Self {
        self.pop_up_to = Some(pop_up_to);
        self
    }

    /// Enable single-top
    pub fn single_top(mut self) -> Self {
        self.single_top = true;
        self
    }

    /// Enable state restoration
    pub fn restore_state(mut self) -> Self {
        self.restore_state = true;
        self
    }

    /// Options used when switching between sibling tabs
    pub fn tab_switch() -> Self {
        Self::new()
            .pop_up_to(PopUpTo::start_destination().save_state())
            .single_top()
            .restore_state()
    }
}
