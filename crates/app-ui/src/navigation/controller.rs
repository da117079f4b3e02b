//! Navigation graph and controller
//!
//! A [`NavController`] owns one back stack for one navigation scope. Every
//! request is validated (route registered in the graph, parameters resolved)
//! before the stack is touched, so a request either fully applies or is
//! rejected with the stack unchanged.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use super::options::{NavOptions, PopTarget, PopUpTo};
use super::registry::RouteRegistry;
use super::route::{RouteId, RouteParams};
use super::{NavigationError, Result};

// =============================================================================
// Back Stack Entries
// =============================================================================

/// A back stack entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackStackEntry {
    /// Unique key for this entry
    pub id: Uuid,
    /// The route
    pub route: RouteId,
    /// Resolved path
    pub path: String,
    /// Values for the route's placeholders
    #[serde(default)]
    pub arguments: RouteParams,
}

impl BackStackEntry {
    /// Create a new entry with a fresh id
    pub fn new(route: RouteId, path: impl Into<String>, arguments: RouteParams) -> Self {
        Self {
            id: Uuid::new_v4(),
            route,
            path: path.into(),
            arguments,
        }
    }

    /// Get an argument value
    pub fn argument(&self, name: &str) -> Option<&str> {
        self.arguments.get(name).map(String::as_str)
    }

    /// Get an argument value, or `placeholder` when it is absent
    pub fn argument_or(&self, name: &str, placeholder: &str) -> String {
        match self.argument(name) {
            Some(value) => value.to_string(),
            None => {
                tracing::warn!(
                    "Entry {} has no argument {:?}, showing {:?}",
                    self.path,
                    name,
                    placeholder
                );
                placeholder.to_string()
            }
        }
    }
}

// =============================================================================
// Navigation Graph
// =============================================================================

/// Builds the presenter for a back stack entry
pub type DestinationFactory<D> = Box<dyn Fn(&BackStackEntry) -> D>;

struct Destination<D> {
    route: RouteId,
    top_level: bool,
    factory: DestinationFactory<D>,
}

/// The destinations reachable within one navigation scope
pub struct NavGraph<D> {
    registry: Arc<RouteRegistry>,
    start: RouteId,
    destinations: Vec<Destination<D>>,
}

impl<D> NavGraph<D> {
    /// Start building a graph whose start destination is `start`
    pub fn builder(registry: Arc<RouteRegistry>, start: RouteId) -> NavGraphBuilder<D> {
        NavGraphBuilder {
            registry,
            start,
            destinations: Vec::new(),
            error: None,
        }
    }

    /// The start destination
    pub fn start(&self) -> RouteId {
        self.start
    }

    /// The registry templates are resolved against
    pub fn registry(&self) -> &RouteRegistry {
        &self.registry
    }

    /// Whether `route` is a destination of this graph
    pub fn contains(&self, route: RouteId) -> bool {
        self.destinations.iter().any(|d| d.route == route)
    }

    /// Whether `route` is a top-level (tab root) destination
    pub fn is_top_level(&self, route: RouteId) -> bool {
        self.destinations
            .iter()
            .any(|d| d.route == route && d.top_level)
    }

    /// Destination routes in registration order
    pub fn routes(&self) -> impl Iterator<Item = RouteId> + '_ {
        self.destinations.iter().map(|d| d.route)
    }

    /// Build the presenter for an entry
    pub fn build(&self, entry: &BackStackEntry) -> Result<D> {
        self.destinations
            .iter()
            .find(|d| d.route == entry.route)
            .map(|d| (d.factory)(entry))
            .ok_or(NavigationError::UnknownRoute(entry.route))
    }
}

impl<D> fmt::Debug for NavGraph<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavGraph")
            .field("start", &self.start)
            .field("routes", &self.routes().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for [`NavGraph`]
pub struct NavGraphBuilder<D> {
    registry: Arc<RouteRegistry>,
    start: RouteId,
    destinations: Vec<Destination<D>>,
    error: Option<NavigationError>,
}

impl<D> NavGraphBuilder<D> {
    /// Add a destination
    pub fn destination(self, route: RouteId, factory: impl Fn(&BackStackEntry) -> D + 'static) -> Self {
        self.add(route, false, Box::new(factory))
    }

    /// Add a top-level destination (a tab root)
    pub fn top_level(self, route: RouteId, factory: impl Fn(&BackStackEntry) -> D + 'static) -> Self {
        self.add(route, true, Box::new(factory))
    }

    fn add(mut self, route: RouteId, top_level: bool, factory: DestinationFactory<D>) -> Self {
        if self.error.is_some() {
            return self;
        }

        if !self.registry.contains(route) {
            self.error = Some(NavigationError::UnknownRoute(route));
        } else if self.destinations.iter().any(|d| d.route == route) {
            self.error = Some(NavigationError::DuplicateRoute(route));
        } else {
            self.destinations.push(Destination {
                route,
                top_level,
                factory,
            });
        }
        self
    }

    /// Finish the graph
    ///
    /// Fails if any destination was rejected, if the start destination was
    /// never added, or if it needs parameters.
    pub fn build(self) -> Result<NavGraph<D>> {
        if let Some(error) = self.error {
            return Err(error);
        }
        if !self.destinations.iter().any(|d| d.route == self.start) {
            return Err(NavigationError::UnknownRoute(self.start));
        }
        self.registry.resolve(self.start, &RouteParams::new())?;

        Ok(NavGraph {
            registry: self.registry,
            start: self.start,
            destinations: self.destinations,
        })
    }
}

// =============================================================================
// Controller
// =============================================================================

/// Emitted to subscribers after every successful transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteChange {
    /// Scope name of the emitting controller
    pub scope: &'static str,
    /// Route now on top
    pub route: RouteId,
    /// Path now on top
    pub path: String,
    /// Back stack depth after the transition
    pub depth: usize,
}

/// Handle returned by [`NavController::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&RouteChange)>;

/// Navigation controller for one scope
pub struct NavController<D> {
    scope: &'static str,
    graph: NavGraph<D>,
    back_stack: Vec<BackStackEntry>,
    saved_states: HashMap<RouteId, Vec<BackStackEntry>>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl<D> NavController<D> {
    /// Create a controller whose stack holds the graph's start destination
    pub fn new(scope: &'static str, graph: NavGraph<D>) -> Result<Self> {
        let start = graph.start();
        let path = graph.registry().resolve(start, &RouteParams::new())?;
        tracing::debug!(scope, route = %start, "Navigation scope created");

        Ok(Self {
            scope,
            graph,
            back_stack: vec![BackStackEntry::new(start, path, RouteParams::new())],
            saved_states: HashMap::new(),
            subscribers: Vec::new(),
            next_subscription: 0,
        })
    }

    /// Scope name used in logs and change events
    pub fn scope(&self) -> &'static str {
        self.scope
    }

    /// The graph this controller navigates
    pub fn graph(&self) -> &NavGraph<D> {
        &self.graph
    }

    /// Get the current stack entry
    pub fn current_entry(&self) -> &BackStackEntry {
        self.back_stack.last().expect("Stack should never be empty")
    }

    /// Get the current route
    pub fn current_route(&self) -> RouteId {
        self.current_entry().route
    }

    /// Get all entries, bottom to top
    pub fn back_stack(&self) -> &[BackStackEntry] {
        &self.back_stack
    }

    /// Routes on the stack, bottom to top
    pub fn routes(&self) -> Vec<RouteId> {
        self.back_stack.iter().map(|e| e.route).collect()
    }

    /// Get stack depth
    pub fn depth(&self) -> usize {
        self.back_stack.len()
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        self.back_stack.len() > 1
    }

    /// Saved slot for a route, if any
    pub fn saved_state(&self, route: RouteId) -> Option<&[BackStackEntry]> {
        self.saved_states.get(&route).map(Vec::as_slice)
    }

    /// Whether an entry is on the stack or held in a save slot
    pub fn retains_entry(&self, id: Uuid) -> bool {
        self.back_stack.iter().any(|e| e.id == id)
            || self
                .saved_states
                .values()
                .any(|slot| slot.iter().any(|e| e.id == id))
    }

    /// Drop every save slot
    pub fn clear_saved_states(&mut self) {
        self.saved_states.clear();
    }

    /// Build the presenter for the current entry
    pub fn current_destination(&self) -> Result<D> {
        self.graph.build(self.current_entry())
    }

    /// Navigate to a static route with default options
    pub fn navigate_to(&mut self, route: RouteId) -> Result<()> {
        self.navigate(route, &RouteParams::new(), NavOptions::default())
    }

    /// Navigate to a concrete path, e.g. from a deep link
    pub fn navigate_to_path(&mut self, path: &str, options: NavOptions) -> Result<()> {
        let matched = self.graph.registry().match_path(path)?;
        self.navigate(matched.route, &matched.params, options)
    }

    /// Navigate to a route
    ///
    /// Order of application: `popUpTo` (saving the left tab segment when
    /// asked), then `restoreState`, then the single-top check, then the push.
    pub fn navigate(
        &mut self,
        route: RouteId,
        params: &RouteParams,
        options: NavOptions,
    ) -> Result<()> {
        if !self.graph.contains(route) {
            return Err(NavigationError::UnknownRoute(route));
        }
        let path = self.graph.registry().resolve(route, params)?;
        let arguments = self.arguments_for(route, params);

        // Nothing below can fail.
        if let Some(pop_up_to) = options.pop_up_to {
            self.pop_up_to(pop_up_to);
        }

        let restored = options.restore_state && self.restore(route, &path);
        if !restored {
            let on_top = self.back_stack.last().is_some_and(|e| e.path == path);
            if options.single_top && on_top {
                tracing::debug!(scope = self.scope, %path, "Single-top: already on top");
            } else {
                self.back_stack
                    .push(BackStackEntry::new(route, path, arguments));
            }
        }

        tracing::debug!(
            scope = self.scope,
            route = %route,
            depth = self.back_stack.len(),
            restored,
            "Navigated"
        );
        self.emit();
        Ok(())
    }

    /// Pop the top entry
    ///
    /// Returns false, leaving the stack untouched, when only one entry remains.
    pub fn navigate_up(&mut self) -> bool {
        if self.back_stack.len() <= 1 {
            return false;
        }

        self.back_stack.pop();
        tracing::debug!(
            scope = self.scope,
            route = %self.current_route(),
            depth = self.back_stack.len(),
            "Navigated up"
        );
        self.emit();
        true
    }

    /// Register a callback invoked after every successful transition
    pub fn subscribe(&mut self, callback: impl FnMut(&RouteChange) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscription; returns whether it existed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    fn arguments_for(&self, route: RouteId, params: &RouteParams) -> RouteParams {
        self.graph
            .registry()
            .template(route)
            .map(|template| {
                template
                    .placeholders()
                    .filter_map(|name| params.get(name).map(|v| (name.to_string(), v.clone())))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn pop_up_to(&mut self, pop_up_to: PopUpTo) {
        let cut = match pop_up_to.target {
            PopTarget::Graph => Some(0),
            PopTarget::StartDestination => self.position_of(self.graph.start()),
            PopTarget::Route(target) => self.position_of(target),
        }
        .map(|index| match pop_up_to.target {
            PopTarget::Graph => 0,
            _ if pop_up_to.inclusive => index,
            _ => index + 1,
        });

        let Some(cut) = cut else {
            tracing::warn!(
                scope = self.scope,
                target = ?pop_up_to.target,
                "popUpTo target not on the back stack, nothing popped"
            );
            return;
        };

        if cut >= self.back_stack.len() {
            return;
        }

        if pop_up_to.save_state {
            self.save_segment(cut);
        }
        self.back_stack.truncate(cut);
    }

    fn position_of(&self, route: RouteId) -> Option<usize> {
        self.back_stack.iter().rposition(|e| e.route == route)
    }

    /// Save the tab segment that is being left by popping from `cut`
    fn save_segment(&mut self, cut: usize) {
        let root = self
            .back_stack
            .iter()
            .rposition(|e| self.graph.is_top_level(e.route))
            .unwrap_or(cut);

        let segment = self.back_stack[root..].to_vec();
        let key = segment[0].route;
        tracing::debug!(
            scope = self.scope,
            route = %key,
            entries = segment.len(),
            "Saved back stack segment"
        );
        self.saved_states.insert(key, segment);
    }

    fn restore(&mut self, route: RouteId, path: &str) -> bool {
        let Some(segment) = self.saved_states.remove(&route) else {
            return false;
        };

        if self.back_stack.last().is_some_and(|e| e.path == path) {
            self.back_stack.pop();
        }
        tracing::debug!(
            scope = self.scope,
            route = %route,
            entries = segment.len(),
            "Restored back stack segment"
        );
        self.back_stack.extend(segment);
        true
    }

    fn emit(&mut self) {
        let top = self.current_entry();
        let change = RouteChange {
            scope: self.scope,
            route: top.route,
            path: top.path.clone(),
            depth: self.back_stack.len(),
        };
        for (_, callback) in self.subscribers.iter_mut() {
            callback(&change);
        }
    }
}

impl<D> fmt::Debug for NavController<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavController")
            .field("scope", &self.scope)
            .field("back_stack", &self.routes())
            .field("saved", &self.saved_states.keys().collect::<Vec<_>>())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::route::SHIPMENT_ID_PARAM;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn registry() -> Arc<RouteRegistry> {
        Arc::new(RouteRegistry::standard().unwrap())
    }

    /// Root-like graph: Login start, Main, and the pushed screens
    fn root_controller() -> NavController<RouteId> {
        let graph = NavGraph::builder(registry(), RouteId::Login)
            .destination(RouteId::Login, |e| e.route)
            .destination(RouteId::Main, |e| e.route)
            .destination(RouteId::Search, |e| e.route)
            .destination(RouteId::Assign, |e| e.route)
            .destination(RouteId::ShipmentDetail, |e| e.route)
            .build()
            .unwrap();
        NavController::new("root", graph).unwrap()
    }

    /// Tab-like graph: Dashboard start; Search and Assign stand in for
    /// entries pushed inside a tab
    fn tab_controller() -> NavController<RouteId> {
        let graph = NavGraph::builder(registry(), RouteId::Dashboard)
            .top_level(RouteId::Dashboard, |e| e.route)
            .top_level(RouteId::ShipmentList, |e| e.route)
            .top_level(RouteId::Profile, |e| e.route)
            .destination(RouteId::Search, |e| e.route)
            .destination(RouteId::Assign, |e| e.route)
            .build()
            .unwrap();
        NavController::new("tabs", graph).unwrap()
    }

    fn detail(id: &str) -> RouteParams {
        RouteParams::from([(SHIPMENT_ID_PARAM.to_string(), id.to_string())])
    }

    fn push_all(nav: &mut NavController<RouteId>, routes: &[RouteId]) {
        for route in routes {
            nav.navigate_to(*route).unwrap();
        }
    }

    #[test]
    fn test_starts_at_start_destination() {
        let nav = root_controller();
        assert_eq!(nav.current_route(), RouteId::Login);
        assert_eq!(nav.depth(), 1);
        assert!(!nav.can_go_back());
    }

    #[test]
    fn test_navigate_up_at_root_is_noop() {
        let mut nav = root_controller();
        assert!(!nav.navigate_up());
        assert_eq!(nav.current_route(), RouteId::Login);
        assert_eq!(nav.depth(), 1);
    }

    #[test]
    fn test_navigate_up_pops_one() {
        let mut nav = root_controller();
        push_all(&mut nav, &[RouteId::Main, RouteId::Search]);
        assert!(nav.navigate_up());
        assert_eq!(nav.routes(), [RouteId::Login, RouteId::Main]);
    }

    #[test]
    fn test_unknown_route_leaves_stack_unchanged() {
        let mut nav = root_controller();
        let err = nav.navigate_to(RouteId::Dashboard).unwrap_err();
        assert!(matches!(err, NavigationError::UnknownRoute(RouteId::Dashboard)));
        assert_eq!(nav.routes(), [RouteId::Login]);
    }

    #[test]
    fn test_missing_parameter_leaves_stack_unchanged() {
        let mut nav = root_controller();
        nav.navigate_to(RouteId::Main).unwrap();
        let err = nav
            .navigate(
                RouteId::ShipmentDetail,
                &RouteParams::new(),
                NavOptions::new().pop_up_to(PopUpTo::graph()),
            )
            .unwrap_err();
        assert!(matches!(err, NavigationError::MissingParameter { .. }));
        assert_eq!(nav.routes(), [RouteId::Login, RouteId::Main]);
    }

    #[test]
    fn test_pop_up_to_exclusive() {
        let mut nav = root_controller();
        push_all(&mut nav, &[RouteId::Main, RouteId::Search]);
        nav.navigate(
            RouteId::Assign,
            &RouteParams::new(),
            NavOptions::new().pop_up_to(PopUpTo::route(RouteId::Login)),
        )
        .unwrap();
        assert_eq!(nav.routes(), [RouteId::Login, RouteId::Assign]);
    }

    #[test]
    fn test_pop_up_to_inclusive() {
        let mut nav = root_controller();
        push_all(&mut nav, &[RouteId::Main, RouteId::Search]);
        nav.navigate(
            RouteId::Assign,
            &RouteParams::new(),
            NavOptions::new().pop_up_to(PopUpTo::route(RouteId::Login).inclusive()),
        )
        .unwrap();
        assert_eq!(nav.routes(), [RouteId::Assign]);
    }

    #[test]
    fn test_login_replaces_itself_with_main() {
        let mut nav = root_controller();
        nav.navigate(
            RouteId::Main,
            &RouteParams::new(),
            NavOptions::new().pop_up_to(PopUpTo::route(RouteId::Login).inclusive()),
        )
        .unwrap();
        assert_eq!(nav.routes(), [RouteId::Main]);
        assert!(!nav.navigate_up());
    }

    #[test]
    fn test_pop_up_to_graph_clears_everything() {
        let mut nav = root_controller();
        push_all(&mut nav, &[RouteId::Main, RouteId::Search, RouteId::Assign]);
        nav.navigate(
            RouteId::Login,
            &RouteParams::new(),
            NavOptions::new().pop_up_to(PopUpTo::graph().inclusive()),
        )
        .unwrap();
        assert_eq!(nav.routes(), [RouteId::Login]);
    }

    #[test]
    fn test_pop_up_to_absent_target_pops_nothing() {
        let mut nav = root_controller();
        push_all(&mut nav, &[RouteId::Main]);
        nav.navigate(
            RouteId::Search,
            &RouteParams::new(),
            NavOptions::new().pop_up_to(PopUpTo::route(RouteId::Assign).inclusive()),
        )
        .unwrap();
        assert_eq!(nav.routes(), [RouteId::Login, RouteId::Main, RouteId::Search]);
    }

    #[test]
    fn test_single_top_suppresses_duplicate() {
        let mut nav = root_controller();
        push_all(&mut nav, &[RouteId::Main, RouteId::Search]);
        nav.navigate(RouteId::Search, &RouteParams::new(), NavOptions::new().single_top())
            .unwrap();
        assert_eq!(nav.routes(), [RouteId::Login, RouteId::Main, RouteId::Search]);

        nav.navigate_to(RouteId::Search).unwrap();
        assert_eq!(nav.depth(), 4);
    }

    #[test]
    fn test_single_top_compares_resolved_path() {
        let mut nav = root_controller();
        nav.navigate(RouteId::ShipmentDetail, &detail("ENV-001"), NavOptions::new())
            .unwrap();
        nav.navigate(
            RouteId::ShipmentDetail,
            &detail("ENV-002"),
            NavOptions::new().single_top(),
        )
        .unwrap();
        assert_eq!(nav.depth(), 3);
        assert_eq!(nav.current_entry().argument(SHIPMENT_ID_PARAM), Some("ENV-002"));
    }

    #[test]
    fn test_arguments_are_carried_on_entry() {
        let mut nav = root_controller();
        let mut params = detail("ENV-003");
        params.insert("unrelated".to_string(), "x".to_string());
        nav.navigate(RouteId::ShipmentDetail, &params, NavOptions::new())
            .unwrap();

        let entry = nav.current_entry();
        assert_eq!(entry.path, "encomienda_detail/ENV-003");
        assert_eq!(entry.arguments, detail("ENV-003"));
    }

    #[test]
    fn test_argument_or_placeholder() {
        let entry = BackStackEntry::new(RouteId::ShipmentDetail, "encomienda_detail/x", RouteParams::new());
        assert_eq!(entry.argument_or(SHIPMENT_ID_PARAM, "N/A"), "N/A");

        let entry = BackStackEntry::new(RouteId::ShipmentDetail, "encomienda_detail/x", detail("x"));
        assert_eq!(entry.argument_or(SHIPMENT_ID_PARAM, "N/A"), "x");
    }

    #[test]
    fn test_navigate_to_path() {
        let mut nav = root_controller();
        nav.navigate_to_path("/encomienda_detail/ENV-004", NavOptions::new())
            .unwrap();
        assert_eq!(nav.current_route(), RouteId::ShipmentDetail);
        assert_eq!(nav.current_entry().argument(SHIPMENT_ID_PARAM), Some("ENV-004"));

        let err = nav
            .navigate_to_path("encomienda_detail/", NavOptions::new())
            .unwrap_err();
        assert!(matches!(err, NavigationError::NoMatch(_)));
        assert_eq!(nav.depth(), 2);
    }

    #[test]
    fn test_navigate_to_path_outside_graph() {
        let mut nav = root_controller();
        let err = nav.navigate_to_path("dashboard", NavOptions::new()).unwrap_err();
        assert!(matches!(err, NavigationError::UnknownRoute(RouteId::Dashboard)));
    }

    #[test]
    fn test_tab_switch_restores_start_tab_segment() {
        let mut nav = tab_controller();
        push_all(&mut nav, &[RouteId::Search, RouteId::Assign]);
        let before: Vec<Uuid> = nav.back_stack().iter().map(|e| e.id).collect();

        nav.navigate(RouteId::Profile, &RouteParams::new(), NavOptions::tab_switch())
            .unwrap();
        assert_eq!(nav.routes(), [RouteId::Dashboard, RouteId::Profile]);
        assert!(nav.saved_state(RouteId::Dashboard).is_some());

        nav.navigate(RouteId::Dashboard, &RouteParams::new(), NavOptions::tab_switch())
            .unwrap();
        assert_eq!(
            nav.routes(),
            [RouteId::Dashboard, RouteId::Search, RouteId::Assign]
        );
        let after: Vec<Uuid> = nav.back_stack().iter().map(|e| e.id).collect();
        assert_eq!(before, after);
        assert!(nav.saved_state(RouteId::Dashboard).is_none());
        assert!(nav.saved_state(RouteId::Profile).is_some());
    }

    #[test]
    fn test_tab_switch_restores_sibling_tab_segment() {
        let mut nav = tab_controller();
        nav.navigate(RouteId::ShipmentList, &RouteParams::new(), NavOptions::tab_switch())
            .unwrap();
        push_all(&mut nav, &[RouteId::Search]);
        assert_eq!(
            nav.routes(),
            [RouteId::Dashboard, RouteId::ShipmentList, RouteId::Search]
        );

        nav.navigate(RouteId::Profile, &RouteParams::new(), NavOptions::tab_switch())
            .unwrap();
        assert_eq!(nav.routes(), [RouteId::Dashboard, RouteId::Profile]);
        assert_eq!(
            nav.saved_state(RouteId::ShipmentList)
                .map(|slot| slot.iter().map(|e| e.route).collect::<Vec<_>>()),
            Some(vec![RouteId::ShipmentList, RouteId::Search])
        );

        nav.navigate(RouteId::ShipmentList, &RouteParams::new(), NavOptions::tab_switch())
            .unwrap();
        assert_eq!(
            nav.routes(),
            [RouteId::Dashboard, RouteId::ShipmentList, RouteId::Search]
        );
    }

    #[test]
    fn test_tab_switch_without_slot_creates_fresh_entry() {
        let mut nav = tab_controller();
        nav.navigate(RouteId::ShipmentList, &RouteParams::new(), NavOptions::tab_switch())
            .unwrap();
        assert_eq!(nav.routes(), [RouteId::Dashboard, RouteId::ShipmentList]);

        nav.navigate(RouteId::Dashboard, &RouteParams::new(), NavOptions::tab_switch())
            .unwrap();
        assert_eq!(nav.routes(), [RouteId::Dashboard]);
    }

    #[test]
    fn test_reselecting_current_tab_keeps_stack() {
        let mut nav = tab_controller();
        nav.navigate(RouteId::Profile, &RouteParams::new(), NavOptions::tab_switch())
            .unwrap();
        nav.navigate(RouteId::Profile, &RouteParams::new(), NavOptions::tab_switch())
            .unwrap();
        assert_eq!(nav.routes(), [RouteId::Dashboard, RouteId::Profile]);
    }

    #[test]
    fn test_restore_without_save_slot_pushes() {
        let mut nav = tab_controller();
        nav.navigate(RouteId::Profile, &RouteParams::new(), NavOptions::new().restore_state())
            .unwrap();
        assert_eq!(nav.routes(), [RouteId::Dashboard, RouteId::Profile]);
    }

    #[test]
    fn test_retains_saved_entries() {
        let mut nav = tab_controller();
        push_all(&mut nav, &[RouteId::Search]);
        let search_id = nav.current_entry().id;

        nav.navigate(RouteId::Profile, &RouteParams::new(), NavOptions::tab_switch())
            .unwrap();
        assert!(nav.retains_entry(search_id));

        nav.clear_saved_states();
        assert!(!nav.retains_entry(search_id));
    }

    #[test]
    fn test_subscribers_see_transitions() {
        let mut nav = root_controller();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = nav.subscribe(move |change| sink.borrow_mut().push(change.clone()));

        nav.navigate_to(RouteId::Main).unwrap();
        nav.navigate_to(RouteId::Search).unwrap();
        assert!(nav.navigate_up());
        assert!(nav.navigate_up());
        assert!(!nav.navigate_up());

        let routes: Vec<RouteId> = seen.borrow().iter().map(|c| c.route).collect();
        assert_eq!(
            routes,
            [RouteId::Main, RouteId::Search, RouteId::Main, RouteId::Login]
        );
        assert_eq!(seen.borrow()[1].depth, 3);
        assert_eq!(seen.borrow()[1].scope, "root");

        assert!(nav.unsubscribe(id));
        assert!(!nav.unsubscribe(id));
        nav.navigate_to(RouteId::Main).unwrap();
        assert_eq!(seen.borrow().len(), 4);
    }

    #[test]
    fn test_failed_navigation_is_not_emitted() {
        let mut nav = root_controller();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        nav.subscribe(move |_| *sink.borrow_mut() += 1);

        assert!(nav.navigate_to(RouteId::Profile).is_err());
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn test_graph_builder_rejects_duplicates() {
        let err = NavGraph::<RouteId>::builder(registry(), RouteId::Login)
            .destination(RouteId::Login, |e| e.route)
            .destination(RouteId::Login, |e| e.route)
            .build()
            .unwrap_err();
        assert!(matches!(err, NavigationError::DuplicateRoute(RouteId::Login)));
    }

    #[test]
    fn test_graph_builder_requires_start() {
        let err = NavGraph::<RouteId>::builder(registry(), RouteId::Login)
            .destination(RouteId::Main, |e| e.route)
            .build()
            .unwrap_err();
        assert!(matches!(err, NavigationError::UnknownRoute(RouteId::Login)));
    }

    #[test]
    fn test_graph_builder_rejects_parameterized_start() {
        let err = NavGraph::<RouteId>::builder(registry(), RouteId::ShipmentDetail)
            .destination(RouteId::ShipmentDetail, |e| e.route)
            .build()
            .unwrap_err();
        assert!(matches!(err, NavigationError::MissingParameter { .. }));
    }

    #[test]
    fn test_graph_builder_rejects_unregistered_route() {
        let empty = Arc::new(RouteRegistry::new());
        let err = NavGraph::<RouteId>::builder(empty, RouteId::Login)
            .destination(RouteId::Login, |e| e.route)
            .build()
            .unwrap_err();
        assert!(matches!(err, NavigationError::UnknownRoute(RouteId::Login)));
    }

    #[test]
    fn test_current_destination_uses_factory() {
        let graph = NavGraph::builder(registry(), RouteId::Login)
            .destination(RouteId::Login, |_| "login screen".to_string())
            .destination(RouteId::ShipmentDetail, |e| {
                format!("detail {}", e.argument_or(SHIPMENT_ID_PARAM, "N/A"))
            })
            .build()
            .unwrap();
        let mut nav = NavController::new("root", graph).unwrap();
        assert_eq!(nav.current_destination().unwrap(), "login screen");

        nav.navigate(RouteId::ShipmentDetail, &detail("ENV-002"), NavOptions::new())
            .unwrap();
        assert_eq!(nav.current_destination().unwrap(), "detail ENV-002");
    }
}
