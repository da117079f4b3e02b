//! Application host
//!
//! [`EntregasApp`] wires the root controller to the main container's nested
//! tab controller, owns the local state of every live back stack entry and
//! turns UI actions into presenter calls.
//!
//! After every transition the host re-syncs: every `Main` root entry owns
//! one main container (created when the entry appears, dropped with all of
//! its save slots when the entry leaves), fresh view states are created for
//! new entries, and view states of entries that are gone are discarded.

use std::collections::HashMap;
use std::sync::Arc;

use app_core::{AppConfig, ShipmentCatalog};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::navigation::{NavController, NavigationError, RouteId, RouteRegistry};
use crate::screens::login::LOGIN_FIELDS;
use crate::screens::{
    dashboard, forms, login, profile, root_graph, shipments, BottomBarItem, DashboardAction,
    DeliveryForm, FieldId, FormState, MainContainer, RootScreen, ScreenView, TabScreen, ViewState,
};

/// Errors raised while handling UI actions
#[derive(Debug, Error)]
pub enum AppError {
    /// Navigation failed; the back stacks are unchanged
    #[error(transparent)]
    Navigation(#[from] NavigationError),

    /// The action makes no sense on the current screen
    #[error("Action {action} is not available on {route}")]
    UnsupportedAction {
        /// Action name
        action: &'static str,
        /// Current root route
        route: RouteId,
    },

    /// The field is not part of the current form
    #[error("Field {field:?} is not part of {route}")]
    UnknownField {
        /// Field that was edited
        field: FieldId,
        /// Current root route
        route: RouteId,
    },

    /// The root stack shows `Main` but no container is bound to it
    #[error("No main container is bound to the current entry")]
    ContainerMissing,
}

/// Result type for host operations
pub type Result<T> = std::result::Result<T, AppError>;

/// User input routed to the current screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiAction {
    /// Type into a text field
    EditField {
        /// Field
        field: FieldId,
        /// New value
        value: String,
    },
    /// Flip the delivered switch on the detail screen
    SetDelivered {
        /// New value
        delivered: bool,
    },
    /// Press "Iniciar Sesión"
    SubmitLogin,
    /// Press a bottom bar item
    SelectTab {
        /// Tab route
        route: RouteId,
    },
    /// Press a dashboard button
    Dashboard {
        /// Button
        action: DashboardAction,
    },
    /// Tap a row of the shipment list
    OpenShipment {
        /// Shipment id
        id: String,
    },
    /// Press "Guardar Entrega o Envío"
    SaveDelivery,
    /// Press "Adicionar Imagen"
    AddEvidence,
    /// Press a single-purpose form's submit button
    Submit,
    /// Press "Cerrar Sesión"
    Logout,
    /// Back arrow or system back
    Back,
}

impl UiAction {
    /// Short name used in errors and logs
    pub fn name(&self) -> &'static str {
        match self {
            UiAction::EditField { .. } => "edit_field",
            UiAction::SetDelivered { .. } => "set_delivered",
            UiAction::SubmitLogin => "submit_login",
            UiAction::SelectTab { .. } => "select_tab",
            UiAction::Dashboard { .. } => "dashboard",
            UiAction::OpenShipment { .. } => "open_shipment",
            UiAction::SaveDelivery => "save_delivery",
            UiAction::AddEvidence => "add_evidence",
            UiAction::Submit => "submit",
            UiAction::Logout => "logout",
            UiAction::Back => "back",
        }
    }
}

/// What changed after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Update {
    /// Nothing visible changed
    Unchanged,
    /// Local view state changed
    State,
    /// A back stack changed
    Navigation,
}

/// Serializable snapshot of what is on screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppView {
    /// Current root route
    pub route: RouteId,
    /// Current root path
    pub path: String,
    /// Current tab, when the main container is showing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab: Option<RouteId>,
    /// Top bar title
    pub title: String,
    /// Whether a back arrow is shown
    pub can_go_back: bool,
    /// Screen content
    pub screen: ScreenView,
    /// Bottom bar, when the main container is showing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom_bar: Option<Vec<BottomBarItem>>,
}

type UpdateListener = Box<dyn FnMut(&Update)>;

/// The application host
pub struct EntregasApp {
    config: AppConfig,
    catalog: Box<dyn ShipmentCatalog>,
    registry: Arc<RouteRegistry>,
    root: NavController<RootScreen>,
    containers: HashMap<Uuid, MainContainer>,
    view_states: HashMap<Uuid, ViewState>,
    listeners: Vec<UpdateListener>,
}

impl EntregasApp {
    /// Create the app on the login screen
    pub fn new(config: AppConfig, catalog: Box<dyn ShipmentCatalog>) -> Result<Self> {
        let registry = Arc::new(RouteRegistry::standard()?);
        let graph = root_graph(
            Arc::clone(&registry),
            config.missing_argument_placeholder.clone(),
        )?;
        let root = NavController::new("root", graph)?;

        let mut app = Self {
            config,
            catalog,
            registry,
            root,
            containers: HashMap::new(),
            view_states: HashMap::new(),
            listeners: Vec::new(),
        };
        app.sync()?;
        Ok(app)
    }

    /// Configuration in use
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The root controller
    pub fn root(&self) -> &NavController<RootScreen> {
        &self.root
    }

    /// Mutable root controller, e.g. to subscribe to route changes
    pub fn root_mut(&mut self) -> &mut NavController<RootScreen> {
        &mut self.root
    }

    /// Container of the topmost `Main` entry on the root stack
    pub fn main(&self) -> Option<&MainContainer> {
        self.root
            .back_stack()
            .iter()
            .rev()
            .find(|entry| entry.route == RouteId::Main)
            .and_then(|entry| self.containers.get(&entry.id))
    }

    /// Container owned by a root entry
    pub fn container(&self, entry: Uuid) -> Option<&MainContainer> {
        self.containers.get(&entry)
    }

    /// Number of live main containers
    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    /// Local state of a back stack entry
    pub fn view_state(&self, entry: Uuid) -> Option<&ViewState> {
        self.view_states.get(&entry)
    }

    /// Number of live view states
    pub fn view_state_count(&self) -> usize {
        self.view_states.len()
    }

    /// Register a callback invoked after every action that changed something
    pub fn on_update(&mut self, listener: impl FnMut(&Update) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Open a deep link on the root scope
    pub fn open_path(&mut self, path: &str) -> Result<Update> {
        self.root.navigate_to_path(path, Default::default())?;
        self.finish(Update::Navigation)
    }

    /// Render the current screen
    pub fn render(&self) -> Result<AppView> {
        let entry = self.root.current_entry();
        let mut tab = None;
        let mut bottom_bar = None;
        let mut title = entry.route.title().to_string();

        let screen = match self.root.current_destination()? {
            RootScreen::Login => ScreenView::Login(login::render(&self.form_state(entry.id))),
            RootScreen::Form(kind) => ScreenView::Form(forms::render(kind, &self.form_state(entry.id))),
            RootScreen::ShipmentDetail { shipment_id } => {
                let view = shipments::render_detail(
                    self.catalog.as_ref(),
                    &shipment_id,
                    &self.delivery_form(entry.id),
                );
                title = view.title.clone();
                ScreenView::ShipmentDetail(view)
            }
            RootScreen::Main => {
                let main = self
                    .containers
                    .get(&entry.id)
                    .ok_or(AppError::ContainerMissing)?;
                let route = main.tabs().current_route();
                tab = Some(route);
                title = route.title().to_string();
                bottom_bar = Some(main.bottom_bar());

                match main.tabs().current_destination()? {
                    TabScreen::Dashboard => ScreenView::Dashboard(dashboard::render(
                        self.catalog.as_ref(),
                        &self.config.courier_name,
                    )),
                    TabScreen::ShipmentList => {
                        ScreenView::ShipmentList(shipments::render_list(self.catalog.as_ref()))
                    }
                    TabScreen::Profile => ScreenView::Profile(profile::render()),
                }
            }
        };

        Ok(AppView {
            route: entry.route,
            path: entry.path.clone(),
            tab,
            title,
            can_go_back: self.root.can_go_back(),
            screen,
            bottom_bar,
        })
    }

    /// Handle one UI action
    ///
    /// A rejected action (unsupported, unknown field, failed navigation)
    /// leaves both back stacks and every view state unchanged. An error from
    /// the re-sync that follows a successful transition is returned with the
    /// transition already applied.
    pub fn dispatch(&mut self, action: UiAction) -> Result<Update> {
        let name = action.name();
        let entry_id = self.root.current_entry().id;
        let route = self.root.current_route();
        let screen = self.root.current_destination()?;
        let tab = match self.containers.get(&entry_id) {
            Some(main) if screen == RootScreen::Main => Some(main.tabs().current_destination()?),
            _ => None,
        };
        let unsupported = AppError::UnsupportedAction { action: name, route };

        let update = match (action, &screen) {
            (UiAction::Back, _) => self.back(),
            (UiAction::EditField { field, value }, _) => {
                self.edit_field(&screen, field, value)?;
                Update::State
            }
            (UiAction::SetDelivered { delivered }, RootScreen::ShipmentDetail { .. }) => {
                match self.current_view_state_mut() {
                    Some(ViewState::Delivery(form)) => form.delivered = delivered,
                    _ => return Err(unsupported),
                }
                Update::State
            }
            (UiAction::SubmitLogin, RootScreen::Login) => {
                let state = self.form_state(self.root.current_entry().id);
                login::submit(&mut self.root, &state)?;
                Update::Navigation
            }
            (UiAction::Submit, RootScreen::Form(kind)) => {
                forms::submit(*kind, &self.form_state(self.root.current_entry().id));
                Update::Unchanged
            }
            (UiAction::SelectTab { route }, RootScreen::Main) => {
                let main = self
                    .containers
                    .get_mut(&entry_id)
                    .ok_or(AppError::ContainerMissing)?;
                main.select_tab(route)?;
                Update::Navigation
            }
            (UiAction::Dashboard { action }, RootScreen::Main)
                if tab == Some(TabScreen::Dashboard) =>
            {
                let main = self
                    .containers
                    .get_mut(&entry_id)
                    .ok_or(AppError::ContainerMissing)?;
                if dashboard::handle(action, &mut self.root, main.tabs_mut())? {
                    Update::Navigation
                } else {
                    Update::Unchanged
                }
            }
            (UiAction::OpenShipment { id }, RootScreen::Main)
                if tab == Some(TabScreen::ShipmentList) =>
            {
                shipments::open(&mut self.root, &id)?;
                Update::Navigation
            }
            (UiAction::Logout, RootScreen::Main) if tab == Some(TabScreen::Profile) => {
                profile::logout(&mut self.root)?;
                Update::Navigation
            }
            (UiAction::SaveDelivery, RootScreen::ShipmentDetail { shipment_id }) => {
                let form = self.delivery_form(self.root.current_entry().id);
                if shipments::save(&mut self.root, shipment_id, &form) {
                    Update::Navigation
                } else {
                    Update::Unchanged
                }
            }
            (UiAction::AddEvidence, RootScreen::ShipmentDetail { shipment_id }) => {
                shipments::add_evidence(shipment_id);
                Update::Unchanged
            }
            _ => return Err(unsupported),
        };

        self.finish(update)
    }

    fn finish(&mut self, update: Update) -> Result<Update> {
        if update == Update::Navigation {
            self.sync()?;
        }
        if update != Update::Unchanged {
            for listener in &mut self.listeners {
                listener(&update);
            }
        }
        Ok(update)
    }

    /// Pop the innermost scope that can go back
    fn back(&mut self) -> Update {
        let current = self.root.current_entry().id;
        if let Some(main) = self.containers.get_mut(&current) {
            if main.tabs_mut().navigate_up() {
                return Update::Navigation;
            }
        }
        if self.root.navigate_up() {
            Update::Navigation
        } else {
            Update::Unchanged
        }
    }

    fn edit_field(&mut self, screen: &RootScreen, field: FieldId, value: String) -> Result<()> {
        let route = self.root.current_route();
        let allowed = match screen {
            RootScreen::Login => LOGIN_FIELDS.contains(&field),
            RootScreen::Form(kind) => kind.has_field(field),
            RootScreen::ShipmentDetail { .. } => DeliveryForm::accepts(field),
            RootScreen::Main => {
                return Err(AppError::UnsupportedAction {
                    action: "edit_field",
                    route,
                })
            }
        };
        if !allowed {
            return Err(AppError::UnknownField { field, route });
        }

        match self.current_view_state_mut() {
            Some(ViewState::Form(form)) => form.set(field, value),
            Some(ViewState::Delivery(form)) => form.values.set(field, value),
            None => {
                return Err(AppError::UnsupportedAction {
                    action: "edit_field",
                    route,
                })
            }
        }
        Ok(())
    }

    fn current_view_state_mut(&mut self) -> Option<&mut ViewState> {
        let id = self.root.current_entry().id;
        self.view_states.get_mut(&id)
    }

    fn form_state(&self, entry: Uuid) -> FormState {
        match self.view_states.get(&entry) {
            Some(ViewState::Form(form)) => form.clone(),
            _ => FormState::default(),
        }
    }

    fn delivery_form(&self, entry: Uuid) -> DeliveryForm {
        match self.view_states.get(&entry) {
            Some(ViewState::Delivery(form)) => form.clone(),
            _ => DeliveryForm::default(),
        }
    }

    /// Bring the container and view states in line with the back stacks
    fn sync(&mut self) -> Result<()> {
        for entry in self.root.back_stack() {
            if entry.route != RouteId::Main || self.containers.contains_key(&entry.id) {
                continue;
            }
            let container = MainContainer::new(entry.id, Arc::clone(&self.registry))?;
            self.containers.insert(entry.id, container);
            tracing::info!(entry = %entry.id, "Main container created");
        }

        let root = &self.root;
        self.containers.retain(|id, _| {
            let live = root.retains_entry(*id);
            if !live {
                tracing::info!(entry = %id, "Main container destroyed");
            }
            live
        });

        for entry in self.root.back_stack() {
            if self.view_states.contains_key(&entry.id) {
                continue;
            }
            if let Some(state) = ViewState::for_screen(&self.root.graph().build(entry)?) {
                self.view_states.insert(entry.id, state);
            }
        }

        let root = &self.root;
        let containers = &self.containers;
        let before = self.view_states.len();
        self.view_states.retain(|id, _| {
            root.retains_entry(*id) || containers.values().any(|m| m.tabs().retains_entry(*id))
        });
        let dropped = before - self.view_states.len();
        if dropped > 0 {
            tracing::debug!(dropped, "Discarded view states of removed entries");
        }
        Ok(())
    }
}

impl std::fmt::Debug for EntregasApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntregasApp")
            .field("config", &self.config)
            .field("root", &self.root)
            .field("containers", &self.containers.len())
            .field("view_states", &self.view_states.len())
            .finish_non_exhaustive()
    }
}
