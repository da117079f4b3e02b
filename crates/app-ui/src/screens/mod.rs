//! Application screens
//!
//! Each screen is a presenter built by a navigation graph factory from its
//! back stack entry. Presenters are stateless: local UI state (form fields,
//! toggles) lives in a [`ViewState`] owned by the host and keyed by entry id,
//! and is passed into `render` and the action handlers explicitly.
//!
//! Presenters never reach for a global controller. Handlers receive the
//! controller(s) they are allowed to command: root screens get the root
//! controller, tab screens get the root controller and the tab controller.

pub mod dashboard;
pub mod forms;
pub mod login;
pub mod main_container;
pub mod profile;
pub mod shipments;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::navigation::{
    NavGraph, RouteId, RouteRegistry, Result as NavResult, SHIPMENT_ID_PARAM,
};

pub use dashboard::{DashboardAction, DashboardView};
pub use forms::{FormKind, FormView};
pub use login::LoginView;
pub use main_container::{BottomBarItem, MainContainer};
pub use profile::ProfileView;
pub use shipments::{DeliveryForm, ShipmentDetailView, ShipmentListView};

/// Presenters of the root scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootScreen {
    /// Login form
    Login,
    /// Container hosting the tab scope
    Main,
    /// One of the single-purpose forms
    Form(FormKind),
    /// Shipment detail for an id (or the missing-argument placeholder)
    ShipmentDetail {
        /// Shipment id handed over by the route
        shipment_id: String,
    },
}

/// Presenters of the tab scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabScreen {
    /// Dashboard tab
    Dashboard,
    /// Shipment list tab
    ShipmentList,
    /// Profile tab
    Profile,
}

/// Build the root graph
///
/// `placeholder` is what the detail screen receives when the shipment id
/// cannot be extracted from its entry.
pub fn root_graph(
    registry: Arc<RouteRegistry>,
    placeholder: impl Into<String>,
) -> NavResult<NavGraph<RootScreen>> {
    let placeholder = placeholder.into();
    let mut builder = NavGraph::builder(registry, RouteId::Login)
        .destination(RouteId::Login, |_| RootScreen::Login)
        .destination(RouteId::Main, |_| RootScreen::Main);

    for kind in FormKind::all() {
        builder = builder.destination(kind.route(), move |_| RootScreen::Form(kind));
    }

    builder
        .destination(RouteId::ShipmentDetail, move |entry| RootScreen::ShipmentDetail {
            shipment_id: entry.argument_or(SHIPMENT_ID_PARAM, &placeholder),
        })
        .build()
}

/// Build the tab graph hosted by the main container
pub fn tab_graph(registry: Arc<RouteRegistry>) -> NavResult<NavGraph<TabScreen>> {
    NavGraph::builder(registry, RouteId::Dashboard)
        .top_level(RouteId::Dashboard, |_| TabScreen::Dashboard)
        .top_level(RouteId::ShipmentList, |_| TabScreen::ShipmentList)
        .top_level(RouteId::Profile, |_| TabScreen::Profile)
        .build()
}

// =============================================================================
// Fields and View State
// =============================================================================

/// Editable text fields across all screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    /// Login email
    Email,
    /// Login password
    Password,
    /// Search: start date
    From,
    /// Search: end date
    To,
    /// Search: status filter
    Status,
    /// Search: free text
    Query,
    /// Shipment code
    ShipmentCode,
    /// Collection center ("CAF") name
    CollectionCenterName,
    /// Delivery: who received the shipment
    ReceiverName,
    /// Delivery: receiver's email
    ReceiverEmail,
    /// Return: cause
    ReturnCause,
    /// Return: sub-cause
    ReturnSubCause,
    /// Delivery observation
    Observation,
}

impl FieldId {
    /// Field label
    pub fn label(&self) -> &'static str {
        match self {
            FieldId::Email => "Correo Electrónico",
            FieldId::Password => "Contraseña",
            FieldId::From => "Desde",
            FieldId::To => "Hasta",
            FieldId::Status => "Estado",
            FieldId::Query => "Buscar",
            FieldId::ShipmentCode => "Código Encomienda",
            FieldId::CollectionCenterName => "Nombre CAF",
            FieldId::ReceiverName => "Nombre de quien recibe",
            FieldId::ReceiverEmail => "Correo electrónico",
            FieldId::ReturnCause => "Causal de devolución",
            FieldId::ReturnSubCause => "Sub-causal",
            FieldId::Observation => "Observación",
        }
    }

    /// Whether input is masked
    pub fn is_secret(&self) -> bool {
        matches!(self, FieldId::Password)
    }
}

/// A rendered text field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldView {
    /// Field identifier
    pub field: FieldId,
    /// Label
    pub label: String,
    /// Current value
    pub value: String,
    /// Masked input
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub secret: bool,
}

/// Text values of a form, keyed by field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    values: BTreeMap<FieldId, String>,
}

impl FormState {
    /// Create an empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a field ("" when never edited)
    pub fn value(&self, field: FieldId) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Set a field value
    pub fn set(&mut self, field: FieldId, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Render the given fields in order
    pub fn field_views(&self, fields: &[FieldId]) -> Vec<FieldView> {
        fields
            .iter()
            .map(|&field| FieldView {
                field,
                label: field.label().to_string(),
                value: self.value(field).to_string(),
                secret: field.is_secret(),
            })
            .collect()
    }
}

/// Local state of one back stack entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewState {
    /// Plain text form (login and the single-purpose forms)
    Form(FormState),
    /// Delivery form on the detail screen
    Delivery(DeliveryForm),
}

impl ViewState {
    /// Fresh state for a root screen, if it has any
    pub fn for_screen(screen: &RootScreen) -> Option<Self> {
        match screen {
            RootScreen::Login | RootScreen::Form(_) => Some(ViewState::Form(FormState::new())),
            RootScreen::ShipmentDetail { .. } => Some(ViewState::Delivery(DeliveryForm::default())),
            RootScreen::Main => None,
        }
    }
}

/// What a screen renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum ScreenView {
    /// Login form
    Login(LoginView),
    /// Dashboard tab
    Dashboard(DashboardView),
    /// Shipment list tab
    ShipmentList(ShipmentListView),
    /// Profile tab
    Profile(ProfileView),
    /// Shipment detail
    ShipmentDetail(ShipmentDetailView),
    /// Single-purpose form
    Form(FormView),
}
