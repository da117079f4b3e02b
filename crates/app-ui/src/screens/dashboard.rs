//! Dashboard tab

use app_core::{DashboardMetric, ShipmentCatalog};
use serde::{Deserialize, Serialize};

use super::main_container::select_tab;
use super::{RootScreen, TabScreen};
use crate::navigation::{NavController, Result, RouteId};

/// Buttons on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardAction {
    /// Go to the shipment list tab
    DeliverShipments,
    /// Download newly assigned shipments
    DownloadNew,
    /// Open the search form
    Search,
    /// Open the assignment form
    Assign,
    /// Open the collection-center form
    CollectionCenter,
    /// Open the messenger lookup form
    MessengerLookup,
    /// Open the re-scan form
    Rescan,
}

impl DashboardAction {
    /// All actions in display order
    pub fn all() -> [DashboardAction; 7] {
        [
            DashboardAction::DeliverShipments,
            DashboardAction::DownloadNew,
            DashboardAction::Search,
            DashboardAction::Assign,
            DashboardAction::CollectionCenter,
            DashboardAction::MessengerLookup,
            DashboardAction::Rescan,
        ]
    }

    /// Button label
    pub fn label(&self) -> &'static str {
        match self {
            DashboardAction::DeliverShipments => "Entregar Encomiendas",
            DashboardAction::DownloadNew => "Descargar Nuevas",
            DashboardAction::Search => "Buscar Encomiendas",
            DashboardAction::Assign => "Asignar Encomienda",
            DashboardAction::CollectionCenter => "Centro de Acopio",
            DashboardAction::MessengerLookup => "Consultar Mensajero",
            DashboardAction::Rescan => "Redigitalizar",
        }
    }

    /// Icon name
    pub fn icon(&self) -> &'static str {
        match self {
            DashboardAction::DeliverShipments => "list",
            DashboardAction::DownloadNew => "arrow_downward",
            DashboardAction::Search => "search",
            DashboardAction::Assign => "assignment",
            DashboardAction::CollectionCenter => "local_shipping",
            DashboardAction::MessengerLookup => "person_search",
            DashboardAction::Rescan => "edit",
        }
    }

    /// Root route pushed by this action, if any
    pub fn root_route(&self) -> Option<RouteId> {
        match self {
            DashboardAction::Search => Some(RouteId::Search),
            DashboardAction::Assign => Some(RouteId::Assign),
            DashboardAction::CollectionCenter => Some(RouteId::CollectionCenter),
            DashboardAction::MessengerLookup => Some(RouteId::MessengerLookup),
            DashboardAction::Rescan => Some(RouteId::Rescan),
            DashboardAction::DeliverShipments | DashboardAction::DownloadNew => None,
        }
    }
}

/// A dashboard button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    /// Action triggered
    pub action: DashboardAction,
    /// Label
    pub label: String,
    /// Icon name
    pub icon: String,
}

/// Rendered dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardView {
    /// Top bar title
    pub title: String,
    /// Greeting line
    pub greeting: String,
    /// Line under the greeting
    pub subtitle: String,
    /// Counters, two per row
    pub metrics: Vec<DashboardMetric>,
    /// Buttons
    pub actions: Vec<ActionItem>,
}

/// Render the dashboard
pub fn render(catalog: &dyn ShipmentCatalog, courier_name: &str) -> DashboardView {
    DashboardView {
        title: RouteId::Dashboard.title().to_string(),
        greeting: format!("Hola, {}!", courier_name),
        subtitle: "Aquí está el resumen de tu jornada:".to_string(),
        metrics: catalog.metrics(),
        actions: DashboardAction::all()
            .iter()
            .map(|&action| ActionItem {
                action,
                label: action.label().to_string(),
                icon: action.icon().to_string(),
            })
            .collect(),
    }
}

/// Handle a dashboard button
///
/// Form buttons push onto the root scope; "deliver shipments" switches the
/// tab scope to the shipment list. Returns whether any navigation happened.
pub fn handle(
    action: DashboardAction,
    root: &mut NavController<RootScreen>,
    tabs: &mut NavController<TabScreen>,
) -> Result<bool> {
    if let Some(route) = action.root_route() {
        root.navigate_to(route)?;
        return Ok(true);
    }

    match action {
        DashboardAction::DeliverShipments => {
            select_tab(tabs, RouteId::ShipmentList)?;
            Ok(true)
        }
        _ => {
            tracing::info!(?action, "Download requested; no backend configured");
            Ok(false)
        }
    }
}
