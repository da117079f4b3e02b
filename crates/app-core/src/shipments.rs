//! Shipment ("encomienda") domain model
//!
//! This module provides the shipment types shown in the list and detail
//! screens, along with the [`ShipmentCatalog`] seam that presenters read from.
//! The only implementation today is [`StaticCatalog`], which serves fixed
//! dummy data.

use serde::{Deserialize, Serialize};

use crate::dashboard::{default_metrics, DashboardMetric};

/// What kind of service a shipment belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentKind {
    /// Delivery to the recipient's home
    HomeDelivery,
    /// Counter sale
    PublicSale,
    /// Pickup from the sender
    Pickup,
}

impl ShipmentKind {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            ShipmentKind::HomeDelivery => "Entrega Domicilio",
            ShipmentKind::PublicSale => "Venta Público",
            ShipmentKind::Pickup => "Recolección",
        }
    }
}

/// Lifecycle status of a shipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentStatus {
    /// Assigned and not yet closed
    Open,
    /// Delivered or returned
    Closed,
    /// Waiting on an action
    Pending,
}

impl ShipmentStatus {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            ShipmentStatus::Open => "Abierta",
            ShipmentStatus::Closed => "Cerrada",
            ShipmentStatus::Pending => "Pendiente",
        }
    }
}

/// A shipment as shown in the list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    /// Shipment identifier, e.g. `ENV-001`
    pub id: String,
    /// Delivery address
    pub address: String,
    /// Service kind
    pub kind: ShipmentKind,
    /// Current status
    pub status: ShipmentStatus,
}

impl Shipment {
    /// Create a new shipment
    pub fn new(
        id: impl Into<String>,
        address: impl Into<String>,
        kind: ShipmentKind,
        status: ShipmentStatus,
    ) -> Self {
        Self {
            id: id.into(),
            address: address.into(),
            kind,
            status,
        }
    }

    /// Detail information for this shipment
    pub fn details(&self) -> ShipmentDetails {
        ShipmentDetails {
            address: self.address.clone(),
            ..ShipmentDetails::default()
        }
    }
}

/// General information block on the detail screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentDetails {
    /// Where the shipment leaves from
    pub origin: String,
    /// Who receives it
    pub destination: String,
    /// Delivery address
    pub address: String,
    /// Contact phone
    pub phone: String,
}

impl Default for ShipmentDetails {
    fn default() -> Self {
        Self {
            origin: "Bodega Principal".to_string(),
            destination: "Cliente Final".to_string(),
            address: "Calle Falsa 123, Springfield".to_string(),
            phone: "300 123 4567".to_string(),
        }
    }
}

/// Read access to shipments and metrics
///
/// Presenters receive the catalog they read from instead of reaching for
/// global data, so tests can substitute their own.
pub trait ShipmentCatalog {
    /// All shipments assigned to the courier, in display order
    fn shipments(&self) -> Vec<Shipment>;

    /// Look up a shipment by id
    fn find(&self, id: &str) -> Option<Shipment>;

    /// Dashboard counters
    fn metrics(&self) -> Vec<DashboardMetric>;

    /// Detail block for a shipment id
    ///
    /// Unknown ids get the generic detail block rather than an error, since
    /// the detail screen must render whatever id it was handed.
    fn details(&self, id: &str) -> ShipmentDetails {
        self.find(id)
            .map(|shipment| shipment.details())
            .unwrap_or_default()
    }
}

/// Catalog backed by fixed dummy data
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    shipments: Vec<Shipment>,
    metrics: Vec<DashboardMetric>,
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticCatalog {
    /// Create the catalog with the bundled dummy shipments
    pub fn new() -> Self {
        Self {
            shipments: vec![
                Shipment::new(
                    "ENV-001",
                    "Calle Falsa 123, Springfield",
                    ShipmentKind::HomeDelivery,
                    ShipmentStatus::Open,
                ),
                Shipment::new(
                    "ENV-002",
                    "Av. Siempreviva 742, Capital",
                    ShipmentKind::PublicSale,
                    ShipmentStatus::Open,
                ),
                Shipment::new(
                    "ENV-003",
                    "Carrera 8 #10-20, Centro",
                    ShipmentKind::Pickup,
                    ShipmentStatus::Closed,
                ),
                Shipment::new(
                    "ENV-004",
                    "Transversal 5, Apto 101",
                    ShipmentKind::HomeDelivery,
                    ShipmentStatus::Pending,
                ),
            ],
            metrics: default_metrics(),
        }
    }

    /// Create a catalog with custom shipments
    pub fn with_shipments(shipments: Vec<Shipment>) -> Self {
        Self {
            shipments,
            metrics: default_metrics(),
        }
    }
}

impl ShipmentCatalog for StaticCatalog {
    fn shipments(&self) -> Vec<Shipment> {
        self.shipments.clone()
    }

    fn find(&self, id: &str) -> Option<Shipment> {
        self.shipments.iter().find(|s| s.id == id).cloned()
    }

    fn metrics(&self) -> Vec<DashboardMetric> {
        self.metrics.clone()
    }
}
