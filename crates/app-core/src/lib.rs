//! Core application logic for Entregas
//!
//! This crate contains the shipment ("encomienda") domain model, the
//! dashboard metrics, the static catalog that backs every screen, and the
//! application configuration.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod dashboard;
pub mod shipments;

pub use config::{AppConfig, ConfigError};
pub use dashboard::{DashboardMetric, MetricIcon};
pub use shipments::{
    Shipment, ShipmentCatalog, ShipmentDetails, ShipmentKind, ShipmentStatus, StaticCatalog,
};
