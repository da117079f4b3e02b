//! User interface for Entregas
//!
//! This crate provides the presentation layer: navigation, screens and the
//! application host that wires them together.
//!
//! # Modules
//!
//! - [`navigation`] - Route registry, navigation graphs and controllers
//! - [`screens`] - Screen presenters and their local view state
//! - [`app`] - The [`EntregasApp`] host
//!
//! # Example
//!
//! ```rust
//! use app_core::{AppConfig, StaticCatalog};
//! use app_ui::navigation::RouteId;
//! use app_ui::{EntregasApp, UiAction};
//!
//! let mut app = EntregasApp::new(AppConfig::default(), Box::new(StaticCatalog::new())).unwrap();
//! app.dispatch(UiAction::SubmitLogin).unwrap();
//! app.dispatch(UiAction::SelectTab { route: RouteId::ShipmentList }).unwrap();
//! app.dispatch(UiAction::OpenShipment { id: "ENV-001".to_string() }).unwrap();
//!
//! let view = app.render().unwrap();
//! assert_eq!(view.title, "Detalle Envío #ENV-001");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod app;
pub mod navigation;
pub mod screens;

pub use app::{AppError, AppView, EntregasApp, UiAction, Update};
pub use navigation::{NavController, NavOptions, NavigationError, PopUpTo, RouteId, RouteRegistry};
pub use screens::{RootScreen, ScreenView, TabScreen};
