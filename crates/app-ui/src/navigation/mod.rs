//! Navigation system for Entregas
//!
//! This module provides a type-safe navigation framework with:
//! - A closed set of routes with string templates ([`RouteId`], [`RouteRegistry`])
//! - Per-scope back stacks ([`NavController`]) driven by [`NavOptions`]
//!   (`popUpTo`, single-top, save/restore state)
//! - Route change notifications for the presenter layer
//!
//! Two scopes exist at runtime: the root scope (login, main container and
//! every pushed screen) and the tab scope owned by the main container.

mod controller;
mod options;
mod registry;
mod route;

pub use controller::{
    BackStackEntry, DestinationFactory, NavController, NavGraph, NavGraphBuilder, RouteChange,
    SubscriptionId,
};
pub use options::{NavOptions, PopTarget, PopUpTo};
pub use registry::{RouteMatch, RouteRegistry};
pub use route::{RouteId, RouteParams, RouteTemplate, SHIPMENT_ID_PARAM};

use thiserror::Error;

/// Navigation errors
///
/// All of these are synchronous, local failures of a single request; the
/// back stack is unchanged when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// Target route is not registered in the registry or in this scope's graph
    #[error("Unknown route: {0}")]
    UnknownRoute(RouteId),

    /// A placeholder had no (or an empty) value during resolution
    #[error("Missing parameter {param:?} for route {route}")]
    MissingParameter {
        /// Route being resolved
        route: RouteId,
        /// Placeholder without a value
        param: String,
    },

    /// No registered template matches the path
    #[error("No route matches path {0:?}")]
    NoMatch(String),

    /// Route registered twice
    #[error("Route already registered: {0}")]
    DuplicateRoute(RouteId),

    /// Template would match the same paths as an existing one
    #[error("Template {template:?} is ambiguous with route {existing}")]
    AmbiguousTemplate {
        /// Rejected template
        template: String,
        /// Route whose template overlaps
        existing: RouteId,
    },

    /// Template string is malformed
    #[error("Invalid template {template:?}: {reason}")]
    InvalidTemplate {
        /// Rejected template
        template: String,
        /// What is wrong with it
        reason: String,
    },
}

/// Result type for navigation operations
pub type Result<T> = std::result::Result<T, NavigationError>;
