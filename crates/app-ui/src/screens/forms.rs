//! Single-purpose forms pushed from the dashboard
//!
//! Search, assignment, collection-center handoff, messenger lookup and
//! re-scan share one shape: a title, a few text fields, a submit button and
//! a back arrow. Submitting has no backend to talk to yet and only logs.

use serde::{Deserialize, Serialize};

use super::{FieldId, FieldView, FormState};
use crate::navigation::RouteId;

/// The single-purpose form screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    /// Search shipments
    Search,
    /// Assign a shipment to a collection center
    Assign,
    /// Hand a shipment over to a collection center
    CollectionCenter,
    /// Look up which messenger holds a shipment
    MessengerLookup,
    /// Re-scan a shipment's paperwork
    Rescan,
}

impl FormKind {
    /// All form kinds
    pub fn all() -> [FormKind; 5] {
        [
            FormKind::Search,
            FormKind::Assign,
            FormKind::CollectionCenter,
            FormKind::MessengerLookup,
            FormKind::Rescan,
        ]
    }

    /// Route that shows this form
    pub fn route(&self) -> RouteId {
        match self {
            FormKind::Search => RouteId::Search,
            FormKind::Assign => RouteId::Assign,
            FormKind::CollectionCenter => RouteId::CollectionCenter,
            FormKind::MessengerLookup => RouteId::MessengerLookup,
            FormKind::Rescan => RouteId::Rescan,
        }
    }

    /// Fields in display order
    pub fn fields(&self) -> &'static [FieldId] {
        match self {
            FormKind::Search => &[FieldId::From, FieldId::To, FieldId::Status, FieldId::Query],
            FormKind::Assign | FormKind::CollectionCenter => {
                &[FieldId::ShipmentCode, FieldId::CollectionCenterName]
            }
            FormKind::MessengerLookup | FormKind::Rescan => &[FieldId::ShipmentCode],
        }
    }

    /// Submit button label
    pub fn submit_label(&self) -> &'static str {
        match self {
            FormKind::Search | FormKind::MessengerLookup => "Buscar",
            FormKind::Assign | FormKind::CollectionCenter => "Aceptar",
            FormKind::Rescan => "Guardar",
        }
    }

    /// Whether a field belongs to this form
    pub fn has_field(&self, field: FieldId) -> bool {
        self.fields().contains(&field)
    }
}

/// Rendered form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormView {
    /// Which form
    pub kind: FormKind,
    /// Top bar title
    pub title: String,
    /// Fields in order
    pub fields: Vec<FieldView>,
    /// Submit button label
    pub submit_label: String,
}

/// Render a form
pub fn render(kind: FormKind, state: &FormState) -> FormView {
    FormView {
        kind,
        title: kind.route().title().to_string(),
        fields: state.field_views(kind.fields()),
        submit_label: kind.submit_label().to_string(),
    }
}

/// Submit a form
pub fn submit(kind: FormKind, state: &FormState) {
    let filled = kind
        .fields()
        .iter()
        .filter(|&&field| !state.value(field).is_empty())
        .count();
    tracing::info!(
        form = ?kind,
        filled,
        total = kind.fields().len(),
        "Form submitted; no backend configured"
    );
}
