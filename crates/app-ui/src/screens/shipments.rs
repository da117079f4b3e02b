//! Shipment list tab and shipment detail screen

use app_core::{ShipmentCatalog, ShipmentDetails};
use serde::{Deserialize, Serialize};

use super::{FieldId, FieldView, FormState, RootScreen};
use crate::navigation::{NavController, NavOptions, Result, RouteId, RouteParams, SHIPMENT_ID_PARAM};

/// Fields shown when the shipment was delivered
pub const DELIVERED_FIELDS: [FieldId; 3] = [
    FieldId::ReceiverName,
    FieldId::ReceiverEmail,
    FieldId::Observation,
];

/// Fields shown when the shipment is being returned
pub const RETURNED_FIELDS: [FieldId; 3] = [
    FieldId::ReturnCause,
    FieldId::ReturnSubCause,
    FieldId::Observation,
];

// =============================================================================
// List
// =============================================================================

/// A row of the shipment list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentItem {
    /// Shipment id
    pub id: String,
    /// Delivery address
    pub address: String,
    /// Kind label
    pub kind: String,
    /// Status chip label
    pub status: String,
}

/// Rendered shipment list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentListView {
    /// Top bar title
    pub title: String,
    /// Rows in catalog order
    pub items: Vec<ShipmentItem>,
}

/// Render the shipment list
pub fn render_list(catalog: &dyn ShipmentCatalog) -> ShipmentListView {
    ShipmentListView {
        title: RouteId::ShipmentList.title().to_string(),
        items: catalog
            .shipments()
            .into_iter()
            .map(|shipment| ShipmentItem {
                kind: shipment.kind.label().to_string(),
                status: shipment.status.label().to_string(),
                id: shipment.id,
                address: shipment.address,
            })
            .collect(),
    }
}

/// Open a shipment's detail on the root scope
pub fn open(root: &mut NavController<RootScreen>, shipment_id: &str) -> Result<()> {
    let params = RouteParams::from([(SHIPMENT_ID_PARAM.to_string(), shipment_id.to_string())]);
    root.navigate(RouteId::ShipmentDetail, &params, NavOptions::new())
}

// =============================================================================
// Detail
// =============================================================================

/// Local state of the delivery form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryForm {
    /// "El envío fue entregado" switch
    pub delivered: bool,
    /// Text values, kept across toggles
    pub values: FormState,
}

impl DeliveryForm {
    /// Fields visible for the current toggle
    pub fn visible_fields(&self) -> &'static [FieldId] {
        if self.delivered {
            &DELIVERED_FIELDS
        } else {
            &RETURNED_FIELDS
        }
    }

    /// Whether `field` belongs to the form under either toggle
    pub fn accepts(field: FieldId) -> bool {
        DELIVERED_FIELDS.contains(&field) || RETURNED_FIELDS.contains(&field)
    }
}

/// Rendered shipment detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentDetailView {
    /// Top bar title
    pub title: String,
    /// Shipment id shown in the title
    pub shipment_id: String,
    /// "Información General" section
    pub details: ShipmentDetails,
    /// Toggle label
    pub delivered_label: String,
    /// Toggle value
    pub delivered: bool,
    /// Fields for the current toggle
    pub fields: Vec<FieldView>,
    /// Evidence button label
    pub evidence_label: String,
    /// Save button label
    pub save_label: String,
}

/// Render the detail of `shipment_id`
pub fn render_detail(
    catalog: &dyn ShipmentCatalog,
    shipment_id: &str,
    form: &DeliveryForm,
) -> ShipmentDetailView {
    ShipmentDetailView {
        title: format!("{} #{}", RouteId::ShipmentDetail.title(), shipment_id),
        shipment_id: shipment_id.to_string(),
        details: catalog.details(shipment_id),
        delivered_label: "El envío fue entregado".to_string(),
        delivered: form.delivered,
        fields: form.values.field_views(form.visible_fields()),
        evidence_label: "Adicionar Imagen".to_string(),
        save_label: "Guardar Entrega o Envío".to_string(),
    }
}

/// Attach photo evidence
pub fn add_evidence(shipment_id: &str) {
    tracing::info!(shipment_id, "Evidence requested; no camera available");
}

/// Save the delivery and leave the screen
pub fn save(root: &mut NavController<RootScreen>, shipment_id: &str, form: &DeliveryForm) -> bool {
    tracing::info!(
        shipment_id,
        delivered = form.delivered,
        "Delivery saved; no backend configured"
    );
    root.navigate_up()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::RouteRegistry;
    use crate::screens::root_graph;
    use app_core::{DashboardMetric, Shipment, ShipmentKind, ShipmentStatus, StaticCatalog};
    use mockall::mock;
    use std::sync::Arc;

    mock! {
        pub Catalog {}

        impl ShipmentCatalog for Catalog {
            fn shipments(&self) -> Vec<Shipment>;
            fn find(&self, id: &str) -> Option<Shipment>;
            fn metrics(&self) -> Vec<DashboardMetric>;
        }
    }

    fn root() -> NavController<RootScreen> {
        let graph = root_graph(Arc::new(RouteRegistry::standard().unwrap()), "N/A").unwrap();
        NavController::new("root", graph).unwrap()
    }

    #[test]
    fn test_list_renders_catalog_rows() {
        let mut catalog = MockCatalog::new();
        catalog.expect_shipments().times(1).returning(|| {
            vec![Shipment::new(
                "ENV-100",
                "Carrera 7 # 10-20",
                ShipmentKind::Pickup,
                ShipmentStatus::Pending,
            )]
        });

        let view = render_list(&catalog);
        assert_eq!(view.title, "Mis Encomiendas");
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].id, "ENV-100");
        assert_eq!(view.items[0].kind, ShipmentKind::Pickup.label());
        assert_eq!(view.items[0].status, ShipmentStatus::Pending.label());
    }

    #[test]
    fn test_detail_falls_back_to_default_details() {
        let mut catalog = MockCatalog::new();
        catalog
            .expect_find()
            .withf(|id| id == "ENV-404")
            .times(1)
            .returning(|_| None);

        let view = render_detail(&catalog, "ENV-404", &DeliveryForm::default());
        assert_eq!(view.title, "Detalle Envío #ENV-404");
        assert_eq!(view.details, ShipmentDetails::default());
    }

    #[test]
    fn test_toggle_switches_visible_fields() {
        let catalog = StaticCatalog::new();
        let mut form = DeliveryForm::default();
        form.values.set(FieldId::ReturnCause, "Dirección errada");

        let view = render_detail(&catalog, "ENV-001", &form);
        let labels: Vec<&str> = view.fields.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, ["Causal de devolución", "Sub-causal", "Observación"]);
        assert_eq!(view.fields[0].value, "Dirección errada");

        form.delivered = true;
        let view = render_detail(&catalog, "ENV-001", &form);
        let labels: Vec<&str> = view.fields.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, ["Nombre de quien recibe", "Correo electrónico", "Observación"]);

        // hidden values survive the toggle
        assert_eq!(form.values.value(FieldId::ReturnCause), "Dirección errada");
    }

    #[test]
    fn test_accepts_only_delivery_fields() {
        assert!(DeliveryForm::accepts(FieldId::Observation));
        assert!(DeliveryForm::accepts(FieldId::ReceiverEmail));
        assert!(!DeliveryForm::accepts(FieldId::Email));
    }

    #[test]
    fn test_open_then_save_returns_to_previous_entry() {
        let mut root = root();
        open(&mut root, "ENV-003").unwrap();
        assert_eq!(root.current_route(), RouteId::ShipmentDetail);
        assert_eq!(root.current_entry().path, "encomienda_detail/ENV-003");

        assert!(save(&mut root, "ENV-003", &DeliveryForm::default()));
        assert_eq!(root.routes(), [RouteId::Login]);
    }

    #[test]
    fn test_open_with_empty_id_fails() {
        let mut root = root();
        assert!(open(&mut root, "").is_err());
        assert_eq!(root.depth(), 1);
    }
}
