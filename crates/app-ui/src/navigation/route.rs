//! Route identifiers and templates

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::{NavigationError, Result};

/// Parameters for a route, keyed by placeholder name
pub type RouteParams = HashMap<String, String>;

/// Placeholder carrying the shipment id on the detail route
pub const SHIPMENT_ID_PARAM: &str = "encomiendaId";

/// Every destination in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteId {
    // Root scope
    /// Login screen
    Login,
    /// Container hosting the bottom bar and the tab scope
    Main,
    /// Shipment search form
    Search,
    /// Shipment assignment form
    Assign,
    /// Collection-center handoff form
    CollectionCenter,
    /// Messenger lookup form
    MessengerLookup,
    /// Re-scan form
    Rescan,
    /// Shipment detail, parameterized on the shipment id
    ShipmentDetail,

    // Tab scope
    /// Dashboard tab
    Dashboard,
    /// Shipment list tab
    ShipmentList,
    /// Profile tab
    Profile,
}

impl RouteId {
    /// All route identifiers
    pub fn all() -> [RouteId; 11] {
        [
            RouteId::Login,
            RouteId::Main,
            RouteId::Search,
            RouteId::Assign,
            RouteId::CollectionCenter,
            RouteId::MessengerLookup,
            RouteId::Rescan,
            RouteId::ShipmentDetail,
            RouteId::Dashboard,
            RouteId::ShipmentList,
            RouteId::Profile,
        ]
    }

    /// Template string for this route
    pub fn template(&self) -> &'static str {
        match self {
            RouteId::Login => "login",
            RouteId::Main => "main",
            RouteId::Search => "search",
            RouteId::Assign => "assign",
            RouteId::CollectionCenter => "centro_acopio",
            RouteId::MessengerLookup => "consultar_mensajero",
            RouteId::Rescan => "redigitalizar",
            RouteId::ShipmentDetail => "encomienda_detail/{encomiendaId}",
            RouteId::Dashboard => "dashboard",
            RouteId::ShipmentList => "encomiendas_list",
            RouteId::Profile => "profile",
        }
    }

    /// Display title for this route
    pub fn title(&self) -> &'static str {
        match self {
            RouteId::Login => "Gestión de Envíos",
            RouteId::Main => "Inicio",
            RouteId::Search => "Buscar Encomiendas",
            RouteId::Assign => "Asignar Encomienda",
            RouteId::CollectionCenter => "Entregar a Centro de Acopio",
            RouteId::MessengerLookup => "Consultar Mensajero",
            RouteId::Rescan => "Redigitalizar",
            RouteId::ShipmentDetail => "Detalle Envío",
            RouteId::Dashboard => "Dashboard",
            RouteId::ShipmentList => "Mis Encomiendas",
            RouteId::Profile => "Perfil del Usuario",
        }
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.template())
    }
}

/// Segment type in a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    /// Literal segment
    Literal(String),
    /// Parameter segment
    Param(String),
}

/// A parsed route template such as `encomienda_detail/{encomiendaId}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl RouteTemplate {
    /// Parse a template string
    ///
    /// Segments are separated by `/`; a segment written as `{name}` is a
    /// placeholder. Empty segments and duplicate placeholder names are
    /// rejected.
    pub fn parse(template: &str) -> Result<Self> {
        let invalid = |reason: &str| NavigationError::InvalidTemplate {
            template: template.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = template.strip_prefix('/').unwrap_or(template);
        if trimmed.is_empty() {
            return Err(invalid("template is empty"));
        }

        let mut segments = Vec::new();
        for part in trimmed.split('/') {
            if part.is_empty() {
                return Err(invalid("empty segment"));
            }

            let segment = match part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
                Some(name) if name.is_empty() => return Err(invalid("unnamed placeholder")),
                Some(name) if name.contains(['{', '}']) => {
                    return Err(invalid("malformed placeholder"))
                }
                Some(name) => Segment::Param(name.to_string()),
                None if part.contains(['{', '}']) => return Err(invalid("malformed placeholder")),
                None => Segment::Literal(part.to_string()),
            };

            if let Segment::Param(name) = &segment {
                let duplicate = segments
                    .iter()
                    .any(|s| matches!(s, Segment::Param(existing) if existing == name));
                if duplicate {
                    return Err(invalid("duplicate placeholder"));
                }
            }
            segments.push(segment);
        }

        Ok(Self {
            raw: trimmed.to_string(),
            segments,
        })
    }

    /// The template as written (without a leading slash)
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Placeholder names in order of appearance
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Whether the template has no placeholders
    pub fn is_static(&self) -> bool {
        self.placeholders().next().is_none()
    }

    pub(crate) fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether some concrete path could match both templates
    pub(crate) fn overlaps(&self, other: &RouteTemplate) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(other.segments.iter())
                .all(|pair| match pair {
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    _ => true,
                })
    }
}

impl fmt::Display for RouteTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
