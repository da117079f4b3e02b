//! Dashboard metrics
//!
//! The dashboard summarises the courier's day as four counters. Values are
//! static until a backend exists.

use serde::{Deserialize, Serialize};

/// Icon hint for a metric card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricIcon {
    /// Downloaded shipments
    Download,
    /// Open shipments
    Star,
    /// Closed shipments
    CheckCircle,
    /// Pending shipments
    Refresh,
}

/// A single dashboard counter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardMetric {
    /// Label shown under the value
    pub title: String,
    /// Display value
    pub value: String,
    /// Icon hint
    pub icon: MetricIcon,
}

impl DashboardMetric {
    /// Create a new metric
    pub fn new(title: impl Into<String>, value: impl Into<String>, icon: MetricIcon) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            icon,
        }
    }
}

/// The fixed metrics shown on the dashboard
pub fn default_metrics() -> Vec<DashboardMetric> {
    vec![
        DashboardMetric::new("Descargadas", "150", MetricIcon::Download),
        DashboardMetric::new("Abiertas", "35", MetricIcon::Star),
        DashboardMetric::new("Cerradas", "115", MetricIcon::CheckCircle),
        DashboardMetric::new("Pendientes", "5", MetricIcon::Refresh),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_metrics_order() {
        let metrics = default_metrics();
        let titles: Vec<&str> = metrics.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, ["Descargadas", "Abiertas", "Cerradas", "Pendientes"]);
    }

    #[test]
    fn test_metric_serialization() {
        let metric = DashboardMetric::new("Cerradas", "115", MetricIcon::CheckCircle);
        let json = serde_json::to_value(&metric).unwrap();
        assert_eq!(json["icon"], "check_circle");
        assert_eq!(json["value"], "115");
    }
}
