use serde::{Deserialize, Serialize};
use shopsight_core::{CategoryStat, KpiSummary, Product};

/// The dashboard state serialized into the analysis prompt: current KPIs,
/// the leading category stats, and the most expensive products under the
/// active filters.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub kpis: KpiSummary,
    pub category_stats: Vec<CategoryStat>,
    pub top_products: Vec<Product>,
}

/// Dashboard-wide analysis sections returned by the model.
///
/// Fields default to empty so a partially filled response still renders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardInsights {
    #[serde(default)]
    pub trends: String,
    #[serde(default)]
    pub recommendations: String,
    #[serde(default)]
    pub anomalies: String,
    #[serde(default)]
    pub opportunities: String,
}

impl DashboardInsights {
    /// The placeholder produced when the analysis call fails: the message
    /// lands in the `anomalies` section and the rest stay empty.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            anomalies: message.into(),
            ..Self::default()
        }
    }
}

/// Per-category analysis sections returned by the model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInsights {
    #[serde(default)]
    pub pricing_strategy: String,
    #[serde(default)]
    pub market_positioning: String,
    #[serde(default)]
    pub inventory_optimization: String,
    #[serde(default)]
    pub growth_opportunities: String,
    /// Set instead of the sections when the call failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CategoryInsights {
    /// The placeholder produced when the insights call fails.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }
}
