use serde::Deserialize;

/// One surveyed house from the static reference table.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct House {
    pub submission_id: String,
    pub design_region: String,
    pub floor_area: f64,
    /// Construction-age band, descriptive only.
    #[serde(default)]
    pub age: Option<String>,
    pub heating_factor: f64,
    pub insulation_factor: f64,
}

/// One installable package from the heat-pump catalog.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatPump {
    pub label: String,
    pub output_capacity: f64,
    pub costs: Vec<CostItem>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CostItem {
    pub label: String,
    pub cost: f64,
}

/// The per-house output record.
///
/// Either `warning` is set (weather data unavailable, `estimated_heat_loss`
/// holds the fallback constant, everything else unset), or the computed
/// fields are populated. The pump fields are all-or-nothing: they stay
/// `None` when no catalog package covers the power heat loss.
#[derive(Debug, Clone, Default)]
pub struct Quote {
    pub submission_id: String,
    pub estimated_heat_loss: f64,
    pub design_region: Option<String>,
    pub power_heat_loss: Option<f64>,
    pub recommended_heat_pump: Option<String>,
    pub cost_breakdown: Option<Vec<CostItem>>,
    pub total_cost_with_vat: Option<f64>,
    pub warning: Option<String>,
}
