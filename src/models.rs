use serde::{Deserialize, Serialize};

/// Risk tier attached to every reading, used by the page for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Danger,
}

/// Body-mass-index form as posted by the page. Fields arrive optional so
/// validation can report exactly what is missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BmiForm {
    pub weight: Option<f64>,
    pub height: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CaloriesForm {
    pub age: Option<i64>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub gender: Option<String>,
    pub activity: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PressureForm {
    pub systolic: Option<i64>,
    pub diastolic: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BmiReading {
    pub weight: f64,
    pub height: f64,
    /// Rounded to one decimal place.
    pub value: f64,
    pub category: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalorieReading {
    pub age: i64,
    pub weight: f64,
    pub height: f64,
    pub gender: String,
    pub activity: f64,
    pub activity_label: String,
    /// Basal metabolic rate, rounded to one decimal for display.
    pub bmr: f64,
    /// Total daily energy expenditure, rounded to the nearest kcal.
    pub tdee_kcal: i64,
    pub ideal_weight_kg: f64,
    pub ideal_weight_margin_kg: f64,
    pub water_liters: f64,
    pub severity: Severity,
}

#[derive(Debug, Clone, Serialize)]
pub struct PressureReading {
    pub systolic: i64,
    pub diastolic: i64,
    pub category: String,
    pub severity: Severity,
    pub crisis: bool,
    pub advice: String,
}

/// One stored calculation as the remote service returns it. History items
/// name the discriminator `type`, creation replies name it `calc_type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRecord {
    pub id: i64,
    #[serde(alias = "type")]
    pub calc_type: String,
    #[serde(default)]
    pub input_data: String,
    pub result: f64,
    #[serde(default)]
    pub interpretation: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

/// Creation reply, decoded leniently so a missing `result` can be reported
/// as a malformed response instead of a decode failure.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReply {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub result: Option<f64>,
    #[serde(default)]
    pub interpretation: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryReply {
    #[serde(default)]
    pub calculations: Vec<CalculationRecord>,
    pub total: u64,
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteReply {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub calculation_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsReply {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub stats: serde_json::Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpstreamHealth {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub database: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub service: String,
}

// -- Bodies sent to the remote service --

#[derive(Debug, Serialize)]
pub struct ImtPayload<'a> {
    pub user_id: &'a str,
    pub weight: f64,
    pub height: f64,
}

#[derive(Debug, Serialize)]
pub struct CaloriesPayload<'a> {
    pub user_id: &'a str,
    pub age: i64,
    pub weight: f64,
    pub height: f64,
    pub gender: &'a str,
    pub activity: f64,
}

#[derive(Debug, Serialize)]
pub struct PressurePayload<'a> {
    pub user_id: &'a str,
    pub systolic: i64,
    pub diastolic: i64,
}

// -- Responses of the local JSON surface --

#[derive(Debug, Serialize)]
pub struct CalcResponse<T> {
    pub reading: T,
    pub record_id: Option<i64>,
    pub created_at: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HistoryView {
    /// True when a newer load finished first; the page drops stale views.
    pub stale: bool,
    pub records: Vec<CalculationRecord>,
    pub pagination: crate::pagination::PageControls,
}

#[derive(Debug, Serialize)]
pub struct IdentityView {
    pub user_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResetRequest {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthView {
    pub status: &'static str,
    pub identity_present: bool,
    pub upstream: Option<UpstreamHealth>,
    pub upstream_error: Option<String>,
}
