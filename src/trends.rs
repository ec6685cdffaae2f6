use serde::{Deserialize, Serialize};

use crate::models::CalculationRecord;

#[derive(Debug, Clone, Serialize)]
pub struct TrendPoint {
    pub date: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PressurePoint {
    pub date: String,
    pub systolic: f64,
    pub diastolic: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TrendSeries {
    pub bmi: Vec<TrendPoint>,
    pub calories: Vec<TrendPoint>,
    pub pressure: Vec<PressurePoint>,
}

/// Pressure inputs as stored in a record's JSON-encoded `input_data`.
#[derive(Debug, Deserialize)]
struct PressureInputs {
    systolic: f64,
    diastolic: f64,
}

/// Reshape a history slice (newest first, as the service returns it) into
/// chart series reading left to right. Records with unparsable payloads
/// are skipped rather than failing the whole chart.
pub fn build_trends(records: &[CalculationRecord]) -> TrendSeries {
    let mut series = TrendSeries::default();

    for record in records.iter().rev() {
        let date = short_date(&record.created_at);
        match record.calc_type.as_str() {
            "imt" => series.bmi.push(TrendPoint {
                date,
                value: record.result,
            }),
            "calories" => series.calories.push(TrendPoint {
                date,
                value: record.result,
            }),
            "blood_pressure" => {
                match serde_json::from_str::<PressureInputs>(&record.input_data) {
                    Ok(inputs) => series.pressure.push(PressurePoint {
                        date,
                        systolic: inputs.systolic,
                        diastolic: inputs.diastolic,
                    }),
                    Err(err) => {
                        tracing::warn!("skipping pressure record {}: {err}", record.id);
                    }
                }
            }
            _ => {}
        }
    }

    series
}

/// "2026-08-06T12:34:56" -> "08-06"; anything shorter passes through.
fn short_date(created_at: &str) -> String {
    created_at
        .get(5..10)
        .unwrap_or(created_at)
        .to_string()
}
