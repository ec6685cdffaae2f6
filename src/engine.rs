use crate::models::{
    BmiForm, BmiReading, CalorieReading, CaloriesForm, PressureForm, PressureReading, Severity,
};

/// Input rejected before any computation or network call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

fn invalid(message: impl Into<String>) -> ValidationError {
    ValidationError(message.into())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "m" => Ok(Gender::Male),
            "f" => Ok(Gender::Female),
            _ => Err(invalid("gender must be 'm' or 'f'")),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "m",
            Gender::Female => "f",
        }
    }
}

fn require_positive(value: Option<f64>, name: &str) -> Result<f64, ValidationError> {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(invalid(format!("{name} must be a positive number"))),
    }
}

fn require_positive_int(value: Option<i64>, name: &str) -> Result<i64, ValidationError> {
    match value {
        Some(v) if v > 0 => Ok(v),
        _ => Err(invalid(format!("{name} must be a positive whole number"))),
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// WHO category for a body-mass index. Lower bounds are inclusive except
/// for the open first interval.
pub fn bmi_category(bmi: f64) -> (&'static str, Severity) {
    if bmi < 16.0 {
        ("Severe underweight", Severity::Danger)
    } else if bmi < 18.5 {
        ("Underweight", Severity::Warning)
    } else if bmi < 25.0 {
        ("Normal", Severity::Success)
    } else if bmi < 30.0 {
        ("Overweight (pre-obesity)", Severity::Warning)
    } else if bmi < 35.0 {
        ("Obesity class I", Severity::Danger)
    } else if bmi < 40.0 {
        ("Obesity class II", Severity::Danger)
    } else {
        ("Obesity class III (morbid)", Severity::Danger)
    }
}

pub fn evaluate_bmi(form: &BmiForm) -> Result<BmiReading, ValidationError> {
    let weight = require_positive(form.weight, "weight")?;
    let height = require_positive(form.height, "height")?;

    let height_m = height / 100.0;
    let bmi = weight / (height_m * height_m);
    let (category, severity) = bmi_category(bmi);

    Ok(BmiReading {
        weight,
        height,
        value: round1(bmi),
        category: category.to_string(),
        severity,
    })
}

/// Harris-Benedict basal metabolic rate, kcal/day, unrounded.
pub fn basal_metabolic_rate(gender: Gender, age: i64, weight: f64, height: f64) -> f64 {
    match gender {
        Gender::Male => 88.362 + 13.397 * weight + 4.799 * height - 5.677 * age as f64,
        Gender::Female => 447.593 + 9.247 * weight + 3.098 * height - 4.330 * age as f64,
    }
}

fn activity_label(factor: f64) -> String {
    let known = [
        (1.2, "Sedentary (little or no exercise)"),
        (1.375, "Light activity (1-3 days/week)"),
        (1.55, "Moderate activity (3-5 days/week)"),
        (1.725, "High activity (6-7 days/week)"),
        (1.9, "Extreme activity (twice-daily training)"),
    ];
    for (value, label) in known {
        if (factor - value).abs() < 1e-9 {
            return label.to_string();
        }
    }
    format!("Activity factor {factor}")
}

/// Devine (1974) ideal weight and its +/-10% band.
fn ideal_weight(gender: Gender, height: f64) -> (f64, f64) {
    let height_inches = height / 2.54;
    let ideal = match gender {
        Gender::Male => 50.0 + 2.3 * (height_inches - 60.0),
        Gender::Female => 45.5 + 2.3 * (height_inches - 60.0),
    };
    (round1(ideal), round1(ideal * 0.1))
}

/// Recommended daily water, litres: 35 ml/kg plus an activity supplement.
fn water_intake(weight: f64, activity: f64) -> f64 {
    let supplement = if activity < 1.375 {
        0.0
    } else if activity < 1.725 {
        0.5
    } else {
        1.0
    };
    round1(weight * 0.035 + supplement)
}

pub fn evaluate_calories(form: &CaloriesForm) -> Result<CalorieReading, ValidationError> {
    let age = require_positive_int(form.age, "age")?;
    let weight = require_positive(form.weight, "weight")?;
    let height = require_positive(form.height, "height")?;
    let gender = match form.gender.as_deref() {
        Some(value) if !value.trim().is_empty() => Gender::parse(value)?,
        _ => return Err(invalid("select a gender")),
    };
    let activity = require_positive(form.activity, "activity factor")?;

    let bmr = basal_metabolic_rate(gender, age, weight, height);
    let tdee = bmr * activity;
    let (ideal, margin) = ideal_weight(gender, height);

    Ok(CalorieReading {
        age,
        weight,
        height,
        gender: gender.as_str().to_string(),
        activity,
        activity_label: activity_label(activity),
        bmr: round1(bmr),
        tdee_kcal: tdee.round() as i64,
        ideal_weight_kg: ideal,
        ideal_weight_margin_kg: margin,
        water_liters: water_intake(weight, activity),
        severity: Severity::Success,
    })
}

/// ACC/AHA-style ordered classification; the first matching rule wins.
pub fn pressure_category(systolic: i64, diastolic: i64) -> (&'static str, Severity, bool) {
    if systolic < 120 && diastolic < 80 {
        ("Normal", Severity::Success, false)
    } else if systolic < 130 && diastolic < 80 {
        ("Elevated", Severity::Warning, false)
    } else if systolic < 140 || diastolic < 90 {
        ("Hypertension stage I", Severity::Warning, false)
    } else if systolic > 180 || diastolic > 120 {
        ("Hypertensive crisis", Severity::Danger, true)
    } else {
        ("Hypertension stage II", Severity::Danger, false)
    }
}

fn pressure_advice(category: &str) -> &'static str {
    match category {
        "Normal" => "Your blood pressure is in the normal range.",
        "Elevated" => "Keep an eye on your readings and favour a healthy lifestyle.",
        "Hypertension stage I" => "Consider a consultation and lifestyle changes.",
        "Hypertensive crisis" => "Seek medical attention immediately.",
        _ => "A medical consultation is recommended.",
    }
}

pub fn evaluate_pressure(form: &PressureForm) -> Result<PressureReading, ValidationError> {
    let systolic = require_positive_int(form.systolic, "systolic pressure")?;
    let diastolic = require_positive_int(form.diastolic, "diastolic pressure")?;
    if systolic <= diastolic {
        return Err(invalid("systolic pressure must be greater than diastolic"));
    }

    let (category, severity, crisis) = pressure_category(systolic, diastolic);

    Ok(PressureReading {
        systolic,
        diastolic,
        category: category.to_string(),
        severity,
        crisis,
        advice: pressure_advice(category).to_string(),
    })
}
