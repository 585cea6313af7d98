use lazy_static::lazy_static;
use regex::Regex;

use super::dto::{Profile, ProfileForm, UnitSystem};
use crate::error::{Field, FieldErrors};

pub const MIN_AGE: i64 = 13;
pub const MAX_AGE: i64 = 120;

/// Centimeters per input height unit. Imperial height is a single number of
/// feet, so `5'9"` reads as 5 ft.
pub const CM_PER_FOOT: f64 = 30.48;
pub const KG_PER_POUND: f64 = 0.453592;

/// Leading decimal number, ignoring whatever trails it (`"175cm"` -> 175).
pub(crate) fn parse_leading_f64(input: &str) -> Option<f64> {
    lazy_static! {
        static ref FLOAT_RE: Regex =
            Regex::new(r"^\s*[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").unwrap();
    }
    FLOAT_RE
        .find(input)
        .and_then(|m| m.as_str().trim().parse::<f64>().ok())
}

/// Leading integer, truncating any fraction (`"25.9"` -> 25).
pub(crate) fn parse_leading_i64(input: &str) -> Option<i64> {
    lazy_static! {
        static ref INT_RE: Regex = Regex::new(r"^\s*[+-]?\d+").unwrap();
    }
    INT_RE
        .find(input)
        .and_then(|m| m.as_str().trim().parse::<i64>().ok())
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Converts input-side measurements to centimeters and kilograms.
pub fn to_metric(units: UnitSystem, height: f64, weight: f64) -> (f64, f64) {
    match units {
        UnitSystem::Metric => (height, weight),
        UnitSystem::Imperial => (height * CM_PER_FOOT, weight * KG_PER_POUND),
    }
}

fn optional_text(s: &str) -> Option<String> {
    let t = s.trim();
    (!t.is_empty()).then(|| t.to_string())
}

/// Validates every field and normalizes units. Any field error rejects the
/// whole form.
pub fn validate(form: &ProfileForm) -> Result<Profile, FieldErrors> {
    let mut errors = FieldErrors::default();

    let height = positive(parse_leading_f64(&form.height));
    if height.is_none() {
        errors.insert(Field::Height, "Enter a valid height");
    }
    let weight = positive(parse_leading_f64(&form.weight));
    if weight.is_none() {
        errors.insert(Field::Weight, "Enter a valid weight");
    }
    let age = parse_leading_i64(&form.age).filter(|a| (MIN_AGE..=MAX_AGE).contains(a));
    if age.is_none() {
        errors.insert(Field::Age, "Enter a valid age (13-120)");
    }

    match (height, weight, age) {
        (Some(height), Some(weight), Some(age)) => {
            let (height_cm, weight_kg) = to_metric(form.units, height, weight);
            Ok(Profile {
                name: optional_text(&form.name),
                email: optional_text(&form.email),
                age,
                height_cm,
                weight_kg,
                activity_level: form.activity_level,
                units: form.units,
            })
        }
        _ => Err(errors),
    }
}
