use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    #[default]
    Moderate,
    Active,
    Extra,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::Extra,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::Extra => "extra",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary",
            ActivityLevel::Light => "Light",
            ActivityLevel::Moderate => "Moderate",
            ActivityLevel::Active => "Very Active",
            ActivityLevel::Extra => "Extra Active",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Little or no exercise",
            ActivityLevel::Light => "Light exercise/sports 1-3 days/week",
            ActivityLevel::Moderate => "Moderate exercise/sports 3-5 days/week",
            ActivityLevel::Active => "Hard exercise/sports 6-7 days/week",
            ActivityLevel::Extra => "Very hard exercise & physical job",
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        ActivityLevel::ALL
            .into_iter()
            .find(|a| a.key() == s)
            .ok_or_else(|| format!("unknown activity level '{}'", s))
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn height_unit(self) -> &'static str {
        match self {
            UnitSystem::Metric => "cm",
            UnitSystem::Imperial => "ft/in",
        }
    }

    pub fn weight_unit(self) -> &'static str {
        match self {
            UnitSystem::Metric => "kg",
            UnitSystem::Imperial => "lbs",
        }
    }
}

impl FromStr for UnitSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "metric" => Ok(UnitSystem::Metric),
            "imperial" => Ok(UnitSystem::Imperial),
            other => Err(format!("unknown unit system '{}'", other)),
        }
    }
}

/// Raw form state as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub height: String,
    pub weight: String,
    pub age: String,
    pub activity_level: ActivityLevel,
    pub units: UnitSystem,
}

/// Validated profile in canonical (metric) units.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: i64,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity_level: ActivityLevel,
    pub units: UnitSystem,
}

/// Request body for `POST /api/users`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub age: i64,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity_level: ActivityLevel,
    pub units: UnitSystem,
}

impl From<&Profile> for CreateUserRequest {
    fn from(p: &Profile) -> Self {
        Self {
            name: p.name.clone().unwrap_or_else(|| "User".to_string()),
            email: p.email.clone().unwrap_or_default(),
            age: p.age,
            height_cm: p.height_cm,
            weight_kg: p.weight_kg,
            activity_level: p.activity_level,
            units: p.units,
        }
    }
}

/// Opaque identifier assigned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(n) => write!(f, "{}", n),
            UserId::Text(s) => f.write_str(s),
        }
    }
}

impl UserId {
    /// `0` and `""` do not identify anyone.
    pub fn is_blank(&self) -> bool {
        match self {
            UserId::Number(n) => *n == 0,
            UserId::Text(s) => s.is_empty(),
        }
    }
}

/// User record returned by `POST /api/users`. Only `id` is required. The
/// biometric fields are kept as raw JSON and echoed back into the analysis
/// request untouched, whatever type the server chose (`"180.00"` included).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    #[serde(default)]
    pub age: Option<serde_json::Value>,
    #[serde(default)]
    pub height_cm: Option<serde_json::Value>,
    #[serde(default)]
    pub weight_kg: Option<serde_json::Value>,
    #[serde(default)]
    pub activity_level: Option<serde_json::Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
