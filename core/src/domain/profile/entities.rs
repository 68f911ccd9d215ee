use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::common::entities::app_errors::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    #[serde(alias = "masculino")]
    Male,
    #[serde(alias = "feminino")]
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl FromStr for Sex {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "masculino" => Ok(Sex::Male),
            "female" | "feminino" => Ok(Sex::Female),
            other => Err(CoreError::InvalidInput(format!("unknown sex '{}'", other))),
        }
    }
}

/// Ordered from least to most active.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    #[serde(alias = "sedentario")]
    Sedentary,
    #[serde(alias = "leve")]
    Light,
    #[serde(alias = "moderado")]
    Moderate,
    #[serde(alias = "ativo")]
    Active,
    #[serde(alias = "muito_ativo")]
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sedentary" | "sedentario" => Ok(ActivityLevel::Sedentary),
            "light" | "leve" => Ok(ActivityLevel::Light),
            "moderate" | "moderado" => Ok(ActivityLevel::Moderate),
            "active" | "ativo" => Ok(ActivityLevel::Active),
            "very_active" | "muito_ativo" => Ok(ActivityLevel::VeryActive),
            other => Err(CoreError::InvalidInput(format!(
                "unknown activity level '{}'",
                other
            ))),
        }
    }
}

/// Biometric and lifestyle data a plan is generated from.
///
/// Only constructible through [`UserProfile::new`], so every instance holds
/// positive measurements and a non-blank goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "RawUserProfile")]
pub struct UserProfile {
    age: u32,
    /// Kilograms.
    weight: f64,
    /// Centimetres.
    height: u32,
    sex: Sex,
    activity_level: ActivityLevel,
    goal: String,
}

#[derive(Deserialize)]
struct RawUserProfile {
    age: u32,
    weight: f64,
    height: u32,
    sex: Sex,
    activity_level: ActivityLevel,
    goal: String,
}

impl TryFrom<RawUserProfile> for UserProfile {
    type Error = CoreError;

    fn try_from(raw: RawUserProfile) -> Result<Self, Self::Error> {
        UserProfile::new(
            raw.age,
            raw.weight,
            raw.height,
            raw.sex,
            raw.activity_level,
            raw.goal,
        )
    }
}

impl UserProfile {
    pub fn new(
        age: u32,
        weight: f64,
        height: u32,
        sex: Sex,
        activity_level: ActivityLevel,
        goal: impl Into<String>,
    ) -> Result<Self, CoreError> {
        if age == 0 {
            return Err(CoreError::InvalidInput("age must be positive".to_string()));
        }

        if !weight.is_finite() || weight <= 0.0 {
            return Err(CoreError::InvalidInput(
                "weight must be a positive number".to_string(),
            ));
        }

        if height == 0 {
            return Err(CoreError::InvalidInput(
                "height must be positive".to_string(),
            ));
        }

        let goal = goal.into().trim().to_string();
        if goal.is_empty() {
            return Err(CoreError::InvalidInput("goal must not be empty".to_string()));
        }

        Ok(Self {
            age,
            weight,
            height,
            sex,
            activity_level,
            goal,
        })
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn activity_level(&self) -> ActivityLevel {
        self.activity_level
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }
}
