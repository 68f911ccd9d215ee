use nutriplan_core::domain::{
    common::entities::app_errors::CoreError,
    profile::entities::{ActivityLevel, Sex, UserProfile},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct GeneratePlanRequest {
    #[validate(range(min = 1, max = 120, message = "age must be between 1 and 120"))]
    #[schema(example = 30)]
    pub age: u32,

    /// Kilograms.
    #[validate(range(
        exclusive_min = 0.0,
        max = 500.0,
        message = "weight must be between 0 and 500 kg"
    ))]
    #[schema(example = 70.5)]
    pub weight: f64,

    /// Centimetres.
    #[validate(range(min = 1, max = 300, message = "height must be between 1 and 300 cm"))]
    #[schema(example = 175)]
    pub height: u32,

    /// Also accepts `masculino` / `feminino`.
    pub sex: Sex,

    /// Also accepts the Portuguese labels, e.g. `moderado` or `muito_ativo`.
    pub activity_level: ActivityLevel,

    #[validate(length(min = 1, max = 500, message = "goal must be between 1 and 500 characters"))]
    #[schema(example = "perder peso")]
    pub goal: String,
}

impl TryFrom<GeneratePlanRequest> for UserProfile {
    type Error = CoreError;

    fn try_from(request: GeneratePlanRequest) -> Result<Self, Self::Error> {
        UserProfile::new(
            request.age,
            request.weight,
            request.height,
            request.sex,
            request.activity_level,
            request.goal,
        )
    }
}
