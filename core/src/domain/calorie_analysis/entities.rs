use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Calorie estimate for a photographed dish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CalorieAnalysis {
    pub dish_name: String,
    pub total_calories: u32,
    /// Free-text nutritional commentary.
    pub analysis: String,
}
