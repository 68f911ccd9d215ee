use std::future::Future;

use crate::domain::{
    calorie_analysis::entities::CalorieAnalysis,
    common::entities::app_errors::CoreError,
    generation::value_objects::{GenerationOptions, ImageInput},
};

/// Service trait for photo-based calorie estimation
#[cfg_attr(test, mockall::automock)]
pub trait CalorieAnalysisService: Send + Sync {
    fn analyze_image(
        &self,
        image: ImageInput,
        options: GenerationOptions,
    ) -> impl Future<Output = Result<CalorieAnalysis, CoreError>> + Send;
}
