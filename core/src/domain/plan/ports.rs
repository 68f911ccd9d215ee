use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError, generation::value_objects::GenerationOptions,
    plan::entities::WeeklyPlan, profile::entities::UserProfile,
};

/// Service trait for weekly plan generation
#[cfg_attr(test, mockall::automock)]
pub trait PlanService: Send + Sync {
    fn generate_plan(
        &self,
        profile: UserProfile,
        options: GenerationOptions,
    ) -> impl Future<Output = Result<WeeklyPlan, CoreError>> + Send;
}
