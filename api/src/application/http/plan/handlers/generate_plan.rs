use axum::extract::State;
use nutriplan_core::domain::{
    generation::value_objects::GenerationOptions,
    plan::{entities::WeeklyPlan, ports::PlanService},
    profile::entities::UserProfile,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    plan::validators::GeneratePlanRequest,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GeneratePlanResponse {
    pub data: WeeklyPlan,
}

#[utoipa::path(
    post,
    path = "",
    tag = "plan",
    summary = "Generate weekly plan",
    description = "Generates a seven day diet and workout plan tailored to the given profile.",
    request_body = GeneratePlanRequest,
    responses(
        (status = 200, body = GeneratePlanResponse),
        (status = 400, body = ApiErrorResponse),
        (status = 502, body = ApiErrorResponse),
        (status = 504, body = ApiErrorResponse),
    ),
)]
pub async fn generate_plan(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<GeneratePlanRequest>,
) -> Result<Response<GeneratePlanResponse>, ApiError> {
    let profile = UserProfile::try_from(payload)?;

    let plan = state
        .service
        .generate_plan(profile, GenerationOptions::default())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GeneratePlanResponse { data: plan }))
}
