use axum::extract::{Multipart, State};
use nutriplan_core::domain::{
    calorie_analysis::{entities::CalorieAnalysis, ports::CalorieAnalysisService},
    generation::value_objects::{GenerationOptions, ImageInput},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{
        api_error::{ApiError, ApiErrorResponse},
        response::Response,
    },
    app_state::AppState,
};

pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AnalyzeMealImageResponse {
    pub data: CalorieAnalysis,
}

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct AnalyzeMealImageForm {
    /// JPEG, PNG, WEBP, HEIC or HEIF photo of the meal.
    #[schema(format = Binary)]
    image: String,
}

#[utoipa::path(
    post,
    path = "",
    tag = "calorie-analysis",
    summary = "Analyze meal photo",
    description = "Estimates the dish name and total calories from a photo of a meal.",
    request_body(content = AnalyzeMealImageForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = AnalyzeMealImageResponse),
        (status = 400, body = ApiErrorResponse),
        (status = 502, body = ApiErrorResponse),
        (status = 504, body = ApiErrorResponse),
    ),
)]
pub async fn analyze_meal_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response<AnalyzeMealImageResponse>, ApiError> {
    let mut image: Option<ImageInput> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let mime_type = field
            .content_type()
            .map(|c| c.to_string())
            .ok_or_else(|| ApiError::BadRequest("Missing image content type".to_string()))?;

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read image: {}", e)))?;

        if data.len() > MAX_IMAGE_SIZE {
            return Err(ApiError::BadRequest(format!(
                "Image too large. Max size is {} bytes",
                MAX_IMAGE_SIZE
            )));
        }

        image = Some(ImageInput::new(data.to_vec(), mime_type)?);
    }

    let image = image.ok_or_else(|| ApiError::BadRequest("Missing image field".to_string()))?;

    let analysis = state
        .service
        .analyze_image(image, GenerationOptions::default())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(AnalyzeMealImageResponse { data: analysis }))
}
