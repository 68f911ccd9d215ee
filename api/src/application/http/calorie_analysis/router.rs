use axum::{Router, extract::DefaultBodyLimit, routing::post};
use utoipa::OpenApi;

use super::handlers::analyze_meal_image::{
    __path_analyze_meal_image, MAX_IMAGE_SIZE, analyze_meal_image,
};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(analyze_meal_image))]
pub struct CalorieAnalysisApiDoc;

pub fn calorie_analysis_routes(state: AppState) -> Router<AppState> {
    // Room for the multipart framing around a maximum-size image.
    let body_limit = MAX_IMAGE_SIZE + 64 * 1024;

    Router::new().route(
        &format!("{}/calorie-analysis", state.args.server.root_path),
        post(analyze_meal_image).layer(DefaultBodyLimit::max(body_limit)),
    )
}
