use axum::{Router, routing::post};
use utoipa::OpenApi;

use super::handlers::generate_plan::{__path_generate_plan, generate_plan};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(generate_plan))]
pub struct PlanApiDoc;

pub fn plan_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/plans", state.args.server.root_path),
        post(generate_plan),
    )
}
