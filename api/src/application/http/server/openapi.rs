use utoipa::OpenApi;

use crate::application::http::{
    calorie_analysis::router::CalorieAnalysisApiDoc, health::HealthApiDoc,
    plan::router::PlanApiDoc,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "NutriPlan API",
        description = "Weekly diet plans and meal photo calorie estimates generated with Gemini."
    ),
    nest(
        (path = "/plans", api = PlanApiDoc),
        (path = "/calorie-analysis", api = CalorieAnalysisApiDoc),
    )
)]
pub struct ApiDoc;

/// Full document with every module merged in.
pub fn api_doc() -> utoipa::openapi::OpenApi {
    let mut openapi = ApiDoc::openapi();
    openapi.merge(HealthApiDoc::openapi());
    openapi
}
