use crate::{
    domain::common::{NutriPlanConfig, entities::app_errors::CoreError, services::Service},
    infrastructure::llm::GeminiLLMClient,
};

pub type NutriPlanService = Service<GeminiLLMClient>;

pub fn create_service(config: NutriPlanConfig) -> Result<NutriPlanService, CoreError> {
    let llm_client = GeminiLLMClient::new(&config.llm)?;

    tracing::info!(
        model = llm_client.model_name(),
        timeout_secs = config.generation.timeout.as_secs(),
        max_attempts = config.generation.retry.max_attempts,
        "generation service ready"
    );

    Ok(Service::new(llm_client, config.generation))
}
