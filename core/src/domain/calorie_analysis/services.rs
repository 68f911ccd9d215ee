use tracing::{debug, error, instrument};

use crate::domain::{
    calorie_analysis::{
        entities::CalorieAnalysis, ports::CalorieAnalysisService, prompts::build_analysis_prompt,
        schema::get_calorie_analysis_schema,
    },
    common::{entities::app_errors::CoreError, services::Service},
    generation::{
        ports::LLMClient,
        retry::run_with_retry,
        validation::parse_structured,
        value_objects::{GenerationOptions, ImageInput},
    },
};

impl<LLM> CalorieAnalysisService for Service<LLM>
where
    LLM: LLMClient,
{
    #[instrument(
        skip(self, image, options),
        fields(mime_type = %image.mime_type(), image_bytes = image.data().len())
    )]
    async fn analyze_image(
        &self,
        image: ImageInput,
        options: GenerationOptions,
    ) -> Result<CalorieAnalysis, CoreError> {
        let prompt = build_analysis_prompt();
        let response_schema = get_calorie_analysis_schema();

        let result = run_with_retry("analyze_image", &self.settings, &options, || {
            let prompt = prompt.clone();
            let image = image.clone();
            let response_schema = response_schema.clone();
            async move {
                let raw_response = self
                    .llm_client
                    .generate_with_image(prompt, image, response_schema.clone())
                    .await?;
                parse_structured::<CalorieAnalysis>(&raw_response, &response_schema)
            }
        })
        .await;

        match result {
            Ok(analysis) => {
                debug!(
                    total_calories = analysis.total_calories,
                    "calorie analysis completed"
                );
                Ok(analysis)
            }
            Err(e) => {
                error!(kind = e.kind(), error = %e, "calorie analysis failed");
                Err(CoreError::GenerationFailed(e))
            }
        }
    }
}
