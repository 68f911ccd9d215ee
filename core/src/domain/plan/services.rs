use tracing::{debug, error, instrument};

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    generation::{
        ports::LLMClient, retry::run_with_retry, validation::parse_structured,
        value_objects::GenerationOptions,
    },
    plan::{
        entities::WeeklyPlan, ports::PlanService, prompts::build_plan_prompt,
        schema::get_weekly_plan_schema,
    },
    profile::entities::UserProfile,
};

impl<LLM> PlanService for Service<LLM>
where
    LLM: LLMClient,
{
    #[instrument(
        skip(self, profile, options),
        fields(activity_level = %profile.activity_level())
    )]
    async fn generate_plan(
        &self,
        profile: UserProfile,
        options: GenerationOptions,
    ) -> Result<WeeklyPlan, CoreError> {
        // 1. Build prompt and schema
        let prompt = build_plan_prompt(&profile);
        let response_schema = get_weekly_plan_schema();

        // 2. Call LLM, then parse and validate the response
        let result = run_with_retry("generate_plan", &self.settings, &options, || {
            let prompt = prompt.clone();
            let response_schema = response_schema.clone();
            async move {
                let raw_response = self
                    .llm_client
                    .generate_with_text(prompt, response_schema.clone())
                    .await?;
                parse_structured::<WeeklyPlan>(&raw_response, &response_schema)
            }
        })
        .await;

        match result {
            Ok(plan) => {
                debug!(
                    shopping_items = plan.shopping_list.len(),
                    "weekly plan generated"
                );
                Ok(plan)
            }
            Err(e) => {
                error!(kind = e.kind(), error = %e, "weekly plan generation failed");
                Err(CoreError::GenerationFailed(e))
            }
        }
    }
}
