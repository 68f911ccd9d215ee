use crate::domain::generation::{ports::LLMClient, value_objects::GenerationSettings};

/// Entry point for the generation operations.
///
/// Holds no mutable state; cloning is cheap as long as the LLM client is.
#[derive(Debug, Clone)]
pub struct Service<LLM>
where
    LLM: LLMClient,
{
    pub(crate) llm_client: LLM,
    pub(crate) settings: GenerationSettings,
}

impl<LLM> Service<LLM>
where
    LLM: LLMClient,
{
    pub fn new(llm_client: LLM, settings: GenerationSettings) -> Self {
        Self {
            llm_client,
            settings,
        }
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }
}
