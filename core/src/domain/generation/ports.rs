use std::future::Future;

use crate::domain::generation::{errors::GenerationError, value_objects::ImageInput};

/// LLM Client trait for schema-constrained generation.
///
/// One call is one outbound request; implementations must not retry.
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    fn generate_with_image(
        &self,
        prompt: String,
        image: ImageInput,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, GenerationError>> + Send;

    fn generate_with_text(
        &self,
        prompt: String,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, GenerationError>> + Send;
}
