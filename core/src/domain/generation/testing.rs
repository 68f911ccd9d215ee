use std::{collections::VecDeque, sync::Mutex};

use serde_json::Value;

use crate::domain::generation::{
    errors::GenerationError, ports::LLMClient, value_objects::ImageInput,
};

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub prompt: String,
    pub image: Option<ImageInput>,
    pub response_schema: Value,
}

/// Replays canned responses in order and records every request.
#[derive(Debug, Default)]
pub struct ScriptedLLMClient {
    responses: Mutex<VecDeque<Result<String, GenerationError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedLLMClient {
    pub fn new(responses: impl IntoIterator<Item = Result<String, GenerationError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn respond(&self, call: RecordedCall) -> Result<String, GenerationError> {
        self.calls.lock().unwrap().push(call);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GenerationError::transport(None, "no scripted response left")))
    }
}

impl LLMClient for ScriptedLLMClient {
    async fn generate_with_image(
        &self,
        prompt: String,
        image: ImageInput,
        response_schema: Value,
    ) -> Result<String, GenerationError> {
        self.respond(RecordedCall {
            prompt,
            image: Some(image),
            response_schema,
        })
    }

    async fn generate_with_text(
        &self,
        prompt: String,
        response_schema: Value,
    ) -> Result<String, GenerationError> {
        self.respond(RecordedCall {
            prompt,
            image: None,
            response_schema,
        })
    }
}
