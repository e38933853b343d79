#[cfg(feature = "async-openai")]
use async_openai::{
    config::OpenAIConfig,
    types::{CreateEmbeddingRequestArgs, EmbeddingInput},
    Client,
};
use async_trait::async_trait;

use crate::data::errors::IngestError;
use crate::traits::EmbeddingGenerator;

/// Embedding generator backed by the OpenAI embeddings API, pinned to a
/// single model identifier.
#[cfg(feature = "async-openai")]
pub struct OpenAiEmbeddingGenerator {
    client: Client<OpenAIConfig>,
    model: String,
}

#[cfg(feature = "async-openai")]
impl OpenAiEmbeddingGenerator {
    pub fn new(api_key: String, model: String) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key);
        let client = Client::with_config(config);
        Self { client, model }
    }
}

#[cfg(feature = "async-openai")]
#[async_trait]
impl EmbeddingGenerator for OpenAiEmbeddingGenerator {
    async fn generate_embedding(&self, text: &str) -> Result<Vec<f32>, IngestError> {
        let request = CreateEmbeddingRequestArgs::default()
            .model(&self.model)
            .input(EmbeddingInput::String(text.to_string()))
            .build()
            .map_err(|e| IngestError::Provider(e.to_string()))?;

        let response = self
            .client
            .embeddings()
            .create(request)
            .await
            .map_err(|e| IngestError::Provider(e.to_string()))?;

        Ok(response.data[0].embedding.clone())
    }
}
