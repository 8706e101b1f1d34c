//! Completion provider abstraction.

use std::sync::Arc;
use std::time::Duration;

use ragmux_core::Provider;
use rig::completion::{AssistantContent, CompletionModel as RigCompletionModel};
use rig::one_or_many::OneOrMany;
use rig::prelude::CompletionClient;
use rig::providers::openai;

use super::model::OpenAiCompletionModel;
use crate::error::classify_provider_error;
use crate::provider::OpenAiCredentials;
use crate::{Error, Result, TRACING_TARGET};

/// Default bound on a single completion request.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Completion provider wrapping the rig OpenAI completion model.
///
/// This is a cheaply cloneable wrapper around an `Arc`'d service.
#[derive(Clone)]
pub struct CompletionProvider {
    inner: Arc<CompletionService>,
    request_timeout: Duration,
}

struct CompletionService {
    model: openai::CompletionModel,
    model_name: &'static str,
}

impl CompletionProvider {
    /// Creates a new completion provider.
    pub fn new(model: OpenAiCompletionModel, credentials: &OpenAiCredentials) -> Result<Self> {
        let client = openai::Client::new(&credentials.api_key)
            .map_err(|e| Error::provider("openai", e.to_string()))?
            .completions_api();

        Ok(Self {
            inner: Arc::new(CompletionService {
                model: client.completion_model(model.as_str()),
                model_name: model.as_str(),
            }),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }

    /// Sets the bound on a single completion request.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Returns the model name.
    pub fn model_name(&self) -> &'static str {
        self.inner.model_name
    }

    /// Generates an answer for `user_message` under `system_context`.
    ///
    /// Throttling signals surface as [`Error::RateLimited`]; no backoff is
    /// performed here.
    pub async fn complete(&self, system_context: &str, user_message: &str) -> Result<String> {
        if user_message.trim().is_empty() {
            return Err(Error::invalid_input("cannot complete an empty message"));
        }

        tracing::debug!(
            target: TRACING_TARGET,
            model = %self.inner.model_name,
            context_chars = %system_context.len(),
            "Requesting completion"
        );

        let request = self
            .inner
            .model
            .completion_request(user_message)
            .preamble(system_context.to_owned());

        let response = tokio::time::timeout(self.request_timeout, request.send())
            .await
            .map_err(|_| {
                Error::timeout(format!(
                    "completion request exceeded {:?}",
                    self.request_timeout
                ))
            })?
            .map_err(|e| classify_provider_error("openai", e.to_string()))?;

        Ok(extract_text_content(&response.choice))
    }
}

#[async_trait::async_trait]
impl Provider for CompletionProvider {
    type Params = OpenAiCompletionModel;
    type Credentials = OpenAiCredentials;

    async fn connect(
        params: Self::Params,
        credentials: Self::Credentials,
    ) -> ragmux_core::Result<Self> {
        Ok(Self::new(params, &credentials)?)
    }
}

/// Extracts text content from assistant content choices.
fn extract_text_content(choice: &OneOrMany<AssistantContent>) -> String {
    choice
        .iter()
        .filter_map(|content| match content {
            AssistantContent::Text(text) => Some(text.text()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("")
}

impl std::fmt::Debug for CompletionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionProvider")
            .field("model", &self.inner.model_name)
            .finish()
    }
}
