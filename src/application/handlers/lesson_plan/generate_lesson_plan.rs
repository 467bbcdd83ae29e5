//! GenerateLessonPlanHandler - Runs one request through the pipeline.
//!
//! Prompt rendering, a single model call, then interpretation with the
//! strategy the request declared.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::lesson::{LessonPlan, LessonRequest, PromptRenderer};
use crate::ports::{
    AIError, AIProvider, CompletionRequest, FinishReason, InterpretError, InterpretWarning,
    Interpretation, InterpreterFactory, MessageRole, RequestMetadata,
};

/// Command to generate a lesson plan.
#[derive(Debug, Clone)]
pub struct GenerateLessonPlanCommand {
    pub request: LessonRequest,
}

/// Result of a successful generation.
#[derive(Debug, Clone)]
pub struct GenerateLessonPlanResult {
    pub plan: LessonPlan,
    pub warnings: Vec<InterpretWarning>,
    /// Text exactly as returned by the model.
    pub raw_response: String,
    /// Correlates the log lines of this run.
    pub trace_id: String,
    pub model: String,
}

/// Errors from lesson plan generation.
#[derive(Debug, thiserror::Error)]
pub enum GenerateLessonPlanError {
    #[error("Model call failed: {0}")]
    Provider(#[from] AIError),

    #[error(transparent)]
    Malformed(#[from] InterpretError),

    /// The model answered with an error message instead of a plan.
    #[error("Model reported an error: {message}")]
    ModelReportedError { message: String },
}

impl GenerateLessonPlanError {
    /// Returns true if the model call ran out of time.
    pub fn is_timeout(&self) -> bool {
        matches!(self, GenerateLessonPlanError::Provider(err) if err.is_timeout())
    }
}

/// Handler for generating lesson plans.
pub struct GenerateLessonPlanHandler {
    provider: Arc<dyn AIProvider>,
    interpreters: Arc<dyn InterpreterFactory>,
    prompts: PromptRenderer,
    max_tokens: Option<u32>,
}

impl GenerateLessonPlanHandler {
    pub fn new(provider: Arc<dyn AIProvider>, interpreters: Arc<dyn InterpreterFactory>) -> Self {
        Self {
            provider,
            interpreters,
            prompts: PromptRenderer::new(),
            max_tokens: None,
        }
    }

    /// Caps the length of the model's answer.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub async fn handle(
        &self,
        cmd: GenerateLessonPlanCommand,
    ) -> Result<GenerateLessonPlanResult, GenerateLessonPlanError> {
        let request = cmd.request;
        let trace_id = Uuid::new_v4().to_string();

        tracing::info!(
            trace_id = %trace_id,
            topic = %request.topic(),
            board = %request.board(),
            grade = request.grade(),
            format = %request.response_format(),
            "Generating lesson plan"
        );

        // 1. Render the prompt for the declared grammar
        let prompt = self.prompts.render(&request);
        let mut completion = CompletionRequest::new(RequestMetadata::new(trace_id.clone()))
            .with_system_prompt(prompt.system)
            .with_message(MessageRole::User, prompt.user);
        if let Some(max_tokens) = self.max_tokens {
            completion = completion.with_max_tokens(max_tokens);
        }

        // 2. One model call, no retries
        let response = self.provider.complete(completion).await.map_err(|err| {
            tracing::error!(trace_id = %trace_id, error = %err, "Model call failed");
            err
        })?;

        if response.finish_reason == FinishReason::Length {
            tracing::warn!(trace_id = %trace_id, "Model output was truncated at the token limit");
        }

        // 3. Interpret with the strategy the request declared
        let interpreter = self.interpreters.interpreter_for(&request);
        let interpretation = interpreter
            .interpret(&response.content, &request.default_title())
            .map_err(|err| {
                tracing::warn!(trace_id = %trace_id, error = %err, "Model output was malformed");
                err
            })?;

        match interpretation {
            Interpretation::ErrorReport(message) => {
                tracing::warn!(trace_id = %trace_id, "Model reported an error instead of a plan");
                Err(GenerateLessonPlanError::ModelReportedError { message })
            }
            Interpretation::Parsed(parsed) => {
                for warning in &parsed.warnings {
                    tracing::warn!(trace_id = %trace_id, %warning, "Lesson plan incomplete");
                }
                tracing::info!(
                    trace_id = %trace_id,
                    sections = parsed.plan.section_count(),
                    tokens = response.usage.total_tokens,
                    "Lesson plan generated"
                );

                Ok(GenerateLessonPlanResult {
                    plan: parsed.plan,
                    warnings: parsed.warnings,
                    raw_response: response.content,
                    trace_id,
                    model: response.model,
                })
            }
        }
    }
}
