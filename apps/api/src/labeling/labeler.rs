//! Labeling pipeline: request checks → prompt → text generator → validator.

use tracing::info;

use crate::errors::AppError;
use crate::labeling::models::{LabelRequest, LabelResult};
use crate::labeling::prompts::{build_system_prompt, LABEL_USER_INSTRUCTION};
use crate::labeling::task::{Mode, Task};
use crate::labeling::validator::validate_response;
use crate::llm_client::TextGenerator;

pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields: task, mode, or text";
pub const MISSING_API_KEY_MESSAGE: &str = "OpenAI API key not configured";

/// A request whose fields are present and whose task/mode resolved.
#[derive(Debug, Clone)]
pub struct ParsedRequest {
    pub task: Task,
    pub mode: Mode,
    pub text: String,
}

/// Rejects missing or empty fields first, then parses task and mode strictly.
/// Whitespace-only `text` is labeled as given.
pub fn parse_request(request: LabelRequest) -> Result<ParsedRequest, AppError> {
    let (Some(task), Some(mode), Some(text)) = (
        non_blank(request.task),
        non_blank(request.mode),
        request.text.filter(|t| !t.is_empty()),
    ) else {
        return Err(AppError::InvalidRequest(MISSING_FIELDS_MESSAGE.to_string()));
    };

    Ok(ParsedRequest {
        task: task.parse()?,
        mode: mode.parse()?,
        text,
    })
}

fn non_blank(field: Option<String>) -> Option<String> {
    field.filter(|f| !f.trim().is_empty())
}

/// Runs one labeling request end to end. Nothing is retried.
pub async fn label_text(
    generator: Option<&dyn TextGenerator>,
    request: LabelRequest,
) -> Result<LabelResult, AppError> {
    let request = parse_request(request)?;

    let generator = generator
        .ok_or_else(|| AppError::ServiceUnavailable(MISSING_API_KEY_MESSAGE.to_string()))?;

    info!(
        task = %request.task,
        mode = %request.mode,
        text_len = request.text.len(),
        "Labeling text"
    );

    let system = build_system_prompt(request.task, request.mode, &request.text);
    let raw = generator.generate(&system, LABEL_USER_INSTRUCTION).await?;

    let result = validate_response(request.task, &raw)?;

    info!(
        task = %request.task,
        labels = ?result.label.as_slice(),
        confidence = result.confidence,
        review_recommended = result.review_recommended,
        "Labeling complete"
    );

    Ok(result)
}
