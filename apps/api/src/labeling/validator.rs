//! Response Validator: sanitizes the model's JSON against the task's allow-list.
//!
//! Foreign labels are a soft failure: they are dropped and the result is flagged
//! for review. Only undecodable output is a hard error.

use serde_json::Value;
use tracing::warn;

use crate::errors::AppError;
use crate::labeling::models::{Label, LabelResult, RawLabelResponse};
use crate::labeling::task::{Cardinality, Task};

/// Results below this confidence always recommend human review.
pub const REVIEW_CONFIDENCE_THRESHOLD: f64 = 0.70;

/// Decodes `raw` and returns a sanitized `LabelResult` for `task`.
pub fn validate_response(task: Task, raw: &str) -> Result<LabelResult, AppError> {
    let response: RawLabelResponse = serde_json::from_str(raw)
        .map_err(|e| AppError::MalformedResponse(format!("Invalid labeling JSON: {e}")))?;
    Ok(sanitize(task, response))
}

/// Applies allow-list filtering, cardinality projection and the flag rules.
pub fn sanitize(task: Task, response: RawLabelResponse) -> LabelResult {
    let label_missing = matches!(response.label, None | Some(Value::Null));
    let candidates = normalize_labels(response.label);

    let valid: Vec<String> = candidates
        .iter()
        .filter_map(|c| c.as_str())
        .filter(|l| task.is_allowed(l))
        .map(str::to_string)
        .collect();

    let mut ambiguity_detected = response.ambiguity_detected.unwrap_or(false);
    let mut review_recommended = response.review_recommended.unwrap_or(false);

    if valid.len() < candidates.len() || label_missing {
        warn!(
            task = %task,
            dropped = candidates.len() - valid.len(),
            label_missing,
            "Upstream labels outside the allow-list; flagging for review"
        );
        ambiguity_detected = true;
        review_recommended = true;
    }

    let confidence = clamp_confidence(response.confidence);
    if confidence < REVIEW_CONFIDENCE_THRESHOLD || ambiguity_detected {
        review_recommended = true;
    }

    let label = match task.cardinality() {
        Cardinality::Single => Label::Single(
            valid
                .into_iter()
                .next()
                .or_else(|| task.fallback_label().map(str::to_string))
                .unwrap_or_default(),
        ),
        Cardinality::Multi => Label::Multi(valid),
    };

    LabelResult {
        task: task.canonical_name().to_string(),
        label,
        confidence,
        ambiguity_detected,
        review_recommended,
    }
}

/// Wraps a bare value in a list; null becomes empty.
fn normalize_labels(label: Option<Value>) -> Vec<Value> {
    match label {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items,
        Some(other) => vec![other],
    }
}

fn clamp_confidence(confidence: f64) -> f64 {
    if confidence.is_nan() {
        return 0.0;
    }
    if !(0.0..=1.0).contains(&confidence) {
        warn!(confidence, "Upstream confidence out of range; clamping");
    }
    confidence.clamp(0.0, 1.0)
}
