use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::labeling::task::{Cardinality, Mode, Task};

/// Incoming labeling request. Fields are optional so that a missing field is
/// reported as an `InvalidRequest` rather than an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LabelRequest {
    pub task: Option<String>,
    pub mode: Option<String>,
    pub text: Option<String>,
}

/// Single- or multi-label payload, shaped by the task's cardinality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Single(String),
    Multi(Vec<String>),
}

impl Label {
    pub fn as_slice(&self) -> &[String] {
        match self {
            Label::Single(label) => std::slice::from_ref(label),
            Label::Multi(labels) => labels,
        }
    }
}

/// The validated labeling outcome returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelResult {
    pub task: String,
    pub label: Label,
    pub confidence: f64,
    pub ambiguity_detected: bool,
    pub review_recommended: bool,
}

/// The upstream model's JSON object before sanitization.
///
/// `label` stays untyped: a stray number or object is a foreign label, not a
/// decode failure. Absent and `null` flags both read as false.
#[derive(Debug, Clone, Deserialize)]
pub struct RawLabelResponse {
    #[serde(default)]
    pub label: Option<Value>,
    pub confidence: f64,
    #[serde(default)]
    pub ambiguity_detected: Option<bool>,
    #[serde(default)]
    pub review_recommended: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct TaskDescriptor {
    pub id: Task,
    pub name: &'static str,
    pub display_name: &'static str,
    pub cardinality: Cardinality,
    pub allowed_labels: &'static [&'static str],
}

impl From<Task> for TaskDescriptor {
    fn from(task: Task) -> Self {
        Self {
            id: task,
            name: task.canonical_name(),
            display_name: task.display_name(),
            cardinality: task.cardinality(),
            allowed_labels: task.allowed_labels(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TaskCatalogResponse {
    pub tasks: Vec<TaskDescriptor>,
    pub modes: Vec<Mode>,
}
