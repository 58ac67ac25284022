//! Task catalog: the closed set of labeling tasks and prompting modes.
//!
//! Every task owns a fixed allow-list, a cardinality policy, and the worked
//! examples used in few-shot mode. Nothing here is mutable at runtime.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::errors::AppError;

/// A labeling objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Task {
    SentimentAnalysis,
    IntentClassification,
    UserSignalClassification,
}

/// Prompting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mode {
    #[serde(rename = "zero-shot")]
    ZeroShot,
    #[serde(rename = "few-shot")]
    FewShot,
}

/// Whether a task accepts exactly one label or any number of labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    Single,
    Multi,
}

/// A fixed illustrative example embedded in few-shot prompts.
#[derive(Debug, Clone, Copy)]
pub struct WorkedExample {
    pub text: &'static str,
    pub labels: &'static [&'static str],
    pub confidence: f64,
}

const SENTIMENT_LABELS: &[&str] = &["positive", "neutral", "negative", "mixed"];

const INTENT_LABELS: &[&str] = &[
    "question",
    "request",
    "complaint",
    "instruction",
    "feedback",
    "informational",
    "other",
];

const USER_SIGNAL_LABELS: &[&str] = &[
    "implicit_expectation",
    "frustration_signal",
    "blocked_progress",
    "workaround_seeking",
];

const SENTIMENT_EXAMPLES: &[WorkedExample] = &[
    WorkedExample {
        text: "This update is fantastic, everything feels faster.",
        labels: &["positive"],
        confidence: 0.92,
    },
    WorkedExample {
        text: "It works fine, but nothing really stands out.",
        labels: &["neutral"],
        confidence: 0.78,
    },
];

const INTENT_EXAMPLES: &[WorkedExample] = &[
    WorkedExample {
        text: "Can you help me reset my password?",
        labels: &["question"],
        confidence: 0.86,
    },
    WorkedExample {
        text: "The app crashes whenever I try to submit the form.",
        labels: &["complaint"],
        confidence: 0.91,
    },
];

const USER_SIGNAL_EXAMPLES: &[WorkedExample] = &[
    WorkedExample {
        text: "I thought this feature would work better than it does.",
        labels: &["implicit_expectation"],
        confidence: 0.83,
    },
    WorkedExample {
        text: "This is getting really annoying. Is there any workaround?",
        labels: &["frustration_signal", "workaround_seeking"],
        confidence: 0.79,
    },
    WorkedExample {
        text: "I can't get past the verification screen.",
        labels: &["blocked_progress"],
        confidence: 0.88,
    },
];

impl Task {
    pub const ALL: [Task; 3] = [
        Task::IntentClassification,
        Task::SentimentAnalysis,
        Task::UserSignalClassification,
    ];

    /// Lower-case name embedded in prompts and echoed in results.
    pub fn canonical_name(self) -> &'static str {
        match self {
            Task::SentimentAnalysis => "sentiment analysis",
            Task::IntentClassification => "intent classification",
            Task::UserSignalClassification => "user signal classification",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Task::SentimentAnalysis => "Sentiment Analysis",
            Task::IntentClassification => "Intent Classification",
            Task::UserSignalClassification => "User Signal Classification",
        }
    }

    pub fn allowed_labels(self) -> &'static [&'static str] {
        match self {
            Task::SentimentAnalysis => SENTIMENT_LABELS,
            Task::IntentClassification => INTENT_LABELS,
            Task::UserSignalClassification => USER_SIGNAL_LABELS,
        }
    }

    pub fn cardinality(self) -> Cardinality {
        match self {
            Task::SentimentAnalysis => Cardinality::Single,
            Task::IntentClassification | Task::UserSignalClassification => Cardinality::Multi,
        }
    }

    /// Label used for single-label tasks when the model returned nothing usable.
    pub fn fallback_label(self) -> Option<&'static str> {
        match self {
            Task::SentimentAnalysis => Some("neutral"),
            Task::IntentClassification | Task::UserSignalClassification => None,
        }
    }

    pub fn examples(self) -> &'static [WorkedExample] {
        match self {
            Task::SentimentAnalysis => SENTIMENT_EXAMPLES,
            Task::IntentClassification => INTENT_EXAMPLES,
            Task::UserSignalClassification => USER_SIGNAL_EXAMPLES,
        }
    }

    pub fn is_allowed(self, label: &str) -> bool {
        self.allowed_labels().contains(&label)
    }

    /// The two tasks whose labels must not leak into this one.
    pub fn others(self) -> impl Iterator<Item = Task> {
        Task::ALL.into_iter().filter(move |&t| t != self)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

impl FromStr for Task {
    type Err = AppError;

    /// Case-insensitive; `-` and `_` count as spaces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .replace(['-', '_'], " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        Task::ALL
            .into_iter()
            .find(|t| t.canonical_name() == normalized)
            .ok_or_else(|| {
                AppError::InvalidRequest(format!(
                    "Unsupported labeling task '{}'. Expected one of: {}",
                    s.trim(),
                    Task::ALL.map(Task::display_name).join(", ")
                ))
            })
    }
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::ZeroShot, Mode::FewShot];

    pub fn canonical_name(self) -> &'static str {
        match self {
            Mode::ZeroShot => "zero-shot",
            Mode::FewShot => "few-shot",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

impl FromStr for Mode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|&c| c != '-' && c != '_' && !c.is_whitespace())
            .collect();

        match compact.as_str() {
            "zeroshot" => Ok(Mode::ZeroShot),
            "fewshot" => Ok(Mode::FewShot),
            _ => Err(AppError::InvalidRequest(format!(
                "Unsupported labeling mode '{}'. Expected Zero-shot or Few-shot",
                s.trim()
            ))),
        }
    }
}
