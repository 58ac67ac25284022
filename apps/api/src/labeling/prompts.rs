//! Prompt Builder: turns (task, mode, text) into the system instruction sent upstream.

use crate::labeling::task::{Cardinality, Mode, Task, WorkedExample};
use crate::llm_client::prompts::JSON_ONLY_RULE;

/// User-turn instruction sent alongside every system prompt.
pub const LABEL_USER_INSTRUCTION: &str = "Please label the text and return ONLY valid JSON.";

const HEADER: &str = "\
You are an AI text labeling engine used in a professional data labeling application.
You must strictly follow the task, labeling mode, allowed labels, and rules provided.";

const AMBIGUITY_AND_REVIEW_RULES: &str = "\
- Do NOT invent or modify labels.
- Confidence must be a number between 0.0 and 1.0.
- Set ambiguity_detected = true when:
    • Multiple labels are equally plausible, OR
    • The classification cannot be confidently inferred, OR
    • The text contains mixed or conflicting signals.
- Set review_recommended = true if:
    • confidence < 0.70, OR
    • ambiguity_detected = true";

/// Builds the complete system prompt for one labeling request.
///
/// `text` is embedded verbatim: no trimming, escaping or truncation.
pub fn build_system_prompt(task: Task, mode: Mode, text: &str) -> String {
    let others = task
        .others()
        .map(Task::display_name)
        .collect::<Vec<_>>()
        .join(" or ");

    let label_type = match task.cardinality() {
        Cardinality::Single => "single label only",
        Cardinality::Multi => "multi-label allowed",
    };

    let allowed = task
        .allowed_labels()
        .iter()
        .map(|label| format!("- {label}\n"))
        .collect::<String>();

    let mut prompt = String::with_capacity(2048 + text.len());

    prompt.push_str(&format!(
        "{HEADER}\n{JSON_ONLY_RULE}\nTask: {task}\nLabeling Mode: {mode}\n\n\
         IMPORTANT: For this task, you MUST use ONLY the following allowed labels. \
         Do NOT use labels from other tasks ({others}, or any other classification system).\n\n\
         Allowed Labels ({label_type}):\n{allowed}\n\
         Text to Label:\n{text}\n\
         ## If {mode} = zero-shot, IGNORE all examples and rely only on the rules."
    ));

    if mode == Mode::FewShot {
        prompt.push_str(&format!(
            "\n## If task = \"{}\" and labeling_mode = \"few-shot\"",
            task.display_name()
        ));
        for (i, example) in task.examples().iter().enumerate() {
            prompt.push('\n');
            prompt.push_str(&render_example(i + 1, example));
        }
    }

    prompt.push_str(&format!(
        "\n## Labeling rules\nRules:\n\
         - Use ONLY labels from the allowed label list above. {}\n\
         - Do NOT use labels from other tasks (labels belonging to {others} are forbidden for {}).\n\
         {AMBIGUITY_AND_REVIEW_RULES}\n\
         ## Output format (json)\n{}",
        cardinality_instruction(task.cardinality()),
        task.display_name(),
        output_format(task)
    ));

    prompt
}

fn cardinality_instruction(cardinality: Cardinality) -> &'static str {
    match cardinality {
        Cardinality::Single => "Assign EXACTLY ONE label.",
        Cardinality::Multi => "Assign ONE OR MORE labels only if clearly supported.",
    }
}

/// Renders one worked example as a literal illustrative block.
pub fn render_example(index: usize, example: &WorkedExample) -> String {
    let labels = example
        .labels
        .iter()
        .map(|l| format!("\"{l}\""))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Example {index}:\n\
         Text: \"{}\"\n\
         Output:\n\
         {{\n  \"label\": [{labels}],\n  \"confidence\": {},\n  \"ambiguity_detected\": false,\n  \"review_recommended\": false\n}}",
        example.text, example.confidence
    )
}

fn output_format(task: Task) -> String {
    format!(
        "{{\n  \"task\": \"{task}\",\n  \"label\": [\"<allowed label(s)>\"],\n  \"confidence\": <number between 0 and 1>,\n  \"ambiguity_detected\": true | false,\n  \"review_recommended\": true | false\n}}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "This is getting really annoying. Is there any workaround?";

    fn label_line(label: &str) -> String {
        format!("\n- {label}\n")
    }

    #[test]
    fn test_prompt_lists_own_labels_and_excludes_other_tasks() {
        for task in Task::ALL {
            for mode in Mode::ALL {
                let prompt = build_system_prompt(task, mode, SAMPLE);
                for label in task.allowed_labels() {
                    assert!(
                        prompt.contains(&label_line(label)),
                        "{task}/{mode} prompt is missing {label}"
                    );
                }
                for other in task.others() {
                    for label in other.allowed_labels() {
                        assert!(
                            !prompt.contains(&label_line(label)),
                            "{task}/{mode} prompt leaks {label} from {other}"
                        );
                        assert!(
                            !prompt.contains(&format!("\"{label}\"")),
                            "{task}/{mode} prompt quotes {label} from {other}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_opening_sections_layout() {
        let prompt = build_system_prompt(Task::SentimentAnalysis, Mode::ZeroShot, "Meh.");
        let expected = format!(
            "{HEADER}\n{JSON_ONLY_RULE}\nTask: sentiment analysis\nLabeling Mode: zero-shot\n\n\
             IMPORTANT: For this task, you MUST use ONLY the following allowed labels. \
             Do NOT use labels from other tasks (Intent Classification or User Signal Classification, \
             or any other classification system).\n\n\
             Allowed Labels (single label only):\n- positive\n- neutral\n- negative\n- mixed\n\n\
             Text to Label:\nMeh.\n\
             ## If zero-shot = zero-shot, IGNORE all examples and rely only on the rules.\n\
             ## Labeling rules\nRules:\n\
             - Use ONLY labels from the allowed label list above. Assign EXACTLY ONE label.\n"
        );
        assert!(prompt.starts_with(&expected));
    }

    #[test]
    fn test_header_embeds_canonical_task_and_mode() {
        let prompt = build_system_prompt(Task::IntentClassification, Mode::FewShot, "hi");
        assert!(prompt.starts_with("You are an AI text labeling engine"));
        assert!(prompt.contains("Task: intent classification\n"));
        assert!(prompt.contains("Labeling Mode: few-shot\n"));
        assert!(prompt.contains("You must output ONLY valid JSON."));
    }

    #[test]
    fn test_zero_shot_never_contains_examples() {
        for task in Task::ALL {
            let prompt = build_system_prompt(task, Mode::ZeroShot, SAMPLE);
            assert!(!prompt.contains("Example 1:"));
            assert!(prompt.contains("## If zero-shot = zero-shot, IGNORE all examples"));
        }
    }

    #[test]
    fn test_few_shot_contains_task_examples_verbatim() {
        for task in Task::ALL {
            let prompt = build_system_prompt(task, Mode::FewShot, "some text");
            for (i, example) in task.examples().iter().enumerate() {
                assert!(prompt.contains(&render_example(i + 1, example)));
            }
            assert!(!prompt.contains(&format!("Example {}:", task.examples().len() + 1)));
        }
    }

    #[test]
    fn test_few_shot_multi_label_example_block() {
        let prompt = build_system_prompt(Task::UserSignalClassification, Mode::FewShot, "x");
        assert!(prompt.contains(
            "Example 2:\nText: \"This is getting really annoying. Is there any workaround?\"\nOutput:\n{\n  \"label\": [\"frustration_signal\", \"workaround_seeking\"],\n  \"confidence\": 0.79,"
        ));
    }

    #[test]
    fn test_cardinality_instruction_follows_policy() {
        let single = build_system_prompt(Task::SentimentAnalysis, Mode::ZeroShot, "ok");
        assert!(single.contains("Allowed Labels (single label only):"));
        assert!(single.contains("Assign EXACTLY ONE label."));
        assert!(!single.contains("ONE OR MORE"));

        let multi = build_system_prompt(Task::IntentClassification, Mode::ZeroShot, "ok");
        assert!(multi.contains("Allowed Labels (multi-label allowed):"));
        assert!(multi.contains("Assign ONE OR MORE labels only if clearly supported."));
    }

    #[test]
    fn test_text_is_embedded_verbatim() {
        let text = "  line one\n\"quoted\" {braces} ünïcode  ";
        let prompt = build_system_prompt(Task::SentimentAnalysis, Mode::ZeroShot, text);
        assert!(prompt.contains(&format!("Text to Label:\n{text}\n")));
    }

    #[test]
    fn test_empty_text_still_builds() {
        let prompt = build_system_prompt(Task::SentimentAnalysis, Mode::ZeroShot, "");
        assert!(prompt.contains("Text to Label:\n\n## If zero-shot"));
    }

    #[test]
    fn test_rules_and_output_shape_present() {
        let prompt = build_system_prompt(Task::SentimentAnalysis, Mode::FewShot, "x");
        assert!(prompt.contains("confidence < 0.70"));
        assert!(prompt.contains("Do NOT invent or modify labels."));
        assert!(prompt.contains("The text contains mixed or conflicting signals."));
        assert!(prompt.ends_with(
            "## Output format (json)\n{\n  \"task\": \"sentiment analysis\",\n  \"label\": [\"<allowed label(s)>\"],\n  \"confidence\": <number between 0 and 1>,\n  \"ambiguity_detected\": true | false,\n  \"review_recommended\": true | false\n}"
        ));
    }

    #[test]
    fn test_cross_task_warning_names_other_tasks() {
        let prompt = build_system_prompt(Task::UserSignalClassification, Mode::ZeroShot, "x");
        assert!(prompt.contains("Intent Classification or Sentiment Analysis"));
    }
}
