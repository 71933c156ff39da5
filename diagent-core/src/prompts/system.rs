//! System and user instruction composition

use crate::agent::attempt::{AttemptContext, AttemptFailure};
use crate::config::constants::plantuml;
use crate::diagrams::DiagramType;
use crate::types::PromptOptions;

const PERSONA: &str = "You are a professional PlantUML coder.";

/// Build the system instruction for one diagram request.
///
/// Pure string assembly: each enabled toggle appends one clause, then the
/// diagram type and its example template close the instruction.
pub fn compose_system_instruction(diagram_type: DiagramType, options: &PromptOptions) -> String {
    let mut instruction = String::from(PERSONA);

    if options.include_title {
        instruction.push_str(" Include a title.");
    }
    if options.use_theme {
        instruction.push_str(&format!(
            " Use {theme} theme. Syntax: !theme {theme}",
            theme = plantuml::THEME_NAME
        ));
    }
    if options.use_notes {
        instruction.push_str(" Use note if needed to explain more details.");
    }
    if options.use_grouping {
        instruction.push_str(" Use group or card if needed.");
    }

    instruction.push_str(&format!(
        " You MUST Output PlantUML code for a {} only and explain nothing.\nFor example the code will start with: {}.",
        diagram_type.prompt_name(),
        diagram_type.example()
    ));

    instruction
}

/// Build the user message for an attempt.
///
/// The first attempt sends the description untouched; retries append what
/// went wrong so the model can correct itself.
pub fn compose_user_instruction(instruction: &str, context: &AttemptContext) -> String {
    let Some(failure) = &context.prior_failure else {
        return instruction.to_string();
    };

    let mut message = format!(
        "{}\n\nThe previous answer could not be used: {failure}.",
        instruction.trim_end()
    );

    if let AttemptFailure::Render { markup, .. } = failure {
        message.push_str(&format!(
            "\nPrevious PlantUML code:\n{markup}\nAnalyze the code for any syntax error and return a corrected version."
        ));
    }

    message.push_str(" Output only the PlantUML code between @start and @end tags.");
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_toggles_on() {
        let prompt = compose_system_instruction(DiagramType::Sequence, &PromptOptions::default());
        assert!(prompt.starts_with("You are a professional PlantUML coder. Include a title."));
        assert!(prompt.contains("Use aws-orange theme. Syntax: !theme aws-orange"));
        assert!(prompt.contains("Use note if needed to explain more details."));
        assert!(prompt.contains("Use group or card if needed."));
        assert!(prompt.contains("PlantUML code for a Sequence Diagram only"));
        assert!(prompt.contains("@startuml\nAlice -> Bob: Message\n@enduml"));
    }

    #[test]
    fn all_toggles_off() {
        let prompt = compose_system_instruction(DiagramType::Class, &PromptOptions::none());
        assert!(!prompt.contains("title"));
        assert!(!prompt.contains("theme"));
        assert!(!prompt.contains("note"));
        assert!(!prompt.contains("group"));
        assert!(prompt.starts_with(
            "You are a professional PlantUML coder. You MUST Output PlantUML code for a Class Diagram only"
        ));
    }

    #[test]
    fn auto_type_asks_for_most_appropriate() {
        let prompt = compose_system_instruction(DiagramType::Auto, &PromptOptions::none());
        assert!(prompt.contains("for a most appropriate diagram only"));
    }

    #[test]
    fn composition_is_deterministic() {
        let options = PromptOptions {
            use_theme: false,
            ..PromptOptions::default()
        };
        assert_eq!(
            compose_system_instruction(DiagramType::Gantt, &options),
            compose_system_instruction(DiagramType::Gantt, &options)
        );
    }

    #[test]
    fn first_attempt_keeps_instruction() {
        let context = AttemptContext::first(3);
        assert_eq!(
            compose_user_instruction("Alice sends Bob a message", &context),
            "Alice sends Bob a message"
        );
    }

    #[test]
    fn retry_mentions_failure_and_code() {
        let context = AttemptContext::first(3)
            .next(AttemptFailure::Render {
                markup: "@startuml\nA ->\n@enduml".into(),
                reason: "Syntax Error?".into(),
            })
            .unwrap();
        let message = compose_user_instruction("Explain how Bitcoin works", &context);
        assert!(message.starts_with("Explain how Bitcoin works\n\n"));
        assert!(message.contains("Syntax Error?"));
        assert!(message.contains("@startuml\nA ->\n@enduml"));
    }

    #[test]
    fn retry_after_missing_markup() {
        let context = AttemptContext::first(3).next(AttemptFailure::NoMarkup).unwrap();
        let message = compose_user_instruction("Draw a state machine", &context);
        assert!(message.contains("no PlantUML block"));
        assert!(!message.contains("Previous PlantUML code"));
    }
}
