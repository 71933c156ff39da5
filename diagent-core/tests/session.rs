mod common;

use common::{FakeRenderer, SEQUENCE_REPLY, ScriptedProvider};
use diagent_core::{
    DiagramRequest, DiagramSession, DiagramType, EditError, GenerationOrchestrator,
    GenerationSettings,
};

fn orchestrator(provider: &ScriptedProvider, renderer: &FakeRenderer) -> GenerationOrchestrator {
    GenerationOrchestrator::new(
        Box::new(provider.clone()),
        Box::new(renderer.clone()),
        GenerationSettings::default(),
    )
}

#[tokio::test]
async fn generate_records_instruction_and_markup() {
    let provider = ScriptedProvider::new().reply(SEQUENCE_REPLY);
    let renderer = FakeRenderer::succeeding("/tmp/diagent-session");
    let orchestrator = orchestrator(&provider, &renderer);
    let mut session = DiagramSession::new();

    let request = DiagramRequest::new("Alice sends Bob a message", DiagramType::Sequence);
    let outcome = session.handle_generate(&orchestrator, &request).await.unwrap();

    assert_eq!(session.current_instruction, "Alice sends Bob a message");
    assert_eq!(session.current_markup.as_ref(), Some(&outcome.markup));
}

#[tokio::test]
async fn failed_generation_keeps_previous_markup() {
    let provider = ScriptedProvider::new()
        .reply(SEQUENCE_REPLY)
        .reply("nope")
        .reply("still nope")
        .reply("no");
    let renderer = FakeRenderer::succeeding("/tmp/diagent-session");
    let orchestrator = orchestrator(&provider, &renderer);
    let mut session = DiagramSession::new();

    let first = DiagramRequest::new("Alice sends Bob a message", DiagramType::Sequence);
    session.handle_generate(&orchestrator, &first).await.unwrap();
    let before = session.current_markup.clone();

    let second = DiagramRequest::new("Something unrenderable", DiagramType::Auto);
    assert!(session.handle_generate(&orchestrator, &second).await.is_err());
    assert_eq!(session.current_markup, before);
    assert_eq!(session.current_instruction, "Something unrenderable");
}

#[tokio::test]
async fn edit_rerenders_without_calling_the_model() {
    let provider = ScriptedProvider::new();
    let renderer = FakeRenderer::succeeding("/tmp/diagent-session");
    let orchestrator = orchestrator(&provider, &renderer);
    let mut session = DiagramSession::new();

    let edited = "@startuml\nAlice -> Bob: Hello\nBob --> Alice: Hi\n@enduml";
    let diagram = session.handle_edit(&orchestrator, edited).await.unwrap();

    assert_eq!(diagram.image_path, renderer.image_path());
    assert_eq!(provider.calls(), 0);
    assert_eq!(renderer.rendered(), vec![edited.to_string()]);
    assert_eq!(
        session.current_markup.as_ref().map(|m| m.as_str()),
        Some(edited)
    );
}

#[tokio::test]
async fn edit_without_tags_is_not_renderable() {
    let provider = ScriptedProvider::new();
    let renderer = FakeRenderer::succeeding("/tmp/diagent-session");
    let orchestrator = orchestrator(&provider, &renderer);
    let mut session = DiagramSession::new();

    let err = session
        .handle_edit(&orchestrator, "Alice -> Bob: Hello")
        .await
        .unwrap_err();
    assert!(matches!(err, EditError::NotRenderable));
    assert!(!err.cleared_output());
    assert!(renderer.rendered().is_empty());
    assert!(session.current_markup.is_none());
}

#[tokio::test]
async fn edit_render_failure_surfaces_reason() {
    let provider = ScriptedProvider::new();
    let renderer = FakeRenderer::always_failing("/tmp/diagent-session");
    let orchestrator = orchestrator(&provider, &renderer);
    let mut session = DiagramSession::new();

    let err = session
        .handle_edit(&orchestrator, "@startuml\nA -> \n@enduml")
        .await
        .unwrap_err();
    assert!(matches!(err, EditError::Render(_)));
    assert!(err.cleared_output());
    assert!(err.to_string().contains("Syntax Error?"));

    session.clear();
    assert_eq!(session, DiagramSession::default());
}
