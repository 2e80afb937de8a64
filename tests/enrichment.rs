use std::{sync::Arc, time::Duration};

use validatehub_lib::{
    context::{SuggestionError, SuggestionKind},
    llm::MockGenerator,
    models::{NewHypothesis, NewInterview, NewLearningCard},
    storage::{KvAdapter, MemoryBackend},
    AppContext, EnrichOutcome,
};

async fn workbook(mock: MockGenerator) -> (Arc<MockGenerator>, AppContext) {
    let mock = Arc::new(mock);
    let ctx = AppContext::load(KvAdapter::new(Arc::new(MemoryBackend::new())), mock.clone()).await;
    (mock, ctx)
}

#[tokio::test]
async fn successful_enrichment_sets_only_the_ai_field() {
    let (_mock, ctx) = workbook(MockGenerator::new("Add a price point.")).await;
    let added = ctx.add_hypothesis(NewHypothesis {
        description: "Users want reminders".into(),
    });

    assert_eq!(ctx.critique_hypothesis(&added.id).await, EnrichOutcome::Applied);

    let mut expected = added.clone();
    expected.ai_critique = Some("Add a price point.".into());
    assert_eq!(ctx.get_hypothesis_by_id(&added.id), Some(expected));
}

#[tokio::test]
async fn missing_credential_never_calls_the_collaborator() {
    let (mock, ctx) = workbook(MockGenerator::without_key()).await;
    let interview = ctx.add_interview(NewInterview::default());
    let card = ctx.add_learning_card(NewLearningCard::default());

    assert_eq!(
        ctx.generate_interview_summary(&interview.id).await,
        EnrichOutcome::Unavailable
    );
    assert_eq!(
        ctx.generate_learning_reflection(&card.id).await,
        EnrichOutcome::Unavailable
    );
    assert_eq!(
        ctx.generate_vp_messaging("default-vp").await,
        EnrichOutcome::Unavailable
    );
    assert_eq!(mock.call_count(), 0);
    assert_eq!(ctx.get_interview_by_id(&interview.id), Some(interview));
}

#[tokio::test]
async fn failure_leaves_the_record_untouched() {
    let (_mock, ctx) = workbook(MockGenerator::failing("503 Service Unavailable")).await;
    let interview = ctx.add_interview(NewInterview {
        key_takeaways: "Needs exports".into(),
        ..Default::default()
    });

    let outcome = ctx.generate_interview_summary(&interview.id).await;
    assert_eq!(
        outcome.message().as_deref(),
        Some("Request failed: 503 Service Unavailable")
    );
    assert_eq!(ctx.get_interview_by_id(&interview.id), Some(interview));
}

#[tokio::test]
async fn record_deleted_mid_flight_is_not_recreated() {
    let mock = MockGenerator::new("Too late").with_delay(Duration::from_millis(20));
    let (mock, ctx) = workbook(mock).await;
    let added = ctx.add_hypothesis(NewHypothesis {
        description: "X".into(),
    });

    let (outcome, deleted) = tokio::join!(ctx.critique_hypothesis(&added.id), async {
        ctx.delete_hypothesis(&added.id)
    });

    assert!(deleted);
    assert_eq!(outcome, EnrichOutcome::RecordMissing);
    assert_eq!(mock.call_count(), 1);
    assert!(ctx.hypotheses().is_empty());
}

#[tokio::test]
async fn suggestions_parse_fenced_json() {
    let reply = "```json\n[\"Manual data entry\", \"Missed deadlines\"]\n```";
    let (mock, ctx) = workbook(MockGenerator::new(reply)).await;

    let suggestions = ctx
        .fetch_problem_suggestions("file quarterly taxes", SuggestionKind::Pains)
        .await
        .unwrap();
    assert_eq!(suggestions, vec!["Manual data entry", "Missed deadlines"]);
    assert!(mock.prompts()[0].contains("list 5 potential customer pains"));
}

#[tokio::test]
async fn suggestions_need_a_job_to_be_done() {
    let (mock, ctx) = workbook(MockGenerator::default()).await;
    let err = ctx
        .fetch_problem_suggestions("   ", SuggestionKind::Gains)
        .await
        .unwrap_err();

    assert!(matches!(err, SuggestionError::MissingJob));
    assert_eq!(mock.call_count(), 0);
}
