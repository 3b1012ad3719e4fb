//! End-to-end conversation scenarios over in-memory adapters.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;

use tripcraft::adapters::{
    InMemoryUserStateRepository, MockRecommendationService, RecordingAnalytics, RecordingNotifier,
};
use tripcraft::application::{AnswerOutcome, ConversationEngine};
use tripcraft::domain::foundation::{DomainError, UserId};
use tripcraft::domain::travel::{required_questions, TravelCategory};
use tripcraft::ports::{events, Analytics, Notifier, UserStateRepository};

struct Harness {
    engine: Arc<ConversationEngine>,
    repository: Arc<InMemoryUserStateRepository>,
    analytics: Arc<RecordingAnalytics>,
}

fn harness(service: MockRecommendationService) -> Harness {
    let repository = Arc::new(InMemoryUserStateRepository::new());
    let analytics = Arc::new(RecordingAnalytics::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let engine = Arc::new(ConversationEngine::new(
        Arc::new(service),
        Arc::clone(&repository) as Arc<dyn UserStateRepository>,
        Arc::clone(&analytics) as Arc<dyn Analytics>,
        notifier as Arc<dyn Notifier>,
    ));
    Harness {
        engine,
        repository,
        analytics,
    }
}

const USER: UserId = UserId::new(1000);

#[tokio::test]
async fn family_conversation_from_category_to_recommendation() {
    let h = harness(
        MockRecommendationService::new().with_recommendation("Crete", "Shallow warm beaches"),
    );

    let prompt = h
        .engine
        .select_category(USER, TravelCategory::Family)
        .await
        .unwrap();
    assert_eq!(prompt.question_key, "family_size");

    h.engine
        .submit_answer(USER, "family_size", "2+1", "2 adults + 1 child")
        .await
        .unwrap();

    // After two answers only "priority" is missing, in policy order.
    match h
        .engine
        .submit_answer(USER, "travel_time", "summer", "Summer")
        .await
        .unwrap()
    {
        AnswerOutcome::NextQuestion(prompt) => {
            assert_eq!(prompt.question_key, "priority");
            assert_eq!((prompt.answered, prompt.total), (2, 3));
        }
        other => panic!("expected the priority question, got {other:?}"),
    }

    let stored = h.repository.load(USER).await.unwrap().unwrap();
    assert_eq!(
        stored.missing_questions(&required_questions(TravelCategory::Family)),
        vec!["priority"]
    );

    // The last required answer triggers generation automatically.
    match h
        .engine
        .submit_answer(USER, "priority", "beach", "Beach")
        .await
        .unwrap()
    {
        AnswerOutcome::RecommendationReady(rec) => {
            assert_eq!(rec.destination, "Crete");
            assert_eq!(rec.category, TravelCategory::Family);
            assert!(rec.format_message().contains("Crete"));
        }
        other => panic!("expected a recommendation, got {other:?}"),
    }

    // Conversation finished: stored request is gone.
    assert!(h.repository.load(USER).await.unwrap().is_none());
    assert_eq!(
        h.analytics.event_names().first().map(String::as_str),
        Some(events::CATEGORY_SELECTED)
    );
    assert!(h.analytics.has_event(events::RECOMMENDATION_DELIVERED));
}

#[tokio::test]
async fn failed_generation_keeps_the_request_for_a_retry() {
    let h = harness(
        MockRecommendationService::new()
            .with_error(DomainError::recommendation_unavailable("both models down"))
            .with_recommendation("Madeira", "Levada walks"),
    );

    h.engine
        .select_category(USER, TravelCategory::Active)
        .await
        .unwrap();
    h.engine
        .submit_answer(USER, "activity_type", "hiking", "Hiking")
        .await
        .unwrap();

    let err = h
        .engine
        .submit_answer(USER, "skill_level", "intermediate", "Intermediate")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::RecommendationUnavailable { .. }));

    // Request unchanged, same answers, same id as before the failure.
    let stored = h.repository.load(USER).await.unwrap().unwrap();
    assert_eq!(stored.answers.len(), 2);

    // Retrying re-enters generation with no new answers.
    match h.engine.retry_generation(USER).await.unwrap() {
        AnswerOutcome::RecommendationReady(rec) => {
            assert_eq!(rec.destination, "Madeira");
            assert_eq!(rec.request.id, stored.id);
        }
        other => panic!("expected a recommendation, got {other:?}"),
    }
    assert!(h.repository.load(USER).await.unwrap().is_none());
}

#[tokio::test]
async fn rapid_submissions_for_one_user_lose_no_answers() {
    let h = harness(MockRecommendationService::new());
    h.engine
        .select_category(USER, TravelCategory::Pets)
        .await
        .unwrap();

    let first = {
        let engine = Arc::clone(&h.engine);
        tokio::spawn(async move {
            engine
                .submit_answer(USER, "pet_type", "dog", "Dog")
                .await
                .unwrap()
        })
    };
    let second = {
        let engine = Arc::clone(&h.engine);
        tokio::spawn(async move {
            engine
                .submit_answer(USER, "transport", "car", "By car")
                .await
                .unwrap()
        })
    };

    for result in join_all([first, second]).await {
        result.unwrap();
    }

    // Both writes survived the race: no lost update.
    let stored = h.repository.load(USER).await.unwrap().unwrap();
    assert!(stored.answer("pet_type").is_some());
    assert!(stored.answer("transport").is_some());
}

#[tokio::test]
async fn abandon_wins_over_a_late_recommendation_result() {
    let h = harness(
        MockRecommendationService::new()
            .with_delay(Duration::from_millis(100))
            .with_recommendation("Crete", "Too late"),
    );

    h.engine
        .select_category(USER, TravelCategory::Photo)
        .await
        .unwrap();
    h.engine
        .submit_answer(USER, "photo_type", "landscape", "Landscapes")
        .await
        .unwrap();

    // The final answer starts a slow generation call.
    let in_flight = {
        let engine = Arc::clone(&h.engine);
        tokio::spawn(async move {
            engine
                .submit_answer(USER, "difficulty", "easy", "Easy access")
                .await
        })
    };

    // Abandon while the call is still sleeping.
    tokio::time::sleep(Duration::from_millis(20)).await;
    h.engine.abandon(USER).await.unwrap();

    // The late success must not resurrect state or deliver anything.
    match in_flight.await.unwrap().unwrap() {
        AnswerOutcome::ConversationReset => {}
        other => panic!("expected the reset outcome, got {other:?}"),
    }
    assert!(h.repository.load(USER).await.unwrap().is_none());
    assert!(h.analytics.has_event(events::CONVERSATION_ABANDONED));
    assert!(!h.analytics.has_event(events::RECOMMENDATION_DELIVERED));
}

#[tokio::test]
async fn a_new_conversation_also_fences_out_the_old_result() {
    let h = harness(
        MockRecommendationService::new()
            .with_delay(Duration::from_millis(100))
            .with_recommendation("Old trip", "Stale")
            .with_recommendation("New trip", "Fresh"),
    );

    h.engine
        .select_category(USER, TravelCategory::Photo)
        .await
        .unwrap();
    h.engine
        .submit_answer(USER, "photo_type", "street", "Street")
        .await
        .unwrap();

    let in_flight = {
        let engine = Arc::clone(&h.engine);
        tokio::spawn(async move {
            engine
                .submit_answer(USER, "difficulty", "easy", "Easy access")
                .await
        })
    };

    // Start over while the old generation is still running.
    tokio::time::sleep(Duration::from_millis(20)).await;
    h.engine
        .select_category(USER, TravelCategory::Budget)
        .await
        .unwrap();

    match in_flight.await.unwrap().unwrap() {
        AnswerOutcome::ConversationReset => {}
        other => panic!("expected the reset outcome, got {other:?}"),
    }

    // The replacement conversation is intact.
    let stored = h.repository.load(USER).await.unwrap().unwrap();
    assert_eq!(stored.category, TravelCategory::Budget);
}

#[tokio::test]
async fn every_category_walks_to_completion_in_policy_order() {
    for category in TravelCategory::ALL {
        let h = harness(MockRecommendationService::new());
        let user = UserId::new(2000 + category.as_str().len() as i64);

        let mut prompt = h.engine.select_category(user, category).await.unwrap();
        let required = required_questions(category);
        assert_eq!(prompt.question_key, required[0]);

        let mut outcome = None;
        for (index, key) in required.iter().enumerate() {
            assert_eq!(prompt.question_key, *key);
            match h.engine.submit_answer(user, key, "value", "Value").await.unwrap() {
                AnswerOutcome::NextQuestion(next) => {
                    assert_eq!(next.answered, index + 1);
                    prompt = next;
                }
                done => {
                    assert_eq!(index, required.len() - 1, "finished early for {category}");
                    outcome = Some(done);
                }
            }
        }

        assert!(
            matches!(outcome, Some(AnswerOutcome::RecommendationReady(_))),
            "no recommendation delivered for {category}"
        );
    }
}
