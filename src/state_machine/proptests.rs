//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::*;
use crate::emergency::{self, COMPOUND_CHEST_PAIN, CRITICAL_TERMS};
use crate::prediction::{rank, Prediction, FEVER_RULE};
use crate::runtime::testing::{engine_with, test_engine, FixedClassifier};
use crate::session::{Phase, Session};
use crate::vocabulary::{Vocabulary, SYMPTOMS};
use chrono::Utc;
use proptest::prelude::*;
use std::sync::Arc;

// ============================================================================
// Test Helpers
// ============================================================================

/// How a user would type a token
fn spoken(token: &str) -> String {
    token.replace('_', " ")
}

fn apply(session: &Session, result: TransitionResult) -> Session {
    if result.effects.contains(&Effect::PersistSession)
        || result.effects.contains(&Effect::ClearSession)
    {
        result.new_session
    } else {
        session.clone()
    }
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_phase() -> impl Strategy<Value = Phase> {
    prop_oneof![
        Just(Phase::Symptom),
        Just(Phase::Duration),
        Just(Phase::Severity),
        Just(Phase::AskRecommendations),
        Just(Phase::MoreSymptoms),
    ]
}

fn arb_symptoms() -> impl Strategy<Value = Vec<&'static str>> {
    proptest::sample::subsequence(SYMPTOMS, 0..=SYMPTOMS.len())
}

fn arb_session() -> impl Strategy<Value = Session> {
    (arb_phase(), arb_symptoms(), "[a-z0-9 ]{0,10}").prop_map(|(phase, symptoms, answer)| {
        let mut session = Session::new(Utc::now());
        session.phase = phase;
        session.symptoms = symptoms.into_iter().map(str::to_string).collect();
        session.duration = Some(answer);
        session.predictions = vec![Prediction::new("Migraine", 0.5)];
        session
    })
}

fn arb_utterance() -> impl Strategy<Value = String> {
    let scripted = proptest::sample::select(vec![
        "",
        "hi",
        "list",
        "exit",
        "thanks a lot",
        "yes",
        "no",
        "maybe",
        "2 days",
        "7",
        "nothing",
        "chest pain and dizziness",
    ]);
    prop_oneof![
        scripted.prop_map(String::from),
        arb_symptoms().prop_map(|s| s.iter().map(|t| spoken(t)).collect::<Vec<_>>().join(" and ")),
        "[a-z ]{0,20}",
    ]
}

fn arb_proba() -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(
        prop_oneof![Just(0.0), Just(0.25), Just(0.5), 0.0f64..1.0],
        1..12,
    )
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A critical term at intake is always an emergency that halts the turn
    #[test]
    fn prop_critical_term_halts_intake(
        symptoms in arb_symptoms(),
        critical in proptest::sample::select(CRITICAL_TERMS),
        at in any::<prop::sample::Index>(),
    ) {
        let mut words: Vec<String> = symptoms.iter().map(|t| spoken(t)).collect();
        words.insert(at.index(words.len() + 1), spoken(critical));
        let text = words.join(" and ");

        let engine = test_engine();
        let session = Session::new(Utc::now());
        let result = transition(&session, &TurnContext::new(&engine, Utc::now()), Event::from_input(&text)).unwrap();

        prop_assert_eq!(&result.new_session, &session);
        prop_assert!(!result.effects.contains(&Effect::PersistSession));
        prop_assert!(
            result.effects.iter().any(|e| matches!(e, Effect::FlagEmergency { .. })),
            "no emergency for {:?}", text
        );
    }

    /// Chest pain with breathlessness or dizziness is flagged when no direct term is present
    #[test]
    fn prop_compound_chest_pain(
        symptoms in arb_symptoms(),
        companion in prop_oneof![Just("shortness_of_breath"), Just("dizziness")],
    ) {
        let mut tokens: Vec<&str> = symptoms;
        tokens.push("chest_pain");
        tokens.push(companion);

        let hit = emergency::check(&tokens);
        prop_assert_eq!(hit.map(|e| e.term), Some(COMPOUND_CHEST_PAIN));
    }

    /// Fever without leg swelling always yields the canned triple and skips the classifier
    #[test]
    fn prop_fever_rule_is_exact(symptoms in arb_symptoms()) {
        let mut symptoms: Vec<&str> = symptoms.into_iter().filter(|s| *s != "leg_swelling").collect();
        if !symptoms.contains(&"fever") {
            symptoms.push("fever");
        }

        let classifier = Arc::new(FixedClassifier::new(20, vec![0.1; 10]));
        let engine = engine_with(classifier.clone());
        let predictions = engine.predict(&symptoms).unwrap();

        let expected: Vec<Prediction> = FEVER_RULE
            .iter()
            .map(|(c, p)| Prediction::new(*c, *p))
            .collect();
        prop_assert_eq!(predictions, expected);
        prop_assert_eq!(classifier.calls(), 0);
    }

    /// Feature i is set exactly when vocabulary token i is present
    #[test]
    fn prop_vectorize_matches_membership(symptoms in arb_symptoms()) {
        let vocab = Vocabulary::builtin();
        let features = vocab.vectorize(&symptoms);

        prop_assert_eq!(features.len(), vocab.len());
        for (i, token) in vocab.tokens().iter().enumerate() {
            prop_assert_eq!(features[i] == 1, symptoms.contains(token));
        }
    }

    /// Ranking is non-increasing, bounded by k, and breaks ties by class index
    #[test]
    fn prop_rank_is_ordered(proba in arb_proba(), k in 1usize..5) {
        let ranked = rank(&proba, k).unwrap();

        prop_assert_eq!(ranked.len(), k.min(proba.len()));
        for pair in ranked.windows(2) {
            let ((i, a), (j, b)) = (pair[0], pair[1]);
            prop_assert!(a >= b);
            if a.total_cmp(&b).is_eq() {
                prop_assert!(i < j);
            }
        }
        let floor = ranked.last().map_or(f64::NEG_INFINITY, |(_, p)| *p);
        let beaten = proba.iter().filter(|p| **p > floor).count();
        prop_assert!(beaten <= k);
    }

    /// Any conversation keeps the session consistent with its phase
    #[test]
    fn prop_sessions_stay_consistent(utterances in proptest::collection::vec(arb_utterance(), 0..20)) {
        let engine = test_engine();
        let mut session = Session::new(Utc::now());

        for text in utterances {
            let ctx = TurnContext::new(&engine, Utc::now());
            let result = transition(&session, &ctx, Event::from_input(&text)).unwrap();
            session = apply(&session, result);

            if session.phase != Phase::Symptom {
                prop_assert!(!session.symptoms.is_empty());
            }
            if matches!(session.phase, Phase::AskRecommendations | Phase::MoreSymptoms) {
                prop_assert!(session.severity.is_some());
                prop_assert!(!session.predictions.is_empty());
                prop_assert!(session.predictions.len() <= 3);
            }
        }
    }

    /// `list` and blank input never change the session
    #[test]
    fn prop_list_and_blank_are_read_only(
        session in arb_session(),
        text in prop_oneof![Just("list"), Just("  LIST "), Just(""), Just("   ")],
    ) {
        let engine = test_engine();
        let ctx = TurnContext::new(&engine, Utc::now());
        let result = transition(&session, &ctx, Event::from_input(text)).unwrap();

        prop_assert_eq!(result.new_session, session);
        prop_assert!(result.effects.is_empty());
    }
}
