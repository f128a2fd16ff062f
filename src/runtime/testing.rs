//! Deterministic stand-ins for testing
//!
//! These let the engine and runtime be exercised without trained artifacts.

use crate::model::{Classifier, LabelDecoder, ModelBundle, ModelError};
use crate::prediction::PredictionEngine;
use crate::vocabulary::Vocabulary;
use std::sync::{Arc, Mutex};

/// Conditions in label-encoder (alphabetical) order
pub const CONDITIONS: &[&str] = &[
    "Allergic Reaction",
    "COVID-19",
    "Common Cold",
    "Conjunctivitis",
    "Deep Vein Thrombosis",
    "Gastroenteritis",
    "Hypertension Emergency",
    "Influenza",
    "Migraine",
    "Myocardial Infarction",
];

/// Classifier that always returns the same probabilities and records its input
pub struct FixedClassifier {
    n_features: usize,
    proba: Vec<f64>,
    calls: Mutex<Vec<Vec<u8>>>,
}

impl FixedClassifier {
    pub fn new(n_features: usize, proba: Vec<f64>) -> Self {
        Self {
            n_features,
            proba,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Number of times `predict_proba` was called
    pub fn calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_features(&self) -> Option<Vec<u8>> {
        self.calls.lock().unwrap().last().cloned()
    }
}

impl Classifier for FixedClassifier {
    fn predict_proba(&self, features: &[u8]) -> Result<Vec<f64>, ModelError> {
        if features.len() != self.n_features {
            return Err(ModelError::FeatureMismatch {
                expected: self.n_features,
                got: features.len(),
            });
        }
        self.calls.lock().unwrap().push(features.to_vec());
        Ok(self.proba.clone())
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn n_classes(&self) -> usize {
        self.proba.len()
    }
}

/// Decoder with labels `Condition 0 .. Condition n-1`
pub fn labels(n: usize) -> LabelDecoder {
    LabelDecoder::new((0..n).map(|i| format!("Condition {i}")).collect()).unwrap()
}

/// Engine over the built-in vocabulary whose classifier favours Migraine,
/// then Hypertension Emergency, then Gastroenteritis.
pub fn test_engine() -> PredictionEngine {
    let proba = vec![0.02, 0.03, 0.05, 0.02, 0.03, 0.15, 0.2, 0.05, 0.4, 0.05];
    engine_with(Arc::new(FixedClassifier::new(20, proba)))
}

pub fn engine_with(classifier: Arc<FixedClassifier>) -> PredictionEngine {
    let labels =
        LabelDecoder::new(CONDITIONS.iter().map(|c| (*c).to_string()).collect()).unwrap();
    let bundle = ModelBundle::new(classifier, labels).unwrap();
    PredictionEngine::new(Vocabulary::builtin(), bundle).unwrap()
}
