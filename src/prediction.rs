//! Prediction engine
//!
//! The fever rule is a deterministic override and is checked before the
//! classifier is consulted. Otherwise the symptoms are vectorized over the
//! vocabulary, scored by the classifier and reduced to the top three classes.

use crate::model::{ModelBundle, ModelError};
use crate::vocabulary::Vocabulary;
use serde::{Deserialize, Serialize};

/// Maximum number of predictions returned
pub const TOP_K: usize = 3;

/// Canned result of the fever rule, in reply order
pub const FEVER_RULE: [(&str, f64); 3] = [
    ("Common Cold", 0.6),
    ("Influenza", 0.3),
    ("COVID-19", 0.1),
];

/// A condition label with its estimated probability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub condition: String,
    pub probability: f64,
}

impl Prediction {
    pub fn new(condition: impl Into<String>, probability: f64) -> Self {
        Self {
            condition: condition.into(),
            probability,
        }
    }

    /// Probability as a percentage with one decimal, e.g. `60.0%`
    pub fn percent(&self) -> String {
        format!("{:.1}%", self.probability * 100.0)
    }
}

/// Whether the fever override applies to these symptoms
pub fn fever_rule_applies<S: AsRef<str>>(symptoms: &[S]) -> bool {
    let has = |needle: &str| symptoms.iter().any(|s| s.as_ref() == needle);
    has("fever") && !has("leg_swelling")
}

/// Indices of the `k` most probable classes, highest first.
///
/// Equal probabilities keep ascending class-index order. NaN is rejected.
pub fn rank(proba: &[f64], k: usize) -> Result<Vec<(usize, f64)>, ModelError> {
    if let Some(idx) = proba.iter().position(|p| p.is_nan()) {
        return Err(ModelError::invalid(format!(
            "classifier returned NaN for class {idx}"
        )));
    }
    let mut ranked: Vec<(usize, f64)> = proba.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.truncate(k);
    Ok(ranked)
}

/// Classifier plus the rules that run ahead of it
#[derive(Debug, Clone)]
pub struct PredictionEngine {
    vocabulary: Vocabulary,
    model: ModelBundle,
}

impl PredictionEngine {
    /// Fails when the model was not trained over this vocabulary.
    pub fn new(vocabulary: Vocabulary, model: ModelBundle) -> Result<Self, ModelError> {
        model.ensure_feature_count(vocabulary.len())?;
        Ok(Self { vocabulary, model })
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Up to `TOP_K` predictions in non-increasing probability order.
    pub fn predict<S: AsRef<str>>(&self, symptoms: &[S]) -> Result<Vec<Prediction>, ModelError> {
        if fever_rule_applies(symptoms) {
            tracing::debug!("Fever rule applied, classifier skipped");
            return Ok(FEVER_RULE
                .iter()
                .map(|(condition, p)| Prediction::new(*condition, *p))
                .collect());
        }

        let features = self.vocabulary.vectorize(symptoms);
        let proba = self.model.classifier.predict_proba(&features)?;
        if proba.len() != self.model.labels.len() {
            return Err(ModelError::invalid(format!(
                "classifier returned {} probabilities for {} classes",
                proba.len(),
                self.model.labels.len()
            )));
        }

        rank(&proba, TOP_K)?
            .into_iter()
            .map(|(class_id, p)| {
                self.model
                    .labels
                    .decode(class_id)
                    .map(|label| Prediction::new(label, p))
            })
            .collect()
    }
}
