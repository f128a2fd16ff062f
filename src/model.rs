//! Trained classifier abstraction
//!
//! The prediction engine only needs `predict_proba` over a binary feature
//! vector. Artifacts are loaded once at startup and shared read-only.

mod error;
mod forest;
mod labels;

pub use error::ModelError;
pub use forest::{ForestClassifier, Node, Tree};
pub use labels::LabelDecoder;

use std::path::Path;
use std::sync::Arc;

/// Probability estimates per class for a single sample
pub trait Classifier: Send + Sync {
    /// Probabilities indexed by class id
    fn predict_proba(&self, features: &[u8]) -> Result<Vec<f64>, ModelError>;

    /// Expected feature-vector length
    fn n_features(&self) -> usize;

    fn n_classes(&self) -> usize;
}

impl<T: Classifier + ?Sized> Classifier for Arc<T> {
    fn predict_proba(&self, features: &[u8]) -> Result<Vec<f64>, ModelError> {
        (**self).predict_proba(features)
    }

    fn n_features(&self) -> usize {
        (**self).n_features()
    }

    fn n_classes(&self) -> usize {
        (**self).n_classes()
    }
}

/// Logging wrapper for classifiers
pub struct LoggingClassifier {
    inner: Arc<dyn Classifier>,
}

impl LoggingClassifier {
    pub fn new(inner: Arc<dyn Classifier>) -> Self {
        Self { inner }
    }
}

impl Classifier for LoggingClassifier {
    fn predict_proba(&self, features: &[u8]) -> Result<Vec<f64>, ModelError> {
        let start = std::time::Instant::now();
        let result = self.inner.predict_proba(features);
        let duration = start.elapsed();

        match &result {
            Ok(_) => {
                tracing::debug!(
                    duration_us = %duration.as_micros(),
                    active_features = features.iter().filter(|f| **f != 0).count(),
                    "Classifier inference completed"
                );
            }
            Err(e) => {
                tracing::error!(error = %e, "Classifier inference failed");
            }
        }

        result
    }

    fn n_features(&self) -> usize {
        self.inner.n_features()
    }

    fn n_classes(&self) -> usize {
        self.inner.n_classes()
    }
}

/// A classifier together with the decoder for its class ids
#[derive(Clone)]
pub struct ModelBundle {
    pub classifier: Arc<dyn Classifier>,
    pub labels: LabelDecoder,
}

impl std::fmt::Debug for ModelBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelBundle")
            .field("n_features", &self.classifier.n_features())
            .field("n_classes", &self.classifier.n_classes())
            .field("labels", &self.labels)
            .finish()
    }
}

impl ModelBundle {
    /// Pair a classifier with its labels, checking that the class counts agree.
    pub fn new(classifier: Arc<dyn Classifier>, labels: LabelDecoder) -> Result<Self, ModelError> {
        if classifier.n_classes() != labels.len() {
            return Err(ModelError::invalid(format!(
                "classifier has {} classes but {} labels were provided",
                classifier.n_classes(),
                labels.len()
            )));
        }
        Ok(Self { classifier, labels })
    }

    /// Load the forest and label artifacts from disk.
    ///
    /// Any missing or malformed artifact is an error; callers treat it as fatal.
    pub fn load(model_path: &Path, labels_path: &Path) -> Result<Self, ModelError> {
        let forest_json = read_artifact(model_path)?;
        let forest =
            ForestClassifier::from_json(&forest_json).map_err(|source| ModelError::Parse {
                path: model_path.to_path_buf(),
                source,
            })?;
        forest.validate()?;

        let labels_json = read_artifact(labels_path)?;
        let labels =
            LabelDecoder::from_json(&labels_json).map_err(|source| ModelError::Parse {
                path: labels_path.to_path_buf(),
                source,
            })?;
        labels.validate()?;

        tracing::info!(
            model = %model_path.display(),
            trees = forest.trees.len(),
            features = forest.n_features,
            classes = forest.n_classes,
            "Loaded classifier"
        );

        let classifier: Arc<dyn Classifier> = Arc::new(LoggingClassifier::new(Arc::new(forest)));
        Self::new(classifier, labels)
    }

    /// Check that the model was trained over a vocabulary of this size.
    pub fn ensure_feature_count(&self, vocabulary_len: usize) -> Result<(), ModelError> {
        let expected = self.classifier.n_features();
        if expected == vocabulary_len {
            Ok(())
        } else {
            Err(ModelError::FeatureMismatch {
                expected,
                got: vocabulary_len,
            })
        }
    }
}

fn read_artifact(path: &Path) -> Result<String, ModelError> {
    if !path.exists() {
        return Err(ModelError::NotFound(path.to_path_buf()));
    }
    std::fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })
}
