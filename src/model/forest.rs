//! Random-forest classifier over binary symptom vectors
//!
//! Trees are stored as flat node arrays. A split sends the sample left when
//! `x[feature] <= threshold`. Class probabilities are the mean over trees of
//! each reached leaf's normalized class weights.

use super::{Classifier, ModelError};
use serde::{Deserialize, Serialize};

/// One node of a decision tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: Vec<f64>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    /// Normalized class distribution of the leaf `sample` lands in.
    ///
    /// Assumes the tree passed `validate`, so every walk terminates at a leaf.
    fn leaf_distribution(&self, sample: &[u8]) -> Vec<f64> {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if f64::from(sample[*feature]) <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                Node::Leaf { value } => {
                    let total: f64 = value.iter().sum();
                    if total > 0.0 {
                        return value.iter().map(|v| v / total).collect();
                    }
                    return vec![0.0; value.len()];
                }
            }
        }
    }

    fn validate(&self, n_features: usize, n_classes: usize) -> Result<(), ModelError> {
        if self.nodes.is_empty() {
            return Err(ModelError::invalid("tree has no nodes"));
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(ModelError::invalid(format!(
                            "node {idx} splits on feature {feature}, model has {n_features}"
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(ModelError::invalid(format!(
                            "node {idx} has a non-finite threshold"
                        )));
                    }
                    // Children must point forward so every walk ends
                    for child in [left, right] {
                        if *child <= idx || *child >= self.nodes.len() {
                            return Err(ModelError::invalid(format!(
                                "node {idx} has out-of-order child {child}"
                            )));
                        }
                    }
                }
                Node::Leaf { value } => {
                    if value.len() != n_classes {
                        return Err(ModelError::invalid(format!(
                            "leaf {idx} has {} weights, model has {n_classes} classes",
                            value.len()
                        )));
                    }
                    if value.iter().any(|v| !v.is_finite() || *v < 0.0) {
                        return Err(ModelError::invalid(format!(
                            "leaf {idx} has a negative or non-finite weight"
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Ensemble of decision trees, deserialized from a JSON artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestClassifier {
    pub n_features: usize,
    pub n_classes: usize,
    pub trees: Vec<Tree>,
}

impl ForestClassifier {
    /// Parse a forest from JSON text. Call `validate` before use.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Structural checks run once at load time.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.trees.is_empty() {
            return Err(ModelError::invalid("forest has no trees"));
        }
        if self.n_classes == 0 {
            return Err(ModelError::invalid("forest has no classes"));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features, self.n_classes)
                .map_err(|e| ModelError::invalid(format!("tree {i}: {e}")))?;
        }
        Ok(())
    }
}

impl Classifier for ForestClassifier {
    fn predict_proba(&self, features: &[u8]) -> Result<Vec<f64>, ModelError> {
        if features.len() != self.n_features {
            return Err(ModelError::FeatureMismatch {
                expected: self.n_features,
                got: features.len(),
            });
        }

        let mut proba = vec![0.0; self.n_classes];
        for tree in &self.trees {
            for (acc, p) in proba.iter_mut().zip(tree.leaf_distribution(features)) {
                *acc += p;
            }
        }

        #[allow(clippy::cast_precision_loss)] // tree counts are tiny
        let n_trees = self.trees.len() as f64;
        Ok(proba.into_iter().map(|p| p / n_trees).collect())
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn n_classes(&self) -> usize {
        self.n_classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stump(feature: usize, when_absent: Vec<f64>, when_present: Vec<f64>) -> Tree {
        Tree {
            nodes: vec![
                Node::Split {
                    feature,
                    threshold: 0.5,
                    left: 1,
                    right: 2,
                },
                Node::Leaf {
                    value: when_absent,
                },
                Node::Leaf {
                    value: when_present,
                },
            ],
        }
    }

    fn two_stump_forest() -> ForestClassifier {
        ForestClassifier {
            n_features: 2,
            n_classes: 2,
            trees: vec![
                stump(0, vec![1.0, 1.0], vec![4.0, 0.0]),
                stump(1, vec![3.0, 1.0], vec![0.0, 2.0]),
            ],
        }
    }

    #[test]
    fn test_predict_proba_averages_trees() {
        let forest = two_stump_forest();
        forest.validate().unwrap();

        let p = forest.predict_proba(&[1, 0]).unwrap();
        // tree 0: [1, 0], tree 1: [0.75, 0.25]
        assert!((p[0] - 0.875).abs() < 1e-9);
        assert!((p[1] - 0.125).abs() < 1e-9);

        let p = forest.predict_proba(&[0, 1]).unwrap();
        assert!((p[0] - 0.25).abs() < 1e-9);
        assert!((p[1] - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_feature_length_checked() {
        let forest = two_stump_forest();
        assert!(matches!(
            forest.predict_proba(&[1]),
            Err(ModelError::FeatureMismatch {
                expected: 2,
                got: 1
            })
        ));
    }

    #[test]
    fn test_parse_json_artifact() {
        let json = r#"{
            "n_features": 1,
            "n_classes": 2,
            "trees": [{"nodes": [
                {"feature": 0, "threshold": 0.5, "left": 1, "right": 2},
                {"value": [2.0, 0.0]},
                {"value": [0.0, 2.0]}
            ]}]
        }"#;
        let forest = ForestClassifier::from_json(json).unwrap();
        forest.validate().unwrap();
        assert_eq!(forest.predict_proba(&[1]).unwrap(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_validate_rejects_backward_child() {
        let forest = ForestClassifier {
            n_features: 1,
            n_classes: 1,
            trees: vec![Tree {
                nodes: vec![
                    Node::Split {
                        feature: 0,
                        threshold: 0.5,
                        left: 0,
                        right: 1,
                    },
                    Node::Leaf { value: vec![1.0] },
                ],
            }],
        };
        assert!(forest.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_leaf_width_and_feature() {
        let mut forest = two_stump_forest();
        forest.n_classes = 3;
        assert!(forest.validate().is_err());

        let mut forest = two_stump_forest();
        forest.n_features = 1;
        assert!(forest.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_forest() {
        let forest = ForestClassifier {
            n_features: 1,
            n_classes: 1,
            trees: vec![],
        };
        assert!(forest.validate().is_err());
    }
}
