//! Class id to condition label decoding

use super::ModelError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered condition labels; position is the classifier's class id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelDecoder {
    classes: Vec<String>,
}

impl LabelDecoder {
    pub fn new(classes: Vec<String>) -> Result<Self, ModelError> {
        let decoder = Self { classes };
        decoder.validate()?;
        Ok(decoder)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Labels must be non-empty and distinct so decoding is a bijection.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.classes.is_empty() {
            return Err(ModelError::invalid("label decoder has no classes"));
        }
        let mut seen = HashSet::new();
        for label in &self.classes {
            if !seen.insert(label.as_str()) {
                return Err(ModelError::invalid(format!("duplicate class label {label:?}")));
            }
        }
        Ok(())
    }

    pub fn decode(&self, class_id: usize) -> Result<&str, ModelError> {
        self.classes
            .get(class_id)
            .map(String::as_str)
            .ok_or(ModelError::UnknownClass(class_id))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
