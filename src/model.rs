//! Gradient-boosted regression model for trip demand.
//!
//! The artifact is a JSON document: an ordered list of regression trees plus
//! a base score. Prediction is the base score plus the sum of every tree's
//! leaf value for the input. Shrinkage is already baked into the leaf values
//! by the training pipeline, so inference is a plain sum.

use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, AdvisorResult};

/// One node of a regression tree. Split semantics: `feature <= threshold`
/// goes left, otherwise right.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
    Leaf {
        value: f64,
    },
}

impl TreeNode {
    fn evaluate(&self, features: &[f64]) -> f64 {
        match self {
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if features[*feature] <= *threshold {
                    left.evaluate(features)
                } else {
                    right.evaluate(features)
                }
            }
            TreeNode::Leaf { value } => *value,
        }
    }

    /// First split feature index at or beyond `num_features`, if any.
    fn out_of_range_feature(&self, num_features: usize) -> Option<usize> {
        match self {
            TreeNode::Split {
                feature,
                left,
                right,
                ..
            } => {
                if *feature >= num_features {
                    return Some(*feature);
                }
                left.out_of_range_feature(num_features)
                    .or_else(|| right.out_of_range_feature(num_features))
            }
            TreeNode::Leaf { .. } => None,
        }
    }
}

/// A trained demand model: tree ensemble, base score, and the feature count
/// the trees were grown against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandModel {
    num_features: usize,
    #[serde(default)]
    base_score: f64,
    trees: Vec<TreeNode>,
}

impl DemandModel {
    /// Build a model from parts, validating the trees against the declared
    /// feature count.
    pub fn new(num_features: usize, base_score: f64, trees: Vec<TreeNode>) -> AdvisorResult<Self> {
        let model = Self {
            num_features,
            base_score,
            trees,
        };
        model.validate()?;
        Ok(model)
    }

    /// Check that every split references a feature the model declares.
    /// Run once after deserialization so traversal can index unchecked.
    pub fn validate(&self) -> AdvisorResult<()> {
        for (tree_index, tree) in self.trees.iter().enumerate() {
            if let Some(feature) = tree.out_of_range_feature(self.num_features) {
                return Err(AdvisorError::InvalidTreeFeature {
                    tree: tree_index,
                    feature,
                    num_features: self.num_features,
                });
            }
        }
        Ok(())
    }

    /// Predict the trip count for one feature vector. The vector must have
    /// exactly the trained feature count; any mismatch is fatal for the
    /// invocation.
    pub fn predict(&self, features: &[f64]) -> AdvisorResult<f64> {
        if features.len() != self.num_features {
            return Err(AdvisorError::FeatureLengthMismatch {
                got: features.len(),
                expected: self.num_features,
            });
        }

        let mut prediction = self.base_score;
        for tree in &self.trees {
            prediction += tree.evaluate(features);
        }
        Ok(prediction)
    }

    pub fn num_features(&self) -> usize {
        self.num_features
    }

    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }
}
