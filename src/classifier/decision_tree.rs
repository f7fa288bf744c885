use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::classifier::Classifier;
use crate::error::{AdvisorError, PredictionError, Result};
use crate::models::{FeatureName, FeatureVector};

/// A node of a serialized binary decision tree.
///
/// Split nodes send `value <= threshold` to `left`, everything else to `right`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Leaf {
        label: String,
    },
    Split {
        feature: FeatureName,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 1,
            TreeNode::Split { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn labels<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            TreeNode::Leaf { label } => out.push(label),
            TreeNode::Split { left, right, .. } => {
                left.labels(out);
                right.labels(out);
            }
        }
    }
}

/// Decision tree classifier loaded from a `<crop>_model.json` artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTreeModel {
    pub crop: String,
    pub root: TreeNode,
}

impl DecisionTreeModel {
    pub fn new(crop: impl Into<String>, root: TreeNode) -> Self {
        Self {
            crop: crop.into(),
            root,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let model = Self::from_json(&contents).map_err(|e| AdvisorError::InvalidModel {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        if model.labels().iter().any(|l| l.is_empty()) {
            return Err(AdvisorError::InvalidModel {
                path: path.to_path_buf(),
                message: "tree contains an empty label".to_string(),
            });
        }

        Ok(model)
    }

    /// Every label the tree can emit, left to right.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels = Vec::new();
        self.root.labels(&mut labels);
        labels
    }
}

impl Classifier for DecisionTreeModel {
    fn predict(&self, features: &FeatureVector) -> std::result::Result<String, PredictionError> {
        for name in FeatureName::ALL {
            let value = features.get(name);
            if !value.is_finite() {
                return Err(PredictionError::NonFiniteFeature {
                    feature: name.as_str(),
                    value,
                });
            }
        }

        let mut node = &self.root;
        loop {
            match node {
                TreeNode::Leaf { label } if label.is_empty() => {
                    return Err(PredictionError::EmptyLabel)
                }
                TreeNode::Leaf { label } => return Ok(label.clone()),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if features.get(*feature) <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }
}
