pub mod decision_tree;
pub mod registry;

pub use decision_tree::{DecisionTreeModel, TreeNode};
pub use registry::ClassifierRegistry;

use crate::error::PredictionError;
use crate::models::FeatureVector;

/// An externally trained model mapping features to an `<action>_<crop>` label.
pub trait Classifier: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<String, PredictionError>;
}

impl<F> Classifier for F
where
    F: Fn(&FeatureVector) -> Result<String, PredictionError> + Send + Sync,
{
    fn predict(&self, features: &FeatureVector) -> Result<String, PredictionError> {
        self(features)
    }
}
