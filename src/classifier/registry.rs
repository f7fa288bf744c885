use std::collections::HashMap;
use std::fmt;

use crate::classifier::Classifier;

/// Crop name to trained classifier. Built once at startup, read-only afterwards.
#[derive(Default)]
pub struct ClassifierRegistry {
    models: HashMap<String, Box<dyn Classifier>>,
}

impl ClassifierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model<C>(mut self, crop: impl Into<String>, classifier: C) -> Self
    where
        C: Classifier + 'static,
    {
        self.insert(crop, classifier);
        self
    }

    pub fn insert<C>(&mut self, crop: impl Into<String>, classifier: C)
    where
        C: Classifier + 'static,
    {
        self.models.insert(crop.into(), Box::new(classifier));
    }

    pub fn get(&self, crop: &str) -> Option<&dyn Classifier> {
        match self.models.get(crop) {
            Some(model) => Some(&**model),
            None => None,
        }
    }

    pub fn contains(&self, crop: &str) -> bool {
        self.models.contains_key(crop)
    }

    /// Crops with a model, sorted.
    pub fn crops(&self) -> Vec<&str> {
        let mut crops: Vec<&str> = self.models.keys().map(String::as_str).collect();
        crops.sort_unstable();
        crops
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl fmt::Debug for ClassifierRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifierRegistry")
            .field("crops", &self.crops())
            .finish()
    }
}
