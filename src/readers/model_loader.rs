use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::classifier::{ClassifierRegistry, DecisionTreeModel};
use crate::error::Result;
use crate::utils::constants::MODEL_FILE_SUFFIX;

/// Loads `<crop>_model.json` artifacts into a [`ClassifierRegistry`].
pub struct ModelLoader {
    models_dir: PathBuf,
}

impl ModelLoader {
    pub fn new(models_dir: impl Into<PathBuf>) -> Self {
        Self {
            models_dir: models_dir.into(),
        }
    }

    pub fn model_path(&self, crop: &str) -> PathBuf {
        self.models_dir.join(format!("{}{}", crop, MODEL_FILE_SUFFIX))
    }

    /// A crop without an artifact is left out of the registry. An artifact
    /// that exists but cannot be parsed is an error.
    pub fn load_registry<S: AsRef<str>>(&self, crops: &[S]) -> Result<ClassifierRegistry> {
        let mut registry = ClassifierRegistry::new();

        for crop in crops.iter().map(AsRef::as_ref) {
            let path = self.model_path(crop);
            if !path.is_file() {
                warn!(crop, path = %path.display(), "model missing");
                continue;
            }

            let model = DecisionTreeModel::load(&path)?;
            if model.crop != crop {
                warn!(
                    crop,
                    artifact_crop = %model.crop,
                    "model artifact was trained for a different crop"
                );
            }

            info!(crop, path = %path.display(), "loaded model");
            registry.insert(crop, model);
        }

        Ok(registry)
    }

    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdvisorError;
    use std::fs;
    use tempfile::TempDir;

    const BEANS_MODEL: &str = r#"{"crop": "beans", "root": {"label": "monitor_conditions_beans"}}"#;

    #[test]
    fn test_missing_model_omitted() -> Result<()> {
        let dir = TempDir::new()?;
        fs::write(dir.path().join("beans_model.json"), BEANS_MODEL)?;

        let registry = ModelLoader::new(dir.path()).load_registry(&["maize", "beans"])?;

        assert_eq!(registry.crops(), vec!["beans"]);
        assert!(!registry.contains("maize"));
        Ok(())
    }

    #[test]
    fn test_split_model_loads_and_predicts() -> Result<()> {
        use crate::models::FeatureVector;

        let dir = TempDir::new()?;
        fs::write(
            dir.path().join("maize_model.json"),
            r#"{"crop": "maize", "root": {"feature": "rain_3d", "threshold": 5.0,
                "left": {"feature": "min_temp_3d", "threshold": 15.0,
                    "left": {"label": "monitor_conditions_maize"},
                    "right": {"feature": "avg_dew_30d", "threshold": 10.0,
                        "left": {"label": "delay_planting_drought_maize"},
                        "right": {"label": "monitor_conditions_maize"}}},
                "right": {"label": "plant_now_maize"}}}"#,
        )?;

        let registry = ModelLoader::new(dir.path()).load_registry(&["maize"])?;
        let model = registry.get("maize").unwrap();

        let features = FeatureVector {
            rain_3d: 1.0,
            min_temp_3d: 20.0,
            avg_dew_30d: 8.0,
            dry_days_forecast: 2,
        };
        assert_eq!(model.predict(&features).unwrap(), "delay_planting_drought_maize");
        Ok(())
    }

    #[test]
    fn test_corrupt_model_is_error() -> Result<()> {
        let dir = TempDir::new()?;
        fs::write(dir.path().join("maize_model.json"), "{not json")?;

        let err = ModelLoader::new(dir.path())
            .load_registry(&["maize"])
            .unwrap_err();
        assert!(matches!(err, AdvisorError::InvalidModel { .. }));
        Ok(())
    }

    #[test]
    fn test_model_path() {
        let loader = ModelLoader::new("models/saved");
        assert_eq!(
            loader.model_path("maize"),
            PathBuf::from("models/saved/maize_model.json")
        );
        assert_eq!(loader.models_dir(), Path::new("models/saved"));
    }
}
