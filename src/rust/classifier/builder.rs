use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{error, info};

use super::cache::PredictionCache;
use super::encoder::{FeatureEncoder, OneHotEncoder, TextVectorizer};
use super::error::ClassifierError;
use super::features::FeatureAssembler;
use super::model::LinearModel;
use super::predictor::Predictor;
use crate::artifacts::ArtifactKind;
use crate::text::{AuthorNormalizer, TextNormalizer};
use crate::{ArtifactError, ArtifactManager, RuntimeConfig};

/// A builder for constructing a [`Predictor`] with a fluent interface.
///
/// Artifacts come either from a directory on disk
/// ([`with_artifacts_dir`](Self::with_artifacts_dir)) or from already
/// constructed components ([`with_components`](Self::with_components)).
#[derive(Default, Debug)]
pub struct PredictorBuilder {
    artifacts_dir: Option<PathBuf>,
    known_authors: Option<Vec<String>>,
    encoder: Option<FeatureEncoder>,
    model: Option<LinearModel>,
    runtime_config: RuntimeConfig,
}

impl PredictorBuilder {
    /// Creates a new empty PredictorBuilder instance with default configuration
    ///
    /// # Example
    /// ```
    /// use newscat::PredictorBuilder;
    ///
    /// let builder = PredictorBuilder::new();
    /// ```
    pub fn new() -> Self {
        Self {
            artifacts_dir: None,
            known_authors: None,
            encoder: None,
            model: None,
            runtime_config: RuntimeConfig::default(),
        }
    }

    /// Sets the runtime configuration used when loading and serving
    ///
    /// # Example
    /// ```
    /// use newscat::{PredictorBuilder, RuntimeConfig};
    ///
    /// let builder = PredictorBuilder::new()
    ///     .with_runtime_config(RuntimeConfig::default().with_cache_capacity(256));
    /// ```
    pub fn with_runtime_config(mut self, config: RuntimeConfig) -> Self {
        self.runtime_config = config;
        self
    }

    /// Loads artifacts from `dir` when [`build`](Self::build) is called
    ///
    /// # Returns
    /// * `Result<Self, ClassifierError>` - The builder instance if successful, or an error if:
    ///   - The path is empty
    ///   - An artifact source is already set
    ///   - The directory does not exist
    pub fn with_artifacts_dir<P: AsRef<Path>>(mut self, dir: P) -> Result<Self, ClassifierError> {
        let dir = dir.as_ref();
        if dir.as_os_str().is_empty() {
            return Err(ClassifierError::BuildError("Artifact directory cannot be empty".to_string()));
        }
        self.ensure_unset()?;
        if !dir.is_dir() {
            return Err(ClassifierError::BuildError(format!(
                "Artifact directory not found: {}",
                dir.display()
            )));
        }
        self.artifacts_dir = Some(dir.to_path_buf());
        Ok(self)
    }

    /// Loads artifacts from [`ArtifactManager::get_default_artifacts_dir`]
    pub fn with_default_artifacts(self) -> Result<Self, ClassifierError> {
        self.with_artifacts_dir(ArtifactManager::get_default_artifacts_dir())
    }

    /// Uses in-memory components instead of an artifact directory
    pub fn with_components(
        mut self,
        known_authors: Vec<String>,
        encoder: FeatureEncoder,
        model: LinearModel,
    ) -> Result<Self, ClassifierError> {
        self.ensure_unset()?;
        self.known_authors = Some(known_authors);
        self.encoder = Some(encoder);
        self.model = Some(model);
        Ok(self)
    }

    fn ensure_unset(&self) -> Result<(), ClassifierError> {
        if self.artifacts_dir.is_some() || self.model.is_some() {
            return Err(ClassifierError::BuildError("Artifact source already set".to_string()));
        }
        Ok(())
    }

    /// Builds and returns the final Predictor instance
    ///
    /// # Returns
    /// * `Result<Predictor, ClassifierError>` - The constructed Predictor if successful, or an error if:
    ///   - No artifact source was set
    ///   - An artifact is missing (`ArtifactError::NotFound`), fails checksum
    ///     verification or cannot be decoded
    ///   - The encoders' combined width differs from the model's feature count
    pub fn build(mut self) -> Result<Predictor, ClassifierError> {
        if let Some(dir) = self.artifacts_dir.clone() {
            self.load_artifacts(&dir)?;
        }

        let known_authors = self.known_authors.take().unwrap_or_default();
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| ClassifierError::BuildError("No artifacts loaded".to_string()))?;
        let model = self
            .model
            .take()
            .ok_or_else(|| ClassifierError::BuildError("No model loaded".to_string()))?;

        Self::validate_widths(&encoder, &model)?;
        info!(
            "Predictor ready: {} classes, {} features {:?}, {} known authors",
            model.classes().len(),
            model.n_features(),
            encoder.block_widths(),
            known_authors.len()
        );

        let cache = match self.runtime_config.cache_capacity {
            0 => None,
            capacity => Some(PredictionCache::new(capacity)),
        };

        Ok(Predictor {
            artifacts_dir: self.artifacts_dir,
            known_authors: Arc::new(known_authors),
            text_normalizer: TextNormalizer::new(),
            author_normalizer: AuthorNormalizer::new(),
            encoder: Arc::new(encoder),
            assembler: FeatureAssembler::new(),
            model: Arc::new(model),
            cache,
        })
    }

    fn load_artifacts(&mut self, dir: &Path) -> Result<(), ClassifierError> {
        let manager = ArtifactManager::new(dir);
        let missing = manager.missing_artifacts();
        if let Some(&first) = missing.first() {
            let names: Vec<&str> = missing.iter().map(|kind| kind.file_name()).collect();
            error!("Missing artifacts in {:?}: {:?}", dir, names);
            return Err(ArtifactError::NotFound(manager.artifact_path(first)).into());
        }

        if self.runtime_config.verify_checksums {
            manager.verify_artifacts()?;
        }

        let known_authors = manager.load_authors()?;
        let year: OneHotEncoder = manager.load(ArtifactKind::YearEncoder)?;
        let author: OneHotEncoder = manager.load(ArtifactKind::AuthorEncoder)?;
        let headline: TextVectorizer = manager.load(ArtifactKind::HeadlineVectorizer)?;
        let description: TextVectorizer = manager.load(ArtifactKind::DescriptionVectorizer)?;
        let model: LinearModel = manager.load(ArtifactKind::Model)?;
        info!("Artifacts loaded successfully from {:?}", dir);

        self.known_authors = Some(known_authors);
        self.encoder = Some(FeatureEncoder::new(headline, description, author, year));
        self.model = Some(model);
        Ok(())
    }

    /// The encoders and the model must agree on the feature width, otherwise
    /// every prediction would be computed against the wrong columns.
    fn validate_widths(encoder: &FeatureEncoder, model: &LinearModel) -> Result<(), ClassifierError> {
        if encoder.width() != model.n_features() {
            error!(
                "Encoder widths {:?} sum to {}, model expects {}",
                encoder.block_widths(),
                encoder.width(),
                model.n_features()
            );
            return Err(ClassifierError::ConfigurationError(format!(
                "encoders produce {} features {:?} but the model expects {}",
                encoder.width(),
                encoder.block_widths(),
                model.n_features()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::test_support::{sample_components, write_sample_artifacts};
    use ndarray::{Array1, Array2};

    #[test]
    fn test_build_requires_source() {
        let result = PredictorBuilder::new().build();
        assert!(matches!(result, Err(ClassifierError::BuildError(_))));
    }

    #[test]
    fn test_source_cannot_be_set_twice() {
        let (authors, encoder, model) = sample_components();
        let dir = tempfile::tempdir().unwrap();
        let result = PredictorBuilder::new()
            .with_components(authors, encoder, model)
            .and_then(|builder| builder.with_artifacts_dir(dir.path()));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_directory() {
        assert!(PredictorBuilder::new().with_artifacts_dir("").is_err());
        assert!(PredictorBuilder::new()
            .with_artifacts_dir("/definitely/not/a/newscat/dir")
            .is_err());
    }

    #[test]
    fn test_width_mismatch_fails_build() {
        let (authors, encoder, _) = sample_components();
        let model = LinearModel::new(
            vec!["A".into(), "B".into(), "C".into()],
            Array2::zeros((3, encoder.width() + 1)),
            Array1::zeros(3),
        )
        .unwrap();
        let result = PredictorBuilder::new()
            .with_components(authors, encoder, model)
            .and_then(PredictorBuilder::build);
        assert!(matches!(result, Err(ClassifierError::ConfigurationError(_))));
    }

    #[test]
    fn test_build_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        write_sample_artifacts(dir.path(), true);

        let predictor = PredictorBuilder::new()
            .with_artifacts_dir(dir.path())
            .unwrap()
            .build()
            .unwrap();
        let info = predictor.info();
        assert_eq!(info.num_classes, 3);
        assert_eq!(info.num_known_authors, 3);
        assert_eq!(info.artifacts_dir.as_deref(), Some(dir.path()));
        assert_eq!(
            predictor
                .predict(2022, "John Smith", "Senate Passes New Bill", "Lawmakers voted today on...")
                .unwrap(),
            "POLITICS"
        );
    }

    #[test]
    fn test_incomplete_directory() {
        let dir = tempfile::tempdir().unwrap();
        write_sample_artifacts(dir.path(), false);
        std::fs::remove_file(dir.path().join("vec_desc.json")).unwrap();

        let result = PredictorBuilder::new()
            .with_artifacts_dir(dir.path())
            .unwrap()
            .build();
        match result {
            Err(ClassifierError::ArtifactError(ArtifactError::NotFound(path))) => {
                assert!(path.ends_with("vec_desc.json"))
            }
            other => panic!("expected missing artifact, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_corrupt_artifact_detected() {
        let dir = tempfile::tempdir().unwrap();
        write_sample_artifacts(dir.path(), true);
        std::fs::write(dir.path().join("ohe_year.json"), r#"{"categories": ["2022"]}"#).unwrap();

        let result = PredictorBuilder::new()
            .with_artifacts_dir(dir.path())
            .unwrap()
            .build();
        assert!(matches!(result, Err(ClassifierError::ArtifactError(_))));

        // without verification the tampered encoder is caught by the width check
        let result = PredictorBuilder::new()
            .with_runtime_config(RuntimeConfig::default().with_verify_checksums(false))
            .with_artifacts_dir(dir.path())
            .unwrap()
            .build();
        assert!(matches!(result, Err(ClassifierError::ConfigurationError(_))));
    }
}
