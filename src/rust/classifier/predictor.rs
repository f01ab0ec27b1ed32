use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use log::debug;

use super::cache::{PredictionCache, PredictionKey};
use super::encoder::FeatureEncoder;
use super::error::ClassifierError;
use super::features::{FeatureAssembler, FeatureVector};
use super::model::LinearModel;
use crate::article::{validate_fields, RawArticle};
use crate::text::{AuthorNormalizer, TextNormalizer};

/// Predicts the category of a news article from its headline, description,
/// publication year and author.
///
/// # Thread Safety
///
/// Everything a `Predictor` holds is read-only after construction except the
/// optional prediction cache, which is internally locked. Share one instance
/// across threads with `Arc`.
///
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use newscat::Predictor;
/// use std::sync::Arc;
/// use std::thread;
///
/// let predictor = Arc::new(Predictor::builder()
///     .with_artifacts_dir("artifacts")?
///     .build()?);
///
/// let predictor_clone = Arc::clone(&predictor);
/// thread::spawn(move || {
///     predictor_clone
///         .predict(2022, "John Smith", "Senate Passes New Bill", "Lawmakers voted today")
///         .unwrap();
/// });
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Predictor {
    pub(crate) artifacts_dir: Option<PathBuf>,
    pub(crate) known_authors: Arc<Vec<String>>,
    pub(crate) text_normalizer: TextNormalizer,
    pub(crate) author_normalizer: AuthorNormalizer,
    pub(crate) encoder: Arc<FeatureEncoder>,
    pub(crate) assembler: FeatureAssembler,
    pub(crate) model: Arc<LinearModel>,
    pub(crate) cache: Option<PredictionCache>,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<Predictor>();
    }
};

impl Predictor {
    /// Creates a new PredictorBuilder for fluent construction
    pub fn builder() -> super::builder::PredictorBuilder {
        super::builder::PredictorBuilder::new()
    }

    /// Returns information about the loaded artifacts
    pub fn info(&self) -> super::PredictorInfo {
        super::PredictorInfo {
            artifacts_dir: self.artifacts_dir.clone(),
            num_classes: self.model.classes().len(),
            class_labels: self.model.classes().to_vec(),
            num_known_authors: self.known_authors.len(),
            block_widths: self.encoder.block_widths(),
            n_features: self.model.n_features(),
            cache_capacity: self.cache.as_ref().map_or(0, PredictionCache::capacity),
        }
    }

    /// Author names users may pick from, as loaded from the artifacts
    pub fn known_authors(&self) -> &[String] {
        &self.known_authors
    }

    /// Runs normalization, encoding and assembly without classifying.
    ///
    /// No input validation happens here; this is the raw pipeline.
    pub fn prepare(&self, year: i32, author: &str, headline: &str, description: &str) -> FeatureVector {
        let author = self.author_normalizer.normalize(author);
        let headline = self.text_normalizer.normalize(headline);
        let description = self.text_normalizer.normalize(description);
        debug!(
            "Normalized request: year={} author={:?} headline={:?} description={:?}",
            year, author, headline, description
        );

        let blocks = self
            .encoder
            .encode(&headline, &description, &author, &year.to_string());
        self.assembler.assemble_blocks(&blocks)
    }

    /// Predicts the category label for one article.
    ///
    /// # Arguments
    /// * `year` - Publication year
    /// * `author` - A known author name or `"None of the above"`
    /// * `headline` - Article headline, must not be empty
    /// * `description` - Article description, must not be empty
    ///
    /// # Errors
    /// * `ValidationError` if the headline or description is empty; the
    ///   request is rejected before any normalization runs
    /// * `ConfigurationError` if the encoders and model disagree on width
    pub fn predict(
        &self,
        year: i32,
        author: &str,
        headline: &str,
        description: &str,
    ) -> Result<String, ClassifierError> {
        validate_fields(headline, description)?;

        let key = self
            .cache
            .as_ref()
            .map(|_| PredictionKey::new(year, author, headline, description));
        if let (Some(cache), Some(key)) = (&self.cache, &key) {
            if let Some(label) = cache.get(key) {
                debug!("Cache hit for {:?}", key);
                return Ok(label);
            }
        }

        let vector = self.prepare(year, author, headline, description);
        let label = self.model.classify(&vector)?.to_string();
        debug!("Predicted {} from {} active features", label, vector.row().nnz());

        if let (Some(cache), Some(key)) = (&self.cache, key) {
            cache.insert(key, label.clone());
        }
        Ok(label)
    }

    /// Predicts the category of a [`RawArticle`].
    pub fn predict_article(&self, article: &RawArticle) -> Result<String, ClassifierError> {
        self.predict(article.year, &article.author, &article.headline, &article.description)
    }

    /// Predicts the category and returns the model's score for every class.
    ///
    /// Scores are raw linear decision values, not probabilities. This path
    /// bypasses the prediction cache.
    pub fn predict_with_scores(
        &self,
        year: i32,
        author: &str,
        headline: &str,
        description: &str,
    ) -> Result<(String, HashMap<String, f32>), ClassifierError> {
        validate_fields(headline, description)?;
        let vector = self.prepare(year, author, headline, description);
        self.model.classify_with_scores(&vector)
    }
}
