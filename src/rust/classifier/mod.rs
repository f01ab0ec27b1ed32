use std::path::PathBuf;

mod error;
mod cache;
mod encoder;
mod features;
mod model;
mod predictor;
pub mod builder;
mod utils;

pub use error::ClassifierError;
pub use cache::{PredictionCache, PredictionKey};
pub use encoder::{FeatureEncoder, OneHotEncoder, TextVectorizer};
pub use features::{EncodedBlocks, FeatureAssembler, FeatureBlock, FeatureVector, SparseRow};
pub use model::LinearModel;
pub use predictor::Predictor;
pub use builder::PredictorBuilder;
pub use utils::Norm;

/// Information about the artifacts a predictor was built from
#[derive(Debug, Clone)]
pub struct PredictorInfo {
    /// Directory the artifacts were loaded from, if any
    pub artifacts_dir: Option<PathBuf>,
    /// Number of categories the model predicts
    pub num_classes: usize,
    /// Category labels in model order
    pub class_labels: Vec<String>,
    /// Number of entries in the known-author list
    pub num_known_authors: usize,
    /// Widths of the headline, description, author and year blocks
    pub block_widths: [usize; 4],
    /// Total feature width the model was trained on
    pub n_features: usize,
    /// Prediction cache capacity, 0 when caching is off
    pub cache_capacity: usize,
}
