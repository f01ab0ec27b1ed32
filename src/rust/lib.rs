//! News article category prediction.
//!
//! A [`Predictor`] turns a headline, description, publication year and author
//! into a category label using pre-fitted encoders and a pre-trained linear
//! model loaded from an artifact directory:
//!
//! 1. headline and description are cleaned by [`TextNormalizer`], the author
//!    by [`AuthorNormalizer`]
//! 2. the four fields are encoded by a [`FeatureEncoder`]
//! 3. the blocks are stacked by [`FeatureAssembler`] in the fixed order
//!    `[headline, description, author, year]`
//! 4. the [`LinearModel`] picks the label
//!
//! # Basic Usage
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use newscat::Predictor;
//!
//! let predictor = Predictor::builder()
//!     .with_artifacts_dir("artifacts")?
//!     .build()?;
//!
//! let category = predictor.predict(
//!     2022,
//!     "John Smith",
//!     "Senate Passes New Bill",
//!     "Lawmakers voted today on...",
//! )?;
//! println!("Predicted category: {}", category);
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! All loaded state is read-only, so one predictor can serve many threads:
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use newscat::{Predictor, RuntimeConfig};
//! use std::sync::Arc;
//! use std::thread;
//!
//! let predictor = Arc::new(Predictor::builder()
//!     .with_runtime_config(RuntimeConfig::default().with_cache_capacity(1024))
//!     .with_artifacts_dir("artifacts")?
//!     .build()?);
//!
//! let mut handles = vec![];
//! for _ in 0..3 {
//!     let predictor = Arc::clone(&predictor);
//!     handles.push(thread::spawn(move || {
//!         predictor.predict(2020, "None of the above", "Team wins title", "Fans celebrate").unwrap();
//!     }));
//! }
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! # Ok(())
//! # }
//! ```

pub mod article;
pub mod artifact_manager;
pub mod artifacts;
pub mod classifier;
mod runtime;
pub mod text;

pub use article::{available_years, RawArticle, YEAR_RANGE};
pub use artifact_manager::{ArtifactError, ArtifactManager, MANIFEST_FILE};
pub use artifacts::ArtifactKind;
pub use classifier::{
    ClassifierError, EncodedBlocks, FeatureAssembler, FeatureBlock, FeatureEncoder, FeatureVector,
    LinearModel, Norm, OneHotEncoder, PredictionCache, PredictionKey, Predictor, PredictorBuilder,
    PredictorInfo, SparseRow, TextVectorizer,
};
pub use runtime::RuntimeConfig;
pub use text::{AuthorNormalizer, Lemmatizer, StopWords, TextNormalizer, NO_AUTHOR, UNKNOWN_AUTHOR};

pub fn init_logger() {
    env_logger::init();
}
