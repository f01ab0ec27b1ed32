//! Deterministic text cleaning applied to raw request fields before encoding.

mod author;
mod lemmatizer;
mod normalizer;
mod stopwords;

pub use author::{AuthorNormalizer, NO_AUTHOR, UNKNOWN_AUTHOR};
pub use lemmatizer::Lemmatizer;
pub use normalizer::TextNormalizer;
pub use stopwords::{StopWords, ENGLISH_STOP_WORDS};
