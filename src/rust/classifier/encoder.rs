use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::features::{EncodedBlocks, SparseRow};
use super::utils::{normalize_values, Norm};
use crate::artifact_manager::ArtifactError;

fn invalid(kind: &str, reason: impl Into<String>) -> ArtifactError {
    ArtifactError::Invalid {
        kind: kind.to_string(),
        reason: reason.into(),
    }
}

/// A pre-fitted one-hot encoder over a closed category vocabulary.
///
/// Values outside the vocabulary encode to an all-zero row instead of
/// failing, so an unseen author or year simply contributes nothing.
///
/// Persisted as `{"categories": [...]}`; the column of a category is its
/// position in that list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "OneHotEncoderState", into = "OneHotEncoderState")]
pub struct OneHotEncoder {
    categories: Vec<String>,
    index: HashMap<String, usize>,
}

#[derive(Serialize, Deserialize)]
struct OneHotEncoderState {
    categories: Vec<String>,
}

impl TryFrom<OneHotEncoderState> for OneHotEncoder {
    type Error = ArtifactError;

    fn try_from(state: OneHotEncoderState) -> Result<Self, Self::Error> {
        Self::new(state.categories)
    }
}

impl From<OneHotEncoder> for OneHotEncoderState {
    fn from(encoder: OneHotEncoder) -> Self {
        Self {
            categories: encoder.categories,
        }
    }
}

impl OneHotEncoder {
    /// Creates an encoder over `categories`, in column order.
    ///
    /// # Errors
    /// `ArtifactError::Invalid` if the list is empty or has duplicates.
    pub fn new<S: Into<String>>(categories: impl IntoIterator<Item = S>) -> Result<Self, ArtifactError> {
        let categories: Vec<String> = categories.into_iter().map(Into::into).collect();
        if categories.is_empty() {
            return Err(invalid("one-hot encoder", "no categories"));
        }

        let mut index = HashMap::with_capacity(categories.len());
        for (position, category) in categories.iter().enumerate() {
            if index.insert(category.clone(), position).is_some() {
                return Err(invalid("one-hot encoder", format!("duplicate category '{}'", category)));
            }
        }
        Ok(Self { categories, index })
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn width(&self) -> usize {
        self.categories.len()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.index.contains_key(value)
    }

    /// Encodes one value as an indicator row; unknown values give all zeros.
    pub fn transform(&self, value: &str) -> SparseRow {
        match self.index.get(value) {
            Some(&column) => SparseRow::indicator(self.width(), column),
            None => SparseRow::zeros(self.width()),
        }
    }
}

/// A pre-fitted bag-of-words / TF-IDF vectorizer.
///
/// Input is already-normalized text, so tokens are whitespace separated.
/// Terms missing from the fitted vocabulary are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "TextVectorizerState", into = "TextVectorizerState")]
pub struct TextVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Option<Vec<f32>>,
    ngram_range: (usize, usize),
    sublinear_tf: bool,
    binary: bool,
    norm: Option<Norm>,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

#[derive(Serialize, Deserialize)]
struct TextVectorizerState {
    vocabulary: BTreeMap<String, usize>,
    #[serde(default)]
    idf: Option<Vec<f32>>,
    #[serde(default = "default_ngram_range")]
    ngram_range: (usize, usize),
    #[serde(default)]
    sublinear_tf: bool,
    #[serde(default)]
    binary: bool,
    #[serde(default = "default_norm")]
    norm: Option<Norm>,
}

impl TryFrom<TextVectorizerState> for TextVectorizer {
    type Error = ArtifactError;

    fn try_from(state: TextVectorizerState) -> Result<Self, Self::Error> {
        let vectorizer = Self {
            vocabulary: state.vocabulary.into_iter().collect(),
            idf: state.idf,
            ngram_range: state.ngram_range,
            sublinear_tf: state.sublinear_tf,
            binary: state.binary,
            norm: state.norm,
        };
        vectorizer.validate()?;
        Ok(vectorizer)
    }
}

impl From<TextVectorizer> for TextVectorizerState {
    fn from(vectorizer: TextVectorizer) -> Self {
        Self {
            vocabulary: vectorizer.vocabulary.into_iter().collect(),
            idf: vectorizer.idf,
            ngram_range: vectorizer.ngram_range,
            sublinear_tf: vectorizer.sublinear_tf,
            binary: vectorizer.binary,
            norm: vectorizer.norm,
        }
    }
}

impl TextVectorizer {
    /// Creates a plain term-frequency vectorizer whose columns follow the
    /// order of `terms`, with l2 row normalization.
    ///
    /// # Errors
    /// `ArtifactError::Invalid` if `terms` is empty or repeats a term.
    pub fn new<S: Into<String>>(terms: impl IntoIterator<Item = S>) -> Result<Self, ArtifactError> {
        let vectorizer = Self {
            vocabulary: terms
                .into_iter()
                .enumerate()
                .map(|(column, term)| (term.into(), column))
                .collect(),
            idf: None,
            ngram_range: default_ngram_range(),
            sublinear_tf: false,
            binary: false,
            norm: default_norm(),
        };
        vectorizer.validate()?;
        Ok(vectorizer)
    }

    /// Attaches fitted inverse-document-frequency weights, one per column.
    pub fn with_idf(mut self, idf: Vec<f32>) -> Result<Self, ArtifactError> {
        self.idf = Some(idf);
        self.validate()?;
        Ok(self)
    }

    pub fn with_ngram_range(mut self, min_n: usize, max_n: usize) -> Result<Self, ArtifactError> {
        self.ngram_range = (min_n, max_n);
        self.validate()?;
        Ok(self)
    }

    pub fn with_sublinear_tf(mut self, enabled: bool) -> Self {
        self.sublinear_tf = enabled;
        self
    }

    pub fn with_binary(mut self, enabled: bool) -> Self {
        self.binary = enabled;
        self
    }

    pub fn with_norm(mut self, norm: Option<Norm>) -> Self {
        self.norm = norm;
        self
    }

    fn validate(&self) -> Result<(), ArtifactError> {
        const KIND: &str = "text vectorizer";
        let width = self.vocabulary.len();
        if width == 0 {
            return Err(invalid(KIND, "empty vocabulary"));
        }

        let mut seen = vec![false; width];
        for (term, &column) in &self.vocabulary {
            if column >= width || std::mem::replace(&mut seen[column], true) {
                return Err(invalid(KIND, format!("term '{}' has invalid column {}", term, column)));
            }
        }

        if let Some(idf) = &self.idf {
            if idf.len() != width {
                return Err(invalid(
                    KIND,
                    format!("idf has {} weights for {} terms", idf.len(), width),
                ));
            }
            if idf.iter().any(|w| !w.is_finite()) {
                return Err(invalid(KIND, "idf contains non-finite weights"));
            }
        }

        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(invalid(KIND, format!("invalid n-gram range ({}, {})", min_n, max_n)));
        }
        Ok(())
    }

    /// Number of columns this vectorizer produces.
    pub fn width(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn column(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Encodes normalized text as a single weighted, normalized row.
    pub fn transform(&self, text: &str) -> SparseRow {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let (min_n, max_n) = self.ngram_range;

        let mut counts: BTreeMap<usize, f32> = BTreeMap::new();
        for n in min_n..=max_n.min(tokens.len()) {
            for window in tokens.windows(n) {
                let term = window.join(" ");
                if let Some(&column) = self.vocabulary.get(&term) {
                    *counts.entry(column).or_insert(0.0) += 1.0;
                }
            }
        }

        let mut row = SparseRow::from_sorted(
            self.width(),
            counts
                .into_iter()
                .map(|(column, count)| (column, self.weight(column, count))),
        );
        if let Some(norm) = self.norm {
            normalize_values(row.values_mut(), norm);
        }
        row
    }

    fn weight(&self, column: usize, count: f32) -> f32 {
        let tf = if self.binary {
            1.0
        } else if self.sublinear_tf {
            1.0 + count.ln()
        } else {
            count
        };
        match &self.idf {
            Some(idf) => tf * idf[column],
            None => tf,
        }
    }
}

/// The four pre-fitted encoders, applied together to one article.
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    headline: TextVectorizer,
    description: TextVectorizer,
    author: OneHotEncoder,
    year: OneHotEncoder,
}

impl FeatureEncoder {
    pub fn new(
        headline: TextVectorizer,
        description: TextVectorizer,
        author: OneHotEncoder,
        year: OneHotEncoder,
    ) -> Self {
        Self {
            headline,
            description,
            author,
            year,
        }
    }

    /// Encodes already-normalized fields. Never fails: unseen categories
    /// and out-of-vocabulary terms encode to zeros.
    pub fn encode(&self, headline: &str, description: &str, author: &str, year: &str) -> EncodedBlocks {
        EncodedBlocks {
            headline: self.headline.transform(headline),
            description: self.description.transform(description),
            author: self.author.transform(author),
            year: self.year.transform(year),
        }
    }

    /// Block widths in assembly order: headline, description, author, year.
    pub fn block_widths(&self) -> [usize; 4] {
        [
            self.headline.width(),
            self.description.width(),
            self.author.width(),
            self.year.width(),
        ]
    }

    pub fn width(&self) -> usize {
        self.block_widths().iter().sum()
    }

    pub fn author_encoder(&self) -> &OneHotEncoder {
        &self.author
    }

    pub fn year_encoder(&self) -> &OneHotEncoder {
        &self.year
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn years() -> OneHotEncoder {
        OneHotEncoder::new((2001..=2022).map(|y| y.to_string())).unwrap()
    }

    #[test]
    fn test_one_hot_known_value() {
        let encoder = years();
        let row = encoder.transform("2022");
        assert_eq!(row.width(), 22);
        assert_eq!(row.indices(), &[21]);
        assert_eq!(row.values(), &[1.0]);
    }

    #[test]
    fn test_one_hot_unknown_value_is_zero_row() {
        let encoder = years();
        for value in ["1999", "2023", "", "twenty"] {
            let row = encoder.transform(value);
            assert_eq!(row.width(), 22);
            assert!(row.is_zero());
        }

        let authors = OneHotEncoder::new(vec!["John Smith", "Ron Dicker"]).unwrap();
        assert!(authors.transform("Xx99!!").is_zero());
        assert!(authors.transform("NA").is_zero());
    }

    #[test]
    fn test_one_hot_rejects_bad_vocabulary() {
        assert!(OneHotEncoder::new(Vec::<String>::new()).is_err());
        assert!(OneHotEncoder::new(vec!["a", "b", "a"]).is_err());
    }

    #[test]
    fn test_one_hot_json_roundtrip_keeps_columns() {
        let json = r#"{"categories": ["Ed Mazza", "John Smith"]}"#;
        let encoder: OneHotEncoder = serde_json::from_str(json).unwrap();
        assert_eq!(encoder.transform("John Smith").indices(), &[1]);
        let back = serde_json::to_value(&encoder).unwrap();
        assert_eq!(back["categories"][0], "Ed Mazza");
    }

    #[test]
    fn test_vectorizer_counts_and_norm() {
        let vectorizer = TextVectorizer::new(vec!["bill", "senate", "vote"])
            .unwrap()
            .with_norm(None);
        let row = vectorizer.transform("senate bill bill unknown");
        assert_eq!(row.indices(), &[0, 1]);
        assert_eq!(row.values(), &[2.0, 1.0]);

        let normalized = TextVectorizer::new(vec!["bill", "senate", "vote"]).unwrap();
        let row = normalized.transform("senate bill bill");
        let expected = [2.0 / 5f32.sqrt(), 1.0 / 5f32.sqrt()];
        assert!((row.values()[0] - expected[0]).abs() < 1e-6);
        assert!((row.values()[1] - expected[1]).abs() < 1e-6);
    }

    #[test]
    fn test_vectorizer_idf_and_sublinear() {
        let vectorizer = TextVectorizer::new(vec!["bill", "senate"])
            .unwrap()
            .with_idf(vec![2.0, 1.0])
            .unwrap()
            .with_sublinear_tf(true)
            .with_norm(None);
        let row = vectorizer.transform("bill bill senate");
        assert!((row.get(0) - 2.0 * (1.0 + 2f32.ln())).abs() < 1e-6);
        assert!((row.get(1) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_vectorizer_binary_and_bigrams() {
        let vectorizer = TextVectorizer::new(vec!["new", "bill", "new bill"])
            .unwrap()
            .with_ngram_range(1, 2)
            .unwrap()
            .with_binary(true)
            .with_norm(None);
        let row = vectorizer.transform("new bill new");
        assert_eq!(row.indices(), &[0, 1, 2]);
        assert_eq!(row.values(), &[1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_vectorizer_tiny_idf_keeps_entry() {
        let vectorizer = TextVectorizer::new(vec!["bill"])
            .unwrap()
            .with_idf(vec![1e-12])
            .unwrap();
        let row = vectorizer.transform("bill");
        assert!(!row.is_zero());
        assert_eq!(row.nnz(), 1);
        assert!((row.values()[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_vectorizer_unseen_text_is_zero_row() {
        let vectorizer = TextVectorizer::new(vec!["bill", "senate"]).unwrap();
        let row = vectorizer.transform("completely unrelated words");
        assert_eq!(row.width(), 2);
        assert!(row.is_zero());
        assert!(vectorizer.transform("").is_zero());
    }

    #[test]
    fn test_vectorizer_rejects_inconsistent_state() {
        assert!(TextVectorizer::new(Vec::<String>::new()).is_err());
        assert!(TextVectorizer::new(vec!["a", "b"]).unwrap().with_idf(vec![1.0]).is_err());
        assert!(TextVectorizer::new(vec!["a"]).unwrap().with_ngram_range(0, 1).is_err());

        let gap = r#"{"vocabulary": {"a": 0, "b": 2}}"#;
        assert!(serde_json::from_str::<TextVectorizer>(gap).is_err());
        let dup = r#"{"vocabulary": {"a": 0, "b": 0}}"#;
        assert!(serde_json::from_str::<TextVectorizer>(dup).is_err());
    }

    #[test]
    fn test_vectorizer_json_defaults() {
        let json = r#"{"vocabulary": {"senate": 1, "bill": 0}, "idf": [1.5, 1.0]}"#;
        let vectorizer: TextVectorizer = serde_json::from_str(json).unwrap();
        assert_eq!(vectorizer.width(), 2);
        assert_eq!(vectorizer.column("senate"), Some(1));
        let row = vectorizer.transform("senate");
        assert_eq!(row.indices(), &[1]);
        assert!((row.values()[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_feature_encoder_widths() {
        let encoder = FeatureEncoder::new(
            TextVectorizer::new(vec!["senate", "bill"]).unwrap(),
            TextVectorizer::new(vec!["lawmaker", "vote", "today"]).unwrap(),
            OneHotEncoder::new(vec!["John Smith"]).unwrap(),
            years(),
        );
        assert_eq!(encoder.block_widths(), [2, 3, 1, 22]);
        assert_eq!(encoder.width(), 28);

        let blocks = encoder.encode("senate bill", "lawmaker voted today", "Xx99!!", "1990");
        assert_eq!(blocks.headline.nnz(), 2);
        assert_eq!(blocks.description.indices(), &[0, 2]);
        assert!(blocks.author.is_zero());
        assert!(blocks.year.is_zero());
    }
}
