use super::lemmatizer::Lemmatizer;
use super::stopwords::StopWords;

/// Cleans free text (headlines, descriptions) into the canonical token string
/// the text vectorizers were fitted on.
///
/// The steps, in order:
/// 1. every character outside `A-Z`, `a-z` and space becomes a space
/// 2. lowercase, collapse whitespace runs, trim
/// 3. drop tokens of length 1 and stop words
/// 4. lemmatize the survivors, dropping any lemma that is itself a stop word
///    or a single letter
/// 5. rejoin with single spaces
///
/// ```
/// use newscat::TextNormalizer;
///
/// let normalizer = TextNormalizer::new();
/// assert_eq!(normalizer.normalize("Senate Passes New Bill!"), "senate pass new bill");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer {
    stop_words: StopWords,
    lemmatizer: Lemmatizer,
}

impl TextNormalizer {
    /// Creates a normalizer backed by the English stop words and noun lemmatizer.
    pub fn new() -> Self {
        Self {
            stop_words: StopWords::english(),
            lemmatizer: Lemmatizer::new(),
        }
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Normalizes `raw` into space-separated lemmas. Empty or symbol-only
    /// input yields an empty string.
    pub fn normalize(&self, raw: &str) -> String {
        let cleaned: String = raw
            .chars()
            .map(|c| if c.is_ascii_alphabetic() { c.to_ascii_lowercase() } else { ' ' })
            .collect();

        let mut tokens: Vec<String> = Vec::new();
        for token in cleaned.split_whitespace() {
            if !self.keeps(token) {
                continue;
            }
            let lemma = self.lemmatizer.lemmatize(token);
            if self.keeps(&lemma) {
                tokens.push(lemma.into_owned());
            }
        }
        tokens.join(" ")
    }

    fn keeps(&self, token: &str) -> bool {
        token.len() > 1 && !self.stop_words.contains(token)
    }
}
