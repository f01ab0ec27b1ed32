use std::fmt;

/// The persisted artifacts a predictor is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Known-author list offered to users
    Authors,
    /// One-hot encoder over publication years
    YearEncoder,
    /// One-hot encoder over cleaned author names
    AuthorEncoder,
    /// Text vectorizer fitted on cleaned headlines
    HeadlineVectorizer,
    /// Text vectorizer fitted on cleaned descriptions
    DescriptionVectorizer,
    /// Trained linear classifier
    Model,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 6] = [
        ArtifactKind::Authors,
        ArtifactKind::YearEncoder,
        ArtifactKind::AuthorEncoder,
        ArtifactKind::HeadlineVectorizer,
        ArtifactKind::DescriptionVectorizer,
        ArtifactKind::Model,
    ];

    /// File name inside the artifact directory.
    pub fn file_name(self) -> &'static str {
        match self {
            ArtifactKind::Authors => "authors.json",
            ArtifactKind::YearEncoder => "ohe_year.json",
            ArtifactKind::AuthorEncoder => "ohe_authors.json",
            ArtifactKind::HeadlineVectorizer => "vec_headline.json",
            ArtifactKind::DescriptionVectorizer => "vec_desc.json",
            ArtifactKind::Model => "model.json",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArtifactKind::Authors => "author list",
            ArtifactKind::YearEncoder => "year encoder",
            ArtifactKind::AuthorEncoder => "author encoder",
            ArtifactKind::HeadlineVectorizer => "headline vectorizer",
            ArtifactKind::DescriptionVectorizer => "description vectorizer",
            ArtifactKind::Model => "model",
        };
        write!(f, "{}", name)
    }
}
