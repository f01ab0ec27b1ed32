use std::ops::RangeInclusive;

use crate::classifier::ClassifierError;
use crate::text::NO_AUTHOR;

/// Publication years offered by the request form.
pub const YEAR_RANGE: RangeInclusive<i32> = 2001..=2022;

/// Years in the order the form lists them, newest first.
pub fn available_years() -> Vec<i32> {
    YEAR_RANGE.rev().collect()
}

/// A single prediction request as submitted by a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawArticle {
    pub headline: String,
    pub description: String,
    pub year: i32,
    pub author: String,
}

impl RawArticle {
    pub fn new(
        headline: impl Into<String>,
        description: impl Into<String>,
        year: i32,
        author: impl Into<String>,
    ) -> Self {
        Self {
            headline: headline.into(),
            description: description.into(),
            year,
            author: author.into(),
        }
    }

    /// An article whose author is not in the known-author list.
    pub fn without_author(headline: impl Into<String>, description: impl Into<String>, year: i32) -> Self {
        Self::new(headline, description, year, NO_AUTHOR)
    }

    /// Rejects requests the pipeline must never see.
    pub fn validate(&self) -> Result<(), ClassifierError> {
        validate_fields(&self.headline, &self.description)
    }
}

/// Boundary check shared by every prediction entry point.
pub(crate) fn validate_fields(headline: &str, description: &str) -> Result<(), ClassifierError> {
    if headline.is_empty() {
        return Err(ClassifierError::ValidationError("Headline can't be empty".into()));
    }
    if description.is_empty() {
        return Err(ClassifierError::ValidationError("Description can't be empty".into()));
    }
    Ok(())
}
