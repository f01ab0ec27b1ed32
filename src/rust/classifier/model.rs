use std::collections::HashMap;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use super::error::ClassifierError;
use super::features::FeatureVector;
use crate::artifact_manager::ArtifactError;

/// A pre-trained linear classifier (`scores = coef · x + intercept`).
///
/// With more than two classes `coef` has one row per class and the label
/// with the highest score wins; ties go to the earlier class. A binary model
/// stores a single row and predicts `classes[1]` when its score is positive.
///
/// Persisted as `{"classes": [...], "coef": [[...], ...], "intercept": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "LinearModelState", into = "LinearModelState")]
pub struct LinearModel {
    classes: Vec<String>,
    coef: Array2<f32>,
    intercept: Array1<f32>,
}

#[derive(Serialize, Deserialize)]
struct LinearModelState {
    classes: Vec<String>,
    coef: Vec<Vec<f32>>,
    intercept: Vec<f32>,
}

impl TryFrom<LinearModelState> for LinearModel {
    type Error = ArtifactError;

    fn try_from(state: LinearModelState) -> Result<Self, Self::Error> {
        let n_rows = state.coef.len();
        let n_features = state.coef.first().map_or(0, Vec::len);
        if let Some(pos) = state.coef.iter().position(|row| row.len() != n_features) {
            return Err(invalid(format!(
                "coefficient row {} has {} features, expected {}",
                pos,
                state.coef[pos].len(),
                n_features
            )));
        }

        let flat: Vec<f32> = state.coef.into_iter().flatten().collect();
        let coef = Array2::from_shape_vec((n_rows, n_features), flat)
            .map_err(|e| invalid(e.to_string()))?;
        Self::new(state.classes, coef, Array1::from(state.intercept))
    }
}

impl From<LinearModel> for LinearModelState {
    fn from(model: LinearModel) -> Self {
        Self {
            coef: model.coef.rows().into_iter().map(|row| row.to_vec()).collect(),
            intercept: model.intercept.to_vec(),
            classes: model.classes,
        }
    }
}

fn invalid(reason: impl Into<String>) -> ArtifactError {
    ArtifactError::Invalid {
        kind: "linear model".to_string(),
        reason: reason.into(),
    }
}

impl LinearModel {
    /// Creates a model from fitted weights.
    ///
    /// # Errors
    /// `ArtifactError::Invalid` if the shapes of `classes`, `coef` and
    /// `intercept` disagree, or any weight is not finite.
    pub fn new(
        classes: Vec<String>,
        coef: Array2<f32>,
        intercept: Array1<f32>,
    ) -> Result<Self, ArtifactError> {
        if classes.len() < 2 {
            return Err(invalid(format!("needs at least 2 classes, got {}", classes.len())));
        }
        let expected_rows = if classes.len() == 2 { 1 } else { classes.len() };
        if coef.nrows() != expected_rows && coef.nrows() != classes.len() {
            return Err(invalid(format!(
                "{} coefficient rows for {} classes",
                coef.nrows(),
                classes.len()
            )));
        }
        if coef.ncols() == 0 {
            return Err(invalid("coefficients have no features"));
        }
        if intercept.len() != coef.nrows() {
            return Err(invalid(format!(
                "{} intercepts for {} coefficient rows",
                intercept.len(),
                coef.nrows()
            )));
        }
        if coef.iter().chain(intercept.iter()).any(|w| !w.is_finite()) {
            return Err(invalid("non-finite weight"));
        }
        Ok(Self {
            classes,
            coef,
            intercept,
        })
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Width of the feature vector the model was trained on.
    pub fn n_features(&self) -> usize {
        self.coef.ncols()
    }

    fn is_binary(&self) -> bool {
        self.coef.nrows() == 1
    }

    /// Raw linear scores, one per coefficient row.
    ///
    /// # Errors
    /// `ConfigurationError` if the vector width differs from `n_features`.
    pub fn decision_function(&self, vector: &FeatureVector) -> Result<Array1<f32>, ClassifierError> {
        if vector.width() != self.n_features() {
            return Err(ClassifierError::ConfigurationError(format!(
                "feature vector has {} columns but the model expects {}",
                vector.width(),
                self.n_features()
            )));
        }

        let mut scores = self.intercept.clone();
        for (column, value) in vector.row().iter() {
            scores.scaled_add(value, &self.coef.column(column));
        }
        Ok(scores)
    }

    /// Predicts the label for a single assembled row.
    pub fn classify(&self, vector: &FeatureVector) -> Result<&str, ClassifierError> {
        let scores = self.decision_function(vector)?;
        Ok(&self.classes[self.best_index(&scores)])
    }

    /// Predicts the label and reports a score per class.
    pub fn classify_with_scores(
        &self,
        vector: &FeatureVector,
    ) -> Result<(String, HashMap<String, f32>), ClassifierError> {
        let scores = self.decision_function(vector)?;
        let label = self.classes[self.best_index(&scores)].clone();

        let per_class = if self.is_binary() {
            HashMap::from([
                (self.classes[0].clone(), -scores[0]),
                (self.classes[1].clone(), scores[0]),
            ])
        } else {
            self.classes.iter().cloned().zip(scores.iter().copied()).collect()
        };
        Ok((label, per_class))
    }

    fn best_index(&self, scores: &Array1<f32>) -> usize {
        if self.is_binary() {
            return usize::from(scores[0] > 0.0);
        }
        let mut best = 0;
        for (index, &score) in scores.iter().enumerate().skip(1) {
            if score > scores[best] {
                best = index;
            }
        }
        best
    }
}
