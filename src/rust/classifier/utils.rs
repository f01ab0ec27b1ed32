use serde::{Deserialize, Serialize};

/// Row normalization applied by a text vectorizer after weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// Scales `values` in place to unit norm. A row whose norm is zero is left
/// as is, so non-zero entries stay non-zero.
pub(crate) fn normalize_values(values: &mut [f32], norm: Norm) {
    let magnitude: f32 = match norm {
        Norm::L1 => values.iter().map(|x| x.abs()).sum(),
        Norm::L2 => values.iter().map(|&x| x * x).sum::<f32>().sqrt(),
    };
    if magnitude > 0.0 {
        values.iter_mut().for_each(|x| *x /= magnitude);
    }
}
