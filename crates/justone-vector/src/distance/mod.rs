//! Distance functions for embedding comparison.
//!
//! Components are stored as `f32` but every accumulation here runs in `f64`,
//! so the result of comparing a vector with itself is exactly zero and the
//! metric is exactly symmetric.
//!
//! The cosine distance reported by this crate is scaled by [`DISTANCE_SCALE`]:
//!
//! ```text
//! cosine_distance(a, b) = (1 - cosine_similarity(a, b)) * 100
//! ```
//!
//! which lies in `[0, 200]`, and in `[0, 100]` whenever the similarity is
//! non-negative.


use crate::error::VectorError;

/// Multiplier applied to `1 - cosine_similarity`.
pub const DISTANCE_SCALE: f64 = 100.0;

/// Calculate the dot product between two vectors.
///
/// # Panics
///
/// Debug-panics if vectors have different lengths.
#[inline]
#[must_use]
pub fn dot_product(a: &[f32], b: &[f32]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same dimension");
    a.iter().zip(b.iter()).map(|(&x, &y)| f64::from(x) * f64::from(y)).sum()
}

/// Calculate the sum of squares (squared L2 norm) of a vector.
#[inline]
#[must_use]
pub fn sum_of_squares(v: &[f32]) -> f64 {
    v.iter().map(|&x| f64::from(x) * f64::from(x)).sum()
}

/// Calculate the cosine similarity between two vectors.
///
/// Returns a value in `[-1, 1]`; rounding overshoot is clamped.
///
/// # Errors
///
/// - [`VectorError::DimensionMismatch`] if the lengths differ.
/// - [`VectorError::ZeroMagnitude`] if either vector has zero magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64, VectorError> {
    if a.len() != b.len() {
        return Err(VectorError::DimensionMismatch { expected: a.len(), actual: b.len() });
    }

    let norm_a_squared = sum_of_squares(a);
    let norm_b_squared = sum_of_squares(b);
    if norm_a_squared == 0.0 || norm_b_squared == 0.0 {
        return Err(VectorError::ZeroMagnitude);
    }

    // sqrt(x * x) == x in IEEE arithmetic, so a vector against itself gives exactly 1.
    let similarity = dot_product(a, b) / (norm_a_squared * norm_b_squared).sqrt();
    Ok(similarity.clamp(-1.0, 1.0))
}

/// Calculate the scaled cosine distance between two vectors.
///
/// # Errors
///
/// Same as [`cosine_similarity`].
///
/// # Example
///
/// ```
/// use justone_vector::distance::cosine_distance;
///
/// let d = cosine_distance(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
/// assert_eq!(d, 100.0);
/// ```
pub fn cosine_distance(a: &[f32], b: &[f32]) -> Result<f64, VectorError> {
    cosine_similarity(a, b).map(|similarity| (1.0 - similarity) * DISTANCE_SCALE)
}
