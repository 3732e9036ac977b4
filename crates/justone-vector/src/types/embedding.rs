//! Embedding type parsed from corpus lines.

use std::ops::Deref;

use crate::error::VectorError;

/// A word embedding with dimension validation.
///
/// Components are kept as `f32`, the precision the corpus is published in.
/// Distance calculations widen to `f64` internally.
///
/// # Example
///
/// ```
/// use justone_vector::types::Embedding;
///
/// let embedding = Embedding::parse("katze", "0.25 -1.5 3").unwrap();
/// assert_eq!(embedding.dimension(), 3);
/// assert_eq!(embedding.as_slice(), &[0.25, -1.5, 3.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    data: Vec<f32>,
}

impl Embedding {
    /// Create a new embedding from a vector of f32 values.
    ///
    /// # Errors
    ///
    /// Returns an error if the vector is empty or contains NaN/Infinite values.
    pub fn new(data: Vec<f32>) -> Result<Self, VectorError> {
        if data.is_empty() {
            return Err(VectorError::InvalidDimension { expected: 1, actual: 0 });
        }

        if let Some((index, &value)) = data.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(VectorError::InvalidValue {
                index,
                value,
                reason: if value.is_nan() {
                    "NaN values are not allowed"
                } else {
                    "Infinite values are not allowed"
                },
            });
        }

        Ok(Self { data })
    }

    /// Parse the space-separated components that follow `word` on a corpus line.
    ///
    /// Trailing whitespace is ignored. Every remaining field must be a number.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::MalformedLine`] for a non-numeric or empty field,
    /// and the [`Embedding::new`] errors for empty or non-finite vectors.
    pub fn parse(word: &str, components: &str) -> Result<Self, VectorError> {
        let components = components.trim_end();
        if components.is_empty() {
            return Err(VectorError::InvalidDimension { expected: 1, actual: 0 });
        }

        let data = components
            .split(' ')
            .enumerate()
            .map(|(index, field)| {
                field.parse::<f32>().map_err(|_| VectorError::MalformedLine {
                    word: word.to_owned(),
                    index,
                    reason: format!("'{field}' is not a number"),
                })
            })
            .collect::<Result<Vec<f32>, _>>()?;

        Self::new(data).map_err(|e| match e {
            VectorError::InvalidValue { index, reason, .. } => VectorError::MalformedLine {
                word: word.to_owned(),
                index,
                reason: reason.to_owned(),
            },
            other => other,
        })
    }

    /// Get the dimension of the embedding.
    #[inline]
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.data.len()
    }

    /// Get the embedding data as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Calculate the L2 (Euclidean) norm of the embedding.
    #[inline]
    #[must_use]
    pub fn l2_norm(&self) -> f64 {
        self.data.iter().map(|&x| f64::from(x) * f64::from(x)).sum::<f64>().sqrt()
    }
}

impl Deref for Embedding {
    type Target = [f32];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_embedding() {
        let embedding = Embedding::new(vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(embedding.dimension(), 3);
        assert_eq!(embedding.as_slice(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn new_embedding_empty_fails() {
        match Embedding::new(vec![]).unwrap_err() {
            VectorError::InvalidDimension { expected, actual } => {
                assert_eq!(expected, 1);
                assert_eq!(actual, 0);
            }
            other => panic!("unexpected error type: {other}"),
        }
    }

    #[test]
    fn new_embedding_nan_fails() {
        match Embedding::new(vec![1.0, f32::NAN, 3.0]).unwrap_err() {
            VectorError::InvalidValue { index, reason, .. } => {
                assert_eq!(index, 1);
                assert!(reason.contains("NaN"));
            }
            other => panic!("unexpected error type: {other}"),
        }
    }

    #[test]
    fn parse_ignores_trailing_whitespace() {
        let embedding = Embedding::parse("hund", "0.5 1 -2 \r\n").unwrap();
        assert_eq!(embedding.as_slice(), &[0.5, 1.0, -2.0]);
    }

    #[test]
    fn parse_rejects_non_numeric_component() {
        match Embedding::parse("hund", "0.5 abc 1").unwrap_err() {
            VectorError::MalformedLine { word, index, .. } => {
                assert_eq!(word, "hund");
                assert_eq!(index, 1);
            }
            other => panic!("unexpected error type: {other}"),
        }
    }

    #[test]
    fn parse_rejects_doubled_separator() {
        let result = Embedding::parse("hund", "0.5  1");
        assert!(matches!(result, Err(VectorError::MalformedLine { index: 1, .. })));
    }

    #[test]
    fn parse_rejects_nan_component() {
        let result = Embedding::parse("hund", "0.5 NaN");
        assert!(matches!(result, Err(VectorError::MalformedLine { index: 1, .. })));
    }

    #[test]
    fn parse_without_components_fails() {
        let result = Embedding::parse("hund", "");
        assert!(matches!(result, Err(VectorError::InvalidDimension { .. })));
    }

    #[test]
    fn l2_norm() {
        let embedding = Embedding::new(vec![3.0, 4.0]).unwrap();
        assert!((embedding.l2_norm() - 5.0).abs() < 1e-12);
    }
}
