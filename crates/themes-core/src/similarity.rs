//! Similarity measures used for redundancy.
//!
//! Cosine over theme vectors when embeddings are available, Jaccard over
//! supporting-entry sets otherwise.

use std::collections::BTreeSet;

/// Calculate cosine similarity between two vectors.
///
/// Returns value in [-1.0, 1.0] where 1.0 = identical direction.
/// Vectors of different dimension, or zero vectors, have similarity 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

/// Mean-pool embeddings and L2-normalize the result.
///
/// Returns an empty vector for empty input or mixed dimensions.
pub fn calculate_centroid(embeddings: &[&[f32]]) -> Vec<f32> {
    let Some(first) = embeddings.first() else {
        return Vec::new();
    };

    let dim = first.len();
    if embeddings.iter().any(|e| e.len() != dim) {
        return Vec::new();
    }

    let n = embeddings.len() as f32;
    let mut centroid = vec![0.0f32; dim];

    for embedding in embeddings {
        for (i, &val) in embedding.iter().enumerate() {
            centroid[i] += val;
        }
    }

    // Average
    for val in centroid.iter_mut() {
        *val /= n;
    }

    // Normalize
    normalize(&mut centroid);

    centroid
}

/// Normalize a vector to unit length in place.
pub fn normalize(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for val in v.iter_mut() {
            *val /= norm;
        }
    }
}

/// Jaccard similarity of two entry-index sets: `|A ∩ B| / |A ∪ B|`.
///
/// Two empty sets have similarity 0.
pub fn jaccard(a: &BTreeSet<usize>, b: &BTreeSet<usize>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity_identical() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        assert!(cosine_similarity(&a, &b).abs() < 0.001);
    }

    #[test]
    fn test_cosine_similarity_similar() {
        let a = vec![0.8, 0.6];
        let b = vec![0.6, 0.8];
        assert!(cosine_similarity(&a, &b) > 0.9);
    }

    #[test]
    fn test_cosine_similarity_zero_vector() {
        let a = vec![0.0, 0.0];
        let b = vec![1.0, 0.0];
        assert!(cosine_similarity(&a, &b).abs() < 0.001);
    }

    #[test]
    fn test_cosine_similarity_different_dimensions() {
        let a = vec![1.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_calculate_centroid() {
        let e1 = vec![1.0, 0.0, 0.0];
        let e2 = vec![0.0, 1.0, 0.0];
        let embeddings: Vec<&[f32]> = vec![&e1, &e2];
        let centroid = calculate_centroid(&embeddings);
        let expected = 1.0 / 2f32.sqrt();
        assert!((centroid[0] - expected).abs() < 0.001);
        assert!((centroid[1] - expected).abs() < 0.001);
        assert!(centroid[2].abs() < 0.001);
    }

    #[test]
    fn test_calculate_centroid_empty_and_mixed() {
        let embeddings: Vec<&[f32]> = vec![];
        assert!(calculate_centroid(&embeddings).is_empty());

        let e1 = vec![1.0, 0.0];
        let e2 = vec![1.0, 0.0, 0.0];
        let mixed: Vec<&[f32]> = vec![&e1, &e2];
        assert!(calculate_centroid(&mixed).is_empty());
    }

    #[test]
    fn test_calculate_centroid_single() {
        let e1 = vec![3.0, 4.0];
        let embeddings: Vec<&[f32]> = vec![&e1];
        let centroid = calculate_centroid(&embeddings);
        assert!((centroid[0] - 0.6).abs() < 0.001);
        assert!((centroid[1] - 0.8).abs() < 0.001);
    }

    #[test]
    fn test_normalize_zero_vector() {
        let mut v = vec![0.0, 0.0];
        normalize(&mut v);
        assert_eq!(v, vec![0.0, 0.0]);
    }

    #[test]
    fn test_jaccard() {
        let a = BTreeSet::from([0, 1, 2]);
        let b = BTreeSet::from([1, 2, 3]);
        assert!((jaccard(&a, &b) - 0.5).abs() < 1e-12);
        assert!((jaccard(&a, &a) - 1.0).abs() < 1e-12);
        assert_eq!(jaccard(&BTreeSet::new(), &BTreeSet::new()), 0.0);
        assert_eq!(jaccard(&a, &BTreeSet::from([7])), 0.0);
    }
}
