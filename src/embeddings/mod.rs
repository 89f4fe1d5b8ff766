// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Text embedding backends
//!
//! Every backend maps a text to a unit-length `Vec<f32>`, so cosine
//! similarity between two outputs is their dot product.
//!
//! Backends:
//! - [`OnnxEmbeddingModel`]: sentence transformer (all-mpnet-base-v2 by default)
//! - [`HashingEmbedder`]: deterministic feature hashing, no model files needed

pub mod hashing;
pub mod onnx_model;

pub use hashing::HashingEmbedder;
pub use onnx_model::OnnxEmbeddingModel;

use anyhow::Result;
use async_trait::async_trait;

/// A text embedder shared across requests
///
/// Implementations are loaded once at startup and never mutated afterwards.
#[async_trait]
pub trait TextEmbedder: Send + Sync {
    /// Embeds `text` into a unit-normalized vector of [`dimension`](Self::dimension) floats.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Output dimension
    fn dimension(&self) -> usize;

    /// Name reported by `/health`
    fn name(&self) -> &str;
}

/// Scales `vector` to unit length in place. Zero vectors are left untouched.
pub fn l2_normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for value in vector.iter_mut() {
            *value /= norm;
        }
    }
}

/// Cosine similarity in [-1, 1]
///
/// Returns 0.0 for mismatched dimensions or zero-norm inputs.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        tracing::warn!(
            a_len = a.len(),
            b_len = b.len(),
            "embedding dimension mismatch; returning zero similarity"
        );
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}
