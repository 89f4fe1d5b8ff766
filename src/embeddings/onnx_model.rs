// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! ONNX Embedding Model Wrapper
//!
//! This module provides a wrapper around ONNX Runtime for running
//! sentence transformer models exported to ONNX (all-mpnet-base-v2 by
//! default, all-MiniLM-L6-v2 also works).
//!
//! Features:
//! - ONNX model loading from disk
//! - Optional CUDA acceleration (`cuda` feature) with automatic CPU fallback
//! - BERT/WordPiece tokenization with truncation to `max_length`
//! - Mean pooling over token embeddings weighted by the attention mask
//! - L2 normalization of the pooled vector
//! - Output dimension detected from the model at load time

use super::{l2_normalize, TextEmbedder};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use ndarray::{Array2, ArrayViewD, Axis};
use ort::execution_providers::CPUExecutionProvider;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::{Session, SessionInputValue};
use ort::value::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokenizers::{Tokenizer, TruncationParams};
use tracing::{debug, info};

/// ONNX-based sentence embedding model
///
/// # Thread Safety
/// The session needs exclusive access to run, so it sits behind a `Mutex`.
/// Everything else is immutable after construction.
#[derive(Clone)]
pub struct OnnxEmbeddingModel {
    /// ONNX Runtime session
    session: Arc<Mutex<Session>>,

    /// Tokenizer loaded from tokenizer.json, truncation enabled
    tokenizer: Arc<Tokenizer>,

    /// Model name (e.g., "all-mpnet-base-v2")
    model_name: String,

    /// Output dimension detected at load time
    dimension: usize,

    /// Maximum sequence length fed to the model
    max_length: usize,

    /// BERT exports take `token_type_ids`, MPNet exports don't
    uses_token_type_ids: bool,
}

impl std::fmt::Debug for OnnxEmbeddingModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxEmbeddingModel")
            .field("model_name", &self.model_name)
            .field("dimension", &self.dimension)
            .field("max_length", &self.max_length)
            .field("uses_token_type_ids", &self.uses_token_type_ids)
            .finish_non_exhaustive()
    }
}

impl OnnxEmbeddingModel {
    /// Creates a new ONNX embedding model from disk paths
    ///
    /// # Errors
    /// Returns error if:
    /// - Model file or tokenizer file not found or invalid
    /// - ONNX Runtime initialization fails
    /// - The validation inference does not produce `[batch, seq, hidden]`
    ///   or `[batch, hidden]` output
    ///
    /// # Example
    /// ```ignore
    /// let model = OnnxEmbeddingModel::new(
    ///     "all-mpnet-base-v2",
    ///     "./models/all-mpnet-base-v2-onnx/model.onnx",
    ///     "./models/all-mpnet-base-v2-onnx/tokenizer.json",
    ///     384,
    /// ).await?;
    /// ```
    pub async fn new<P: AsRef<Path>>(
        model_name: impl Into<String>,
        model_path: P,
        tokenizer_path: P,
        max_length: usize,
    ) -> Result<Self> {
        let model_name = model_name.into();
        let model_path = model_path.as_ref();
        let tokenizer_path = tokenizer_path.as_ref();

        if !model_path.exists() {
            anyhow::bail!("ONNX model file not found: {}", model_path.display());
        }
        if !tokenizer_path.exists() {
            anyhow::bail!("Tokenizer file not found: {}", tokenizer_path.display());
        }
        if max_length == 0 {
            anyhow::bail!("max_length must be greater than 0");
        }

        let mut session = build_session(model_path)?;

        let uses_token_type_ids = session
            .inputs
            .iter()
            .any(|input| input.name == "token_type_ids");

        let mut tokenizer = Tokenizer::from_file(tokenizer_path)
            .map_err(|e| anyhow!("Failed to load tokenizer: {}", e))?;
        tokenizer.with_padding(None);
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length,
                ..Default::default()
            }))
            .map_err(|e| anyhow!("Failed to configure truncation: {}", e))?;

        // Validation inference doubles as dimension detection
        let probe = run_pooled(&mut session, &tokenizer, "validation test", uses_token_type_ids)
            .context("Validation inference failed")?;
        let dimension = probe.len();
        if dimension == 0 {
            anyhow::bail!("Model produced an empty embedding during validation");
        }

        info!(
            model = %model_name,
            dimension,
            max_length,
            uses_token_type_ids,
            "ONNX embedding model loaded"
        );

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
            model_name,
            dimension,
            max_length,
            uses_token_type_ids,
        })
    }

    /// Generates a unit-normalized embedding for a single text
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut session = self
            .session
            .lock()
            .map_err(|_| anyhow!("ONNX session lock poisoned"))?;

        let mut embedding =
            run_pooled(&mut session, &self.tokenizer, text, self.uses_token_type_ids)?;
        drop(session);

        if embedding.len() != self.dimension {
            anyhow::bail!(
                "Unexpected embedding dimension: {} (expected {})",
                embedding.len(),
                self.dimension
            );
        }

        l2_normalize(&mut embedding);
        Ok(embedding)
    }

    /// Returns the output dimension of this model
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns the model name
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }
}

#[async_trait]
impl TextEmbedder for OnnxEmbeddingModel {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        OnnxEmbeddingModel::embed(self, text).await
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn name(&self) -> &str {
        &self.model_name
    }
}

#[cfg(feature = "cuda")]
fn build_session(model_path: &Path) -> Result<Session> {
    use ort::execution_providers::CUDAExecutionProvider;
    use tracing::warn;

    info!("Attempting CUDA execution provider");
    let cuda_result = Session::builder()
        .context("Failed to create session builder")?
        .with_execution_providers([CUDAExecutionProvider::default().build()])
        .context("Failed to set CUDA execution provider")?
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .context("Failed to set optimization level")?
        .with_intra_threads(4)
        .context("Failed to set intra threads")?
        .commit_from_file(model_path);

    match cuda_result {
        Ok(session) => {
            info!("CUDA execution provider initialized");
            Ok(session)
        }
        Err(e) => {
            warn!("CUDA execution provider failed: {}, falling back to CPU", e);
            build_cpu_session(model_path)
        }
    }
}

#[cfg(not(feature = "cuda"))]
fn build_session(model_path: &Path) -> Result<Session> {
    build_cpu_session(model_path)
}

fn build_cpu_session(model_path: &Path) -> Result<Session> {
    Session::builder()
        .context("Failed to create session builder")?
        .with_execution_providers([CPUExecutionProvider::default().build()])
        .context("Failed to set CPU execution provider")?
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .context("Failed to set optimization level")?
        .with_intra_threads(4)
        .context("Failed to set intra threads")?
        .commit_from_file(model_path)
        .with_context(|| format!("Failed to load ONNX model from {}", model_path.display()))
}

/// Tokenizes `text`, runs the session and mean-pools the token embeddings.
/// The result is not normalized.
fn run_pooled(
    session: &mut Session,
    tokenizer: &Tokenizer,
    text: &str,
    uses_token_type_ids: bool,
) -> Result<Vec<f32>> {
    let encoding = tokenizer
        .encode(text, true)
        .map_err(|e| anyhow!("Tokenization failed: {}", e))?;

    let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
    let attention_mask: Vec<i64> = encoding
        .get_attention_mask()
        .iter()
        .map(|&m| m as i64)
        .collect();
    let seq_len = input_ids.len();
    debug!(seq_len, "running embedding inference");

    let mask_for_pooling: Vec<f32> = attention_mask.iter().map(|&m| m as f32).collect();

    let input_ids_array = Array2::from_shape_vec((1, seq_len), input_ids)
        .context("Failed to create input_ids array")?;
    let attention_mask_array = Array2::from_shape_vec((1, seq_len), attention_mask)
        .context("Failed to create attention_mask array")?;

    let mut inputs: Vec<(&str, SessionInputValue<'_>)> = vec![
        ("input_ids", Value::from_array(input_ids_array)?.into()),
        ("attention_mask", Value::from_array(attention_mask_array)?.into()),
    ];
    if uses_token_type_ids {
        let token_type_ids_array = Array2::from_shape_vec((1, seq_len), vec![0i64; seq_len])
            .context("Failed to create token_type_ids array")?;
        inputs.push(("token_type_ids", Value::from_array(token_type_ids_array)?.into()));
    }

    let outputs = session.run(inputs)?;

    // Index [0] rather than by name; exports disagree on output names
    let output = outputs[0]
        .try_extract_array::<f32>()
        .context("Failed to extract output tensor")?;
    pool_output(output, &mask_for_pooling)
}

/// Reduces a `[batch, hidden]` or `[batch, seq_len, hidden]` output to the
/// first batch entry's sentence vector, mean pooling token rows by `attention_mask`.
fn pool_output(output: ArrayViewD<'_, f32>, attention_mask: &[f32]) -> Result<Vec<f32>> {
    if output.ndim() == 0 || output.shape()[0] == 0 {
        anyhow::bail!(
            "Model returned no batch entries: output shape {:?}",
            output.shape()
        );
    }
    let batch_0 = output.index_axis(Axis(0), 0);

    match batch_0.ndim() {
        // Already pooled: [hidden]
        1 => Ok(batch_0.iter().copied().collect()),
        // Token-level: [seq_len, hidden]
        2 => {
            let rows = batch_0.shape()[0].min(attention_mask.len());
            let hidden_dim = batch_0.shape()[1];

            let mut pooled = vec![0.0f32; hidden_dim];
            let mut sum_mask = 0.0f32;

            for i in 0..rows {
                let mask_value = attention_mask[i];
                sum_mask += mask_value;
                for (j, slot) in pooled.iter_mut().enumerate() {
                    *slot += batch_0[[i, j]] * mask_value;
                }
            }

            for val in &mut pooled {
                *val /= sum_mask.max(1e-9);
            }

            Ok(pooled)
        }
        _ => anyhow::bail!(
            "Model outputs unexpected dimensions: {:?} (expected [batch, seq_len, hidden] or [batch, hidden])",
            output.shape()
        ),
    }
}
