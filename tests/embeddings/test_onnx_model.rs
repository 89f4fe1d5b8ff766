// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! ONNX model tests for embedding generation
//!
//! Require the exported model files; run with `cargo test -- --ignored`
//! after downloading all-mpnet-base-v2 to ./models/all-mpnet-base-v2-onnx/.

use embed_engine::{
    catalog::{Catalog, CatalogEntry},
    embeddings::{cosine_similarity, OnnxEmbeddingModel},
    ranking::ProjectRanker,
};
use std::sync::Arc;

const MODEL_PATH: &str = "./models/all-mpnet-base-v2-onnx/model.onnx";
const TOKENIZER_PATH: &str = "./models/all-mpnet-base-v2-onnx/tokenizer.json";

async fn load_model() -> OnnxEmbeddingModel {
    OnnxEmbeddingModel::new("all-mpnet-base-v2", MODEL_PATH, TOKENIZER_PATH, 384)
        .await
        .expect("Failed to load model")
}

#[tokio::test]
#[ignore] // Only run if model files are downloaded
async fn test_model_loads_with_detected_dimension() {
    let model = load_model().await;
    assert_eq!(model.model_name(), "all-mpnet-base-v2");
    assert_eq!(model.dimension(), 768);
}

#[tokio::test]
#[ignore] // Only run if model files are downloaded
async fn test_embedding_is_unit_length() {
    let model = load_model().await;
    let embedding = model.embed("Graph neural networks for citation analysis").await.unwrap();

    assert_eq!(embedding.len(), model.dimension());
    assert!(embedding.iter().all(|v| v.is_finite()));
    let magnitude = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((magnitude - 1.0).abs() < 1e-4, "magnitude {}", magnitude);
}

#[tokio::test]
#[ignore] // Only run if model files are downloaded
async fn test_empty_text_embeds() {
    let model = load_model().await;
    let embedding = model.embed("").await.unwrap();
    assert_eq!(embedding.len(), model.dimension());
}

#[tokio::test]
#[ignore] // Only run if model files are downloaded
async fn test_embedding_deterministic() {
    let model = load_model().await;
    let a = model.embed("machine learning").await.unwrap();
    let b = model.embed("machine learning").await.unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
#[ignore] // Only run if model files are downloaded
async fn test_semantic_ranking_example() {
    let model = load_model().await;
    let query = model.embed("machine learning expert").await.unwrap();
    let a = model.embed("A machine learning").await.unwrap();
    let b = model.embed("B gardening tips").await.unwrap();
    assert!(cosine_similarity(&query, &a) > cosine_similarity(&query, &b));

    let ranker = ProjectRanker::new(
        Arc::new(model),
        Catalog::new(vec![
            CatalogEntry::new("A", "machine learning"),
            CatalogEntry::new("B", "gardening tips"),
        ]),
    );
    let results = ranker.rank("machine learning expert").await.unwrap();
    assert_eq!(results[0].title, "A");
    assert!(results[0].score > results[1].score);
}
