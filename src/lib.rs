// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod catalog;
pub mod config;
pub mod embeddings;
pub mod ranking;
pub mod version;

pub use api::{create_app, AppState};
pub use catalog::{Catalog, CatalogEntry};
pub use config::{EmbedderKind, EngineConfig};
pub use embeddings::{HashingEmbedder, OnnxEmbeddingModel, TextEmbedder};
pub use ranking::{ProjectRanker, ScoredProject, TOP_K};
