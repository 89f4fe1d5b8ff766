// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Project ranking
//!
//! [`ProjectRanker`] scores every catalog entry against a query text by
//! embedding cosine similarity and keeps the best [`TOP_K`].
//! [`keyword`] holds the tag-overlap matcher behind `/suggest/keywords`.

pub mod keyword;

pub use keyword::{keyword_match, KeywordSuggestion};

use crate::catalog::{Catalog, CatalogEntry};
use crate::embeddings::{cosine_similarity, TextEmbedder};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Number of projects returned per query
pub const TOP_K: usize = 5;

/// A ranked project as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredProject {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    /// Cosine similarity × 100, rounded to 2 decimals, within [0, 100]
    pub score: f64,
}

impl ScoredProject {
    fn from_entry(entry: &CatalogEntry, similarity: f32) -> Self {
        Self {
            title: entry.title.clone(),
            description: entry.description.clone(),
            tags: entry.tags().to_vec(),
            score: similarity_to_score(similarity),
        }
    }
}

/// Maps a cosine similarity to a percentage with 2 decimals.
///
/// Negative and non-finite similarities score 0.
pub fn similarity_to_score(similarity: f32) -> f64 {
    if !similarity.is_finite() {
        return 0.0;
    }
    let percent = (f64::from(similarity) * 100.0 * 100.0).round() / 100.0;
    // + 0.0 turns a rounded -0.0 into 0.0
    percent.clamp(0.0, 100.0) + 0.0
}

/// Ranks the catalog against free-text queries
///
/// Catalog entries are re-embedded on every call.
#[derive(Clone)]
pub struct ProjectRanker {
    embedder: Arc<dyn TextEmbedder>,
    catalog: Catalog,
}

impl std::fmt::Debug for ProjectRanker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectRanker")
            .field("embedder", &self.embedder.name())
            .field("catalog_size", &self.catalog.len())
            .finish()
    }
}

impl ProjectRanker {
    pub fn new(embedder: Arc<dyn TextEmbedder>, catalog: Catalog) -> Self {
        Self { embedder, catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn embedder(&self) -> &Arc<dyn TextEmbedder> {
        &self.embedder
    }

    /// Returns the top [`TOP_K`] entries for `query`, best first
    ///
    /// Ties keep catalog order. An empty catalog yields an empty list.
    pub async fn rank(&self, query: &str) -> Result<Vec<ScoredProject>> {
        self.rank_top(query, TOP_K).await
    }

    /// Same as [`rank`](Self::rank) with an explicit cutoff
    pub async fn rank_top(&self, query: &str, limit: usize) -> Result<Vec<ScoredProject>> {
        if self.catalog.is_empty() {
            return Ok(Vec::new());
        }

        let query_vector = self
            .embedder
            .embed(query)
            .await
            .context("Failed to embed query")?;

        let mut scored: Vec<(f32, &CatalogEntry)> = Vec::with_capacity(self.catalog.len());
        for entry in self.catalog.entries() {
            let entry_vector = self
                .embedder
                .embed(&entry.embedding_text())
                .await
                .with_context(|| format!("Failed to embed catalog entry '{}'", entry.title))?;
            scored.push((cosine_similarity(&query_vector, &entry_vector), entry));
        }

        sort_descending(&mut scored);
        scored.truncate(limit);

        debug!(
            query_len = query.len(),
            catalog_size = self.catalog.len(),
            returned = scored.len(),
            "ranked catalog"
        );

        Ok(scored
            .into_iter()
            .map(|(similarity, entry)| ScoredProject::from_entry(entry, similarity))
            .collect())
    }
}

/// Best first; sort_by is stable, so equal similarities keep input order
fn sort_descending<T>(scored: &mut [(f32, T)]) {
    scored.sort_by(|a, b| sanitize(b.0).total_cmp(&sanitize(a.0)));
}

/// Non-finite values and -0.0 compare as 0.0
fn sanitize(similarity: f32) -> f32 {
    if similarity.is_finite() && similarity != 0.0 {
        similarity
    } else {
        0.0
    }
}
