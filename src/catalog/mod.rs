// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Project catalog
//!
//! The catalog is fixed at startup and read-only afterwards. It defaults to
//! the compiled-in project list and can be replaced by a JSON file
//! (`[{"title": ..., "description": ..., "tags": [...]}]`).

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse catalog file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("Catalog entry {index} has an empty title")]
    EmptyTitle { index: usize },
}

/// One project record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl CatalogEntry {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            tags: None,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Text embedded for this entry: title and description joined by a space
    pub fn embedding_text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }

    /// Tags, or an empty slice when the entry has none
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }
}

/// Immutable, cheaply clonable list of entries in catalog order
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Arc<[CatalogEntry]>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    /// The compiled-in project list
    pub fn builtin() -> Self {
        Self::new(vec![
            CatalogEntry::new(
                "AI-Powered Resume Ranker",
                "Build a tool that ranks resumes using NLP and transformer models.",
            )
            .with_tags(["Python", "NLP", "LLM", "ATS", "Resume"]),
            CatalogEntry::new(
                "Scholar Citation Visualizer",
                "Visualize citation trends over time using Google Scholar data.",
            )
            .with_tags(["Data Visualization", "Google Scholar", "D3.js", "React"]),
            CatalogEntry::new(
                "Real-Time Threat Detection System",
                "Use deep learning to detect anomalies in network traffic.",
            )
            .with_tags([
                "Cybersecurity",
                "Python",
                "Deep Learning",
                "IDS",
                "Anomaly Detection",
            ]),
            CatalogEntry::new(
                "Academic Paper Recommender",
                "Recommend research papers using user interests and citation graphs.",
            )
            .with_tags(["NLP", "Recommendation", "Graph", "Machine Learning"]),
            CatalogEntry::new(
                "Interactive Learning Path Generator",
                "Suggest personalized study paths using resume and publications.",
            )
            .with_tags(["React", "Recommendation", "LLM", "NLP", "AI"]),
        ])
    }

    /// Loads a catalog from a JSON array of entries
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path_str.clone(),
            source,
        })?;
        let entries: Vec<CatalogEntry> =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
                path: path_str.clone(),
                source,
            })?;

        if let Some(index) = entries.iter().position(|e| e.title.trim().is_empty()) {
            return Err(CatalogError::EmptyTitle { index });
        }

        info!(path = %path_str, entries = entries.len(), "Loaded catalog from file");
        Ok(Self::new(entries))
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
