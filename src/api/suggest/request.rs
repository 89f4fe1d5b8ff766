// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! SuggestRequest type shared by both suggestion endpoints

use serde::{Deserialize, Serialize};

/// A publication listed on the user's profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    pub title: String,
}

/// Request body for `POST /suggest` and `POST /suggest/keywords`
///
/// All three fields are required; unknown fields are ignored.
///
/// # Example
/// ```json
/// {
///   "skills": ["Python", "PyTorch"],
///   "interests": ["NLP"],
///   "publications": [{"title": "Transformers for resume parsing"}]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestRequest {
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    pub publications: Vec<Publication>,
}

impl SuggestRequest {
    /// Skills, then interests, then publication titles, joined by single spaces
    pub fn query_text(&self) -> String {
        self.skills
            .iter()
            .chain(self.interests.iter())
            .map(String::as_str)
            .chain(self.publication_titles())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn publication_titles(&self) -> impl Iterator<Item = &str> {
        self.publications.iter().map(|p| p.title.as_str())
    }
}
