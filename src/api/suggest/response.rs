// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Response bodies for the suggestion endpoints

use crate::ranking::{KeywordSuggestion, ScoredProject};
use serde::{Deserialize, Serialize};

/// Response body for `POST /suggest`
///
/// # Example
/// ```json
/// {
///   "projects": [
///     {
///       "title": "AI-Powered Resume Ranker",
///       "description": "Build a tool that ranks resumes using NLP and transformer models.",
///       "tags": ["Python", "NLP", "LLM", "ATS", "Resume"],
///       "score": 61.27
///     }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestResponse {
    pub projects: Vec<ScoredProject>,
}

/// Response body for `POST /suggest/keywords`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordSuggestResponse {
    pub projects: Vec<KeywordSuggestion>,
}
