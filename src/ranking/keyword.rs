// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Tag-overlap matcher
//!
//! Scores each catalog entry by case-insensitive substring hits between the
//! profile and the entry's tags:
//! - skill contained in a tag: 4 points
//! - interest contained in a tag: 3 points
//! - tag contained in a publication title: 2 points

use crate::catalog::{Catalog, CatalogEntry};
use serde::{Deserialize, Serialize};

const SKILL_WEIGHT: u32 = 4;
const INTEREST_WEIGHT: u32 = 3;
const PUBLICATION_WEIGHT: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordSuggestion {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub match_score: u32,
    /// Skills that matched at least one tag
    pub relevant_skills: Vec<String>,
    /// Interests that matched at least one tag
    pub research_areas: Vec<String>,
}

/// Entries with at least one hit, best first, ties in catalog order
pub fn keyword_match(
    skills: &[String],
    interests: &[String],
    publication_titles: &[&str],
    catalog: &Catalog,
) -> Vec<KeywordSuggestion> {
    let mut suggestions: Vec<KeywordSuggestion> = catalog
        .entries()
        .iter()
        .map(|entry| score_entry(skills, interests, publication_titles, entry))
        .filter(|s| s.match_score > 0)
        .collect();

    suggestions.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    suggestions
}

fn score_entry(
    skills: &[String],
    interests: &[String],
    publication_titles: &[&str],
    entry: &CatalogEntry,
) -> KeywordSuggestion {
    let tags: Vec<String> = entry.tags().iter().map(|t| t.to_lowercase()).collect();

    let in_some_tag = |term: &str| {
        let term = term.to_lowercase();
        tags.iter().any(|tag| tag.contains(&term))
    };

    let relevant_skills: Vec<String> = skills
        .iter()
        .filter(|s| in_some_tag(s.as_str()))
        .cloned()
        .collect();
    let research_areas: Vec<String> = interests
        .iter()
        .filter(|i| in_some_tag(i.as_str()))
        .cloned()
        .collect();
    let publication_hits = publication_titles
        .iter()
        .filter(|title| {
            let title = title.to_lowercase();
            tags.iter().any(|tag| title.contains(tag.as_str()))
        })
        .count() as u32;

    let match_score = relevant_skills.len() as u32 * SKILL_WEIGHT
        + research_areas.len() as u32 * INTEREST_WEIGHT
        + publication_hits * PUBLICATION_WEIGHT;

    KeywordSuggestion {
        title: entry.title.clone(),
        description: entry.description.clone(),
        tags: entry.tags().to_vec(),
        match_score,
        relevant_skills,
        research_areas,
    }
}
