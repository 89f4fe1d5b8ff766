// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Tag-overlap matcher over custom catalogs

use embed_engine::{
    catalog::{Catalog, CatalogEntry},
    ranking::keyword_match,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_case_insensitive_substring_match() {
    let catalog = Catalog::new(vec![
        CatalogEntry::new("Vision", "Image models").with_tags(["Computer Vision"]),
        CatalogEntry::new("Speech", "Audio models").with_tags(["ASR"]),
    ]);

    let results = keyword_match(&strings(&["VISION"]), &[], &[], &catalog);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Vision");
    assert_eq!(results[0].match_score, 4);
    assert_eq!(results[0].relevant_skills, strings(&["VISION"]));
}

#[test]
fn test_ties_keep_catalog_order() {
    let catalog = Catalog::new(vec![
        CatalogEntry::new("First", "x").with_tags(["Rust"]),
        CatalogEntry::new("Second", "y").with_tags(["Rust"]),
    ]);

    let results = keyword_match(&strings(&["rust"]), &[], &[], &catalog);
    let titles: Vec<_> = results.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, ["First", "Second"]);
}

#[test]
fn test_each_publication_counts_once() {
    let catalog =
        Catalog::new(vec![CatalogEntry::new("Graphs", "x").with_tags(["Graph", "Network"])]);
    let titles = ["Graph network embeddings", "Unrelated"];

    let results = keyword_match(&[], &[], &titles, &catalog);
    assert_eq!(results[0].match_score, 2);
}
