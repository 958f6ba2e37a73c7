//! Result projection
//!
//! Maps matched entities into the uniform record shape the API returns.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;

/// Character budget for the description excerpt; the cut is not word-aware
pub const DESCRIPTION_LIMIT: usize = 100;

/// Uniform projection of a matched entity
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResultRecord {
    pub id: u64,
    /// Entity type key, e.g. "blog.post"
    pub content_type: String,
    pub title: String,
    pub description: String,
    pub url: Option<String>,
}

impl ResultRecord {
    /// Project one matched entity
    pub fn project(entity: &Entity, type_key: &str) -> Self {
        let description = entity
            .value("description")
            .and_then(|v| v.as_text())
            .map(|s| truncate_chars(s, DESCRIPTION_LIMIT))
            .unwrap_or_default();

        Self {
            id: entity.id,
            content_type: type_key.to_string(),
            title: entity.title.clone(),
            description,
            url: entity.url.clone(),
        }
    }
}

fn truncate_chars(s: &str, limit: usize) -> String {
    s.chars().take(limit).collect()
}
