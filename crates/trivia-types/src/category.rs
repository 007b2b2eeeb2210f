//! Category types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type CategoryId = i64;

/// A question category. Created at seed time and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Category {
    pub fn new(id: CategoryId, kind: impl Into<String>) -> Self {
        Self {
            id,
            kind: kind.into(),
        }
    }
}

/// Category id -> display name, as bundled with every question listing
pub type CategoryMap = BTreeMap<CategoryId, String>;

/// Build the id -> name map clients use to label questions
pub fn category_map(categories: &[Category]) -> CategoryMap {
    categories
        .iter()
        .map(|c| (c.id, c.kind.clone()))
        .collect()
}
