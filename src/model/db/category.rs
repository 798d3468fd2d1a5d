use std::collections::{BTreeMap, BTreeSet};

use mongodb::{bson::doc, options::FindOptions};
use rocket::futures::TryStreamExt;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{common::CategoryId, mongodb::Coll};

/// Pseudo-category standing for every category at once.
pub const ALL_CATEGORIES: CategoryId = 0;

/// A question category from the database. Categories are seeded externally
/// and never modified by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: CategoryId,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Map every category ID to its display name, in ID order.
pub async fn category_map(categories: &Coll<Category>) -> Result<BTreeMap<CategoryId, String>> {
    let by_id = FindOptions::builder().sort(doc! {"_id": 1}).build();
    let map = categories
        .find(None, by_id)
        .await?
        .map_ok(|category| (category.id, category.kind))
        .try_collect()
        .await?;
    Ok(map)
}

/// The category IDs a request may name: every stored category plus [`ALL_CATEGORIES`].
pub async fn allowed_category_ids(categories: &Coll<Category>) -> Result<BTreeSet<CategoryId>> {
    let mut allowed: BTreeSet<CategoryId> = categories
        .find(None, None)
        .await?
        .map_ok(|category| category.id)
        .try_collect()
        .await?;
    allowed.insert(ALL_CATEGORIES);
    Ok(allowed)
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl Category {
        pub fn examples() -> Vec<Self> {
            ["Science", "Art", "Geography", "History", "Entertainment", "Sports"]
                .into_iter()
                .zip(1..)
                .map(|(kind, id)| Self {
                    id,
                    kind: kind.to_string(),
                })
                .collect()
        }
    }
}
