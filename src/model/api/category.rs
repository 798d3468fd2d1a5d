use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::common::CategoryId;

/// Every category, keyed by ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryList {
    pub categories: BTreeMap<CategoryId, String>,
}
