use serde::{Deserialize, Serialize};

/// Product grouping. Categories are part of the seeded catalog and are not
/// managed through the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}
