use serde::{Deserialize, Serialize};

/// Label classifying a transaction as a particular kind of income or expense.
///
/// Categories are never deleted by any in-scope operation, so referential
/// integrity with transactions is not enforced; a dangling reference resolves
/// to [`Category::unknown`] at query time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
    pub color: String,
}

impl Category {
    /// Placeholder returned for transactions whose category no longer exists.
    pub fn unknown() -> Self {
        Self {
            id: 0,
            name: "Unknown".into(),
            kind: CategoryKind::Expense,
            color: "#6c757d".into(),
        }
    }
}

/// Supported category types.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    Expense,
}

/// Plain data payload for creating a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryInput {
    pub name: String,
    pub kind: CategoryKind,
    pub color: String,
}

impl CategoryInput {
    pub fn new(name: impl Into<String>, kind: CategoryKind, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            color: color.into(),
        }
    }
}
