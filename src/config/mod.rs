use serde::{Deserialize, Serialize};

/// UI theme preference. The rendering layer owns its meaning; the store only
/// persists it under the `theme` key next to the ledger collections.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Tunable strictness of the store's validation rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StorePolicy {
    /// When set, a transaction's kind must match its category's kind.
    ///
    /// The original application never enforced this, so the default keeps the
    /// permissive behavior; turning it on makes create/update fail validation
    /// on a mismatch.
    pub strict_category_kinds: bool,
}

impl StorePolicy {
    pub fn strict() -> Self {
        Self {
            strict_category_kinds: true,
        }
    }
}
