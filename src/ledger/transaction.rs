use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single dated movement of funds into or out of a wallet.
///
/// `amount` is always positive; direction is carried by `kind`, not sign.
/// Time of day is not significant, so the occurrence date is a calendar date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: u64,
    pub description: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category_id: u64,
    pub wallet_id: u64,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// Plain data payload for creating or editing a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionInput {
    pub description: String,
    pub amount: f64,
    pub kind: TransactionKind,
    pub category_id: u64,
    pub wallet_id: u64,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

impl TransactionInput {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        kind: TransactionKind,
        category_id: u64,
        wallet_id: u64,
        date: NaiveDate,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            kind,
            category_id,
            wallet_id,
            date,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Moves a wallet balance by the transaction's effect: income adds the
/// amount, expense subtracts it.
pub fn apply_effect(balance: f64, kind: TransactionKind, amount: f64) -> f64 {
    match kind {
        TransactionKind::Income => balance + amount,
        TransactionKind::Expense => balance - amount,
    }
}

/// Undoes [`apply_effect`]. Composing the two explicitly is what makes the
/// reversal-then-apply update path correct when wallet, kind, and amount all
/// change at once.
pub fn reverse_effect(balance: f64, kind: TransactionKind, amount: f64) -> f64 {
    match kind {
        TransactionKind::Income => balance - amount,
        TransactionKind::Expense => balance + amount,
    }
}
