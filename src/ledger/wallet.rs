use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named store of funds with a running balance.
///
/// The balance recorded at creation time is the wallet's initial balance;
/// every transaction mutation afterwards moves it by the transaction's signed
/// amount. Balances may go negative through ordinary expenses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: WalletKind,
    pub balance: f64,
    pub color: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Supported wallet types.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WalletKind {
    Cash,
    Bank,
    Digital,
    Savings,
    Other,
}

/// Plain data payload for creating or editing a wallet.
#[derive(Debug, Clone, PartialEq)]
pub struct WalletInput {
    pub name: String,
    pub kind: WalletKind,
    pub balance: f64,
    pub color: String,
}

impl WalletInput {
    pub fn new(name: impl Into<String>, kind: WalletKind, balance: f64) -> Self {
        Self {
            name: name.into(),
            kind,
            balance,
            color: "#4a6bff".into(),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

/// Result of a cascading wallet deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalletRemoval {
    pub wallet_id: u64,
    pub transactions_removed: usize,
}
