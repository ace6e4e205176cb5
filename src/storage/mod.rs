pub mod json_backend;
pub mod memory;

use crate::errors::Result;

/// Storage keys of the persisted state layout. Collections are JSON arrays,
/// counters are JSON integers, the theme is a JSON string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Wallets,
    Categories,
    Transactions,
    Budgets,
    Theme,
    LastTransactionId,
    LastWalletId,
    LastBudgetId,
}

impl StorageKey {
    pub fn as_str(self) -> &'static str {
        match self {
            StorageKey::Wallets => "wallets",
            StorageKey::Categories => "categories",
            StorageKey::Transactions => "transactions",
            StorageKey::Budgets => "budgets",
            StorageKey::Theme => "theme",
            StorageKey::LastTransactionId => "lastTransactionId",
            StorageKey::LastWalletId => "lastWalletId",
            StorageKey::LastBudgetId => "lastBudgetId",
        }
    }
}

/// Abstraction over the synchronous key-value stores the ledger persists to
/// (browser local storage in the original setting, files or memory here).
///
/// `commit` receives every key touched by one logical mutation so a backend
/// can write them as a batch; the store never issues partial commits after a
/// failed validation.
pub trait StorageBackend {
    fn read(&self, key: StorageKey) -> Result<Option<String>>;
    fn commit(&mut self, entries: &[(StorageKey, String)]) -> Result<()>;
}

pub use json_backend::JsonFileBackend;
pub use memory::MemoryBackend;
