//! Ledger domain: record types, filters, and the storage-backed store that
//! ties them together.

pub mod budget;
pub mod category;
pub mod filter;
pub mod store;
pub mod transaction;
pub mod wallet;

pub use budget::{Budget, BudgetInput, BudgetLevel, BudgetSaved, BudgetStatus};
pub use category::{Category, CategoryInput, CategoryKind};
pub use filter::{DateRange, Period, TransactionFilter};
pub use store::{CategoryExpense, LedgerStore, MonthTotals, Transfer};
pub use transaction::{Transaction, TransactionInput, TransactionKind};
pub use wallet::{Wallet, WalletInput, WalletKind, WalletRemoval};
