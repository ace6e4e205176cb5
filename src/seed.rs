//! First-run sample dataset.
//!
//! When a storage key is absent on open, the store bootstraps it from this
//! fixed dataset so a fresh installation has something to show. Replacing the
//! seed with empty collections (via [`crate::ledger::LedgerStore::open_empty`])
//! loses nothing: the seed is a bootstrap concern, not part of the ledger
//! algorithms.

use chrono::Datelike;

use crate::clock::Clock;
use crate::ledger::{
    Budget, Category, CategoryKind, Transaction, TransactionKind, Wallet, WalletKind,
};

/// Default records for the four collections. Counter seeds are the collection
/// lengths, matching the highest assigned id.
#[derive(Debug, Clone)]
pub struct SeedData {
    pub wallets: Vec<Wallet>,
    pub categories: Vec<Category>,
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
}

/// Builds the sample dataset relative to the clock's current month: a few
/// wallets, the stock category set, a month of activity, and budgets for the
/// heavier expense categories.
pub fn default_dataset(clock: &dyn Clock) -> SeedData {
    let now = clock.now();
    let today = clock.today();
    let (year, month) = (today.year(), today.month());
    // Seed days stay at or below 20, valid in every month.
    let on = |day: u32| today.with_day(day).unwrap_or(today);

    let wallet = |id: u64, name: &str, kind: WalletKind, balance: f64, color: &str| Wallet {
        id,
        name: name.into(),
        kind,
        balance,
        color: color.into(),
        created_at: now,
        updated_at: None,
    };
    let category = |id: u64, name: &str, kind: CategoryKind, color: &str| Category {
        id,
        name: name.into(),
        kind,
        color: color.into(),
    };
    let transaction = |id: u64,
                       description: &str,
                       amount: f64,
                       kind: TransactionKind,
                       category_id: u64,
                       wallet_id: u64,
                       day: u32,
                       notes: &str| Transaction {
        id,
        description: description.into(),
        amount,
        kind,
        category_id,
        wallet_id,
        date: on(day),
        notes: (!notes.is_empty()).then(|| notes.into()),
        created_at: now,
        updated_at: None,
    };
    let budget = |id: u64, category_id: u64, amount: f64| Budget {
        id,
        category_id,
        amount,
        month,
        year,
        created_at: now,
        updated_at: None,
    };

    let wallets = vec![
        wallet(1, "Main Wallet", WalletKind::Cash, 5_000_000.0, "#4a6bff"),
        wallet(2, "Bank Account", WalletKind::Bank, 15_000_000.0, "#28a745"),
        wallet(3, "E-Wallet", WalletKind::Digital, 2_500_000.0, "#6f42c1"),
    ];

    let categories = vec![
        category(1, "Salary", CategoryKind::Income, "#28a745"),
        category(2, "Investments", CategoryKind::Income, "#20c997"),
        category(3, "Gifts", CategoryKind::Income, "#17a2b8"),
        category(4, "Food & Drinks", CategoryKind::Expense, "#dc3545"),
        category(5, "Transport", CategoryKind::Expense, "#fd7e14"),
        category(6, "Shopping", CategoryKind::Expense, "#e83e8c"),
        category(7, "Entertainment", CategoryKind::Expense, "#6f42c1"),
        category(8, "Health", CategoryKind::Expense, "#20c997"),
        category(9, "Education", CategoryKind::Expense, "#17a2b8"),
        category(10, "Bills", CategoryKind::Expense, "#6c757d"),
    ];

    let transactions = vec![
        transaction(
            1,
            "Monthly salary",
            7_500_000.0,
            TransactionKind::Income,
            1,
            2,
            5,
            "Salary from employer",
        ),
        transaction(
            2,
            "Monthly groceries",
            1_200_000.0,
            TransactionKind::Expense,
            4,
            1,
            10,
            "Household essentials",
        ),
        transaction(
            3,
            "Fuel",
            50_000.0,
            TransactionKind::Expense,
            5,
            1,
            12,
            "",
        ),
        transaction(
            4,
            "Electricity bill",
            450_000.0,
            TransactionKind::Expense,
            10,
            2,
            15,
            "This month's bill",
        ),
        transaction(
            5,
            "Cinema night",
            120_000.0,
            TransactionKind::Expense,
            7,
            3,
            18,
            "",
        ),
        transaction(
            6,
            "Stock dividend",
            350_000.0,
            TransactionKind::Income,
            2,
            2,
            20,
            "",
        ),
    ];

    let budgets = vec![
        budget(1, 4, 1_500_000.0),
        budget(2, 5, 500_000.0),
        budget(3, 7, 300_000.0),
    ];

    SeedData {
        wallets,
        categories,
        transactions,
        budgets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::NaiveDate;

    #[test]
    fn seed_ids_are_dense_from_one() {
        let clock = FixedClock::on(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        let seed = default_dataset(&clock);
        for (index, wallet) in seed.wallets.iter().enumerate() {
            assert_eq!(wallet.id, index as u64 + 1);
        }
        for (index, transaction) in seed.transactions.iter().enumerate() {
            assert_eq!(transaction.id, index as u64 + 1);
        }
    }

    #[test]
    fn seed_activity_lands_in_the_current_month() {
        let clock = FixedClock::on(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        let seed = default_dataset(&clock);
        for transaction in &seed.transactions {
            assert_eq!(transaction.date.month(), 2);
            assert_eq!(transaction.date.year(), 2024);
        }
        for budget in &seed.budgets {
            assert_eq!((budget.month, budget.year), (2, 2024));
        }
    }

    #[test]
    fn seed_references_resolve() {
        let clock = FixedClock::on(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        let seed = default_dataset(&clock);
        for transaction in &seed.transactions {
            assert!(seed.wallets.iter().any(|w| w.id == transaction.wallet_id));
            assert!(seed
                .categories
                .iter()
                .any(|c| c.id == transaction.category_id));
        }
        for budget in &seed.budgets {
            let category = seed
                .categories
                .iter()
                .find(|c| c.id == budget.category_id)
                .expect("budget category exists");
            assert_eq!(category.kind, CategoryKind::Expense);
        }
    }
}
