use std::mem;

use chrono::{Datelike, NaiveDate};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::{StorePolicy, Theme};
use crate::errors::{Entity, LedgerError, Result};
use crate::seed::{self, SeedData};
use crate::storage::{StorageBackend, StorageKey};

use super::budget::{Budget, BudgetInput, BudgetLevel, BudgetSaved, BudgetStatus};
use super::category::{Category, CategoryInput, CategoryKind};
use super::filter::TransactionFilter;
use super::transaction::{
    apply_effect, reverse_effect, Transaction, TransactionInput, TransactionKind,
};
use super::wallet::{Wallet, WalletInput, WalletRemoval};

const TRANSFER_CATEGORY_NAME: &str = "Transfer";
const TRANSFER_CATEGORY_COLOR: &str = "#6c757d";

/// The two transaction records created by a wallet-to-wallet transfer.
#[derive(Debug, Clone, PartialEq)]
pub struct Transfer {
    pub outgoing: Transaction,
    pub incoming: Transaction,
}

/// Income and expense sums for one calendar month.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MonthTotals {
    pub income: f64,
    pub expense: f64,
}

impl MonthTotals {
    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}

/// One expense category's spending total.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryExpense {
    pub category_id: u64,
    pub name: String,
    pub color: String,
    pub total: f64,
}

/// Entity kinds that draw ids from a persisted counter. Categories are not
/// among them: the storage layout carries no category counter, so new
/// categories take `max(id) + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CounterKind {
    Transaction,
    Wallet,
    Budget,
}

#[derive(Debug, Default, Clone, Copy)]
struct IdCounters {
    transaction: u64,
    wallet: u64,
    budget: u64,
}

impl IdCounters {
    fn next(&mut self, kind: CounterKind) -> u64 {
        let slot = match kind {
            CounterKind::Transaction => &mut self.transaction,
            CounterKind::Wallet => &mut self.wallet,
            CounterKind::Budget => &mut self.budget,
        };
        *slot += 1;
        *slot
    }
}

/// Owns the four record collections and enforces the bookkeeping invariant:
/// a wallet's stored balance equals its initial balance plus the signed sum
/// of all transactions referencing it, maintained incrementally via the delta
/// of each mutation rather than by replaying history.
///
/// Every mutation validates first, then updates in-memory state, then commits
/// all touched storage keys as one batch, so a failed validation never leaves
/// a partial write behind. Execution is single-threaded and synchronous.
pub struct LedgerStore<B: StorageBackend> {
    backend: B,
    clock: Box<dyn Clock>,
    policy: StorePolicy,
    wallets: Vec<Wallet>,
    categories: Vec<Category>,
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
    theme: Theme,
    counters: IdCounters,
}

impl<B: StorageBackend> LedgerStore<B> {
    /// Opens a store over the backend, seeding any absent key with the
    /// default dataset on first run.
    pub fn open(backend: B) -> Result<Self> {
        Self::open_with(backend, SystemClock, StorePolicy::default())
    }

    pub fn open_with(backend: B, clock: impl Clock + 'static, policy: StorePolicy) -> Result<Self> {
        let dataset = seed::default_dataset(&clock);
        Self::boot(backend, Box::new(clock), policy, Some(dataset))
    }

    /// Opens a store that starts empty instead of seeding sample data.
    pub fn open_empty(backend: B) -> Result<Self> {
        Self::open_empty_with(backend, SystemClock, StorePolicy::default())
    }

    pub fn open_empty_with(
        backend: B,
        clock: impl Clock + 'static,
        policy: StorePolicy,
    ) -> Result<Self> {
        Self::boot(backend, Box::new(clock), policy, None)
    }

    fn boot(
        backend: B,
        clock: Box<dyn Clock>,
        policy: StorePolicy,
        seed: Option<SeedData>,
    ) -> Result<Self> {
        let mut seed = seed;
        let mut dirty: Vec<StorageKey> = Vec::new();

        let wallets = match read_collection::<Wallet, B>(&backend, StorageKey::Wallets)? {
            Some(rows) => rows,
            None => {
                dirty.push(StorageKey::Wallets);
                seed.as_mut()
                    .map(|data| mem::take(&mut data.wallets))
                    .unwrap_or_default()
            }
        };
        let categories = match read_collection::<Category, B>(&backend, StorageKey::Categories)? {
            Some(rows) => rows,
            None => {
                dirty.push(StorageKey::Categories);
                seed.as_mut()
                    .map(|data| mem::take(&mut data.categories))
                    .unwrap_or_default()
            }
        };
        let transactions =
            match read_collection::<Transaction, B>(&backend, StorageKey::Transactions)? {
                Some(rows) => rows,
                None => {
                    dirty.push(StorageKey::Transactions);
                    seed.as_mut()
                        .map(|data| mem::take(&mut data.transactions))
                        .unwrap_or_default()
                }
            };
        let budgets = match read_collection::<Budget, B>(&backend, StorageKey::Budgets)? {
            Some(rows) => rows,
            None => {
                dirty.push(StorageKey::Budgets);
                seed.as_mut()
                    .map(|data| mem::take(&mut data.budgets))
                    .unwrap_or_default()
            }
        };

        // A missing counter is rebuilt from the highest id present, which for
        // freshly seeded collections is the seed length.
        let transaction_counter = match read_counter(&backend, StorageKey::LastTransactionId)? {
            Some(value) => value,
            None => {
                dirty.push(StorageKey::LastTransactionId);
                max_id(&transactions, |t| t.id)
            }
        };
        let wallet_counter = match read_counter(&backend, StorageKey::LastWalletId)? {
            Some(value) => value,
            None => {
                dirty.push(StorageKey::LastWalletId);
                max_id(&wallets, |w| w.id)
            }
        };
        let budget_counter = match read_counter(&backend, StorageKey::LastBudgetId)? {
            Some(value) => value,
            None => {
                dirty.push(StorageKey::LastBudgetId);
                max_id(&budgets, |b| b.id)
            }
        };

        let theme = match backend.read(StorageKey::Theme)? {
            None => {
                dirty.push(StorageKey::Theme);
                Theme::default()
            }
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!(%err, "stored theme failed to parse, falling back to default");
                Theme::default()
            }),
        };

        let mut store = Self {
            backend,
            clock,
            policy,
            wallets,
            categories,
            transactions,
            budgets,
            theme,
            counters: IdCounters {
                transaction: transaction_counter,
                wallet: wallet_counter,
                budget: budget_counter,
            },
        };
        if !dirty.is_empty() {
            store.persist(&dirty)?;
        }
        Ok(store)
    }

    // ---- accessors -------------------------------------------------------

    pub fn wallets(&self) -> &[Wallet] {
        &self.wallets
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub fn wallet(&self, id: u64) -> Option<&Wallet> {
        self.wallets.iter().find(|wallet| wallet.id == id)
    }

    pub fn category(&self, id: u64) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn transaction(&self, id: u64) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn budget(&self, id: u64) -> Option<&Budget> {
        self.budgets.iter().find(|budget| budget.id == id)
    }

    /// The referenced category, or the "Unknown" placeholder when the
    /// reference dangles.
    pub fn category_or_unknown(&self, id: u64) -> Category {
        self.category(id).cloned().unwrap_or_else(Category::unknown)
    }

    /// The store's current date, as seen by period filters and monthly
    /// aggregates.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.theme = theme;
        self.persist(&[StorageKey::Theme])
    }

    // ---- transactions ----------------------------------------------------

    pub fn create_transaction(&mut self, input: TransactionInput) -> Result<Transaction> {
        self.validate_transaction_input(&input)?;
        let id = self.counters.next(CounterKind::Transaction);
        let record = Transaction {
            id,
            description: input.description,
            amount: input.amount,
            kind: input.kind,
            category_id: input.category_id,
            wallet_id: input.wallet_id,
            date: input.date,
            notes: input.notes,
            created_at: self.clock.now(),
            updated_at: None,
        };
        if let Some(wallet) = self.wallet_mut(record.wallet_id) {
            wallet.balance = apply_effect(wallet.balance, record.kind, record.amount);
        }
        self.transactions.push(record.clone());
        self.persist(&[
            StorageKey::Transactions,
            StorageKey::Wallets,
            StorageKey::LastTransactionId,
        ])?;
        debug!(id = record.id, "transaction created");
        Ok(record)
    }

    /// Reversal-then-apply: first undo the old record's effect on its old
    /// wallet, then apply the new record's effect on its new wallet. Correct
    /// even when wallet, kind, and amount all change in one edit.
    pub fn update_transaction(&mut self, id: u64, input: TransactionInput) -> Result<Transaction> {
        let index = self
            .transactions
            .iter()
            .position(|txn| txn.id == id)
            .ok_or(LedgerError::not_found(Entity::Transaction, id))?;
        self.validate_transaction_input(&input)?;
        let old = self.transactions[index].clone();
        if let Some(wallet) = self.wallet_mut(old.wallet_id) {
            wallet.balance = reverse_effect(wallet.balance, old.kind, old.amount);
        }
        if let Some(wallet) = self.wallet_mut(input.wallet_id) {
            wallet.balance = apply_effect(wallet.balance, input.kind, input.amount);
        }
        let record = Transaction {
            id,
            description: input.description,
            amount: input.amount,
            kind: input.kind,
            category_id: input.category_id,
            wallet_id: input.wallet_id,
            date: input.date,
            notes: input.notes,
            created_at: old.created_at,
            updated_at: Some(self.clock.now()),
        };
        self.transactions[index] = record.clone();
        self.persist(&[StorageKey::Transactions, StorageKey::Wallets])?;
        debug!(id, "transaction updated");
        Ok(record)
    }

    pub fn delete_transaction(&mut self, id: u64) -> Result<u64> {
        let index = self
            .transactions
            .iter()
            .position(|txn| txn.id == id)
            .ok_or(LedgerError::not_found(Entity::Transaction, id))?;
        let record = self.transactions.remove(index);
        if let Some(wallet) = self.wallet_mut(record.wallet_id) {
            wallet.balance = reverse_effect(wallet.balance, record.kind, record.amount);
        }
        self.persist(&[StorageKey::Transactions, StorageKey::Wallets])?;
        debug!(id, "transaction deleted");
        Ok(record.id)
    }

    /// Filtered listing, always sorted by occurrence date descending. Ties
    /// keep the underlying storage order (the sort is stable).
    pub fn transactions(&self, filter: &TransactionFilter) -> Vec<Transaction> {
        let today = self.clock.today();
        let mut rows: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|txn| {
                filter.kind.map_or(true, |kind| txn.kind == kind)
                    && filter.category_id.map_or(true, |id| txn.category_id == id)
                    && filter.wallet_id.map_or(true, |id| txn.wallet_id == id)
                    && filter.date_matches(txn.date, today)
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        rows
    }

    // ---- transfers -------------------------------------------------------

    /// Moves `amount` between two wallets by recording a paired
    /// expense/income transaction in the designated transfer category.
    ///
    /// Unlike ordinary expenses, a transfer may not overdraw its source.
    /// The transaction id counter advances by exactly two.
    pub fn transfer(
        &mut self,
        from_wallet_id: u64,
        to_wallet_id: u64,
        amount: f64,
        date: NaiveDate,
        notes: Option<String>,
    ) -> Result<Transfer> {
        if from_wallet_id == to_wallet_id {
            return Err(LedgerError::InvalidTransfer(
                "source and destination wallets are the same".into(),
            ));
        }
        if amount <= 0.0 {
            return Err(LedgerError::validation("transfer amount must be positive"));
        }
        let source = self
            .wallet(from_wallet_id)
            .ok_or(LedgerError::not_found(Entity::Wallet, from_wallet_id))?;
        let available = source.balance;
        let from_name = source.name.clone();
        let to_name = self
            .wallet(to_wallet_id)
            .ok_or(LedgerError::not_found(Entity::Wallet, to_wallet_id))?
            .name
            .clone();
        if available < amount {
            return Err(LedgerError::InsufficientFunds {
                available,
                requested: amount,
            });
        }

        let (category_id, category_created) = self.ensure_transfer_category();
        let outgoing_id = self.counters.next(CounterKind::Transaction);
        let incoming_id = self.counters.next(CounterKind::Transaction);
        let now = self.clock.now();
        let outgoing = Transaction {
            id: outgoing_id,
            description: notes
                .clone()
                .unwrap_or_else(|| format!("Transfer to {to_name}")),
            amount,
            kind: TransactionKind::Expense,
            category_id,
            wallet_id: from_wallet_id,
            date,
            notes: Some(format!("Transfer to {to_name}")),
            created_at: now,
            updated_at: None,
        };
        let incoming = Transaction {
            id: incoming_id,
            description: notes.unwrap_or_else(|| format!("Transfer from {from_name}")),
            amount,
            kind: TransactionKind::Income,
            category_id,
            wallet_id: to_wallet_id,
            date,
            notes: Some(format!("Transfer from {from_name}")),
            created_at: now,
            updated_at: None,
        };

        if let Some(wallet) = self.wallet_mut(from_wallet_id) {
            wallet.balance -= amount;
        }
        if let Some(wallet) = self.wallet_mut(to_wallet_id) {
            wallet.balance += amount;
        }
        self.transactions.push(outgoing.clone());
        self.transactions.push(incoming.clone());

        let mut keys = vec![
            StorageKey::Transactions,
            StorageKey::Wallets,
            StorageKey::LastTransactionId,
        ];
        if category_created {
            keys.push(StorageKey::Categories);
        }
        self.persist(&keys)?;
        info!(
            amount,
            from = from_wallet_id,
            to = to_wallet_id,
            "transfer completed"
        );
        Ok(Transfer { outgoing, incoming })
    }

    // ---- wallets ---------------------------------------------------------

    pub fn create_wallet(&mut self, input: WalletInput) -> Result<Wallet> {
        Self::validate_wallet_input(&input)?;
        let id = self.counters.next(CounterKind::Wallet);
        let record = Wallet {
            id,
            name: input.name,
            kind: input.kind,
            balance: input.balance,
            color: input.color,
            created_at: self.clock.now(),
            updated_at: None,
        };
        self.wallets.push(record.clone());
        self.persist(&[StorageKey::Wallets, StorageKey::LastWalletId])?;
        debug!(id = record.id, "wallet created");
        Ok(record)
    }

    /// Overwrites the wallet in place. A changed balance re-baselines the
    /// wallet: the submitted value simply becomes the stored balance.
    pub fn update_wallet(&mut self, id: u64, input: WalletInput) -> Result<Wallet> {
        Self::validate_wallet_input(&input)?;
        let now = self.clock.now();
        let wallet = self
            .wallets
            .iter_mut()
            .find(|wallet| wallet.id == id)
            .ok_or(LedgerError::not_found(Entity::Wallet, id))?;
        wallet.name = input.name;
        wallet.kind = input.kind;
        wallet.balance = input.balance;
        wallet.color = input.color;
        wallet.updated_at = Some(now);
        let record = wallet.clone();
        self.persist(&[StorageKey::Wallets])?;
        debug!(id, "wallet updated");
        Ok(record)
    }

    /// Deletes the wallet and cascades to every transaction referencing it.
    /// Other wallets' balances are untouched.
    pub fn delete_wallet(&mut self, id: u64) -> Result<WalletRemoval> {
        let index = self
            .wallets
            .iter()
            .position(|wallet| wallet.id == id)
            .ok_or(LedgerError::not_found(Entity::Wallet, id))?;
        self.wallets.remove(index);
        let before = self.transactions.len();
        self.transactions.retain(|txn| txn.wallet_id != id);
        let removed = before - self.transactions.len();
        self.persist(&[StorageKey::Wallets, StorageKey::Transactions])?;
        info!(wallet = id, transactions = removed, "wallet deleted");
        Ok(WalletRemoval {
            wallet_id: id,
            transactions_removed: removed,
        })
    }

    /// How many transactions a wallet deletion would cascade to; feeds the
    /// rendering layer's confirmation prompt.
    pub fn wallet_transaction_count(&self, id: u64) -> Result<usize> {
        if self.wallet(id).is_none() {
            return Err(LedgerError::not_found(Entity::Wallet, id));
        }
        Ok(self
            .transactions
            .iter()
            .filter(|txn| txn.wallet_id == id)
            .count())
    }

    // ---- categories ------------------------------------------------------

    pub fn add_category(&mut self, input: CategoryInput) -> Result<Category> {
        if input.name.trim().is_empty() {
            return Err(LedgerError::validation("category name must not be empty"));
        }
        let record = Category {
            id: self.next_category_id(),
            name: input.name,
            kind: input.kind,
            color: input.color,
        };
        self.categories.push(record.clone());
        self.persist(&[StorageKey::Categories])?;
        debug!(id = record.id, "category added");
        Ok(record)
    }

    fn next_category_id(&self) -> u64 {
        max_id(&self.categories, |category| category.id) + 1
    }

    fn ensure_transfer_category(&mut self) -> (u64, bool) {
        if let Some(category) = self
            .categories
            .iter()
            .find(|category| category.name == TRANSFER_CATEGORY_NAME)
        {
            return (category.id, false);
        }
        let id = self.next_category_id();
        self.categories.push(Category {
            id,
            name: TRANSFER_CATEGORY_NAME.into(),
            kind: CategoryKind::Expense,
            color: TRANSFER_CATEGORY_COLOR.into(),
        });
        (id, true)
    }

    // ---- budgets ---------------------------------------------------------

    /// Saves a budget for (category, month, year). When that slot already
    /// holds a budget the existing record's amount is replaced instead of
    /// inserting a duplicate; [`BudgetSaved`] reports which path was taken.
    pub fn save_budget(&mut self, input: BudgetInput) -> Result<BudgetSaved> {
        self.validate_budget_input(&input)?;
        let existing = self.budgets.iter().position(|budget| {
            budget.category_id == input.category_id
                && budget.month == input.month
                && budget.year == input.year
        });
        match existing {
            Some(index) => {
                let now = self.clock.now();
                let budget = &mut self.budgets[index];
                budget.amount = input.amount;
                budget.updated_at = Some(now);
                let record = budget.clone();
                self.persist(&[StorageKey::Budgets])?;
                debug!(id = record.id, "budget replaced");
                Ok(BudgetSaved::Replaced(record))
            }
            None => {
                let id = self.counters.next(CounterKind::Budget);
                let record = Budget {
                    id,
                    category_id: input.category_id,
                    amount: input.amount,
                    month: input.month,
                    year: input.year,
                    created_at: self.clock.now(),
                    updated_at: None,
                };
                self.budgets.push(record.clone());
                self.persist(&[StorageKey::Budgets, StorageKey::LastBudgetId])?;
                debug!(id = record.id, "budget created");
                Ok(BudgetSaved::Created(record))
            }
        }
    }

    pub fn update_budget(&mut self, id: u64, input: BudgetInput) -> Result<Budget> {
        self.validate_budget_input(&input)?;
        let now = self.clock.now();
        let budget = self
            .budgets
            .iter_mut()
            .find(|budget| budget.id == id)
            .ok_or(LedgerError::not_found(Entity::Budget, id))?;
        budget.category_id = input.category_id;
        budget.amount = input.amount;
        budget.month = input.month;
        budget.year = input.year;
        budget.updated_at = Some(now);
        let record = budget.clone();
        self.persist(&[StorageKey::Budgets])?;
        debug!(id, "budget updated");
        Ok(record)
    }

    pub fn delete_budget(&mut self, id: u64) -> Result<u64> {
        let index = self
            .budgets
            .iter()
            .position(|budget| budget.id == id)
            .ok_or(LedgerError::not_found(Entity::Budget, id))?;
        self.budgets.remove(index);
        self.persist(&[StorageKey::Budgets])?;
        debug!(id, "budget deleted");
        Ok(id)
    }

    /// The budget already occupying a (category, month, year) slot, if any.
    /// Lets the rendering layer offer replacement before saving.
    pub fn existing_budget(&self, category_id: u64, month: u32, year: i32) -> Option<&Budget> {
        self.budgets.iter().find(|budget| {
            budget.category_id == category_id && budget.month == month && budget.year == year
        })
    }

    pub fn budgets_for(&self, month: u32, year: i32) -> Vec<Budget> {
        self.budgets
            .iter()
            .filter(|budget| budget.month == month && budget.year == year)
            .cloned()
            .collect()
    }

    /// Spending position of one budget against its month's expense
    /// transactions.
    pub fn budget_status(&self, budget_id: u64) -> Result<BudgetStatus> {
        let budget = self
            .budget(budget_id)
            .ok_or(LedgerError::not_found(Entity::Budget, budget_id))?;
        let spent = self.category_spent(budget.category_id, budget.month, budget.year);
        let remaining = budget.amount - spent;
        let percentage = if budget.amount > 0.0 {
            spent / budget.amount * 100.0
        } else {
            0.0
        };
        Ok(BudgetStatus {
            budget_id,
            category_id: budget.category_id,
            spent,
            remaining,
            percentage,
            level: BudgetLevel::from_percentage(percentage),
        })
    }

    /// Sum of expense transactions in one category for one calendar month.
    pub fn category_spent(&self, category_id: u64, month: u32, year: i32) -> f64 {
        self.transactions
            .iter()
            .filter(|txn| {
                txn.kind == TransactionKind::Expense
                    && txn.category_id == category_id
                    && txn.date.month() == month
                    && txn.date.year() == year
            })
            .map(|txn| txn.amount)
            .sum()
    }

    // ---- aggregates ------------------------------------------------------

    pub fn total_balance(&self) -> f64 {
        self.wallets.iter().map(|wallet| wallet.balance).sum()
    }

    /// Income and expense sums for one calendar month, by month/year
    /// equality rather than a rolling window.
    pub fn month_totals(&self, year: i32, month: u32) -> MonthTotals {
        let mut totals = MonthTotals::default();
        for txn in &self.transactions {
            if txn.date.month() != month || txn.date.year() != year {
                continue;
            }
            match txn.kind {
                TransactionKind::Income => totals.income += txn.amount,
                TransactionKind::Expense => totals.expense += txn.amount,
            }
        }
        totals
    }

    pub fn monthly_income(&self) -> f64 {
        let today = self.clock.today();
        self.month_totals(today.year(), today.month()).income
    }

    pub fn monthly_expense(&self) -> f64 {
        let today = self.clock.today();
        self.month_totals(today.year(), today.month()).expense
    }

    /// This month's expense total per expense category, zero-sum categories
    /// excluded. Order follows the category collection.
    pub fn category_expense_breakdown(&self) -> Vec<CategoryExpense> {
        let today = self.clock.today();
        let (year, month) = (today.year(), today.month());
        self.categories
            .iter()
            .filter(|category| category.kind == CategoryKind::Expense)
            .filter_map(|category| {
                let total = self.category_spent(category.id, month, year);
                (total > 0.0).then(|| CategoryExpense {
                    category_id: category.id,
                    name: category.name.clone(),
                    color: category.color.clone(),
                    total,
                })
            })
            .collect()
    }

    // ---- internals -------------------------------------------------------

    fn wallet_mut(&mut self, id: u64) -> Option<&mut Wallet> {
        self.wallets.iter_mut().find(|wallet| wallet.id == id)
    }

    fn validate_transaction_input(&self, input: &TransactionInput) -> Result<()> {
        if input.amount <= 0.0 {
            return Err(LedgerError::validation(
                "transaction amount must be positive",
            ));
        }
        if input.description.trim().is_empty() {
            return Err(LedgerError::validation(
                "transaction description must not be empty",
            ));
        }
        if self.wallet(input.wallet_id).is_none() {
            return Err(LedgerError::not_found(Entity::Wallet, input.wallet_id));
        }
        let category = self
            .category(input.category_id)
            .ok_or(LedgerError::not_found(Entity::Category, input.category_id))?;
        if self.policy.strict_category_kinds && !kinds_match(category.kind, input.kind) {
            return Err(LedgerError::validation(format!(
                "category `{}` does not accept {:?} transactions",
                category.name, input.kind
            )));
        }
        Ok(())
    }

    fn validate_wallet_input(input: &WalletInput) -> Result<()> {
        if input.name.trim().is_empty() {
            return Err(LedgerError::validation("wallet name must not be empty"));
        }
        Ok(())
    }

    fn validate_budget_input(&self, input: &BudgetInput) -> Result<()> {
        if input.amount <= 0.0 {
            return Err(LedgerError::validation("budget amount must be positive"));
        }
        if !(1..=12).contains(&input.month) {
            return Err(LedgerError::validation("budget month must be 1 through 12"));
        }
        let category = self
            .category(input.category_id)
            .ok_or(LedgerError::not_found(Entity::Category, input.category_id))?;
        if category.kind != CategoryKind::Expense {
            return Err(LedgerError::validation(
                "budget category must be an expense category",
            ));
        }
        Ok(())
    }

    fn encode(&self, key: StorageKey) -> Result<String> {
        let json = match key {
            StorageKey::Wallets => serde_json::to_string(&self.wallets)?,
            StorageKey::Categories => serde_json::to_string(&self.categories)?,
            StorageKey::Transactions => serde_json::to_string(&self.transactions)?,
            StorageKey::Budgets => serde_json::to_string(&self.budgets)?,
            StorageKey::Theme => serde_json::to_string(&self.theme)?,
            StorageKey::LastTransactionId => serde_json::to_string(&self.counters.transaction)?,
            StorageKey::LastWalletId => serde_json::to_string(&self.counters.wallet)?,
            StorageKey::LastBudgetId => serde_json::to_string(&self.counters.budget)?,
        };
        Ok(json)
    }

    fn persist(&mut self, keys: &[StorageKey]) -> Result<()> {
        let mut entries = Vec::with_capacity(keys.len());
        for key in keys {
            entries.push((*key, self.encode(*key)?));
        }
        self.backend.commit(&entries)
    }
}

fn kinds_match(category: CategoryKind, transaction: TransactionKind) -> bool {
    matches!(
        (category, transaction),
        (CategoryKind::Income, TransactionKind::Income)
            | (CategoryKind::Expense, TransactionKind::Expense)
    )
}

fn max_id<T>(items: &[T], id: impl Fn(&T) -> u64) -> u64 {
    items.iter().map(id).max().unwrap_or(0)
}

fn read_collection<T: DeserializeOwned, B: StorageBackend>(
    backend: &B,
    key: StorageKey,
) -> Result<Option<Vec<T>>> {
    match backend.read(key)? {
        None => Ok(None),
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(rows) => Ok(Some(rows)),
            Err(err) => {
                warn!(key = key.as_str(), %err, "stored collection failed to parse, falling back to empty");
                Ok(Some(Vec::new()))
            }
        },
    }
}

fn read_counter<B: StorageBackend>(backend: &B, key: StorageKey) -> Result<Option<u64>> {
    match backend.read(key)? {
        None => Ok(None),
        Some(raw) => match serde_json::from_str(raw.trim()) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!(key = key.as_str(), %err, "stored counter failed to parse, rebuilding from record ids");
                Ok(None)
            }
        },
    }
}
