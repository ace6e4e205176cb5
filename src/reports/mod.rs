//! Derived reporting over the ledger: cashflow history, range summaries, and
//! budget health. Everything here is computed from store state; nothing is
//! persisted.

use std::cmp::Ordering;

use chrono::{Datelike, Months, NaiveDate};

use crate::ledger::{
    BudgetLevel, Category, CategoryExpense, DateRange, LedgerStore, MonthTotals, Transaction,
    TransactionFilter, TransactionKind,
};
use crate::storage::StorageBackend;

/// One month in a cashflow series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CashflowPoint {
    pub year: i32,
    pub month: u32,
    pub totals: MonthTotals,
}

/// Totals for an arbitrary date range, with the expense side broken down per
/// category in descending order of spend.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSummary {
    pub income: f64,
    pub expense: f64,
    pub net: f64,
    pub transaction_count: usize,
    pub by_category: Vec<CategoryExpense>,
}

/// One budget's position for the current month, shaped for display.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetOverview {
    pub budget_id: u64,
    pub category: Category,
    pub amount: f64,
    pub spent: f64,
    pub remaining: f64,
    pub level: BudgetLevel,
}

/// Stateless report computations over a [`LedgerStore`].
pub struct ReportService;

impl ReportService {
    /// Income, expense, and net for the last `months` calendar months, the
    /// current month included, oldest first.
    pub fn cashflow_series<B: StorageBackend>(
        store: &LedgerStore<B>,
        months: u32,
    ) -> Vec<CashflowPoint> {
        let anchor = month_anchor(store.today());
        let mut points = Vec::with_capacity(months as usize);
        for back in (0..months).rev() {
            let Some(start) = anchor.checked_sub_months(Months::new(back)) else {
                continue;
            };
            points.push(CashflowPoint {
                year: start.year(),
                month: start.month(),
                totals: store.month_totals(start.year(), start.month()),
            });
        }
        points
    }

    /// Totals over an inclusive date range, optionally narrowed to a single
    /// category. The per-category breakdown covers expenses only.
    pub fn report_summary<B: StorageBackend>(
        store: &LedgerStore<B>,
        range: DateRange,
        category_id: Option<u64>,
    ) -> ReportSummary {
        let mut filter = TransactionFilter::default().range(range);
        if let Some(id) = category_id {
            filter = filter.category(id);
        }
        let rows = store.transactions(&filter);

        let mut income = 0.0;
        let mut expense = 0.0;
        let mut by_category: Vec<CategoryExpense> = Vec::new();
        for row in &rows {
            match row.kind {
                TransactionKind::Income => income += row.amount,
                TransactionKind::Expense => {
                    expense += row.amount;
                    match by_category
                        .iter_mut()
                        .find(|entry| entry.category_id == row.category_id)
                    {
                        Some(entry) => entry.total += row.amount,
                        None => {
                            let category = store.category_or_unknown(row.category_id);
                            by_category.push(CategoryExpense {
                                category_id: row.category_id,
                                name: category.name,
                                color: category.color,
                                total: row.amount,
                            });
                        }
                    }
                }
            }
        }
        by_category.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal));

        ReportSummary {
            income,
            expense,
            net: income - expense,
            transaction_count: rows.len(),
            by_category,
        }
    }

    /// Every budget for the current month with its spending position. A
    /// budget turns `Warning` when less than 20% of it remains and
    /// `OverLimit` once spending exceeds it.
    pub fn budget_overview<B: StorageBackend>(store: &LedgerStore<B>) -> Vec<BudgetOverview> {
        let today = store.today();
        store
            .budgets_for(today.month(), today.year())
            .into_iter()
            .map(|budget| {
                let spent = store.category_spent(budget.category_id, budget.month, budget.year);
                let remaining = budget.amount - spent;
                let level = if remaining < 0.0 {
                    BudgetLevel::OverLimit
                } else if budget.amount > 0.0 && remaining / budget.amount * 100.0 < 20.0 {
                    BudgetLevel::Warning
                } else {
                    BudgetLevel::Safe
                };
                BudgetOverview {
                    budget_id: budget.id,
                    category: store.category_or_unknown(budget.category_id),
                    amount: budget.amount,
                    spent,
                    remaining,
                    level,
                }
            })
            .collect()
    }

    /// Percentage of this month's income left after expenses. Zero when the
    /// month has no income.
    pub fn savings_rate<B: StorageBackend>(store: &LedgerStore<B>) -> f64 {
        let today = store.today();
        let totals = store.month_totals(today.year(), today.month());
        if totals.income <= 0.0 {
            return 0.0;
        }
        totals.net() / totals.income * 100.0
    }

    /// Percentage change of this month's expenses against last month's.
    /// `None` when last month recorded no expenses, since the change is
    /// undefined there.
    pub fn expense_change_vs_previous_month<B: StorageBackend>(
        store: &LedgerStore<B>,
    ) -> Option<f64> {
        let today = store.today();
        let previous = month_anchor(today).checked_sub_months(Months::new(1))?;
        let current = store.month_totals(today.year(), today.month()).expense;
        let baseline = store
            .month_totals(previous.year(), previous.month())
            .expense;
        if baseline <= 0.0 {
            return None;
        }
        Some((current - baseline) / baseline * 100.0)
    }

    /// The newest transactions matching a filter, capped at `limit`.
    pub fn recent_transactions<B: StorageBackend>(
        store: &LedgerStore<B>,
        filter: &TransactionFilter,
        limit: usize,
    ) -> Vec<Transaction> {
        let mut rows = store.transactions(filter);
        rows.truncate(limit);
        rows
    }
}

fn month_anchor(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
