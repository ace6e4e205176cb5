//! Report computations over the seeded dataset, which doubles as a realistic
//! month of activity.

use chrono::{Datelike, NaiveDate};
use dompet::clock::FixedClock;
use dompet::config::StorePolicy;
use dompet::ledger::{BudgetLevel, DateRange, LedgerStore, TransactionFilter};
use dompet::reports::ReportService;
use dompet::storage::MemoryBackend;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 25).unwrap()
}

fn seeded_store() -> LedgerStore<MemoryBackend> {
    LedgerStore::open_with(
        MemoryBackend::new(),
        FixedClock::on(today()),
        StorePolicy::default(),
    )
    .expect("open seeded store")
}

#[test]
fn monthly_totals_sum_the_seeded_activity() {
    let store = seeded_store();
    assert_eq!(store.monthly_income(), 7_850_000.0);
    assert_eq!(store.monthly_expense(), 1_820_000.0);
    assert_eq!(store.total_balance(), 22_500_000.0);
}

#[test]
fn expense_breakdown_covers_active_categories_only() {
    let store = seeded_store();
    let breakdown = store.category_expense_breakdown();
    assert_eq!(breakdown.len(), 4);
    let names: Vec<&str> = breakdown.iter().map(|entry| entry.name.as_str()).collect();
    assert_eq!(
        names,
        ["Food & Drinks", "Transport", "Entertainment", "Bills"]
    );
    let food = &breakdown[0];
    assert_eq!(food.total, 1_200_000.0);
}

#[test]
fn cashflow_series_ends_at_the_current_month() {
    let store = seeded_store();
    let series = ReportService::cashflow_series(&store, 6);
    assert_eq!(series.len(), 6);
    let last = series.last().unwrap();
    assert_eq!((last.year, last.month), (2024, 6));
    assert_eq!(last.totals.income, 7_850_000.0);
    assert_eq!(last.totals.net(), 6_030_000.0);
    // Seed activity is confined to the current month.
    assert_eq!(series[0].totals.income, 0.0);
    assert_eq!(series[0].totals.expense, 0.0);
}

#[test]
fn report_summary_over_the_month_matches_the_aggregates() {
    let store = seeded_store();
    let month_start = today().with_day(1).unwrap();
    let summary = ReportService::report_summary(
        &store,
        DateRange::new(month_start, today()),
        None,
    );
    assert_eq!(summary.income, store.monthly_income());
    assert_eq!(summary.expense, store.monthly_expense());
    assert_eq!(summary.by_category[0].name, "Food & Drinks");
    // Categories sort by spend, not collection order.
    assert_eq!(summary.by_category[1].name, "Bills");
}

#[test]
fn budget_overview_reflects_seeded_budgets() {
    let store = seeded_store();
    let overview = ReportService::budget_overview(&store);
    assert_eq!(overview.len(), 3);
    let food = overview
        .iter()
        .find(|row| row.category.name == "Food & Drinks")
        .unwrap();
    // 1.2M of 1.5M spent: exactly 20% left, still safe.
    assert_eq!(food.spent, 1_200_000.0);
    assert_eq!(food.remaining, 300_000.0);
    assert_eq!(food.level, BudgetLevel::Safe);
    let transport = overview
        .iter()
        .find(|row| row.category.name == "Transport")
        .unwrap();
    assert_eq!(transport.level, BudgetLevel::Safe);
}

#[test]
fn budget_status_agrees_with_the_overview_spend() {
    let store = seeded_store();
    let budget = store.budgets().first().unwrap().clone();
    let status = store.budget_status(budget.id).unwrap();
    assert_eq!(status.spent, 1_200_000.0);
    assert_eq!(status.percentage, 80.0);
    assert_eq!(status.level, BudgetLevel::Warning);
}

#[test]
fn savings_rate_and_expense_change_over_the_seed() {
    let store = seeded_store();
    let rate = ReportService::savings_rate(&store);
    assert!((rate - 76.815_286).abs() < 0.001, "rate: {rate}");
    // No activity last month, so the change has no baseline.
    assert_eq!(ReportService::expense_change_vs_previous_month(&store), None);
}

#[test]
fn recent_transactions_lists_newest_seed_entries_first() {
    let store = seeded_store();
    let rows = ReportService::recent_transactions(&store, &TransactionFilter::default(), 4);
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].date.day(), 20);
    assert_eq!(rows[3].date.day(), 12);
}
