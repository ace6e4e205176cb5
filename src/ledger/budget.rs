use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A spending cap for one expense category in one calendar month/year.
///
/// Budgets are read-only projections over transactions; creating or deleting
/// one never moves a wallet balance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: u64,
    pub category_id: u64,
    pub amount: f64,
    pub month: u32,
    pub year: i32,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Plain data payload for creating or editing a budget.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetInput {
    pub category_id: u64,
    pub amount: f64,
    pub month: u32,
    pub year: i32,
}

impl BudgetInput {
    pub fn new(category_id: u64, amount: f64, month: u32, year: i32) -> Self {
        Self {
            category_id,
            amount,
            month,
            year,
        }
    }
}

/// Outcome of a budget save: at most one budget exists per
/// (category, month, year), so saving over an occupied slot replaces it.
#[derive(Debug, Clone, PartialEq)]
pub enum BudgetSaved {
    Created(Budget),
    Replaced(Budget),
}

impl BudgetSaved {
    pub fn budget(&self) -> &Budget {
        match self {
            BudgetSaved::Created(budget) | BudgetSaved::Replaced(budget) => budget,
        }
    }
}

/// Spending position of one budget for its month.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetStatus {
    pub budget_id: u64,
    pub category_id: u64,
    pub spent: f64,
    pub remaining: f64,
    pub percentage: f64,
    pub level: BudgetLevel,
}

/// Classification of budget consumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetLevel {
    Safe,
    Warning,
    OverLimit,
}

impl BudgetLevel {
    /// Classifies a consumption percentage: below 80 is safe, 80 up to 100 is
    /// a warning, 100 and above is over the limit.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 100.0 {
            BudgetLevel::OverLimit
        } else if percentage >= 80.0 {
            BudgetLevel::Warning
        } else {
            BudgetLevel::Safe
        }
    }
}
