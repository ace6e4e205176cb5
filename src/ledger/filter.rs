use chrono::{Days, Months, NaiveDate};

use super::transaction::TransactionKind;

/// Structural predicate for transaction listings.
///
/// An explicit [`DateRange`] overrides `period`. The default filter matches
/// everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    pub category_id: Option<u64>,
    pub wallet_id: Option<u64>,
    pub period: Period,
    pub range: Option<DateRange>,
}

impl TransactionFilter {
    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn category(mut self, category_id: u64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn wallet(mut self, wallet_id: u64) -> Self {
        self.wallet_id = Some(wallet_id);
        self
    }

    pub fn period(mut self, period: Period) -> Self {
        self.period = period;
        self
    }

    pub fn range(mut self, range: DateRange) -> Self {
        self.range = Some(range);
        self
    }

    /// Whether a transaction's occurrence date falls inside this filter's
    /// date window, relative to `today`.
    pub fn date_matches(&self, date: NaiveDate, today: NaiveDate) -> bool {
        if let Some(range) = &self.range {
            return range.contains(date);
        }
        match self.period.start_from(today) {
            Some(start) => date >= start,
            None => true,
        }
    }
}

/// Relative date windows anchored at the current date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Period {
    /// From today (midnight) onward.
    Today,
    /// The last 7 days.
    Week,
    /// The last calendar month, by date arithmetic rather than month boundary.
    Month,
    /// The last year.
    Year,
    /// No date restriction.
    #[default]
    All,
}

impl Period {
    /// Earliest date admitted by the period, or `None` for [`Period::All`].
    pub fn start_from(self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            Period::Today => Some(today),
            Period::Week => today.checked_sub_days(Days::new(7)),
            Period::Month => today.checked_sub_months(Months::new(1)),
            Period::Year => today.checked_sub_months(Months::new(12)),
            Period::All => None,
        }
    }
}

/// Inclusive calendar date range; the end date counts through its final
/// instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn period_month_clamps_to_end_of_shorter_month() {
        let start = Period::Month.start_from(day(2024, 3, 31)).unwrap();
        assert_eq!(start, day(2024, 2, 29));
    }

    #[test]
    fn period_today_admits_only_today_or_later() {
        let today = day(2024, 5, 10);
        let filter = TransactionFilter::default().period(Period::Today);
        assert!(filter.date_matches(today, today));
        assert!(!filter.date_matches(day(2024, 5, 9), today));
    }

    #[test]
    fn explicit_range_overrides_period() {
        let today = day(2024, 5, 10);
        let filter = TransactionFilter::default()
            .period(Period::Today)
            .range(DateRange::new(day(2024, 1, 1), day(2024, 1, 31)));
        assert!(filter.date_matches(day(2024, 1, 31), today));
        assert!(!filter.date_matches(today, today));
    }

    #[test]
    fn range_is_inclusive_of_both_endpoints() {
        let range = DateRange::new(day(2024, 2, 1), day(2024, 2, 29));
        assert!(range.contains(day(2024, 2, 1)));
        assert!(range.contains(day(2024, 2, 29)));
        assert!(!range.contains(day(2024, 3, 1)));
    }
}
