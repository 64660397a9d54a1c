//! Transaction data aggregation for the dashboard charts.
//!
//! Provides functions to bucket transactions by calendar month, expense
//! category, and calendar day. All functions here are pure: they never touch
//! the database and always produce the same output for the same input.

use std::collections::HashMap;

use time::Date;

use crate::{
    dashboard::transaction::TransactionRow,
    transaction::TransactionType,
};

/// How many categories the category breakdown keeps after ranking.
pub(super) const TOP_CATEGORY_COUNT: usize = 8;

/// Income and expense totals for one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct MonthSummary {
    /// The month, represented as a date with the day set to 1.
    pub month: Date,
    pub income_total: f64,
    pub expense_total: f64,
}

/// The total spent in one expense category.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// The total spent on one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct DayTotal {
    pub date: Date,
    pub total: f64,
}

/// Buckets transactions by calendar month, splitting income from expenses.
///
/// Months with only one side of activity keep the other side at zero. The
/// result is sorted by calendar month, so out-of-order input cannot reorder
/// the chart axis. Empty input yields an empty vector.
pub(super) fn monthly_income_expense(rows: &[TransactionRow]) -> Vec<MonthSummary> {
    let mut totals: HashMap<Date, (f64, f64)> = HashMap::new();

    for row in rows {
        // replace_day(1) cannot fail: every month has a day 1.
        let Ok(month) = row.date.replace_day(1) else {
            continue;
        };

        let entry = totals.entry(month).or_insert((0.0, 0.0));
        match row.transaction_type {
            TransactionType::Income => entry.0 += row.amount,
            TransactionType::Expense => entry.1 += row.amount,
        }
    }

    let mut summaries: Vec<MonthSummary> = totals
        .into_iter()
        .map(|(month, (income_total, expense_total))| MonthSummary {
            month,
            income_total,
            expense_total,
        })
        .collect();
    summaries.sort_by_key(|summary| summary.month);

    summaries
}

/// Ranks expense totals by category, keeping the top eight.
///
/// Categories accumulate in first-encountered order, then a stable sort ranks
/// them descending by total, so ties keep the order in which the categories
/// first appeared in the input. Non-expense rows are ignored.
pub(super) fn expenses_by_category(rows: &[TransactionRow]) -> Vec<CategoryTotal> {
    let mut order: Vec<String> = Vec::new();
    let mut totals: HashMap<String, f64> = HashMap::new();

    for row in rows {
        if row.transaction_type != TransactionType::Expense {
            continue;
        }

        if let Some(total) = totals.get_mut(&row.category) {
            *total += row.amount;
        } else {
            totals.insert(row.category.clone(), row.amount);
            order.push(row.category.clone());
        }
    }

    let mut ranked: Vec<CategoryTotal> = order
        .into_iter()
        .map(|category| {
            let total = totals[&category];
            CategoryTotal { category, total }
        })
        .collect();

    // total_cmp instead of partial_cmp: totals are finite sums, and a stable
    // sort must not bail on NaN.
    ranked.sort_by(|a, b| b.total.total_cmp(&a.total));
    ranked.truncate(TOP_CATEGORY_COUNT);

    ranked
}

/// Buckets expense transactions by calendar day.
///
/// Days are keyed by the full date, year included, so a window spanning a
/// year boundary never collapses the same day of different years into one
/// bucket. The result is sorted chronologically. Non-expense rows are
/// ignored.
pub(super) fn daily_expense_trend(rows: &[TransactionRow]) -> Vec<DayTotal> {
    let mut totals: HashMap<Date, f64> = HashMap::new();

    for row in rows {
        if row.transaction_type != TransactionType::Expense {
            continue;
        }

        *totals.entry(row.date).or_insert(0.0) += row.amount;
    }

    let mut days: Vec<DayTotal> = totals
        .into_iter()
        .map(|(date, total)| DayTotal { date, total })
        .collect();
    days.sort_by_key(|day| day.date);

    days
}
