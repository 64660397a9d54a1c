//! Heuristic spending insights derived from recent transactions.
//!
//! The scorer condenses a trailing three-month transaction window into a
//! handful of signals: a month-over-month spending trend, the dominant
//! expense category, a budget alert flag, a savings-opportunity estimate, and
//! a predicted next-month spend. These are deliberately rough heuristics, not
//! statistical forecasts.

use std::collections::HashMap;

use time::{Date, Duration, Month};

use crate::{dashboard::transaction::TransactionRow, transaction::TransactionType};

/// The trend percentage above which the budget alert fires. Strictly greater
/// than: a trend of exactly 20% does not alert.
const BUDGET_ALERT_TREND_PCT: f64 = 20.0;

/// The fraction of average daily spend suggested as a savings opportunity.
const SAVINGS_RATE: f64 = 0.15;

/// The divisor used to approximate average daily spend from a month total.
const DAYS_PER_MONTH: f64 = 30.0;

/// Shown as the top category when the window has no expense transactions.
const NO_DATA_LABEL: &str = "No data";

/// The signals shown on the dashboard insight card.
///
/// Computed fresh on every request and never cached.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct InsightSnapshot {
    /// Month-over-month change in expense totals, as a percentage.
    pub monthly_spending_trend_pct: f64,
    /// The expense category with the highest total in the window.
    pub top_category: String,
    /// A rough estimate of money that could be saved this month.
    pub savings_opportunity_amount: f64,
    /// Whether spending grew fast enough to warrant a warning.
    pub budget_alert: bool,
    /// Current spend extrapolated one month forward along the trend.
    pub next_month_prediction_amount: f64,
}

/// Computes the insight snapshot from a trailing transaction window.
///
/// Returns `None` when the window holds no transactions at all. That is
/// distinct from a window with transactions but no expenses, which yields a
/// snapshot with zeroed amounts and a "No data" top category.
///
/// The previous month is the month containing `today - 30 days` rather than
/// the strict prior calendar month. Early in a 31-day month both can be the
/// current month itself; the approximation is intentional.
pub(super) fn compute_insights(rows: &[TransactionRow], today: Date) -> Option<InsightSnapshot> {
    if rows.is_empty() {
        return None;
    }

    let current_month = (today.year(), today.month());
    let previous_anchor = today - Duration::days(30);
    let previous_month = (previous_anchor.year(), previous_anchor.month());

    let current_month_expense_total = expense_total_in_month(rows, current_month);
    let last_month_expense_total = expense_total_in_month(rows, previous_month);

    let monthly_spending_trend_pct = if last_month_expense_total > 0.0 {
        (current_month_expense_total - last_month_expense_total) / last_month_expense_total * 100.0
    } else {
        0.0
    };

    let savings_opportunity_amount =
        (current_month_expense_total / DAYS_PER_MONTH * SAVINGS_RATE).max(0.0);

    let next_month_prediction_amount =
        current_month_expense_total * (1.0 + monthly_spending_trend_pct / 100.0);

    Some(InsightSnapshot {
        monthly_spending_trend_pct,
        top_category: top_category(rows),
        savings_opportunity_amount,
        budget_alert: monthly_spending_trend_pct > BUDGET_ALERT_TREND_PCT,
        next_month_prediction_amount,
    })
}

fn expense_total_in_month(rows: &[TransactionRow], month: (i32, Month)) -> f64 {
    rows.iter()
        .filter(|row| {
            row.transaction_type == TransactionType::Expense
                && (row.date.year(), row.date.month()) == month
        })
        .map(|row| row.amount)
        .sum()
}

/// The expense category with the highest total across the whole window.
///
/// Ties keep the category that first appeared in the input.
fn top_category(rows: &[TransactionRow]) -> String {
    let mut order: Vec<&str> = Vec::new();
    let mut totals: HashMap<&str, f64> = HashMap::new();

    for row in rows {
        if row.transaction_type != TransactionType::Expense {
            continue;
        }

        if let Some(total) = totals.get_mut(row.category.as_str()) {
            *total += row.amount;
        } else {
            totals.insert(row.category.as_str(), row.amount);
            order.push(row.category.as_str());
        }
    }

    let mut best: Option<(&str, f64)> = None;
    for category in order {
        let total = totals[category];
        match best {
            // Strictly greater keeps the earlier category on ties.
            Some((_, best_total)) if total <= best_total => {}
            _ => best = Some((category, total)),
        }
    }

    best.map(|(category, _)| category.to_owned())
        .unwrap_or_else(|| NO_DATA_LABEL.to_owned())
}

#[cfg(test)]
mod tests {
    use time::{Date, Duration, macros::date};

    use super::compute_insights;
    use crate::{dashboard::transaction::TransactionRow, transaction::TransactionType};

    fn income(amount: f64, date: Date) -> TransactionRow {
        TransactionRow {
            amount,
            transaction_type: TransactionType::Income,
            category: "Other".to_owned(),
            date,
        }
    }

    fn expense(amount: f64, category: &str, date: Date) -> TransactionRow {
        TransactionRow {
            amount,
            transaction_type: TransactionType::Expense,
            category: category.to_owned(),
            date,
        }
    }

    const TODAY: Date = date!(2025 - 06 - 15);
    const LAST_MONTH: Date = date!(2025 - 05 - 10);

    #[test]
    fn empty_window_yields_no_snapshot() {
        assert_eq!(compute_insights(&[], TODAY), None);
    }

    #[test]
    fn zero_last_month_gives_zero_trend() {
        // Current = 500, last = 0: the trend guard must kick in no matter how
        // large the current spend is.
        let rows = vec![expense(500.0, "Food", TODAY)];

        let snapshot = compute_insights(&rows, TODAY).unwrap();

        assert_eq!(snapshot.monthly_spending_trend_pct, 0.0);
        assert_eq!(snapshot.next_month_prediction_amount, 500.0);
        assert!(!snapshot.budget_alert);
    }

    #[test]
    fn growing_spend_computes_trend_and_alert() {
        // Last = 100, current = 150: trend 50%, prediction 225, alert on.
        let rows = vec![
            expense(100.0, "Food", LAST_MONTH),
            expense(150.0, "Food", TODAY),
        ];

        let snapshot = compute_insights(&rows, TODAY).unwrap();

        assert_eq!(snapshot.monthly_spending_trend_pct, 50.0);
        assert!(snapshot.budget_alert);
        assert_eq!(snapshot.next_month_prediction_amount, 225.0);
    }

    #[test]
    fn alert_threshold_is_strictly_greater_than_twenty() {
        // Last = 100, current = 120: trend is exactly 20%, no alert.
        let rows = vec![
            expense(100.0, "Food", LAST_MONTH),
            expense(120.0, "Food", TODAY),
        ];

        let snapshot = compute_insights(&rows, TODAY).unwrap();

        assert_eq!(snapshot.monthly_spending_trend_pct, 20.0);
        assert!(!snapshot.budget_alert);
    }

    #[test]
    fn income_only_window_yields_no_data_category() {
        let rows = vec![income(1000.0, TODAY)];

        let snapshot = compute_insights(&rows, TODAY).unwrap();

        assert_eq!(snapshot.top_category, "No data");
        assert_eq!(snapshot.monthly_spending_trend_pct, 0.0);
        assert_eq!(snapshot.savings_opportunity_amount, 0.0);
        assert_eq!(snapshot.next_month_prediction_amount, 0.0);
    }

    #[test]
    fn top_category_spans_the_whole_window() {
        // Rent dominates even though it was all spent last month.
        let rows = vec![
            expense(900.0, "Rent", LAST_MONTH),
            expense(150.0, "Food", TODAY),
        ];

        let snapshot = compute_insights(&rows, TODAY).unwrap();

        assert_eq!(snapshot.top_category, "Rent");
    }

    #[test]
    fn top_category_ties_keep_first_encountered() {
        let rows = vec![
            expense(50.0, "Transport", TODAY),
            expense(50.0, "Food", TODAY),
        ];

        let snapshot = compute_insights(&rows, TODAY).unwrap();

        assert_eq!(snapshot.top_category, "Transport");
    }

    #[test]
    fn savings_opportunity_is_fifteen_pct_of_daily_spend() {
        let rows = vec![expense(300.0, "Food", TODAY)];

        let snapshot = compute_insights(&rows, TODAY).unwrap();

        // 300 / 30 days * 0.15 = 1.5
        assert_eq!(snapshot.savings_opportunity_amount, 1.5);
    }

    #[test]
    fn previous_month_follows_thirty_day_back_rule() {
        // 2025-07-31 minus 30 days is 2025-07-01: "previous month" is July
        // itself, so current and last coincide and the trend collapses to 0.
        let today = date!(2025 - 07 - 31);
        let rows = vec![
            expense(100.0, "Food", date!(2025 - 07 - 05)),
            expense(100.0, "Food", date!(2025 - 06 - 05)),
        ];

        let snapshot = compute_insights(&rows, today).unwrap();

        assert_eq!(today - Duration::days(30), date!(2025 - 07 - 01));
        assert_eq!(snapshot.monthly_spending_trend_pct, 0.0);
    }

    #[test]
    fn falling_spend_gives_negative_trend_without_alert() {
        let rows = vec![
            expense(200.0, "Food", LAST_MONTH),
            expense(100.0, "Food", TODAY),
        ];

        let snapshot = compute_insights(&rows, TODAY).unwrap();

        assert_eq!(snapshot.monthly_spending_trend_pct, -50.0);
        assert!(!snapshot.budget_alert);
        assert_eq!(snapshot.next_month_prediction_amount, 50.0);
    }
}
