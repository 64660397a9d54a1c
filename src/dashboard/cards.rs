//! The insight card shown at the top of the dashboard.
//!
//! Renders the heuristic signals from [super::insights] as a card with a
//! trend indicator, dominant category, budget alert banner, savings
//! suggestion, and next-month prediction. The card carries an htmx refresh
//! button that swaps in a freshly computed version of itself.

use maud::{Markup, html};

use crate::{
    dashboard::insights::InsightSnapshot,
    endpoints,
    html::{format_currency, format_currency_rounded},
};

/// The element ID targeted by the htmx refresh swap.
const INSIGHT_CARD_ID: &str = "insights-card";

/// Formats a percentage value, avoiding "-0%" display.
fn format_percentage(value: f64) -> String {
    let rounded = value.round();
    if rounded.abs() < 0.5 {
        "0".to_string()
    } else {
        format!("{:.0}", rounded)
    }
}

/// Renders the insight card, or its empty state when there is no snapshot.
pub(super) fn insight_card(snapshot: Option<&InsightSnapshot>) -> Markup {
    html! {
        section
            id=(INSIGHT_CARD_ID)
            class="w-full mx-auto mb-4 bg-white dark:bg-gray-800 border
                   border-gray-200 dark:border-gray-700 rounded-lg p-4 shadow-md"
        {
            div class="flex justify-between items-baseline mb-4"
            {
                h3 class="text-xl font-semibold" { "Insights" }

                button
                    hx-post=(endpoints::REFRESH_INSIGHTS)
                    hx-target=(format!("#{INSIGHT_CARD_ID}"))
                    hx-swap="outerHTML"
                    hx-target-error="#alert-container"
                    class="text-sm text-blue-600 hover:text-blue-500
                           dark:text-blue-400 dark:hover:text-blue-300"
                {
                    "Refresh"
                }
            }

            @match snapshot {
                Some(snapshot) => { (insight_card_body(snapshot)) }
                None => {
                    p class="text-gray-500 dark:text-gray-400"
                    {
                        "Insights will show up here once you add some transactions."
                    }
                }
            }
        }
    }
}

fn insight_card_body(snapshot: &InsightSnapshot) -> Markup {
    html! {
        @if snapshot.budget_alert {
            div
                class="mb-4 p-3 rounded bg-red-50 dark:bg-red-900/30 text-sm
                       font-medium text-red-700 dark:text-red-300"
                role="alert"
            {
                "Spending is up "
                (format_percentage(snapshot.monthly_spending_trend_pct))
                "% compared to last month."
            }
        }

        div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4"
        {
            div
            {
                div class="text-sm text-gray-600 dark:text-gray-400" { "Monthly trend" }
                (trend_indicator(snapshot.monthly_spending_trend_pct))
            }

            div
            {
                div class="text-sm text-gray-600 dark:text-gray-400" { "Top category" }
                div class="text-2xl font-bold truncate" title=(snapshot.top_category)
                {
                    (snapshot.top_category)
                }
            }

            div
            {
                div class="text-sm text-gray-600 dark:text-gray-400" { "Savings opportunity" }
                div class="text-2xl font-bold"
                {
                    (format_currency(snapshot.savings_opportunity_amount)) "/day"
                }
            }

            div
            {
                div class="text-sm text-gray-600 dark:text-gray-400" { "Next month estimate" }
                div class="text-2xl font-bold"
                {
                    (format_currency_rounded(snapshot.next_month_prediction_amount))
                }
            }
        }
    }
}

fn trend_indicator(trend_pct: f64) -> Markup {
    html! {
        @if trend_pct > 0.0 {
            div class="text-2xl font-bold text-red-600 dark:text-red-400"
            {
                "↑ +" (format_percentage(trend_pct)) "%"
            }
        } @else if trend_pct < 0.0 {
            div class="text-2xl font-bold text-green-600 dark:text-green-400"
            {
                "↓ " (format_percentage(trend_pct)) "%"
            }
        } @else {
            div class="text-2xl font-bold text-gray-600 dark:text-gray-400"
            {
                "→ 0%"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::insight_card;
    use crate::dashboard::insights::InsightSnapshot;

    fn snapshot() -> InsightSnapshot {
        InsightSnapshot {
            monthly_spending_trend_pct: 50.0,
            top_category: "Rent".to_owned(),
            savings_opportunity_amount: 1.5,
            budget_alert: true,
            next_month_prediction_amount: 225.0,
        }
    }

    #[test]
    fn card_shows_all_signals() {
        let markup = insight_card(Some(&snapshot())).into_string();
        let document = Html::parse_fragment(&markup);

        let text = document.root_element().text().collect::<String>();
        assert!(text.contains("+50%"), "want trend, got {text:?}");
        assert!(text.contains("Rent"));
        assert!(text.contains("$1.50"));
        assert!(text.contains("$225"));
    }

    #[test]
    fn card_shows_alert_banner_when_alerting() {
        let markup = insight_card(Some(&snapshot())).into_string();
        let document = Html::parse_fragment(&markup);

        let alert_selector = Selector::parse("div[role=alert]").unwrap();
        assert!(document.select(&alert_selector).next().is_some());
    }

    #[test]
    fn card_hides_alert_banner_when_not_alerting() {
        let mut snapshot = snapshot();
        snapshot.budget_alert = false;
        let markup = insight_card(Some(&snapshot)).into_string();
        let document = Html::parse_fragment(&markup);

        let alert_selector = Selector::parse("div[role=alert]").unwrap();
        assert!(document.select(&alert_selector).next().is_none());
    }

    #[test]
    fn card_shows_empty_state_without_snapshot() {
        let markup = insight_card(None).into_string();
        let document = Html::parse_fragment(&markup);

        let text = document.root_element().text().collect::<String>();
        assert!(text.contains("Insights will show up here"));
    }

    #[test]
    fn card_has_refresh_button() {
        let markup = insight_card(Some(&snapshot())).into_string();
        let document = Html::parse_fragment(&markup);

        let button_selector = Selector::parse("button[hx-post]").unwrap();
        let button = document.select(&button_selector).next().unwrap();
        assert_eq!(button.value().attr("hx-post"), Some("/api/insights"));
        assert_eq!(button.value().attr("hx-target"), Some("#insights-card"));
    }
}
