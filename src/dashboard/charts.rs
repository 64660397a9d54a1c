//! Chart generation and rendering for the dashboard.
//!
//! This module creates interactive ECharts visualizations for financial data:
//! - **Monthly Summary Chart**: income vs. expense totals per calendar month
//! - **Category Chart**: top expense categories as a pie breakdown
//! - **Trend Chart**: daily expense totals over the trailing window
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization
//! code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, Emphasis, EmphasisFocus, JsFunction,
        Tooltip, Trigger,
    },
    series::{Bar, Line, Pie},
};
use maud::{Markup, PreEscaped, html};
use time::Month;

use crate::{
    dashboard::aggregation::{CategoryTotal, DayTotal, MonthSummary},
    html::HeadElement,
};

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for dashboard charts.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

pub(super) fn monthly_summary_chart(summaries: &[MonthSummary]) -> Chart {
    let labels: Vec<String> = summaries
        .iter()
        .map(|summary| month_label(summary.month.month()))
        .collect();
    let income_values: Vec<f64> = summaries.iter().map(|s| s.income_total).collect();
    let expense_values: Vec<f64> = summaries.iter().map(|s| s.expense_total).collect();

    Chart::new()
        .title(
            Title::new()
                .text("Income vs. Expenses")
                .subtext("Last six months"),
        )
        .tooltip(currency_tooltip())
        .legend(Legend::new().top("6%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(
            Bar::new()
                .name("Income")
                .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
                .data(income_values),
        )
        .series(
            Bar::new()
                .name("Expenses")
                .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
                .data(expense_values),
        )
}

pub(super) fn category_chart(categories: &[CategoryTotal]) -> Chart {
    let data: Vec<(f64, &str)> = categories
        .iter()
        .map(|category| (category.total, category.category.as_str()))
        .collect();

    Chart::new()
        .title(
            Title::new()
                .text("Top Expense Categories")
                .subtext("Last thirty days"),
        )
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().top("bottom"))
        .series(Pie::new().name("Expenses").radius("55%").data(data))
}

pub(super) fn trend_chart(days: &[DayTotal]) -> Chart {
    // The year is kept in the buckets; it is only dropped here, in the axis
    // labels.
    let labels: Vec<String> = days
        .iter()
        .map(|day| format!("{:02}/{:02}", day.date.day(), day.date.month() as u8))
        .collect();
    let values: Vec<f64> = days.iter().map(|day| day.total).collect();

    Chart::new()
        .title(
            Title::new()
                .text("Daily Spending")
                .subtext("Last ninety days"),
        )
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Line::new().name("Expenses").smooth(0.5).data(values))
}

fn month_label(month: Month) -> String {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
    .to_string()
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
