//! The pie chart of spending per category on the expense list page.
//!
//! The chart is generated as an ECharts option object and initialised by a
//! small script once the page has loaded.

use charming::{
    Chart,
    component::Legend,
    element::{Color, JsFunction, Tooltip, Trigger},
    series::Pie,
};
use maud::{Markup, PreEscaped, html};

use crate::{expense::summary::ExpenseSummary, html::HeadElement};

/// The HTML element ID of the pie chart container.
pub(super) const CATEGORY_CHART_ID: &str = "category-chart";

/// The path of the ECharts library under the static route.
pub(super) const ECHARTS_SCRIPT: &str = "/static/echarts.6.0.0.min.js";

/// Build a pie chart with one slice per category in `summary`.
///
/// Slices use the same colour as the category's badge and bar.
pub(super) fn category_pie_chart(summary: &ExpenseSummary) -> Chart {
    let colors: Vec<Color> = summary
        .by_category
        .iter()
        .map(|(category, _)| Color::from(category.color()))
        .collect();

    let data: Vec<(f64, &str)> = summary
        .by_category
        .iter()
        .map(|(category, subtotal)| (*subtotal, category.as_str()))
        .collect();

    Chart::new()
        .color(colors)
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().left("center").top("bottom"))
        .series(
            Pie::new()
                .name("Expenses by Category")
                .radius(vec!["40%", "70%"])
                .data(data),
        )
}

/// The container the chart is drawn into.
pub(super) fn chart_container() -> Markup {
    html!(
        div
            id=(CATEGORY_CHART_ID)
            class="w-full min-h-[320px] rounded dark:bg-gray-100"
        {}
    )
}

/// Generates the JavaScript that draws `chart` into the chart container.
pub(super) fn chart_script(chart: &Chart) -> HeadElement {
    let script = format!(
        r#"document.addEventListener('DOMContentLoaded', function() {{
            const chartDom = document.getElementById("{}");
            const chart = echarts.init(chartDom);
            const option = {};
            chart.setOption(option);

            window.addEventListener('resize', chart.resize);
        }});"#,
        CATEGORY_CHART_ID, chart
    );

    HeadElement::ScriptSource(PreEscaped(script))
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

#[cfg(test)]
mod category_pie_chart_tests {
    use crate::expense::{Category, summary::ExpenseSummary};

    use super::{CATEGORY_CHART_ID, category_pie_chart, chart_script};

    fn summary() -> ExpenseSummary {
        ExpenseSummary {
            total: 400.0,
            by_category: vec![(Category::Food, 150.0), (Category::Transport, 250.0)],
        }
    }

    #[test]
    fn options_contain_categories_and_colors() {
        let options = category_pie_chart(&summary()).to_string();

        for want in ["Food", "Transport", "#ef4444", "#3b82f6", "150", "250"] {
            assert!(
                options.contains(want),
                "want chart options to contain {want:?}, got {options}"
            );
        }
    }

    #[test]
    fn script_targets_chart_container() {
        let script = match chart_script(&category_pie_chart(&summary())) {
            crate::html::HeadElement::ScriptSource(script) => script.0,
            _ => panic!("want an inline script"),
        };

        assert!(script.contains(&format!("document.getElementById(\"{CATEGORY_CHART_ID}\")")));
        assert!(script.contains("echarts.init"));
    }
}
