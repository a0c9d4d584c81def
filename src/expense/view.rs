//! The expense list page: total, filters, category breakdown and table.

use maud::{Markup, PreEscaped, html};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    endpoints,
    expense::{
        Category, Expense,
        chart::{ECHARTS_SCRIPT, category_pie_chart, chart_container, chart_script},
        filter::{ALL_CATEGORIES, CategoryFilter, ExpenseFilter},
        summary::ExpenseSummary,
    },
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, CARD_STYLE,
        CATEGORY_BADGE_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, HeadElement, LINK_STYLE,
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
        format_currency,
    },
    navigation::NavBar,
};

/// The max number of graphemes to display in the expense table rows before
/// truncating and displaying ellipses.
const MAX_DESCRIPTION_GRAPHEMES: usize = 32;

const DISPLAY_DATE_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[day padding:none] [month repr:short] [year]");

const DELETE_CONFIRMATION: &str =
    "return confirm('Are you sure you want to delete this expense?');";

/// Render the expense list page.
pub(super) fn expenses_view(
    expenses: &[Expense],
    summary: &ExpenseSummary,
    filter: &ExpenseFilter,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::ROOT).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            (total_card(summary.total))
            (filter_form(filter))

            @if !summary.is_empty() {
                (category_breakdown(summary))
            }

            section class=(CARD_STYLE)
            {
                h2 class="text-xl font-semibold mb-4" { "All Expenses" }

                @if expenses.is_empty() {
                    (empty_state())
                } @else {
                    (expense_table(expenses))
                }
            }
        }
    };

    let head_elements = if summary.is_empty() {
        Vec::new()
    } else {
        vec![
            HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned()),
            chart_script(&category_pie_chart(summary)),
        ]
    };

    base("Expenses", &head_elements, &content)
}

fn total_card(total: f64) -> Markup {
    html! {
        section class=(CARD_STYLE)
        {
            div class="flex justify-between items-center mb-4"
            {
                h1 class="text-3xl font-bold" { "Expense Tracker" }

                a
                    href=(endpoints::NEW_EXPENSE_VIEW)
                    class="px-6 py-2 bg-blue-600 text-white rounded-lg hover:bg-blue-700"
                {
                    "+ Add Expense"
                }
            }

            div class="p-4 text-white rounded-lg bg-gradient-to-r from-blue-500 to-purple-600"
            {
                p class="text-sm opacity-90" { "Total Expenses" }
                p id="total" class="text-4xl font-bold" { (format_currency(total)) }
            }
        }
    }
}

fn filter_form(filter: &ExpenseFilter) -> Markup {
    let selected_category = match filter.category {
        CategoryFilter::All => ALL_CATEGORIES,
        CategoryFilter::Only(category) => category.as_str(),
    };
    let start_date = filter.start_date.map(|date| date.to_string()).unwrap_or_default();
    let end_date = filter.end_date.map(|date| date.to_string()).unwrap_or_default();

    html! {
        section class=(CARD_STYLE)
        {
            h2 class="text-xl font-semibold mb-4" { "Filters" }

            form
                method="get"
                action=(endpoints::ROOT)
                class="grid grid-cols-1 md:grid-cols-4 gap-4"
            {
                div
                {
                    label for="filter-category" class=(FORM_LABEL_STYLE) { "Category" }

                    select
                        id="filter-category"
                        name="category"
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        option
                            value=(ALL_CATEGORIES)
                            selected[selected_category == ALL_CATEGORIES]
                        {
                            "All Categories"
                        }

                        @for category in Category::ALL {
                            option
                                value=(category.as_str())
                                selected[selected_category == category.as_str()]
                            {
                                (category.as_str())
                            }
                        }
                    }
                }

                div
                {
                    label for="startDate" class=(FORM_LABEL_STYLE) { "Start Date" }

                    input
                        id="startDate"
                        type="date"
                        name="startDate"
                        value=(start_date)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="endDate" class=(FORM_LABEL_STYLE) { "End Date" }

                    input
                        id="endDate"
                        type="date"
                        name="endDate"
                        value=(end_date)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div class="flex items-end gap-2"
                {
                    button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Apply" }

                    a href=(endpoints::ROOT) class=(BUTTON_SECONDARY_STYLE) { "Clear" }
                }
            }
        }
    }
}

fn category_breakdown(summary: &ExpenseSummary) -> Markup {
    html! {
        section id="category-breakdown" class=(CARD_STYLE)
        {
            h2 class="text-xl font-semibold mb-4" { "Expenses by Category" }

            div class="flex flex-col md:flex-row gap-8 items-start"
            {
                div class="flex-1 w-full"
                {
                    @for (category, subtotal) in &summary.by_category {
                        @let percentage = summary.percentage(*subtotal);

                        div class="mb-3" data-category=(category.as_str())
                        {
                            div class="flex justify-between mb-1"
                            {
                                span class="text-sm font-medium" { (category.as_str()) }
                                span class="text-sm text-gray-600 dark:text-gray-400"
                                {
                                    (format_currency(*subtotal)) " (" (format!("{percentage:.1}")) "%)"
                                }
                            }

                            div class="w-full h-3 bg-gray-200 rounded-full dark:bg-gray-700"
                            {
                                div
                                    class="h-3 rounded-full"
                                    style=(format!(
                                        "width: {percentage:.1}%; background-color: {};",
                                        category.color()
                                    ))
                                {}
                            }
                        }
                    }
                }

                div class="flex-1 w-full" { (chart_container()) }
            }
        }
    }
}

fn empty_state() -> Markup {
    html! {
        div class="p-12 text-center text-gray-500 dark:text-gray-400"
        {
            p class="text-lg" { "No expenses found" }
            p class="text-sm mt-2" { "Start by adding your first expense!" }
        }
    }
}

fn expense_table(expenses: &[Expense]) -> Markup {
    html! {
        div class="overflow-x-auto"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Amount" }
                        th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Actions" }
                    }
                }

                tbody
                {
                    @for expense in expenses {
                        (expense_row(expense))
                    }
                }
            }
        }
    }
}

fn expense_row(expense: &Expense) -> Markup {
    let (description, full_description) = format_description(&expense.description);
    let edit_url = endpoints::format_endpoint(endpoints::EDIT_EXPENSE_VIEW, expense.id);
    let delete_url = endpoints::format_endpoint(endpoints::DELETE_EXPENSE, expense.id);

    html! {
        tr class=(TABLE_ROW_STYLE) data-expense-id=(expense.id)
        {
            td class={(TABLE_CELL_STYLE) " whitespace-nowrap"} { (format_date(expense.date)) }
            td class=(TABLE_CELL_STYLE) title=[full_description] { (description) }
            td class=(TABLE_CELL_STYLE)
            {
                span
                    class=(CATEGORY_BADGE_STYLE)
                    style=(format!("background-color: {};", expense.category.color()))
                {
                    (expense.category.as_str())
                }
            }
            td class={(TABLE_CELL_STYLE) " text-right font-medium"} { (format_currency(expense.amount)) }
            td class={(TABLE_CELL_STYLE) " text-right whitespace-nowrap"}
            {
                a href=(edit_url) class={(LINK_STYLE) " mr-4"} { "Edit" }

                form
                    method="post"
                    action=(delete_url)
                    class="inline"
                    onsubmit=(PreEscaped(DELETE_CONFIRMATION))
                {
                    button type="submit" class=(BUTTON_DELETE_STYLE) { "Delete" }
                }
            }
        }
    }
}

fn format_description(description: &str) -> (String, Option<&str>) {
    let description_length = description.graphemes(true).count();

    if description_length <= MAX_DESCRIPTION_GRAPHEMES {
        (description.to_owned(), None)
    } else {
        let truncated: String = description
            .graphemes(true)
            .take(MAX_DESCRIPTION_GRAPHEMES - 3)
            .collect();
        let truncated = truncated + "...";
        (truncated, Some(description))
    }
}

fn format_date(date: Date) -> String {
    date.format(DISPLAY_DATE_FORMAT).unwrap_or_else(|error| {
        tracing::error!("could not format date {date}: {error}");
        date.to_string()
    })
}

#[cfg(test)]
mod format_tests {
    use time::macros::date;

    use super::{format_date, format_description};

    #[test]
    fn short_description_is_unchanged() {
        assert_eq!(format_description("Coffee"), ("Coffee".to_owned(), None));
    }

    #[test]
    fn long_description_is_truncated() {
        let description = "Dinner with the whole team after the product launch";

        let (display, title) = format_description(description);

        assert_eq!(display, "Dinner with the whole team af...");
        assert_eq!(title, Some(description));
    }

    #[test]
    fn counts_graphemes_not_bytes() {
        let description = "é".repeat(32);

        assert_eq!(format_description(&description), (description.clone(), None));
    }

    #[test]
    fn formats_date_for_display() {
        assert_eq!(format_date(date!(2024 - 03 - 05)), "5 Mar 2024");
    }
}
