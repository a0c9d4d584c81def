//! The expense form used by the create and edit pages.

use maud::{Markup, html};

use crate::{
    expense::{
        Category,
        validation::{ExpenseForm, Field, FieldErrors},
    },
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_CONTAINER_STYLE, FORM_ERROR_STYLE,
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base, dollar_input_styles,
    },
    navigation::NavBar,
};

/// The placeholder option of the category select, which is not a valid choice.
const CATEGORY_PLACEHOLDER: &str = "Select a category";

/// A full page containing the expense form.
pub(super) struct ExpenseFormPage<'a> {
    /// The page title and heading.
    pub title: &'a str,
    /// The endpoint to highlight in the navigation bar.
    pub nav_endpoint: &'a str,
    /// The URL the form is posted to.
    pub action: &'a str,
    /// The label of the submit button.
    pub submit_text: &'a str,
    /// The values to fill the form with.
    pub values: &'a ExpenseForm,
    /// The errors to show under each field.
    pub errors: &'a FieldErrors,
}

impl ExpenseFormPage<'_> {
    pub(super) fn into_html(self) -> Markup {
        let nav_bar = NavBar::new(self.nav_endpoint).into_html();
        let form = expense_form_view(self.action, self.submit_text, self.values, self.errors);

        let content = html! {
            (nav_bar)

            div class=(FORM_CONTAINER_STYLE)
            {
                h1 class="mb-6 text-2xl font-bold" { (self.title) }

                (form)
            }
        };

        base(self.title, &[dollar_input_styles()], &content)
    }
}

fn expense_form_view(
    action: &str,
    submit_text: &str,
    values: &ExpenseForm,
    errors: &FieldErrors,
) -> Markup {
    html! {
        form
            method="post"
            action=(action)
            class="w-full space-y-4 md:space-y-6"
        {
            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                input
                    id="description"
                    type="text"
                    name="description"
                    placeholder="e.g., Groceries, Coffee, Gas"
                    value=(values.description)
                    required
                    autofocus
                    aria-invalid=[is_invalid(errors, Field::Description)]
                    class=(FORM_TEXT_INPUT_STYLE);

                (field_error(errors, Field::Description))
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                div class="input-wrapper"
                {
                    input
                        id="amount"
                        type="number"
                        name="amount"
                        step="0.01"
                        min="0.01"
                        placeholder="0.00"
                        value=(values.amount)
                        required
                        aria-invalid=[is_invalid(errors, Field::Amount)]
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                (field_error(errors, Field::Amount))
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                select
                    id="category"
                    name="category"
                    required
                    aria-invalid=[is_invalid(errors, Field::Category)]
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" selected[values.category.is_empty()] { (CATEGORY_PLACEHOLDER) }

                    @for category in Category::ALL {
                        option
                            value=(category.as_str())
                            selected[values.category == category.as_str()]
                        {
                            (category.as_str())
                        }
                    }
                }

                (field_error(errors, Field::Category))
            }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                input
                    id="date"
                    type="date"
                    name="date"
                    value=(values.date)
                    required
                    aria-invalid=[is_invalid(errors, Field::Date)]
                    class=(FORM_TEXT_INPUT_STYLE);

                (field_error(errors, Field::Date))
            }

            div class="flex gap-4"
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE) { (submit_text) }

                a href=(endpoints::ROOT) class=(BUTTON_SECONDARY_STYLE) { "Cancel" }
            }
        }
    }
}

fn is_invalid(errors: &FieldErrors, field: Field) -> Option<&'static str> {
    errors.get(field).map(|_| "true")
}

fn field_error(errors: &FieldErrors, field: Field) -> Markup {
    html! {
        @if let Some(error) = errors.get(field) {
            p id=(format!("{}-error", field.name())) class=(FORM_ERROR_STYLE) { (error.to_string()) }
        }
    }
}

#[cfg(test)]
mod expense_form_page_tests {
    use scraper::{Html, Selector};

    use crate::{
        endpoints,
        expense::validation::{ExpenseForm, FieldErrors, validate},
        test_utils::{
            assert_field_error, assert_form_action, assert_form_input,
            assert_form_input_with_value, assert_form_select_with_value,
            assert_form_submit_button_with_text, assert_no_field_errors, assert_valid_html,
            must_get_form,
        },
    };

    use super::ExpenseFormPage;

    fn render(values: &ExpenseForm, errors: &FieldErrors) -> Html {
        let markup = ExpenseFormPage {
            title: "Add Expense",
            nav_endpoint: endpoints::NEW_EXPENSE_VIEW,
            action: endpoints::NEW_EXPENSE_VIEW,
            submit_text: "Add Expense",
            values,
            errors,
        }
        .into_html();

        Html::parse_document(&markup.into_string())
    }

    #[test]
    fn empty_form_has_every_field() {
        let html = render(&ExpenseForm::default(), &FieldErrors::default());
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_form_action(&form, endpoints::NEW_EXPENSE_VIEW, "post");
        assert_form_input(&form, "description", "text");
        assert_form_input(&form, "amount", "number");
        assert_form_input(&form, "date", "date");
        assert_form_select_with_value(&form, "category", "");
        assert_form_submit_button_with_text(&form, "Add Expense");
        assert_no_field_errors(&form);
    }

    #[test]
    fn select_lists_placeholder_and_every_category() {
        let html = render(&ExpenseForm::default(), &FieldErrors::default());

        let options = html
            .select(&Selector::parse("select[name=category] option").unwrap())
            .map(|option| option.text().collect::<String>())
            .collect::<Vec<_>>();

        assert_eq!(
            options,
            vec![
                "Select a category",
                "Food",
                "Transport",
                "Entertainment",
                "Bills",
                "Healthcare",
                "Shopping",
                "Other"
            ]
        );
    }

    #[test]
    fn echoes_values_and_shows_errors() {
        let values = ExpenseForm {
            description: "".to_owned(),
            amount: "-5".to_owned(),
            category: "Bills".to_owned(),
            date: "2024-06-01".to_owned(),
        };
        let errors = validate(&values.description, &values.amount, &values.category, &values.date);

        let html = render(&values, &errors);
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_form_input_with_value(&form, "amount", "number", "-5");
        assert_form_input_with_value(&form, "date", "date", "2024-06-01");
        assert_form_select_with_value(&form, "category", "Bills");
        assert_field_error(&form, "description", "Description is required");
        assert_field_error(&form, "amount", "Amount must be a positive number");
    }
}
