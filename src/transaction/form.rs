//! The form for adding a transaction: raw form data, field validation and markup.

use std::str::FromStr;

use maud::{Markup, html};
use serde::Deserialize;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    Error, endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_DESCRIPTION_STYLE, FORM_ERROR_STYLE,
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner,
    },
    transaction::core::{Description, Transaction, TransactionType, TransactionValue},
};

const FORM_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// The id of the `<dialog>` element that holds the form in the dialog layout.
pub const DIALOG_ID: &str = "add-transaction-dialog";

/// How the transaction form is placed on the page.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FormLayout {
    /// The form sits directly above the table.
    #[default]
    Inline,
    /// A button above the table opens the form in a modal dialog.
    Dialog,
}

impl FromStr for FormLayout {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inline" => Ok(FormLayout::Inline),
            "dialog" => Ok(FormLayout::Dialog),
            other => Err(Error::UnknownFormLayout(other.to_owned())),
        }
    }
}

/// The form data for creating a transaction, exactly as submitted.
///
/// Every field is kept as text so that the form can be shown again with the
/// user's input when validation fails. Missing fields are treated as empty.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TransactionFormData {
    /// One of "expense", "income" or "transfer".
    pub type_: String,
    /// The date in ISO 8601 format, e.g. "2024-05-01".
    pub date: String,
    pub description: String,
    pub category: String,
    pub account: String,
    /// The amount of money, e.g. "100,00".
    pub value: String,
}

impl TransactionFormData {
    /// The values of a freshly reset form: an expense dated `today` with a value of zero.
    pub fn new(today: Date) -> Self {
        Self {
            type_: TransactionType::default().as_form_value().to_owned(),
            date: today.to_string(),
            description: String::new(),
            category: String::new(),
            account: String::new(),
            value: "0".to_owned(),
        }
    }

    /// Check every field and build the transaction they describe.
    ///
    /// # Errors
    ///
    /// Returns the messages for every invalid field, not only the first one.
    pub fn validate(&self) -> Result<Transaction, FieldErrors> {
        let transaction_type = self.type_.trim().parse::<TransactionType>();
        let date = parse_form_date(&self.date);
        let description = Description::new(&self.description);
        let value = TransactionValue::new(&self.value);

        match (transaction_type, date, description, value) {
            (Ok(transaction_type), Ok(date), Ok(description), Ok(value)) => Ok(Transaction {
                transaction_type,
                date,
                description,
                category: non_empty(&self.category),
                account: non_empty(&self.account),
                value,
            }),
            (transaction_type, date, description, value) => Err(FieldErrors {
                transaction_type: transaction_type.err(),
                date: date.err(),
                description: description.err(),
                value: value.err(),
            }),
        }
    }
}

/// The validation error for each invalid field of a [TransactionFormData].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FieldErrors {
    pub transaction_type: Option<Error>,
    pub date: Option<Error>,
    pub description: Option<Error>,
    pub value: Option<Error>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.transaction_type.is_none()
            && self.date.is_none()
            && self.description.is_none()
            && self.value.is_none()
    }
}

fn parse_form_date(text: &str) -> Result<Date, Error> {
    Date::parse(text.trim(), FORM_DATE_FORMAT).map_err(|_| Error::InvalidDate(text.to_owned()))
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_owned())
    }
}

/// Render the transaction form filled in with `values`, with the message for
/// each field in `errors` shown under that field.
///
/// On validation failure the endpoint responds with this form and htmx swaps
/// it in place of the submitted one.
pub fn transaction_form(
    layout: FormLayout,
    values: &TransactionFormData,
    errors: &FieldErrors,
) -> Markup {
    let form_style = match layout {
        FormLayout::Inline => "flex flex-wrap justify-between items-start gap-4",
        FormLayout::Dialog => "flex flex-col gap-4",
    };
    let spinner = loading_spinner();

    html! {
        form
            id="transaction-form"
            method="post"
            action=(endpoints::TRANSACTIONS_API)
            hx-post=(endpoints::TRANSACTIONS_API)
            hx-target="this"
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class=(form_style)
        {
            (form_field(
                "type_",
                "Tipo de transação",
                "Despesa, receita ou transferência entre contas",
                errors.transaction_type.as_ref(),
                html! {
                    select
                        name="type_"
                        id="type_"
                        required
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for transaction_type in TransactionType::ALL {
                            option
                                value=(transaction_type.as_form_value())
                                selected[transaction_type.as_form_value() == values.type_]
                            {
                                (transaction_type.label())
                            }
                        }
                    }
                },
            ))

            (form_field(
                "date",
                "Data",
                "Data da sua transação",
                errors.date.as_ref(),
                html! {
                    input
                        name="date"
                        id="date"
                        type="date"
                        required
                        value=(values.date)
                        class=(FORM_TEXT_INPUT_STYLE);
                },
            ))

            (form_field(
                "description",
                "Descrição",
                "Descreva a sua transação",
                errors.description.as_ref(),
                html! {
                    input
                        name="description"
                        id="description"
                        type="text"
                        placeholder="Cerveja"
                        required
                        autofocus
                        value=(values.description)
                        class=(FORM_TEXT_INPUT_STYLE);
                },
            ))

            (form_field(
                "category",
                "Categoria",
                "Grupo de gastos",
                None,
                html! {
                    input
                        name="category"
                        id="category"
                        type="text"
                        placeholder="Educação, saúde, etc"
                        value=(values.category)
                        class=(FORM_TEXT_INPUT_STYLE);
                },
            ))

            (form_field(
                "account",
                "Conta",
                "Em qual conta o valor foi movimentado",
                None,
                html! {
                    input
                        name="account"
                        id="account"
                        type="text"
                        placeholder="Carteira"
                        value=(values.account)
                        class=(FORM_TEXT_INPUT_STYLE);
                },
            ))

            (form_field(
                "value",
                "Preço",
                "Informe o valor da sua transação",
                errors.value.as_ref(),
                html! {
                    input
                        name="value"
                        id="value"
                        type="text"
                        inputmode="decimal"
                        placeholder="100,00"
                        required
                        value=(values.value)
                        class=(FORM_TEXT_INPUT_STYLE);
                },
            ))

            div class="flex gap-2 self-end"
            {
                @if layout == FormLayout::Dialog {
                    button
                        type="button"
                        class=(BUTTON_SECONDARY_STYLE)
                        onclick="this.closest('dialog').close()"
                    {
                        "Cancelar"
                    }
                }

                button type="submit" id="submit-button" class=(BUTTON_PRIMARY_STYLE)
                {
                    span id="indicator" class="inline htmx-indicator" { (spinner) }
                    "Adicionar"
                }
            }
        }
    }
}

fn form_field(
    name: &str,
    label: &str,
    description: &str,
    error: Option<&Error>,
    control: Markup,
) -> Markup {
    html! {
        div aria-invalid=[error.map(|_| "true")]
        {
            label for=(name) class=(FORM_LABEL_STYLE) { (label) }

            (control)

            p class=(FORM_DESCRIPTION_STYLE) { (description) }

            @if let Some(error) = error {
                p id=(format!("{name}-error")) class=(FORM_ERROR_STYLE) { (error.to_string()) }
            }
        }
    }
}

/// Render the form as it sits on the page for `layout`.
///
/// In the dialog layout the form is wrapped in a `<dialog>` opened by a
/// button. `open_dialog` shows the dialog straight away, which is used when a
/// submission without JavaScript failed validation.
pub fn transaction_form_section(
    layout: FormLayout,
    values: &TransactionFormData,
    errors: &FieldErrors,
    open_dialog: bool,
) -> Markup {
    let form = transaction_form(layout, values, errors);

    match layout {
        FormLayout::Inline => form,
        FormLayout::Dialog => html! {
            div
            {
                button
                    type="button"
                    id="open-dialog-button"
                    class=(BUTTON_PRIMARY_STYLE)
                    onclick=(format!("document.getElementById('{DIALOG_ID}').showModal()"))
                {
                    "Adicionar lançamento"
                }

                dialog
                    id=(DIALOG_ID)
                    open[open_dialog]
                    class="w-full max-w-md p-6 rounded-lg shadow bg-white dark:bg-gray-800
                        text-gray-900 dark:text-white"
                {
                    h2 class="mb-4 text-xl font-bold" { "Adicionar lançamento" }

                    (form)
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        Error, endpoints,
        test_utils::{
            assert_form_input_with_value, assert_form_submit_button_with_text, assert_hx_endpoint,
            assert_valid_html, must_get_form,
        },
        transaction::core::{Description, Transaction, TransactionType, TransactionValue},
    };

    use super::{
        DIALOG_ID, FieldErrors, FormLayout, TransactionFormData, transaction_form,
        transaction_form_section,
    };

    fn valid_form() -> TransactionFormData {
        TransactionFormData {
            type_: "income".to_owned(),
            date: "2024-05-01".to_owned(),
            description: "Salário".to_owned(),
            category: " Trabalho ".to_owned(),
            account: "".to_owned(),
            value: "5000,00".to_owned(),
        }
    }

    #[test]
    fn valid_form_builds_transaction() {
        let got = valid_form().validate();

        assert_eq!(
            got,
            Ok(Transaction {
                transaction_type: TransactionType::Income,
                date: date!(2024 - 05 - 01),
                description: Description::new("Salário").unwrap(),
                category: Some(" Trabalho ".to_owned()),
                account: None,
                value: TransactionValue::new("5000,00").unwrap(),
            })
        );
    }

    #[test]
    fn short_description_is_a_field_error() {
        let form = TransactionFormData {
            description: "ab".to_owned(),
            ..valid_form()
        };

        let errors = form.validate().unwrap_err();

        assert_eq!(
            errors,
            FieldErrors {
                description: Some(Error::DescriptionTooShort),
                ..Default::default()
            }
        );
    }

    #[test]
    fn empty_value_is_a_field_error() {
        let form = TransactionFormData {
            value: "".to_owned(),
            ..valid_form()
        };

        let errors = form.validate().unwrap_err();

        assert_eq!(
            errors,
            FieldErrors {
                value: Some(Error::EmptyValue),
                ..Default::default()
            }
        );
    }

    #[test]
    fn keeps_fields_as_typed() {
        let form = TransactionFormData {
            description: " ab ".to_owned(),
            value: "  ".to_owned(),
            ..valid_form()
        };

        let transaction = form.validate().unwrap();

        assert_eq!(transaction.description.as_ref(), " ab ");
        assert_eq!(transaction.value.as_ref(), "  ");
    }

    #[test]
    fn field_errors_can_be_copied_for_rerendering() {
        let form = TransactionFormData {
            description: "ab".to_owned(),
            value: "".to_owned(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();

        let copy = errors.clone();

        assert_eq!(copy, errors);
        assert!(!copy.is_empty());
    }

    #[test]
    fn reports_every_invalid_field() {
        let form = TransactionFormData {
            type_: "gift".to_owned(),
            date: "01/05/2024".to_owned(),
            description: "".to_owned(),
            value: "".to_owned(),
            ..valid_form()
        };

        let errors = form.validate().unwrap_err();

        assert_eq!(
            errors,
            FieldErrors {
                transaction_type: Some(Error::InvalidTransactionType("gift".to_owned())),
                date: Some(Error::InvalidDate("01/05/2024".to_owned())),
                description: Some(Error::DescriptionTooShort),
                value: Some(Error::EmptyValue),
            }
        );
    }

    #[test]
    fn missing_fields_deserialize_as_empty() {
        let form: TransactionFormData =
            serde_json::from_str(r#"{"description": "Cerveja"}"#).unwrap();

        assert_eq!(form.value, "");
        assert_eq!(form.validate().unwrap_err().value, Some(Error::EmptyValue));
    }

    #[test]
    fn parses_form_layouts() {
        assert_eq!("inline".parse(), Ok(FormLayout::Inline));
        assert_eq!("Dialog".parse(), Ok(FormLayout::Dialog));
        assert_eq!(
            "modal".parse::<FormLayout>(),
            Err(Error::UnknownFormLayout("modal".to_owned()))
        );
    }

    #[test]
    fn new_form_has_defaults() {
        let values = TransactionFormData::new(date!(2024 - 05 - 01));
        let markup = transaction_form(FormLayout::Inline, &values, &FieldErrors::default());
        let html = Html::parse_fragment(&markup.into_string());
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::TRANSACTIONS_API, "hx-post");
        assert_form_input_with_value(&form, "date", "date", "2024-05-01");
        assert_form_input_with_value(&form, "description", "text", "");
        assert_form_input_with_value(&form, "value", "text", "0");
        assert_form_submit_button_with_text(&form, "Adicionar");

        let selected = html
            .select(&Selector::parse("select[name=type_] option[selected]").unwrap())
            .filter_map(|option| option.value().attr("value"))
            .collect::<Vec<_>>();
        assert_eq!(selected, vec!["expense"]);

        let error_count = html.select(&Selector::parse("p[id$='-error']").unwrap()).count();
        assert_eq!(error_count, 0, "want no error messages, got {error_count}");
    }

    #[test]
    fn offers_all_transaction_types() {
        let values = TransactionFormData::new(date!(2024 - 05 - 01));
        let markup = transaction_form(FormLayout::Inline, &values, &FieldErrors::default());
        let html = Html::parse_fragment(&markup.into_string());

        let labels = html
            .select(&Selector::parse("select[name=type_] option").unwrap())
            .map(|option| option.text().collect::<String>())
            .collect::<Vec<_>>();

        assert_eq!(labels, vec!["Despesa", "Receita", "Transferência"]);
    }

    #[test]
    fn shows_error_under_invalid_field_and_keeps_input() {
        let values = TransactionFormData {
            description: "ab".to_owned(),
            ..valid_form()
        };
        let errors = values.validate().unwrap_err();

        let markup = transaction_form(FormLayout::Inline, &values, &errors);
        let html = Html::parse_fragment(&markup.into_string());
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_form_input_with_value(&form, "description", "text", "ab");
        let message = html
            .select(&Selector::parse("#description-error").unwrap())
            .next()
            .expect("want description error message")
            .text()
            .collect::<String>();
        assert_eq!(message, "Descrição muito curta");

        let error_count = html.select(&Selector::parse("p[id$='-error']").unwrap()).count();
        assert_eq!(error_count, 1, "want 1 error message, got {error_count}");
    }

    #[test]
    fn dialog_layout_wraps_form_in_closed_dialog() {
        let values = TransactionFormData::new(date!(2024 - 05 - 01));

        let markup =
            transaction_form_section(FormLayout::Dialog, &values, &FieldErrors::default(), false);
        let html = Html::parse_fragment(&markup.into_string());
        assert_valid_html(&html);

        let dialog = html
            .select(&Selector::parse(&format!("dialog#{DIALOG_ID}")).unwrap())
            .next()
            .expect("want dialog element");
        assert!(dialog.value().attr("open").is_none(), "want dialog closed");
        assert!(
            dialog.select(&Selector::parse("form").unwrap()).next().is_some(),
            "want form inside dialog"
        );
        assert!(
            html.select(&Selector::parse("#open-dialog-button").unwrap())
                .next()
                .is_some(),
            "want button that opens the dialog"
        );
    }

    #[test]
    fn inline_layout_has_no_dialog() {
        let values = TransactionFormData::new(date!(2024 - 05 - 01));

        let markup =
            transaction_form_section(FormLayout::Inline, &values, &FieldErrors::default(), true);
        let html = Html::parse_fragment(&markup.into_string());

        assert!(html.select(&Selector::parse("dialog").unwrap()).next().is_none());
        assert!(html.select(&Selector::parse("form").unwrap()).next().is_some());
    }
}
