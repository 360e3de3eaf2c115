//! Defines the route handler for the page with the transaction form and table.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    html::{PAGE_CONTAINER_STYLE, base},
    timezone::current_local_date,
    transaction::{
        core::{Transaction, TransactionList},
        form::{FieldErrors, FormLayout, TransactionFormData, transaction_form_section},
        table::{TableColumns, transaction_table},
    },
};

/// The state needed to render the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionPageState {
    /// The transactions entered so far.
    pub transactions: Arc<Mutex<TransactionList>>,
    /// The columns shown in the transaction table.
    pub table_columns: TableColumns,
    /// How the transaction form is placed on the page.
    pub form_layout: FormLayout,
    /// The local timezone as a canonical timezone name, e.g. "America/Sao_Paulo".
    pub local_timezone: String,
}

impl FromRef<AppState> for TransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transactions: state.transactions.clone(),
            table_columns: state.table_columns.clone(),
            form_layout: state.form_layout,
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Renders the page with an empty form and the table of transactions.
pub async fn get_transactions_page(
    State(state): State<TransactionPageState>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;

    let transactions = state
        .transactions
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire transaction list lock: {error}"))
        .map_err(|_| Error::TransactionListLockError)?;

    Ok(transactions_page_view(
        state.form_layout,
        &state.table_columns,
        transactions.as_slice(),
        &TransactionFormData::new(today),
        &FieldErrors::default(),
    )
    .into_response())
}

/// The full page: the form filled in with `values` and `errors`, followed by the table.
///
/// In the dialog layout the dialog starts open when `errors` is not empty.
pub fn transactions_page_view(
    layout: FormLayout,
    columns: &TableColumns,
    transactions: &[Transaction],
    values: &TransactionFormData,
    errors: &FieldErrors,
) -> Markup {
    let form = transaction_form_section(layout, values, errors, !errors.is_empty());
    let table = transaction_table(transactions, columns);

    let content = html! {
        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full bg-white rounded-lg shadow dark:bg-gray-800 p-6 flex flex-col gap-12"
            {
                header
                {
                    h1 class="text-2xl font-semibold" { "Extratify" }
                    p class="text-sm text-gray-500 dark:text-gray-400" { "Adicionar lançamento" }
                }

                (form)

                (table)
            }
        }
    };

    base("Lançamentos", &content)
}
