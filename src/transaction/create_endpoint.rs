//! Defines the endpoint for adding a transaction from the transaction form.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use axum_htmx::{HxRedirect, HxRequest};

use crate::{
    AppState, Error, endpoints,
    transaction::{
        core::TransactionList,
        form::{FieldErrors, FormLayout, TransactionFormData, transaction_form},
        page::transactions_page_view,
        table::TableColumns,
    },
};

/// The state needed to add a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The list that new transactions are appended to.
    pub transactions: Arc<Mutex<TransactionList>>,
    /// The columns shown in the transaction table.
    pub table_columns: TableColumns,
    /// How the transaction form is placed on the page.
    pub form_layout: FormLayout,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transactions: state.transactions.clone(),
            table_columns: state.table_columns.clone(),
            form_layout: state.form_layout,
        }
    }
}

/// A route handler for adding a transaction, redirects to the page on success.
///
/// When validation fails nothing is added. htmx requests get the form back
/// with a message under each invalid field; other requests get the whole page.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    HxRequest(is_htmx_request): HxRequest,
    Form(form): Form<TransactionFormData>,
) -> Response {
    let transaction = match form.validate() {
        Ok(transaction) => transaction,
        Err(errors) => {
            tracing::debug!("rejected transaction form {form:?}: {errors:?}");

            return if is_htmx_request {
                transaction_form(state.form_layout, &form, &errors).into_response()
            } else {
                render_page_with_errors(&state, &form, &errors)
            };
        }
    };

    let mut transactions = match state.transactions.lock() {
        Ok(transactions) => transactions,
        Err(error) => {
            tracing::error!("could not acquire transaction list lock: {error}");
            return if is_htmx_request {
                Error::TransactionListLockError.into_alert_response()
            } else {
                Error::TransactionListLockError.into_response()
            };
        }
    };

    tracing::info!(
        "adding transaction \"{}\" with value {}",
        transaction.description,
        transaction.value
    );
    transactions.push(transaction);

    if is_htmx_request {
        (
            HxRedirect(endpoints::ROOT.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response()
    } else {
        Redirect::to(endpoints::ROOT).into_response()
    }
}

fn render_page_with_errors(
    state: &CreateTransactionState,
    form: &TransactionFormData,
    errors: &FieldErrors,
) -> Response {
    let transactions = match state.transactions.lock() {
        Ok(transactions) => transactions,
        Err(error) => {
            tracing::error!("could not acquire transaction list lock: {error}");
            return Error::TransactionListLockError.into_response();
        }
    };

    let page = transactions_page_view(
        state.form_layout,
        &state.table_columns,
        transactions.as_slice(),
        form,
        errors,
    );

    (StatusCode::UNPROCESSABLE_ENTITY, page).into_response()
}
