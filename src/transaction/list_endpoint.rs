//! Defines the endpoint that lists transactions as JSON.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};

use crate::{
    AppState, Error,
    transaction::core::{Transaction, TransactionList},
};

/// The state needed to list transactions.
#[derive(Debug, Clone)]
pub struct ListTransactionsState {
    pub transactions: Arc<Mutex<TransactionList>>,
}

impl FromRef<AppState> for ListTransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transactions: state.transactions.clone(),
        }
    }
}

/// A route handler that returns every transaction in the order they were added.
pub async fn list_transactions_endpoint(
    State(state): State<ListTransactionsState>,
) -> Result<Json<Vec<Transaction>>, Error> {
    let transactions = state
        .transactions
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire transaction list lock: {error}"))
        .map_err(|_| Error::TransactionListLockError)?;

    Ok(Json(transactions.as_slice().to_vec()))
}
