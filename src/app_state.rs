//! Implements a struct that holds the state of the server.

use std::sync::{Arc, Mutex};

use crate::{
    AppConfig,
    transaction::{FormLayout, TableColumns, TransactionList},
};

/// The state of the server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The transactions entered since the server started.
    ///
    /// Only the transaction form endpoint appends to this list.
    pub transactions: Arc<Mutex<TransactionList>>,

    /// The columns shown in the transaction table.
    pub table_columns: TableColumns,

    /// How the transaction form is placed on the page.
    pub form_layout: FormLayout,

    /// The local timezone as a canonical timezone name, e.g. "America/Sao_Paulo".
    pub local_timezone: String,
}

impl AppState {
    /// Create a new [AppState] with an empty transaction list.
    pub fn new(config: &AppConfig) -> Self {
        Self::with_transactions(config, TransactionList::new())
    }

    /// Create a new [AppState] that starts with `transactions`.
    pub fn with_transactions(config: &AppConfig, transactions: TransactionList) -> Self {
        Self {
            transactions: Arc::new(Mutex::new(transactions)),
            table_columns: config.table_columns.clone(),
            form_layout: config.form_layout,
            local_timezone: config.local_timezone.clone(),
        }
    }
}
