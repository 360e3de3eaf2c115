use std::net::SocketAddr;

use time::macros::date;

use crate::{
    AppConfig,
    transaction::{
        FormLayout, TableColumns,
        core::{Description, Transaction, TransactionType, TransactionValue},
    },
};

pub fn test_config(form_layout: FormLayout, table_columns: &str) -> AppConfig {
    AppConfig::new(
        SocketAddr::from(([127, 0, 0, 1], 3000)),
        "Etc/UTC",
        table_columns
            .parse::<TableColumns>()
            .expect("Could not parse table columns"),
        form_layout,
    )
    .expect("Could not create test config")
}

pub fn sample_transaction(description: &str, value: &str) -> Transaction {
    Transaction {
        transaction_type: TransactionType::Expense,
        date: date!(2024 - 05 - 01),
        description: Description::new(description).expect("Invalid test description"),
        category: None,
        account: None,
        value: TransactionValue::new(value).expect("Invalid test value"),
    }
}
