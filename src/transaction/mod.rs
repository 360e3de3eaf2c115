//! Transaction entry for the finance page.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model, its validated fields and the in-memory `TransactionList`
//! - The transaction form with its field validation
//! - The table that lists transactions with configurable columns
//! - The page and endpoint handlers

mod core;
mod create_endpoint;
mod form;
mod list_endpoint;
mod page;
mod table;

#[cfg(test)]
pub(crate) mod test_utils;

pub use core::{
    Description, MIN_DESCRIPTION_LENGTH, Transaction, TransactionList, TransactionType,
    TransactionValue,
};
pub use create_endpoint::create_transaction_endpoint;
pub use form::FormLayout;
pub use list_endpoint::list_transactions_endpoint;
pub use page::get_transactions_page;
pub use table::{Column, TableColumns};
