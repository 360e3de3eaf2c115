//! Defines the core data models for transactions.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::Date;
use unicode_segmentation::UnicodeSegmentation;

use crate::Error;

// ============================================================================
// MODELS
// ============================================================================

/// The minimum number of characters in a transaction description.
pub const MIN_DESCRIPTION_LENGTH: usize = 3;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Whether money was spent, earned or moved between accounts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money was spent.
    #[default]
    Expense,
    /// Money was earned.
    Income,
    /// Money was moved from one account to another.
    Transfer,
}

impl TransactionType {
    /// All transaction types in the order they are offered in the form.
    pub const ALL: [TransactionType; 3] = [
        TransactionType::Expense,
        TransactionType::Income,
        TransactionType::Transfer,
    ];

    /// The value used for this type in forms and JSON.
    pub fn as_form_value(self) -> &'static str {
        match self {
            TransactionType::Expense => "expense",
            TransactionType::Income => "income",
            TransactionType::Transfer => "transfer",
        }
    }

    /// The text shown to the user for this type.
    pub fn label(self) -> &'static str {
        match self {
            TransactionType::Expense => "Despesa",
            TransactionType::Income => "Receita",
            TransactionType::Transfer => "Transferência",
        }
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransactionType::ALL
            .into_iter()
            .find(|transaction_type| transaction_type.as_form_value() == s)
            .ok_or_else(|| Error::InvalidTransactionType(s.to_owned()))
    }
}

/// A validated transaction description with at least [MIN_DESCRIPTION_LENGTH] characters.
///
/// Characters are counted as extended grapheme clusters, so "Açaí" has four
/// characters no matter how its accents are encoded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Description(String);

impl Description {
    /// Create a description from `text` exactly as typed.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::DescriptionTooShort] if `text` has
    /// fewer than [MIN_DESCRIPTION_LENGTH] characters.
    pub fn new(text: &str) -> Result<Self, Error> {
        if text.graphemes(true).count() < MIN_DESCRIPTION_LENGTH {
            Err(Error::DescriptionTooShort)
        } else {
            Ok(Self(text.to_owned()))
        }
    }
}

impl AsRef<str> for Description {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Description {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Description {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Description::new(&value)
    }
}

impl From<Description> for String {
    fn from(value: Description) -> Self {
        value.0
    }
}

/// The amount of a transaction as the user typed it, e.g. "100,00".
///
/// The text is never parsed as a number, it is only required to be non-empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TransactionValue(String);

impl TransactionValue {
    /// Create a value from `text` exactly as typed.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyValue] if `text` is empty.
    pub fn new(text: &str) -> Result<Self, Error> {
        if text.is_empty() {
            Err(Error::EmptyValue)
        } else {
            Ok(Self(text.to_owned()))
        }
    }
}

impl AsRef<str> for TransactionValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for TransactionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for TransactionValue {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TransactionValue::new(&value)
    }
}

impl From<TransactionValue> for String {
    fn from(value: TransactionValue) -> Self {
        value.0
    }
}

/// An expense, income or transfer entered by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Whether money was spent, earned or moved.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// When the transaction happened.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// What the transaction was for.
    pub description: Description,
    /// A free-text group of expenses, e.g. "Educação".
    pub category: Option<String>,
    /// The account the money moved in or out of, e.g. "Carteira".
    pub account: Option<String>,
    /// The amount of money, as typed by the user.
    pub value: TransactionValue,
}

/// The transactions entered since the server started, in the order they were added.
///
/// The list only grows: there is no way to edit or remove a transaction.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TransactionList {
    transactions: Vec<Transaction>,
}

impl TransactionList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `transaction` to the end of the list.
    pub fn push(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    /// The transactions in the order they were added.
    pub fn as_slice(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The number of transactions in the list.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether no transactions have been added yet.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

impl FromIterator<Transaction> for TransactionList {
    fn from_iter<T: IntoIterator<Item = Transaction>>(iter: T) -> Self {
        Self {
            transactions: iter.into_iter().collect(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
