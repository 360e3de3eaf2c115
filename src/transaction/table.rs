//! The table that lists transactions with a configurable set of columns.

use std::{fmt::Display, str::FromStr};

use maud::{Markup, html};
use time::{format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    Error,
    html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE},
    transaction::core::Transaction,
};

const DISPLAY_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[day]/[month]/[year]");

/// A column that can be shown in the transaction table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// When the transaction happened.
    Date,
    /// What the transaction was for.
    Description,
    /// The group of expenses.
    Category,
    /// The account money moved in or out of.
    Account,
    /// The amount of money.
    Value,
}

impl Column {
    /// All columns in their default order.
    pub const ALL: [Column; 5] = [
        Column::Date,
        Column::Description,
        Column::Category,
        Column::Account,
        Column::Value,
    ];

    /// The name used for this column in configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            Column::Date => "date",
            Column::Description => "description",
            Column::Category => "category",
            Column::Account => "account",
            Column::Value => "value",
        }
    }

    /// The text in the column's header cell.
    pub fn header(self) -> &'static str {
        match self {
            Column::Date => "Data",
            Column::Description => "Descrição",
            Column::Category => "Categoria",
            Column::Account => "Conta",
            Column::Value => "Valor",
        }
    }

    /// The text of this column's cell for `transaction`.
    pub fn cell_text(self, transaction: &Transaction) -> String {
        match self {
            Column::Date => transaction
                .date
                .format(DISPLAY_DATE_FORMAT)
                .unwrap_or_else(|error| {
                    tracing::error!("could not format date {}: {error}", transaction.date);
                    transaction.date.to_string()
                }),
            Column::Description => transaction.description.to_string(),
            Column::Category => transaction.category.clone().unwrap_or_default(),
            Column::Account => transaction.account.clone().unwrap_or_default(),
            Column::Value => transaction.value.to_string(),
        }
    }
}

impl FromStr for Column {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();

        Column::ALL
            .into_iter()
            .find(|column| column.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::UnknownColumn(name.to_owned()))
    }
}

impl Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An ordered, non-empty list of distinct table columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableColumns(Vec<Column>);

impl TableColumns {
    /// Create a column list.
    ///
    /// # Errors
    ///
    /// This function will return a:
    /// - [Error::NoColumns] if `columns` is empty,
    /// - or [Error::DuplicateColumn] if a column appears more than once.
    pub fn new(columns: Vec<Column>) -> Result<Self, Error> {
        if columns.is_empty() {
            return Err(Error::NoColumns);
        }

        for (i, column) in columns.iter().enumerate() {
            if columns[..i].contains(column) {
                return Err(Error::DuplicateColumn(column.to_string()));
            }
        }

        Ok(Self(columns))
    }

    /// The columns in display order.
    pub fn as_slice(&self) -> &[Column] {
        &self.0
    }
}

impl Default for TableColumns {
    fn default() -> Self {
        Self(Column::ALL.to_vec())
    }
}

impl FromStr for TableColumns {
    type Err = Error;

    /// Parse a comma-separated list of column names, e.g. "date,description,value".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let columns = s
            .split(',')
            .filter(|name| !name.trim().is_empty())
            .map(Column::from_str)
            .collect::<Result<Vec<_>, _>>()?;

        TableColumns::new(columns)
    }
}

impl Display for TableColumns {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = self
            .0
            .iter()
            .map(|column| column.as_str())
            .collect::<Vec<_>>();

        write!(f, "{}", names.join(","))
    }
}

/// Render `transactions` in list order, one cell per column in `columns`.
pub fn transaction_table(transactions: &[Transaction], columns: &TableColumns) -> Markup {
    let columns = columns.as_slice();

    html! {
        div class="relative overflow-x-auto shadow-md rounded-lg"
        {
            table
                id="transactions-table"
                class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        @for column in columns {
                            th scope="col" class=(TABLE_CELL_STYLE) { (column.header()) }
                        }
                    }
                }

                tbody
                {
                    @for transaction in transactions {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            @for column in columns {
                                td class=(TABLE_CELL_STYLE) { (column.cell_text(transaction)) }
                            }
                        }
                    }

                    @if transactions.is_empty() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td
                                colspan=(columns.len())
                                class="px-6 py-4 text-center"
                            {
                                "Nenhum lançamento."
                            }
                        }
                    }
                }
            }
        }
    }
}
