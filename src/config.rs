//! Server configuration that is validated before the server starts.

use std::net::SocketAddr;

use crate::{
    Error,
    timezone::get_local_offset,
    transaction::{FormLayout, TableColumns},
};

/// The validated settings for running the server.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// The address and port to serve the page from.
    pub address: SocketAddr,
    /// The local timezone as a canonical timezone name, e.g. "America/Sao_Paulo".
    pub local_timezone: String,
    /// The columns shown in the transaction table.
    pub table_columns: TableColumns,
    /// How the transaction form is placed on the page.
    pub form_layout: FormLayout,
}

impl AppConfig {
    /// Create a new [AppConfig].
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if `local_timezone` is not a
    /// valid, canonical timezone name.
    pub fn new(
        address: SocketAddr,
        local_timezone: &str,
        table_columns: TableColumns,
        form_layout: FormLayout,
    ) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        Ok(Self {
            address,
            local_timezone: local_timezone.to_owned(),
            table_columns,
            form_layout,
        })
    }
}
