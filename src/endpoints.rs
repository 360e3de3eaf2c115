//! The API endpoints URIs.

/// The page with the transaction form and table.
pub const ROOT: &str = "/";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The route to create transactions (POST) and list them as JSON (GET).
pub const TRANSACTIONS_API: &str = "/api/transactions";
