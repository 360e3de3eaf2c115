//! Alert messages that are swapped into the page's alert container.
//!
//! Form endpoints respond with an alert when something outside of the user's
//! control goes wrong, e.g. the transaction list is unavailable. The base page
//! routes error responses into `#alert-container` via `hx-target-error`.

use maud::{Markup, html};

/// An error message with optional details.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub message: String,
    pub details: String,
}

impl Alert {
    /// Create a new error alert.
    pub fn error(message: &str, details: &str) -> Self {
        Self {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    pub fn into_html(self) -> Markup {
        // Template adapted from https://flowbite.com/docs/components/alerts/
        html! {
            div
                role="alert"
                class="flex items-start gap-3 p-4 mb-4 text-sm rounded-lg shadow
                    text-red-800 bg-red-50 dark:bg-gray-800 dark:text-red-400"
            {
                div class="flex-1"
                {
                    p class="font-medium" { (self.message) }

                    @if !self.details.is_empty() {
                        p { (self.details) }
                    }
                }

                button
                    type="button"
                    aria-label="Fechar"
                    class="font-bold"
                    onclick="this.closest('[role=alert]').remove()"
                {
                    "×"
                }
            }
        }
    }
}
