//! Page-state classification result.

use serde::{Deserialize, Serialize};

/// Coarse classification of the screen the foreground app currently shows.
///
/// Derived fresh on every poll and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageState {
    CaptchaChallenge,
    NetworkError,
    OrderPage,
    TicketSelectionPage,
    Unknown,
}

impl Default for PageState {
    fn default() -> Self {
        Self::Unknown
    }
}

impl std::fmt::Display for PageState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageState::CaptchaChallenge => write!(f, "captcha_challenge"),
            PageState::NetworkError => write!(f, "network_error"),
            PageState::OrderPage => write!(f, "order_page"),
            PageState::TicketSelectionPage => write!(f, "ticket_selection_page"),
            PageState::Unknown => write!(f, "unknown"),
        }
    }
}
