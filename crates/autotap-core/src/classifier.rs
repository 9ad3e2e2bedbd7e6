//! Page classifier.
//!
//! Maps the foreground screen to a [`PageState`] using a fixed priority
//! order, so an ambiguous screen always resolves the same way:
//!
//! 1. captcha activity signature
//! 2. refresh marker present (network error)
//! 3. order activity signature
//! 4. date selector present (and the target package in front, if set)
//! 5. unknown

use std::sync::Arc;

use autotap_config::{MarkersConfig, SignaturesConfig};
use autotap_protocols::{PageState, UiTreeProvider};
use tracing::debug;

use crate::query;

/// One classification together with the signals it was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub state: PageState,
    pub activity: Option<String>,
    pub package: Option<String>,
}

pub struct PageClassifier {
    provider: Arc<dyn UiTreeProvider>,
    refresh_id: String,
    date_container_id: String,
    signatures: SignaturesConfig,
}

impl PageClassifier {
    pub fn new(
        provider: Arc<dyn UiTreeProvider>,
        markers: &MarkersConfig,
        signatures: &SignaturesConfig,
    ) -> Self {
        Self {
            provider,
            refresh_id: markers.refresh_id.clone(),
            date_container_id: markers.date_container_id.clone(),
            signatures: signatures.clone(),
        }
    }

    pub fn provider(&self) -> &Arc<dyn UiTreeProvider> {
        &self.provider
    }

    /// Classify the current screen from freshly fetched state.
    pub async fn classify(&self) -> Classification {
        let activity = self.provider.foreground_activity().await;
        let package = self.provider.foreground_package().await;
        let state = self.decide(activity.as_deref(), package.as_deref()).await;

        debug!(
            "Classified page as {} (activity: {:?}, package: {:?})",
            state, activity, package
        );

        Classification {
            state,
            activity,
            package,
        }
    }

    async fn decide(&self, activity: Option<&str>, package: Option<&str>) -> PageState {
        let signature = activity.unwrap_or_default();

        if signature.contains(self.signatures.captcha_activity.as_str()) {
            return PageState::CaptchaChallenge;
        }

        let tree = self.provider.foreground_tree().await;
        let has = |id: &str| {
            tree.as_ref()
                .is_some_and(|root| query::find_by_id(root, id).is_some())
        };

        if has(&self.refresh_id) {
            return PageState::NetworkError;
        }

        if signature.contains(self.signatures.order_activity.as_str()) {
            return PageState::OrderPage;
        }

        if has(&self.date_container_id) && self.target_in_front(package) {
            return PageState::TicketSelectionPage;
        }

        PageState::Unknown
    }

    fn target_in_front(&self, package: Option<&str>) -> bool {
        let target = self.signatures.target_package.as_str();
        target.is_empty() || package.is_some_and(|p| p.contains(target))
    }
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;
