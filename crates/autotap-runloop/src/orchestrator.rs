//! Workflow orchestrator.
//!
//! One run is a sequential loop: check cancellation, classify the current
//! page, perform the page's step, wait a fixed time for the app to react.
//! Iterations never overlap and every decision is taken on a freshly
//! fetched tree.

use std::sync::Arc;
use std::time::Duration;

use autotap_config::{CaptchaConfig, Config, MarkersConfig, TimingConfig};
use autotap_core::{query, ActionDispatcher, PageClassifier};
use autotap_protocols::{PageState, SearchCriteria, UiNode, UiTreeProvider};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::slide::SlidePlanner;
use crate::state::{TerminalState, WorkflowOutcome, WorkflowRun};

/// A wait was cut short by cancellation.
struct Interrupted;

/// What the loop does after a page step.
enum Step {
    Continue,
    Spend,
}

pub struct WorkflowOrchestrator {
    provider: Arc<dyn UiTreeProvider>,
    dispatcher: Arc<ActionDispatcher>,
    classifier: PageClassifier,
    planner: SlidePlanner,
    markers: MarkersConfig,
    timing: TimingConfig,
    captcha: CaptchaConfig,
    retry_budget: u64,
    prime_buy_entry: bool,
}

impl WorkflowOrchestrator {
    pub fn new(
        config: &Config,
        provider: Arc<dyn UiTreeProvider>,
        dispatcher: Arc<ActionDispatcher>,
    ) -> Self {
        Self::with_planner(config, provider, dispatcher, SlidePlanner::new(&config.captcha))
    }

    pub fn with_planner(
        config: &Config,
        provider: Arc<dyn UiTreeProvider>,
        dispatcher: Arc<ActionDispatcher>,
        planner: SlidePlanner,
    ) -> Self {
        let classifier = PageClassifier::new(provider.clone(), &config.markers, &config.signatures);
        Self {
            provider,
            dispatcher,
            classifier,
            planner,
            markers: config.markers.clone(),
            timing: config.timing.clone(),
            captcha: config.captcha.clone(),
            retry_budget: config.workflow.retry_budget,
            prime_buy_entry: config.workflow.prime_buy_entry,
        }
    }

    pub fn classifier(&self) -> &PageClassifier {
        &self.classifier
    }

    /// Run until cancelled, out of retries, or the order page is reached.
    ///
    /// This drives a single run on the caller's task and does not guard
    /// against concurrent runs on the same device. Applications go through
    /// [`WorkflowController`](crate::WorkflowController), which enforces one
    /// active run and owns the cancellation token.
    pub async fn run(&self, cancel: CancellationToken) -> WorkflowOutcome {
        let mut run = WorkflowRun::new(self.retry_budget, cancel);
        info!("Workflow started (retry budget: {})", run.budget);

        if run.cancel.is_cancelled() {
            return run.finish(TerminalState::Stopped, false);
        }

        if self.prime_buy_entry {
            self.prime().await;
        }

        loop {
            if run.cancel.is_cancelled() {
                return run.finish(TerminalState::Stopped, false);
            }

            run.iterations += 1;
            run.page = self.classifier.classify().await.state;
            debug!("Iteration {} on {}", run.iterations, run.page);

            let step = match run.page {
                PageState::CaptchaChallenge => self.on_captcha(&run).await,
                PageState::NetworkError => self.on_network_error(&run).await,
                PageState::OrderPage => {
                    let submitted = self.submit_order().await;
                    return run.finish(TerminalState::Completed, submitted);
                }
                PageState::TicketSelectionPage => self.on_ticket_selection(&mut run).await,
                PageState::Unknown => self.on_unknown(&run).await,
            };

            match step {
                Err(Interrupted) => return run.finish(TerminalState::Stopped, false),
                Ok(Step::Continue) => {}
                Ok(Step::Spend) => {
                    if run.spend() {
                        return run.finish(TerminalState::Exhausted, false);
                    }
                    debug!("Retries left: {}", run.budget);
                }
            }
        }
    }

    async fn prime(&self) {
        if self.click_by_id(&self.markers.buy_entry_id).await {
            info!("Clicked buy entry");
        } else {
            warn!("Buy entry click skipped or failed, continuing");
        }
    }

    async fn on_captcha(&self, run: &WorkflowRun) -> Result<Step, Interrupted> {
        if self.solve_captcha().await {
            self.pause(self.timing.captcha_settle_ms, &run.cancel).await?;
            Ok(Step::Continue)
        } else {
            Ok(Step::Spend)
        }
    }

    async fn on_network_error(&self, run: &WorkflowRun) -> Result<Step, Interrupted> {
        info!("Network error page, refreshing");
        if self.click_by_id(&self.markers.refresh_id).await {
            self.pause(self.timing.refresh_settle_ms, &run.cancel).await?;
            Ok(Step::Continue)
        } else {
            Ok(Step::Spend)
        }
    }

    async fn on_ticket_selection(&self, run: &mut WorkflowRun) -> Result<Step, Interrupted> {
        let dates = self.options_in(&self.markers.date_container_id, false).await;
        if dates.is_empty() {
            debug!("No date options yet");
            self.pause(self.timing.no_dates_ms, &run.cancel).await?;
            return Ok(Step::Continue);
        }

        let index = run.next_date(dates.len());
        let date = &dates[index];
        debug!("Selecting date {} of {}: {:?}", index + 1, dates.len(), date.text);
        if !self.dispatcher.click_node(date).await {
            warn!("Date click failed");
        }
        self.pause(self.timing.after_date_ms, &run.cancel).await?;

        let prices = self.options_in(&self.markers.price_container_id, true).await;
        if let Some(price) = prices.first() {
            debug!("Selecting price {:?}", price.text);
            if !self.dispatcher.click_node(price).await {
                warn!("Price click failed");
            }
            self.pause(self.timing.after_price_ms, &run.cancel).await?;
        }

        if let Some(buy) = self.fresh_node_by_id(&self.markers.buy_id).await {
            debug!("Clicking buy");
            if !self.dispatcher.click_node(&buy).await {
                warn!("Buy click failed");
            }
            self.pause(self.timing.after_buy_ms, &run.cancel).await?;
        }

        Ok(Step::Continue)
    }

    async fn on_unknown(&self, run: &WorkflowRun) -> Result<Step, Interrupted> {
        debug!("Unknown page, waiting");
        self.pause(self.timing.unknown_ms, &run.cancel).await?;
        Ok(Step::Spend)
    }

    /// Retry control first, slider heuristic second.
    async fn solve_captcha(&self) -> bool {
        let Some(tree) = self.provider.foreground_tree().await else {
            return false;
        };

        let retry = query::find_in_container(
            &tree,
            &self.captcha.retry_container_id,
            &SearchCriteria::new().text_contains(self.captcha.retry_text.as_str()),
        );
        if let Some(button) = retry.first() {
            info!("Captcha retry control found");
            return self.dispatcher.click_node(button).await;
        }

        let track = query::find_by_id(&tree, &self.captcha.slider_track_id);
        let handle = query::find_by_id(&tree, &self.captcha.slider_handle_id);
        let (Some(track), Some(handle)) = (track, handle) else {
            warn!("No solvable captcha element found");
            return false;
        };

        let plan = self.planner.plan(&track.bounds, &handle.bounds);
        info!(
            "Sliding captcha {} -> {} over {}ms",
            plan.from, plan.to, plan.duration_ms
        );
        self.dispatcher
            .drag(plan.from, plan.to, plan.duration_ms)
            .await
    }

    async fn submit_order(&self) -> bool {
        let Some(tree) = self.provider.foreground_tree().await else {
            warn!("Order page without a tree");
            return false;
        };

        let criteria = SearchCriteria::new()
            .class_name(self.markers.submit_class.as_str())
            .text(self.markers.submit_text.as_str());
        match query::find_first(&tree, &criteria) {
            Some(submit) => {
                info!("Submitting order");
                self.dispatcher.click_node(submit).await
            }
            None => {
                warn!("Submit control not found on order page");
                false
            }
        }
    }

    /// Clickable first-level children of a container in a fresh tree.
    /// Price options also have to be free of out-of-stock markers.
    async fn options_in(&self, container_id: &str, in_stock_only: bool) -> Vec<UiNode> {
        let Some(tree) = self.provider.foreground_tree().await else {
            return Vec::new();
        };
        let Some(container) = query::find_by_id(&tree, container_id) else {
            return Vec::new();
        };

        query::clickable_children(container)
            .into_iter()
            .filter(|option| {
                !in_stock_only || !query::subtree_has_marker(option, &self.markers.out_of_stock)
            })
            .cloned()
            .collect()
    }

    async fn fresh_node_by_id(&self, id: &str) -> Option<UiNode> {
        let tree = self.provider.foreground_tree().await?;
        query::find_by_id(&tree, id).cloned()
    }

    async fn click_by_id(&self, id: &str) -> bool {
        match self.fresh_node_by_id(id).await {
            Some(node) => self.dispatcher.click_node(&node).await,
            None => {
                debug!("Node {} not present", id);
                false
            }
        }
    }

    /// Fixed wait for the app to react, cut short only by cancellation.
    async fn pause(&self, ms: u64, cancel: &CancellationToken) -> Result<(), Interrupted> {
        tokio::select! {
            _ = cancel.cancelled() => Err(Interrupted),
            _ = sleep(Duration::from_millis(ms)) => Ok(()),
        }
    }
}
