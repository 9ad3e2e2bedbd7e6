//! Configuration schema definitions.
//!
//! Every value has a default that targets the stock ticketing app, so an
//! empty file is a complete configuration.

use serde::{Deserialize, Serialize};

mod schema_channels;

pub use schema_channels::*;

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;

/// Shared default helper used by submodules.
pub(crate) fn default_true() -> bool {
    true
}

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub markers: MarkersConfig,

    #[serde(default)]
    pub signatures: SignaturesConfig,

    #[serde(default)]
    pub timing: TimingConfig,

    #[serde(default)]
    pub workflow: WorkflowConfig,

    #[serde(default)]
    pub captcha: CaptchaConfig,

    #[serde(default)]
    pub channels: ChannelsConfig,
}

/// An `(id, text)` pair that flags a price option as unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutOfStockMarker {
    pub id: String,
    pub text: String,
}

impl OutOfStockMarker {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Resource ids and texts that identify controls of the target app.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkersConfig {
    /// Entry button clicked once before the loop starts.
    #[serde(default = "default_buy_entry_id")]
    pub buy_entry_id: String,

    /// Refresh button shown on the network error page.
    #[serde(default = "default_refresh_id")]
    pub refresh_id: String,

    #[serde(default = "default_date_container_id")]
    pub date_container_id: String,

    #[serde(default = "default_price_container_id")]
    pub price_container_id: String,

    #[serde(default = "default_buy_id")]
    pub buy_id: String,

    /// Class of the order-page submit control.
    #[serde(default = "default_submit_class")]
    pub submit_class: String,

    #[serde(default = "default_submit_text")]
    pub submit_text: String,

    #[serde(default = "default_out_of_stock")]
    pub out_of_stock: Vec<OutOfStockMarker>,
}

impl Default for MarkersConfig {
    fn default() -> Self {
        Self {
            buy_entry_id: default_buy_entry_id(),
            refresh_id: default_refresh_id(),
            date_container_id: default_date_container_id(),
            price_container_id: default_price_container_id(),
            buy_id: default_buy_id(),
            submit_class: default_submit_class(),
            submit_text: default_submit_text(),
            out_of_stock: default_out_of_stock(),
        }
    }
}

fn default_buy_entry_id() -> String {
    "cn.damai:id/trade_project_detail_purchase_status_bar_container_fl".to_string()
}

fn default_refresh_id() -> String {
    "cn.damai:id/state_view_refresh_btn".to_string()
}

fn default_date_container_id() -> String {
    "cn.damai:id/project_detail_perform_flowlayout".to_string()
}

fn default_price_container_id() -> String {
    "cn.damai:id/project_detail_perform_price_flowlayout".to_string()
}

fn default_buy_id() -> String {
    "cn.damai:id/bottom_layout".to_string()
}

fn default_submit_class() -> String {
    "android.widget.TextView".to_string()
}

fn default_submit_text() -> String {
    "立即提交".to_string()
}

fn default_out_of_stock() -> Vec<OutOfStockMarker> {
    vec![
        OutOfStockMarker::new("cn.damai:id/layout_tag", "缺货登记"),
        OutOfStockMarker::new("cn.damai:id/layout_tag", "可预约"),
    ]
}

/// Activity signatures used by the page classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignaturesConfig {
    #[serde(default = "default_captcha_activity")]
    pub captcha_activity: String,

    #[serde(default = "default_order_activity")]
    pub order_activity: String,

    /// When non-empty, the ticket selection page is only recognized while
    /// this package is in the foreground.
    #[serde(default = "default_target_package")]
    pub target_package: String,
}

impl Default for SignaturesConfig {
    fn default() -> Self {
        Self {
            captcha_activity: default_captcha_activity(),
            order_activity: default_order_activity(),
            target_package: default_target_package(),
        }
    }
}

fn default_captcha_activity() -> String {
    "com.alibaba.wireless.security.open.middletier.fc.ui.ContainerActivity".to_string()
}

fn default_order_activity() -> String {
    ".ultron.view.activity.DmOrderActivity".to_string()
}

fn default_target_package() -> String {
    "cn.damai".to_string()
}

/// Fixed waits after each workflow step, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    #[serde(default = "default_captcha_settle_ms")]
    pub captcha_settle_ms: u64,

    #[serde(default = "default_refresh_settle_ms")]
    pub refresh_settle_ms: u64,

    #[serde(default = "default_no_dates_ms")]
    pub no_dates_ms: u64,

    #[serde(default = "default_after_date_ms")]
    pub after_date_ms: u64,

    #[serde(default = "default_after_price_ms")]
    pub after_price_ms: u64,

    #[serde(default = "default_after_buy_ms")]
    pub after_buy_ms: u64,

    #[serde(default = "default_unknown_ms")]
    pub unknown_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            captcha_settle_ms: default_captcha_settle_ms(),
            refresh_settle_ms: default_refresh_settle_ms(),
            no_dates_ms: default_no_dates_ms(),
            after_date_ms: default_after_date_ms(),
            after_price_ms: default_after_price_ms(),
            after_buy_ms: default_after_buy_ms(),
            unknown_ms: default_unknown_ms(),
        }
    }
}

fn default_captcha_settle_ms() -> u64 {
    3000
}

fn default_refresh_settle_ms() -> u64 {
    3000
}

fn default_no_dates_ms() -> u64 {
    1000
}

fn default_after_date_ms() -> u64 {
    500
}

fn default_after_price_ms() -> u64 {
    500
}

fn default_after_buy_ms() -> u64 {
    2000
}

fn default_unknown_ms() -> u64 {
    2000
}

/// Workflow run parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Attempts allowed before the run ends as exhausted.
    #[serde(default = "default_retry_budget")]
    pub retry_budget: u64,

    /// Click the buy-entry marker once before the loop starts.
    #[serde(default = "default_true")]
    pub prime_buy_entry: bool,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            retry_budget: default_retry_budget(),
            prime_buy_entry: true,
        }
    }
}

fn default_retry_budget() -> u64 {
    99_999_999
}

/// Captcha page heuristics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptchaConfig {
    /// Container holding the retry control.
    #[serde(default = "default_retry_container_id")]
    pub retry_container_id: String,

    /// Substring identifying the retry control inside the container.
    #[serde(default = "default_retry_text")]
    pub retry_text: String,

    #[serde(default = "default_slider_track_id")]
    pub slider_track_id: String,

    #[serde(default = "default_slider_handle_id")]
    pub slider_handle_id: String,

    /// Maximum coordinate jitter, in pixels, applied to slide endpoints.
    #[serde(default = "default_jitter_px")]
    pub jitter_px: u32,

    #[serde(default = "default_min_slide_ms")]
    pub min_slide_ms: u64,

    #[serde(default = "default_max_slide_ms")]
    pub max_slide_ms: u64,
}

impl Default for CaptchaConfig {
    fn default() -> Self {
        Self {
            retry_container_id: default_retry_container_id(),
            retry_text: default_retry_text(),
            slider_track_id: default_slider_track_id(),
            slider_handle_id: default_slider_handle_id(),
            jitter_px: default_jitter_px(),
            min_slide_ms: default_min_slide_ms(),
            max_slide_ms: default_max_slide_ms(),
        }
    }
}

fn default_retry_container_id() -> String {
    "nc_1_refresh1".to_string()
}

fn default_retry_text() -> String {
    "重试".to_string()
}

fn default_slider_track_id() -> String {
    "nc_1_n1t".to_string()
}

fn default_slider_handle_id() -> String {
    "nc_1_n1z".to_string()
}

fn default_jitter_px() -> u32 {
    5
}

fn default_min_slide_ms() -> u64 {
    1000
}

fn default_max_slide_ms() -> u64 {
    1500
}
