//! Configuration validation.

use std::collections::HashSet;

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Convert into an error when any validation error was recorded.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.first() {
            Some(first) => Err(ConfigError::InvalidValue {
                field: first.path.clone(),
                message: first.message.clone(),
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_markers(config, &mut result);
        Self::validate_signatures(config, &mut result);
        Self::validate_workflow(config, &mut result);
        Self::validate_captcha(config, &mut result);
        Self::validate_channels(config, &mut result);

        Ok(result)
    }

    fn validate_markers(config: &Config, result: &mut ValidationResult) {
        let markers = &config.markers;
        let required = [
            ("markers.refresh_id", &markers.refresh_id),
            ("markers.date_container_id", &markers.date_container_id),
            ("markers.price_container_id", &markers.price_container_id),
            ("markers.buy_id", &markers.buy_id),
            ("markers.submit_text", &markers.submit_text),
        ];
        for (path, value) in required {
            if value.is_empty() {
                result.add_error(ValidationError::new(path, "Marker cannot be empty"));
            }
        }

        if markers.buy_entry_id.is_empty() && config.workflow.prime_buy_entry {
            result.add_warning(ValidationWarning::new(
                "markers.buy_entry_id",
                "Buy entry marker is empty, the priming click will always be skipped",
            ));
        }

        for (i, marker) in markers.out_of_stock.iter().enumerate() {
            if marker.id.is_empty() || marker.text.is_empty() {
                result.add_error(ValidationError::new(
                    format!("markers.out_of_stock[{}]", i),
                    "Out-of-stock marker needs both id and text",
                ));
            }
        }
    }

    fn validate_signatures(config: &Config, result: &mut ValidationResult) {
        let signatures = &config.signatures;
        if signatures.captcha_activity.is_empty() {
            result.add_error(ValidationError::new(
                "signatures.captcha_activity",
                "Captcha signature cannot be empty, it would match every activity",
            ));
        }
        if signatures.order_activity.is_empty() {
            result.add_error(ValidationError::new(
                "signatures.order_activity",
                "Order signature cannot be empty, it would match every activity",
            ));
        }
        if signatures.target_package.is_empty() {
            result.add_warning(ValidationWarning::new(
                "signatures.target_package",
                "No target package set, ticket selection is recognized in any app",
            ));
        }
    }

    fn validate_workflow(config: &Config, result: &mut ValidationResult) {
        if config.workflow.retry_budget == 0 {
            result.add_error(ValidationError::new(
                "workflow.retry_budget",
                "retry_budget must be greater than 0",
            ));
        }
    }

    fn validate_captcha(config: &Config, result: &mut ValidationResult) {
        let captcha = &config.captcha;
        if captcha.min_slide_ms > captcha.max_slide_ms {
            result.add_error(ValidationError::new(
                "captcha.min_slide_ms",
                "min_slide_ms must not exceed max_slide_ms",
            ));
        }

        if captcha.jitter_px > 50 {
            result.add_warning(ValidationWarning::new(
                "captcha.jitter_px",
                "jitter_px is very high (>50), the slide may miss the handle",
            ));
        }

        if captcha.slider_track_id.is_empty() || captcha.slider_handle_id.is_empty() {
            result.add_warning(ValidationWarning::new(
                "captcha",
                "Slider ids are empty, the slider heuristic is disabled",
            ));
        }
    }

    fn validate_channels(config: &Config, result: &mut ValidationResult) {
        let channels = &config.channels;

        for (kind, order) in &channels.priority {
            let path = format!("channels.priority.{}", kind);
            if order.is_empty() {
                result.add_error(ValidationError::new(
                    path,
                    "Priority list cannot be empty",
                ));
                continue;
            }

            let mut seen = HashSet::new();
            for channel in order {
                if !seen.insert(*channel) {
                    result.add_warning(ValidationWarning::new(
                        path.clone(),
                        format!("Channel '{}' listed more than once", channel),
                    ));
                }
            }

            if order.iter().all(|c| !channels.is_enabled(*c)) {
                result.add_warning(ValidationWarning::new(
                    path,
                    "Every channel in this list is disabled",
                ));
            }
        }

        if channels.rpc.enabled && channels.rpc.command.is_none() {
            result.add_warning(ValidationWarning::new(
                "channels.rpc.command",
                "RPC helper command not set, the privileged channel will be skipped",
            ));
        }

        if channels.shell.enabled && channels.shell.prefix.is_empty() {
            result.add_error(ValidationError::new(
                "channels.shell.prefix",
                "Shell prefix needs at least the program name",
            ));
        }

        if !channels.rpc.enabled && !channels.shell.enabled && !channels.desktop.enabled {
            result.add_error(ValidationError::new(
                "channels",
                "At least one execution channel must be enabled",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
