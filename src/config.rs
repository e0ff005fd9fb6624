//! Behavior configuration.
//!
//! Handles loading, validating, and merging `vitrine.toml`. Stock defaults
//! are overridden by a user file placed next to the page description (or
//! passed explicitly with `--config`).
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [scroll_spy]
//! top_margin = 0.45         # Fraction of the viewport ignored at the top
//! bottom_margin = 0.15      # Fraction of the viewport ignored at the bottom
//! threshold = 0.15          # Visible fraction needed to count as intersecting
//! bottom_tolerance_px = 2.0 # Distance from the page end that activates the last link
//!
//! [contact]
//! endpoint = ""             # POST target (empty = no network submission)
//! submit_delay_ms = 600     # Anti-bot pause before sending
//! honeypot_field = "_gotcha"
//! sending = "Envoi en cours…"
//! success = "Merci ! Votre message a bien été envoyé."
//! failure = "Oups, une erreur est survenue. Réessayez dans un instant."
//! honeypot_reply = "Merci !"
//!
//! [clipboard]
//! feedback_ms = 1600        # How long a button shows the copied state
//! ```
//!
//! Carousel timing is *not* configured here: it comes from each container's
//! `data-autoplay` / `data-interval` attributes.
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// File name looked up next to the page description.
pub const CONFIG_FILE_NAME: &str = "vitrine.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Behavior configuration loaded from `vitrine.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BehaviorConfig {
    pub scroll_spy: ScrollSpyConfig,
    pub contact: ContactConfig,
    pub clipboard: ClipboardConfig,
}

impl BehaviorConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let spy = &self.scroll_spy;
        for (name, value) in [
            ("top_margin", spy.top_margin),
            ("bottom_margin", spy.bottom_margin),
            ("threshold", spy.threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Validation(format!(
                    "scroll_spy.{name} must be between 0 and 1"
                )));
            }
        }
        if spy.top_margin + spy.bottom_margin >= 1.0 {
            return Err(ConfigError::Validation(
                "scroll_spy margins must leave part of the viewport".into(),
            ));
        }
        if spy.bottom_tolerance_px < 0.0 {
            return Err(ConfigError::Validation(
                "scroll_spy.bottom_tolerance_px must not be negative".into(),
            ));
        }
        if self.clipboard.feedback_ms == 0 {
            return Err(ConfigError::Validation(
                "clipboard.feedback_ms must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Scroll spy observation window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrollSpyConfig {
    pub top_margin: f64,
    pub bottom_margin: f64,
    pub threshold: f64,
    pub bottom_tolerance_px: f64,
}

impl Default for ScrollSpyConfig {
    fn default() -> Self {
        Self {
            top_margin: 0.45,
            bottom_margin: 0.15,
            threshold: 0.15,
            bottom_tolerance_px: 2.0,
        }
    }
}

/// Contact form submission settings and status messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    pub endpoint: String,
    pub submit_delay_ms: u64,
    pub honeypot_field: String,
    pub sending: String,
    pub success: String,
    pub failure: String,
    pub honeypot_reply: String,
}

impl ContactConfig {
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            submit_delay_ms: 600,
            honeypot_field: "_gotcha".to_string(),
            sending: "Envoi en cours…".to_string(),
            success: "Merci ! Votre message a bien été envoyé.".to_string(),
            failure: "Oups, une erreur est survenue. Réessayez dans un instant.".to_string(),
            honeypot_reply: "Merci !".to_string(),
        }
    }
}

/// Copy button feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClipboardConfig {
    pub feedback_ms: u64,
}

impl ClipboardConfig {
    pub fn feedback(&self) -> Duration {
        Duration::from_millis(self.feedback_ms)
    }
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self { feedback_ms: 1600 }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(BehaviorConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(config_path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<BehaviorConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: BehaviorConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `vitrine.toml` in the given directory. A missing file
/// yields the defaults.
pub fn load_config(dir: &Path) -> Result<BehaviorConfig, ConfigError> {
    let overlay = load_raw_config(&dir.join(CONFIG_FILE_NAME))?;
    resolve_config(stock_defaults_value(), overlay)
}

/// Load config from an explicitly named file, which must exist.
pub fn load_config_file(path: &Path) -> Result<BehaviorConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let overlay: toml::Value = toml::from_str(&content)?;
    resolve_config(stock_defaults_value(), Some(overlay))
}

/// Returns a fully-commented stock `vitrine.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Vitrine Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file next to the page description as vitrine.toml, or pass
# it with --config. Unknown keys will cause an error.
#
# Carousel autoplay and interval are per-container attributes
# (data-autoplay, data-interval) and are not configured here.

# ---------------------------------------------------------------------------
# Scroll spy
# ---------------------------------------------------------------------------
[scroll_spy]
# Fraction of the viewport height ignored at the top when deciding
# which section is in view.
top_margin = 0.45

# Fraction of the viewport height ignored at the bottom.
bottom_margin = 0.15

# Fraction of a section that must be inside the window to count.
threshold = 0.15

# When the page is scrolled to within this many pixels of its end,
# the last section's link becomes active.
bottom_tolerance_px = 2.0

# ---------------------------------------------------------------------------
# Contact form
# ---------------------------------------------------------------------------
[contact]
# POST target for the serialized form fields.
endpoint = ""

# Pause before sending, in milliseconds.
submit_delay_ms = 600

# Hidden field that only bots fill in.
honeypot_field = "_gotcha"

# Status region messages.
sending = "Envoi en cours…"
success = "Merci ! Votre message a bien été envoyé."
failure = "Oups, une erreur est survenue. Réessayez dans un instant."
honeypot_reply = "Merci !"

# ---------------------------------------------------------------------------
# Copy buttons
# ---------------------------------------------------------------------------
[clipboard]
# How long a button keeps its "copied" state, in milliseconds.
feedback_ms = 1600
"##
}
