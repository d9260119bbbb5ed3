use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::AutoconfResult;

const CONFIG_FILE_NAME: &str = "autoconf.toml";
const CONFIG_ENV_VAR: &str = "AUTOCONF_CONFIG";

/// Placeholder substituted with the card's page index in page-button templates.
const INDEX_PLACEHOLDER: &str = "{index}";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub timing: TimingConfig,
}

/// Every control name and name pattern the tool relies on.
///
/// Radeon Settings exposes no stable automation ids, so these strings are the
/// contract with one particular UI revision. Fields ending in `_pattern` or
/// `_slider` are full-match regular expressions; everything else is an exact
/// element name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub window_title: String,
    /// Image name passed to `taskkill` during window recovery.
    pub process_image: String,

    // ── Navigation ──────────────────────────────────────────────────────
    pub maximize_button: String,
    pub gaming_button: String,
    pub global_settings_button: String,
    /// Template with an `{index}` placeholder (card index).
    pub hbcc_page_button: String,
    /// Template with an `{index}` placeholder (`card_count + card index`).
    pub wattman_page_button: String,

    // ── HBCC ────────────────────────────────────────────────────────────
    pub hbcc_toggle_pattern: String,
    pub hbcc_apply_button: String,
    pub hbcc_confirm_button: String,

    // ── WattMan ─────────────────────────────────────────────────────────
    pub overdrive_scrollbar: String,
    pub overdrive_scroll_steps: u32,
    pub gpu_freq_slider: String,
    pub mem_freq_slider: String,
    pub temp_toggle_pattern: String,
    pub temp_target_slider: String,
    pub power_limit_slider: String,
    pub wattman_apply_button: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            window_title: "RADEON SETTINGS RADEON SETTINGS".into(),
            process_image: "RadeonSettings.exe".into(),
            maximize_button: "maximize/restore button".into(),
            gaming_button: "main app list - Gaming_$_Gaming".into(),
            global_settings_button: "Game 0_$_Global Settings".into(),
            hbcc_page_button:
                "Game Manager - Global Settings page button - {index}_$_Global Graphics\n(Radeon RX Vega)"
                    .into(),
            wattman_page_button:
                "Game Manager - Global Settings page button - {index}_$_Global WattMan\n(Radeon RX Vega)"
                    .into(),
            hbcc_toggle_pattern: "virtualmemory .* ComboBoxToggle.*".into(),
            hbcc_apply_button: "virtual memory bar - apply button".into(),
            hbcc_confirm_button: "virtual memory confirm dialog - dialog button - Confirm".into(),
            overdrive_scrollbar: "game manager overdrive scrollbar".into(),
            overdrive_scroll_steps: 14,
            gpu_freq_slider: "GPU Frequency Slider_.*".into(),
            mem_freq_slider: "Memory Frequency Slider_.*".into(),
            temp_toggle_pattern: "Temperature Temperature.*".into(),
            temp_target_slider: "Temperature Target Slider_.*".into(),
            // The double space is part of the control name.
            power_limit_slider: "Temperature TDP Limit  Slider_.*".into(),
            wattman_apply_button: "Game Manager - Global Settings - apply button".into(),
        }
    }
}

impl LayoutConfig {
    pub fn hbcc_page_button(&self, card: usize) -> String {
        self.hbcc_page_button.replace(INDEX_PLACEHOLDER, &card.to_string())
    }

    /// WattMan pages follow the HBCC pages in the same button list.
    pub fn wattman_page_button(&self, card_count: usize, card: usize) -> String {
        self.wattman_page_button
            .replace(INDEX_PLACEHOLDER, &(card_count + card).to_string())
    }
}

/// Empirical waits for Radeon Settings' redraw latency. Not adaptive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub window_timeout_secs: u64,
    pub window_poll_ms: u64,
    pub input_idle_timeout_ms: u32,
    /// After clicking the Gaming entry, before the game tiles exist.
    pub menu_settle_ms: u64,
    /// After clicking a per-card page button.
    pub page_settle_ms: u64,
    /// After confirming the HBCC dialog (the driver reloads the card).
    pub hbcc_commit_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            window_timeout_secs: 180,
            window_poll_ms: 500,
            input_idle_timeout_ms: 180_000,
            menu_settle_ms: 1500,
            page_settle_ms: 3000,
            hbcc_commit_ms: 3000,
        }
    }
}

impl TimingConfig {
    pub fn window_timeout(&self) -> Duration {
        Duration::from_secs(self.window_timeout_secs)
    }

    pub fn window_poll(&self) -> Duration {
        Duration::from_millis(self.window_poll_ms)
    }

    pub fn menu_settle(&self) -> Duration {
        Duration::from_millis(self.menu_settle_ms)
    }

    pub fn page_settle(&self) -> Duration {
        Duration::from_millis(self.page_settle_ms)
    }

    pub fn hbcc_commit(&self) -> Duration {
        Duration::from_millis(self.hbcc_commit_ms)
    }
}

fn resolve_config_path() -> Option<PathBuf> {
    if let Ok(explicit) = std::env::var(CONFIG_ENV_VAR) {
        tracing::debug!(path = %explicit, "config path taken from {CONFIG_ENV_VAR}");
        return Some(PathBuf::from(explicit));
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(parent) = exe.parent() {
            let candidate = parent.join(CONFIG_FILE_NAME);
            if candidate.exists() {
                tracing::debug!(path = %candidate.display(), "config found next to executable");
                return Some(candidate);
            }
        }
    }

    let candidate = std::env::current_dir().ok()?.join(CONFIG_FILE_NAME);
    if candidate.exists() {
        tracing::debug!(path = %candidate.display(), "config found in working directory");
        return Some(candidate);
    }

    None
}

/// Loads the layout/timing overrides, falling back to the built-in tables
/// when no config file is present.
pub fn load_config() -> AutoconfResult<AppConfig> {
    let Some(path) = resolve_config_path() else {
        tracing::debug!("no {CONFIG_FILE_NAME} found; using built-in layout");
        return Ok(AppConfig::default());
    };
    let content = std::fs::read_to_string(&path)?;
    let config = parse_config(&content)?;
    tracing::info!(path = %path.display(), window = %config.layout.window_title, "config loaded");
    Ok(config)
}

pub fn parse_config(content: &str) -> AutoconfResult<AppConfig> {
    Ok(toml::from_str(content)?)
}
