use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::layout_engine::LayoutKey;

pub fn config_file() -> PathBuf { dirs::home_dir().unwrap_or_default().join(".rift-reflow.toml") }

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub settings: Settings,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Master switch; when off, reflows are skipped entirely.
    #[serde(default = "yes")]
    pub tiling_enabled: bool,
    /// Layout keys available on every space, in cycling order.
    #[serde(default = "default_layouts")]
    pub layouts: Vec<String>,
    #[serde(default = "yes")]
    pub enables_layout_hud: bool,
    #[serde(default = "yes")]
    pub enables_layout_hud_on_space_change: bool,
    #[serde(default)]
    pub layout: LayoutSettings,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct LayoutSettings {
    /// Fraction of the tiling area given to the main pane of paned layouts.
    #[serde(default = "default_main_pane_ratio")]
    pub main_pane_ratio: f64,
    /// Number of windows placed in the main pane.
    #[serde(default = "default_main_pane_count")]
    pub main_pane_count: usize,
    /// How much a single shrink/expand command changes the main pane ratio.
    #[serde(default = "default_pane_step")]
    pub pane_step: f64,
    #[serde(default)]
    pub gaps: GapSettings,
}

/// Gap configuration for window spacing
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct GapSettings {
    /// Space between windows and screen edges
    #[serde(default)]
    pub outer: OuterGaps,
    /// Space between neighbouring windows
    #[serde(default)]
    pub inner: InnerGaps,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct OuterGaps {
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub bottom: f64,
    #[serde(default)]
    pub right: f64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct InnerGaps {
    #[serde(default)]
    pub horizontal: f64,
    #[serde(default)]
    pub vertical: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            main_pane_ratio: default_main_pane_ratio(),
            main_pane_count: default_main_pane_count(),
            pane_step: default_pane_step(),
            gaps: GapSettings::default(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.layouts.is_empty() {
            issues.push("layouts must name at least one layout".to_string());
        }
        for key in &self.layouts {
            if LayoutKey::from_str(key).is_err() {
                issues.push(format!("unknown layout '{key}' in layouts"));
            }
        }

        issues.extend(self.layout.validate());

        issues
    }

    pub fn auto_fix_values(&mut self) -> usize {
        let before = self.layouts.len();
        self.layouts.retain(|key| LayoutKey::from_str(key).is_ok());
        let mut fixes = before - self.layouts.len();

        if self.layouts.is_empty() {
            self.layouts = default_layouts();
            fixes += 1;
        }

        fixes + self.layout.auto_fix_values()
    }
}

impl LayoutSettings {
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !(self.main_pane_ratio > 0.0 && self.main_pane_ratio < 1.0) {
            issues.push(format!(
                "main_pane_ratio must be between 0 and 1, got {}",
                self.main_pane_ratio
            ));
        }

        if self.main_pane_count == 0 {
            issues.push("main_pane_count must be at least 1".to_string());
        }

        if !(self.pane_step > 0.0 && self.pane_step < 0.5) {
            issues.push(format!(
                "pane_step must be between 0 and 0.5, got {}",
                self.pane_step
            ));
        }

        issues.extend(self.gaps.validate());

        issues
    }

    pub fn auto_fix_values(&mut self) -> usize {
        let mut fixes = 0;

        if !(self.main_pane_ratio > 0.0 && self.main_pane_ratio < 1.0) {
            self.main_pane_ratio = default_main_pane_ratio();
            fixes += 1;
        }

        if self.main_pane_count == 0 {
            self.main_pane_count = default_main_pane_count();
            fixes += 1;
        }

        if !(self.pane_step > 0.0 && self.pane_step < 0.5) {
            self.pane_step = default_pane_step();
            fixes += 1;
        }

        fixes + self.gaps.auto_fix_values()
    }
}

impl GapSettings {
    fn named_values(&mut self) -> [(&'static str, &mut f64); 6] {
        [
            ("outer.top", &mut self.outer.top),
            ("outer.left", &mut self.outer.left),
            ("outer.bottom", &mut self.outer.bottom),
            ("outer.right", &mut self.outer.right),
            ("inner.horizontal", &mut self.inner.horizontal),
            ("inner.vertical", &mut self.inner.vertical),
        ]
    }

    pub fn validate(&self) -> Vec<String> {
        // named_values needs a mutable borrow; validate a copy instead.
        let mut gaps = self.clone();
        gaps.named_values()
            .into_iter()
            .filter(|(_, value)| **value < 0.0)
            .map(|(name, value)| format!("{name} gap must be non-negative, got {value}"))
            .collect()
    }

    /// Clamps negative gaps to zero. Returns the number of fixes applied.
    pub fn auto_fix_values(&mut self) -> usize {
        let mut fixes = 0;
        for (_, value) in self.named_values() {
            if *value < 0.0 {
                *value = 0.0;
                fixes += 1;
            }
        }
        fixes
    }
}

fn yes() -> bool { true }

fn default_layouts() -> Vec<String> {
    ["tall", "wide", "fullscreen", "column"].into_iter().map(String::from).collect()
}

fn default_main_pane_ratio() -> f64 { 0.5 }

fn default_main_pane_count() -> usize { 1 }

fn default_pane_step() -> f64 { 0.05 }

impl Config {
    pub fn read(path: &Path) -> anyhow::Result<Config> {
        let buf = std::fs::read_to_string(path)?;
        Self::parse(&buf)
    }

    /// The built-in configuration. It is part of the binary, so failing to
    /// parse it is a build defect.
    pub fn default() -> Config {
        Self::parse(include_str!("../../rift-reflow.default.toml"))
            .expect("embedded default config must parse")
    }

    pub fn parse(buf: &str) -> anyhow::Result<Config> { Ok(toml::from_str(buf)?) }

    pub fn validate(&self) -> Vec<String> { self.settings.validate() }

    pub fn auto_fix_values(&mut self) -> usize { self.settings.auto_fix_values() }

    pub fn tiling_enabled(&self) -> bool { self.settings.tiling_enabled }

    pub fn enables_layout_hud(&self) -> bool { self.settings.enables_layout_hud }

    pub fn enables_layout_hud_on_space_change(&self) -> bool {
        self.settings.enables_layout_hud_on_space_change
    }

    pub fn default_layout_keys(&self) -> &[String] { &self.settings.layouts }
}

/// Runtime-replaceable configuration shared by every screen manager.
///
/// Readers call [`SharedConfig::load`] each time they need a value, so a
/// replacement is observed by the next decision point.
#[derive(Clone, Debug)]
pub struct SharedConfig(Arc<RwLock<Arc<Config>>>);

impl SharedConfig {
    pub fn new(config: Config) -> Self { Self(Arc::new(RwLock::new(Arc::new(config)))) }

    pub fn load(&self) -> Arc<Config> { self.0.read().clone() }

    pub fn store(&self, config: Config) { *self.0.write() = Arc::new(config); }

    pub fn update(&self, f: impl FnOnce(&mut Config)) {
        let mut guard = self.0.write();
        f(Arc::make_mut(&mut *guard));
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_config_parses() {
        let config = Config::default();
        assert!(config.validate().is_empty(), "{:?}", config.validate());
        assert!(config.tiling_enabled());
        assert!(!config.default_layout_keys().is_empty());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config = Config::parse(
            r#"
            [settings]
            layouts = ["wide", "bsp"]
            "#,
        )
        .unwrap();
        assert_eq!(config.default_layout_keys(), ["wide", "bsp"]);
        assert!(config.enables_layout_hud());
        assert_eq!(config.settings.layout, LayoutSettings::default());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = Config::parse(
            r#"
            [settings]
            tiling = false
            "#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_empty());

        config.settings.layouts.push("spiral".to_string());
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("unknown layout 'spiral'"));

        config.settings.layout.main_pane_ratio = 1.5;
        config.settings.layout.gaps.inner.vertical = -4.0;
        let issues = config.validate();
        assert_eq!(issues.len(), 3);
        assert!(issues.iter().any(|i| i.contains("main_pane_ratio")));
        assert!(issues.iter().any(|i| i.contains("inner.vertical gap must be non-negative")));

        let fixes = config.auto_fix_values();
        assert_eq!(fixes, 3);
        assert!(config.validate().is_empty());
        assert_eq!(config.settings.layout.main_pane_ratio, 0.5);
        assert_eq!(config.settings.layout.gaps.inner.vertical, 0.0);
        assert!(!config.settings.layouts.iter().any(|k| k == "spiral"));
    }

    #[test]
    fn empty_layout_list_is_fixed_with_defaults() {
        let mut config = Config::default();
        config.settings.layouts.clear();
        assert_eq!(config.validate(), vec!["layouts must name at least one layout"]);
        assert_eq!(config.auto_fix_values(), 1);
        assert_eq!(config.settings.layouts, default_layouts());
    }

    #[test]
    fn shared_config_observes_replacement() {
        let shared = SharedConfig::new(Config::default());
        let reader = shared.clone();
        assert!(reader.load().tiling_enabled());

        shared.update(|c| c.settings.tiling_enabled = false);
        assert!(!reader.load().tiling_enabled());

        shared.store(Config::default());
        assert!(reader.load().tiling_enabled());
    }
}
