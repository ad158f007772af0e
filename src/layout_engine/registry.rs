use std::str::FromStr;

use tracing::warn;

use super::systems::{LayoutKey, LayoutKind};
use crate::common::config::Config;

/// Used when the configured list names nothing we know.
pub const FALLBACK_LAYOUTS: [LayoutKey; 4] =
    [LayoutKey::Tall, LayoutKey::Wide, LayoutKey::Fullscreen, LayoutKey::Column];

/// Builds layout instances from configuration.
pub struct LayoutRegistry;

impl LayoutRegistry {
    /// Fresh instances of the configured layouts, in configured order.
    ///
    /// Unknown keys are skipped. The result is never empty.
    pub fn layouts_from_configuration(config: &Config) -> Vec<LayoutKind> {
        let settings = &config.settings.layout;
        let mut layouts: Vec<LayoutKind> = config
            .default_layout_keys()
            .iter()
            .filter_map(|key| match LayoutKey::from_str(key) {
                Ok(key) => Some(LayoutKind::new(key, settings)),
                Err(_) => {
                    warn!(%key, "ignoring unknown layout");
                    None
                }
            })
            .collect();

        if layouts.is_empty() {
            warn!("no usable layouts configured, falling back to built-in list");
            layouts = FALLBACK_LAYOUTS.iter().map(|&key| LayoutKind::new(key, settings)).collect();
        }
        layouts
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::layout_engine::Layout;

    fn keys(layouts: &[LayoutKind]) -> Vec<LayoutKey> { layouts.iter().map(|l| l.key()).collect() }

    #[test]
    fn preserves_configured_order_and_skips_unknown_keys() {
        let mut config = Config::default();
        config.settings.layouts =
            ["bsp", "nope", "tall-right", "row"].into_iter().map(String::from).collect();
        let layouts = LayoutRegistry::layouts_from_configuration(&config);
        assert_eq!(keys(&layouts), vec![LayoutKey::Bsp, LayoutKey::TallRight, LayoutKey::Row]);
    }

    #[test]
    fn falls_back_when_nothing_is_usable() {
        let mut config = Config::default();
        config.settings.layouts = vec!["spiral".to_string()];
        let layouts = LayoutRegistry::layouts_from_configuration(&config);
        assert_eq!(keys(&layouts), FALLBACK_LAYOUTS.to_vec());
    }

    #[test]
    fn instances_are_independent() {
        let config = Config::default();
        let mut a = LayoutRegistry::layouts_from_configuration(&config);
        let b = LayoutRegistry::layouts_from_configuration(&config);
        a[0].as_paned().unwrap().expand_main_pane();
        assert_ne!(a[0].description(), b[0].description());
    }
}
