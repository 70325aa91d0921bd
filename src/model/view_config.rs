//! Reader view settings consulted on every dispatch.

use serde::Deserialize;

/// View settings owned by the surrounding application.
///
/// Read-only to the engine. Immutable for the duration of one dispatch, but
/// the host may swap in a new value between signals. Field names follow the
/// host's camelCase JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewConfiguration {
    /// Continuous scroll layout instead of discrete pages.
    pub scrolled: bool,
    /// Vertical writing mode.
    pub vertical: bool,
    /// Auto-advance across sections at content edges (scrolled mode only).
    pub continuous_scroll: bool,
    /// Reverse which screen half advances.
    pub swap_click_area: bool,
    /// Ignore taps for navigation.
    pub disable_click: bool,
    /// Hardware volume keys turn pages.
    pub volume_keys_to_flip: bool,
    pub show_header: bool,
    pub show_footer: bool,
    /// Header and footer stay visible while scrolling and eat into the page.
    pub show_bars_on_scroll: bool,
    /// Pixels repeated between consecutive scrolled pages.
    pub scrolling_overlap: f64,
}

impl Default for ViewConfiguration {
    fn default() -> Self {
        Self {
            scrolled: false,
            vertical: false,
            continuous_scroll: false,
            swap_click_area: false,
            disable_click: false,
            volume_keys_to_flip: false,
            show_header: true,
            show_footer: true,
            show_bars_on_scroll: false,
            scrolling_overlap: 0.0,
        }
    }
}

impl ViewConfiguration {
    /// Continuous-scroll edge monitoring applies.
    pub fn is_continuous(&self) -> bool {
        self.scrolled && self.continuous_scroll
    }

    /// Header occupies page space while scrolling.
    pub fn header_on_scroll(&self) -> bool {
        self.show_header && self.show_bars_on_scroll
    }

    /// Footer occupies page space while scrolling.
    pub fn footer_on_scroll(&self) -> bool {
        self.show_footer && self.show_bars_on_scroll
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_host_camel_case_json() {
        let json = r#"{
            "scrolled": true,
            "continuousScroll": true,
            "swapClickArea": true,
            "volumeKeysToFlip": true,
            "showBarsOnScroll": true,
            "scrollingOverlap": 20
        }"#;
        let config: ViewConfiguration = serde_json::from_str(json).unwrap();

        assert!(config.scrolled);
        assert!(config.continuous_scroll);
        assert!(config.swap_click_area);
        assert!(config.volume_keys_to_flip);
        assert!(config.show_bars_on_scroll);
        assert_eq!(config.scrolling_overlap, 20.0);
        // Missing fields fall back to defaults
        assert!(config.show_header);
        assert!(!config.disable_click);
    }

    #[test]
    fn continuous_requires_scrolled() {
        let config = ViewConfiguration {
            continuous_scroll: true,
            ..ViewConfiguration::default()
        };
        assert!(!config.is_continuous());

        let config = ViewConfiguration {
            scrolled: true,
            ..config
        };
        assert!(config.is_continuous());
    }

    #[test]
    fn bars_count_only_when_shown_on_scroll() {
        let config = ViewConfiguration {
            show_header: true,
            show_footer: false,
            show_bars_on_scroll: true,
            ..ViewConfiguration::default()
        };
        assert!(config.header_on_scroll());
        assert!(!config.footer_on_scroll());

        let hidden = ViewConfiguration {
            show_bars_on_scroll: false,
            ..config
        };
        assert!(!hidden.header_on_scroll());
    }
}
