//! Controller configuration.
//!
//! Defaults reproduce the markup contract of the stock landing page, so a page
//! built for it needs no configuration at all. Everything can be overridden
//! from JSON; missing keys keep their defaults.

use foundation::time::Millis;
use serde::{Deserialize, Serialize};

use crate::error::NavError;

/// How overlapping matches in active-section detection are resolved.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivePolicy {
    /// Only the first straddling section (document order) becomes active.
    #[default]
    FirstMatch,
    /// Every straddling section becomes active; the menu highlight follows
    /// the last of them.
    AllMatches,
}

/// CSS selectors used to discover the page elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub nav_list: String,
    pub sections: String,
    pub scroll_top: String,
    pub main: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            nav_list: "#navbar__list".to_string(),
            sections: "section".to_string(),
            scroll_top: ".to-top".to_string(),
            main: "main".to_string(),
        }
    }
}

/// Class names the page stylesheet reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassNames {
    pub active_section: String,
    pub nav_link: String,
    pub navbar_show: String,
    pub navbar_hide: String,
    pub collapse_toggle: String,
    pub icon_open: String,
    pub icon_closed: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            active_section: "your-active-class".to_string(),
            nav_link: "menu__link".to_string(),
            navbar_show: "navbar_show".to_string(),
            navbar_hide: "navbar_hide".to_string(),
            collapse_toggle: "collapse-arrow".to_string(),
            icon_open: "open-section".to_string(),
            icon_closed: "close-section".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub selectors: Selectors,
    pub classes: ClassNames,
    /// Attribute on menu entries holding the section id.
    pub anchor_attribute: String,
    /// Attribute on sections holding the menu label.
    pub label_attribute: String,
    /// Inline style applied to the highlighted menu entry.
    pub highlight_style: String,
    /// `min-height` of a collapsed section.
    pub collapsed_min_height: String,
    /// Delay before the navigation bar reappears after the last scroll event.
    pub reveal_delay_ms: u64,
    /// Fraction of the content height past which the back-to-top control shows.
    pub scroll_top_fraction: f64,
    /// Added to a section's offset when scrolling to it, so the section
    /// reliably straddles the threshold after sub-pixel rounding.
    pub offset_correction_px: f64,
    pub active_policy: ActivePolicy,
    /// Write controller trace events to the console.
    pub trace: bool,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            classes: ClassNames::default(),
            anchor_attribute: "data-anchor".to_string(),
            label_attribute: "data-nav".to_string(),
            highlight_style: "background: #cc1".to_string(),
            collapsed_min_height: "20vh".to_string(),
            reveal_delay_ms: 800,
            scroll_top_fraction: 0.25,
            offset_correction_px: 1.0,
            active_policy: ActivePolicy::FirstMatch,
            trace: false,
        }
    }
}

impl NavConfig {
    /// Parses a (possibly partial) JSON config and validates it.
    pub fn from_json(text: &str) -> Result<Self, NavError> {
        let text = text.trim();
        let cfg: NavConfig = if text.is_empty() {
            NavConfig::default()
        } else {
            serde_json::from_str(text).map_err(|e| NavError::InvalidConfig(e.to_string()))?
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json(&self) -> Result<String, NavError> {
        serde_json::to_string(self).map_err(|e| NavError::InvalidConfig(e.to_string()))
    }

    pub fn reveal_delay(&self) -> Millis {
        Millis(self.reveal_delay_ms)
    }

    pub fn validate(&self) -> Result<(), NavError> {
        if self.reveal_delay_ms == 0 {
            return Err(NavError::InvalidConfig(
                "reveal_delay_ms must be positive".to_string(),
            ));
        }
        if !(self.scroll_top_fraction > 0.0 && self.scroll_top_fraction <= 1.0) {
            return Err(NavError::InvalidConfig(format!(
                "scroll_top_fraction must be in (0, 1], got {}",
                self.scroll_top_fraction
            )));
        }
        if !self.offset_correction_px.is_finite() {
            return Err(NavError::InvalidConfig(
                "offset_correction_px must be finite".to_string(),
            ));
        }

        let s = &self.selectors;
        let c = &self.classes;
        let required = [
            ("selectors.nav_list", &s.nav_list),
            ("selectors.sections", &s.sections),
            ("selectors.scroll_top", &s.scroll_top),
            ("selectors.main", &s.main),
            ("classes.active_section", &c.active_section),
            ("classes.nav_link", &c.nav_link),
            ("classes.navbar_show", &c.navbar_show),
            ("classes.navbar_hide", &c.navbar_hide),
            ("classes.collapse_toggle", &c.collapse_toggle),
            ("classes.icon_open", &c.icon_open),
            ("classes.icon_closed", &c.icon_closed),
            ("anchor_attribute", &self.anchor_attribute),
            ("label_attribute", &self.label_attribute),
        ];
        if let Some((name, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(NavError::InvalidConfig(format!("{name} must not be empty")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ActivePolicy, NavConfig};
    use crate::error::NavError;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_json_is_default() {
        assert_eq!(NavConfig::from_json("").unwrap(), NavConfig::default());
        assert_eq!(NavConfig::from_json("{}").unwrap(), NavConfig::default());
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let cfg = NavConfig::from_json(
            r#"{"reveal_delay_ms": 300, "active_policy": "all_matches", "classes": {"nav_link": "nav-item"}}"#,
        )
        .unwrap();
        assert_eq!(cfg.reveal_delay_ms, 300);
        assert_eq!(cfg.active_policy, ActivePolicy::AllMatches);
        assert_eq!(cfg.classes.nav_link, "nav-item");
        assert_eq!(cfg.classes.navbar_hide, "navbar_hide");
        assert_eq!(cfg.selectors.nav_list, "#navbar__list");
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(matches!(
            NavConfig::from_json(r#"{"reveal_delay_ms": 0}"#),
            Err(NavError::InvalidConfig(_))
        ));
        assert!(matches!(
            NavConfig::from_json(r#"{"scroll_top_fraction": 1.5}"#),
            Err(NavError::InvalidConfig(_))
        ));
        assert!(matches!(
            NavConfig::from_json(r#"{"selectors": {"main": " "}}"#),
            Err(NavError::InvalidConfig(msg)) if msg.contains("selectors.main")
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            NavConfig::from_json("{not json"),
            Err(NavError::InvalidConfig(_))
        ));
    }

    #[test]
    fn json_round_trips() {
        let mut cfg = NavConfig::default();
        cfg.trace = true;
        let back = NavConfig::from_json(&cfg.to_json().unwrap()).unwrap();
        assert_eq!(back, cfg);
    }
}
