//! Inline style and class decisions for the page elements.
//!
//! The DOM view only applies what these functions return.

use foundation::ids::SectionId;

use crate::config::NavConfig;

/// What happens to an element's `style` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineStyle {
    Set(String),
    Remove,
}

/// Class pair swapped on one element; `remove` goes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassSwap<'a> {
    pub add: &'a str,
    pub remove: &'a str,
}

/// Everything that changes when a section is expanded or collapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollapseStyles<'a> {
    pub section: InlineStyle,
    /// The body text next to the toggle's wrapper.
    pub text: InlineStyle,
    pub icon: ClassSwap<'a>,
}

pub fn collapse_styles(expanded: bool, config: &NavConfig) -> CollapseStyles<'_> {
    let c = &config.classes;
    if expanded {
        CollapseStyles {
            section: InlineStyle::Remove,
            text: InlineStyle::Set("display: block".to_string()),
            icon: ClassSwap {
                add: &c.icon_open,
                remove: &c.icon_closed,
            },
        }
    } else {
        CollapseStyles {
            section: InlineStyle::Set(format!("min-height: {}", config.collapsed_min_height)),
            text: InlineStyle::Set("display: none".to_string()),
            icon: ClassSwap {
                add: &c.icon_closed,
                remove: &c.icon_open,
            },
        }
    }
}

/// Style of one menu link, given its anchor attribute and the highlighted
/// section (if any).
pub fn link_style(
    link_anchor: Option<&str>,
    highlighted: Option<&SectionId>,
    config: &NavConfig,
) -> InlineStyle {
    match (link_anchor, highlighted) {
        (Some(anchor), Some(id)) if *id == *anchor => {
            InlineStyle::Set(config.highlight_style.clone())
        }
        _ => InlineStyle::Remove,
    }
}

pub fn nav_bar_classes(visible: bool, config: &NavConfig) -> ClassSwap<'_> {
    let c = &config.classes;
    if visible {
        ClassSwap {
            add: &c.navbar_show,
            remove: &c.navbar_hide,
        }
    } else {
        ClassSwap {
            add: &c.navbar_hide,
            remove: &c.navbar_show,
        }
    }
}

pub fn scroll_top_style(visible: bool) -> InlineStyle {
    if visible {
        InlineStyle::Set("display: block".to_string())
    } else {
        InlineStyle::Remove
    }
}
