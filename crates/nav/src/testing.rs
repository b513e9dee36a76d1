//! In-memory page used by the controller tests.

use std::collections::{BTreeMap, BTreeSet};

use foundation::bounds::ClientRect;
use foundation::ids::SectionId;

use crate::detect::ViewportMetrics;
use crate::error::NavError;
use crate::model::NavEntry;
use crate::view::NavView;

/// Page sections laid out top to bottom at fixed document offsets.
#[derive(Debug, Default)]
pub struct RecordingView {
    pub metrics: ViewportMetrics,
    /// Document-space `(top, bottom)` per section.
    pub layout: BTreeMap<SectionId, (f64, f64)>,
    pub menu: Vec<NavEntry>,
    pub active_sections: BTreeSet<SectionId>,
    pub highlighted: Option<SectionId>,
    pub nav_bar_visible: bool,
    pub scroll_top_visible: bool,
    pub collapsed: BTreeSet<SectionId>,
    pub scrolls: Vec<f64>,
    /// Makes every write fail with this message.
    pub fail_writes: Option<String>,
}

impl RecordingView {
    /// Stacks `sections` of equal `height` below a fixed nav bar.
    pub fn stacked(sections: &[&str], height: f64, nav_height: f64) -> Self {
        let mut layout = BTreeMap::new();
        for (i, id) in sections.iter().enumerate() {
            let top = nav_height + i as f64 * height;
            layout.insert(SectionId::new(*id), (top, top + height));
        }
        Self {
            metrics: ViewportMetrics {
                scroll_y: 0.0,
                content_height: nav_height + sections.len() as f64 * height,
                nav_height,
            },
            layout,
            nav_bar_visible: true,
            ..Self::default()
        }
    }

    pub fn scroll(&mut self, y: f64) {
        self.metrics.scroll_y = y;
    }

    fn write(&self) -> Result<(), NavError> {
        match &self.fail_writes {
            Some(msg) => Err(NavError::Dom(msg.clone())),
            None => Ok(()),
        }
    }
}

impl NavView for RecordingView {
    fn metrics(&self) -> ViewportMetrics {
        self.metrics
    }

    fn section_rect(&self, id: &SectionId) -> Option<ClientRect> {
        let (top, bottom) = *self.layout.get(id)?;
        let y = self.metrics.scroll_y;
        Some(ClientRect::vertical(top - y, bottom - y))
    }

    fn section_offset_top(&self, id: &SectionId) -> Option<f64> {
        self.layout.get(id).map(|(top, _)| *top)
    }

    fn append_entries(&mut self, entries: &[NavEntry]) -> Result<(), NavError> {
        self.write()?;
        self.menu.extend_from_slice(entries);
        Ok(())
    }

    fn set_section_active(&mut self, id: &SectionId, active: bool) -> Result<(), NavError> {
        self.write()?;
        if active {
            self.active_sections.insert(id.clone());
        } else {
            self.active_sections.remove(id);
        }
        Ok(())
    }

    fn highlight(&mut self, anchor: &SectionId) -> Result<(), NavError> {
        self.write()?;
        self.highlighted = Some(anchor.clone());
        Ok(())
    }

    fn clear_highlight(&mut self) -> Result<(), NavError> {
        self.write()?;
        self.highlighted = None;
        Ok(())
    }

    fn set_nav_bar_visible(&mut self, visible: bool) -> Result<(), NavError> {
        self.write()?;
        self.nav_bar_visible = visible;
        Ok(())
    }

    fn set_scroll_top_visible(&mut self, visible: bool) -> Result<(), NavError> {
        self.write()?;
        self.scroll_top_visible = visible;
        Ok(())
    }

    fn set_section_expanded(&mut self, id: &SectionId, expanded: bool) -> Result<(), NavError> {
        self.write()?;
        if expanded {
            self.collapsed.remove(id);
        } else {
            self.collapsed.insert(id.clone());
        }
        Ok(())
    }

    fn scroll_to(&mut self, top: f64) -> Result<(), NavError> {
        self.write()?;
        self.scrolls.push(top);
        self.metrics.scroll_y = top.max(0.0);
        Ok(())
    }
}
