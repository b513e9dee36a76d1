use foundation::bounds::ClientRect;
use foundation::ids::SectionId;

use crate::detect::ViewportMetrics;
use crate::error::NavError;
use crate::model::NavEntry;

/// The page as seen by the controller.
///
/// Reads are infallible snapshots; writes report host failures.
pub trait NavView {
    fn metrics(&self) -> ViewportMetrics;
    fn section_rect(&self, id: &SectionId) -> Option<ClientRect>;
    /// Document offset of the section's top edge.
    fn section_offset_top(&self, id: &SectionId) -> Option<f64>;

    /// Appends all entries to the menu in one batch.
    fn append_entries(&mut self, entries: &[NavEntry]) -> Result<(), NavError>;
    fn set_section_active(&mut self, id: &SectionId, active: bool) -> Result<(), NavError>;
    /// Highlights the entry for `anchor` and clears every other entry.
    fn highlight(&mut self, anchor: &SectionId) -> Result<(), NavError>;
    fn clear_highlight(&mut self) -> Result<(), NavError>;
    fn set_nav_bar_visible(&mut self, visible: bool) -> Result<(), NavError>;
    fn set_scroll_top_visible(&mut self, visible: bool) -> Result<(), NavError>;
    fn set_section_expanded(&mut self, id: &SectionId, expanded: bool) -> Result<(), NavError>;
    /// Smooth-scrolls the viewport to document offset `top`.
    fn scroll_to(&mut self, top: f64) -> Result<(), NavError>;
}
