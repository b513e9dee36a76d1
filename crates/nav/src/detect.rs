//! Pure scroll-position decisions.
//!
//! Nothing here touches the page; the controller feeds in geometry read
//! through the view and applies the results.

use foundation::bounds::ClientRect;
use foundation::ids::SectionId;

use crate::config::ActivePolicy;

/// Scroll state of the viewport at one instant.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct ViewportMetrics {
    pub scroll_y: f64,
    /// Total height of the page content.
    pub content_height: f64,
    /// Rendered height of the navigation bar; doubles as the threshold line.
    pub nav_height: f64,
}

/// Sections currently crossing the threshold line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveState {
    active: Vec<SectionId>,
}

impl ActiveState {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn contains(&self, id: &SectionId) -> bool {
        self.active.contains(id)
    }

    pub fn ids(&self) -> &[SectionId] {
        &self.active
    }

    /// The section whose menu entry carries the highlight.
    ///
    /// Each highlight clears the others, so with several matches the last
    /// one wins.
    pub fn highlighted(&self) -> Option<&SectionId> {
        self.active.last()
    }
}

/// Decides which sections are active.
///
/// `rects` must be in document order. Sections without a readable rectangle
/// (`None`) never match.
pub fn detect_active<'a, I>(rects: I, threshold: f64, policy: ActivePolicy) -> ActiveState
where
    I: IntoIterator<Item = (&'a SectionId, Option<ClientRect>)>,
{
    let mut matches = rects
        .into_iter()
        .filter(|(_, rect)| rect.is_some_and(|r| r.straddles(threshold)))
        .map(|(id, _)| id.clone());

    let active = match policy {
        ActivePolicy::FirstMatch => matches.next().into_iter().collect(),
        ActivePolicy::AllMatches => matches.collect(),
    };
    ActiveState { active }
}

/// Whether the back-to-top control should be visible.
pub fn scroll_top_visible(metrics: ViewportMetrics, fraction: f64) -> bool {
    metrics.scroll_y > metrics.content_height * fraction
}

/// Scroll offset that puts a section's top just below the navigation bar.
pub fn nav_target_offset(section_offset_top: f64, nav_height: f64, correction_px: f64) -> f64 {
    section_offset_top + correction_px - nav_height
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids(names: &[&str]) -> Vec<SectionId> {
        names.iter().map(|n| SectionId::new(*n)).collect()
    }

    #[test]
    fn single_straddling_section_is_active() {
        let ids = ids(&["s1", "s2", "s3"]);
        let rects = [
            Some(ClientRect::vertical(-400.0, -10.0)),
            Some(ClientRect::vertical(-10.0, 390.0)),
            Some(ClientRect::vertical(390.0, 790.0)),
        ];
        let state = detect_active(ids.iter().zip(rects), 50.0, ActivePolicy::FirstMatch);
        assert_eq!(state.ids(), &ids[1..2]);
        assert_eq!(state.highlighted(), Some(&ids[1]));
    }

    #[test]
    fn nothing_straddles_above_first_section() {
        let ids = ids(&["s1", "s2"]);
        let rects = [
            Some(ClientRect::vertical(200.0, 600.0)),
            Some(ClientRect::vertical(600.0, 1000.0)),
        ];
        let state = detect_active(ids.iter().zip(rects), 50.0, ActivePolicy::FirstMatch);
        assert!(state.is_empty());
        assert_eq!(state.highlighted(), None);
    }

    #[test]
    fn top_edge_on_threshold_counts() {
        let ids = ids(&["s1"]);
        let state = detect_active(
            ids.iter().zip([Some(ClientRect::vertical(50.0, 100.0))]),
            50.0,
            ActivePolicy::FirstMatch,
        );
        assert!(state.contains(&ids[0]));
    }

    #[test]
    fn overlapping_sections_follow_policy() {
        let ids = ids(&["s1", "s2", "s3"]);
        let rects = [
            Some(ClientRect::vertical(0.0, 100.0)),
            Some(ClientRect::vertical(20.0, 120.0)),
            Some(ClientRect::vertical(200.0, 300.0)),
        ];
        let first = detect_active(ids.iter().zip(rects), 50.0, ActivePolicy::FirstMatch);
        assert_eq!(first.ids(), &ids[0..1]);

        let all = detect_active(ids.iter().zip(rects), 50.0, ActivePolicy::AllMatches);
        assert_eq!(all.ids(), &ids[0..2]);
        assert_eq!(all.highlighted(), Some(&ids[1]));
    }

    #[test]
    fn unreadable_rect_never_matches() {
        let ids = ids(&["s1"]);
        let state = detect_active(ids.iter().zip([None]), 50.0, ActivePolicy::AllMatches);
        assert!(state.is_empty());
    }

    #[test]
    fn scroll_top_shows_past_quarter() {
        let m = |scroll_y| ViewportMetrics {
            scroll_y,
            content_height: 4000.0,
            nav_height: 50.0,
        };
        assert!(!scroll_top_visible(m(0.0), 0.25));
        assert!(!scroll_top_visible(m(1000.0), 0.25));
        assert!(scroll_top_visible(m(1000.5), 0.25));
    }

    #[test]
    fn target_offset_lands_below_nav() {
        assert_eq!(nav_target_offset(1200.0, 52.0, 1.0), 1149.0);
        assert_eq!(nav_target_offset(0.0, 52.0, 1.0), -51.0);
    }
}
