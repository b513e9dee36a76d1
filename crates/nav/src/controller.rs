use foundation::ids::SectionId;
use runtime::event_bus::{Event, EventBus};
use runtime::timer::{TimerDriver, TimerHandle};

use crate::config::NavConfig;
use crate::detect::{ActiveState, detect_active, nav_target_offset, scroll_top_visible};
use crate::error::NavError;
use crate::model::{NavEntry, Section, SectionSet};
use crate::view::NavView;

/// Drives the navigation menu of one page.
///
/// Every public handler reacts to exactly one host event and runs to
/// completion. The only deferred work is the navigation-bar reveal, and at
/// most one reveal is pending at any time.
pub struct ViewportNavController<V, T> {
    config: NavConfig,
    view: V,
    timers: T,
    sections: SectionSet,
    entries: Vec<NavEntry>,
    built: bool,
    active: ActiveState,
    pending_reveal: Option<TimerHandle>,
    tick: u64,
    bus: EventBus,
}

impl<V: NavView, T: TimerDriver> ViewportNavController<V, T> {
    pub fn new(
        config: NavConfig,
        view: V,
        timers: T,
        sections: Vec<Section>,
    ) -> Result<Self, NavError> {
        config.validate()?;
        let sections = SectionSet::new(sections)?;
        Ok(Self {
            config,
            view,
            timers,
            sections,
            entries: Vec::new(),
            built: false,
            active: ActiveState::none(),
            pending_reveal: None,
            tick: 0,
            bus: EventBus::new(),
        })
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn timers(&self) -> &T {
        &self.timers
    }

    pub fn timers_mut(&mut self) -> &mut T {
        &mut self.timers
    }

    pub fn sections(&self) -> &SectionSet {
        &self.sections
    }

    pub fn entries(&self) -> &[NavEntry] {
        &self.entries
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    pub fn active(&self) -> &ActiveState {
        &self.active
    }

    pub fn pending_reveal(&self) -> Option<TimerHandle> {
        self.pending_reveal
    }

    pub fn events(&self) -> &[Event] {
        self.bus.events()
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        self.bus.drain()
    }

    /// Builds one menu entry per section, in document order.
    ///
    /// Returns the number of entries appended. Only the first call builds;
    /// later calls fail with [`NavError::AlreadyBuilt`] and touch nothing.
    pub fn build_nav(&mut self) -> Result<usize, NavError> {
        let tick = self.next_tick();
        if self.built {
            return Err(NavError::AlreadyBuilt);
        }
        let entries = self.sections.nav_entries();
        self.view.append_entries(&entries)?;
        self.built = true;
        self.entries = entries;
        self.bus
            .emit(tick, "build", format!("{} entries", self.entries.len()));
        Ok(self.entries.len())
    }

    /// Scroll handler: recomputes the active section(s), restyles sections
    /// and menu, then runs [`Self::hide_and_show`].
    pub fn check_active(&mut self) -> Result<&ActiveState, NavError> {
        let tick = self.next_tick();
        let threshold = self.view.metrics().nav_height;

        let rects: Vec<_> = self
            .sections
            .ids()
            .map(|id| (id, self.view.section_rect(id)))
            .collect();
        let next = detect_active(rects, threshold, self.config.active_policy);

        for id in self.sections.ids() {
            self.view.set_section_active(id, next.contains(id))?;
        }
        match next.highlighted() {
            Some(anchor) => self.view.highlight(anchor)?,
            None => self.view.clear_highlight()?,
        }

        if next != self.active {
            self.bus.emit(tick, "active", join_ids(next.ids()));
        }
        self.active = next;

        self.hide_and_show()?;
        Ok(&self.active)
    }

    /// Hides the navigation bar until scrolling pauses, and toggles the
    /// back-to-top control.
    ///
    /// The bar is only hidden once its reveal is scheduled; if scheduling
    /// fails it stays visible.
    pub fn hide_and_show(&mut self) -> Result<(), NavError> {
        let tick = self.tick;
        let metrics = self.view.metrics();
        let show = scroll_top_visible(metrics, self.config.scroll_top_fraction);
        self.view.set_scroll_top_visible(show)?;

        if let Some(stale) = self.pending_reveal.take() {
            if self.timers.cancel(stale) {
                self.bus
                    .emit(tick, "reveal_cancelled", format!("timer {}", stale.raw()));
            }
        }
        let handle = match self.timers.schedule(self.config.reveal_delay()) {
            Ok(handle) => handle,
            Err(err) => {
                self.view.set_nav_bar_visible(true)?;
                return Err(err.into());
            }
        };
        self.pending_reveal = Some(handle);
        self.bus.emit(
            tick,
            "reveal_scheduled",
            format!("timer {} in {}ms", handle.raw(), self.config.reveal_delay_ms),
        );
        self.view.set_nav_bar_visible(false)
    }

    /// Delivers a fired timer.
    ///
    /// Returns `true` if it was the pending reveal; anything else is stale
    /// and ignored.
    pub fn on_timer(&mut self, handle: TimerHandle) -> Result<bool, NavError> {
        let tick = self.next_tick();
        self.timers.release(handle);
        if self.pending_reveal != Some(handle) {
            return Ok(false);
        }
        self.pending_reveal = None;
        self.view.set_nav_bar_visible(true)?;
        self.bus.emit(tick, "reveal", format!("timer {}", handle.raw()));
        Ok(true)
    }

    /// Menu click: scrolls so the section's top sits just below the bar.
    ///
    /// Returns `false` (and does nothing) for an unknown anchor.
    pub fn nav_click(&mut self, anchor: &str) -> Result<bool, NavError> {
        let tick = self.next_tick();
        let Some(section) = self.sections.get(anchor) else {
            return Ok(false);
        };
        let id = section.id.clone();
        let Some(offset_top) = self.view.section_offset_top(&id) else {
            return Ok(false);
        };

        let nav_height = self.view.metrics().nav_height;
        let top = nav_target_offset(offset_top, nav_height, self.config.offset_correction_px);
        self.view.scroll_to(top)?;
        self.bus.emit(tick, "scroll_to", format!("{id} at {top}"));
        Ok(true)
    }

    /// Flips a section between expanded and collapsed.
    ///
    /// Returns the new expanded state, or `None` for an unknown section.
    pub fn toggle_section(&mut self, id: &str) -> Result<Option<bool>, NavError> {
        let tick = self.next_tick();
        let Some(section) = self.sections.get(id) else {
            return Ok(None);
        };
        let id: SectionId = section.id.clone();
        let expanded = !section.expanded;

        self.view.set_section_expanded(&id, expanded)?;
        if let Some(section) = self.sections.get_mut(id.as_str()) {
            section.expanded = expanded;
        }

        let kind = if expanded { "expand" } else { "collapse" };
        self.bus.emit(tick, kind, id.to_string());
        Ok(Some(expanded))
    }

    pub fn scroll_to_top(&mut self) -> Result<(), NavError> {
        let tick = self.next_tick();
        self.view.scroll_to(0.0)?;
        self.bus.emit(tick, "scroll_to", "top at 0");
        Ok(())
    }

    /// Cancels the pending reveal, if any.
    pub fn shutdown(&mut self) {
        let tick = self.next_tick();
        if let Some(handle) = self.pending_reveal.take() {
            self.timers.cancel(handle);
            self.bus
                .emit(tick, "reveal_cancelled", format!("timer {}", handle.raw()));
        }
    }

    fn next_tick(&mut self) -> u64 {
        self.tick = self.tick.wrapping_add(1);
        self.tick
    }
}

fn join_ids(ids: &[SectionId]) -> String {
    if ids.is_empty() {
        return "none".to_string();
    }
    ids.iter()
        .map(SectionId::as_str)
        .collect::<Vec<_>>()
        .join(",")
}
