use std::time::{Duration, Instant};

use crate::lazy::LazyMounter;
use crate::sync::{Extent, ScrollViewport, SectionId, Surface};

use super::document::SectionView;
use super::scroll::ScrollAnimator;

/// Height of a section that has not been mounted yet.
pub const PLACEHOLDER_ROWS: u32 = 3;

/// Where a section sits in the document right now.
#[derive(Debug, Clone, Copy)]
pub struct Placement<'a> {
    pub view: &'a SectionView,
    pub extent: Extent,
    pub mounted: bool,
}

/// The scrollable document: stacked section views, lazily mounted, with a
/// scroll offset that either follows the reader or an eased animation.
pub struct PageLayout {
    views: Vec<SectionView>,
    extents: Vec<Extent>,
    lazy: LazyMounter,
    pending_mounts: Vec<SectionId>,
    viewport_height: u32,
    scroll_top: u32,
    /// Running scroll animation and the section it is heading for.
    animation: Option<(SectionId, ScrollAnimator)>,
    animation_duration: Duration,
}

impl PageLayout {
    pub fn new(
        views: Vec<SectionView>,
        lazy_root_margin: u32,
        animation_duration: Duration,
        viewport_height: u32,
    ) -> Self {
        let eager = views.first().map(|view| view.id().clone());
        let mut layout = Self {
            extents: Vec::with_capacity(views.len()),
            views,
            lazy: LazyMounter::new(lazy_root_margin, eager),
            pending_mounts: Vec::new(),
            viewport_height,
            scroll_top: 0,
            animation: None,
            animation_duration,
        };
        layout.recompute_extents();
        layout
    }

    pub fn viewport(&self) -> ScrollViewport {
        ScrollViewport::new(self.scroll_top, self.viewport_height)
    }

    pub fn scroll_top(&self) -> u32 {
        self.scroll_top
    }

    pub fn document_height(&self) -> u32 {
        self.extents.last().map_or(0, Extent::bottom)
    }

    pub fn max_scroll(&self) -> u32 {
        self.document_height().saturating_sub(self.viewport_height)
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn is_mounted(&self, id: &SectionId) -> bool {
        self.lazy.is_mounted(id)
    }

    pub fn placements(&self) -> impl Iterator<Item = Placement<'_>> {
        self.views
            .iter()
            .zip(self.extents.iter().copied())
            .map(|(view, extent)| Placement {
                view,
                extent,
                mounted: self.lazy.is_mounted(view.id()),
            })
    }

    /// Extent of the section whether or not it is mounted.
    pub fn slot_extent(&self, id: &SectionId) -> Option<Extent> {
        self.views
            .iter()
            .position(|view| view.id() == id)
            .map(|index| self.extents[index])
    }

    pub fn set_viewport_height(&mut self, height: u32) -> bool {
        if self.viewport_height == height {
            return false;
        }
        self.viewport_height = height;
        self.scroll_top = self.scroll_top.min(self.max_scroll());
        true
    }

    /// Reader-driven scroll. Cancels any running animation.
    pub fn scroll_by(&mut self, delta: i64) -> bool {
        self.animation = None;
        let target = (self.scroll_top as i64 + delta).clamp(0, self.max_scroll() as i64) as u32;
        self.set_scroll_top(target)
    }

    pub fn scroll_to(&mut self, top: u32) -> bool {
        self.animation = None;
        self.set_scroll_top(top.min(self.max_scroll()))
    }

    /// Queues a mount that lands on the next `tick`, like a component that
    /// loads asynchronously.
    pub fn request_mount(&mut self, id: &SectionId) {
        if !self.lazy.is_mounted(id) && !self.pending_mounts.contains(id) {
            self.pending_mounts.push(id.clone());
        }
    }

    /// Advances pending mounts, lazy loading and the scroll animation.
    pub fn tick(&mut self, now: Instant) -> PageTick {
        let mut tick = PageTick::default();

        for id in std::mem::take(&mut self.pending_mounts) {
            if self.lazy.mount(&id) {
                tick.mounted.push(id);
            }
        }

        let viewport = self.viewport();
        let slots: Vec<(SectionId, Extent)> = self
            .views
            .iter()
            .zip(self.extents.iter().copied())
            .map(|(view, extent)| (view.id().clone(), extent))
            .collect();
        tick.mounted.extend(
            self.lazy
                .on_scroll(viewport, slots.iter().map(|(id, extent)| (id, *extent))),
        );
        if !tick.mounted.is_empty() {
            self.recompute_extents();
            tick.relayout = true;
        }

        if let Some((target, mut animation)) = self.animation.take() {
            // Sections mounting above the target push it down mid-flight.
            if tick.relayout
                && let Some(extent) = self.slot_extent(&target)
            {
                animation.retarget(extent.top.min(self.max_scroll()));
            }
            let (position, done) = animation.position(now);
            tick.scrolled |= self.set_scroll_top(position.min(self.max_scroll()));
            if !done {
                self.animation = Some((target, animation));
            }
        }
        tick
    }

    fn set_scroll_top(&mut self, top: u32) -> bool {
        if self.scroll_top == top {
            return false;
        }
        self.scroll_top = top;
        true
    }

    fn recompute_extents(&mut self) {
        self.extents.clear();
        let mut top = 0;
        for view in &self.views {
            let height = if self.lazy.is_mounted(view.id()) {
                view.rows()
            } else {
                PLACEHOLDER_ROWS
            };
            self.extents.push(Extent::new(top, height));
            top += height;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageTick {
    pub mounted: Vec<SectionId>,
    pub relayout: bool,
    pub scrolled: bool,
}

impl Surface for PageLayout {
    fn element(&self, id: &SectionId) -> Option<Extent> {
        if !self.lazy.is_mounted(id) {
            return None;
        }
        self.slot_extent(id)
    }

    fn scroll_into_view(&mut self, id: &SectionId, extent: Extent) {
        let target = extent.top.min(self.max_scroll());
        self.animation = Some((
            id.clone(),
            ScrollAnimator::new(self.scroll_top, target, self.animation_duration),
        ));
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::{PLACEHOLDER_ROWS, PageLayout};
    use crate::content::Portfolio;
    use crate::page::document::build_document;
    use crate::sync::{SectionId, Surface};

    fn layout(viewport_height: u32) -> PageLayout {
        let (_, views) = build_document(&Portfolio::demo()).expect("document");
        PageLayout::new(views, 0, Duration::from_millis(100), viewport_height)
    }

    #[test]
    fn only_hero_is_mounted_before_first_tick() {
        let page = layout(4);
        assert!(page.element(&SectionId::from("home")).is_some());
        assert!(page.element(&SectionId::from("skills")).is_none());
        assert_eq!(
            page.slot_extent(&SectionId::from("skills")).map(|e| e.height),
            Some(PLACEHOLDER_ROWS)
        );
    }

    #[test]
    fn tick_mounts_sections_entering_viewport() {
        let mut page = layout(200);
        let tick = page.tick(Instant::now());
        assert_eq!(tick.mounted.len(), 4);
        assert!(tick.relayout);
        assert!(page.element(&SectionId::from("certifications")).is_some());
    }

    #[test]
    fn requested_mount_lands_on_next_tick() {
        let mut page = layout(4);
        let skills = SectionId::from("skills");
        page.request_mount(&skills);
        assert!(page.element(&skills).is_none());
        let tick = page.tick(Instant::now());
        assert!(tick.mounted.contains(&skills));
        assert!(page.element(&skills).is_some());
    }

    #[test]
    fn scroll_into_view_animates_to_element_top() {
        let mut page = layout(200);
        let t0 = Instant::now();
        page.tick(t0);
        page.set_viewport_height(5);

        let experience = SectionId::from("experience");
        let extent = page.element(&experience).expect("mounted");
        page.scroll_into_view(&experience, extent);
        assert!(page.is_animating());

        page.tick(t0 + Duration::from_millis(1));
        page.tick(t0 + Duration::from_millis(200));
        assert!(!page.is_animating());
        assert_eq!(page.scroll_top(), extent.top);
    }

    #[test]
    fn reader_scroll_cancels_animation_and_clamps() {
        let mut page = layout(200);
        page.tick(Instant::now());
        page.set_viewport_height(5);
        let extent = page.element(&SectionId::from("skills")).expect("mounted");
        page.scroll_into_view(&SectionId::from("skills"), extent);

        page.scroll_by(-10);
        assert!(!page.is_animating());
        assert_eq!(page.scroll_top(), 0);

        page.scroll_by(i64::from(u32::MAX));
        assert_eq!(page.scroll_top(), page.max_scroll());
    }

    #[test]
    fn animation_follows_target_when_sections_above_it_mount() {
        let mut page = layout(4);
        let t0 = Instant::now();
        let skills = SectionId::from("skills");
        page.request_mount(&skills);
        page.tick(t0);
        let before = page.element(&skills).expect("mounted");
        page.scroll_into_view(&skills, before);

        // Projects and experience mount as the viewport passes over them.
        let mut now = t0;
        for _ in 0..20 {
            now += Duration::from_millis(10);
            page.tick(now);
        }
        let after = page.element(&skills).expect("mounted");
        assert!(after.top > before.top);
        assert!(!page.is_animating());
        assert_eq!(page.scroll_top(), after.top.min(page.max_scroll()));
    }
}
