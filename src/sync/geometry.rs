/// Vertical placement of an element within the scrollable document, in rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Extent {
    pub top: u32,
    pub height: u32,
}

impl Extent {
    pub fn new(top: u32, height: u32) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> u32 {
        self.top.saturating_add(self.height)
    }

    pub fn contains_row(&self, row: u32) -> bool {
        row >= self.top && row < self.bottom()
    }
}

/// The visible window over the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScrollViewport {
    pub scroll_top: u32,
    pub height: u32,
}

impl ScrollViewport {
    pub fn new(scroll_top: u32, height: u32) -> Self {
        Self { scroll_top, height }
    }

    pub fn bottom(&self) -> u32 {
        self.scroll_top.saturating_add(self.height)
    }

    /// Row used by the scroll-offset strategy to decide which element the
    /// reader is looking at.
    pub fn anchor_row(&self) -> u32 {
        self.scroll_top.saturating_add(self.height / 2)
    }

    /// Viewport grown by `margin` rows in both directions.
    pub fn expanded(&self, margin: u32) -> Self {
        let scroll_top = self.scroll_top.saturating_sub(margin);
        let bottom = self.bottom().saturating_add(margin);
        Self {
            scroll_top,
            height: bottom - scroll_top,
        }
    }

    pub fn overlap_rows(&self, extent: Extent) -> u32 {
        let start = self.scroll_top.max(extent.top);
        let end = self.bottom().min(extent.bottom());
        end.saturating_sub(start)
    }
}

/// Fraction of the element's height that lies inside the viewport.
///
/// Elements taller than the viewport are measured against the viewport
/// height, so a section filling the whole screen scores 1.0. Zero-height
/// elements are never visible.
pub fn intersection_ratio(viewport: ScrollViewport, extent: Extent) -> f32 {
    let visible_capacity = extent.height.min(viewport.height);
    if visible_capacity == 0 {
        return 0.0;
    }
    viewport.overlap_rows(extent) as f32 / visible_capacity as f32
}
