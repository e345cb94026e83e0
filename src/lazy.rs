use std::collections::HashSet;

use crate::sync::{Extent, ScrollViewport, SectionId};

/// Mounts section bodies the first time they come near the viewport.
///
/// Mounting is one-way. Sections start unmounted except for the ones passed
/// as eager, which covers the hero that is on screen at startup.
#[derive(Debug, Clone)]
pub struct LazyMounter {
    root_margin: u32,
    mounted: HashSet<SectionId>,
}

impl LazyMounter {
    pub fn new(root_margin: u32, eager: impl IntoIterator<Item = SectionId>) -> Self {
        Self {
            root_margin,
            mounted: eager.into_iter().collect(),
        }
    }

    pub fn is_mounted(&self, id: &SectionId) -> bool {
        self.mounted.contains(id)
    }

    pub fn mounted_len(&self) -> usize {
        self.mounted.len()
    }

    /// Forces a section to mount, e.g. ahead of a navigation to it.
    pub fn mount(&mut self, id: &SectionId) -> bool {
        self.mounted.insert(id.clone())
    }

    /// Mounts every placeholder that intersects the viewport grown by the
    /// root margin. Returns the ids mounted by this call.
    pub fn on_scroll<'a, I>(&mut self, viewport: ScrollViewport, placeholders: I) -> Vec<SectionId>
    where
        I: IntoIterator<Item = (&'a SectionId, Extent)>,
    {
        let window = viewport.expanded(self.root_margin);
        let mut newly_mounted = Vec::new();
        for (id, extent) in placeholders {
            if self.mounted.contains(id) {
                continue;
            }
            // Empty placeholders still mount once their top edge is in range.
            let in_range = if extent.height == 0 {
                extent.top >= window.scroll_top && extent.top < window.bottom()
            } else {
                window.overlap_rows(extent) > 0
            };
            if in_range {
                self.mounted.insert(id.clone());
                tracing::debug!(section = %id, "section mounted");
                newly_mounted.push(id.clone());
            }
        }
        newly_mounted
    }
}
