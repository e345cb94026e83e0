use std::collections::HashMap;

use crate::error::SyncResult;

use super::geometry::{Extent, ScrollViewport, intersection_ratio};
use super::section::SectionId;

/// Capability the viewport observer depends on to score element visibility.
///
/// Implementations only track targets and report per-target scores in
/// `[0.0, 1.0]`; choosing the active section stays with the observer.
pub trait VisibilityProvider {
    fn kind(&self) -> ProviderKind;

    /// Starts tracking `id`. Observing an already tracked id replaces its extent.
    fn observe(&mut self, id: &SectionId, extent: Extent) -> SyncResult<()>;

    /// Stops tracking `id`. Unknown ids are ignored.
    fn unobserve(&mut self, id: &SectionId);

    fn score(&self, id: &SectionId, viewport: ScrollViewport) -> Option<f32>;

    fn observed_len(&self) -> usize;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Intersection,
    ScrollOffset,
    Inert,
}

impl ProviderKind {
    pub fn id(self) -> &'static str {
        match self {
            Self::Intersection => "intersection",
            Self::ScrollOffset => "scroll-offset",
            Self::Inert => "inert",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "intersection" => Some(Self::Intersection),
            "scroll-offset" => Some(Self::ScrollOffset),
            "inert" => Some(Self::Inert),
            _ => None,
        }
    }
}

/// Scores an element by how much of its height intersects the viewport.
#[derive(Debug, Default)]
pub struct IntersectionProvider {
    targets: HashMap<SectionId, Extent>,
}

impl VisibilityProvider for IntersectionProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Intersection
    }

    fn observe(&mut self, id: &SectionId, extent: Extent) -> SyncResult<()> {
        self.targets.insert(id.clone(), extent);
        Ok(())
    }

    fn unobserve(&mut self, id: &SectionId) {
        self.targets.remove(id);
    }

    fn score(&self, id: &SectionId, viewport: ScrollViewport) -> Option<f32> {
        self.targets
            .get(id)
            .map(|extent| intersection_ratio(viewport, *extent))
    }

    fn observed_len(&self) -> usize {
        self.targets.len()
    }
}

/// Fallback that only looks at offsets: an element scores 1.0 while the
/// viewport's anchor row lies between its top and bottom, otherwise 0.0.
#[derive(Debug, Default)]
pub struct ScrollOffsetProvider {
    targets: HashMap<SectionId, Extent>,
}

impl VisibilityProvider for ScrollOffsetProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::ScrollOffset
    }

    fn observe(&mut self, id: &SectionId, extent: Extent) -> SyncResult<()> {
        self.targets.insert(id.clone(), extent);
        Ok(())
    }

    fn unobserve(&mut self, id: &SectionId) {
        self.targets.remove(id);
    }

    fn score(&self, id: &SectionId, viewport: ScrollViewport) -> Option<f32> {
        self.targets.get(id).map(|extent| {
            if extent.contains_row(viewport.anchor_row()) {
                1.0
            } else {
                0.0
            }
        })
    }

    fn observed_len(&self) -> usize {
        self.targets.len()
    }
}

/// Last-resort provider: accepts every target and never reports one as visible.
#[derive(Debug, Default)]
pub struct InertProvider;

impl VisibilityProvider for InertProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Inert
    }

    fn observe(&mut self, _id: &SectionId, _extent: Extent) -> SyncResult<()> {
        Ok(())
    }

    fn unobserve(&mut self, _id: &SectionId) {}

    fn score(&self, _id: &SectionId, _viewport: ScrollViewport) -> Option<f32> {
        None
    }

    fn observed_len(&self) -> usize {
        0
    }
}

pub fn create_provider(kind: ProviderKind) -> SyncResult<Box<dyn VisibilityProvider>> {
    match kind {
        ProviderKind::Intersection => Ok(Box::new(IntersectionProvider::default())),
        ProviderKind::ScrollOffset => Ok(Box::new(ScrollOffsetProvider::default())),
        ProviderKind::Inert => Ok(Box::new(InertProvider)),
    }
}

pub fn resolve_provider(candidates: &[ProviderKind]) -> Box<dyn VisibilityProvider> {
    resolve_provider_with(candidates, create_provider)
}

/// Walks `candidates` in order and keeps the first one `build` can create.
/// The inert provider is the final fallback, so resolution never fails.
pub fn resolve_provider_with<F>(candidates: &[ProviderKind], mut build: F) -> Box<dyn VisibilityProvider>
where
    F: FnMut(ProviderKind) -> SyncResult<Box<dyn VisibilityProvider>>,
{
    for &kind in candidates {
        match build(kind) {
            Ok(provider) => {
                tracing::info!(provider = kind.id(), "visibility provider selected");
                return provider;
            }
            Err(err) => {
                tracing::warn!(provider = kind.id(), error = %err, "visibility provider unavailable");
            }
        }
    }

    tracing::warn!("no visibility provider available, active section tracking is inert");
    Box::new(InertProvider)
}

pub(crate) fn fallback_provider(failed: ProviderKind) -> Option<Box<dyn VisibilityProvider>> {
    match failed {
        ProviderKind::Intersection => Some(Box::new(ScrollOffsetProvider::default())),
        ProviderKind::ScrollOffset => Some(Box::new(InertProvider)),
        ProviderKind::Inert => None,
    }
}
