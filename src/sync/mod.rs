//! Scroll-to-state synchronization between the viewport, the active section
//! and programmatic navigation.

pub mod geometry;
pub mod listeners;
pub mod navigator;
pub mod observer;
pub mod provider;
pub mod section;
pub mod store;
pub mod surface;

pub use geometry::{Extent, ScrollViewport, intersection_ratio};
pub use listeners::{Listeners, Subscription};
pub use navigator::{DEFAULT_SETTLE_DELAY, SectionNavigator};
pub use observer::{ObserverConfig, ViewportObserver};
pub use provider::{
    InertProvider, IntersectionProvider, ProviderKind, ScrollOffsetProvider, VisibilityProvider,
    create_provider, resolve_provider, resolve_provider_with,
};
pub use section::{Section, SectionId, SectionRegistry};
pub use store::{ActiveSectionStore, NavigationState};
pub use surface::{NoRoute, RouteSink, Surface};
