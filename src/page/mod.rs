mod document;
mod layout;
mod scroll;

pub use document::{Block, CAROUSEL_ROWS, CarouselSlot, SectionView, build_document};
pub use layout::{PLACEHOLDER_ROWS, PageLayout, PageTick, Placement};
pub use scroll::ScrollAnimator;
