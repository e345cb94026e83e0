use super::geometry::Extent;
use super::section::SectionId;

/// The rendered document the sync core coordinates with.
pub trait Surface {
    /// Placement of the element for `id`, or `None` while it is not mounted.
    fn element(&self, id: &SectionId) -> Option<Extent>;

    /// Starts bringing `extent` into view. May animate; returns immediately.
    fn scroll_into_view(&mut self, id: &SectionId, extent: Extent);
}

/// Receives the routable path of the active section.
pub trait RouteSink {
    fn update_path(&mut self, path: &str);
}

/// Route sink for pages without a routing layer.
#[derive(Debug, Default)]
pub struct NoRoute;

impl RouteSink for NoRoute {
    fn update_path(&mut self, _path: &str) {}
}
