#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Scroll { rows: i64 },
    ScrollPage { forward: bool },
    Top,
    Bottom,
    /// Jump to the section at this position in page order.
    NavigateTo { index: usize },
    NextSection,
    PrevSection,
    CarouselNext,
    CarouselPrev,
    CarouselGoTo { index: usize },
    ToggleAutoplay,
    DebugStatusToggle,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionId {
    Scroll,
    ScrollPage,
    Top,
    Bottom,
    NavigateTo,
    NextSection,
    PrevSection,
    CarouselNext,
    CarouselPrev,
    CarouselGoTo,
    ToggleAutoplay,
    DebugStatusToggle,
    Quit,
    Input,
    NavigationRetry,
    NavigationSettled,
}

impl ActionId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scroll => "scroll",
            Self::ScrollPage => "scroll-page",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::NavigateTo => "navigate-to",
            Self::NextSection => "next-section",
            Self::PrevSection => "prev-section",
            Self::CarouselNext => "carousel-next",
            Self::CarouselPrev => "carousel-prev",
            Self::CarouselGoTo => "carousel-goto",
            Self::ToggleAutoplay => "toggle-autoplay",
            Self::DebugStatusToggle => "debug-status-toggle",
            Self::Quit => "quit",
            Self::Input => "input",
            Self::NavigationRetry => "navigation-retry",
            Self::NavigationSettled => "navigation-settled",
        }
    }
}

impl Command {
    pub fn action_id(&self) -> ActionId {
        match self {
            Self::Scroll { .. } => ActionId::Scroll,
            Self::ScrollPage { .. } => ActionId::ScrollPage,
            Self::Top => ActionId::Top,
            Self::Bottom => ActionId::Bottom,
            Self::NavigateTo { .. } => ActionId::NavigateTo,
            Self::NextSection => ActionId::NextSection,
            Self::PrevSection => ActionId::PrevSection,
            Self::CarouselNext => ActionId::CarouselNext,
            Self::CarouselPrev => ActionId::CarouselPrev,
            Self::CarouselGoTo { .. } => ActionId::CarouselGoTo,
            Self::ToggleAutoplay => ActionId::ToggleAutoplay,
            Self::DebugStatusToggle => ActionId::DebugStatusToggle,
            Self::Quit => ActionId::Quit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    Noop,
    QuitRequested,
}

#[cfg(test)]
mod tests {
    use super::{ActionId, Command};

    #[test]
    fn command_action_id_maps_navigation_and_carousel_variants() {
        assert_eq!(
            Command::NavigateTo { index: 2 }.action_id(),
            ActionId::NavigateTo
        );
        assert_eq!(
            Command::CarouselGoTo { index: 0 }.action_id(),
            ActionId::CarouselGoTo
        );
        assert_eq!(Command::ToggleAutoplay.action_id().as_str(), "toggle-autoplay");
        assert_eq!(Command::Scroll { rows: -3 }.action_id(), ActionId::Scroll);
    }
}
