use std::time::Instant;

use crate::app::App;

use super::types::{ActionId, Command, CommandOutcome};

pub fn dispatch(app: &mut App, cmd: Command, now: Instant) -> CommandOutcome {
    let step = i64::from(app.config.page.scroll_step);
    match cmd {
        Command::Scroll { rows } => scroll(app, rows.saturating_mul(step), ActionId::Scroll),
        Command::ScrollPage { forward } => {
            let page = i64::from(app.page.viewport().height.saturating_sub(1).max(1));
            let rows = if forward { page } else { -page };
            scroll(app, rows, ActionId::ScrollPage)
        }
        Command::Top => {
            let moved = app.page.scroll_to(0);
            report_scroll(app, moved, ActionId::Top)
        }
        Command::Bottom => {
            let bottom = app.page.max_scroll();
            let moved = app.page.scroll_to(bottom);
            report_scroll(app, moved, ActionId::Bottom)
        }
        Command::NavigateTo { index } => {
            let Some(section) = app.sync.navigator.registry().at(index) else {
                app.state.report(
                    ActionId::NavigateTo,
                    format!("no section at position {}", index + 1),
                );
                return CommandOutcome::Noop;
            };
            let id = section.id.clone();
            app.navigate(id, now)
        }
        Command::NextSection => {
            let registry = app.sync.navigator.registry();
            let id = registry.next_after(app.sync.navigator.active()).id.clone();
            app.navigate(id, now)
        }
        Command::PrevSection => {
            let registry = app.sync.navigator.registry();
            let id = registry.previous_before(app.sync.navigator.active()).id.clone();
            app.navigate(id, now)
        }
        Command::CarouselNext => with_focused_carousel(app, ActionId::CarouselNext, |carousel| {
            carousel.go_next(now)
        }),
        Command::CarouselPrev => with_focused_carousel(app, ActionId::CarouselPrev, |carousel| {
            carousel.go_previous(now)
        }),
        Command::CarouselGoTo { index } => {
            with_focused_carousel(app, ActionId::CarouselGoTo, |carousel| {
                carousel.go_to(index, now)
            })
        }
        Command::ToggleAutoplay => {
            with_focused_carousel(app, ActionId::ToggleAutoplay, |carousel| {
                carousel.toggle_auto_playing(now);
            })
        }
        Command::DebugStatusToggle => {
            app.state.debug_status_visible = !app.state.debug_status_visible;
            let label = if app.state.debug_status_visible {
                "shown"
            } else {
                "hidden"
            };
            app.state
                .report(ActionId::DebugStatusToggle, format!("debug status {label}"));
            CommandOutcome::Applied
        }
        Command::Quit => {
            app.state.report(ActionId::Quit, "quit requested");
            CommandOutcome::QuitRequested
        }
    }
}

fn scroll(app: &mut App, rows: i64, id: ActionId) -> CommandOutcome {
    let moved = app.page.scroll_by(rows);
    report_scroll(app, moved, id)
}

fn report_scroll(app: &mut App, moved: bool, id: ActionId) -> CommandOutcome {
    if !moved {
        app.state.report(id, "already at the edge");
        return CommandOutcome::Noop;
    }
    app.state.report(id, format!("row {}", app.page.scroll_top()));
    CommandOutcome::Applied
}

fn with_focused_carousel<F>(app: &mut App, id: ActionId, apply: F) -> CommandOutcome
where
    F: FnOnce(&mut crate::carousel::Carousel<crate::content::Slide>),
{
    let Some(slot) = app.focused_carousel_slot() else {
        app.state.report(id, "no carousel in this section");
        return CommandOutcome::Noop;
    };
    let carousel = app.carousels.get_mut(slot);
    if carousel.is_empty() {
        app.state.report(id, "carousel is empty");
        return CommandOutcome::Noop;
    }
    apply(carousel);

    let message = match carousel.active_item() {
        Some(slide) if carousel.is_auto_playing() => format!("{} (autoplay)", slide.title),
        Some(slide) => format!("{} (paused)", slide.title),
        None => String::new(),
    };
    app.state.report(id, message);
    CommandOutcome::Applied
}
