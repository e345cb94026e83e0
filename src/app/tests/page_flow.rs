use std::time::{Duration, Instant};

use crate::app::App;
use crate::command::{Command, CommandOutcome, dispatch};
use crate::config::Config;
use crate::content::Portfolio;
use crate::sync::SectionId;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Demo page with a 4-row viewport and no lazy margin, so only the hero
/// is mounted at startup.
fn tight_app(now: Instant) -> App {
    let mut config = Config::default();
    config.page.lazy_root_margin = 0;
    let mut app = App::new(&Portfolio::demo(), config, now).expect("app");
    app.set_viewport_height(4);
    app
}

/// Runs frames every 20ms from `from` until `until`, returning the last timestamp.
fn run_frames(app: &mut App, from: Instant, until: Instant) -> Instant {
    let mut now = from;
    while now < until {
        now += ms(20);
        app.on_frame(now);
    }
    now
}

#[test]
fn navigation_to_unmounted_section_mounts_it_and_retries() {
    let t0 = Instant::now();
    let mut app = tight_app(t0);
    let skills = SectionId::from("skills");
    assert!(!app.page.is_mounted(&skills));

    let outcome = dispatch(&mut app, Command::NavigateTo { index: 3 }, t0);
    assert_eq!(outcome, CommandOutcome::Applied);
    assert!(app.sync.pending.is_some());
    assert_eq!(app.sync.navigator.active().as_str(), "home");

    app.on_frame(t0 + ms(1));
    assert!(app.page.is_mounted(&skills));
    assert!(app.sync.observer.is_registered(&skills));
    assert!(app.sync.pending.is_some(), "retry waits for its backoff");

    app.on_frame(t0 + ms(60));
    assert!(app.sync.pending.is_none());
    assert_eq!(app.sync.navigator.active(), &skills);
    assert!(app.sync.navigator.is_suspended());
    assert_eq!(app.state.current_path, "/skills");

    let settled_at = run_frames(&mut app, t0 + ms(60), t0 + ms(1200));
    assert!(!app.sync.navigator.is_suspended());
    assert_eq!(app.sync.navigator.active(), &skills);
    assert_eq!(app.state.current_path, "/skills");
    let extent = app.page.slot_extent(&skills).expect("slot");
    assert_eq!(app.page.scroll_top(), extent.top);
    assert!(!app.on_frame(settled_at + ms(20)));
}

#[test]
fn observer_does_not_override_a_settling_navigation() {
    let t0 = Instant::now();
    let mut config = Config::default();
    config.page.scroll_animation_ms = 0;
    let mut app = App::new(&Portfolio::demo(), config, t0).expect("app");
    app.set_viewport_height(10);
    let mut now = run_frames(&mut app, t0, t0 + ms(100));

    dispatch(&mut app, Command::NavigateTo { index: 4 }, now);
    now = run_frames(&mut app, now, now + ms(100));
    assert_eq!(app.sync.navigator.active().as_str(), "certifications");

    // The reader scrolls back up while the navigation is still settling.
    dispatch(&mut app, Command::Top, now);
    now = run_frames(&mut app, now, now + ms(100));
    assert!(app.sync.navigator.is_suspended());
    assert_eq!(app.sync.navigator.active().as_str(), "certifications");
    assert_eq!(app.state.current_path, "/certifications");

    // Once the window elapses the store follows the viewport again.
    now = run_frames(&mut app, now, now + ms(1000));
    assert!(!app.sync.navigator.is_suspended());
    assert_eq!(app.sync.navigator.active().as_str(), "home");
    assert_eq!(app.state.current_path, "/");

    dispatch(&mut app, Command::Scroll { rows: 1 }, now);
    run_frames(&mut app, now, now + ms(100));
    assert_eq!(app.sync.navigator.active().as_str(), "projects");
    assert_eq!(app.state.current_path, "/projects");
}

#[test]
fn settle_keeps_target_at_deadline_then_follows_viewport() {
    let t0 = Instant::now();
    let mut config = Config::default();
    config.page.scroll_animation_ms = 0;
    let mut app = App::new(&Portfolio::demo(), config, t0).expect("app");
    app.set_viewport_height(10);
    let mut now = run_frames(&mut app, t0, t0 + ms(100));

    dispatch(&mut app, Command::NavigateTo { index: 4 }, now);
    while app.sync.navigator.next_deadline().is_none() && now < t0 + ms(1000) {
        now += ms(20);
        app.on_frame(now);
    }
    let deadline = app.sync.navigator.next_deadline().expect("navigation started");

    dispatch(&mut app, Command::Top, now);
    now += ms(20);
    app.on_frame(now);
    assert_eq!(
        app.sync.observer.get_active_section().map(SectionId::as_str),
        Some("home")
    );

    // The frame that closes the window still reports the target.
    app.on_frame(deadline);
    assert!(!app.sync.navigator.is_suspended());
    assert_eq!(app.sync.navigator.active().as_str(), "certifications");
    assert_eq!(app.state.current_path, "/certifications");

    assert!(app.on_frame(deadline + ms(20)));
    assert_eq!(app.sync.navigator.active().as_str(), "home");
    assert_eq!(app.state.current_path, "/");
}

#[test]
fn scrolling_within_a_section_after_settle_keeps_store_on_that_section() {
    let t0 = Instant::now();
    let mut app = App::new(&Portfolio::demo(), Config::default(), t0).expect("app");
    app.set_viewport_height(4);

    dispatch(&mut app, Command::NavigateTo { index: 4 }, t0);
    let mut now = run_frames(&mut app, t0, t0 + ms(200));
    assert_eq!(app.sync.navigator.active().as_str(), "certifications");

    dispatch(&mut app, Command::Top, now);
    now = run_frames(&mut app, now, now + ms(1500));
    dispatch(&mut app, Command::Scroll { rows: 1 }, now);
    now = run_frames(&mut app, now, now + ms(40));
    dispatch(&mut app, Command::Scroll { rows: -1 }, now);
    run_frames(&mut app, now, now + ms(5000));

    assert_eq!(app.page.scroll_top(), 0);
    assert!(!app.sync.navigator.is_suspended());
    assert_eq!(
        app.sync.observer.get_active_section().map(SectionId::as_str),
        Some("home")
    );
    assert_eq!(app.sync.navigator.active().as_str(), "home");
    assert_eq!(app.state.current_path, "/");
}

#[test]
fn reader_scroll_moves_active_section_and_path() {
    let t0 = Instant::now();
    let mut app = App::new(&Portfolio::demo(), Config::default(), t0).expect("app");
    app.set_viewport_height(10);

    let mut now = t0;
    for _ in 0..8 {
        dispatch(&mut app, Command::Bottom, now);
        now += ms(20);
        app.on_frame(now);
    }

    assert_eq!(app.page.scroll_top(), app.page.max_scroll());
    assert_eq!(app.sync.navigator.active().as_str(), "certifications");
    assert_eq!(app.state.current_path, "/certifications");
    assert!(!app.sync.navigator.is_suspended());
}

#[test]
fn carousel_fills_on_mount_and_manual_action_holds_autoplay() {
    let t0 = Instant::now();
    let mut app = tight_app(t0);
    assert!(app.carousels.skills.is_empty());

    dispatch(&mut app, Command::NavigateTo { index: 3 }, t0);
    app.on_frame(t0 + ms(1));
    assert_eq!(app.carousels.skills.len(), 3);
    assert_eq!(app.carousels.skills.active_index(), Some(0));

    app.on_frame(t0 + ms(60));
    let outcome = dispatch(&mut app, Command::CarouselNext, t0 + ms(100));
    assert_eq!(outcome, CommandOutcome::Applied);
    assert_eq!(app.carousels.skills.active_index(), Some(1));

    // First tick lands 3.9s after the manual step and is suppressed.
    app.on_frame(t0 + ms(4001));
    assert_eq!(app.carousels.skills.active_index(), Some(1));

    // The next one is outside the window and advances.
    app.on_frame(t0 + ms(8001));
    assert_eq!(app.carousels.skills.active_index(), Some(2));
}

#[test]
fn carousel_commands_outside_a_carousel_section_are_noops() {
    let t0 = Instant::now();
    let mut app = tight_app(t0);

    let outcome = dispatch(&mut app, Command::CarouselNext, t0);
    assert_eq!(outcome, CommandOutcome::Noop);
    assert_eq!(app.state.status.message, "no carousel in this section");
}

#[test]
fn navigation_to_missing_position_reports_and_does_nothing() {
    let t0 = Instant::now();
    let mut app = tight_app(t0);

    let outcome = dispatch(&mut app, Command::NavigateTo { index: 9 }, t0);
    assert_eq!(outcome, CommandOutcome::Noop);
    assert_eq!(app.state.status.message, "no section at position 10");
    assert!(app.sync.pending.is_none());
    assert!(!app.sync.navigator.is_suspended());
}

#[test]
fn shutdown_stops_timers_and_pending_retries() {
    let t0 = Instant::now();
    let mut app = tight_app(t0);
    dispatch(&mut app, Command::NavigateTo { index: 3 }, t0);
    app.on_frame(t0 + ms(1));
    assert!(app.carousels.skills.next_tick_at().is_some());

    app.shutdown();
    assert!(app.sync.pending.is_none());
    assert!(app.carousels.skills.next_tick_at().is_none());
    assert!(app.carousels.certifications.next_tick_at().is_none());
}
