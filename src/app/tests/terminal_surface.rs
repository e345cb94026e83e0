use std::convert::Infallible;
use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Size;

use crate::app::App;
use crate::config::Config;
use crate::content::Portfolio;
use crate::event::DomainEvent;

use super::super::event_loop::LoopControl;
use super::super::terminal_session::TerminalSurface;

struct TestTerminalSurface {
    terminal: Terminal<TestBackend>,
}

impl TestTerminalSurface {
    fn new(width: u16, height: u16) -> io::Result<Self> {
        let terminal = infallible_to_io(Terminal::new(TestBackend::new(width, height)))?;
        Ok(Self { terminal })
    }

    fn row(&self, y: u16) -> String {
        let buffer = self.terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }
}

impl TerminalSurface for TestTerminalSurface {
    fn size(&self) -> io::Result<Size> {
        infallible_to_io(self.terminal.size())
    }

    fn clear(&mut self) -> io::Result<()> {
        infallible_to_io(self.terminal.clear())
    }

    fn draw<F>(&mut self, render: F) -> io::Result<()>
    where
        F: FnOnce(&mut Frame<'_>),
    {
        infallible_to_io(self.terminal.draw(render)).map(|_| ())
    }
}

fn infallible_to_io<T>(result: Result<T, Infallible>) -> io::Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(err) => match err {},
    }
}

fn demo_app(now: Instant) -> App {
    App::new(&Portfolio::demo(), Config::default(), now).expect("demo app should build")
}

#[test]
fn render_frame_draws_nav_page_and_status() {
    let now = Instant::now();
    let mut app = demo_app(now);
    let mut session = TestTerminalSurface::new(100, 24).expect("test terminal should initialize");

    app.render_frame(&mut session, now).expect("draw should succeed");

    assert_eq!(app.page.viewport().height, 22);
    assert!(session.row(0).contains("1 Home"));
    assert!(session.row(0).contains("5 Certifications"));
    assert!(session.row(2).contains("Ada Example"));
    assert!(session.row(23).starts_with("/ | section 1/5 Home"));
}

#[test]
fn unmounted_sections_render_as_loading_placeholders() {
    let now = Instant::now();
    let mut config = Config::default();
    config.page.lazy_root_margin = 0;
    let mut app = App::new(&Portfolio::demo(), config, now).expect("app");
    let mut session = TestTerminalSurface::new(60, 12).expect("test terminal should initialize");

    app.render_frame(&mut session, now).expect("draw should succeed");

    // Hero takes six rows; the projects placeholder follows it.
    assert!(session.row(8).contains("loading Projects"));
}

#[test]
fn debug_toggle_adds_a_second_status_row() {
    let now = Instant::now();
    let mut app = demo_app(now);
    let mut session = TestTerminalSurface::new(160, 24).expect("test terminal should initialize");
    app.state.debug_status_visible = true;

    app.render_frame(&mut session, now).expect("draw should succeed");

    assert_eq!(app.page.viewport().height, 21);
    assert!(session.row(23).contains("provider=intersection"));
    assert!(session.row(22).starts_with("/ | section 1/5"));
}

#[test]
fn resize_and_quit_flow_through_domain_events() {
    let now = Instant::now();
    let mut app = demo_app(now);

    let control = app.handle_domain_event(DomainEvent::Input(Event::Resize(100, 30)), now);
    assert!(matches!(
        control,
        LoopControl::Continue {
            redraw: true,
            clear: true
        }
    ));
    assert_eq!(app.page.viewport().height, 28);

    let quit = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
    let control = app.handle_domain_event(DomainEvent::Input(Event::Key(quit)), now);
    assert!(matches!(control, LoopControl::Break));
}

#[test]
fn sections_without_featured_slides_render_no_carousel() {
    let now = Instant::now();
    let mut portfolio = Portfolio::demo();
    portfolio.skills.iter_mut().for_each(|skill| skill.featured = false);
    portfolio
        .certifications
        .iter_mut()
        .for_each(|cert| cert.featured = false);
    let mut app = App::new(&portfolio, Config::default(), now).expect("app");
    let mut session = TestTerminalSurface::new(80, 120).expect("test terminal should initialize");

    app.render_frame(&mut session, now).expect("draw should succeed");
    for step in 1..=10 {
        app.on_frame(now + Duration::from_millis(20 * step));
    }
    app.render_frame(&mut session, now).expect("draw should succeed");

    let rows: Vec<String> = (0..120).map(|y| session.row(y)).collect();
    assert!(rows.iter().any(|row| row.contains("No featured skills.")));
    assert!(rows.iter().any(|row| row.contains("No certifications yet.")));
    assert!(!rows.iter().any(|row| row.contains('‹') || row.contains('▶')));
}
