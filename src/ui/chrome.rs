use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::App;
use crate::carousel::CarouselPhase;

use super::layout::UiLayout;
use super::text::fit_width;

pub fn draw_chrome(frame: &mut Frame<'_>, layout: UiLayout, app: &App, now: Instant) {
    frame.render_widget(nav_bar(app, layout.nav.width), layout.nav);
    frame.render_widget(scroll_indicators(app, layout.indicators.height), layout.indicators);
    draw_status(frame, layout.status, app, now);
}

/// One entry per section; the active one is highlighted.
fn nav_bar(app: &App, width: u16) -> Paragraph<'static> {
    let navigator = &app.sync.navigator;
    let active = navigator.active();
    let mut spans = Vec::with_capacity(navigator.registry().len() * 2);
    for (index, section) in navigator.registry().iter().enumerate() {
        let label = format!(" {} {} ", index + 1, section.title);
        let style = if &section.id == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }

    let used: usize = spans.iter().map(Span::width).sum();
    let path = app.state.current_path.as_str();
    let room = usize::from(width).saturating_sub(used);
    if room > path.len() {
        spans.push(Span::raw(" ".repeat(room - path.len())));
        spans.push(Span::styled(
            path.to_string(),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Paragraph::new(Line::from(spans))
}

/// Vertical dots, one per section, centered in the indicator column.
fn scroll_indicators(app: &App, height: u16) -> Paragraph<'static> {
    let registry = app.sync.navigator.registry();
    let active = app.sync.navigator.active();
    let count = registry.len();
    let pad = usize::from(height).saturating_sub(count) / 2;

    let mut lines = vec![Line::default(); pad];
    for section in registry.iter() {
        let line = if &section.id == active {
            Line::from(Span::styled("●", Style::default().fg(Color::Cyan)))
        } else {
            Line::from(Span::styled("○", Style::default().fg(Color::DarkGray)))
        };
        lines.push(line);
    }
    Paragraph::new(lines)
}

fn draw_status(frame: &mut Frame<'_>, area: Rect, app: &App, now: Instant) {
    let width = usize::from(area.width);
    let status_text = fit_width(&status_line(app), width);
    let top = Rect::new(area.x, area.y, area.width, 1);
    frame.render_widget(Paragraph::new(status_text), top);

    if app.state.debug_status_visible && area.height >= 2 {
        let bottom = Rect::new(area.x, area.y + 1, area.width, 1);
        let debug_text = fit_width(&debug_line(app, now), width);
        frame.render_widget(
            Paragraph::new(debug_text).style(Style::default().fg(Color::DarkGray)),
            bottom,
        );
    }
}

fn status_line(app: &App) -> String {
    let registry = app.sync.navigator.registry();
    let active = app.sync.navigator.active();
    let position = registry.position(active).map_or(0, |index| index + 1);
    let title = registry.get(active).map_or("-", |section| section.title.as_str());

    let mut text = format!(
        "{} | section {}/{} {}",
        app.state.current_path,
        position,
        registry.len(),
        title
    );
    if app.sync.pending.is_some() {
        text.push_str(" | loading");
    }
    if !app.state.status.message.is_empty() {
        text.push_str(" | ");
        text.push_str(&app.state.status.message);
    }
    text
}

fn debug_line(app: &App, now: Instant) -> String {
    let command_id = app
        .state
        .status
        .last_action_id
        .map(|id| id.as_str())
        .unwrap_or("-");
    format!(
        "cmd={command_id} | provider={} | observed={} | suspended={} | scroll={}/{} | skills={} | certs={}",
        app.sync.observer.provider_kind().id(),
        app.sync
            .observer
            .get_active_section()
            .map_or("-", |id| id.as_str()),
        app.sync.navigator.is_suspended(),
        app.page.scroll_top(),
        app.page.max_scroll(),
        phase_label(app.carousels.skills.phase(now)),
        phase_label(app.carousels.certifications.phase(now)),
    )
}

fn phase_label(phase: CarouselPhase) -> &'static str {
    match phase {
        CarouselPhase::Idle => "idle",
        CarouselPhase::AutoAdvancing => "auto",
        CarouselPhase::ManualOverride => "manual",
        CarouselPhase::Paused => "paused",
    }
}
