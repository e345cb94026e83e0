use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::App;
use crate::carousel::{Carousel, CarouselPhase};
use crate::content::Slide;
use crate::page::{Block, CAROUSEL_ROWS, PLACEHOLDER_ROWS};

use super::text::fit_width;

pub fn draw_page(frame: &mut Frame<'_>, area: Rect, app: &App, now: Instant) {
    let lines = visible_lines(app, area.width, area.height, now);
    frame.render_widget(Paragraph::new(lines), area);
}

/// The document rows that fall inside the viewport, top to bottom.
pub(crate) fn visible_lines(app: &App, width: u16, height: u16, now: Instant) -> Vec<Line<'static>> {
    let width = usize::from(width);
    let top = app.page.scroll_top();
    let bottom = top.saturating_add(u32::from(height));
    let mut out = vec![Line::default(); usize::from(height)];

    for placement in app.page.placements() {
        let extent = placement.extent;
        if extent.bottom() <= top || extent.top >= bottom {
            continue;
        }

        let rows = if placement.mounted {
            placement
                .view
                .blocks
                .iter()
                .flat_map(|block| block_lines(block, app, width, now))
                .collect::<Vec<_>>()
        } else {
            placeholder_lines(&placement.view.section.title, width)
        };

        for (offset, line) in rows.into_iter().enumerate() {
            let row = extent.top + offset as u32;
            if row >= top && row < bottom {
                out[(row - top) as usize] = line;
            }
        }
    }
    out
}

fn placeholder_lines(title: &str, width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![Line::default(); PLACEHOLDER_ROWS as usize];
    lines[1] = Line::from(Span::styled(
        fit_width(&format!("  loading {title}…"), width),
        Style::default().fg(Color::DarkGray),
    ));
    lines
}

fn block_lines(block: &Block, app: &App, width: usize, now: Instant) -> Vec<Line<'static>> {
    let line = match block {
        Block::Title(text) => Line::from(Span::styled(
            fit_width(text, width),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Block::Heading(text) => Line::from(Span::styled(
            fit_width(text, width),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )),
        Block::Text(text) => Line::from(fit_width(&format!("  {text}"), width)),
        Block::Muted(text) => Line::from(Span::styled(
            fit_width(&format!("  {text}"), width),
            Style::default().fg(Color::DarkGray),
        )),
        Block::Bullet(text) => Line::from(fit_width(&format!("  • {text}"), width)),
        Block::Blank => Line::default(),
        Block::Carousel(slot) => {
            let mut lines = carousel_lines(app.carousels.get(*slot), width, now);
            lines.resize(CAROUSEL_ROWS as usize, Line::default());
            return lines;
        }
    };
    vec![line]
}

/// Title, caption and a dot row with the autoplay marker. An empty
/// carousel renders nothing.
pub(crate) fn carousel_lines(
    carousel: &Carousel<Slide>,
    width: usize,
    now: Instant,
) -> Vec<Line<'static>> {
    let Some(slide) = carousel.active_item() else {
        return Vec::new();
    };

    let title = Line::from(Span::styled(
        fit_width(&format!("  ‹ {} ›", slide.title), width),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    let caption = Line::from(Span::styled(
        fit_width(&format!("    {}", slide.caption), width),
        Style::default().fg(Color::Gray),
    ));

    let active = carousel.active_index();
    let dots = (0..carousel.len())
        .map(|index| if Some(index) == active { "●" } else { "○" })
        .collect::<Vec<_>>()
        .join(" ");
    let marker = match carousel.phase(now) {
        CarouselPhase::AutoAdvancing => "▶ auto",
        CarouselPhase::ManualOverride => "▶ held",
        CarouselPhase::Paused => "⏸ paused",
        CarouselPhase::Idle => "",
    };
    let indicator = Line::from(vec![
        Span::styled(format!("    {dots}  "), Style::default().fg(Color::Cyan)),
        Span::styled(marker.to_string(), Style::default().fg(Color::DarkGray)),
    ]);

    vec![title, caption, indicator]
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use crate::carousel::{Carousel, CarouselConfig};
    use crate::content::Slide;

    use super::carousel_lines;

    fn slides(n: usize) -> Vec<Slide> {
        (0..n)
            .map(|i| Slide {
                id: format!("s{i}"),
                title: format!("Slide {i}"),
                caption: format!("caption {i}"),
            })
            .collect()
    }

    fn line_text(line: &ratatui::text::Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn carousel_lines_show_active_slide_dots_and_marker() {
        let now = Instant::now();
        let mut carousel = Carousel::new(slides(3), CarouselConfig::default(), now);
        carousel.go_to(1, now);

        let lines = carousel_lines(&carousel, 80, now + Duration::from_millis(10));
        assert_eq!(lines.len(), 3);
        assert!(line_text(&lines[0]).contains("Slide 1"));
        assert!(line_text(&lines[1]).contains("caption 1"));
        let dots = line_text(&lines[2]);
        assert!(dots.contains("○ ● ○"));
        assert!(dots.contains("held"));
    }

    #[test]
    fn empty_carousel_renders_nothing() {
        let now = Instant::now();
        let carousel: Carousel<Slide> = Carousel::new(Vec::new(), CarouselConfig::default(), now);
        assert!(carousel_lines(&carousel, 80, now).is_empty());
    }
}
