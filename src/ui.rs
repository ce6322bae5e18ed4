pub mod ring;

use chrono::{Local, TimeZone};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{
        canvas::{Canvas, Points},
        Gauge, Paragraph, Widget, Wrap,
    },
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::App,
    celebration::Celebration,
    clock::Clock,
    controller::{Affordance, Panel},
    cues::CueSink,
    session::SessionState,
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

pub fn state_color(state: SessionState) -> Color {
    match state {
        SessionState::Initial => Color::Gray,
        SessionState::Prepare => Color::Yellow,
        SessionState::Work => Color::Red,
        SessionState::Rest => Color::Green,
        SessionState::Complete => Color::Magenta,
    }
}

/// Rows needed to show `text` wrapped into `width` columns
fn wrapped_lines(text: &str, width: u16) -> u16 {
    if width == 0 {
        return 1;
    }
    (text.width() as f64 / width as f64).ceil().max(1.0) as u16
}

fn legend(panel: &Panel, start: &str, restart: &str) -> String {
    match panel.affordance {
        Affordance::Start => format!("(enter) {} / (esc)ape", start.to_lowercase()),
        Affordance::Restart => format!(
            "(enter) {} / (x) reset / (esc)ape",
            restart.to_lowercase()
        ),
        Affordance::Hidden => "(r)estart / (x) reset / (esc)ape".to_string(),
    }
}

impl<C: Clock, S: CueSink> Widget for &App<C, S> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let panel = self.controller.panel();
        let strings = self.controller.strings();

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let accent = state_color(panel.state);
        let accent_bold_style = bold_style.fg(accent);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let italic_dim_style = dim_style.add_modifier(Modifier::ITALIC);

        let inner_width = area.width.saturating_sub(HORIZONTAL_MARGIN * 2);
        let current_lines = wrapped_lines(&panel.current, inner_width);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints(
                [
                    Constraint::Length(1),             // header
                    Constraint::Length(1),             // stage
                    Constraint::Min(3),                // ring + countdown
                    Constraint::Length(current_lines), // current
                    Constraint::Length(1),             // next
                    Constraint::Length(1),             // padding
                    Constraint::Length(1),             // overall progress
                    Constraint::Length(1),             // legend
                ]
                .as_ref(),
            )
            .split(area);

        let started = self
            .controller
            .session()
            .started_at_ms
            .and_then(|ms| Local.timestamp_millis_opt(ms as i64).single())
            .map(|at| format!("{} {}", strings.started_at, at.format("%H:%M:%S")))
            .unwrap_or_default();
        Paragraph::new(Span::styled(started, dim_style))
            .alignment(Alignment::Right)
            .render(chunks[0], buf);

        Paragraph::new(Span::styled(panel.stage.as_str(), accent_bold_style))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        render_ring(panel, accent, chunks[2], buf);

        Paragraph::new(Span::styled(panel.current.as_str(), bold_style))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(chunks[3], buf);

        Paragraph::new(Span::styled(panel.next.as_str(), italic_dim_style))
            .alignment(Alignment::Center)
            .render(chunks[4], buf);

        Gauge::default()
            .gauge_style(Style::default().fg(accent))
            .ratio(panel.overall_progress.clamp(0.0, 1.0))
            .label(format!("{}%", panel.overall_percent()))
            .use_unicode(true)
            .render(chunks[6], buf);

        Paragraph::new(Span::styled(
            legend(panel, strings.start, strings.restart),
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .render(chunks[7], buf);

        if self.celebration.is_active {
            render_hearts(&self.celebration, area, buf);
        }
    }
}

/// Remaining-time ring with the countdown in its middle
fn render_ring(panel: &Panel, accent: Color, area: Rect, buf: &mut Buffer) {
    let (x_bounds, y_bounds) = ring::ring_bounds(area.width, area.height);
    let track = ring::arc_points(1.0);
    let remaining = ring::arc_points(1.0 - panel.ring_progress);

    Canvas::default()
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            ctx.draw(&Points {
                coords: &track,
                color: Color::DarkGray,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &remaining,
                color: accent,
            });
        })
        .render(area, buf);

    let mut countdown_style = Style::default().add_modifier(Modifier::BOLD);
    if panel.blink {
        countdown_style = countdown_style
            .fg(Color::Red)
            .add_modifier(Modifier::SLOW_BLINK);
    }
    let middle = Rect {
        y: area.y + area.height / 2,
        height: area.height.min(1),
        ..area
    };
    Paragraph::new(Span::styled(panel.countdown.as_str(), countdown_style))
        .alignment(Alignment::Center)
        .render(middle, buf);
}

/// Draw the completion hearts on top of everything else
fn render_hearts(celebration: &Celebration, area: Rect, buf: &mut Buffer) {
    let colors = [
        Color::LightRed,
        Color::Magenta,
        Color::LightMagenta,
        Color::Red,
        Color::Rgb(255, 105, 180),
    ];

    for particle in &celebration.particles {
        if particle.x < 0.0 || particle.y < 0.0 {
            continue;
        }
        let x = particle.x as u16;
        let y = particle.y as u16;

        if x < area.width && y < area.height {
            let color = colors[particle.color_index % colors.len()];
            let life = particle.life();
            let style = if life < 0.3 {
                Style::default().fg(color).add_modifier(Modifier::BOLD)
            } else if life < 0.7 {
                Style::default().fg(color)
            } else {
                Style::default().fg(color).add_modifier(Modifier::DIM)
            };

            if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
                cell.set_symbol(&particle.symbol.to_string());
                cell.set_style(style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::controller::Controller;
    use crate::cues::RecordingCues;
    use crate::locale::Locale;

    fn create_test_app(locale: Locale) -> (App<ManualClock, RecordingCues>, ManualClock) {
        let clock = ManualClock::new(1_700_000_000_000);
        let controller = Controller::new(locale, clock.clone(), RecordingCues::default());
        (App::new(controller, true, 100), clock)
    }

    fn rendered(app: &App<ManualClock, RecordingCues>, area: Rect) -> String {
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_initial_screen() {
        let (app, _) = create_test_app(Locale::English);
        let text = rendered(&app, Rect::new(0, 0, 80, 24));
        assert!(text.contains("Ready to begin?"));
        assert!(text.contains("Press Start"));
        assert!(text.contains("00:00"));
        assert!(text.contains("0%"));
        assert!(text.contains("(enter) start"));
    }

    #[test]
    fn test_running_screen() {
        let (mut app, clock) = create_test_app(Locale::English);
        app.controller.start().unwrap();
        app.controller.advance();
        clock.advance(5_000);
        app.controller.on_tick();

        let text = rendered(&app, Rect::new(0, 0, 80, 24));
        assert!(text.contains("Exercise • Jumping Jacks"));
        assert!(text.contains("Jumping Jacks — set 1/4"));
        assert!(text.contains("After: short rest"));
        assert!(text.contains("00:15"));
        assert!(text.contains("Started"));
        assert!(text.contains("(r)estart"));
    }

    #[test]
    fn test_complete_screen_with_hearts() {
        let (mut app, _) = create_test_app(Locale::Russian);
        app.controller.start().unwrap();
        while app.controller.state() != SessionState::Complete {
            app.controller.advance();
        }
        app.celebration.start(80, 24);

        let text = rendered(&app, Rect::new(0, 0, 80, 24));
        assert!(text.contains("Завершение"));
        assert!(text.contains("100%"));
        assert!(text.contains("(enter) заново"));
    }

    #[test]
    fn test_renders_in_odd_sizes() {
        let (mut app, _) = create_test_app(Locale::Russian);
        app.controller.start().unwrap();
        for area in [
            Rect::new(0, 0, 10, 5),
            Rect::new(0, 0, 200, 5),
            Rect::new(0, 0, 20, 50),
        ] {
            let mut buffer = Buffer::empty(area);
            (&app).render(area, &mut buffer);
            assert!(*buffer.area() == area);
        }
    }

    #[test]
    fn test_wrapped_lines() {
        assert_eq!(wrapped_lines("", 10), 1);
        assert_eq!(wrapped_lines("abcdefghij", 10), 1);
        assert_eq!(wrapped_lines("abcdefghijk", 10), 2);
        assert_eq!(wrapped_lines("abc", 0), 1);
    }

    #[test]
    fn test_state_colors_distinct_for_phases() {
        assert_ne!(
            state_color(SessionState::Work),
            state_color(SessionState::Rest)
        );
        assert_ne!(
            state_color(SessionState::Prepare),
            state_color(SessionState::Work)
        );
    }
}
