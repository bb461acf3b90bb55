use crate::app::App;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

const STATS_WIDTH: u16 = 24;
const STATS_HEIGHT: u16 = 6;

// Overlay color scheme
const BORDER_COLOR: Color = Color::Cyan;
const TEXT_COLOR: Color = Color::White;
const DIM_TEXT_COLOR: Color = Color::Gray;

/// Creates a standard styled block with rounded borders
fn styled_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_COLOR))
        .title(title)
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    render_canvas(frame.buffer_mut(), area, app);

    if app.show_stats {
        render_stats_overlay(frame, area, app);
    }
}

/// Copy the braille canvas into the frame buffer over the background color
fn render_canvas(buf: &mut Buffer, area: Rect, app: &App) {
    let background = app.settings.background;
    buf.set_style(area, Style::default().bg(background.to_color()));

    for cell in app.animation.surface().target().cells(background) {
        let x = area.x + cell.x;
        let y = area.y + cell.y;

        if x < area.x + area.width && y < area.y + area.height {
            if let Some(target) = buf.cell_mut((x, y)) {
                target.set_char(cell.char).set_fg(cell.color);
            }
        }
    }
}

fn render_stats_overlay(frame: &mut Frame, area: Rect, app: &App) {
    let stats_area = Rect {
        x: area.x,
        y: area.y,
        width: STATS_WIDTH.min(area.width),
        height: STATS_HEIGHT.min(area.height),
    };

    let stats = &app.last_stats;
    let make_line = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{:<10}", label), Style::default().fg(DIM_TEXT_COLOR)),
            Span::styled(value, Style::default().fg(TEXT_COLOR)),
        ])
    };

    let content = vec![
        make_line("Particles", stats.particles.to_string()),
        make_line("Lines", stats.lines_drawn.to_string()),
        make_line("Pairs", stats.pairs_evaluated.to_string()),
        make_line("FPS", format!("{:.1}", app.fps())),
    ];

    frame.render_widget(Clear, stats_area);
    let paragraph = Paragraph::new(content).block(styled_block(" Network "));
    frame.render_widget(paragraph, stats_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::NetworkSettings;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &App, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    #[test]
    fn test_canvas_cells_reach_buffer() {
        let mut app = App::new(NetworkSettings::default(), Some(11), false);
        app.start(60, 20);
        app.tick();

        let buffer = draw(&app, 60, 20);
        let drawn = app.animation.surface().target().cells(app.settings.background).count();
        assert!(drawn > 0);
        for cell in app.animation.surface().target().cells(app.settings.background) {
            let target = &buffer[(cell.x, cell.y)];
            assert_eq!(target.symbol(), cell.char.to_string());
            assert_eq!(target.fg, cell.color);
        }
    }

    #[test]
    fn test_stats_overlay_shows_counts() {
        let mut app = App::new(NetworkSettings::default(), Some(12), true);
        app.start(60, 20);
        app.tick();

        let buffer = draw(&app, 60, 20);
        let text: String = (0..STATS_HEIGHT)
            .flat_map(|y| (0..STATS_WIDTH).map(move |x| (x, y)))
            .map(|(x, y)| buffer[(x, y)].symbol().to_string())
            .collect();
        assert!(text.contains("Network"));
        assert!(text.contains(&format!("Particles {}", app.last_stats.particles)));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let mut app = App::new(NetworkSettings::default(), Some(13), true);
        app.start(1, 1);
        app.tick();
        draw(&app, 1, 1);
    }
}
