//! Pie chart of quarters that closed lower, drawn on a ratatui canvas.

use chrono::NaiveDateTime;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use quarters_core::types::PriceTable;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Painter, Shape},
        Block, Borders, Paragraph,
    },
    Frame, Terminal,
};
use std::io;
use std::time::Duration;
use tracing::debug;

/// First slice edge, degrees counter-clockwise from three o'clock.
const START_ANGLE: f64 = 140.0;
/// Grid resolution used to fill the disc.
const FILL_STEPS: usize = 240;
/// Canvas margin around the unit circle.
const PADDING: f64 = 1.1;

const PALETTE: [Color; 8] = [
    Color::Red,
    Color::Yellow,
    Color::Magenta,
    Color::Cyan,
    Color::LightRed,
    Color::LightYellow,
    Color::LightMagenta,
    Color::LightBlue,
];

/// One wedge of the pie.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    /// Absolute percentage change; the wedge size
    pub value: f64,
}

/// `"{start} - {end} ({change:.1}%)"`, or `"N/A"` when a field is missing.
pub fn slice_label(
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    percentage_change: Option<f64>,
) -> String {
    match (start, end, percentage_change) {
        (Some(start), Some(end), Some(change)) => format!(
            "{} - {} ({:.1}%)",
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d"),
            change
        ),
        _ => "N/A".to_string(),
    }
}

/// Run `body` between `enter` and `leave`.
///
/// `leave` runs whenever `enter` succeeded, even if `body` fails. The
/// error from `body` takes precedence.
fn with_restore<T>(
    enter: impl FnOnce() -> io::Result<()>,
    leave: impl FnOnce() -> io::Result<()>,
    body: impl FnOnce() -> io::Result<T>,
) -> io::Result<T> {
    enter()?;
    let res = body();
    let restored = leave();
    let value = res?;
    restored?;
    Ok(value)
}

/// Pie chart of negative quarterly changes.
#[derive(Debug, Clone)]
pub struct PieChart {
    title: String,
    slices: Vec<PieSlice>,
    shown: bool,
}

impl PieChart {
    /// One slice per row whose percentage change is below zero, in table order.
    pub fn negative_changes(ticker: &str, table: &PriceTable) -> Self {
        let slices = table
            .rows()
            .iter()
            .filter_map(|row| {
                let change = row.percentage_change.filter(|c| *c < 0.0)?;
                Some(PieSlice {
                    label: slice_label(row.start_date, row.end_date, Some(change)),
                    value: change.abs(),
                })
            })
            .collect();

        Self {
            title: format!(
                "Pie chart divided into 3-month periods showing negative percentage changes: {}",
                ticker
            ),
            slices,
            shown: false,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn slices(&self) -> &[PieSlice] {
        &self.slices
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Whether [`PieChart::show`] displayed the chart.
    pub fn was_shown(&self) -> bool {
        self.shown
    }

    /// `(start, sweep)` in degrees for each slice, counter-clockwise.
    pub fn wedges(&self) -> Vec<(f64, f64)> {
        let total: f64 = self.slices.iter().map(|s| s.value).sum();
        if total <= 0.0 {
            return Vec::new();
        }

        let mut start = START_ANGLE;
        self.slices
            .iter()
            .map(|slice| {
                let sweep = slice.value / total * 360.0;
                let wedge = (start.rem_euclid(360.0), sweep);
                start += sweep;
                wedge
            })
            .collect()
    }

    /// Display the chart until `q` or `Esc` is pressed.
    ///
    /// An empty chart is not displayed.
    pub fn show(&mut self) -> io::Result<()> {
        if self.is_empty() {
            debug!("No slices to display");
            return Ok(());
        }

        with_restore(enable_raw_mode, disable_raw_mode, || {
            with_restore(
                || {
                    let mut stdout = io::stdout();
                    execute!(stdout, EnterAlternateScreen)
                },
                || {
                    let mut stdout = io::stdout();
                    execute!(stdout, LeaveAlternateScreen)
                },
                || {
                    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
                    let res = self.run_loop(&mut terminal);
                    terminal.show_cursor()?;
                    res
                },
            )
        })?;

        self.shown = true;
        Ok(())
    }

    fn run_loop<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if event::poll(Duration::from_millis(250))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press
                        && (key.code == KeyCode::Char('q') || key.code == KeyCode::Esc)
                    {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Draw the title, pie and legend into the frame.
    pub fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(10),   // Pie + legend
            ])
            .split(frame.area());

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[1]);

        self.render_title(frame, chunks[0]);
        self.render_pie(frame, body[0]);
        self.render_legend(frame, body[1]);
    }

    fn render_title(&self, frame: &mut Frame, area: Rect) {
        let header = Paragraph::new(vec![Line::from(vec![
            Span::styled(
                self.title.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | Press 'q' to quit"),
        ])])
        .block(Block::default().borders(Borders::ALL).title("Quarters"));
        frame.render_widget(header, area);
    }

    fn render_pie(&self, frame: &mut Frame, area: Rect) {
        let wedges = self.wedges();

        // Terminal cells are roughly twice as tall as they are wide.
        let cell_ratio = area.width.max(1) as f64 / (area.height.max(1) as f64 * 2.0);
        let (x_extent, y_extent) = if cell_ratio >= 1.0 {
            (PADDING * cell_ratio, PADDING)
        } else {
            (PADDING, PADDING / cell_ratio)
        };

        let canvas = Canvas::default()
            .block(Block::default().borders(Borders::ALL).title("Negative quarters"))
            .marker(Marker::Braille)
            .x_bounds([-x_extent, x_extent])
            .y_bounds([-y_extent, y_extent])
            .paint(|ctx| {
                ctx.draw(&Pie { wedges: &wedges });
                ctx.layer();
                for (i, &(start, sweep)) in wedges.iter().enumerate() {
                    let mid = (start + sweep / 2.0).to_radians();
                    ctx.print(
                        mid.cos() * 0.6,
                        mid.sin() * 0.6,
                        Span::styled(
                            format!("{}", i + 1),
                            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                        ),
                    );
                }
            });
        frame.render_widget(canvas, area);
    }

    fn render_legend(&self, frame: &mut Frame, area: Rect) {
        let lines: Vec<Line> = self
            .slices
            .iter()
            .enumerate()
            .map(|(i, slice)| {
                Line::from(vec![
                    Span::styled("■ ", Style::default().fg(PALETTE[i % PALETTE.len()])),
                    Span::raw(format!("{:>2}. {}", i + 1, slice.label)),
                ])
            })
            .collect();

        let paragraph =
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Legend"));
        frame.render_widget(paragraph, area);
    }
}

/// Index of the wedge containing `angle` (degrees).
fn wedge_at(wedges: &[(f64, f64)], angle: f64) -> Option<usize> {
    wedges
        .iter()
        .position(|&(start, sweep)| (angle - start).rem_euclid(360.0) < sweep)
}

/// Filled unit disc split into colored wedges.
struct Pie<'a> {
    wedges: &'a [(f64, f64)],
}

impl Shape for Pie<'_> {
    fn draw(&self, painter: &mut Painter) {
        for i in 0..=FILL_STEPS {
            for j in 0..=FILL_STEPS {
                let x = -1.0 + 2.0 * i as f64 / FILL_STEPS as f64;
                let y = -1.0 + 2.0 * j as f64 / FILL_STEPS as f64;
                if x * x + y * y > 1.0 {
                    continue;
                }
                let Some(index) = wedge_at(self.wedges, y.atan2(x).to_degrees()) else {
                    continue;
                };
                if let Some((px, py)) = painter.get_point(x, y) {
                    painter.paint(px, py, PALETTE[index % PALETTE.len()]);
                }
            }
        }
    }
}
