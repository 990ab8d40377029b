use crate::WeatherError;
use chrono::{NaiveDate, NaiveDateTime};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, BorderType, Borders, Chart, Dataset, GraphType, Paragraph},
};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Date/value pairs for one analysis column, ready to plot.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ChartSeries {
    column: String,
    points: Vec<(String, f64)>,
}

impl ChartSeries {
    /// Pairs `dates[i]` with `values[i]`.
    ///
    /// Cells dropped during coercion are not re-aligned, so once a value is
    /// missing every later value sits against an earlier date.
    pub fn new(column: &str, dates: &[String], values: &[f64]) -> Self {
        if dates.len() != values.len() {
            warn!(
                column,
                dates = dates.len(),
                values = values.len(),
                "dates and values differ in length, chart pairs them positionally"
            );
        }
        let points = dates
            .iter()
            .zip(values)
            .map(|(date, &value)| (date.clone(), value))
            .collect();
        ChartSeries {
            column: column.to_string(),
            points,
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn points(&self) -> &[(String, f64)] {
        &self.points
    }

    /// Points with the row position on the x axis.
    pub fn plot_data(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, &(_, v))| (i as f64, v))
            .collect()
    }

    pub fn x_bounds(&self) -> [f64; 2] {
        [0.0, (self.points.len().saturating_sub(1)).max(1) as f64]
    }

    pub fn y_bounds(&self) -> [f64; 2] {
        let finite = self.points.iter().map(|&(_, v)| v).filter(|v| v.is_finite());
        let (lo, hi) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        if lo > hi {
            [0.0, 1.0]
        } else if lo == hi {
            [lo - 1.0, hi + 1.0]
        } else {
            [lo, hi]
        }
    }

    /// First, middle and last date.
    pub fn x_labels(&self) -> Vec<String> {
        let n = self.points.len();
        let picks = match n {
            0 => vec![],
            1 => vec![0],
            2 => vec![0, 1],
            _ => vec![0, n / 2, n - 1],
        };
        let mut labels: Vec<String> = picks
            .into_iter()
            .map(|i| short_date(&self.points[i].0))
            .collect();
        if n == 2 {
            labels.insert(1, String::new());
        }
        labels
    }

    pub fn y_labels(&self) -> Vec<String> {
        let [lo, hi] = self.y_bounds();
        vec![
            format!("{:.1}", lo),
            format!("{:.1}", (lo + hi) / 2.0),
            format!("{:.1}", hi),
        ]
    }
}

/// Trims NOAA timestamps like `2020-05-10T23:59:00` down to the day.
pub fn short_date(raw: &str) -> String {
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return dt.format("%Y-%m-%d").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return dt.format("%Y-%m-%d").to_string();
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return d.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

pub fn draw_chart(f: &mut Frame, series: &ChartSeries) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new(format!("Weather: {}", series.column()))
        .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(title, chunks[0]);

    let data = series.plot_data();
    let datasets = vec![
        Dataset::default()
            .name(series.column().to_string())
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Yellow))
            .data(&data),
    ];
    let x_axis = Axis::default()
        .title("Date")
        .style(Style::default().fg(Color::Gray))
        .bounds(series.x_bounds())
        .labels(series.x_labels().into_iter().map(Span::raw).collect::<Vec<_>>());
    let y_axis = Axis::default()
        .title(series.column().to_string())
        .style(Style::default().fg(Color::Gray))
        .bounds(series.y_bounds())
        .labels(series.y_labels().into_iter().map(Span::raw).collect::<Vec<_>>());
    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title("Chart")
                .borders(Borders::ALL)
                .border_type(BorderType::Thick)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .x_axis(x_axis)
        .y_axis(y_axis);
    f.render_widget(chart, chunks[1]);

    let footer = Paragraph::new("'q' to exit | 'e' to export")
        .style(Style::default().fg(Color::Gray))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(footer, chunks[2]);
}

pub fn export_path(series: &ChartSeries) -> PathBuf {
    PathBuf::from(format!("{}_chart.json", series.column()))
}

pub fn export_json(series: &ChartSeries, path: &Path) -> Result<(), WeatherError> {
    let json = serde_json::to_string_pretty(series)?;
    std::fs::write(path, json)?;
    info!(path = %path.display(), points = series.points().len(), "exported chart series");
    Ok(())
}

fn terminal_err(e: io::Error) -> WeatherError {
    WeatherError::Terminal(e.to_string())
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    series: &ChartSeries,
) -> Result<(), WeatherError> {
    loop {
        terminal.draw(|f| draw_chart(f, series)).map_err(terminal_err)?;

        if let Event::Key(key) = event::read().map_err(terminal_err)? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Char('e') => export_json(series, &export_path(series))?,
                _ => {}
            }
        }
    }
    Ok(())
}

/// Best-effort teardown for when the terminal never came up.
fn leave_terminal() {
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

/// Runs `setup`, calling `restore` before handing back its error.
fn restore_on_err<T>(
    setup: impl FnOnce() -> io::Result<T>,
    restore: impl FnOnce(),
) -> Result<T, WeatherError> {
    setup().map_err(|e| {
        restore();
        terminal_err(e)
    })
}

/// Shows the series as a line chart on the terminal until `q` is pressed.
pub fn render_chart(series: &ChartSeries) -> Result<(), WeatherError> {
    enable_raw_mode().map_err(terminal_err)?;
    let mut terminal = restore_on_err(
        || {
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen)?;
            Terminal::new(CrosstermBackend::new(stdout))
        },
        leave_terminal,
    )?;

    let result = event_loop(&mut terminal, series);

    disable_raw_mode().map_err(terminal_err)?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).map_err(terminal_err)?;
    terminal.show_cursor().map_err(terminal_err)?;

    result
}
