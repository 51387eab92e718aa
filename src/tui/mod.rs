//! Ratatui-based terminal dashboard.
//!
//! A sidebar holds the two control panels (map date; trend location/range). The
//! main area shows the map and the trend chart for the last submitted values.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};
use tracing::info;

use crate::app::session::Session;
use crate::error::{AppError, EXIT_RUNTIME};

mod map_view;
mod plotters_chart;

use plotters_chart::{TrendPlottersChart, trend_series};

const TITLE: &str = "Forecasting Average Temperature By City in North America";

/// Large step for PageUp/PageDown on date and location controls.
const PAGE_STEP: isize = 10;

/// Sidebar rows, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    MapDate,
    MapSubmit,
    Location,
    Start,
    End,
    Order,
    TrendSubmit,
}

impl Field {
    const ALL: [Field; 7] = [
        Field::MapDate,
        Field::MapSubmit,
        Field::Location,
        Field::Start,
        Field::End,
        Field::Order,
        Field::TrendSubmit,
    ];

    fn is_map_panel(self) -> bool {
        matches!(self, Field::MapDate | Field::MapSubmit)
    }
}

/// Start the dashboard. Both panels are submitted once with their initial values.
pub fn run(session: Session, mapbox_token: Option<String>) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(session, mapbox_token);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(EXIT_RUNTIME, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    session: Session,
    selected: usize,
    status: String,
    mapbox_token: Option<String>,
}

impl App {
    fn new(session: Session, mapbox_token: Option<String>) -> Self {
        let mut app = Self {
            session,
            selected: 0,
            status: String::new(),
            mapbox_token,
        };
        app.submit_map();
        app.submit_trend();
        app.status = "Ready.".to_string();
        app
    }

    fn field(&self) -> Field {
        Field::ALL[self.selected]
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(EXIT_RUNTIME, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the dashboard should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => self.selected = (self.selected + 1).min(Field::ALL.len() - 1),
            KeyCode::Tab => {
                // Jump between the two panels.
                self.selected = if self.field().is_map_panel() { 2 } else { 0 };
            }
            KeyCode::Left => self.adjust(-1),
            KeyCode::Right => self.adjust(1),
            KeyCode::PageUp => self.adjust(-PAGE_STEP),
            KeyCode::PageDown => self.adjust(PAGE_STEP),
            KeyCode::Enter => {
                if self.field().is_map_panel() {
                    self.submit_map();
                } else {
                    self.submit_trend();
                }
            }
            KeyCode::Char('m') => self.submit_map(),
            KeyCode::Char('t') => self.submit_trend(),
            KeyCode::Char('e') => self.export(),
            _ => {}
        }
        false
    }

    fn adjust(&mut self, delta: isize) {
        match self.field() {
            Field::MapDate => self.session.cycle_map_date(delta),
            Field::Location => self.session.cycle_location(delta),
            Field::Start => self.session.cycle_start(delta),
            Field::End => self.session.cycle_end(delta),
            Field::Order => self.session.toggle_order(),
            Field::MapSubmit | Field::TrendSubmit => {}
        }
    }

    fn submit_map(&mut self) {
        self.status = match self.session.submit_map() {
            Some(spec) if spec.skipped > 0 => format!(
                "Map {}: {} points ({} rows with bad coordinates skipped).",
                spec.date,
                spec.points.len(),
                spec.skipped
            ),
            Some(spec) => format!("Map {}: {} points.", spec.date, spec.points.len()),
            None => "No dates available.".to_string(),
        };
    }

    fn submit_trend(&mut self) {
        self.status = match self.session.submit_trend() {
            Some(spec) if spec.start > spec.end => "Start date is after end date; nothing to plot.".to_string(),
            Some(spec) => format!("Trend {}: {} points.", spec.location, spec.points.len()),
            None => "No locations available.".to_string(),
        };
    }

    fn export(&mut self) {
        let mut written = Vec::new();
        if let Some(spec) = self.session.map() {
            let path = PathBuf::from(format!("fdash_map_{}.json", spec.date.format("%Y%m%d")));
            match crate::io::write_map_json(&path, spec, self.mapbox_token.as_deref()) {
                Ok(()) => written.push(path),
                Err(err) => {
                    self.status = format!("Export failed: {err}");
                    return;
                }
            }
        }
        if let Some(spec) = self.session.trend() {
            let path = PathBuf::from(format!("fdash_trend_{}.json", slug(&spec.location)));
            match crate::io::write_trend_json(&path, spec) {
                Ok(()) => written.push(path),
                Err(err) => {
                    self.status = format!("Export failed: {err}");
                    return;
                }
            }
        }

        info!(files = written.len(), "exported figures");
        self.status = if written.is_empty() {
            "Nothing to export yet.".to_string()
        } else {
            let names: Vec<String> = written.iter().map(|p| p.display().to_string()).collect();
            format!("Wrote {}", names.join(", "))
        };
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(frame.area());

        self.draw_header(frame, chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
            .split(chunks[1]);
        self.draw_sidebar(frame, body[0]);
        self.draw_content(frame, body[1]);

        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let ds = self.session.dataset();
        let line = Line::from(vec![
            Span::styled(TITLE, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::styled(
                format!(
                    "  | {} | {} rows, {} locations, {} dates",
                    ds.source(),
                    ds.len(),
                    ds.locations().len(),
                    ds.dates().len()
                ),
                Style::default().fg(Color::Gray),
            ),
        ]);
        frame.render_widget(Paragraph::new(line).block(Block::default().borders(Borders::ALL)), area);
    }

    fn draw_sidebar(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(7)])
            .split(area);

        let s = &self.session;
        let fmt_opt = |v: Option<String>| v.unwrap_or_else(|| "-".to_string());

        let map_items = vec![
            ListItem::new(format!("Date: {}", fmt_opt(s.map_date().map(|d| d.to_string())))),
            ListItem::new("[ Submit ]"),
        ];
        let trend_items = vec![
            ListItem::new(format!("Location: {}", s.location().unwrap_or("-"))),
            ListItem::new(format!("Start: {}", fmt_opt(s.start().map(|d| d.to_string())))),
            ListItem::new(format!("End: {}", fmt_opt(s.end().map(|d| d.to_string())))),
            ListItem::new(format!("Order: {}", s.order().display_name())),
            ListItem::new("[ Submit ]"),
        ];

        let highlight = Style::default().fg(Color::Black).bg(Color::White);

        let mut map_state = ListState::default();
        let mut trend_state = ListState::default();
        if self.selected < 2 {
            map_state.select(Some(self.selected));
        } else {
            trend_state.select(Some(self.selected - 2));
        }

        let map_list = List::new(map_items)
            .block(Block::default().title("Map Controls").borders(Borders::ALL))
            .highlight_style(highlight)
            .highlight_symbol("» ");
        let trend_list = List::new(trend_items)
            .block(Block::default().title("Forecast Controls").borders(Borders::ALL))
            .highlight_style(highlight)
            .highlight_symbol("» ");

        frame.render_stateful_widget(map_list, chunks[0], &mut map_state);
        frame.render_stateful_widget(trend_list, chunks[1], &mut trend_state);
    }

    fn draw_content(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        self.draw_map(frame, chunks[0]);
        self.draw_trend(frame, chunks[1]);
    }

    fn draw_map(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let Some(spec) = self.session.map() else {
            let block = Block::default().title("Forecasted Temperatures").borders(Borders::ALL);
            frame.render_widget(Paragraph::new("Select Date").block(block), area);
            return;
        };

        let legend = spec
            .temp_range
            .map(|(lo, hi)| format!(" | {lo:.0}° (dark) .. {hi:.0}° (bright)"))
            .unwrap_or_default();
        let block = Block::default()
            .title(format!("Forecasted Temperatures | Forecast Date: {}{legend}", spec.date))
            .borders(Borders::ALL);

        if spec.is_empty() {
            frame.render_widget(Paragraph::new("No forecast rows for this date.").block(block), area);
            return;
        }
        map_view::render(frame, area, block, spec);
    }

    fn draw_trend(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let title = match self.session.trend() {
            Some(spec) => format!(
                "Forecast for City: {} | Dates Selected: {} to {}",
                spec.location, spec.start, spec.end
            ),
            None => "Forecast for City".to_string(),
        };
        let block = Block::default().title(title).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some((spec, (series, x_bounds, y_bounds))) =
            self.session.trend().and_then(|t| trend_series(t).map(|s| (t, s)))
        else {
            let msg = Paragraph::new(Text::from("No forecast rows for this location and range."))
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        let chart = TrendPlottersChart::new(&series, x_bounds, y_bounds).with_label_hex(&spec.label_color);
        frame.render_widget(chart, inner);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ change  PgUp/PgDn ±10  Tab panel  Enter submit  m map  t trend  e export  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        frame.render_widget(Paragraph::new(line).block(Block::default().borders(Borders::ALL)), area);
    }
}

fn slug(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::config::DashConfig;
    use crate::domain::{Dataset, ForecastRecord};

    fn session() -> Session {
        let rec = |location: &str, coordinates: &str, d: u32, temp: f64| ForecastRecord {
            location: location.to_string(),
            coordinates: coordinates.to_string(),
            date: NaiveDate::from_ymd_opt(2022, 7, d).unwrap(),
            predicted_temp: temp,
        };
        let ds = Dataset::new(
            vec![
                rec("Denver", "(39.74, -104.99)", 1, 88.2),
                rec("Boston", "(42.36, -71.06)", 1, 79.6),
                rec("Denver", "(39.74, -104.99)", 2, 90.1),
                rec("Boston", "(42.36, -71.06)", 2, 81.0),
            ],
            "inline",
        );
        Session::new(Arc::new(ds), &DashConfig::default())
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn initial_state_is_submitted() {
        let app = App::new(session(), None);
        assert_eq!(app.session.map().map(|m| m.points.len()), Some(2));
        assert_eq!(app.session.trend().map(|t| t.points.len()), Some(2));
        assert_eq!(app.status, "Ready.");
    }

    #[test]
    fn keys_edit_controls_until_submit() {
        let mut app = App::new(session(), None);
        let first_map = app.session.map().cloned();

        app.handle_key(KeyCode::Right);
        assert_eq!(app.session.map_date(), NaiveDate::from_ymd_opt(2022, 7, 2));
        assert_eq!(app.session.map().cloned(), first_map);

        app.handle_key(KeyCode::Enter);
        assert_eq!(app.session.map().map(|m| m.date), NaiveDate::from_ymd_opt(2022, 7, 2));

        app.handle_key(KeyCode::Tab);
        assert_eq!(app.field(), Field::Location);
        app.handle_key(KeyCode::Right);
        app.handle_key(KeyCode::Char('t'));
        assert_eq!(app.session.trend().map(|t| t.location.as_str()), Some("Boston"));

        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn inverted_range_reports_status() {
        let mut app = App::new(session(), None);
        app.selected = 3;
        app.handle_key(KeyCode::Right);
        app.selected = 4;
        app.handle_key(KeyCode::Left);
        app.handle_key(KeyCode::Enter);
        assert!(app.session.trend().is_some_and(|t| t.is_empty()));
        assert!(app.status.contains("after end date"));
    }

    #[test]
    fn renders_both_panels() {
        let app = App::new(session(), None);
        let mut terminal = Terminal::new(TestBackend::new(160, 48)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Map Controls"));
        assert!(text.contains("Forecast Controls"));
        assert!(text.contains("Forecast Date: 2022-07-01"));
        assert!(text.contains("Forecast for City: Denver"));
    }

    #[test]
    fn map_labels_name_each_location() {
        let rec = |location: &str, coordinates: &str, temp: f64| ForecastRecord {
            location: location.to_string(),
            coordinates: coordinates.to_string(),
            date: NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
            predicted_temp: temp,
        };
        let ds = Dataset::new(
            vec![
                rec("Winnipeg", "(49.90, -97.14)", -0.4),
                rec("Houston", "(29.76, -95.37)", 90.0),
            ],
            "inline",
        );
        let app = App::new(Session::new(Arc::new(ds), &DashConfig::default()), None);
        let mut terminal = Terminal::new(TestBackend::new(200, 60)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Houston 90°"));
        assert!(text.contains("Winnipeg 0°"));
    }

    #[test]
    fn slug_is_filename_safe() {
        assert_eq!(slug("St. Louis, MO"), "st__louis__mo");
    }
}
