use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Row, Table};

use h2h_terminal::comparison::Comparison;
use h2h_terminal::config::{self, DataPaths};
use h2h_terminal::dataset::Dataset;
use h2h_terminal::persist;
use h2h_terminal::report_export;
use h2h_terminal::state::{AppState, Focus, focus_label};
use h2h_terminal::tables::{TextTable, history_table, matchup_table, player_table};

const TEAM1_COLOR: Color = Color::Blue;
const TEAM2_COLOR: Color = Color::Green;

struct App {
    dataset: Dataset,
    state: AppState,
    should_quit: bool,
    export_dir: PathBuf,
}

impl App {
    fn new(dataset: Dataset, export_dir: PathBuf) -> Self {
        let teams = dataset.teams();
        Self {
            dataset,
            state: AppState::new(teams),
            should_quit: false,
            export_dir,
        }
    }

    fn restore_selection(&mut self) {
        let Some((team1, team2)) = persist::load_selection() else {
            return;
        };
        if self.state.select_teams(&team1, &team2) {
            self.state
                .push_log(format!("[INFO] Restored selection {team1} vs {team2}"));
        } else {
            self.state
                .push_log("[INFO] Saved selection no longer matches the squad list");
        }
    }

    fn recompute(&mut self) {
        let Some(pair) = self.state.selected_pair() else {
            self.state.comparison = None;
            self.state.push_log("[WARN] Need two teams to compare");
            return;
        };

        let started = Instant::now();
        let comparison = Comparison::compute(&self.dataset, pair.clone());
        let elapsed = started.elapsed().as_millis();
        self.state.push_log(format!(
            "[INFO] {} vs {}: {} matches, {} matchups ({elapsed} ms)",
            pair.team1(),
            pair.team2(),
            comparison.head_to_head.matches.len(),
            comparison.matchups.len()
        ));
        self.state.set_comparison(comparison, elapsed);

        if let Err(err) = persist::save_selection(pair.team1(), pair.team2()) {
            self.state
                .push_log(format!("[WARN] Selection not saved: {err}"));
        }
    }

    fn export(&mut self) {
        let Some(comparison) = &self.state.comparison else {
            self.state.push_log("[INFO] Nothing to export yet");
            return;
        };
        let path = report_export::default_export_path(&self.export_dir, &comparison.pair);
        let msg = match report_export::export_comparison(&path, comparison) {
            Ok(report) => format!(
                "[INFO] Exported {} sheets / {} rows to {}",
                report.sheets,
                report.rows,
                report.path.display()
            ),
            Err(err) => format!("[WARN] Export failed: {err:#}"),
        };
        self.state.push_log(msg);
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.help_overlay {
            match key.code {
                KeyCode::Char('?') | KeyCode::Esc => self.state.help_overlay = false,
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => self.state.cycle_focus(),
            KeyCode::BackTab => self.state.cycle_focus_back(),
            KeyCode::Char('j') | KeyCode::Down => {
                if self.state.select_next() {
                    self.recompute();
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if self.state.select_prev() {
                    self.recompute();
                }
            }
            KeyCode::PageDown => self.state.scroll_by(10),
            KeyCode::PageUp => self.state.scroll_by(-10),
            KeyCode::Char('e') | KeyCode::Char('E') => self.export(),
            KeyCode::Char('?') => self.state.help_overlay = true,
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let paths = DataPaths::resolve(&args);

    // Base tables are required; fail before touching the terminal.
    let started = Instant::now();
    let dataset = Dataset::load(&paths)?;
    let load_ms = started.elapsed().as_millis();

    let mut app = App::new(dataset, config::export_dir());
    app.state.push_log(format!(
        "[INFO] Loaded {} from {} ({load_ms} ms)",
        app.dataset.summary_line(),
        paths.dir.display()
    ));
    if app.state.teams.len() < 2 {
        app.state
            .push_log("[WARN] Squad table lists fewer than two teams");
    }
    app.restore_selection();
    app.recompute();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);

    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(9),
            Constraint::Percentage(40),
            Constraint::Min(6),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    render_selection(frame, chunks[1], &app.state);
    render_player_tables(frame, chunks[2], &app.state);
    render_history_and_matchups(frame, chunks[3], &app.state);

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[4]);

    let footer = Paragraph::new(
        "Tab/Shift-Tab Focus | j/k/↑/↓ Select or scroll | PgUp/PgDn Page | e Export | ? Help | q Quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[5]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let pair = match (state.team1(), state.team2()) {
        (Some(t1), Some(t2)) => format!("{t1} vs {t2}"),
        _ => "no teams".to_string(),
    };
    let timing = state
        .last_compute_ms
        .map(|ms| format!(" | {ms} ms"))
        .unwrap_or_default();
    format!(
        " HEAD-TO-HEAD | {pair} | Focus: {}{timing}",
        focus_label(state.focus)
    )
}

fn render_selection(frame: &mut Frame, area: Rect, state: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(20),
            Constraint::Length(18),
            Constraint::Length(18),
            Constraint::Min(20),
        ])
        .split(area);

    let team1_items: Vec<&str> = state.teams.iter().map(String::as_str).collect();
    render_team_list(
        frame,
        cols[0],
        "Select Team 1",
        &team1_items,
        state.team1_selected,
        state.focus == Focus::Team1,
        TEAM1_COLOR,
    );
    render_team_list(
        frame,
        cols[3],
        "Select Team 2",
        &state.team2_candidates(),
        state.team2_selected,
        state.focus == Focus::Team2,
        TEAM2_COLOR,
    );

    let (wins1, wins2, played) = match &state.comparison {
        Some(c) => (
            c.head_to_head.wins_a,
            c.head_to_head.wins_b,
            c.head_to_head.matches.len(),
        ),
        None => (0, 0, 0),
    };
    render_wins_callout(frame, cols[1], state.team1().unwrap_or("-"), wins1, played, TEAM1_COLOR);
    render_wins_callout(frame, cols[2], state.team2().unwrap_or("-"), wins2, played, TEAM2_COLOR);
}

fn render_team_list(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    teams: &[&str],
    selected: usize,
    focused: bool,
    color: Color,
) {
    let block = panel_block(title, focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let (start, end) = visible_range(selected, teams.len(), inner.height as usize);
    let lines: Vec<Line> = (start..end)
        .map(|idx| {
            if idx == selected {
                Line::styled(
                    format!("(•) {}", teams[idx]),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )
            } else {
                Line::raw(format!("( ) {}", teams[idx]))
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_wins_callout(
    frame: &mut Frame,
    area: Rect,
    team: &str,
    wins: usize,
    played: usize,
    color: Color,
) {
    let text = vec![
        Line::raw("Wins"),
        Line::raw(""),
        Line::styled(
            wins.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::styled(
            format!("of {played}"),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    let callout = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().title(team.to_string()).borders(Borders::ALL));
    frame.render_widget(callout, area);
}

fn render_player_tables(frame: &mut Frame, area: Rect, state: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let Some(c) = &state.comparison else {
        render_empty(frame, cols[0], "Current Players Stats", "No team selected");
        render_empty(frame, cols[1], "Current Players Stats", "No team selected");
        return;
    };

    render_table(
        frame,
        cols[0],
        &format!("{} - Current Players Stats", c.pair.team1()),
        &player_table(&c.team1_stats),
        state.team1_stats_scroll,
        state.focus == Focus::Team1Stats,
        "No players listed for this team",
    );
    render_table(
        frame,
        cols[1],
        &format!("{} - Current Players Stats", c.pair.team2()),
        &player_table(&c.team2_stats),
        state.team2_stats_scroll,
        state.focus == Focus::Team2Stats,
        "No players listed for this team",
    );
}

fn render_history_and_matchups(frame: &mut Frame, area: Rect, state: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let Some(c) = &state.comparison else {
        render_empty(frame, cols[0], "Match History Between Teams", "No team selected");
        render_empty(frame, cols[1], "Key Player Matchups", "No team selected");
        return;
    };

    render_table(
        frame,
        cols[0],
        "Match History Between Teams",
        &history_table(&c.head_to_head),
        state.history_scroll,
        state.focus == Focus::History,
        "These teams have not played each other",
    );
    render_table(
        frame,
        cols[1],
        "Key Player Matchups",
        &matchup_table(&c.matchups),
        state.matchups_scroll,
        state.focus == Focus::Matchups,
        "No recorded matchups between these squads",
    );
}

fn render_table(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    table: &TextTable,
    scroll: usize,
    focused: bool,
    empty_text: &str,
) {
    if table.is_empty() {
        let empty = Paragraph::new(empty_text)
            .style(Style::default().fg(Color::DarkGray))
            .block(panel_block(title, focused));
        frame.render_widget(empty, area);
        return;
    }

    let widths: Vec<Constraint> = table
        .column_widths()
        .into_iter()
        .map(|w| Constraint::Length(w.min(28) as u16))
        .collect();
    let header = Row::new(table.header.iter().copied())
        .style(Style::default().add_modifier(Modifier::BOLD));
    let rows = table
        .rows
        .iter()
        .skip(scroll)
        .map(|row| Row::new(row.iter().cloned()));
    let title = format!("{title} [{}/{}]", scroll + 1, table.rows.len());
    let widget = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(panel_block(&title, focused));
    frame.render_widget(widget, area);
}

fn render_empty(frame: &mut Frame, area: Rect, title: &str, text: &str) {
    let empty = Paragraph::new(text.to_string())
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().title(title.to_string()).borders(Borders::ALL));
    frame.render_widget(empty, area);
}

fn panel_block(title: &str, focused: bool) -> Block<'static> {
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(border)
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Head-to-Head Terminal - Help",
        "",
        "Focus:",
        "  Tab / Shift-Tab   Next / previous panel",
        "",
        "Team lists:",
        "  j/k or ↑/↓        Change team (recomputes)",
        "",
        "Tables:",
        "  j/k or ↑/↓        Scroll one row",
        "  PgUp / PgDn       Scroll ten rows",
        "",
        "Global:",
        "  e                 Export to .xlsx",
        "  ?                 Toggle help",
        "  q                 Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
