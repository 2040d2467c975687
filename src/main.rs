use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use rand::rngs::ThreadRng;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

mod catalog;
mod selection;
mod state;

use crate::catalog::{format_updated, scale_to_100, Team};
use crate::selection::power_label;
use crate::state::{AppState, Screen};

struct App {
    state: AppState,
    should_quit: bool,
    rng: ThreadRng,
}

impl App {
    fn new(teams: Vec<Team>) -> Self {
        Self {
            state: AppState::new(teams),
            should_quit: false,
            rng: rand::thread_rng(),
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') => self.state.screen = Screen::Picker,
            KeyCode::Char('2') => self.state.screen = Screen::Browse,
            KeyCode::Char('b') | KeyCode::Esc => self.state.screen = Screen::Picker,
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char(' ') | KeyCode::Enter => {
                if self.state.screen == Screen::Picker {
                    self.state.toggle_league_under_cursor();
                }
            }
            KeyCode::Char('c') => self.state.clear_leagues(),
            KeyCode::Char('p') | KeyCode::Char('P') => self.state.cycle_power(),
            KeyCode::Char('r') | KeyCode::Char('R') => {
                if self.state.screen == Screen::Picker {
                    self.state.begin_draw(&mut self.rng, Instant::now());
                }
            }
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => {}
        }
    }
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let data_path = catalog::data_path();
    let teams = catalog::load_teams(&data_path)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(teams);
    let loaded = app.state.teams.len();
    app.state.push_log(format!(
        "[INFO] Loaded {loaded} teams from {}",
        data_path.display()
    ));
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
    let mut last_tick = Instant::now();

    loop {
        app.state.tick(Instant::now());

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
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
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header =
        Paragraph::new(header_text(&app.state)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.screen {
        Screen::Picker => render_picker(frame, chunks[1], &app.state),
        Screen::Browse => render_browse(frame, chunks[1], &app.state),
    }

    let footer =
        Paragraph::new(footer_text(&app.state)).block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[2]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let leagues = if state.selected_leagues.is_empty() {
        "ALL".to_string()
    } else {
        format!("{}/{}", state.selected_leagues.len(), state.leagues.len())
    };
    let title = match state.screen {
        Screen::Picker => format!(
            "FC25 PICKER | Leagues: {} | Power: {}",
            leagues,
            power_label(state.power_level)
        ),
        Screen::Browse => format!(
            "FC25 BROWSE | Leagues: {} | Power: {} | {} teams",
            leagues,
            power_label(state.power_level),
            state.eligible_teams().len()
        ),
    };
    let line1 = format!("   o  {}", title);
    let line2 = "  /|\\".to_string();
    let line3 = "  / \\".to_string();
    format!("{line1}\n{line2}\n{line3}")
}

fn footer_text(state: &AppState) -> String {
    match state.screen {
        Screen::Picker => {
            "r Draw | j/k/↑/↓ Move | Space/Enter Toggle league | c All leagues | p Power | 2 Browse | ? Help | q Quit"
                .to_string()
        }
        Screen::Browse => {
            "1/b/Esc Picker | j/k/↑/↓ Scroll | p Power | c All leagues | ? Help | q Quit".to_string()
        }
    }
}

fn render_picker(frame: &mut Frame, area: Rect, state: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(40)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(5)])
        .split(columns[0]);

    render_leagues(frame, left[0], state);
    render_power(frame, left[1], state);

    let center = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(12),
            Constraint::Min(4),
            Constraint::Length(4),
        ])
        .split(columns[1]);

    render_matchup(frame, center[0], state);
    render_history(frame, center[1], state);
    render_console(frame, center[2], state);
}

fn render_leagues(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title("Leagues (none = all)")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.leagues.is_empty() {
        let empty =
            Paragraph::new("No leagues in catalog").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }

    let mut lines = Vec::new();
    for (idx, league) in state.leagues.iter().enumerate() {
        let cursor = if idx == state.league_cursor { ">" } else { " " };
        let mark = if state.league_selected(league) {
            "[x]"
        } else {
            "[ ]"
        };
        let style = if idx == state.league_cursor {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else if state.league_selected(league) {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        };
        lines.push(Line::styled(format!("{cursor} {mark} {league}"), style));
    }
    let list = Paragraph::new(lines);
    frame.render_widget(list, inner);
}

fn render_power(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().title("Power Level").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::new();
    for level in [
        selection::PowerLevel::Weak,
        selection::PowerLevel::Balanced,
        selection::PowerLevel::Strong,
    ] {
        let active = level == state.power_level;
        let cursor = if active { ">" } else { " " };
        let style = if active {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::styled(format!("{cursor} {}", power_label(level)), style));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_matchup(frame: &mut Frame, area: Rect, state: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(20),
            Constraint::Length(6),
            Constraint::Min(20),
        ])
        .split(area);

    render_team_card(frame, columns[0], "Home", state.home_card.as_ref(), state);
    render_vs_badge(frame, columns[1], state);
    render_team_card(frame, columns[2], "Away", state.away_card.as_ref(), state);
}

fn render_team_card(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    team: Option<&Team>,
    state: &AppState,
) {
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(team) = team else {
        let placeholder = if state.is_drawing() {
            "Drawing..."
        } else {
            "Press r to draw"
        };
        let empty = Paragraph::new(placeholder)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    };

    let league = Line::styled(
        team.league.to_uppercase(),
        Style::default().fg(Color::DarkGray),
    );
    let name = Line::styled(
        team.name.clone(),
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    );
    let ovr = Line::styled(
        format!("OVR {}", team.ovr()),
        Style::default().add_modifier(Modifier::BOLD),
    );
    let stats = Line::raw(format!(
        "ATK {}  MID {}  DEF {}  GK {}",
        scale_to_100(team.stats.attack),
        scale_to_100(team.stats.midfield),
        scale_to_100(team.stats.defense),
        scale_to_100(team.stats.goalkeeper)
    ));

    let lines = vec![
        league,
        name,
        Line::raw(""),
        ovr,
        stats,
    ];
    let card = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(card, inner);
}

fn render_vs_badge(frame: &mut Frame, area: Rect, state: &AppState) {
    if state.home_card.is_none() || state.away_card.is_none() {
        return;
    }
    let badge_area = Rect {
        x: area.x,
        y: area.y + area.height / 2,
        width: area.width,
        height: 1,
    };
    let badge = Paragraph::new("VS")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    frame.render_widget(badge, badge_area);
}

fn render_history(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().title("Last Draws").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.history.is_empty() {
        let empty = Paragraph::new("No draws yet").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }

    let visible = inner.height as usize;
    let lines: Vec<Line> = state
        .history
        .iter()
        .take(visible)
        .map(|m| {
            Line::raw(format!(
                "{} ({})  vs  {} ({})",
                m.home.name,
                m.home.ovr(),
                m.away.name,
                m.away.ovr()
            ))
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_console(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().title("Console").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text = if state.logs.is_empty() {
        "No alerts yet".to_string()
    } else {
        let keep = inner.height.max(1) as usize;
        state
            .logs
            .iter()
            .rev()
            .take(keep)
            .cloned()
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect::<Vec<_>>()
            .join("\n")
    };
    frame.render_widget(Paragraph::new(text), inner);
}

fn render_browse(frame: &mut Frame, area: Rect, state: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(36)])
        .split(area);

    render_browse_list(frame, columns[0], state);
    render_browse_card(frame, columns[1], state);
}

fn render_browse_list(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().title("Pool").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let pool = state.eligible_teams();
    if pool.is_empty() {
        let empty = Paragraph::new("No team matches the current filters")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }

    if inner.height == 0 {
        return;
    }
    let visible = inner.height as usize;
    let (start, end) = visible_range(state.browse_selected, pool.len(), visible);

    let mut lines = Vec::new();
    for idx in start..end {
        let team = pool[idx];
        let style = if idx == state.browse_selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        lines.push(Line::styled(
            format!("{:>3}  {:<24} {}", team.ovr(), team.name, team.league),
            style,
        ));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_browse_card(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().title("Team").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let pool = state.eligible_teams();
    let Some(team) = pool.get(state.browse_selected) else {
        let empty = Paragraph::new("No team selected").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    };

    let lines = vec![
        Line::styled(
            team.league.to_uppercase(),
            Style::default().fg(Color::DarkGray),
        ),
        Line::styled(
            team.name.clone(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::raw(format!("OVR  {}", team.ovr())),
        Line::raw(format!("ATK  {}", scale_to_100(team.stats.attack))),
        Line::raw(format!("MID  {}", scale_to_100(team.stats.midfield))),
        Line::raw(format!("DEF  {}", scale_to_100(team.stats.defense))),
        Line::raw(format!("GK   {}", scale_to_100(team.stats.goalkeeper))),
        Line::raw(""),
        Line::styled(
            format!("Logo {}", team.logo),
            Style::default().fg(Color::DarkGray),
        ),
        Line::styled(
            format!("Updated {}", format_updated(&team.last_updated)),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
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

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "FC25 Picker - Help",
        "",
        "Global:",
        "  1            Picker",
        "  2            Browse pool",
        "  b / Esc      Back to picker",
        "  p            Cycle power level",
        "  c            Clear league filter",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Picker:",
        "  j/k or ↑/↓   Move league cursor",
        "  Space/Enter  Toggle league",
        "  r            Draw a matchup",
        "",
        "Browse:",
        "  j/k or ↑/↓   Scroll the pool",
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
