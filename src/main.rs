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
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::canvas::{Canvas, Points};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use passnet_terminal::dataset::Dataset;
use passnet_terminal::encode::{COMPLETED_ARROW, FAILED_ARROW, alpha_gray};
use passnet_terminal::pass_network::Node;
use passnet_terminal::pitch;
use passnet_terminal::state::{AppState, Focus, Mode, View};

struct App {
    state: AppState,
    should_quit: bool,
}

impl App {
    fn new(state: AppState) -> Self {
        Self {
            state,
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Char('h') | KeyCode::Char('l') => {
                self.state.toggle_focus()
            }
            KeyCode::Esc => self.state.focus = Focus::Teams,
            KeyCode::Enter => self.state.apply_selection(),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => {}
        }
    }
}

fn resolve_paths() -> (PathBuf, PathBuf) {
    let mut args = std::env::args().skip(1);
    let events = args
        .next()
        .or_else(|| std::env::var("EVENTS_FILE").ok())
        .unwrap_or_else(|| "EventData.csv".to_string());
    let players = args
        .next()
        .or_else(|| std::env::var("PLAYERS_FILE").ok())
        .unwrap_or_else(|| "PlayerData.csv".to_string());
    (PathBuf::from(events), PathBuf::from(players))
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    // Load before touching the terminal so a missing file reports its
    // path(s) on plain stderr and nothing else runs.
    let (events_path, players_path) = resolve_paths();
    let dataset = Dataset::load(&events_path, &players_path)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(AppState::new(dataset));
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
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header =
        Paragraph::new(header_text(&app.state)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(26),
            Constraint::Min(40),
            Constraint::Length(30),
        ])
        .split(chunks[1]);

    render_selectors(frame, columns[0], &app.state);
    render_pitch_panel(frame, columns[1], &app.state);
    render_summary(frame, columns[2], &app.state);

    let console =
        Paragraph::new(console_text(&app.state)).block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer =
        Paragraph::new(footer_text(&app.state)).block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let team = state.selected_team.as_deref().unwrap_or("no team");
    let mode = state
        .selected_mode
        .as_ref()
        .map(Mode::label)
        .unwrap_or("-");
    // Two lines: the header chunk keeps one row for its bottom border.
    format!("  __  PASSNET TERMINAL | {team} | {mode}\n (__)")
}

fn footer_text(state: &AppState) -> String {
    let focus = match state.focus {
        Focus::Teams => "Teams",
        Focus::Modes => "Mode",
    };
    format!("Focus: {focus} | Tab/h/l Switch | j/k/↑/↓ Move | Enter Apply | Esc Teams | ? Help | q Quit")
}

fn render_selectors(frame: &mut Frame, area: Rect, state: &AppState) {
    let halves = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let team_items: Vec<(String, bool)> = state
        .dataset
        .teams
        .iter()
        .map(|t| (t.clone(), state.selected_team.as_deref() == Some(t.as_str())))
        .collect();
    render_list(
        frame,
        halves[0],
        "Teams",
        &team_items,
        state.team_cursor,
        state.focus == Focus::Teams,
    );

    let mode_items: Vec<(String, bool)> = state
        .modes
        .iter()
        .map(|m| {
            (
                m.label().to_string(),
                state.selected_mode.as_ref() == Some(m),
            )
        })
        .collect();
    render_list(
        frame,
        halves[1],
        "Mode",
        &mode_items,
        state.mode_cursor,
        state.focus == Focus::Modes,
    );
}

fn render_list(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    items: &[(String, bool)],
    cursor: usize,
    focused: bool,
) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if items.is_empty() {
        let hint = if title == "Mode" {
            "Choose a team first"
        } else {
            "No entries"
        };
        let empty = Paragraph::new(hint).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }

    // Keep the cursor in view on long lists.
    let visible = inner.height as usize;
    let start = cursor.saturating_sub(visible.saturating_sub(1));
    let lines: Vec<Line> = items
        .iter()
        .enumerate()
        .skip(start)
        .take(visible.max(1))
        .map(|(idx, (label, applied))| {
            let prefix = if idx == cursor { "> " } else { "  " };
            let mut style = Style::default();
            if *applied {
                style = style.add_modifier(Modifier::BOLD);
            }
            if idx == cursor && focused {
                style = style.fg(Color::White).bg(Color::DarkGray);
            }
            Line::styled(format!("{prefix}{label}"), style)
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_pitch_panel(frame: &mut Frame, area: Rect, state: &AppState) {
    let title = match &state.view {
        View::Prompt => "Pitch".to_string(),
        View::Network { .. } => format!(
            "Pass Network — {}",
            state.selected_team.as_deref().unwrap_or("?")
        ),
        View::PassMap(map) => format!("Pass Map — {}", map.player),
    };

    let canvas = Canvas::default()
        .block(Block::default().title(title).borders(Borders::ALL))
        .x_bounds([pitch::PITCH_MIN - 3.0, pitch::PITCH_MAX + 3.0])
        .y_bounds([pitch::PITCH_MIN - 3.0, pitch::PITCH_MAX + 3.0])
        .paint(|ctx| {
            pitch::draw_pitch(ctx);
            match &state.view {
                View::Prompt => {
                    ctx.print(
                        32.0,
                        50.0,
                        Span::styled(
                            "Choose a team to begin",
                            Style::default().fg(Color::DarkGray),
                        ),
                    );
                }
                View::Network { network, styles } => {
                    for (edge, style) in network.edges.iter().zip(styles.iter()) {
                        pitch::draw_weighted_segment(
                            ctx,
                            edge.x_start,
                            edge.y_start,
                            edge.x_end,
                            edge.y_end,
                            style.width,
                            alpha_gray(style.alpha),
                        );
                    }
                    ctx.layer();
                    let coords: Vec<(f64, f64)> = network
                        .nodes
                        .iter()
                        .filter_map(|n| Some((n.x?, n.y?)))
                        .collect();
                    ctx.draw(&Points {
                        coords: &coords,
                        color: Color::Yellow,
                    });
                    ctx.layer();
                    for node in &network.nodes {
                        let (Some(x), Some(y)) = (node.x, node.y) else {
                            continue;
                        };
                        ctx.print(
                            x,
                            y + 3.0,
                            Span::styled(
                                last_name(node).to_string(),
                                Style::default().fg(Color::Yellow),
                            ),
                        );
                    }
                }
                View::PassMap(map) => {
                    for arrow in &map.failed {
                        pitch::draw_arrow(
                            ctx,
                            arrow.x,
                            arrow.y,
                            arrow.end_x,
                            arrow.end_y,
                            FAILED_ARROW.color,
                        );
                    }
                    ctx.layer();
                    for arrow in &map.completed {
                        pitch::draw_arrow(
                            ctx,
                            arrow.x,
                            arrow.y,
                            arrow.end_x,
                            arrow.end_y,
                            COMPLETED_ARROW.color,
                        );
                    }
                }
            }
        });
    frame.render_widget(canvas, area);
}

fn last_name(node: &Node) -> &str {
    node.player_name
        .split_whitespace()
        .last()
        .unwrap_or(node.player_name.as_str())
}

fn render_summary(frame: &mut Frame, area: Rect, state: &AppState) {
    let text = match &state.view {
        View::Prompt => "Select a team in the left panel,\nthen a mode.".to_string(),
        View::Network { network, .. } => {
            let mut lines = vec![
                format!("Players: {}", network.nodes.len()),
                format!("Links:   {}", network.edges.len()),
            ];
            let mut busiest: Vec<_> = network.edges.iter().collect();
            busiest.sort_by(|a, b| b.count.cmp(&a.count));
            if !busiest.is_empty() {
                lines.push(String::new());
                lines.push("Top links:".to_string());
            }
            for edge in busiest.iter().take(6) {
                lines.push(format!(
                    "{} → {}  x{}",
                    short_name(&edge.source_name),
                    short_name(&edge.recipient_name),
                    edge.count
                ));
            }
            lines.join("\n")
        }
        View::PassMap(map) => {
            let attempts = map.completed.len() + map.failed.len();
            let pct = if attempts > 0 {
                (map.completed.len() as f64 / attempts as f64) * 100.0
            } else {
                0.0
            };
            [
                format!("Completed: {}", map.completed.len()),
                format!("Failed:    {}", map.failed.len()),
                format!("Accuracy:  {pct:.0}%"),
            ]
            .join("\n")
        }
    };
    let summary = Paragraph::new(text).block(Block::default().title("Summary").borders(Borders::ALL));
    frame.render_widget(summary, area);
}

fn short_name(name: &str) -> &str {
    name.split_whitespace().last().unwrap_or(name)
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    let start = state.logs.len().saturating_sub(2);
    state
        .logs
        .iter()
        .skip(start)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(50, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Passnet Terminal - Help",
        "",
        "  Tab / h / l   Switch between team and mode lists",
        "  j/k or ↑/↓    Move cursor",
        "  Enter         Apply highlighted selection",
        "  Esc           Back to team list",
        "  ?             Toggle help",
        "  q             Quit",
        "",
        "Network mode: players at their mean pass origin,",
        "  connections weighted by pass count.",
        "Pass map: one arrow per attempt, white completed,",
        "  red failed.",
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
