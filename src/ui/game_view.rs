use super::app::{App, Mode};
use crate::game::{Color as Side, GameState, Piece, PieceKind, Position, COLS, ROWS};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Min(14),    // Board + history
            Constraint::Length(3),  // Message
            Constraint::Length(3),  // Controls
        ])
        .split(frame.area());

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(20)])
        .split(chunks[1]);

    render_header(frame, app.game_state(), chunks[0]);
    render_board(frame, app, middle[0]);
    render_history(frame, app.game_state(), app.config().ui.history_lines, middle[1]);
    render_message(frame, app, chunks[2]);
    render_controls(frame, app.mode(), chunks[3]);

    if let Mode::Slots { selected } = app.mode() {
        render_slots(frame, app, *selected, middle[1]);
    }
}

fn side_color(side: Side) -> Color {
    match side {
        Side::First => Color::Red,
        Side::Second => Color::Blue,
    }
}

fn render_header(frame: &mut Frame, game_state: &GameState, area: Rect) {
    let (status, color) = match game_state.winner() {
        Some(winner) => (
            format!("Game Over! Winner: {}", game_state.name_of(winner)),
            side_color(winner),
        ),
        None => (
            format!(
                "{}'s turn  |  Move {}",
                game_state.current_player_name(),
                game_state.move_count() + 1
            ),
            side_color(game_state.current_player()),
        ),
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Kwazam Chess"));

    frame.render_widget(header, area);
}

/// Two-letter glyph for a piece; a Runner that has turned around shows its
/// new heading.
fn glyph(piece: &Piece) -> &'static str {
    match piece.kind {
        PieceKind::Runner(state) => {
            let heading_down = (piece.color == Side::First) == state.moving_forward;
            if heading_down {
                "Rv"
            } else {
                "R^"
            }
        }
        PieceKind::Leaper => "Le",
        PieceKind::Guard => "Gu",
        PieceKind::Tower => "To",
        PieceKind::Cross => "Cr",
    }
}

fn render_board(frame: &mut Frame, app: &App, area: Rect) {
    let board = app.game_state().board();
    let mut lines = Vec::new();

    let flipped = app.board_flipped();
    let screen_to_board = |i: usize, len: usize| (if flipped { len - 1 - i } else { i }) as i32;

    let mut files = vec![Span::raw("   ")];
    for x in 0..COLS {
        let col = screen_to_board(x, COLS);
        files.push(Span::raw(format!("  {} ", (b'A' + col as u8) as char)));
    }
    lines.push(Line::from(files));
    lines.push(Line::from("   ╔════════════════════╗"));

    for y in 0..ROWS {
        let row = screen_to_board(y, ROWS);
        let mut spans = vec![Span::raw(format!("{} ║", ROWS as i32 - row))];

        for x in 0..COLS {
            let pos = Position::new(row, screen_to_board(x, COLS));
            let (text, mut style) = match board.get_piece(pos) {
                Some(piece) => (
                    format!(" {} ", glyph(piece)),
                    Style::default()
                        .fg(side_color(piece.color))
                        .add_modifier(Modifier::BOLD),
                ),
                None => (" .  ".to_string(), Style::default().fg(Color::DarkGray)),
            };

            if app.highlighted().contains(&pos) {
                style = style.bg(Color::Green);
            }
            if app.selected() == Some(pos) {
                style = style.bg(Color::Yellow);
            }
            if app.cursor() == pos {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(format!("{:<4}", text), style));
        }

        spans.push(Span::raw("║"));
        lines.push(Line::from(spans));
    }

    lines.push(Line::from("   ╚════════════════════╝"));

    let board_widget = Paragraph::new(lines)
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::ALL).title("Board"));
    frame.render_widget(board_widget, area);
}

fn render_history(frame: &mut Frame, game_state: &GameState, max_lines: usize, area: Rect) {
    let history = game_state.history();
    let start = history.len().saturating_sub(max_lines);
    let lines: Vec<Line> = history[start..]
        .iter()
        .enumerate()
        .map(|(i, record)| Line::from(format!("{:>3}. {}", start + i + 1, record)))
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Move History"),
    );
    frame.render_widget(widget, area);
}

fn render_message(frame: &mut Frame, app: &App, area: Rect) {
    let text = match app.mode() {
        Mode::SaveAs { name } => format!("Save as: {}_", name),
        _ => app.message().unwrap_or("").to_string(),
    };
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

/// Save browser drawn over the history panel
fn render_slots(frame: &mut Frame, app: &App, selected: usize, area: Rect) {
    let lines: Vec<Line> = app
        .slots()
        .iter()
        .enumerate()
        .map(|(i, slot)| {
            let status = if slot.game_ended {
                "finished".to_string()
            } else {
                format!("{} to move", slot.current_player)
            };
            let text = format!("{:<16} {:>3} moves  {}", slot.name, slot.move_count, status);
            if i == selected {
                Line::styled(text, Style::default().add_modifier(Modifier::REVERSED))
            } else {
                Line::from(text)
            }
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Saved Games"),
    );
    frame.render_widget(Clear, area);
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, mode: &Mode, area: Rect) {
    let line = Line::from(match mode {
        Mode::Board => {
            "Arrows: Cursor | Enter: Select/Move | N: New | S/L: Quicksave/load | W: Save as | O: Saves | Q: Quit"
        }
        Mode::Slots { .. } => "Up/Down: Choose  |  Enter: Load  |  D: Delete  |  Esc: Back",
        Mode::SaveAs { .. } => "Type a slot name  |  Enter: Save  |  Esc: Cancel",
    });

    let controls = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
