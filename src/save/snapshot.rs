use crate::error::SnapshotError;
use crate::game::{Board, Color, GameState, Piece, PieceKind, Position, RunnerState};

/// Line separating the piece list from the move history.
pub const HISTORY_MARKER: &str = "HISTORY_START";

/// Render a game in the line-oriented save format:
///
/// ```text
/// <player1 name>
/// <player2 name>
/// <FIRST|SECOND>
/// <turn count>
/// row,col,Kind,COLOR      (one per occupied cell, row-major)
/// HISTORY_START
/// <history lines>
/// ```
pub fn to_text(state: &GameState) -> Result<String, SnapshotError> {
    for name in [state.player1_name(), state.player2_name()] {
        if name.contains(['\n', '\r']) {
            return Err(SnapshotError::InvalidPlayerName(name.to_string()));
        }
    }

    let mut out = format!(
        "{}\n{}\n{}\n{}\n",
        state.player1_name(),
        state.player2_name(),
        state.current_player(),
        state.move_count()
    );

    for (pos, piece) in state.board().pieces() {
        out.push_str(&format!("{},{},{},{}\n", pos.row, pos.col, piece.kind, piece.color));
    }

    out.push_str(HISTORY_MARKER);
    out.push('\n');
    for line in state.history() {
        out.push_str(line);
        out.push('\n');
    }
    Ok(out)
}

/// Rebuild a game from the save format.
///
/// Nothing is returned unless the whole text parses, so a bad file can never
/// leave a half-restored game behind.
pub fn from_text(text: &str) -> Result<GameState, SnapshotError> {
    let mut lines = text
        .lines()
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .enumerate()
        .map(|(i, line)| (i + 1, line));

    let mut header = |field: &'static str| {
        lines
            .next()
            .map(|(_, line)| line)
            .ok_or(SnapshotError::MissingField(field))
    };

    let player1 = header("player 1 name")?.to_string();
    let player2 = header("player 2 name")?.to_string();
    let current = header("current player")?;
    let current: Color = current
        .trim()
        .parse()
        .map_err(|_| SnapshotError::InvalidColor(current.to_string()))?;
    let turns = header("turn count")?;
    // Only validated; the move counter is rebuilt from the history.
    turns
        .trim()
        .parse::<usize>()
        .map_err(|_| SnapshotError::InvalidTurnCount(turns.to_string()))?;

    let mut board = Board::empty();
    let mut found_marker = false;
    for (line_no, line) in lines.by_ref() {
        if line == HISTORY_MARKER {
            found_marker = true;
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let (pos, piece) = parse_piece_line(line_no, line)?;
        if board.get_piece(pos).is_some() {
            return Err(SnapshotError::DuplicatePiece {
                line: line_no,
                row: pos.row,
                col: pos.col,
            });
        }
        board.place_piece(pos, Some(piece));
    }
    if !found_marker {
        return Err(SnapshotError::MissingHistoryMarker);
    }

    let history: Vec<String> = lines.map(|(_, line)| line.to_string()).collect();

    Ok(GameState::restored(board, current, player1, player2, history))
}

fn parse_piece_line(line_no: usize, line: &str) -> Result<(Position, Piece), SnapshotError> {
    let malformed = |reason: String| SnapshotError::MalformedPiece {
        line: line_no,
        text: line.to_string(),
        reason,
    };

    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let [row, col, kind, color] = fields.as_slice() else {
        return Err(malformed(format!("expected 4 fields, found {}", fields.len())));
    };

    let row: i32 = row
        .parse()
        .map_err(|_| malformed(format!("invalid row '{}'", row)))?;
    let col: i32 = col
        .parse()
        .map_err(|_| malformed(format!("invalid column '{}'", col)))?;
    let pos = Position::new(row, col);
    if !pos.in_bounds() {
        return Err(malformed(format!("row {}, col {} is off the board", row, col)));
    }

    let kind: PieceKind = kind.parse().map_err(malformed)?;
    let color: Color = color.parse().map_err(malformed)?;

    // A Runner standing on its far baseline must already have turned around.
    let kind = match kind {
        PieceKind::Runner(_) if row == color.far_row() => PieceKind::Runner(RunnerState::reversed()),
        other => other,
    };

    Ok((pos, Piece::new(kind, color)))
}
