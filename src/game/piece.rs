use std::fmt;
use std::str::FromStr;

use super::{Board, Color, Position};

/// Direction state carried by a Runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunnerState {
    pub moving_forward: bool,
    pub has_reached_end: bool,
}

impl RunnerState {
    /// A Runner that has not left its side of the board yet
    pub fn fresh() -> Self {
        RunnerState {
            moving_forward: true,
            has_reached_end: false,
        }
    }

    /// A Runner that already turned around at the far baseline
    pub fn reversed() -> Self {
        RunnerState {
            moving_forward: false,
            has_reached_end: true,
        }
    }
}

impl Default for RunnerState {
    fn default() -> Self {
        Self::fresh()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Runner(RunnerState),
    Leaper,
    Guard,
    Tower,
    Cross,
}

impl PieceKind {
    /// Kind name used in the move history and in saved games
    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Runner(_) => "Runner",
            PieceKind::Leaper => "Leaper",
            PieceKind::Guard => "Guard",
            PieceKind::Tower => "Tower",
            PieceKind::Cross => "Cross",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses a kind name. Runners come back fresh; the caller decides whether
/// the restored square means the Runner has already turned around.
impl FromStr for PieceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Runner" => Ok(PieceKind::Runner(RunnerState::fresh())),
            "Leaper" => Ok(PieceKind::Leaper),
            "Guard" => Ok(PieceKind::Guard),
            "Tower" => Ok(PieceKind::Tower),
            "Cross" => Ok(PieceKind::Cross),
            other => Err(format!("unknown piece kind '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Self {
        Piece { kind, color }
    }

    pub fn runner(color: Color) -> Self {
        Piece::new(PieceKind::Runner(RunnerState::fresh()), color)
    }

    pub fn leaper(color: Color) -> Self {
        Piece::new(PieceKind::Leaper, color)
    }

    pub fn guard(color: Color) -> Self {
        Piece::new(PieceKind::Guard, color)
    }

    pub fn tower(color: Color) -> Self {
        Piece::new(PieceKind::Tower, color)
    }

    pub fn cross(color: Color) -> Self {
        Piece::new(PieceKind::Cross, color)
    }

    pub fn is_runner(&self) -> bool {
        matches!(self.kind, PieceKind::Runner(_))
    }

    pub fn is_guard(&self) -> bool {
        self.kind == PieceKind::Guard
    }

    /// The Tower/Cross counterpart of this piece; other kinds are unchanged.
    pub fn transformed(self) -> Piece {
        let kind = match self.kind {
            PieceKind::Tower => PieceKind::Cross,
            PieceKind::Cross => PieceKind::Tower,
            other => other,
        };
        Piece::new(kind, self.color)
    }

    /// Whether this piece may move from `from` to `to` on `board`.
    ///
    /// Pure: looks at the board but never changes it or the piece.
    pub fn can_move(&self, board: &Board, from: Position, to: Position) -> bool {
        if let Some(target) = board.get_piece(to) {
            if target.color == self.color {
                return false;
            }
        }

        let dr = to.row - from.row;
        let dc = to.col - from.col;

        match self.kind {
            PieceKind::Leaper => {
                let (ar, ac) = (dr.abs(), dc.abs());
                (ar == 2 && ac == 1) || (ar == 1 && ac == 2)
            }
            PieceKind::Guard => dr.abs() <= 1 && dc.abs() <= 1 && (dr, dc) != (0, 0),
            PieceKind::Tower => (dr == 0) != (dc == 0) && path_clear(board, from, to),
            PieceKind::Cross => dr != 0 && dr.abs() == dc.abs() && path_clear(board, from, to),
            PieceKind::Runner(state) => {
                if dc != 0 || dr != self.runner_direction(state) {
                    return false;
                }
                (state.moving_forward && !state.has_reached_end)
                    || (!state.moving_forward && state.has_reached_end)
            }
        }
    }

    fn runner_direction(&self, state: RunnerState) -> i32 {
        if state.moving_forward {
            self.color.forward()
        } else {
            -self.color.forward()
        }
    }

    /// Post-move hook for Runners: the first landing on the far baseline
    /// turns the Runner around for the rest of the game.
    pub fn on_arrival(&mut self, new_row: i32) {
        if let PieceKind::Runner(state) = &mut self.kind {
            if !state.has_reached_end && state.moving_forward && new_row == self.color.far_row() {
                *state = RunnerState::reversed();
            }
        }
    }

    /// Opaque key a presentation layer can map to an image or glyph.
    pub fn visual_key(&self) -> String {
        let color = match self.color {
            Color::First => "first",
            Color::Second => "second",
        };
        match self.kind {
            PieceKind::Runner(state) if state.has_reached_end => format!("{}_runner_flipped", color),
            kind => format!("{}_{}", color, kind.name().to_ascii_lowercase()),
        }
    }
}

/// True when every cell strictly between `from` and `to` is empty. Only
/// meaningful for straight or diagonal lines.
fn path_clear(board: &Board, from: Position, to: Position) -> bool {
    let step_r = (to.row - from.row).signum();
    let step_c = (to.col - from.col).signum();

    let mut cur = from.offset(step_r, step_c);
    while cur != to {
        if board.get_piece(cur).is_some() {
            return false;
        }
        cur = cur.offset(step_r, step_c);
    }
    true
}
