use super::{Color, Piece, Position};

pub const ROWS: usize = 8;
pub const COLS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Piece>; COLS]; ROWS],
}

impl Board {
    /// Create a board with no pieces on it
    pub fn empty() -> Self {
        Board {
            cells: [[None; COLS]; ROWS],
        }
    }

    /// Create a board in the standard starting layout
    pub fn standard() -> Self {
        let mut board = Board::empty();

        let first_back = [
            Piece::tower(Color::First),
            Piece::leaper(Color::First),
            Piece::guard(Color::First),
            Piece::leaper(Color::First),
            Piece::cross(Color::First),
        ];
        let second_back = [
            Piece::cross(Color::Second),
            Piece::leaper(Color::Second),
            Piece::guard(Color::Second),
            Piece::leaper(Color::Second),
            Piece::tower(Color::Second),
        ];

        for col in 0..COLS {
            board.cells[0][col] = Some(first_back[col]);
            board.cells[1][col] = Some(Piece::runner(Color::First));
            board.cells[ROWS - 2][col] = Some(Piece::runner(Color::Second));
            board.cells[ROWS - 1][col] = Some(second_back[col]);
        }

        board
    }

    /// Get the piece at a position. Anything off the board reads as empty.
    pub fn get_piece(&self, pos: Position) -> Option<&Piece> {
        if !pos.in_bounds() {
            return None;
        }
        self.cells[pos.row as usize][pos.col as usize].as_ref()
    }

    /// Mutable access to the piece at a position
    pub fn piece_mut(&mut self, pos: Position) -> Option<&mut Piece> {
        if !pos.in_bounds() {
            return None;
        }
        self.cells[pos.row as usize][pos.col as usize].as_mut()
    }

    /// Check that both ends are on the board, there is a piece at `from`,
    /// and that piece's movement rule allows the move
    pub fn is_valid_move(&self, from: Position, to: Position) -> bool {
        if !from.in_bounds() || !to.in_bounds() {
            return false;
        }
        match self.get_piece(from) {
            Some(piece) => piece.can_move(self, from, to),
            None => false,
        }
    }

    /// Relocate whatever is at `from` onto `to`, replacing any occupant.
    ///
    /// No rule checks; callers validate first. Off-board endpoints are ignored.
    pub fn move_piece(&mut self, from: Position, to: Position) {
        if !from.in_bounds() || !to.in_bounds() {
            return;
        }
        let piece = self.cells[from.row as usize][from.col as usize].take();
        self.cells[to.row as usize][to.col as usize] = piece;
    }

    /// Put a piece (or nothing) on a cell, bypassing movement rules
    pub fn place_piece(&mut self, pos: Position, piece: Option<Piece>) {
        if !pos.in_bounds() {
            return;
        }
        self.cells[pos.row as usize][pos.col as usize] = piece;
    }

    /// Turn every Tower into a Cross and every Cross into a Tower.
    /// Returns whether any piece changed.
    pub fn transform_pieces(&mut self) -> bool {
        let mut transformed = false;
        for cell in self.cells.iter_mut().flatten() {
            if let Some(piece) = cell {
                let swapped = piece.transformed();
                if swapped != *piece {
                    *piece = swapped;
                    transformed = true;
                }
            }
        }
        transformed
    }

    /// Every cell the piece at `from` may legally move to, in row-major order
    pub fn legal_destinations(&self, from: Position) -> Vec<Position> {
        if self.get_piece(from).is_none() {
            return Vec::new();
        }
        Position::all()
            .filter(|&to| self.is_valid_move(from, to))
            .collect()
    }

    /// Occupied cells in row-major order
    pub fn pieces(&self) -> impl Iterator<Item = (Position, &Piece)> + '_ {
        Position::all().filter_map(move |pos| self.get_piece(pos).map(|piece| (pos, piece)))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}
