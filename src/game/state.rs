use log::{debug, info};

use super::{Board, Color, PieceKind, Position};

/// Number of accepted moves between Tower/Cross transformations
pub const TRANSFORM_INTERVAL: usize = 4;

pub const DEFAULT_PLAYER1_NAME: &str = "Player 1";
pub const DEFAULT_PLAYER2_NAME: &str = "Player 2";

/// Why a move request was turned down
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    GameOver,
    EmptySquare,
    NotYourPiece,
    IllegalMove,
}

/// What an accepted move did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    pub notation: String,
    pub captured: Option<PieceKind>,
    pub transformed: bool,
    pub winner: Option<Color>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    board: Board,
    current_player: Color,
    move_count: usize,
    game_ended: bool,
    /// Display name of the opening player (SECOND)
    player1_name: String,
    /// Display name of FIRST
    player2_name: String,
    history: Vec<String>,
}

impl GameState {
    /// Create the initial game state with default player names
    pub fn initial() -> Self {
        Self::with_names(DEFAULT_PLAYER1_NAME, DEFAULT_PLAYER2_NAME)
    }

    /// Create the initial game state. `player1` plays SECOND and moves first.
    pub fn with_names(player1: &str, player2: &str) -> Self {
        GameState {
            board: Board::standard(),
            current_player: Color::Second,
            move_count: 0,
            game_ended: false,
            player1_name: player1.to_string(),
            player2_name: player2.to_string(),
            history: Vec::new(),
        }
    }

    /// Assemble a state from restored parts. The move counter and game-over
    /// flag are rebuilt from the history.
    pub(crate) fn restored(
        board: Board,
        current_player: Color,
        player1_name: String,
        player2_name: String,
        history: Vec<String>,
    ) -> Self {
        let move_count = history.iter().filter(|line| !line.contains("transformed")).count();
        let game_ended = history.iter().any(|line| line.starts_with("Game Over"));
        GameState {
            board,
            current_player,
            move_count,
            game_ended,
            player1_name,
            player2_name,
            history,
        }
    }

    /// Get current player
    pub fn current_player(&self) -> Color {
        self.current_player
    }

    /// Display name of the player to move
    pub fn current_player_name(&self) -> &str {
        self.name_of(self.current_player)
    }

    /// Display name of whoever plays `color`
    pub fn name_of(&self, color: Color) -> &str {
        match color {
            Color::Second => &self.player1_name,
            Color::First => &self.player2_name,
        }
    }

    pub fn player1_name(&self) -> &str {
        &self.player1_name
    }

    pub fn player2_name(&self) -> &str {
        &self.player2_name
    }

    pub fn set_player_names(&mut self, player1: &str, player2: &str) {
        self.player1_name = player1.to_string();
        self.player2_name = player2.to_string();
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn piece_at(&self, pos: Position) -> Option<&super::Piece> {
        self.board.get_piece(pos)
    }

    pub fn move_count(&self) -> usize {
        self.move_count
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Check if game is over
    pub fn is_game_ended(&self) -> bool {
        self.game_ended
    }

    /// The player who captured a Guard, once the game is over.
    ///
    /// The turn still passes on the winning move, so the winner is the
    /// color that is *not* to move.
    pub fn winner(&self) -> Option<Color> {
        self.game_ended.then(|| self.current_player.other())
    }

    /// Cells the piece at `from` may move to this turn
    pub fn legal_destinations(&self, from: Position) -> Vec<Position> {
        if self.game_ended {
            return Vec::new();
        }
        match self.board.get_piece(from) {
            Some(piece) if piece.color == self.current_player => self.board.legal_destinations(from),
            _ => Vec::new(),
        }
    }

    /// Try a move, reporting only whether it was accepted
    pub fn attempt_move(&mut self, from: Position, to: Position) -> bool {
        self.try_move(from, to).is_ok()
    }

    /// Apply a move for the player to move.
    ///
    /// A rejected move leaves the state untouched.
    pub fn try_move(&mut self, from: Position, to: Position) -> Result<MoveReport, MoveError> {
        if self.game_ended {
            return Err(MoveError::GameOver);
        }

        let piece = match self.board.get_piece(from) {
            Some(piece) => *piece,
            None => return Err(MoveError::EmptySquare),
        };
        if piece.color != self.current_player {
            return Err(MoveError::NotYourPiece);
        }
        if !self.board.is_valid_move(from, to) {
            debug!("rejected {} {} -> {}", piece.kind, from, to);
            return Err(MoveError::IllegalMove);
        }

        let target = self.board.get_piece(to).copied();

        let mut notation = format!(
            "{} moved {} from {} to {}",
            self.current_player_name(),
            piece.kind,
            from,
            to
        );
        if let Some(target) = target {
            notation.push_str(&format!(" takes {}", target.kind));
        }

        self.board.move_piece(from, to);
        if piece.is_runner() {
            if let Some(moved) = self.board.piece_mut(to) {
                moved.on_arrival(to.row);
            }
        }

        debug!("{}", notation);
        self.history.push(notation.clone());
        self.move_count += 1;

        let mut report = MoveReport {
            notation,
            captured: target.map(|t| t.kind),
            transformed: false,
            winner: None,
        };

        if let Some(target) = target {
            if target.is_guard() && target.color != self.current_player {
                let winner = self.current_player;
                let line = format!("Game Over! {} wins!", self.name_of(winner));
                info!("{}", line);
                self.history.push(line);
                self.game_ended = true;
                report.winner = Some(winner);
                self.switch_player();
                return Ok(report);
            }
        }

        if self.move_count % TRANSFORM_INTERVAL == 0 && self.board.transform_pieces() {
            info!("transformation after move {}", self.move_count);
            self.history.push("Tower and Cross pieces transformed".to_string());
            report.transformed = true;
        }

        self.switch_player();
        Ok(report)
    }

    fn switch_player(&mut self) {
        self.current_player = self.current_player.other();
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Piece, RunnerState};

    fn pos(row: i32, col: i32) -> Position {
        Position::new(row, col)
    }

    fn sq(name: &str) -> Position {
        name.parse().unwrap()
    }

    /// A state on a custom board, SECOND to move, no history yet.
    fn custom(pieces: &[(i32, i32, Piece)]) -> GameState {
        let mut board = Board::empty();
        for &(row, col, piece) in pieces {
            board.place_piece(pos(row, col), Some(piece));
        }
        GameState::restored(
            board,
            Color::Second,
            "Blue".to_string(),
            "Red".to_string(),
            Vec::new(),
        )
    }

    #[test]
    fn test_initial_state() {
        let state = GameState::initial();
        assert_eq!(state.current_player(), Color::Second);
        assert_eq!(state.current_player_name(), DEFAULT_PLAYER1_NAME);
        assert_eq!(state.move_count(), 0);
        assert!(!state.is_game_ended());
        assert!(state.history().is_empty());
        assert_eq!(state.winner(), None);
    }

    #[test]
    fn test_first_runner_step() {
        let mut state = GameState::with_names("Blue", "Red");
        assert!(state.attempt_move(pos(6, 1), pos(5, 1)));

        assert_eq!(state.current_player(), Color::First);
        assert_eq!(state.move_count(), 1);
        assert_eq!(state.history(), &["Blue moved Runner from B2 to B3".to_string()]);
        assert_eq!(state.piece_at(pos(5, 1)), Some(&Piece::runner(Color::Second)));
        assert_eq!(state.piece_at(pos(6, 1)), None);
    }

    #[test]
    fn test_rejections_leave_state_untouched() {
        let mut state = GameState::initial();
        let before = state.clone();

        assert_eq!(state.try_move(pos(4, 0), pos(3, 0)), Err(MoveError::EmptySquare));
        assert_eq!(state.try_move(pos(1, 0), pos(2, 0)), Err(MoveError::NotYourPiece));
        assert_eq!(state.try_move(pos(6, 0), pos(4, 0)), Err(MoveError::IllegalMove));
        assert_eq!(state.try_move(pos(6, 0), pos(6, 1)), Err(MoveError::IllegalMove));
        assert!(!state.attempt_move(pos(7, 2), pos(6, 2)));

        assert_eq!(state, before);
    }

    #[test]
    fn test_turn_alternates_on_every_move() {
        let mut state = GameState::initial();
        let moves = [("B2", "B3"), ("B7", "B6"), ("B3", "B4"), ("B6", "B5"), ("B1", "C3")];
        for (from, to) in moves {
            let before = state.current_player();
            assert!(state.attempt_move(sq(from), sq(to)), "{} -> {}", from, to);
            assert_ne!(state.current_player(), before);
        }
    }

    #[test]
    fn test_fourth_move_transforms() {
        let mut state = GameState::with_names("Blue", "Red");
        let moves = [("A2", "A3"), ("A7", "A6"), ("E2", "E3"), ("E7", "E6")];
        for (i, (from, to)) in moves.iter().enumerate() {
            let report = state.try_move(sq(from), sq(to)).unwrap();
            assert_eq!(report.transformed, i == 3);
        }

        assert_eq!(state.move_count(), 4);
        assert_eq!(state.history().len(), 5);
        assert_eq!(state.history()[4], "Tower and Cross pieces transformed");
        assert_eq!(state.piece_at(sq("A8")), Some(&Piece::cross(Color::First)));
        assert_eq!(state.piece_at(sq("E1")), Some(&Piece::cross(Color::Second)));
        assert_eq!(state.piece_at(sq("A1")), Some(&Piece::tower(Color::Second)));
    }

    #[test]
    fn test_no_transform_record_without_sliders() {
        let mut state = custom(&[
            (7, 2, Piece::guard(Color::Second)),
            (0, 2, Piece::guard(Color::First)),
        ]);
        assert!(state.attempt_move(pos(7, 2), pos(6, 2)));
        assert!(state.attempt_move(pos(0, 2), pos(1, 2)));
        assert!(state.attempt_move(pos(6, 2), pos(5, 2)));
        let report = state.try_move(pos(1, 2), pos(2, 2)).unwrap();

        assert!(!report.transformed);
        assert_eq!(state.move_count(), 4);
        assert_eq!(state.history().len(), 4);
    }

    #[test]
    fn test_capture_notation() {
        let mut state = custom(&[
            (7, 4, Piece::tower(Color::Second)),
            (2, 4, Piece::leaper(Color::First)),
            (0, 0, Piece::guard(Color::First)),
            (7, 0, Piece::guard(Color::Second)),
        ]);
        let report = state.try_move(pos(7, 4), pos(2, 4)).unwrap();
        assert_eq!(report.captured, Some(PieceKind::Leaper));
        assert_eq!(report.notation, "Blue moved Tower from E1 to E6 takes Leaper");
        assert_eq!(report.winner, None);
        assert!(!state.is_game_ended());
        assert_eq!(state.current_player(), Color::First);
    }

    #[test]
    fn test_guard_capture_ends_game() {
        let mut state = custom(&[
            (7, 2, Piece::guard(Color::Second)),
            (3, 1, Piece::leaper(Color::Second)),
            (1, 2, Piece::guard(Color::First)),
            (0, 0, Piece::tower(Color::First)),
        ]);

        let report = state.try_move(pos(3, 1), pos(1, 2)).unwrap();

        assert_eq!(report.winner, Some(Color::Second));
        assert!(state.is_game_ended());
        // The turn still passes on the winning move.
        assert_eq!(state.current_player(), Color::First);
        assert_eq!(state.winner(), Some(Color::Second));

        let history = state.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0], "Blue moved Leaper from B5 to C7 takes Guard");
        assert_eq!(history[1], "Game Over! Blue wins!");

        let before = state.clone();
        assert_eq!(state.try_move(pos(0, 0), pos(5, 0)), Err(MoveError::GameOver));
        assert!(!state.attempt_move(pos(7, 2), pos(6, 2)));
        assert_eq!(state, before);
        assert!(state.legal_destinations(pos(0, 0)).is_empty());
    }

    #[test]
    fn test_winning_move_skips_transformation() {
        let mut state = custom(&[
            (7, 0, Piece::tower(Color::Second)),
            (7, 4, Piece::guard(Color::Second)),
            (0, 0, Piece::guard(Color::First)),
            (3, 2, Piece::leaper(Color::First)),
        ]);
        assert!(state.attempt_move(pos(7, 0), pos(7, 1)));
        assert!(state.attempt_move(pos(3, 2), pos(5, 3)));
        assert!(state.attempt_move(pos(7, 1), pos(7, 0)));

        // The fourth move takes the Guard, so no transformation follows.
        let report = state.try_move(pos(5, 3), pos(7, 4)).unwrap();
        assert_eq!(report.winner, Some(Color::First));
        assert!(!report.transformed);
        assert!(state.is_game_ended());
        assert_eq!(state.piece_at(pos(7, 0)), Some(&Piece::tower(Color::Second)));

        let history = state.history();
        assert_eq!(history.len(), 5);
        assert_eq!(history[3], "Red moved Leaper from D3 to E1 takes Guard");
        assert_eq!(history[4], "Game Over! Red wins!");
    }

    #[test]
    fn test_runner_turns_around_at_far_baseline() {
        let mut state = custom(&[
            (1, 0, Piece::runner(Color::Second)),
            (7, 4, Piece::guard(Color::Second)),
            (3, 4, Piece::guard(Color::First)),
        ]);
        assert!(state.attempt_move(pos(1, 0), pos(0, 0)));
        assert_eq!(
            state.piece_at(pos(0, 0)).map(|p| p.kind),
            Some(PieceKind::Runner(RunnerState::reversed()))
        );

        assert!(state.attempt_move(pos(3, 4), pos(3, 3)));
        assert_eq!(state.legal_destinations(pos(0, 0)), vec![pos(1, 0)]);
        assert!(state.attempt_move(pos(0, 0), pos(1, 0)));
    }

    #[test]
    fn test_legal_destinations_only_for_player_to_move() {
        let state = GameState::initial();
        assert_eq!(state.legal_destinations(pos(6, 3)), vec![pos(5, 3)]);
        assert!(state.legal_destinations(pos(1, 3)).is_empty());
        assert!(state.legal_destinations(pos(4, 3)).is_empty());
    }

    #[test]
    fn test_restored_counts_moves_from_history() {
        let history = vec![
            "Blue moved Runner from A2 to A3".to_string(),
            "Red moved Runner from A7 to A6".to_string(),
            "Blue moved Runner from E2 to E3".to_string(),
            "Red moved Runner from E7 to E6".to_string(),
            "Tower and Cross pieces transformed".to_string(),
            "Blue moved Runner from A3 to A4".to_string(),
        ];
        let state = GameState::restored(
            Board::standard(),
            Color::First,
            "Blue".to_string(),
            "Red".to_string(),
            history,
        );
        assert_eq!(state.move_count(), 5);
        assert!(!state.is_game_ended());
    }
}
