use crate::config::AppConfig;
use crate::game::{Color, GameState, MoveError, Position, COLS, ROWS};
use crate::save::{SaveManager, SlotInfo};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;

/// What the keyboard is currently driving
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Board,
    /// Browsing save slots, `selected` indexes [`App::slots`]
    Slots { selected: usize },
    /// Typing the name of a slot to save into
    SaveAs { name: String },
}

pub struct App {
    game_state: GameState,
    config: AppConfig,
    saves: SaveManager,
    mode: Mode,
    slots: Vec<SlotInfo>,
    cursor: Position,
    selected: Option<Position>,
    destinations: Vec<Position>,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let game_state = GameState::with_names(&config.players.player1, &config.players.player2);
        Self::with_game(config, game_state)
    }

    /// Start the UI on an existing game, e.g. one loaded from disk
    pub fn with_game(config: AppConfig, game_state: GameState) -> Self {
        let saves = SaveManager::new(config.saves.clone());
        App {
            game_state,
            config,
            saves,
            mode: Mode::Board,
            slots: Vec::new(),
            cursor: Position::new(ROWS as i32 - 2, COLS as i32 / 2),
            selected: None,
            destinations: Vec::new(),
            should_quit: false,
            message: None,
        }
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    /// Destinations to highlight for the current selection
    pub fn highlighted(&self) -> &[Position] {
        if self.config.ui.highlight_moves {
            &self.destinations
        } else {
            &[]
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Slots shown by the save browser
    pub fn slots(&self) -> &[SlotInfo] {
        &self.slots
    }

    /// The board is drawn upside down while the red side (FIRST) is to move,
    /// if the player asked for it.
    pub fn board_flipped(&self) -> bool {
        self.config.ui.flip_board && self.game_state.current_player() == Color::First
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match self.mode {
            Mode::Board => self.handle_board_key(key),
            Mode::Slots { .. } => self.handle_slots_key(key),
            Mode::SaveAs { .. } => self.handle_save_as_key(key),
        }
    }

    fn handle_board_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up => self.move_cursor(-1, 0),
            KeyCode::Down => self.move_cursor(1, 0),
            KeyCode::Left => self.move_cursor(0, -1),
            KeyCode::Right => self.move_cursor(0, 1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.click(self.cursor);
            }
            KeyCode::Char('n') => {
                // Keep the names of the game being replaced, which may have
                // come from a save rather than the config.
                self.game_state = GameState::with_names(
                    self.game_state.player1_name(),
                    self.game_state.player2_name(),
                );
                self.clear_selection();
                self.message = Some(format!(
                    "New game: {} vs {}",
                    self.game_state.player1_name(),
                    self.game_state.player2_name()
                ));
            }
            KeyCode::Char('s') => {
                let slot = self.config.saves.quicksave_slot.clone();
                self.save_to(&slot);
            }
            KeyCode::Char('l') => {
                let slot = self.config.saves.quicksave_slot.clone();
                self.load_from(&slot);
            }
            KeyCode::Char('w') => {
                self.mode = Mode::SaveAs {
                    name: String::new(),
                };
            }
            KeyCode::Char('o') => self.open_slots(),
            _ => {}
        }
    }

    fn handle_slots_key(&mut self, key: KeyEvent) {
        let Mode::Slots { selected } = self.mode else {
            return;
        };
        let last = self.slots.len().saturating_sub(1);

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.mode = Mode::Board,
            KeyCode::Up => {
                self.mode = Mode::Slots {
                    selected: selected.saturating_sub(1),
                }
            }
            KeyCode::Down => {
                self.mode = Mode::Slots {
                    selected: (selected + 1).min(last),
                }
            }
            KeyCode::Enter => {
                self.mode = Mode::Board;
                if let Some(name) = self.slots.get(selected).map(|s| s.name.clone()) {
                    self.load_from(&name);
                }
            }
            KeyCode::Char('d') => {
                let Some(name) = self.slots.get(selected).map(|s| s.name.clone()) else {
                    return;
                };
                match self.saves.delete_slot(&name) {
                    Ok(()) => {
                        self.message = Some(format!("Deleted '{}'", name));
                        self.refresh_slots(selected);
                    }
                    Err(e) => self.message = Some(format!("Delete failed: {}", e)),
                }
            }
            _ => {}
        }
    }

    fn handle_save_as_key(&mut self, key: KeyEvent) {
        let Mode::SaveAs { name } = &mut self.mode else {
            return;
        };

        match key.code {
            KeyCode::Char(c) => name.push(c),
            KeyCode::Backspace => {
                name.pop();
            }
            KeyCode::Enter => {
                let slot = std::mem::take(name);
                self.mode = Mode::Board;
                self.save_to(&slot);
            }
            KeyCode::Esc => {
                self.mode = Mode::Board;
                self.message = Some("Save cancelled.".to_string());
            }
            _ => {}
        }
    }

    fn open_slots(&mut self) {
        self.clear_selection();
        self.refresh_slots(0);
        if self.mode == Mode::Board && self.message.is_none() {
            self.message = Some("No saved games yet.".to_string());
        }
    }

    /// Re-read the save directory, staying in the browser only while it has
    /// something to show.
    fn refresh_slots(&mut self, selected: usize) {
        match self.saves.list_slots() {
            Ok(slots) if !slots.is_empty() => {
                let selected = selected.min(slots.len() - 1);
                self.slots = slots;
                self.mode = Mode::Slots { selected };
            }
            Ok(_) => {
                self.slots.clear();
                self.mode = Mode::Board;
            }
            Err(e) => {
                self.slots.clear();
                self.mode = Mode::Board;
                self.message = Some(format!("Cannot list saves: {}", e));
            }
        }
    }

    fn move_cursor(&mut self, dr: i32, dc: i32) {
        // Arrow keys follow the screen, not the board.
        let (dr, dc) = if self.board_flipped() {
            (-dr, -dc)
        } else {
            (dr, dc)
        };
        let next = self.cursor.offset(dr, dc);
        if next.in_bounds() {
            self.cursor = next;
        }
    }

    /// Select a piece, or move the selected piece to `pos`
    pub fn click(&mut self, pos: Position) {
        if self.game_state.is_game_ended() {
            self.message = Some("Game over! Press 'n' to start again.".to_string());
            return;
        }

        match self.selected {
            Some(from) if self.destinations.contains(&pos) => self.play(from, pos),
            _ => self.select(pos),
        }
    }

    fn select(&mut self, pos: Position) {
        let own_piece = self
            .game_state
            .piece_at(pos)
            .is_some_and(|p| p.color == self.game_state.current_player());
        if own_piece {
            self.selected = Some(pos);
            self.destinations = self.game_state.legal_destinations(pos);
            if self.destinations.is_empty() {
                self.message = Some("That piece has no legal moves.".to_string());
            }
        } else {
            self.clear_selection();
        }
    }

    fn play(&mut self, from: Position, to: Position) {
        self.clear_selection();
        match self.game_state.try_move(from, to) {
            Ok(report) => {
                self.message = Some(match report.winner {
                    Some(winner) => format!(
                        "Congratulations {}! You've won the game!",
                        self.game_state.name_of(winner)
                    ),
                    None if report.transformed => "Tower and Cross pieces transformed!".to_string(),
                    None => report.notation,
                });
            }
            Err(MoveError::GameOver) => {
                self.message = Some("Game is over!".to_string());
            }
            Err(MoveError::EmptySquare) => {
                self.message = Some("There is no piece there!".to_string());
            }
            Err(MoveError::NotYourPiece) => {
                self.message = Some("That is not your piece!".to_string());
            }
            Err(MoveError::IllegalMove) => {
                self.message = Some("That piece cannot move there!".to_string());
            }
        }
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.destinations.clear();
    }

    fn save_to(&mut self, slot: &str) {
        self.message = Some(match self.saves.save_slot(&self.game_state, slot) {
            Ok(path) => format!("Game saved to {}", path.display()),
            Err(e) => format!("Save failed: {}", e),
        });
    }

    fn load_from(&mut self, slot: &str) {
        self.message = Some(match self.saves.load_slot(slot) {
            Ok(state) => {
                self.game_state = state;
                self.clear_selection();
                format!("Loaded '{}'", slot)
            }
            Err(e) => format!("Load failed: {}", e),
        });
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(frame, self);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}
