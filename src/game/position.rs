use std::fmt;
use std::str::FromStr;

use super::board::{COLS, ROWS};

/// A board cell. Coordinates are signed so that probing off the edge of the
/// board needs no special casing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Position { row, col }
    }

    /// Whether the position lies on the 8x5 board
    pub fn in_bounds(self) -> bool {
        (0..ROWS as i32).contains(&self.row) && (0..COLS as i32).contains(&self.col)
    }

    /// Position shifted by the given row and column deltas
    pub fn offset(self, dr: i32, dc: i32) -> Position {
        Position::new(self.row + dr, self.col + dc)
    }

    /// Iterate over every cell of the board in row-major order
    pub fn all() -> impl Iterator<Item = Position> {
        (0..ROWS as i32).flat_map(|row| (0..COLS as i32).map(move |col| Position::new(row, col)))
    }
}

/// Algebraic form: column letter `A..E`, then `8 - row`.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'A' as i32 + self.col) as u8 as char;
        write!(f, "{}{}", file, ROWS as i32 - self.row)
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let file = chars
            .next()
            .ok_or_else(|| "empty square name".to_string())?
            .to_ascii_uppercase();
        let rank: i32 = chars
            .as_str()
            .parse()
            .map_err(|_| format!("invalid rank in '{}'", s))?;
        if !(1..=ROWS as i32).contains(&rank) {
            return Err(format!("square '{}' is off the board", s));
        }

        let pos = Position::new(ROWS as i32 - rank, file as i32 - 'A' as i32);
        if !pos.in_bounds() {
            return Err(format!("square '{}' is off the board", s));
        }
        Ok(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_algebraic() {
        assert_eq!(Position::new(0, 0).to_string(), "A8");
        assert_eq!(Position::new(7, 4).to_string(), "E1");
        assert_eq!(Position::new(6, 1).to_string(), "B2");
    }

    #[test]
    fn test_parse_algebraic() {
        assert_eq!("A8".parse::<Position>(), Ok(Position::new(0, 0)));
        assert_eq!("e1".parse::<Position>(), Ok(Position::new(7, 4)));
        assert!("F1".parse::<Position>().is_err());
        assert!("A9".parse::<Position>().is_err());
        assert!("".parse::<Position>().is_err());
    }

    #[test]
    fn test_parse_extreme_ranks() {
        assert!("A-2147483648".parse::<Position>().is_err());
        assert!("A2147483647".parse::<Position>().is_err());
        assert!("A0".parse::<Position>().is_err());
    }

    #[test]
    fn test_bounds() {
        assert!(Position::new(7, 4).in_bounds());
        assert!(!Position::new(8, 0).in_bounds());
        assert!(!Position::new(0, -1).in_bounds());
        assert_eq!(Position::all().count(), ROWS * COLS);
    }

    #[test]
    fn test_equality_by_value() {
        assert_eq!(Position::new(3, 2), Position::new(2, 2).offset(1, 0));
    }
}
