use std::fmt;
use std::str::FromStr;

use super::board::ROWS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    First,
    Second,
}

impl Color {
    /// Get the other color
    pub fn other(self) -> Color {
        match self {
            Color::First => Color::Second,
            Color::Second => Color::First,
        }
    }

    /// Name used in saved games
    pub fn as_str(self) -> &'static str {
        match self {
            Color::First => "FIRST",
            Color::Second => "SECOND",
        }
    }

    /// Row this color's pieces start on
    pub fn home_row(self) -> i32 {
        match self {
            Color::First => 0,
            Color::Second => ROWS as i32 - 1,
        }
    }

    /// Row on the opponent's side that turns a Runner around
    pub fn far_row(self) -> i32 {
        self.other().home_row()
    }

    /// Row step taken by a piece of this color heading away from home
    pub fn forward(self) -> i32 {
        match self {
            Color::First => 1,
            Color::Second => -1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FIRST" => Ok(Color::First),
            "SECOND" => Ok(Color::Second),
            other => Err(format!("unknown color '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_color() {
        assert_eq!(Color::First.other(), Color::Second);
        assert_eq!(Color::Second.other(), Color::First);
    }

    #[test]
    fn test_baselines() {
        assert_eq!(Color::First.home_row(), 0);
        assert_eq!(Color::First.far_row(), 7);
        assert_eq!(Color::Second.home_row(), 7);
        assert_eq!(Color::Second.far_row(), 0);
    }

    #[test]
    fn test_parse_color() {
        assert_eq!("FIRST".parse::<Color>(), Ok(Color::First));
        assert_eq!("SECOND".parse::<Color>(), Ok(Color::Second));
        assert!("RED".parse::<Color>().is_err());
        assert_eq!(Color::Second.to_string(), "SECOND");
    }
}
