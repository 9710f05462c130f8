/// Board characters and their meaning.
/// Properties are queried via methods, not stored as flags,
/// so the input legend is centralized here.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Glyph {
    Empty,
    Start,           // '@', climber spawn
    Goal,            // '*', target cell
    Segment(char),   // any alphanumeric: a pushable block label
}

impl Glyph {
    pub const START: char = '@';
    pub const GOAL: char = '*';
    pub const EMPTY: char = '.';

    /// Classify one input character.
    pub fn from_char(c: char) -> Self {
        match c {
            Self::START => Glyph::Start,
            Self::GOAL => Glyph::Goal,
            c if c.is_alphanumeric() => Glyph::Segment(c),
            _ => Glyph::Empty,
        }
    }

    /// Canonical character for display.
    pub fn to_char(self) -> char {
        match self {
            Glyph::Empty => Self::EMPTY,
            Glyph::Start => Self::START,
            Glyph::Goal => Self::GOAL,
            Glyph::Segment(c) => c,
        }
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Glyph::Empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legend() {
        assert_eq!(Glyph::from_char('@'), Glyph::Start);
        assert_eq!(Glyph::from_char('*'), Glyph::Goal);
        assert_eq!(Glyph::from_char('A'), Glyph::Segment('A'));
        assert_eq!(Glyph::from_char('7'), Glyph::Segment('7'));
        assert_eq!(Glyph::from_char('.'), Glyph::Empty);
        assert_eq!(Glyph::from_char(' '), Glyph::Empty);
        assert_eq!(Glyph::from_char('#'), Glyph::Empty);
    }

    #[test]
    fn display_round_trip_for_non_empty() {
        for c in ['@', '*', 'q', 'Z', '0'] {
            assert_eq!(Glyph::from_char(c).to_char(), c);
        }
        assert_eq!(Glyph::from_char('-').to_char(), '.');
    }
}
