/// Static puzzle description.
///
/// ## Coordinates
///
/// `y = 0` is the bottom row and `y` grows upward. Input rows arrive top
/// first (file order) and are reversed while loading, so the first text
/// row becomes `y = height - 1`.
///
/// ## Segments
///
/// Every alphanumeric character names a segment; the same character
/// anywhere on the board is the same segment. Segment indices are
/// assigned in first-seen order, scanning the bottom row first, left to
/// right. Only segment *depths* change during a search; the board itself
/// is never mutated after construction.

use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashMap;
use thiserror::Error;

use super::glyph::Glyph;

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Cell { x: self.x + dx, y: self.y + dy }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A named, independently pushable group of cells.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Segment {
    pub label: char,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("board has no rows")]
    Empty,
    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },
    #[error("board has no goal cell ('*')")]
    MissingGoal,
    #[error("board has more than one goal: {first} and {second}")]
    MultipleGoals { first: Cell, second: Cell },
    #[error("board has more than one start: {first} and {second}")]
    MultipleStarts { first: Cell, second: Cell },
    #[error("board has no start cell ('@') and none was supplied")]
    MissingStart,
    #[error("start {cell} lies outside the {width}x{height} board")]
    StartOutOfBounds { cell: Cell, width: usize, height: usize },
    #[error("start {cell} is occupied by segment '{label}'")]
    StartOnSegment { cell: Cell, label: char },
    #[error("start {cell} has nothing to stand on")]
    UnsupportedStart { cell: Cell },
}

#[derive(Clone, Debug)]
pub struct Board {
    width: usize,
    height: usize,
    start: Option<Cell>,
    goal: Cell,
    segments: Vec<Segment>,
    owner: FxHashMap<Cell, usize>,
}

// ── Construction ──

impl Board {
    /// Build a board from text rows, top row first.
    ///
    /// Fails on ragged rows, a missing or repeated goal, or a repeated
    /// start. A missing start is allowed here; supply one later with
    /// [`Board::with_start`].
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Board, BoardError> {
        if rows.is_empty() {
            return Err(BoardError::Empty);
        }

        let height = rows.len();
        let width = rows[0].as_ref().chars().count();
        for (row, text) in rows.iter().enumerate() {
            let found = text.as_ref().chars().count();
            if found != width {
                return Err(BoardError::RaggedRow { row, expected: width, found });
            }
        }

        let mut start: Option<Cell> = None;
        let mut goal: Option<Cell> = None;
        let mut segments: Vec<Segment> = vec![];
        let mut owner = FxHashMap::default();
        let mut by_label: FxHashMap<char, usize> = FxHashMap::default();

        for (y, text) in rows.iter().rev().enumerate() {
            for (x, ch) in text.as_ref().chars().enumerate() {
                let cell = Cell::new(x as i32, y as i32);
                match Glyph::from_char(ch) {
                    Glyph::Start => {
                        if let Some(first) = start {
                            return Err(BoardError::MultipleStarts { first, second: cell });
                        }
                        start = Some(cell);
                    }
                    Glyph::Goal => {
                        if let Some(first) = goal {
                            return Err(BoardError::MultipleGoals { first, second: cell });
                        }
                        goal = Some(cell);
                    }
                    Glyph::Segment(label) => {
                        let idx = *by_label.entry(label).or_insert_with(|| {
                            segments.push(Segment { label, cells: vec![] });
                            segments.len() - 1
                        });
                        segments[idx].cells.push(cell);
                        owner.insert(cell, idx);
                    }
                    Glyph::Empty => {}
                }
            }
        }

        let goal = goal.ok_or(BoardError::MissingGoal)?;
        let board = Board { width, height, start: None, goal, segments, owner };
        match start {
            Some(cell) => board.with_start(cell),
            None => Ok(board),
        }
    }

    /// Replace the start cell with an externally supplied one.
    ///
    /// The start must be inside the board, must not hold a segment, and
    /// must be standable in the all-flush configuration: on the bottom
    /// row, or on the goal itself.
    pub fn with_start(mut self, cell: Cell) -> Result<Board, BoardError> {
        if !self.contains(cell) {
            return Err(BoardError::StartOutOfBounds {
                cell,
                width: self.width,
                height: self.height,
            });
        }
        if let Some(idx) = self.segment_at(cell) {
            return Err(BoardError::StartOnSegment { cell, label: self.segments[idx].label });
        }
        if cell.y != 0 && cell != self.goal {
            return Err(BoardError::UnsupportedStart { cell });
        }
        self.start = Some(cell);
        Ok(self)
    }
}

impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.lines().map(|l| l.trim_end_matches('\r')).collect();
        Board::parse(&rows)
    }
}

// ── Queries ──

impl Board {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn start(&self) -> Option<Cell> {
        self.start
    }

    /// Start cell, or `MissingStart` if the board never got one.
    pub fn require_start(&self) -> Result<Cell, BoardError> {
        self.start.ok_or(BoardError::MissingStart)
    }

    pub fn goal(&self) -> Cell {
        self.goal
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Index of the segment occupying `cell`, if any.
    #[inline]
    pub fn segment_at(&self, cell: Cell) -> Option<usize> {
        self.owner.get(&cell).copied()
    }

    /// Is `cell` inside `[0, width) × [0, height)`?
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && (cell.x as usize) < self.width
            && (cell.y as usize) < self.height
    }

    /// Is column `x` inside the board? Gates horizontal movement.
    #[inline]
    pub fn in_columns(&self, x: i32) -> bool {
        x >= 0 && (x as usize) < self.width
    }

    /// What the input had at `cell` (start and goal included).
    pub fn glyph_at(&self, cell: Cell) -> Glyph {
        if self.start == Some(cell) {
            Glyph::Start
        } else if self.goal == cell {
            Glyph::Goal
        } else {
            match self.segment_at(cell) {
                Some(idx) => Glyph::Segment(self.segments[idx].label),
                None => Glyph::Empty,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[&str]) -> Board {
        Board::parse(rows).expect("valid board")
    }

    #[test]
    fn rows_are_reversed() {
        let b = board(&[".*", "@A"]);
        assert_eq!(b.width(), 2);
        assert_eq!(b.height(), 2);
        assert_eq!(b.start(), Some(Cell::new(0, 0)));
        assert_eq!(b.goal(), Cell::new(1, 1));
        assert_eq!(b.segment_at(Cell::new(1, 0)), Some(0));
        assert_eq!(b.segment_at(Cell::new(1, 1)), None);
    }

    #[test]
    fn same_label_is_same_segment() {
        let b = board(&["A.*", "AB.", "@BA"]);
        assert_eq!(b.segment_count(), 2);
        // bottom row scanned first: B at (1,0) is seen before A at (2,0)
        assert_eq!(b.segments()[0].label, 'B');
        assert_eq!(b.segments()[1].label, 'A');
        assert_eq!(b.segments()[1].cells.len(), 3);
        assert_eq!(b.segment_at(Cell::new(0, 2)), Some(1));
    }

    #[test]
    fn non_alphanumeric_cells_are_empty() {
        let b = board(&["#-*", "@ ."]);
        assert_eq!(b.segment_count(), 0);
        assert_eq!(b.glyph_at(Cell::new(0, 1)), Glyph::Empty);
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = Board::parse(&["..*", "@."]).unwrap_err();
        assert_eq!(err, BoardError::RaggedRow { row: 1, expected: 3, found: 2 });
    }

    #[test]
    fn empty_rejected() {
        let rows: [&str; 0] = [];
        assert_eq!(Board::parse(&rows).unwrap_err(), BoardError::Empty);
    }

    #[test]
    fn missing_goal_rejected() {
        assert_eq!(Board::parse(&["@.A"]).unwrap_err(), BoardError::MissingGoal);
    }

    #[test]
    fn duplicate_goal_rejected() {
        let err = Board::parse(&["*.*", "@.."]).unwrap_err();
        assert!(matches!(err, BoardError::MultipleGoals { .. }));
    }

    #[test]
    fn duplicate_start_rejected() {
        let err = Board::parse(&["..*", "@.@"]).unwrap_err();
        assert_eq!(
            err,
            BoardError::MultipleStarts { first: Cell::new(0, 0), second: Cell::new(2, 0) }
        );
    }

    #[test]
    fn start_is_optional_until_required() {
        let b = board(&["..*", "..A"]);
        assert_eq!(b.start(), None);
        assert_eq!(b.require_start(), Err(BoardError::MissingStart));

        let b = b.with_start(Cell::new(0, 0)).unwrap();
        assert_eq!(b.require_start(), Ok(Cell::new(0, 0)));
        assert_eq!(b.glyph_at(Cell::new(0, 0)), Glyph::Start);
    }

    #[test]
    fn external_start_validated() {
        let b = board(&["..*", "..A"]);
        assert!(matches!(
            b.clone().with_start(Cell::new(9, 0)),
            Err(BoardError::StartOutOfBounds { .. })
        ));
        assert!(matches!(
            b.clone().with_start(Cell::new(2, 0)),
            Err(BoardError::StartOnSegment { label: 'A', .. })
        ));
        assert_eq!(
            b.clone().with_start(Cell::new(0, 1)).unwrap_err(),
            BoardError::UnsupportedStart { cell: Cell::new(0, 1) }
        );
        // the goal is always an acceptable start
        assert!(b.with_start(Cell::new(2, 1)).is_ok());
    }

    #[test]
    fn floating_start_marker_rejected() {
        let err = Board::parse(&["@.*", "AAA"]).unwrap_err();
        assert_eq!(err, BoardError::UnsupportedStart { cell: Cell::new(0, 1) });
    }

    #[test]
    fn from_str_strips_carriage_returns() {
        let b: Board = ".*\r\n@A\r\n".parse().unwrap();
        assert_eq!(b.width(), 2);
        assert_eq!(b.height(), 2);
    }

    #[test]
    fn bounds() {
        let b = board(&["..*", "@.."]);
        assert!(b.contains(Cell::new(2, 1)));
        assert!(!b.contains(Cell::new(3, 1)));
        assert!(!b.contains(Cell::new(0, -1)));
        assert!(!b.contains(Cell::new(0, 2)));
        assert!(b.in_columns(0));
        assert!(!b.in_columns(-1));
        assert!(!b.in_columns(3));
    }
}
