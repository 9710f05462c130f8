/// Presentation layer: board and checkpoint rendering.
///
/// How it works:
///   1. `glyph_at` decides one character per cell for an overlay
///   2. `render_rows` lays those out top row first, as plain strings
///   3. `Renderer` writes the same rows with crossterm colors, batching
///      commands with `queue!` and flushing once per board
///
/// One air row above the board is always drawn so a climber standing on
/// the top row stays visible.

use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};

use crate::domain::board::{Board, Cell};
use crate::domain::depths::Depths;
use crate::domain::glyph::Glyph;

/// What to draw on top of the static board.
#[derive(Clone, Copy, Debug)]
pub enum Overlay<'a> {
    /// Segment labels, with the board's own start marker.
    Labels,
    /// Per-cell depth digits and the climber at `avatar`.
    Depths { depths: &'a Depths, avatar: Cell },
}

// ── Glyph selection ──

/// Character for one cell under `overlay`.
pub fn glyph_at(board: &Board, overlay: Overlay, cell: Cell) -> char {
    match overlay {
        Overlay::Labels => board.glyph_at(cell).to_char(),
        Overlay::Depths { depths, avatar } => {
            if cell == avatar {
                Glyph::START
            } else if cell == board.goal() {
                Glyph::GOAL
            } else {
                match board.segment_at(cell) {
                    Some(idx) => depth_char(depths[idx]),
                    None => Glyph::EMPTY,
                }
            }
        }
    }
}

/// Single-character depth: 0-9, then a-z, then '+'.
fn depth_char(depth: u8) -> char {
    char::from_digit(u32::from(depth), 36).unwrap_or('+')
}

/// Rows from the air row above the board down to row 0.
pub fn render_rows(board: &Board, overlay: Overlay) -> Vec<String> {
    (0..=board.height() as i32)
        .rev()
        .map(|y| {
            (0..board.width() as i32)
                .map(|x| glyph_at(board, overlay, Cell::new(x, y)))
                .collect()
        })
        .collect()
}

// ── Colors ──

const SEGMENT_PALETTE: [Color; 6] = [
    Color::Cyan,
    Color::Green,
    Color::Yellow,
    Color::Magenta,
    Color::Blue,
    Color::DarkCyan,
];

fn depth_color(depth: u8) -> Color {
    match depth {
        0 => Color::DarkGrey,
        1 => Color::Cyan,
        2 => Color::Green,
        3 => Color::Yellow,
        _ => Color::Magenta,
    }
}

fn cell_color(board: &Board, overlay: Overlay, cell: Cell) -> Color {
    let is_avatar = match overlay {
        Overlay::Labels => board.start() == Some(cell),
        Overlay::Depths { avatar, .. } => avatar == cell,
    };
    if is_avatar {
        return Color::White;
    }
    if cell == board.goal() {
        return Color::Red;
    }
    match (board.segment_at(cell), overlay) {
        (Some(idx), Overlay::Labels) => SEGMENT_PALETTE[idx % SEGMENT_PALETTE.len()],
        (Some(idx), Overlay::Depths { depths, .. }) => depth_color(depths[idx]),
        (None, _) => Color::DarkGrey,
    }
}

// ── Writer ──

pub struct Renderer<W: Write> {
    out: W,
    color: bool,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, color: bool) -> Self {
        Renderer { out, color }
    }

    /// Draw one board, indented by a single space like the move log.
    pub fn draw(&mut self, board: &Board, overlay: Overlay) -> io::Result<()> {
        if !self.color {
            for row in render_rows(board, overlay) {
                writeln!(self.out, " {row}")?;
            }
            return self.out.flush();
        }

        for y in (0..=board.height() as i32).rev() {
            queue!(self.out, Print(' '))?;
            for x in 0..board.width() as i32 {
                let cell = Cell::new(x, y);
                let ch = glyph_at(board, overlay, cell);
                let color = cell_color(board, overlay, cell);
                if ch == Glyph::START {
                    queue!(
                        self.out,
                        SetAttribute(Attribute::Bold),
                        SetForegroundColor(color),
                        Print(ch),
                        SetAttribute(Attribute::Reset)
                    )?;
                } else {
                    queue!(self.out, SetForegroundColor(color), Print(ch))?;
                }
            }
            queue!(self.out, ResetColor, Print('\n'))?;
        }
        self.out.flush()
    }

    /// Plain text line.
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(rows: &[&str]) -> Board {
        Board::parse(rows).expect("valid board")
    }

    #[test]
    fn labels_include_air_row() {
        let b = board_from(&[".*", "@A"]);
        assert_eq!(render_rows(&b, Overlay::Labels), vec!["..", ".*", "@A"]);
    }

    #[test]
    fn depth_overlay_moves_the_climber() {
        let b = board_from(&["..*", "@AB"]);
        let d = Depths::from(vec![2, 0]);
        let rows = render_rows(&b, Overlay::Depths { depths: &d, avatar: Cell::new(1, 1) });
        assert_eq!(rows, vec!["...", ".@*", ".20"]);
    }

    #[test]
    fn large_depths_stay_single_width() {
        assert_eq!(depth_char(9), '9');
        assert_eq!(depth_char(10), 'a');
        assert_eq!(depth_char(200), '+');
    }

    #[test]
    fn plain_writer_matches_rows() {
        let b = board_from(&[".*", "@A"]);
        let mut r = Renderer::new(Vec::new(), false);
        r.draw(&b, Overlay::Labels).unwrap();
        let text = String::from_utf8(r.into_inner()).unwrap();
        assert_eq!(text, " ..\n .*\n @A\n");
    }

    #[test]
    fn color_writer_emits_every_glyph() {
        let b = board_from(&[".*", "@A"]);
        let mut r = Renderer::new(Vec::new(), true);
        r.draw(&b, Overlay::Labels).unwrap();
        let text = String::from_utf8(r.into_inner()).unwrap();
        for ch in ['@', '*', 'A'] {
            assert!(text.contains(ch));
        }
        assert!(text.contains('\x1b'));
    }
}
