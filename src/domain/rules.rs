/// Push rules, truth-table driven.
///
/// Pure functions over a [`Terrain`]. They encode "what may be pushed and
/// how far" without performing the push.
///
/// Let the climber stand at `(x, y)` with `z = h(x, y)`, support
/// `zp = h(x, y - 1)` and supporting segment `sp` (the owner of
/// `(x, y - 1)`, if any). Standing guarantees `z < zp`.
///
/// ### Front (segment at `(x, y)`)
/// ┌───────────────────────────────┬─────────┬──────────────────────────┐
/// │ Condition                      │ Allow?  │ Notes                    │
/// ├───────────────────────────────┼─────────┼──────────────────────────┤
/// │ no segment at (x, y)           │ DENY    │ nothing in front         │
/// │ segment == sp                  │ DENY    │ can't move own footing   │
/// │ z >= zp - 1                    │ DENY    │ no room to pull it out   │
/// │ Otherwise                      │ [0, zp-1] │ at y = 0: [0, MAX]     │
/// └───────────────────────────────┴─────────┴──────────────────────────┘
///
/// ### Left / Right (segment at `(x ∓ 1, y)`)
/// ┌───────────────────────────────┬─────────┬──────────────────────────┐
/// │ Condition                      │ Allow?  │ Notes                    │
/// ├───────────────────────────────┼─────────┼──────────────────────────┤
/// │ no segment beside              │ DENY    │                          │
/// │ segment == sp                  │ DENY    │ can't move own footing   │
/// │ h(side) <= z                   │ DENY    │ nothing to grab          │
/// │ Otherwise                      │ [z+1, MAX] │                       │
/// └───────────────────────────────┴─────────┴──────────────────────────┘
///
/// The front bound never exceeds MAX: the deepest support is the ground,
/// whose height is MAX + 1.

use std::ops::RangeInclusive;

use smallvec::SmallVec;

use super::board::Cell;
use super::physics::Terrain;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PushSide {
    Front,
    Left,
    Right,
}

/// One pushable segment and the depths a single push can leave it at.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PushOption {
    pub segment: usize,
    pub side: PushSide,
    pub min: u8,
    pub max: u8,
}

impl PushOption {
    pub fn depths(&self) -> RangeInclusive<u8> {
        self.min..=self.max
    }
}

pub type PushOptions = SmallVec<[PushOption; 3]>;

/// Push options available while standing at `at`. See truth tables above.
/// Listed front, left, right.
pub fn push_options(terrain: &Terrain, at: Cell) -> PushOptions {
    let board = terrain.board();
    let max_depth = i32::from(terrain.max_depth());
    let z = terrain.height_at(at);
    let below = at.offset(0, -1);
    let zp = terrain.height_at(below);
    let support = board.segment_at(below);
    debug_assert!(z < zp, "climber at {at} is not above its support ({z} >= {zp})");

    let mut out = PushOptions::new();

    if let Some(seg) = board.segment_at(at) {
        if Some(seg) != support && z < zp - 1 {
            out.push(PushOption {
                segment: seg,
                side: PushSide::Front,
                min: 0,
                max: depth_u8((zp - 1).min(max_depth)),
            });
        }
    }

    for (dx, side) in [(-1, PushSide::Left), (1, PushSide::Right)] {
        let beside = at.offset(dx, 0);
        let Some(seg) = board.segment_at(beside) else { continue };
        if Some(seg) != support && z < terrain.height_at(beside) {
            out.push(PushOption {
                segment: seg,
                side,
                min: depth_u8(z + 1),
                max: depth_u8(max_depth),
            });
        }
    }

    out
}

#[inline]
fn depth_u8(z: i32) -> u8 {
    debug_assert!((0..=i32::from(u8::MAX)).contains(&z));
    z as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::board::Board;
    use crate::domain::depths::{Depths, DEFAULT_MAX_DEPTH};

    fn options(rows: &[&str], depths: &[u8], at: (i32, i32)) -> Vec<PushOption> {
        let board = Board::parse(rows).expect("valid board");
        let depths = Depths::from(depths);
        let terrain = Terrain::new(&board, &depths, DEFAULT_MAX_DEPTH);
        push_options(&terrain, Cell::new(at.0, at.1)).into_vec()
    }

    #[test]
    fn front_push_on_bottom_row_spans_full_range() {
        let opts = options(&[".*", "@A"], &[0], (1, 0));
        assert_eq!(
            opts,
            vec![PushOption { segment: 0, side: PushSide::Front, min: 0, max: 3 }]
        );
    }

    #[test]
    fn front_push_capped_below_support() {
        // standing at (1,1) on B (depth 3) in front of A
        let opts = options(&[".A*", "@B."], &[3, 0], (1, 1));
        assert_eq!(
            opts,
            vec![PushOption { segment: 1, side: PushSide::Front, min: 0, max: 2 }]
        );
    }

    #[test]
    fn front_push_needs_a_gap() {
        // A at depth 1 in front, support B at depth 2: z == zp - 1
        let opts = options(&[".A*", "@B."], &[2, 1], (1, 1));
        assert!(opts.iter().all(|o| o.side != PushSide::Front));
    }

    #[test]
    fn side_push_needs_the_block_to_stick_out() {
        assert!(options(&[".*", "@A"], &[0], (0, 0)).is_empty());

        let opts = options(&[".*", "@A"], &[2], (0, 0));
        assert_eq!(
            opts,
            vec![PushOption { segment: 0, side: PushSide::Right, min: 1, max: 3 }]
        );
    }

    #[test]
    fn left_and_right_both_qualify() {
        let opts = options(&["..*", "A@B"], &[1, 2], (1, 0));
        let sides: Vec<PushSide> = opts.iter().map(|o| o.side).collect();
        assert_eq!(sides, vec![PushSide::Left, PushSide::Right]);
    }

    #[test]
    fn supporting_segment_is_never_offered() {
        // A is both under the climber and beside it
        let opts = options(&["A.*", "AA."], &[2], (1, 1));
        assert!(opts.is_empty());
    }

    #[test]
    fn ranges_stay_within_bounds() {
        let opts = options(&["..*", "A@B"], &[3, 3], (1, 0));
        for o in opts {
            assert!(o.min <= o.max);
            assert!(o.max <= DEFAULT_MAX_DEPTH);
            assert_eq!(o.depths().count(), usize::from(o.max - o.min + 1));
        }
    }
}
