/// Terrain heights and climber reachability.
///
/// ## Height model
///
/// Every cell has a height: how far its block sticks out of the wall.
///   - cell owned by a segment → that segment's current depth
///   - empty cell, or outside the board with `y >= 0` → 0 (open air)
///   - any `y < 0` → `ground()`, one above the maximum legal depth
///
/// The ground sentinel is impassable: nothing can be pushed past it and no
/// fall goes through it.
///
/// ## Standing
///
/// The climber at `(x, y)` occupies the space in front of block `(x, y)`
/// and rests on block `(x, y - 1)`. Standing requires
/// `height(x, y) < height(x, y - 1)`. Every move below lands only on cells
/// satisfying this, and the solver only enters cells that did.
///
/// ## Moves (from `(x0, y0)`, `z0 = h(x0, y0)`, `zp = h(x0, y0 - 1)`)
///
/// ┌────────────┬──────────────────────────────┬──────────────────────────────────────┐
/// │ Move       │ Destination                  │ Admissible when                      │
/// ├────────────┼──────────────────────────────┼──────────────────────────────────────┤
/// │ Jump up    │ (x0+dx, y0+1), dx ∈ {-1,0,1} │ h(x0,y0+1) < zp, z < zp,             │
/// │            │                              │ max(z, z0-1) < h(x0+dx, y0)          │
/// │ Long jump  │ (x0+2dx, y0+1), dx ∈ {-1,1}  │ h(x0+dx,y0+1) < zp, z < zp,          │
/// │            │                              │ max(z, z0) < h(x0+2dx, y0)           │
/// │ Long level │ (x0+2dx, y0)   (if no jump)  │ h(x0+dx,y0+1) < zp, z < zp,          │
/// │            │                              │ h(x0+2dx,y0+1) < zp,                 │
/// │            │                              │ max(z, z0) < h(x0+2dx, y0-1)         │
/// │ Walk/fall  │ (x0+dx, y1),   dx ∈ {-1,1}   │ z = h(x0+dx,y0) < zp; scan down from │
/// │            │                              │ y0 to the first y1 with              │
/// │            │                              │ max(z, z0) < h(x0+dx, y1-1)          │
/// │ Drop back  │ (x0+dx, y1),   dx ∈ {-1,0,1} │ running max z from max(zp, h(x0+dx,  │
/// │            │                              │ y0)); first y1 with z < h(x0+dx,y1-1)│
/// └────────────┴──────────────────────────────┴──────────────────────────────────────┘
///
/// `z` is the height of the destination cell unless noted. Destinations
/// outside `[0, width)` are discarded; rows need no bound because the
/// ground sentinel stops every downward scan at row 0 and nothing above
/// the board has height to climb on.

use rustc_hash::FxHashSet;

use super::board::{Board, Cell};
use super::depths::Depths;

// ══════════════════════════════════════════════════════════════
// Layer 1: Terrain (board + depths, no climber)
// ══════════════════════════════════════════════════════════════

/// Height queries over one board under one depth configuration.
#[derive(Clone, Copy, Debug)]
pub struct Terrain<'a> {
    board: &'a Board,
    depths: &'a Depths,
    max_depth: u8,
}

impl<'a> Terrain<'a> {
    pub fn new(board: &'a Board, depths: &'a Depths, max_depth: u8) -> Self {
        debug_assert_eq!(board.segment_count(), depths.len());
        debug_assert!(depths.deepest() <= max_depth);
        Terrain { board, depths, max_depth }
    }

    pub fn board(&self) -> &'a Board {
        self.board
    }

    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    /// Height of the solid ground below row 0. Impassable.
    #[inline]
    pub fn ground(&self) -> i32 {
        i32::from(self.max_depth) + 1
    }

    /// Effective height at (x, y).
    #[inline]
    pub fn height(&self, x: i32, y: i32) -> i32 {
        if y < 0 {
            return self.ground();
        }
        match self.board.segment_at(Cell::new(x, y)) {
            Some(idx) => i32::from(self.depths[idx]),
            None => 0,
        }
    }

    #[inline]
    pub fn height_at(&self, cell: Cell) -> i32 {
        self.height(cell.x, cell.y)
    }

    /// Can the climber rest at `cell`? (block below sticks out further)
    #[inline]
    pub fn can_stand(&self, cell: Cell) -> bool {
        self.height(cell.x, cell.y) < self.height(cell.x, cell.y - 1)
    }
}

// ══════════════════════════════════════════════════════════════
// Layer 2: Reachability (closure of walk / jump / fall)
// ══════════════════════════════════════════════════════════════

/// Every cell the climber can reach from `from` without pushing anything.
///
/// `from` must itself be standable. The result always contains `from`.
pub fn reachable(terrain: &Terrain, from: Cell) -> FxHashSet<Cell> {
    let mut seen = FxHashSet::default();
    let mut stack = vec![from];
    let mut next = Vec::with_capacity(12);

    while let Some(cell) = stack.pop() {
        if !terrain.board().in_columns(cell.x) || !seen.insert(cell) {
            continue;
        }
        next.clear();
        moves_from(terrain, cell, &mut next);
        stack.extend(next.iter().copied().filter(|c| !seen.contains(c)));
    }

    seen
}

/// Single-step destinations from `at`, in rule order. May include cells
/// outside the board's columns; the caller filters those.
pub fn moves_from(terrain: &Terrain, at: Cell, out: &mut Vec<Cell>) {
    let h = |x: i32, y: i32| terrain.height(x, y);
    let Cell { x: x0, y: y0 } = at;
    let z0 = h(x0, y0);
    let zp = h(x0, y0 - 1);
    debug_assert!(z0 < zp, "climber at {at} is not above its support ({z0} >= {zp})");

    // Jump up: straight or diagonal, needs headroom above.
    if h(x0, y0 + 1) < zp {
        for dx in [-1, 0, 1] {
            let x1 = x0 + dx;
            let z = h(x1, y0 + 1);
            if z < zp && z.max(z0 - 1) < h(x1, y0) {
                out.push(Cell::new(x1, y0 + 1));
            }
        }
    }

    // Long jump over the neighbouring column.
    for dx in [-1, 1] {
        let x1 = x0 + dx;
        if h(x1, y0 + 1) >= zp {
            continue;
        }
        let x2 = x1 + dx;
        let z = h(x2, y0 + 1);
        if z >= zp {
            continue;
        }
        if z.max(z0) < h(x2, y0) {
            out.push(Cell::new(x2, y0 + 1));
            continue;
        }
        let z = h(x2, y0);
        if z < zp && z.max(z0) < h(x2, y0 - 1) {
            out.push(Cell::new(x2, y0));
        }
    }

    // Walk sideways, falling until something sticks out far enough.
    for dx in [-1, 1] {
        let x1 = x0 + dx;
        let z = h(x1, y0);
        if z >= zp {
            continue;
        }
        let floor = z.max(z0);
        if let Some(y1) = (0..=y0).rev().find(|&y1| floor < h(x1, y1 - 1)) {
            out.push(Cell::new(x1, y1));
        }
    }

    // Drop back off the support onto a block further out below.
    for dx in [-1, 0, 1] {
        let x1 = x0 + dx;
        let mut z = zp.max(h(x1, y0));
        for y1 in (0..=y0).rev() {
            let z1 = h(x1, y1 - 1);
            if z < z1 {
                out.push(Cell::new(x1, y1));
                break;
            }
            z = z.max(z1);
        }
    }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
