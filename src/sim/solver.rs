/// Breadth-first solver over (depth configuration, climber cell).
///
/// ## Search loop
///
///   1. Pop the node with the fewest moves (ties: insertion order).
///   2. If a reachable set already recorded for its configuration holds
///      the entry cell, drop it: that state was explored before.
///   3. Expand the entry cell into its reachable set. Goal inside → done.
///   4. Record the set, then for every reachable cell, every push option
///      there, and every depth in the option's range, queue the successor
///      configuration with the push cell as its entry.
///
/// ## Explored table
///
/// `Depths → [reachable sets]`. One configuration can own several
/// disjoint sets (entered from cells that cannot reach each other). Sets
/// are never modified after recording.
///
/// ## Nodes
///
/// Nodes live in an arena (`Vec<Node>`) and point at their parent by
/// index; the solution path is the parent chain of the accepted node,
/// followed by the goal cell under the accepted configuration.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;

use log::{debug, trace};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::domain::board::{Board, BoardError, Cell};
use crate::domain::depths::{Depths, DEFAULT_MAX_DEPTH};
use crate::domain::physics::{reachable, Terrain};
use crate::domain::rules::push_options;
use crate::sim::event::SearchEvent;

// ══════════════════════════════════════════════════════════════
// Public types
// ══════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolverOptions {
    /// Deepest a segment may be pulled out.
    pub max_depth: u8,
    /// Stop after this many expansions. `None` = exhaustive.
    pub max_states: Option<usize>,
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions { max_depth: DEFAULT_MAX_DEPTH, max_states: None }
    }
}

/// One state on the solution path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Checkpoint {
    pub moves: usize,
    pub depths: Depths,
    pub cell: Cell,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Path from the start state to the goal, one checkpoint per push plus
    /// the final walk onto the goal.
    Solved(Vec<Checkpoint>),
    /// Every reachable state was explored without seeing the goal.
    Unsolvable,
    /// `max_states` expansions were spent first.
    LimitReached,
}

impl Outcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, Outcome::Solved(_))
    }

    /// Solution path; empty unless solved.
    pub fn steps(&self) -> &[Checkpoint] {
        match self {
            Outcome::Solved(steps) => steps,
            _ => &[],
        }
    }

    pub fn into_steps(self) -> Vec<Checkpoint> {
        match self {
            Outcome::Solved(steps) => steps,
            _ => vec![],
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub expanded: usize,
    pub duplicates: usize,
    pub enqueued: usize,
    pub configurations: usize,
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "expanded: {}, duplicates: {}, enqueued: {}, configurations: {}",
            self.expanded, self.duplicates, self.enqueued, self.configurations
        )
    }
}

// ══════════════════════════════════════════════════════════════
// Explored table
// ══════════════════════════════════════════════════════════════

#[derive(Debug, Default)]
pub struct Explored {
    table: FxHashMap<Depths, Vec<FxHashSet<Cell>>>,
}

impl Explored {
    /// Has `cell` been reached under `depths` already?
    pub fn contains(&self, depths: &Depths, cell: Cell) -> bool {
        self.table
            .get(depths)
            .map_or(false, |sets| sets.iter().any(|s| s.contains(&cell)))
    }

    /// Recorded reachable sets for `depths`, oldest first.
    pub fn sets(&self, depths: &Depths) -> &[FxHashSet<Cell>] {
        self.table.get(depths).map_or(&[], |sets| sets.as_slice())
    }

    pub fn record(&mut self, depths: Depths, reach: FxHashSet<Cell>) {
        self.table.entry(depths).or_default().push(reach);
    }

    pub fn configurations(&self) -> usize {
        self.table.len()
    }
}

// ══════════════════════════════════════════════════════════════
// Solver
// ══════════════════════════════════════════════════════════════

struct Node {
    moves: usize,
    depths: Depths,
    cell: Cell,
    parent: Option<usize>,
}

pub struct Solver<'a> {
    board: &'a Board,
    options: SolverOptions,
    nodes: Vec<Node>,
    queue: BinaryHeap<Reverse<(usize, usize, usize)>>,
    seq: usize,
    explored: Explored,
    stats: SearchStats,
}

impl<'a> Solver<'a> {
    /// Prepare a search from the all-flush configuration at the board's
    /// start cell.
    pub fn new(board: &'a Board, options: SolverOptions) -> Result<Self, BoardError> {
        let start = board.require_start()?;
        let mut solver = Solver {
            board,
            options,
            nodes: vec![],
            queue: BinaryHeap::new(),
            seq: 0,
            explored: Explored::default(),
            stats: SearchStats::default(),
        };
        solver.enqueue(0, Depths::zeros(board.segment_count()), start, None);
        Ok(solver)
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn explored(&self) -> &Explored {
        &self.explored
    }

    pub fn run(&mut self) -> Outcome {
        self.run_with(|_| {})
    }

    /// Run to completion, reporting each step to `observer`.
    pub fn run_with<F>(&mut self, mut observer: F) -> Outcome
    where
        F: FnMut(&SearchEvent),
    {
        let board = self.board;
        let goal = board.goal();
        let max_depth = self.options.max_depth;
        debug!(
            "solving {}x{} board, {} segments, max depth {}",
            board.width(),
            board.height(),
            board.segment_count(),
            max_depth
        );

        while let Some(Reverse((_, _, idx))) = self.queue.pop() {
            let depths = self.nodes[idx].depths.clone();
            let entry = self.nodes[idx].cell;
            let moves = self.nodes[idx].moves + 1;

            if self.explored.contains(&depths, entry) {
                self.stats.duplicates += 1;
                observer(&SearchEvent::Duplicate { depths: &depths, entry });
                continue;
            }
            if entry == goal {
                observer(&SearchEvent::GoalReached { moves, depths: &depths });
                return self.finish(idx, moves);
            }
            if let Some(limit) = self.options.max_states {
                if self.stats.expanded >= limit {
                    debug!("state limit {limit} reached ({})", self.stats);
                    return Outcome::LimitReached;
                }
            }

            let terrain = Terrain::new(board, &depths, max_depth);
            let reach = reachable(&terrain, entry);
            self.stats.expanded += 1;
            trace!("move {moves}: {depths} from {entry}, {} cells", reach.len());
            observer(&SearchEvent::Expanded { moves, depths: &depths, entry, reach: &reach });

            if reach.contains(&goal) {
                observer(&SearchEvent::GoalReached { moves, depths: &depths });
                return self.finish(idx, moves);
            }

            let mut cells: Vec<Cell> = reach.iter().copied().collect();
            cells.sort_unstable();
            for &cell in &cells {
                for option in push_options(&terrain, cell) {
                    let current = depths[option.segment];
                    for depth in option.depths() {
                        if depth == current {
                            continue;
                        }
                        let next = depths.with(option.segment, depth);
                        if self.explored.contains(&next, cell) {
                            continue;
                        }
                        self.enqueue(moves, next, cell, Some(idx));
                    }
                }
            }

            self.explored.record(depths, reach);
            self.stats.configurations = self.explored.configurations();
        }

        debug!("search exhausted ({})", self.stats);
        Outcome::Unsolvable
    }

    fn enqueue(&mut self, moves: usize, depths: Depths, cell: Cell, parent: Option<usize>) {
        let idx = self.nodes.len();
        self.nodes.push(Node { moves, depths, cell, parent });
        self.queue.push(Reverse((moves, self.seq, idx)));
        self.seq += 1;
        self.stats.enqueued += 1;
    }

    /// Path to the accepted node, closed by a goal checkpoint unless the
    /// climber entered on the goal itself.
    fn finish(&self, idx: usize, moves: usize) -> Outcome {
        let mut path = self.path_to(idx);
        let accepted = &self.nodes[idx];
        let goal = self.board.goal();
        if accepted.cell != goal {
            path.push(Checkpoint { moves, depths: accepted.depths.clone(), cell: goal });
        }
        debug!("solved in {} steps ({})", path.len(), self.stats);
        Outcome::Solved(path)
    }

    /// Walk parents back to the start node, oldest first.
    fn path_to(&self, idx: usize) -> Vec<Checkpoint> {
        let mut path = vec![];
        let mut cursor = Some(idx);
        while let Some(i) = cursor {
            let node = &self.nodes[i];
            path.push(Checkpoint { moves: node.moves, depths: node.depths.clone(), cell: node.cell });
            cursor = node.parent;
        }
        path.reverse();
        path
    }
}

// ══════════════════════════════════════════════════════════════
// Entry points
// ══════════════════════════════════════════════════════════════

/// Solve with the standard rules. Empty when unsolvable.
pub fn solve(board: &Board) -> Result<Vec<Checkpoint>, BoardError> {
    solve_with(board, &SolverOptions::default())
}

/// Solve with explicit options. Empty when unsolvable or out of budget.
pub fn solve_with(board: &Board, options: &SolverOptions) -> Result<Vec<Checkpoint>, BoardError> {
    let mut solver = Solver::new(board, options.clone())?;
    Ok(solver.run().into_steps())
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
