/// Events emitted while the solver runs.
/// The presentation layer consumes these for the verbose trace.

use rustc_hash::FxHashSet;

use crate::domain::board::Cell;
use crate::domain::depths::Depths;

#[derive(Clone, Debug)]
pub enum SearchEvent<'a> {
    /// A new (configuration, entry) pair was expanded into a reachable set.
    Expanded {
        moves: usize,
        depths: &'a Depths,
        entry: Cell,
        reach: &'a FxHashSet<Cell>,
    },
    /// The entry was already inside a recorded reachable set.
    Duplicate { depths: &'a Depths, entry: Cell },
    /// The goal showed up; the search stops.
    GoalReached { moves: usize, depths: &'a Depths },
}
