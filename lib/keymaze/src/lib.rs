mod error;
mod graph;
mod grid;
mod keyset;
mod search;

pub use error::Error;
pub use graph::{Edge, Graph};
pub use grid::{Grid, Tile};
pub use keyset::KeySet;
pub use search::{Bounded, Search, StateId, Step};

/// Minimum total steps for all bots to collect every key in `grid`,
/// or `None` when some key can never be collected.
pub fn solve(grid: &Grid) -> Result<Option<usize>, Error> {
    let graph = Graph::build(grid);
    Search::new(&graph).run()
}
