pub mod engine;
mod tally;
pub mod types;

pub use engine::{compute_ranking, compute_standings};
pub use tally::build_tallies;
pub use types::{Tally, TallyMap};
