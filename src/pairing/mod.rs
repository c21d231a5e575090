pub mod bye;
pub mod swiss;

pub use bye::{eligible_for_bye, select_bye};
pub use swiss::generate_pairings;
