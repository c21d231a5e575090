use std::collections::HashMap;

use crate::domain::PlayerId;

pub type TallyMap = HashMap<PlayerId, Tally>;

/// Match-derived aggregate for one player, built in a single pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub wins: u32,
    pub matches: u32,
    /// One entry per non-bye match, so repeat opponents appear repeatedly
    pub opponents: Vec<PlayerId>,
}

impl Tally {
    pub fn record_win(&mut self) {
        self.wins += 1;
    }

    pub fn record_appearance(&mut self, opponent: Option<PlayerId>) {
        self.matches += 1;
        if let Some(opponent) = opponent {
            self.opponents.push(opponent);
        }
    }
}
