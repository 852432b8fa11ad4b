//! Enemy catalog oracle.

use crate::state::{Combatant, RegionId};

use super::rng::{RngOracle, RollContext, compute_seed};

/// Read-only source of enemy definitions, grouped by region.
pub trait EnemyCatalog: Send + Sync {
    /// Full enemy pool of a region in catalog order. Empty for unknown regions.
    fn roster(&self, region: &RegionId) -> &[Combatant];

    /// Samples `count` enemies without replacement.
    ///
    /// Returns `min(count, roster size)` enemies at full HP. The returned
    /// order is the fight order. Uses a partial Fisher-Yates shuffle driven by
    /// `rng`, so identical seeds give identical samples.
    fn sample(
        &self,
        region: &RegionId,
        count: usize,
        rng: &dyn RngOracle,
        seed: u64,
        nonce: u64,
    ) -> Vec<Combatant> {
        let roster = self.roster(region);
        let take = count.min(roster.len());

        let mut order: Vec<usize> = (0..roster.len()).collect();
        for draw in 0..take {
            let roll_seed = compute_seed(seed, nonce, RollContext::EnemySample, draw as u32);
            let pick = draw + rng.index(roll_seed, order.len() - draw);
            order.swap(draw, pick);
        }

        order[..take]
            .iter()
            .map(|&index| {
                let mut enemy = roster[index].clone();
                enemy.restore_hp();
                enemy
            })
            .collect()
    }
}
