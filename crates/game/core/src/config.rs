use crate::state::RegionId;

/// Inclusive range of gold granted by a reward event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardRange {
    pub min: u32,
    pub max: u32,
}

impl RewardRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Returns the range with `min <= max`, swapping misconfigured bounds.
    pub const fn normalized(self) -> Self {
        if self.min <= self.max {
            self
        } else {
            Self {
                min: self.max,
                max: self.min,
            }
        }
    }
}

/// Combat configuration: region roster, run sizes and economy tuning.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Ordered region roster. A run visits a prefix of this list.
    pub regions: Vec<RegionId>,

    /// Regions per run when the caller does not ask for a specific count.
    pub regions_per_run: u32,

    /// Enemies per region when the caller does not ask for a specific count.
    pub enemies_per_region: u32,

    /// Gold credited for each defeated enemy.
    pub kill_reward: RewardRange,

    /// Gold credited once when every region of a run is cleared.
    pub clear_bonus: RewardRange,

    /// Balance reported for players the ledger has never seen.
    pub starting_balance: u64,
}

impl CombatConfig {
    // ===== hard bounds on run sizes =====
    pub const MIN_REGIONS: u32 = 1;
    pub const MAX_REGIONS: u32 = 5;
    pub const MIN_ENEMIES_PER_REGION: u32 = 1;
    pub const MAX_ENEMIES_PER_REGION: u32 = 20;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_REGIONS_PER_RUN: u32 = 3;
    pub const DEFAULT_ENEMIES_PER_REGION: u32 = 3;
    pub const DEFAULT_KILL_REWARD: RewardRange = RewardRange::new(10, 25);
    pub const DEFAULT_CLEAR_BONUS: RewardRange = RewardRange::new(50, 100);
    pub const DEFAULT_STARTING_BALANCE: u64 = 100;

    pub fn new() -> Self {
        Self {
            regions: ["meadow", "forest", "mountain", "ruins", "volcano"]
                .into_iter()
                .map(RegionId::from)
                .collect(),
            regions_per_run: Self::DEFAULT_REGIONS_PER_RUN,
            enemies_per_region: Self::DEFAULT_ENEMIES_PER_REGION,
            kill_reward: Self::DEFAULT_KILL_REWARD,
            clear_bonus: Self::DEFAULT_CLEAR_BONUS,
            starting_balance: Self::DEFAULT_STARTING_BALANCE,
        }
    }

    pub fn with_regions(mut self, regions: impl IntoIterator<Item = RegionId>) -> Self {
        self.regions = regions.into_iter().collect();
        self
    }

    /// Clamps a requested region count to `[MIN_REGIONS, MAX_REGIONS]`.
    pub fn clamp_regions(requested: u32) -> u32 {
        requested.clamp(Self::MIN_REGIONS, Self::MAX_REGIONS)
    }

    /// Clamps a requested enemy count to
    /// `[MIN_ENEMIES_PER_REGION, MAX_ENEMIES_PER_REGION]`.
    pub fn clamp_enemies(requested: u32) -> u32 {
        requested.clamp(Self::MIN_ENEMIES_PER_REGION, Self::MAX_ENEMIES_PER_REGION)
    }

    /// Picks the regions of a run: the first `count` entries of the roster
    /// after clamping. Falls back to `regions_per_run` when `count` is `None`.
    pub fn plan_regions(&self, count: Option<u32>) -> Vec<RegionId> {
        let count = Self::clamp_regions(count.unwrap_or(self.regions_per_run));
        self.regions.iter().take(count as usize).cloned().collect()
    }

    /// Resolves the enemy count of a run, clamped to the configured bounds.
    pub fn plan_enemies(&self, count: Option<u32>) -> u32 {
        Self::clamp_enemies(count.unwrap_or(self.enemies_per_region))
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
