//! # EV Optimization Searches
//!
//! Exhaustive search over valid level-50 EV breakpoints with aggressive
//! pruning. The discrete space is tiny (at most 33 values per stat), so
//! every search here is a bounded grid walk: speed benchmarks are O(33),
//! survival benchmarks O(33^2) per HP candidate. Long searches check a
//! cooperative cancellation token at outer-loop boundaries.

pub mod bulk;
pub mod nature;
pub mod speed;
pub mod survival;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub use bulk::{optimize_bulk, spread_efficiency, suggest_spread, BulkSpread, Role, SpreadAudit};
pub use nature::{find_optimal_nature, Benchmarks, NatureChoice, RolePreference};
pub use speed::{outspeed_evs, speed_control_summary, team_speed_tiers, SpeedTier};
pub use survival::{
    design_spread_with_benchmarks, optimize_dual_survival, AttackProfile, DesignedSpread,
    DualSurvivalOutcome, SurvivalSpread,
};

/// Cooperative cancellation for long-running searches. Clone freely;
/// all clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
