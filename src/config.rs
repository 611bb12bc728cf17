//! # Engine Configuration
//!
//! VGC defaults and the level-50 EV breakpoint table. These are
//! compile-time constants; the regulation catalog (which *is* runtime
//! configuration) lives in `rules`.

/// Battle level for VGC formats.
pub const DEFAULT_LEVEL: u8 = 50;

/// Maximum EVs across all six stats.
pub const MAX_TOTAL_EVS: u16 = 508;

/// Maximum EVs in a single stat.
pub const MAX_STAT_EVS: u16 = 252;

/// Number of damage rolls (random factor 0.85..=1.00 in 1/100 steps).
pub const DAMAGE_ROLL_COUNT: usize = 16;

/// Valid EV breakpoints at level 50: 0, 4, 12, 20, ... 252.
///
/// The first stat point costs 4 EVs, each additional point 8 more. Any
/// value between breakpoints yields the same final stat as the lower
/// breakpoint and is wasted; search procedures enumerate only these.
pub const EV_BREAKPOINTS_LV50: [u16; 33] = [
    0, 4, 12, 20, 28, 36, 44, 52, 60, 68, 76, 84, 92, 100, 108, 116, 124,
    132, 140, 148, 156, 164, 172, 180, 188, 196, 204, 212, 220, 228, 236,
    244, 252,
];

/// Round EVs down to the nearest valid level-50 breakpoint, capped at 252.
///
/// # Examples
///
/// ```
/// use vgc_engine::config::normalize_evs;
///
/// assert_eq!(normalize_evs(4), 4);
/// assert_eq!(normalize_evs(8), 4);
/// assert_eq!(normalize_evs(16), 12);
/// assert_eq!(normalize_evs(252), 252);
/// assert_eq!(normalize_evs(300), 252);
/// ```
pub fn normalize_evs(evs: u16) -> u16 {
    let evs = evs.min(MAX_STAT_EVS);
    EV_BREAKPOINTS_LV50
        .iter()
        .rev()
        .copied()
        .find(|&bp| bp <= evs)
        .unwrap_or(0)
}
