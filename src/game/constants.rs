//! Rule constants - all tunable values in one place

/// Controlled cells needed for an outright area-control win.
pub const CONTROL_WIN_COUNT: usize = 7;

/// Attack dice are uniform in `1..=DIE_SIDES`.
pub const DIE_SIDES: u32 = 10;

/// Attack thresholds clamp into `[THRESHOLD_MIN, THRESHOLD_MAX]`.
pub const THRESHOLD_MIN: u32 = 1;
pub const THRESHOLD_MAX: u32 = 10;

/// Starting deck composition: 4 Scout + 3 Sniper + 3 Sergeant.
pub const DECK_SIZE: usize = 10;
