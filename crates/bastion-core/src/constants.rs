//! Simulation constants and tuning parameters.

// --- Timing ---

/// Default scheduler interval (ms).
pub const DEFAULT_MS_PER_TICK: u64 = 16;

/// Ballistic age (ms) is divided by this before entering the trajectory
/// formula.
pub const BALLISTIC_TIME_SCALE: f64 = 10_000.0;

// --- Ballistics ---

/// A warhead is in range within this many cells of its target.
pub const WARHEAD_TRIGGER_RANGE: f64 = 1.0;

/// Piercing durability lost per point of victim hp.
pub const PIERCE_HP_DIVISOR: f64 = 20.0;

/// Extra damage per DAMAGE upgrade level.
pub const DAMAGE_UPGRADE_BONUS: f64 = 5.0;

// --- Towers ---

/// Extra turn step (radians per tick) per TURN_RATE upgrade level.
pub const TURN_RATE_UPGRADE_BONUS: f64 = 0.02;

/// Shots at queued targets run this many times faster than standard shots.
pub const QUEUED_SHOT_SPEEDUP: f64 = 3.0;

// --- Camera ---

/// Numerator of the idle camera smoothing factor (`rate / move duration`).
pub const CAMERA_SMOOTHING_RATE: f64 = 16.0;

// --- Tickers ---

pub const TICKER_DURATION_MS: f64 = 3000.0;

/// Total game time after which the projectile hint is shown.
pub const PROJECTILE_HINT_DELAY_MS: f64 = 10_000.0;

pub const AIM_HINT: &str = "Tap to aim";
pub const PROJECTILE_HINT: &str = "^^ Select projectile type";
pub const BASE_HIT_MESSAGE: &str = "BASE HIT";

// --- Players ---

/// Owner id of the human player's entities.
pub const PLAYER_ID: u32 = 1;

/// Owner id of hostile entities.
pub const ENEMY_ID: u32 = 2;
