//! Simulation constants and tuning defaults.
//!
//! Everything here is a default: encounter configuration can override the
//! wave and archetype values.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Slack used when comparing accumulated seconds against a threshold.
pub const TIME_EPSILON: f64 = 1e-6;

// --- Waves ---

/// Enemies per wave, one entry consumed per wave.
pub const DEFAULT_WAVE_QUOTAS: [u32; 5] = [10, 15, 20, 25, 30];

/// Delay between a wave starting and its first spawn (seconds).
pub const INITIAL_SPAWN_DELAY_SECS: f64 = 3.0;

/// Spawn interval for the first wave (seconds).
pub const INITIAL_SPAWN_INTERVAL_SECS: f64 = 2.0;

/// Floor the spawn interval never drops below (seconds).
pub const MIN_SPAWN_INTERVAL_SECS: f64 = 0.5;

/// How much the spawn interval shrinks after each cooldown (seconds).
pub const SPAWN_INTERVAL_DECREMENT_SECS: f64 = 0.2;

/// Pause between a cleared wave and the next one (seconds).
pub const WAVE_COOLDOWN_SECS: f64 = 15.0;

/// Score awarded per enemy kill.
pub const SCORE_PER_KILL: u32 = 100;

// --- Enemies ---

/// Time a dead enemy stays in the world for its death animation (seconds).
pub const CORPSE_GRACE_SECS: f64 = 2.0;

/// Default enemy hit points.
pub const ENEMY_MAX_HEALTH: u32 = 100;

/// Distance at which an enemy can start an attack (meters).
pub const ATTACK_RANGE: f64 = 2.0;

/// Distance beyond which a running attack is abandoned (meters).
pub const ATTACK_INTERRUPT_RANGE: f64 = 2.5;

/// Damage dealt by each landed strike.
pub const ATTACK_DAMAGE: u32 = 5;

/// Cooldown after a completed attack cycle (seconds).
pub const ATTACK_COOLDOWN_SECS: f64 = 2.0;

/// Share of the full cooldown applied after an interrupted attack.
pub const INTERRUPT_COOLDOWN_FRACTION: f64 = 0.5;

/// Length of one attack animation (seconds).
pub const ATTACK_DURATION_SECS: f64 = 1.2;

/// Offsets into the attack animation at which damage is dealt (seconds).
pub const ATTACK_DAMAGE_INSTANTS_SECS: [f64; 2] = [0.5, 0.9];

/// Hard limit on damage instants per attack cycle.
pub const MAX_DAMAGE_INSTANTS: usize = 32;

/// Speed below which an enemy counts as settled (m/s).
pub const SETTLE_SPEED: f64 = 0.1;

/// Walking speed (m/s).
pub const ENEMY_MOVE_SPEED: f64 = 3.5;

/// Acceleration toward the desired walking velocity (m/s²).
pub const ENEMY_ACCELERATION: f64 = 12.0;

/// Facing blend rate (1/s). Matches a per-frame lerp factor of `dt * rate`.
pub const ENEMY_ROTATION_SPEED: f64 = 10.0;

/// Minimum time between two path recomputations (seconds).
pub const PATH_REFRESH_SECS: f64 = 0.25;

/// How far inside attack range the navigator stops (meters).
pub const STOPPING_MARGIN: f64 = 0.25;

// --- Target and pickups ---

/// Default player hit points.
pub const TARGET_MAX_HEALTH: u32 = 100;

/// Minimum pickups placed after each cleared wave.
pub const PICKUPS_MIN_PER_WAVE: u32 = 1;

/// Maximum pickups placed after each cleared wave.
pub const PICKUPS_MAX_PER_WAVE: u32 = 3;

/// Hit points restored by one pickup.
pub const PICKUP_HEAL_AMOUNT: u32 = 50;
