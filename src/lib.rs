// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod config;
pub mod events;
pub mod language;
pub mod metrics;
pub mod pacing;
pub mod race;
pub mod racer;
pub mod results;
pub mod runtime;
pub mod typing_policy;

/// Interval between simulation ticks, wall-clock. The engine itself only
/// counts ticks; the driver schedules them at this cadence.
pub const TICK_RATE_MS: u64 = 100;
