/// Sensing defaults and pipeline constants used across modules.
///
/// The defaults match a medium-sized world: a five-second scan cadence
/// over a five-thousand-unit radius with a 90 degree vision cone.
pub const DEFAULT_MAX_SEEK_DISTANCE: f32 = 5000.0;
pub const DEFAULT_PERIPHERAL_VISION_ANGLE: f32 = 90.0;
pub const DEFAULT_SENSING_INTERVAL: f32 = 5.0;
/// Fraction of the maximum seek distance inside which the probabilistic
/// skip gate always passes. Candidates beyond it are only intermittently
/// re-evaluated by periodic scans.
pub const SKIP_FREE_RANGE_FRACTION: f32 = 0.4;
/// Minimal positive delay used when a rescheduled timer is already
/// overdue. Never zero, so an interval change made from inside the scan
/// callback cannot refire inline.
pub const MIN_RESCHEDULE_DELAY: f32 = 1e-4;
