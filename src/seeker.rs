//! The seeker: scan configuration, scheduling, and the visibility pipeline.
//!
//! A [`Seeker`] owns everything one sensing entity needs between scans:
//! its configuration, the scan timer, the detections of the most recent
//! completed scan, and the observers notified when something new is seen.
//! The per-tick driver lives in [`crate::systems::sense_scan_system`]; a
//! non-Bevy host can drive the same cycle through [`Seeker::tick`],
//! [`Seeker::could_see`] and [`Seeker::finish_scan`].
use bevy::prelude::*;
use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::timer::ScanTimer;
use crate::vision::{self, PeripheralVision, SensorPose};
use crate::{DEFAULT_MAX_SEEK_DISTANCE, DEFAULT_SENSING_INTERVAL, MIN_RESCHEDULE_DELAY};

/// Callback invoked synchronously, in enumeration order, for each entity
/// a scan newly sees.
pub type SeenObserver = Box<dyn FnMut(Entity) + Send + Sync>;

/// Height of the sensor eye above the owning entity's translation.
///
/// Optional; without it the eye sits at the translation itself.
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EyeHeight(pub f32);

/// Scanning component attached to a sensing entity.
#[derive(Component)]
pub struct Seeker {
    max_seek_distance: f32,
    vision: PeripheralVision,
    sensing_interval: f32,
    see_enabled: bool,
    detected: Vec<Entity>,
    timer: ScanTimer,
    rng: SmallRng,
    observers: Vec<SeenObserver>,
}

impl Seeker {
    /// A seeker with default configuration whose first scan runs on the
    /// next tick.
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_entropy())
    }

    /// A seeker whose skip-gate rolls are deterministic. Intended for
    /// tests of the probabilistic gate.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    fn with_rng(rng: SmallRng) -> Self {
        Self {
            max_seek_distance: DEFAULT_MAX_SEEK_DISTANCE,
            vision: PeripheralVision::default(),
            sensing_interval: DEFAULT_SENSING_INTERVAL,
            see_enabled: true,
            detected: Vec::new(),
            timer: ScanTimer::due_now(),
            rng,
            observers: Vec::new(),
        }
    }

    pub fn max_seek_distance(&self) -> f32 {
        self.max_seek_distance
    }

    pub fn set_max_seek_distance(&mut self, distance: f32) {
        self.max_seek_distance = distance;
    }

    pub fn peripheral_vision_angle(&self) -> f32 {
        self.vision.angle()
    }

    pub fn peripheral_vision_cosine(&self) -> f32 {
        self.vision.cosine()
    }

    /// Stores the angle and recomputes the cached cosine. No range
    /// validation; out-of-range angles behave as their cosine dictates.
    pub fn set_peripheral_vision_angle(&mut self, angle_degrees: f32) {
        self.vision.set_angle(angle_degrees);
    }

    pub fn sensing_interval(&self) -> f32 {
        self.sensing_interval
    }

    /// Changes the scan cadence, adjusting the pending timer so the
    /// remaining wait reflects the new interval.
    ///
    /// No-op when `new_interval` is non-positive or equal to the current
    /// value. When the time elapsed since the last scan is under the new
    /// interval the timer fires at `new_interval - elapsed` from now;
    /// when it is already over, the timer is rearmed with a minimal
    /// positive delay so a change made from inside the scan callback
    /// fires on the next tick rather than inline.
    pub fn set_sensing_interval(&mut self, new_interval: f32) {
        if new_interval <= 0.0 || new_interval == self.sensing_interval {
            return;
        }
        self.sensing_interval = new_interval;

        let elapsed = self.timer.elapsed_since_last_fire().max(0.0);
        if elapsed < new_interval {
            self.timer.schedule_once(new_interval - elapsed);
        } else if elapsed > new_interval {
            self.timer.schedule_once(MIN_RESCHEDULE_DELAY);
        }
    }

    pub fn see_enabled(&self) -> bool {
        self.see_enabled
    }

    pub fn set_see_enabled(&mut self, enabled: bool) {
        self.see_enabled = enabled;
    }

    /// Entities that passed the full pipeline in the most recent
    /// completed scan, ascending by distance. Weak references: entries
    /// may have despawned since.
    pub fn detected(&self) -> &[Entity] {
        &self.detected
    }

    pub fn timer(&self) -> &ScanTimer {
        &self.timer
    }

    /// Advances the scan clock; `true` means a scan is due now.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.timer.tick(dt)
    }

    /// Registers an observer called once per newly seen entity.
    pub fn on_seen(&mut self, observer: impl FnMut(Entity) + Send + Sync + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub(crate) fn notify_seen(&mut self, entity: Entity) {
        for observer in &mut self.observers {
            observer(entity);
        }
    }

    /// Stage (a) of the pipeline: master switch and concealment, checked
    /// before any geometric work.
    pub fn should_check_visibility(&self, concealed: bool) -> bool {
        self.see_enabled && !concealed
    }

    /// Stages (b)-(d) of the pipeline: distance cull, probabilistic skip
    /// gate, field-of-view test.
    ///
    /// `may_skip` enables the skip gate and is set by periodic scans; a
    /// direct query passes `false` to get a deterministic answer. The
    /// line-of-sight trace is a separate, final stage because it needs
    /// the world.
    pub fn could_see(&mut self, pose: &SensorPose, target: Vec3, may_skip: bool) -> bool {
        let distance_squared = pose.location.distance_squared(target);
        if !vision::within_range(distance_squared, self.max_seek_distance) {
            return false;
        }
        if may_skip {
            let roll: f32 = self.rng.gen();
            if !vision::passes_skip_gate(roll, distance_squared, self.max_seek_distance) {
                return false;
            }
        }
        vision::within_field_of_view(pose, target, self.vision.cosine())
    }

    /// Drains the previous scan's detections so the driver can reset
    /// their flags.
    pub(crate) fn begin_scan(&mut self) -> Vec<Entity> {
        std::mem::take(&mut self.detected)
    }

    /// Records the sorted detections and rearms the timer for the next
    /// scan.
    pub fn finish_scan(&mut self, detected: Vec<Entity>) {
        self.detected = detected;
        self.timer.schedule_once(self.sensing_interval);
    }
}

impl Default for Seeker {
    fn default() -> Self {
        Self::new()
    }
}
