//! Bevy plugin wiring the sensing system into the schedule.
use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::debug;

use crate::occlusion::LineOfSightQuery;
use crate::systems::sense_scan_system;

/// Event triggered for each entity a scan newly sees, carrying the
/// spotted entity's reference.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeenEvent {
    /// The scanning entity.
    pub seeker: Entity,
    /// The entity that passed the full visibility pipeline.
    pub spotted: Entity,
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value."
)]
fn log_seen_event(event: On<SeenEvent>) {
    let SeenEvent { seeker, spotted } = event.event();
    debug!("seeker {seeker:?} saw {spotted:?}");
}

/// Plugin installing the scan system and the default line-of-sight
/// collaborator. Hosts wanting occlusion insert their own
/// [`LineOfSightQuery`] before adding the plugin.
#[derive(Default)]
pub struct SensePlugin;

impl Plugin for SensePlugin {
    fn build(&self, app: &mut App) {
        app.add_observer(log_seen_event);
        app.init_resource::<LineOfSightQuery>();
        app.add_systems(Update, sense_scan_system);
    }
}
