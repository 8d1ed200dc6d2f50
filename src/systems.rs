//! The periodic scan driver.
use bevy::prelude::*;
use log::debug;

use crate::occlusion::LineOfSightQuery;
use crate::plugin::SeenEvent;
use crate::seeker::{EyeHeight, Seeker};
use crate::vision::SensorPose;
use crate::wanted::{Concealed, Wanted};

/// Resolves a seeker's eye pose from its transform, if it has one.
fn sensor_pose(transform: Option<&Transform>, eye_height: Option<&EyeHeight>) -> SensorPose {
    let eye = eye_height.map_or(0.0, |height| height.0);
    transform.map_or_else(SensorPose::detached, |transform| {
        SensorPose::new(transform.translation + Vec3::Z * eye, transform.rotation)
    })
}

/// Runs due scans.
///
/// Ticks every seeker's timer and, when one fires: resets the flags of
/// the previous scan's detections, re-evaluates every wanted candidate
/// through the visibility pipeline, marks and announces the hits in
/// enumeration order, ranks them by distance to flag the closest and
/// furthest, then rearms the timer for the configured interval.
///
/// Each scan runs to completion inside this system; seekers sharing
/// candidates race on the `Wanted` flags by design, last writer winning.
pub fn sense_scan_system(
    time: Res<Time>,
    line_of_sight: Res<LineOfSightQuery>,
    mut seekers: Query<(Entity, Option<&Transform>, Option<&EyeHeight>, &mut Seeker)>,
    mut candidates: Query<(Entity, &Transform, &mut Wanted, Option<&Concealed>)>,
    mut commands: Commands,
) {
    let dt = time.delta_secs();
    for (seeker_entity, transform, eye_height, mut seeker) in &mut seekers {
        if !seeker.tick(dt) {
            continue;
        }

        let pose = sensor_pose(transform, eye_height);

        for previous in seeker.begin_scan() {
            // Weak reference: the entity may have despawned since.
            if let Ok((_, _, mut wanted, _)) = candidates.get_mut(previous) {
                wanted.clear();
            }
        }

        let mut hits: Vec<(Entity, f32)> = Vec::new();
        for (candidate, candidate_transform, _, concealed) in candidates.iter() {
            if candidate == seeker_entity {
                continue;
            }
            if !seeker.should_check_visibility(concealed.is_some()) {
                continue;
            }
            let target = candidate_transform.translation;
            if !seeker.could_see(&pose, target, true) {
                continue;
            }
            if !line_of_sight.line_of_sight(pose.location, target) {
                continue;
            }
            hits.push((candidate, pose.location.distance_squared(target)));
        }

        for &(candidate, _) in &hits {
            if let Ok((_, _, mut wanted, _)) = candidates.get_mut(candidate) {
                wanted.set_is_detected(true);
            }
            seeker.notify_seen(candidate);
            commands.trigger(SeenEvent {
                seeker: seeker_entity,
                spotted: candidate,
            });
        }

        hits.sort_by(|a, b| a.1.total_cmp(&b.1));

        if let Some(&(closest, _)) = hits.first() {
            if let Ok((_, _, mut wanted, _)) = candidates.get_mut(closest) {
                wanted.set_is_closest(true);
            }
        }
        if let Some(&(furthest, _)) = hits.last() {
            if let Ok((_, _, mut wanted, _)) = candidates.get_mut(furthest) {
                wanted.set_is_furthest(true);
            }
        }

        debug!(
            "seeker {seeker_entity:?} detected {} candidate(s)",
            hits.len()
        );

        seeker.finish_scan(hits.into_iter().map(|(entity, _)| entity).collect());
    }
}
