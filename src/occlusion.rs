//! Line-of-sight collaborators.
//!
//! The final pipeline stage is delegated to a [`LineOfSight`]
//! implementation; the host decides what blocks vision. The crate ships
//! [`Unobstructed`] as the default and [`SphereOccluders`] for worlds
//! that can describe their blockers as spheres.
use bevy::prelude::*;
use glam::Vec3;
use serde::Serialize;

/// Synchronous obstruction query between two world positions.
#[cfg_attr(test, mockall::automock)]
pub trait LineOfSight: Send + Sync {
    /// Returns `true` when the segment from `from` to `to` is unobstructed.
    fn line_of_sight(&self, from: Vec3, to: Vec3) -> bool;
}

/// Line of sight that never blocks.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unobstructed;

impl LineOfSight for Unobstructed {
    fn line_of_sight(&self, _from: Vec3, _to: Vec3) -> bool {
        true
    }
}

/// A blocking sphere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sphere {
    pub centre: Vec3,
    pub radius: f32,
}

/// A set of blocking spheres. A sight line is occluded when the segment
/// between the endpoints passes through any sphere's interior.
#[derive(Debug, Default, Clone, Serialize)]
pub struct SphereOccluders {
    spheres: Vec<Sphere>,
}

impl SphereOccluders {
    pub fn new(spheres: Vec<Sphere>) -> Self {
        Self { spheres }
    }

    pub fn push(&mut self, sphere: Sphere) {
        self.spheres.push(sphere);
    }
}

impl LineOfSight for SphereOccluders {
    fn line_of_sight(&self, from: Vec3, to: Vec3) -> bool {
        self.spheres
            .iter()
            .all(|sphere| !segment_enters_sphere(from, to, sphere))
    }
}

/// Whether the closest point of the segment to the sphere's centre lies
/// strictly inside the sphere.
fn segment_enters_sphere(from: Vec3, to: Vec3, sphere: &Sphere) -> bool {
    let segment = to - from;
    let length_squared = segment.length_squared();
    let t = if length_squared > 0.0 {
        ((sphere.centre - from).dot(segment) / length_squared).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let closest = from + segment * t;
    closest.distance_squared(sphere.centre) < sphere.radius * sphere.radius
}

/// Resource handing the scan its line-of-sight collaborator.
///
/// Defaults to [`Unobstructed`]; hosts install their own implementation
/// by inserting this resource before [`crate::SensePlugin`] initialises it.
#[derive(Resource)]
pub struct LineOfSightQuery(Box<dyn LineOfSight>);

impl LineOfSightQuery {
    pub fn new(query: impl LineOfSight + 'static) -> Self {
        Self(Box::new(query))
    }

    pub fn line_of_sight(&self, from: Vec3, to: Vec3) -> bool {
        self.0.line_of_sight(from, to)
    }
}

impl Default for LineOfSightQuery {
    fn default() -> Self {
        Self::new(Unobstructed)
    }
}
