//! Field-of-view geometry for the sensing pipeline.
//!
//! Pure math over `glam` types with no ECS involvement. The seeker
//! combines these checks with its probabilistic skip gate and the
//! line-of-sight collaborator to decide visibility.
use glam::{Quat, Vec3};
use serde::Serialize;

use crate::{DEFAULT_PERIPHERAL_VISION_ANGLE, SKIP_FREE_RANGE_FRACTION};

/// Peripheral vision limits: an angle in degrees with its cached cosine.
///
/// The cosine is derived state. It is recomputed on construction and on
/// every angle mutation and can never be set independently, so
/// `cosine() == angle().to_radians().cos()` always holds. Angles outside
/// `[0, 360]` are stored as-is; the behaviour is then whatever the cosine
/// yields.
///
/// # Examples
/// ```
/// use sightline::vision::PeripheralVision;
/// let mut vision = PeripheralVision::new(90.0);
/// assert!(vision.cosine().abs() < 1e-6);
/// vision.set_angle(0.0);
/// assert!((vision.cosine() - 1.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeripheralVision {
    angle_degrees: f32,
    cosine: f32,
}

impl PeripheralVision {
    /// Creates vision limits from an angle in degrees.
    pub fn new(angle_degrees: f32) -> Self {
        Self {
            angle_degrees,
            cosine: angle_degrees.to_radians().cos(),
        }
    }

    /// Stores a new angle and recomputes the cached cosine.
    pub fn set_angle(&mut self, angle_degrees: f32) {
        self.angle_degrees = angle_degrees;
        self.cosine = angle_degrees.to_radians().cos();
    }

    /// The raw angle in degrees.
    pub fn angle(&self) -> f32 {
        self.angle_degrees
    }

    /// Cosine of the vision limit, the threshold for the dot-product test.
    pub fn cosine(&self) -> f32 {
        self.cosine
    }
}

impl Default for PeripheralVision {
    fn default() -> Self {
        Self::new(DEFAULT_PERIPHERAL_VISION_ANGLE)
    }
}

/// Eye position and facing direction of a sensing entity.
///
/// The identity rotation faces `+X`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorPose {
    /// World-space eye position the scan measures distances from.
    pub location: Vec3,
    /// Unit facing direction used by the field-of-view test.
    pub facing: Vec3,
}

impl SensorPose {
    /// Builds a pose from an eye position and an orientation.
    pub fn new(location: Vec3, rotation: Quat) -> Self {
        Self {
            location,
            facing: rotation * Vec3::X,
        }
    }

    /// Fallback pose for a seeker without a transform: origin, facing `+X`.
    pub fn detached() -> Self {
        Self {
            location: Vec3::ZERO,
            facing: Vec3::X,
        }
    }
}

/// Squared-distance cull.
///
/// A candidate exactly at the maximum distance is excluded.
pub fn within_range(distance_squared: f32, max_distance: f32) -> bool {
    distance_squared < max_distance * max_distance
}

/// Field-of-view test against a cached cosine threshold.
///
/// Normalises the sensor-to-target offset and compares its dot product
/// with the facing direction. A degenerate offset normalises to the zero
/// vector, so a target coincident with the sensor scores a dot of zero.
pub fn within_field_of_view(pose: &SensorPose, target: Vec3, cosine: f32) -> bool {
    let direction = (target - pose.location)
        .try_normalize()
        .unwrap_or(Vec3::ZERO);
    direction.dot(pose.facing) >= cosine
}

/// Probabilistic skip gate applied by periodic scans.
///
/// `roll` is uniform in `[0, 1)`. The gate fails when
/// `roll² · d²` exceeds `(0.4 · max)²`: candidates inside 40% of the
/// maximum range always pass, while more distant ones pass with
/// probability `0.4 · max / d`, independently re-rolled each scan.
pub fn passes_skip_gate(roll: f32, distance_squared: f32, max_distance: f32) -> bool {
    let threshold = SKIP_FREE_RANGE_FRACTION * max_distance;
    roll * roll * distance_squared <= threshold * threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0.0)]
    #[case(45.0)]
    #[case(90.0)]
    #[case(180.0)]
    #[case(270.0)]
    #[case(360.0)]
    #[case(400.0)]
    #[case(-30.0)]
    fn cosine_tracks_angle(#[case] angle: f32) {
        let mut vision = PeripheralVision::new(0.0);
        vision.set_angle(angle);
        assert_relative_eq!(vision.cosine(), angle.to_radians().cos());
        assert_relative_eq!(vision.angle(), angle);
    }

    #[test]
    fn identity_rotation_faces_positive_x() {
        let pose = SensorPose::new(Vec3::ZERO, Quat::IDENTITY);
        assert_relative_eq!(pose.facing.x, 1.0);
        assert_relative_eq!(pose.facing.y, 0.0);
        assert_relative_eq!(pose.facing.z, 0.0);
    }

    #[test]
    fn forty_five_degrees_off_axis_is_inside_a_ninety_degree_cone() {
        let pose = SensorPose::detached();
        let cosine = PeripheralVision::new(90.0).cosine();
        assert!(within_field_of_view(&pose, Vec3::new(1.0, 1.0, 0.0), cosine));
    }

    #[test]
    fn behind_the_sensor_is_outside_a_ninety_degree_cone() {
        let pose = SensorPose::detached();
        let cosine = PeripheralVision::new(90.0).cosine();
        assert!(!within_field_of_view(
            &pose,
            Vec3::new(-1.0, 0.0, 0.0),
            cosine
        ));
    }

    #[test]
    fn coincident_target_scores_zero_dot() {
        let pose = SensorPose::detached();
        // Dot of zero passes a 90 degree cone and fails a narrower one.
        assert!(within_field_of_view(&pose, pose.location, 0.0));
        assert!(!within_field_of_view(&pose, pose.location, 0.5));
    }

    #[test]
    fn range_cull_is_strict_at_the_boundary() {
        assert!(within_range(99.9f32.powi(2), 100.0));
        assert!(!within_range(100.0f32.powi(2), 100.0));
        assert!(!within_range(100.1f32.powi(2), 100.0));
    }

    #[rstest]
    #[case(0.0, 100.0, true)] // a zero roll always passes
    #[case(0.99, 39.0, true)] // inside the free band regardless of roll
    #[case(0.5, 90.0, false)] // 0.25 * 8100 > 1600
    #[case(0.3, 90.0, true)] // 0.09 * 8100 < 1600
    fn skip_gate_formula(#[case] roll: f32, #[case] distance: f32, #[case] passes: bool) {
        assert_eq!(
            passes_skip_gate(roll, distance * distance, 100.0),
            passes,
            "roll {roll} at distance {distance}"
        );
    }
}
