//! Rotation helpers. Rotations use "up" (+y) as the forward axis.

use nalgebra::{vector, UnitComplex, Vector2};

/// Angle in degrees that points the forward axis along `facing`.
pub fn target_angle_degrees(facing: Vector2<f64>) -> f64 {
    facing.y.atan2(facing.x).to_degrees() - 90.0
}

pub fn target_rotation(facing: Vector2<f64>) -> UnitComplex<f64> {
    UnitComplex::new(target_angle_degrees(facing).to_radians())
}

/// Spherical interpolation along the shortest arc.
pub fn slerp(from: UnitComplex<f64>, to: UnitComplex<f64>, t: f64) -> UnitComplex<f64> {
    let delta = from.rotation_to(&to).angle();
    UnitComplex::new(delta * t) * from
}

/// Turns `current` toward `facing` by `turn_rate * dt` of the remaining arc.
/// A zero `facing` leaves the rotation unchanged.
pub fn turn_towards(
    current: UnitComplex<f64>,
    facing: Vector2<f64>,
    turn_rate: f64,
    dt: f64,
) -> UnitComplex<f64> {
    if facing.norm_squared() == 0.0 {
        return current;
    }
    let t = (turn_rate * dt).clamp(0.0, 1.0);
    slerp(current, target_rotation(facing), t)
}

pub fn forward(rotation: &UnitComplex<f64>) -> Vector2<f64> {
    rotation.transform_vector(&vector![0.0, 1.0])
}
