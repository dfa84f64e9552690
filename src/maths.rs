//! Angle helpers for pose sampling.

use glam::{EulerRot, Quat, Vec3};

/// Normalize an angle in degrees into the (-180, 180] range.
///
/// Recorded rotations pass through this before quaternion conversion so a
/// bone oscillating around 0 degrees does not produce a curve jumping
/// between 359 and 0.
pub fn angle_modulo_360(angle: f32) -> f32 {
    let mut angle = angle % 360.0;
    if angle.abs() > 180.0 {
        angle -= angle.signum() * 360.0;
    }
    angle
}

/// Component-wise [`angle_modulo_360`].
pub fn angles_modulo_360(v: Vec3) -> Vec3 {
    Vec3::new(
        angle_modulo_360(v.x),
        angle_modulo_360(v.y),
        angle_modulo_360(v.z),
    )
}

/// Convert Euler angles in degrees to a quaternion.
///
/// Composition order is Y then X then Z (intrinsic), matching the engine
/// convention the rig poses are expressed in.
pub fn quat_from_euler_degrees(euler: Vec3) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        euler.y.to_radians(),
        euler.x.to_radians(),
        euler.z.to_radians(),
    )
}
