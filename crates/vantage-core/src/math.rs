//! Angle helpers and critically damped smoothing
//!
//! All angles are in degrees. The damping functions follow the classic
//! critically damped spring approximation (Game Programming Gems 4, ch. 1.10):
//! the caller owns the velocity and passes it back in every frame.

use glam::{EulerRot, Quat, Vec3};

/// Smallest smoothing time constant used before treating it as a snap
const MIN_SMOOTH_TIME: f32 = 1.0e-4;

/// Wrap an angle into `[0, 360)`
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Normalize an angle into `(-180, 180]`
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = wrap_degrees(angle);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Shortest signed difference from `current` to `target`
pub fn delta_angle(current: f32, target: f32) -> f32 {
    normalize_angle(target - current)
}

/// Move a scalar towards a target by at most `max_delta`
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}

/// Move a vector towards a target by a maximum delta
pub fn move_towards_vec3(current: Vec3, target: Vec3, max_delta: f32) -> Vec3 {
    let diff = target - current;
    let distance = diff.length();

    if distance <= max_delta || distance == 0.0 {
        target
    } else {
        current + diff / distance * max_delta
    }
}

/// Critically damped approach of a scalar towards `target`.
///
/// `smooth_time <= 0` snaps to the target and clears the velocity. A
/// non-positive `dt` leaves both value and velocity untouched. The result
/// never passes the target.
pub fn smooth_damp(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        return current;
    }
    if smooth_time <= 0.0 {
        *velocity = 0.0;
        return target;
    }

    let smooth_time = smooth_time.max(MIN_SMOOTH_TIME);
    let omega = 2.0 / smooth_time;
    let decay = damping_decay(omega * dt);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;
    let mut output = target + (change + temp) * decay;

    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = 0.0;
    }
    output
}

/// Critically damped approach of an angle, through the shortest arc.
///
/// The returned angle is continuous with `current` (it is not re-wrapped), so
/// repeated calls never jump by 360 degrees.
pub fn smooth_damp_angle(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    dt: f32,
) -> f32 {
    let target = current + delta_angle(current, target);
    smooth_damp(current, target, velocity, smooth_time, dt)
}

/// Critically damped approach of a vector towards `target`.
pub fn smooth_damp_vec3(
    current: Vec3,
    target: Vec3,
    velocity: &mut Vec3,
    smooth_time: f32,
    dt: f32,
) -> Vec3 {
    if dt <= 0.0 {
        return current;
    }
    if smooth_time <= 0.0 {
        *velocity = Vec3::ZERO;
        return target;
    }

    let smooth_time = smooth_time.max(MIN_SMOOTH_TIME);
    let omega = 2.0 / smooth_time;
    let decay = damping_decay(omega * dt);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;
    let mut output = target + (change + temp) * decay;

    if (target - current).dot(output - target) > 0.0 {
        output = target;
        *velocity = Vec3::ZERO;
    }
    output
}

/// Polynomial approximation of `e^-x` used by the damping functions
fn damping_decay(x: f32) -> f32 {
    1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x)
}

/// Blend factor for an exponential approach with time constant `time_constant`.
///
/// `1 - e^(-dt / tau)`, independent of frame rate when applied every frame.
pub fn exp_blend_factor(dt: f32, time_constant: f32) -> f32 {
    if dt <= 0.0 {
        return 0.0;
    }
    1.0 - (-dt / time_constant.max(MIN_SMOOTH_TIME)).exp()
}

/// Orientation for a pitch/yaw pair in degrees (yaw about Y, then pitch about X)
pub fn orbit_rotation(pitch: f32, yaw: f32) -> Quat {
    Quat::from_euler(EulerRot::YXZ, yaw.to_radians(), pitch.to_radians(), 0.0)
}

/// Vector from the look-at anchor to the camera for an orbit rotation
pub fn orbit_offset(rotation: Quat, distance: f32) -> Vec3 {
    rotation * Vec3::new(0.0, 0.0, -distance)
}

/// Rotation whose forward axis points along `direction` with no roll.
///
/// Returns `None` for a zero-length direction.
pub fn look_rotation(direction: Vec3) -> Option<Quat> {
    let direction = direction.try_normalize()?;
    let yaw = direction.x.atan2(direction.z);
    let pitch = (-direction.y).clamp(-1.0, 1.0).asin();
    Some(Quat::from_euler(EulerRot::YXZ, yaw, pitch, 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_normalize_angle() {
        assert_eq!(normalize_angle(190.0), -170.0);
        assert_eq!(normalize_angle(-190.0), 170.0);
        assert_eq!(normalize_angle(180.0), 180.0);
        assert_eq!(wrap_degrees(-30.0), 330.0);
    }

    #[test]
    fn test_delta_angle_takes_shortest_path() {
        assert!((delta_angle(350.0, 10.0) - 20.0).abs() < 1e-4);
        assert!((delta_angle(10.0, 350.0) + 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_smooth_damp_angle_converges_without_overshoot() {
        let smooth_time = 0.1;
        let mut angle = 0.0;
        let mut velocity = 0.0;
        let mut previous_gap = 90.0_f32;
        let mut ticks_to_settle = None;

        for tick in 0..240 {
            angle = smooth_damp_angle(angle, 90.0, &mut velocity, smooth_time, DT);
            let gap = 90.0 - angle;
            assert!(gap >= -1e-3, "overshot target at tick {tick}: {angle}");
            assert!(gap <= previous_gap + 1e-4, "moved away from target at tick {tick}");
            previous_gap = gap;
            if ticks_to_settle.is_none() && gap < 1.0 {
                ticks_to_settle = Some(tick);
            }
        }

        // Within 1 degree after roughly five time constants
        let settled_at = ticks_to_settle.expect("never settled") as f32 * DT;
        assert!(settled_at < smooth_time * 5.0);
    }

    #[test]
    fn test_smooth_damp_angle_wraps_through_zero() {
        let mut angle = 350.0;
        let mut velocity = 0.0;
        for _ in 0..120 {
            angle = smooth_damp_angle(angle, 10.0, &mut velocity, 0.1, DT);
        }
        // Continuous output: approaches 370 rather than sweeping back through 180
        assert!((wrap_degrees(angle) - 10.0).abs() < 0.5);
        assert!(angle > 350.0);
    }

    #[test]
    fn test_smooth_damp_zero_smooth_time_snaps() {
        let mut velocity = 3.0;
        let value = smooth_damp(0.0, 42.0, &mut velocity, 0.0, DT);
        assert_eq!(value, 42.0);
        assert_eq!(velocity, 0.0);
    }

    #[test]
    fn test_smooth_damp_zero_dt_is_noop() {
        let mut velocity = 5.0;
        let value = smooth_damp(1.0, 42.0, &mut velocity, 0.3, 0.0);
        assert_eq!(value, 1.0);
        assert_eq!(velocity, 5.0);
    }

    #[test]
    fn test_smooth_damp_large_gap() {
        let mut value = 0.0;
        let mut velocity = 0.0;
        for _ in 0..600 {
            value = smooth_damp(value, 10_000.0, &mut velocity, 0.2, DT);
            assert!(value <= 10_000.0);
        }
        assert!((value - 10_000.0).abs() < 1.0);
    }

    #[test]
    fn test_smooth_damp_vec3_never_passes_target() {
        let target = Vec3::new(10.0, -4.0, 3.0);
        let mut position = Vec3::ZERO;
        let mut velocity = Vec3::ZERO;
        for _ in 0..300 {
            position = smooth_damp_vec3(position, target, &mut velocity, 0.1, DT);
            assert!(position.x <= target.x + 1e-4);
        }
        assert!((position - target).length() < 1e-2);
    }

    #[test]
    fn test_move_towards_is_capped() {
        let result = move_towards_vec3(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 5.0);
        assert!((result.x - 5.0).abs() < 0.001);
        assert_eq!(move_towards(0.0, 2.0, 5.0), 2.0);
        assert_eq!(move_towards(0.0, -20.0, 5.0), -5.0);
    }

    #[test]
    fn test_exp_blend_factor() {
        assert_eq!(exp_blend_factor(0.0, 0.1), 0.0);
        let one_tau = exp_blend_factor(0.1, 0.1);
        assert!((one_tau - (1.0 - (-1.0f32).exp())).abs() < 1e-5);
        // Tiny time constant behaves as a snap
        assert!(exp_blend_factor(DT, 0.0) > 0.999);
    }

    #[test]
    fn test_orbit_offset_sits_behind_and_above() {
        let rotation = orbit_rotation(30.0, 0.0);
        let offset = orbit_offset(rotation, 10.0);
        assert!((offset.y - 5.0).abs() < 1e-4);
        assert!(offset.z < 0.0);
    }

    #[test]
    fn test_look_rotation_matches_orbit_rotation() {
        let rotation = orbit_rotation(25.0, 60.0);
        let forward = rotation * Vec3::Z;
        let rebuilt = look_rotation(forward).expect("non-zero direction");
        assert!(rebuilt.dot(rotation).abs() > 0.9999);
        assert!(look_rotation(Vec3::ZERO).is_none());
    }
}
