//! # Angle Normalization
//!
//! Pure functions that fold arbitrary radian angles into the canonical ranges
//! used by the simulation:
//!
//! - [`normalize_orientation`] - horizontal facing, `[0, 2π)`
//! - [`normalize_pitch`] - vertical look angle, `(-π, π]`
//!
//! Both are total over finite input. Non-finite input is not guarded and
//! propagates as NaN, which keeps these functions free of branches that the
//! range checks on the hot path would otherwise pay for.

pub use std::f32::consts::{PI, TAU};

/// Constrains an arbitrary radian angle to the interval `[0, 2π)`.
///
/// Negative inputs wrap around from the top of the range, so `-0.5` becomes
/// `2π - 0.5`.
///
/// # Examples
///
/// ```rust
/// use world_position::normalize_orientation;
///
/// let o = normalize_orientation(7.0);
/// assert!((o - (7.0 - std::f32::consts::TAU)).abs() < 1e-6);
/// ```
pub fn normalize_orientation(o: f32) -> f32 {
    let wrapped = o.rem_euclid(TAU);
    // rem_euclid may round a tiny negative input up to exactly TAU
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Constrains an arbitrary radian angle to the interval `(-π, π]`.
///
/// Angles already inside the interval are returned untouched.
pub fn normalize_pitch(o: f32) -> f32 {
    if o > -PI && o <= PI {
        return o;
    }

    let pitch = normalize_orientation(o + PI) - PI;
    if pitch <= -PI {
        PI
    } else {
        pitch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn sample_angles() -> Vec<f32> {
        let mut samples = vec![
            0.0, -0.0, PI, -PI, TAU, -TAU, 1e-9, -1e-9, 0.5, -0.5, 7.0, -7.0, 100.0, -100.0,
            12345.678, -12345.678,
        ];
        samples.extend((-200..=200).map(|i| i as f32 * 0.173));
        samples
    }

    #[test]
    fn test_orientation_range() {
        for o in sample_angles() {
            let n = normalize_orientation(o);
            assert!(n >= 0.0 && n < TAU, "normalize_orientation({o}) = {n}");
        }
    }

    #[test]
    fn test_orientation_idempotent() {
        for o in sample_angles() {
            let once = normalize_orientation(o);
            assert_eq!(normalize_orientation(once), once, "input {o}");
        }
    }

    #[test]
    fn test_orientation_known_values() {
        assert!((normalize_orientation(-0.5) - 5.783_185).abs() < EPSILON);
        assert!((normalize_orientation(7.0) - 0.716_814_7).abs() < EPSILON);
        assert_eq!(normalize_orientation(1.0), 1.0);
        assert_eq!(normalize_orientation(TAU), 0.0);
    }

    #[test]
    fn test_tiny_negative_does_not_reach_tau() {
        let n = normalize_orientation(-1e-9);
        assert!(n < TAU);
    }

    #[test]
    fn test_pitch_range() {
        for o in sample_angles() {
            let p = normalize_pitch(o);
            assert!(p > -PI && p <= PI, "normalize_pitch({o}) = {p}");
        }
    }

    #[test]
    fn test_pitch_in_range_unchanged() {
        assert_eq!(normalize_pitch(0.25), 0.25);
        assert_eq!(normalize_pitch(-3.0), -3.0);
        assert_eq!(normalize_pitch(PI), PI);
    }

    #[test]
    fn test_pitch_wraps() {
        assert_eq!(normalize_pitch(-PI), PI);
        assert!((normalize_pitch(4.0) - (4.0 - TAU)).abs() < EPSILON);
        assert!((normalize_pitch(-4.0) - (TAU - 4.0)).abs() < EPSILON);
    }

    #[test]
    fn test_nan_propagates() {
        assert!(normalize_orientation(f32::NAN).is_nan());
        assert!(normalize_pitch(f32::NAN).is_nan());
    }
}
