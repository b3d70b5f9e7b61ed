//! # Animation Driver
//!
//! A single monotonic clock, reset at startup, feeds every animated
//! attribute: the helicoid's rotation, the two orbit angles and the shared
//! color-cycle phase. Positions are recomputed from elapsed time each
//! frame, never integrated, so there is no drift to accumulate.

use std::f32::consts::PI;
use std::time::Instant;

use cgmath::Vector3;

/// Distance of the orbiting bodies from the scene origin
pub const ORBIT_RADIUS: f32 = 0.6;

/// Orbit angular velocity in radians per second
pub const ORBIT_RATE: f32 = 0.32 * PI;

/// The second body trails the first by exactly half a revolution
pub const ANTIPHASE: f32 = PI;

/// Color-cycle phase advances at half the clock rate
pub const PLAYHEAD_RATE: f32 = 0.5;

/// Monotonic elapsed-time source for the whole scene
pub struct AnimationClock {
    started: Instant,
}

impl AnimationClock {
    /// Creates a clock measuring from now
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Seconds since the clock was created
    pub fn elapsed_seconds(&self) -> f32 {
        self.started.elapsed().as_secs_f32()
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Helicoid rotation angle about the Y axis at time `t`
///
/// Grows without bound; rotation is periodic mod 2π so no wraparound is
/// needed.
pub fn surface_angle(t: f32) -> f32 {
    t
}

/// Shared color-cycle phase at time `t`
pub fn playhead(t: f32) -> f32 {
    PLAYHEAD_RATE * t
}

/// Orbit angle at time `t` for a body with the given phase offset
pub fn orbit_angle(t: f32, phase: f32) -> f32 {
    ORBIT_RATE * t + phase
}

/// Position on the orbit circle for an orbit angle
///
/// The orbit lies in the XZ plane; height is untouched.
pub fn orbit_position(angle: f32) -> Vector3<f32> {
    Vector3::new(ORBIT_RADIUS * angle.sin(), 0.0, ORBIT_RADIUS * angle.cos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;

    #[test]
    fn test_orbit_radius_is_constant() {
        for t in [0.0, 0.25, 1.0, 9.99, 1234.5] {
            let position = orbit_position(orbit_angle(t, 0.0));
            let distance = position.magnitude();
            assert!(
                (distance - ORBIT_RADIUS).abs() < 1e-4,
                "distance {} at t = {}",
                distance,
                t
            );
        }
    }

    #[test]
    fn test_bodies_are_antiphase() {
        for t in [0.0, 0.5, 2.0, 31.7] {
            let theta1 = orbit_angle(t, 0.0);
            let theta2 = orbit_angle(t, ANTIPHASE);

            // The phase offset is exact by construction
            assert_eq!(theta2, theta1 + PI);

            // Diametrically opposite positions cancel
            let sum = orbit_position(theta1) + orbit_position(theta2);
            assert!(sum.magnitude() < 1e-4);
        }
    }

    #[test]
    fn test_orbit_stays_in_plane() {
        for t in [0.0, 0.3, 5.0] {
            assert_eq!(orbit_position(orbit_angle(t, 0.0)).y, 0.0);
        }
    }

    #[test]
    fn test_rates() {
        assert_eq!(surface_angle(2.5), 2.5);
        assert_eq!(playhead(2.0), 1.0);
        assert_eq!(orbit_angle(1.0, 0.0), 0.32 * PI);
    }

    #[test]
    fn test_clock_is_monotonic() {
        let clock = AnimationClock::new();
        let a = clock.elapsed_seconds();
        let b = clock.elapsed_seconds();
        assert!(b >= a);
        assert!(a >= 0.0);
    }
}
