//! Wormhole traversal: find where the camera pierced the sphere this frame and
//! send it out the far side, turned around the piercing axis.

use glam::{Quat, Vec3};
use std::f32::consts::PI;
use wormhole_common::{CameraPose, Sphere};

/// Exit point scale. Keeps the camera just outside the sphere after a crossing
/// so the next frame does not register a second entry.
pub const EXIT_MARGIN: f32 = 1.0001;

/// One traversal of the wormhole.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing {
    /// Where the travel segment met the sphere.
    pub entry: Vec3,
    /// Where the camera was placed afterwards.
    pub exit: Vec3,
    /// Rotation applied to the camera orientation (180° about the entry normal).
    pub rotation: Quat,
}

/// Point where the segment `prev -> next` enters `sphere`, if it does so this frame.
///
/// Only an outside-to-inside transition counts: `prev` at or beyond the
/// radius, `next` strictly within it.
pub fn crossing_point(prev: Vec3, next: Vec3, sphere: &Sphere) -> Option<Vec3> {
    let radius = sphere.radius;
    if prev.distance(sphere.center) < radius || next.distance(sphere.center) >= radius {
        return None;
    }

    let dir = (next - prev).normalize();
    let rel = prev - sphere.center;
    let p = rel.dot(dir);
    // Non-negative whenever the segment really enters; clamp float noise.
    let d = (p * p + radius * radius - rel.dot(rel)).max(0.0);
    Some(prev + dir * (-p - d.sqrt()))
}

/// Apply the crossing response to `pose` if it entered `sphere` since `prev`.
pub fn traverse(pose: &mut CameraPose, prev: Vec3, sphere: &Sphere) -> Option<Crossing> {
    let entry = crossing_point(prev, pose.position, sphere)?;

    let axis = (entry - sphere.center).normalize();
    let rotation = Quat::from_axis_angle(axis, PI);
    pose.orientation = (rotation * pose.orientation).normalize();

    let exit = sphere.center + (sphere.center - entry) * EXIT_MARGIN;
    pose.position = exit;

    Some(Crossing {
        entry,
        exit,
        rotation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn wormhole() -> Sphere {
        Sphere::new(Vec3::new(2.0, -5.0, -28.0), 0.3)
    }

    /// Distance from `point` to the segment `a -> b`.
    fn distance_to_segment(point: Vec3, a: Vec3, b: Vec3) -> f32 {
        let ab = b - a;
        let t = ((point - a).dot(ab) / ab.length_squared()).clamp(0.0, 1.0);
        point.distance(a + ab * t)
    }

    #[test]
    fn head_on_entry_is_on_sphere_and_segment() {
        let s = wormhole();
        let prev = s.center + Vec3::new(0.0, 0.0, 0.5);
        let next = s.center + Vec3::new(0.0, 0.0, 0.1);
        let hit = crossing_point(prev, next, &s).unwrap();
        assert!((hit.distance(s.center) - s.radius).abs() < EPS);
        assert!(distance_to_segment(hit, prev, next) < EPS);
        assert!((hit - (s.center + Vec3::new(0.0, 0.0, 0.3))).length() < EPS);
    }

    #[test]
    fn oblique_entries_land_on_sphere() {
        let s = wormhole();
        let approaches = [
            (Vec3::new(0.25, 0.2, 0.1), Vec3::new(0.05, 0.0, 0.02)),
            (Vec3::new(-0.31, 0.0, 0.0), Vec3::new(-0.29, 0.01, 0.0)),
            (Vec3::new(0.0, -1.0, 0.2), Vec3::new(0.0, 0.1, -0.05)),
            (Vec3::new(0.31, 0.0, 0.0), Vec3::new(0.2999, 0.0, 0.0)),
        ];
        for (a, b) in approaches {
            let prev = s.center + a;
            let next = s.center + b;
            let hit = crossing_point(prev, next, &s).expect("segment enters the sphere");
            assert!(
                (hit.distance(s.center) - s.radius).abs() < EPS,
                "entry {hit} not on sphere for {a} -> {b}"
            );
            assert!(distance_to_segment(hit, prev, next) < EPS);
        }
    }

    #[test]
    fn no_crossing_when_staying_outside_or_inside() {
        let s = wormhole();
        // Passing by outside.
        assert!(crossing_point(s.center + Vec3::X, s.center + Vec3::Y, &s).is_none());
        // Moving within the sphere.
        assert!(
            crossing_point(s.center + Vec3::X * 0.1, s.center + Vec3::Y * 0.1, &s).is_none()
        );
        // Leaving the sphere.
        assert!(crossing_point(s.center, s.center + Vec3::X, &s).is_none());
        // Standing still on the surface.
        let on = s.center + Vec3::X * 0.3;
        assert!(crossing_point(on, on, &s).is_none());
    }

    #[test]
    fn traverse_mirrors_position_outside_the_sphere() {
        let s = wormhole();
        let prev = s.center + Vec3::new(0.0, 0.0, 0.5);
        let mut pose = CameraPose {
            position: s.center + Vec3::new(0.0, 0.0, 0.2),
            orientation: Quat::IDENTITY,
        };
        let crossing = traverse(&mut pose, prev, &s).unwrap();

        assert!(pose.position.distance(s.center) > s.radius);
        assert!((pose.position.distance(s.center) - s.radius * EXIT_MARGIN).abs() < EPS);
        // Opposite side of the approach.
        assert!((pose.position - s.center).dot(prev - s.center) < 0.0);
        assert_eq!(crossing.exit, pose.position);
    }

    #[test]
    fn traverse_turns_camera_half_way_around_the_entry_axis() {
        let s = wormhole();
        let prev = s.center + Vec3::new(0.0, 0.0, 1.0);
        let mut pose = CameraPose {
            position: s.center + Vec3::new(0.0, 0.0, 0.1),
            orientation: Quat::IDENTITY,
        };
        let crossing = traverse(&mut pose, prev, &s).unwrap();

        // Looking down -Z along the entry axis (+Z): a half turn about Z keeps
        // the view direction and flips up.
        assert!((pose.forward() - Vec3::NEG_Z).length() < EPS);
        assert!((pose.orientation * Vec3::Y - Vec3::NEG_Y).length() < EPS);
        assert!((crossing.rotation.angle_between(Quat::IDENTITY) - PI).abs() < 1e-3);
    }

    #[test]
    fn flying_on_after_traverse_moves_away() {
        let s = wormhole();
        let prev = s.center + Vec3::new(0.0, 0.0, 1.0);
        let mut pose = CameraPose {
            position: s.center + Vec3::new(0.0, 0.0, 0.1),
            orientation: Quat::IDENTITY,
        };
        traverse(&mut pose, prev, &s).unwrap();
        let before = pose.position.distance(s.center);
        pose.translate_local(Vec3::NEG_Z * 0.1);
        assert!(pose.position.distance(s.center) > before);
    }

    /// Xorshift generator so the sweep below is reproducible.
    struct Xorshift(u32);

    impl Xorshift {
        fn next_f32(&mut self) -> f32 {
            self.0 ^= self.0 << 13;
            self.0 ^= self.0 >> 17;
            self.0 ^= self.0 << 5;
            (self.0 >> 8) as f32 / 16_777_216.0
        }

        fn unit_vector(&mut self) -> Vec3 {
            loop {
                let v = Vec3::new(
                    self.next_f32() * 2.0 - 1.0,
                    self.next_f32() * 2.0 - 1.0,
                    self.next_f32() * 2.0 - 1.0,
                );
                let len = v.length();
                if (0.1..=1.0).contains(&len) {
                    return v / len;
                }
            }
        }
    }

    #[test]
    fn random_entries_land_on_sphere_and_exit_opposite() {
        let s = wormhole();
        let mut rng = Xorshift(0x2545_f491);
        for _ in 0..20_000 {
            let prev = s.center + rng.unit_vector() * s.radius * (1.01 + 2.0 * rng.next_f32());
            let next = s.center + rng.unit_vector() * s.radius * 0.99 * rng.next_f32();
            let mut pose = CameraPose {
                position: next,
                orientation: Quat::IDENTITY,
            };
            let crossing = traverse(&mut pose, prev, &s).expect("segment ends inside");

            assert!((crossing.entry.distance(s.center) - s.radius).abs() < EPS);
            assert!(distance_to_segment(crossing.entry, prev, next) < EPS);
            assert!(pose.position.distance(s.center) > s.radius);
            assert!((pose.position - s.center).dot(prev - s.center) < 0.0);
            assert!((pose.orientation.angle_between(Quat::IDENTITY) - PI).abs() < 1e-2);
        }
    }

    #[test]
    fn traverse_leaves_pose_alone_without_crossing() {
        let s = wormhole();
        let start = CameraPose {
            position: Vec3::new(10.0, 0.0, 0.0),
            orientation: Quat::from_rotation_x(0.3),
        };
        let mut pose = start;
        assert!(traverse(&mut pose, Vec3::new(11.0, 0.0, 0.0), &s).is_none());
        assert_eq!(pose, start);
    }
}
