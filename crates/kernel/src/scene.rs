use glam::Vec3;
use serde::{Deserialize, Serialize};
use wormhole_common::{CameraPose, Galaxy, Ring, Sphere};

/// Fixed scene layout and shader tuning scalars.
///
/// Positions are world units. Everything here ends up in the raymarch
/// uniforms; the wormhole sphere also drives the crossing test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub wormhole: Sphere,
    pub blackhole: Sphere,
    pub saturn: Sphere,
    pub planet: Sphere,
    pub blackhole_disk: Ring,
    pub saturn_rings: Ring,
    pub gravity_wormhole: f32,
    pub gravity_blackhole: f32,
    pub planet_diffuse: Vec3,
    pub planet_specular: Vec3,
    pub light_direction: Vec3,
    pub light_speed: f32,
    pub step_size: f32,
    pub start_galaxy: Galaxy,
    pub camera_start: CameraPose,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            wormhole: Sphere::new(Vec3::new(2.0, -5.0, -28.0), 0.3),
            blackhole: Sphere::new(Vec3::new(0.0, -250.0, 250.0), 3.0),
            saturn: Sphere::new(Vec3::new(-14.0, 5.0, -40.0), 8.0),
            planet: Sphere::new(Vec3::new(5.84, -200.3, 211.96), 0.08),
            blackhole_disk: Ring {
                normal: Vec3::new(6.0, 0.0, 0.0),
                outer_radius: 50.0,
                tilt_axis: Vec3::new(0.0, -1.0, 2.0),
                tilt_angle: 2.3,
            },
            saturn_rings: Ring {
                normal: Vec3::new(1.67, 0.0, 0.0),
                outer_radius: 2.33,
                tilt_axis: Vec3::new(2.0, 1.0, 3.0),
                tilt_angle: 1.8,
            },
            gravity_wormhole: 0.01,
            gravity_blackhole: 0.5,
            planet_diffuse: Vec3::new(0.58, 0.85, 0.96),
            planet_specular: Vec3::new(0.1, 0.1, 0.1),
            light_direction: Vec3::new(-1.0, 0.0, 0.0),
            light_speed: 0.2,
            step_size: 1.0,
            start_galaxy: Galaxy::Home,
            camera_start: CameraPose::default(),
        }
    }
}

impl SceneConfig {
    /// Problems that would make the scene unrenderable, one message each.
    pub fn problems(&self) -> Vec<String> {
        let mut out = Vec::new();
        for (name, sphere) in [
            ("wormhole", &self.wormhole),
            ("blackhole", &self.blackhole),
            ("saturn", &self.saturn),
            ("planet", &self.planet),
        ] {
            if !(sphere.radius > 0.0) {
                out.push(format!("{name} radius must be positive, got {}", sphere.radius));
            }
        }
        for (name, ring) in [
            ("blackhole_disk", &self.blackhole_disk),
            ("saturn_rings", &self.saturn_rings),
        ] {
            if ring.outer_radius <= ring.inner_radius() {
                out.push(format!(
                    "{name} outer radius {} must exceed inner radius {}",
                    ring.outer_radius,
                    ring.inner_radius()
                ));
            }
        }
        if !(self.step_size > 0.0) {
            out.push(format!("step_size must be positive, got {}", self.step_size));
        }
        if self.light_direction.length_squared() == 0.0 {
            out.push("light_direction must be non-zero".into());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scene_is_valid() {
        assert!(SceneConfig::default().problems().is_empty());
    }

    #[test]
    fn camera_starts_outside_wormhole() {
        let scene = SceneConfig::default();
        assert!(!scene.wormhole.contains(scene.camera_start.position));
    }

    #[test]
    fn disk_inner_radius_survives_tilt() {
        let scene = SceneConfig::default();
        let disk = scene.blackhole_disk.resolved();
        assert!((disk.truncate().length() - 6.0).abs() < 1e-4);
        let rings = scene.saturn_rings.resolved();
        assert!((rings.truncate().length() - 1.67).abs() < 1e-4);
        assert_eq!(rings.w, 2.33);
    }

    #[test]
    fn degenerate_values_are_reported() {
        let mut scene = SceneConfig::default();
        scene.wormhole.radius = 0.0;
        scene.saturn_rings.outer_radius = 1.0;
        scene.step_size = -1.0;
        let problems = scene.problems();
        assert_eq!(problems.len(), 3);
        assert!(problems[0].contains("wormhole"));
    }
}
