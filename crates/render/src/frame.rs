use glam::{Mat4, Vec3, Vec4};
use serde::Serialize;
use wormhole_kernel::{RESOLUTION_PRESETS, SceneConfig, Simulation};

/// Screen-space to view-space ray transform, before camera rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayMatrix(pub Mat4);

impl RayMatrix {
    /// Scale the shorter screen axis so pixels stay square; flip Z so
    /// screen rays point down the camera's -Z.
    pub fn for_viewport(width: u32, height: u32) -> Self {
        let w = width.max(1) as f32;
        let h = height.max(1) as f32;
        let (vx, vy) = if w > h { (1.0, h / w) } else { (w / h, 1.0) };
        Self(Mat4::from_diagonal(Vec4::new(vx, vy, -1.0, 1.0)))
    }

    /// World-space ray transform for a camera with the given rotation.
    pub fn oriented(&self, rotation: Mat4) -> Mat4 {
        rotation * self.0
    }
}

/// Render-resolution divisor chosen by the resolution selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolutionScale(u32);

impl ResolutionScale {
    pub fn new(divisor: u32) -> Option<Self> {
        RESOLUTION_PRESETS
            .contains(&divisor)
            .then_some(Self(divisor))
    }

    pub fn presets() -> impl Iterator<Item = Self> {
        RESOLUTION_PRESETS.into_iter().map(Self)
    }

    pub fn divisor(self) -> u32 {
        self.0
    }

    pub fn label(self) -> String {
        if self.0 == 1 {
            "Full".into()
        } else {
            format!("1/{}", self.0)
        }
    }
}

impl Default for ResolutionScale {
    fn default() -> Self {
        Self(2)
    }
}

/// Window size plus the chosen render-resolution divisor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub scale: ResolutionScale,
}

impl Viewport {
    pub fn new(width: u32, height: u32, scale: ResolutionScale) -> Self {
        Self {
            width,
            height,
            scale,
        }
    }

    /// Size of the offscreen render targets.
    pub fn render_size(&self) -> (u32, u32) {
        let d = self.scale.divisor();
        ((self.width / d).max(1), (self.height / d).max(1))
    }

    pub fn ray_matrix(&self) -> RayMatrix {
        RayMatrix::for_viewport(self.width, self.height)
    }
}

/// Every value the raymarch shader reads, in host-side types.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameUniforms {
    pub ray_matrix: Mat4,
    pub camera_position: Vec3,
    pub wormhole: Vec4,
    pub blackhole: Vec4,
    pub saturn: Vec4,
    pub planet: Vec4,
    pub blackhole_disk: Vec4,
    pub saturn_rings: Vec4,
    pub planet_diffuse: Vec3,
    pub planet_specular: Vec3,
    pub light_direction: Vec3,
    pub gravity_wormhole: f32,
    pub gravity_blackhole: f32,
    pub light_speed: f32,
    pub step_size: f32,
    pub start_galaxy: i32,
}

impl FrameUniforms {
    /// Scene constants with the camera at its configured start.
    pub fn from_scene(scene: &SceneConfig) -> Self {
        Self {
            ray_matrix: Mat4::IDENTITY,
            camera_position: scene.camera_start.position,
            wormhole: scene.wormhole.packed(),
            blackhole: scene.blackhole.packed(),
            saturn: scene.saturn.packed(),
            planet: scene.planet.packed(),
            blackhole_disk: scene.blackhole_disk.resolved(),
            saturn_rings: scene.saturn_rings.resolved(),
            planet_diffuse: scene.planet_diffuse,
            planet_specular: scene.planet_specular,
            light_direction: scene.light_direction.normalize_or_zero(),
            gravity_wormhole: scene.gravity_wormhole,
            gravity_blackhole: scene.gravity_blackhole,
            light_speed: scene.light_speed,
            step_size: scene.step_size,
            start_galaxy: scene.start_galaxy.index(),
        }
    }

    /// Per-frame values: camera, ray transform, galaxy selector.
    pub fn update(&mut self, sim: &Simulation, viewport: &Viewport) {
        let pose = sim.pose();
        self.ray_matrix = viewport.ray_matrix().oriented(pose.rotation_matrix());
        self.camera_position = pose.position;
        self.start_galaxy = sim.galaxy().index();
    }

    /// Uniforms for the current state of `sim`.
    pub fn for_frame(sim: &Simulation, viewport: &Viewport) -> Self {
        let mut uniforms = Self::from_scene(sim.scene());
        uniforms.update(sim, viewport);
        uniforms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;
    use wormhole_common::{CameraPose, Galaxy};

    #[test]
    fn landscape_ray_matrix_squashes_y() {
        let m = RayMatrix::for_viewport(1600, 900).0;
        assert_eq!(m.x_axis.x, 1.0);
        assert!((m.y_axis.y - 0.5625).abs() < 1e-6);
        assert_eq!(m.z_axis.z, -1.0);
        assert_eq!(m.w_axis.w, 1.0);
    }

    #[test]
    fn portrait_ray_matrix_squashes_x() {
        let m = RayMatrix::for_viewport(600, 1200).0;
        assert!((m.x_axis.x - 0.5).abs() < 1e-6);
        assert_eq!(m.y_axis.y, 1.0);
    }

    #[test]
    fn square_viewport_counts_as_portrait() {
        let m = RayMatrix::for_viewport(800, 800).0;
        assert_eq!(m.x_axis.x, 1.0);
        assert_eq!(m.y_axis.y, 1.0);
    }

    #[test]
    fn centre_ray_points_down_camera_forward() {
        let rotation = Quat::from_rotation_y(0.7);
        let m = RayMatrix::for_viewport(1280, 720).oriented(Mat4::from_quat(rotation));
        let dir = m.transform_vector3(Vec3::Z);
        assert!((dir - rotation * Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn render_size_floors_and_clamps() {
        let scale = ResolutionScale::new(4).unwrap();
        assert_eq!(Viewport::new(1283, 721, scale).render_size(), (320, 180));
        assert_eq!(Viewport::new(3, 2, scale).render_size(), (1, 1));
        let full = ResolutionScale::new(1).unwrap();
        assert_eq!(Viewport::new(1283, 721, full).render_size(), (1283, 721));
    }

    #[test]
    fn only_presets_are_valid_scales() {
        assert!(ResolutionScale::new(3).is_none());
        assert!(ResolutionScale::new(0).is_none());
        let labels: Vec<String> = ResolutionScale::presets().map(|s| s.label()).collect();
        assert_eq!(labels, ["Full", "1/2", "1/4", "1/8"]);
    }

    #[test]
    fn uniforms_track_simulation() {
        let scene = SceneConfig::default();
        let mut sim = Simulation::new(scene.clone());
        sim.set_pose(CameraPose {
            position: Vec3::new(1.0, 2.0, 3.0),
            orientation: Quat::IDENTITY,
        });
        let viewport = Viewport::new(1000, 500, ResolutionScale::default());
        let u = FrameUniforms::for_frame(&sim, &viewport);
        assert_eq!(u.camera_position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(u.start_galaxy, Galaxy::Home.index());
        assert_eq!(u.wormhole, Vec4::new(2.0, -5.0, -28.0, 0.3));
        assert_eq!(u.ray_matrix, viewport.ray_matrix().0);
        assert_eq!(u.light_direction, Vec3::NEG_X);
    }

    #[test]
    fn uniforms_serialize_for_inspection() {
        let u = FrameUniforms::from_scene(&SceneConfig::default());
        let json = serde_json::to_value(&u).unwrap();
        assert_eq!(json["start_galaxy"], 0);
        assert_eq!(json["saturn"][3], 8.0);
    }
}
