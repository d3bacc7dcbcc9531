use glam::{Mat4, Quat, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// A sphere in world space. Packed as `xyz = center, w = radius` for shaders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub const fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.distance(self.center) < self.radius
    }

    pub fn packed(&self) -> Vec4 {
        self.center.extend(self.radius)
    }
}

/// A flat annulus around some body.
///
/// `normal` is the plane normal; its length is the inner radius. The ring is
/// authored untilted and then rotated by `tilt_angle` radians around
/// `tilt_axis` when resolved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    pub normal: Vec3,
    pub outer_radius: f32,
    pub tilt_axis: Vec3,
    pub tilt_angle: f32,
}

impl Ring {
    /// Tilted normal (magnitude = inner radius) in `xyz`, outer radius in `w`.
    pub fn resolved(&self) -> Vec4 {
        let axis = self.tilt_axis.normalize_or_zero();
        let normal = if axis == Vec3::ZERO {
            self.normal
        } else {
            Quat::from_axis_angle(axis, self.tilt_angle) * self.normal
        };
        normal.extend(self.outer_radius)
    }

    pub fn inner_radius(&self) -> f32 {
        self.normal.length()
    }
}

/// Camera position and orientation. The camera looks down its local -Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }
}

impl CameraPose {
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    /// Translate along the camera's local axes.
    pub fn translate_local(&mut self, offset: Vec3) {
        self.position += self.orientation * offset;
    }

    pub fn rotation_matrix(&self) -> Mat4 {
        Mat4::from_quat(self.orientation)
    }
}

/// Which galaxy environment the shader renders around the camera.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Galaxy {
    /// The Saturn system, where the flight starts.
    #[default]
    Home,
    /// The far side of the wormhole: black hole, accretion disk, small planet.
    Far,
}

impl Galaxy {
    /// The value of the `startGalaxy` uniform.
    pub fn index(self) -> i32 {
        match self {
            Galaxy::Home => 0,
            Galaxy::Far => 1,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Galaxy::Home => Galaxy::Far,
            Galaxy::Far => Galaxy::Home,
        }
    }
}
