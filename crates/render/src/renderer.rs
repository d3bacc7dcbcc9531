use crate::frame::{FrameUniforms, Viewport};
use wormhole_kernel::Simulation;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads the simulation and the viewport, then produces output.
/// It never moves the camera; the simulation owns the pose.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of the current simulation state.
    fn render(&mut self, sim: &Simulation, viewport: &Viewport) -> Self::Output;
}

/// Text renderer for headless runs.
///
/// Describes the frame the GPU backend would draw: camera, galaxy and the
/// per-frame uniforms. Used by the CLI and in tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&mut self, sim: &Simulation, viewport: &Viewport) -> String {
        let uniforms = FrameUniforms::for_frame(sim, viewport);
        let p = uniforms.camera_position;
        let f = sim.pose().forward();
        let (rw, rh) = viewport.render_size();

        let mut out = String::new();
        out.push_str(&format!(
            "=== Frame {} (galaxy={:?}, crossings={}) ===\n",
            sim.frame(),
            sim.galaxy(),
            sim.crossing_count()
        ));
        out.push_str(&format!(
            "Viewport: {}x{} render={}x{} ({})\n",
            viewport.width,
            viewport.height,
            rw,
            rh,
            viewport.scale.label()
        ));
        out.push_str(&format!(
            "Camera: pos=({:.3}, {:.3}, {:.3}) forward=({:.3}, {:.3}, {:.3})\n",
            p.x, p.y, p.z, f.x, f.y, f.z
        ));
        let w = sim.scene().wormhole;
        out.push_str(&format!(
            "Wormhole: distance={:.3} radius={:.2}\n",
            p.distance(w.center),
            w.radius
        ));
        out.push_str(&format!("start_galaxy uniform: {}\n", uniforms.start_galaxy));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::ResolutionScale;
    use glam::{Quat, Vec3};
    use wormhole_common::CameraPose;
    use wormhole_kernel::SceneConfig;

    fn viewport() -> Viewport {
        Viewport::new(800, 600, ResolutionScale::default())
    }

    #[test]
    fn fresh_simulation_description() {
        let sim = Simulation::new(SceneConfig::default());
        let output = DebugTextRenderer::new().render(&sim, &viewport());

        assert!(output.contains("Frame 0"));
        assert!(output.contains("galaxy=Home"));
        assert!(output.contains("render=400x300 (1/2)"));
        assert!(output.contains("start_galaxy uniform: 0"));
    }

    #[test]
    fn reports_far_galaxy_after_crossing() {
        let mut sim = Simulation::new(SceneConfig::default());
        let centre = sim.scene().wormhole.center;
        sim.set_pose(CameraPose {
            position: centre + Vec3::new(0.0, 0.0, 0.5),
            orientation: Quat::IDENTITY,
        });

        struct Dive;
        impl wormhole_kernel::CameraControls for Dive {
            fn update(&mut self, pose: &mut CameraPose, _dt: f32) {
                pose.position.z -= 0.4;
            }
        }
        let mut controls: [&mut dyn wormhole_kernel::CameraControls; 1] = [&mut Dive];
        sim.advance(0.016, &mut controls);

        let output = DebugTextRenderer::new().render(&sim, &viewport());
        assert!(output.contains("galaxy=Far"));
        assert!(output.contains("crossings=1"));
        assert!(output.contains("start_galaxy uniform: 1"));
    }
}
