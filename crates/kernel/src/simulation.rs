use crate::scene::SceneConfig;
use crate::wormhole::{self, Crossing};
use glam::{Quat, Vec3};
use wormhole_common::{CameraPose, Galaxy};

/// Something that moves the camera each frame: keyboard, tablet, a script.
pub trait CameraControls {
    /// Apply this frame's input to the camera.
    fn update(&mut self, pose: &mut CameraPose, dt: f32);

    /// Called after the camera was turned by a wormhole crossing.
    fn on_teleport(&mut self, _rotation: Quat) {}
}

/// A record of something notable the simulation did.
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    /// The camera went through the wormhole and now sees `galaxy`.
    WormholeCrossed {
        frame: u64,
        entry: Vec3,
        exit: Vec3,
        galaxy: Galaxy,
    },
    /// Camera and galaxy were returned to their configured start.
    Reset { frame: u64 },
}

/// Per-frame camera state for the scene.
///
/// Owns the camera pose and the galaxy selector. The renderer only reads it.
#[derive(Debug, Clone)]
pub struct Simulation {
    scene: SceneConfig,
    pose: CameraPose,
    galaxy: Galaxy,
    frame: u64,
    crossings: u64,
    /// Append-only until drained.
    event_log: Vec<SimEvent>,
}

impl Simulation {
    pub fn new(scene: SceneConfig) -> Self {
        Self {
            pose: scene.camera_start,
            galaxy: scene.start_galaxy,
            scene,
            frame: 0,
            crossings: 0,
            event_log: Vec::new(),
        }
    }

    pub fn scene(&self) -> &SceneConfig {
        &self.scene
    }

    pub fn pose(&self) -> &CameraPose {
        &self.pose
    }

    /// Place the camera directly. Does not run the crossing test.
    pub fn set_pose(&mut self, pose: CameraPose) {
        self.pose = pose;
    }

    pub fn galaxy(&self) -> Galaxy {
        self.galaxy
    }

    /// Frames advanced so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Wormhole crossings so far.
    pub fn crossing_count(&self) -> u64 {
        self.crossings
    }

    pub fn events(&self) -> &[SimEvent] {
        &self.event_log
    }

    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Return the camera and galaxy to their configured start.
    pub fn reset(&mut self) {
        self.pose = self.scene.camera_start;
        self.galaxy = self.scene.start_galaxy;
        self.event_log.push(SimEvent::Reset { frame: self.frame });
        tracing::debug!("simulation reset at frame {}", self.frame);
    }

    /// Advance one frame: apply every control, then test for a wormhole crossing.
    pub fn advance(
        &mut self,
        dt: f32,
        controls: &mut [&mut dyn CameraControls],
    ) -> Option<Crossing> {
        self.frame += 1;
        let prev = self.pose.position;

        for control in controls.iter_mut() {
            control.update(&mut self.pose, dt);
        }

        let crossing = wormhole::traverse(&mut self.pose, prev, &self.scene.wormhole)?;

        self.galaxy = self.galaxy.toggled();
        self.crossings += 1;
        for control in controls.iter_mut() {
            control.on_teleport(crossing.rotation);
        }
        self.event_log.push(SimEvent::WormholeCrossed {
            frame: self.frame,
            entry: crossing.entry,
            exit: crossing.exit,
            galaxy: self.galaxy,
        });
        tracing::info!(
            frame = self.frame,
            galaxy = ?self.galaxy,
            "crossed wormhole at ({:.3}, {:.3}, {:.3})",
            crossing.entry.x,
            crossing.entry.y,
            crossing.entry.z
        );

        Some(crossing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Flies straight along the camera's view direction.
    struct Forward {
        speed: f32,
        teleports: usize,
    }

    impl CameraControls for Forward {
        fn update(&mut self, pose: &mut CameraPose, dt: f32) {
            pose.translate_local(Vec3::NEG_Z * self.speed * dt);
        }

        fn on_teleport(&mut self, _rotation: Quat) {
            self.teleports += 1;
        }
    }

    /// Flies forward until the first teleport, then backward for good.
    struct Shuttle {
        speed: f32,
    }

    impl CameraControls for Shuttle {
        fn update(&mut self, pose: &mut CameraPose, dt: f32) {
            pose.translate_local(Vec3::NEG_Z * self.speed * dt);
        }

        fn on_teleport(&mut self, _rotation: Quat) {
            self.speed = -self.speed.abs();
        }
    }

    /// A simulation whose camera sits 1 unit in front of the wormhole, facing it.
    fn facing_wormhole() -> Simulation {
        let scene = SceneConfig::default();
        let mut sim = Simulation::new(scene.clone());
        sim.set_pose(CameraPose {
            position: scene.wormhole.center + Vec3::Z,
            orientation: Quat::IDENTITY,
        });
        sim
    }

    #[test]
    fn starts_at_configured_pose_and_galaxy() {
        let sim = Simulation::new(SceneConfig::default());
        assert_eq!(sim.frame(), 0);
        assert_eq!(sim.galaxy(), Galaxy::Home);
        assert_eq!(sim.pose().position, Vec3::ZERO);
    }

    #[test]
    fn galaxy_flips_once_per_crossing() {
        let mut sim = facing_wormhole();
        let mut fly = Forward {
            speed: 1.0,
            teleports: 0,
        };
        let mut flips = 0;
        let mut last = sim.galaxy();
        for _ in 0..200 {
            let crossed = sim.advance(1.0 / 60.0, &mut [&mut fly]).is_some();
            let changed = sim.galaxy() != last;
            assert_eq!(crossed, changed, "galaxy changed without a crossing or vice versa");
            if changed {
                flips += 1;
            }
            last = sim.galaxy();
        }
        assert_eq!(flips, 1);
        assert_eq!(sim.crossing_count(), 1);
        assert_eq!(sim.galaxy(), Galaxy::Far);
        assert_eq!(fly.teleports, 1);
    }

    #[test]
    fn second_crossing_returns_home() {
        let mut sim = facing_wormhole();
        let mut shuttle = Shuttle { speed: 1.0 };
        let mut galaxies = Vec::new();
        for _ in 0..200 {
            let mut controls: [&mut dyn CameraControls; 1] = [&mut shuttle];
            if sim.advance(1.0 / 60.0, &mut controls).is_some() {
                galaxies.push(sim.galaxy());
            }
        }
        assert_eq!(galaxies, [Galaxy::Far, Galaxy::Home]);
        assert_eq!(sim.crossing_count(), 2);
        assert_eq!(sim.galaxy(), Galaxy::Home);
        let wormhole = sim.scene().wormhole;
        assert!(sim.pose().position.distance(wormhole.center) > wormhole.radius);
    }

    #[test]
    fn camera_ends_outside_on_far_side() {
        let mut sim = facing_wormhole();
        let wormhole = sim.scene().wormhole;
        let approach = sim.pose().position - wormhole.center;
        let mut fly = Forward {
            speed: 1.0,
            teleports: 0,
        };
        let crossing = (0..120)
            .find_map(|_| sim.advance(1.0 / 60.0, &mut [&mut fly]))
            .expect("flight reaches the wormhole");
        let exit = sim.pose().position;
        assert_eq!(exit, crossing.exit);
        assert!(exit.distance(wormhole.center) > wormhole.radius);
        assert!((exit - wormhole.center).dot(approach) < 0.0);
    }

    #[test]
    fn no_crossing_without_motion() {
        let mut sim = facing_wormhole();
        for _ in 0..10 {
            assert!(sim.advance(0.016, &mut []).is_none());
        }
        assert_eq!(sim.frame(), 10);
        assert_eq!(sim.galaxy(), Galaxy::Home);
        assert!(sim.events().is_empty());
    }

    #[test]
    fn crossing_is_logged_and_drainable() {
        let mut sim = facing_wormhole();
        let mut fly = Forward {
            speed: 2.0,
            teleports: 0,
        };
        for _ in 0..60 {
            sim.advance(1.0 / 60.0, &mut [&mut fly]);
        }
        let events = sim.drain_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            SimEvent::WormholeCrossed {
                galaxy: Galaxy::Far,
                ..
            }
        ));
        assert!(sim.events().is_empty());
    }

    #[test]
    fn reset_restores_start() {
        let mut sim = facing_wormhole();
        let mut fly = Forward {
            speed: 2.0,
            teleports: 0,
        };
        for _ in 0..60 {
            sim.advance(1.0 / 60.0, &mut [&mut fly]);
        }
        sim.reset();
        assert_eq!(sim.galaxy(), Galaxy::Home);
        assert_eq!(*sim.pose(), SceneConfig::default().camera_start);
        assert!(matches!(sim.events().last(), Some(SimEvent::Reset { .. })));
    }
}
