//! First-person controller: the per-agent pipeline driven by a host loop.
//!
//! A tick drains the agent's input subscription, advances the pure
//! [`MovementModel`], pushes posture geometry and the displacement into the
//! [`CollisionSolver`], and mirrors pitch onto the camera mount if one is bound.

use engine_core::{CapsuleGeometry, CollisionSolver, EventChannel, Quat, SubscriptionId, Transform};
use input::{InputEvent, InputSampler};

use crate::config::{ConfigError, MovementConfig};
use crate::model::{AgentState, FrameInput, MovementModel, Step};
use crate::posture::Posture;

pub struct FirstPersonController {
    model: MovementModel,
    state: AgentState,
    sampler: InputSampler,
    subscription: Option<SubscriptionId>,
    camera_warned: bool,
}

impl FirstPersonController {
    /// Build a controller for an agent whose collision body currently has the
    /// `standing` capsule. Invalid configuration is rejected here.
    pub fn new(config: MovementConfig, standing: CapsuleGeometry) -> Result<Self, ConfigError> {
        Ok(Self {
            model: MovementModel::new(config, standing)?,
            state: AgentState::default(),
            sampler: InputSampler::new(),
            subscription: None,
            camera_warned: false,
        })
    }

    /// Attach to the input channel. Only events published afterwards are seen.
    pub fn enable(&mut self, channel: &mut EventChannel<InputEvent>) {
        if self.subscription.is_none() {
            self.subscription = Some(channel.subscribe());
        }
    }

    /// Detach from the input channel. Queued events are discarded and the
    /// sampled input is cleared, so nothing stale survives a later `enable`.
    pub fn disable(&mut self, channel: &mut EventChannel<InputEvent>) {
        if let Some(id) = self.subscription.take() {
            channel.unsubscribe(id);
            self.sampler.clear();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.subscription.is_some()
    }

    /// Run one tick. Returns `None` while disabled.
    pub fn tick<S: CollisionSolver>(
        &mut self,
        channel: &mut EventChannel<InputEvent>,
        solver: &mut S,
        camera: Option<&mut Transform>,
        dt: f32,
    ) -> Option<Step> {
        let id = self.subscription?;
        self.sampler.apply_all(channel.drain(id));
        let input = FrameInput::sample(&mut self.sampler);

        let step = self.model.advance(self.state, &input, solver.is_grounded(), dt);

        if let Some(capsule) = step.capsule {
            log::debug!(
                "posture {:?} -> {:?} (height {})",
                self.state.posture,
                step.state.posture,
                capsule.height
            );
            solver.set_capsule(capsule);
        }
        if step.jumped {
            log::debug!("jump at {:.3} m/s", step.state.motion.vertical_velocity);
        }

        solver.move_by(step.displacement);
        self.state = step.state;
        self.present(camera);

        Some(step)
    }

    fn present(&mut self, camera: Option<&mut Transform>) {
        match camera {
            Some(camera) => {
                camera.rotation = self.state.orientation.camera_rotation();
                self.camera_warned = false;
            }
            None => {
                if !self.camera_warned {
                    log::warn!("FirstPersonController: no camera bound, pitch is not presented");
                    self.camera_warned = true;
                }
            }
        }
    }

    /// Reinitialize motion and posture, restoring the standing capsule.
    pub fn respawn<S: CollisionSolver>(&mut self, solver: &mut S) {
        if self.state.posture != Posture::Standing {
            solver.set_capsule(self.model.profile().geometry(Posture::Standing));
        }
        self.state = self.state.respawned();
    }

    pub fn state(&self) -> &AgentState {
        &self.state
    }

    pub fn model(&self) -> &MovementModel {
        &self.model
    }

    pub fn yaw_degrees(&self) -> f32 {
        self.state.orientation.yaw_degrees
    }

    /// Read-only pitch for the presentation layer.
    pub fn pitch_degrees(&self) -> f32 {
        self.state.orientation.pitch_degrees
    }

    pub fn posture(&self) -> Posture {
        self.state.posture
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.state.motion.vertical_velocity
    }

    /// Current speed factor of the posture.
    pub fn speed_multiplier(&self) -> f32 {
        self.model.profile().speed_multiplier(self.state.posture)
    }

    /// Yaw rotation for the agent body.
    pub fn body_rotation(&self) -> Quat {
        self.state.orientation.body_rotation()
    }

    #[cfg(test)]
    fn camera_warning_issued(&self) -> bool {
        self.camera_warned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vertical::{jump_velocity, GROUND_STICK_VELOCITY};
    use engine_core::Vec3;
    use glam::Vec2;

    /// Solver that records what the controller asks of it.
    struct ScriptedSolver {
        grounded: bool,
        capsule: CapsuleGeometry,
        moves: Vec<Vec3>,
        capsule_writes: usize,
    }

    impl ScriptedSolver {
        fn new(grounded: bool) -> Self {
            Self {
                grounded,
                capsule: CapsuleGeometry {
                    height: 1.9,
                    radius: 0.4,
                    center: Vec3::new(0.1, 0.95, -0.05),
                },
                moves: Vec::new(),
                capsule_writes: 0,
            }
        }
    }

    impl CollisionSolver for ScriptedSolver {
        fn is_grounded(&self) -> bool {
            self.grounded
        }

        fn move_by(&mut self, displacement: Vec3) {
            self.moves.push(displacement);
        }

        fn capsule(&self) -> CapsuleGeometry {
            self.capsule
        }

        fn set_capsule(&mut self, capsule: CapsuleGeometry) {
            self.capsule = capsule;
            self.capsule_writes += 1;
        }
    }

    fn setup(grounded: bool) -> (FirstPersonController, EventChannel<InputEvent>, ScriptedSolver) {
        let solver = ScriptedSolver::new(grounded);
        let mut channel = EventChannel::new();
        let mut controller =
            FirstPersonController::new(MovementConfig::default(), solver.capsule()).expect("valid");
        controller.enable(&mut channel);
        (controller, channel, solver)
    }

    #[test]
    fn rejects_inverted_pitch_limits() {
        let config = MovementConfig {
            max_look_down: 10.0,
            max_look_up: -10.0,
            ..Default::default()
        };
        assert!(FirstPersonController::new(config, CapsuleGeometry::default()).is_err());
    }

    #[test]
    fn forward_walk_scenario() {
        let (mut c, mut channel, mut solver) = setup(true);
        channel.publish(InputEvent::MoveChanged(Vec2::new(0.0, 1.0)));
        c.tick(&mut channel, &mut solver, None, 0.1);

        let d = solver.moves[0];
        assert!((d.x).abs() < 1e-6);
        assert!((d.z + 0.5).abs() < 1e-6);
    }

    #[test]
    fn grounded_jump_sets_launch_velocity_before_gravity() {
        let (mut c, mut channel, mut solver) = setup(true);
        channel.publish(InputEvent::JumpPressed);
        let step = c.tick(&mut channel, &mut solver, None, 0.02).expect("enabled");
        assert!(step.jumped);

        let launch = jump_velocity(1.5, -9.81);
        assert!((launch - 5.425).abs() < 1e-3);
        assert!((c.vertical_velocity() - (launch - 9.81 * 0.02)).abs() < 1e-5);
    }

    #[test]
    fn one_press_is_one_jump_attempt() {
        let (mut c, mut channel, mut solver) = setup(true);
        channel.publish(InputEvent::JumpPressed);
        let first = c.tick(&mut channel, &mut solver, None, 0.016).expect("enabled");
        let second = c.tick(&mut channel, &mut solver, None, 0.016).expect("enabled");
        assert!(first.jumped);
        assert!(!second.jumped);
    }

    #[test]
    fn crouched_jump_is_rejected_regardless_of_ground() {
        for grounded in [true, false] {
            let (mut c, mut channel, mut solver) = setup(grounded);
            channel.publish(InputEvent::CrouchPressed);
            c.tick(&mut channel, &mut solver, None, 0.016);
            let before = c.vertical_velocity();

            channel.publish(InputEvent::JumpPressed);
            let step = c.tick(&mut channel, &mut solver, None, 0.0).expect("enabled");
            assert!(!step.jumped);
            if grounded {
                assert_eq!(c.vertical_velocity(), GROUND_STICK_VELOCITY);
            } else {
                assert_eq!(c.vertical_velocity(), before);
            }
        }
    }

    #[test]
    fn grounded_fall_is_stabilized_each_tick() {
        let (mut c, mut channel, mut solver) = setup(true);
        for _ in 0..10 {
            c.tick(&mut channel, &mut solver, None, 0.0);
            assert_eq!(c.vertical_velocity(), 0.0);
        }
        c.tick(&mut channel, &mut solver, None, 0.1);
        // dt = 0 isolates the pre-gravity value.
        c.tick(&mut channel, &mut solver, None, 0.0);
        assert_eq!(c.vertical_velocity(), GROUND_STICK_VELOCITY);
    }

    #[test]
    fn crouch_round_trip_restores_solver_capsule() {
        let (mut c, mut channel, mut solver) = setup(true);
        let original = solver.capsule();

        channel.publish(InputEvent::CrouchPressed);
        c.tick(&mut channel, &mut solver, None, 0.016);
        assert_eq!(c.posture(), Posture::Crouching);
        assert_eq!(solver.capsule().height, 1.0);
        assert_eq!(solver.capsule().center, Vec3::new(0.1, 0.5, -0.05));
        assert_eq!(c.speed_multiplier(), 0.5);

        channel.publish(InputEvent::CrouchReleased);
        c.tick(&mut channel, &mut solver, None, 0.016);
        assert_eq!(c.posture(), Posture::Standing);
        let restored = solver.capsule();
        assert_eq!(restored.height.to_bits(), original.height.to_bits());
        assert_eq!(restored.radius.to_bits(), original.radius.to_bits());
        assert_eq!(restored.center.to_array().map(f32::to_bits), original.center.to_array().map(f32::to_bits));
    }

    #[test]
    fn redundant_crouch_presses_change_nothing() {
        let (mut c, mut channel, mut solver) = setup(true);
        channel.publish(InputEvent::CrouchPressed);
        c.tick(&mut channel, &mut solver, None, 0.016);
        let capsule = solver.capsule();
        let multiplier = c.speed_multiplier();

        for _ in 0..8 {
            channel.publish(InputEvent::CrouchPressed);
            c.tick(&mut channel, &mut solver, None, 0.016);
            assert_eq!(solver.capsule(), capsule);
            assert_eq!(c.speed_multiplier(), multiplier);
        }
        assert_eq!(solver.capsule_writes, 1);
    }

    #[test]
    fn pitch_is_clamped_and_presented_to_camera() {
        let (mut c, mut channel, mut solver) = setup(true);
        let mut camera = Transform::default();
        channel.publish(InputEvent::LookChanged(Vec2::new(0.0, 1000.0)));
        for _ in 0..20 {
            c.tick(&mut channel, &mut solver, Some(&mut camera), 0.1);
            assert!(c.pitch_degrees() >= -80.0 && c.pitch_degrees() <= 80.0);
        }
        assert_eq!(c.pitch_degrees(), -80.0);
        assert_eq!(camera.rotation, engine_core::pitch_rotation(-80.0));
    }

    #[test]
    fn missing_camera_still_updates_orientation() {
        let (mut c, mut channel, mut solver) = setup(true);
        channel.publish(InputEvent::LookChanged(Vec2::new(4.0, -2.0)));
        c.tick(&mut channel, &mut solver, None, 0.1);
        assert!((c.yaw_degrees() - 10.0).abs() < 1e-5);
        assert!((c.pitch_degrees() - 5.0).abs() < 1e-5);
    }

    #[test]
    fn camera_warning_fires_once_per_lost_binding() {
        let (mut c, mut channel, mut solver) = setup(true);
        let mut camera = Transform::default();
        assert!(!c.camera_warning_issued());

        c.tick(&mut channel, &mut solver, None, 0.016);
        assert!(c.camera_warning_issued());
        c.tick(&mut channel, &mut solver, None, 0.016);
        assert!(c.camera_warning_issued());

        // Binding a camera re-arms the warning.
        c.tick(&mut channel, &mut solver, Some(&mut camera), 0.016);
        assert!(!c.camera_warning_issued());

        c.tick(&mut channel, &mut solver, None, 0.016);
        assert!(c.camera_warning_issued());
    }

    #[test]
    fn disabled_controller_ignores_input_and_does_not_move() {
        let (mut c, mut channel, mut solver) = setup(true);
        channel.publish(InputEvent::MoveChanged(Vec2::Y));
        c.tick(&mut channel, &mut solver, None, 0.1);

        c.disable(&mut channel);
        assert!(!c.is_enabled());
        channel.publish(InputEvent::JumpPressed);
        assert!(c.tick(&mut channel, &mut solver, None, 0.1).is_none());
        assert_eq!(solver.moves.len(), 1);

        // Nothing published while detached leaks into the next subscription.
        c.enable(&mut channel);
        let step = c.tick(&mut channel, &mut solver, None, 0.1).expect("enabled");
        assert!(!step.jumped);
        assert_eq!(step.displacement.x, 0.0);
        assert_eq!(step.displacement.z, 0.0);
    }

    #[test]
    fn enable_twice_keeps_single_subscription() {
        let (mut c, mut channel, _) = setup(true);
        c.enable(&mut channel);
        assert_eq!(channel.subscriber_count(), 1);
        c.disable(&mut channel);
        c.disable(&mut channel);
        assert_eq!(channel.subscriber_count(), 0);
    }

    #[test]
    fn respawn_stands_up_and_stops_falling() {
        let (mut c, mut channel, mut solver) = setup(false);
        let original = solver.capsule();
        channel.publish(InputEvent::CrouchPressed);
        for _ in 0..5 {
            c.tick(&mut channel, &mut solver, None, 0.1);
        }
        assert!(c.vertical_velocity() < 0.0);

        c.respawn(&mut solver);
        assert_eq!(c.posture(), Posture::Standing);
        assert_eq!(c.vertical_velocity(), 0.0);
        assert_eq!(solver.capsule(), original);
    }
}
