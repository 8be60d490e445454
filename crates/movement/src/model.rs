//! The pure per-tick step: `(state, input, grounded, dt) -> Step`.

use engine_core::{CapsuleGeometry, Vec3};
use glam::Vec2;
use input::InputSampler;

use crate::config::{ConfigError, MovementConfig};
use crate::orientation::{Orientation, PitchLimits};
use crate::posture::{Posture, PostureProfile};
use crate::resolver;
use crate::vertical::{jump_velocity, MotionState};

/// Everything that evolves tick to tick for one agent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AgentState {
    pub orientation: Orientation,
    pub posture: Posture,
    pub motion: MotionState,
}

impl AgentState {
    /// Respawn: motion and posture start over, facing is kept.
    pub fn respawned(&self) -> Self {
        Self {
            orientation: self.orientation,
            ..Default::default()
        }
    }
}

/// Input snapshot for one tick, with the jump edge already consumed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub move_axis: Vec2,
    pub look_axis: Vec2,
    pub jump: bool,
    pub crouch_held: bool,
}

impl FrameInput {
    /// Read the sampler, consuming its jump edge.
    pub fn sample(sampler: &mut InputSampler) -> Self {
        Self {
            move_axis: sampler.sample_move(),
            look_axis: sampler.sample_look(),
            jump: sampler.consume_jump_edge(),
            crouch_held: sampler.crouch_held(),
        }
    }
}

/// Result of advancing one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub state: AgentState,
    /// Displacement to submit to the collision solver.
    pub displacement: Vec3,
    /// New capsule when the posture changed this tick.
    pub capsule: Option<CapsuleGeometry>,
    pub jumped: bool,
}

/// Validated tuning plus derived constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementModel {
    config: MovementConfig,
    profile: PostureProfile,
    limits: PitchLimits,
    launch_velocity: f32,
}

impl MovementModel {
    /// Validate `config` against the agent's standing capsule.
    pub fn new(config: MovementConfig, standing: CapsuleGeometry) -> Result<Self, ConfigError> {
        config.validate()?;
        let profile = PostureProfile::new(standing, &config)?;
        Ok(Self {
            config,
            profile,
            limits: PitchLimits {
                down: config.max_look_down,
                up: config.max_look_up,
            },
            launch_velocity: jump_velocity(config.jump_height, config.gravity),
        })
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    pub fn profile(&self) -> &PostureProfile {
        &self.profile
    }

    /// Speed for the given posture.
    pub fn speed(&self, posture: Posture) -> f32 {
        self.config.move_speed * self.profile.speed_multiplier(posture)
    }

    /// Advance one tick. `grounded` is the solver's verdict from the previous
    /// tick's move. Negative or NaN `dt` counts as zero.
    pub fn advance(&self, state: AgentState, input: &FrameInput, grounded: bool, dt: f32) -> Step {
        let dt = dt.max(0.0);
        let mut next = state;

        next.orientation
            .apply_look(input.look_axis, self.config.look_sensitivity, dt, self.limits);

        next.posture = state.posture.follow_hold(input.crouch_held);
        let capsule = (next.posture != state.posture).then(|| self.profile.geometry(next.posture));

        next.motion.stabilize(grounded);
        let jumped = next
            .motion
            .try_jump(input.jump, grounded, next.posture, self.launch_velocity);
        next.motion.apply_gravity(self.config.gravity, dt);

        let displacement = resolver::displacement(
            input.move_axis,
            next.orientation.yaw_degrees,
            self.speed(next.posture),
            next.motion.vertical_velocity,
            dt,
        );

        Step {
            state: next,
            displacement,
            capsule,
            jumped,
        }
    }
}
