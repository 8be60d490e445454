//! Headless sandbox: one agent, a floor, a ball and a goal, driven by a
//! host-owned simulation loop.

use std::time::Duration;

use anyhow::Result;
use engine_core::{CapsuleGeometry, EventChannel, FrameClock, Transform, Vec3};
use hecs::World;
use input::{DeviceTranslator, InputEvent, KeyBindings};
use movement::{FirstPersonController, Posture};
use physics::{CharacterBody, PhysicsWorld};
use scoring::{GoalZone, LevelLoaded, LevelMarker, MatchContext};

use crate::config::GameConfig;
use crate::script::InputScript;

/// Camera mounted on an agent; receives the controller's pitch each tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct CameraMount {
    pub local: Transform,
    /// Eye height above the feet.
    pub eye_height: f32,
}

const AGENT_SPAWN: Vec3 = Vec3::new(0.0, 0.0, 0.0);
/// Agents falling below this height are respawned.
const KILL_PLANE_Y: f32 = -20.0;
const BALL_SPAWN: Vec3 = Vec3::new(2.0, 0.25, -4.0);

/// Snapshot of the agent for logging and tests.
#[derive(Debug, Clone, Copy)]
pub struct AgentReport {
    pub position: Vec3,
    /// Horizontal facing of the body.
    pub facing: Vec3,
    pub yaw_degrees: f32,
    pub pitch_degrees: f32,
    pub posture: Posture,
    pub grounded: bool,
}

pub struct Sandbox {
    world: World,
    physics: PhysicsWorld,
    inputs: EventChannel<InputEvent>,
    levels: EventChannel<LevelLoaded>,
    translator: DeviceTranslator,
    scoring: MatchContext,
    goal: GoalZone,
    clock: FrameClock,
    agent: hecs::Entity,
    config: GameConfig,
}

impl Sandbox {
    /// Build the level and the agent. Fails fast on invalid movement config.
    pub fn new(config: GameConfig) -> Result<Self> {
        let mut physics = PhysicsWorld::new();
        // Floor: top face at y = 0.
        physics.add_static_cuboid(Vec3::new(0.0, -0.5, 0.0), 0.0, Vec3::new(40.0, 0.5, 40.0));
        physics.add_static_cuboid(Vec3::new(0.0, 1.0, -14.0), 0.0, Vec3::new(6.0, 1.0, 0.25));
        let ball = physics.add_ball(BALL_SPAWN, 0.25);

        let session = &config.session;
        let capsule = CapsuleGeometry::standing(session.agent_height, session.agent_radius);
        let body = CharacterBody::spawn(&mut physics, AGENT_SPAWN, capsule)?;
        physics.update_query_pipeline();

        let mut inputs = EventChannel::new();
        let mut controller = FirstPersonController::new(config.movement, capsule)?;
        controller.enable(&mut inputs);

        let mut world = World::new();
        let agent = world.spawn((
            controller,
            body,
            Transform::from_position(AGENT_SPAWN),
            CameraMount {
                local: Transform::default(),
                eye_height: session.agent_height * 0.9,
            },
        ));

        let mut levels = EventChannel::new();
        let mut scoring = MatchContext::new(config.scoring.clone());
        scoring.init(&mut levels)?;
        levels.publish(LevelLoaded {
            scene: "sandbox".to_string(),
            markers: vec![
                LevelMarker {
                    tag: config.scoring.ball_tag.clone(),
                    position: BALL_SPAWN,
                    body: Some(ball),
                },
                LevelMarker {
                    tag: config.scoring.ball_spawn_tag.clone(),
                    position: BALL_SPAWN,
                    body: None,
                },
            ],
        });
        scoring.poll_level_events(&mut levels, &mut physics);

        let goal = GoalZone::new(Vec3::new(-3.0, 0.0, -13.5), Vec3::new(3.0, 2.0, -11.0), 1);

        Ok(Self {
            world,
            physics,
            inputs,
            levels,
            translator: DeviceTranslator::new(KeyBindings::default()),
            scoring,
            goal,
            clock: FrameClock::new(),
            agent,
            config,
        })
    }

    /// Variable step: every third tick runs 50% long.
    fn step_duration(&self, tick: u64) -> Duration {
        let nominal = 1.0 / self.config.session.tick_hz.max(1.0);
        let secs = if tick % 3 == 2 { nominal * 1.5 } else { nominal };
        Duration::from_secs_f32(secs)
    }

    /// Advance one tick of the whole pipeline.
    pub fn tick(&mut self, tick: u64, script: &InputScript) {
        self.clock.advance(self.step_duration(tick));
        let dt = self.clock.delta_seconds();

        script.feed(tick, &mut self.translator);
        self.translator.flush(&mut self.inputs);

        for (_, (controller, body, transform, camera)) in self.world.query_mut::<(
            &mut FirstPersonController,
            &mut CharacterBody,
            &mut Transform,
            Option<&mut CameraMount>,
        )>() {
            let camera = camera.map(|mount| {
                mount.local.position = Vec3::new(0.0, mount.eye_height, 0.0);
                &mut mount.local
            });
            let mut solver = body.solver(&mut self.physics, dt);
            controller.tick(&mut self.inputs, &mut solver, camera, dt);

            if body.position().y < KILL_PLANE_Y {
                log::info!("agent fell out of the level at {:?}, respawning", body.position());
                controller.respawn(&mut body.solver(&mut self.physics, dt));
                body.teleport(&mut self.physics, AGENT_SPAWN);
            }

            transform.position = body.position();
            transform.rotation = controller.body_rotation();
        }

        self.physics.step(dt);
        self.scoring.poll_level_events(&mut self.levels, &mut self.physics);
        self.goal.check(&mut self.scoring, &mut self.physics);
        self.scoring.update(dt, &mut self.physics);
    }

    /// Run the configured number of ticks.
    pub fn run(&mut self, script: &InputScript) -> Option<AgentReport> {
        let log_every = self.config.session.log_every.max(1);
        for tick in 0..self.config.session.ticks {
            self.tick(tick, script);
            if tick % log_every != 0 {
                continue;
            }
            if let Some(report) = self.report() {
                log::info!(
                    "t={:.2}s pos=({:.2}, {:.2}, {:.2}) yaw={:.1} pitch={:.1} {:?} grounded={}",
                    self.clock.elapsed_seconds(),
                    report.position.x,
                    report.position.y,
                    report.position.z,
                    report.yaw_degrees,
                    report.pitch_degrees,
                    report.posture,
                    report.grounded,
                );
            }
        }
        log::info!(
            "session done after {} ticks, score {}",
            self.clock.frame_count(),
            self.scoring.score()
        );
        self.report()
    }

    pub fn report(&self) -> Option<AgentReport> {
        let mut query = self
            .world
            .query_one::<(&FirstPersonController, &CharacterBody, &Transform)>(self.agent)
            .ok()?;
        let (controller, body, transform) = query.get()?;
        Some(AgentReport {
            position: body.position(),
            facing: transform.forward(),
            yaw_degrees: controller.yaw_degrees(),
            pitch_degrees: controller.pitch_degrees(),
            posture: controller.posture(),
            grounded: body.is_grounded(),
        })
    }

    /// Push the ball (towards the goal, typically).
    pub fn kick_ball(&mut self, impulse: Vec3) {
        if let Some(ball) = self.scoring.ball() {
            self.physics.apply_impulse(ball, impulse);
        }
    }

    pub fn score(&self) -> u32 {
        self.scoring.score()
    }
}
