//! The match context: score, level references and ball resets.

use engine_core::{EventChannel, SubscriptionId, Vec3};
use physics::{PhysicsWorld, RigidBodyHandle};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scoring rules, loaded with the rest of the game config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Score at which the match is won and restarted.
    #[serde(default = "default_points_to_win")]
    pub points_to_win: u32,
    /// Marker tag of the ball body.
    #[serde(default = "default_ball_tag")]
    pub ball_tag: String,
    /// Marker tag of the ball spawn point.
    #[serde(default = "default_ball_spawn_tag")]
    pub ball_spawn_tag: String,
    /// Delay between a goal and the ball going back to its spawn.
    #[serde(default = "default_reset_delay_secs")]
    pub reset_delay_secs: f32,
}

fn default_points_to_win() -> u32 {
    5
}
fn default_ball_tag() -> String {
    "ball".to_string()
}
fn default_ball_spawn_tag() -> String {
    "ball_spawn".to_string()
}
fn default_reset_delay_secs() -> f32 {
    1.0
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            points_to_win: default_points_to_win(),
            ball_tag: default_ball_tag(),
            ball_spawn_tag: default_ball_spawn_tag(),
            reset_delay_secs: default_reset_delay_secs(),
        }
    }
}

/// A tagged object placed in a level.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelMarker {
    pub tag: String,
    pub position: Vec3,
    /// Physics body backing the marker, if any.
    pub body: Option<RigidBodyHandle>,
}

/// Published by the host whenever a level finishes loading.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelLoaded {
    pub scene: String,
    pub markers: Vec<LevelMarker>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("match context is already subscribed to level events")]
    AlreadyInitialized,
}

/// What a goal did to the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalOutcome {
    Scored { score: u32 },
    MatchWon,
}

/// Score keeper and ball wrangler for the current level.
#[derive(Debug, Default)]
pub struct MatchContext {
    config: MatchConfig,
    score: u32,
    subscription: Option<SubscriptionId>,
    scene: Option<String>,
    ball: Option<RigidBodyHandle>,
    ball_spawn: Option<Vec3>,
    /// Seconds until a scheduled ball reset.
    pending_reset: Option<f32>,
}

impl MatchContext {
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Start following level loads.
    pub fn init(&mut self, levels: &mut EventChannel<LevelLoaded>) -> Result<(), ScoringError> {
        if self.subscription.is_some() {
            return Err(ScoringError::AlreadyInitialized);
        }
        self.subscription = Some(levels.subscribe());
        Ok(())
    }

    /// Stop following level loads and forget level references.
    pub fn teardown(&mut self, levels: &mut EventChannel<LevelLoaded>) {
        if let Some(id) = self.subscription.take() {
            levels.unsubscribe(id);
        }
        self.scene = None;
        self.ball = None;
        self.ball_spawn = None;
        self.pending_reset = None;
    }

    pub fn is_initialized(&self) -> bool {
        self.subscription.is_some()
    }

    /// Handle pending level loads: re-resolve tagged references and put the
    /// ball on its spawn. Returns how many loads were processed.
    pub fn poll_level_events(
        &mut self,
        levels: &mut EventChannel<LevelLoaded>,
        world: &mut PhysicsWorld,
    ) -> usize {
        let Some(id) = self.subscription else {
            return 0;
        };
        let loads = levels.drain(id);
        for level in &loads {
            self.refresh_level_references(level);
            self.reset_ball(world);
        }
        loads.len()
    }

    fn refresh_level_references(&mut self, level: &LevelLoaded) {
        let find = |tag: &str| level.markers.iter().find(|m| m.tag == tag);
        self.ball = find(&self.config.ball_tag).and_then(|m| m.body);
        self.ball_spawn = find(&self.config.ball_spawn_tag).map(|m| m.position);
        self.scene = Some(level.scene.clone());
        self.pending_reset = None;

        if self.ball.is_none() || self.ball_spawn.is_none() {
            log::warn!(
                "level '{}' is missing '{}' or '{}' markers; ball resets disabled",
                level.scene,
                self.config.ball_tag,
                self.config.ball_spawn_tag
            );
        }
    }

    /// Add points; reaching `points_to_win` restarts the match.
    pub fn goal(&mut self, points: u32, world: &mut PhysicsWorld) -> GoalOutcome {
        self.score += points;
        log::info!("goal: +{} (score {})", points, self.score);
        if self.score >= self.config.points_to_win {
            self.reset_match(world);
            GoalOutcome::MatchWon
        } else {
            GoalOutcome::Scored { score: self.score }
        }
    }

    fn reset_match(&mut self, world: &mut PhysicsWorld) {
        self.score = 0;
        self.reset_ball(world);
        log::info!("match won");
    }

    /// Put the ball on its spawn point with zero velocity. No-op (false) when
    /// the level did not provide both references.
    pub fn reset_ball(&self, world: &mut PhysicsWorld) -> bool {
        match (self.ball, self.ball_spawn) {
            (Some(ball), Some(spawn)) => world.reset_body(ball, spawn),
            _ => false,
        }
    }

    /// Reset the ball after the configured delay.
    pub fn schedule_ball_reset(&mut self) {
        self.pending_reset = Some(self.config.reset_delay_secs);
    }

    /// Count down a scheduled reset. Returns true on the tick it fires.
    pub fn update(&mut self, dt: f32, world: &mut PhysicsWorld) -> bool {
        let Some(remaining) = self.pending_reset.as_mut() else {
            return false;
        };
        *remaining -= dt.max(0.0);
        if *remaining > 0.0 {
            return false;
        }
        self.pending_reset = None;
        self.reset_ball(world);
        true
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn scene(&self) -> Option<&str> {
        self.scene.as_deref()
    }

    pub fn ball(&self) -> Option<RigidBodyHandle> {
        self.ball
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(world: &mut PhysicsWorld, spawn: Vec3) -> (LevelLoaded, RigidBodyHandle) {
        let ball = world.add_ball(Vec3::new(10.0, 3.0, 10.0), 0.25);
        let level = LevelLoaded {
            scene: "pitch".to_string(),
            markers: vec![
                LevelMarker {
                    tag: "ball".to_string(),
                    position: Vec3::new(10.0, 3.0, 10.0),
                    body: Some(ball),
                },
                LevelMarker {
                    tag: "ball_spawn".to_string(),
                    position: spawn,
                    body: None,
                },
            ],
        };
        (level, ball)
    }

    fn initialized() -> (MatchContext, EventChannel<LevelLoaded>) {
        let mut levels = EventChannel::new();
        let mut ctx = MatchContext::new(MatchConfig::default());
        ctx.init(&mut levels).expect("first init");
        (ctx, levels)
    }

    #[test]
    fn init_twice_is_an_error() {
        let (mut ctx, mut levels) = initialized();
        assert_eq!(ctx.init(&mut levels), Err(ScoringError::AlreadyInitialized));
        assert_eq!(levels.subscriber_count(), 1);
    }

    #[test]
    fn level_load_resolves_markers_and_resets_ball() {
        let (mut ctx, mut levels) = initialized();
        let mut world = PhysicsWorld::new();
        let spawn = Vec3::new(0.0, 1.0, -4.0);
        let (loaded, ball) = level(&mut world, spawn);

        levels.publish(loaded);
        assert_eq!(ctx.poll_level_events(&mut levels, &mut world), 1);
        assert_eq!(ctx.scene(), Some("pitch"));
        assert_eq!(ctx.ball(), Some(ball));
        assert_eq!(world.body_position(ball), Some(spawn));
    }

    #[test]
    fn teardown_stops_following_levels() {
        let (mut ctx, mut levels) = initialized();
        let mut world = PhysicsWorld::new();
        ctx.teardown(&mut levels);
        let (loaded, _) = level(&mut world, Vec3::ZERO);
        assert_eq!(levels.publish(loaded), 0);
        assert_eq!(ctx.poll_level_events(&mut levels, &mut world), 0);
        assert!(!ctx.is_initialized());
    }

    #[test]
    fn missing_markers_make_reset_a_no_op() {
        let (mut ctx, mut levels) = initialized();
        let mut world = PhysicsWorld::new();
        levels.publish(LevelLoaded {
            scene: "empty".to_string(),
            markers: Vec::new(),
        });
        ctx.poll_level_events(&mut levels, &mut world);
        assert!(!ctx.reset_ball(&mut world));
    }

    #[test]
    fn reaching_points_to_win_restarts_match() {
        let (mut ctx, mut levels) = initialized();
        let mut world = PhysicsWorld::new();
        let spawn = Vec3::new(0.0, 1.0, 0.0);
        let (loaded, ball) = level(&mut world, spawn);
        levels.publish(loaded);
        ctx.poll_level_events(&mut levels, &mut world);

        for expected in 1..5 {
            assert_eq!(
                ctx.goal(1, &mut world),
                GoalOutcome::Scored { score: expected }
            );
        }
        world.apply_impulse(ball, Vec3::new(0.0, 0.0, 5.0));
        world.step(1.0 / 60.0);

        assert_eq!(ctx.goal(1, &mut world), GoalOutcome::MatchWon);
        assert_eq!(ctx.score(), 0);
        assert_eq!(world.body_position(ball), Some(spawn));
        assert_eq!(world.body_velocity(ball), Vec3::ZERO);
    }

    #[test]
    fn scheduled_reset_fires_after_delay() {
        let (mut ctx, mut levels) = initialized();
        let mut world = PhysicsWorld::new();
        let spawn = Vec3::new(2.0, 1.0, 2.0);
        let (loaded, ball) = level(&mut world, spawn);
        levels.publish(loaded);
        ctx.poll_level_events(&mut levels, &mut world);
        world.reset_body(ball, Vec3::new(9.0, 0.5, 9.0));

        ctx.schedule_ball_reset();
        assert!(!ctx.update(0.5, &mut world));
        assert_eq!(world.body_position(ball), Some(Vec3::new(9.0, 0.5, 9.0)));
        assert!(ctx.update(0.5, &mut world));
        assert_eq!(world.body_position(ball), Some(spawn));
        assert!(!ctx.update(1.0, &mut world));
    }
}
