//! Goal mouths: axis-aligned trigger volumes that score when the ball enters.

use engine_core::Vec3;
use physics::PhysicsWorld;

use crate::context::{GoalOutcome, MatchContext};

#[derive(Debug, Clone, PartialEq)]
pub struct GoalZone {
    pub min: Vec3,
    pub max: Vec3,
    /// Points awarded per goal.
    pub points: u32,
    ball_inside: bool,
}

impl GoalZone {
    pub fn new(min: Vec3, max: Vec3, points: u32) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
            points,
            ball_inside: false,
        }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Check the ball against the zone. Scores once per entry and schedules the
    /// delayed ball reset.
    pub fn check(&mut self, ctx: &mut MatchContext, world: &mut PhysicsWorld) -> Option<GoalOutcome> {
        let position = ctx.ball().and_then(|ball| world.body_position(ball))?;
        let inside = self.contains(position);
        let entered = inside && !self.ball_inside;
        self.ball_inside = inside;
        if !entered {
            return None;
        }

        log::debug!("ball entered goal at {:?}", position);
        let outcome = ctx.goal(self.points, world);
        ctx.schedule_ball_reset();
        Some(outcome)
    }
}
