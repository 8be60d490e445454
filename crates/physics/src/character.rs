//! Kinematic character body backed by Rapier's character controller.
//!
//! The body's translation is the agent's feet; the capsule collider is offset
//! by [`CapsuleGeometry::center`]. Grounded state comes from the most recent
//! `move_shape` call and is what the next tick reads.

use anyhow::ensure;
use engine_core::{CapsuleGeometry, CollisionSolver, Vec3};
use rapier3d::control::{CharacterAutostep, CharacterLength, KinematicCharacterController};
use rapier3d::prelude::*;

use crate::collision::CollisionGroup;
use crate::physics_world::PhysicsWorld;

/// One agent's rigid body, collider and character controller settings.
pub struct CharacterBody {
    body: RigidBodyHandle,
    collider: ColliderHandle,
    controller: KinematicCharacterController,
    capsule: CapsuleGeometry,
    shape: SharedShape,
    position: Vec3,
    grounded: bool,
}

fn capsule_shape(capsule: &CapsuleGeometry) -> SharedShape {
    SharedShape::capsule_y(capsule.segment_half_height(), capsule.radius)
}

fn capsule_offset(capsule: &CapsuleGeometry) -> Isometry<Real> {
    Isometry::translation(capsule.center.x, capsule.center.y, capsule.center.z)
}

impl CharacterBody {
    /// Insert a kinematic body with a capsule collider at `position` (feet).
    pub fn spawn(
        world: &mut PhysicsWorld,
        position: Vec3,
        capsule: CapsuleGeometry,
    ) -> anyhow::Result<Self> {
        ensure!(
            capsule.radius > 0.0 && capsule.height >= capsule.radius * 2.0,
            "capsule must be at least as tall as it is wide (height {}, radius {})",
            capsule.height,
            capsule.radius
        );

        let body = world.add_kinematic_body(position);
        let shape = capsule_shape(&capsule);
        let collider = ColliderBuilder::new(shape.clone())
            .position(capsule_offset(&capsule))
            .collision_groups(CollisionGroup::agent())
            .build();
        let collider =
            world
                .collider_set
                .insert_with_parent(collider, body, &mut world.rigid_body_set);

        let mut controller = KinematicCharacterController::default();
        controller.autostep = Some(CharacterAutostep {
            max_height: CharacterLength::Absolute(0.3),
            min_width: CharacterLength::Absolute(0.2),
            include_dynamic_bodies: false,
        });
        controller.max_slope_climb_angle = 45.0_f32.to_radians();
        controller.snap_to_ground = Some(CharacterLength::Absolute(0.1));
        controller.offset = CharacterLength::Absolute(0.01);

        log::debug!("spawned character body at {:?} with {:?}", position, capsule);

        Ok(Self {
            body,
            collider,
            controller,
            capsule,
            shape,
            position,
            grounded: false,
        })
    }

    pub fn collider(&self) -> ColliderHandle {
        self.collider
    }

    /// Feet position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Move without collision (respawn). Clears the grounded flag.
    pub fn teleport(&mut self, world: &mut PhysicsWorld, position: Vec3) {
        self.position = position;
        self.grounded = false;
        world.reset_body(self.body, position);
    }

    /// Borrow this body together with its world as a [`CollisionSolver`] for one tick.
    pub fn solver<'a>(&'a mut self, world: &'a mut PhysicsWorld, dt: f32) -> CharacterSolver<'a> {
        CharacterSolver {
            character: self,
            world,
            dt,
        }
    }
}

/// A character body bound to its world for the duration of one tick.
pub struct CharacterSolver<'a> {
    character: &'a mut CharacterBody,
    world: &'a mut PhysicsWorld,
    dt: f32,
}

impl CollisionSolver for CharacterSolver<'_> {
    fn is_grounded(&self) -> bool {
        self.character.grounded
    }

    fn move_by(&mut self, displacement: Vec3) {
        let character = &mut *self.character;
        let center = character.position + character.capsule.center;
        let shape_pos = Isometry::translation(center.x, center.y, center.z);
        let filter = QueryFilter::default().exclude_rigid_body(character.body);

        let movement = character.controller.move_shape(
            self.dt,
            &self.world.rigid_body_set,
            &self.world.collider_set,
            &self.world.query_pipeline,
            &*character.shape,
            &shape_pos,
            vector![displacement.x, displacement.y, displacement.z],
            filter,
            |_| {},
        );

        character.position += Vec3::new(
            movement.translation.x,
            movement.translation.y,
            movement.translation.z,
        );
        character.grounded = movement.grounded;
        self.world
            .set_kinematic_position(character.body, character.position);
    }

    fn capsule(&self) -> CapsuleGeometry {
        self.character.capsule
    }

    fn set_capsule(&mut self, capsule: CapsuleGeometry) {
        let character = &mut *self.character;
        character.capsule = capsule;
        character.shape = capsule_shape(&capsule);
        if let Some(collider) = self.world.collider_set.get_mut(character.collider) {
            collider.set_shape(character.shape.clone());
            collider.set_position_wrt_parent(capsule_offset(&capsule));
        }
    }
}
