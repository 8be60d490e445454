//! Physics world management with Rapier3D.

use crate::collision::CollisionGroup;
use engine_core::Vec3;
use rapier3d::na::{Isometry3, Vector3};
use rapier3d::prelude::*;

/// Main physics world containing all simulation state.
pub struct PhysicsWorld {
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub gravity: Vector<Real>,
    pub integration_parameters: IntegrationParameters,
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: DefaultBroadPhase,
    pub narrow_phase: NarrowPhase,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
    pub query_pipeline: QueryPipeline,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    /// Create a new physics world with default gravity.
    pub fn new() -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            gravity: vector![0.0, -9.81, 0.0],
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Step the physics simulation by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    /// Update query pipeline so shape casts see freshly inserted colliders.
    pub fn update_query_pipeline(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Add a kinematic rigid body (for agents).
    pub fn add_kinematic_body(&mut self, position: Vec3) -> RigidBodyHandle {
        let rigid_body = RigidBodyBuilder::kinematic_position_based()
            .translation(vector![position.x, position.y, position.z])
            .build();
        self.rigid_body_set.insert(rigid_body)
    }

    /// Add a dynamic ball (prop) and return its body handle.
    pub fn add_ball(&mut self, position: Vec3, radius: f32) -> RigidBodyHandle {
        let rigid_body = RigidBodyBuilder::dynamic()
            .translation(vector![position.x, position.y, position.z])
            .ccd_enabled(true)
            .build();
        let handle = self.rigid_body_set.insert(rigid_body);
        let collider = ColliderBuilder::ball(radius)
            .restitution(0.6)
            .collision_groups(CollisionGroup::prop())
            .build();
        self.collider_set
            .insert_with_parent(collider, handle, &mut self.rigid_body_set);
        handle
    }

    /// Add a static cuboid collider (floor slabs, walls). No parent body; collider is fixed in world.
    /// `translation`: world position of center. `rotation_y_rad`: rotation around Y axis in radians.
    /// `half_extents`: half sizes in local X, Y, Z (after rotation).
    pub fn add_static_cuboid(
        &mut self,
        translation: Vec3,
        rotation_y_rad: f32,
        half_extents: Vec3,
    ) -> ColliderHandle {
        let tra = vector![translation.x, translation.y, translation.z];
        let axisangle = Vector3::y_axis().into_inner() * (rotation_y_rad as Real);
        let position = Isometry3::new(tra, axisangle);
        let collider = ColliderBuilder::cuboid(
            half_extents.x as Real,
            half_extents.y as Real,
            half_extents.z as Real,
        )
        .position(position)
        .collision_groups(CollisionGroup::environment())
        .build();
        self.collider_set.insert(collider)
    }

    /// World position of a rigid body.
    pub fn body_position(&self, handle: RigidBodyHandle) -> Option<Vec3> {
        self.rigid_body_set.get(handle).map(|body| {
            let pos = body.translation();
            Vec3::new(pos.x, pos.y, pos.z)
        })
    }

    /// Set the position of a kinematic body for the next step.
    pub fn set_kinematic_position(&mut self, handle: RigidBodyHandle, position: Vec3) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.set_next_kinematic_translation(vector![position.x, position.y, position.z]);
        }
    }

    /// Teleport a body and stop it dead. Returns false if the handle is stale.
    pub fn reset_body(&mut self, handle: RigidBodyHandle, position: Vec3) -> bool {
        match self.rigid_body_set.get_mut(handle) {
            Some(body) => {
                body.set_translation(vector![position.x, position.y, position.z], true);
                body.set_linvel(Vector::zeros(), true);
                body.set_angvel(Vector::zeros(), true);
                true
            }
            None => false,
        }
    }

    /// Apply an impulse to a dynamic body.
    pub fn apply_impulse(&mut self, handle: RigidBodyHandle, impulse: Vec3) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.apply_impulse(vector![impulse.x, impulse.y, impulse.z], true);
        }
    }

    /// Linear velocity of a body, zero for stale handles.
    pub fn body_velocity(&self, handle: RigidBodyHandle) -> Vec3 {
        self.rigid_body_set
            .get(handle)
            .map(|body| {
                let v = body.linvel();
                Vec3::new(v.x, v.y, v.z)
            })
            .unwrap_or(Vec3::ZERO)
    }
}
