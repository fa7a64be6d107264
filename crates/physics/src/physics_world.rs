//! Physics world management with Rapier3D.

use glam::Vec3;
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

fn has_nan(v: Vec3) -> bool {
    v.x.is_nan() || v.y.is_nan() || v.z.is_nan()
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

    /// Step the simulation by a variable frame delta. Callers are expected to
    /// clamp `dt` (see `engine_core::MAX_FRAME_DELTA`).
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

    /// Update query pipeline for raycasting without stepping the simulation.
    /// Needed when colliders were added or moved while stepping is suspended.
    pub fn update_query_pipeline(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Add the player's capsule body: dynamic, rotation-locked so collision
    /// response can never tip the capsule over.
    pub fn add_character_body(
        &mut self,
        position: Vec3,
        half_height: f32,
        radius: f32,
    ) -> Option<RigidBodyHandle> {
        if has_nan(position) {
            log::error!("Rejected character body at NaN position");
            return None;
        }
        let rigid_body = RigidBodyBuilder::dynamic()
            .translation(vector![position.x, position.y, position.z])
            .lock_rotations()
            .build();
        let handle = self.rigid_body_set.insert(rigid_body);
        let collider = ColliderBuilder::capsule_y(half_height, radius)
            .friction(0.2)
            .build();
        self.collider_set
            .insert_with_parent(collider, handle, &mut self.rigid_body_set);
        Some(handle)
    }

    /// Add a static cuboid collider for mansion geometry (floors, walls,
    /// furniture shells). `user_data` carries the owning scene entity bits so
    /// raycast hits resolve back to the scene graph; pass 0 for bare
    /// architecture that is not interactable.
    /// Returns `None` (logged) for NaN position or extents.
    pub fn add_static_cuboid(
        &mut self,
        translation: Vec3,
        rotation_y_rad: f32,
        half_extents: Vec3,
        user_data: u128,
    ) -> Option<ColliderHandle> {
        if has_nan(translation) || has_nan(half_extents) || rotation_y_rad.is_nan() {
            log::error!(
                "Rejected static cuboid with NaN parameters (translation {:?}, half_extents {:?})",
                translation,
                half_extents
            );
            return None;
        }
        let tra = vector![translation.x, translation.y, translation.z];
        let axisangle = Vector3::y_axis().into_inner() * (rotation_y_rad as Real);
        let position = Isometry3::new(tra, axisangle);
        let collider = ColliderBuilder::cuboid(
            half_extents.x as Real,
            half_extents.y as Real,
            half_extents.z as Real,
        )
        .position(position)
        .user_data(user_data)
        .build();
        Some(self.collider_set.insert(collider))
    }

    /// Add a flat ground plane at Y=0.
    pub fn add_ground_plane(&mut self) -> ColliderHandle {
        let collider = ColliderBuilder::halfspace(Vector::y_axis()).build();
        self.collider_set.insert(collider)
    }

    /// Remove a collider by its handle (picked-up props).
    pub fn remove_collider(&mut self, handle: ColliderHandle) {
        self.collider_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.rigid_body_set,
            true,
        );
    }

    /// Remove a rigid body and its colliders.
    pub fn remove_body(&mut self, handle: RigidBodyHandle) {
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
    }

    /// Get the position of a rigid body.
    pub fn body_position(&self, handle: RigidBodyHandle) -> Option<Vec3> {
        self.rigid_body_set.get(handle).map(|body| {
            let pos = body.translation();
            Vec3::new(pos.x, pos.y, pos.z)
        })
    }

    /// Set a body position directly, zeroing velocities and accumulated
    /// forces. Used for teleports; the caller is responsible for making the
    /// body kinematic first so the solver cannot react to the warp.
    pub fn warp_body(&mut self, handle: RigidBodyHandle, position: Vec3) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.set_translation(vector![position.x, position.y, position.z], true);
            body.set_linvel(vector![0.0, 0.0, 0.0], true);
            body.set_angvel(vector![0.0, 0.0, 0.0], true);
            body.reset_forces(true);
            body.reset_torques(true);
        }
    }

    /// Get a body's linear velocity.
    pub fn body_velocity(&self, handle: RigidBodyHandle) -> Option<Vec3> {
        self.rigid_body_set.get(handle).map(|body| {
            let v = body.linvel();
            Vec3::new(v.x, v.y, v.z)
        })
    }

    /// Set a body's linear velocity.
    pub fn set_body_velocity(&mut self, handle: RigidBodyHandle, velocity: Vec3) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.set_linvel(vector![velocity.x, velocity.y, velocity.z], true);
        }
    }

    /// Switch a body between kinematic (position driven by game code) and
    /// dynamic (fully simulated).
    pub fn set_body_kinematic(&mut self, handle: RigidBodyHandle, kinematic: bool) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            let target = if kinematic {
                RigidBodyType::KinematicPositionBased
            } else {
                RigidBodyType::Dynamic
            };
            if body.body_type() != target {
                body.set_body_type(target, true);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// NaN geometry parameters must be rejected without inserting anything.
    #[test]
    fn nan_cuboid_is_rejected() {
        let mut world = PhysicsWorld::new();
        let before = world.collider_set.len();
        let handle = world.add_static_cuboid(
            Vec3::new(f32::NAN, 0.0, 0.0),
            0.0,
            Vec3::splat(1.0),
            0,
        );
        assert!(handle.is_none());
        assert_eq!(world.collider_set.len(), before);
    }

    /// A dynamic character body over a ground plane settles instead of
    /// falling forever.
    #[test]
    fn character_rests_on_ground_plane() {
        let mut world = PhysicsWorld::new();
        world.add_ground_plane();
        let body = world
            .add_character_body(Vec3::new(0.0, 2.0, 0.0), 0.6, 0.35)
            .unwrap();
        for _ in 0..240 {
            world.step(1.0 / 60.0);
        }
        let pos = world.body_position(body).unwrap();
        // capsule half extent is half_height + radius = 0.95
        assert!(pos.y > 0.5, "body fell through the floor: y = {}", pos.y);
        assert!(pos.y < 1.5, "body did not settle: y = {}", pos.y);
    }

    /// Kinematic bodies ignore gravity entirely.
    #[test]
    fn kinematic_body_ignores_gravity() {
        let mut world = PhysicsWorld::new();
        let body = world
            .add_character_body(Vec3::new(0.0, 5.0, 0.0), 0.6, 0.35)
            .unwrap();
        world.set_body_kinematic(body, true);
        for _ in 0..60 {
            world.step(1.0 / 60.0);
        }
        let pos = world.body_position(body).unwrap();
        assert!((pos.y - 5.0).abs() < 1.0e-4);
    }
}
