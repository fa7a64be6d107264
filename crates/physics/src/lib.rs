//! Physics integration for Duskmanor, built on Rapier3D.
//!
//! [`PhysicsWorld`] wraps the rapier pipeline and owns all simulation state.
//! The player motion controller talks to it only through the
//! [`CharacterPhysics`] trait so movement logic stays backend-agnostic and
//! unit-testable against a stub.

pub mod backend;
pub mod physics_world;
pub mod raycast;

pub use backend::CharacterPhysics;
pub use physics_world::PhysicsWorld;
pub use raycast::RaycastHit;

pub use rapier3d::prelude::{ColliderHandle, RigidBodyHandle};
