//! Core engine types and utilities for Duskmanor.
//!
//! This crate provides the foundational types used across all engine systems:
//! - Transform and spatial utilities
//! - First-person camera
//! - Time management
//! - Scene-graph components (parent links, interactable tags)

pub mod camera;
pub mod components;
pub mod time;
pub mod transform;

pub use camera::*;
pub use components::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
pub use hecs::{Entity, World};
