//! Scene construction helpers and collider↔entity resolution.
//!
//! Props are hecs entities; a prop's behavior lives in an [`Interactable`]
//! tag on its root node, while collision shapes may sit on child nodes. The
//! collider's rapier `user_data` carries the owning entity's bits so a
//! raycast hit resolves back into the scene graph, where the ancestor walk
//! finds the nearest tagged node.

use engine_core::{Interactable, Named, Parent, Transform};
use glam::Vec3;
use hecs::{Entity, World};
use physics::{ColliderHandle, PhysicsWorld};

/// Component linking a scene node to its static collider.
#[derive(Debug, Clone, Copy)]
pub struct ColliderRef(pub ColliderHandle);

/// Cuboid shape of a node's collider, kept so it can be re-added after being
/// removed (doors that close again).
#[derive(Debug, Clone, Copy)]
pub struct CuboidShape {
    pub half_extents: Vec3,
    pub rotation_y: f32,
}

/// Ancestor-walk depth cap; a deeper chain means a cycle in authored data.
const MAX_ANCESTOR_DEPTH: usize = 64;

/// Spawn a grouping node with no collider (a prop root). The tag, if any,
/// makes the whole subtree interactable.
pub fn spawn_group(
    world: &mut World,
    name: &str,
    position: Vec3,
    parent: Option<Entity>,
    tag: Option<Interactable>,
) -> Entity {
    let entity = world.spawn((Named(name.to_string()), Transform::from_position(position)));
    if let Some(parent) = parent {
        let _ = world.insert_one(entity, Parent(parent));
    }
    if let Some(tag) = tag {
        let _ = world.insert_one(entity, tag);
    }
    entity
}

/// Spawn a node with a static cuboid collider. Returns `None` (logged by the
/// physics layer) if the geometry parameters are invalid; in that case no
/// entity is created either.
pub fn spawn_collider_node(
    world: &mut World,
    physics: &mut PhysicsWorld,
    name: &str,
    position: Vec3,
    rotation_y: f32,
    half_extents: Vec3,
    parent: Option<Entity>,
    tag: Option<Interactable>,
) -> Option<Entity> {
    let entity = spawn_group(world, name, position, parent, tag);
    let user_data = entity.to_bits().get() as u128;
    match physics.add_static_cuboid(position, rotation_y, half_extents, user_data) {
        Some(collider) => {
            let _ = world.insert_one(entity, ColliderRef(collider));
            let _ = world.insert_one(
                entity,
                CuboidShape {
                    half_extents,
                    rotation_y,
                },
            );
            Some(entity)
        }
        None => {
            let _ = world.despawn(entity);
            None
        }
    }
}

/// Resolve a raycast hit's collider user data back to a scene entity.
/// Zero user data is bare architecture with no scene node.
pub fn entity_from_user_data(world: &World, user_data: u128) -> Option<Entity> {
    if user_data == 0 {
        return None;
    }
    let entity = Entity::from_bits(user_data as u64)?;
    world.contains(entity).then_some(entity)
}

/// Walk from `start` up the parent chain to the nearest node carrying an
/// [`Interactable`] tag. Tags are never merged across ancestors; the first
/// one found wins.
pub fn find_tagged_ancestor(world: &World, start: Entity) -> Option<Entity> {
    let mut current = start;
    for _ in 0..MAX_ANCESTOR_DEPTH {
        if world.satisfies::<&Interactable>(current).unwrap_or(false) {
            return Some(current);
        }
        match world.get::<&Parent>(current) {
            Ok(parent) => current = parent.0,
            Err(_) => return None,
        }
    }
    log::warn!("Ancestor walk exceeded depth cap at {:?}; cyclic scene data?", start);
    None
}

/// Detach a node's collider from the physics world (opened doors, consumed
/// props). The shape stays recorded for [`restore_collider`].
pub fn remove_collider(world: &mut World, physics: &mut PhysicsWorld, entity: Entity) {
    if let Ok(collider) = world.remove_one::<ColliderRef>(entity) {
        physics.remove_collider(collider.0);
        physics.update_query_pipeline();
    }
}

/// Re-add a previously removed collider from the node's recorded shape.
pub fn restore_collider(world: &mut World, physics: &mut PhysicsWorld, entity: Entity) {
    if world.satisfies::<&ColliderRef>(entity).unwrap_or(false) {
        return; // already solid
    }
    let (position, shape) = {
        let Ok(transform) = world.get::<&Transform>(entity) else {
            return;
        };
        let Ok(shape) = world.get::<&CuboidShape>(entity) else {
            return;
        };
        (transform.position, *shape)
    };
    let user_data = entity.to_bits().get() as u128;
    if let Some(collider) =
        physics.add_static_cuboid(position, shape.rotation_y, shape.half_extents, user_data)
    {
        let _ = world.insert_one(entity, ColliderRef(collider));
        physics.update_query_pipeline();
    }
}

/// Remove a prop from the scene entirely: collider and entity (picked-up
/// items). Child nodes are not chased; pickups are leaf props.
pub fn despawn_prop(world: &mut World, physics: &mut PhysicsWorld, entity: Entity) {
    if let Ok(collider) = world.remove_one::<ColliderRef>(entity) {
        physics.remove_collider(collider.0);
        physics.update_query_pipeline();
    }
    if let Err(e) = world.despawn(entity) {
        log::warn!("Despawning missing prop {:?}: {}", entity, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A hit on an untagged leaf resolves to the tagged grandparent, not to
    /// the leaf and not to none.
    #[test]
    fn ancestor_walk_finds_tagged_grandparent() {
        let mut world = World::new();
        let root = spawn_group(
            &mut world,
            "door_root",
            Vec3::ZERO,
            None,
            Some(Interactable::new("door").with_bool("locked", true)),
        );
        let frame = spawn_group(&mut world, "door_frame", Vec3::ZERO, Some(root), None);
        let panel = spawn_group(&mut world, "door_panel", Vec3::ZERO, Some(frame), None);

        assert_eq!(find_tagged_ancestor(&world, panel), Some(root));
    }

    /// An untagged chain resolves to none once the root is reached.
    #[test]
    fn ancestor_walk_without_tag_is_none() {
        let mut world = World::new();
        let root = spawn_group(&mut world, "shelf", Vec3::ZERO, None, None);
        let leaf = spawn_group(&mut world, "shelf_board", Vec3::ZERO, Some(root), None);
        assert_eq!(find_tagged_ancestor(&world, leaf), None);
    }

    /// The nearest tagged ancestor wins when several carry tags.
    #[test]
    fn nearest_tag_wins() {
        let mut world = World::new();
        let outer = spawn_group(
            &mut world,
            "cabinet",
            Vec3::ZERO,
            None,
            Some(Interactable::new("cabinet")),
        );
        let inner = spawn_group(
            &mut world,
            "drawer",
            Vec3::ZERO,
            Some(outer),
            Some(Interactable::new("drawer")),
        );
        let knob = spawn_group(&mut world, "knob", Vec3::ZERO, Some(inner), None);
        assert_eq!(find_tagged_ancestor(&world, knob), Some(inner));
    }

    /// Collider user data round-trips to the spawning entity, and dead
    /// entities resolve to none.
    #[test]
    fn user_data_round_trip() {
        let mut world = World::new();
        let mut physics = PhysicsWorld::new();
        let entity = spawn_collider_node(
            &mut world,
            &mut physics,
            "crate",
            Vec3::new(0.0, 0.5, 0.0),
            0.0,
            Vec3::splat(0.5),
            None,
            None,
        )
        .unwrap();
        let bits = entity.to_bits().get() as u128;
        assert_eq!(entity_from_user_data(&world, bits), Some(entity));
        assert_eq!(entity_from_user_data(&world, 0), None);

        despawn_prop(&mut world, &mut physics, entity);
        assert_eq!(entity_from_user_data(&world, bits), None);
    }

    /// Removing and restoring a door panel collider keeps it hittable by
    /// rays only while solid.
    #[test]
    fn collider_remove_restore_cycle() {
        let mut world = World::new();
        let mut physics = PhysicsWorld::new();
        let panel = spawn_collider_node(
            &mut world,
            &mut physics,
            "panel",
            Vec3::new(0.0, 1.0, -3.0),
            0.0,
            Vec3::new(0.6, 1.0, 0.05),
            None,
            None,
        )
        .unwrap();
        physics.update_query_pipeline();

        let origin = Vec3::new(0.0, 1.0, 0.0);
        assert!(physics.raycast(origin, Vec3::NEG_Z, 10.0, None).is_some());

        remove_collider(&mut world, &mut physics, panel);
        assert!(physics.raycast(origin, Vec3::NEG_Z, 10.0, None).is_none());

        restore_collider(&mut world, &mut physics, panel);
        let hit = physics.raycast(origin, Vec3::NEG_Z, 10.0, None).unwrap();
        assert_eq!(entity_from_user_data(&world, hit.user_data), Some(panel));
    }
}
