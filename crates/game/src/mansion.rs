//! The mansion: static architecture and interactable props.
//!
//! Layout (top-down, meters; the ground plane is the floor):
//!
//! ```text
//!        z = -14 ┌──────────────────────┐
//!                │       library        │
//!                │  [safe]     [page]   │
//!        z = -6  ├───────[door]─────────┤
//!                │      entry hall      │
//!                │ [diary] [table: key, │
//!                │          note]       │
//!        z = +6  └───────[door]─────────┘  ← front door (escape)
//!                x = -6              x = +6
//! ```

use engine_core::{Interactable, World};
use glam::Vec3;
use physics::PhysicsWorld;

use crate::scene::{spawn_collider_node, spawn_group};

const WALL_HEIGHT: f32 = 3.0;
const WALL_THICKNESS: f32 = 0.2;
/// Half-width of the gap each door sits in.
const DOOR_HALF_WIDTH: f32 = 0.7;

/// Positions the demo script needs to aim at, plus the spawn point.
#[derive(Debug, Clone)]
pub struct Mansion {
    pub spawn_point: Vec3,
    pub table_key: Vec3,
    pub table_note: Vec3,
    pub diary_stand: Vec3,
    pub fireplace: Vec3,
    pub library_door: Vec3,
    pub library_inside: Vec3,
    pub safe: Vec3,
    pub torn_page: Vec3,
    pub front_door: Vec3,
    pub outside: Vec3,
}

/// One wall segment: a bare static cuboid with no scene node.
fn wall(physics: &mut PhysicsWorld, center: Vec3, half_extents: Vec3) {
    let _ = physics.add_static_cuboid(center, 0.0, half_extents, 0);
}

/// A doorway wall along X at depth `z`: two segments leaving a gap at x=0.
fn doorway_wall(physics: &mut PhysicsWorld, z: f32, half_width: f32) {
    let segment = (half_width - DOOR_HALF_WIDTH) / 2.0;
    let offset = DOOR_HALF_WIDTH + segment;
    for side in [-1.0, 1.0] {
        wall(
            physics,
            Vec3::new(side * offset, WALL_HEIGHT / 2.0, z),
            Vec3::new(segment, WALL_HEIGHT / 2.0, WALL_THICKNESS),
        );
    }
    // Lintel above the gap, so the doorway reads as a frame to the gaze ray.
    wall(
        physics,
        Vec3::new(0.0, WALL_HEIGHT - 0.3, z),
        Vec3::new(DOOR_HALF_WIDTH, 0.3, WALL_THICKNESS),
    );
}

/// A door prop: tagged root group with the collider on a child panel, so
/// activation exercises the ancestor walk and opening can detach the panel.
fn spawn_door(
    world: &mut World,
    physics: &mut PhysicsWorld,
    name: &str,
    position: Vec3,
    tag: Interactable,
) {
    let root = spawn_group(world, name, position, None, Some(tag));
    let _ = spawn_collider_node(
        world,
        physics,
        &format!("{}_panel", name),
        Vec3::new(position.x, (WALL_HEIGHT - 0.6) / 2.0, position.z),
        0.0,
        Vec3::new(DOOR_HALF_WIDTH, (WALL_HEIGHT - 0.6) / 2.0, 0.08),
        Some(root),
        None,
    );
}

/// Build the whole mansion into the world and physics state.
pub fn build_mansion(world: &mut World, physics: &mut PhysicsWorld) -> Mansion {
    physics.add_ground_plane();

    // ── Entry hall shell (x -6..6, z -6..6) ────────────────────────────
    let side = Vec3::new(WALL_THICKNESS, WALL_HEIGHT / 2.0, 10.0);
    wall(physics, Vec3::new(-6.0, WALL_HEIGHT / 2.0, -4.0), side);
    wall(physics, Vec3::new(6.0, WALL_HEIGHT / 2.0, -4.0), side);
    doorway_wall(physics, 6.0, 6.0); // south wall, front door gap
    doorway_wall(physics, -6.0, 6.0); // north wall, library door gap

    // ── Library shell (x -6..6, z -14..-6) ─────────────────────────────
    wall(
        physics,
        Vec3::new(0.0, WALL_HEIGHT / 2.0, -14.0),
        Vec3::new(6.0, WALL_HEIGHT / 2.0, WALL_THICKNESS),
    );

    // ── Entry hall props ───────────────────────────────────────────────
    let table_pos = Vec3::new(2.5, 0.0, 2.0);
    let table = spawn_group(world, "entry_table", table_pos, None, None);
    let _ = spawn_collider_node(
        world,
        physics,
        "entry_table_top",
        table_pos + Vec3::new(0.0, 0.45, 0.0),
        0.0,
        Vec3::new(0.8, 0.45, 0.5),
        Some(table),
        None,
    );

    let table_key = table_pos + Vec3::new(-0.35, 0.98, 0.0);
    let _ = spawn_collider_node(
        world,
        physics,
        "library_key",
        table_key,
        0.0,
        Vec3::new(0.1, 0.08, 0.1),
        Some(table),
        Some(
            Interactable::new("key")
                .with_text("item", "library_key")
                .with_text("display", "library key"),
        ),
    );

    let table_note = table_pos + Vec3::new(0.35, 0.95, 0.0);
    let _ = spawn_collider_node(
        world,
        physics,
        "caretaker_note",
        table_note,
        0.0,
        Vec3::new(0.15, 0.05, 0.2),
        Some(table),
        Some(
            Interactable::new("note")
                .with_text("title", "Caretaker's note")
                .with_text(
                    "text",
                    "The library key is where it always was.|\
                     I scratched the safe combination into the desk: 4312.|\
                     Whatever you hear upstairs, do not answer it.",
                )
                .with_text("hint", "The safe combination is 4312."),
        ),
    );

    let fireplace = Vec3::new(5.3, 0.0, -2.0);
    let _ = spawn_collider_node(
        world,
        physics,
        "fireplace",
        fireplace + Vec3::new(0.0, 1.0, 0.0),
        0.0,
        Vec3::new(0.4, 1.0, 0.9),
        None,
        Some(
            Interactable::new("fireplace")
                .with_bool("lit", false)
                .with_text("ash_item", "matches"),
        ),
    );

    let diary_stand = Vec3::new(-2.5, 0.0, 2.0);
    let stand = spawn_group(world, "diary_stand", diary_stand, None, None);
    let _ = spawn_collider_node(
        world,
        physics,
        "diary",
        diary_stand + Vec3::new(0.0, 1.0, 0.0),
        0.0,
        Vec3::new(0.3, 0.15, 0.25),
        Some(stand),
        Some(
            Interactable::new("page_slot")
                .with_text("page", "page_1")
                .with_text("objective", "diary_restored"),
        ),
    );

    // ── Doors ──────────────────────────────────────────────────────────
    let library_door = Vec3::new(0.0, 1.2, -6.0);
    spawn_door(
        world,
        physics,
        "library_door",
        library_door,
        Interactable::new("door")
            .with_bool("locked", true)
            .with_text("key", "library_key")
            .with_text("key_name", "library key")
            .with_text("locked_text", "Locked. The caretaker kept a key somewhere.")
            .with_text("hint", "A key glints on the entry table."),
    );

    let front_door = Vec3::new(0.0, 1.2, 6.0);
    spawn_door(
        world,
        physics,
        "front_door",
        front_door,
        Interactable::new("door")
            .with_bool("locked", true)
            .with_text("key", "brass_key")
            .with_text("key_name", "brass key")
            .with_text("locked_text", "The front door is bolted from the outside.")
            .with_text("hint", "Something heavy rattles inside the library safe.")
            .with_text("objective", "escaped"),
    );

    // ── Library props ──────────────────────────────────────────────────
    let safe = Vec3::new(-3.0, 0.0, -12.0);
    let safe_root = spawn_group(world, "library_safe", safe, None, None);
    let _ = spawn_collider_node(
        world,
        physics,
        "library_safe_body",
        safe + Vec3::new(0.0, 0.6, 0.0),
        0.0,
        Vec3::new(0.5, 0.6, 0.5),
        Some(safe_root),
        Some(
            Interactable::new("safe")
                .with_bool("locked", true)
                .with_text("code", "4312")
                .with_text("contents", "brass_key"),
        ),
    );

    let torn_page = Vec3::new(3.0, 1.0, -12.0);
    let _ = spawn_collider_node(
        world,
        physics,
        "torn_page",
        torn_page,
        0.0,
        Vec3::new(0.15, 0.02, 0.2),
        None,
        Some(
            Interactable::new("page")
                .with_text("item", "page_1")
                .with_text("display", "torn diary page"),
        ),
    );

    physics.update_query_pipeline();
    log::info!(
        "Mansion built: entry hall and library, {} colliders",
        physics.collider_set.len()
    );

    Mansion {
        spawn_point: Vec3::new(0.0, 1.2, 3.0),
        table_key,
        table_note,
        diary_stand: diary_stand + Vec3::new(0.0, 1.0, 0.0),
        fireplace: fireplace + Vec3::new(0.0, 1.0, 0.0),
        library_door: Vec3::new(0.0, 1.2, -6.0),
        library_inside: Vec3::new(0.0, 1.2, -10.0),
        safe: safe + Vec3::new(0.0, 0.6, 0.0),
        torn_page,
        front_door: Vec3::new(0.0, 1.2, 6.0),
        outside: Vec3::new(0.0, 1.2, 8.5),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The mansion builds without NaN rejections and the headline props are
    /// present and tagged.
    #[test]
    fn mansion_has_tagged_props() {
        let mut world = World::new();
        let mut physics = PhysicsWorld::new();
        build_mansion(&mut world, &mut physics);

        let kinds: Vec<String> = world
            .query::<&Interactable>()
            .iter()
            .map(|(_, tag)| tag.kind.clone())
            .collect();
        for expected in ["door", "key", "note", "safe", "page", "page_slot", "fireplace"] {
            assert!(
                kinds.iter().any(|kind| kind == expected),
                "missing a {:?} prop",
                expected
            );
        }
        // Two doors: library and front.
        assert_eq!(kinds.iter().filter(|kind| *kind == "door").count(), 2);
    }

    /// Partway down the entry hall, the gaze ray hits the library door
    /// panel within interaction range and resolves to the tagged door.
    #[test]
    fn library_door_is_visible_from_hall() {
        let mut world = World::new();
        let mut physics = PhysicsWorld::new();
        let mansion = build_mansion(&mut world, &mut physics);

        let eye = mansion.spawn_point + Vec3::new(0.0, 0.0, -4.5);
        let hit = physics
            .raycast(eye, Vec3::NEG_Z, 60.0, None)
            .expect("library door should block the hall");
        assert!(hit.distance < 5.0);
        assert!(hit.user_data != 0, "hit bare architecture, not the door");
        let entity = crate::scene::entity_from_user_data(&world, hit.user_data).unwrap();
        let tagged = crate::scene::find_tagged_ancestor(&world, entity).unwrap();
        let tag = world.get::<&Interactable>(tagged).unwrap();
        assert_eq!(tag.kind, "door");
        assert_eq!(tag.get_text("key"), Some("library_key"));
    }
}
