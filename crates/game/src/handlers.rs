//! The fixed interaction-handler table: doors, pickups, notes, the keypad
//! safe, and the diary page slots.
//!
//! Handlers are plain functions over the activation context. They
//! shape-check tag properties instead of assuming fields exist; a malformed
//! tag degrades to a logged warning or a player-facing message, never a
//! panic.

use std::collections::HashMap;

use crate::interaction::{GameRefs, HandlerCtx, InteractionSpec};
use crate::scene::{
    despawn_prop, find_tagged_ancestor, remove_collider, restore_collider, CuboidShape,
};
use engine_core::Interactable;
use hecs::{Entity, World};

/// Build the dispatch table. Called once at startup; the table is fixed for
/// the life of the interaction system.
pub fn default_handlers() -> HashMap<String, InteractionSpec> {
    let mut handlers = HashMap::new();
    handlers.insert(
        "door".to_string(),
        InteractionSpec {
            prompt: "Open the door",
            locked_prompt: Some("Try the door"),
            handler: door_handler,
        },
    );
    handlers.insert(
        "key".to_string(),
        InteractionSpec {
            prompt: "Take it",
            locked_prompt: None,
            handler: pickup_handler,
        },
    );
    handlers.insert(
        "page".to_string(),
        InteractionSpec {
            prompt: "Take the torn page",
            locked_prompt: None,
            handler: pickup_handler,
        },
    );
    handlers.insert(
        "note".to_string(),
        InteractionSpec {
            prompt: "Read",
            locked_prompt: None,
            handler: note_handler,
        },
    );
    handlers.insert(
        "safe".to_string(),
        InteractionSpec {
            prompt: "Open the safe",
            locked_prompt: Some("Enter the combination"),
            handler: safe_handler,
        },
    );
    handlers.insert(
        "page_slot".to_string(),
        InteractionSpec {
            prompt: "Place the page",
            locked_prompt: None,
            handler: page_slot_handler,
        },
    );
    handlers.insert(
        "fireplace".to_string(),
        InteractionSpec {
            prompt: "Examine the fireplace",
            locked_prompt: None,
            handler: fireplace_handler,
        },
    );
    handlers
}

/// Collider-bearing nodes belonging to a door's subtree (panels). Queried by
/// recorded shape, not live collider, so open doors can still be closed.
fn door_panels(world: &World, door: Entity) -> Vec<Entity> {
    world
        .query::<&CuboidShape>()
        .iter()
        .filter(|(entity, _)| find_tagged_ancestor(world, *entity) == Some(door))
        .map(|(entity, _)| entity)
        .collect()
}

/// Doors: locked ones ask for their key (confirmation dialog); unlocked ones
/// toggle open/shut, which detaches or restores the panel colliders.
fn door_handler(ctx: &mut HandlerCtx) {
    if ctx.tag.get_bool("locked").unwrap_or(false) {
        let key = ctx.tag.get_text("key").map(str::to_owned);
        match key {
            Some(key) if ctx.refs.progress.has_item(&key) => {
                let target = ctx.target;
                let key_name = ctx.tag.get_text("key_name").unwrap_or("key").to_owned();
                let objective = ctx.tag.get_text("objective").map(str::to_owned);
                ctx.modals.show_confirmation(
                    ctx.refs.controller,
                    format!("Use the {}?", key_name),
                    Box::new(move |refs: &mut GameRefs| {
                        if !refs.progress.remove_item(&key) {
                            return;
                        }
                        if let Ok(mut tag) = refs.world.get::<&mut Interactable>(target) {
                            tag.set_bool("locked", false);
                        }
                        if let Some(objective) = objective {
                            refs.progress.complete_objective(objective);
                        }
                        refs.messages.push("The lock clicks open.", 3.0);
                    }),
                );
            }
            _ => {
                let text = ctx
                    .tag
                    .get_text("locked_text")
                    .unwrap_or("Locked.")
                    .to_owned();
                ctx.refs.messages.push(text, 2.5);
                if let Some(hint) = ctx.tag.get_text("hint") {
                    ctx.refs.hints.push(hint.to_owned(), 5.0);
                }
            }
        }
        return;
    }

    let open = ctx.tag.get_bool("open").unwrap_or(false);
    let panels = door_panels(ctx.refs.world, ctx.target);
    if panels.is_empty() {
        log::warn!("Door {:?} has no panel colliders", ctx.target);
    }
    for panel in panels {
        if open {
            restore_collider(ctx.refs.world, ctx.refs.controller.physics_mut(), panel);
        } else {
            remove_collider(ctx.refs.world, ctx.refs.controller.physics_mut(), panel);
        }
    }
    if let Ok(mut tag) = ctx.refs.world.get::<&mut Interactable>(ctx.target) {
        tag.set_bool("open", !open);
    }
    let text = if open {
        "You pull the door shut."
    } else {
        "The door creaks open."
    };
    ctx.refs.messages.push(text, 2.5);
}

/// Keys and torn pages: add to inventory and remove the prop from the world.
fn pickup_handler(ctx: &mut HandlerCtx) {
    let Some(item) = ctx.tag.get_text("item").map(str::to_owned) else {
        log::warn!("Pickup {:?} has no item property", ctx.target);
        return;
    };
    let display = ctx.tag.get_text("display").unwrap_or(&item).to_owned();
    ctx.refs.progress.add_item(item);
    despawn_prop(ctx.refs.world, ctx.refs.controller.physics_mut(), ctx.target);
    ctx.refs.messages.push(format!("Picked up the {}.", display), 2.5);
}

/// Notes and diaries: open a scroll dialog; a `hint` property also queues a
/// hint for after the dialog closes.
fn note_handler(ctx: &mut HandlerCtx) {
    let title = ctx.tag.get_text("title").unwrap_or("Note").to_owned();
    let text = ctx.tag.get_text("text").unwrap_or("The page is blank.");
    let pages: Vec<String> = text.split('|').map(str::to_owned).collect();
    ctx.modals.show_scroll(ctx.refs.controller, title, pages);
    if let Some(hint) = ctx.tag.get_text("hint") {
        ctx.refs.hints.push(hint.to_owned(), 5.0);
    }
}

/// Keypad safe: digit-entry dialog checked against the `code` property.
/// A wrong (complete) combination closes the dialog with a message; the
/// contents are granted on the first correct entry.
fn safe_handler(ctx: &mut HandlerCtx) {
    if !ctx.tag.get_bool("locked").unwrap_or(true) {
        ctx.refs.messages.push("The safe is already open.", 2.5);
        return;
    }
    let Some(code) = ctx.tag.get_text("code").map(str::to_owned) else {
        log::warn!("Safe {:?} has no code property", ctx.target);
        return;
    };
    let target = ctx.target;
    let contents = ctx.tag.get_text("contents").map(str::to_owned);
    ctx.modals.show_text_entry(
        ctx.refs.controller,
        "Enter the combination",
        code.len(),
        Box::new(move |entered: &str, refs: &mut GameRefs| {
            if entered != code {
                refs.messages
                    .push("The dial spins uselessly. Wrong combination.", 3.0);
                return;
            }
            if let Ok(mut tag) = refs.world.get::<&mut Interactable>(target) {
                tag.set_bool("locked", false);
            }
            refs.progress.complete_objective("safe_opened");
            refs.messages.push("The safe door swings open.", 3.0);
            if let Some(item) = contents {
                refs.messages.push(format!("You take the {}.", item), 3.0);
                refs.progress.add_item(item);
            }
        }),
    );
}

/// Fireplaces: a choice dialog. Lighting needs matches; the cold ashes hide
/// a one-time find.
fn fireplace_handler(ctx: &mut HandlerCtx) {
    if ctx.tag.get_bool("lit").unwrap_or(false) {
        ctx.refs.messages.push("The fire crackles steadily.", 2.5);
        return;
    }
    let target = ctx.target;
    let ash_item = ctx.tag.get_text("ash_item").map(str::to_owned);
    let ash_taken = ctx.tag.get_bool("ash_taken").unwrap_or(false);
    ctx.modals.show_choice(
        ctx.refs.controller,
        "The hearth is cold and dark.",
        vec![
            "Light the fire".to_string(),
            "Search the ashes".to_string(),
            "Leave it".to_string(),
        ],
        Box::new(move |choice, refs: &mut GameRefs| match choice {
            0 => {
                if refs.progress.has_item("matches") {
                    if let Ok(mut tag) = refs.world.get::<&mut Interactable>(target) {
                        tag.set_bool("lit", true);
                    }
                    refs.messages.push("Firelight pushes the shadows back.", 3.0);
                } else {
                    refs.messages.push("You have nothing to light it with.", 2.5);
                }
            }
            1 => {
                if ash_taken {
                    refs.messages.push("Nothing but cold ash.", 2.5);
                    return;
                }
                let Some(item) = ash_item else {
                    refs.messages.push("Nothing but cold ash.", 2.5);
                    return;
                };
                if let Ok(mut tag) = refs.world.get::<&mut Interactable>(target) {
                    tag.set_bool("ash_taken", true);
                }
                refs.messages.push(format!("Buried in the ash: {}.", item), 3.0);
                refs.progress.add_item(item);
            }
            _ => {}
        }),
    );
}

/// Diary page slots: consume the matching collected page after confirmation.
fn page_slot_handler(ctx: &mut HandlerCtx) {
    if ctx.tag.get_bool("filled").unwrap_or(false) {
        ctx.refs.messages.push("The page is already in place.", 2.5);
        return;
    }
    let Some(page) = ctx.tag.get_text("page").map(str::to_owned) else {
        log::warn!("Page slot {:?} has no page property", ctx.target);
        return;
    };
    if !ctx.refs.progress.has_item(&page) {
        ctx.refs
            .messages
            .push("Something is missing here. A torn page, perhaps.", 3.0);
        return;
    }
    let target = ctx.target;
    let objective = ctx.tag.get_text("objective").map(str::to_owned);
    ctx.modals.show_confirmation(
        ctx.refs.controller,
        "Place the page back into the diary?",
        Box::new(move |refs: &mut GameRefs| {
            if !refs.progress.remove_item(&page) {
                return;
            }
            if let Ok(mut tag) = refs.world.get::<&mut Interactable>(target) {
                tag.set_bool("filled", true);
            }
            refs.progress.pages_placed += 1;
            if let Some(objective) = objective {
                refs.progress.complete_objective(objective);
            }
            refs.messages.push("The page settles into the binding.", 3.0);
        }),
    );
}
