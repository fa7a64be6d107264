//! Gaze resolution and interaction dispatch.
//!
//! Once per frame (after the motion controller has synced the camera) the
//! system casts a single ray from the camera center, resolves the nearest
//! hit to the nearest tagged ancestor in the scene graph, and either updates
//! the crosshair prompt or, on the interact key, dispatches to the handler
//! registered for the tag's kind. It also drives the open modal dialog, and
//! every modal exit path funnels through [`InteractionSystem::close_modal`]
//! so the controller freeze is released exactly once.

use std::collections::HashMap;

use engine_core::{Camera, Interactable};
use hecs::{Entity, World};
use input::InputState;

use crate::messages::MessageQueue;
use crate::modal::{Modal, Modals};
use crate::motion::Controller;
use crate::progress::GameProgress;
use crate::scene::{entity_from_user_data, find_tagged_ancestor};
use crate::state::{InteractPrompt, INTERACT_KEY};

/// Activation distance in world units, fixed for the resolver's lifetime.
/// A hit at exactly this distance is in range.
pub const INTERACTION_RANGE: f32 = 5.0;
/// How far the gaze ray probes past the activation range, so out-of-range
/// targets can still produce a "too far" response.
const GAZE_PROBE_RANGE: f32 = 60.0;
/// The prompt is recomputed every Nth frame; raycasting the whole scene per
/// frame is not worth the cost for a crosshair hint.
const PROMPT_REFRESH_INTERVAL: u64 = 2;

/// Mutable game state handed to handlers and modal callbacks.
pub struct GameRefs<'a> {
    pub world: &'a mut World,
    pub controller: &'a mut Controller,
    pub progress: &'a mut GameProgress,
    pub messages: &'a mut MessageQueue,
    pub hints: &'a mut MessageQueue,
}

/// Context for one activation: the tagged entity, a snapshot of its tag,
/// and everything the handler may touch.
pub struct HandlerCtx<'a, 'w> {
    pub target: Entity,
    pub tag: Interactable,
    pub refs: &'a mut GameRefs<'w>,
    pub modals: &'a mut Modals,
}

/// Handler invoked when its registered tag kind is activated.
pub type HandlerFn = fn(&mut HandlerCtx);

/// Registration record for one interaction kind.
pub struct InteractionSpec {
    /// Crosshair prompt ("Open the door").
    pub prompt: &'static str,
    /// Prompt shown instead while the tag's `locked` property is true.
    pub locked_prompt: Option<&'static str>,
    pub handler: HandlerFn,
}

/// Outcome of one gaze resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gaze {
    /// Nothing within probe range, or the hit chain carries no tag.
    None,
    /// A hit beyond the activation range.
    TooFar { distance: f32 },
    /// A tagged target within range.
    Target { entity: Entity, distance: f32 },
}

/// How an open modal was resolved; decides which callback runs.
enum ModalExit {
    Cancelled,
    Confirmed,
    Selected(usize),
    Submitted,
}

/// Raycast-based interaction dispatcher and modal owner.
pub struct InteractionSystem {
    handlers: HashMap<String, InteractionSpec>,
    frame_counter: u64,
    current_prompt: Option<InteractPrompt>,
    /// The entity whose activation is in flight (modal open); blocks
    /// re-entrant activation.
    current_interaction: Option<Entity>,
    pub modals: Modals,
}

impl InteractionSystem {
    /// Build the system with its fixed handler table.
    pub fn new(handlers: HashMap<String, InteractionSpec>) -> Self {
        Self {
            handlers,
            frame_counter: 0,
            current_prompt: None,
            current_interaction: None,
            modals: Modals::new(),
        }
    }

    /// Per-frame update. Must run after the motion controller tick so the
    /// gaze ray starts from this frame's camera position.
    pub fn update(&mut self, input: &InputState, camera: &Camera, refs: &mut GameRefs) {
        self.frame_counter += 1;

        if self.modals.is_open() {
            self.current_prompt = None;
            self.drive_modal(input, refs);
            return;
        }

        self.update_prompt(camera, refs);

        if input.is_interact_pressed() {
            self.activate(camera, refs);
        }
    }

    /// Resolve what the camera is looking at.
    pub fn resolve_gaze(&self, camera: &Camera, refs: &GameRefs) -> Gaze {
        let hit = refs.controller.physics().raycast(
            camera.position(),
            camera.forward(),
            GAZE_PROBE_RANGE,
            Some(refs.controller.body_handle()),
        );
        let Some(hit) = hit else {
            return Gaze::None;
        };
        if hit.distance > INTERACTION_RANGE {
            return Gaze::TooFar {
                distance: hit.distance,
            };
        }
        entity_from_user_data(refs.world, hit.user_data)
            .and_then(|entity| find_tagged_ancestor(refs.world, entity))
            .map(|entity| Gaze::Target {
                entity,
                distance: hit.distance,
            })
            .unwrap_or(Gaze::None)
    }

    /// Explicit activation (interact key). Gated on no open modal, no
    /// in-flight interaction, and an unfrozen controller.
    pub fn activate(&mut self, camera: &Camera, refs: &mut GameRefs) {
        if self.modals.is_open()
            || self.current_interaction.is_some()
            || refs.controller.is_frozen()
        {
            return;
        }
        match self.resolve_gaze(camera, refs) {
            Gaze::None => {}
            Gaze::TooFar { .. } => refs.messages.push("Too far away.", 2.0),
            Gaze::Target { entity, .. } => {
                let tag = match refs.world.get::<&Interactable>(entity) {
                    Ok(tag) => (*tag).clone(),
                    Err(_) => return,
                };
                let Some(spec) = self.handlers.get(&tag.kind) else {
                    log::warn!("No handler registered for interaction kind {:?}", tag.kind);
                    return;
                };
                let handler = spec.handler;
                self.current_interaction = Some(entity);
                let mut ctx = HandlerCtx {
                    target: entity,
                    tag,
                    refs,
                    modals: &mut self.modals,
                };
                handler(&mut ctx);
                // Synchronous handlers are done; only a modal keeps the
                // interaction in flight.
                if !self.modals.is_open() {
                    self.current_interaction = None;
                }
            }
        }
    }

    /// Recompute the crosshair prompt (throttled).
    fn update_prompt(&mut self, camera: &Camera, refs: &GameRefs) {
        if self.frame_counter % PROMPT_REFRESH_INTERVAL != 1 {
            return;
        }
        self.current_prompt = match self.resolve_gaze(camera, refs) {
            Gaze::Target { entity, .. } => self.prompt_for(entity, refs),
            _ => None,
        };
    }

    fn prompt_for(&self, entity: Entity, refs: &GameRefs) -> Option<InteractPrompt> {
        let tag = refs.world.get::<&Interactable>(entity).ok()?;
        let spec = self.handlers.get(&tag.kind)?;
        let locked = tag.get_bool("locked").unwrap_or(false);
        let action = if locked {
            spec.locked_prompt.unwrap_or(spec.prompt)
        } else {
            spec.prompt
        };
        Some(InteractPrompt {
            key: INTERACT_KEY,
            action: action.to_string(),
        })
    }

    /// Route dialog input to the open modal.
    fn drive_modal(&mut self, input: &InputState, refs: &mut GameRefs) {
        let exit = {
            let Some(modal) = self.modals.active_mut() else {
                return;
            };
            match modal {
                Modal::Confirmation { .. } => {
                    if input.is_confirm_pressed() || input.is_interact_pressed() {
                        Some(ModalExit::Confirmed)
                    } else if input.is_cancel_pressed() {
                        Some(ModalExit::Cancelled)
                    } else {
                        None
                    }
                }
                Modal::Choice { options, .. } => {
                    if input.is_cancel_pressed() {
                        Some(ModalExit::Cancelled)
                    } else {
                        match input.digit_pressed() {
                            Some(digit)
                                if digit >= 1 && (digit as usize) <= options.len() =>
                            {
                                Some(ModalExit::Selected(digit as usize - 1))
                            }
                            _ => None,
                        }
                    }
                }
                Modal::TextEntry {
                    buffer,
                    required_len,
                    ..
                } => {
                    if let Some(digit) = input.digit_pressed() {
                        if buffer.len() < *required_len {
                            buffer.push(char::from_digit(digit as u32, 10).unwrap_or('0'));
                        }
                        None
                    } else if input.is_backspace_pressed() {
                        buffer.pop();
                        None
                    } else if input.is_confirm_pressed() {
                        // Short entries keep the dialog open; the callback
                        // only ever sees a complete combination.
                        if buffer.len() >= *required_len {
                            Some(ModalExit::Submitted)
                        } else {
                            None
                        }
                    } else if input.is_cancel_pressed() {
                        Some(ModalExit::Cancelled)
                    } else {
                        None
                    }
                }
                Modal::Scroll { pages, page, .. } => {
                    if input.is_cancel_pressed() {
                        Some(ModalExit::Cancelled)
                    } else if input.is_confirm_pressed() || input.is_interact_pressed() {
                        if *page + 1 < pages.len() {
                            *page += 1;
                            None
                        } else {
                            Some(ModalExit::Confirmed)
                        }
                    } else {
                        None
                    }
                }
            }
        };
        if let Some(exit) = exit {
            self.close_modal(exit, refs);
        }
    }

    /// Close the open modal programmatically (equivalent to cancel). Safe to
    /// call when nothing is open.
    pub fn cancel_modal(&mut self, refs: &mut GameRefs) {
        self.close_modal(ModalExit::Cancelled, refs);
    }

    /// The single modal exit path: unfreeze once, clear the in-flight
    /// interaction, then run the matching callback. Closing an already
    /// closed modal is a no-op.
    fn close_modal(&mut self, exit: ModalExit, refs: &mut GameRefs) {
        let Some(modal) = self.modals.take() else {
            return;
        };
        refs.controller.unfreeze();
        self.current_interaction = None;
        match (modal, exit) {
            (Modal::Confirmation { on_confirm, .. }, ModalExit::Confirmed) => on_confirm(refs),
            (Modal::Choice { on_select, .. }, ModalExit::Selected(index)) => {
                on_select(index, refs)
            }
            (Modal::TextEntry { on_submit, buffer, .. }, ModalExit::Submitted) => {
                on_submit(&buffer, refs)
            }
            _ => {}
        }
    }

    /// The crosshair prompt, if any.
    pub fn prompt(&self) -> Option<&InteractPrompt> {
        self.current_prompt.as_ref()
    }

    /// Overlay text for the open modal, if any.
    pub fn modal_text(&self) -> Option<String> {
        self.modals.active().map(Modal::display_text)
    }
}
