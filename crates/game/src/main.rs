//! Duskmanor — first-person mansion-escape horror core.
//!
//! The binary runs a headless scripted walkthrough of the mansion: it
//! synthesizes input events, drives the full frame loop (input snapshot →
//! motion controller → interaction system → message queues), and logs the
//! playthrough. Rendering and audio are out of scope; everything else is
//! the real game stack.

mod config;
mod handlers;
mod interaction;
mod mansion;
mod messages;
mod modal;
mod motion;
mod progress;
mod scene;
mod state;

use std::time::Duration;

use anyhow::{Context, Result};
use engine_core::{Camera, Time, Vec3, World};
use input::{ElementState, InputState, KeyCode};
use physics::PhysicsWorld;

use config::GameConfig;
use handlers::default_handlers;
use interaction::{GameRefs, InteractionSystem};
use mansion::{build_mansion, Mansion};
use messages::MessageQueue;
use motion::{Controller, CAMERA_OFFSET};
use progress::GameProgress;
use state::DevSettings;

/// Wall-clock pacing for the scripted walkthrough.
const FRAME_SECS: f32 = 1.0 / 60.0;

struct GameState {
    time: Time,
    input: InputState,
    camera: Camera,
    world: World,
    controller: Controller,
    interactions: InteractionSystem,
    progress: GameProgress,
    messages: MessageQueue,
    hints: MessageQueue,
    dev: DevSettings,
    mansion: Mansion,
    // Last logged UI lines, to log only transitions.
    last_message: Option<String>,
    last_hint: Option<String>,
    last_prompt: Option<String>,
    fps_accum: f32,
    show_fps: bool,
}

impl GameState {
    fn new(config: &GameConfig) -> Result<Self> {
        let mut world = World::new();
        let mut physics = PhysicsWorld::new();
        let mansion = build_mansion(&mut world, &mut physics);

        let mut camera = Camera::new(mansion.spawn_point + Vec3::Y * CAMERA_OFFSET);
        camera.sensitivity *= config.sensitivity;

        let controller = Controller::new(physics, &camera, config.dev_mode)
            .context("failed to create the player body")?;

        let mut input = InputState::new();
        input.set_cursor_locked(true);

        Ok(Self {
            time: Time::new(),
            input,
            camera,
            world,
            controller,
            interactions: InteractionSystem::new(default_handlers()),
            progress: GameProgress::new(),
            messages: MessageQueue::new(),
            hints: MessageQueue::new(),
            dev: DevSettings::new(),
            mansion,
            last_message: None,
            last_hint: None,
            last_prompt: None,
            fps_accum: 0.0,
            show_fps: config.show_fps,
        })
    }

    /// One frame. Ordering matters: the motion controller must tick before
    /// the interaction system reads the camera it synced.
    fn update(&mut self, dt: f32) {
        self.handle_dev_menu_keys();
        self.apply_dev_requests();

        let ui_captured = self.interactions.modals.is_open() || self.dev.menu_open;
        if self.input.is_cursor_locked() && !ui_captured {
            let delta = self.input.mouse_delta();
            self.camera.process_mouse(delta.x, delta.y);
        }

        let snapshot = self.input.frame_input();
        self.controller.tick(dt, &snapshot, &mut self.camera);

        if !self.dev.menu_open {
            let mut refs = GameRefs {
                world: &mut self.world,
                controller: &mut self.controller,
                progress: &mut self.progress,
                messages: &mut self.messages,
                hints: &mut self.hints,
            };
            self.interactions.update(&self.input, &self.camera, &mut refs);
        }

        self.messages.update(dt);
        self.hints.update(dt);
        self.log_transitions();

        if self.show_fps {
            self.fps_accum += dt;
            if self.fps_accum >= 1.0 {
                self.fps_accum = 0.0;
                log::debug!("{:.0} fps, pos {:.1?}", self.time.fps(), self.camera.position());
            }
        }
    }

    fn handle_dev_menu_keys(&mut self) {
        if self.input.is_key_pressed(KeyCode::F3) {
            self.dev.menu_open = !self.dev.menu_open;
        }
        if !self.dev.menu_open {
            return;
        }
        if self.input.is_key_pressed(KeyCode::ArrowUp) {
            self.dev.select_previous();
        }
        if self.input.is_key_pressed(KeyCode::ArrowDown) {
            self.dev.select_next();
        }
        if self.input.is_confirm_pressed() {
            self.dev.toggle_selected();
        }
    }

    fn apply_dev_requests(&mut self) {
        use std::mem::take;
        if take(&mut self.dev.toggle_fly_requested) {
            self.controller.toggle_fly();
        }
        if take(&mut self.dev.toggle_fixed_height_requested) {
            self.controller.toggle_fixed_height();
        }
        if take(&mut self.dev.toggle_noclip_requested) {
            let enabled = self.controller.mode() != motion::MotionMode::Noclip;
            self.controller.set_noclip(enabled);
        }
        if take(&mut self.dev.toggle_spawn_freeze_requested) {
            self.controller.toggle_spawn_freeze();
        }
        if take(&mut self.dev.rescue_requested) {
            let Self { controller, camera, .. } = self;
            controller.emergency_rescue(camera);
        }
        if take(&mut self.dev.teleport_spawn_requested) {
            let spawn = self.mansion.spawn_point;
            self.teleport(spawn);
        }
    }

    fn teleport(&mut self, position: Vec3) {
        let Self { controller, camera, .. } = self;
        controller.teleport_to(position, camera);
    }

    /// Log UI changes (messages, hints, prompts) as they appear.
    fn log_transitions(&mut self) {
        let message = self.messages.visible().map(str::to_owned);
        if message != self.last_message {
            if let Some(text) = &message {
                log::info!("» {}", text);
            }
            self.last_message = message;
        }

        let hint = self.hints.visible().map(str::to_owned);
        if hint != self.last_hint {
            if let Some(text) = &hint {
                log::info!("(hint) {}", text);
            }
            self.last_hint = hint;
        }

        let prompt = self
            .interactions
            .prompt()
            .map(state::InteractPrompt::display_text);
        if prompt != self.last_prompt {
            if let Some(text) = &prompt {
                log::info!("{}", text);
            }
            self.last_prompt = prompt;
        }

        if let Some(text) = self.interactions.modal_text() {
            log::debug!("dialog: {}", text);
        }
    }
}

// ── Scripted walkthrough driver ──────────────────────────────────────────

fn run_frames(state: &mut GameState, frames: u32) {
    for _ in 0..frames {
        state.time.update();
        state.input.begin_frame();
        let dt = state.time.delta_seconds();
        state.update(dt);
        std::thread::sleep(Duration::from_secs_f32(FRAME_SECS));
    }
}

/// Press and release a key across two frames.
fn tap(state: &mut GameState, key: KeyCode) {
    state.time.update();
    state.input.begin_frame();
    state.input.process_keyboard(key, ElementState::Pressed);
    let dt = state.time.delta_seconds();
    state.update(dt);
    std::thread::sleep(Duration::from_secs_f32(FRAME_SECS));

    state.time.update();
    state.input.begin_frame();
    state.input.process_keyboard(key, ElementState::Released);
    let dt = state.time.delta_seconds();
    state.update(dt);
    std::thread::sleep(Duration::from_secs_f32(FRAME_SECS));
}

/// Hold a key for a number of frames.
fn hold(state: &mut GameState, key: KeyCode, frames: u32) {
    state.input.process_keyboard(key, ElementState::Pressed);
    run_frames(state, frames);
    state.input.process_keyboard(key, ElementState::Released);
    run_frames(state, 1);
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("╔══════════════════════════════════════════════╗");
    println!("║                  DUSKMANOR                   ║");
    println!("╠══════════════════════════════════════════════╣");
    println!("║  WASD  - Move        │  Mouse - Look         ║");
    println!("║  E     - Interact    │  Shift - Run          ║");
    println!("║  Enter - Confirm     │  Esc   - Cancel       ║");
    println!("║  F3    - Dev menu    │  Ctrl  - Crouch       ║");
    println!("╚══════════════════════════════════════════════╝");

    let config = GameConfig::load();
    config.save();
    let mut state = GameState::new(&config)?;
    let m = state.mansion.clone();

    log::info!("Running the scripted walkthrough (headless)");

    // Settle onto the entry hall floor.
    run_frames(&mut state, 30);

    // Walk toward the entry table, then square up and read the note.
    state.camera.look_toward(m.table_note);
    hold(&mut state, KeyCode::KeyW, 30);
    state.teleport(Vec3::new(1.0, 1.2, 2.8));
    run_frames(&mut state, 20);
    state.camera.look_toward(m.table_note);
    tap(&mut state, KeyCode::KeyE);
    tap(&mut state, KeyCode::Enter); // page 2
    tap(&mut state, KeyCode::Enter); // page 3
    tap(&mut state, KeyCode::Enter); // close

    // Take the library key.
    state.camera.look_toward(m.table_key);
    tap(&mut state, KeyCode::KeyE);

    // Poke at the cold fireplace on the way past.
    state.teleport(m.fireplace + Vec3::new(-2.2, 0.2, 0.0));
    run_frames(&mut state, 20);
    state.camera.look_toward(m.fireplace);
    tap(&mut state, KeyCode::KeyE);
    tap(&mut state, KeyCode::Digit2); // search the ashes
    tap(&mut state, KeyCode::KeyE);
    tap(&mut state, KeyCode::Digit1); // light it

    // Unlock and open the library door.
    state.teleport(m.library_door + Vec3::new(0.0, 0.0, 2.5));
    run_frames(&mut state, 20);
    state.camera.look_toward(m.library_door);
    tap(&mut state, KeyCode::KeyE); // "Use the library key?"
    tap(&mut state, KeyCode::Enter);
    tap(&mut state, KeyCode::KeyE); // open

    // Into the library: take the torn page, open the safe.
    state.teleport(m.library_inside);
    run_frames(&mut state, 20);
    state.camera.look_toward(m.torn_page);
    tap(&mut state, KeyCode::KeyE);

    state.teleport(m.safe + Vec3::new(0.0, 0.6, 2.5));
    run_frames(&mut state, 20);
    state.camera.look_toward(m.safe);
    tap(&mut state, KeyCode::KeyE);
    for key in [KeyCode::Digit4, KeyCode::Digit3, KeyCode::Digit1, KeyCode::Digit2] {
        tap(&mut state, key);
    }
    tap(&mut state, KeyCode::Enter);

    // Back to the entry hall: restore the diary page.
    state.teleport(m.diary_stand + Vec3::new(0.0, 0.2, 2.0));
    run_frames(&mut state, 20);
    state.camera.look_toward(m.diary_stand);
    tap(&mut state, KeyCode::KeyE);
    tap(&mut state, KeyCode::Enter);

    // Escape through the front door.
    state.teleport(m.front_door + Vec3::new(0.0, 0.0, -2.5));
    run_frames(&mut state, 20);
    state.camera.look_toward(m.front_door);
    tap(&mut state, KeyCode::KeyE); // "Use the brass key?"
    tap(&mut state, KeyCode::Enter);
    tap(&mut state, KeyCode::KeyE); // open
    state.camera.look_toward(m.outside);
    hold(&mut state, KeyCode::KeyW, 40);

    // Let the queued messages and hints drain in order.
    let mut drained = 0;
    while !(state.messages.is_idle() && state.hints.is_idle()) && drained < 2400 {
        run_frames(&mut state, 10);
        drained += 10;
    }

    println!();
    println!("Walkthrough finished in {:.1}s", state.time.elapsed_seconds());
    println!(
        "  escaped: {}  diary restored: {}  safe opened: {}",
        state.progress.is_objective_complete("escaped"),
        state.progress.is_objective_complete("diary_restored"),
        state.progress.is_objective_complete("safe_opened"),
    );
    println!("  inventory at exit: {:?}", state.progress.items());

    if !state.progress.is_objective_complete("escaped") {
        log::error!("Walkthrough did not reach the escape objective");
    }

    Ok(())
}
