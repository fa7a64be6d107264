//! Player motion controller: movement-mode state machine over the physics
//! backend, camera synchronization, and safe teleportation.
//!
//! The controller owns the physics world and the player's capsule body. Each
//! frame it steps the simulation, applies exactly one movement mode, and
//! re-attaches the camera to the body (or the body to the camera, in noclip).

use engine_core::Camera;
use glam::Vec3;
use input::FrameInput;
use physics::{CharacterPhysics, PhysicsWorld};

/// Player capsule dimensions. Fixed for the lifetime of the controller.
pub const PLAYER_HEIGHT: f32 = 1.9;
pub const PLAYER_RADIUS: f32 = 0.35;
const CAPSULE_HALF_HEIGHT: f32 = PLAYER_HEIGHT / 2.0 - PLAYER_RADIUS;
/// Camera offset above the body origin (capsule center): eyes sit at
/// 0.9 × player height above the capsule base.
pub const CAMERA_OFFSET: f32 = PLAYER_HEIGHT * 0.9 - PLAYER_HEIGHT * 0.5;

const CROUCH_SPEED: f32 = 2.0;
const WALK_SPEED: f32 = 4.0;
const RUN_SPEED: f32 = 7.0;
const JUMP_SPEED: f32 = 5.0;
const FLY_SPEED: f32 = 8.0;
const NOCLIP_SPEED: f32 = 12.0;
const FLY_RUN_FACTOR: f32 = 2.5;
/// Horizontal velocity is clamped per axis (not as a vector) to this factor
/// of the current max speed.
const AXIS_CLAMP: f32 = 1.5;
/// Horizontal damping factor per 60 Hz frame when no directional input.
const FRICTION_DAMPING: f32 = 0.82;
/// Post-teleport window during which the body stays kinematic and the world
/// is not stepped, so the solver cannot react to the warp.
const STABILIZE_SECS: f32 = 0.05;
/// Downward probe distance for grounded checks (capsule half extent + slack).
const GROUND_PROBE: f32 = CAPSULE_HALF_HEIGHT + PLAYER_RADIUS + 0.12;
/// Vertical lift applied by an emergency rescue.
const RESCUE_LIFT: f32 = 1.5;

/// Exactly one movement mode is active at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionMode {
    /// Walk/run/crouch on a dynamic body with gravity and collision.
    Normal,
    /// Free fly along the camera axes (dev).
    Fly,
    /// Fly pinned to a fixed altitude (dev, and the rescue fallback).
    FixedHeight { altitude: f32 },
    /// Camera is the source of truth; the body is dragged along (dev).
    Noclip,
}

/// Override layer that suspends the active mode entirely.
#[derive(Debug, Clone, Copy, PartialEq)]
enum OverrideState {
    None,
    /// Everything is suspended, including physics stepping.
    SpawnFrozen,
    /// Post-teleport settling; counts down to zero then restores the mode.
    Stabilizing { remaining: f32 },
}

/// First-person character controller. Generic over the physics backend so
/// the mode logic is written once and testable against a stub.
pub struct PlayerMotionController<P: CharacterPhysics> {
    physics: P,
    body: P::Body,
    mode: MotionMode,
    override_state: OverrideState,
    /// Reference-counted input freeze (modal dialogs). Physics stepping and
    /// camera sync continue while frozen; only directional input is dropped.
    freeze_depth: u32,
    dev_mode: bool,
    last_safe_position: Vec3,
}

/// The production controller over rapier.
pub type Controller = PlayerMotionController<PhysicsWorld>;

impl<P: CharacterPhysics> PlayerMotionController<P> {
    /// Create the player body at the camera's position, offset down to the
    /// capsule center. Returns `None` (logged by the backend) if the spawn
    /// position is invalid.
    pub fn new(mut physics: P, camera: &Camera, dev_mode: bool) -> Option<Self> {
        let spawn = camera.position() - Vec3::Y * CAMERA_OFFSET;
        let body = physics.spawn_character(spawn, CAPSULE_HALF_HEIGHT, PLAYER_RADIUS)?;
        Some(Self {
            physics,
            body,
            mode: MotionMode::Normal,
            override_state: OverrideState::None,
            freeze_depth: 0,
            dev_mode,
            last_safe_position: spawn,
        })
    }

    /// Advance one frame: handle override states, step physics, run the
    /// active movement mode, and sync the camera. `dt` must already be
    /// clamped by the caller (see `engine_core::Time::delta_seconds`).
    pub fn tick(&mut self, dt: f32, input: &FrameInput, camera: &mut Camera) {
        match &mut self.override_state {
            OverrideState::SpawnFrozen => return,
            OverrideState::Stabilizing { remaining } => {
                *remaining -= dt;
                if *remaining <= 0.0 {
                    self.override_state = OverrideState::None;
                    self.apply_mode_body_state();
                }
                return;
            }
            OverrideState::None => {}
        }

        self.physics.step(dt);

        let effective = if self.is_frozen() {
            FrameInput::default()
        } else {
            *input
        };

        match self.mode {
            MotionMode::Noclip => self.move_noclip(&effective, camera, dt),
            MotionMode::FixedHeight { altitude } => {
                self.move_fixed_height(altitude, &effective, camera, dt)
            }
            MotionMode::Fly => self.move_fly(&effective, camera, dt),
            MotionMode::Normal => self.move_normal(&effective, camera, dt),
        }

        // Noclip syncs body-from-camera inside its handler.
        if self.mode != MotionMode::Noclip {
            self.sync_camera(camera);
        }
    }

    // ── Movement modes ──────────────────────────────────────────────────

    fn move_normal(&mut self, input: &FrameInput, camera: &Camera, dt: f32) {
        let max_speed = if input.is_crouching {
            CROUCH_SPEED
        } else if input.is_running {
            RUN_SPEED
        } else {
            WALK_SPEED
        };

        let mut vel = self.physics.velocity(self.body);
        if input.any_movement() {
            let axes = input.movement_axes();
            let (forward, right) = camera.ground_basis();
            let dir = forward * axes.y + right * axes.x;
            vel.x = dir.x * max_speed;
            vel.z = dir.z * max_speed;
        } else {
            let damp = FRICTION_DAMPING.powf(dt * 60.0);
            vel.x *= damp;
            vel.z *= damp;
        }

        let cap = max_speed * AXIS_CLAMP;
        vel.x = vel.x.clamp(-cap, cap);
        vel.z = vel.z.clamp(-cap, cap);

        if input.jump && self.physics.is_grounded(self.body, GROUND_PROBE) {
            vel.y = JUMP_SPEED;
        }

        self.physics.set_velocity(self.body, vel);
    }

    fn move_fly(&mut self, input: &FrameInput, camera: &Camera, dt: f32) {
        let axes = input.movement_axes();
        let forward = camera.forward();
        let right = camera.transform.right();
        let mut dir = forward * axes.y + right * axes.x + Vec3::Y * vertical_axis(input);
        if dir.length_squared() > 0.0 {
            dir = dir.normalize();
            let speed = fly_speed(FLY_SPEED, input);
            let pos = self.physics.position(self.body);
            self.physics.warp(self.body, pos + dir * speed * dt);
        }
    }

    fn move_fixed_height(&mut self, altitude: f32, input: &FrameInput, camera: &Camera, dt: f32) {
        let axes = input.movement_axes();
        let (forward, right) = camera.ground_basis();
        let mut dir = forward * axes.y + right * axes.x;
        let pos = self.physics.position(self.body);
        let mut next = Vec3::new(pos.x, altitude, pos.z);
        if dir.length_squared() > 0.0 {
            dir = dir.normalize();
            next += dir * fly_speed(FLY_SPEED, input) * dt;
            next.y = altitude;
        }
        self.physics.warp(self.body, next);
    }

    fn move_noclip(&mut self, input: &FrameInput, camera: &mut Camera, dt: f32) {
        let axes = input.movement_axes();
        camera.process_fly(axes, vertical_axis(input), fly_speed(NOCLIP_SPEED, input), dt);
        // Camera is the source of truth; drag the body along underneath it.
        self.physics
            .warp(self.body, camera.position() - Vec3::Y * CAMERA_OFFSET);
    }

    fn sync_camera(&mut self, camera: &mut Camera) {
        let pos = self.physics.position(self.body);
        if pos.x.is_nan() || pos.y.is_nan() || pos.z.is_nan() {
            log::error!(
                "Player body position went NaN; resetting to {:?}",
                self.last_safe_position
            );
            self.physics.warp(self.body, self.last_safe_position);
            camera.transform.position = self.last_safe_position + Vec3::Y * CAMERA_OFFSET;
            return;
        }
        self.last_safe_position = pos;
        camera.transform.position = pos + Vec3::Y * CAMERA_OFFSET;
    }

    // ── Teleport & rescue ───────────────────────────────────────────────

    /// Warp the body to `position` and enter the stabilization window. NaN
    /// components are rejected with a logged error and no state change. A
    /// second teleport during stabilization restarts the window.
    pub fn teleport_to(&mut self, position: Vec3, camera: &mut Camera) {
        if position.x.is_nan() || position.y.is_nan() || position.z.is_nan() {
            log::error!("Rejected teleport to NaN position");
            return;
        }
        self.physics.set_kinematic(self.body, true);
        self.physics.warp(self.body, position);
        self.last_safe_position = position;
        camera.transform.position = position + Vec3::Y * CAMERA_OFFSET;
        self.override_state = OverrideState::Stabilizing {
            remaining: STABILIZE_SECS,
        };
    }

    /// Escape hatch for falling through geometry: switch to fixed-height
    /// flight slightly above the current position, with no stabilization
    /// window. Not dev-gated.
    pub fn emergency_rescue(&mut self, camera: &mut Camera) {
        let pos = self.physics.position(self.body);
        let altitude = pos.y + RESCUE_LIFT;
        log::warn!("Emergency rescue: fixed-height flight at y = {:.2}", altitude);
        self.enter_mode(MotionMode::FixedHeight { altitude });
        self.physics
            .warp(self.body, Vec3::new(pos.x, altitude, pos.z));
        self.last_safe_position = Vec3::new(pos.x, altitude, pos.z);
        self.sync_camera(camera);
    }

    // ── Mode toggles (dev) ──────────────────────────────────────────────

    pub fn toggle_fly(&mut self) {
        if !self.check_dev("fly") {
            return;
        }
        let next = if self.mode == MotionMode::Fly {
            MotionMode::Normal
        } else {
            MotionMode::Fly
        };
        self.enter_mode(next);
    }

    pub fn toggle_fixed_height(&mut self) {
        if !self.check_dev("fixed-height") {
            return;
        }
        let next = match self.mode {
            MotionMode::FixedHeight { .. } => MotionMode::Normal,
            _ => MotionMode::FixedHeight {
                altitude: self.physics.position(self.body).y,
            },
        };
        self.enter_mode(next);
    }

    pub fn set_noclip(&mut self, enabled: bool) {
        if !self.check_dev("noclip") {
            return;
        }
        let next = if enabled {
            MotionMode::Noclip
        } else {
            MotionMode::Normal
        };
        if next != self.mode {
            self.enter_mode(next);
        }
    }

    /// Suspend the controller entirely (no stepping, no input, no sync), or
    /// resume it.
    pub fn toggle_spawn_freeze(&mut self) {
        if !self.check_dev("spawn freeze") {
            return;
        }
        match self.override_state {
            OverrideState::SpawnFrozen => {
                self.override_state = OverrideState::None;
                self.apply_mode_body_state();
                log::info!("Spawn freeze released");
            }
            _ => {
                self.override_state = OverrideState::SpawnFrozen;
                self.physics.set_velocity(self.body, Vec3::ZERO);
                self.physics.set_kinematic(self.body, true);
                log::info!("Spawn freeze engaged");
            }
        }
    }

    fn check_dev(&self, what: &str) -> bool {
        if !self.dev_mode {
            log::warn!("{} mode requires dev_mode", what);
        }
        self.dev_mode
    }

    fn enter_mode(&mut self, mode: MotionMode) {
        // Stale velocity from the previous mode must never leak into the
        // next one (e.g. Normal's friction decay continuing into Fly).
        self.physics.set_velocity(self.body, Vec3::ZERO);
        self.mode = mode;
        self.apply_mode_body_state();
        log::info!("Motion mode -> {:?}", mode);
    }

    fn apply_mode_body_state(&mut self) {
        let kinematic = self.mode != MotionMode::Normal;
        self.physics.set_kinematic(self.body, kinematic);
    }

    // ── Input freeze (modal dialogs) ────────────────────────────────────

    /// Ignore directional input until a matching [`unfreeze`](Self::unfreeze).
    /// Freezes nest; physics stepping and camera sync are unaffected.
    pub fn freeze(&mut self) {
        self.freeze_depth += 1;
    }

    /// Release one freeze. Unbalanced calls are logged and ignored rather
    /// than wrapping, so a double-release can never strand the player.
    pub fn unfreeze(&mut self) {
        if self.freeze_depth == 0 {
            log::warn!("unfreeze() without matching freeze(); ignoring");
            return;
        }
        self.freeze_depth -= 1;
    }

    pub fn is_frozen(&self) -> bool {
        self.freeze_depth > 0
    }

    // ── Accessors ───────────────────────────────────────────────────────

    pub fn mode(&self) -> MotionMode {
        self.mode
    }

    pub fn is_stabilizing(&self) -> bool {
        matches!(self.override_state, OverrideState::Stabilizing { .. })
    }

    pub fn is_spawn_frozen(&self) -> bool {
        self.override_state == OverrideState::SpawnFrozen
    }

    pub fn body_position(&self) -> Vec3 {
        self.physics.position(self.body)
    }

    pub fn body_handle(&self) -> P::Body {
        self.body
    }

    pub fn physics(&self) -> &P {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut P {
        &mut self.physics
    }
}

fn vertical_axis(input: &FrameInput) -> f32 {
    if input.jump {
        1.0
    } else if input.is_crouching {
        -1.0
    } else {
        0.0
    }
}

fn fly_speed(base: f32, input: &FrameInput) -> f32 {
    if input.is_running {
        base * FLY_RUN_FACTOR
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal backend that records what the controller asked of it.
    struct StubPhysics {
        pos: Vec3,
        vel: Vec3,
        kinematic: bool,
        grounded: bool,
        steps: u32,
    }

    impl StubPhysics {
        fn new() -> Self {
            Self {
                pos: Vec3::new(0.0, 1.0, 0.0),
                vel: Vec3::ZERO,
                kinematic: false,
                grounded: true,
                steps: 0,
            }
        }
    }

    #[derive(Debug, Clone, Copy)]
    struct StubBody;

    impl CharacterPhysics for StubPhysics {
        type Body = StubBody;

        fn step(&mut self, _dt: f32) {
            self.steps += 1;
        }

        fn spawn_character(
            &mut self,
            position: Vec3,
            _half_height: f32,
            _radius: f32,
        ) -> Option<Self::Body> {
            if position.x.is_nan() || position.y.is_nan() || position.z.is_nan() {
                return None;
            }
            self.pos = position;
            Some(StubBody)
        }

        fn remove_character(&mut self, _body: Self::Body) {}

        fn position(&self, _body: Self::Body) -> Vec3 {
            self.pos
        }

        fn warp(&mut self, _body: Self::Body, position: Vec3) {
            self.pos = position;
            self.vel = Vec3::ZERO;
        }

        fn velocity(&self, _body: Self::Body) -> Vec3 {
            self.vel
        }

        fn set_velocity(&mut self, _body: Self::Body, velocity: Vec3) {
            self.vel = velocity;
        }

        fn set_kinematic(&mut self, _body: Self::Body, kinematic: bool) {
            self.kinematic = kinematic;
        }

        fn is_grounded(&self, _body: Self::Body, _probe_distance: f32) -> bool {
            self.grounded
        }
    }

    fn controller(dev: bool) -> (PlayerMotionController<StubPhysics>, Camera) {
        let camera = Camera::new(Vec3::new(0.0, 1.0 + CAMERA_OFFSET, 0.0));
        let ctl = PlayerMotionController::new(StubPhysics::new(), &camera, dev).unwrap();
        (ctl, camera)
    }

    fn forward_input() -> FrameInput {
        FrameInput {
            move_forward: true,
            ..Default::default()
        }
    }

    /// Walking forward sets velocity along the camera's -Z at walk speed;
    /// running raises it to run speed.
    #[test]
    fn normal_mode_walk_and_run_speeds() {
        let (mut ctl, mut camera) = controller(false);
        ctl.tick(1.0 / 60.0, &forward_input(), &mut camera);
        let vel = ctl.physics().vel;
        assert!((vel.z + WALK_SPEED).abs() < 1.0e-4, "vel = {:?}", vel);

        let run = FrameInput {
            is_running: true,
            ..forward_input()
        };
        ctl.tick(1.0 / 60.0, &run, &mut camera);
        assert!((ctl.physics().vel.z + RUN_SPEED).abs() < 1.0e-4);
    }

    /// With no input, horizontal velocity decays exponentially instead of
    /// snapping to zero, and is clamped per axis.
    #[test]
    fn normal_mode_friction_decay_and_axis_clamp() {
        let (mut ctl, mut camera) = controller(false);
        ctl.physics_mut().vel = Vec3::new(100.0, 0.0, -3.0);
        ctl.tick(1.0 / 60.0, &FrameInput::default(), &mut camera);
        let vel = ctl.physics().vel;
        let cap = WALK_SPEED * AXIS_CLAMP;
        assert!(vel.x <= cap, "x not clamped: {}", vel.x);
        assert!(vel.z < 0.0 && vel.z > -3.0, "z not decayed: {}", vel.z);
    }

    /// Switching modes zeroes stale velocity, and the new mode never applies
    /// the old mode's friction decay.
    #[test]
    fn mode_switch_clears_stale_velocity() {
        let (mut ctl, mut camera) = controller(true);
        ctl.tick(1.0 / 60.0, &forward_input(), &mut camera);
        assert!(ctl.physics().vel.length() > 0.0);

        ctl.toggle_fly();
        assert_eq!(ctl.mode(), MotionMode::Fly);
        assert_eq!(ctl.physics().vel, Vec3::ZERO);
        assert!(ctl.physics().kinematic);

        // Fly with no input leaves both velocity and position untouched.
        let before = ctl.physics().pos;
        ctl.tick(1.0 / 60.0, &FrameInput::default(), &mut camera);
        assert_eq!(ctl.physics().pos, before);
        assert_eq!(ctl.physics().vel, Vec3::ZERO);
    }

    /// Dev toggles are inert without dev_mode.
    #[test]
    fn dev_toggles_require_dev_mode() {
        let (mut ctl, _camera) = controller(false);
        ctl.toggle_fly();
        ctl.toggle_fixed_height();
        ctl.set_noclip(true);
        ctl.toggle_spawn_freeze();
        assert_eq!(ctl.mode(), MotionMode::Normal);
        assert!(!ctl.is_spawn_frozen());
    }

    /// During stabilization the body does not move and the world is not
    /// stepped; once the window elapses, simulation resumes dynamic.
    #[test]
    fn teleport_stabilization_window() {
        let (mut ctl, mut camera) = controller(false);
        let target = Vec3::new(10.0, 5.0, -3.0);
        ctl.teleport_to(target, &mut camera);
        assert!(ctl.is_stabilizing());
        assert!(ctl.physics().kinematic);
        assert_eq!(camera.position(), target + Vec3::Y * CAMERA_OFFSET);

        let steps_before = ctl.physics().steps;
        ctl.tick(0.02, &forward_input(), &mut camera);
        ctl.tick(0.02, &forward_input(), &mut camera);
        assert_eq!(ctl.physics().pos, target);
        assert_eq!(ctl.physics().steps, steps_before);
        assert!(ctl.is_stabilizing());

        // Third tick crosses the 50 ms boundary and restores dynamic mode.
        ctl.tick(0.02, &forward_input(), &mut camera);
        assert!(!ctl.is_stabilizing());
        assert!(!ctl.physics().kinematic);

        ctl.tick(0.02, &forward_input(), &mut camera);
        assert_eq!(ctl.physics().steps, steps_before + 1);
    }

    /// A second teleport during stabilization restarts the window rather
    /// than stacking it.
    #[test]
    fn teleport_restarts_stabilization() {
        let (mut ctl, mut camera) = controller(false);
        ctl.teleport_to(Vec3::new(1.0, 1.0, 1.0), &mut camera);
        ctl.tick(0.04, &FrameInput::default(), &mut camera);
        ctl.teleport_to(Vec3::new(2.0, 2.0, 2.0), &mut camera);
        // 40 ms into the *new* window: still stabilizing.
        ctl.tick(0.04, &FrameInput::default(), &mut camera);
        assert!(ctl.is_stabilizing());
        ctl.tick(0.02, &FrameInput::default(), &mut camera);
        assert!(!ctl.is_stabilizing());
    }

    /// NaN teleports are rejected without moving the body or throwing.
    #[test]
    fn nan_teleport_is_rejected() {
        let (mut ctl, mut camera) = controller(false);
        let before = ctl.physics().pos;
        ctl.teleport_to(Vec3::new(f32::NAN, 0.0, 0.0), &mut camera);
        assert_eq!(ctl.physics().pos, before);
        assert!(!ctl.is_stabilizing());
        assert!(!ctl.physics().kinematic);
    }

    /// Spawn freeze suspends everything, including physics stepping.
    #[test]
    fn spawn_freeze_suspends_stepping() {
        let (mut ctl, mut camera) = controller(true);
        ctl.toggle_spawn_freeze();
        let steps = ctl.physics().steps;
        ctl.tick(1.0 / 60.0, &forward_input(), &mut camera);
        assert_eq!(ctl.physics().steps, steps);
        ctl.toggle_spawn_freeze();
        ctl.tick(1.0 / 60.0, &forward_input(), &mut camera);
        assert_eq!(ctl.physics().steps, steps + 1);
    }

    /// Frozen input still steps physics and syncs the camera, but ignores
    /// directional keys.
    #[test]
    fn freeze_drops_input_but_keeps_stepping() {
        let (mut ctl, mut camera) = controller(false);
        ctl.freeze();
        let steps = ctl.physics().steps;
        ctl.tick(1.0 / 60.0, &forward_input(), &mut camera);
        assert_eq!(ctl.physics().steps, steps + 1);
        // No drive velocity was applied (damping of zero stays zero).
        assert_eq!(ctl.physics().vel, Vec3::ZERO);
        ctl.unfreeze();
        ctl.tick(1.0 / 60.0, &forward_input(), &mut camera);
        assert!(ctl.physics().vel.length() > 0.0);
    }

    /// Unbalanced unfreeze calls are ignored; freezes nest correctly.
    #[test]
    fn freeze_is_reference_counted() {
        let (mut ctl, _camera) = controller(false);
        ctl.freeze();
        ctl.freeze();
        ctl.unfreeze();
        assert!(ctl.is_frozen());
        ctl.unfreeze();
        assert!(!ctl.is_frozen());
        ctl.unfreeze(); // extra release must not wrap
        assert!(!ctl.is_frozen());
        ctl.freeze();
        assert!(ctl.is_frozen());
        ctl.unfreeze();
        assert!(!ctl.is_frozen());
    }

    /// Noclip makes the camera the source of truth and drags the body.
    #[test]
    fn noclip_drags_body_under_camera() {
        let (mut ctl, mut camera) = controller(true);
        ctl.set_noclip(true);
        assert_eq!(ctl.mode(), MotionMode::Noclip);
        let input = forward_input();
        ctl.tick(0.1, &input, &mut camera);
        // Default camera faces -Z; it must have moved and the body follows.
        assert!(camera.position().z < 0.0);
        assert_eq!(
            ctl.physics().pos,
            camera.position() - Vec3::Y * CAMERA_OFFSET
        );
    }

    /// Emergency rescue enters fixed-height mode at or above the current
    /// altitude, kinematic, without a stabilization window.
    #[test]
    fn emergency_rescue_lifts_into_fixed_height() {
        let (mut ctl, mut camera) = controller(false);
        let y_before = ctl.physics().pos.y;
        ctl.emergency_rescue(&mut camera);
        match ctl.mode() {
            MotionMode::FixedHeight { altitude } => assert!(altitude >= y_before),
            other => panic!("expected FixedHeight, got {:?}", other),
        }
        assert!(ctl.physics().kinematic);
        assert!(!ctl.is_stabilizing());
    }

    /// Fixed-height movement never changes the pinned altitude.
    #[test]
    fn fixed_height_pins_altitude() {
        let (mut ctl, mut camera) = controller(true);
        ctl.toggle_fixed_height();
        let altitude = match ctl.mode() {
            MotionMode::FixedHeight { altitude } => altitude,
            other => panic!("expected FixedHeight, got {:?}", other),
        };
        for _ in 0..30 {
            ctl.tick(1.0 / 60.0, &forward_input(), &mut camera);
        }
        assert!((ctl.physics().pos.y - altitude).abs() < 1.0e-4);
        assert!(ctl.physics().pos.z < 0.0, "did not move forward");
    }
}
