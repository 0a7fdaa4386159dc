//! Damped orientation and zoom control driven by pointer, touch and wheel input.
//!
//! [`PoseController`] is a small state machine:
//!
//! ```text
//!              pointer down                    pointer up / leave
//! AutoRotating ────────────► Dragging ─────────────────────────► Settling
//!      ▲                        ▲                                   │
//!      │                        └────────── pointer down ───────────┤
//!      └──────────────────── settle timer expires ──────────────────┘
//! ```
//!
//! Wheel and pinch zoom re-arm the settle timer from any idle state. Every
//! [`tick`](PoseController::tick) damps the current angles toward their
//! targets, in every state, so motion never snaps.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use handset::{InputEvent, PoseController, PoseMode, Vec2};
//!
//! let mut pose = PoseController::default();
//! pose.handle(&InputEvent::PointerDown(Vec2::new(100.0, 100.0)));
//! pose.handle(&InputEvent::PointerMove(Vec2::new(140.0, 100.0)));
//! pose.handle(&InputEvent::PointerUp);
//! assert_eq!(pose.mode(), PoseMode::Settling);
//!
//! pose.tick(Duration::from_millis(3000));
//! assert_eq!(pose.mode(), PoseMode::AutoRotating);
//! ```

use std::f32::consts::FRAC_PI_2;
use std::time::Duration;

use glam::{Quat, Vec2};

use crate::input::InputEvent;
use crate::model::Orientation;

/// Tunables for [`PoseController`].
#[derive(Clone, Debug, PartialEq)]
pub struct PoseConfig {
    /// Radians per pixel of drag.
    pub sensitivity: f32,
    /// Distance per wheel unit.
    pub zoom_sensitivity: f32,
    /// Distance per pixel of change in two-finger span.
    pub pinch_sensitivity: f32,
    /// Fraction of the remaining angle covered per tick, in `(0, 1]`.
    pub damping: f32,
    /// Radians added to the target yaw per tick while auto-rotating.
    pub auto_rotate_speed: f32,
    /// Idle time after an interaction before auto-rotation resumes.
    pub settle_delay: Duration,
    pub min_distance: f32,
    pub max_distance: f32,
    pub initial_distance: f32,
}

impl Default for PoseConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.005,
            zoom_sensitivity: 0.05,
            pinch_sensitivity: 0.05,
            damping: 0.1,
            auto_rotate_speed: 0.002,
            settle_delay: Duration::from_millis(3000),
            min_distance: 8.0,
            max_distance: 25.0,
            initial_distance: 15.0,
        }
    }
}

impl PoseConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set drag sensitivity in radians per pixel.
    pub fn sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Set wheel zoom sensitivity.
    pub fn zoom_sensitivity(mut self, sensitivity: f32) -> Self {
        self.zoom_sensitivity = sensitivity;
        self
    }

    pub fn pinch_sensitivity(mut self, sensitivity: f32) -> Self {
        self.pinch_sensitivity = sensitivity;
        self
    }

    /// Set the damping factor, clamped to `(0, 1]`.
    pub fn damping(mut self, damping: f32) -> Self {
        self.damping = damping.clamp(f32::EPSILON, 1.0);
        self
    }

    pub fn auto_rotate_speed(mut self, speed: f32) -> Self {
        self.auto_rotate_speed = speed;
        self
    }

    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Set distance limits. The initial distance is pulled into range.
    pub fn distance_limits(mut self, min: f32, max: f32) -> Self {
        self.min_distance = min.min(max);
        self.max_distance = max.max(min);
        self.initial_distance = self
            .initial_distance
            .clamp(self.min_distance, self.max_distance);
        self
    }

    pub fn initial_distance(mut self, distance: f32) -> Self {
        self.initial_distance = distance.clamp(self.min_distance, self.max_distance);
        self
    }
}

/// Which phase of the interaction cycle the controller is in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoseMode {
    AutoRotating,
    Dragging,
    /// Idle after an interaction, waiting for the settle timer.
    Settling,
}

/// Orientation and zoom state, read by the renderer every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoseState {
    pub target_yaw: f32,
    /// Always within `[-π/2, π/2]`.
    pub target_pitch: f32,
    pub current_yaw: f32,
    /// Always within `[-π/2, π/2]`.
    pub current_pitch: f32,
    /// Always within the configured distance limits.
    pub camera_distance: f32,
    pub is_dragging: bool,
    pub is_auto_rotating: bool,
    /// Drag anchor; `None` outside a drag.
    pub last_pointer_pos: Option<Vec2>,
}

/// Owns [`PoseState`] and applies input events and frame ticks to it.
#[derive(Clone, Debug)]
pub struct PoseController {
    config: PoseConfig,
    state: PoseState,
    /// Time accumulated from ticks; the settle deadline is measured on it.
    clock: Duration,
    settle_deadline: Option<Duration>,
    /// Finger span of an active pinch.
    pinch_span: Option<f32>,
}

impl Default for PoseController {
    fn default() -> Self {
        Self::new(PoseConfig::default())
    }
}

impl PoseController {
    pub fn new(config: PoseConfig) -> Self {
        let camera_distance = config
            .initial_distance
            .clamp(config.min_distance, config.max_distance);
        Self {
            config,
            state: PoseState {
                target_yaw: 0.0,
                target_pitch: 0.0,
                current_yaw: 0.0,
                current_pitch: 0.0,
                camera_distance,
                is_dragging: false,
                is_auto_rotating: true,
                last_pointer_pos: None,
            },
            clock: Duration::ZERO,
            settle_deadline: None,
            pinch_span: None,
        }
    }

    pub fn config(&self) -> &PoseConfig {
        &self.config
    }

    pub fn state(&self) -> &PoseState {
        &self.state
    }

    pub fn mode(&self) -> PoseMode {
        if self.state.is_dragging {
            PoseMode::Dragging
        } else if self.state.is_auto_rotating {
            PoseMode::AutoRotating
        } else {
            PoseMode::Settling
        }
    }

    /// True while a settle timer is pending.
    pub fn settle_pending(&self) -> bool {
        self.settle_deadline.is_some()
    }

    /// Damped orientation to apply to the model this frame.
    pub fn orientation(&self) -> Orientation {
        Orientation {
            pitch: self.state.current_pitch,
            yaw: self.state.current_yaw,
        }
    }

    pub fn rotation(&self) -> Quat {
        self.orientation().quat()
    }

    pub fn camera_distance(&self) -> f32 {
        self.state.camera_distance
    }

    /// Applies one input event. Resize events are not pose input and are ignored.
    ///
    /// Events carrying NaN or infinite coordinates or deltas are dropped.
    pub fn handle(&mut self, event: &InputEvent) {
        if !is_finite(event) {
            tracing::debug!(?event, "dropped non-finite input");
            return;
        }
        match event {
            InputEvent::PointerDown(position) => self.begin_drag(*position),
            InputEvent::PointerMove(position) => self.drag_to(*position),
            InputEvent::PointerUp | InputEvent::PointerLeave => self.release(),
            InputEvent::TouchStart(touches) => match touches.as_slice() {
                [] => {}
                [only] => self.begin_drag(*only),
                [a, b, ..] => self.begin_pinch(a.distance(*b)),
            },
            InputEvent::TouchMove(touches) => match touches.as_slice() {
                [] => {}
                [only] => self.drag_to(*only),
                [a, b, ..] => self.pinch_to(a.distance(*b)),
            },
            InputEvent::TouchEnd(remaining) => self.touch_end(remaining.len()),
            InputEvent::Wheel(delta) => self.zoom(delta * self.config.zoom_sensitivity),
            InputEvent::Resize { .. } => {}
        }
    }

    /// Advances the settle timer by `dt` and damps the angles one step.
    pub fn tick(&mut self, dt: Duration) {
        self.clock += dt;

        if let Some(deadline) = self.settle_deadline {
            if self.clock >= deadline {
                self.settle_deadline = None;
                if !self.state.is_dragging {
                    self.state.is_auto_rotating = true;
                    tracing::debug!("auto-rotation resumed");
                }
            }
        }

        let state = &mut self.state;
        if state.is_auto_rotating {
            state.target_yaw += self.config.auto_rotate_speed;
        }

        let k = self.config.damping;
        state.current_yaw += (state.target_yaw - state.current_yaw) * k;
        state.current_pitch += (state.target_pitch - state.current_pitch) * k;
        state.current_pitch = state.current_pitch.clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    fn begin_drag(&mut self, position: Vec2) {
        self.cancel_settle();
        self.pinch_span = None;
        self.state.is_dragging = true;
        self.state.is_auto_rotating = false;
        self.state.last_pointer_pos = Some(position);
    }

    fn drag_to(&mut self, position: Vec2) {
        if !self.state.is_dragging {
            return;
        }
        if let Some(last) = self.state.last_pointer_pos {
            let delta = (position - last) * self.config.sensitivity;
            if !delta.is_finite() {
                return;
            }
            self.state.target_yaw += delta.x;
            self.state.target_pitch =
                (self.state.target_pitch + delta.y).clamp(-FRAC_PI_2, FRAC_PI_2);
        }
        self.state.last_pointer_pos = Some(position);
    }

    fn release(&mut self) {
        if !self.state.is_dragging {
            return;
        }
        self.state.is_dragging = false;
        self.state.last_pointer_pos = None;
        self.arm_settle();
    }

    fn begin_pinch(&mut self, span: f32) {
        self.cancel_settle();
        self.state.is_dragging = false;
        self.state.is_auto_rotating = false;
        self.state.last_pointer_pos = None;
        self.pinch_span = Some(span);
    }

    fn pinch_to(&mut self, span: f32) {
        let Some(previous) = self.pinch_span else {
            self.begin_pinch(span);
            return;
        };
        // fingers spreading apart move the camera closer
        let delta = (previous - span) * self.config.pinch_sensitivity;
        self.pinch_span = Some(span);
        if delta.is_finite() {
            self.set_distance(self.state.camera_distance + delta);
        }
    }

    fn touch_end(&mut self, remaining: usize) {
        if self.pinch_span.is_some() && remaining < 2 {
            self.pinch_span = None;
            self.arm_settle();
        }
        if remaining == 0 {
            self.release();
        }
    }

    fn zoom(&mut self, amount: f32) {
        if !amount.is_finite() {
            return;
        }
        self.set_distance(self.state.camera_distance + amount);
        if self.state.is_dragging {
            // the drag owns the interaction; its release arms the timer
            return;
        }
        self.state.is_auto_rotating = false;
        self.arm_settle();
    }

    fn set_distance(&mut self, distance: f32) {
        self.state.camera_distance =
            distance.clamp(self.config.min_distance, self.config.max_distance);
    }

    /// Replaces any pending settle timer.
    fn arm_settle(&mut self) {
        self.settle_deadline = Some(self.clock + self.config.settle_delay);
    }

    fn cancel_settle(&mut self) {
        self.settle_deadline = None;
    }
}

fn is_finite(event: &InputEvent) -> bool {
    match event {
        InputEvent::PointerDown(p) | InputEvent::PointerMove(p) => p.is_finite(),
        InputEvent::TouchStart(touches)
        | InputEvent::TouchMove(touches)
        | InputEvent::TouchEnd(touches) => touches.iter().all(|p| p.is_finite()),
        InputEvent::Wheel(delta) => delta.is_finite(),
        InputEvent::PointerUp | InputEvent::PointerLeave | InputEvent::Resize { .. } => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn drag(pose: &mut PoseController, from: Vec2, to: Vec2) {
        pose.handle(&InputEvent::PointerDown(from));
        pose.handle(&InputEvent::PointerMove(to));
        pose.handle(&InputEvent::PointerUp);
    }

    fn run_for(pose: &mut PoseController, total: Duration) {
        let mut elapsed = Duration::ZERO;
        while elapsed < total {
            pose.tick(FRAME);
            elapsed += FRAME;
        }
    }

    #[test]
    fn starts_auto_rotating() {
        let mut pose = PoseController::default();
        assert_eq!(pose.mode(), PoseMode::AutoRotating);
        assert_eq!(pose.camera_distance(), 15.0);

        pose.tick(FRAME);
        assert_relative_eq!(pose.state().target_yaw, 0.002);
        assert_relative_eq!(pose.state().current_yaw, 0.0002, epsilon = 1e-7);
    }

    #[test]
    fn drag_updates_targets_with_sensitivity() {
        let mut pose = PoseController::default();
        pose.handle(&InputEvent::PointerDown(Vec2::new(0.0, 0.0)));
        assert_eq!(pose.mode(), PoseMode::Dragging);

        pose.handle(&InputEvent::PointerMove(Vec2::new(100.0, -40.0)));
        assert_relative_eq!(pose.state().target_yaw, 0.5);
        assert_relative_eq!(pose.state().target_pitch, -0.2);
        assert_eq!(pose.state().last_pointer_pos, Some(Vec2::new(100.0, -40.0)));
    }

    #[test]
    fn moves_without_a_drag_are_ignored() {
        let mut pose = PoseController::default();
        pose.handle(&InputEvent::PointerMove(Vec2::new(100.0, 100.0)));
        assert_eq!(pose.state().target_yaw, 0.0);
        pose.handle(&InputEvent::PointerLeave);
        assert_eq!(pose.mode(), PoseMode::AutoRotating);
    }

    #[test]
    fn damping_runs_while_dragging() {
        let mut pose = PoseController::default();
        pose.handle(&InputEvent::PointerDown(Vec2::ZERO));
        pose.handle(&InputEvent::PointerMove(Vec2::new(200.0, 0.0)));
        pose.tick(FRAME);
        assert_relative_eq!(pose.state().current_yaw, 0.1, epsilon = 1e-6);
        pose.tick(FRAME);
        assert_relative_eq!(pose.state().current_yaw, 0.19, epsilon = 1e-6);
        // no auto-rotation while dragging
        assert_relative_eq!(pose.state().target_yaw, 1.0);
    }

    #[test]
    fn settle_timer_resumes_auto_rotation() {
        let mut pose = PoseController::default();
        drag(&mut pose, Vec2::ZERO, Vec2::new(10.0, 0.0));
        assert_eq!(pose.mode(), PoseMode::Settling);
        assert!(pose.settle_pending());

        pose.tick(Duration::from_millis(2999));
        assert_eq!(pose.mode(), PoseMode::Settling);
        pose.tick(Duration::from_millis(1));
        assert_eq!(pose.mode(), PoseMode::AutoRotating);
        assert!(!pose.settle_pending());
    }

    #[test]
    fn new_drag_cancels_pending_settle() {
        let mut pose = PoseController::default();
        drag(&mut pose, Vec2::ZERO, Vec2::new(10.0, 0.0));
        pose.tick(Duration::from_millis(2000));

        pose.handle(&InputEvent::PointerDown(Vec2::ZERO));
        assert!(!pose.settle_pending());
        run_for(&mut pose, Duration::from_secs(10));
        assert_eq!(pose.mode(), PoseMode::Dragging);

        pose.handle(&InputEvent::PointerUp);
        pose.tick(Duration::from_millis(2999));
        assert_eq!(pose.mode(), PoseMode::Settling);
        pose.tick(Duration::from_millis(1));
        assert_eq!(pose.mode(), PoseMode::AutoRotating);
    }

    #[test]
    fn wheel_rearms_instead_of_stacking() {
        let mut pose = PoseController::default();
        pose.handle(&InputEvent::Wheel(10.0));
        assert_eq!(pose.mode(), PoseMode::Settling);
        assert_relative_eq!(pose.camera_distance(), 15.5);

        pose.tick(Duration::from_millis(2000));
        pose.handle(&InputEvent::Wheel(-10.0));
        // the first timer would have fired here
        pose.tick(Duration::from_millis(1500));
        assert_eq!(pose.mode(), PoseMode::Settling);
        pose.tick(Duration::from_millis(1500));
        assert_eq!(pose.mode(), PoseMode::AutoRotating);
    }

    #[test]
    fn wheel_during_drag_keeps_dragging() {
        let mut pose = PoseController::default();
        pose.handle(&InputEvent::PointerDown(Vec2::ZERO));
        pose.handle(&InputEvent::Wheel(-40.0));
        assert_relative_eq!(pose.camera_distance(), 13.0);
        assert!(!pose.settle_pending());
        run_for(&mut pose, Duration::from_secs(5));
        assert_eq!(pose.mode(), PoseMode::Dragging);
    }

    #[test]
    fn zoom_clamps_to_limits() {
        let mut pose = PoseController::default();
        for _ in 0..5 {
            pose.handle(&InputEvent::Wheel(1000.0));
        }
        assert_eq!(pose.camera_distance(), 25.0);
        for _ in 0..5 {
            pose.handle(&InputEvent::Wheel(-1000.0));
        }
        assert_eq!(pose.camera_distance(), 8.0);
    }

    #[test]
    fn non_finite_input_leaves_state_alone() {
        let mut pose = PoseController::default();
        pose.handle(&InputEvent::Wheel(f32::NAN));
        pose.handle(&InputEvent::Wheel(f32::INFINITY));
        assert_eq!(pose.camera_distance(), 15.0);
        assert_eq!(pose.mode(), PoseMode::AutoRotating);

        pose.handle(&InputEvent::PointerDown(Vec2::ZERO));
        pose.handle(&InputEvent::PointerMove(Vec2::new(f32::NAN, 10.0)));
        pose.handle(&InputEvent::PointerMove(Vec2::new(f32::MAX, -f32::MAX)));
        pose.handle(&InputEvent::PointerMove(Vec2::new(-f32::MAX, f32::MAX)));
        let state = pose.state();
        assert!(state.target_yaw.is_finite());
        assert!(state.target_pitch.abs() <= FRAC_PI_2);

        pose.handle(&InputEvent::TouchStart(vec![Vec2::ZERO, Vec2::new(100.0, 0.0)]));
        pose.handle(&InputEvent::TouchMove(vec![Vec2::ZERO, Vec2::new(f32::NAN, 0.0)]));
        assert_eq!(pose.camera_distance(), 15.0);
        pose.handle(&InputEvent::TouchMove(vec![Vec2::ZERO, Vec2::new(140.0, 0.0)]));
        assert_relative_eq!(pose.camera_distance(), 13.0, epsilon = 1e-5);
        pose.tick(FRAME);
        assert!(pose.state().current_yaw.is_finite());
    }

    #[test]
    fn single_touch_drags_and_pinch_zooms() {
        let mut pose = PoseController::default();
        pose.handle(&InputEvent::TouchStart(vec![Vec2::new(0.0, 0.0)]));
        pose.handle(&InputEvent::TouchMove(vec![Vec2::new(20.0, 0.0)]));
        assert_relative_eq!(pose.state().target_yaw, 0.1);

        pose.handle(&InputEvent::TouchStart(vec![Vec2::new(20.0, 0.0), Vec2::new(120.0, 0.0)]));
        assert!(!pose.state().is_dragging);
        pose.handle(&InputEvent::TouchMove(vec![Vec2::new(0.0, 0.0), Vec2::new(140.0, 0.0)]));
        // span grew by 40 px: 2 units closer
        assert_relative_eq!(pose.camera_distance(), 13.0, epsilon = 1e-5);
        assert_relative_eq!(pose.state().target_yaw, 0.1);

        pose.handle(&InputEvent::TouchEnd(vec![Vec2::new(140.0, 0.0)]));
        assert!(pose.settle_pending());
        pose.handle(&InputEvent::TouchEnd(vec![]));
        pose.tick(Duration::from_millis(3000));
        assert_eq!(pose.mode(), PoseMode::AutoRotating);
    }

    #[test]
    fn config_builders_keep_limits_consistent() {
        let config = PoseConfig::new().distance_limits(30.0, 10.0).damping(5.0);
        assert_eq!(config.min_distance, 10.0);
        assert_eq!(config.max_distance, 30.0);
        assert_eq!(config.initial_distance, 15.0);
        assert_eq!(config.damping, 1.0);

        let pose = PoseController::new(PoseConfig::new().distance_limits(1.0, 5.0));
        assert_eq!(pose.camera_distance(), 5.0);
    }

    fn arb_event() -> impl Strategy<Value = InputEvent> {
        let point = (-2000.0f32..2000.0, -2000.0f32..2000.0).prop_map(|(x, y)| Vec2::new(x, y));
        prop_oneof![
            point.clone().prop_map(InputEvent::PointerDown),
            point.clone().prop_map(InputEvent::PointerMove),
            Just(InputEvent::PointerUp),
            Just(InputEvent::PointerLeave),
            point.clone().prop_map(|p| InputEvent::TouchStart(vec![p])),
            point.prop_map(|p| InputEvent::TouchMove(vec![p])),
            (-5000.0f32..5000.0).prop_map(InputEvent::Wheel),
            Just(InputEvent::Wheel(f32::NAN)),
            Just(InputEvent::PointerMove(Vec2::NAN)),
        ]
    }

    proptest! {
        #[test]
        fn pitch_and_distance_stay_clamped(
            events in proptest::collection::vec((arb_event(), 0u64..100), 1..200)
        ) {
            let mut pose = PoseController::default();
            for (event, ms) in events {
                pose.handle(&event);
                pose.tick(Duration::from_millis(ms));
                let state = pose.state();
                prop_assert!(state.target_pitch.abs() <= FRAC_PI_2);
                prop_assert!(state.current_pitch.abs() <= FRAC_PI_2);
                prop_assert!((8.0..=25.0).contains(&state.camera_distance));
            }
        }
    }
}
