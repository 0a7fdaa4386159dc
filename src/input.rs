//! Input events consumed by the pose controller, and their winit source.
//!
//! The core never polls. A host hands over discrete [`InputEvent`]s in the
//! order they happened; [`EventTranslator`] produces them from winit
//! `WindowEvent`s for native hosts.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, TouchPhase, WindowEvent};

/// Wheel units per scrolled line, matching a browser's pixel-mode `deltaY`.
pub const PIXELS_PER_LINE: f32 = 100.0;

/// A discrete input event in device coordinates.
///
/// Touch events carry every finger still on the surface after the event,
/// in the order they went down.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    PointerDown(Vec2),
    PointerMove(Vec2),
    PointerUp,
    PointerLeave,
    TouchStart(Vec<Vec2>),
    TouchMove(Vec<Vec2>),
    TouchEnd(Vec<Vec2>),
    /// Positive values zoom out.
    Wheel(f32),
    Resize { width: u32, height: u32 },
}

/// Turns winit window events into [`InputEvent`]s.
///
/// Tracks the cursor (winit reports button presses without a position) and
/// the set of active touches.
#[derive(Debug, Default)]
pub struct EventTranslator {
    cursor: Vec2,
    touches: Vec<(u64, Vec2)>,
}

impl EventTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translates one window event; returns `None` for events the viewer ignores.
    pub fn translate(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => Some(self.left_button(*state)),
            WindowEvent::CursorMoved { position, .. } => Some(
                self.cursor_moved(Vec2::new(position.x as f32, position.y as f32)),
            ),
            WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeave),
            WindowEvent::MouseWheel { delta, .. } => Some(InputEvent::Wheel(wheel_delta(*delta))),
            WindowEvent::Touch(touch) => self.touch(
                touch.id,
                touch.phase,
                Vec2::new(touch.location.x as f32, touch.location.y as f32),
            ),
            WindowEvent::Resized(size) => Some(InputEvent::Resize {
                width: size.width,
                height: size.height,
            }),
            _ => None,
        }
    }

    pub fn left_button(&mut self, state: ElementState) -> InputEvent {
        match state {
            ElementState::Pressed => InputEvent::PointerDown(self.cursor),
            ElementState::Released => InputEvent::PointerUp,
        }
    }

    pub fn cursor_moved(&mut self, position: Vec2) -> InputEvent {
        self.cursor = position;
        InputEvent::PointerMove(position)
    }

    /// Updates the touch set. Moves and ends of unknown touches are dropped.
    pub fn touch(&mut self, id: u64, phase: TouchPhase, position: Vec2) -> Option<InputEvent> {
        match phase {
            TouchPhase::Started => {
                self.touches.retain(|(known, _)| *known != id);
                self.touches.push((id, position));
                Some(InputEvent::TouchStart(self.positions()))
            }
            TouchPhase::Moved => {
                let (_, slot) = self.touches.iter_mut().find(|(known, _)| *known == id)?;
                *slot = position;
                Some(InputEvent::TouchMove(self.positions()))
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                let before = self.touches.len();
                self.touches.retain(|(known, _)| *known != id);
                (self.touches.len() != before).then(|| InputEvent::TouchEnd(self.positions()))
            }
        }
    }

    fn positions(&self) -> Vec<Vec2> {
        self.touches.iter().map(|(_, p)| *p).collect()
    }
}

/// Converts a winit scroll delta into browser-style wheel units.
///
/// winit reports scrolling away from the user as positive; browsers report
/// it as negative `deltaY`, which zooms in.
pub fn wheel_delta(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -y * PIXELS_PER_LINE,
        MouseScrollDelta::PixelDelta(position) => -(position.y as f32),
    }
}
