//! Collaborator interfaces: rasterization and input polling
//!
//! Rendering and keyboard handling are external to the core. The orchestrator
//! is the only caller of `Renderer` (never a worker thread) and polls the
//! `InputSource` exactly once per tick, before dispatching workers.

use glam::DVec2;

use crate::sim::Triangle;

/// One discrete input action per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    TurnLeft,
    TurnRight,
    ThrustForward,
    ThrustReverse,
    Fire,
    Quit,
    #[default]
    Idle,
}

/// Polled once per tick by the orchestrator
pub trait InputSource {
    fn poll(&mut self) -> Action;
}

/// Frame sink driven from the orchestrator's render step
pub trait Renderer {
    fn clear(&mut self);
    fn draw_circle(&mut self, center: DVec2, radius: f64);
    fn draw_dot(&mut self, pos: DVec2);
    fn draw_triangle(&mut self, pose: &Triangle, invincible: bool);
    fn present(&mut self);
}

/// Renderer that discards every frame (headless runs and tests)
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn clear(&mut self) {}
    fn draw_circle(&mut self, _center: DVec2, _radius: f64) {}
    fn draw_dot(&mut self, _pos: DVec2) {}
    fn draw_triangle(&mut self, _pose: &Triangle, _invincible: bool) {}
    fn present(&mut self) {}
}

/// Replays a fixed action sequence, then keeps returning `tail`
#[derive(Debug)]
pub struct ScriptedInput {
    actions: Vec<Action>,
    cursor: usize,
    tail: Action,
}

impl ScriptedInput {
    pub fn new(actions: Vec<Action>, tail: Action) -> Self {
        Self {
            actions,
            cursor: 0,
            tail,
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Action {
        let action = self.actions.get(self.cursor).copied().unwrap_or(self.tail);
        self.cursor += 1;
        action
    }
}
