//! Per-call bundles handed to game callbacks and entity hooks.
//!
//! A toolbox is built fresh for every frame and shared, unchanged, by the
//! game-level callback and every entity hook of one phase. Its surface and
//! timing fields are read-only; the shared [`GameContext`] is writable, and
//! structural changes (spawning, despawning, pausing, ending) are requested
//! through [`Commands`] and applied by the loop between phases.

#[cfg(test)]
#[path = "toolbox_test.rs"]
mod toolbox_test;

use std::ops::{Deref, DerefMut};

use crate::context::GameContext;
use crate::entity::Entity;
use crate::error::EngineError;
use crate::geometry::{self, Dimensions2D, Rect, Vector2D};
use crate::input::PressedKeys;
use crate::surface::{self, Surface};

/// Toolbox for the one-shot `init` callback. No frame has elapsed yet, so it
/// carries no timing.
pub struct InitToolbox<'a, S> {
    surface: &'a S,
    context: &'a mut GameContext,
}

impl<'a, S: Surface> InitToolbox<'a, S> {
    pub(crate) fn new(surface: &'a S, context: &'a mut GameContext) -> Self {
        Self { surface, context }
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        self.surface
    }

    #[must_use]
    pub fn context(&self) -> &GameContext {
        &*self.context
    }

    pub fn context_mut(&mut self) -> &mut GameContext {
        &mut *self.context
    }
}

/// Toolbox for the update, fixed-update and render phases.
pub struct FrameToolbox<'a, S> {
    surface: &'a S,
    context: &'a mut GameContext,
    commands: &'a mut Commands<S>,
    elapsed_seconds: f64,
    fps: f64,
}

impl<'a, S: Surface> FrameToolbox<'a, S> {
    pub(crate) fn new(
        surface: &'a S,
        context: &'a mut GameContext,
        commands: &'a mut Commands<S>,
        elapsed_seconds: f64,
        fps: f64,
    ) -> Self {
        Self { surface, context, commands, elapsed_seconds, fps }
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        self.surface
    }

    #[must_use]
    pub fn context(&self) -> &GameContext {
        &*self.context
    }

    pub fn context_mut(&mut self) -> &mut GameContext {
        &mut *self.context
    }

    /// Seconds since the previous tick.
    #[must_use]
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }

    /// Frame-rate estimate, `round(1 / elapsed_seconds)`.
    #[must_use]
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Queue for registry and loop-control changes.
    pub fn commands(&mut self) -> &mut Commands<S> {
        &mut *self.commands
    }

    /// Clear the whole surface.
    pub fn clear(&self) {
        surface::clear_canvas(Some(self.surface));
    }

    /// Canvas rectangle for a center-based, Y-up location.
    ///
    /// # Errors
    ///
    /// Propagates [`geometry::canvas_rect`] errors.
    pub fn canvas_rect(&self, location: Vector2D, dimensions: Dimensions2D) -> Result<Rect, EngineError> {
        geometry::canvas_rect(location, dimensions, Some(self.surface))
    }
}

/// Toolbox for the handle-input phase: a [`FrameToolbox`] plus the keys
/// currently held down.
pub struct InputToolbox<'a, S> {
    frame: FrameToolbox<'a, S>,
    keys: &'a PressedKeys,
}

impl<'a, S: Surface> InputToolbox<'a, S> {
    pub(crate) fn new(frame: FrameToolbox<'a, S>, keys: &'a PressedKeys) -> Self {
        Self { frame, keys }
    }

    #[must_use]
    pub fn keys(&self) -> &PressedKeys {
        self.keys
    }
}

impl<'a, S> Deref for InputToolbox<'a, S> {
    type Target = FrameToolbox<'a, S>;

    fn deref(&self) -> &Self::Target {
        &self.frame
    }
}

impl<S> DerefMut for InputToolbox<'_, S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.frame
    }
}

/// A registry change requested from inside a phase.
pub(crate) enum RegistryCommand<S> {
    Spawn(Box<dyn Entity<S>>),
    Despawn(String),
}

/// A loop-state change requested from inside a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Pause,
    Unpause,
    End,
}

/// Deferred changes requested by callbacks and hooks.
///
/// Registry changes are applied, in request order, right after the phase that
/// requested them finishes its entity traversal. Loop-control changes are
/// applied at the end of the tick.
pub struct Commands<S> {
    registry: Vec<RegistryCommand<S>>,
    control: Vec<LoopControl>,
}

impl<S> Commands<S> {
    #[must_use]
    pub fn new() -> Self {
        Self { registry: Vec::new(), control: Vec::new() }
    }

    /// Register `entity` once the current phase completes.
    pub fn spawn<E: Entity<S> + 'static>(&mut self, entity: E) {
        self.registry.push(RegistryCommand::Spawn(Box::new(entity)));
    }

    /// Remove the entity with `id` once the current phase completes.
    pub fn despawn(&mut self, id: impl Into<String>) {
        self.registry.push(RegistryCommand::Despawn(id.into()));
    }

    /// Pause the loop from the next tick on.
    pub fn pause(&mut self) {
        self.control.push(LoopControl::Pause);
    }

    /// Resume dispatch from the next tick on.
    pub fn unpause(&mut self) {
        self.control.push(LoopControl::Unpause);
    }

    /// Stop the loop; the next tick does not dispatch or reschedule.
    pub fn end(&mut self) {
        self.control.push(LoopControl::End);
    }

    /// Number of queued requests of either kind.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.registry.len() + self.control.len()
    }

    /// Move every request queued in `other` behind the ones already here.
    pub(crate) fn append(&mut self, other: &mut Commands<S>) {
        self.registry.append(&mut other.registry);
        self.control.append(&mut other.control);
    }

    pub(crate) fn take_registry(&mut self) -> Vec<RegistryCommand<S>> {
        std::mem::take(&mut self.registry)
    }

    pub(crate) fn take_control(&mut self) -> Vec<LoopControl> {
        std::mem::take(&mut self.control)
    }
}

impl<S> Default for Commands<S> {
    fn default() -> Self {
        Self::new()
    }
}
