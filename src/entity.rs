//! Entities: game objects the loop dispatches phase hooks to.
//!
//! An entity implements [`Spatial`] (where it is, how big, whether it has a
//! bounding box) and [`Entity`], whose lifecycle hooks all default to no-ops so
//! an implementation only overrides the phases it cares about. Registered
//! entities live in [`Entities`], which keeps insertion order and enforces
//! unique ids.

#[cfg(test)]
#[path = "entity_test.rs"]
mod entity_test;

use crate::collision::is_entity_colliding_with_entity;
use crate::error::EngineError;
use crate::geometry::{BoundingBox, Dimensions2D, Vector2D};
use crate::toolbox::{FrameToolbox, InputToolbox};

/// Outcome of a callback or hook. A failure is logged by the loop and the
/// remaining dispatch for that frame continues.
pub type HookResult = Result<(), EngineError>;

/// Position and extent of a game object.
pub trait Spatial {
    /// Identifier, unique within one registry.
    fn id(&self) -> &str;

    fn location(&self) -> Vector2D;

    fn dimensions(&self) -> Dimensions2D;

    fn visible(&self) -> bool {
        true
    }

    /// Box used by the collision helpers. Entities without one never collide.
    fn bounding_box(&self) -> Option<BoundingBox> {
        None
    }
}

/// A game object registered with the loop.
///
/// Every hook is optional. `init` runs once when the entity is inserted into a
/// registry; a phase hook runs once per frame, right after the game-level
/// callback of the same phase, and not at all when the game has no callback
/// for that phase.
pub trait Entity<S>: Spatial {
    fn init(&mut self) {}

    fn handle_input(&mut self, _toolbox: &mut InputToolbox<'_, S>) -> HookResult {
        Ok(())
    }

    fn update(&mut self, _toolbox: &mut FrameToolbox<'_, S>) -> HookResult {
        Ok(())
    }

    fn fixed_update(&mut self, _toolbox: &mut FrameToolbox<'_, S>) -> HookResult {
        Ok(())
    }

    fn render(&mut self, _toolbox: &mut FrameToolbox<'_, S>) -> HookResult {
        Ok(())
    }
}

/// Insertion-ordered registry of entities keyed by id.
pub struct Entities<S> {
    entries: Vec<Box<dyn Entity<S>>>,
}

impl<S> Entities<S> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Register an entity, running its `init` hook.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DuplicateEntity`] if the id is already taken; the
    /// entity is dropped without being initialized.
    pub fn insert<E: Entity<S> + 'static>(&mut self, entity: E) -> Result<(), EngineError> {
        self.insert_boxed(Box::new(entity))
    }

    /// [`Entities::insert`] for an already boxed entity.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DuplicateEntity`] if the id is already taken.
    pub fn insert_boxed(&mut self, mut entity: Box<dyn Entity<S>>) -> Result<(), EngineError> {
        if self.contains(entity.id()) {
            return Err(EngineError::DuplicateEntity(entity.id().to_owned()));
        }
        entity.init();
        self.entries.push(entity);
        Ok(())
    }

    /// Remove an entity by id, returning it if it was present. Later entities
    /// keep their relative order.
    pub fn remove(&mut self, id: &str) -> Option<Box<dyn Entity<S>>> {
        let index = self.entries.iter().position(|e| e.id() == id)?;
        Some(self.entries.remove(index))
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&dyn Entity<S>> {
        self.entries.iter().find(|e| e.id() == id).map(|e| &**e)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut dyn Entity<S>> {
        let entry = self.entries.iter_mut().find(|e| e.id() == id)?;
        let entity: &mut dyn Entity<S> = &mut **entry;
        Some(entity)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id() == id)
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.id())
    }

    /// Entities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Entity<S>> {
        self.entries.iter().map(|e| &**e)
    }

    /// Mutable entities in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn Entity<S>>> {
        self.entries.iter_mut()
    }

    /// Ids of every other entity whose bounding box overlaps the one with `id`.
    #[must_use]
    pub fn colliding_with(&self, id: &str) -> Vec<&str> {
        let Some(subject) = self.get(id) else {
            return Vec::new();
        };
        self.iter()
            .filter(|other| other.id() != id)
            .filter(|other| is_entity_colliding_with_entity(subject, *other))
            .map(|other| other.id())
            .collect()
    }

    /// Number of registered entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no entity is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S> Default for Entities<S> {
    fn default() -> Self {
        Self::new()
    }
}
