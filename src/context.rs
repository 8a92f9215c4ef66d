//! Shared game state keyed by name.
//!
//! A [`GameContext`] is created with the loop (or handed to it) and lives as
//! long as the loop does. Every callback and entity hook can read and write it
//! through its toolbox; values are stored type-erased and read back with a
//! typed lookup.

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;

use std::any::Any;
use std::collections::HashMap;

/// String-keyed store of arbitrary `'static` values.
#[derive(Default)]
pub struct GameContext {
    values: HashMap<String, Box<dyn Any>>,
}

impl GameContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`, replacing whatever was there.
    pub fn set<T: Any>(&mut self, key: impl Into<String>, value: T) {
        self.values.insert(key.into(), Box::new(value));
    }

    /// Typed read. `None` if the key is absent or holds another type.
    #[must_use]
    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.values.get(key)?.downcast_ref::<T>()
    }

    /// Typed mutable access. `None` if the key is absent or holds another type.
    pub fn get_mut<T: Any>(&mut self, key: &str) -> Option<&mut T> {
        self.values.get_mut(key)?.downcast_mut::<T>()
    }

    /// Remove and return the value under `key` if it holds a `T`. A value of
    /// another type stays in place.
    pub fn take<T: Any>(&mut self, key: &str) -> Option<T> {
        if !self.values.get(key)?.is::<T>() {
            return None;
        }
        match self.values.remove(key)?.downcast::<T>() {
            Ok(value) => Some(*value),
            Err(_) => None,
        }
    }

    /// Remove whatever is stored under `key`. Returns whether anything was removed.
    pub fn remove(&mut self, key: &str) -> bool {
        self.values.remove(key).is_some()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl std::fmt::Debug for GameContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<&str> = self.keys().collect();
        keys.sort_unstable();
        f.debug_struct("GameContext").field("keys", &keys).finish()
    }
}
