//! Keyboard state: the set of keys currently held down.
//!
//! The browser driver feeds `keydown`/`keyup` events into [`PressedKeys`];
//! the handle-input phase reads it through the input toolbox.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::collections::HashSet;

/// A keyboard key, named as the browser reports it (`"ArrowLeft"`, `" "`, `"a"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Keys currently pressed.
#[derive(Debug, Clone, Default)]
pub struct PressedKeys {
    keys: HashSet<String>,
}

impl PressedKeys {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key going down. Returns `false` if it was already held.
    pub fn press(&mut self, key: &Key) -> bool {
        self.keys.insert(key.0.clone())
    }

    /// Record a key going up. Returns `false` if it was not held.
    pub fn release(&mut self, key: &Key) -> bool {
        self.keys.remove(key.as_str())
    }

    #[must_use]
    pub fn is_pressed(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Whether any of `keys` is held.
    #[must_use]
    pub fn any_pressed(&self, keys: &[&str]) -> bool {
        keys.iter().any(|k| self.is_pressed(k))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Forget every held key.
    pub fn clear(&mut self) {
        self.keys.clear();
    }
}
