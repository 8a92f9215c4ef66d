use super::*;

fn key(name: &str) -> Key {
    Key::from(name)
}

#[test]
fn new_set_is_empty() {
    let keys = PressedKeys::new();
    assert!(keys.is_empty());
    assert_eq!(keys.len(), 0);
}

#[test]
fn press_adds_key() {
    let mut keys = PressedKeys::new();
    assert!(keys.press(&key("ArrowLeft")));
    assert!(keys.is_pressed("ArrowLeft"));
    assert!(!keys.is_pressed("ArrowRight"));
}

#[test]
fn repeated_press_is_idempotent() {
    let mut keys = PressedKeys::new();
    keys.press(&key("a"));
    assert!(!keys.press(&key("a")));
    assert_eq!(keys.len(), 1);
}

#[test]
fn release_removes_key() {
    let mut keys = PressedKeys::new();
    keys.press(&key("a"));
    assert!(keys.release(&key("a")));
    assert!(keys.is_empty());
}

#[test]
fn release_of_unheld_key_reports_false() {
    let mut keys = PressedKeys::new();
    assert!(!keys.release(&key("Escape")));
}

#[test]
fn any_pressed_checks_alternatives() {
    let mut keys = PressedKeys::new();
    keys.press(&key("d"));
    assert!(keys.any_pressed(&["ArrowRight", "d"]));
    assert!(!keys.any_pressed(&["ArrowLeft", "a"]));
}

#[test]
fn iter_lists_held_keys() {
    let mut keys = PressedKeys::new();
    keys.press(&key("a"));
    keys.press(&key("b"));
    let mut held: Vec<&str> = keys.iter().collect();
    held.sort_unstable();
    assert_eq!(held, vec!["a", "b"]);
}

#[test]
fn clear_forgets_everything() {
    let mut keys = PressedKeys::new();
    keys.press(&key("a"));
    keys.press(&key("b"));
    keys.clear();
    assert!(keys.is_empty());
}

#[test]
fn key_as_str_round_trips_name() {
    assert_eq!(key(" ").as_str(), " ");
}
