use super::*;
use crate::geometry::{BoundingBox, Dimensions2D, Vector2D};

// =============================================================
// Helpers
// =============================================================

struct Block {
    id: String,
    bounds: Option<BoundingBox>,
}

impl Spatial for Block {
    fn id(&self) -> &str {
        &self.id
    }

    fn location(&self) -> Vector2D {
        self.bounds.map(|b| b.location).unwrap_or_default()
    }

    fn dimensions(&self) -> Dimensions2D {
        self.bounds.map(|b| b.dimensions).unwrap_or_default()
    }

    fn bounding_box(&self) -> Option<BoundingBox> {
        self.bounds
    }
}

fn block(id: &str, x: f64, y: f64, w: f64, h: f64) -> Block {
    Block {
        id: id.to_owned(),
        bounds: Some(BoundingBox::new(Vector2D::new(x, y), Dimensions2D::new(w, h))),
    }
}

fn ghost(id: &str) -> Block {
    Block { id: id.to_owned(), bounds: None }
}

// =============================================================
// is_entity_colliding_with_entity
// =============================================================

#[test]
fn overlapping_boxes_collide() {
    let a = block("a", 0.0, 0.0, 10.0, 10.0);
    let b = block("b", 5.0, 5.0, 10.0, 10.0);
    assert!(is_entity_colliding_with_entity(&a, &b));
}

#[test]
fn separated_boxes_do_not_collide() {
    let a = block("a", 0.0, 0.0, 10.0, 10.0);
    let b = block("b", 20.0, 0.0, 10.0, 10.0);
    assert!(!is_entity_colliding_with_entity(&a, &b));
}

#[test]
fn vertically_separated_boxes_do_not_collide() {
    let a = block("a", 0.0, 0.0, 10.0, 10.0);
    let b = block("b", 0.0, 10.5, 10.0, 10.0);
    assert!(!is_entity_colliding_with_entity(&a, &b));
}

#[test]
fn touching_right_edge_collides() {
    let a = block("a", 0.0, 0.0, 10.0, 10.0);
    let b = block("b", 10.0, 0.0, 10.0, 10.0);
    assert!(is_entity_colliding_with_entity(&a, &b));
}

#[test]
fn touching_bottom_edge_collides() {
    let a = block("a", 0.0, 0.0, 10.0, 10.0);
    let b = block("b", 0.0, 10.0, 10.0, 10.0);
    assert!(is_entity_colliding_with_entity(&a, &b));
}

#[test]
fn touching_corner_collides() {
    let a = block("a", 0.0, 0.0, 10.0, 10.0);
    let b = block("b", 10.0, 10.0, 5.0, 5.0);
    assert!(is_entity_colliding_with_entity(&a, &b));
}

#[test]
fn contained_box_collides() {
    let outer = block("outer", 0.0, 0.0, 100.0, 100.0);
    let inner = block("inner", 40.0, 40.0, 2.0, 2.0);
    assert!(is_entity_colliding_with_entity(&outer, &inner));
    assert!(is_entity_colliding_with_entity(&inner, &outer));
}

#[test]
fn overlap_is_symmetric() {
    let cases = [
        (block("a", 0.0, 0.0, 10.0, 10.0), block("b", 9.0, 9.0, 1.0, 1.0)),
        (block("a", 0.0, 0.0, 10.0, 10.0), block("b", 11.0, 0.0, 1.0, 1.0)),
        (block("a", -5.0, -5.0, 3.0, 3.0), block("b", -2.0, -2.0, 4.0, 4.0)),
        (block("a", 0.0, 0.0, 0.0, 0.0), block("b", 0.0, 0.0, 0.0, 0.0)),
    ];
    for (a, b) in &cases {
        assert_eq!(is_entity_colliding_with_entity(a, b), is_entity_colliding_with_entity(b, a));
    }
}

#[test]
fn identical_boxes_collide() {
    let a = block("a", 3.0, 4.0, 5.0, 6.0);
    let b = block("b", 3.0, 4.0, 5.0, 6.0);
    assert!(is_entity_colliding_with_entity(&a, &b));
    assert!(is_entity_colliding_with_entity(&a, &a));
}

#[test]
fn missing_bounding_box_never_collides() {
    let a = ghost("a");
    let b = block("b", 0.0, 0.0, 10.0, 10.0);
    assert!(!is_entity_colliding_with_entity(&a, &b));
    assert!(!is_entity_colliding_with_entity(&b, &a));
    assert!(!is_entity_colliding_with_entity(&a, &ghost("c")));
}

// =============================================================
// is_entity_colliding
// =============================================================

#[test]
fn any_collision_finds_one_hit() {
    let subject = block("s", 0.0, 0.0, 10.0, 10.0);
    let others = vec![block("far", 50.0, 50.0, 1.0, 1.0), block("near", 5.0, 5.0, 1.0, 1.0)];
    assert!(is_entity_colliding(&subject, &others));
}

#[test]
fn any_collision_false_when_all_miss() {
    let subject = block("s", 0.0, 0.0, 10.0, 10.0);
    let others = vec![block("far", 50.0, 50.0, 1.0, 1.0), ghost("g")];
    assert!(!is_entity_colliding(&subject, &others));
}

#[test]
fn any_collision_false_for_empty_candidates() {
    let subject = block("s", 0.0, 0.0, 10.0, 10.0);
    let others: Vec<Block> = Vec::new();
    assert!(!is_entity_colliding(&subject, &others));
}

#[test]
fn any_collision_false_without_subject_box() {
    let subject = ghost("s");
    let others = vec![block("a", 0.0, 0.0, 100.0, 100.0)];
    assert!(!is_entity_colliding(&subject, &others));
}

#[test]
fn any_collision_accepts_trait_objects() {
    let subject = block("s", 0.0, 0.0, 10.0, 10.0);
    let hit = block("hit", 10.0, 0.0, 1.0, 1.0);
    let others: Vec<&dyn Spatial> = vec![&hit];
    assert!(is_entity_colliding(&subject, others));
}
