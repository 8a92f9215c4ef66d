//! Axis-aligned overlap tests between entities.
//!
//! Intervals are closed on every edge: boxes that share an edge or a corner
//! count as colliding. An entity without a bounding box never collides.

#[cfg(test)]
#[path = "collision_test.rs"]
mod collision_test;

use crate::entity::Spatial;

/// Whether the bounding boxes of `entity` and `other` overlap.
#[must_use]
pub fn is_entity_colliding_with_entity<A, B>(entity: &A, other: &B) -> bool
where
    A: Spatial + ?Sized,
    B: Spatial + ?Sized,
{
    let (Some(a), Some(b)) = (entity.bounding_box(), other.bounding_box()) else {
        return false;
    };
    let (a, b) = (a.rect(), b.rect());

    if a.left() > b.right() {
        return false;
    }
    if a.right() < b.left() {
        return false;
    }
    if a.top() > b.bottom() {
        return false;
    }
    if a.bottom() < b.top() {
        return false;
    }
    true
}

/// Whether `entity` overlaps at least one of `others`.
///
/// `others` is taken as given: if it contains `entity` itself, that pair
/// counts.
#[must_use]
pub fn is_entity_colliding<'a, A, B, I>(entity: &A, others: I) -> bool
where
    A: Spatial + ?Sized,
    B: Spatial + ?Sized + 'a,
    I: IntoIterator<Item = &'a B>,
{
    if entity.bounding_box().is_none() {
        return false;
    }
    others
        .into_iter()
        .any(|other| is_entity_colliding_with_entity(entity, other))
}
