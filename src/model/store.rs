//! Storage for committed shapes with stable ids and single selection.

use crate::geometry::Point;
use crate::model::shape::{Shape, ShapeId};

/// Owns every committed shape for the currently open image.
///
/// Shapes are kept in insertion order (the order they are persisted in)
/// and addressed through ids that stay valid across unrelated removals.
/// Selection is single: selecting one shape deselects the previous.
#[derive(Debug, Clone, Default)]
pub struct ShapeStore {
    entries: Vec<(ShapeId, Shape)>,
    next_id: ShapeId,
    selected: Option<ShapeId>,
}

impl ShapeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape and return its id.
    pub fn insert(&mut self, shape: Shape) -> ShapeId {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, shape));
        id
    }

    /// Remove a shape by id, clearing the selection if it pointed at it.
    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        let index = self.entries.iter().position(|(i, _)| *i == id)?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        Some(self.entries.remove(index).1)
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.entries.iter().find(|(i, _)| *i == id).map(|(_, s)| s)
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.entries
            .iter_mut()
            .find(|(i, _)| *i == id)
            .map(|(_, s)| s)
    }

    /// Iterate shapes with their ids, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ShapeId, &Shape)> {
        self.entries.iter().map(|(id, s)| (*id, s))
    }

    /// Iterate shapes in insertion order.
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.entries.iter().map(|(_, s)| s)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every shape and clear the selection.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.selected = None;
    }

    /// Change the selection. Returns whether it actually changed.
    pub fn select(&mut self, id: Option<ShapeId>) -> bool {
        debug_assert!(id.is_none_or(|id| self.get(id).is_some()));
        if self.selected == id {
            return false;
        }
        self.selected = id;
        true
    }

    pub fn selected(&self) -> Option<ShapeId> {
        self.selected
    }

    pub fn selected_shape(&self) -> Option<&Shape> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn selected_shape_mut(&mut self) -> Option<&mut Shape> {
        self.selected.and_then(|id| self.get_mut(id))
    }

    /// Find the shape under `point`.
    ///
    /// The most recently inserted shape wins, matching the visual
    /// stacking order where later shapes draw on top.
    pub fn hit_test(&self, point: &Point) -> Option<ShapeId> {
        self.entries
            .iter()
            .rev()
            .find(|(_, shape)| shape.contains(point))
            .map(|(id, _)| *id)
    }
}
