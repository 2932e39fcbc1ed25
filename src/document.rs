use egui::{Pos2, Vec2};
use log::info;

use crate::element::{Element, ElementType, Style, next_shape_id};
use crate::geometry::{self, polygons_overlap};

/// The drawing list: committed shapes in paint order (last is on top).
///
/// The document owns every shape; everything else refers to shapes by id.
#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: Vec<ElementType>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_element(&mut self, element: ElementType) {
        info!("Added {} {}", element.element_type(), element.id());
        self.elements.push(element);
    }

    pub fn elements(&self) -> &[ElementType] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.elements.iter().map(|e| e.id())
    }

    pub fn contains_id(&self, id: usize) -> bool {
        self.index_of(id).is_some()
    }

    pub fn index_of(&self, id: usize) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    pub fn find_element_by_id(&self, id: usize) -> Option<&ElementType> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn find_element_by_id_mut(&mut self, id: usize) -> Option<&mut ElementType> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    /// Mutable access to several shapes at once, in paint order.
    pub fn elements_mut_by_ids(&mut self, ids: &[usize]) -> Vec<&mut ElementType> {
        self.elements.iter_mut().filter(|e| ids.contains(&e.id())).collect()
    }

    /// Restyle the given shapes.
    pub fn set_style(&mut self, ids: &[usize], style: Style) {
        for element in self.elements_mut_by_ids(ids) {
            element.set_style(style);
        }
    }

    /// The topmost shape containing `pos`.
    pub fn element_at_position(&self, pos: Pos2) -> Option<&ElementType> {
        self.elements.iter().rev().find(|e| e.contains(pos))
    }

    /// Ids of every shape whose outline overlaps `area`, in paint order.
    ///
    /// A cheap circle test rejects far-away shapes before the separating-axis
    /// test. Zero-width or zero-height areas (straight drags) still hit.
    pub fn elements_in_area(&self, area: &[Pos2]) -> Vec<usize> {
        if area.is_empty() {
            return Vec::new();
        }
        let frame = geometry::bounds(area);
        let center = frame.center();
        let radius = frame.size().length() / 2.0;

        self.elements
            .iter()
            .filter(|e| e.touching(center, radius))
            .filter(|e| polygons_overlap(&e.polygon(), area))
            .map(|e| e.id())
            .collect()
    }

    pub fn remove_element(&mut self, id: usize) -> Option<ElementType> {
        let index = self.index_of(id)?;
        let removed = self.elements.remove(index);
        info!("Removed {} {}", removed.element_type(), id);
        Some(removed)
    }

    /// Remove the most recently added (topmost) shape.
    pub fn remove_last(&mut self) -> Option<ElementType> {
        let removed = self.elements.pop()?;
        info!("Erased last shape {}", removed.id());
        Some(removed)
    }

    /// Swap a shape with the one above it. Returns false at the top.
    pub fn raise(&mut self, id: usize) -> bool {
        match self.index_of(id) {
            Some(i) if i + 1 < self.elements.len() => {
                self.elements.swap(i, i + 1);
                true
            }
            _ => false,
        }
    }

    /// Swap a shape with the one below it. Returns false at the bottom.
    pub fn lower(&mut self, id: usize) -> bool {
        match self.index_of(id) {
            Some(i) if i > 0 => {
                self.elements.swap(i, i - 1);
                true
            }
            _ => false,
        }
    }

    /// Append deep copies of the given shapes and return the new ids.
    pub fn duplicate(&mut self, ids: &[usize], offset: Vec2) -> Vec<usize> {
        let copies: Vec<ElementType> = ids
            .iter()
            .filter_map(|id| self.find_element_by_id(*id))
            .map(|e| e.duplicate(next_shape_id(), offset))
            .collect();

        let new_ids: Vec<usize> = copies.iter().map(|e| e.id()).collect();
        for copy in copies {
            self.add_element(copy);
        }
        new_ids
    }

    pub fn clear(&mut self) {
        info!("Cleared {} shapes", self.elements.len());
        self.elements.clear();
    }
}
